//! Project module dispatcher
//!
//! Flat create/edit/delete dispatch. Related entities arrive as names and
//! are resolved against the store during assembly; an unresolvable name is
//! a business failure wrapped into the response, not a dispatch error.
//! The owner email must resolve to a faculty member; a project without an
//! owner is never constructed.

use std::sync::Arc;

use async_trait::async_trait;

use rmp_common::models::NewProject;
use rmp_common::EntityStore;

use crate::envelope::{
    ModuleKind, ModuleRequest, ModuleResponse, ProjectOp, ProjectPayload, ProjectResponse,
};
use crate::error::{catch_business, DispatchError};
use crate::router::ModuleHandler;

pub struct ProjectModule<S> {
    store: Arc<S>,
}

impl<S: EntityStore> ProjectModule<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn resolve(&self, payload: &ProjectPayload) -> rmp_common::Result<NewProject> {
        if payload.name.trim().is_empty() {
            return Err(rmp_common::Error::InvalidInput(
                "project name must not be empty".into(),
            ));
        }
        let owner = self.store.faculty_by_email(&payload.owner_email).await?;
        let mut major_ids = Vec::with_capacity(payload.major_names.len());
        for name in &payload.major_names {
            major_ids.push(self.store.major_by_name(name).await?.id);
        }
        let mut department_ids = Vec::with_capacity(payload.department_names.len());
        for name in &payload.department_names {
            department_ids.push(self.store.department_by_name(name).await?.id);
        }
        let mut research_period_ids = Vec::with_capacity(payload.research_period_names.len());
        for name in &payload.research_period_names {
            research_period_ids.push(self.store.research_period_by_name(name).await?.id);
        }
        let mut umbrella_topic_ids = Vec::with_capacity(payload.umbrella_topic_names.len());
        for name in &payload.umbrella_topic_names {
            umbrella_topic_ids.push(self.store.umbrella_topic_by_name(name).await?.id);
        }
        Ok(NewProject {
            name: payload.name.clone(),
            description: payload.description.clone(),
            desired_qualifications: payload.desired_qualifications.clone(),
            is_active: payload.is_active,
            faculty_id: owner.id,
            major_ids,
            department_ids,
            research_period_ids,
            umbrella_topic_ids,
        })
    }

    async fn create(&self, payload: ProjectPayload) -> Result<ProjectResponse, DispatchError> {
        let new_project = match catch_business(self.resolve(&payload).await)? {
            Ok(resolved) => resolved,
            Err(message) => return Ok(ProjectResponse::failure(message)),
        };
        match catch_business(self.store.insert_project(&new_project).await)? {
            Ok(id) => Ok(ProjectResponse::ok(Some(id))),
            Err(message) => Ok(ProjectResponse::failure(message)),
        }
    }

    async fn edit(
        &self,
        project_id: i64,
        payload: ProjectPayload,
    ) -> Result<ProjectResponse, DispatchError> {
        let new_project = match catch_business(self.resolve(&payload).await)? {
            Ok(resolved) => resolved,
            Err(message) => return Ok(ProjectResponse::failure(message)),
        };
        match catch_business(self.store.update_project(project_id, &new_project).await)? {
            Ok(()) => Ok(ProjectResponse::ok(Some(project_id))),
            Err(message) => Ok(ProjectResponse::failure(message)),
        }
    }

    async fn delete(&self, project_id: i64) -> Result<ProjectResponse, DispatchError> {
        match catch_business(self.store.delete_project(project_id).await)? {
            Ok(()) => Ok(ProjectResponse::ok(None)),
            Err(message) => Ok(ProjectResponse::failure(message)),
        }
    }
}

#[async_trait]
impl<S: EntityStore + 'static> ModuleHandler for ProjectModule<S> {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Project
    }

    async fn handle(
        &self,
        _caller_email: Option<&str>,
        request: ModuleRequest,
    ) -> Result<ModuleResponse, DispatchError> {
        let ModuleRequest::Project(request) = request else {
            return Err(DispatchError::UnexpectedDiscriminant {
                expected: "Project",
                actual: request.kind().to_string(),
            });
        };
        // Missing ProjectRequest entirely fails earlier, at the envelope;
        // an unset operation inside it is reported as unsupported.
        let op = request
            .op
            .ok_or_else(|| DispatchError::UnsupportedOperation("not set".into()))?;
        let response = match op {
            ProjectOp::Create(payload) => self.create(payload).await?,
            ProjectOp::Edit {
                project_id,
                payload,
            } => self.edit(project_id, payload).await?,
            ProjectOp::Delete { project_id } => self.delete(project_id).await?,
        };
        Ok(ModuleResponse::Project(response))
    }
}
