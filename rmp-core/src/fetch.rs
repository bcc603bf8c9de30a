//! Fetch module dispatcher
//!
//! Operation selection is a two-level discriminant: direct (unfiltered
//! listing) vs filtered (hierarchy assembly), then a type enum within each
//! mode. Each (mode, type) pair maps to exactly one handler; an unset
//! discriminant at any level fails fast before any accessor call.

use std::sync::Arc;

use async_trait::async_trait;

use rmp_common::EntityStore;

use crate::envelope::{
    DirectType, FetchQuery, FetchResponse, FilteredType, ModuleKind, ModuleRequest, ModuleResponse,
};
use crate::error::DispatchError;
use crate::hierarchy::{
    build_department_tree, build_discipline_project_tree, build_discipline_student_tree,
};
use crate::router::ModuleHandler;

pub struct FetchModule<S> {
    store: Arc<S>,
}

impl<S: EntityStore> FetchModule<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn fetch_direct(&self, kind: DirectType) -> Result<FetchResponse, DispatchError> {
        Ok(match kind {
            DirectType::Departments => FetchResponse::Departments {
                departments: self.store.departments().await?,
            },
            DirectType::Disciplines => FetchResponse::Disciplines {
                disciplines: self.store.disciplines().await?,
            },
            DirectType::Majors => FetchResponse::Majors {
                majors: self.store.majors().await?,
            },
            DirectType::ResearchPeriods => FetchResponse::ResearchPeriods {
                research_periods: self.store.research_periods().await?,
            },
            DirectType::UmbrellaTopics => FetchResponse::UmbrellaTopics {
                umbrella_topics: self.store.umbrella_topics().await?,
            },
        })
    }

    async fn fetch_faculty_tree(&self, kind: FilteredType) -> Result<FetchResponse, DispatchError> {
        if kind != FilteredType::Faculty {
            return Err(DispatchError::UnexpectedDiscriminant {
                expected: "Faculty",
                actual: format!("{kind:?}"),
            });
        }
        let departments = self.store.departments().await?;
        let tree = build_department_tree(self.store.as_ref(), departments).await?;
        Ok(FetchResponse::FacultyTree { departments: tree })
    }

    async fn fetch_student_tree(&self, kind: FilteredType) -> Result<FetchResponse, DispatchError> {
        if kind != FilteredType::Students {
            return Err(DispatchError::UnexpectedDiscriminant {
                expected: "Students",
                actual: format!("{kind:?}"),
            });
        }
        let disciplines = self.store.disciplines().await?;
        let tree = build_discipline_student_tree(self.store.as_ref(), disciplines).await?;
        Ok(FetchResponse::StudentTree { disciplines: tree })
    }

    // Unlike the student/faculty paths this performs no FilteredType
    // re-check; callers reach it only through the Filtered(Projects) arm.
    async fn fetch_project_tree(
        &self,
        _kind: FilteredType,
    ) -> Result<FetchResponse, DispatchError> {
        let disciplines = self.store.disciplines().await?;
        let tree = build_discipline_project_tree(self.store.as_ref(), disciplines).await?;
        Ok(FetchResponse::ProjectTree { disciplines: tree })
    }
}

#[async_trait]
impl<S: EntityStore + 'static> ModuleHandler for FetchModule<S> {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Fetch
    }

    async fn handle(
        &self,
        _caller_email: Option<&str>,
        request: ModuleRequest,
    ) -> Result<ModuleResponse, DispatchError> {
        let ModuleRequest::Fetch(request) = request else {
            return Err(DispatchError::UnexpectedDiscriminant {
                expected: "Fetch",
                actual: request.kind().to_string(),
            });
        };
        let query = request
            .query
            .ok_or(DispatchError::MissingField("fetch query"))?;
        let response = match query {
            FetchQuery::Direct { kind } => {
                let kind = kind.ok_or(DispatchError::MissingField("direct fetch type"))?;
                self.fetch_direct(kind).await?
            }
            FetchQuery::Filtered { kind } => {
                let kind = kind.ok_or(DispatchError::MissingField("filtered fetch type"))?;
                match kind {
                    FilteredType::Faculty => self.fetch_faculty_tree(kind).await?,
                    FilteredType::Students => self.fetch_student_tree(kind).await?,
                    FilteredType::Projects => self.fetch_project_tree(kind).await?,
                }
            }
        };
        Ok(ModuleResponse::Fetch(response))
    }
}
