//! Profile module dispatcher
//!
//! Create operations dispatch by profile variant. Retrieve, edit, and
//! delete dispatch by the caller's account role, resolved out-of-band from
//! the caller's email, never from a caller-supplied field. Retrieval
//! behavior cannot be spoofed by the request payload.

use std::sync::Arc;

use async_trait::async_trait;

use rmp_common::models::{NewFaculty, NewStudent};
use rmp_common::{EntityStore, Role};

use crate::envelope::{
    FacultyProfile, ModuleKind, ModuleRequest, ModuleResponse, ProfileDetail, ProfileOp,
    ProfilePayload, ProfileResponse, StudentProfile,
};
use crate::error::{catch_business, DispatchError};
use crate::router::ModuleHandler;

pub struct ProfileModule<S> {
    store: Arc<S>,
}

impl<S: EntityStore> ProfileModule<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn require_caller(caller_email: Option<&str>) -> Result<&str, DispatchError> {
        caller_email.ok_or(DispatchError::MissingField("caller email"))
    }

    /// Resolve the caller's trusted role, treating a missing account as a
    /// business outcome rather than a structural error.
    async fn caller_role(&self, caller: &str) -> Result<Result<Role, String>, DispatchError> {
        catch_business(self.store.account_role(caller).await)
    }

    async fn resolve_student(
        &self,
        profile: &StudentProfile,
    ) -> rmp_common::Result<NewStudent> {
        let mut major_ids = Vec::with_capacity(profile.major_names.len());
        for name in &profile.major_names {
            major_ids.push(self.store.major_by_name(name).await?.id);
        }
        let mut research_interest_ids = Vec::with_capacity(profile.research_interest_names.len());
        for name in &profile.research_interest_names {
            research_interest_ids.push(self.store.major_by_name(name).await?.id);
        }
        let mut research_period_ids = Vec::with_capacity(profile.research_period_names.len());
        for name in &profile.research_period_names {
            research_period_ids.push(self.store.research_period_by_name(name).await?.id);
        }
        Ok(NewStudent {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            graduation_year: profile.graduation_year,
            undergrad_year: profile.undergrad_year.clone(),
            interest_reason: profile.interest_reason.clone(),
            has_prior_experience: profile.has_prior_experience,
            is_active: true,
            major_ids,
            research_interest_ids,
            research_period_ids,
        })
    }

    async fn resolve_faculty(
        &self,
        profile: &FacultyProfile,
    ) -> rmp_common::Result<NewFaculty> {
        let mut department_ids = Vec::with_capacity(profile.department_names.len());
        for name in &profile.department_names {
            department_ids.push(self.store.department_by_name(name).await?.id);
        }
        Ok(NewFaculty {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            department_ids,
        })
    }

    async fn create(
        &self,
        payload: Option<ProfilePayload>,
    ) -> Result<ProfileResponse, DispatchError> {
        // Unset profile type fails distinctly from an unsupported one
        let payload = payload.ok_or(DispatchError::MissingField("profile payload"))?;
        match payload {
            ProfilePayload::Student(profile) => {
                if let Err(message) = validate_person(&profile.email, &profile.first_name) {
                    return Ok(ProfileResponse::failure(message));
                }
                let new_student = match self.resolve_student(&profile).await {
                    Ok(resolved) => resolved,
                    Err(err) => return wrap_business_err(err),
                };
                match catch_business(self.store.insert_student(&new_student).await)? {
                    Ok(_id) => Ok(ProfileResponse::ok()),
                    Err(message) => Ok(ProfileResponse::failure(message)),
                }
            }
            ProfilePayload::Faculty(profile) => {
                if let Err(message) = validate_person(&profile.email, &profile.first_name) {
                    return Ok(ProfileResponse::failure(message));
                }
                let new_faculty = match self.resolve_faculty(&profile).await {
                    Ok(resolved) => resolved,
                    Err(err) => return wrap_business_err(err),
                };
                match catch_business(self.store.insert_faculty(&new_faculty).await)? {
                    Ok(_id) => Ok(ProfileResponse::ok()),
                    Err(message) => Ok(ProfileResponse::failure(message)),
                }
            }
        }
    }

    async fn retrieve(&self, caller: &str) -> Result<ProfileResponse, DispatchError> {
        let role = match self.caller_role(caller).await? {
            Ok(role) => role,
            Err(message) => return Ok(ProfileResponse::failure(message)),
        };
        match role {
            Role::Student => match catch_business(self.store.student_detail(caller).await)? {
                Ok(detail) => Ok(ProfileResponse {
                    outcome: crate::envelope::Outcome::ok(),
                    profile: Some(ProfileDetail::Student(detail)),
                }),
                Err(message) => Ok(ProfileResponse::failure(message)),
            },
            Role::Faculty => match catch_business(self.store.faculty_detail(caller).await)? {
                Ok(detail) => Ok(ProfileResponse {
                    outcome: crate::envelope::Outcome::ok(),
                    profile: Some(ProfileDetail::Faculty(detail)),
                }),
                Err(message) => Ok(ProfileResponse::failure(message)),
            },
            Role::Admin => Err(DispatchError::UnsupportedOperation(
                "profile retrieval for role admin".into(),
            )),
        }
    }

    async fn edit(
        &self,
        caller: &str,
        payload: Option<ProfilePayload>,
    ) -> Result<ProfileResponse, DispatchError> {
        let payload = payload.ok_or(DispatchError::MissingField("profile payload"))?;
        let role = match self.caller_role(caller).await? {
            Ok(role) => role,
            Err(message) => return Ok(ProfileResponse::failure(message)),
        };
        match (role, payload) {
            (Role::Student, ProfilePayload::Student(profile)) => {
                let existing = match catch_business(self.store.student_by_email(caller).await)? {
                    Ok(student) => student,
                    Err(message) => return Ok(ProfileResponse::failure(message)),
                };
                let new_student = match self.resolve_student(&profile).await {
                    Ok(resolved) => resolved,
                    Err(err) => return wrap_business_err(err),
                };
                match catch_business(self.store.update_student(existing.id, &new_student).await)? {
                    Ok(()) => Ok(ProfileResponse::ok()),
                    Err(message) => Ok(ProfileResponse::failure(message)),
                }
            }
            (Role::Faculty, ProfilePayload::Faculty(profile)) => {
                let existing = match catch_business(self.store.faculty_by_email(caller).await)? {
                    Ok(member) => member,
                    Err(message) => return Ok(ProfileResponse::failure(message)),
                };
                let new_faculty = match self.resolve_faculty(&profile).await {
                    Ok(resolved) => resolved,
                    Err(err) => return wrap_business_err(err),
                };
                match catch_business(self.store.update_faculty(existing.id, &new_faculty).await)? {
                    Ok(()) => Ok(ProfileResponse::ok()),
                    Err(message) => Ok(ProfileResponse::failure(message)),
                }
            }
            (role, payload) => Err(DispatchError::UnsupportedOperation(format!(
                "edit of {} profile by {} account",
                payload_variant(&payload),
                role.as_str(),
            ))),
        }
    }

    async fn delete(&self, caller: &str) -> Result<ProfileResponse, DispatchError> {
        let role = match self.caller_role(caller).await? {
            Ok(role) => role,
            Err(message) => return Ok(ProfileResponse::failure(message)),
        };
        match role {
            Role::Student => {
                let existing = match catch_business(self.store.student_by_email(caller).await)? {
                    Ok(student) => student,
                    Err(message) => return Ok(ProfileResponse::failure(message)),
                };
                match catch_business(self.store.delete_student(existing.id).await)? {
                    Ok(()) => Ok(ProfileResponse::ok()),
                    Err(message) => Ok(ProfileResponse::failure(message)),
                }
            }
            Role::Faculty => {
                let existing = match catch_business(self.store.faculty_by_email(caller).await)? {
                    Ok(member) => member,
                    Err(message) => return Ok(ProfileResponse::failure(message)),
                };
                match catch_business(self.store.delete_faculty(existing.id).await)? {
                    Ok(()) => Ok(ProfileResponse::ok()),
                    Err(message) => Ok(ProfileResponse::failure(message)),
                }
            }
            Role::Admin => Err(DispatchError::UnsupportedOperation(
                "profile deletion for role admin".into(),
            )),
        }
    }
}

fn payload_variant(payload: &ProfilePayload) -> &'static str {
    match payload {
        ProfilePayload::Student(_) => "student",
        ProfilePayload::Faculty(_) => "faculty",
    }
}

fn validate_person(email: &str, first_name: &str) -> Result<(), String> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(format!("invalid email address '{email}'"));
    }
    if first_name.trim().is_empty() {
        return Err("first name must not be empty".into());
    }
    Ok(())
}

fn wrap_business_err(err: rmp_common::Error) -> Result<ProfileResponse, DispatchError> {
    match catch_business::<()>(Err(err))? {
        Ok(()) => unreachable!("constructed from an error"),
        Err(message) => Ok(ProfileResponse::failure(message)),
    }
}

#[async_trait]
impl<S: EntityStore + 'static> ModuleHandler for ProfileModule<S> {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Profile
    }

    async fn handle(
        &self,
        caller_email: Option<&str>,
        request: ModuleRequest,
    ) -> Result<ModuleResponse, DispatchError> {
        let ModuleRequest::Profile(request) = request else {
            return Err(DispatchError::UnexpectedDiscriminant {
                expected: "Profile",
                actual: request.kind().to_string(),
            });
        };
        let op = request
            .op
            .ok_or(DispatchError::MissingField("profile operation"))?;
        let response = match op {
            ProfileOp::Create { profile } => self.create(profile).await?,
            ProfileOp::Retrieve => {
                let caller = Self::require_caller(caller_email)?;
                self.retrieve(caller).await?
            }
            ProfileOp::Edit { profile } => {
                let caller = Self::require_caller(caller_email)?;
                self.edit(caller, profile).await?
            }
            ProfileOp::Delete => {
                let caller = Self::require_caller(caller_email)?;
                self.delete(caller).await?
            }
        };
        Ok(ModuleResponse::Profile(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::ProfileRequest;
    use crate::test_store::{department, faculty, major, student, InMemoryStore};

    fn student_profile(email: &str, interest_names: Vec<&str>) -> StudentProfile {
        StudentProfile {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            graduation_year: 2027,
            undergrad_year: "junior".into(),
            interest_reason: String::new(),
            has_prior_experience: false,
            major_names: vec![],
            research_interest_names: interest_names.into_iter().map(String::from).collect(),
            research_period_names: vec![],
        }
    }

    fn profile_request(op: Option<ProfileOp>) -> ModuleRequest {
        ModuleRequest::Profile(ProfileRequest { op })
    }

    async fn handle(
        store: InMemoryStore,
        caller: Option<&str>,
        op: Option<ProfileOp>,
    ) -> Result<ModuleResponse, DispatchError> {
        let module = ProfileModule::new(Arc::new(store));
        module.handle(caller, profile_request(op)).await
    }

    fn expect_profile(response: ModuleResponse) -> ProfileResponse {
        match response {
            ModuleResponse::Profile(profile) => profile,
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_with_unset_payload_is_missing_field_not_unsupported() {
        let err = handle(
            InMemoryStore::default(),
            None,
            Some(ProfileOp::Create { profile: None }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DispatchError::MissingField("profile payload")));
    }

    #[tokio::test]
    async fn unset_operation_fails_fast() {
        let err = handle(InMemoryStore::default(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::MissingField("profile operation")
        ));
    }

    #[tokio::test]
    async fn create_student_resolves_interest_names() {
        let mut store = InMemoryStore::default();
        let dept = department(&mut store, 1, "Science");
        let bio = major(&mut store, 1, "Biology", dept.id, &[]);
        let module = ProfileModule::new(Arc::new(store));

        let response = module
            .handle(
                None,
                profile_request(Some(ProfileOp::Create {
                    profile: Some(ProfilePayload::Student(student_profile(
                        "ada@school.edu",
                        vec!["Biology"],
                    ))),
                })),
            )
            .await
            .unwrap();
        assert!(expect_profile(response).outcome.success);

        let inserted = module.store.inserted_students.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].research_interest_ids, vec![bio.id]);
    }

    #[tokio::test]
    async fn unknown_major_name_is_a_business_failure_not_an_error() {
        let response = handle(
            InMemoryStore::default(),
            None,
            Some(ProfileOp::Create {
                profile: Some(ProfilePayload::Student(student_profile(
                    "ada@school.edu",
                    vec!["Botany"],
                ))),
            }),
        )
        .await
        .unwrap();
        let profile = expect_profile(response);
        assert!(!profile.outcome.success);
        assert!(profile.outcome.message.unwrap().contains("Botany"));
    }

    #[tokio::test]
    async fn retrieval_is_driven_by_stored_role() {
        let mut store = InMemoryStore::default();
        let dept = department(&mut store, 1, "Science");
        faculty(&mut store, 1, "grace@school.edu", &[dept.id]);
        // The account table, not the request, says this caller is faculty
        store
            .accounts
            .insert("grace@school.edu".into(), Role::Faculty);

        let response = handle(store, Some("grace@school.edu"), Some(ProfileOp::Retrieve))
            .await
            .unwrap();
        let profile = expect_profile(response);
        assert!(profile.outcome.success);
        assert!(matches!(profile.profile, Some(ProfileDetail::Faculty(_))));
    }

    #[tokio::test]
    async fn admin_retrieval_is_unsupported() {
        let mut store = InMemoryStore::default();
        store.accounts.insert("root@school.edu".into(), Role::Admin);

        let err = handle(store, Some("root@school.edu"), Some(ProfileOp::Retrieve))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnsupportedOperation(_)));
    }

    #[tokio::test]
    async fn retrieve_without_caller_is_missing_field() {
        let err = handle(InMemoryStore::default(), None, Some(ProfileOp::Retrieve))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::MissingField("caller email")));
    }

    #[tokio::test]
    async fn unknown_account_is_a_business_failure() {
        let response = handle(
            InMemoryStore::default(),
            Some("ghost@school.edu"),
            Some(ProfileOp::Retrieve),
        )
        .await
        .unwrap();
        assert!(!expect_profile(response).outcome.success);
    }

    #[tokio::test]
    async fn role_and_payload_mismatch_on_edit_is_unsupported() {
        let mut store = InMemoryStore::default();
        student(&mut store, 1, "ada@school.edu", &[], &[]);
        store.accounts.insert("ada@school.edu".into(), Role::Student);

        let err = handle(
            store,
            Some("ada@school.edu"),
            Some(ProfileOp::Edit {
                profile: Some(ProfilePayload::Faculty(FacultyProfile {
                    first_name: "Ada".into(),
                    last_name: "Lovelace".into(),
                    email: "ada@school.edu".into(),
                    department_names: vec![],
                })),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DispatchError::UnsupportedOperation(_)));
    }

    #[tokio::test]
    async fn invalid_email_is_a_business_failure() {
        let response = handle(
            InMemoryStore::default(),
            None,
            Some(ProfileOp::Create {
                profile: Some(ProfilePayload::Student(student_profile("not-an-email", vec![]))),
            }),
        )
        .await
        .unwrap();
        assert!(!expect_profile(response).outcome.success);
    }
}
