//! Entity accessor contract
//!
//! The dispatch core reads entities exclusively through [`EntityStore`].
//! Lookups by name are case-sensitive exact matches; absence is a
//! [`crate::Error::NotFound`], never an empty result.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    Department, Discipline, Faculty, FacultyDetail, Major, NewFaculty, NewProject, NewStudent,
    Project, ResearchPeriod, Student, StudentDetail, UmbrellaTopic,
};
use crate::{Error, Result};

/// Account role resolved out-of-band from the caller's email.
///
/// Retrieval dispatch is keyed off this trusted lookup, never off a
/// caller-supplied field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    /// Parse the role column value stored in the accounts table.
    pub fn parse(value: &str) -> Result<Role> {
        match value {
            "student" => Ok(Role::Student),
            "faculty" => Ok(Role::Faculty),
            "admin" => Ok(Role::Admin),
            other => Err(Error::Internal(format!("unknown account role: {other}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
        }
    }
}

/// Read/write access to platform entities.
///
/// Collection methods preserve the backing store's row order; the callers
/// impose no additional sort. Hierarchy fan-out is one call per parent by
/// design; implementations may batch internally as long as results are
/// observably identical.
#[async_trait]
pub trait EntityStore: Send + Sync {
    // ---- find-all lookups ----

    async fn departments(&self) -> Result<Vec<Department>>;
    async fn disciplines(&self) -> Result<Vec<Discipline>>;
    async fn majors(&self) -> Result<Vec<Major>>;
    async fn research_periods(&self) -> Result<Vec<ResearchPeriod>>;
    async fn umbrella_topics(&self) -> Result<Vec<UmbrellaTopic>>;

    // ---- by-parent lookups ----

    async fn faculty_by_department(&self, department_id: i64) -> Result<Vec<Faculty>>;
    async fn projects_by_faculty(&self, faculty_id: i64) -> Result<Vec<Project>>;
    async fn majors_by_discipline(&self, discipline_id: i64) -> Result<Vec<Major>>;
    async fn projects_by_major(&self, major_id: i64) -> Result<Vec<Project>>;
    /// Students whose declared major is the given major.
    async fn students_by_major(&self, major_id: i64) -> Result<Vec<Student>>;
    /// Students whose research-field interests include the given major.
    /// Independent of [`Self::students_by_major`].
    async fn students_interested_in(&self, major_id: i64) -> Result<Vec<Student>>;

    // ---- by-name lookups (case-sensitive exact; NotFound on absence) ----

    async fn major_by_name(&self, name: &str) -> Result<Major>;
    async fn department_by_name(&self, name: &str) -> Result<Department>;
    async fn research_period_by_name(&self, name: &str) -> Result<ResearchPeriod>;
    async fn umbrella_topic_by_name(&self, name: &str) -> Result<UmbrellaTopic>;

    // ---- by-email lookups ----

    async fn student_by_email(&self, email: &str) -> Result<Student>;
    async fn faculty_by_email(&self, email: &str) -> Result<Faculty>;

    /// Trusted role lookup for the caller's account.
    async fn account_role(&self, email: &str) -> Result<Role>;

    // ---- aggregate views ----

    async fn student_detail(&self, email: &str) -> Result<StudentDetail>;
    async fn faculty_detail(&self, email: &str) -> Result<FacultyDetail>;
    /// Detail views for all active students (match-job input).
    async fn active_student_details(&self) -> Result<Vec<StudentDetail>>;
    async fn all_faculty_details(&self) -> Result<Vec<FacultyDetail>>;
    /// Detail views for projects created after the given instant.
    async fn project_details_created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<crate::models::ProjectDetail>>;
    /// Detail views for active students who signed up after the given instant.
    async fn student_details_created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<StudentDetail>>;

    // ---- writes (used by the profile/project management operations) ----

    async fn insert_student(&self, student: &NewStudent) -> Result<i64>;
    async fn update_student(&self, id: i64, student: &NewStudent) -> Result<()>;
    async fn delete_student(&self, id: i64) -> Result<()>;

    async fn insert_faculty(&self, faculty: &NewFaculty) -> Result<i64>;
    async fn update_faculty(&self, id: i64, faculty: &NewFaculty) -> Result<()>;
    async fn delete_faculty(&self, id: i64) -> Result<()>;

    async fn insert_project(&self, project: &NewProject) -> Result<i64>;
    async fn update_project(&self, id: i64, project: &NewProject) -> Result<()>;
    async fn delete_project(&self, id: i64) -> Result<()>;
}
