//! Entity models
//!
//! Plain records returned by the entity accessors. The dispatch core only
//! reads these; creation and editing go through the write methods on
//! [`crate::store::EntityStore`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    pub id: i64,
    pub name: String,
}

/// A field of study. Belongs to one department; serves both as a student's
/// declared major and as a research-field interest, distinguished only by
/// which relation is queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Major {
    pub id: i64,
    pub name: String,
    pub department_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub graduation_year: i64,
    /// Undergraduate year code ("freshman", "sophomore", ...)
    pub undergrad_year: String,
    pub interest_reason: String,
    pub has_prior_experience: bool,
    pub is_active: bool,
}

/// A research project. Always owned by exactly one faculty member;
/// `faculty_id` is never null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub desired_qualifications: String,
    pub is_active: bool,
    pub faculty_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchPeriod {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmbrellaTopic {
    pub id: i64,
    pub name: String,
}

// ========================================
// Aggregate views
// ========================================

/// A student with its related collections loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDetail {
    pub student: Student,
    pub majors: Vec<Major>,
    /// Majors the student wants to research in; independent of `majors`.
    pub research_interests: Vec<Major>,
    pub research_periods: Vec<ResearchPeriod>,
}

/// A faculty member with departments and owned projects loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyDetail {
    pub faculty: Faculty,
    pub departments: Vec<Department>,
    pub projects: Vec<ProjectDetail>,
}

/// A project with its related collections loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub majors: Vec<Major>,
    pub departments: Vec<Department>,
    pub research_periods: Vec<ResearchPeriod>,
    pub umbrella_topics: Vec<UmbrellaTopic>,
}

// ========================================
// Write records (relation names already resolved to ids)
// ========================================

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub graduation_year: i64,
    pub undergrad_year: String,
    pub interest_reason: String,
    pub has_prior_experience: bool,
    pub is_active: bool,
    pub major_ids: Vec<i64>,
    pub research_interest_ids: Vec<i64>,
    pub research_period_ids: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct NewFaculty {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_ids: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub desired_qualifications: String,
    pub is_active: bool,
    /// Owning faculty member. Mandatory: a project without an owner is
    /// invalid and must never be constructed.
    pub faculty_id: i64,
    pub major_ids: Vec<i64>,
    pub department_ids: Vec<i64>,
    pub research_period_ids: Vec<i64>,
    pub umbrella_topic_ids: Vec<i64>,
}
