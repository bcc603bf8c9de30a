//! Request and response envelope types
//!
//! The envelope is the core's entire external interface: an outer message
//! wrapping exactly one typed request variant, dispatched by discriminant.
//! Unions are internally tagged (`type` field) so the wire shape mirrors
//! the discriminated-message contract.

use serde::{Deserialize, Serialize};

use rmp_common::models::{
    Department, Discipline, FacultyDetail, Major, Project, ResearchPeriod, Student, StudentDetail,
    UmbrellaTopic,
};

use crate::hierarchy::{DepartmentNode, DisciplineNode};

// ========================================
// Request side
// ========================================

/// Outer request envelope. `request` unset is a structural error caught by
/// the router before any handler runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Caller identity; required for profile and project operations.
    /// Never used to select retrieval behavior directly; the caller's
    /// role is resolved out-of-band from this address.
    #[serde(default)]
    pub caller_email: Option<String>,
    #[serde(default)]
    pub request: Option<ModuleRequest>,
}

/// Top-level request union, one variant per module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModuleRequest {
    Fetch(FetchRequest),
    Profile(ProfileRequest),
    Project(ProjectRequest),
}

impl ModuleRequest {
    /// The discriminant tag identifying this variant
    pub fn kind(&self) -> ModuleKind {
        match self {
            ModuleRequest::Fetch(_) => ModuleKind::Fetch,
            ModuleRequest::Profile(_) => ModuleKind::Profile,
            ModuleRequest::Project(_) => ModuleKind::Project,
        }
    }
}

/// Fieldless request-kind tag used as the router table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    Fetch,
    Profile,
    Project,
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModuleKind::Fetch => "Fetch",
            ModuleKind::Profile => "Profile",
            ModuleKind::Project => "Project",
        };
        f.write_str(name)
    }
}

// ---- Fetch module ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRequest {
    #[serde(default)]
    pub query: Option<FetchQuery>,
}

/// First-level fetch discriminant: unfiltered listing vs hierarchy-filtered
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FetchQuery {
    Direct {
        #[serde(default)]
        kind: Option<DirectType>,
    },
    Filtered {
        #[serde(default)]
        kind: Option<FilteredType>,
    },
}

/// Second-level discriminant for direct (unfiltered) fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectType {
    Departments,
    Disciplines,
    Majors,
    ResearchPeriods,
    UmbrellaTopics,
}

/// Second-level discriminant for filtered (hierarchy) fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilteredType {
    Faculty,
    Students,
    Projects,
}

// ---- Profile module ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub op: Option<ProfileOp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProfileOp {
    /// Dispatches further by profile variant
    Create {
        #[serde(default)]
        profile: Option<ProfilePayload>,
    },
    /// Dispatches by the caller's trusted account role
    Retrieve,
    Edit {
        #[serde(default)]
        profile: Option<ProfilePayload>,
    },
    Delete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProfilePayload {
    Student(StudentProfile),
    Faculty(FacultyProfile),
}

/// Student profile submission. Related entities are referenced by name and
/// resolved against the store during assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub graduation_year: i64,
    pub undergrad_year: String,
    #[serde(default)]
    pub interest_reason: String,
    #[serde(default)]
    pub has_prior_experience: bool,
    #[serde(default)]
    pub major_names: Vec<String>,
    #[serde(default)]
    pub research_interest_names: Vec<String>,
    #[serde(default)]
    pub research_period_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub department_names: Vec<String>,
}

// ---- Project module ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRequest {
    #[serde(default)]
    pub op: Option<ProjectOp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProjectOp {
    Create(ProjectPayload),
    Edit {
        project_id: i64,
        payload: ProjectPayload,
    },
    Delete {
        project_id: i64,
    },
}

/// Project submission. The owner is referenced by email; a project without
/// a resolvable owner is never constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub desired_qualifications: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub owner_email: String,
    #[serde(default)]
    pub major_names: Vec<String>,
    #[serde(default)]
    pub department_names: Vec<String>,
    #[serde(default)]
    pub research_period_names: Vec<String>,
    #[serde(default)]
    pub umbrella_topic_names: Vec<String>,
}

fn default_true() -> bool {
    true
}

// ========================================
// Response side
// ========================================

/// Outer response envelope, mirroring the request's kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub response: ModuleResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModuleResponse {
    Fetch(FetchResponse),
    Profile(ProfileResponse),
    Project(ProjectResponse),
}

/// Business-outcome flag carried by management responses. Tier-2 failures
/// (named entity not found, validation) surface here; structural errors
/// never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Outcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Tagged `result` rather than `type`: this union nests directly inside
/// the `type`-tagged [`ModuleResponse`], so the keys must not collide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum FetchResponse {
    Departments {
        departments: Vec<Department>,
    },
    Disciplines {
        disciplines: Vec<Discipline>,
    },
    Majors {
        majors: Vec<Major>,
    },
    ResearchPeriods {
        research_periods: Vec<ResearchPeriod>,
    },
    UmbrellaTopics {
        umbrella_topics: Vec<UmbrellaTopic>,
    },
    /// Department → faculty → owned-projects tree
    FacultyTree {
        departments: Vec<DepartmentNode>,
    },
    /// Discipline → major → students tree
    StudentTree {
        disciplines: Vec<DisciplineNode<Student>>,
    },
    /// Discipline → major → projects tree
    ProjectTree {
        disciplines: Vec<DisciplineNode<Project>>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileDetail>,
}

impl ProfileResponse {
    pub fn ok() -> Self {
        Self {
            outcome: Outcome::ok(),
            profile: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::failure(message),
            profile: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProfileDetail {
    Student(StudentDetail),
    Faculty(FacultyDetail),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
}

impl ProjectResponse {
    pub fn ok(project_id: Option<i64>) -> Self {
        Self {
            outcome: Outcome::ok(),
            project_id,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::failure(message),
            project_id: None,
        }
    }
}
