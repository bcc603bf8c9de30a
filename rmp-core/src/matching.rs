//! Matching engine
//!
//! Correlates students with projects (and faculty with students) for
//! notification purposes. Comparison is over major *names*, not entity
//! identity: two differently-cased spellings of the same name are equal,
//! and differing text never matches regardless of underlying ids.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use rmp_common::models::{FacultyDetail, ProjectDetail, StudentDetail};

/// A project matched to a student, keyed for notification rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMatch {
    pub project_id: i64,
    pub name: String,
}

/// A student matched to a faculty member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentMatch {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A student matches a project iff at least one of the project's major
/// names equals, case-insensitively, at least one of the student's
/// research-field-interest major names. Either side empty never matches.
fn project_matches_interests(project: &ProjectDetail, interests: &HashSet<String>) -> bool {
    if interests.is_empty() {
        return false;
    }
    project
        .majors
        .iter()
        .any(|major| interests.contains(&major.name.to_ascii_lowercase()))
}

fn interest_names(student: &StudentDetail) -> HashSet<String> {
    student
        .research_interests
        .iter()
        .map(|major| major.name.to_ascii_lowercase())
        .collect()
}

/// Map each student email to the new projects that match the student's
/// research-field interests. Students with no matching project are omitted
/// entirely, never mapped to an empty list.
pub fn match_students_to_projects(
    new_projects: &[ProjectDetail],
    all_students: &[StudentDetail],
) -> BTreeMap<String, Vec<ProjectMatch>> {
    let mut matches = BTreeMap::new();
    for student in all_students {
        let interests = interest_names(student);
        let matching: Vec<ProjectMatch> = new_projects
            .iter()
            .filter(|project| project_matches_interests(project, &interests))
            .map(|project| ProjectMatch {
                project_id: project.project.id,
                name: project.project.name.clone(),
            })
            .collect();
        if !matching.is_empty() {
            matches.insert(student.student.email.clone(), matching);
        }
    }
    matches
}

/// Map each faculty email to the new students matched by at least one of
/// the faculty member's owned projects. A faculty member with no owned
/// projects never matches; faculty with no matching student are omitted.
pub fn match_faculty_to_students(
    new_students: &[StudentDetail],
    all_faculty: &[FacultyDetail],
) -> BTreeMap<String, Vec<StudentMatch>> {
    let mut matches = BTreeMap::new();
    for member in all_faculty {
        let mut seen: HashSet<i64> = HashSet::new();
        let mut matching = Vec::new();
        for student in new_students {
            let interests = interest_names(student);
            let hit = member
                .projects
                .iter()
                .any(|project| project_matches_interests(project, &interests));
            if hit && seen.insert(student.student.id) {
                matching.push(StudentMatch {
                    student_id: student.student.id,
                    first_name: student.student.first_name.clone(),
                    last_name: student.student.last_name.clone(),
                    email: student.student.email.clone(),
                });
            }
        }
        if !matching.is_empty() {
            matches.insert(member.faculty.email.clone(), matching);
        }
    }
    matches
}
