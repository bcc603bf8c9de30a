//! Hierarchy builders
//!
//! Pure assembly of multi-level nested result trees from flat per-level
//! accessor lookups. Fan-out is one accessor call per parent; ordering
//! within a level is the order the accessor returned; source entities are
//! never mutated, each node carries freshly built collections.
//!
//! A faculty member or major reachable through more than one parent is
//! emitted once per parent with the same leaf list. That multi-parent
//! duplication is the documented contract, not an artifact.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use rmp_common::models::{Department, Discipline, Faculty, Major, Project, Student};
use rmp_common::{EntityStore, Result};

/// One department with its faculty and their owned projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentNode {
    pub department: Department,
    pub faculty: Vec<FacultyProjects>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyProjects {
    pub faculty: Faculty,
    pub projects: Vec<Project>,
}

/// One discipline with its majors and their leaf entries (projects or
/// students, never both in the same tree)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineNode<T> {
    pub discipline: Discipline,
    pub majors: Vec<MajorNode<T>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorNode<T> {
    pub major: Major,
    pub entries: Vec<T>,
}

/// Build the department → faculty → owned-projects tree.
pub async fn build_department_tree<S>(
    store: &S,
    departments: Vec<Department>,
) -> Result<Vec<DepartmentNode>>
where
    S: EntityStore + ?Sized,
{
    let mut nodes = Vec::with_capacity(departments.len());
    for department in departments {
        let members = store.faculty_by_department(department.id).await?;
        let mut faculty = Vec::with_capacity(members.len());
        for member in members {
            let projects = store.projects_by_faculty(member.id).await?;
            faculty.push(FacultyProjects {
                faculty: member,
                projects,
            });
        }
        nodes.push(DepartmentNode {
            department,
            faculty,
        });
    }
    Ok(nodes)
}

/// Build the discipline → major → projects tree.
pub async fn build_discipline_project_tree<S>(
    store: &S,
    disciplines: Vec<Discipline>,
) -> Result<Vec<DisciplineNode<Project>>>
where
    S: EntityStore + ?Sized,
{
    let mut nodes = Vec::with_capacity(disciplines.len());
    for discipline in disciplines {
        let discipline_majors = store.majors_by_discipline(discipline.id).await?;
        let mut majors = Vec::with_capacity(discipline_majors.len());
        for major in discipline_majors {
            let entries = store.projects_by_major(major.id).await?;
            majors.push(MajorNode { major, entries });
        }
        nodes.push(DisciplineNode { discipline, majors });
    }
    Ok(nodes)
}

/// Build the discipline → major → students tree.
///
/// The student list under each major is the identity-keyed union of
/// students majoring in it and students whose research-field interests
/// include it; a student present in both source lists appears exactly once.
pub async fn build_discipline_student_tree<S>(
    store: &S,
    disciplines: Vec<Discipline>,
) -> Result<Vec<DisciplineNode<Student>>>
where
    S: EntityStore + ?Sized,
{
    let mut nodes = Vec::with_capacity(disciplines.len());
    for discipline in disciplines {
        let discipline_majors = store.majors_by_discipline(discipline.id).await?;
        let mut majors = Vec::with_capacity(discipline_majors.len());
        for major in discipline_majors {
            let majoring = store.students_by_major(major.id).await?;
            let interested = store.students_interested_in(major.id).await?;
            majors.push(MajorNode {
                major,
                entries: merge_unique_students(majoring, interested),
            });
        }
        nodes.push(DisciplineNode { discipline, majors });
    }
    Ok(nodes)
}

/// Union by entity id, first occurrence wins: majoring students in accessor
/// order, then interested students not already present.
fn merge_unique_students(majoring: Vec<Student>, interested: Vec<Student>) -> Vec<Student> {
    let mut seen: HashSet<i64> = HashSet::with_capacity(majoring.len() + interested.len());
    let mut merged = Vec::with_capacity(majoring.len() + interested.len());
    for student in majoring.into_iter().chain(interested) {
        if seen.insert(student.id) {
            merged.push(student);
        }
    }
    merged
}
