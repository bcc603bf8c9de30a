//! In-memory `EntityStore` fake for unit tests
//!
//! Backed by plain vectors; collection methods return entries in insertion
//! order, matching the accessor-order contract. Write methods record what
//! they were given so tests can assert on resolved ids.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use rmp_common::models::{
    Department, Discipline, Faculty, FacultyDetail, Major, NewFaculty, NewProject, NewStudent,
    Project, ProjectDetail, ResearchPeriod, Student, StudentDetail, UmbrellaTopic,
};
use rmp_common::{EntityStore, Error, Result, Role};

#[derive(Default)]
pub struct InMemoryStore {
    pub departments: Vec<Department>,
    pub disciplines: Vec<Discipline>,
    pub majors: Vec<Major>,
    pub research_periods: Vec<ResearchPeriod>,
    pub umbrella_topics: Vec<UmbrellaTopic>,
    pub faculty: Vec<Faculty>,
    pub students: Vec<Student>,
    pub projects: Vec<Project>,

    pub faculty_departments: Vec<(i64, i64)>,
    pub discipline_majors: Vec<(i64, i64)>,
    pub student_majors: Vec<(i64, i64)>,
    pub student_interests: Vec<(i64, i64)>,
    pub student_periods: Vec<(i64, i64)>,
    pub project_majors: Vec<(i64, i64)>,

    pub accounts: HashMap<String, Role>,

    pub inserted_students: Mutex<Vec<NewStudent>>,
    pub inserted_faculty: Mutex<Vec<NewFaculty>>,
    pub inserted_projects: Mutex<Vec<NewProject>>,
    pub updated_projects: Mutex<Vec<(i64, NewProject)>>,
    pub deleted_ids: Mutex<Vec<i64>>,

    next_id: AtomicI64,
}

impl InMemoryStore {
    fn next_id(&self) -> i64 {
        1000 + self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn majors_linked(&self, links: &[(i64, i64)], left_id: i64) -> Vec<Major> {
        links
            .iter()
            .filter(|(l, _)| *l == left_id)
            .filter_map(|(_, major_id)| self.majors.iter().find(|m| m.id == *major_id))
            .cloned()
            .collect()
    }

    fn students_linked(&self, links: &[(i64, i64)], major_id: i64) -> Vec<Student> {
        links
            .iter()
            .filter(|(_, m)| *m == major_id)
            .filter_map(|(student_id, _)| self.students.iter().find(|s| s.id == *student_id))
            .cloned()
            .collect()
    }

    fn detail_for_student(&self, student: Student) -> StudentDetail {
        let majors = self.majors_linked(&self.student_majors, student.id);
        let research_interests = self.majors_linked(&self.student_interests, student.id);
        let research_periods = self
            .student_periods
            .iter()
            .filter(|(s, _)| *s == student.id)
            .filter_map(|(_, p)| self.research_periods.iter().find(|rp| rp.id == *p))
            .cloned()
            .collect();
        StudentDetail {
            student,
            majors,
            research_interests,
            research_periods,
        }
    }

    fn detail_for_project(&self, project: Project) -> ProjectDetail {
        let majors = self.majors_linked(&self.project_majors, project.id);
        ProjectDetail {
            project,
            majors,
            departments: vec![],
            research_periods: vec![],
            umbrella_topics: vec![],
        }
    }

    fn detail_for_faculty(&self, member: Faculty) -> FacultyDetail {
        let departments = self
            .faculty_departments
            .iter()
            .filter(|(f, _)| *f == member.id)
            .filter_map(|(_, d)| self.departments.iter().find(|dep| dep.id == *d))
            .cloned()
            .collect();
        let projects = self
            .projects
            .iter()
            .filter(|p| p.faculty_id == member.id)
            .cloned()
            .map(|p| self.detail_for_project(p))
            .collect();
        FacultyDetail {
            faculty: member,
            departments,
            projects,
        }
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn departments(&self) -> Result<Vec<Department>> {
        Ok(self.departments.clone())
    }

    async fn disciplines(&self) -> Result<Vec<Discipline>> {
        Ok(self.disciplines.clone())
    }

    async fn majors(&self) -> Result<Vec<Major>> {
        Ok(self.majors.clone())
    }

    async fn research_periods(&self) -> Result<Vec<ResearchPeriod>> {
        Ok(self.research_periods.clone())
    }

    async fn umbrella_topics(&self) -> Result<Vec<UmbrellaTopic>> {
        Ok(self.umbrella_topics.clone())
    }

    async fn faculty_by_department(&self, department_id: i64) -> Result<Vec<Faculty>> {
        Ok(self
            .faculty_departments
            .iter()
            .filter(|(_, d)| *d == department_id)
            .filter_map(|(f, _)| self.faculty.iter().find(|m| m.id == *f))
            .cloned()
            .collect())
    }

    async fn projects_by_faculty(&self, faculty_id: i64) -> Result<Vec<Project>> {
        Ok(self
            .projects
            .iter()
            .filter(|p| p.faculty_id == faculty_id)
            .cloned()
            .collect())
    }

    async fn majors_by_discipline(&self, discipline_id: i64) -> Result<Vec<Major>> {
        Ok(self.majors_linked(&self.discipline_majors, discipline_id))
    }

    async fn projects_by_major(&self, major_id: i64) -> Result<Vec<Project>> {
        Ok(self
            .project_majors
            .iter()
            .filter(|(_, m)| *m == major_id)
            .filter_map(|(p, _)| self.projects.iter().find(|pr| pr.id == *p))
            .cloned()
            .collect())
    }

    async fn students_by_major(&self, major_id: i64) -> Result<Vec<Student>> {
        Ok(self.students_linked(&self.student_majors, major_id))
    }

    async fn students_interested_in(&self, major_id: i64) -> Result<Vec<Student>> {
        Ok(self.students_linked(&self.student_interests, major_id))
    }

    async fn major_by_name(&self, name: &str) -> Result<Major> {
        self.majors
            .iter()
            .find(|m| m.name == name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("major named '{name}'")))
    }

    async fn department_by_name(&self, name: &str) -> Result<Department> {
        self.departments
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("department named '{name}'")))
    }

    async fn research_period_by_name(&self, name: &str) -> Result<ResearchPeriod> {
        self.research_periods
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("research period named '{name}'")))
    }

    async fn umbrella_topic_by_name(&self, name: &str) -> Result<UmbrellaTopic> {
        self.umbrella_topics
            .iter()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("umbrella topic named '{name}'")))
    }

    async fn student_by_email(&self, email: &str) -> Result<Student> {
        self.students
            .iter()
            .find(|s| s.email == email)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("student with email '{email}'")))
    }

    async fn faculty_by_email(&self, email: &str) -> Result<Faculty> {
        self.faculty
            .iter()
            .find(|f| f.email == email)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("faculty with email '{email}'")))
    }

    async fn account_role(&self, email: &str) -> Result<Role> {
        self.accounts
            .get(email)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("account for '{email}'")))
    }

    async fn student_detail(&self, email: &str) -> Result<StudentDetail> {
        let student = self.student_by_email(email).await?;
        Ok(self.detail_for_student(student))
    }

    async fn faculty_detail(&self, email: &str) -> Result<FacultyDetail> {
        let member = self.faculty_by_email(email).await?;
        Ok(self.detail_for_faculty(member))
    }

    async fn active_student_details(&self) -> Result<Vec<StudentDetail>> {
        Ok(self
            .students
            .iter()
            .filter(|s| s.is_active)
            .cloned()
            .map(|s| self.detail_for_student(s))
            .collect())
    }

    async fn all_faculty_details(&self) -> Result<Vec<FacultyDetail>> {
        Ok(self
            .faculty
            .iter()
            .cloned()
            .map(|f| self.detail_for_faculty(f))
            .collect())
    }

    async fn project_details_created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ProjectDetail>> {
        Ok(self
            .projects
            .iter()
            .filter(|p| p.created_at > since)
            .cloned()
            .map(|p| self.detail_for_project(p))
            .collect())
    }

    // The fake tracks no signup timestamps; every active student counts as new
    async fn student_details_created_since(
        &self,
        _since: DateTime<Utc>,
    ) -> Result<Vec<StudentDetail>> {
        self.active_student_details().await
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<i64> {
        self.inserted_students.lock().unwrap().push(student.clone());
        Ok(self.next_id())
    }

    async fn update_student(&self, id: i64, _student: &NewStudent) -> Result<()> {
        if !self.students.iter().any(|s| s.id == id) {
            return Err(Error::NotFound(format!("student id {id}")));
        }
        Ok(())
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        if !self.students.iter().any(|s| s.id == id) {
            return Err(Error::NotFound(format!("student id {id}")));
        }
        self.deleted_ids.lock().unwrap().push(id);
        Ok(())
    }

    async fn insert_faculty(&self, faculty: &NewFaculty) -> Result<i64> {
        self.inserted_faculty.lock().unwrap().push(faculty.clone());
        Ok(self.next_id())
    }

    async fn update_faculty(&self, id: i64, _faculty: &NewFaculty) -> Result<()> {
        if !self.faculty.iter().any(|f| f.id == id) {
            return Err(Error::NotFound(format!("faculty id {id}")));
        }
        Ok(())
    }

    async fn delete_faculty(&self, id: i64) -> Result<()> {
        if !self.faculty.iter().any(|f| f.id == id) {
            return Err(Error::NotFound(format!("faculty id {id}")));
        }
        self.deleted_ids.lock().unwrap().push(id);
        Ok(())
    }

    async fn insert_project(&self, project: &NewProject) -> Result<i64> {
        self.inserted_projects.lock().unwrap().push(project.clone());
        Ok(self.next_id())
    }

    async fn update_project(&self, id: i64, project: &NewProject) -> Result<()> {
        if !self.projects.iter().any(|p| p.id == id) {
            return Err(Error::NotFound(format!("project id {id}")));
        }
        self.updated_projects
            .lock()
            .unwrap()
            .push((id, project.clone()));
        Ok(())
    }

    async fn delete_project(&self, id: i64) -> Result<()> {
        if !self.projects.iter().any(|p| p.id == id) {
            return Err(Error::NotFound(format!("project id {id}")));
        }
        self.deleted_ids.lock().unwrap().push(id);
        Ok(())
    }
}

// ---- seeding helpers ----

pub fn department(store: &mut InMemoryStore, id: i64, name: &str) -> Department {
    let entity = Department {
        id,
        name: name.into(),
    };
    store.departments.push(entity.clone());
    entity
}

pub fn discipline(store: &mut InMemoryStore, id: i64, name: &str) -> Discipline {
    let entity = Discipline {
        id,
        name: name.into(),
    };
    store.disciplines.push(entity.clone());
    entity
}

pub fn major(
    store: &mut InMemoryStore,
    id: i64,
    name: &str,
    department_id: i64,
    discipline_ids: &[i64],
) -> Major {
    let entity = Major {
        id,
        name: name.into(),
        department_id,
    };
    store.majors.push(entity.clone());
    for discipline_id in discipline_ids {
        store.discipline_majors.push((*discipline_id, id));
    }
    entity
}

pub fn faculty(
    store: &mut InMemoryStore,
    id: i64,
    email: &str,
    department_ids: &[i64],
) -> Faculty {
    let entity = Faculty {
        id,
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        email: email.into(),
    };
    store.faculty.push(entity.clone());
    for department_id in department_ids {
        store.faculty_departments.push((id, *department_id));
    }
    entity
}

pub fn student(
    store: &mut InMemoryStore,
    id: i64,
    email: &str,
    major_ids: &[i64],
    interest_ids: &[i64],
) -> Student {
    let entity = Student {
        id,
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: email.into(),
        graduation_year: 2027,
        undergrad_year: "junior".into(),
        interest_reason: String::new(),
        has_prior_experience: false,
        is_active: true,
    };
    store.students.push(entity.clone());
    for major_id in major_ids {
        store.student_majors.push((id, *major_id));
    }
    for major_id in interest_ids {
        store.student_interests.push((id, *major_id));
    }
    entity
}

pub fn project(store: &mut InMemoryStore, id: i64, name: &str, faculty_id: i64) -> Project {
    let entity = Project {
        id,
        name: name.into(),
        description: String::new(),
        desired_qualifications: String::new(),
        is_active: true,
        faculty_id,
        created_at: Utc::now(),
    };
    store.projects.push(entity.clone());
    entity
}
