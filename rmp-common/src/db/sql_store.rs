//! SQLite implementation of the entity accessor contract

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::models::{
    Department, Discipline, Faculty, FacultyDetail, Major, NewFaculty, NewProject, NewStudent,
    Project, ProjectDetail, ResearchPeriod, Student, StudentDetail, UmbrellaTopic,
};
use crate::store::{EntityStore, Role};
use crate::{Error, Result};

const STUDENT_COLS: &str = "id, first_name, last_name, email, graduation_year, undergrad_year, \
                            interest_reason, has_prior_experience, is_active";
const PROJECT_COLS: &str =
    "id, name, description, desired_qualifications, is_active, faculty_id, created_at";

type StudentRow = (i64, String, String, String, i64, String, String, bool, bool);
type ProjectRow = (i64, String, String, String, bool, i64, DateTime<Utc>);

fn map_student(row: StudentRow) -> Student {
    let (
        id,
        first_name,
        last_name,
        email,
        graduation_year,
        undergrad_year,
        interest_reason,
        has_prior_experience,
        is_active,
    ) = row;
    Student {
        id,
        first_name,
        last_name,
        email,
        graduation_year,
        undergrad_year,
        interest_reason,
        has_prior_experience,
        is_active,
    }
}

fn map_project(row: ProjectRow) -> Project {
    let (id, name, description, desired_qualifications, is_active, faculty_id, created_at) = row;
    Project {
        id,
        name,
        description,
        desired_qualifications,
        is_active,
        faculty_id,
        created_at,
    }
}

/// SQLite-backed [`EntityStore`]
#[derive(Clone)]
pub struct SqlStore {
    pool: SqlitePool,
}

impl SqlStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn named_entity<F, T>(&self, sql: &str, name: &str, kind: &str, build: F) -> Result<T>
    where
        F: FnOnce(i64, String) -> T,
    {
        let row: Option<(i64, String)> = sqlx::query_as(sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some((id, name)) => Ok(build(id, name)),
            None => Err(Error::NotFound(format!("{kind} named '{name}'"))),
        }
    }

    async fn majors_of_student(&self, student_id: i64, link_table: &str) -> Result<Vec<Major>> {
        let rows: Vec<(i64, String, i64)> = sqlx::query_as(&format!(
            "SELECT m.id, m.name, m.department_id FROM majors m \
             JOIN {link_table} l ON l.major_id = m.id \
             WHERE l.student_id = ? ORDER BY m.id"
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, department_id)| Major {
                id,
                name,
                department_id,
            })
            .collect())
    }

    async fn periods_of_student(&self, student_id: i64) -> Result<Vec<ResearchPeriod>> {
        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT p.id, p.name FROM research_periods p \
             JOIN student_research_periods l ON l.research_period_id = p.id \
             WHERE l.student_id = ? ORDER BY p.id",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| ResearchPeriod { id, name })
            .collect())
    }

    async fn student_detail_for(&self, student: Student) -> Result<StudentDetail> {
        let majors = self.majors_of_student(student.id, "student_majors").await?;
        let research_interests = self
            .majors_of_student(student.id, "student_research_interests")
            .await?;
        let research_periods = self.periods_of_student(student.id).await?;
        Ok(StudentDetail {
            student,
            majors,
            research_interests,
            research_periods,
        })
    }

    async fn departments_of_faculty(&self, faculty_id: i64) -> Result<Vec<Department>> {
        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT d.id, d.name FROM departments d \
             JOIN faculty_departments l ON l.department_id = d.id \
             WHERE l.faculty_id = ? ORDER BY d.id",
        )
        .bind(faculty_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| Department { id, name })
            .collect())
    }

    async fn project_detail_for(&self, project: Project) -> Result<ProjectDetail> {
        let majors: Vec<(i64, String, i64)> = sqlx::query_as(
            "SELECT m.id, m.name, m.department_id FROM majors m \
             JOIN project_majors l ON l.major_id = m.id \
             WHERE l.project_id = ? ORDER BY m.id",
        )
        .bind(project.id)
        .fetch_all(&self.pool)
        .await?;

        let departments: Vec<(i64, String)> = sqlx::query_as(
            "SELECT d.id, d.name FROM departments d \
             JOIN project_departments l ON l.department_id = d.id \
             WHERE l.project_id = ? ORDER BY d.id",
        )
        .bind(project.id)
        .fetch_all(&self.pool)
        .await?;

        let research_periods: Vec<(i64, String)> = sqlx::query_as(
            "SELECT p.id, p.name FROM research_periods p \
             JOIN project_research_periods l ON l.research_period_id = p.id \
             WHERE l.project_id = ? ORDER BY p.id",
        )
        .bind(project.id)
        .fetch_all(&self.pool)
        .await?;

        let umbrella_topics: Vec<(i64, String)> = sqlx::query_as(
            "SELECT t.id, t.name FROM umbrella_topics t \
             JOIN project_umbrella_topics l ON l.umbrella_topic_id = t.id \
             WHERE l.project_id = ? ORDER BY t.id",
        )
        .bind(project.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ProjectDetail {
            project,
            majors: majors
                .into_iter()
                .map(|(id, name, department_id)| Major {
                    id,
                    name,
                    department_id,
                })
                .collect(),
            departments: departments
                .into_iter()
                .map(|(id, name)| Department { id, name })
                .collect(),
            research_periods: research_periods
                .into_iter()
                .map(|(id, name)| ResearchPeriod { id, name })
                .collect(),
            umbrella_topics: umbrella_topics
                .into_iter()
                .map(|(id, name)| UmbrellaTopic { id, name })
                .collect(),
        })
    }

    async fn faculty_detail_for(&self, faculty: Faculty) -> Result<FacultyDetail> {
        let departments = self.departments_of_faculty(faculty.id).await?;
        let projects = self.projects_by_faculty(faculty.id).await?;
        let mut details = Vec::with_capacity(projects.len());
        for project in projects {
            details.push(self.project_detail_for(project).await?);
        }
        Ok(FacultyDetail {
            faculty,
            departments,
            projects: details,
        })
    }
}

async fn replace_links(
    tx: &mut Transaction<'_, Sqlite>,
    table: &str,
    owner_col: &str,
    other_col: &str,
    owner_id: i64,
    other_ids: &[i64],
) -> Result<()> {
    sqlx::query(&format!("DELETE FROM {table} WHERE {owner_col} = ?"))
        .bind(owner_id)
        .execute(&mut **tx)
        .await?;
    for other_id in other_ids {
        sqlx::query(&format!(
            "INSERT OR IGNORE INTO {table} ({owner_col}, {other_col}) VALUES (?, ?)"
        ))
        .bind(owner_id)
        .bind(other_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn write_student_links(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    student: &NewStudent,
) -> Result<()> {
    replace_links(tx, "student_majors", "student_id", "major_id", id, &student.major_ids).await?;
    replace_links(
        tx,
        "student_research_interests",
        "student_id",
        "major_id",
        id,
        &student.research_interest_ids,
    )
    .await?;
    replace_links(
        tx,
        "student_research_periods",
        "student_id",
        "research_period_id",
        id,
        &student.research_period_ids,
    )
    .await?;
    Ok(())
}

async fn write_project_links(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    project: &NewProject,
) -> Result<()> {
    replace_links(tx, "project_majors", "project_id", "major_id", id, &project.major_ids).await?;
    replace_links(
        tx,
        "project_departments",
        "project_id",
        "department_id",
        id,
        &project.department_ids,
    )
    .await?;
    replace_links(
        tx,
        "project_research_periods",
        "project_id",
        "research_period_id",
        id,
        &project.research_period_ids,
    )
    .await?;
    replace_links(
        tx,
        "project_umbrella_topics",
        "project_id",
        "umbrella_topic_id",
        id,
        &project.umbrella_topic_ids,
    )
    .await?;
    Ok(())
}

#[async_trait]
impl EntityStore for SqlStore {
    async fn departments(&self) -> Result<Vec<Department>> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM departments ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| Department { id, name })
            .collect())
    }

    async fn disciplines(&self) -> Result<Vec<Discipline>> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM disciplines ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| Discipline { id, name })
            .collect())
    }

    async fn majors(&self) -> Result<Vec<Major>> {
        let rows: Vec<(i64, String, i64)> =
            sqlx::query_as("SELECT id, name, department_id FROM majors ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, department_id)| Major {
                id,
                name,
                department_id,
            })
            .collect())
    }

    async fn research_periods(&self) -> Result<Vec<ResearchPeriod>> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM research_periods ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| ResearchPeriod { id, name })
            .collect())
    }

    async fn umbrella_topics(&self) -> Result<Vec<UmbrellaTopic>> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM umbrella_topics ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| UmbrellaTopic { id, name })
            .collect())
    }

    async fn faculty_by_department(&self, department_id: i64) -> Result<Vec<Faculty>> {
        let rows: Vec<(i64, String, String, String)> = sqlx::query_as(
            "SELECT f.id, f.first_name, f.last_name, f.email FROM faculty f \
             JOIN faculty_departments l ON l.faculty_id = f.id \
             WHERE l.department_id = ? ORDER BY f.id",
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, first_name, last_name, email)| Faculty {
                id,
                first_name,
                last_name,
                email,
            })
            .collect())
    }

    async fn projects_by_faculty(&self, faculty_id: i64) -> Result<Vec<Project>> {
        let rows: Vec<ProjectRow> = sqlx::query_as(&format!(
            "SELECT {PROJECT_COLS} FROM projects WHERE faculty_id = ? ORDER BY id"
        ))
        .bind(faculty_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_project).collect())
    }

    async fn majors_by_discipline(&self, discipline_id: i64) -> Result<Vec<Major>> {
        let rows: Vec<(i64, String, i64)> = sqlx::query_as(
            "SELECT m.id, m.name, m.department_id FROM majors m \
             JOIN discipline_majors l ON l.major_id = m.id \
             WHERE l.discipline_id = ? ORDER BY m.id",
        )
        .bind(discipline_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, department_id)| Major {
                id,
                name,
                department_id,
            })
            .collect())
    }

    async fn projects_by_major(&self, major_id: i64) -> Result<Vec<Project>> {
        let rows: Vec<ProjectRow> = sqlx::query_as(&format!(
            "SELECT p.{} FROM projects p \
             JOIN project_majors l ON l.project_id = p.id \
             WHERE l.major_id = ? ORDER BY p.id",
            PROJECT_COLS.replace(", ", ", p.")
        ))
        .bind(major_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_project).collect())
    }

    async fn students_by_major(&self, major_id: i64) -> Result<Vec<Student>> {
        let rows: Vec<StudentRow> = sqlx::query_as(&format!(
            "SELECT s.{} FROM students s \
             JOIN student_majors l ON l.student_id = s.id \
             WHERE l.major_id = ? ORDER BY s.id",
            STUDENT_COLS.replace(", ", ", s.")
        ))
        .bind(major_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_student).collect())
    }

    async fn students_interested_in(&self, major_id: i64) -> Result<Vec<Student>> {
        let rows: Vec<StudentRow> = sqlx::query_as(&format!(
            "SELECT s.{} FROM students s \
             JOIN student_research_interests l ON l.student_id = s.id \
             WHERE l.major_id = ? ORDER BY s.id",
            STUDENT_COLS.replace(", ", ", s.")
        ))
        .bind(major_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_student).collect())
    }

    async fn major_by_name(&self, name: &str) -> Result<Major> {
        let row: Option<(i64, String, i64)> =
            sqlx::query_as("SELECT id, name, department_id FROM majors WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        match row {
            Some((id, name, department_id)) => Ok(Major {
                id,
                name,
                department_id,
            }),
            None => Err(Error::NotFound(format!("major named '{name}'"))),
        }
    }

    async fn department_by_name(&self, name: &str) -> Result<Department> {
        self.named_entity(
            "SELECT id, name FROM departments WHERE name = ?",
            name,
            "department",
            |id, name| Department { id, name },
        )
        .await
    }

    async fn research_period_by_name(&self, name: &str) -> Result<ResearchPeriod> {
        self.named_entity(
            "SELECT id, name FROM research_periods WHERE name = ?",
            name,
            "research period",
            |id, name| ResearchPeriod { id, name },
        )
        .await
    }

    async fn umbrella_topic_by_name(&self, name: &str) -> Result<UmbrellaTopic> {
        self.named_entity(
            "SELECT id, name FROM umbrella_topics WHERE name = ?",
            name,
            "umbrella topic",
            |id, name| UmbrellaTopic { id, name },
        )
        .await
    }

    async fn student_by_email(&self, email: &str) -> Result<Student> {
        let row: Option<StudentRow> =
            sqlx::query_as(&format!("SELECT {STUDENT_COLS} FROM students WHERE email = ?"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        row.map(map_student)
            .ok_or_else(|| Error::NotFound(format!("student with email '{email}'")))
    }

    async fn faculty_by_email(&self, email: &str) -> Result<Faculty> {
        let row: Option<(i64, String, String, String)> = sqlx::query_as(
            "SELECT id, first_name, last_name, email FROM faculty WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some((id, first_name, last_name, email)) => Ok(Faculty {
                id,
                first_name,
                last_name,
                email,
            }),
            None => Err(Error::NotFound(format!("faculty with email '{email}'"))),
        }
    }

    async fn account_role(&self, email: &str) -> Result<Role> {
        let row: Option<(String,)> = sqlx::query_as("SELECT role FROM accounts WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some((role,)) => Role::parse(&role),
            None => Err(Error::NotFound(format!("account for '{email}'"))),
        }
    }

    async fn student_detail(&self, email: &str) -> Result<StudentDetail> {
        let student = self.student_by_email(email).await?;
        self.student_detail_for(student).await
    }

    async fn faculty_detail(&self, email: &str) -> Result<FacultyDetail> {
        let faculty = self.faculty_by_email(email).await?;
        self.faculty_detail_for(faculty).await
    }

    async fn active_student_details(&self) -> Result<Vec<StudentDetail>> {
        let rows: Vec<StudentRow> = sqlx::query_as(&format!(
            "SELECT {STUDENT_COLS} FROM students WHERE is_active = 1 ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.student_detail_for(map_student(row)).await?);
        }
        Ok(details)
    }

    async fn all_faculty_details(&self) -> Result<Vec<FacultyDetail>> {
        let rows: Vec<(i64, String, String, String)> =
            sqlx::query_as("SELECT id, first_name, last_name, email FROM faculty ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        let mut details = Vec::with_capacity(rows.len());
        for (id, first_name, last_name, email) in rows {
            details.push(
                self.faculty_detail_for(Faculty {
                    id,
                    first_name,
                    last_name,
                    email,
                })
                .await?,
            );
        }
        Ok(details)
    }

    async fn project_details_created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ProjectDetail>> {
        let rows: Vec<ProjectRow> = sqlx::query_as(&format!(
            "SELECT {PROJECT_COLS} FROM projects WHERE created_at > ? ORDER BY id"
        ))
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.project_detail_for(map_project(row)).await?);
        }
        Ok(details)
    }

    async fn student_details_created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<StudentDetail>> {
        let rows: Vec<StudentRow> = sqlx::query_as(&format!(
            "SELECT {STUDENT_COLS} FROM students \
             WHERE is_active = 1 AND created_at > ? ORDER BY id"
        ))
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.student_detail_for(map_student(row)).await?);
        }
        Ok(details)
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "INSERT INTO students (first_name, last_name, email, graduation_year, \
             undergrad_year, interest_reason, has_prior_experience, is_active, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(student.graduation_year)
        .bind(&student.undergrad_year)
        .bind(&student.interest_reason)
        .bind(student.has_prior_experience)
        .bind(student.is_active)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        let id = result.last_insert_rowid();
        write_student_links(&mut tx, id, student).await?;
        sqlx::query("INSERT OR REPLACE INTO accounts (email, role) VALUES (?, 'student')")
            .bind(&student.email)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn update_student(&self, id: i64, student: &NewStudent) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let old_email: Option<(String,)> =
            sqlx::query_as("SELECT email FROM students WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let (old_email,) =
            old_email.ok_or_else(|| Error::NotFound(format!("student id {id}")))?;
        sqlx::query(
            "UPDATE students SET first_name = ?, last_name = ?, email = ?, \
             graduation_year = ?, undergrad_year = ?, interest_reason = ?, \
             has_prior_experience = ?, is_active = ? WHERE id = ?",
        )
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(student.graduation_year)
        .bind(&student.undergrad_year)
        .bind(&student.interest_reason)
        .bind(student.has_prior_experience)
        .bind(student.is_active)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        write_student_links(&mut tx, id, student).await?;
        sqlx::query("UPDATE accounts SET email = ? WHERE email = ?")
            .bind(&student.email)
            .bind(&old_email)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let email: Option<(String,)> = sqlx::query_as("SELECT email FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let (email,) = email.ok_or_else(|| Error::NotFound(format!("student id {id}")))?;
        sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM accounts WHERE email = ?")
            .bind(&email)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn insert_faculty(&self, faculty: &NewFaculty) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        let result =
            sqlx::query("INSERT INTO faculty (first_name, last_name, email) VALUES (?, ?, ?)")
                .bind(&faculty.first_name)
                .bind(&faculty.last_name)
                .bind(&faculty.email)
                .execute(&mut *tx)
                .await?;
        let id = result.last_insert_rowid();
        replace_links(
            &mut tx,
            "faculty_departments",
            "faculty_id",
            "department_id",
            id,
            &faculty.department_ids,
        )
        .await?;
        sqlx::query("INSERT OR REPLACE INTO accounts (email, role) VALUES (?, 'faculty')")
            .bind(&faculty.email)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn update_faculty(&self, id: i64, faculty: &NewFaculty) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let old_email: Option<(String,)> = sqlx::query_as("SELECT email FROM faculty WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let (old_email,) =
            old_email.ok_or_else(|| Error::NotFound(format!("faculty id {id}")))?;
        sqlx::query("UPDATE faculty SET first_name = ?, last_name = ?, email = ? WHERE id = ?")
            .bind(&faculty.first_name)
            .bind(&faculty.last_name)
            .bind(&faculty.email)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        replace_links(
            &mut tx,
            "faculty_departments",
            "faculty_id",
            "department_id",
            id,
            &faculty.department_ids,
        )
        .await?;
        sqlx::query("UPDATE accounts SET email = ? WHERE email = ?")
            .bind(&faculty.email)
            .bind(&old_email)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete_faculty(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let email: Option<(String,)> = sqlx::query_as("SELECT email FROM faculty WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let (email,) = email.ok_or_else(|| Error::NotFound(format!("faculty id {id}")))?;
        // Owned projects cascade: a project cannot outlive its owner
        sqlx::query("DELETE FROM faculty WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM accounts WHERE email = ?")
            .bind(&email)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn insert_project(&self, project: &NewProject) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "INSERT INTO projects (name, description, desired_qualifications, is_active, \
             faculty_id, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.desired_qualifications)
        .bind(project.is_active)
        .bind(project.faculty_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        let id = result.last_insert_rowid();
        write_project_links(&mut tx, id, project).await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn update_project(&self, id: i64, project: &NewProject) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE projects SET name = ?, description = ?, desired_qualifications = ?, \
             is_active = ?, faculty_id = ? WHERE id = ?",
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.desired_qualifications)
        .bind(project.is_active)
        .bind(project.faculty_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("project id {id}")));
        }
        write_project_links(&mut tx, id, project).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete_project(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("project id {id}")));
        }
        Ok(())
    }
}
