//! Database initialization
//!
//! Creates the database file and schema on first run; opening an existing
//! database is a no-op apart from the PRAGMAs. Schema creation is
//! idempotent and safe to call on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enforce relational integrity (needed for ON DELETE CASCADE on links)
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent)
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    create_entity_tables(pool).await?;
    create_link_tables(pool).await?;
    create_accounts_table(pool).await?;
    Ok(())
}

async fn create_entity_tables(pool: &SqlitePool) -> Result<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS departments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
        "CREATE TABLE IF NOT EXISTS disciplines (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
        "CREATE TABLE IF NOT EXISTS majors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            department_id INTEGER NOT NULL REFERENCES departments(id)
        )",
        "CREATE TABLE IF NOT EXISTS faculty (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE
        )",
        "CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            graduation_year INTEGER NOT NULL,
            undergrad_year TEXT NOT NULL,
            interest_reason TEXT NOT NULL DEFAULT '',
            has_prior_experience INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )",
        // faculty_id is NOT NULL: a project without an owner is invalid
        "CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            desired_qualifications TEXT NOT NULL DEFAULT '',
            is_active INTEGER NOT NULL DEFAULT 1,
            faculty_id INTEGER NOT NULL REFERENCES faculty(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS research_periods (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
        "CREATE TABLE IF NOT EXISTS umbrella_topics (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

async fn create_link_tables(pool: &SqlitePool) -> Result<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS faculty_departments (
            faculty_id INTEGER NOT NULL REFERENCES faculty(id) ON DELETE CASCADE,
            department_id INTEGER NOT NULL REFERENCES departments(id) ON DELETE CASCADE,
            PRIMARY KEY (faculty_id, department_id)
        )",
        "CREATE TABLE IF NOT EXISTS discipline_majors (
            discipline_id INTEGER NOT NULL REFERENCES disciplines(id) ON DELETE CASCADE,
            major_id INTEGER NOT NULL REFERENCES majors(id) ON DELETE CASCADE,
            PRIMARY KEY (discipline_id, major_id)
        )",
        "CREATE TABLE IF NOT EXISTS student_majors (
            student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            major_id INTEGER NOT NULL REFERENCES majors(id) ON DELETE CASCADE,
            PRIMARY KEY (student_id, major_id)
        )",
        // Independent of student_majors: interest in researching a field
        "CREATE TABLE IF NOT EXISTS student_research_interests (
            student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            major_id INTEGER NOT NULL REFERENCES majors(id) ON DELETE CASCADE,
            PRIMARY KEY (student_id, major_id)
        )",
        "CREATE TABLE IF NOT EXISTS student_research_periods (
            student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            research_period_id INTEGER NOT NULL REFERENCES research_periods(id) ON DELETE CASCADE,
            PRIMARY KEY (student_id, research_period_id)
        )",
        "CREATE TABLE IF NOT EXISTS project_majors (
            project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            major_id INTEGER NOT NULL REFERENCES majors(id) ON DELETE CASCADE,
            PRIMARY KEY (project_id, major_id)
        )",
        "CREATE TABLE IF NOT EXISTS project_departments (
            project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            department_id INTEGER NOT NULL REFERENCES departments(id) ON DELETE CASCADE,
            PRIMARY KEY (project_id, department_id)
        )",
        "CREATE TABLE IF NOT EXISTS project_research_periods (
            project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            research_period_id INTEGER NOT NULL REFERENCES research_periods(id) ON DELETE CASCADE,
            PRIMARY KEY (project_id, research_period_id)
        )",
        "CREATE TABLE IF NOT EXISTS project_umbrella_topics (
            project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            umbrella_topic_id INTEGER NOT NULL REFERENCES umbrella_topics(id) ON DELETE CASCADE,
            PRIMARY KEY (project_id, umbrella_topic_id)
        )",
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

async fn create_accounts_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS accounts (
            email TEXT PRIMARY KEY,
            role TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}
