//! Periodic match notification job
//!
//! On each tick the job loads projects and students that appeared since
//! the previous tick, runs the matching engine in both directions, and
//! hands any non-empty result maps to a [`Notifier`]. Delivery itself
//! (email) lives behind the trait; the default implementation logs.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{error, info};

use rmp_common::{EntityStore, Result};
use rmp_core::matching::{
    match_faculty_to_students, match_students_to_projects, ProjectMatch, StudentMatch,
};

/// Delivery seam for match notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// New projects matching each student's research interests
    async fn notify_students(&self, matches: &BTreeMap<String, Vec<ProjectMatch>>);
    /// New students matching each faculty member's owned projects
    async fn notify_faculty(&self, matches: &BTreeMap<String, Vec<StudentMatch>>);
}

/// Notifier that records matches in the service log
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_students(&self, matches: &BTreeMap<String, Vec<ProjectMatch>>) {
        for (email, projects) in matches {
            info!(
                student = %email,
                projects = projects.len(),
                "new projects match student interests"
            );
        }
    }

    async fn notify_faculty(&self, matches: &BTreeMap<String, Vec<StudentMatch>>) {
        for (email, students) in matches {
            info!(
                faculty = %email,
                students = students.len(),
                "new students match faculty projects"
            );
        }
    }
}

/// Interval-driven match job
pub struct MatchJob<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
    interval: Duration,
}

impl<S, N> MatchJob<S, N>
where
    S: EntityStore,
    N: Notifier,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, interval: Duration) -> Self {
        Self {
            store,
            notifier,
            interval,
        }
    }

    /// Run forever; one failed tick is logged and does not stop the job.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        // First tick fires immediately; start the window now instead
        ticker.tick().await;
        let mut last_run = Utc::now();
        loop {
            ticker.tick().await;
            let window_end = Utc::now();
            if let Err(err) = self.run_once(last_run).await {
                error!("match job tick failed: {err}");
            }
            last_run = window_end;
        }
    }

    /// One matching pass over everything created after `since`.
    pub async fn run_once(&self, since: DateTime<Utc>) -> Result<()> {
        let new_projects = self.store.project_details_created_since(since).await?;
        if !new_projects.is_empty() {
            let students = self.store.active_student_details().await?;
            let matches = match_students_to_projects(&new_projects, &students);
            if !matches.is_empty() {
                self.notifier.notify_students(&matches).await;
            }
        }

        let new_students = self.store.student_details_created_since(since).await?;
        if !new_students.is_empty() {
            let faculty = self.store.all_faculty_details().await?;
            let matches = match_faculty_to_students(&new_students, &faculty);
            if !matches.is_empty() {
                self.notifier.notify_faculty(&matches).await;
            }
        }
        Ok(())
    }
}
