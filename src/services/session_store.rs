//! In-memory session and template state mirrored to the remote store and
//! the local cache.
//!
//! Remote-backed operations await the remote call before touching local
//! state. A failed call leaves every list as it was, queues an error
//! notice and returns [`StoreError::Remote`]. Cache writes happen after the
//! in-memory update and only log on failure.

use chrono::NaiveDate;
use thiserror::Error;

use crate::api::{ApiError, SessionRemote};
use crate::models::{Exercise, ExerciseSession, ExerciseTemplate, NewSession, SessionUpdate};
use crate::services::templates::{materialize, save_as_template};
use crate::storage::LocalCache;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Remote store error: {0}")]
    Remote(#[from] ApiError),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Exercise not found: {0}")]
    ExerciseNotFound(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// User-facing outcome of a remote operation
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

pub struct SessionStore<R> {
    remote: R,
    cache: Option<LocalCache>,
    sessions: Vec<ExerciseSession>,
    templates: Vec<ExerciseTemplate>,
    notices: Vec<Notice>,
}

impl<R: SessionRemote> SessionStore<R> {
    /// Create a store with no local cache
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            cache: None,
            sessions: Vec::new(),
            templates: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Create a store seeded from the cache snapshots
    pub fn with_cache(remote: R, cache: LocalCache) -> Self {
        let sessions = cache.load_sessions().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable session cache: {}", e);
            Vec::new()
        });
        let templates = cache.load_templates().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable template cache: {}", e);
            Vec::new()
        });

        tracing::debug!(
            "Loaded {} sessions and {} templates from cache",
            sessions.len(),
            templates.len()
        );

        Self {
            remote,
            cache: Some(cache),
            sessions,
            templates,
            notices: Vec::new(),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn sessions(&self) -> &[ExerciseSession] {
        &self.sessions
    }

    pub fn completed_sessions(&self) -> Vec<ExerciseSession> {
        self.sessions.iter().filter(|s| !s.planned).cloned().collect()
    }

    pub fn planned_sessions(&self) -> Vec<ExerciseSession> {
        self.sessions.iter().filter(|s| s.planned).cloned().collect()
    }

    pub fn session(&self, id: &str) -> Option<&ExerciseSession> {
        self.sessions.iter().find(|session| session.id == id)
    }

    pub fn templates(&self) -> &[ExerciseTemplate] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&ExerciseTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Take every queued notice, oldest first
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Replace the session list with the remote one
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let result = self.remote.list_sessions().await;
        let sessions = result.map_err(|e| self.remote_failed("load your exercise sessions", e))?;

        tracing::info!("Loaded {} sessions from remote store", sessions.len());
        self.sessions = sessions;
        self.persist_sessions();
        Ok(())
    }

    pub async fn create_session(
        &mut self,
        session: NewSession,
    ) -> Result<ExerciseSession, StoreError> {
        let result = self.remote.create_session(&session).await;
        let created = result.map_err(|e| self.remote_failed("create exercise session", e))?;

        self.sessions.push(created.clone());
        self.notices.push(Notice::success("Exercise session created"));
        self.persist_sessions();

        tracing::info!("Session {} created", created.id);
        Ok(created)
    }

    pub async fn update_session(
        &mut self,
        id: &str,
        update: SessionUpdate,
    ) -> Result<ExerciseSession, StoreError> {
        let completed = self.session(id).is_some_and(|session| !session.planned);
        if completed && update.planned == Some(true) {
            return Err(StoreError::InvalidOperation(
                "completed sessions cannot be planned again".to_string(),
            ));
        }

        let result = self.remote.update_session(id, &update).await;
        let updated = result.map_err(|e| self.remote_failed("update exercise session", e))?;

        match self.sessions.iter().position(|session| session.id == id) {
            Some(index) => self.sessions[index] = updated.clone(),
            None => self.sessions.push(updated.clone()),
        }
        self.notices.push(Notice::success("Exercise session updated"));
        self.persist_sessions();

        tracing::info!("Session {} updated", id);
        Ok(updated)
    }

    pub async fn delete_session(&mut self, id: &str) -> Result<(), StoreError> {
        let result = self.remote.delete_session(id).await;
        result.map_err(|e| self.remote_failed("delete exercise session", e))?;

        self.sessions.retain(|session| session.id != id);
        self.notices.push(Notice::success("Exercise session deleted"));
        self.persist_sessions();

        tracing::info!("Session {} deleted", id);
        Ok(())
    }

    /// Append an exercise to a stored session
    pub async fn add_exercise(
        &mut self,
        session_id: &str,
        exercise: Exercise,
    ) -> Result<ExerciseSession, StoreError> {
        let mut exercises = self.require_session(session_id)?.exercises().to_vec();
        exercises.push(exercise);
        self.push_exercises(session_id, exercises).await
    }

    pub async fn remove_exercise(
        &mut self,
        session_id: &str,
        exercise_id: &str,
    ) -> Result<ExerciseSession, StoreError> {
        let session = self.require_session(session_id)?;
        if session.exercise(exercise_id).is_none() {
            return Err(StoreError::ExerciseNotFound(exercise_id.to_string()));
        }

        let exercises = session
            .exercises()
            .iter()
            .filter(|exercise| exercise.id != exercise_id)
            .cloned()
            .collect();
        self.push_exercises(session_id, exercises).await
    }

    /// Swap in an edited exercise, matched by ID
    pub async fn replace_exercise(
        &mut self,
        session_id: &str,
        exercise: Exercise,
    ) -> Result<ExerciseSession, StoreError> {
        let mut draft = self.require_session(session_id)?.clone();
        let exercise_id = exercise.id.clone();
        if !draft.replace_exercise(exercise) {
            return Err(StoreError::ExerciseNotFound(exercise_id));
        }
        self.push_exercises(session_id, draft.exercises().to_vec())
            .await
    }

    /// Rate a completed session (1 to 5)
    pub async fn rate_session(
        &mut self,
        id: &str,
        rating: u8,
        feedback: Option<String>,
    ) -> Result<ExerciseSession, StoreError> {
        if !(1..=5).contains(&rating) {
            return Err(StoreError::InvalidOperation(format!(
                "rating must be between 1 and 5, got {}",
                rating
            )));
        }
        if self.require_session(id)?.planned {
            return Err(StoreError::InvalidOperation(
                "planned sessions cannot be rated".to_string(),
            ));
        }

        let mut update = SessionUpdate::default();
        update.rating = Some(rating);
        update.feedback = feedback;
        self.update_session(id, update).await
    }

    /// Mark a planned session as done today. There is no way back.
    pub async fn complete_planned(
        &mut self,
        id: &str,
        today: NaiveDate,
    ) -> Result<ExerciseSession, StoreError> {
        if !self.require_session(id)?.planned {
            return Err(StoreError::InvalidOperation(
                "only planned sessions can be completed".to_string(),
            ));
        }

        let mut update = SessionUpdate::default();
        update.planned = Some(false);
        update.date = Some(today);
        self.update_session(id, update).await
    }

    /// Read-only exercise catalog from the remote store
    pub async fn exercise_catalog(&mut self) -> Result<Vec<Exercise>, StoreError> {
        let result = self.remote.list_exercises().await;
        result.map_err(|e| self.remote_failed("load the exercise catalog", e))
    }

    pub fn save_template(&mut self, exercise: &Exercise) -> ExerciseTemplate {
        let template = save_as_template(exercise);
        self.templates.push(template.clone());
        self.persist_templates();

        tracing::info!("Saved template {} ({})", template.id, template.name);
        template
    }

    pub fn delete_template(&mut self, id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|template| template.id != id);
        let deleted = self.templates.len() != before;

        if deleted {
            self.persist_templates();
        }
        deleted
    }

    /// Fresh exercise built from a stored template
    pub fn materialize_template(&self, id: &str) -> Result<Exercise, StoreError> {
        self.template(id)
            .map(materialize)
            .ok_or_else(|| StoreError::TemplateNotFound(id.to_string()))
    }

    fn require_session(&self, id: &str) -> Result<&ExerciseSession, StoreError> {
        self.session(id)
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))
    }

    async fn push_exercises(
        &mut self,
        session_id: &str,
        exercises: Vec<Exercise>,
    ) -> Result<ExerciseSession, StoreError> {
        let update = SessionUpdate::default().with_exercises(exercises);
        self.update_session(session_id, update).await
    }

    fn remote_failed(&mut self, action: &str, err: ApiError) -> StoreError {
        tracing::error!("Failed to {}: {}", action, err);
        self.notices.push(Notice::error(format!("Failed to {}", action)));
        StoreError::Remote(err)
    }

    fn persist_sessions(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save_sessions(&self.sessions) {
                tracing::warn!("Failed to cache sessions: {}", e);
            }
        }
    }

    fn persist_templates(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save_templates(&self.templates) {
                tracing::warn!("Failed to cache templates: {}", e);
            }
        }
    }
}
