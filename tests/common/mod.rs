#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use workout_log::api::{ApiError, SessionRemote};
use workout_log::models::*;

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn strength(name: &str, reps: u32, weight: f64, set_count: u32) -> Exercise {
    Exercise::new(
        name,
        ExercisePayload::Strength {
            sets: vec![StrengthSet::new(reps, weight, set_count)],
        },
    )
}

pub fn cardio(name: &str, duration: u32) -> Exercise {
    Exercise::new(name, ExercisePayload::Cardio { duration })
}

pub fn sprints(name: &str, distance: f64, duration: u32, rep_count: u32) -> Exercise {
    Exercise::new(
        name,
        ExercisePayload::Sprints {
            sprints: vec![Sprint::new(distance, duration, rep_count)],
        },
    )
}

/// Completed session holding the given exercises
pub fn session(on: NaiveDate, name: &str, exercises: Vec<Exercise>) -> ExerciseSession {
    let mut session = ExerciseSession::draft(name, on, false);
    session.set_exercises(exercises);
    session
}

pub fn rated(mut session: ExerciseSession, rating: u8) -> ExerciseSession {
    session.rating = Some(rating);
    session
}

pub fn planned(mut session: ExerciseSession) -> ExerciseSession {
    session.planned = true;
    session
}

/// In-memory remote store; every call fails while `failing` is set
#[derive(Default)]
pub struct FakeRemote {
    pub sessions: Mutex<Vec<ExerciseSession>>,
    pub catalog: Mutex<Vec<Exercise>>,
    pub failing: AtomicBool,
    pub calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl FakeRemote {
    pub fn with_sessions(sessions: Vec<ExerciseSession>) -> Self {
        let remote = Self::default();
        *remote.sessions.lock().unwrap() = sessions;
        remote
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(ApiError::ServerError("simulated outage".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionRemote for FakeRemote {
    async fn list_sessions(&self) -> Result<Vec<ExerciseSession>, ApiError> {
        self.check()?;
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn get_session(&self, id: &str) -> Result<ExerciseSession, ApiError> {
        self.check()?;
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    async fn create_session(&self, session: &NewSession) -> Result<ExerciseSession, ApiError> {
        self.check()?;
        let id = format!("server-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let created = session.clone().with_id(id);
        self.sessions.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_session(
        &self,
        id: &str,
        update: &SessionUpdate,
    ) -> Result<ExerciseSession, ApiError> {
        self.check()?;
        let mut sessions = self.sessions.lock().unwrap();
        let slot = sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        *slot = update.apply_to(slot);
        Ok(slot.clone())
    }

    async fn delete_session(&self, id: &str) -> Result<(), ApiError> {
        self.check()?;
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn list_exercises(&self) -> Result<Vec<Exercise>, ApiError> {
        self.check()?;
        Ok(self.catalog.lock().unwrap().clone())
    }
}
