use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::exercise::{lenient, lenient_option, new_id, Exercise};
use crate::services::duration::compute_session_duration;

/// A completed or planned workout.
///
/// `duration` is always derived from the exercise list; the list is only
/// reachable through methods that recompute it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SessionRecord", into = "SessionRecord")]
pub struct ExerciseSession {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub notes: Option<String>,
    pub rating: Option<u8>,
    pub feedback: Option<String>,
    pub planned: bool,
    exercises: Vec<Exercise>,
    duration: u64,
}

impl ExerciseSession {
    /// Create an empty session with a generated ID
    pub fn draft(name: impl Into<String>, date: NaiveDate, planned: bool) -> Self {
        Self {
            id: new_id(),
            date,
            name: name.into(),
            notes: None,
            rating: None,
            feedback: None,
            planned,
            exercises: Vec::new(),
            duration: 0,
        }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Total duration in seconds
    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn exercise(&self, exercise_id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|exercise| exercise.id == exercise_id)
    }

    pub fn add_exercise(&mut self, exercise: Exercise) {
        self.exercises.push(exercise);
        self.recalculate_duration();
    }

    pub fn remove_exercise(&mut self, exercise_id: &str) -> Option<Exercise> {
        let index = self
            .exercises
            .iter()
            .position(|exercise| exercise.id == exercise_id)?;
        let removed = self.exercises.remove(index);
        self.recalculate_duration();
        Some(removed)
    }

    /// Replace the exercise with the same ID, keeping its position
    pub fn replace_exercise(&mut self, exercise: Exercise) -> bool {
        match self.exercises.iter_mut().find(|ex| ex.id == exercise.id) {
            Some(slot) => {
                *slot = exercise;
                self.recalculate_duration();
                true
            }
            None => false,
        }
    }

    pub fn set_exercises(&mut self, exercises: Vec<Exercise>) {
        self.exercises = exercises;
        self.recalculate_duration();
    }

    /// Saving needs a name and at least one exercise
    pub fn can_save(&self) -> bool {
        !self.name.trim().is_empty() && !self.exercises.is_empty()
    }

    /// A rating of zero means unrated
    pub fn effective_rating(&self) -> Option<u8> {
        self.rating.filter(|rating| *rating > 0)
    }

    fn recalculate_duration(&mut self) {
        self.duration = compute_session_duration(&self.exercises);
    }
}

/// Wire shape of a session. `duration` is accepted but recomputed on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    id: String,
    date: NaiveDate,
    #[serde(default, deserialize_with = "lenient")]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    duration: Option<u64>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feedback: Option<String>,
    #[serde(default)]
    exercises: Vec<Exercise>,
    #[serde(default)]
    planned: bool,
}

impl From<SessionRecord> for ExerciseSession {
    fn from(record: SessionRecord) -> Self {
        if let Some(stored) = record.duration {
            let derived = compute_session_duration(&record.exercises);
            if stored != derived {
                tracing::debug!(
                    "Session {} stored duration {}s, derived {}s",
                    record.id,
                    stored,
                    derived
                );
            }
        }

        let mut session = Self {
            id: record.id,
            date: record.date,
            name: record.name,
            notes: record.notes,
            rating: record.rating,
            feedback: record.feedback,
            planned: record.planned,
            exercises: record.exercises,
            duration: 0,
        };
        session.recalculate_duration();
        session
    }
}

impl From<ExerciseSession> for SessionRecord {
    fn from(session: ExerciseSession) -> Self {
        Self {
            id: session.id,
            date: session.date,
            name: session.name,
            notes: session.notes,
            duration: Some(session.duration),
            rating: session.rating,
            feedback: session.feedback,
            exercises: session.exercises,
            planned: session.planned,
        }
    }
}

/// Body for creating a session; the server assigns the ID
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    date: NaiveDate,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    duration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    feedback: Option<String>,
    exercises: Vec<Exercise>,
    planned: bool,
}

impl NewSession {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Materialize the session under an assigned ID
    pub fn with_id(self, id: impl Into<String>) -> ExerciseSession {
        ExerciseSession {
            id: id.into(),
            date: self.date,
            name: self.name,
            notes: self.notes,
            rating: self.rating,
            feedback: self.feedback,
            planned: self.planned,
            exercises: self.exercises,
            duration: self.duration,
        }
    }
}

impl From<ExerciseSession> for NewSession {
    fn from(session: ExerciseSession) -> Self {
        Self {
            date: session.date,
            name: session.name,
            notes: session.notes,
            duration: session.duration,
            rating: session.rating,
            feedback: session.feedback,
            exercises: session.exercises,
            planned: session.planned,
        }
    }
}

/// Partial session update. Exercises and duration always travel together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exercises: Option<Vec<Exercise>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<u64>,
}

impl SessionUpdate {
    pub fn with_exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.duration = Some(compute_session_duration(&exercises));
        self.exercises = Some(exercises);
        self
    }

    /// Apply the present fields to a copy of `session`
    pub fn apply_to(&self, session: &ExerciseSession) -> ExerciseSession {
        let mut updated = session.clone();
        if let Some(date) = self.date {
            updated.date = date;
        }
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(notes) = &self.notes {
            updated.notes = Some(notes.clone());
        }
        if let Some(rating) = self.rating {
            updated.rating = Some(rating);
        }
        if let Some(feedback) = &self.feedback {
            updated.feedback = Some(feedback.clone());
        }
        if let Some(planned) = self.planned {
            updated.planned = planned;
        }
        if let Some(exercises) = &self.exercises {
            updated.set_exercises(exercises.clone());
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExercisePayload, StrengthSet};
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duration_follows_exercise_list() {
        let mut session = ExerciseSession::draft("Leg Day", date(2024, 1, 1), false);
        assert_eq!(session.duration(), 0);

        let squat = Exercise::new(
            "Squat",
            ExercisePayload::Strength {
                sets: vec![StrengthSet::new(5, 100.0, 5)],
            },
        );
        let squat_id = squat.id.clone();
        session.add_exercise(squat);
        session.add_exercise(Exercise::new("Bike", ExercisePayload::Cardio { duration: 600 }));
        assert_eq!(session.duration(), 900);

        session.remove_exercise(&squat_id);
        assert_eq!(session.duration(), 600);
    }

    #[test]
    fn test_deserialize_recomputes_stale_duration() {
        let session: ExerciseSession = serde_json::from_value(json!({
            "id": "s1",
            "date": "2024-01-01",
            "name": "Run",
            "duration": 99999,
            "exercises": [{ "id": "e1", "name": "Jog", "type": "cardio", "duration": 1800 }]
        }))
        .unwrap();

        assert_eq!(session.duration(), 1800);
        assert!(!session.planned);
    }

    #[test]
    fn test_update_apply_recomputes_duration() {
        let session = ExerciseSession::draft("Evening", date(2024, 2, 3), false);
        let update = SessionUpdate {
            rating: Some(5),
            ..Default::default()
        }
        .with_exercises(vec![Exercise::new(
            "Stretch",
            ExercisePayload::Flexibility { duration: 900 },
        )]);

        let updated = update.apply_to(&session);
        assert_eq!(updated.duration(), 900);
        assert_eq!(updated.rating, Some(5));
        assert_eq!(updated.id, session.id);
    }

    #[test]
    fn test_new_session_omits_id() {
        let draft = ExerciseSession::draft("Plan", date(2024, 3, 1), true);
        let body = serde_json::to_value(NewSession::from(draft)).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["planned"], json!(true));
        assert_eq!(body["date"], json!("2024-03-01"));
    }
}
