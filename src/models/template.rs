use serde::{Deserialize, Serialize};

use super::exercise::{ExercisePayload, ExerciseRecord, ExerciseType};

/// Reusable exercise shape, detached from any session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExerciseRecord", into = "ExerciseRecord")]
pub struct ExerciseTemplate {
    pub id: String,
    pub name: String,
    pub payload: ExercisePayload,
    pub notes: Option<String>,
}

impl ExerciseTemplate {
    pub fn exercise_type(&self) -> ExerciseType {
        self.payload.exercise_type()
    }
}

impl From<ExerciseTemplate> for ExerciseRecord {
    fn from(template: ExerciseTemplate) -> Self {
        ExerciseRecord::canonical(template.id, template.name, template.payload, template.notes)
    }
}
