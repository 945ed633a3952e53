use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Closed set of exercise categories; decides which payload an exercise carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Strength,
    Cardio,
    Flexibility,
    Sprints,
}

impl std::fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExerciseType::Strength => write!(f, "Strength"),
            ExerciseType::Cardio => write!(f, "Cardio"),
            ExerciseType::Flexibility => write!(f, "Flexibility"),
            ExerciseType::Sprints => write!(f, "Sprints"),
        }
    }
}

impl std::str::FromStr for ExerciseType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strength" => Ok(ExerciseType::Strength),
            "cardio" => Ok(ExerciseType::Cardio),
            "flexibility" => Ok(ExerciseType::Flexibility),
            "sprints" => Ok(ExerciseType::Sprints),
            _ => Err(anyhow::anyhow!("Invalid exercise type: {}", s)),
        }
    }
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_count() -> u32 {
    1
}

/// Historical records may carry `null` or junk in numeric fields; read those
/// as the type's default instead of failing the surrounding list.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Like [`lenient`], but an unreadable count still means one group.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(u32::deserialize(value).unwrap_or_else(|_| default_count()))
}

/// Optional field that reads as absent when its value has the wrong shape
pub(crate) fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(Option::<T>::deserialize(value).ok().flatten())
}

/// A group of identical sets: `set_count` sets of `reps` at `weight`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthSet {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub reps: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub weight: f64,
    #[serde(default = "default_count", deserialize_with = "lenient_count")]
    pub set_count: u32,
}

impl StrengthSet {
    pub fn new(reps: u32, weight: f64, set_count: u32) -> Self {
        Self {
            id: new_id(),
            reps,
            weight,
            set_count,
        }
    }
}

/// A group of identical sprints: `rep_count` runs of `distance` meters in `duration` seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub distance: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub duration: u32,
    #[serde(default = "default_count", deserialize_with = "lenient_count")]
    pub rep_count: u32,
}

impl Sprint {
    pub fn new(distance: f64, duration: u32, rep_count: u32) -> Self {
        Self {
            id: new_id(),
            distance,
            duration,
            rep_count,
        }
    }
}

/// Type-specific quantitative data. Exactly one variant per exercise, so
/// fields belonging to another type cannot linger.
#[derive(Debug, Clone, PartialEq)]
pub enum ExercisePayload {
    Strength { sets: Vec<StrengthSet> },
    Cardio { duration: u32 },
    Flexibility { duration: u32 },
    Sprints { sprints: Vec<Sprint> },
}

impl ExercisePayload {
    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            ExercisePayload::Strength { .. } => ExerciseType::Strength,
            ExercisePayload::Cardio { .. } => ExerciseType::Cardio,
            ExercisePayload::Flexibility { .. } => ExerciseType::Flexibility,
            ExercisePayload::Sprints { .. } => ExerciseType::Sprints,
        }
    }
}

/// One performed or planned movement within a session.
///
/// On the wire an exercise is the flat camelCase record used by the session
/// API and the local cache; reading goes through the legacy migration in
/// [`crate::services::normalizer`], writing emits only the structured fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExerciseRecord", into = "ExerciseRecord")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub payload: ExercisePayload,
    pub notes: Option<String>,
}

impl Exercise {
    /// Create a new exercise with a generated ID
    pub fn new(name: impl Into<String>, payload: ExercisePayload) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            payload,
            notes: None,
        }
    }

    pub fn exercise_type(&self) -> ExerciseType {
        self.payload.exercise_type()
    }

    /// Append a set group (10 reps, no weight, one set). No-op unless strength.
    pub fn add_set(&mut self) -> bool {
        match &mut self.payload {
            ExercisePayload::Strength { sets } => {
                sets.push(StrengthSet::new(10, 0.0, 1));
                true
            }
            _ => false,
        }
    }

    /// Append a sprint group (100m in 15s, one rep). No-op unless sprints.
    pub fn add_sprint(&mut self) -> bool {
        match &mut self.payload {
            ExercisePayload::Sprints { sprints } => {
                sprints.push(Sprint::new(100.0, 15, 1));
                true
            }
            _ => false,
        }
    }

    /// Remove a set or sprint group by its ID
    pub fn remove_entry(&mut self, entry_id: &str) -> bool {
        match &mut self.payload {
            ExercisePayload::Strength { sets } => {
                let before = sets.len();
                sets.retain(|set| set.id != entry_id);
                sets.len() != before
            }
            ExercisePayload::Sprints { sprints } => {
                let before = sprints.len();
                sprints.retain(|sprint| sprint.id != entry_id);
                sprints.len() != before
            }
            _ => false,
        }
    }
}

/// `sets` is a list of set groups in the current schema; older backends
/// send a bare integer set count under the same key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetsField {
    Entries(Vec<StrengthSet>),
    Count(u32),
}

/// Flat JSON shape shared by the session API, the cache and templates.
/// Carries both schema generations; see the normalizer for precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub sets: Option<SetsField>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub set_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub sprints: Option<Vec<Sprint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ExerciseRecord {
    /// Canonical record for a payload: structured fields only
    pub fn canonical(
        id: String,
        name: String,
        payload: ExercisePayload,
        notes: Option<String>,
    ) -> Self {
        let mut record = Self {
            id: Some(id),
            name,
            exercise_type: payload.exercise_type(),
            sets: None,
            set_count: None,
            reps: None,
            weight: None,
            duration: None,
            distance: None,
            sprints: None,
            notes,
        };

        match payload {
            ExercisePayload::Strength { sets } => record.sets = Some(SetsField::Entries(sets)),
            ExercisePayload::Cardio { duration } | ExercisePayload::Flexibility { duration } => {
                record.duration = Some(duration)
            }
            ExercisePayload::Sprints { sprints } => record.sprints = Some(sprints),
        }

        record
    }
}

impl From<Exercise> for ExerciseRecord {
    fn from(exercise: Exercise) -> Self {
        ExerciseRecord::canonical(exercise.id, exercise.name, exercise.payload, exercise.notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exercise_type_from_str() {
        assert_eq!("Strength".parse::<ExerciseType>().unwrap(), ExerciseType::Strength);
        assert_eq!("sprints".parse::<ExerciseType>().unwrap(), ExerciseType::Sprints);
        assert!("yoga".parse::<ExerciseType>().is_err());
    }

    #[test]
    fn test_serializes_only_structured_fields() {
        let exercise = Exercise::new(
            "Bench Press",
            ExercisePayload::Strength {
                sets: vec![StrengthSet::new(10, 50.0, 3)],
            },
        );

        let value = serde_json::to_value(&exercise).unwrap();
        assert_eq!(value["type"], json!("strength"));
        assert_eq!(value["sets"][0]["setCount"], json!(3));
        assert!(value.get("setCount").is_none());
        assert!(value.get("duration").is_none());
        assert!(value.get("sprints").is_none());
    }

    #[test]
    fn test_add_and_remove_entries() {
        let mut exercise = Exercise::new("Squat", ExercisePayload::Strength { sets: vec![] });
        assert!(exercise.add_set());
        assert!(!exercise.add_sprint());

        let set_id = match &exercise.payload {
            ExercisePayload::Strength { sets } => sets[0].id.clone(),
            _ => unreachable!(),
        };
        assert!(exercise.remove_entry(&set_id));
        assert!(!exercise.remove_entry(&set_id));
    }

    #[test]
    fn test_integer_sets_field_parses_as_count() {
        let record: ExerciseRecord = serde_json::from_value(json!({
            "name": "Deadlift",
            "type": "strength",
            "sets": 5,
            "reps": 5,
            "weight": 100.0
        }))
        .unwrap();

        assert_eq!(record.sets, Some(SetsField::Count(5)));
    }

    #[test]
    fn test_null_numbers_read_as_defaults() {
        let record: ExerciseRecord = serde_json::from_value(json!({
            "name": "Bench Press",
            "type": "strength",
            "sets": [{"reps": 10, "weight": null, "setCount": 3}, {"reps": "ten", "setCount": null}],
            "duration": null
        }))
        .unwrap();

        let sets = match record.sets {
            Some(SetsField::Entries(sets)) => sets,
            other => panic!("expected set entries, got {:?}", other),
        };
        assert_eq!((sets[0].reps, sets[0].weight, sets[0].set_count), (10, 0.0, 3));
        assert_eq!((sets[1].reps, sets[1].set_count), (0, 1));
        assert_eq!(record.duration, None);
    }

    #[test]
    fn test_malformed_sprint_list_reads_as_absent() {
        let record: ExerciseRecord = serde_json::from_value(json!({
            "name": "Flying 60s",
            "type": "sprints",
            "sprints": "not a list",
            "reps": 4,
            "distance": 60.0
        }))
        .unwrap();

        assert_eq!(record.sprints, None);
        assert_eq!(record.reps, Some(4));
    }
}
