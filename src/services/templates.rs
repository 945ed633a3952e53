use crate::models::exercise::new_id;
use crate::models::{Exercise, ExerciseTemplate};

/// Produce a fresh exercise from a template.
///
/// The payload is cloned, so editing the result never touches the template
/// or earlier instances. Set and sprint entry IDs are copied as-is.
pub fn materialize(template: &ExerciseTemplate) -> Exercise {
    Exercise {
        id: new_id(),
        name: template.name.clone(),
        payload: template.payload.clone(),
        notes: template.notes.clone(),
    }
}

/// Capture an exercise's shape as a new template
pub fn save_as_template(exercise: &Exercise) -> ExerciseTemplate {
    ExerciseTemplate {
        id: new_id(),
        name: exercise.name.clone(),
        payload: exercise.payload.clone(),
        notes: exercise.notes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExercisePayload, StrengthSet};

    fn bench_template() -> ExerciseTemplate {
        save_as_template(&Exercise::new(
            "Bench Press",
            ExercisePayload::Strength {
                sets: vec![StrengthSet::new(10, 50.0, 3)],
            },
        ))
    }

    #[test]
    fn test_materialize_twice_gives_distinct_ids() {
        let template = bench_template();
        let first = materialize(&template);
        let second = materialize(&template);

        assert_ne!(first.id, second.id);
        assert_ne!(first.id, template.id);
        assert_eq!(first.payload, second.payload);
        assert_eq!(first.name, second.name);
    }

    #[test]
    fn test_mutating_instance_leaves_template_alone() {
        let template = bench_template();
        let mut instance = materialize(&template);
        let untouched = materialize(&template);

        if let ExercisePayload::Strength { sets } = &mut instance.payload {
            sets[0].weight = 80.0;
        }
        instance.add_set();

        assert_eq!(template.payload, untouched.payload);
        assert_ne!(instance.payload, template.payload);
    }

    #[test]
    fn test_save_as_template_assigns_new_id() {
        let exercise = Exercise::new("Run", ExercisePayload::Cardio { duration: 1800 });
        let template = save_as_template(&exercise);
        assert_ne!(template.id, exercise.id);
        assert_eq!(template.payload, exercise.payload);
    }
}
