pub mod exercise;
pub mod session;
pub mod template;

pub use exercise::{
    Exercise, ExercisePayload, ExerciseRecord, ExerciseType, SetsField, Sprint, StrengthSet,
};
pub use session::{ExerciseSession, NewSession, SessionUpdate};
pub use template::ExerciseTemplate;
