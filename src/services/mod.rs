// Derived metrics and session state

pub mod duration;
pub mod metrics;
pub mod normalizer;
pub mod period;
pub mod session_store;
pub mod templates;

pub use duration::{compute_session_duration, exercise_duration, format_duration};
pub use metrics::{
    build_time_series, exercise_history, unique_exercise_names, HistoryEntry, PointMetrics,
    SeriesPoint, TimeSeries,
};
pub use normalizer::{change_type, default_payload, normalize};
pub use period::{calendar_month, sessions_on, summarize, CalendarDay, DailyActivity, Period, PeriodSummary};
pub use session_store::{Notice, NoticeLevel, SessionStore, StoreError};
pub use templates::{materialize, save_as_template};
