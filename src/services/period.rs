//! Week and month summaries plus calendar views.
//!
//! Weeks run Sunday through Saturday regardless of locale. Navigation is
//! stateless: moving between periods only shifts the anchor date.

use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ExerciseSession, ExerciseType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
}

impl Period {
    /// First day of the period containing `anchor`
    pub fn start_of(self, anchor: NaiveDate) -> NaiveDate {
        match self {
            Period::Week => {
                anchor - Duration::days(i64::from(anchor.weekday().num_days_from_sunday()))
            }
            Period::Month => anchor - Duration::days(i64::from(anchor.day0())),
        }
    }

    /// Last day (inclusive) of the period containing `anchor`
    pub fn end_of(self, anchor: NaiveDate) -> NaiveDate {
        let start = self.start_of(anchor);
        match self {
            Period::Week => start + Duration::days(6),
            Period::Month => start
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(NaiveDate::MAX),
        }
    }

    pub fn contains(self, anchor: NaiveDate, date: NaiveDate) -> bool {
        self.start_of(anchor) <= date && date <= self.end_of(anchor)
    }

    /// Anchor shifted one period back
    pub fn previous(self, anchor: NaiveDate) -> NaiveDate {
        match self {
            Period::Week => anchor - Duration::days(7),
            Period::Month => anchor.checked_sub_months(Months::new(1)).unwrap_or(anchor),
        }
    }

    /// Anchor shifted one period forward
    pub fn next(self, anchor: NaiveDate) -> NaiveDate {
        match self {
            Period::Week => anchor + Duration::days(7),
            Period::Month => anchor.checked_add_months(Months::new(1)).unwrap_or(anchor),
        }
    }

    /// Every calendar day of the period containing `anchor`
    pub fn days(self, anchor: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_of(anchor);
        self.start_of(anchor)
            .iter_days()
            .take_while(move |day| *day <= end)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Week => write!(f, "Week"),
            Period::Month => write!(f, "Month"),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            _ => Err(anyhow::anyhow!("Invalid period: {}", s)),
        }
    }
}

/// Anchor for "go to today"
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: NaiveDate,
    /// Summed session duration, rounded to whole minutes
    pub duration_minutes: u64,
    pub sessions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub period: Period,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub session_count: usize,
    pub total_duration: u64,
    /// Mean of ratings above zero; 0.0 when nothing is rated
    pub average_rating: f64,
    pub exercise_type_distribution: BTreeMap<ExerciseType, usize>,
    pub daily_activity: Vec<DailyActivity>,
}

fn round_minutes(seconds: u64) -> u64 {
    (seconds + 30) / 60
}

/// Summarize completed sessions for the period containing `anchor`.
///
/// Planned sessions never count. Daily activity is looked up by absolute
/// date across every completed session passed in, not only the filtered
/// set; because the days all lie inside the period the two agree.
pub fn summarize(sessions: &[ExerciseSession], period: Period, anchor: NaiveDate) -> PeriodSummary {
    let completed: Vec<&ExerciseSession> = sessions.iter().filter(|s| !s.planned).collect();
    let in_period: Vec<&ExerciseSession> = completed
        .iter()
        .copied()
        .filter(|session| period.contains(anchor, session.date))
        .collect();

    let total_duration: u64 = in_period.iter().map(|session| session.duration()).sum();

    let ratings: Vec<u8> = in_period
        .iter()
        .filter_map(|session| session.effective_rating())
        .collect();
    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().map(|rating| f64::from(*rating)).sum::<f64>() / ratings.len() as f64
    };

    let mut exercise_type_distribution = BTreeMap::new();
    for exercise in in_period.iter().flat_map(|session| session.exercises()) {
        *exercise_type_distribution
            .entry(exercise.exercise_type())
            .or_insert(0) += 1;
    }

    let daily_activity = period
        .days(anchor)
        .map(|day| {
            let day_sessions: Vec<_> = completed.iter().filter(|s| s.date == day).collect();
            DailyActivity {
                date: day,
                duration_minutes: round_minutes(day_sessions.iter().map(|s| s.duration()).sum()),
                sessions: day_sessions.len(),
            }
        })
        .collect();

    PeriodSummary {
        period,
        start: period.start_of(anchor),
        end: period.end_of(anchor),
        session_count: in_period.len(),
        total_duration,
        average_rating,
        exercise_type_distribution,
        daily_activity,
    }
}

/// Sessions dated on `day`, in input order
pub fn sessions_on(sessions: &[ExerciseSession], day: NaiveDate) -> Vec<&ExerciseSession> {
    sessions.iter().filter(|session| session.date == day).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub sessions: Vec<&'a ExerciseSession>,
}

/// One entry per day of the month containing `anchor`
pub fn calendar_month(sessions: &[ExerciseSession], anchor: NaiveDate) -> Vec<CalendarDay<'_>> {
    Period::Month
        .days(anchor)
        .map(|date| CalendarDay {
            date,
            sessions: sessions_on(sessions, date),
        })
        .collect()
}
