use anyhow::Result;
use clap::Args;
use colored::Colorize;

use workout_log::services::metrics::{build_time_series, unique_exercise_names};
use workout_log::services::{format_duration, PointMetrics};

use super::AppContext;

#[derive(Args)]
pub struct ProgressCommand {
    /// Exercise to chart (exact name); lists logged names when omitted
    exercise: Option<String>,

    /// Print the series as JSON
    #[arg(long)]
    json: bool,
}

impl ProgressCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let store = ctx.open_store().await?;

        let Some(name) = self.exercise else {
            let names = unique_exercise_names(store.sessions());
            println!("{}", "Logged Exercises".bold());
            println!();
            if names.is_empty() {
                println!("Nothing logged yet");
            }
            for name in names {
                println!("  {}", name);
            }
            return Ok(());
        };

        let series = build_time_series(store.sessions(), &name);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&series)?);
            return Ok(());
        }

        let Some(series_type) = series.exercise_type else {
            println!("No completed sessions include {}", name);
            return Ok(());
        };

        println!("{}", format!("Progress: {} ({})", name, series_type).bold());
        println!();

        for point in &series.points {
            match &point.metrics {
                PointMetrics::Strength { weight, volume } => println!(
                    "{}  max {:>7.1} kg  volume {:>9.1}",
                    point.date, weight, volume
                ),
                PointMetrics::Duration { duration } => {
                    println!("{}  {:>9}", point.date, format_duration(*duration))
                }
                PointMetrics::Sprints { distance, duration } => println!(
                    "{}  {:>7.0} m  {:>9}",
                    point.date,
                    distance,
                    format_duration(*duration)
                ),
            }
        }

        Ok(())
    }
}
