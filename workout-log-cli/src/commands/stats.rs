use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;

use workout_log::services::period::{summarize, today, Period, PeriodSummary};
use workout_log::services::format_duration;

use super::AppContext;

/// Minutes per bar block in the daily activity chart
const MINUTES_PER_BLOCK: u64 = 5;
const MAX_BLOCKS: u64 = 40;

#[derive(Args)]
pub struct StatsCommand {
    /// Show monthly stats instead of weekly
    #[arg(long)]
    month: bool,

    /// Any date inside the period (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Step back this many periods
    #[arg(long, default_value = "0")]
    back: u32,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

impl StatsCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let store = ctx.open_store().await?;

        let period = if self.month { Period::Month } else { Period::Week };
        let mut anchor = self.date.unwrap_or_else(today);
        for _ in 0..self.back {
            anchor = period.previous(anchor);
        }

        let summary = summarize(store.sessions(), period, anchor);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary);
        }

        Ok(())
    }
}

fn print_summary(summary: &PeriodSummary) {
    println!("{}", "Training Statistics".bold());
    println!();
    println!("{}: {} to {}", summary.period, summary.start, summary.end);
    println!();
    println!("Sessions:        {}", summary.session_count);
    println!("Total time:      {}", format_duration(summary.total_duration));
    if summary.average_rating > 0.0 {
        println!("Average rating:  {:.1}", summary.average_rating);
    } else {
        println!("Average rating:  -");
    }

    if !summary.exercise_type_distribution.is_empty() {
        println!();
        println!("{}", "Exercise types".bold());
        for (exercise_type, count) in &summary.exercise_type_distribution {
            println!("  {:<12} {}", exercise_type.to_string(), count);
        }
    }

    println!();
    println!("{}", "Daily activity".bold());
    for day in &summary.daily_activity {
        let blocks = (day.duration_minutes / MINUTES_PER_BLOCK).min(MAX_BLOCKS) as usize;
        let bar = "█".repeat(blocks);
        println!(
            "  {} {}  {:>4}m  {}",
            day.date.format("%a"),
            day.date,
            day.duration_minutes,
            bar.green()
        );
    }
}
