use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clap::Args;
use colored::Colorize;

use workout_log::services::period::{calendar_month, today, CalendarDay};

use super::AppContext;
use crate::ui;

#[derive(Args)]
pub struct CalendarCommand {
    /// Any date inside the month (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl CalendarCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let store = ctx.open_store().await?;

        let anchor = self.date.unwrap_or_else(today);
        let days = calendar_month(store.sessions(), anchor);

        println!("{}", anchor.format("%B %Y").to_string().bold());
        println!();
        print_grid(&days);

        let busy: Vec<_> = days.iter().filter(|day| !day.sessions.is_empty()).collect();
        if !busy.is_empty() {
            println!();
        }
        for day in busy {
            for session in &day.sessions {
                println!("{}", ui::session_line(session));
            }
        }

        Ok(())
    }
}

/// Sunday-first month grid; days with sessions are highlighted
fn print_grid(days: &[CalendarDay<'_>]) {
    println!("Su Mo Tu We Th Fr Sa");

    let offset = days
        .first()
        .map(|day| day.date.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let mut line = "   ".repeat(offset as usize);

    for day in days {
        let label = format!("{:>2}", day.date.day());
        let cell = if day.sessions.is_empty() {
            label
        } else if day.sessions.iter().all(|session| session.planned) {
            label.yellow().to_string()
        } else {
            label.green().bold().to_string()
        };
        line.push_str(&cell);

        if day.date.weekday().num_days_from_sunday() == 6 {
            println!("{}", line.trim_end());
            line.clear();
        } else {
            line.push(' ');
        }
    }

    if !line.is_empty() {
        println!("{}", line.trim_end());
    }
}
