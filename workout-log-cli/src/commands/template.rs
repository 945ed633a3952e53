use anyhow::{Context, Result};
use colored::Colorize;

use super::{print_notices, AppContext};
use crate::ui;

pub async fn list_templates(ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store().await?;

    println!("{}", "Exercise Templates".bold());
    println!();

    if store.templates().is_empty() {
        println!("No templates saved");
        println!("Save one with: workout-log template save <session-id> <exercise-id>");
        return Ok(());
    }

    for template in store.templates() {
        println!(
            "  {} {} {}  {}",
            template.name.bold(),
            format!("({})", template.exercise_type()).cyan(),
            ui::payload_summary(&template.payload),
            template.id.dimmed()
        );
    }

    Ok(())
}

pub async fn save_template(ctx: &AppContext, session_id: &str, exercise_id: &str) -> Result<()> {
    let mut store = ctx.open_store().await?;

    let exercise = store
        .session(session_id)
        .with_context(|| format!("Session not found: {}", session_id))?
        .exercise(exercise_id)
        .cloned()
        .with_context(|| format!("Exercise not found: {}", exercise_id))?;

    let template = store.save_template(&exercise);

    println!("{} Template saved: {}", "✓".green(), template.name);
    println!("  ID: {}", template.id);

    Ok(())
}

pub async fn use_template(ctx: &AppContext, template_id: &str, session_id: &str) -> Result<()> {
    let mut store = ctx.open_store().await?;

    let exercise = store.materialize_template(template_id)?;
    let result = store.add_exercise(session_id, exercise).await;
    print_notices(&mut store);
    let session = result?;

    println!();
    ui::print_session(&session);

    Ok(())
}

pub async fn delete_template(ctx: &AppContext, id: &str) -> Result<()> {
    let mut store = ctx.open_store().await?;

    if store.delete_template(id) {
        println!("{} Template deleted", "✓".green());
    } else {
        println!("Template not found: {}", id);
    }

    Ok(())
}
