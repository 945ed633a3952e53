use anyhow::Result;

use workout_log::config::Config;

use super::AppContext;

pub fn show_config(ctx: &AppContext) -> Result<()> {
    let config_str = toml::to_string_pretty(ctx.config())?;

    println!("Current Configuration");
    println!("────────────────────────────────");
    println!("File: {}", ctx.config_path().display());
    println!();
    println!("{}", config_str);

    Ok(())
}

pub fn init_config(ctx: &AppContext, force: bool) -> Result<()> {
    let config_file = ctx.config_path();

    if config_file.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            config_file.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::default().save_to(config_file)?;

    println!("✓ Configuration initialized at: {}", config_file.display());

    Ok(())
}
