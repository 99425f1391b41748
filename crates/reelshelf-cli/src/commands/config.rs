use super::prompts;
use crate::context::AppContext;
use crate::output::Output;
use crate::{ConfigCommands, ThemeChoice};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use movie_catalog_config::{AppConfig, API_KEY_ENV};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(ctx: &mut AppContext, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(ctx, full, output),
        ConfigCommands::ApiKey { key } => configure_api_key(ctx, key, output),
        ConfigCommands::Init { force } => init_config(ctx, force, output),
        ConfigCommands::Theme { choice } => configure_theme(ctx, choice, output),
    }
}

fn show_config(ctx: &AppContext, full: bool, output: &Output) -> Result<()> {
    let key = ctx.settings.api_key().unwrap_or_default();
    let key_display = if full { key.to_string() } else { mask_string(key) };
    let theme = if ctx.settings.dark_mode() { "dark" } else { "light" };
    let config_file = ctx.paths.config_file();

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file,
            "config_file_exists": config_file.exists(),
            "movies_file": ctx.catalog.path(),
            "settings_file": ctx.settings.path(),
            "movies": ctx.catalog.len(),
            "dark_mode": ctx.settings.dark_mode(),
            "tmdb_api_key": key_display,
            "lookup": {
                "base_url": ctx.config.lookup.base_url,
                "image_base_url": ctx.config.lookup.image_base_url,
                "timeout_secs": ctx.config.lookup.timeout_secs,
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    println!("\n{}", "Configuration".bright_cyan().bold());
    println!();

    let config_state = if config_file.exists() {
        config_file.display().to_string()
    } else {
        format!("{} (not present, using defaults)", config_file.display())
    };

    let mut files_table = Table::new();
    files_table.set_header(vec![
        Cell::new("Files").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
        Cell::new(""),
    ]);
    files_table.add_row(vec![Cell::new("Config"), Cell::new(config_state)]);
    files_table.add_row(vec![
        Cell::new("Movies"),
        Cell::new(format!("{} ({} movies)", ctx.catalog.path().display(), ctx.catalog.len())),
    ]);
    files_table.add_row(vec![Cell::new("Settings"), Cell::new(ctx.settings.path().display().to_string())]);
    files_table.load_preset(comfy_table::presets::UTF8_FULL);
    files_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", files_table);
    println!();

    let mut settings_table = Table::new();
    settings_table.set_header(vec![
        Cell::new("Settings").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
        Cell::new(""),
    ]);
    settings_table.add_row(vec![Cell::new("Theme"), Cell::new(theme)]);
    settings_table.add_row(vec![Cell::new("TMDB API key"), Cell::new(key_display)]);
    settings_table.add_row(vec![
        Cell::new("TMDB endpoint"),
        Cell::new(format!("{} (timeout {}s)", ctx.config.lookup.base_url, ctx.config.lookup.timeout_secs)),
    ]);
    settings_table.load_preset(comfy_table::presets::UTF8_FULL);
    settings_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", settings_table);

    if std::env::var(API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        output.info(format!("The TMDB API key comes from {}.", API_KEY_ENV));
    }
    Ok(())
}

fn init_config(ctx: &AppContext, force: bool, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Config file already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    ctx.paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create {}: {}", ctx.paths.config_dir().display(), e))?;
    AppConfig::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default config to {}", config_file.display()));
    Ok(())
}

fn configure_api_key(ctx: &mut AppContext, key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => prompts::prompt_password("TMDB API key (leave empty to clear)")?,
    };

    ctx.settings.set_api_key(&key);
    ctx.settings
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save settings to {}: {}", ctx.settings.path().display(), e))?;

    match ctx.settings.api_key() {
        Some(key) => output.success(format!("TMDB API key saved ({})", mask_string(key))),
        None => output.success("TMDB API key cleared"),
    }
    Ok(())
}

fn configure_theme(ctx: &mut AppContext, choice: ThemeChoice, output: &Output) -> Result<()> {
    let dark = match choice {
        ThemeChoice::Dark => {
            ctx.settings.set_dark_mode(true);
            true
        }
        ThemeChoice::Light => {
            ctx.settings.set_dark_mode(false);
            false
        }
        ThemeChoice::Toggle => ctx.settings.toggle_dark_mode(),
    };
    ctx.settings
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save settings to {}: {}", ctx.settings.path().display(), e))?;

    output.success(format!("Theme set to {}", if dark { "dark" } else { "light" }));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
