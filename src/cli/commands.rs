//! CLI command handlers

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::Subcommand;

use crate::app::AppContext;
use crate::config::{self, AppConfig, ConfigLoader, paths};
use crate::dashboard::DashboardView;
use crate::locale::LocaleFormatter;
use crate::prefs::{self, Preferences, ThemeChoice, TimeRange};
use crate::settings::{MemoryForm, RecordingNotifier, SettingsFormController};
use crate::theme::{ColorSchemeSignal, ThemeResolver};

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "ui.enableMouse", "network.probeUrl")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "ui.enableMouse", "network.probeUrl")
        key: String,
        /// Configuration value
        value: String,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Preference record subcommands
#[derive(Subcommand, Debug)]
pub enum PrefsSubcommand {
    /// Print the whole record as JSON
    Show,
    /// Get one preference (e.g., "dateFormat", "invoiceFields.weight")
    Get { key: String },
    /// Set one preference
    Set { key: String, value: String },
    /// Restore the defaults
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum ThemeSubcommand {
    /// Show the stored choice and the applied scheme
    Show,
    /// Store a theme choice (light, dark or auto)
    Set { choice: String },
    /// Switch between light and dark
    Toggle,
}

/// Invoice field subcommands
#[derive(Subcommand, Debug)]
pub enum FieldsSubcommand {
    /// List invoice fields and whether they are enabled
    List,
    /// Add a custom field, enabled
    Add { name: String },
    /// Remove a field (custom fields are deleted, built-ins disabled)
    Remove {
        key: String,
        /// Skip the confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Formatting preview subcommands
#[derive(Subcommand, Debug)]
pub enum FormatSubcommand {
    /// Format an amount as currency
    Currency {
        amount: f64,
        /// Currency code (defaults to the preferred currency)
        #[arg(long)]
        currency: Option<String>,
    },
    /// Format a date given as YYYY-MM-DD (defaults to today)
    Date {
        date: Option<String>,
        /// Date format tag (e.g., "DD/MM/YY")
        #[arg(long)]
        format: Option<String>,
    },
    /// Format a time given as HH:MM (defaults to now)
    Time {
        time: Option<String>,
        /// Time format tag ("12h" or "24h")
        #[arg(long)]
        format: Option<String>,
    },
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;

            if let Some(key) = key {
                println!("{}", config::get_config_value(&config, &key)?);
            } else {
                print_yaml(&config)?;
            }
        }
        ConfigSubcommand::Set { key, value } => {
            let mut config = ConfigLoader::load().unwrap_or_else(|_| ConfigLoader::load_defaults());

            config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;
            ConfigLoader::validate(&config)?;

            ConfigLoader::save_root(&config).context("Failed to save configuration")?;
            println!("Configuration saved");
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            print_yaml(&config)?;
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
        ConfigSubcommand::Validate => match ConfigLoader::validate_root() {
            Ok(()) => println!("Configuration is valid"),
            Err(e) => {
                eprintln!("Configuration validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

fn print_yaml(config: &AppConfig) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
    print!("{}", yaml);
    Ok(())
}

pub fn handle_prefs_command(ctx: &AppContext, cmd: PrefsSubcommand) -> Result<()> {
    match cmd {
        PrefsSubcommand::Show => {
            let json = serde_json::to_string_pretty(&ctx.prefs.load())
                .context("Failed to serialize preferences")?;
            println!("{}", json);
        }
        PrefsSubcommand::Get { key } => {
            println!("{}", prefs::get_preference_value(&ctx.prefs.load(), &key)?);
        }
        PrefsSubcommand::Set { key, value } => {
            prefs::set_preference_value(&ctx.prefs, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;
            println!("Preference saved");
        }
        PrefsSubcommand::Reset => {
            ctx.prefs
                .save(&Preferences::default())
                .context("Failed to reset preferences")?;
            println!("Preferences reset to defaults");
        }
    }

    Ok(())
}

pub fn handle_theme_command(ctx: &AppContext, cmd: ThemeSubcommand) -> Result<()> {
    let resolver = ThemeResolver::new(ctx.prefs.clone(), ColorSchemeSignal::detect());

    let state = match cmd {
        ThemeSubcommand::Show => resolver.state(),
        ThemeSubcommand::Set { choice } => {
            let choice = ThemeChoice::parse(&choice).with_context(|| {
                format!("Unknown theme '{}', expected light, dark or auto", choice)
            })?;
            resolver.set_theme(choice)?
        }
        ThemeSubcommand::Toggle => resolver.toggle()?,
    };

    let affordance = resolver.affordance();
    println!("Theme:   {}", state.choice);
    println!("Applied: {}", state.applied);
    println!(
        "Toggle:  {} ({})",
        affordance.toggle_label, affordance.toggle_icon
    );
    Ok(())
}

/// One line per invoice field: `[x] Label (key)`
pub fn field_lines(prefs: &Preferences) -> Vec<String> {
    prefs
        .ordered_field_keys()
        .into_iter()
        .map(|key| {
            let mark = if prefs.is_invoice_field_enabled(&key) {
                "x"
            } else {
                " "
            };
            format!("[{}] {} ({})", mark, prefs.field_label(&key), key)
        })
        .collect()
}

pub fn handle_fields_command(ctx: &AppContext, cmd: FieldsSubcommand) -> Result<()> {
    let mut controller = SettingsFormController::new(
        ctx.prefs.clone(),
        MemoryForm::complete(),
        RecordingNotifier::default(),
    );

    match cmd {
        FieldsSubcommand::List => {
            for line in field_lines(&ctx.prefs.load()) {
                println!("{}", line);
            }
        }
        FieldsSubcommand::Add { name } => {
            let key = controller.add_custom_field(&name)?;
            controller.save()?;
            println!("Added field \"{}\" ({})", name.trim(), key);
        }
        FieldsSubcommand::Remove { key, yes } => {
            let message = controller.request_removal(&key)?.confirmation_message();
            if !yes {
                println!("{}", message);
                println!("Re-run with --yes to confirm");
                controller.cancel_removal();
                return Ok(());
            }
            let removed = controller.confirm_removal()?;
            controller.save()?;
            if removed.custom {
                println!("Deleted field \"{}\"", removed.label);
            } else {
                println!("Disabled field \"{}\"", removed.label);
            }
        }
    }

    Ok(())
}

pub fn handle_format_command(ctx: &AppContext, cmd: FormatSubcommand) -> Result<()> {
    let formatter = LocaleFormatter::from_preferences(&ctx.prefs.load());

    let output = match cmd {
        FormatSubcommand::Currency { amount, currency } => {
            formatter.format_currency(amount, currency.as_deref())
        }
        FormatSubcommand::Date { date, format } => {
            let date = match date {
                Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))?,
                None => Local::now().date_naive(),
            };
            formatter.format_date(&date, format.as_deref())
        }
        FormatSubcommand::Time { time, format } => {
            let time = match time {
                Some(raw) => NaiveTime::parse_from_str(&raw, "%H:%M")
                    .with_context(|| format!("Invalid time '{}', expected HH:MM", raw))?,
                None => Local::now().time(),
            };
            formatter.format_time(&time, format.as_deref())
        }
    };

    println!("{}", output);
    Ok(())
}

pub fn handle_dashboard_command(ctx: &AppContext, range: Option<String>) -> Result<()> {
    let range = match range {
        Some(raw) => Some(
            TimeRange::parse(&raw)
                .with_context(|| format!("Unknown range '{}', expected 7d, 1m, 3m or 1y", raw))?,
        ),
        None => None,
    };

    let now = chrono::Utc::now();
    let view = DashboardView::load(ctx.prefs.clone(), now);
    let summary = view.summary();

    println!("Total sales:   {}", summary.total_sales);
    println!("Invoices made: {}", summary.invoices_made);
    println!();
    println!("Recent invoices");
    if summary.recent.is_empty() {
        println!("  No invoices created yet");
    }
    for invoice in &summary.recent {
        println!(
            "  {:<24} {:<14} {}",
            invoice.name, invoice.date, invoice.amount
        );
    }

    let range = range.unwrap_or(ctx.prefs.load().time_range_default);
    let series = view.sales_series(range, now.date_naive());
    let formatter = LocaleFormatter::from_preferences(&ctx.prefs.load());
    println!();
    println!("Sales ({})", range.label());
    for (label, value) in series.labels.iter().zip(&series.values) {
        if *value > 0.0 {
            println!("  {:<8} {}", label, formatter.format_currency(*value, None));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lines() {
        let mut prefs = Preferences::default();
        prefs
            .invoice_fields
            .insert("custom-gst-no".to_string(), true);
        prefs
            .custom_field_labels
            .insert("custom-gst-no".to_string(), "GST No".to_string());

        let lines = field_lines(&prefs);
        assert_eq!(lines[0], "[x] Name (name)");
        assert_eq!(lines[2], "[ ] Weight (weight)");
        assert_eq!(
            lines.last().map(String::as_str),
            Some("[x] GST No (custom-gst-no)")
        );
    }
}
