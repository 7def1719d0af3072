use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use fibbo_score::config::{load_settings, Settings};
use fibbo_score::editor::ConfigEditor;
use fibbo_score::history::{for_entity, for_project, latest_per_entity_channel, load_records};
use fibbo_score::output;
use fibbo_score::scoring::{
    aggregate, apply_sensitivity, channel_defaults, defaults_for, sensitivity_level,
    validate_config, Channel, ChannelScore, FibboScoreConfig, SENSITIVITY_LEVELS,
};
use fibbo_score::store::{load_or_default, JsonFileRepository};

const EXIT_SUCCESS: i32 = 0;
const EXIT_USAGE: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List supported channels
    Channels,
    /// List sensitivity levels and their multipliers
    Levels,
    /// Print catalog default thresholds
    Defaults {
        /// Only this channel (default: all channels)
        #[arg(long, value_parser = parse_channel)]
        channel: Option<Channel>,
        /// Print JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
    /// Show a channel's thresholds scaled by a sensitivity, without saving
    Preview {
        #[arg(long, value_parser = parse_channel)]
        channel: Channel,
        /// Sensitivity level 1-5
        #[arg(long, conflicts_with = "multiplier", required_unless_present = "multiplier")]
        sensitivity: Option<u8>,
        /// Custom multiplier instead of a level
        #[arg(long)]
        multiplier: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Classify one or more 0-100 scores
    Classify {
        #[arg(required = true, allow_negative_numbers = true)]
        scores: Vec<f64>,
    },
    /// Show or edit the project's FibboScore config
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show the latest score per entity and channel from an exported JSON file
    Latest {
        /// JSON array of score rows
        rows: PathBuf,
        /// Only rows for this entity id
        #[arg(long)]
        entity: Option<String>,
        /// Also print the weighted overall score per entity
        #[arg(long)]
        aggregate: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print weights and headline thresholds
    Show {
        /// Print the full document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rebuild a channel's thresholds from a sensitivity level
    Sensitivity {
        #[arg(value_parser = parse_channel)]
        channel: Channel,
        level: u8,
        #[arg(long)]
        dry_run: bool,
    },
    /// Set a channel's weight in percent (0-200)
    Weight {
        #[arg(value_parser = parse_channel)]
        channel: Channel,
        percent: f64,
        #[arg(long)]
        dry_run: bool,
    },
    /// Deep-merge a partial JSON document (e.g. a preset) into the config
    Merge {
        file: PathBuf,
        #[arg(long)]
        dry_run: bool,
    },
    /// Return every channel to defaults and full weight
    Reset {
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "fibbo")]
#[command(about = "FibboScore thresholds, sensitivity and classification", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to settings file (defaults to ~/.config/fibbo/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Project whose config is read or edited
    #[arg(short, long, global = true)]
    project: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn parse_channel(s: &str) -> Result<Channel, String> {
    s.parse::<Channel>().map_err(|e| e.to_string())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match load_settings(cli.config.map(PathBuf::from)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    let project = settings.resolve_project(cli.project.as_deref());
    debug!(project = %project, "resolved project");

    let use_colors = output::should_use_colors();
    let result = match cli.command {
        Commands::Channels => {
            println!("{}", output::format_channel_list(use_colors));
            Ok(())
        }
        Commands::Levels => {
            println!("{}", output::format_levels(&SENSITIVITY_LEVELS, use_colors));
            Ok(())
        }
        Commands::Defaults { channel, json } => match channel {
            Some(c) => print_document(&defaults_for(c), json),
            None => print_document(&channel_defaults(), json),
        },
        Commands::Preview {
            channel,
            sensitivity,
            multiplier,
            json,
        } => run_preview(channel, sensitivity, multiplier, json),
        Commands::Classify { scores } => {
            for score in scores {
                println!("{}", output::format_classification(score, use_colors));
            }
            Ok(())
        }
        Commands::Config { action } => run_config(&settings, &project, action, use_colors),
        Commands::Latest {
            rows,
            entity,
            aggregate,
        } => run_latest(&settings, &project, rows, entity, aggregate, use_colors),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_USAGE);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn print_document<T: Serialize>(doc: &T, json: bool) -> Result<()> {
    let text = if json {
        serde_json::to_string_pretty(doc).context("Failed to serialize JSON")?
    } else {
        serde_saphyr::to_string(doc).context("Failed to serialize YAML")?
    };
    println!("{}", text.trim_end());
    Ok(())
}

fn run_preview(
    channel: Channel,
    sensitivity: Option<u8>,
    multiplier: Option<f64>,
    json: bool,
) -> Result<()> {
    let multiplier = match (sensitivity, multiplier) {
        (Some(level), _) => match sensitivity_level(level) {
            Some(l) => l.multiplier,
            None => anyhow::bail!("Sensitivity level must be between 1 and 5, got {}", level),
        },
        (None, Some(m)) => m,
        (None, None) => anyhow::bail!("Pass --sensitivity or --multiplier"),
    };
    if multiplier <= 0.0 {
        warn!(multiplier, "non-positive multiplier floors scaled thresholds at 0");
    }
    print_document(&apply_sensitivity(&defaults_for(channel), multiplier), json)
}

fn open_store(settings: &Settings) -> Result<JsonFileRepository> {
    Ok(JsonFileRepository::new(settings.resolve_store_dir()?))
}

/// Load the project's stored config and refuse to continue if it is invalid.
fn load_project_config(repo: &JsonFileRepository, project: &str) -> FibboScoreConfig {
    let config = match load_or_default(repo, project) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Err(errors) = validate_config(&config) {
        eprintln!("FibboScore config errors in project '{}':", project);
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    config
}

fn run_config(
    settings: &Settings,
    project: &str,
    action: ConfigAction,
    use_colors: bool,
) -> Result<()> {
    let mut repo = open_store(settings)?;
    let mut editor = ConfigEditor::new(load_project_config(&repo, project));

    let dry_run = match action {
        ConfigAction::Show { json } => {
            let config = editor.saved();
            if json {
                return print_document(config, true);
            }
            println!("Project: {}", project);
            println!("{}", output::format_config_summary(config, use_colors));
            return Ok(());
        }
        ConfigAction::Sensitivity {
            channel,
            level,
            dry_run,
        } => {
            editor.set_sensitivity(channel, level)?;
            dry_run
        }
        ConfigAction::Weight {
            channel,
            percent,
            dry_run,
        } => {
            editor.set_weight_percent(channel, percent)?;
            dry_run
        }
        ConfigAction::Merge { file, dry_run } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read override file {}", file.display()))?;
            let overrides: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in {}", file.display()))?;
            editor.apply_overrides(&overrides)?;
            dry_run
        }
        ConfigAction::Reset { dry_run } => {
            editor.reset_to_defaults();
            dry_run
        }
    };

    println!("{}", output::format_config_summary(editor.preview(), use_colors));

    if dry_run {
        editor.discard();
        println!("Dry run: nothing saved.");
    } else {
        editor.save(&mut repo, project)?;
        println!("Saved config for project '{}'.", project);
    }
    Ok(())
}

fn run_latest(
    settings: &Settings,
    project: &str,
    rows_path: PathBuf,
    entity: Option<String>,
    show_aggregate: bool,
    use_colors: bool,
) -> Result<()> {
    let mut rows = for_project(load_records(&rows_path)?, project);
    if let Some(ref entity_id) = entity {
        rows = for_entity(rows, entity_id);
    }
    let latest = latest_per_entity_channel(rows);
    debug!(rows = latest.len(), "latest rows after dedup");

    println!("{}", output::format_latest_table(&latest, use_colors));

    if show_aggregate && !latest.is_empty() {
        let repo = open_store(settings)?;
        let config = load_project_config(&repo, project);

        let mut by_entity: BTreeMap<&str, (&str, Vec<ChannelScore>)> = BTreeMap::new();
        for row in &latest {
            let (_, scores) = by_entity
                .entry(row.entity_id.as_str())
                .or_insert_with(|| (row.display_name(), Vec::new()));
            scores.push(ChannelScore {
                channel: row.channel,
                dimensions: row.dimensions(),
            });
        }

        println!();
        for (name, scores) in by_entity.into_values() {
            match aggregate(&scores, &config) {
                Some(result) => println!("{}", output::format_aggregate(name, &result, use_colors)),
                None => println!("{}: no weighted channels", name),
            }
        }
    }
    Ok(())
}
