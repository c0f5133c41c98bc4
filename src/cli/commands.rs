//! Command dispatch: load input, call the services, print the result

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::{ArrayService, ChartService, TreeService};
use crate::cli::args::{ArrayCommands, ChartCommands, Cli, Commands, ConfigCommands, TreeCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{FormatOptions, TreeNode};
use crate::infrastructure::{read_json, to_pretty_json};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { command }) => {
            let settings = load_settings(cli)?;
            execute_tree(command, &TreeService::new(settings.tree))
        }
        Some(Commands::Array { command }) => execute_array(command, &ArrayService::new()),
        Some(Commands::Chart { command }) => {
            let settings = load_settings(cli)?;
            execute_chart(command, &ChartService::new(settings.chart))
        }
        Some(Commands::Config { command }) => execute_config(command, cli),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::InvalidArgs(
            "no command given, see --help".to_string(),
        )),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");
    Ok(settings)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    output::info(&to_pretty_json(value)?);
    Ok(())
}

fn forest_from(file: &Path) -> CliResult<Vec<serde_json::Value>> {
    Ok(TreeService::as_forest(read_json(file)?))
}

fn items_from(file: &Path) -> CliResult<Vec<serde_json::Value>> {
    Ok(ArrayService::items(read_json(file)?)?)
}

// ============================================================
// Tree commands
// ============================================================

#[instrument(level = "debug", skip(service))]
fn execute_tree(command: &TreeCommands, service: &TreeService) -> CliResult<()> {
    match command {
        TreeCommands::Count { depth, file } => {
            let forest = forest_from(file)?;
            output::info(&service.count_at_depth(&forest, *depth));
            Ok(())
        }
        TreeCommands::Find { field, value, file } => {
            let forest = forest_from(file)?;
            print_json(service.find_by_field(&forest, field, value)?)
        }
        TreeCommands::Parent { id, file } => {
            let forest = forest_from(file)?;
            print_json(service.parent_of(&forest, id)?)
        }
        TreeCommands::Path { field, value, file } => {
            let forest = forest_from(file)?;
            let children_field = &service.settings().children_field;
            let path: Vec<_> = service
                .path_to(&forest, field, value)?
                .into_iter()
                .map(|node| node.detached(children_field))
                .collect();
            print_json(&path)
        }
        TreeCommands::Flatten { file } => {
            let forest = forest_from(file)?;
            print_json(&service.flatten(&forest))
        }
        TreeCommands::Show { file } => {
            let forest = forest_from(file)?;
            print!("{}", service.render(&forest));
            Ok(())
        }
    }
}

// ============================================================
// Array commands
// ============================================================

#[instrument(level = "debug", skip(service))]
fn execute_array(command: &ArrayCommands, service: &ArrayService) -> CliResult<()> {
    match command {
        ArrayCommands::Move { indices, to, file } => {
            let items = items_from(file)?;
            print_json(&service.move_group(&items, indices, *to))
        }
        ArrayCommands::ToStart { field, value, file } => {
            let items = items_from(file)?;
            print_json(&service.to_start(&items, field, value))
        }
        ArrayCommands::Shift { from, to, file } => {
            let items = items_from(file)?;
            print_json(&service.shift(&items, *from, *to))
        }
        ArrayCommands::Serial {
            field,
            prefix,
            default,
            file,
        } => {
            let items = items_from(file)?;
            output::info(&service.serial(&items, field, prefix, *default));
            Ok(())
        }
        ArrayCommands::Search { value, bias, file } => {
            let items = items_from(file)?;
            output::info(&service.search(&items, value, (*bias).into())?);
            Ok(())
        }
    }
}

// ============================================================
// Chart commands
// ============================================================

#[instrument(level = "debug", skip(service))]
fn execute_chart(command: &ChartCommands, service: &ChartService) -> CliResult<()> {
    match command {
        ChartCommands::Range {
            field,
            decimal_places,
            split_count,
            file,
        } => {
            let items = items_from(file)?;
            print_json(&service.axis_range(&items, field, *decimal_places, *split_count)?)
        }
        ChartCommands::Fill {
            x_field,
            y_field,
            interval,
            file,
        } => {
            let items = items_from(file)?;
            print_json(&service.fill(&items, x_field, y_field, *interval)?)
        }
        ChartCommands::Merge { base, overrides } => {
            if base.as_path() == Path::new("-") && overrides.as_path() == Path::new("-") {
                return Err(CliError::InvalidArgs(
                    "stdin can feed only one of BASE and OVERRIDES".to_string(),
                ));
            }
            let merged = service.merge(read_json(base)?, read_json(overrides)?);
            print_json(&merged)
        }
        ChartCommands::Compact { file } => print_json(&service.compact(read_json(file)?)),
        ChartCommands::Rgba { hex, alpha } => {
            output::info(&service.rgba(hex, *alpha)?);
            Ok(())
        }
        ChartCommands::Label {
            value,
            decimal_places,
            raw,
            prefix,
            suffix,
            default_value,
            operations,
        } => {
            let options = FormatOptions {
                decimal_places: if *raw {
                    None
                } else {
                    decimal_places.or(FormatOptions::default().decimal_places)
                },
                prefix: prefix.clone(),
                suffix: suffix.clone(),
                default_value: default_value.clone(),
                operations: operations.clone(),
            };
            output::info(&service.label(value, &options));
            Ok(())
        }
        ChartCommands::Years { start, end } => print_json(&service.years(*start, *end)?),
    }
}

// ============================================================
// Config commands
// ============================================================

fn execute_config(command: &ConfigCommands, cli: &Cli) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Template => {
            print!("{}", Settings::template());
            Ok(())
        }
        ConfigCommands::Path => {
            output::header("Config locations");
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "exists" } else { "not created" };
                    output::detail(&format!("global:   {} ({state})", path.display()));
                }
                None => output::warning("no home directory, global config disabled"),
            }
            if let Some(path) = &cli.config {
                output::detail(&format!("explicit: {}", path.display()));
            }
            Ok(())
        }
    }
}
