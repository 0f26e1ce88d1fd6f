//! Berth CLI - a categorized project launcher for the terminal.

use berth::cli::{CategoryCommands, Cli, Commands, ConfigCommands, ProjectCommands, SystemCommands};
use berth::commands::{self, Output};
use berth::storage::Store;
use berth::workflow::{self, ProjectArgs, TerminalPrompter};
use berth::action_log;
use clap::Parser;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();
    let json_output = cli.json;

    // Determine data dir: --data-dir flag > BERTH_DATA_DIR env (via clap) >
    // platform data dir
    let data_dir = resolve_data_dir(cli.data_dir);

    // Serialize command for logging
    let (cmd_name, args_json) = serialize_command(&cli.command);

    // Start timing
    let start = Instant::now();

    // Execute command
    let result = run_command(cli.command, &data_dir, json_output);

    // Calculate duration
    let duration = start.elapsed().as_millis() as u64;

    // Determine success/error
    let (success, error) = match &result {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };

    // Log the action (silently fails if logging is disabled or encounters errors)
    let _ = action_log::log_action(&data_dir, &cmd_name, args_json, success, error, duration);

    // Handle result
    if let Err(e) = result {
        if json_output {
            eprintln!(r#"{{"error": "{}"}}"#, e);
        } else {
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    }
}

/// Resolve the data directory when neither the flag nor the environment
/// variable supplied one.
fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    match explicit {
        Some(path) => path,
        None => dirs::data_dir()
            .map(|dir| dir.join("berth"))
            .unwrap_or_else(|| PathBuf::from(".berth")),
    }
}

fn run_command(
    command: Option<Commands>,
    data_dir: &Path,
    json_output: bool,
) -> Result<(), berth::Error> {
    let mut store = Store::open(data_dir)?;
    let mut prompter = TerminalPrompter::new();

    match command {
        // Default: the picker menu
        None | Some(Commands::Menu) => {
            let result = workflow::open_menu(&store, &mut prompter)?;
            output(&result, json_output);
        }

        Some(Commands::Project { command }) => match command {
            ProjectCommands::Add {
                name,
                category,
                language,
                path,
                venv,
                no_venv,
                venv_manager,
            } => {
                let args = ProjectArgs {
                    name,
                    category,
                    language,
                    path,
                    virtual_env: flag_pair(venv, no_venv),
                    virtual_env_manager: venv_manager,
                };
                let result = workflow::add_project(&mut store, &mut prompter, args)?;
                output(&result, json_output);
            }

            ProjectCommands::List { category } => {
                let result = commands::project_list(&store, category.as_deref())?;
                output(&result, json_output);
            }

            ProjectCommands::Show { id } => {
                let result = commands::project_show(&store, id)?;
                output(&result, json_output);
            }

            ProjectCommands::Edit {
                id,
                name,
                category,
                language,
                path,
                venv,
                no_venv,
                venv_manager,
            } => {
                let args = ProjectArgs {
                    name,
                    category,
                    language,
                    path,
                    virtual_env: flag_pair(venv, no_venv),
                    virtual_env_manager: venv_manager,
                };
                let result = workflow::edit_project(&mut store, &mut prompter, id, args)?;
                output(&result, json_output);
            }

            ProjectCommands::Rm { id, yes } => {
                let result = workflow::delete_project(&mut store, &mut prompter, id, yes)?;
                output(&result, json_output);
            }

            ProjectCommands::Open { id } => {
                let result = workflow::open_project(&store, &mut prompter, id)?;
                output(&result, json_output);
            }
        },

        Some(Commands::Category { command }) => match command {
            CategoryCommands::Add { name } => {
                let result = workflow::add_category(&mut store, &mut prompter, name)?;
                output(&result, json_output);
            }

            CategoryCommands::List => {
                let result = commands::category_list(&store)?;
                output(&result, json_output);
            }

            CategoryCommands::Edit { id, name } => {
                let result = workflow::edit_category(&mut store, &mut prompter, id, name)?;
                output(&result, json_output);
            }

            CategoryCommands::Rm { id, yes } => {
                let result = workflow::delete_category(&mut store, &mut prompter, id, yes)?;
                output(&result, json_output);
            }
        },

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Get { key } => {
                let result = commands::config_get(&store, &key)?;
                output(&result, json_output);
            }
            ConfigCommands::Set { key, value } => {
                let result = commands::config_set(&mut store, &key, &value)?;
                output(&result, json_output);
            }
            ConfigCommands::List => {
                let result = commands::config_list(&store)?;
                output(&result, json_output);
            }
        },

        Some(Commands::System { command }) => match command {
            SystemCommands::BuildInfo => {
                let result = commands::build_info();
                output(&result, json_output);
            }
        },
    }

    Ok(())
}

/// Collapse the --venv/--no-venv flag pair into an optional bool.
fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, json_output: bool) {
    if json_output {
        println!("{}", result.to_json());
    } else {
        println!("{}", result.to_human());
    }
}

/// Serialize command to extract name and arguments for logging.
fn serialize_command(command: &Option<Commands>) -> (String, serde_json::Value) {
    match command {
        None | Some(Commands::Menu) => ("menu".to_string(), json!({})),

        Some(Commands::Project { command }) => match command {
            ProjectCommands::Add {
                name,
                category,
                language,
                path,
                venv,
                no_venv,
                venv_manager,
            } => (
                "project add".to_string(),
                json!({
                    "name": name,
                    "category": category,
                    "language": language,
                    "path": path,
                    "venv": venv,
                    "no_venv": no_venv,
                    "venv_manager": venv_manager,
                }),
            ),
            ProjectCommands::List { category } => (
                "project list".to_string(),
                json!({ "category": category }),
            ),
            ProjectCommands::Show { id } => ("project show".to_string(), json!({ "id": id })),
            ProjectCommands::Edit {
                id,
                name,
                category,
                language,
                path,
                venv,
                no_venv,
                venv_manager,
            } => (
                "project edit".to_string(),
                json!({
                    "id": id,
                    "name": name,
                    "category": category,
                    "language": language,
                    "path": path,
                    "venv": venv,
                    "no_venv": no_venv,
                    "venv_manager": venv_manager,
                }),
            ),
            ProjectCommands::Rm { id, yes } => (
                "project rm".to_string(),
                json!({ "id": id, "yes": yes }),
            ),
            ProjectCommands::Open { id } => ("project open".to_string(), json!({ "id": id })),
        },

        Some(Commands::Category { command }) => match command {
            CategoryCommands::Add { name } => {
                ("category add".to_string(), json!({ "name": name }))
            }
            CategoryCommands::List => ("category list".to_string(), json!({})),
            CategoryCommands::Edit { id, name } => (
                "category edit".to_string(),
                json!({ "id": id, "name": name }),
            ),
            CategoryCommands::Rm { id, yes } => (
                "category rm".to_string(),
                json!({ "id": id, "yes": yes }),
            ),
        },

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Get { key } => ("config get".to_string(), json!({ "key": key })),
            ConfigCommands::Set { key, value } => (
                "config set".to_string(),
                json!({ "key": key, "value": value }),
            ),
            ConfigCommands::List => ("config list".to_string(), json!({})),
        },

        Some(Commands::System { command }) => match command {
            SystemCommands::BuildInfo => ("system build-info".to_string(), json!({})),
        },
    }
}
