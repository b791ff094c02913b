//! Command dispatch: each subcommand loads what it needs and reports through `output`

use std::fs;
use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{IoResultExt, Session};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None | Some(Commands::Run) => cmd_run(cli),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
    }
}

#[instrument(level = "debug", skip(cli))]
fn cmd_run(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "loaded settings");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(settings, stdin.lock(), stdout.lock());
    session.run()?;
    Ok(())
}

#[instrument(level = "debug", skip(cli))]
fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let status = if path.exists() { "exists" } else { "not found" };
                    output::action("global", &format!("{} ({})", path.display(), status));
                }
                None => output::warning("cannot determine global config directory"),
            }
            if let Some(path) = &cli.config {
                let status = if path.exists() { "exists" } else { "not found" };
                output::action("explicit", &format!("{} ({})", path.display(), status));
            }
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("cannot determine global config directory".into())
            })?;
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).with_path_context("create config dir", dir)?;
            }
            fs::write(&path, Settings::template()).with_path_context("write config", &path)?;
            output::success(&format!("Created {}", path.display()));
            Ok(())
        }
    }
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
