//! Command dispatch and handlers

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::interaction::parse_script;
use crate::application::services::{Outcome, SessionService};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::handler::PrintingMoveHandler;
use crate::cli::output;
use crate::cli::render::{RenderStyle, ToTermTree};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::NodeView;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Execute the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `orgtree --help`".into(),
        ));
    };

    if let Commands::Completion { shell } = command {
        return cmd_completion(*shell);
    }

    let cwd = std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
    let settings = Settings::load(Some(&cwd))?;
    if !settings.display.color {
        colored::control::set_override(false);
    }
    let container = ServiceContainer::new(settings, Arc::new(PrintingMoveHandler));

    match command {
        Commands::Tree {
            snapshot,
            expand_all,
            collapse_all,
            json,
        } => cmd_tree(
            &container,
            snapshot.as_deref(),
            *expand_all,
            *collapse_all,
            *json,
        ),
        Commands::Toggle { snapshot, nodes } => cmd_toggle(&container, snapshot.as_deref(), nodes),
        Commands::Move {
            snapshot,
            account,
            target,
        } => cmd_move(&container, snapshot.as_deref(), account, target),
        Commands::Session { snapshot, script } => {
            cmd_session(&container, snapshot.as_deref(), script.as_deref())
        }
        Commands::Config { command } => cmd_config(&container, &cwd, command),
        Commands::Completion { .. } => Ok(()),
    }
}

/// Snapshot given on the command line, else the configured one.
fn resolve_snapshot(container: &ServiceContainer, arg: Option<&Path>) -> CliResult<PathBuf> {
    arg.map(Path::to_path_buf)
        .or_else(|| container.settings.snapshot.clone())
        .ok_or_else(|| {
            CliError::Usage(
                "no snapshot given and none configured (set `snapshot` or ORGTREE_SNAPSHOT)".into(),
            )
        })
}

fn open_session(container: &ServiceContainer, arg: Option<&Path>) -> CliResult<SessionService> {
    let path = resolve_snapshot(container, arg)?;
    debug!(snapshot = %path.display(), "opening session");
    Ok(container.open_session(&path)?)
}

fn print_view(container: &ServiceContainer, session: &SessionService, view: &NodeView) {
    let style = RenderStyle::new(&container.settings.display).with_mediator(session.mediator());
    output::info(&view.to_term_tree(&style));
}

#[instrument(skip(container))]
fn cmd_tree(
    container: &ServiceContainer,
    snapshot: Option<&Path>,
    expand_all: bool,
    collapse_all: bool,
    json: bool,
) -> CliResult<()> {
    let mut session = open_session(container, snapshot)?;
    if expand_all {
        session.expand_all()?;
    } else if collapse_all {
        session.collapse_all()?;
    }

    let view = session.render()?;
    if json {
        let text =
            serde_json::to_string_pretty(&view).map_err(|e| ApplicationError::OperationFailed {
                context: "serialize render descriptor".into(),
                source: Box::new(e),
            })?;
        output::info(&text);
    } else {
        print_view(container, &session, &view);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_toggle(
    container: &ServiceContainer,
    snapshot: Option<&Path>,
    nodes: &[String],
) -> CliResult<()> {
    let mut session = open_session(container, snapshot)?;
    for name in nodes {
        let collapsed = session.toggle(name)?;
        output::toggled(name, collapsed);
    }
    let view = session.render()?;
    print_view(container, &session, &view);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_move(
    container: &ServiceContainer,
    snapshot: Option<&Path>,
    account: &str,
    target: &str,
) -> CliResult<()> {
    let mut session = open_session(container, snapshot)?;
    if session.move_account(account, target)?.is_none() {
        output::warning(&format!("no organization named {target}, nothing moved"));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_session(
    container: &ServiceContainer,
    snapshot: Option<&Path>,
    script: Option<&Path>,
) -> CliResult<()> {
    let interactions = match script {
        Some(path) => container.load_script(path)?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| InfraError::io("read script from stdin", e))?;
            parse_script(&buf)?
        }
    };

    let mut session = open_session(container, snapshot)?;
    for (line, interaction) in &interactions {
        debug!(line, %interaction, "replaying");
        match session
            .apply(interaction)
            .map_err(|e| e.at_line(*line))?
        {
            Outcome::Toggled {
                trading_name,
                collapsed,
            } => output::toggled(&trading_name, collapsed),
            Outcome::DragStarted { account_name } => output::action("drag", &account_name),
            Outcome::Hovering { target: Some(name) } => output::action("hover", &name),
            Outcome::Hovering { target: None } => output::detail(&"hovering outside any target"),
            Outcome::Left => output::detail(&"left target"),
            // the move handler already reported the request
            Outcome::Moved(_) => {}
            Outcome::DroppedOutside => output::warning(&"dropped outside a target, nothing moved"),
            Outcome::Canceled => output::detail(&"drag canceled"),
            Outcome::AllExpanded => output::action("expand", &"all organizations"),
            Outcome::AllCollapsed => output::action("collapse", &"all organizations"),
            Outcome::Rendered(view) => print_view(container, &session, &view),
        }
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, cwd: &Path, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
        ConfigCommands::Path => {
            output::header(&"Config locations");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail(&"global: <no home directory>"),
            }
            output::detail(&format!("local:  {}", local_config_path(cwd).display()));
        }
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
