//! Flowpath CLI library
//!
//! This module contains the command dispatch of the `flowpath` tool. Each
//! subcommand calls one library operation and prints its result as plain
//! text lines.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, ModeArg, WalkStep};

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};

use flowpath::{
    FlowpathError, Navigator, SessionId, encoding, navigation::TransformMode, xpath,
};

/// Printed when a navigation step resolves no activity.
const NONE: &str = "(none)";

/// Run the Flowpath CLI application, printing to standard output.
///
/// # Errors
///
/// Returns `FlowpathError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Layout parsing errors
/// - Activity paths outside a project folder
/// - Navigation from activities without a navigation rule
pub fn run(args: &Args) -> Result<(), FlowpathError> {
    let stdout = io::stdout();
    execute(args, &mut stdout.lock())
}

/// Run the Flowpath CLI application, printing to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn execute(args: &Args, out: &mut impl Write) -> Result<(), FlowpathError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let mut navigator = Navigator::new(app_config);
    let session = SessionId::new("cli");

    match &args.command {
        Command::Next {
            activity_file,
            mode,
            exit,
        } => {
            let mode = match mode {
                Some(mode) => TransformMode::from(*mode),
                None => infer_mode(&navigator, activity_file)?,
            };
            let next = navigator.next(&session, activity_file, mode, exit.as_deref())?;
            writeln!(out, "{}", next.as_deref().unwrap_or(NONE))?;
        }
        Command::Previous { activity_file } => {
            let previous = navigator.previous(&session, activity_file)?;
            writeln!(out, "{}", previous.as_deref().unwrap_or(NONE))?;
        }
        Command::Walk {
            activity_file,
            steps,
        } => walk(&mut navigator, &session, activity_file, steps, out)?,
        Command::Start { project_dir } => {
            let first = navigator.first_activity(project_dir)?;
            writeln!(out, "{}", first.as_deref().unwrap_or(NONE))?;
        }
        Command::Xpath { xml_file, offset } => {
            let decoded = encoding::read_file(xml_file)?;
            let meta = xpath::build_xpath(decoded.text(), *offset);

            writeln!(out, "{}", meta.xpath())?;
            for segment in meta.segments() {
                write!(out, "  {}{}", segment.name(), segment.predicate())?;
                for (name, value) in segment.attributes() {
                    write!(out, " @{name}='{value}'")?;
                }
                writeln!(out)?;
            }
        }
        Command::Encoding { file } => {
            let detected = encoding::detect(&fs::read(file)?);
            writeln!(out, "{}", detected.name())?;
        }
        Command::Kind { file } => {
            writeln!(out, "{}", navigator.classify(file)?)?;
        }
    }

    Ok(())
}

fn infer_mode(navigator: &Navigator, activity_file: &Path) -> Result<TransformMode, FlowpathError> {
    let kind = navigator.classify(activity_file)?;
    let mode = TransformMode::for_activity(kind);
    debug!(kind:%, mode:%; "Mode inferred from activity kind");
    Ok(mode)
}

/// Run `steps` from `activity_file`, moving to each resolved activity.
fn walk(
    navigator: &mut Navigator,
    session: &SessionId,
    activity_file: &Path,
    steps: &[WalkStep],
    out: &mut impl Write,
) -> Result<(), FlowpathError> {
    let mut current: PathBuf = activity_file.to_path_buf();

    for step in steps {
        let resolved = match step {
            WalkStep::Next(exit) => {
                let mode = infer_mode(navigator, &current)?;
                navigator.next(session, &current, mode, exit.as_deref())?
            }
            WalkStep::Previous => navigator.previous(session, &current)?,
        };

        let Some(activity) = resolved else {
            writeln!(out, "{step} -> {NONE}")?;
            info!(step:%; "Walk stopped");
            return Ok(());
        };

        writeln!(out, "{step} -> {activity}")?;
        current = navigator.definition_file(&current, &activity)?;
    }

    Ok(())
}
