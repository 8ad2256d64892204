//! Command-line argument definitions for the Flowpath CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global arguments select the configuration file and the
//! logging verbosity; each [`Command`] maps to one library operation.

use std::{fmt, path::PathBuf, str::FromStr};

use clap::{Parser, Subcommand, ValueEnum};

use flowpath::navigation::TransformMode;

/// Command-line arguments for the Flowpath tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the activity after the one owning ACTIVITY_FILE
    Next {
        /// A file inside the current activity's folder
        activity_file: PathBuf,

        /// Exit matching rule; inferred from the activity kind when omitted
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Exit to leave through (business-rule and segmentation-tree modes)
        #[arg(short, long)]
        exit: Option<String>,
    },

    /// Print the activity before the one owning ACTIVITY_FILE
    Previous {
        /// A file inside the current activity's folder
        activity_file: PathBuf,
    },

    /// Run navigation steps in one session, starting at ACTIVITY_FILE
    Walk {
        /// A file inside the first activity's folder
        activity_file: PathBuf,

        /// Steps: `next`, `next:EXIT` or `prev`
        #[arg(required = true)]
        steps: Vec<WalkStep>,
    },

    /// Print the entry activity of a project
    Start {
        /// Folder holding the layout document
        project_dir: PathBuf,
    },

    /// Print the XPath of the node at a byte offset in an XML file
    Xpath {
        xml_file: PathBuf,

        /// Byte offset into the decoded text
        #[arg(short, long)]
        offset: usize,
    },

    /// Print the detected charset of a file
    Encoding { file: PathBuf },

    /// Print the activity kind of a definition file
    Kind { file: PathBuf },
}

/// Navigation modes selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Xslt,
    SetValue,
    BusinessRule,
    SegmentationTree,
}

impl From<ModeArg> for TransformMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Xslt => TransformMode::Xslt,
            ModeArg::SetValue => TransformMode::SetValue,
            ModeArg::BusinessRule => TransformMode::BusinessRule,
            ModeArg::SegmentationTree => TransformMode::SegmentationTree,
        }
    }
}

/// One step of `walk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkStep {
    Next(Option<String>),
    Previous,
}

impl FromStr for WalkStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(WalkStep::Next(None)),
            "prev" | "previous" => Ok(WalkStep::Previous),
            _ => match s.strip_prefix("next:") {
                Some(exit) if !exit.is_empty() => Ok(WalkStep::Next(Some(exit.to_string()))),
                _ => Err(format!(
                    "invalid step `{s}`, expected `next`, `next:EXIT` or `prev`"
                )),
            },
        }
    }
}

impl fmt::Display for WalkStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkStep::Next(None) => write!(f, "next"),
            WalkStep::Next(Some(exit)) => write!(f, "next:{exit}"),
            WalkStep::Previous => write!(f, "prev"),
        }
    }
}
