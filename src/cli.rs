use std::path::PathBuf;

use assetline::TaskKind;
use clap::{Parser, Subcommand, ValueEnum};

/// assetline - front-end asset pipeline
#[derive(Parser, Debug)]
#[command(name = "assetline")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'assetline' without a command to build the project.")]
pub struct Cli {
    /// Project root (contains assetline.toml)
    #[arg(short, long, default_value = ".", global = true)]
    pub project: PathBuf,

    /// Configuration file (defaults to <project>/assetline.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit NDJSON events on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean the output directory, run every task, rewrite the HTML
    Build,

    /// Re-run tasks when their inputs change
    Watch {
        /// Run a full build before watching
        #[arg(long)]
        initial: bool,
    },

    /// Remove the output directory
    Clean,

    /// Run a single step without cleaning
    Run {
        #[arg(value_enum)]
        step: Step,
    },
}

/// A step runnable on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Step {
    Styles,
    Scripts,
    Html,
    Assets,
    Dependencies,
    Rewrite,
}

impl Step {
    /// The transform task, or `None` for the rewrite step
    pub fn task(self) -> Option<TaskKind> {
        match self {
            Step::Styles => Some(TaskKind::Styles),
            Step::Scripts => Some(TaskKind::Scripts),
            Step::Html => Some(TaskKind::Html),
            Step::Assets => Some(TaskKind::Assets),
            Step::Dependencies => Some(TaskKind::Dependencies),
            Step::Rewrite => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}
