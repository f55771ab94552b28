use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

pub mod catalog;
mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod resolve;
pub mod selection;
pub mod session;
pub mod store;
pub(crate) mod tui;

/// Preview web fonts in the terminal and remember the choice.
#[derive(Parser)]
#[command(name = "fontpeek", version, about, long_about = None, disable_help_subcommand = true)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Directory for settings.json (and an optional catalog.toml).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Extra font catalog in TOML.
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Don't read or write saved settings.
    #[arg(long, global = true)]
    ephemeral: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive preview.
    Preview,

    /// List font families and their variants.
    Families,

    /// Show which variant a family would use for a weight and style.
    Resolve {
        /// Font family (case-insensitive).
        family: String,

        /// Requested weight, e.g. 600.
        weight: String,

        /// Request the italic style.
        #[arg(long)]
        italic: bool,
    },

    /// Print the saved selection.
    Show {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Change the selection and save it.
    Set {
        /// Font family (case-insensitive).
        #[arg(long)]
        family: Option<String>,

        /// Font weight, e.g. 700.
        #[arg(long)]
        weight: Option<String>,

        /// Turn italic on.
        #[arg(long, conflicts_with = "upright")]
        italic: bool,

        /// Turn italic off.
        #[arg(long)]
        upright: bool,

        /// Sample text.
        #[arg(long)]
        text: Option<String>,
    },

    /// Restore the default selection and save it.
    Reset,

    /// Print the stylesheet link and CSS for the saved selection.
    Css,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,

        /// Automatically install completions into your shell config.
        #[arg(long)]
        install: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = config::Options {
        data_dir: cli.global.data_dir,
        catalog: cli.global.catalog,
        ephemeral: cli.global.ephemeral,
    };

    match cli.command {
        None => commands::help::run(),
        Some(Command::Preview) => commands::preview::run(&options),
        Some(Command::Families) => commands::families::run(&options),
        Some(Command::Resolve {
            family,
            weight,
            italic,
        }) => commands::resolve::run(&options, &family, &weight, italic),
        Some(Command::Show { json }) => commands::show::run(&options, json),
        Some(Command::Set {
            family,
            weight,
            italic,
            upright,
            text,
        }) => {
            let italic = match (italic, upright) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::set::run(&options, family, weight, italic, text);
        }
        Some(Command::Reset) => commands::set::reset(&options),
        Some(Command::Css) => commands::css::run(&options),
        Some(Command::Completions { shell, install }) => {
            commands::completions::run(shell, install);
        }
    }
}
