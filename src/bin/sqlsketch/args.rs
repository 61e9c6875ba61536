use crate::commands::serve::DEFAULT_PORT;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compiles a query description to SQL.
    ///
    /// The description is camelCase JSON, the same shape the web form posts.
    /// Missing fields degrade the output instead of failing; problems go to
    /// stderr so the SQL on stdout stays pipeable.
    Translate {
        #[command(flatten)]
        source: DescriptionSource,
    },
    /// Checks a description for missing fields without printing any SQL.
    Check {
        #[command(flatten)]
        source: DescriptionSource,
    },
    /// Assembles a query interactively, showing the SQL as it grows.
    Form {
        /// Save the finished description as a named draft.
        #[arg(long)]
        save: Option<String>,
    },
    /// Lists saved drafts together with the SQL they compile to.
    Drafts,
    /// Runs the local server the web form talks to.
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

#[derive(clap::Args, Debug)]
#[group(multiple = false)]
pub struct DescriptionSource {
    /// Read the description from this file instead of stdin.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Read the description from a saved draft.
    #[arg(long)]
    pub draft: Option<String>,
}
