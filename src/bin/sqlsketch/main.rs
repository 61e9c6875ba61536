mod args;
mod commands;

use args::{Args, Command};
use clap::Parser;

fn main() {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Command::Translate { source } => commands::translate_one(source),
        Command::Check { source } => commands::check_one(source),
        Command::Form { save } => commands::form::run(save),
        Command::Drafts => commands::list_drafts().unwrap(),
        Command::Serve { port } => commands::serve::run(port),
    }
}
