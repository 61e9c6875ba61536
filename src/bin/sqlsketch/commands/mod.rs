use crate::args::DescriptionSource;
use colored::Colorize;
use sqlsketch::cache::{self, Draft, DraftName};
use sqlsketch::validate::validate;
use sqlsketch::{compile, Error, QueryDescription};
use std::fs;
use std::process::exit;

pub mod form;
pub mod serve;

pub fn translate_one(source: DescriptionSource) {
    let description = load_description(&source).unwrap_or_else(|error| fail(error));

    // problems don't stop the preview, just like in the form
    for problem in validate(&description) {
        eprintln!("{intro}: {problem}", intro = "warning".bold().yellow());
    }

    println!("{}", compile(&description));
}

pub fn check_one(source: DescriptionSource) {
    let description = load_description(&source).unwrap_or_else(|error| fail(error));

    let problems = validate(&description);

    if problems.is_empty() {
        println!("{}", "No problems found.".green());
        return;
    }

    for problem in &problems {
        println!("{path}: {message}", path = problem.path.bold(), message = problem.message);
    }

    exit(1);
}

pub fn list_drafts() -> Result<(), Error> {
    let drafts: Vec<Draft> = cache::read_all()?;

    if drafts.is_empty() {
        println!("No saved drafts. Try \x1b[1msqlsketch form --save <name>\x1b[0m.");
        return Ok(());
    }

    println!("Saved drafts:");
    for draft in &drafts {
        println!(
            "   {name}: {sql}",
            name = draft.name.to_string().bold(),
            sql = compile(&draft.description)
        );
    }

    Ok(())
}

fn load_description(source: &DescriptionSource) -> Result<QueryDescription, Error> {
    if let Some(name) = &source.draft {
        let draft: Draft = cache::read(&DraftName::from(name.as_str()))?;

        return Ok(draft.description);
    }

    let description = match &source.file {
        Some(path) => serde_json::from_reader(fs::File::open(path)?)?,
        None => serde_json::from_reader(std::io::stdin().lock())?,
    };

    Ok(description)
}

fn fail(error: Error) -> ! {
    eprintln!("{intro}: {error}", intro = "error".bold().red());
    exit(1);
}
