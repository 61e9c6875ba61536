//! The terminal version of the query builder form.
//!
//! Same flow as the web form: table, fields, then as many joins and
//! conditions as the user wants, with the compiled SQL reprinted after every
//! answer so you watch the query grow while you type.
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use sqlsketch::cache::{self, Draft};
use sqlsketch::validate::validate;
use sqlsketch::{
    compile, Condition, Connector, Error, InternalError, Join, JoinType, Operator,
    QueryDescription,
};
use std::process::exit;

pub fn run(save: Option<String>) {
    if let Err(error) = build_interactively(save) {
        eprintln!("{intro}: {error}", intro = "error".bold().red());
        exit(1);
    }
}

fn build_interactively(save: Option<String>) -> Result<(), Error> {
    let theme = ColorfulTheme::default();
    let mut description = QueryDescription::default();

    description.table_name = ask_text(&theme, "Table name")?;
    show_preview(&description);

    description.field_name = ask_text(&theme, "Fields to select")?;
    show_preview(&description);

    while Confirm::with_theme(&theme)
        .with_prompt("Add a join?")
        .default(false)
        .interact()?
    {
        description.joins.push(ask_join(&theme)?);
        show_preview(&description);
    }

    while Confirm::with_theme(&theme)
        .with_prompt("Add a condition?")
        .default(false)
        .interact()?
    {
        // the connector lives on the row to the left of the one being added
        if let Some(previous) = description.conditions.last_mut() {
            previous.connector = ask_connector(&theme)?;
        }

        description.conditions.push(ask_condition(&theme)?);
        show_preview(&description);
    }

    for problem in validate(&description) {
        eprintln!("{intro}: {problem}", intro = "warning".bold().yellow());
    }

    if let Some(name) = save {
        if name.is_empty() {
            Err(InternalError("Draft names cannot be empty".to_string()))?;
        }

        let draft = Draft {
            name: name.into(),
            description,
        };

        cache::write(&draft)?;

        println!("Saved draft {}.", draft.name.to_string().bold());
    }

    Ok(())
}

fn ask_condition(theme: &ColorfulTheme) -> Result<Condition, Error> {
    let field = ask_text(theme, "Field")?;

    let operators = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::LesserThan,
        Operator::LesserOrEqual,
        Operator::GreaterThan,
        Operator::GreaterOrEqual,
        Operator::Between,
    ];

    let selected = Select::with_theme(theme)
        .with_prompt("Operator")
        .items(&operators)
        .default(0)
        .interact()?;
    let operator = operators[selected];

    let value = ask_text(theme, "Value")?;

    let value2 = if operator == Operator::Between {
        ask_text(theme, "And value")?
    } else {
        String::new()
    };

    Ok(Condition {
        field,
        operator,
        value,
        value2,
        connector: Connector::default(),
    })
}

fn ask_connector(theme: &ColorfulTheme) -> Result<Connector, Error> {
    let connectors = [Connector::And, Connector::Or];

    let selected = Select::with_theme(theme)
        .with_prompt("Connector")
        .items(&connectors)
        .default(0)
        .interact()?;

    Ok(connectors[selected])
}

fn ask_join(theme: &ColorfulTheme) -> Result<Join, Error> {
    let join_types = [
        JoinType::Inner,
        JoinType::Left,
        JoinType::Right,
        JoinType::Full,
    ];

    let selected = Select::with_theme(theme)
        .with_prompt("Join type")
        .items(&join_types)
        .default(0)
        .interact()?;

    Ok(Join {
        join_type: Some(join_types[selected]),
        join_table_name: ask_text(theme, "Join table name")?,
        on_field: ask_text(theme, "On field (main table)")?,
        equals_to: ask_text(theme, "Equals to (join table)")?,
    })
}

fn ask_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, Error> {
    let answer = Input::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    Ok(answer)
}

fn show_preview(description: &QueryDescription) {
    println!(
        "{intro} {sql}",
        intro = "Your SQL query:".bold(),
        sql = compile(description).green()
    );
}
