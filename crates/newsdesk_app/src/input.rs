use std::time::Instant;

use newsdesk_core::{Category, CountryCode, Msg};

pub const HELP: &str = "\
Type to search. Commands:
  :cat <category>     business, entertainment, general, health, science, sports, technology
  :country <code>     two-letter country code, e.g. us, gb
  :help               show this help
  :quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Quit,
    Invalid(String),
}

/// Maps one line of terminal input to a command. Plain text is search input.
pub fn parse_line(line: &str, now: Instant) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return Command::Dispatch(Msg::SearchInput {
            term: line.to_string(),
            at: now,
        });
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let argument = parts.next();
    match (name, argument) {
        ("q" | "quit", _) => Command::Quit,
        ("h" | "help", _) => Command::Help,
        ("cat" | "category", Some(raw)) => match raw.parse::<Category>() {
            Ok(category) => Command::Dispatch(Msg::CategoryChanged(category)),
            Err(err) => Command::Invalid(err.to_string()),
        },
        ("country", Some(raw)) => match raw.parse::<CountryCode>() {
            Ok(country) => Command::Dispatch(Msg::CountryChanged(country)),
            Err(err) => Command::Invalid(err.to_string()),
        },
        ("cat" | "category" | "country", None) => {
            Command::Invalid(format!(":{name} needs an argument"))
        }
        _ => Command::Invalid(format!("unknown command :{name}")),
    }
}
