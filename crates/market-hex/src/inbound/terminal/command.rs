use std::num::NonZeroUsize;

use clap::{Parser, Subcommand};

use crate::application::pipeline::{OrderSortKey, StatusFilter};
use crate::application::views::AdField;
use crate::errors::AppError;

/// One input line of the terminal session.
#[derive(Parser, Debug, PartialEq)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Navigate to a path (/advertisements, /advertisements/{id}, /orders)
    Open { path: String },

    /// Fetch the current screen's data again
    Reload,

    /// Filter advertisements by name; no term clears the search
    Search {
        #[arg(default_value = "")]
        term: String,
    },

    /// Change how many cards a page shows
    PerPage { size: NonZeroUsize },

    /// Jump to a page
    Page { number: usize },

    /// Show only orders with a status (code or name), or `all`
    Filter { status: StatusFilter },

    /// Sort orders by `created` or `total`
    Sort { key: OrderSortKey },

    /// Show the items of an order
    Items { order_id: String },

    /// Close the open dialog
    Close,

    /// Open the "new advertisement" dialog
    New,

    /// Open the edit dialog of the shown advertisement
    Edit,

    /// Fill a dialog field (name, description, price, image)
    Set {
        field: AdField,
        #[arg(default_value = "")]
        value: String,
    },

    /// Send the open dialog
    Submit,

    /// Discard the open dialog
    Cancel,

    Help,

    #[command(alias = "exit")]
    Quit,
}

impl Command {
    /// `search` and `set` take the rest of the line verbatim, so spacing in
    /// a term or a value reaches the view unchanged. A value wrapped in
    /// double quotes loses the quotes.
    pub fn parse_line(line: &str) -> Result<Self, AppError> {
        let (keyword, rest) = split_word(line);
        match keyword {
            "search" => {
                return Ok(Command::Search {
                    term: unquote(rest).to_string(),
                })
            }
            "set" => {
                let (field, value) = split_word(rest);
                let field = field.parse::<AdField>().map_err(AppError::BadCommand)?;
                return Ok(Command::Set {
                    field,
                    value: unquote(value).to_string(),
                });
            }
            _ => {}
        }
        CommandLine::try_parse_from(line.split_whitespace())
            .map(|parsed| parsed.command)
            .map_err(|e| AppError::BadCommand(first_line(&e.to_string())))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Open { .. } => "open",
            Command::Reload => "reload",
            Command::Search { .. } => "search",
            Command::PerPage { .. } => "per-page",
            Command::Page { .. } => "page",
            Command::Filter { .. } => "filter",
            Command::Sort { .. } => "sort",
            Command::Items { .. } => "items",
            Command::Close => "close",
            Command::New => "new",
            Command::Edit => "edit",
            Command::Set { .. } => "set",
            Command::Submit => "submit",
            Command::Cancel => "cancel",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

/// First word, and what follows the single space after it.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (text, ""),
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

fn first_line(message: &str) -> String {
    message
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("invalid command")
        .trim_start_matches("error: ")
        .to_string()
}
