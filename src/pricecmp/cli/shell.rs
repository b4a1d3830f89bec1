//! The interactive session.
//!
//! One command per input line, parsed with the [`ShellLine`] multicall parser.
//! The session fetches once on start, then only when the user asks with
//! `search`. Every other command works on the records already loaded.

use super::render::{render_loading, render_messages, render_options, render_table, TableView};
use super::setup::{shell_help, ShellCommand, ShellLine};
use clap::Parser;
use pricecmp::commands::{CmdMessage, CmdResult};
use pricecmp::engine::ViewEngine;
use pricecmp::error::Result;
use pricecmp::model::{FilterDimension, PriceRecord};
use pricecmp::source::RecordSource;
use std::io::{BufRead, Write};
use tracing::debug;

pub const PROMPT: &str = "pricecmp> ";

pub struct ShellOptions {
    pub use_color: bool,
    /// Print a prompt before each line (only useful on a terminal)
    pub prompt: bool,
}

pub fn run_shell<S, R, W>(
    engine: &mut ViewEngine<S>,
    input: R,
    out: &mut W,
    options: &ShellOptions,
) -> Result<()>
where
    S: RecordSource,
    R: BufRead,
    W: Write,
{
    let use_color = options.use_color;

    write!(out, "{}", render_loading(use_color))?;
    let result = engine.refresh();
    write_result(engine, &result, out, use_color)?;
    write_prompt(out, options)?;

    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            write_prompt(out, options)?;
            continue;
        }

        let command = match ShellLine::try_parse_from(words.iter().copied()) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                let rendered = e.to_string();
                let first = rendered.lines().next().unwrap_or_default();
                let message = CmdMessage::error(format!("{} (type 'help' for commands)", first));
                write!(out, "{}", render_messages(&[message], use_color))?;
                write_prompt(out, options)?;
                continue;
            }
        };
        debug!(?command, "shell command");

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Search { term } => {
                if !term.is_empty() {
                    engine.set_search_term(term.join(" "));
                }
                write!(out, "{}", render_loading(use_color))?;
                let result = engine.refresh();
                write_result(engine, &result, out, use_color)?;
            }
            ShellCommand::Term { term } => {
                let result = engine.set_search_term(term.join(" "));
                write_result(engine, &result, out, use_color)?;
            }
            ShellCommand::Store { value } => {
                filter(engine, FilterDimension::Store, &value, out, use_color)?
            }
            ShellCommand::Brand { value } => {
                filter(engine, FilterDimension::Brand, &value, out, use_color)?
            }
            ShellCommand::Size { value } => {
                filter(engine, FilterDimension::Size, &value, out, use_color)?
            }
            ShellCommand::Sort { key } => match engine.toggle_sort_by_name(&key) {
                Ok(result) => write_result(engine, &result, out, use_color)?,
                Err(e) => {
                    let message = CmdMessage::error(e.to_string());
                    write!(out, "{}", render_messages(&[message], use_color))?;
                }
            },
            ShellCommand::Clear => {
                if engine.is_filter_active() {
                    let result = engine.clear();
                    write_result(engine, &result, out, use_color)?;
                } else {
                    let message = CmdMessage::info("Nothing to clear");
                    write!(out, "{}", render_messages(&[message], use_color))?;
                }
            }
            ShellCommand::Options => {
                write!(out, "{}", render_options(&engine.options(), use_color))?;
            }
            ShellCommand::Show => {
                write!(out, "{}", table(engine, &engine.view(), use_color))?;
            }
            ShellCommand::Help => {
                write!(out, "{}", shell_help())?;
            }
        }
        write_prompt(out, options)?;
    }

    out.flush()?;
    Ok(())
}

fn filter<S: RecordSource, W: Write>(
    engine: &mut ViewEngine<S>,
    dimension: FilterDimension,
    value: &[String],
    out: &mut W,
    use_color: bool,
) -> Result<()> {
    let value = value.join(" ");
    let known = engine.options();
    let mut result = engine.set_filter(dimension, &value);

    if !value.is_empty() && !known.for_dimension(dimension).contains(&value) {
        result.add_message(CmdMessage::warning(format!(
            "No {} named '{}' in the loaded prices (see 'options')",
            dimension, value
        )));
    }
    write_result(engine, &result, out, use_color)
}

fn write_result<S: RecordSource, W: Write>(
    engine: &ViewEngine<S>,
    result: &CmdResult,
    out: &mut W,
    use_color: bool,
) -> Result<()> {
    write!(out, "{}", render_messages(&result.messages, use_color))?;
    write!(out, "{}", table(engine, &result.records, use_color))?;
    Ok(())
}

fn table<S: RecordSource>(engine: &ViewEngine<S>, records: &[PriceRecord], use_color: bool) -> String {
    render_table(
        &TableView {
            records,
            sort: engine.sort(),
            filters: engine.filters(),
            search_term: engine.search_term(),
            fetched_at: engine.fetched_at(),
            interactive: true,
        },
        use_color,
    )
}

fn write_prompt<W: Write>(out: &mut W, options: &ShellOptions) -> Result<()> {
    if options.prompt {
        write!(out, "{}", PROMPT)?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricecmp::source::memory::InMemorySource;
    use std::io::Cursor;

    fn milk() -> Vec<PriceRecord> {
        vec![
            PriceRecord::new(1, "Pura Milk 2L", "Pura", "Coles", 4.5, "2L"),
            PriceRecord::new(2, "Dairy Farmers Milk 1L", "Dairy Farmers", "Aldi", 2.2, "1L"),
        ]
    }

    fn run(source: InMemorySource, script: &str) -> (ViewEngine<InMemorySource>, String) {
        let mut engine = ViewEngine::new(source);
        let mut out = Vec::new();
        let options = ShellOptions {
            use_color: false,
            prompt: false,
        };
        run_shell(&mut engine, Cursor::new(script.to_string()), &mut out, &options).unwrap();
        (engine, String::from_utf8(out).unwrap())
    }

    fn milk_source() -> InMemorySource {
        InMemorySource::new()
            .with_response("milk", milk())
            .with_response("dairy farmers", milk()[1..].to_vec())
    }

    #[test]
    fn initial_fetch_renders_the_table() {
        let (engine, out) = run(milk_source(), "");
        assert!(out.starts_with("Loading prices…\n"));
        assert!(out.contains("Loaded 2 prices for 'milk'"));
        assert!(out.contains("Showing 2 results"));
        assert_eq!(engine.source().calls(), vec!["milk"]);
    }

    #[test]
    fn filters_apply_without_refetching() {
        let (engine, out) = run(milk_source(), "store Coles\nquit\nstore Aldi\n");
        assert_eq!(engine.filters().store, "Coles");
        assert!(out.contains("Showing 1 results"));
        assert_eq!(engine.source().calls().len(), 1);
    }

    #[test]
    fn search_with_words_refetches() {
        let (engine, out) = run(milk_source(), "search Dairy Farmers\n");
        assert_eq!(engine.search_term(), "Dairy Farmers");
        assert_eq!(engine.source().calls(), vec!["milk", "Dairy Farmers"]);
        // The stub only knows the lowercase term, so nothing comes back
        assert!(out.contains("No products found matching your filters."));
    }

    #[test]
    fn term_changes_search_locally() {
        let (engine, out) = run(milk_source(), "term pura\n");
        assert_eq!(engine.search_term(), "pura");
        assert!(out.contains("Showing 1 results"));
        assert_eq!(engine.source().calls().len(), 1);
    }

    #[test]
    fn unknown_filter_value_warns() {
        let (_, out) = run(milk_source(), "brand Pauls\n");
        assert!(out.contains("No brand named 'Pauls' in the loaded prices"));
        assert!(out.contains("No products found matching your filters."));
    }

    #[test]
    fn sort_toggles_and_rejects_unknown_keys() {
        let (engine, out) = run(milk_source(), "sort price\nsort weight\n");
        assert_eq!(engine.sort().key.as_str(), "price");
        assert!(out.contains("Price ↓"));
        assert!(out.contains("Unknown sort column: weight"));
    }

    #[test]
    fn clear_resets_and_reports_when_idle() {
        let (engine, out) = run(milk_source(), "store Coles\nclear\nclear\n");
        assert!(engine.filters().is_empty());
        assert_eq!(engine.search_term(), "");
        assert!(out.contains("Nothing to clear"));
    }

    #[test]
    fn bad_command_keeps_the_session_alive() {
        let (_, out) = run(milk_source(), "frobnicate\nshow\n");
        assert!(out.contains("type 'help' for commands"));
        assert_eq!(out.matches("Showing 2 results").count(), 2);
    }

    #[test]
    fn failed_fetch_warns_and_continues() {
        let (engine, out) = run(InMemorySource::failing("connection refused"), "options\n");
        assert!(out.contains("Could not load prices for 'milk'"));
        assert!(out.contains("connection refused"));
        assert!(out.contains("Stores\n  (none)\n"));
        assert!(engine.last_error().is_some());
    }
}
