//! # Rendering Module
//!
//! Turns derived views, option lists and command messages into terminal text.
//!
//! Layout calculations (column widths, truncation, alignment) stay in Rust because
//! they need Unicode-aware processing. Templates handle presentation:
//! - Style selection (row color by store, the active sort header)
//! - The placeholder row when nothing matches
//! - The footer with result count and active filters

use super::styles::{names, row_style, PRICE_THEME};
use super::templates::{MESSAGES_TEMPLATE, OPTIONS_TEMPLATE, TABLE_TEMPLATE};
use super::theme::Renderer;
use chrono::{DateTime, Utc};
use pricecmp::commands::filter::is_active;
use pricecmp::commands::{CmdMessage, MessageLevel};
use pricecmp::model::{
    FilterDimension, FilterOptions, FilterState, PriceRecord, SortConfig, SortDirection, SortKey,
};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const NAME_WIDTH: usize = 40;
pub const COLUMN_GAP: &str = "  ";
pub const EMPTY_MESSAGE: &str = "No products found matching your filters.";
pub const CLEAR_HINT: &str = "type 'clear' to reset";
pub const LOADING_MESSAGE: &str = "Loading prices…";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Table columns in display order.
const COLUMNS: [(SortKey, &str, Align); 6] = [
    (SortKey::Name, "Name", Align::Left),
    (SortKey::Brand, "Brand", Align::Left),
    (SortKey::Store, "Store", Align::Left),
    (SortKey::Price, "Price", Align::Right),
    (SortKey::UnitPrice, "Per Unit", Align::Right),
    (SortKey::Size, "Size", Align::Right),
];

/// Everything the table needs besides the records themselves.
pub struct TableView<'a> {
    pub records: &'a [PriceRecord],
    pub sort: SortConfig,
    pub filters: &'a FilterState,
    pub search_term: &'a str,
    pub fetched_at: Option<DateTime<Utc>>,
    /// Whether to suggest the shell's `clear` command in the footer.
    pub interactive: bool,
}

#[derive(Serialize)]
struct HeaderCell {
    text: String,
    style: &'static str,
}

#[derive(Serialize)]
struct RowData {
    cells: Vec<String>,
    style: &'static str,
}

#[derive(Serialize)]
struct TableData {
    header: Vec<HeaderCell>,
    rows: Vec<RowData>,
    rule: String,
    gap: &'static str,
    empty: bool,
    empty_message: &'static str,
    summary: String,
    filters: String,
    clear_hint: &'static str,
}

#[derive(Serialize)]
struct OptionGroup {
    title: &'static str,
    values: Vec<String>,
}

#[derive(Serialize)]
struct OptionsData {
    groups: Vec<OptionGroup>,
    none_label: &'static str,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

fn renderer(name: &'static str, source: &'static str, use_color: bool) -> Renderer {
    let mut renderer = Renderer::new(PRICE_THEME.clone(), use_color);
    if let Err(e) = renderer.add_template(name, source) {
        tracing::error!(template = name, error = %e, "template failed to compile");
    }
    renderer
}

pub fn render_table(view: &TableView<'_>, use_color: bool) -> String {
    let header_texts: Vec<String> = COLUMNS
        .iter()
        .map(|(key, label, _)| format!("{} {}", label, sort_indicator(view.sort, *key)))
        .collect();

    let body: Vec<(Vec<String>, &'static str)> = view
        .records
        .iter()
        .map(|r| (row_cells(r), row_style(&r.store)))
        .collect();

    let mut widths: Vec<usize> = header_texts.iter().map(|h| h.width()).collect();
    for (cells, _) in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width());
        }
    }

    let header = COLUMNS
        .iter()
        .zip(&header_texts)
        .zip(&widths)
        .map(|(((key, _, align), text), width)| HeaderCell {
            text: pad(text, *width, *align),
            style: if *key == view.sort.key {
                names::HEADER_ACTIVE
            } else {
                names::HEADER
            },
        })
        .collect();

    let rows = body
        .into_iter()
        .map(|(cells, style)| RowData {
            cells: cells
                .iter()
                .zip(COLUMNS.iter().zip(&widths))
                .map(|(cell, ((_, _, align), width))| pad(cell, *width, *align))
                .collect(),
            style,
        })
        .collect();

    let total_width = widths.iter().sum::<usize>() + COLUMN_GAP.width() * (widths.len() - 1);

    let data = TableData {
        header,
        rows,
        rule: "─".repeat(total_width),
        gap: COLUMN_GAP,
        empty: view.records.is_empty(),
        empty_message: EMPTY_MESSAGE,
        summary: summary(view.records.len(), view.fetched_at),
        filters: if is_active(view.filters, view.search_term) {
            describe_filters(view.filters, view.search_term)
        } else {
            String::new()
        },
        clear_hint: if view.interactive { CLEAR_HINT } else { "" },
    };

    renderer("table", TABLE_TEMPLATE, use_color)
        .render("table", &data)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_options(options: &FilterOptions, use_color: bool) -> String {
    let groups = FilterDimension::all()
        .iter()
        .map(|&dimension| OptionGroup {
            title: match dimension {
                FilterDimension::Store => "Stores",
                FilterDimension::Brand => "Brands",
                FilterDimension::Size => "Sizes",
            },
            values: options.for_dimension(dimension).to_vec(),
        })
        .collect();

    let data = OptionsData {
        groups,
        none_label: "(none)",
    };

    renderer("options", OPTIONS_TEMPLATE, use_color)
        .render("options", &data)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Renders command messages using the template system with themed styles.
pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };

    renderer("messages", MESSAGES_TEMPLATE, use_color)
        .render("messages", &data)
        .unwrap_or_else(|_| {
            messages
                .iter()
                .map(|m| format!("{}\n", m.content))
                .collect()
        })
}

/// The dim line shown while a fetch is in flight.
pub fn render_loading(use_color: bool) -> String {
    format!("{}\n", PRICE_THEME.apply(names::MUTED, LOADING_MESSAGE, use_color))
}

pub fn print_messages(messages: &[CmdMessage], use_color: bool) {
    let output = render_messages(messages, use_color);
    if !output.is_empty() {
        print!("{}", output);
    }
}

fn sort_indicator(sort: SortConfig, key: SortKey) -> &'static str {
    if sort.key != key {
        return "↕";
    }
    match sort.direction {
        SortDirection::Ascending => "↑",
        SortDirection::Descending => "↓",
    }
}

fn row_cells(record: &PriceRecord) -> Vec<String> {
    vec![
        truncate_to_width(&record.name, NAME_WIDTH),
        record.brand.clone(),
        record.store.clone(),
        format!("${:.2}", record.price),
        record.unit_price.clone(),
        record.size.clone(),
    ]
}

fn summary(count: usize, fetched_at: Option<DateTime<Utc>>) -> String {
    match fetched_at {
        Some(at) => format!("Showing {} results · updated {}", count, format_time_ago(at)),
        None => format!("Showing {} results", count),
    }
}

fn describe_filters(filters: &FilterState, search_term: &str) -> String {
    let mut parts = Vec::new();
    if !search_term.is_empty() {
        parts.push(format!("search: \"{}\"", search_term));
    }
    for (dimension, value) in filters.active() {
        parts.push(format!("{}: {}", dimension, value));
    }
    parts.join(", ")
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
