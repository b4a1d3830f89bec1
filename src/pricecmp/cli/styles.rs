//! Styles for the pricecmp table.
//!
//! Templates only ever refer to the semantic names in [`names`]. What those
//! names look like is decided here, once, in [`PRICE_THEME`]. Rows are colored by
//! store so the eye can group them while scanning prices; [`row_style`] maps a
//! store name to its row style.
use super::theme::Theme;
use console::Style;
use once_cell::sync::Lazy;

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const HEADER: &str = "header";
    pub const HEADER_ACTIVE: &str = "header-active";
    pub const RULE: &str = "rule";
    pub const ROW: &str = "row";
    pub const ROW_WOOLWORTHS: &str = "row-woolworths";
    pub const ROW_COLES: &str = "row-coles";
    pub const ROW_ALDI: &str = "row-aldi";
    pub const MUTED: &str = "muted";
    pub const FILTER: &str = "filter";
    pub const HINT: &str = "hint";
    pub const HEADING: &str = "heading";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
}

pub static PRICE_THEME: Lazy<Theme> = Lazy::new(build_theme);

fn build_theme() -> Theme {
    let muted = Style::new().dim();

    Theme::new()
        .add(names::HEADER, Style::new().bold())
        .add(names::HEADER_ACTIVE, Style::new().bold().underlined())
        .add(names::RULE, muted.clone())
        .add(names::ROW, Style::new())
        .add(names::ROW_WOOLWORTHS, Style::new().green())
        .add(names::ROW_COLES, Style::new().red())
        .add(names::ROW_ALDI, Style::new().blue())
        .add(names::MUTED, muted.clone())
        .add(names::FILTER, Style::new().yellow())
        .add(names::HINT, muted.clone().italic())
        .add(names::HEADING, Style::new().bold())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted)
}

/// Row style for a store. Matching is exact, like the store filter.
pub fn row_style(store: &str) -> &'static str {
    match store {
        "Woolworths" => names::ROW_WOOLWORTHS,
        "Coles" => names::ROW_COLES,
        "Aldi" => names::ROW_ALDI,
        _ => names::ROW,
    }
}
