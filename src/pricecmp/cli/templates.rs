//! # CLI Templates
//!
//! Output templates live in stand-alone files under `templates/` and are included
//! here as string constants.
//!
//! Templates are minijinja based and keep their trailing newline, so every line
//! break in the output is one you can see in the file. A `-%}` on the last tag
//! drops the file's final newline where the body already ends a line.
//!
//! Column widths, truncation and padding are computed in Rust (they need Unicode
//! width math); templates only join pre-laid-out cells and pick styles.

pub const TABLE_TEMPLATE: &str = include_str!("templates/table.tmp");
pub const OPTIONS_TEMPLATE: &str = include_str!("templates/options.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
