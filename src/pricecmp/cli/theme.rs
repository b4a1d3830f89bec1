//! Styled template rendering.
//!
//! Templates define structure using minijinja; styles are registered by name in a
//! [`Theme`] and applied through the `style` filter:
//!
//! ```jinja
//! {{ row.name | style("row_coles") }}
//! ```
//!
//! Whether ANSI codes are emitted is decided once, when the [`Renderer`] is built.
//! With color off the filter passes text through unchanged, so layout computed in
//! Rust (column padding) survives either way.

use console::{Style, Term};
use minijinja::{Environment, Error, Value};
use serde::Serialize;
use std::collections::HashMap;

/// Prepended to text whose style name is not registered, to catch template typos.
pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// A named collection of styles.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style, replacing any existing one with that name.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    #[cfg(test)]
    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.clone().force_styling(true).apply_to(text).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

/// True when stdout looks like a terminal that understands colors.
pub fn colors_supported() -> bool {
    Term::stdout().features().colors_supported()
}

/// A minijinja environment with pre-registered templates and the `style` filter.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(theme: Theme, use_color: bool) -> Self {
        let mut env = Environment::new();
        // Templates spell out their own line breaks, including the last one
        env.set_keep_trailing_newline(true);
        env.add_filter("style", move |value: Value, name: String| -> String {
            theme.apply(&name, &value.to_string(), use_color)
        });
        Self { env }
    }

    /// Registers a named template; syntax errors surface here.
    pub fn add_template(&mut self, name: &'static str, source: &'static str) -> Result<(), Error> {
        self.env.add_template(name, source)
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        self.env.get_template(name)?.render(data)
    }
}
