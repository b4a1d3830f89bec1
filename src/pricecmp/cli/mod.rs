pub mod commands;
pub mod logging;
pub mod render;
pub mod setup;
pub mod shell;
pub mod styles;
pub mod templates;
pub mod theme;

pub use commands::run;
