use crate::config::PriceConfig;
use crate::model::{FilterOptions, PriceRecord};
use std::path::PathBuf;

pub mod config;
pub mod derive;
pub mod fetch;
pub mod filter;
pub mod options;
pub mod sort;

/// Where persisted configuration lives.
#[derive(Debug, Clone)]
pub struct PricePaths {
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// The derived view after the operation
    pub records: Vec<PriceRecord>,
    pub options: Option<FilterOptions>,
    pub config: Option<PriceConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_records(mut self, records: Vec<PriceRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_config(mut self, config: PriceConfig) -> Self {
        self.config = Some(config);
        self
    }
}
