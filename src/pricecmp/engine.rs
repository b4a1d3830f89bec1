//! # View Engine
//!
//! The engine is a **thin stateful facade** over the command layer. It owns the
//! record set and the three user inputs (search term, filters, sort) and hands
//! back a freshly derived view after every change.
//!
//! ## State
//!
//! | field        | initial value              |
//! |--------------|----------------------------|
//! | records      | empty                      |
//! | loading      | `true` until a fetch lands |
//! | search term  | seed term (`"milk"`)       |
//! | filters      | all unconstrained          |
//! | sort         | price, ascending           |
//!
//! ## Fetching
//!
//! A fetch is split in two so that overlapping requests can be reasoned about:
//! [`ViewEngine::begin_fetch`] issues a [`FetchTicket`] carrying a generation
//! number, and [`ViewEngine::complete_fetch`] applies the response only if that
//! ticket is still the newest one. A slow early response can't clobber a later
//! one. [`ViewEngine::refresh`] does both steps back to back.
//!
//! Failures keep the previous record set. The error is logged, kept in
//! [`ViewEngine::last_error`], and reported as a warning message.
//!
//! ## What the Engine Does NOT Do
//!
//! - Presentation: it returns records and messages, never strings for a terminal
//! - Caching: [`ViewEngine::view`] recomputes from scratch each call

use crate::commands::{self, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{FilterDimension, FilterOptions, FilterState, PriceRecord, SortConfig, SortKey};
use crate::source::RecordSource;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Seed term used when no configuration says otherwise.
pub const DEFAULT_SEARCH_TERM: &str = "milk";

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub term: String,
}

pub struct ViewEngine<S: RecordSource> {
    source: S,
    records: Vec<PriceRecord>,
    loading: bool,
    search_term: String,
    filters: FilterState,
    sort: SortConfig,
    generation: u64,
    last_error: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
}

impl<S: RecordSource> ViewEngine<S> {
    pub fn new(source: S) -> Self {
        Self::with_search_term(source, DEFAULT_SEARCH_TERM)
    }

    pub fn with_search_term(source: S, search_term: impl Into<String>) -> Self {
        Self {
            source,
            records: Vec::new(),
            loading: true,
            search_term: search_term.into(),
            filters: FilterState::default(),
            sort: SortConfig::default(),
            generation: 0,
            last_error: None,
            fetched_at: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The full, unfiltered record set from the last applied fetch.
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// The filtered and sorted projection of the current state.
    pub fn view(&self) -> Vec<PriceRecord> {
        commands::derive::derive_view(&self.records, &self.search_term, &self.filters, self.sort)
    }

    /// Selector values, always drawn from the full record set.
    pub fn options(&self) -> FilterOptions {
        commands::options::distinct_options(&self.records)
    }

    pub fn is_filter_active(&self) -> bool {
        commands::filter::is_active(&self.filters, &self.search_term)
    }

    /// Typing in the search box: re-filters locally, no fetch.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> CmdResult {
        self.search_term = term.into();
        self.derived()
    }

    pub fn set_filter(&mut self, dimension: FilterDimension, value: &str) -> CmdResult {
        self.filters = commands::filter::set(&self.filters, dimension, value);
        self.derived()
    }

    /// Like [`set_filter`](Self::set_filter) but takes the dimension by name.
    pub fn set_filter_by_name(&mut self, dimension: &str, value: &str) -> Result<CmdResult> {
        let dimension: FilterDimension = dimension.parse()?;
        Ok(self.set_filter(dimension, value))
    }

    pub fn toggle_sort(&mut self, key: SortKey) -> CmdResult {
        self.sort = commands::sort::toggle(self.sort, key);
        self.derived()
    }

    pub fn toggle_sort_by_name(&mut self, key: &str) -> Result<CmdResult> {
        let key: SortKey = key.parse()?;
        Ok(self.toggle_sort(key))
    }

    /// Sets the sort outright, bypassing the toggle cycle.
    pub fn set_sort(&mut self, sort: SortConfig) -> CmdResult {
        self.sort = sort;
        self.derived()
    }

    /// Resets filters and the search term. Sort and records stay; no fetch.
    pub fn clear(&mut self) -> CmdResult {
        self.filters = commands::filter::clear();
        self.search_term.clear();
        self.derived()
    }

    /// Fetch with the current search term and apply the result.
    pub fn refresh(&mut self) -> CmdResult {
        let ticket = self.begin_fetch();
        let outcome = commands::fetch::run(&self.source, &ticket.term);
        self.complete_fetch(&ticket, outcome)
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.loading = true;
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            term: self.search_term.clone(),
        }
    }

    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<Vec<PriceRecord>>,
    ) -> CmdResult {
        if ticket.generation != self.generation {
            warn!(
                term = %ticket.term,
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale fetch response"
            );
            let mut result = self.derived();
            result.add_message(CmdMessage::info(format!(
                "Ignored an outdated response for '{}'",
                ticket.term
            )));
            return result;
        }

        let message = match outcome {
            Ok(records) => {
                info!(term = %ticket.term, count = records.len(), "applied fetch");
                self.records = records;
                self.last_error = None;
                self.fetched_at = Some(Utc::now());
                CmdMessage::success(format!(
                    "Loaded {} prices for '{}'",
                    self.records.len(),
                    ticket.term
                ))
            }
            Err(e) => {
                let text = e.to_string();
                warn!(term = %ticket.term, error = %text, "fetch failed, keeping previous records");
                self.last_error = Some(text.clone());
                CmdMessage::warning(format!(
                    "Could not load prices for '{}': {}",
                    ticket.term, text
                ))
            }
        };
        self.loading = false;

        let mut result = self.derived();
        result.add_message(message);
        result
    }

    fn derived(&self) -> CmdResult {
        CmdResult::default().with_records(self.view())
    }
}
