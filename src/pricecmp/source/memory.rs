use super::RecordSource;
use crate::error::{PriceError, Result};
use crate::model::PriceRecord;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory record source for tests.
///
/// Responses are keyed by the exact query term; unknown terms return an empty
/// list, as the backend does when nothing matches.
#[derive(Debug, Default)]
pub struct InMemorySource {
    responses: HashMap<String, Vec<PriceRecord>>,
    failure: Option<String>,
    calls: RefCell<Vec<String>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, term: &str, records: Vec<PriceRecord>) -> Self {
        self.responses.insert(term.to_string(), records);
        self
    }

    /// Every fetch fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Switches failure mode on (`Some`) or off (`None`) between fetches.
    pub fn set_failure(&mut self, message: Option<&str>) {
        self.failure = message.map(str::to_string);
    }

    /// Query terms received so far, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl RecordSource for InMemorySource {
    fn fetch_records(&self, query_term: &str) -> Result<Vec<PriceRecord>> {
        self.calls.borrow_mut().push(query_term.to_string());

        if let Some(message) = &self.failure {
            return Err(PriceError::Api(message.clone()));
        }

        Ok(self
            .responses
            .get(query_term)
            .cloned()
            .unwrap_or_default())
    }
}
