//! # Record Sources
//!
//! The [`RecordSource`] trait is the Data Fetcher seam: the view engine asks it for
//! the records matching a query term and never cares where they come from.
//!
//! ## Implementations
//!
//! - [`http::HttpSource`]: Production source
//!   - `GET {base_url}/api/v1/price/all/{term}`
//!   - Expects `{ "data": [PriceRecord, ...] }`
//!   - No retry, no caching, no cancellation
//!
//! - [`memory::InMemorySource`]: Canned responses for testing
//!   - Keyed by exact query term
//!   - Can be switched into a failing mode to exercise error paths
//!
//! Every call is a full replacement: sources return the complete record set for a
//! term, never a delta.

use crate::error::Result;
use crate::model::PriceRecord;

pub mod http;
pub mod memory;

/// Abstract interface for fetching price records.
pub trait RecordSource {
    /// Fetch every record the backend associates with `query_term`.
    fn fetch_records(&self, query_term: &str) -> Result<Vec<PriceRecord>>;
}

impl<S: RecordSource + ?Sized> RecordSource for &S {
    fn fetch_records(&self, query_term: &str) -> Result<Vec<PriceRecord>> {
        (**self).fetch_records(query_term)
    }
}
