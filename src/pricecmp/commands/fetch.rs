use crate::error::Result;
use crate::model::PriceRecord;
use crate::source::RecordSource;
use tracing::debug;

/// One read against the source. Errors are returned as-is; the engine decides
/// what to keep and logs the failure.
pub fn run<S: RecordSource>(source: &S, term: &str) -> Result<Vec<PriceRecord>> {
    debug!(term, "fetching price records");
    match source.fetch_records(term) {
        Ok(records) => {
            debug!(term, count = records.len(), "fetch succeeded");
            Ok(records)
        }
        Err(e) => {
            debug!(term, error = %e, "fetch returned an error");
            Err(e)
        }
    }
}
