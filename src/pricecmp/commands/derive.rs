//! The derived-view pipeline: search → attribute filters → sort.
//!
//! Everything here is a pure function of its inputs. Callers recompute the view
//! after every state change instead of caching it.

use crate::model::{FilterDimension, FilterState, PriceRecord, SortConfig, SortDirection, SortKey};
use std::cmp::Ordering;

/// Filter then sort `records` into the view that gets rendered.
pub fn derive_view(
    records: &[PriceRecord],
    search_term: &str,
    filters: &FilterState,
    sort: SortConfig,
) -> Vec<PriceRecord> {
    sort_records(filter_records(records, search_term, filters), sort)
}

/// Records passing both the search term and every active filter, in input order.
pub fn filter_records(
    records: &[PriceRecord],
    search_term: &str,
    filters: &FilterState,
) -> Vec<PriceRecord> {
    let term_lower = search_term.to_lowercase();
    records
        .iter()
        .filter(|record| matches_search(record, &term_lower) && matches_filters(record, filters))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on name or brand. `term_lower` must already
/// be lowercased; an empty term matches everything.
pub fn matches_search(record: &PriceRecord, term_lower: &str) -> bool {
    term_lower.is_empty()
        || record.name.to_lowercase().contains(term_lower)
        || record.brand.to_lowercase().contains(term_lower)
}

pub fn matches_filters(record: &PriceRecord, filters: &FilterState) -> bool {
    FilterDimension::all().iter().all(|&dimension| {
        let wanted = filters.get(dimension);
        wanted.is_empty() || record.dimension(dimension) == wanted
    })
}

/// Stable sort on a single key. Ties keep their incoming order in both directions.
pub fn sort_records(mut records: Vec<PriceRecord>, sort: SortConfig) -> Vec<PriceRecord> {
    records.sort_by(|a, b| {
        let ord = compare_by_key(a, b, sort.key);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    records
}

/// Natural ordering of one column: numeric for price, byte-wise for strings.
pub fn compare_by_key(a: &PriceRecord, b: &PriceRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Brand => a.brand.cmp(&b.brand),
        SortKey::Store => a.store.cmp(&b.store),
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::UnitPrice => a.unit_price.cmp(&b.unit_price),
        SortKey::Size => a.size.cmp(&b.size),
    }
}
