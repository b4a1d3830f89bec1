use crate::model::{FilterDimension, FilterOptions, PriceRecord};
use std::collections::BTreeSet;

/// Distinct store, brand and size values across the full record set, sorted.
///
/// Always computed from the unfiltered records so that selecting one filter never
/// hides the alternatives in the others.
pub fn distinct_options(records: &[PriceRecord]) -> FilterOptions {
    FilterOptions {
        stores: distinct_values(records, FilterDimension::Store),
        brands: distinct_values(records, FilterDimension::Brand),
        sizes: distinct_values(records, FilterDimension::Size),
    }
}

pub fn distinct_values(records: &[PriceRecord], dimension: FilterDimension) -> Vec<String> {
    records
        .iter()
        .map(|r| r.dimension(dimension))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
