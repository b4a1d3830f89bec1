use crate::model::{FilterDimension, FilterState};

/// Replace one dimension, leaving the other two as they were.
pub fn set(filters: &FilterState, dimension: FilterDimension, value: &str) -> FilterState {
    let mut next = filters.clone();
    next.set(dimension, value);
    next
}

pub fn clear() -> FilterState {
    FilterState::default()
}

/// Whether the clear action has anything to reset.
pub fn is_active(filters: &FilterState, search_term: &str) -> bool {
    !filters.is_empty() || !search_term.is_empty()
}
