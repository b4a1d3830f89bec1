use crate::model::{SortConfig, SortDirection, SortKey};

/// Column-header click: the active ascending column flips to descending, anything
/// else (a new column, or the active descending one) starts ascending.
pub fn toggle(current: SortConfig, key: SortKey) -> SortConfig {
    if current.key == key && current.direction == SortDirection::Ascending {
        SortConfig::descending(key)
    } else {
        SortConfig::ascending(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_column_cycles_between_directions() {
        let start = SortConfig::default();
        let once = toggle(start, SortKey::Price);
        assert_eq!(once, SortConfig::descending(SortKey::Price));

        let twice = toggle(once, SortKey::Price);
        assert_eq!(twice, SortConfig::ascending(SortKey::Price));
    }

    #[test]
    fn new_column_always_starts_ascending() {
        let desc = SortConfig::descending(SortKey::Price);
        assert_eq!(toggle(desc, SortKey::Name), SortConfig::ascending(SortKey::Name));
        assert_eq!(
            toggle(SortConfig::default(), SortKey::Name),
            SortConfig::ascending(SortKey::Name)
        );
    }
}
