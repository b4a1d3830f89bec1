use crate::model::PriceRecord;

/// The two-record milk set used throughout the docs.
pub fn milk_records() -> Vec<PriceRecord> {
    vec![
        PriceRecord::new(1, "Milk 2L", "Pura", "Coles", 4.50, "2L").with_unit_price("$2.25 / 1L"),
        PriceRecord::new(2, "Milk 1L", "Dairy Farmers", "Aldi", 2.20, "1L")
            .with_unit_price("$2.20 / 1L"),
    ]
}

/// A wider set spanning three stores, with shared brands and sizes.
pub fn mixed_records() -> Vec<PriceRecord> {
    vec![
        PriceRecord::new(1, "Full Cream Milk", "Pura", "Coles", 4.50, "2L")
            .with_unit_price("$2.25 / 1L"),
        PriceRecord::new(2, "Lite Milk", "Pura", "Woolworths", 4.30, "2L")
            .with_unit_price("$2.15 / 1L"),
        PriceRecord::new(3, "Full Cream Milk", "Farmdale", "Aldi", 1.99, "1L")
            .with_unit_price("$1.99 / 1L"),
        PriceRecord::new(4, "White Bread", "Tip Top", "Coles", 3.80, "700g")
            .with_unit_price("$0.54 / 100g"),
        PriceRecord::new(5, "Milk Chocolate", "Cadbury", "Woolworths", 4.50, "180g")
            .with_unit_price("$2.50 / 100g"),
        PriceRecord::new(6, "Barista Milk", "Pura", "Aldi", 2.99, "1L")
            .with_unit_price("$2.99 / 1L"),
    ]
}

pub fn names(records: &[PriceRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

pub fn ids(records: &[PriceRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}
