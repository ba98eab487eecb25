// ABOUTME: Export column-ordering contract: fixed column order plus row alignment with sentinel padding.
// ABOUTME: Pure view functions; actual file writing belongs to the caller.

//! Export column contract.
//!
//! When records are serialized to a tabular file the columns appear in a
//! fixed order: Timestamp, ASIN, Title, Description, BulletPoint_1..N
//! (numerically sorted), BulletPoints, CurrentPrice, OriginalPrice,
//! DiscountPercentage, DeliveryRaw, DeliveryParsed, all `Tech_*` keys
//! (alphabetically), URL — with any unrecognized extra columns appended
//! at the end. Records missing a column are padded with `"N/A"`.

use std::collections::{BTreeSet, HashMap};

use crate::price::NOT_AVAILABLE;
use crate::record::ProductRecord;

const LEADING_COLUMNS: &[&str] = &["Timestamp", "ASIN", "Title", "Description"];
const MIDDLE_COLUMNS: &[&str] = &[
    "CurrentPrice",
    "OriginalPrice",
    "DiscountPercentage",
    "DeliveryRaw",
    "DeliveryParsed",
];

/// Computes the ordered header for a batch of records.
///
/// The header is the union of every record's flat columns, arranged in
/// the contract order. Bullet columns are sorted by their numeric index
/// so `BulletPoint_10` follows `BulletPoint_9`.
pub fn ordered_header(records: &[ProductRecord]) -> Vec<String> {
    let mut columns: BTreeSet<String> = BTreeSet::new();
    for record in records {
        for (name, _) in record.to_fields() {
            columns.insert(name);
        }
    }
    arrange_columns(columns)
}

fn arrange_columns(mut columns: BTreeSet<String>) -> Vec<String> {
    let mut header = Vec::with_capacity(columns.len());

    for name in LEADING_COLUMNS {
        if columns.remove(*name) {
            header.push(name.to_string());
        }
    }

    let mut bullets: Vec<(u32, String)> = columns
        .iter()
        .filter_map(|c| {
            c.strip_prefix("BulletPoint_")
                .and_then(|n| n.parse::<u32>().ok())
                .map(|n| (n, c.clone()))
        })
        .collect();
    bullets.sort_by_key(|(n, _)| *n);
    for (_, name) in bullets {
        columns.remove(&name);
        header.push(name);
    }
    if columns.remove("BulletPoints") {
        header.push("BulletPoints".to_string());
    }

    for name in MIDDLE_COLUMNS {
        if columns.remove(*name) {
            header.push(name.to_string());
        }
    }

    // BTreeSet iteration keeps Tech_* alphabetical.
    let tech: Vec<String> = columns
        .iter()
        .filter(|c| c.starts_with("Tech_"))
        .cloned()
        .collect();
    for name in tech {
        columns.remove(&name);
        header.push(name);
    }

    if columns.remove("URL") {
        header.push("URL".to_string());
    }

    // Unrecognized extras go last, alphabetically.
    header.extend(columns.into_iter());
    header
}

/// Aligns one record's values to a precomputed header.
pub fn record_row(record: &ProductRecord, header: &[String]) -> Vec<String> {
    let fields: HashMap<String, String> = record.to_fields().into_iter().collect();
    header
        .iter()
        .map(|name| {
            fields
                .get(name)
                .cloned()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordIdentity;
    use pretty_assertions::assert_eq;

    fn record(asin: &str) -> ProductRecord {
        ProductRecord::empty(&RecordIdentity::now(
            asin,
            format!("https://www.amazon.in/dp/{}", asin),
        ))
    }

    #[test]
    fn header_follows_contract_order() {
        let mut a = record("B0A");
        a.bullet_points = vec!["one".into(), "two".into()];
        a.tech_details
            .insert("Tech_Wattage".to_string(), "60 W".to_string());
        let mut b = record("B0B");
        b.tech_details
            .insert("Tech_Colour".to_string(), "Black".to_string());

        let header = ordered_header(&[a, b]);

        let expected_start = [
            "Timestamp",
            "ASIN",
            "Title",
            "Description",
            "BulletPoint_1",
            "BulletPoint_2",
            "BulletPoints",
            "CurrentPrice",
            "OriginalPrice",
            "DiscountPercentage",
            "DeliveryRaw",
            "DeliveryParsed",
            "Tech_Colour",
            "Tech_Wattage",
            "URL",
        ];
        assert_eq!(&header[..expected_start.len()], &expected_start[..]);
        // The numeric value columns ride the extras clause, after URL.
        let url_pos = header.iter().position(|c| c == "URL").unwrap();
        let cpv_pos = header.iter().position(|c| c == "CurrentPriceValue").unwrap();
        assert!(cpv_pos > url_pos);
    }

    #[test]
    fn bullet_columns_sort_numerically() {
        let mut a = record("B0A");
        a.bullet_points = (0..11).map(|i| format!("point {}", i)).collect();

        let header = ordered_header(std::slice::from_ref(&a));

        let b9 = header.iter().position(|c| c == "BulletPoint_9").unwrap();
        let b10 = header.iter().position(|c| c == "BulletPoint_10").unwrap();
        let b11 = header.iter().position(|c| c == "BulletPoint_11").unwrap();
        assert!(b9 < b10 && b10 < b11);
    }

    #[test]
    fn rows_pad_missing_columns_with_sentinel() {
        let mut a = record("B0A");
        a.tech_details
            .insert("Tech_Wattage".to_string(), "60 W".to_string());
        let b = record("B0B");

        let header = ordered_header(&[a.clone(), b.clone()]);
        let row_b = record_row(&b, &header);

        let wattage_pos = header.iter().position(|c| c == "Tech_Wattage").unwrap();
        assert_eq!(row_b[wattage_pos], "N/A");

        let row_a = record_row(&a, &header);
        assert_eq!(row_a[wattage_pos], "60 W");
        assert_eq!(row_a.len(), header.len());
    }
}
