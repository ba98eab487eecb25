// ABOUTME: Delivery-date parsing that reduces free-text delivery messaging to a canonical date substring.
// ABOUTME: Ordered regex cascade over known phrasings, with a keyword-gated loose fallback tier.

//! Delivery date parsing.
//!
//! Delivery messaging is free text and the phrasing varies by page layout
//! and locale. Parsing runs in two tiers:
//!
//! 1. An ordered table of `(pattern, capture group)` pairs covering the
//!    known phrasings ("Delivery by X", "Get it by X", "Arrives: X",
//!    "delivery between X and Y", date ranges, "delivery: X"). The first
//!    pattern that matches wins.
//! 2. If no pattern matched but the text contains a delivery keyword,
//!    one loose month-anchored pattern extracts the first date-like
//!    substring it finds.
//!
//! When both tiers fail on present text the result is the literal
//! sentinel [`UNPARSED_DATE`] — distinct from `"N/A"`, which the
//! assembler uses when there is no delivery text at all.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel for delivery text that matched no pattern in either tier.
pub const UNPARSED_DATE: &str = "Unable to parse date";

/// Keywords that gate the tier-2 loose extraction.
const DELIVERY_KEYWORDS: &[&str] = &[
    "delivery",
    "delivered",
    "arrive",
    "get it",
    "by",
    "between",
    "shipped",
];

static KEYWORD_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(DELIVERY_KEYWORDS)
        .expect("keyword automaton")
});

/// Known delivery phrasings, evaluated in order; first match wins.
///
/// Each entry pairs a compiled pattern with the index of the capture
/// group holding the date text, so new phrasings are a one-line addition.
static PHRASINGS: Lazy<Vec<(Regex, usize)>> = Lazy::new(|| {
    // "Mar 4", "March 4", and the day-first "4 March" variant.
    let month_day = r"[A-Za-z]{3,9}\.?\s*\d{1,2}";
    let day_month = r"\d{1,2}\s+[A-Za-z]{3,9}";
    let date_core = format!(r"(?:{month_day}|{day_month})");
    // Optional dash-joined tail: "- 7", "- Mar 7", "- 7 March".
    let range_tail = format!(r"(?:\s*[-\u{{2013}}]\s*(?:{date_core}|\d{{1,2}}))?");
    // Optional leading weekday: "Monday, Mar 4".
    let date = format!(r"(?:[A-Za-z]+,\s*)?{date_core}{range_tail}");

    let table: [(String, usize); 6] = [
        (format!(r"(?i)\bdelivery\s+by\s+({date})"), 1),
        (format!(r"(?i)\bget\s+it\s+by\s+({date})"), 1),
        (format!(r"(?i)\barrives?\s*:?\s+({date})"), 1),
        (
            format!(r"(?i)\bdelivery\s+between\s+({date}(?:\s+(?:and|to)\s+{date})?)"),
            1,
        ),
        (format!(r"(?i)\bdelivery\s*:\s*({date})"), 1),
        // Bare dash-joined range anywhere in the text, e.g. "FREE delivery Mar 4 - 7".
        (
            format!(r"(?i)\b((?:[A-Za-z]+,\s*)?{date_core}\s*[-\u{{2013}}]\s*(?:{date_core}|\d{{1,2}}))"),
            1,
        ),
    ];

    table
        .iter()
        .map(|(pattern, group)| (Regex::new(pattern).expect("delivery phrasing"), *group))
        .collect()
});

/// Tier-2 loose pattern: first month-word + day substring, optional day range.
static LOOSE_DATE: Lazy<Regex> = Lazy::new(|| {
    let month = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*";
    Regex::new(&format!(
        r"(?i)\b({month}\.?\s+\d{{1,2}}(?:\s*[-\u{{2013}}]\s*\d{{1,2}})?|\d{{1,2}}\s+{month})"
    ))
    .expect("loose date pattern")
});

/// Reduces delivery messaging to a canonical date/date-range substring.
///
/// Always returns a value: the first tier-1 capture, the tier-2 loose
/// extraction, or the [`UNPARSED_DATE`] sentinel. The caller is
/// responsible for the no-text-at-all case (`"N/A"`).
pub fn parse_delivery(raw: &str) -> String {
    for (pattern, group) in PHRASINGS.iter() {
        if let Some(caps) = pattern.captures(raw) {
            if let Some(m) = caps.get(*group) {
                return m.as_str().trim().to_string();
            }
        }
    }

    if KEYWORD_MATCHER.is_match(raw) {
        tracing::debug!(raw, "no delivery phrasing matched, trying loose extraction");
        if let Some(caps) = LOOSE_DATE.captures(raw) {
            if let Some(m) = caps.get(1) {
                return m.as_str().trim().to_string();
            }
        }
    }

    tracing::debug!(raw, "delivery text did not yield a date");
    UNPARSED_DATE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn delivery_by_weekday_date() {
        assert_eq!(parse_delivery("Delivery by Monday, Mar 4"), "Monday, Mar 4");
    }

    #[test]
    fn get_it_by() {
        assert_eq!(
            parse_delivery("FREE delivery. Get it by Tuesday, March 12"),
            "Tuesday, March 12"
        );
    }

    #[test]
    fn arrives_colon() {
        assert_eq!(parse_delivery("Arrives: Mar 18"), "Mar 18");
    }

    #[test]
    fn arrives_without_colon() {
        assert_eq!(parse_delivery("Arrives Mar 18"), "Mar 18");
    }

    #[test]
    fn delivery_between_two_dates() {
        assert_eq!(
            parse_delivery("Standard delivery between March 4 and March 7."),
            "March 4 and March 7"
        );
    }

    #[test]
    fn delivery_colon() {
        assert_eq!(parse_delivery("Delivery: 4 March"), "4 March");
    }

    #[test]
    fn dash_joined_day_range() {
        assert_eq!(parse_delivery("FREE delivery Mar 4 - 7"), "Mar 4 - 7");
    }

    #[test]
    fn dash_joined_full_range() {
        assert_eq!(
            parse_delivery("Usually dispatched Apr 28 - May 2"),
            "Apr 28 - May 2"
        );
    }

    #[test]
    fn keyword_present_but_no_date() {
        assert_eq!(parse_delivery("Arrives sometime"), UNPARSED_DATE);
    }

    #[test]
    fn keyword_gated_loose_extraction() {
        assert_eq!(
            parse_delivery("Usually shipped promptly, expect it around Mar 15."),
            "Mar 15"
        );
    }

    #[test]
    fn no_keywords_no_patterns() {
        assert_eq!(parse_delivery("In stock"), UNPARSED_DATE);
    }

    #[test]
    fn first_phrasing_wins_over_loose() {
        // "Delivery by" must capture its own date, not the first loose hit.
        assert_eq!(
            parse_delivery("Ordered Mar 1. Delivery by Monday, Mar 4"),
            "Monday, Mar 4"
        );
    }
}
