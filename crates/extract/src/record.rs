// ABOUTME: ProductRecord, the canonical structured output for one product page.
// ABOUTME: Every field is always populated, with sentinels standing in for missing data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::price::NOT_AVAILABLE;

/// Identity fields supplied by the caller, not extracted from the page.
#[derive(Debug, Clone)]
pub struct RecordIdentity {
    pub asin: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

impl RecordIdentity {
    /// Identity stamped with the current time.
    pub fn now(asin: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            asin: asin.into(),
            url: url.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The canonical record extracted from one product page.
///
/// Created fresh per document, fully populated in one pass, and never
/// mutated after return. Absent textual fields hold `"N/A"`; unparsable
/// numeric fields hold `0.0`. A record therefore always carries every
/// canonical field, even for a near-empty document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub asin: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub current_price: String,
    pub current_price_value: f64,
    pub original_price: String,
    pub original_price_value: f64,
    pub discount_percentage: String,
    pub bullet_points: Vec<String>,
    pub delivery_raw: String,
    pub delivery_parsed: String,
    pub description: String,
    /// Open set of `Tech_*` keys, unique within the record.
    pub tech_details: BTreeMap<String, String>,
}

impl ProductRecord {
    /// A record with every extracted field at its sentinel.
    pub fn empty(identity: &RecordIdentity) -> Self {
        Self {
            asin: identity.asin.clone(),
            url: identity.url.clone(),
            timestamp: identity.timestamp,
            title: NOT_AVAILABLE.to_string(),
            current_price: NOT_AVAILABLE.to_string(),
            current_price_value: 0.0,
            original_price: NOT_AVAILABLE.to_string(),
            original_price_value: 0.0,
            discount_percentage: NOT_AVAILABLE.to_string(),
            bullet_points: Vec::new(),
            delivery_raw: NOT_AVAILABLE.to_string(),
            delivery_parsed: NOT_AVAILABLE.to_string(),
            description: NOT_AVAILABLE.to_string(),
            tech_details: BTreeMap::new(),
        }
    }

    /// The flat column/value view consumed by export.
    ///
    /// Bullet points appear both individually indexed (`BulletPoint_1..N`)
    /// and joined with newlines (`BulletPoints`); the joined column holds
    /// `"N/A"` when there are none. Tech keys are already `Tech_`-prefixed.
    pub fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            (
                "Timestamp".to_string(),
                self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
            ("ASIN".to_string(), self.asin.clone()),
            ("Title".to_string(), self.title.clone()),
            ("Description".to_string(), self.description.clone()),
        ];

        for (i, bullet) in self.bullet_points.iter().enumerate() {
            fields.push((format!("BulletPoint_{}", i + 1), bullet.clone()));
        }
        let joined = if self.bullet_points.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            self.bullet_points.join("\n")
        };
        fields.push(("BulletPoints".to_string(), joined));

        fields.push(("CurrentPrice".to_string(), self.current_price.clone()));
        fields.push((
            "CurrentPriceValue".to_string(),
            format!("{:.2}", self.current_price_value),
        ));
        fields.push(("OriginalPrice".to_string(), self.original_price.clone()));
        fields.push((
            "OriginalPriceValue".to_string(),
            format!("{:.2}", self.original_price_value),
        ));
        fields.push((
            "DiscountPercentage".to_string(),
            self.discount_percentage.clone(),
        ));
        fields.push(("DeliveryRaw".to_string(), self.delivery_raw.clone()));
        fields.push(("DeliveryParsed".to_string(), self.delivery_parsed.clone()));

        for (key, value) in &self.tech_details {
            fields.push((key.clone(), value.clone()));
        }

        fields.push(("URL".to_string(), self.url.clone()));
        fields
    }
}
