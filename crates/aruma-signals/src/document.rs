//! Serde models for the four producer document families.
//!
//! Field names mirror the JSON the producers write, a mix of snake_case and
//! camelCase the dashboard consumer already depends on. Numeric fields that
//! feed scoring deserialize leniently: a malformed value degrades to 0 for
//! that field instead of failing the whole document.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lenient [`Decimal`] field parsing for producer documents.
///
/// Accepts a JSON number or a numeric string; anything else (null, booleans,
/// nested values, garbage text) becomes zero. Pair with `#[serde(default)]`
/// so an absent field is zero as well.
pub(crate) mod lenient {
    use rust_decimal::prelude::FromPrimitive;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};

    pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(from_value(&value))
    }

    pub(crate) fn from_value(value: &serde_json::Value) -> Decimal {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Decimal::from(i)
                } else if let Some(u) = n.as_u64() {
                    Decimal::from(u)
                } else {
                    n.as_f64()
                        .and_then(Decimal::from_f64)
                        .unwrap_or(Decimal::ZERO)
                }
            }
            serde_json::Value::String(s) => s.trim().parse().unwrap_or(Decimal::ZERO),
            _ => Decimal::ZERO,
        }
    }
}

/// Provenance block every producer writes alongside its payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, rename = "dataType", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(
        default,
        rename = "updateFrequency",
        skip_serializing_if = "Option::is_none"
    )]
    pub update_frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    #[default]
    Stable,
    Falling,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Rising => write!(f, "rising"),
            TrendDirection::Stable => write!(f, "stable"),
            TrendDirection::Falling => write!(f, "falling"),
        }
    }
}

/// Audience sentiment label attached to a Meta topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "very positive")]
    VeryPositive,
    #[serde(rename = "positive")]
    Positive,
    #[default]
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "negative")]
    Negative,
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    /// Search interest on Google's 0–100 scale, averaged over the window.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub average_interest: Decimal,
    #[serde(default)]
    pub peak_score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_3m: Option<String>,
    #[serde(default)]
    pub trend: TrendDirection,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub top_regions: BTreeMap<String, i64>,
}

impl KeywordRecord {
    /// The highest-scoring region, if any regional breakdown is present.
    #[must_use]
    pub fn top_region(&self) -> Option<(&str, i64)> {
        self.top_regions
            .iter()
            .max_by_key(|(_, score)| **score)
            .map(|(region, score)| (region.as_str(), *score))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendsDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub keywords: Vec<KeywordRecord>,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// TikTok
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagRecord {
    pub hashtag: String,
    /// Humanized view count as published by the Creative Center, e.g. `"2.8M"`.
    #[serde(default)]
    pub views: String,
    #[serde(default)]
    pub posts: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth: Option<String>,
    #[serde(
        default,
        rename = "relevanceScore",
        deserialize_with = "lenient::decimal"
    )]
    pub relevance_score: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundRecord {
    #[serde(rename = "soundName")]
    pub sound_name: String,
    #[serde(default)]
    pub usage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorRecord {
    pub category: String,
    #[serde(default, rename = "avgEngagement")]
    pub avg_engagement: String,
    #[serde(default, rename = "topRegion", skip_serializing_if = "Option::is_none")]
    pub top_region: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TiktokTrends {
    #[serde(default)]
    pub hashtags: Vec<HashtagRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sounds: Vec<SoundRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<CreatorRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TiktokDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub trends: TiktokTrends,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    pub topic: String,
    #[serde(default)]
    pub mentions: u64,
    /// Engagement already normalized onto the 0–10 score scale.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub engagement_score: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth: Option<String>,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_brands: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_reactions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_comments: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_shares: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discussion_volume: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_queries: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostEngagement {
    #[serde(default)]
    pub reactions: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
}

impl PostEngagement {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.reactions + self.comments + self.shares
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default)]
    pub engagement: PostEngagement,
}

/// One monitored page or community. Curated pages carry `topics`; pages
/// harvested from the Graph API carry post statistics instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSummary {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<TopicRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts_analyzed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_engagement: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_engagement: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_posts: Vec<PostSummary>,
    /// Free-form curation notes (monitored page lists, verification trail).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub pages: Vec<PageSummary>,
    #[serde(default, rename = "aggregatedTopics")]
    pub aggregated_topics: Vec<TopicRecord>,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Analytics (GA4-style mock)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub conversions: u64,
    /// Fraction in [0, 1]; 0.048 means 4.8%.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub conversion_rate: Decimal,
    #[serde(default)]
    pub bounce_rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub page: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub avg_time_on_page: String,
    #[serde(default)]
    pub conversion_rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTermRecord {
    pub term: String,
    #[serde(default)]
    pub searches: u64,
    #[serde(default)]
    pub trend: TrendDirection,
    #[serde(default)]
    pub conversion_rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub name: String,
    #[serde(default)]
    pub units: u64,
    #[serde(default)]
    pub revenue: Decimal,
    #[serde(default)]
    pub avg_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcommerceSummary {
    #[serde(default)]
    pub transactions: u64,
    #[serde(default)]
    pub average_order_value: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_products: Vec<ProductRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<AnalyticsOverview>,
    #[serde(default, rename = "topPages", skip_serializing_if = "Vec::is_empty")]
    pub top_pages: Vec<PageRecord>,
    #[serde(default, rename = "searchTerms", skip_serializing_if = "Vec::is_empty")]
    pub search_terms: Vec<SearchTermRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecommerce: Option<EcommerceSummary>,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_decimal_accepts_integers_floats_and_strings() {
        assert_eq!(
            lenient::from_value(&serde_json::json!(78)),
            Decimal::from(78)
        );
        assert_eq!(
            lenient::from_value(&serde_json::json!(9.2)),
            "9.2".parse().unwrap()
        );
        assert_eq!(
            lenient::from_value(&serde_json::json!("0.048")),
            "0.048".parse().unwrap()
        );
    }

    #[test]
    fn lenient_decimal_degrades_garbage_to_zero() {
        assert_eq!(lenient::from_value(&serde_json::json!(null)), Decimal::ZERO);
        assert_eq!(lenient::from_value(&serde_json::json!(true)), Decimal::ZERO);
        assert_eq!(
            lenient::from_value(&serde_json::json!("not a number")),
            Decimal::ZERO
        );
        assert_eq!(
            lenient::from_value(&serde_json::json!(["9.2"])),
            Decimal::ZERO
        );
    }

    #[test]
    fn keyword_record_parses_producer_shape() {
        let json = serde_json::json!({
            "keyword": "protector solar",
            "average_interest": 92,
            "trend": "rising",
            "peak_score": 100,
            "growth_3m": "+93%",
            "top_regions": {"Lima": 100, "Cusco": 78, "Arequipa": 75}
        });
        let record: KeywordRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.average_interest, Decimal::from(92));
        assert_eq!(record.trend, TrendDirection::Rising);
        assert_eq!(record.top_region(), Some(("Lima", 100)));
    }

    #[test]
    fn malformed_interest_defaults_to_zero_without_failing_parse() {
        let json = serde_json::json!({
            "keyword": "retinol",
            "average_interest": "n/a",
            "trend": "stable"
        });
        let record: KeywordRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.average_interest, Decimal::ZERO);
    }

    #[test]
    fn hashtag_record_reads_camel_case_relevance() {
        let json = serde_json::json!({
            "hashtag": "#protectorsolar",
            "views": "890K",
            "posts": "5.6K",
            "growth": "+93%",
            "relevanceScore": 94,
            "region": "Peru"
        });
        let record: HashtagRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.relevance_score, Decimal::from(94));

        let round_trip = serde_json::to_value(&record).unwrap();
        assert_eq!(round_trip["relevanceScore"], serde_json::json!(94.0));
    }

    #[test]
    fn sentiment_parses_spaced_variant() {
        let sentiment: Sentiment = serde_json::from_str("\"very positive\"").unwrap();
        assert_eq!(sentiment, Sentiment::VeryPositive);
    }

    #[test]
    fn analytics_overview_reads_camel_case() {
        let json = serde_json::json!({
            "totalUsers": 118_420,
            "conversions": 5684,
            "conversionRate": 0.048,
            "bounceRate": 0.41
        });
        let overview: AnalyticsOverview = serde_json::from_value(json).unwrap();
        assert_eq!(overview.total_users, 118_420);
        assert_eq!(overview.conversion_rate, "0.048".parse().unwrap());
    }

    #[test]
    fn meta_document_reads_aggregated_topics_rename() {
        let json = serde_json::json!({
            "timestamp": "2025-10-31T12:00:00Z",
            "source": "Meta/Facebook Public Trends",
            "aggregatedTopics": [
                {"topic": "Protector Solar Facial", "mentions": 2200,
                 "engagement_score": 9.2, "sentiment": "very positive"}
            ]
        });
        let doc: MetaDocument = serde_json::from_value(json).unwrap();
        assert_eq!(doc.aggregated_topics.len(), 1);
        assert_eq!(
            doc.aggregated_topics[0].engagement_score,
            "9.2".parse().unwrap()
        );
    }

    #[test]
    fn empty_object_parses_as_bare_document() {
        let doc: TrendsDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.keywords.is_empty());
        assert!(doc.timestamp.is_none());

        let doc: TiktokDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.trends.hashtags.is_empty());

        let doc: AnalyticsDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.overview.is_none());
    }
}
