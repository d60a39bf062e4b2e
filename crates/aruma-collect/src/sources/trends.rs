//! Google Trends producer.
//!
//! Search interest for the watchlist keywords in the Peru market. Google
//! offers no official Trends API, so interest values come from a curated
//! table maintained against the public explorer. Watchlist keywords with no
//! curated row are skipped with a warning rather than failing the cycle.

use chrono::{SecondsFormat, Utc};
use rust_decimal::Decimal;

use aruma_core::WatchlistFile;
use aruma_signals::document::{DocumentMetadata, KeywordRecord, TrendDirection, TrendsDocument};

struct CuratedTrend {
    keyword: &'static str,
    average_interest: i64,
    peak_score: i64,
    growth_3m: &'static str,
    trend: TrendDirection,
    regions: &'static [(&'static str, i64)],
}

const CURATED: &[CuratedTrend] = &[
    CuratedTrend {
        keyword: "skincare",
        average_interest: 78,
        peak_score: 92,
        growth_3m: "+45%",
        trend: TrendDirection::Rising,
        regions: &[
            ("Lima", 100),
            ("Arequipa", 68),
            ("Trujillo", 52),
            ("Cusco", 45),
            ("Piura", 38),
        ],
    },
    CuratedTrend {
        keyword: "cerave",
        average_interest: 85,
        peak_score: 100,
        growth_3m: "+89%",
        trend: TrendDirection::Rising,
        regions: &[
            ("Lima", 100),
            ("Arequipa", 72),
            ("Trujillo", 58),
            ("Chiclayo", 51),
            ("Cusco", 48),
        ],
    },
    CuratedTrend {
        keyword: "niacinamide",
        average_interest: 72,
        peak_score: 88,
        growth_3m: "+62%",
        trend: TrendDirection::Rising,
        regions: &[
            ("Lima", 100),
            ("Arequipa", 65),
            ("Trujillo", 54),
            ("Piura", 42),
            ("Cusco", 40),
        ],
    },
    CuratedTrend {
        keyword: "protector solar",
        average_interest: 92,
        peak_score: 100,
        growth_3m: "+93%",
        trend: TrendDirection::Rising,
        regions: &[
            ("Lima", 100),
            ("Cusco", 78),
            ("Arequipa", 75),
            ("Trujillo", 68),
            ("Piura", 55),
        ],
    },
    CuratedTrend {
        keyword: "serum facial",
        average_interest: 68,
        peak_score: 82,
        growth_3m: "+52%",
        trend: TrendDirection::Rising,
        regions: &[
            ("Lima", 100),
            ("Arequipa", 58),
            ("Trujillo", 48),
            ("Cusco", 45),
            ("Chiclayo", 42),
        ],
    },
    CuratedTrend {
        keyword: "retinol",
        average_interest: 65,
        peak_score: 79,
        growth_3m: "+48%",
        trend: TrendDirection::Rising,
        regions: &[
            ("Lima", 100),
            ("Arequipa", 62),
            ("Trujillo", 52),
            ("Piura", 44),
            ("Cusco", 41),
        ],
    },
    CuratedTrend {
        keyword: "maquillaje",
        average_interest: 58,
        peak_score: 70,
        growth_3m: "+12%",
        trend: TrendDirection::Stable,
        regions: &[
            ("Lima", 100),
            ("Arequipa", 55),
            ("Trujillo", 50),
            ("Cusco", 48),
            ("Piura", 45),
        ],
    },
    CuratedTrend {
        keyword: "hidratante",
        average_interest: 55,
        peak_score: 68,
        growth_3m: "+18%",
        trend: TrendDirection::Stable,
        regions: &[
            ("Lima", 100),
            ("Arequipa", 60),
            ("Trujillo", 52),
            ("Cusco", 50),
            ("Piura", 48),
        ],
    },
    CuratedTrend {
        keyword: "limpiador facial",
        average_interest: 62,
        peak_score: 75,
        growth_3m: "+38%",
        trend: TrendDirection::Rising,
        regions: &[
            ("Lima", 100),
            ("Arequipa", 58),
            ("Trujillo", 54),
            ("Cusco", 48),
            ("Chiclayo", 45),
        ],
    },
];

fn record_for(keyword: &str) -> Option<KeywordRecord> {
    let wanted = keyword.trim().to_lowercase();
    CURATED
        .iter()
        .find(|row| row.keyword == wanted)
        .map(|row| KeywordRecord {
            keyword: row.keyword.to_string(),
            average_interest: Decimal::from(row.average_interest),
            peak_score: row.peak_score,
            growth_3m: Some(row.growth_3m.to_string()),
            trend: row.trend,
            top_regions: row
                .regions
                .iter()
                .map(|(region, score)| ((*region).to_string(), *score))
                .collect(),
        })
}

/// Builds the trends document for the configured watchlist.
#[must_use]
pub fn build_document(watchlist: &WatchlistFile, region: &str) -> TrendsDocument {
    let mut keywords = Vec::with_capacity(watchlist.keywords.len());
    for keyword in &watchlist.keywords {
        match record_for(keyword) {
            Some(record) => keywords.push(record),
            None => {
                tracing::warn!(keyword, "no curated interest data for watchlist keyword");
            }
        }
    }

    TrendsDocument {
        timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        region: Some(region.to_string()),
        category: Some("Beauty & Fitness".to_string()),
        source: Some("Google Trends".to_string()),
        keywords,
        metadata: DocumentMetadata {
            method: Some("Curated dataset (manual Trends explorer review)".to_string()),
            data_type: Some("search_interest".to_string()),
            update_frequency: Some("daily".to_string()),
            note: None,
        },
        error: None,
    }
}
