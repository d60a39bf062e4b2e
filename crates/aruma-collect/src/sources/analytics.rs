//! Analytics producer.
//!
//! GA4-shaped site metrics for the storefront: overview, top pages, site
//! search terms and an ecommerce summary (revenue in soles). The numbers
//! are a curated mock until a GA4 property export is wired in; the
//! document shape is the one the dashboard already consumes.

use chrono::{SecondsFormat, Utc};
use rust_decimal::Decimal;

use aruma_signals::document::{
    AnalyticsDocument, AnalyticsOverview, DocumentMetadata, EcommerceSummary, PageRecord,
    ProductRecord, SearchTermRecord, TrendDirection,
};

fn overview() -> AnalyticsOverview {
    AnalyticsOverview {
        total_users: 118_420,
        conversions: 5684,
        conversion_rate: Decimal::new(48, 3),
        bounce_rate: Decimal::new(41, 2),
    }
}

fn top_pages() -> Vec<PageRecord> {
    let rows: &[(&str, u64, &str, i64)] = &[
        ("/productos/protector-solar", 24_850, "3:12", 67),
        ("/productos/serum-vitamina-c", 18_320, "2:48", 58),
        ("/marcas/cerave", 16_780, "2:35", 72),
        ("/guias/rutina-skincare", 14_250, "4:05", 39),
        ("/productos/maquillaje", 11_430, "2:10", 31),
    ];
    rows.iter()
        .map(|(page, views, time, rate_millis)| PageRecord {
            page: (*page).to_string(),
            views: *views,
            avg_time_on_page: (*time).to_string(),
            conversion_rate: Decimal::new(*rate_millis, 3),
        })
        .collect()
}

fn search_terms() -> Vec<SearchTermRecord> {
    let rows: &[(&str, u64, TrendDirection, i64)] = &[
        ("protector solar", 8940, TrendDirection::Rising, 71),
        ("cerave", 7210, TrendDirection::Rising, 83),
        ("serum facial", 5480, TrendDirection::Rising, 64),
        ("retinol", 4320, TrendDirection::Rising, 52),
        ("base de maquillaje", 3150, TrendDirection::Stable, 28),
    ];
    rows.iter()
        .map(|(term, searches, trend, rate_millis)| SearchTermRecord {
            term: (*term).to_string(),
            searches: *searches,
            trend: *trend,
            conversion_rate: Decimal::new(*rate_millis, 3),
        })
        .collect()
}

fn ecommerce() -> EcommerceSummary {
    let products: &[(&str, u64, i64)] = &[
        ("La Roche-Posay Anthelios UVMune 50+", 756, 9500),
        ("CeraVe Limpiador Hidratante 473ml", 842, 7000),
        ("Eucerin Sun Oil Control FPS 50", 534, 8800),
        ("CeraVe Crema Hidratante 340g", 512, 7500),
        ("The Ordinary Niacinamide 10% + Zinc", 698, 4200),
    ];
    EcommerceSummary {
        transactions: 5684,
        average_order_value: Decimal::new(8950, 2),
        top_products: products
            .iter()
            .map(|(name, units, price_cents)| {
                let avg_price = Decimal::new(*price_cents, 2);
                ProductRecord {
                    name: (*name).to_string(),
                    units: *units,
                    revenue: avg_price * Decimal::from(*units),
                    avg_price,
                }
            })
            .collect(),
    }
}

/// Builds the analytics document for the storefront.
#[must_use]
pub fn build_document(region: &str) -> AnalyticsDocument {
    AnalyticsDocument {
        timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        source: Some("Google Analytics 4".to_string()),
        region: Some(region.to_string()),
        overview: Some(overview()),
        top_pages: top_pages(),
        search_terms: search_terms(),
        ecommerce: Some(ecommerce()),
        metadata: DocumentMetadata {
            method: Some("Mock dataset (GA4 export shape)".to_string()),
            data_type: Some("web_analytics".to_string()),
            update_frequency: Some("daily".to_string()),
            note: Some("Replace with a GA4 Data API export once property access lands".to_string()),
        },
    }
}
