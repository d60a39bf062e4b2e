//! Insight generation.
//!
//! One highlight-plus-action card per source, always in the order Search,
//! Trend, Emotion, Intent, followed by an optional cross-source card when
//! the top search keywords and social topics line up. Ties on the best
//! record go to the first entry in document order.

use rust_decimal::Decimal;
use serde::Serialize;

use aruma_core::SourceKind;

use crate::document::{AnalyticsDocument, MetaDocument, TiktokDocument, TrendsDocument};
use crate::score::round1;

/// Label used for the cross-source card, which has no single backing source.
pub const CROSS_SOURCE_LABEL: &str = "Conexión Multi-fuente";

/// A short natural-language highlight with a recommended action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub source: String,
    pub highlight: String,
    pub action: String,
    /// Presentation hint: the card spans two dashboard columns.
    pub wide: bool,
}

impl Insight {
    fn new(source: &str, highlight: String, action: &str) -> Self {
        Self {
            source: source.to_string(),
            highlight,
            action: action.to_string(),
            wide: false,
        }
    }
}

/// Pick the item with the maximal key, keeping the first on ties.
fn max_first<T, K, F>(items: &[T], key: F) -> Option<&T>
where
    F: Fn(&T) -> K,
    K: PartialOrd,
{
    let mut best: Option<(&T, K)> = None;
    for item in items {
        let k = key(item);
        match &best {
            None => best = Some((item, k)),
            Some((_, current)) if k > *current => best = Some((item, k)),
            Some(_) => {}
        }
    }
    best.map(|(item, _)| item)
}

fn fold_diacritic(ch: char) -> char {
    match ch {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

fn normalize_term(term: &str) -> String {
    term.to_lowercase().chars().map(fold_diacritic).collect()
}

/// First-token containment in either direction, accent-insensitive, so
/// "serum facial" matches "Sérum Vitamina C".
fn terms_overlap(keyword: &str, topic: &str) -> bool {
    let kw = normalize_term(keyword);
    let tp = normalize_term(topic);
    let kw_head = kw.split_whitespace().next().unwrap_or("");
    let tp_head = tp.split_whitespace().next().unwrap_or("");
    (!kw_head.is_empty() && tp.contains(kw_head)) || (!tp_head.is_empty() && kw.contains(tp_head))
}

fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn search_insight(doc: &TrendsDocument) -> Option<Insight> {
    let top = max_first(&doc.keywords, |k| k.average_interest)?;
    let mut highlight = format!(
        "\"{}\" lidera con {}/100 de interés",
        top.keyword, top.average_interest
    );
    if let Some(growth) = &top.growth_3m {
        highlight.push_str(&format!(" y {growth} de crecimiento"));
    }
    Some(Insight::new(
        SourceKind::Trends.display_name(),
        highlight,
        "Priorizar en campañas de búsqueda",
    ))
}

fn trend_insight(doc: &TiktokDocument) -> Option<Insight> {
    let top = max_first(&doc.trends.hashtags, |h| h.relevance_score)?;
    Some(Insight::new(
        SourceKind::Tiktok.display_name(),
        format!(
            "{} alcanzó {} views con {}/100 de relevancia",
            top.hashtag, top.views, top.relevance_score
        ),
        "Contenido viral activo - crear videos con este hashtag",
    ))
}

fn emotion_insight(doc: &MetaDocument) -> Option<Insight> {
    let top = max_first(&doc.aggregated_topics, |t| t.engagement_score)?;
    Some(Insight::new(
        SourceKind::Meta.display_name(),
        format!(
            "\"{}\" genera {}/10 de engagement con {} menciones",
            top.topic,
            top.engagement_score,
            format_thousands(top.mentions)
        ),
        "Audiencia altamente receptiva - expandir contenido",
    ))
}

fn intent_insight(doc: &AnalyticsDocument) -> Option<Insight> {
    let overview = doc.overview.as_ref()?;
    if overview.conversion_rate <= Decimal::ZERO {
        return None;
    }
    let percent = round1(overview.conversion_rate * Decimal::ONE_HUNDRED);
    Some(Insight::new(
        SourceKind::Analytics.display_name(),
        format!(
            "Tasa de conversión de {percent}% con {} conversiones",
            format_thousands(overview.conversions)
        ),
        "Alta intención de compra - optimizar checkout",
    ))
}

fn cross_insight(trends: &TrendsDocument, meta: &MetaDocument) -> Option<Insight> {
    let overlap = trends.keywords.iter().any(|k| {
        meta.aggregated_topics
            .iter()
            .any(|t| terms_overlap(&k.keyword, &t.topic))
    });
    if !overlap {
        return None;
    }
    Some(Insight {
        source: CROSS_SOURCE_LABEL.to_string(),
        highlight: "Señales consistentes detectadas: búsquedas, engagement social y conversión \
                    alineados"
            .to_string(),
        action: "Momento óptimo para invertir - todas las señales positivas".to_string(),
        wide: true,
    })
}

/// Build the insight sequence for whichever documents are present.
#[must_use]
pub fn build_insights(
    trends: Option<&TrendsDocument>,
    tiktok: Option<&TiktokDocument>,
    meta: Option<&MetaDocument>,
    analytics: Option<&AnalyticsDocument>,
) -> Vec<Insight> {
    let mut insights = Vec::with_capacity(5);
    if let Some(insight) = trends.and_then(search_insight) {
        insights.push(insight);
    }
    if let Some(insight) = tiktok.and_then(trend_insight) {
        insights.push(insight);
    }
    if let Some(insight) = meta.and_then(emotion_insight) {
        insights.push(insight);
    }
    if let Some(insight) = analytics.and_then(intent_insight) {
        insights.push(insight);
    }
    if let (Some(trends), Some(meta)) = (trends, meta) {
        if let Some(insight) = cross_insight(trends, meta) {
            insights.push(insight);
        }
    }
    insights
}
