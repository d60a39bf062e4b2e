//! Signal score normalization.
//!
//! Each source maps onto a 0–10 sub-score; a source that is missing or has
//! nothing to score contributes the neutral 5.0 rather than an error. The
//! overall score is the mean of the four sub-scores. Rounding is half-up
//! (midpoint away from zero) to one decimal, applied uniformly, so
//! mean(9.2, 7.3) = 8.25 lands on 8.3.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::document::{AnalyticsDocument, MetaDocument, TiktokDocument, TrendsDocument};

/// Sub-score used when a source is missing or empty.
#[must_use]
pub fn neutral_score() -> Decimal {
    Decimal::new(50, 1)
}

/// Round half-up to one decimal and pin the scale to 1 so scores always
/// serialize with a single decimal place (8 becomes 8.0).
#[must_use]
pub fn round1(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    rounded
}

fn mean<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let mut sum = Decimal::ZERO;
    let mut count = 0i64;
    for value in values {
        sum += value;
        count += 1;
    }
    (count > 0).then(|| sum / Decimal::from(count))
}

/// Search sub-score: mean keyword interest mapped from the 0–100 scale to 0–10.
#[must_use]
pub fn search_score(doc: Option<&TrendsDocument>) -> Decimal {
    let Some(doc) = doc else {
        return neutral_score();
    };
    match mean(doc.keywords.iter().map(|k| k.average_interest)) {
        Some(avg) => round1(avg / Decimal::TEN),
        None => neutral_score(),
    }
}

/// Trend sub-score: mean hashtag relevance mapped from the 0–100 scale to 0–10.
#[must_use]
pub fn trend_score(doc: Option<&TiktokDocument>) -> Decimal {
    let Some(doc) = doc else {
        return neutral_score();
    };
    match mean(doc.trends.hashtags.iter().map(|h| h.relevance_score)) {
        Some(avg) => round1(avg / Decimal::TEN),
        None => neutral_score(),
    }
}

/// Intent sub-score: site conversion rate scaled so 5% conversion saturates
/// the scale, clamped to [0, 10]. A missing overview or a zero rate counts
/// as missing data, not as a zero score.
#[must_use]
pub fn intent_score(doc: Option<&AnalyticsDocument>) -> Decimal {
    let rate = doc
        .and_then(|d| d.overview.as_ref())
        .map(|o| o.conversion_rate)
        .filter(|r| *r > Decimal::ZERO);
    match rate {
        Some(rate) => round1((rate * Decimal::from(200)).clamp(Decimal::ZERO, Decimal::TEN)),
        None => neutral_score(),
    }
}

/// Emotion sub-score: mean topic engagement, already on the 0–10 scale.
#[must_use]
pub fn emotion_score(doc: Option<&MetaDocument>) -> Decimal {
    let Some(doc) = doc else {
        return neutral_score();
    };
    match mean(doc.aggregated_topics.iter().map(|t| t.engagement_score)) {
        Some(avg) => round1(avg),
        None => neutral_score(),
    }
}

/// The signal score set the dashboard renders: four per-source sub-scores
/// plus their rounded mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalScores {
    pub overall: Decimal,
    pub search: Decimal,
    pub trend: Decimal,
    pub intent: Decimal,
    pub emotion: Decimal,
}

impl SignalScores {
    #[must_use]
    pub fn compute(
        trends: Option<&TrendsDocument>,
        tiktok: Option<&TiktokDocument>,
        meta: Option<&MetaDocument>,
        analytics: Option<&AnalyticsDocument>,
    ) -> Self {
        let search = search_score(trends);
        let trend = trend_score(tiktok);
        let intent = intent_score(analytics);
        let emotion = emotion_score(meta);
        let overall = round1((search + trend + intent + emotion) / Decimal::from(4));
        Self {
            overall,
            search,
            trend,
            intent,
            emotion,
        }
    }

    /// All-neutral score set for when nothing could be loaded.
    #[must_use]
    pub fn neutral() -> Self {
        Self::compute(None, None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{
        AnalyticsOverview, HashtagRecord, KeywordRecord, TiktokTrends, TopicRecord, TrendDirection,
    };

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn keyword(name: &str, interest: i64) -> KeywordRecord {
        KeywordRecord {
            keyword: name.to_string(),
            average_interest: Decimal::from(interest),
            peak_score: 0,
            growth_3m: None,
            trend: TrendDirection::Rising,
            top_regions: std::collections::BTreeMap::new(),
        }
    }

    fn trends_doc(keywords: Vec<KeywordRecord>) -> TrendsDocument {
        TrendsDocument {
            timestamp: None,
            region: None,
            category: None,
            source: None,
            keywords,
            metadata: crate::document::DocumentMetadata::default(),
            error: None,
        }
    }

    fn hashtag(tag: &str, relevance: i64) -> HashtagRecord {
        HashtagRecord {
            hashtag: tag.to_string(),
            views: String::new(),
            posts: String::new(),
            growth: None,
            relevance_score: Decimal::from(relevance),
            region: None,
        }
    }

    fn tiktok_doc(hashtags: Vec<HashtagRecord>) -> TiktokDocument {
        TiktokDocument {
            timestamp: None,
            source: None,
            region: None,
            category: None,
            trends: TiktokTrends {
                hashtags,
                sounds: Vec::new(),
                creators: Vec::new(),
            },
            metadata: crate::document::DocumentMetadata::default(),
            error: None,
        }
    }

    fn topic(name: &str, engagement: &str) -> TopicRecord {
        TopicRecord {
            topic: name.to_string(),
            mentions: 0,
            engagement_score: dec(engagement),
            growth: None,
            sentiment: crate::document::Sentiment::Positive,
            top_brands: Vec::new(),
            avg_reactions: None,
            avg_comments: None,
            avg_shares: None,
            discussion_volume: None,
            top_queries: Vec::new(),
        }
    }

    fn meta_doc(topics: Vec<TopicRecord>) -> MetaDocument {
        MetaDocument {
            timestamp: None,
            source: None,
            region: None,
            category: None,
            pages: Vec::new(),
            aggregated_topics: topics,
            metadata: crate::document::DocumentMetadata::default(),
            error: None,
        }
    }

    fn analytics_doc(rate: &str, conversions: u64) -> AnalyticsDocument {
        AnalyticsDocument {
            timestamp: None,
            source: None,
            region: None,
            overview: Some(AnalyticsOverview {
                total_users: 100_000,
                conversions,
                conversion_rate: dec(rate),
                bounce_rate: dec("0.41"),
            }),
            top_pages: Vec::new(),
            search_terms: Vec::new(),
            ecommerce: None,
            metadata: crate::document::DocumentMetadata::default(),
        }
    }

    #[test]
    fn round1_is_half_up() {
        assert_eq!(round1(dec("8.25")), dec("8.3"));
        assert_eq!(round1(dec("8.24")), dec("8.2"));
        assert_eq!(round1(dec("8.249")), dec("8.2"));
        assert_eq!(round1(dec("9.95")), dec("10.0"));
    }

    #[test]
    fn round1_pins_one_decimal_in_json() {
        let json = serde_json::to_string(&round1(dec("8"))).unwrap();
        assert_eq!(json, "8.0");
    }

    #[test]
    fn single_keyword_eighty_scores_eight() {
        let doc = trends_doc(vec![keyword("skincare", 80)]);
        assert_eq!(search_score(Some(&doc)), dec("8.0"));
    }

    #[test]
    fn missing_or_empty_trends_is_neutral() {
        assert_eq!(search_score(None), dec("5.0"));
        let doc = trends_doc(Vec::new());
        assert_eq!(search_score(Some(&doc)), dec("5.0"));
    }

    #[test]
    fn hashtag_pair_ninety_seventy_scores_eight() {
        let doc = tiktok_doc(vec![hashtag("#a", 90), hashtag("#b", 70)]);
        assert_eq!(trend_score(Some(&doc)), dec("8.0"));
    }

    #[test]
    fn conversion_rate_scales_by_two_hundred() {
        let doc = analytics_doc("0.048", 5684);
        assert_eq!(intent_score(Some(&doc)), dec("9.6"));
    }

    #[test]
    fn conversion_rate_clamps_at_ten() {
        let doc = analytics_doc("0.08", 9000);
        assert_eq!(intent_score(Some(&doc)), dec("10.0"));
    }

    #[test]
    fn zero_conversion_rate_counts_as_missing() {
        let doc = analytics_doc("0", 0);
        assert_eq!(intent_score(Some(&doc)), dec("5.0"));
    }

    #[test]
    fn missing_overview_is_neutral() {
        let doc = AnalyticsDocument {
            timestamp: None,
            source: None,
            region: None,
            overview: None,
            top_pages: Vec::new(),
            search_terms: Vec::new(),
            ecommerce: None,
            metadata: crate::document::DocumentMetadata::default(),
        };
        assert_eq!(intent_score(Some(&doc)), dec("5.0"));
    }

    #[test]
    fn emotion_midpoint_rounds_up() {
        // mean(9.2, 7.3) = 8.25, half-up to 8.3
        let doc = meta_doc(vec![topic("Protector Solar", "9.2"), topic("Limpiador", "7.3")]);
        assert_eq!(emotion_score(Some(&doc)), dec("8.3"));
    }

    #[test]
    fn all_missing_yields_all_neutral() {
        let scores = SignalScores::neutral();
        assert_eq!(scores.search, dec("5.0"));
        assert_eq!(scores.trend, dec("5.0"));
        assert_eq!(scores.intent, dec("5.0"));
        assert_eq!(scores.emotion, dec("5.0"));
        assert_eq!(scores.overall, dec("5.0"));
    }

    #[test]
    fn full_bundle_overall_is_mean_of_subscores() {
        // search 8.0, trend 8.0, intent 9.6, emotion 8.3 → mean 8.475 → 8.5
        let trends = trends_doc(vec![keyword("skincare", 80)]);
        let tiktok = tiktok_doc(vec![hashtag("#a", 90), hashtag("#b", 70)]);
        let meta = meta_doc(vec![topic("a", "9.2"), topic("b", "7.3")]);
        let analytics = analytics_doc("0.048", 5684);
        let scores =
            SignalScores::compute(Some(&trends), Some(&tiktok), Some(&meta), Some(&analytics));
        assert_eq!(scores.search, dec("8.0"));
        assert_eq!(scores.trend, dec("8.0"));
        assert_eq!(scores.intent, dec("9.6"));
        assert_eq!(scores.emotion, dec("8.3"));
        assert_eq!(scores.overall, dec("8.5"));
    }

    #[test]
    fn search_score_monotone_in_single_record() {
        let low = trends_doc(vec![keyword("a", 40), keyword("b", 60)]);
        let high = trends_doc(vec![keyword("a", 55), keyword("b", 60)]);
        assert!(search_score(Some(&high)) >= search_score(Some(&low)));
    }

    #[test]
    fn scores_stay_in_range_for_extremes() {
        let maxed = trends_doc(vec![keyword("a", 100)]);
        assert_eq!(search_score(Some(&maxed)), dec("10.0"));
        let floor = trends_doc(vec![keyword("a", 0)]);
        assert_eq!(search_score(Some(&floor)), dec("0.0"));
    }
}
