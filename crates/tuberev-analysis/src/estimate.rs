//! Revenue estimation from a fixed table of category and tier assumptions.
//!
//! Everything here is configuration data, not behavior: the CPM keyword
//! rules, subscriber tiers, and named constants live in one overridable
//! [`RevenueAssumptions`] value so alternate assumptions are testable.
//! The arithmetic is a deterministic lookup-and-multiply, nothing learned.

use serde::{Deserialize, Serialize};

use tuberev_core::{AggregateStats, ChannelSummary, RevenueEstimate};

/// One CPM inference rule: if any keyword appears in the channel description
/// (case-insensitive substring), the category and CPM apply. Rules are
/// checked in order; the first match wins, so table order is part of the
/// contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpmRule {
    pub keywords: Vec<String>,
    pub category: String,
    pub cpm: f64,
}

/// One subscriber-count bracket with a sponsorship rate per subscriber and
/// a descriptive label. Brackets are checked top-down, so they must be
/// listed with descending `min_subscribers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberTier {
    pub min_subscribers: u64,
    pub annual_rate_per_subscriber: f64,
    pub label: String,
}

/// The full assumption table behind the estimate. `Default` carries the
/// source constants (KRW).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueAssumptions {
    pub cpm_rules: Vec<CpmRule>,
    pub default_category: String,
    pub default_cpm: f64,
    pub tiers: Vec<SubscriberTier>,
    /// Assumed uploads per month when projecting ad views.
    pub monthly_upload_count: f64,
    /// Share of subscribers assumed to convert to paid membership.
    pub membership_conversion_rate: f64,
    /// Monthly membership fee per converted subscriber.
    pub membership_fee: f64,
    /// Channels below this subscriber count earn no membership revenue.
    pub membership_min_subscribers: u64,
}

impl Default for RevenueAssumptions {
    fn default() -> Self {
        let rule = |keywords: &[&str], category: &str, cpm: f64| CpmRule {
            keywords: keywords.iter().map(|k| (*k).to_owned()).collect(),
            category: category.to_owned(),
            cpm,
        };
        let tier = |min: u64, rate: f64, label: &str| SubscriberTier {
            min_subscribers: min,
            annual_rate_per_subscriber: rate,
            label: label.to_owned(),
        };

        Self {
            cpm_rules: vec![
                rule(
                    &["프로그래밍", "코딩", "programming", "coding"],
                    "education/programming",
                    3500.0,
                ),
                rule(&["게임", "game"], "gaming", 1800.0),
                rule(&["리뷰", "review"], "review", 2500.0),
            ],
            default_category: "general".to_owned(),
            default_cpm: 2000.0,
            tiers: vec![
                tier(1_000_000, 150.0, "mega influencer"),
                tier(100_000, 100.0, "macro influencer"),
                tier(10_000, 50.0, "micro influencer"),
                tier(1_000, 20.0, "nano influencer"),
            ],
            monthly_upload_count: 8.0,
            membership_conversion_rate: 0.01,
            membership_fee: 4900.0,
            membership_min_subscribers: 1_000,
        }
    }
}

impl RevenueAssumptions {
    /// Infers the content category and CPM from the channel description.
    /// First matching rule wins; no match falls through to the default.
    fn category_for(&self, description: &str) -> (&str, f64) {
        let haystack = description.to_lowercase();
        for rule in &self.cpm_rules {
            if rule
                .keywords
                .iter()
                .any(|k| haystack.contains(&k.to_lowercase()))
            {
                return (&rule.category, rule.cpm);
            }
        }
        (&self.default_category, self.default_cpm)
    }

    /// Maps a subscriber count to its tier. Counts below every bracket get
    /// a zero-rate "new creator" placement.
    fn tier_for(&self, subscribers: u64) -> (&str, f64) {
        for tier in &self.tiers {
            if subscribers >= tier.min_subscribers {
                return (&tier.label, tier.annual_rate_per_subscriber);
            }
        }
        ("new creator", 0.0)
    }
}

/// Applies the assumption table to the aggregated statistics.
///
/// Pure function of its inputs:
///
/// - `monthly_ad_revenue = (average_views × monthly_upload_count / 1000) × cpm`
/// - `monthly_sponsorship = subscriber_count × tier_rate / 12`
/// - `monthly_membership = subscriber_count × conversion × fee` above the
///   eligibility threshold, else 0
/// - `annual_estimate = total_monthly × 12`
#[must_use]
pub fn estimate(
    summary: &ChannelSummary,
    stats: &AggregateStats,
    assumptions: &RevenueAssumptions,
) -> RevenueEstimate {
    let (category, cpm) = assumptions.category_for(&summary.description);
    let (tier_label, tier_rate) = assumptions.tier_for(summary.subscriber_count);

    #[allow(clippy::cast_precision_loss)]
    let subscribers = summary.subscriber_count as f64;

    let monthly_ad_revenue =
        (stats.average_views * assumptions.monthly_upload_count / 1000.0) * cpm;
    let monthly_sponsorship = subscribers * tier_rate / 12.0;
    let monthly_membership = if summary.subscriber_count >= assumptions.membership_min_subscribers {
        subscribers * assumptions.membership_conversion_rate * assumptions.membership_fee
    } else {
        0.0
    };

    let total_monthly = monthly_ad_revenue + monthly_sponsorship + monthly_membership;

    RevenueEstimate {
        category: category.to_owned(),
        applied_cpm: cpm,
        subscriber_tier: tier_label.to_owned(),
        monthly_ad_revenue,
        monthly_sponsorship,
        monthly_membership,
        total_monthly,
        annual_estimate: total_monthly * 12.0,
    }
}
