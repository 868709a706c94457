//! Declarative per-platform descriptor table.
//!
//! Everything that differs between platforms (accepted result domains,
//! on-site link rules, eligibility, how a URL becomes an entry) is a
//! `match` on [`Platform`] here. The resolver pipeline itself has no
//! platform-specific branches.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::BusinessCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Google,
    Facebook,
    Instagram,
    Tiktok,
    Twitter,
    Youtube,
    Linkedin,
    Tripadvisor,
    Trustpilot,
    Yell,
    Checkatrade,
    Ratedpeople,
    Trustatrader,
}

/// When a platform is worth querying for a business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Links are synthesized, never discovered.
    Constructed,
    Always,
    Hospitality,
    Trade,
}

/// How a discovered URL populates the platform entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryShape {
    Profile,
    /// `reviewUrl` is `{profile}/reviews`.
    ProfileWithReviews,
    /// `profileUrl` and `reviewUrl` carry the same value.
    ProfileIsReview,
}

/// How an on-site anchor is turned into a candidate URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkShaping {
    /// Keep the full resolved URL.
    Resolved,
    /// Drop query string and fragment.
    StripQuery,
    /// Canonical `www.linkedin.com` form.
    LinkedIn,
    /// Only channel pages qualify, single videos are skipped.
    Channel,
}

#[derive(Debug, Clone, Copy)]
pub struct LinkRule {
    pub patterns: &'static [&'static str],
    pub shaping: LinkShaping,
}

impl Platform {
    pub const ALL: [Self; 13] = [
        Self::Google,
        Self::Facebook,
        Self::Instagram,
        Self::Tiktok,
        Self::Twitter,
        Self::Youtube,
        Self::Linkedin,
        Self::Tripadvisor,
        Self::Trustpilot,
        Self::Yell,
        Self::Checkatrade,
        Self::Ratedpeople,
        Self::Trustatrader,
    ];

    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Tiktok => "tiktok",
            Self::Twitter => "twitter",
            Self::Youtube => "youtube",
            Self::Linkedin => "linkedin",
            Self::Tripadvisor => "tripadvisor",
            Self::Trustpilot => "trustpilot",
            Self::Yell => "yell",
            Self::Checkatrade => "checkatrade",
            Self::Ratedpeople => "ratedpeople",
            Self::Trustatrader => "trustatrader",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Tiktok => "TikTok",
            Self::Twitter => "X / Twitter",
            Self::Youtube => "YouTube",
            Self::Linkedin => "LinkedIn",
            Self::Tripadvisor => "TripAdvisor",
            Self::Trustpilot => "Trustpilot",
            Self::Yell => "Yell",
            Self::Checkatrade => "Checkatrade",
            Self::Ratedpeople => "Rated People",
            Self::Trustatrader => "TrustATrader",
        }
    }

    #[must_use]
    pub const fn eligibility(&self) -> Eligibility {
        match self {
            Self::Google => Eligibility::Constructed,
            Self::Tripadvisor => Eligibility::Hospitality,
            Self::Yell | Self::Checkatrade | Self::Ratedpeople | Self::Trustatrader => {
                Eligibility::Trade
            }
            _ => Eligibility::Always,
        }
    }

    /// Whether the resolver should attempt discovery for this category.
    #[must_use]
    pub const fn is_eligible(&self, category: BusinessCategory) -> bool {
        match self.eligibility() {
            Eligibility::Constructed => false,
            Eligibility::Always => true,
            Eligibility::Hospitality => category.is_hospitality(),
            Eligibility::Trade => category.is_trade(),
        }
    }

    /// Platforms a request for `category` will actually query.
    #[must_use]
    pub fn plan_for(category: BusinessCategory) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|p| p.is_eligible(category))
            .collect()
    }

    #[must_use]
    pub const fn entry_shape(&self) -> EntryShape {
        match self {
            Self::Facebook => EntryShape::ProfileWithReviews,
            Self::Tripadvisor
            | Self::Trustpilot
            | Self::Yell
            | Self::Checkatrade
            | Self::Ratedpeople
            | Self::Trustatrader => EntryShape::ProfileIsReview,
            _ => EntryShape::Profile,
        }
    }

    /// Review directories whose on-site links still get a content check.
    #[must_use]
    pub const fn rechecks_scraped(&self) -> bool {
        matches!(
            self,
            Self::Trustpilot | Self::Yell | Self::Checkatrade | Self::Ratedpeople | Self::Trustatrader
        )
    }

    #[must_use]
    pub const fn link_rule(&self) -> Option<LinkRule> {
        const fn rule(patterns: &'static [&'static str], shaping: LinkShaping) -> Option<LinkRule> {
            Some(LinkRule { patterns, shaping })
        }

        match self {
            Self::Google | Self::Tripadvisor => None,
            Self::Facebook => rule(&["facebook.com/", "fb.com/"], LinkShaping::StripQuery),
            Self::Instagram => rule(&["instagram.com/"], LinkShaping::Resolved),
            Self::Twitter => rule(&["twitter.com/", "x.com/"], LinkShaping::Resolved),
            Self::Youtube => rule(&["youtube.com/", "youtu.be/"], LinkShaping::Channel),
            Self::Tiktok => rule(&["tiktok.com/"], LinkShaping::Resolved),
            Self::Linkedin => rule(&["linkedin.com/"], LinkShaping::LinkedIn),
            Self::Trustpilot => rule(&["trustpilot.com/review/"], LinkShaping::Resolved),
            Self::Checkatrade => rule(&["checkatrade.com/trades/"], LinkShaping::Resolved),
            Self::Ratedpeople => rule(
                &["ratedpeople.com/tradesman/", "ratedpeople.com/profile/"],
                LinkShaping::Resolved,
            ),
            Self::Trustatrader => rule(&["trustatrader.com/trader/"], LinkShaping::Resolved),
            Self::Yell => rule(&["yell.com/biz/"], LinkShaping::Resolved),
        }
    }

    /// Lower-cased substrings a web-search result link must contain.
    #[must_use]
    pub const fn search_domains(&self) -> &'static [&'static str] {
        match self {
            Self::Google => &[],
            Self::Facebook => &["facebook.com/", "fb.com/"],
            Self::Instagram => &["instagram.com/"],
            Self::Twitter => &["twitter.com/", "x.com/"],
            Self::Youtube => &[
                "youtube.com/channel/",
                "youtube.com/c/",
                "youtube.com/user/",
                "youtube.com/@",
            ],
            Self::Tiktok => &["tiktok.com/@"],
            Self::Linkedin => &["linkedin.com/company/", "linkedin.com/in/"],
            Self::Trustpilot => &["trustpilot.com/review/", "uk.trustpilot.com/review/"],
            Self::Tripadvisor => &[
                "tripadvisor.com/restaurant_review",
                "tripadvisor.com/hotel_review",
                "tripadvisor.com/attraction_review",
                "tripadvisor.co.uk/restaurant_review",
                "tripadvisor.co.uk/hotel_review",
                "tripadvisor.co.uk/attraction_review",
            ],
            Self::Yell => &["yell.com/biz/"],
            Self::Checkatrade => &["checkatrade.com/trades/"],
            Self::Ratedpeople => &["ratedpeople.com/tradesman/", "ratedpeople.com/profile/"],
            Self::Trustatrader => &["trustatrader.com/trader/"],
        }
    }

    /// Public search page for a review directory, shown when nothing verified
    /// was found. Returns `(search_url, note)`.
    #[must_use]
    pub fn search_fallback(&self, business_name: &str, address: Option<&str>) -> Option<(String, String)> {
        let name = urlencoding::encode(business_name);
        let with_address = || {
            address
                .filter(|a| !a.trim().is_empty())
                .map(|a| format!("{name}+{}", urlencoding::encode(a)))
                .unwrap_or_else(|| name.to_string())
        };

        let url = match self {
            Self::Tripadvisor => format!("https://www.tripadvisor.com/Search?q={}", with_address()),
            Self::Trustpilot => format!("https://www.trustpilot.com/search?query={name}"),
            Self::Yell => format!("https://www.yell.com/search/uk?query={}", with_address()),
            Self::Checkatrade => format!("https://www.checkatrade.com/search?query={name}"),
            Self::Ratedpeople => format!(
                "https://www.ratedpeople.com/search/{}",
                business_name.split_whitespace().collect::<Vec<_>>().join("-")
            ),
            Self::Trustatrader => format!("https://www.trustatrader.com/search?query={name}"),
            _ => return None,
        };

        Some((url, format!("Search {} for this business", self.label())))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_plan_skips_tripadvisor() {
        let plan = Platform::plan_for(BusinessCategory::ConstructionTrades);
        for p in [
            Platform::Yell,
            Platform::Checkatrade,
            Platform::Ratedpeople,
            Platform::Trustatrader,
        ] {
            assert!(plan.contains(&p), "{p} should be attempted");
        }
        assert!(!plan.contains(&Platform::Tripadvisor));
        assert!(!plan.contains(&Platform::Google));
    }

    #[test]
    fn test_food_plan_has_tripadvisor_only() {
        let plan = Platform::plan_for(BusinessCategory::FoodBeverage);
        assert!(plan.contains(&Platform::Tripadvisor));
        for p in [
            Platform::Yell,
            Platform::Checkatrade,
            Platform::Ratedpeople,
            Platform::Trustatrader,
        ] {
            assert!(!plan.contains(&p), "{p} should be skipped");
        }
    }

    #[test]
    fn test_always_platforms_in_every_plan() {
        let plan = Platform::plan_for(BusinessCategory::General);
        assert_eq!(
            plan,
            vec![
                Platform::Facebook,
                Platform::Instagram,
                Platform::Tiktok,
                Platform::Twitter,
                Platform::Youtube,
                Platform::Linkedin,
                Platform::Trustpilot,
            ]
        );
    }

    #[test]
    fn test_search_fallback_only_for_directories() {
        let (url, note) = Platform::Yell
            .search_fallback("Blue Moon", Some("Leeds"))
            .unwrap();
        assert_eq!(url, "https://www.yell.com/search/uk?query=Blue%20Moon+Leeds");
        assert_eq!(note, "Search Yell for this business");

        let (url, _) = Platform::Ratedpeople.search_fallback("Blue Moon", None).unwrap();
        assert_eq!(url, "https://www.ratedpeople.com/search/Blue-Moon");

        assert!(Platform::Facebook.search_fallback("Blue Moon", None).is_none());
        assert!(Platform::Google.search_fallback("Blue Moon", None).is_none());
    }

    #[test]
    fn test_search_domains_are_lowercase() {
        for p in Platform::ALL {
            for d in p.search_domains() {
                assert_eq!(*d, d.to_lowercase());
            }
        }
    }
}
