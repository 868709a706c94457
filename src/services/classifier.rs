//! Business classification.
//!
//! Ordered rule list, first match wins. Hospitality rules come before the
//! trade rules so that e.g. "Garden Restaurant" lands in food & beverage
//! instead of being picked up by the landscaping keywords.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::BusinessCategory;

struct Rule {
    category: BusinessCategory,
    /// Exact (lower-cased) category tags, e.g. place types.
    tags: &'static [&'static str],
    /// Case-insensitive alternation matched against the business name.
    name_pattern: Option<&'static str>,
}

const RULES: &[Rule] = &[
    Rule {
        category: BusinessCategory::Accommodation,
        tags: &["lodging", "hotel", "motel", "rv_park", "campground"],
        name_pattern: Some(
            r"hotel|motel|guest ?house|bed and breakfast|b&b|\bbnb\b|\binns?\b|\blodge\b|hostel",
        ),
    },
    Rule {
        category: BusinessCategory::FoodBeverage,
        tags: &[
            "restaurant",
            "cafe",
            "bar",
            "meal_takeaway",
            "meal_delivery",
            "bakery",
            "food",
        ],
        name_pattern: Some(r"restaurant|\bcaf[eé]|\bpubs?\b|bistro|eatery|takeaway|brasserie|\bdiner\b"),
    },
    Rule {
        category: BusinessCategory::Attractions,
        tags: &[
            "tourist_attraction",
            "museum",
            "park",
            "zoo",
            "aquarium",
            "amusement_park",
        ],
        name_pattern: None,
    },
    Rule {
        category: BusinessCategory::ConstructionTrades,
        tags: &[
            "plumber",
            "electrician",
            "roofing_contractor",
            "general_contractor",
            "painter",
            "carpenter",
            "hvac_contractor",
        ],
        name_pattern: Some(
            r"plumber|plumbing|electrician|electrical contractor|builder|building services|contractor|roofer|roofing|carpenter|joiner|joinery|gas engineer|heating engineer|landscap|gardener|plasterer|decorator|tiler",
        ),
    },
    Rule {
        category: BusinessCategory::Automotive,
        tags: &["car_repair", "car_dealer", "car_wash", "auto_body_shop"],
        name_pattern: Some(r"garage|mechanic|car repair|auto repair|\bmot\b|\btyres?\b|bodywork"),
    },
    Rule {
        category: BusinessCategory::BeautyWellness,
        tags: &["beauty_salon", "hair_care", "spa", "nail_salon"],
        name_pattern: Some(r"salon|hairdresser|barber|beauty|\bspa\b|\bnails?\b"),
    },
    Rule {
        category: BusinessCategory::HomeServices,
        tags: &[
            "locksmith",
            "moving_company",
            "pest_control_service",
            "cleaning_service",
        ],
        name_pattern: Some(r"locksmith|removals|pest control|cleaning|cleaners?\b"),
    },
    Rule {
        category: BusinessCategory::EstateAgents,
        tags: &["real_estate_agency", "real_estate_agent"],
        name_pattern: Some(r"estate agent|letting|property|realty"),
    },
    Rule {
        category: BusinessCategory::ProfessionalServices,
        tags: &["lawyer", "accounting", "insurance_agency", "finance"],
        name_pattern: Some(r"solicitor|lawyer|accountant|insurance|financial advis"),
    },
    Rule {
        category: BusinessCategory::Healthcare,
        tags: &[
            "dentist",
            "doctor",
            "physiotherapist",
            "hospital",
            "pharmacy",
            "veterinary_care",
        ],
        name_pattern: Some(r"doctor|dentist|dental|medical|clinic|\bvets?\b|veterinary|physio"),
    },
    Rule {
        category: BusinessCategory::Retail,
        tags: &[
            "store",
            "shopping_mall",
            "department_store",
            "clothing_store",
            "shoe_store",
            "jewelry_store",
            "electronics_store",
            "book_store",
            "furniture_store",
            "home_goods_store",
            "hardware_store",
            "pet_store",
            "florist",
        ],
        name_pattern: Some(r"shop|store|retail|boutique"),
    },
    Rule {
        category: BusinessCategory::Education,
        tags: &[
            "school",
            "university",
            "library",
            "primary_school",
            "secondary_school",
        ],
        name_pattern: Some(r"school|college|university|education|academy"),
    },
    Rule {
        category: BusinessCategory::Childcare,
        tags: &["child_care", "day_care"],
        name_pattern: Some(r"nursery|daycare|childcare|pre-?school"),
    },
];

fn compiled_rules() -> &'static [(BusinessCategory, &'static [&'static str], Option<Regex>)] {
    static RULES_RE: OnceLock<Vec<(BusinessCategory, &'static [&'static str], Option<Regex>)>> =
        OnceLock::new();
    RULES_RE.get_or_init(|| {
        RULES
            .iter()
            .map(|rule| {
                let re = rule.name_pattern.map(|p| {
                    Regex::new(&format!("(?i){p}")).expect("Invalid regex pattern defined in code")
                });
                (rule.category, rule.tags, re)
            })
            .collect()
    })
}

/// Maps a business name and optional category tags to a [`BusinessCategory`].
#[must_use]
pub fn classify(name: &str, tags: &[String]) -> BusinessCategory {
    let tags: Vec<String> = tags.iter().map(|t| t.trim().to_lowercase()).collect();
    let name = name.trim();

    compiled_rules()
        .iter()
        .find(|(_, rule_tags, re)| {
            tags.iter().any(|t| rule_tags.contains(&t.as_str()))
                || re.as_ref().is_some_and(|re| re.is_match(name))
        })
        .map_or(BusinessCategory::General, |(category, _, _)| *category)
}

#[must_use]
pub fn is_trade_business(name: &str, tags: &[String]) -> bool {
    classify(name, tags).is_trade()
}

#[must_use]
pub fn is_hospitality_business(name: &str, tags: &[String]) -> bool {
    classify(name, tags).is_hospitality()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_classify_by_name() {
        let cases = [
            ("Blue Moon Plumbing Ltd", BusinessCategory::ConstructionTrades),
            ("The Grand Hotel", BusinessCategory::Accommodation),
            ("Blue Moon Cafe", BusinessCategory::FoodBeverage),
            ("Smith & Sons Garage", BusinessCategory::Automotive),
            ("Glamour Hair Salon", BusinessCategory::BeautyWellness),
            ("Ace Locksmith", BusinessCategory::HomeServices),
            ("Prime Property Lettings", BusinessCategory::EstateAgents),
            ("Jones Solicitors", BusinessCategory::ProfessionalServices),
            ("Bright Smile Dental", BusinessCategory::Healthcare),
            ("Corner Gift Shop", BusinessCategory::Retail),
            ("Riverside Academy", BusinessCategory::Education),
            ("Little Stars Nursery", BusinessCategory::Childcare),
            ("Acme Holdings", BusinessCategory::General),
        ];
        for (name, expected) in cases {
            assert_eq!(classify(name, &[]), expected, "{name}");
        }
    }

    #[test]
    fn test_hospitality_checked_before_trades() {
        assert_eq!(
            classify("Garden Restaurant", &[]),
            BusinessCategory::FoodBeverage
        );
        assert_eq!(
            classify("Greenleaf Landscaping", &[]),
            BusinessCategory::ConstructionTrades
        );
    }

    #[test]
    fn test_short_keywords_need_word_boundaries() {
        assert_eq!(classify("Remote Promotions", &[]), BusinessCategory::General);
        assert_eq!(classify("Open Space Studio", &[]), BusinessCategory::General);
        assert_eq!(classify("Velvet Lounge", &[]), BusinessCategory::General);
        assert_eq!(classify("Kings Head Pub", &[]), BusinessCategory::FoodBeverage);
        assert_eq!(classify("Quick MOT Centre", &[]), BusinessCategory::Automotive);
    }

    #[test]
    fn test_tags_win_over_generic_name() {
        assert_eq!(
            classify("Acme", &tags(&["Plumber", "point_of_interest"])),
            BusinessCategory::ConstructionTrades
        );
        assert_eq!(
            classify("Acme", &tags(&["museum"])),
            BusinessCategory::Attractions
        );
        assert_eq!(
            classify("Acme Builders", &tags(&["restaurant"])),
            BusinessCategory::FoodBeverage
        );
    }

    #[test]
    fn test_predicates_follow_category() {
        assert!(is_trade_business("Blue Moon Plumbing Ltd", &[]));
        assert!(!is_hospitality_business("Blue Moon Plumbing Ltd", &[]));
        assert!(is_hospitality_business("Seaview Guest House", &[]));
        assert!(!is_trade_business("Seaview Guest House", &[]));
        assert!(!is_trade_business("Jones Solicitors", &[]));
        assert!(!is_hospitality_business("Jones Solicitors", &[]));
    }
}
