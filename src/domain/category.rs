use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse business classification used to gate the optional platforms.
///
/// Derived once per request from the business name and any category tags;
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BusinessCategory {
    Accommodation,
    FoodBeverage,
    Attractions,
    ConstructionTrades,
    Automotive,
    BeautyWellness,
    HomeServices,
    EstateAgents,
    ProfessionalServices,
    Healthcare,
    Retail,
    Education,
    Childcare,
    #[default]
    General,
}

impl BusinessCategory {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accommodation => "accommodation",
            Self::FoodBeverage => "food_beverage",
            Self::Attractions => "attractions",
            Self::ConstructionTrades => "construction_trades",
            Self::Automotive => "automotive",
            Self::BeautyWellness => "beauty_wellness",
            Self::HomeServices => "home_services",
            Self::EstateAgents => "estate_agents",
            Self::ProfessionalServices => "professional_services",
            Self::Healthcare => "healthcare",
            Self::Retail => "retail",
            Self::Education => "education",
            Self::Childcare => "childcare",
            Self::General => "general",
        }
    }

    /// Hospitality & leisure businesses get TripAdvisor.
    #[must_use]
    pub const fn is_hospitality(&self) -> bool {
        matches!(
            self,
            Self::Accommodation | Self::FoodBeverage | Self::Attractions
        )
    }

    /// Trades & services get the UK trade directories.
    #[must_use]
    pub const fn is_trade(&self) -> bool {
        matches!(
            self,
            Self::ConstructionTrades | Self::Automotive | Self::BeautyWellness | Self::HomeServices
        )
    }
}

impl fmt::Display for BusinessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&BusinessCategory::ConstructionTrades).unwrap();
        assert_eq!(json, "\"construction_trades\"");
        assert_eq!(
            BusinessCategory::FoodBeverage.to_string(),
            "food_beverage"
        );
    }

    #[test]
    fn test_trade_and_hospitality_are_disjoint() {
        for category in [
            BusinessCategory::Accommodation,
            BusinessCategory::FoodBeverage,
            BusinessCategory::Attractions,
            BusinessCategory::ConstructionTrades,
            BusinessCategory::Automotive,
            BusinessCategory::BeautyWellness,
            BusinessCategory::HomeServices,
            BusinessCategory::EstateAgents,
            BusinessCategory::General,
        ] {
            assert!(!(category.is_trade() && category.is_hospitality()));
        }
        assert!(!BusinessCategory::General.is_trade());
        assert!(!BusinessCategory::General.is_hospitality());
    }
}
