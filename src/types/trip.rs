use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Traveler preferences captured by the trip form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripInput {
    /// Destination city or region
    pub destination: String,
    /// ISO-8601 start date (e.g., "2024-05-01")
    pub start_date: String,
    /// ISO-8601 end date, inclusive
    pub end_date: String,
    /// Number of adults traveling
    pub adults: u32,
    /// Ages of accompanying children, empty when traveling without kids
    #[serde(default)]
    pub kids_ages: Vec<u8>,
    /// Spending tier used to calibrate food and lodging suggestions
    pub budget: Budget,
    /// Interests to weight the plan toward (museums, food, beaches, ...)
    #[serde(default)]
    pub interests: Vec<String>,
    /// Daily nap window start (e.g., "1:00 PM"), honored for children under 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap_start: Option<String>,
    /// Daily nap window end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap_end: Option<String>,
}

impl TripInput {
    /// Whether any accompanying child is young enough to need a nap block.
    pub fn has_young_kids(&self) -> bool {
        self.kids_ages.iter().any(|age| *age < 5)
    }
}

/// Spending tier for the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Budget,
    #[default]
    Moderate,
    Luxury,
}

impl Budget {
    /// Human-readable description injected into the trip prompt.
    pub fn description(&self) -> &'static str {
        match self {
            Budget::Budget => "budget-friendly (under $100/day for food)",
            Budget::Moderate => "moderate ($100–$250/day for food)",
            Budget::Luxury => "luxury ($250+/day for food)",
        }
    }
}

impl FromStr for Budget {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "budget" => Ok(Budget::Budget),
            "moderate" => Ok(Budget::Moderate),
            "luxury" => Ok(Budget::Luxury),
            other => Err(format!(
                "unknown budget tier `{other}` (expected budget, moderate, or luxury)"
            )),
        }
    }
}
