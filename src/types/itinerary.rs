use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TripError};

/// Structured day-by-day travel plan returned by the itinerary generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Destination city and country (e.g., "Rome, Italy")
    pub destination: String,
    /// Two to three sentence overview of the trip
    pub summary: String,
    /// Recommended hotel zone with reasoning and nightly price range
    pub hotel_zone: HotelZone,
    /// Estimated per-day food spend for the whole party
    pub daily_food_budget: DailyFoodBudget,
    /// Day-by-day plan in calendar order
    #[schemars(length(min = 1))]
    pub days: Vec<Day>,
    /// Packing suggestions; left empty when truncation repair had to drop them
    #[serde(default)]
    pub packing_tips: Vec<String>,
    /// General destination tips; left empty when truncation repair had to drop them
    #[serde(default)]
    pub general_tips: Vec<String>,
}

/// Recommended lodging zone for the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelZone {
    /// Name of the neighborhood or zone
    pub recommended: String,
    /// Why this zone fits the family
    pub reason: String,
    /// Nightly price range (e.g., "$150–$250/night")
    pub price_range: String,
}

/// Daily food budget estimate for the whole party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyFoodBudget {
    /// Total daily amount in the selected currency
    pub amount: f64,
    /// Currency code (e.g., "USD")
    pub currency: String,
    /// Per-meal breakdown (e.g., "Breakfast $20, Lunch $35, Dinner $65")
    pub breakdown: String,
}

/// One itinerary day with its planned activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// 1-based day counter within the itinerary
    pub day_number: u32,
    /// Calendar date string for the day
    pub date: String,
    /// Short catchy theme for the day
    pub theme: String,
    /// Activities in chronological order
    #[schemars(length(min = 1))]
    pub activities: Vec<Activity>,
}

/// A single scheduled activity within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Free-form clock label (e.g., "9:00 AM")
    pub time: String,
    /// Activity or place name
    pub name: String,
    /// Activity category
    #[serde(rename = "type")]
    pub kind: ActivityType,
    /// Free-form duration (e.g., "2 hours")
    pub duration: String,
    /// What to do and why it's worth it
    pub description: String,
    /// Practical insider tip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    /// Estimated cost (e.g., "$25/person")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    /// Whether this entry blocks out nap or rest time
    pub is_nap_block: bool,
    /// Whether this is a local favorite rather than a headline attraction
    pub is_hidden_gem: bool,
}

/// Category of a scheduled activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Attraction,
    Restaurant,
    Nap,
    Travel,
    Hotel,
}

impl Itinerary {
    /// Structural checks the wire schema cannot express: day numbers are
    /// 1-based and sequential, and every day carries at least one activity.
    pub fn check_invariants(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(TripError::Validation(
                "itinerary contains no days".to_string(),
            ));
        }

        for (idx, day) in self.days.iter().enumerate() {
            let expected = idx as u32 + 1;
            if day.day_number != expected {
                return Err(TripError::Validation(format!(
                    "day numbers must be sequential starting at 1: expected {} but found {}",
                    expected, day.day_number
                )));
            }
            if day.activities.is_empty() {
                return Err(TripError::Validation(format!(
                    "day {} has no activities",
                    day.day_number
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_day(day_number: u32) -> Day {
        Day {
            day_number,
            date: "2024-05-01".to_string(),
            theme: "Arrival".to_string(),
            activities: vec![Activity {
                time: "9:00 AM".to_string(),
                name: "Colosseum".to_string(),
                kind: ActivityType::Attraction,
                duration: "2 hours".to_string(),
                description: "Skip-the-line tour".to_string(),
                tip: None,
                cost: None,
                is_nap_block: false,
                is_hidden_gem: false,
            }],
        }
    }

    fn sample_itinerary(days: Vec<Day>) -> Itinerary {
        Itinerary {
            destination: "Rome, Italy".to_string(),
            summary: "Four relaxed days in the centro storico.".to_string(),
            hotel_zone: HotelZone {
                recommended: "Trastevere".to_string(),
                reason: "Walkable and quiet at night".to_string(),
                price_range: "$150–$250/night".to_string(),
            },
            daily_food_budget: DailyFoodBudget {
                amount: 120.0,
                currency: "USD".to_string(),
                breakdown: "Breakfast $20, Lunch $35, Dinner $65".to_string(),
            },
            days,
            packing_tips: vec![],
            general_tips: vec![],
        }
    }

    #[test]
    fn activity_type_uses_lowercase_wire_names() {
        assert_eq!(
            serde_json::to_value(ActivityType::Attraction).unwrap(),
            json!("attraction")
        );
        let parsed: ActivityType = serde_json::from_value(json!("nap")).unwrap();
        assert_eq!(parsed, ActivityType::Nap);
    }

    #[test]
    fn activity_kind_serializes_as_type() {
        let day = sample_day(1);
        let value = serde_json::to_value(&day.activities[0]).unwrap();
        assert_eq!(value["type"], "attraction");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn missing_tip_arrays_default_to_empty() {
        let value = json!({
            "destination": "Rome, Italy",
            "summary": "Short trip.",
            "hotelZone": {
                "recommended": "Trastevere",
                "reason": "Walkable",
                "priceRange": "$150–$250/night"
            },
            "dailyFoodBudget": {
                "amount": 120,
                "currency": "USD",
                "breakdown": "Breakfast $20, Lunch $35, Dinner $65"
            },
            "days": [serde_json::to_value(sample_day(1)).unwrap()]
        });

        let itinerary: Itinerary = serde_json::from_value(value).unwrap();
        assert!(itinerary.packing_tips.is_empty());
        assert!(itinerary.general_tips.is_empty());
    }

    #[test]
    fn invariants_accept_sequential_days() {
        let itinerary = sample_itinerary(vec![sample_day(1), sample_day(2)]);
        assert!(itinerary.check_invariants().is_ok());
    }

    #[test]
    fn invariants_reject_duplicate_day_numbers() {
        let itinerary = sample_itinerary(vec![sample_day(1), sample_day(1)]);
        assert!(itinerary.check_invariants().is_err());
    }

    #[test]
    fn invariants_reject_empty_activities() {
        let mut day = sample_day(1);
        day.activities.clear();
        let itinerary = sample_itinerary(vec![day]);
        assert!(itinerary.check_invariants().is_err());
    }
}
