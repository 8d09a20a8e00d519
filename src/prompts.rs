//! Prompt construction for the itinerary generation call.

use chrono::NaiveDate;

use crate::{
    error::{Result, TripError},
    types::TripInput,
};

/// System prompt establishing the planner persona and the JSON-only contract.
pub fn build_system_prompt() -> &'static str {
    "You are TripCraft, an expert family travel planner. You create detailed, realistic day-by-day itineraries optimized for families with children.\n\
\n\
Your itineraries should:\n\
- Balance famous tourist attractions with authentic hidden gems locals love\n\
- Consider children's energy levels (morning = high energy activities, afternoon = calmer)\n\
- Include specific restaurant recommendations with cuisine type and price range\n\
- Recommend hotel zones with reasoning (proximity, family-friendliness, safety)\n\
- Provide practical tips for each activity (best time to arrive, what to skip, insider advice)\n\
- Account for travel time between locations\n\
\n\
ALWAYS respond with ONLY a valid JSON object. No markdown, no explanation, no code fences — just raw JSON."
}

/// Number of calendar days the trip spans, inclusive of both endpoints.
pub fn trip_day_count(start_date: &str, end_date: &str) -> Result<i64> {
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;
    let days = (end - start).num_days() + 1;
    if days < 1 {
        return Err(TripError::Validation(format!(
            "end date {} precedes start date {}",
            end_date, start_date
        )));
    }
    Ok(days)
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| TripError::Validation(format!("invalid date `{}`: {}", value, err)))
}

/// User prompt describing the trip and the exact JSON shape to return.
pub fn build_trip_prompt(input: &TripInput) -> Result<String> {
    let num_days = trip_day_count(&input.start_date, &input.end_date)?;
    let has_kids = !input.kids_ages.is_empty();
    let has_young_kids = input.has_young_kids();

    let kids_desc = if input.kids_ages.is_empty() {
        "no children".to_string()
    } else {
        let ages: Vec<String> = input.kids_ages.iter().map(|age| age.to_string()).collect();
        format!(
            "{} child{} (ages: {})",
            input.kids_ages.len(),
            if input.kids_ages.len() > 1 { "ren" } else { "" },
            ages.join(", ")
        )
    };

    let nap_section = match (&input.nap_start, &input.nap_end) {
        (Some(start), Some(end)) if has_young_kids => format!(
            "IMPORTANT: Children need a nap from {} to {}. Block this time as \"Nap Time / Hotel Rest\" and do NOT schedule activities during this window.",
            start, end
        ),
        _ => String::new(),
    };

    let interests = if input.interests.is_empty() {
        "general sightseeing, food, culture".to_string()
    } else {
        input.interests.join(", ")
    };

    let nap_block_line = if has_young_kids {
        "Mark nap/rest blocks with \"isNapBlock\": true."
    } else {
        ""
    };
    let kids_line = if has_kids {
        "Include kid-friendly descriptions and highlight which activities children will love."
    } else {
        ""
    };

    Ok(format!(
        r#"Create a complete family trip itinerary for the following:

DESTINATION: {destination}
DATES: {start_date} to {end_date} ({num_days} days)
TRAVELERS: {adults} adult{adults_plural}, {kids_desc}
BUDGET: {budget}
INTERESTS: {interests}
{nap_section}

Return a JSON object with this EXACT structure:

{{
  "destination": "City, Country",
  "summary": "2-3 sentence overview of the trip",
  "hotelZone": {{
    "recommended": "Name of neighborhood/zone",
    "reason": "Why this zone is best for this family",
    "priceRange": "e.g. $150–$250/night"
  }},
  "dailyFoodBudget": {{
    "amount": 120,
    "currency": "USD",
    "breakdown": "Breakfast $20, Lunch $35, Dinner $65"
  }},
  "days": [
    {{
      "dayNumber": 1,
      "date": "{start_date}",
      "theme": "Short catchy theme for the day",
      "activities": [
        {{
          "time": "9:00 AM",
          "name": "Activity or place name",
          "type": "attraction|restaurant|nap|travel|hotel",
          "duration": "2 hours",
          "description": "What to do and why it's great",
          "tip": "Practical insider tip",
          "cost": "$25/person",
          "isNapBlock": false,
          "isHiddenGem": false
        }}
      ]
    }}
  ],
  "packingTips": ["tip1", "tip2", "tip3"],
  "generalTips": ["tip1", "tip2", "tip3"]
}}

Include {num_days} days total. Each day should have 4–7 activities.
{nap_block_line}
Mark hidden gems (local favorites, off-the-beaten-path spots) with "isHiddenGem": true.
Make it feel like advice from a local friend who knows the best spots.
{kids_line}"#,
        destination = input.destination,
        start_date = input.start_date,
        end_date = input.end_date,
        num_days = num_days,
        adults = input.adults,
        adults_plural = if input.adults > 1 { "s" } else { "" },
        kids_desc = kids_desc,
        budget = input.budget.description(),
        interests = interests,
        nap_section = nap_section,
        nap_block_line = nap_block_line,
        kids_line = kids_line,
    ))
}
