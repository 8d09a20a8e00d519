use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use crate::{error::TripError, schemas::SchemaHandle};

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validate a decoded payload against a schema before typed deserialization.
pub(crate) fn validate_payload(
    schema: &SchemaHandle,
    payload: &Value,
) -> std::result::Result<(), TripError> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| {
            TripError::Validation(format!(
                "Failed to prepare `{}` schema for validation: {}",
                schema.schema_name(),
                err
            ))
        })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(TripError::Validation(format!(
            "Payload does not match `{}` schema: {}",
            schema.schema_name(),
            detail_str
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::itinerary_schema;
    use serde_json::json;

    #[test]
    fn rejects_payload_missing_required_keys() {
        let payload = json!({ "destination": "Rome, Italy" });
        let err = validate_payload(itinerary_schema(), &payload).unwrap_err();
        assert!(err.to_string().contains("Itinerary"));
    }

    #[test]
    fn reports_the_failing_path() {
        let payload = json!({
            "destination": "Rome, Italy",
            "summary": "Short trip.",
            "hotelZone": {
                "recommended": "Trastevere",
                "reason": "Walkable",
                "priceRange": "$150–$250/night"
            },
            "dailyFoodBudget": {
                "amount": "not-a-number",
                "currency": "USD",
                "breakdown": "Breakfast $20"
            },
            "days": [],
            "packingTips": [],
            "generalTips": []
        });

        let err = validate_payload(itinerary_schema(), &payload).unwrap_err();
        assert!(err.to_string().contains("dailyFoodBudget"));
    }
}
