use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tripcraft_rs::{
    Budget, CompletionBackend, CompletionRequest, Planner, Result, TripError, TripInput,
};

/// Backend returning a canned response while capturing the request it saw.
#[derive(Debug)]
struct StubBackend {
    response: String,
    seen: Mutex<Option<CompletionRequest>>,
}

impl StubBackend {
    fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            seen: Mutex::new(None),
        }
    }
}

/// Shareable handle around `StubBackend`. A newtype is required because the
/// orphan rule forbids implementing the foreign `CompletionBackend` trait for
/// the foreign `Arc<_>` type directly from this integration-test crate.
#[derive(Debug, Clone)]
struct SharedBackend(Arc<StubBackend>);

#[async_trait]
impl CompletionBackend for SharedBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        *self.0.seen.lock().unwrap() = Some(request);
        Ok(self.0.response.clone())
    }
}

fn sample_input() -> TripInput {
    TripInput {
        destination: "Rome, Italy".to_string(),
        start_date: "2024-05-01".to_string(),
        end_date: "2024-05-02".to_string(),
        adults: 2,
        kids_ages: vec![4],
        budget: Budget::Moderate,
        interests: vec!["history".to_string()],
        nap_start: Some("1:00 PM".to_string()),
        nap_end: Some("3:00 PM".to_string()),
    }
}

const COMPLETE_RESPONSE: &str = r#"{"destination":"Rome, Italy","summary":"Two easy days.","hotelZone":{"recommended":"Trastevere","reason":"Walkable","priceRange":"$150–$250/night"},"dailyFoodBudget":{"amount":120,"currency":"USD","breakdown":"Breakfast $20, Lunch $35, Dinner $65"},"days":[{"dayNumber":1,"date":"2024-05-01","theme":"Arrival","activities":[{"time":"9:00 AM","name":"Colosseum","type":"attraction","duration":"2h","description":"Skip-the-line tour","isNapBlock":false,"isHiddenGem":false}]},{"dayNumber":2,"date":"2024-05-02","theme":"Vatican","activities":[{"time":"8:30 AM","name":"Vatican Museums","type":"attraction","duration":"3h","description":"Book ahead","isNapBlock":false,"isHiddenGem":false}]}],"packingTips":["Sunscreen"],"generalTips":["Carry water"]}"#;

#[tokio::test]
async fn generates_an_itinerary_from_a_fenced_response() {
    let fenced = format!("```json\n{}\n```", COMPLETE_RESPONSE);
    let backend = SharedBackend(Arc::new(StubBackend::new(fenced)));
    let planner = Planner::with_backend(Box::new(backend));

    let itinerary = planner.generate(&sample_input()).await.unwrap();
    assert_eq!(itinerary.destination, "Rome, Italy");
    assert_eq!(itinerary.days.len(), 2);
    assert_eq!(itinerary.packing_tips, vec!["Sunscreen".to_string()]);
}

#[tokio::test]
async fn recovers_from_a_truncated_response() {
    // Cut mid-way through day 2: the pipeline should fall back to the
    // day-rebuild repair and keep day 1.
    let cut = COMPLETE_RESPONSE.find("Vatican Museums").unwrap();
    let backend = SharedBackend(Arc::new(StubBackend::new(&COMPLETE_RESPONSE[..cut])));
    let planner = Planner::with_backend(Box::new(backend));

    let itinerary = planner.generate(&sample_input()).await.unwrap();
    assert_eq!(itinerary.days.len(), 1);
    assert_eq!(itinerary.days[0].theme, "Arrival");
    assert!(itinerary.packing_tips.is_empty());
    assert!(itinerary.general_tips.is_empty());
}

#[tokio::test]
async fn prose_responses_fail_with_a_decode_error() {
    let backend = SharedBackend(Arc::new(StubBackend::new(
        "Here is your itinerary! Day one starts at the Colosseum...",
    )));
    let planner = Planner::with_backend(Box::new(backend));

    let err = planner.generate(&sample_input()).await.unwrap_err();
    assert_eq!(err.error_code(), "DECODE_ERROR");
    assert!(matches!(err, TripError::Decode { .. }));
}

#[tokio::test]
async fn request_carries_prompts_and_generation_settings() {
    let backend = SharedBackend(Arc::new(StubBackend::new(COMPLETE_RESPONSE)));
    let planner = Planner::with_backend(Box::new(backend.clone()))
        .with_model("claude-haiku-4-5")
        .with_max_tokens(9000);

    planner.generate(&sample_input()).await.unwrap();

    let seen = backend.0.seen.lock().unwrap();
    let request = seen.as_ref().expect("backend saw no request");
    assert_eq!(request.model, "claude-haiku-4-5");
    assert_eq!(request.max_tokens, 9000);
    assert!(request.system.contains("TripCraft"));
    assert!(request.prompt.contains("DESTINATION: Rome, Italy"));
    assert!(request.prompt.contains("Children need a nap from 1:00 PM to 3:00 PM"));
}
