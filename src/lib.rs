//! tripcraft-rs: family trip itineraries from an LLM, decoded tolerantly
//!
//! The generation call is bounded by an output-token budget, so the model's
//! JSON response can arrive truncated mid-document. The decoder at the
//! heart of this crate repairs such responses with a layered fallback
//! instead of failing the whole trip.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tripcraft_rs::{Budget, Planner, TripInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let planner = Planner::from_env()?;
//!
//!     let input = TripInput {
//!         destination: "Rome, Italy".to_string(),
//!         start_date: "2024-05-01".to_string(),
//!         end_date: "2024-05-04".to_string(),
//!         adults: 2,
//!         kids_ages: vec![4, 7],
//!         budget: Budget::Moderate,
//!         interests: vec!["food".to_string(), "history".to_string()],
//!         nap_start: Some("1:00 PM".to_string()),
//!         nap_end: Some("3:00 PM".to_string()),
//!     };
//!
//!     let itinerary = planner.generate(&input).await?;
//!     println!("{}", serde_json::to_string_pretty(&itinerary)?);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod decoder;
pub mod error;
pub mod prompts;
pub mod schemas;
pub(crate) mod services;
pub mod types;

pub use crate::core::{CompletionBackend, CompletionRequest, Planner};
pub use decoder::{decode_itinerary, decode_with_tier, RepairTier};
pub use error::{Result, TripError};
pub use prompts::{build_system_prompt, build_trip_prompt, trip_day_count};
pub use schemas::{itinerary_schema, SchemaHandle};
pub use types::{
    Activity, ActivityType, Budget, DailyFoodBudget, Day, HotelZone, Itinerary, TripInput,
};

#[cfg(feature = "cli")]
pub mod cli;
