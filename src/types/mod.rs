pub mod itinerary;
pub mod trip;

pub use itinerary::{Activity, ActivityType, DailyFoodBudget, Day, HotelZone, Itinerary};
pub use trip::{Budget, TripInput};
