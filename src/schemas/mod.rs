pub mod schema;
pub(crate) mod validation;

use std::sync::OnceLock;

use crate::types::Itinerary;

pub use schema::SchemaHandle;

/// Schema for the itinerary payload the model is asked to return.
pub fn itinerary_schema() -> &'static SchemaHandle {
    static SCHEMA: OnceLock<SchemaHandle> = OnceLock::new();
    SCHEMA.get_or_init(|| SchemaHandle::new::<Itinerary>("Itinerary"))
}
