mod error;
mod keys;
mod serialization;
mod status;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{format_instant, holiday_events_key};
pub use serialization::{deserialize_events, serialize_events, SerializationError};
pub use status::CacheStatus;
pub use traits::Cache;
