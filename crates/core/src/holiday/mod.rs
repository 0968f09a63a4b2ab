mod error;
mod http_mapping;
mod query;
mod traits;
mod transform;
mod types;

pub use error::{QueryError, ResolveError, Result, UpstreamError};
pub use http_mapping::{resolve_error_to_status_code, OPAQUE_ERROR_MARKER};
pub use query::{holiday_calendar_id, parse_instant};
pub use traits::{EventResolver, HolidayProvider};
pub use transform::{event_from_upstream, parse_locations, transform_events};
pub use types::{HolidayEvent, HolidayQuery, UpstreamEvent};
