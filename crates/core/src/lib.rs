//! Functional core for the calendaring holiday service.
//!
//! Everything in this crate is free of I/O: cache key construction, payload
//! serialization, query parsing, and the upstream-to-domain transform. The
//! traits at the seams (`Cache`, `HolidayProvider`, `EventResolver`) are
//! implemented by the `calendaring` binary crate.

pub mod cache;
pub mod holiday;
