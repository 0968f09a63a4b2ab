//! Google Calendar upstream.
//!
//! [`GoogleTokenSource`] turns the configured refresh token into short-lived
//! access tokens. [`GoogleCalendarClient`] lists events of the public holiday
//! calendars and implements `HolidayProvider`.

mod auth;
mod client;
mod error;
mod types;

pub use auth::{GoogleCredentials, GoogleTokenSource};
pub use client::GoogleCalendarClient;
