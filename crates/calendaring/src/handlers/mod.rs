pub mod error;
pub mod health;
pub mod holidays;
pub mod root;

pub use error::AppError;
