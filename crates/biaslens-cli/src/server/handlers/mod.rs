//! API request handlers.

mod analyze;
mod health;
mod upload;

pub use analyze::*;
pub use health::*;
