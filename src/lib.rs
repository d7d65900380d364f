// Library interface for the streakrs engine and its CLI plumbing.
// Integration tests consume the core modules through this crate root.

pub mod aggregate;
pub mod category;
pub mod celebration;
pub mod config;
pub mod engine;
pub mod error;
pub mod goals;
pub mod logging;
pub mod models;
pub mod records;
pub mod store;
pub mod streaks;
pub mod week;

// Re-export commonly used types for convenience
pub use models::*;
pub use category::category;
pub use engine::{ActivityOutcome, Engine, WeeklyProgress};
pub use celebration::Celebration;
pub use error::{Result, StreakrsError};
pub use week::WeekWindow;
