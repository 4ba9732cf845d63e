// ABOUTME: Shared pieces of the taxify terminal client
// ABOUTME: Application context, start-up errors and output formatting

pub mod context;
pub mod error;
pub mod format;

pub use context::AppContext;
pub use error::{AppError, AppResult};
