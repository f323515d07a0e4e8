pub mod message;
pub mod phone;
pub mod submission;

pub use crate::domain::model::{ConversionEvent, Outcome, RelayResult, Submission};
pub use crate::domain::ports::{AnalyticsSink, Relay};
pub use crate::utils::error::Result;
