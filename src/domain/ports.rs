use crate::domain::model::{ConversionEvent, Submission};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Delivers one submission. Exactly one attempt; the returned string is the
/// acknowledgement detail reported by the other side.
#[async_trait]
pub trait Relay: Send + Sync {
    async fn send(&self, submission: &Submission) -> Result<String>;
}

pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &ConversionEvent);
}
