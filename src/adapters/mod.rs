// Adapters layer: concrete relays and sinks for external systems.

pub mod analytics;
pub mod endpoint;
pub mod telegram;

pub use analytics::{NoopAnalytics, TracingAnalytics};
pub use endpoint::EndpointRelay;
pub use telegram::TelegramRelay;
