pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{EndpointRelay, NoopAnalytics, TelegramRelay, TracingAnalytics};
pub use api::{router, SubmitEndpoint};
pub use config::{RelayConfig, TelegramCredentials};
pub use crate::core::phone::{format_phone, is_valid_phone};
pub use crate::core::submission::{ContactForm, FormState, SubmitOutcome};
pub use utils::error::{RelayError, Result};
