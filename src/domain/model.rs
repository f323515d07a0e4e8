use serde::{Deserialize, Serialize};

/// 一次表單送出：姓名與已驗證的電話號碼
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub phone: String,
}

impl Submission {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// 一次 relay 往返的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResult {
    pub outcome: Outcome,
    pub detail: Option<String>,
}

impl RelayResult {
    pub fn success(detail: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            detail: Some(detail.into()),
        }
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure,
            detail: Some(detail.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

/// Conversion event reported once per delivered lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionEvent {
    pub action: &'static str,
    pub category: &'static str,
    pub label: &'static str,
}

impl ConversionEvent {
    pub fn lead_form() -> Self {
        Self {
            action: "form_submission",
            category: "Lead",
            label: "Contact Form",
        }
    }
}
