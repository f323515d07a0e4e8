use crate::core::phone::{format_phone, is_valid_phone};
use crate::domain::model::{ConversionEvent, RelayResult, Submission};
use crate::domain::ports::{AnalyticsSink, Relay};
use crate::utils::error::RelayError;

pub const DEFAULT_SUBMIT_LABEL: &str = "Надіслати заявку";
pub const PENDING_LABEL: &str = "⏳ Відправка...";

pub const NAME_REQUIRED_MESSAGE: &str = "❌ Будь ласка, введи своє ім'я";
pub const PHONE_REQUIRED_MESSAGE: &str = "❌ Будь ласка, введи номер телефону";
pub const PHONE_INVALID_MESSAGE: &str =
    "❌ Будь ласка, введи коректний номер телефону у форматі +380XXXXXXXXX";
pub const DELIVERY_FAILED_MESSAGE: &str = "⚠️ Виникла помилка при відправці заявки. Будь ласка, спробуй ще раз або зателефонуй нам напряму.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
}

/// 顯示給使用者的提示，以及要聚焦的欄位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: &'static str,
    pub focus: Option<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 按鈕停用中或已經送出成功，什麼都不做
    Ignored,
    /// 本地驗證失敗，沒有發出任何請求
    Rejected(Field),
    Delivered,
    Failed,
}

/// Headless model of the landing page contact form.
///
/// `submit` borrows the form mutably for the whole round trip, so a second
/// submission cannot start while one is in flight.
#[derive(Debug, Clone)]
pub struct ContactForm {
    name: String,
    phone: String,
    state: FormState,
    button: SubmitButton,
    original_label: String,
    form_visible: bool,
    success_visible: bool,
    notice: Option<Notice>,
    last_result: Option<RelayResult>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::with_label(DEFAULT_SUBMIT_LABEL)
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            name: String::new(),
            phone: String::new(),
            state: FormState::Idle,
            button: SubmitButton {
                enabled: true,
                label: label.clone(),
            },
            original_label: label,
            form_visible: true,
            success_visible: false,
            notice: None,
            last_result: None,
        }
    }

    pub fn input_name(&mut self, value: &str) {
        self.name = value.to_string();
    }

    /// input 事件：每次按鍵都重新格式化
    pub fn input_phone(&mut self, raw: &str) {
        self.phone = format_phone(raw);
    }

    pub async fn submit(&mut self, relay: &dyn Relay, analytics: &dyn AnalyticsSink) -> SubmitOutcome {
        if !self.button.enabled || self.state == FormState::Success {
            tracing::debug!("Submit ignored in state {:?}", self.state);
            return SubmitOutcome::Ignored;
        }

        let name = self.name.trim().to_string();
        let phone = self.phone.trim().to_string();

        if name.is_empty() {
            return self.reject(Field::Name, NAME_REQUIRED_MESSAGE);
        }
        if phone.is_empty() {
            return self.reject(Field::Phone, PHONE_REQUIRED_MESSAGE);
        }
        if !is_valid_phone(&phone) {
            return self.reject(Field::Phone, PHONE_INVALID_MESSAGE);
        }

        self.state = FormState::Submitting;
        self.notice = None;
        self.button.enabled = false;
        self.button.label = PENDING_LABEL.to_string();

        let submission = Submission::new(name, phone);
        match relay.send(&submission).await {
            Ok(detail) => {
                self.state = FormState::Success;
                self.form_visible = false;
                self.success_visible = true;
                self.last_result = Some(RelayResult::success(detail));

                analytics.track(&ConversionEvent::lead_form());
                tracing::info!(
                    name = %submission.name,
                    phone = %submission.phone,
                    "✅ Form submitted successfully"
                );
                SubmitOutcome::Delivered
            }
            Err(e) => {
                tracing::error!(
                    "❌ Error sending submission: {} (Category: {:?})",
                    e,
                    e.category()
                );
                self.state = FormState::Error;
                self.notice = Some(Notice {
                    text: DELIVERY_FAILED_MESSAGE,
                    focus: None,
                });
                self.button.enabled = true;
                self.button.label = self.original_label.clone();
                self.last_result = Some(RelayResult::failure(e.to_string()));
                SubmitOutcome::Failed
            }
        }
    }

    fn reject(&mut self, field: Field, text: &'static str) -> SubmitOutcome {
        tracing::debug!("Submission rejected locally: {:?}", field);
        self.state = FormState::Idle;
        self.notice = Some(Notice {
            text,
            focus: Some(field),
        });
        SubmitOutcome::Rejected(field)
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn button(&self) -> &SubmitButton {
        &self.button
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn is_success_visible(&self) -> bool {
        self.success_visible
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn last_result(&self) -> Option<&RelayResult> {
        self.last_result.as_ref()
    }

    /// 本地驗證被拒時，把提示轉成 `ValidationError`；其他狀態回傳 None
    pub fn validation_error(&self) -> Option<RelayError> {
        let notice = self.notice.as_ref()?;
        let field = notice.focus?;
        Some(RelayError::ValidationError {
            message: format!("{:?}: {}", field, notice.text),
        })
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::analytics::NoopAnalytics;
    use crate::utils::error::{ErrorCategory, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockRelay {
        fail_with: Option<u16>,
        calls: AtomicUsize,
        seen: Mutex<Vec<Submission>>,
    }

    impl MockRelay {
        fn succeeding() -> Self {
            Self {
                fail_with: None,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                fail_with: Some(status),
                ..Self::succeeding()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Relay for MockRelay {
        async fn send(&self, submission: &Submission) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(submission.clone());
            match self.fail_with {
                Some(status) => Err(RelayError::UpstreamError {
                    status,
                    description: "boom".to_string(),
                }),
                None => Ok("ok".to_string()),
            }
        }
    }

    #[derive(Default)]
    struct CountingAnalytics {
        events: Mutex<Vec<ConversionEvent>>,
    }

    impl AnalyticsSink for CountingAnalytics {
        fn track(&self, event: &ConversionEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.input_name("  Олена ");
        form.input_phone("0931234567");
        form
    }

    #[test]
    fn test_phone_input_is_formatted() {
        let mut form = ContactForm::new();
        form.input_phone("093");
        assert_eq!(form.phone(), "+380 93");
        form.input_phone("+380 93 1234567");
        assert_eq!(form.phone(), "+380 93 123 45 67");
    }

    #[tokio::test]
    async fn test_empty_name_rejected_without_network() {
        let relay = MockRelay::succeeding();
        let mut form = ContactForm::new();
        form.input_name("   ");
        form.input_phone("0931234567");

        let outcome = form.submit(&relay, &NoopAnalytics).await;

        assert_eq!(outcome, SubmitOutcome::Rejected(Field::Name));
        assert_eq!(relay.calls(), 0);
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.notice().unwrap().text, NAME_REQUIRED_MESSAGE);
        assert_eq!(form.notice().unwrap().focus, Some(Field::Name));
    }

    #[tokio::test]
    async fn test_empty_phone_rejected_without_network() {
        let relay = MockRelay::succeeding();
        let mut form = ContactForm::new();
        form.input_name("Ivan");

        let outcome = form.submit(&relay, &NoopAnalytics).await;

        assert_eq!(outcome, SubmitOutcome::Rejected(Field::Phone));
        assert_eq!(relay.calls(), 0);
        assert_eq!(form.notice().unwrap().text, PHONE_REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_phone_rejected_without_network() {
        let relay = MockRelay::succeeding();
        let mut form = ContactForm::new();
        form.input_name("Ivan");
        form.input_phone("093123");

        let outcome = form.submit(&relay, &NoopAnalytics).await;

        assert_eq!(outcome, SubmitOutcome::Rejected(Field::Phone));
        assert_eq!(relay.calls(), 0);
        assert_eq!(form.notice().unwrap().text, PHONE_INVALID_MESSAGE);
        assert!(form.button().enabled);
    }

    #[tokio::test]
    async fn test_success_hides_form_and_tracks_conversion() {
        let relay = MockRelay::succeeding();
        let analytics = CountingAnalytics::default();
        let mut form = filled_form();

        let outcome = form.submit(&relay, &analytics).await;

        assert_eq!(outcome, SubmitOutcome::Delivered);
        assert_eq!(form.state(), FormState::Success);
        assert!(!form.is_form_visible());
        assert!(form.is_success_visible());
        assert!(form.last_result().unwrap().is_success());
        assert_eq!(
            analytics.events.lock().unwrap().as_slice(),
            &[ConversionEvent::lead_form()]
        );

        let seen = relay.seen.lock().unwrap();
        assert_eq!(seen[0], Submission::new("Олена", "+380 93 123 45 67"));
    }

    #[tokio::test]
    async fn test_failure_restores_button() {
        let relay = MockRelay::failing(500);
        let analytics = CountingAnalytics::default();
        let mut form = ContactForm::with_label("Send");
        form.input_name("Ivan");
        form.input_phone("+380931234567");

        let outcome = form.submit(&relay, &analytics).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(form.state(), FormState::Error);
        assert!(form.button().enabled);
        assert_eq!(form.button().label, "Send");
        assert!(form.is_form_visible());
        assert_eq!(form.notice().unwrap().text, DELIVERY_FAILED_MESSAGE);
        assert!(!form.notice().unwrap().text.contains("boom"));
        assert!(analytics.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let mut form = filled_form();
        form.submit(&MockRelay::failing(502), &NoopAnalytics).await;
        assert_eq!(form.state(), FormState::Error);

        let outcome = form.submit(&MockRelay::succeeding(), &NoopAnalytics).await;
        assert_eq!(outcome, SubmitOutcome::Delivered);
        assert_eq!(form.state(), FormState::Success);
    }

    #[tokio::test]
    async fn test_submit_after_success_is_ignored() {
        let relay = MockRelay::succeeding();
        let mut form = filled_form();
        form.submit(&relay, &NoopAnalytics).await;

        let outcome = form.submit(&relay, &NoopAnalytics).await;
        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(relay.calls(), 1);
    }

    #[tokio::test]
    async fn test_local_rejection_maps_to_validation_error() {
        let mut form = ContactForm::new();
        form.input_name("Ivan");
        form.input_phone("093123");
        form.submit(&MockRelay::succeeding(), &NoopAnalytics).await;

        let err = form.validation_error().unwrap();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains(PHONE_INVALID_MESSAGE));

        form.input_phone("0931234567");
        form.submit(&MockRelay::failing(502), &NoopAnalytics).await;
        assert!(form.validation_error().is_none());
    }
}
