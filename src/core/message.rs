use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub const DEFAULT_HEADLINE: &str = "🐺 *НОВА ЗАЯВКА З ЛЕНДІНГУ*";
pub const DEFAULT_TIMEZONE: &str = "Europe/Kyiv";

/// uk-UA 的日期時間格式: 19.10.2026, 14:05:03
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// 送到 Telegram 的 Markdown 訊息樣板
#[derive(Debug, Clone)]
pub struct LeadMessage {
    headline: String,
    source_tag: Option<String>,
    timezone: Tz,
}

impl LeadMessage {
    pub fn new(headline: impl Into<String>, source_tag: Option<String>, timezone: Tz) -> Self {
        Self {
            headline: headline.into(),
            source_tag: source_tag.filter(|tag| !tag.trim().is_empty()),
            timezone,
        }
    }

    pub fn render(&self, name: &str, phone: &str) -> String {
        self.render_at(name, phone, Utc::now())
    }

    pub fn render_at(&self, name: &str, phone: &str, at: DateTime<Utc>) -> String {
        let headline = match &self.source_tag {
            Some(tag) => format!("{} {}", self.headline, tag),
            None => self.headline.clone(),
        };
        let timestamp = at.with_timezone(&self.timezone).format(TIMESTAMP_FORMAT);

        format!(
            "{}\n\n👤 *Ім'я:* {}\n📞 *Телефон:* {}\n\n⏰ *Час:* {}",
            headline,
            escape_markdown(name),
            escape_markdown(phone),
            timestamp
        )
    }
}

impl Default for LeadMessage {
    fn default() -> Self {
        Self::new(DEFAULT_HEADLINE, None, chrono_tz::Europe::Kyiv)
    }
}

/// Telegram legacy Markdown: `_ * ` [` 在實體外必須以反斜線跳脫
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
