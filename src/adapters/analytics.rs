use crate::domain::model::ConversionEvent;
use crate::domain::ports::AnalyticsSink;

/// 沒有分析收集器時使用
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn track(&self, _event: &ConversionEvent) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: &ConversionEvent) {
        tracing::info!(
            action = event.action,
            category = event.category,
            label = event.label,
            "📈 Conversion tracked"
        );
    }
}
