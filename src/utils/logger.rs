//! tracing 初始化：CLI 用精簡輸出，serverless 函式輸出一行一筆 JSON

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "lead_relay=info,warn";
const VERBOSE_DIRECTIVES: &str = "lead_relay=debug,axum=debug,info";

/// `RUST_LOG` 優先，沒設定時才用內建的指令
fn relay_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

pub fn init_cli_logger(verbose: bool) {
    let directives = if verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    };

    tracing_subscriber::registry()
        .with(relay_filter(directives))
        .with(fmt::layer().with_target(verbose).compact())
        .init();
}

pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(relay_filter(DEFAULT_DIRECTIVES))
        .with(
            fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_target(false)
                .without_time(), // 執行環境自己會加時間戳
        )
        .init();
}
