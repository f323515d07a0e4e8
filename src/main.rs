use clap::Parser;
use lead_relay::config::Command;
use lead_relay::core::submission::SubmitOutcome;
use lead_relay::domain::ports::Relay;
use lead_relay::utils::error::{ErrorCategory, RelayError};
use lead_relay::utils::validation::{validate_http_url, Validate};
use lead_relay::utils::logger;
use lead_relay::{api, format_phone, is_valid_phone, CliConfig, ContactForm, EndpointRelay};
use lead_relay::{FormState, RelayConfig, TracingAnalytics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    match &cli.command {
        Command::Format { raw } => {
            let formatted = format_phone(raw);
            println!("{}", formatted);
            return Ok(());
        }
        Command::Check { phone } => {
            if is_valid_phone(phone) {
                println!("✅ {} is valid", phone);
                return Ok(());
            }
            println!("❌ {} is not a valid +380XXXXXXXXX number", phone);
            std::process::exit(1);
        }
        _ => {}
    }

    let config = match cli.load_relay_config() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(e);
    }

    match &cli.command {
        Command::Serve { .. } => {
            tracing::info!("🚀 Starting lead relay");
            if let Err(e) = api::serve(&config).await {
                exit_with(e);
            }
        }
        Command::Submit {
            name,
            phone,
            endpoint,
        } => {
            let relay = match build_relay(&config, endpoint.as_deref()) {
                Ok(relay) => relay,
                Err(e) => exit_with(e),
            };

            let mut form = ContactForm::new();
            form.input_name(name);
            form.input_phone(phone);

            match form.submit(relay.as_ref(), &TracingAnalytics).await {
                SubmitOutcome::Delivered => {
                    println!("✅ Lead delivered: {} {}", form.name().trim(), form.phone());
                }
                SubmitOutcome::Rejected(_) => {
                    if let Some(e) = form.validation_error() {
                        exit_with(e);
                    }
                    std::process::exit(1);
                }
                SubmitOutcome::Failed | SubmitOutcome::Ignored => {
                    if let Some(notice) = form.notice() {
                        eprintln!("{}", notice.text);
                    }
                    let exit_code = if form.state() == FormState::Error {
                        2
                    } else {
                        1
                    };
                    std::process::exit(exit_code);
                }
            }
        }
        Command::Format { .. } | Command::Check { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn build_relay(
    config: &RelayConfig,
    endpoint: Option<&str>,
) -> Result<Box<dyn Relay>, RelayError> {
    if let Some(endpoint) = endpoint {
        validate_http_url("endpoint", endpoint)?;
        return Ok(Box::new(EndpointRelay::new(
            endpoint,
            config.request_timeout(),
        )?));
    }

    match config.telegram_relay()? {
        Some(relay) => Ok(Box::new(relay)),
        None => Err(RelayError::MissingConfigError {
            field: "telegram.bot_token / telegram.chat_id".to_string(),
        }),
    }
}

fn exit_with(e: RelayError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤分類決定退出碼
    let exit_code = match e.category() {
        ErrorCategory::Validation => 1,
        ErrorCategory::Transport => 2,
        ErrorCategory::Configuration => 3,
    };
    std::process::exit(exit_code);
}
