#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use lead_relay::api::gateway::{handle_event, GatewayRequest, GatewayResponse};
#[cfg(feature = "lambda")]
use lead_relay::api::{endpoint_from_config, SubmitEndpoint};
#[cfg(feature = "lambda")]
use lead_relay::utils::logger;
#[cfg(feature = "lambda")]
use lead_relay::utils::validation::Validate;
#[cfg(feature = "lambda")]
use lead_relay::RelayConfig;

#[cfg(feature = "lambda")]
async fn function_handler(
    endpoint: &SubmitEndpoint,
    event: LambdaEvent<GatewayRequest>,
) -> Result<GatewayResponse, Error> {
    tracing::debug!("Handling request {}", event.context.request_id);
    Ok(handle_event(endpoint, event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 憑證只從環境變數讀取，缺少時每個請求回 500
    let config = RelayConfig::from_env();
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let endpoint = endpoint_from_config(&config)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    let endpoint = &endpoint;

    tracing::info!("Lead relay function ready");
    run(service_fn(move |event| function_handler(endpoint, event))).await
}
