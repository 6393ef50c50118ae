//! Monitoring-event handler for Webex Teams.
//!
//! The monitoring pipeline pipes one event JSON document to stdin and passes
//! delivery settings as flags. The handler validates the event, renders the
//! message, posts it to the Webex API, and exits. A non-OK API response is
//! logged but still exits 0; only input, validation, rendering, and
//! transport failures are fatal.

mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::HandlerConfig;
use webex_notify::client::DEFAULT_API_HOST;
use webex_notify::presentation::formatted_message;
use webex_notify::{render_message, validate_event, Event, HandlerError, WebexClient};

#[derive(Parser, Debug)]
#[command(name = "webex-handler")]
#[command(about = "Forwards monitoring events to a Webex Teams space", long_about = None)]
struct Cli {
    /// The space to post messages to; can also be a user's email to send
    /// directly to a person instead of a space
    #[arg(short = 'r', long, env = "WEBEX_ROOM_ID")]
    room_id: String,

    /// The API token to use
    #[arg(long, env = "WEBEX_TOKEN", hide_env_values = true)]
    token: String,

    /// The API host to post messages to
    #[arg(long, env = "WEBEX_API_HOST", default_value = DEFAULT_API_HOST)]
    api_host: String,

    /// The amount of seconds to wait before terminating the handler
    #[arg(short = 't', long, default_value_t = 10)]
    timeout: u64,
}

impl Cli {
    fn into_config(self) -> HandlerConfig {
        HandlerConfig {
            room_id: self.room_id,
            token: self.token,
            api_host: self.api_host,
            timeout_secs: self.timeout,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("webex_handler=info".parse()?)
                .add_directive("webex_notify=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config();
    let timeout = config.timeout();

    match tokio::time::timeout(timeout, run(&config)).await {
        Ok(result) => result,
        Err(_) => anyhow::bail!("handler timed out after {}s", config.timeout_secs),
    }
}

async fn run(config: &HandlerConfig) -> Result<()> {
    let raw = std::io::read_to_string(std::io::stdin()).map_err(HandlerError::Stdin)?;
    let event: Event = serde_json::from_str(&raw).map_err(HandlerError::InvalidJson)?;

    let valid = validate_event(&event)?;
    tracing::info!(summary = %formatted_message(&valid), "handling event");

    let payload = render_message(&valid, &config.room_id);
    let client = WebexClient::new(&config.api_host, &config.token, config.timeout())?;
    let report = client.send(&payload).await?;

    tracing::debug!(
        status = report.status,
        retries = report.retries,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "delivery finished"
    );
    Ok(())
}
