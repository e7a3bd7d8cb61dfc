use anyhow::Context;

use lcgbot::bot::slack::SlackTransport;
use lcgbot::bot::{CardBot, Runner};
use lcgbot::config::{AppConfig, SLACK_TOKEN_ENV};
use lcgbot::core::catalog::CatalogFetcher;
use lcgbot::core::rulings::RulingsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();

    // Initialize logging
    let _log_guard = lcgbot::core::logging::init(&config.log_dir(), &config.logging.level);
    log::info!("{} v{} starting", lcgbot::NAME, lcgbot::VERSION);

    let timeout = config.bot.request_timeout();
    let token = AppConfig::slack_token()
        .with_context(|| format!("{} is not set", SLACK_TOKEN_ENV))?;

    let fetcher = CatalogFetcher::with_timeout(&config.catalog, config.cache_dir(), timeout)
        .context("building catalog client")?;
    let rulings = RulingsClient::with_timeout(&config.catalog.rulings_base_url, timeout)
        .context("building rulings client")?;
    let transport = SlackTransport::with_timeout(&config.slack, token, timeout)
        .context("building Slack client")?;

    if config.slack.channels.is_empty() {
        log::warn!("No Slack channels configured; nothing will be answered");
    }

    let mut runner = Runner::new(transport, CardBot::new(fetcher, rulings), &config.bot);

    tokio::select! {
        _ = runner.run() => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                log::error!("Failed to listen for shutdown signal: {}", e);
            }
            log::info!("Shutting down");
        }
    }

    Ok(())
}
