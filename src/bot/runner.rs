use std::collections::VecDeque;
use std::time::Duration;

use super::router::Command;
use super::transport::{ChatTransport, IncomingMessage, Reply, Result};
use super::CardBot;
use crate::config::BotConfig;

/// Connect, poll, answer; reconnect after a fixed backoff on any
/// transport failure.
///
/// Messages already taken from the transport are kept until their reply is
/// sent, so a failed send is retried on the next poll instead of dropped.
pub struct Runner<T> {
    transport: T,
    bot: CardBot,
    poll_interval: Duration,
    reconnect_backoff: Duration,
    backlog: VecDeque<IncomingMessage>,
    unsent: Option<(String, Reply)>,
}

impl<T: ChatTransport> Runner<T> {
    pub fn new(transport: T, bot: CardBot, config: &BotConfig) -> Self {
        Self {
            transport,
            bot,
            poll_interval: config.poll_interval(),
            reconnect_backoff: config.reconnect_backoff(),
            backlog: VecDeque::new(),
            unsent: None,
        }
    }

    /// Runs until the surrounding task is dropped.
    pub async fn run(&mut self) {
        loop {
            match self.transport.connect().await {
                Ok(()) => {
                    self.bot.refresh_all().await;
                    log::info!("Successfully connected");
                    if let Err(e) = self.serve().await {
                        log::warn!("Connection error: {}", e);
                    }
                }
                Err(e) => log::warn!("Connection failed: {}", e),
            }
            tokio::time::sleep(self.reconnect_backoff).await;
        }
    }

    async fn serve(&mut self) -> Result<()> {
        loop {
            self.poll_once().await?;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Handle every pending message in arrival order. Returns how many
    /// replies were sent.
    pub async fn poll_once(&mut self) -> Result<usize> {
        let mut sent = 0;

        if let Some((channel, reply)) = self.unsent.take() {
            self.deliver(channel, reply).await?;
            sent += 1;
        }

        let messages = self.transport.receive().await?;
        self.backlog.extend(messages);

        while let Some(message) = self.backlog.pop_front() {
            let Some(command) = Command::parse(&message.text) else {
                continue;
            };
            log::info!("Received {} trigger in {}", command.trigger(), message.channel);
            let reply = self.bot.handle(command).await;
            self.deliver(message.channel, reply).await?;
            sent += 1;
        }
        Ok(sent)
    }

    /// Send `reply`, parking it for the next poll if the transport fails.
    async fn deliver(&mut self, channel: String, reply: Reply) -> Result<()> {
        if let Err(e) = self.transport.send(&channel, &reply).await {
            self.unsent = Some((channel, reply));
            return Err(e);
        }
        Ok(())
    }
}
