//! Ping Bot Demo
//!
//! A minimal Herald bot: one slash command, one lifecycle event, one
//! button. The demo runs against the in-process [`LocalGateway`], so a
//! small driver task plays the platform's part — it emits a ready event,
//! invokes `/ping`, presses the button, then asks the client to shut down.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package ping-bot
//! ```
//!
//! Point `HERALD_TOKEN` at a real token and swap the gateway for a real
//! platform connection to run the same modules against live traffic.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use herald::core::User;
use herald::prelude::*;

/// `/ping` — replies with pong.
struct Ping {
    data: CommandMetadata,
}

impl Ping {
    fn new() -> Self {
        Self {
            data: CommandMetadata::new("ping").description("ping pong!"),
        }
    }
}

#[async_trait]
impl CommandHandler for Ping {
    fn data(&self) -> &CommandMetadata {
        &self.data
    }

    async fn execute(
        &self,
        _invocation: CommandInvocation,
        client: SharedGateway,
    ) -> HandlerResult {
        client
            .call_api("interaction.respond", json!({"content": "Pong!"}))
            .await?;
        Ok(())
    }
}

/// Greets once when the session becomes ready.
struct ReadyGreeter;

#[async_trait]
impl EventHandler for ReadyGreeter {
    fn event(&self) -> EventKind {
        EventKind::Ready
    }

    fn once(&self) -> bool {
        true
    }

    async fn execute(&self, event: Arc<GatewayEvent>, _client: SharedGateway) -> HandlerResult {
        if let GatewayEvent::Ready(session) = event.as_ref() {
            info!(user = %session.user.username, "logged in and ready");
        }
        Ok(())
    }
}

/// The `confirm` button.
struct ConfirmButton;

#[async_trait]
impl ComponentHandler for ConfirmButton {
    fn custom_id(&self) -> &str {
        "confirm"
    }

    async fn execute(
        &self,
        component: ComponentInteraction,
        client: SharedGateway,
    ) -> HandlerResult {
        client
            .call_api(
                "interaction.respond",
                json!({"content": "Confirmed.", "custom_id": component.custom_id}),
            )
            .await?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = ConfigLoader::new().load()?;
    // The in-process gateway accepts any non-empty token.
    config.token = config.token.or_else(|| Some("demo-token".into()));

    let gateway = Arc::new(LocalGateway::new());
    let mut client = Client::new(config, Arc::clone(&gateway) as SharedGateway).modules(
        ModuleSet::new()
            .event(ReadyGreeter)
            .command(Ping::new())
            .button(ConfirmButton),
    );

    // Play the platform's part: emit traffic, then request shutdown.
    let shutdown = client.shutdown_token();
    let driver = tokio::spawn({
        let gateway = Arc::clone(&gateway);
        async move {
            tokio::time::sleep(Duration::from_millis(100)).await;

            Arc::clone(&gateway)
                .fire(GatewayEvent::Ready(Session {
                    user: User {
                        id: "0".into(),
                        username: "ping-bot".into(),
                    },
                    session_id: "demo".into(),
                }))
                .await;
            Arc::clone(&gateway)
                .fire(GatewayEvent::InteractionCreate(Interaction::Command(
                    CommandInvocation::new("ping"),
                )))
                .await;
            Arc::clone(&gateway)
                .fire(GatewayEvent::InteractionCreate(Interaction::Component(
                    ComponentInteraction::button("confirm"),
                )))
                .await;

            for (action, params) in gateway.api_calls() {
                info!(action = %action, params = %params, "handler responded");
            }

            shutdown.cancel();
        }
    });

    client.run().await?;
    driver.await?;
    Ok(())
}
