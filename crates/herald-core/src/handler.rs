//! Handler contracts.
//!
//! Every loadable module implements exactly one of the four capability
//! traits below. The traits statically guarantee the `execute` capability;
//! the registration engine only has to validate what the type system cannot
//! express (a non-empty command name or custom id).
//!
//! `execute` may fail with any error. The dispatcher treats all failures
//! uniformly: caught, logged with identifying context, never re-raised.
//! A broken handler costs its own invocation and nothing else.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use herald_core::{
//!     CommandHandler, CommandInvocation, CommandMetadata, Gateway, HandlerResult, SharedGateway,
//! };
//!
//! struct Ping {
//!     data: CommandMetadata,
//! }
//!
//! impl Ping {
//!     fn new() -> Self {
//!         Self {
//!             data: CommandMetadata::new("ping").description("ping pong!"),
//!         }
//!     }
//! }
//!
//! #[async_trait]
//! impl CommandHandler for Ping {
//!     fn data(&self) -> &CommandMetadata {
//!         &self.data
//!     }
//!
//!     async fn execute(
//!         &self,
//!         _invocation: CommandInvocation,
//!         client: SharedGateway,
//!     ) -> HandlerResult {
//!         client
//!             .call_api("interaction.respond", serde_json::json!({"content": "Pong!"}))
//!             .await?;
//!         Ok(())
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::command::CommandMetadata;
use crate::event::{EventKind, GatewayEvent};
use crate::gateway::SharedGateway;
use crate::interaction::{CommandInvocation, ComponentInteraction, ModalSubmit};

/// Error type handlers may fail with. Deliberately unconstrained.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result of one handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

/// A lifecycle-event handler.
///
/// Registered into the gateway's own dispatch table (never into the module
/// registry): [`once`](Self::once) selects a one-shot subscription, which
/// fires at most once and is then removed by the subscription mechanism.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// The event this handler subscribes to.
    fn event(&self) -> EventKind;

    /// Whether the subscription is one-shot. Defaults to persistent.
    fn once(&self) -> bool {
        false
    }

    /// Handles one delivery of the subscribed event.
    async fn execute(&self, event: Arc<GatewayEvent>, client: SharedGateway) -> HandlerResult;
}

/// A slash-command handler, keyed by `data().name()`.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command metadata: name, description, and parameter schema.
    fn data(&self) -> &CommandMetadata;

    /// Handles one invocation of the command.
    async fn execute(&self, invocation: CommandInvocation, client: SharedGateway)
    -> HandlerResult;
}

/// A message-component handler (button or menu), keyed by its custom id.
///
/// Whether an implementation is a *button* or a *menu* handler is decided at
/// registration time by which [`ModuleSet`] method it is registered through;
/// the router verifies the inbound interaction's shape against that bucket
/// before invoking.
///
/// [`ModuleSet`]: https://docs.rs/herald-framework
#[async_trait]
pub trait ComponentHandler: Send + Sync {
    /// The custom id this handler answers to.
    fn custom_id(&self) -> &str;

    /// Handles one component activation.
    async fn execute(&self, component: ComponentInteraction, client: SharedGateway)
    -> HandlerResult;
}

/// A modal-submission handler, keyed by its custom id.
#[async_trait]
pub trait ModalHandler: Send + Sync {
    /// The custom id this handler answers to.
    fn custom_id(&self) -> &str;

    /// Handles one modal submission.
    async fn execute(&self, submit: ModalSubmit, client: SharedGateway) -> HandlerResult;
}
