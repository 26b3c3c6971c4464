//! The gateway trait — Herald's view of the platform client library.
//!
//! Everything network-shaped lives behind this trait: the login handshake,
//! the event subscription table, bulk command registration, and the outbound
//! API surface handlers use to respond. Herald never opens a socket itself.
//!
//! Implementations must uphold two contracts:
//!
//! - [`on`](Gateway::on) subscriptions persist for the connection lifetime;
//!   [`once`](Gateway::once) subscriptions fire at most once and are removed
//!   by the gateway, not by the caller.
//! - A handler failure during event delivery is contained and reported by
//!   the gateway; it never tears down the connection or other handlers.
//!
//! [`LocalGateway`](crate::local::LocalGateway) is the in-process reference
//! implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::command::CommandPayload;
use crate::error::{ApiResult, GatewayResult};
use crate::event::{EventKind, Session};
use crate::handler::EventHandler;

/// Shared handle to a gateway; this is what handlers receive as `client`.
pub type SharedGateway = Arc<dyn Gateway>;

/// The surface the platform client library provides to Herald.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Adds a persistent subscription for `kind` to the gateway's dispatch
    /// table.
    fn on(&self, kind: EventKind, handler: Arc<dyn EventHandler>);

    /// Adds a one-shot subscription for `kind`. The gateway removes the
    /// entry after its first delivery.
    fn once(&self, kind: EventKind, handler: Arc<dyn EventHandler>);

    /// Authenticates with the platform and opens the event stream.
    async fn login(&self, token: &str) -> GatewayResult<Session>;

    /// Replaces the platform-side command list with `commands` in a single
    /// bulk round-trip.
    async fn overwrite_commands(&self, commands: &[CommandPayload]) -> GatewayResult<()>;

    /// Performs a raw outbound API call.
    ///
    /// This is the low-level surface handlers respond through; `action`
    /// names the platform operation and `params` carries its JSON body.
    async fn call_api(&self, action: &str, params: Value) -> ApiResult<Value>;
}
