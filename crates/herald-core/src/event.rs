//! Gateway event model.
//!
//! This module defines the event identifiers handlers subscribe to
//! ([`EventKind`]) and the payloads delivered for them ([`GatewayEvent`]).
//!
//! The object model is intentionally minimal: Herald only needs enough shape
//! to route an event to the right handler. Everything else about a platform
//! object (permissions, flags, nested entities) belongs to the platform
//! client library behind the [`Gateway`](crate::gateway::Gateway) trait.
//! Events without a dedicated payload type arrive as raw JSON.

use std::fmt;

use serde_json::Value;

use crate::interaction::Interaction;

/// Identifier of a gateway event type.
///
/// Event handlers declare which of these they subscribe to via
/// [`EventHandler::event`](crate::handler::EventHandler::event). One
/// subscription slot exists per registered handler in the gateway's own
/// dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The session finished identifying and is ready to receive events.
    Ready,
    /// A dropped session was resumed.
    Resumed,
    /// An interaction (command, component, or modal submit) was received.
    InteractionCreate,
    /// A message was posted in a channel the client can see.
    MessageCreate,
    /// A guild became available to the session.
    GuildCreate,
}

impl EventKind {
    /// The canonical wire name of this event.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Ready => "ready",
            EventKind::Resumed => "resumed",
            EventKind::InteractionCreate => "interaction_create",
            EventKind::MessageCreate => "message_create",
            EventKind::GuildCreate => "guild_create",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A platform user, reduced to what dispatch and logging need.
#[derive(Debug, Clone)]
pub struct User {
    /// Platform-assigned user id.
    pub id: String,
    /// Display name.
    pub username: String,
}

/// Session information returned by a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    /// The account the client authenticated as.
    pub user: User,
    /// Opaque session identifier assigned by the gateway.
    pub session_id: String,
}

/// A channel message, reduced to what handlers commonly inspect.
#[derive(Debug, Clone)]
pub struct ChannelMessage {
    /// Message id.
    pub id: String,
    /// Channel the message was posted in.
    pub channel_id: String,
    /// Message author.
    pub author: User,
    /// Plain-text content.
    pub content: String,
}

/// A single inbound gateway event with its payload.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// See [`EventKind::Ready`].
    Ready(Session),
    /// See [`EventKind::Resumed`].
    Resumed,
    /// See [`EventKind::InteractionCreate`].
    InteractionCreate(Interaction),
    /// See [`EventKind::MessageCreate`].
    MessageCreate(ChannelMessage),
    /// See [`EventKind::GuildCreate`]. The guild object is passed through
    /// as raw JSON; Herald does not model it.
    GuildCreate(Value),
}

impl GatewayEvent {
    /// Returns the identifier this event is dispatched under.
    pub fn kind(&self) -> EventKind {
        match self {
            GatewayEvent::Ready(_) => EventKind::Ready,
            GatewayEvent::Resumed => EventKind::Resumed,
            GatewayEvent::InteractionCreate(_) => EventKind::InteractionCreate,
            GatewayEvent::MessageCreate(_) => EventKind::MessageCreate,
            GatewayEvent::GuildCreate(_) => EventKind::GuildCreate,
        }
    }
}
