//! # Herald Core
//!
//! Platform boundary types for the Herald automation client.
//!
//! This crate defines everything Herald needs to talk *about* the chat
//! platform without owning the connection to it:
//!
//! - **Event model**: gateway event identifiers and payloads ([`EventKind`],
//!   [`GatewayEvent`])
//! - **Interaction model**: the three inbound interaction kinds
//!   ([`Interaction`])
//! - **Command metadata**: slash-command definitions and their wire payloads
//!   ([`CommandMetadata`], [`CommandPayload`])
//! - **Handler contracts**: the capability traits every loadable module
//!   implements ([`EventHandler`], [`CommandHandler`], [`ComponentHandler`],
//!   [`ModalHandler`])
//! - **Gateway trait**: the surface the platform client library must provide
//!   ([`Gateway`]), plus an in-process [`LocalGateway`] used by tests and
//!   local runs
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  events   ┌──────────────────┐  lookup  ┌───────────────┐
//! │   Gateway    │──────────▶│ InteractionRouter │─────────▶│ ModuleRegistry │
//! │ (transport)  │           │   (framework)     │          │  (framework)   │
//! └──────────────┘           └──────────────────┘          └───────────────┘
//! ```
//!
//! The actual network transport (connection handling, heartbeats, rate
//! limiting) is owned by the platform client library behind the [`Gateway`]
//! trait. Herald only concerns itself with registration and dispatch.

pub mod command;
pub mod error;
pub mod event;
pub mod gateway;
pub mod handler;
pub mod interaction;
pub mod local;

pub use command::{CommandMetadata, CommandOption, CommandPayload, OptionKind};
pub use error::{ApiError, ApiResult, GatewayError, GatewayResult};
pub use event::{ChannelMessage, EventKind, GatewayEvent, Session, User};
pub use gateway::{Gateway, SharedGateway};
pub use handler::{
    CommandHandler, ComponentHandler, EventHandler, HandlerError, HandlerResult, ModalHandler,
};
pub use interaction::{
    CommandInvocation, ComponentInteraction, ComponentKind, Interaction, ModalSubmit, OptionValue,
};
pub use local::LocalGateway;
