//! # Herald
//!
//! A typed, modular automation client for chat platforms.
//!
//! Herald connects to a remote gateway, registers a set of *modules* —
//! slash commands, lifecycle-event handlers, and interactive-component
//! handlers — into typed lookup tables, and routes inbound platform events
//! to the matching handler with per-handler failure isolation.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐  install   ┌────────────────┐   lookup   ┌──────────────┐
//! │ ModuleSet │───────────▶│ ModuleRegistry │◀───────────│ Interaction  │
//! │ (startup) │            │    (frozen)    │            │   Router     │
//! └───────────┘            └────────────────┘            └──────────────┘
//!       │  events                                               ▲
//!       ▼                                                       │ notifications
//! ┌──────────────────────── Gateway (platform client) ──────────┴─────────┐
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **herald-core**: the platform boundary — event/interaction/command
//!   model, handler contracts, the [`Gateway`](herald_core::Gateway) trait
//! - **herald-framework**: registration engine, registry, dispatch router
//! - **herald-runtime**: configuration, logging, the client startup
//!   sequence
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().load()?;
//!     let gateway: SharedGateway = connect_platform_gateway();
//!
//!     let mut client = Client::new(config, gateway).modules(
//!         ModuleSet::new()
//!             .command(Ping::new())
//!             .event(ReadyGreeter)
//!             .button(ConfirmButton),
//!     );
//!     client.run().await?;
//!     Ok(())
//! }
//! ```

pub use herald_core as core;
pub use herald_framework as framework;
pub use herald_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use herald_runtime::{Client, ClientConfig, ConfigLoader, StartupError};

    // Module registration
    pub use herald_framework::{InstallReport, LoadStats, ModuleRegistry, ModuleSet};

    // Handler contracts
    pub use herald_core::{
        CommandHandler, ComponentHandler, EventHandler, HandlerError, HandlerResult, ModalHandler,
    };

    // Command metadata
    pub use herald_core::{CommandMetadata, CommandOption, OptionKind};

    // Event and interaction model
    pub use herald_core::{
        CommandInvocation, ComponentInteraction, ComponentKind, EventKind, GatewayEvent,
        Interaction, ModalSubmit, OptionValue, Session,
    };

    // Gateway boundary
    pub use herald_core::{Gateway, LocalGateway, SharedGateway};
}
