//! # Herald Framework
//!
//! Module registration and dispatch for the Herald automation client.
//!
//! This crate owns the two pieces of Herald with real design decisions in
//! them:
//!
//! - **Registration engine** ([`ModuleSet`]): an explicit startup-time
//!   registration table. Every handler is registered under one of three
//!   categories (commands, events, interactions — the latter split into
//!   buttons, menus, and modals), validated, and installed into either the
//!   [`ModuleRegistry`] or the gateway's own event dispatch table.
//! - **Dispatch router** ([`InteractionRouter`]): receives inbound
//!   interactions, resolves the matching handler in the frozen registry,
//!   and invokes it with per-invocation failure containment.
//!
//! ```text
//!  ModuleSet ──install()──▶ ModuleRegistry (frozen) ──▶ InteractionRouter
//!      │                                                       ▲
//!      └── events ──▶ gateway dispatch table ──────────────────┘
//! ```
//!
//! Installation happens exactly once, before login; after that the registry
//! is read-only and dispatch needs no locks.

pub mod modules;
pub mod registry;
pub mod router;

pub use modules::{Category, InstallError, InstallReport, LoadStats, ModuleSet};
pub use registry::{ComponentCategory, ModuleRegistry, RegistryError, RegistryStats};
pub use router::InteractionRouter;
