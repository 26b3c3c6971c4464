//! The module registration engine.
//!
//! [`ModuleSet`] is an explicit startup-time registration table: each
//! handler is registered under one of three categories — `commands`,
//! `events`, or `interactions` with a sub-category of `buttons`, `menus`,
//! or `modals` — mirroring the directory layout bots conventionally keep
//! their modules in. [`install`](ModuleSet::install) consumes the set,
//! validates every entry, and populates the [`ModuleRegistry`] (or, for
//! events, the gateway's own dispatch table).
//!
//! Installation never aborts on a bad module: a failing entry is logged as
//! a warning, counted, and skipped, and every other entry still installs.
//! The one fatal condition is an *empty* set — that is a misconfiguration
//! signal, not a recoverable runtime state, and the caller is expected to
//! exit.

use std::fmt;
use std::sync::Arc;

use futures::future;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use herald_core::{
    CommandHandler, ComponentHandler, EventHandler, Gateway, ModalHandler, SharedGateway,
};

use crate::registry::{ComponentCategory, ModuleRegistry, RegistryError};

/// Top-level classification of a registered module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Slash commands, keyed by metadata name.
    Commands,
    /// Lifecycle events, registered on the gateway.
    Events,
    /// Interactive components, split by sub-category.
    Interactions(ComponentCategory),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Commands => f.write_str("commands"),
            Category::Events => f.write_str("events"),
            Category::Interactions(sub) => write!(f, "interactions/{sub}"),
        }
    }
}

enum ModuleDecl {
    Event(Arc<dyn EventHandler>),
    Command(Arc<dyn CommandHandler>),
    Button(Arc<dyn ComponentHandler>),
    Menu(Arc<dyn ComponentHandler>),
    Modal(Arc<dyn ModalHandler>),
}

impl ModuleDecl {
    fn category(&self) -> Category {
        match self {
            ModuleDecl::Event(_) => Category::Events,
            ModuleDecl::Command(_) => Category::Commands,
            ModuleDecl::Button(_) => Category::Interactions(ComponentCategory::Buttons),
            ModuleDecl::Menu(_) => Category::Interactions(ComponentCategory::Menus),
            ModuleDecl::Modal(_) => Category::Interactions(ComponentCategory::Modals),
        }
    }

    fn label(&self) -> String {
        match self {
            ModuleDecl::Event(h) => h.event().as_str().to_string(),
            ModuleDecl::Command(h) => h.data().name().to_string(),
            ModuleDecl::Button(h) => h.custom_id().to_string(),
            ModuleDecl::Menu(h) => h.custom_id().to_string(),
            ModuleDecl::Modal(h) => h.custom_id().to_string(),
        }
    }

    fn classify(
        self,
        gateway: &SharedGateway,
        registry: &RwLock<ModuleRegistry>,
    ) -> Result<(), RegistryError> {
        match self {
            ModuleDecl::Event(handler) => {
                if handler.once() {
                    gateway.once(handler.event(), handler);
                } else {
                    gateway.on(handler.event(), handler);
                }
                Ok(())
            }
            ModuleDecl::Command(handler) => registry.write().insert_command(handler),
            ModuleDecl::Button(handler) => registry.write().insert_button(handler),
            ModuleDecl::Menu(handler) => registry.write().insert_menu(handler),
            ModuleDecl::Modal(handler) => registry.write().insert_modal(handler),
        }
    }
}

/// The startup-time registration table.
///
/// # Example
///
/// ```rust,ignore
/// let modules = ModuleSet::new()
///     .event(ReadyGreeter)
///     .command(Ping::new())
///     .button(ConfirmButton)
///     .modal(FeedbackForm);
/// let report = modules.install(&gateway).await?;
/// ```
#[derive(Default)]
pub struct ModuleSet {
    entries: Vec<ModuleDecl>,
}

impl ModuleSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a lifecycle-event handler.
    pub fn event(mut self, handler: impl EventHandler + 'static) -> Self {
        self.entries.push(ModuleDecl::Event(Arc::new(handler)));
        self
    }

    /// Registers a slash command.
    pub fn command(mut self, handler: impl CommandHandler + 'static) -> Self {
        self.entries.push(ModuleDecl::Command(Arc::new(handler)));
        self
    }

    /// Registers a button handler.
    pub fn button(mut self, handler: impl ComponentHandler + 'static) -> Self {
        self.entries.push(ModuleDecl::Button(Arc::new(handler)));
        self
    }

    /// Registers a menu handler.
    pub fn menu(mut self, handler: impl ComponentHandler + 'static) -> Self {
        self.entries.push(ModuleDecl::Menu(Arc::new(handler)));
        self
    }

    /// Registers a modal handler.
    pub fn modal(mut self, handler: impl ModalHandler + 'static) -> Self {
        self.entries.push(ModuleDecl::Modal(Arc::new(handler)));
        self
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Installs every registered module.
    ///
    /// Entries are processed jointly with per-entry failure isolation:
    /// event handlers are subscribed on `gateway` (one-shot when
    /// [`once`](herald_core::EventHandler::once) is set), everything else
    /// is inserted into the registry under its category's map. Entries
    /// rejected by validation are warned and counted, never fatal.
    ///
    /// Returns the frozen registry and the load summary, or
    /// [`InstallError::NoModules`] when the set is empty.
    pub async fn install(self, gateway: &SharedGateway) -> Result<InstallReport, InstallError> {
        let total = self.entries.len();
        if total == 0 {
            error!("no modules were registered in any category");
            return Err(InstallError::NoModules);
        }

        let registry = RwLock::new(ModuleRegistry::new());

        let outcomes = future::join_all(self.entries.into_iter().map(|module| {
            let registry = &registry;
            let gateway = Arc::clone(gateway);
            async move {
                let category = module.category();
                let label = module.label();
                match module.classify(&gateway, registry) {
                    Ok(()) => {
                        debug!(category = %category, module = %label, "module registered");
                        Some(category)
                    }
                    Err(e) => {
                        warn!(category = %category, module = %label, error = %e, "module skipped");
                        None
                    }
                }
            }
        }))
        .await;

        let mut stats = LoadStats {
            total,
            ..LoadStats::default()
        };
        for category in outcomes.into_iter().flatten() {
            stats.loaded += 1;
            match category {
                Category::Events => stats.events += 1,
                Category::Commands => stats.commands += 1,
                Category::Interactions(ComponentCategory::Buttons) => stats.buttons += 1,
                Category::Interactions(ComponentCategory::Menus) => stats.menus += 1,
                Category::Interactions(ComponentCategory::Modals) => stats.modals += 1,
            }
        }
        stats.failed = total - stats.loaded;

        info!(
            commands = stats.commands,
            interactions = stats.buttons + stats.menus + stats.modals,
            events = stats.events,
            loaded = stats.loaded,
            total,
            "module install complete"
        );

        Ok(InstallReport {
            registry: Arc::new(registry.into_inner()),
            stats,
        })
    }
}

/// The one fatal installation failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InstallError {
    /// The module set was empty — nothing to run means misconfiguration.
    #[error("no modules were registered in any category")]
    NoModules,
}

/// Load summary emitted after installation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Modules registered in the set.
    pub total: usize,
    /// Modules that installed successfully.
    pub loaded: usize,
    /// Modules skipped by validation.
    pub failed: usize,
    /// Event subscriptions placed on the gateway.
    pub events: usize,
    pub commands: usize,
    pub buttons: usize,
    pub menus: usize,
    pub modals: usize,
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "loaded {}/{} modules ({} events, {} commands, {} buttons, {} menus, {} modals)",
            self.loaded,
            self.total,
            self.events,
            self.commands,
            self.buttons,
            self.menus,
            self.modals
        )
    }
}

/// Result of a successful [`ModuleSet::install`].
pub struct InstallReport {
    /// The frozen registry; dispatch reads it for the process lifetime.
    pub registry: Arc<ModuleRegistry>,
    /// Load summary.
    pub stats: LoadStats,
}
