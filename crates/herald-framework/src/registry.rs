//! The module registry.
//!
//! [`ModuleRegistry`] holds four typed maps — commands by name, and
//! buttons, menus, and modals by custom id. It is populated exactly once by
//! [`ModuleSet::install`](crate::modules::ModuleSet::install), then frozen
//! behind an `Arc` and read by the router for the rest of the process
//! lifetime. Event handlers never appear here; they live in the gateway's
//! own dispatch table.
//!
//! Key policy: keys are unique within each map, and a custom id may not be
//! registered as both a button and a menu. Platform convention treats
//! button and menu ids as disjoint but nothing on the wire enforces it, so
//! the collision is rejected at registration time instead of silently
//! preferring one bucket at lookup time. Buttons and modals may share an
//! id; the two are looked up by different interaction kinds and never
//! collide.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use herald_core::{CommandHandler, CommandPayload, ComponentHandler, ComponentKind, ModalHandler};

/// The three custom-id keyed maps, named after the sub-categories the
/// registration table classifies interactions into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentCategory {
    Buttons,
    Menus,
    Modals,
}

impl ComponentCategory {
    /// Lowercase name used in classification paths and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentCategory::Buttons => "buttons",
            ComponentCategory::Menus => "menus",
            ComponentCategory::Modals => "modals",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors rejected at registration time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A command whose metadata carries an empty name.
    #[error("command name is empty")]
    EmptyCommandName,

    /// A component or modal handler with an empty custom id.
    #[error("custom id is empty")]
    EmptyCustomId,

    /// The command name is already taken.
    #[error("duplicate command name '{0}'")]
    DuplicateCommand(String),

    /// The custom id is already registered in the named map (for buttons
    /// and menus this includes the sibling map).
    #[error("custom id '{id}' is already registered in {existing}")]
    DuplicateCustomId {
        id: String,
        existing: ComponentCategory,
    },
}

/// Typed lookup tables for every registered handler.
#[derive(Default)]
pub struct ModuleRegistry {
    commands: HashMap<String, Arc<dyn CommandHandler>>,
    buttons: HashMap<String, Arc<dyn ComponentHandler>>,
    menus: HashMap<String, Arc<dyn ComponentHandler>>,
    modals: HashMap<String, Arc<dyn ModalHandler>>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_command(
        &mut self,
        handler: Arc<dyn CommandHandler>,
    ) -> Result<(), RegistryError> {
        let name = handler.data().name().to_string();
        if name.is_empty() {
            return Err(RegistryError::EmptyCommandName);
        }
        if self.commands.contains_key(&name) {
            return Err(RegistryError::DuplicateCommand(name));
        }
        self.commands.insert(name, handler);
        Ok(())
    }

    pub(crate) fn insert_button(
        &mut self,
        handler: Arc<dyn ComponentHandler>,
    ) -> Result<(), RegistryError> {
        let id = Self::component_key(handler.custom_id())?;
        self.check_component_id(&id)?;
        self.buttons.insert(id, handler);
        Ok(())
    }

    pub(crate) fn insert_menu(
        &mut self,
        handler: Arc<dyn ComponentHandler>,
    ) -> Result<(), RegistryError> {
        let id = Self::component_key(handler.custom_id())?;
        self.check_component_id(&id)?;
        self.menus.insert(id, handler);
        Ok(())
    }

    pub(crate) fn insert_modal(
        &mut self,
        handler: Arc<dyn ModalHandler>,
    ) -> Result<(), RegistryError> {
        let id = Self::component_key(handler.custom_id())?;
        if self.modals.contains_key(&id) {
            return Err(RegistryError::DuplicateCustomId {
                id,
                existing: ComponentCategory::Modals,
            });
        }
        self.modals.insert(id, handler);
        Ok(())
    }

    fn component_key(custom_id: &str) -> Result<String, RegistryError> {
        if custom_id.is_empty() {
            return Err(RegistryError::EmptyCustomId);
        }
        Ok(custom_id.to_string())
    }

    /// Buttons and menus share one id namespace.
    fn check_component_id(&self, id: &str) -> Result<(), RegistryError> {
        if self.buttons.contains_key(id) {
            return Err(RegistryError::DuplicateCustomId {
                id: id.to_string(),
                existing: ComponentCategory::Buttons,
            });
        }
        if self.menus.contains_key(id) {
            return Err(RegistryError::DuplicateCustomId {
                id: id.to_string(),
                existing: ComponentCategory::Menus,
            });
        }
        Ok(())
    }

    /// Looks up a command handler by name.
    pub fn command(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.commands.get(name).map(Arc::clone)
    }

    /// Looks up a component handler by custom id, buttons before menus.
    ///
    /// Returns the bucket the id was registered under so the caller can
    /// verify the inbound interaction's shape against it.
    pub fn component(&self, custom_id: &str) -> Option<(ComponentKind, Arc<dyn ComponentHandler>)> {
        if let Some(handler) = self.buttons.get(custom_id) {
            return Some((ComponentKind::Button, Arc::clone(handler)));
        }
        self.menus
            .get(custom_id)
            .map(|handler| (ComponentKind::Menu, Arc::clone(handler)))
    }

    /// Looks up a modal handler by custom id.
    pub fn modal(&self, custom_id: &str) -> Option<Arc<dyn ModalHandler>> {
        self.modals.get(custom_id).map(Arc::clone)
    }

    /// The wire payloads of every registered command, sorted by name so the
    /// bulk upload is deterministic.
    pub fn command_payloads(&self) -> Vec<CommandPayload> {
        let mut payloads: Vec<CommandPayload> = self
            .commands
            .values()
            .map(|handler| handler.data().to_payload())
            .collect();
        payloads.sort_by(|a, b| a.name.cmp(&b.name));
        payloads
    }

    /// Number of registered commands.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Per-map counts.
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            commands: self.commands.len(),
            buttons: self.buttons.len(),
            menus: self.menus.len(),
            modals: self.modals.len(),
        }
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("ModuleRegistry")
            .field("commands", &stats.commands)
            .field("buttons", &stats.buttons)
            .field("menus", &stats.menus)
            .field("modals", &stats.modals)
            .finish()
    }
}

/// Counts per registry map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub commands: usize,
    pub buttons: usize,
    pub menus: usize,
    pub modals: usize,
}

impl RegistryStats {
    /// Total handlers across all four maps.
    pub fn total(&self) -> usize {
        self.commands + self.buttons + self.menus + self.modals
    }
}

impl fmt::Display for RegistryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} commands, {} buttons, {} menus, {} modals",
            self.commands, self.buttons, self.menus, self.modals
        )
    }
}
