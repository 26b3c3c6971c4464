//! Inbound interaction model.
//!
//! An [`Interaction`] arrives over the gateway's generic
//! interaction-notification channel and carries exactly one of three kinds:
//! a slash-command invocation, a message-component activation (button or
//! select menu), or a modal submission. The dispatch router matches on the
//! kind and consults the corresponding registry bucket.

use std::fmt;

/// The runtime shape of a message component.
///
/// A component interaction declares which widget produced it. The router
/// verifies this against the registry bucket a custom id was registered
/// under before invoking the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// A clickable button.
    Button,
    /// A select menu (any variant).
    Menu,
}

impl ComponentKind {
    /// Lowercase name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Button => "button",
            ComponentKind::Menu => "menu",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value supplied for a command option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

/// A slash-command invocation.
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    /// The invoked command's name, as registered on the platform.
    pub name: String,
    /// Option values supplied by the user, in submission order.
    pub options: Vec<(String, OptionValue)>,
}

impl CommandInvocation {
    /// Creates an invocation with no options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    /// Looks up an option value by name.
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

/// A button press or menu selection.
#[derive(Debug, Clone)]
pub struct ComponentInteraction {
    /// The custom id baked into the component when it was sent.
    pub custom_id: String,
    /// The widget shape this interaction arrived as.
    pub kind: ComponentKind,
    /// Selected values; empty for buttons.
    pub values: Vec<String>,
}

impl ComponentInteraction {
    /// Creates a button press.
    pub fn button(custom_id: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            kind: ComponentKind::Button,
            values: Vec::new(),
        }
    }

    /// Creates a menu selection.
    pub fn menu(custom_id: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            kind: ComponentKind::Menu,
            values,
        }
    }
}

/// A modal dialog submission.
#[derive(Debug, Clone)]
pub struct ModalSubmit {
    /// The custom id baked into the modal when it was opened.
    pub custom_id: String,
    /// Submitted field values, keyed by field id.
    pub fields: Vec<(String, String)>,
}

impl ModalSubmit {
    /// Creates a submission with the given fields.
    pub fn new(custom_id: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self {
            custom_id: custom_id.into(),
            fields,
        }
    }

    /// Looks up a submitted field by id.
    pub fn field(&self, id: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == id)
            .map(|(_, v)| v.as_str())
    }
}

/// One inbound interaction, tagged by its declared kind.
///
/// Exactly one variant is active per delivery; the router never falls
/// through from one kind to another.
#[derive(Debug, Clone)]
pub enum Interaction {
    /// A slash-command invocation.
    Command(CommandInvocation),
    /// A button press or menu selection.
    Component(ComponentInteraction),
    /// A modal submission.
    ModalSubmit(ModalSubmit),
}

impl Interaction {
    /// Short name of the interaction kind, for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Interaction::Command(_) => "command",
            Interaction::Component(c) => c.kind.as_str(),
            Interaction::ModalSubmit(_) => "modal_submit",
        }
    }
}
