//! Slash-command metadata and wire payloads.
//!
//! [`CommandMetadata`] is what a [`CommandHandler`](crate::handler::CommandHandler)
//! describes itself with: a name, a description, and a parameter schema.
//! After login the runtime maps every registered command to a
//! [`CommandPayload`] and uploads the whole list to the platform in one bulk
//! round-trip.

use serde::{Deserialize, Serialize};

/// The type of a command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
    User,
    Channel,
}

/// One parameter in a command's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option type.
    #[serde(rename = "type")]
    pub kind: OptionKind,
    /// Option name shown to the user.
    pub name: String,
    /// Help text shown next to the option.
    pub description: String,
    /// Whether the user must supply the option.
    #[serde(default)]
    pub required: bool,
}

impl CommandOption {
    /// Creates an optional option of the given kind.
    pub fn new(kind: OptionKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required: false,
        }
    }

    /// Marks the option as required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Metadata describing one slash command.
///
/// Built with a fluent constructor:
///
/// ```rust
/// use herald_core::{CommandMetadata, CommandOption, OptionKind};
///
/// let data = CommandMetadata::new("echo")
///     .description("Repeats what you said")
///     .option(CommandOption::new(OptionKind::String, "text", "What to repeat").required(true));
/// assert_eq!(data.name(), "echo");
/// ```
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    name: String,
    description: String,
    options: Vec<CommandOption>,
}

impl CommandMetadata {
    /// Creates metadata for a command with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            options: Vec::new(),
        }
    }

    /// Sets the command description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends an option to the parameter schema.
    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// The command name; also the registry key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The command description.
    pub fn describe(&self) -> &str {
        &self.description
    }

    /// The parameter schema.
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    /// Converts the metadata into its wire representation.
    pub fn to_payload(&self) -> CommandPayload {
        CommandPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            options: self.options.clone(),
        }
    }
}

/// Wire-format form of one command, as uploaded during bulk registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandPayload {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_serializes_to_wire_shape() {
        let payload = CommandMetadata::new("ban")
            .description("Ban a user")
            .option(CommandOption::new(OptionKind::User, "target", "Who to ban").required(true))
            .option(CommandOption::new(OptionKind::String, "reason", "Why"))
            .to_payload();

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "ban",
                "description": "Ban a user",
                "options": [
                    {"type": "user", "name": "target", "description": "Who to ban", "required": true},
                    {"type": "string", "name": "reason", "description": "Why", "required": false},
                ],
            })
        );
    }

    #[test]
    fn optionless_payload_omits_options_field() {
        let payload = CommandMetadata::new("ping").description("pong").to_payload();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, json!({"name": "ping", "description": "pong"}));
    }

    #[test]
    fn payload_round_trips() {
        let payload = CommandMetadata::new("ping").description("pong").to_payload();
        let text = serde_json::to_string(&payload).unwrap();
        let back: CommandPayload = serde_json::from_str(&text).unwrap();
        assert_eq!(back, payload);
    }
}
