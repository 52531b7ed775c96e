//! Command metadata and execution requests
//!
//! The server publishes a catalogue of invocable commands, each with a list
//! of named, typed parameters. A [`Command`] decoded from that catalogue is
//! the contract for building its execution request: every declared parameter
//! must be supplied, and the values are sent keyed by parameter name under a
//! request whose method is the command's own name.
//!
//! Type checking here is advisory. The server is authoritative, so a value
//! that does not match its declared [`ArgType`] is logged and still sent.

use mcmanager_core::{envelope, JsonRpcRequest, ValidationError};
use serde_json::{Map, Value};
use std::fmt;

/// Argument kind declared by the server for a command parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgType {
    /// Free-form text
    String,
    /// Whole number
    Integer,
    /// Any number, fractional included
    Number,
    /// `true` or `false`
    Boolean,
    /// A tag this client does not recognize, kept verbatim
    Unknown(String),
}

impl ArgType {
    /// Parse a server-supplied type tag
    ///
    /// Matching is case-insensitive and accepts the common aliases. An
    /// unrecognized tag is not an error: it becomes [`ArgType::Unknown`] so a
    /// server that adds new kinds does not break catalogue decoding.
    ///
    /// ```rust
    /// use mcmanager_client::ArgType;
    ///
    /// assert_eq!(ArgType::from_tag("INT"), ArgType::Integer);
    /// assert_eq!(ArgType::from_tag("location"), ArgType::Unknown("location".into()));
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "string" | "str" | "text" => ArgType::String,
            "int" | "integer" | "long" | "short" | "byte" => ArgType::Integer,
            "number" | "double" | "float" | "decimal" => ArgType::Number,
            "bool" | "boolean" => ArgType::Boolean,
            _ => ArgType::Unknown(tag.to_string()),
        }
    }

    /// Canonical tag for this kind
    pub fn tag(&self) -> &str {
        match self {
            ArgType::String => "string",
            ArgType::Integer => "int",
            ArgType::Number => "number",
            ArgType::Boolean => "boolean",
            ArgType::Unknown(tag) => tag,
        }
    }

    /// Whether `value` fits this kind; unknown kinds accept anything
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ArgType::String => value.is_string(),
            ArgType::Integer => value.is_i64() || value.is_u64(),
            ArgType::Number => value.is_number(),
            ArgType::Boolean => value.is_boolean(),
            ArgType::Unknown(_) => true,
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One declared parameter of a command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Name the argument is keyed by
    pub name: String,
    /// Declared kind
    pub arg_type: ArgType,
}

impl Parameter {
    /// Create a parameter declaration
    pub fn new(name: impl Into<String>, arg_type: ArgType) -> Self {
        Self {
            name: name.into(),
            arg_type,
        }
    }
}

/// A remotely invocable command and its parameter schema
///
/// Immutable once built. Parameters keep the order the server declared them
/// in; names are expected to be unique, and lookups return the first match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    name: String,
    params: Vec<Parameter>,
}

impl Command {
    /// Create a command from its name and declared parameters
    pub fn new(name: impl Into<String>, params: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Command name, also used as the remote method name when executing
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameters in server order
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Declared kind of parameter `name`
    pub fn param(&self, name: &str) -> Option<&ArgType> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.arg_type)
    }

    /// Serialize `arguments` into the params payload of an execution request
    ///
    /// Every declared parameter must have a value. Keys that the command does
    /// not declare are forwarded unchanged, and values whose JSON type does
    /// not match the declared kind are logged but not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingArgument`] for the first declared
    /// parameter with no value in `arguments`.
    pub fn to_execution_params(
        &self,
        arguments: &Map<String, Value>,
    ) -> Result<Value, ValidationError> {
        for param in &self.params {
            let value = arguments
                .get(&param.name)
                .ok_or_else(|| ValidationError::MissingArgument {
                    command: self.name.clone(),
                    parameter: param.name.clone(),
                })?;

            if !param.arg_type.accepts(value) {
                tracing::warn!(
                    command = %self.name,
                    parameter = %param.name,
                    expected = %param.arg_type,
                    "Argument does not match declared type; sending as-is"
                );
            }
        }

        for key in arguments.keys() {
            if self.param(key).is_none() {
                tracing::debug!(command = %self.name, argument = %key, "Forwarding undeclared argument");
            }
        }

        Ok(Value::Object(arguments.clone()))
    }

    /// Build the full request envelope that executes this command
    ///
    /// # Errors
    ///
    /// Fails if an argument is missing or the command name is empty.
    pub fn execution_request(
        &self,
        arguments: &Map<String, Value>,
    ) -> Result<JsonRpcRequest, ValidationError> {
        let params = self.to_execution_params(arguments)?;
        envelope::build_request(self.name.clone(), Some(params))
    }
}

impl fmt::Display for Command {
    /// Formats as `name(param: type, ...)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", param.name, param.arg_type)?;
        }
        f.write_str(")")
    }
}
