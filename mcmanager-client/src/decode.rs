//! Per-method result decoders
//!
//! Each decoder takes the opaque `result` value of a validated response and
//! either produces the typed domain value or a [`DecodeError`] naming the
//! exact location that did not match (`result.mods[1].version`, ...).
//!
//! The server wraps list results in a single-key object (`{"mods": [...]}`,
//! `{"methods": [...]}`, `{"commands": {...}}`). The list decoders accept
//! both that wrapped form and the bare list or mapping.

use crate::command::{ArgType, Command, Parameter};
use crate::model::{DynamicMap, ExecutionResult, Mod, ServerInfo};
use mcmanager_core::{codec::json_type_name, DecodeError};
use serde_json::{Map, Value};

const ROOT: &str = "result";

/// Decode the `getAllCommands` catalogue
///
/// Each entry maps a command name to a descriptor holding two index-aligned
/// sequences, `params` (names) and `paramTypes` (type tags). The catalogue
/// may be wrapped as `{"commands": {...}}`; the `commands` entry is read as
/// a descriptor only when it has an array `params` and a `paramTypes` field,
/// so both a real command named `commands` and a wrapped catalogue holding
/// a command named `params` decode correctly.
///
/// A parameter name declared twice keeps its first position and its last
/// declared type, with a warning.
///
/// # Errors
///
/// Fails on any missing or mistyped field and on `params`/`paramTypes` of
/// different lengths.
pub fn decode_commands(result: Value) -> Result<Vec<Command>, DecodeError> {
    let root = expect_object(&result, ROOT)?;

    let (catalogue, path) = match root.get("commands") {
        Some(Value::Object(inner)) if !is_descriptor(inner) => {
            (inner, format!("{}.commands", ROOT))
        }
        _ => (root, ROOT.to_string()),
    };

    catalogue
        .iter()
        .map(|(name, descriptor)| decode_command(name, descriptor, &format!("{}.{}", path, name)))
        .collect()
}

fn is_descriptor(object: &Map<String, Value>) -> bool {
    matches!(object.get("params"), Some(Value::Array(_))) && object.contains_key("paramTypes")
}

fn decode_command(name: &str, descriptor: &Value, path: &str) -> Result<Command, DecodeError> {
    let descriptor = expect_object(descriptor, path)?;
    let names_path = format!("{}.params", path);
    let tags_path = format!("{}.paramTypes", path);
    let names = string_list(expect_array(field(descriptor, path, "params")?, &names_path)?, &names_path)?;
    let tags = string_list(expect_array(field(descriptor, path, "paramTypes")?, &tags_path)?, &tags_path)?;

    if names.len() != tags.len() {
        return Err(DecodeError::LengthMismatch {
            command: name.to_string(),
            params: names.len(),
            param_types: tags.len(),
        });
    }

    let mut params: Vec<Parameter> = Vec::with_capacity(names.len());
    for (param, tag) in names.into_iter().zip(tags) {
        let arg_type = ArgType::from_tag(tag);
        match params.iter_mut().find(|p| p.name == param) {
            Some(existing) => {
                tracing::warn!(command = %name, parameter = %param, "Duplicate parameter, keeping last declared type");
                existing.arg_type = arg_type;
            }
            None => params.push(Parameter::new(param, arg_type)),
        }
    }

    Ok(Command::new(name, params))
}

/// Decode the `systemInfo` result; any object passes through unchanged
///
/// # Errors
///
/// Fails only if the result is not an object.
pub fn decode_server_info(result: Value) -> Result<ServerInfo, DecodeError> {
    into_dynamic_map(result)
}

/// Decode the result of executing a command; any object passes through
///
/// # Errors
///
/// Fails only if the result is not an object.
pub fn decode_execution_result(result: Value) -> Result<ExecutionResult, DecodeError> {
    into_dynamic_map(result)
}

/// Decode the `getMods` list, preserving server order
///
/// # Errors
///
/// Fails if the list is missing, or any entry lacks a string `name` or
/// `version`.
pub fn decode_mods(result: Value) -> Result<Vec<Mod>, DecodeError> {
    let (entries, path) = unwrap_list(&result, "mods")?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let entry_path = format!("{}[{}]", path, i);
            let descriptor = expect_object(entry, &entry_path)?;
            let name = expect_str(field(descriptor, &entry_path, "name")?, &format!("{}.name", entry_path))?;
            let version = expect_str(
                field(descriptor, &entry_path, "version")?,
                &format!("{}.version", entry_path),
            )?;
            Ok(Mod::new(name, version))
        })
        .collect()
}

/// Decode the `getAllMethods` list, preserving server order
///
/// # Errors
///
/// Fails if the list is missing or any element is not a string.
pub fn decode_methods(result: Value) -> Result<Vec<String>, DecodeError> {
    let (entries, path) = unwrap_list(&result, "methods")?;
    Ok(string_list(entries, &path)?
        .into_iter()
        .map(str::to_string)
        .collect())
}

/// Decode the `stopServer` result
///
/// Nothing is read: a validated response is the whole success signal.
pub fn decode_stop(_result: Value) -> Result<(), DecodeError> {
    Ok(())
}

fn into_dynamic_map(result: Value) -> Result<DynamicMap, DecodeError> {
    match result {
        Value::Object(map) => Ok(DynamicMap::from(map)),
        other => Err(wrong_type(ROOT, "object", &other)),
    }
}

/// Accept `{"<key>": [...]}` or a bare `[...]`
fn unwrap_list<'a>(result: &'a Value, key: &str) -> Result<(&'a [Value], String), DecodeError> {
    match result {
        Value::Array(entries) => Ok((entries.as_slice(), ROOT.to_string())),
        Value::Object(map) => {
            let path = format!("{}.{}", ROOT, key);
            let entries = expect_array(field(map, ROOT, key)?, &path)?;
            Ok((entries, path))
        }
        other => Err(wrong_type(ROOT, "array", other)),
    }
}

fn string_list<'a>(entries: &'a [Value], path: &str) -> Result<Vec<&'a str>, DecodeError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, item)| expect_str(item, &format!("{}[{}]", path, i)))
        .collect()
}

fn field<'a>(object: &'a Map<String, Value>, path: &str, key: &str) -> Result<&'a Value, DecodeError> {
    object.get(key).ok_or_else(|| DecodeError::MissingField {
        path: format!("{}.{}", path, key),
    })
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, DecodeError> {
    value.as_object().ok_or_else(|| wrong_type(path, "object", value))
}

fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a [Value], DecodeError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| wrong_type(path, "array", value))
}

fn expect_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, DecodeError> {
    value.as_str().ok_or_else(|| wrong_type(path, "string", value))
}

fn wrong_type(path: &str, expected: &'static str, found: &Value) -> DecodeError {
    DecodeError::WrongType {
        path: path.to_string(),
        expected,
        found: json_type_name(found),
    }
}
