use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Read access to the host's key-value settings, addressed by dotted keys
/// such as `snapshot.timeout`. Missing keys (and values of the wrong type)
/// come back as `None` so callers can apply their own defaults.
pub trait SettingsSource {
    fn get_str(&self, key: &str) -> Option<String>;
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn get_int(&self, key: &str) -> Option<i64>;
}

/// Settings tree backed by a YAML document.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct YamlSettings {
    root: Value,
}

impl YamlSettings {
    pub fn new() -> Self {
        YamlSettings { root: Value::Mapping(Mapping::new()) }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(text).context("Failed to parse settings YAML")?;
        Ok(YamlSettings { root })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file '{}'", path.display()))?;
        let settings = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load settings from '{}'", path.display()))?;
        debug!("Loaded settings from '{}'", path.display());
        Ok(settings)
    }

    /// Stores `value` under a dotted key, creating intermediate mappings and
    /// replacing any scalar that sits in the way.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let segments: Vec<&str> = key.split('.').collect();
        set_path(&mut self.root, &segments, value.into());
        debug!("Setting '{}' updated", key);
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in key.split('.') {
            current = current.as_mapping()?.get(segment)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }
}

fn set_path(node: &mut Value, segments: &[&str], value: Value) {
    match segments.split_first() {
        None => *node = value,
        Some((head, rest)) => {
            if !node.is_mapping() {
                *node = Value::Mapping(Mapping::new());
            }
            if let Value::Mapping(map) = node {
                let child = map.entry(Value::from(*head)).or_insert(Value::Null);
                set_path(child, rest, value);
            }
        }
    }
}

fn parse_loose_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl SettingsSource for YamlSettings {
    fn get_str(&self, key: &str) -> Option<String> {
        match self.lookup(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => {
                warn!("Setting '{}' is not a string ({:?}), ignoring it.", key, other);
                None
            }
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        let parsed = match self.lookup(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => parse_loose_bool(s),
            Value::Number(n) => n.as_i64().map(|v| v != 0),
            _ => None,
        };
        if parsed.is_none() {
            warn!("Setting '{}' is not a boolean, ignoring it.", key);
        }
        parsed
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        let parsed = match self.lookup(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            warn!("Setting '{}' is not an integer, ignoring it.", key);
        }
        parsed
    }
}
