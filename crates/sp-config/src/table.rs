//! In-memory parameter table and its text/YAML/JSON readers.

use std::collections::BTreeMap;

use serde_yaml::Value;
use tracing::debug;

use crate::source::ConfigSource;
use crate::{ConfigError, ConfigResult};

/// Flat table of dotted keys to raw string values.
///
/// Redefining a key replaces its earlier values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl ParamTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `key`, replacing any earlier definition.
    pub fn set<I, V>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = key.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if self.entries.insert(key.clone(), values).is_some() {
            debug!(key = %key, "parameter redefined; later definition wins");
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse AMReX-style `inputs` text.
    ///
    /// ```text
    /// # comment
    /// particles.fuel_species = NC10H22 NC12H26
    /// particles.init_file = "spray init.dat"
    /// ```
    pub fn from_inputs_str(text: &str) -> ConfigResult<Self> {
        let mut table = Self::new();
        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, rhs)) = line.split_once('=') else {
                return Err(ConfigError::Syntax {
                    line: line_no,
                    reason: format!("expected 'key = value', found '{line}'"),
                });
            };
            let key = key.trim();
            if key.is_empty() || key.contains(char::is_whitespace) {
                return Err(ConfigError::Syntax {
                    line: line_no,
                    reason: format!("invalid parameter name '{key}'"),
                });
            }
            let values = tokenize(rhs).map_err(|reason| ConfigError::Syntax {
                line: line_no,
                reason,
            })?;
            table.set(key, values);
        }
        Ok(table)
    }

    /// Parse YAML; nested mappings become dotted keys.
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let value: Value = serde_yaml::from_str(text)?;
        Self::from_value(&value)
    }

    /// Parse JSON; nested objects become dotted keys.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    fn from_value(value: &Value) -> ConfigResult<Self> {
        let mut table = Self::new();
        match value {
            Value::Mapping(_) => flatten_into(&mut table, "", value)?,
            Value::Null => {}
            _ => {
                return Err(ConfigError::Unsupported {
                    key: "<root>".to_string(),
                    reason: "document root must be a mapping".to_string(),
                });
            }
        }
        Ok(table)
    }
}

impl ConfigSource for ParamTable {
    fn values(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

fn tokenize(rhs: &str) -> Result<Vec<String>, String> {
    let mut values = Vec::new();
    let mut chars = rhs.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut token = String::new();
        if c == '"' {
            chars.next();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                token.push(c);
            }
            if !closed {
                return Err("unterminated quoted value".to_string());
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        values.push(token);
    }
    Ok(values)
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn scalar_text(key: &str, value: &Value) -> ConfigResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ConfigError::Unsupported {
            key: key.to_string(),
            reason: "sequence items must be scalars".to_string(),
        }),
    }
}

fn flatten_into(table: &mut ParamTable, prefix: &str, value: &Value) -> ConfigResult<()> {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let name = match k {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => {
                        return Err(ConfigError::Unsupported {
                            key: prefix.to_string(),
                            reason: "mapping keys must be strings".to_string(),
                        });
                    }
                };
                flatten_into(table, &join_key(prefix, &name), v)?;
            }
        }
        Value::Sequence(items) => {
            let values = items
                .iter()
                .map(|item| scalar_text(prefix, item))
                .collect::<ConfigResult<Vec<String>>>()?;
            table.set(prefix, values);
        }
        Value::Null => table.set(prefix, Vec::<String>::new()),
        Value::Tagged(_) => {
            return Err(ConfigError::Unsupported {
                key: prefix.to_string(),
                reason: "tagged values are not supported".to_string(),
            });
        }
        scalar => table.set(prefix, [scalar_text(prefix, scalar)?]),
    }
    Ok(())
}
