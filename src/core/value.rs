use std::fmt;

use serde::Serialize;

/// Declared type of a setting. Raw user input is converted to this kind once
/// every validator has accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Integer,
    Text,
}

impl ValueKind {
    /// Convert accepted raw text into a typed value.
    pub fn parse(self, raw: &str) -> Result<SettingValue, String> {
        let trimmed = raw.trim();
        match self {
            ValueKind::Bool => parse_bool(trimmed)
                .map(SettingValue::Bool)
                .ok_or_else(|| format!("`{trimmed}` is not a boolean; use true or false")),
            ValueKind::Integer => trimmed
                .parse::<i64>()
                .map(SettingValue::Integer)
                .map_err(|_| format!("`{trimmed}` is not an integer")),
            ValueKind::Text => Ok(SettingValue::Text(trimmed.to_string())),
        }
    }

    /// Bring a value read back from storage in line with this kind.
    ///
    /// Values of the right shape pass through untouched; anything else is
    /// reparsed from its text form.
    pub fn coerce(self, value: SettingValue) -> Result<SettingValue, String> {
        match (self, &value) {
            (_, SettingValue::Unset)
            | (ValueKind::Bool, SettingValue::Bool(_))
            | (ValueKind::Integer, SettingValue::Integer(_))
            | (ValueKind::Text, SettingValue::Text(_)) => Ok(value),
            _ => self.parse(&value.to_string()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Text => "string",
        }
    }
}

/// Current or default value of a setting.
///
/// `Unset` is the sentinel for "no value", distinct from `false`, `0` or the
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Unset,
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl SettingValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, SettingValue::Unset)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Unset => Ok(()),
            SettingValue::Bool(value) => write!(f, "{value}"),
            SettingValue::Integer(value) => write!(f, "{value}"),
            SettingValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

pub(crate) fn parse_bool(input: &str) -> Option<bool> {
    match input.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_kind_accepts_common_spellings() {
        assert_eq!(ValueKind::Bool.parse("TRUE"), Ok(SettingValue::Bool(true)));
        assert_eq!(ValueKind::Bool.parse("no"), Ok(SettingValue::Bool(false)));
        assert!(ValueKind::Bool.parse("maybe").is_err());
    }

    #[test]
    fn integer_kind_trims_whitespace() {
        assert_eq!(
            ValueKind::Integer.parse(" 8 "),
            Ok(SettingValue::Integer(8))
        );
        assert!(ValueKind::Integer.parse("8 cores").is_err());
    }

    #[test]
    fn text_kind_stores_trimmed_input() {
        assert_eq!(
            ValueKind::Text.parse(" 10.0.0.1 "),
            Ok(SettingValue::from("10.0.0.1"))
        );
    }

    #[test]
    fn coerce_reparses_mismatched_values() {
        assert_eq!(
            ValueKind::Bool.coerce(SettingValue::from("true")),
            Ok(SettingValue::Bool(true))
        );
        assert_eq!(
            ValueKind::Text.coerce(SettingValue::Integer(8)),
            Ok(SettingValue::from("8"))
        );
        assert_eq!(
            ValueKind::Integer.coerce(SettingValue::Integer(8)),
            Ok(SettingValue::Integer(8))
        );
        assert!(ValueKind::Integer.coerce(SettingValue::from("eight")).is_err());
    }

    #[test]
    fn unset_renders_empty() {
        assert_eq!(SettingValue::Unset.to_string(), "");
        assert!(SettingValue::Unset.is_unset());
        assert_eq!(SettingValue::from(4_i64).to_string(), "4");
    }

    #[test]
    fn values_serialize_untagged() {
        let json = serde_json::to_string(&vec![
            SettingValue::Bool(true),
            SettingValue::Integer(9216),
            SettingValue::from("/tmp/pull-secret"),
            SettingValue::Unset,
        ])
        .expect("serialize values");
        assert_eq!(json, r#"[true,9216,"/tmp/pull-secret",null]"#);
    }
}
