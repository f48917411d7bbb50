//! Environment-derived configuration for the seeder.
//!
//! Settings are described by an explicit schema table and resolved from the
//! process environment, with `.env` support via dotenvy. The schema is the
//! single source of truth for field names, types, and defaults.

mod error;

pub use error::ConfigError;

use std::collections::HashMap;
use std::env;

/// Declared type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Int,
    Bool,
}

impl FieldKind {
    fn name(self) -> &'static str {
        match self {
            FieldKind::Str => "string",
            FieldKind::Int => "integer",
            FieldKind::Bool => "boolean",
        }
    }
}

/// One entry of the configuration schema.
///
/// A field without a default must be present in the environment.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: Option<&'static str>,
}

/// The settings the process requires at startup, in resolution order.
pub const SCHEMA: &[FieldSpec] = &[
    FieldSpec { name: "HOSTNAME", kind: FieldKind::Str, default: None },
    FieldSpec { name: "PORT", kind: FieldKind::Int, default: None },
    FieldSpec { name: "USERNAME", kind: FieldKind::Str, default: None },
    FieldSpec { name: "PASSWORD", kind: FieldKind::Str, default: None },
    FieldSpec { name: "DATABASE", kind: FieldKind::Str, default: None },
    FieldSpec { name: "DEBUG", kind: FieldKind::Bool, default: Some("false") },
    FieldSpec { name: "ENV", kind: FieldKind::Str, default: Some("production") },
];

/// A configuration value coerced to its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
}

/// Boolean coercion: {"true", "yes", "1"} case-insensitively map to true,
/// anything else to false. Never a parse error.
fn parse_bool(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "true" | "yes" | "1")
}

/// Resolve a field against an environment snapshot: environment value if
/// present, schema default otherwise, coerced to the declared type.
fn resolve_field(spec: &FieldSpec, env: &HashMap<String, String>) -> Result<Value, ConfigError> {
    let raw = match env.get(spec.name) {
        Some(value) => value.clone(),
        None => match spec.default {
            Some(default) => default.to_string(),
            None => return Err(ConfigError::MissingField(spec.name.to_string())),
        },
    };

    match spec.kind {
        FieldKind::Str => Ok(Value::Str(raw)),
        FieldKind::Bool => Ok(Value::Bool(parse_bool(&raw))),
        FieldKind::Int => raw.trim().parse::<i64>().map(Value::Int).map_err(|_| {
            ConfigError::TypeMismatch {
                field: spec.name.to_string(),
                value: raw,
                expected: spec.kind.name(),
            }
        }),
    }
}

/// An all-uppercase name: at least one uppercase character and no
/// lowercase ones. Caseless names ("123") do not qualify.
fn is_uppercase_name(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_uppercase())
        && !name.chars().any(|c| c.is_ascii_lowercase())
}

/// Resolve a schema against an environment snapshot.
///
/// Only all-uppercase schema entries participate; others are skipped
/// (schema naming convention).
pub fn resolve(
    schema: &[FieldSpec],
    env: &HashMap<String, String>,
) -> Result<HashMap<&'static str, Value>, ConfigError> {
    let mut values = HashMap::new();
    for spec in schema {
        if !is_uppercase_name(spec.name) {
            continue;
        }
        values.insert(spec.name, resolve_field(spec, env)?);
    }
    Ok(values)
}

/// Immutable application configuration, constructed once at startup and
/// passed by reference to the components that need it.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Database server hostname.
    pub hostname: String,
    /// Database server port.
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Target database (schema) name.
    pub database: String,
    /// Raises log verbosity and enables row dumps when true.
    pub debug: bool,
    /// Deployment environment: "production", "staging", ...
    pub env: String,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Loads a `.env` file first if one exists (ignored if not found).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_map(&vars)
    }

    /// Build a configuration from an explicit name→value mapping.
    pub fn from_map(env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let values = resolve(SCHEMA, env)?;

        let mut config = Self::default();
        for (name, value) in values {
            match (name, value) {
                ("HOSTNAME", Value::Str(s)) => config.hostname = s,
                ("PORT", Value::Int(n)) => {
                    config.port = u16::try_from(n).map_err(|_| ConfigError::TypeMismatch {
                        field: "PORT".to_string(),
                        value: n.to_string(),
                        expected: "16-bit port number",
                    })?;
                }
                ("USERNAME", Value::Str(s)) => config.username = s,
                ("PASSWORD", Value::Str(s)) => config.password = s,
                ("DATABASE", Value::Str(s)) => config.database = s,
                ("DEBUG", Value::Bool(b)) => config.debug = b,
                ("ENV", Value::Str(s)) => config.env = s,
                _ => {}
            }
        }

        Ok(config)
    }
}
