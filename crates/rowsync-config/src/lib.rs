//! TOML configuration for the rowsync translator.
//!
//! Configuration is parsed once at startup and handed to the core as plain
//! values; nothing here is cached process-wide.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Bits reserved for the source instance id in a partition id.
pub const INSTANCE_ID_BITS: u32 = 4;

/// Bits reserved for the schema id in a partition id.
pub const SCHEMA_ID_BITS: u32 = 7;

/// Bits reserved for the table id in a partition id.
pub const TABLE_ID_BITS: u32 = 8;

/// Bits left for the original value once the partition prefix is applied.
/// One bit is always kept for the sign.
pub const ORIGIN_ID_BITS: u32 = 64 - 1 - INSTANCE_ID_BITS - SCHEMA_ID_BITS - TABLE_ID_BITS;

const DEFAULT_META_SCHEMA: &str = "dm_meta";
const DEFAULT_TASK: &str = "default";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    #[error("column mapping rule '{rule}' is invalid: {reason}")]
    InvalidRule { rule: String, reason: String },
}

///
/// TranslatorConfig
///
/// Top-level translator settings.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct TranslatorConfig {
    /// Decompose updates into DELETE + REPLACE pairs.
    pub safe_mode: bool,
    /// Emit per-batch debug logs.
    pub debug: bool,
    pub checkpoint: CheckpointConfig,
    pub column_mapping: Vec<MappingRuleConfig>,
}

impl TranslatorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&input)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checkpoint.validate()?;
        for rule in &self.column_mapping {
            rule.validate()?;
        }

        Ok(())
    }
}

///
/// CheckpointConfig
///
/// Where loader checkpoints live on the target.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct CheckpointConfig {
    pub meta_schema: String,
    pub task: String,
}

impl CheckpointConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.meta_schema.is_empty() {
            return Err(ConfigError::EmptyField {
                field: "checkpoint.meta-schema",
            });
        }
        if self.task.is_empty() {
            return Err(ConfigError::EmptyField {
                field: "checkpoint.task",
            });
        }

        Ok(())
    }
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            meta_schema: DEFAULT_META_SCHEMA.to_string(),
            task: DEFAULT_TASK.to_string(),
        }
    }
}

///
/// MappingRuleConfig
///
/// One column-mapping rule. Patterns accept `*` and `?` wildcards.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MappingRuleConfig {
    pub name: String,
    pub schema_pattern: String,
    pub table_pattern: String,
    pub column: String,
    #[serde(flatten)]
    pub expression: MappingExpression,
}

impl MappingRuleConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidRule {
            rule: self.name.clone(),
            reason,
        };

        if self.name.is_empty() {
            return Err(ConfigError::EmptyField {
                field: "column-mapping.name",
            });
        }
        if self.schema_pattern.is_empty() || self.table_pattern.is_empty() {
            return Err(invalid("schema and table patterns are required".to_string()));
        }
        if self.column.is_empty() {
            return Err(invalid("target column is required".to_string()));
        }

        if let MappingExpression::PartitionId {
            instance_id,
            schema_id,
            table_id,
        } = self.expression
        {
            check_id_bits("instance-id", instance_id, INSTANCE_ID_BITS).map_err(invalid)?;
            check_id_bits("schema-id", schema_id, SCHEMA_ID_BITS).map_err(invalid)?;
            check_id_bits("table-id", table_id, TABLE_ID_BITS).map_err(invalid)?;
        }

        Ok(())
    }
}

fn check_id_bits(field: &str, value: u16, bits: u32) -> Result<(), String> {
    if u64::from(value) >= 1u64 << bits {
        return Err(format!("{field} {value} does not fit in {bits} bits"));
    }

    Ok(())
}

///
/// MappingExpression
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(
    tag = "expression",
    rename_all = "kebab-case",
    rename_all_fields = "kebab-case"
)]
pub enum MappingExpression {
    AddPrefix {
        prefix: String,
    },
    AddSuffix {
        suffix: String,
    },
    PartitionId {
        instance_id: u16,
        schema_id: u16,
        table_id: u16,
    },
}
