use crate::{
    mapping::{ColumnMapping, MappedRow, MappingError},
    value::Value,
};
use rowsync_config::{
    INSTANCE_ID_BITS, MappingExpression, MappingRuleConfig, ORIGIN_ID_BITS, SCHEMA_ID_BITS,
};

///
/// MappingRule
///
/// A validated rule. Partition prefixes are computed once up front.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MappingRule {
    pub name: String,
    pub schema_pattern: String,
    pub table_pattern: String,
    pub column: String,
    action: RuleAction,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum RuleAction {
    AddPrefix(String),
    AddSuffix(String),
    /// High bits OR-ed into every origin id.
    PartitionId(i64),
}

impl MappingRule {
    #[must_use]
    pub fn from_config(config: &MappingRuleConfig) -> Self {
        let action = match &config.expression {
            MappingExpression::AddPrefix { prefix } => RuleAction::AddPrefix(prefix.clone()),
            MappingExpression::AddSuffix { suffix } => RuleAction::AddSuffix(suffix.clone()),
            MappingExpression::PartitionId {
                instance_id,
                schema_id,
                table_id,
            } => RuleAction::PartitionId(partition_prefix(*instance_id, *schema_id, *table_id)),
        };

        Self {
            name: config.name.clone(),
            schema_pattern: config.schema_pattern.clone(),
            table_pattern: config.table_pattern.clone(),
            column: config.column.clone(),
            action,
        }
    }

    #[must_use]
    pub fn matches(&self, schema: &str, table: &str) -> bool {
        wildcard_match(&self.schema_pattern, schema) && wildcard_match(&self.table_pattern, table)
    }

    fn apply(&self, value: &Value) -> Result<Value, MappingError> {
        match (&self.action, value) {
            (_, Value::Null) => Ok(Value::Null),
            (RuleAction::AddPrefix(prefix), Value::Text(text)) => {
                Ok(Value::Text(format!("{prefix}{text}")))
            }
            (RuleAction::AddSuffix(suffix), Value::Text(text)) => {
                Ok(Value::Text(format!("{text}{suffix}")))
            }
            (RuleAction::PartitionId(prefix), value) => {
                let origin = value.as_i64().ok_or_else(|| self.invalid(value, "integer"))?;
                if !(0..1i64 << ORIGIN_ID_BITS).contains(&origin) {
                    return Err(MappingError::OriginOverflow {
                        column: self.column.clone(),
                        value: origin,
                    });
                }

                Ok(Value::Int64(prefix | origin))
            }
            (RuleAction::AddPrefix(_) | RuleAction::AddSuffix(_), value) => {
                Err(self.invalid(value, "text"))
            }
        }
    }

    fn invalid(&self, value: &Value, expected: &str) -> MappingError {
        MappingError::InvalidValue {
            rule: self.name.clone(),
            column: self.column.clone(),
            reason: format!("expected {expected} value, found {}", value.kind()),
        }
    }
}

// [1 sign][instance][schema][table][origin]
fn partition_prefix(instance_id: u16, schema_id: u16, table_id: u16) -> i64 {
    let instance_shift = 64 - 1 - INSTANCE_ID_BITS;
    let schema_shift = instance_shift - SCHEMA_ID_BITS;
    let table_shift = ORIGIN_ID_BITS;

    (i64::from(instance_id) << instance_shift)
        | (i64::from(schema_id) << schema_shift)
        | (i64::from(table_id) << table_shift)
}

///
/// RuleMapping
///
/// Applies every matching rule, in declaration order, to its target column.
/// Rules whose column the table lacks are skipped.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RuleMapping {
    rules: Vec<MappingRule>,
}

impl RuleMapping {
    #[must_use]
    pub const fn new(rules: Vec<MappingRule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn from_config(rules: &[MappingRuleConfig]) -> Self {
        Self::new(rules.iter().map(MappingRule::from_config).collect())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl ColumnMapping for RuleMapping {
    fn map_row(
        &self,
        schema: &str,
        table: &str,
        columns: &[String],
        row: &[Value],
    ) -> Result<MappedRow, MappingError> {
        let mut mapped = MappedRow::new(row.to_vec());

        for rule in self.rules.iter().filter(|rule| rule.matches(schema, table)) {
            let Some(position) = columns.iter().position(|name| *name == rule.column) else {
                continue;
            };
            let Some(slot) = mapped.values.get_mut(position) else {
                continue;
            };

            *slot = rule.apply(slot)?;
            mapped.aux.push(rule.name.clone());
        }

        Ok(mapped)
    }
}

///
/// wildcard_match
///
/// Glob match supporting `*` (any run, including empty) and `?` (one char).
///

#[must_use]
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    t = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
