//! Key-value setting entity.

/// A single row of the `Setting` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub key: String,
    pub value: Option<String>,
}
