//!
//! Row data.
//!
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Identifies a row within the current data.
pub type RowKey = u64;

/// Access to one row of the table data.
///
/// Implement this for your own row type, or use [DataRow].
pub trait TableRow {
    /// Unique key of the row.
    fn key(&self) -> RowKey;

    /// Field value for the given column data-index.
    ///
    /// A missing field renders as an empty cell.
    fn value(&self, data_index: &str) -> Option<Cow<'_, str>>;
}

/// Simple row as a key plus a map of named string fields.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DataRow {
    pub key: RowKey,
    pub fields: BTreeMap<String, String>,
}

impl DataRow {
    pub fn new(key: RowKey) -> Self {
        Self {
            key,
            fields: Default::default(),
        }
    }

    /// Add a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set a field. Returns the previous value.
    pub fn set_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.fields.insert(name.into(), value.into())
    }
}

impl TableRow for DataRow {
    fn key(&self) -> RowKey {
        self.key
    }

    fn value(&self, data_index: &str) -> Option<Cow<'_, str>> {
        self.fields.get(data_index).map(|v| Cow::Borrowed(v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        let row = DataRow::new(7).field("name", "Alice");
        assert_eq!(row.key(), 7);
        assert_eq!(row.value("name").as_deref(), Some("Alice"));
        assert_eq!(row.value("age"), None);
    }
}
