//!
//! Checkbox selection.
//!
//! The selection is a plain list of row-keys owned by the caller.
//! These functions compute the replacement selection for each
//! checkbox toggle. They never modify the current selection.
//!
//! Uniqueness of the keys is not enforced. Checking a row twice
//! appends its key twice, unchecking removes all occurrences.
//!
use crate::row::{RowKey, TableRow};

/// State of the select-all checkbox in the header.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheck {
    #[default]
    Unchecked,
    /// Some rows are selected.
    Indeterminate,
    /// All rows are selected.
    Checked,
}

impl HeaderCheck {
    pub fn is_checked(&self) -> bool {
        *self == HeaderCheck::Checked
    }

    pub fn is_indeterminate(&self) -> bool {
        *self == HeaderCheck::Indeterminate
    }
}

/// State of the select-all checkbox.
///
/// Only compares the number of keys with the number of rows.
pub fn header_check(selected: &[RowKey], rows: usize) -> HeaderCheck {
    let n = selected.len();
    if n == rows && n != 0 {
        HeaderCheck::Checked
    } else if n > 0 && n < rows {
        HeaderCheck::Indeterminate
    } else {
        HeaderCheck::Unchecked
    }
}

/// Row is selected.
pub fn is_selected(selected: &[RowKey], key: RowKey) -> bool {
    selected.contains(&key)
}

/// Keys of all rows in data order.
pub fn row_keys<R: TableRow>(data: &[R]) -> Vec<RowKey> {
    data.iter().map(|v| v.key()).collect()
}

/// New selection when the select-all checkbox is set to `checked`.
///
/// Checked selects all rows in data order, unchecked clears.
pub fn select_all(checked: bool, row_keys: &[RowKey]) -> Vec<RowKey> {
    if checked {
        row_keys.to_vec()
    } else {
        Vec::new()
    }
}

/// New selection after a click on the select-all checkbox.
pub fn toggle_all(selected: &[RowKey], row_keys: &[RowKey]) -> Vec<RowKey> {
    let checked = header_check(selected, row_keys.len()).is_checked();
    select_all(!checked, row_keys)
}

/// New selection when the checkbox of a row is set to `checked`.
///
/// Checked appends the key, unchecked removes every occurrence.
pub fn select_row(selected: &[RowKey], key: RowKey, checked: bool) -> Vec<RowKey> {
    if checked {
        let mut new_selection = Vec::with_capacity(selected.len() + 1);
        new_selection.extend_from_slice(selected);
        new_selection.push(key);
        new_selection
    } else {
        selected.iter().copied().filter(|v| *v != key).collect()
    }
}

/// New selection after a click on the checkbox of a row.
pub fn toggle_row(selected: &[RowKey], key: RowKey) -> Vec<RowKey> {
    select_row(selected, key, !is_selected(selected, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::DataRow;

    fn data() -> Vec<DataRow> {
        vec![
            DataRow::new(1).field("name", "Alice"),
            DataRow::new(2).field("name", "Bob"),
        ]
    }

    #[test]
    fn test_header_check() {
        assert_eq!(header_check(&[], 0), HeaderCheck::Unchecked);
        assert_eq!(header_check(&[], 2), HeaderCheck::Unchecked);
        assert_eq!(header_check(&[1], 2), HeaderCheck::Indeterminate);
        assert_eq!(header_check(&[1, 2], 2), HeaderCheck::Checked);
        // more keys than rows
        assert_eq!(header_check(&[1, 1, 2], 2), HeaderCheck::Unchecked);
        // stale keys only count
        assert_eq!(header_check(&[5, 6], 2), HeaderCheck::Checked);
    }

    #[test]
    fn test_toggle_all() {
        let keys = row_keys(&data());
        assert_eq!(keys, vec![1, 2]);
        assert_eq!(toggle_all(&[], &keys), vec![1, 2]);
        assert_eq!(toggle_all(&[2], &keys), vec![1, 2]);
        assert_eq!(toggle_all(&[2, 1], &keys), Vec::<RowKey>::new());
        assert_eq!(toggle_all(&[], &[]), Vec::<RowKey>::new());
    }

    #[test]
    fn test_select_row_duplicates() {
        let s = select_row(&[1], 1, true);
        assert_eq!(s, vec![1, 1]);
        let s = select_row(&s, 1, false);
        assert!(s.is_empty());
    }

    #[test]
    fn test_toggle_row() {
        assert_eq!(toggle_row(&[], 2), vec![2]);
        assert_eq!(toggle_row(&[2], 1), vec![2, 1]);
        assert_eq!(toggle_row(&[2, 1], 2), vec![1]);
    }
}
