//!
//! Sort descriptor and the sort-toggle cycle.
//!
//! The table never sorts the data itself. It only reports the
//! descriptor the user asked for, and it's up to the caller
//! to apply it, e.g. with [SortSelect::sort].
//!
use crate::column::{Column, Comparator};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

/// Sort direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    None,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
            SortDirection::None => "none",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active sort.
///
/// There is only ever one active sort column.
pub struct SortSelect<R> {
    /// Data-index of the sorted column or [SortSelect::NONE].
    pub sort_key: String,
    pub sort_direction: SortDirection,
    pub sorter: Comparator<R>,
}

impl<R: 'static> SortSelect<R> {
    /// Disabled sort. Uses a comparator that treats all rows as equal.
    pub fn none() -> Self {
        Self {
            sort_key: Self::NONE.to_string(),
            sort_direction: SortDirection::None,
            sorter: Rc::new(|_: &R, _: &R| Ordering::Equal),
        }
    }
}

impl<R> SortSelect<R> {
    /// Key of the disabled sort.
    pub const NONE: &'static str = "none";

    /// Sort by the given column.
    pub fn new(
        sort_key: impl Into<String>,
        sort_direction: SortDirection,
        sorter: Comparator<R>,
    ) -> Self {
        Self {
            sort_key: sort_key.into(),
            sort_direction,
            sorter,
        }
    }

    /// Sorting is disabled.
    pub fn is_none(&self) -> bool {
        self.sort_direction == SortDirection::None
    }

    /// Is this the active sort for the given column and direction.
    pub fn is_active(&self, data_index: &str, direction: SortDirection) -> bool {
        self.sort_key == data_index && self.sort_direction == direction
    }

    /// Compare two rows according to key and direction.
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        match self.sort_direction {
            SortDirection::Ascending => (self.sorter)(a, b),
            SortDirection::Descending => (self.sorter)(a, b).reverse(),
            SortDirection::None => Ordering::Equal,
        }
    }

    /// Sort the data. The sort is stable, with a disabled
    /// sort the data stays as it is.
    pub fn sort(&self, data: &mut [R]) {
        if !self.is_none() {
            data.sort_by(|a, b| self.compare(a, b));
        }
    }
}

impl<R: 'static> Default for SortSelect<R> {
    fn default() -> Self {
        Self::none()
    }
}

impl<R> Clone for SortSelect<R> {
    fn clone(&self) -> Self {
        Self {
            sort_key: self.sort_key.clone(),
            sort_direction: self.sort_direction,
            sorter: self.sorter.clone(),
        }
    }
}

impl<R> Debug for SortSelect<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortSelect")
            .field("sort_key", &self.sort_key)
            .field("sort_direction", &self.sort_direction)
            .finish()
    }
}

/// Equality ignores the comparator.
impl<R> PartialEq for SortSelect<R> {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key == other.sort_key && self.sort_direction == other.sort_direction
    }
}

/// Next sort after a click on the sort toggle of the column.
///
/// Cycles none -> ascending -> descending -> none. Another
/// column always starts with ascending.
///
/// Returns None if the column has no sorter, or if the column
/// is the current sort key but no direction is active.
pub fn next_sort<R: 'static>(current: &SortSelect<R>, column: &Column<R>) -> Option<SortSelect<R>> {
    let sorter = column.sorter.as_ref()?;

    if current.sort_key != column.data_index {
        Some(SortSelect::new(
            column.data_index.clone(),
            SortDirection::Ascending,
            sorter.clone(),
        ))
    } else {
        match current.sort_direction {
            SortDirection::Ascending => Some(SortSelect::new(
                column.data_index.clone(),
                SortDirection::Descending,
                sorter.clone(),
            )),
            SortDirection::Descending => Some(SortSelect::none()),
            SortDirection::None => None,
        }
    }
}
