#![doc = include_str!("../readme.md")]

mod column;
mod row;
pub mod selection;
pub mod sort;
mod table;
mod util;

pub use column::{CellRenderer, Column, Comparator};
pub use row::{DataRow, RowKey, TableRow};
pub use sort::{SortDirection, SortSelect};
pub use table::{CheckTable, CheckTableState, CheckTableStyle, handle_events, handle_mouse_events};

/// Eventhandling.
pub mod event {
    use crate::row::RowKey;
    use crate::sort::SortSelect;
    pub use rat_event::*;
    use std::fmt::{Debug, Formatter};

    /// Result value for event-handling.
    ///
    /// SelectChange and SortChange carry the complete new value
    /// for the caller-owned selection and sort.
    #[non_exhaustive]
    pub enum CheckTableOutcome<R> {
        /// The given event was not handled at all.
        Continue,
        /// The event was handled, no repaint necessary.
        Unchanged,
        /// The event was handled, repaint necessary.
        Changed,
        /// A checkbox has been clicked. Contains the new selection.
        SelectChange(Vec<RowKey>),
        /// A sort toggle has been clicked. Contains the new sort.
        SortChange(SortSelect<R>),
    }

    impl<R> CheckTableOutcome<R> {
        /// Calls `on_select_change` or `set_sort_select` if the
        /// outcome carries a change. Converts to a plain Outcome.
        pub fn dispatch(
            self,
            on_select_change: impl FnOnce(Vec<RowKey>),
            set_sort_select: impl FnOnce(SortSelect<R>),
        ) -> Outcome {
            match self {
                CheckTableOutcome::SelectChange(selected) => {
                    on_select_change(selected);
                    Outcome::Changed
                }
                CheckTableOutcome::SortChange(sort) => {
                    set_sort_select(sort);
                    Outcome::Changed
                }
                v => v.into(),
            }
        }
    }

    impl<R> ConsumedEvent for CheckTableOutcome<R> {
        fn is_consumed(&self) -> bool {
            !matches!(self, CheckTableOutcome::Continue)
        }
    }

    impl<R> From<CheckTableOutcome<R>> for Outcome {
        fn from(value: CheckTableOutcome<R>) -> Self {
            match value {
                CheckTableOutcome::Continue => Outcome::Continue,
                CheckTableOutcome::Unchanged => Outcome::Unchanged,
                CheckTableOutcome::Changed => Outcome::Changed,
                CheckTableOutcome::SelectChange(_) => Outcome::Changed,
                CheckTableOutcome::SortChange(_) => Outcome::Changed,
            }
        }
    }

    impl<R> From<Outcome> for CheckTableOutcome<R> {
        fn from(value: Outcome) -> Self {
            match value {
                Outcome::Continue => CheckTableOutcome::Continue,
                Outcome::Unchanged => CheckTableOutcome::Unchanged,
                Outcome::Changed => CheckTableOutcome::Changed,
            }
        }
    }

    impl<R> Clone for CheckTableOutcome<R> {
        fn clone(&self) -> Self {
            match self {
                CheckTableOutcome::Continue => CheckTableOutcome::Continue,
                CheckTableOutcome::Unchanged => CheckTableOutcome::Unchanged,
                CheckTableOutcome::Changed => CheckTableOutcome::Changed,
                CheckTableOutcome::SelectChange(v) => CheckTableOutcome::SelectChange(v.clone()),
                CheckTableOutcome::SortChange(v) => CheckTableOutcome::SortChange(v.clone()),
            }
        }
    }

    impl<R> Debug for CheckTableOutcome<R> {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            match self {
                CheckTableOutcome::Continue => f.write_str("Continue"),
                CheckTableOutcome::Unchanged => f.write_str("Unchanged"),
                CheckTableOutcome::Changed => f.write_str("Changed"),
                CheckTableOutcome::SelectChange(v) => {
                    f.debug_tuple("SelectChange").field(v).finish()
                }
                CheckTableOutcome::SortChange(v) => f.debug_tuple("SortChange").field(v).finish(),
            }
        }
    }

    /// Compares the sort by key and direction.
    impl<R> PartialEq for CheckTableOutcome<R> {
        fn eq(&self, other: &Self) -> bool {
            match (self, other) {
                (CheckTableOutcome::Continue, CheckTableOutcome::Continue) => true,
                (CheckTableOutcome::Unchanged, CheckTableOutcome::Unchanged) => true,
                (CheckTableOutcome::Changed, CheckTableOutcome::Changed) => true,
                (CheckTableOutcome::SelectChange(a), CheckTableOutcome::SelectChange(b)) => a == b,
                (CheckTableOutcome::SortChange(a), CheckTableOutcome::SortChange(b)) => a == b,
                _ => false,
            }
        }
    }
}

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
