//!
//! Column definitions.
//!
use crate::row::TableRow;
use ratatui_core::layout::Constraint;
use ratatui_core::text::Text;
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Compares two rows. Used as sort order for a column.
pub type Comparator<R> = Rc<dyn Fn(&R, &R) -> Ordering>;

/// Custom cell renderer.
///
/// Called with the raw cell value, the complete row and
/// the selected flag of the row.
pub type CellRenderer<R> = Rc<dyn Fn(Option<&str>, &R, bool) -> Text<'static>>;

/// One column of the table.
pub struct Column<R> {
    /// Key into the row data.
    pub data_index: String,
    /// Header text.
    pub title: String,
    /// Sort order. Columns without don't show a sort toggle.
    pub sorter: Option<Comparator<R>>,
    /// Renders the cell instead of the raw value.
    pub render: Option<CellRenderer<R>>,
    /// Layout constraint.
    pub width: Constraint,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            data_index: self.data_index.clone(),
            title: self.title.clone(),
            sorter: self.sorter.clone(),
            render: self.render.clone(),
            width: self.width,
        }
    }
}

impl<R> Debug for Column<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("data_index", &self.data_index)
            .field("title", &self.title)
            .field("sorter", &self.sorter.is_some())
            .field("render", &self.render.is_some())
            .field("width", &self.width)
            .finish()
    }
}

impl<R> Column<R> {
    pub fn new(data_index: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            data_index: data_index.into(),
            title: title.into(),
            sorter: None,
            render: None,
            width: Constraint::Fill(1),
        }
    }

    /// Sort order for this column.
    pub fn sorter(mut self, sorter: impl Fn(&R, &R) -> Ordering + 'static) -> Self {
        self.sorter = Some(Rc::new(sorter));
        self
    }

    /// Custom cell renderer.
    pub fn render(
        mut self,
        render: impl Fn(Option<&str>, &R, bool) -> Text<'static> + 'static,
    ) -> Self {
        self.render = Some(Rc::new(render));
        self
    }

    /// Layout constraint.
    pub fn width(mut self, width: impl Into<Constraint>) -> Self {
        self.width = width.into();
        self
    }

    /// Has a sort toggle.
    pub fn is_sortable(&self) -> bool {
        self.sorter.is_some()
    }
}

impl<R: TableRow> Column<R> {
    /// Content of this column for the given row.
    ///
    /// Uses the renderer if any, otherwise the raw value.
    /// A missing value renders empty.
    pub fn cell(&self, row: &R, selected: bool) -> Text<'static> {
        let value = row.value(&self.data_index);
        if let Some(render) = &self.render {
            render(value.as_deref(), row, selected)
        } else if let Some(value) = value {
            Text::from(value.into_owned())
        } else {
            Text::default()
        }
    }
}
