use crate::_private::NonExhaustive;
use crate::column::Column;
use crate::event::CheckTableOutcome;
use crate::row::{RowKey, TableRow};
use crate::selection::{HeaderCheck, header_check, is_selected, toggle_all, toggle_row};
use crate::sort::{SortDirection, SortSelect, next_sort};
use crate::util::{fallback_select_style, render_span, revert_style};
use log::debug;
use rat_event::util::item_at;
use rat_event::{HandleEvent, MouseOnly, Regular, ct_event, flow};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use rat_reloc::{RelocatableState, relocate_area, relocate_areas};
use ratatui_core::buffer::Buffer;
use ratatui_core::layout::{Layout, Rect};
use ratatui_core::style::{Modifier, Style};
use ratatui_core::text::Span;
use ratatui_core::widgets::{StatefulWidget, Widget};
use ratatui_crossterm::crossterm::event::Event;
use ratatui_widgets::block::{Block, BlockExt};
use std::cmp::{max, min};
use std::fmt::{Debug, Formatter};

/// Table with a checkbox for each row and sortable columns.
///
/// The table doesn't keep any selection or sort state of its own.
/// Both are owned by the caller and handed over for each render.
/// Clicks on the checkboxes or sort toggles are reported as
/// [CheckTableOutcome::SelectChange] and [CheckTableOutcome::SortChange]
/// with the complete new value. It's up to the caller to apply them.
///
/// The data is rendered in the given order. If you want it sorted,
/// sort it before rendering, [SortSelect::sort] can do this.
///
/// ```rust ignore
/// CheckTable::new()
///     .columns(&state.columns)
///     .data(&state.rows)
///     .selected(&state.selected)
///     .sort(&state.sort)
///     .styles(THEME.check_table_style())
///     .render(area, frame.buffer_mut(), &mut state.table);
///
/// match state.table.handle(event, Regular) {
///     CheckTableOutcome::SelectChange(keys) => state.selected = keys,
///     CheckTableOutcome::SortChange(sort) => state.sort = sort,
///     _ => {}
/// }
/// ```
pub struct CheckTable<'a, R> {
    columns: &'a [Column<R>],
    data: &'a [R],
    selected: &'a [RowKey],
    sort: Option<&'a SortSelect<R>>,

    column_spacing: u16,
    block: Option<Block<'a>>,

    style: Style,
    header_style: Option<Style>,
    select_row_style: Option<Style>,
    focus_style: Option<Style>,
    sort_active_style: Option<Style>,
    sort_inactive_style: Option<Style>,

    checked_str: Span<'a>,
    unchecked_str: Span<'a>,
    indeterminate_str: Span<'a>,
    ascending_str: Span<'a>,
    descending_str: Span<'a>,
}

/// Combined style.
#[derive(Debug, Clone)]
pub struct CheckTableStyle {
    pub style: Style,
    pub header: Option<Style>,
    /// Selected rows.
    pub select_row: Option<Style>,
    /// Cursor row and sort cursor when focused.
    pub focus: Option<Style>,
    /// Sort indicator of the active sort.
    pub sort_active: Option<Style>,
    /// All other sort indicators.
    pub sort_inactive: Option<Style>,

    pub block: Option<Block<'static>>,
    pub border_style: Option<Style>,

    pub checked_str: Option<Span<'static>>,
    pub unchecked_str: Option<Span<'static>>,
    pub indeterminate_str: Option<Span<'static>>,
    pub ascending_str: Option<Span<'static>>,
    pub descending_str: Option<Span<'static>>,

    pub non_exhaustive: NonExhaustive,
}

/// State & event handling.
///
/// Apart from focus, cursor and scroll offset this is just a
/// copy of what was rendered. It's needed to map mouse and
/// keyboard events to the new selection or sort.
pub struct CheckTableState<R> {
    /// Current focus state.
    /// __read+write__
    pub focus: FocusFlag,

    /// Total area.
    /// __read only__ Renewed with each render.
    pub area: Rect,
    /// Area inside the block.
    /// __read only__ Renewed with each render.
    pub inner: Rect,
    /// Header row.
    /// __read only__ Renewed with each render.
    pub header_area: Rect,
    /// Select-all checkbox.
    /// __read only__ Renewed with each render.
    pub header_check_area: Rect,
    /// Header cell for each column.
    /// __read only__ Renewed with each render.
    pub column_areas: Vec<Rect>,
    /// Sort toggle for each column. Empty for columns without sorter.
    /// __read only__ Renewed with each render.
    pub sort_areas: Vec<Rect>,
    /// Area for the rows.
    /// __read only__ Renewed with each render.
    pub table_area: Rect,
    /// Area per visible row. The first element is at rendered_offset.
    /// __read only__ Renewed with each render.
    pub row_areas: Vec<Rect>,
    /// Checkbox per visible row. The first element is at rendered_offset.
    /// __read only__ Renewed with each render.
    pub check_areas: Vec<Rect>,
    /// Row offset of the last render. Scrolling changes row_offset
    /// immediately, the areas keep showing this one.
    /// __read only__ Renewed with each render.
    pub rendered_offset: usize,

    /// Keys of the rendered rows in render order.
    /// __read only__ Renewed with each render.
    pub row_keys: Vec<RowKey>,
    /// Rendered columns.
    /// __read only__ Renewed with each render.
    pub columns: Vec<Column<R>>,
    /// Selection as rendered, or as last reported.
    /// __read only__ Renewed with each render.
    pub selected: Vec<RowKey>,
    /// Sort as rendered, or as last reported.
    /// __read only__ Renewed with each render.
    pub sort: SortSelect<R>,

    /// First visible row.
    /// __read+write__ Limited with each render.
    pub row_offset: usize,
    /// Cursor row for keyboard navigation.
    /// __read+write__ Limited with each render.
    pub cursor: Option<usize>,
    /// Column whose sort toggle is used by the keyboard.
    /// __read+write__
    pub sort_cursor: Option<usize>,

    pub non_exhaustive: NonExhaustive,
}

impl<R> Default for CheckTable<'_, R> {
    fn default() -> Self {
        Self {
            columns: &[],
            data: &[],
            selected: &[],
            sort: None,
            column_spacing: 1,
            block: Default::default(),
            style: Default::default(),
            header_style: Default::default(),
            select_row_style: Default::default(),
            focus_style: Default::default(),
            sort_active_style: Default::default(),
            sort_inactive_style: Default::default(),
            checked_str: Span::from("[\u{2713}]"),
            unchecked_str: Span::from("[ ]"),
            indeterminate_str: Span::from("[-]"),
            ascending_str: Span::from("\u{25B2}"),
            descending_str: Span::from("\u{25BC}"),
        }
    }
}

impl<R> Debug for CheckTable<'_, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckTable")
            .field("columns", &self.columns)
            .field("rows", &self.data.len())
            .field("selected", &self.selected)
            .field("sort", &self.sort)
            .field("column_spacing", &self.column_spacing)
            .field("block", &self.block)
            .field("style", &self.style)
            .field("header_style", &self.header_style)
            .field("select_row_style", &self.select_row_style)
            .field("focus_style", &self.focus_style)
            .field("sort_active_style", &self.sort_active_style)
            .field("sort_inactive_style", &self.sort_inactive_style)
            .finish()
    }
}

impl<'a, R> CheckTable<'a, R> {
    /// New, empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Column definitions.
    pub fn columns(mut self, columns: &'a [Column<R>]) -> Self {
        self.columns = columns;
        self
    }

    /// Row data. Rendered in this order.
    pub fn data(mut self, data: &'a [R]) -> Self {
        self.data = data;
        self
    }

    /// Keys of the selected rows.
    pub fn selected(mut self, selected: &'a [RowKey]) -> Self {
        self.selected = selected;
        self
    }

    /// Active sort. Only used for the sort indicators,
    /// the data is not sorted by the table.
    pub fn sort(mut self, sort: &'a SortSelect<R>) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Spacing between the columns.
    pub fn column_spacing(mut self, spacing: u16) -> Self {
        self.column_spacing = spacing;
        self
    }

    /// Block.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Set all styles.
    pub fn styles(mut self, styles: CheckTableStyle) -> Self {
        self.style = styles.style;
        if styles.header.is_some() {
            self.header_style = styles.header;
        }
        if styles.select_row.is_some() {
            self.select_row_style = styles.select_row;
        }
        if styles.focus.is_some() {
            self.focus_style = styles.focus;
        }
        if styles.sort_active.is_some() {
            self.sort_active_style = styles.sort_active;
        }
        if styles.sort_inactive.is_some() {
            self.sort_inactive_style = styles.sort_inactive;
        }
        if let Some(block) = styles.block {
            self.block = Some(block);
        }
        if let Some(border_style) = styles.border_style {
            self.block = self.block.map(|v| v.border_style(border_style));
        }
        if let Some(v) = styles.checked_str {
            self.checked_str = v;
        }
        if let Some(v) = styles.unchecked_str {
            self.unchecked_str = v;
        }
        if let Some(v) = styles.indeterminate_str {
            self.indeterminate_str = v;
        }
        if let Some(v) = styles.ascending_str {
            self.ascending_str = v;
        }
        if let Some(v) = styles.descending_str {
            self.descending_str = v;
        }
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Base style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Style for the header row.
    pub fn header_style(mut self, style: Option<Style>) -> Self {
        self.header_style = style;
        self
    }

    /// Style for selected rows.
    pub fn select_row_style(mut self, style: Option<Style>) -> Self {
        self.select_row_style = style;
        self
    }

    /// Style for the cursor when focused.
    pub fn focus_style(mut self, style: Option<Style>) -> Self {
        self.focus_style = style;
        self
    }

    /// Style for the sort indicator matching the active sort.
    pub fn sort_active_style(mut self, style: Option<Style>) -> Self {
        self.sort_active_style = style;
        self
    }

    /// Style for all other sort indicators.
    pub fn sort_inactive_style(mut self, style: Option<Style>) -> Self {
        self.sort_inactive_style = style;
        self
    }

    /// Checkbox texts for checked, unchecked and partially checked.
    pub fn check_str(
        mut self,
        checked: Span<'a>,
        unchecked: Span<'a>,
        indeterminate: Span<'a>,
    ) -> Self {
        self.checked_str = checked;
        self.unchecked_str = unchecked;
        self.indeterminate_str = indeterminate;
        self
    }

    /// Sort indicators.
    pub fn sort_str(mut self, ascending: Span<'a>, descending: Span<'a>) -> Self {
        self.ascending_str = ascending;
        self.descending_str = descending;
        self
    }

    /// Width of the checkbox column.
    pub fn check_width(&self) -> u16 {
        max(
            self.checked_str.width(),
            max(self.unchecked_str.width(), self.indeterminate_str.width()),
        ) as u16
    }

    fn sort_width(&self) -> u16 {
        (self.ascending_str.width() + self.descending_str.width()) as u16
    }

    fn check_str_for(&self, check: HeaderCheck) -> &Span<'a> {
        match check {
            HeaderCheck::Unchecked => &self.unchecked_str,
            HeaderCheck::Indeterminate => &self.indeterminate_str,
            HeaderCheck::Checked => &self.checked_str,
        }
    }

    fn sort_indicator_style(&self, active: bool) -> Style {
        if active {
            self.sort_active_style.unwrap_or_default()
        } else {
            self.sort_inactive_style
                .unwrap_or(Style::new().add_modifier(Modifier::DIM))
        }
    }
}

impl<R: TableRow + 'static> StatefulWidget for &CheckTable<'_, R> {
    type State = CheckTableState<R>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl<R: TableRow + 'static> StatefulWidget for CheckTable<'_, R> {
    type State = CheckTableState<R>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

fn render_ref<R: TableRow + 'static>(
    widget: &CheckTable<'_, R>,
    area: Rect,
    buf: &mut Buffer,
    state: &mut CheckTableState<R>,
) {
    #[cfg(feature = "key_warnings")]
    key_warnings(widget);

    state.row_keys = crate::selection::row_keys(widget.data);
    state.columns = widget.columns.to_vec();
    state.selected = widget.selected.to_vec();
    state.sort = widget.sort.cloned().unwrap_or_default();

    state.area = area;
    state.inner = widget.block.inner_if_some(area);

    let header_height = min(1, state.inner.height);
    state.header_area = Rect::new(
        state.inner.x,
        state.inner.y,
        state.inner.width,
        header_height,
    );
    state.table_area = Rect::new(
        state.inner.x,
        state.inner.y + header_height,
        state.inner.width,
        state.inner.height - header_height,
    );

    let check_width = widget.check_width();
    let l_check = Rect::new(
        state.inner.x,
        0,
        min(check_width, state.inner.width),
        0,
    );
    let data_x = state.inner.x + min(check_width + widget.column_spacing, state.inner.width);
    let l_columns = Layout::horizontal(widget.columns.iter().map(|v| v.width))
        .spacing(widget.column_spacing)
        .split(Rect::new(data_x, 0, state.inner.right() - data_x, 0));

    buf.set_style(area, widget.style);
    if let Some(block) = &widget.block {
        block.render(area, buf);
    }

    render_header(widget, &l_check, &l_columns, buf, state);
    render_rows(widget, &l_check, &l_columns, buf, state);
}

fn render_header<R: TableRow + 'static>(
    widget: &CheckTable<'_, R>,
    l_check: &Rect,
    l_columns: &[Rect],
    buf: &mut Buffer,
    state: &mut CheckTableState<R>,
) {
    state.column_areas.clear();
    state.sort_areas.clear();

    let header_area = state.header_area;
    if let Some(header_style) = widget.header_style {
        buf.set_style(header_area, header_style);
    }

    let check = header_check(widget.selected, widget.data.len());
    state.header_check_area = render_span(
        widget.check_str_for(check),
        Style::default(),
        Rect::new(l_check.x, header_area.y, l_check.width, header_area.height),
        buf,
    );

    let sort_width = widget.sort_width();
    for (col, column) in widget.columns.iter().enumerate() {
        let cell_area = Rect::new(
            l_columns[col].x,
            header_area.y,
            l_columns[col].width,
            header_area.height,
        )
        .intersection(header_area);
        state.column_areas.push(cell_area);

        if state.is_focused() && state.sort_cursor == Some(col) {
            let focus_style = fallback_select_style(widget.focus_style.unwrap_or_default());
            buf.set_style(cell_area, focus_style);
        }

        let title = Span::from(column.title.as_str());
        let title_area = render_span(&title, Style::default(), cell_area, buf);

        if column.is_sortable() {
            let sort_x = min(title_area.right() + 1, cell_area.right());
            let sort_area = Rect::new(
                sort_x,
                cell_area.y,
                min(sort_width, cell_area.right() - sort_x),
                cell_area.height,
            );

            let asc_area = render_span(
                &widget.ascending_str,
                widget.sort_indicator_style(
                    state
                        .sort
                        .is_active(&column.data_index, SortDirection::Ascending),
                ),
                sort_area,
                buf,
            );
            let desc_x = min(asc_area.right(), sort_area.right());
            render_span(
                &widget.descending_str,
                widget.sort_indicator_style(
                    state
                        .sort
                        .is_active(&column.data_index, SortDirection::Descending),
                ),
                Rect::new(
                    desc_x,
                    sort_area.y,
                    sort_area.right() - desc_x,
                    sort_area.height,
                ),
                buf,
            );

            state.sort_areas.push(sort_area);
        } else {
            state
                .sort_areas
                .push(Rect::new(cell_area.x, cell_area.y, 0, 0));
        }
    }

    if let Some(sort_cursor) = state.sort_cursor {
        if sort_cursor >= widget.columns.len() {
            state.sort_cursor = None;
        }
    }
}

fn render_rows<R: TableRow + 'static>(
    widget: &CheckTable<'_, R>,
    l_check: &Rect,
    l_columns: &[Rect],
    buf: &mut Buffer,
    state: &mut CheckTableState<R>,
) {
    state.row_areas.clear();
    state.check_areas.clear();

    let rows = widget.data.len();
    if let Some(cursor) = state.cursor {
        if rows == 0 {
            state.cursor = None;
        } else if cursor >= rows {
            state.cursor = Some(rows - 1);
        }
    }
    state.row_offset = min(state.row_offset, state.max_row_offset());
    state.rendered_offset = state.row_offset;

    let select_style = widget
        .select_row_style
        .unwrap_or_else(|| revert_style(widget.style));
    let focus_style = fallback_select_style(widget.focus_style.unwrap_or_default());

    let table_area = state.table_area;
    let mut y = table_area.y;
    for (idx, row) in widget.data.iter().enumerate().skip(state.row_offset) {
        if y >= table_area.bottom() {
            break;
        }

        let row_area = Rect::new(table_area.x, y, table_area.width, 1);
        let selected = is_selected(widget.selected, row.key());

        if selected {
            buf.set_style(row_area, select_style);
        }
        if state.is_focused() && state.cursor == Some(idx) {
            buf.set_style(row_area, focus_style);
        }

        let check = if selected {
            &widget.checked_str
        } else {
            &widget.unchecked_str
        };
        let check_area = render_span(
            check,
            Style::default(),
            Rect::new(l_check.x, y, l_check.width, 1),
            buf,
        );

        for (col, column) in widget.columns.iter().enumerate() {
            let cell_area =
                Rect::new(l_columns[col].x, y, l_columns[col].width, 1).intersection(row_area);
            if !cell_area.is_empty() {
                column.cell(row, selected).render(cell_area, buf);
            }
        }

        state.row_areas.push(row_area);
        state.check_areas.push(check_area);
        y += 1;
    }
}

#[cfg(feature = "key_warnings")]
fn key_warnings<R: TableRow>(widget: &CheckTable<'_, R>) {
    use log::warn;

    let (duplicates, missing) = broken_keys(widget.data, widget.selected);
    for key in duplicates {
        warn!("CheckTable: duplicate row key {}", key);
    }
    for key in missing {
        warn!("CheckTable: selected key {} is not in the data", key);
    }
}

/// Duplicate row keys and selected keys missing from the data.
#[cfg(feature = "key_warnings")]
fn broken_keys<R: TableRow>(data: &[R], selected: &[RowKey]) -> (Vec<RowKey>, Vec<RowKey>) {
    use std::collections::HashSet;

    let mut keys = HashSet::new();
    let mut duplicates = Vec::new();
    for row in data {
        if !keys.insert(row.key()) {
            duplicates.push(row.key());
        }
    }
    let missing = selected
        .iter()
        .copied()
        .filter(|key| !keys.contains(key))
        .collect();
    (duplicates, missing)
}

impl Default for CheckTableStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            header: Default::default(),
            select_row: Default::default(),
            focus: Default::default(),
            sort_active: Default::default(),
            sort_inactive: Default::default(),
            block: Default::default(),
            border_style: Default::default(),
            checked_str: Default::default(),
            unchecked_str: Default::default(),
            indeterminate_str: Default::default(),
            ascending_str: Default::default(),
            descending_str: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

impl<R: 'static> Default for CheckTableState<R> {
    fn default() -> Self {
        Self {
            focus: Default::default(),
            area: Default::default(),
            inner: Default::default(),
            header_area: Default::default(),
            header_check_area: Default::default(),
            column_areas: Default::default(),
            sort_areas: Default::default(),
            table_area: Default::default(),
            row_areas: Default::default(),
            check_areas: Default::default(),
            rendered_offset: Default::default(),
            row_keys: Default::default(),
            columns: Default::default(),
            selected: Default::default(),
            sort: Default::default(),
            row_offset: Default::default(),
            cursor: Default::default(),
            sort_cursor: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

impl<R> Clone for CheckTableState<R> {
    fn clone(&self) -> Self {
        Self {
            focus: self.focus.new_instance(),
            area: self.area,
            inner: self.inner,
            header_area: self.header_area,
            header_check_area: self.header_check_area,
            column_areas: self.column_areas.clone(),
            sort_areas: self.sort_areas.clone(),
            table_area: self.table_area,
            row_areas: self.row_areas.clone(),
            check_areas: self.check_areas.clone(),
            rendered_offset: self.rendered_offset,
            row_keys: self.row_keys.clone(),
            columns: self.columns.clone(),
            selected: self.selected.clone(),
            sort: self.sort.clone(),
            row_offset: self.row_offset,
            cursor: self.cursor,
            sort_cursor: self.sort_cursor,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl<R> Debug for CheckTableState<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckTableState")
            .field("focus", &self.focus)
            .field("area", &self.area)
            .field("inner", &self.inner)
            .field("header_area", &self.header_area)
            .field("header_check_area", &self.header_check_area)
            .field("column_areas", &self.column_areas)
            .field("sort_areas", &self.sort_areas)
            .field("table_area", &self.table_area)
            .field("row_areas", &self.row_areas)
            .field("check_areas", &self.check_areas)
            .field("rendered_offset", &self.rendered_offset)
            .field("row_keys", &self.row_keys)
            .field("columns", &self.columns)
            .field("selected", &self.selected)
            .field("sort", &self.sort)
            .field("row_offset", &self.row_offset)
            .field("cursor", &self.cursor)
            .field("sort_cursor", &self.sort_cursor)
            .finish()
    }
}

impl<R> HasFocus for CheckTableState<R> {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.area
    }
}

impl<R> RelocatableState for CheckTableState<R> {
    fn relocate(&mut self, shift: (i16, i16), clip: Rect) {
        self.area = relocate_area(self.area, shift, clip);
        self.inner = relocate_area(self.inner, shift, clip);
        self.header_area = relocate_area(self.header_area, shift, clip);
        self.header_check_area = relocate_area(self.header_check_area, shift, clip);
        relocate_areas(self.column_areas.as_mut_slice(), shift, clip);
        relocate_areas(self.sort_areas.as_mut_slice(), shift, clip);
        self.table_area = relocate_area(self.table_area, shift, clip);
        relocate_areas(self.row_areas.as_mut_slice(), shift, clip);
        relocate_areas(self.check_areas.as_mut_slice(), shift, clip);
    }
}

impl<R: 'static> CheckTableState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        let mut z = Self::default();
        z.focus = z.focus.with_name(name);
        z
    }
}

// Info about the rendered table.
impl<R> CheckTableState<R> {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.row_keys.len()
    }

    /// Number of columns, without the checkbox column.
    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    /// Key of the given row.
    pub fn row_key(&self, row: usize) -> Option<RowKey> {
        self.row_keys.get(row).copied()
    }

    /// Row is selected.
    pub fn is_selected_row(&self, row: usize) -> bool {
        self.row_key(row)
            .map(|key| is_selected(&self.selected, key))
            .unwrap_or(false)
    }

    /// Select-all checkbox state.
    pub fn header_check(&self) -> HeaderCheck {
        header_check(&self.selected, self.row_keys.len())
    }

    /// Row at the given screen position.
    pub fn row_at_clicked(&self, pos: (u16, u16)) -> Option<usize> {
        item_at(&self.row_areas, pos.0, pos.1).map(|v| v + self.rendered_offset)
    }

    /// Row whose checkbox is at the given screen position.
    pub fn check_at_clicked(&self, pos: (u16, u16)) -> Option<usize> {
        item_at(&self.check_areas, pos.0, pos.1).map(|v| v + self.rendered_offset)
    }

    /// Column whose sort toggle is at the given screen position.
    pub fn sort_at_clicked(&self, pos: (u16, u16)) -> Option<usize> {
        item_at(&self.sort_areas, pos.0, pos.1)
    }
}

// Cursor and scrolling.
impl<R> CheckTableState<R> {
    /// Visible rows.
    pub fn page_len(&self) -> usize {
        self.table_area.height as usize
    }

    /// Maximum row offset.
    pub fn max_row_offset(&self) -> usize {
        self.rows().saturating_sub(max(1, self.page_len()))
    }

    /// First visible row.
    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// Set the first visible row.
    pub fn set_row_offset(&mut self, offset: usize) -> bool {
        let old_offset = self.row_offset;
        self.row_offset = min(offset, self.max_row_offset());
        old_offset != self.row_offset
    }

    pub fn scroll_up(&mut self, n: usize) -> bool {
        self.set_row_offset(self.row_offset.saturating_sub(n))
    }

    pub fn scroll_down(&mut self, n: usize) -> bool {
        self.set_row_offset(self.row_offset.saturating_add(n))
    }

    /// Scroll the cursor into view.
    pub fn scroll_to_cursor(&mut self) -> bool {
        if let Some(cursor) = self.cursor {
            let page_len = max(1, self.page_len());
            if cursor < self.row_offset {
                self.set_row_offset(cursor)
            } else if cursor >= self.row_offset + page_len {
                self.set_row_offset(cursor + 1 - page_len)
            } else {
                false
            }
        } else {
            false
        }
    }

    /// Cursor row.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Set the cursor. Scrolls to make it visible.
    pub fn set_cursor(&mut self, cursor: Option<usize>) -> bool {
        let old_cursor = self.cursor;
        self.cursor = match cursor {
            Some(v) if self.rows() > 0 => Some(min(v, self.rows() - 1)),
            _ => None,
        };
        self.scroll_to_cursor();
        old_cursor != self.cursor
    }

    /// Move the cursor to the given row.
    pub fn move_to(&mut self, row: usize) -> bool {
        self.set_cursor(Some(row))
    }

    /// Move the cursor up.
    pub fn move_up(&mut self, n: usize) -> bool {
        let maximum = self.rows().saturating_sub(1);
        self.set_cursor(Some(self.cursor.map_or(maximum, |v| v.saturating_sub(n))))
    }

    /// Move the cursor down.
    pub fn move_down(&mut self, n: usize) -> bool {
        self.set_cursor(Some(self.cursor.map_or(0, |v| v.saturating_add(n))))
    }

    /// Move the sort cursor to the next/previous sortable column.
    pub fn move_sort_cursor(&mut self, forward: bool) -> bool {
        let sortable = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_sortable())
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        let old_cursor = self.sort_cursor;
        self.sort_cursor = match self.sort_cursor {
            None if forward => sortable.first().copied(),
            None => sortable.last().copied(),
            Some(c) if forward => sortable.iter().copied().find(|v| *v > c).or(Some(c)),
            Some(c) => sortable.iter().copied().rev().find(|v| *v < c).or(Some(c)),
        };
        old_cursor != self.sort_cursor
    }
}

// Selection and sort changes.
impl<R: 'static> CheckTableState<R> {
    /// Click on the select-all checkbox.
    ///
    /// Returns the complete new selection.
    pub fn toggle_all(&mut self) -> CheckTableOutcome<R> {
        let selected = toggle_all(&self.selected, &self.row_keys);
        self.select_change(selected)
    }

    /// Click on the checkbox of the given row.
    ///
    /// Returns the complete new selection.
    pub fn toggle_row(&mut self, row: usize) -> CheckTableOutcome<R> {
        if let Some(key) = self.row_key(row) {
            let selected = toggle_row(&self.selected, key);
            self.select_change(selected)
        } else {
            CheckTableOutcome::Unchanged
        }
    }

    /// Click on the sort toggle of the given column.
    ///
    /// Returns the complete new sort, if any.
    pub fn toggle_sort(&mut self, column: usize) -> CheckTableOutcome<R> {
        let Some(column) = self.columns.get(column) else {
            return CheckTableOutcome::Unchanged;
        };
        if let Some(sort) = next_sort(&self.sort, column) {
            debug!(
                "CheckTable: sort {} {}",
                sort.sort_key, sort.sort_direction
            );
            self.sort = sort.clone();
            CheckTableOutcome::SortChange(sort)
        } else {
            CheckTableOutcome::Unchanged
        }
    }

    fn select_change(&mut self, selected: Vec<RowKey>) -> CheckTableOutcome<R> {
        debug!("CheckTable: select {:?}", selected);
        self.selected = selected.clone();
        CheckTableOutcome::SelectChange(selected)
    }
}

impl<R: 'static> HandleEvent<Event, Regular, CheckTableOutcome<R>> for CheckTableState<R> {
    fn handle(&mut self, event: &Event, _: Regular) -> CheckTableOutcome<R> {
        let res = if self.is_focused() {
            match event {
                ct_event!(keycode press Up) => {
                    if self.move_up(1) {
                        CheckTableOutcome::Changed
                    } else {
                        CheckTableOutcome::Unchanged
                    }
                }
                ct_event!(keycode press Down) => {
                    if self.move_down(1) {
                        CheckTableOutcome::Changed
                    } else {
                        CheckTableOutcome::Unchanged
                    }
                }
                ct_event!(keycode press CONTROL-Home) | ct_event!(keycode press Home) => {
                    if self.move_to(0) {
                        CheckTableOutcome::Changed
                    } else {
                        CheckTableOutcome::Unchanged
                    }
                }
                ct_event!(keycode press CONTROL-End) | ct_event!(keycode press End) => {
                    if self.move_to(self.rows().saturating_sub(1)) {
                        CheckTableOutcome::Changed
                    } else {
                        CheckTableOutcome::Unchanged
                    }
                }
                ct_event!(keycode press PageUp) => {
                    if self.move_up(max(1, self.page_len().saturating_sub(1))) {
                        CheckTableOutcome::Changed
                    } else {
                        CheckTableOutcome::Unchanged
                    }
                }
                ct_event!(keycode press PageDown) => {
                    if self.move_down(max(1, self.page_len().saturating_sub(1))) {
                        CheckTableOutcome::Changed
                    } else {
                        CheckTableOutcome::Unchanged
                    }
                }
                ct_event!(keycode press Left) => {
                    if self.move_sort_cursor(false) {
                        CheckTableOutcome::Changed
                    } else {
                        CheckTableOutcome::Unchanged
                    }
                }
                ct_event!(keycode press Right) => {
                    if self.move_sort_cursor(true) {
                        CheckTableOutcome::Changed
                    } else {
                        CheckTableOutcome::Unchanged
                    }
                }
                ct_event!(key press ' ') => {
                    if let Some(cursor) = self.cursor {
                        self.toggle_row(cursor)
                    } else {
                        CheckTableOutcome::Unchanged
                    }
                }
                ct_event!(key press CONTROL-'a') => self.toggle_all(),
                ct_event!(keycode press Enter) => {
                    if let Some(sort_cursor) = self.sort_cursor {
                        self.toggle_sort(sort_cursor)
                    } else {
                        CheckTableOutcome::Unchanged
                    }
                }
                _ => CheckTableOutcome::Continue,
            }
        } else {
            CheckTableOutcome::Continue
        };

        if res == CheckTableOutcome::Continue {
            self.handle(event, MouseOnly)
        } else {
            res
        }
    }
}

impl<R: 'static> HandleEvent<Event, MouseOnly, CheckTableOutcome<R>> for CheckTableState<R> {
    fn handle(&mut self, event: &Event, _: MouseOnly) -> CheckTableOutcome<R> {
        flow!(match event {
            ct_event!(mouse down Left for column, row)
                if self.header_check_area.contains((*column, *row).into()) =>
            {
                self.toggle_all()
            }
            ct_event!(mouse down Left for column, row) => {
                let pos = (*column, *row);
                if let Some(col) = self.sort_at_clicked(pos) {
                    self.toggle_sort(col)
                } else if let Some(row) = self.check_at_clicked(pos) {
                    self.move_to(row);
                    self.toggle_row(row)
                } else if let Some(row) = self.row_at_clicked(pos) {
                    if self.move_to(row) {
                        CheckTableOutcome::Changed
                    } else {
                        CheckTableOutcome::Unchanged
                    }
                } else {
                    CheckTableOutcome::Continue
                }
            }
            _ => CheckTableOutcome::Continue,
        });

        match event {
            ct_event!(scroll down for column, row)
                if self.table_area.contains((*column, *row).into()) =>
            {
                if self.scroll_down(max(1, self.page_len() / 10)) {
                    CheckTableOutcome::Changed
                } else {
                    CheckTableOutcome::Unchanged
                }
            }
            ct_event!(scroll up for column, row)
                if self.table_area.contains((*column, *row).into()) =>
            {
                if self.scroll_up(max(1, self.page_len() / 10)) {
                    CheckTableOutcome::Changed
                } else {
                    CheckTableOutcome::Unchanged
                }
            }
            _ => CheckTableOutcome::Continue,
        }
    }
}

/// Handle all events.
/// Keyboard events are only processed if focus is true.
/// Mouse events are processed if they are in range.
pub fn handle_events<R: 'static>(
    state: &mut CheckTableState<R>,
    focus: bool,
    event: &Event,
) -> CheckTableOutcome<R> {
    state.focus.set(focus);
    state.handle(event, Regular)
}

/// Handle only mouse-events.
pub fn handle_mouse_events<R: 'static>(
    state: &mut CheckTableState<R>,
    event: &Event,
) -> CheckTableOutcome<R> {
    state.handle(event, MouseOnly)
}

#[cfg(all(test, feature = "key_warnings"))]
mod tests {
    use super::*;
    use crate::row::DataRow;

    fn data() -> Vec<DataRow> {
        vec![
            DataRow::new(1).field("name", "Alice"),
            DataRow::new(2).field("name", "Bob"),
            DataRow::new(1).field("name", "Carol"),
        ]
    }

    #[test]
    fn test_broken_keys() {
        let (duplicates, missing) = broken_keys(&data(), &[2, 7, 1, 9]);
        assert_eq!(duplicates, vec![1]);
        assert_eq!(missing, vec![7, 9]);

        let (duplicates, missing) = broken_keys(&data()[..2], &[2, 1]);
        assert!(duplicates.is_empty());
        assert!(missing.is_empty());
    }

    #[test]
    fn test_render_broken_keys() {
        let columns = vec![Column::new("name", "Name")];
        let data = data();
        let mut state = CheckTableState::new();
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        CheckTable::new()
            .columns(&columns)
            .data(&data)
            .selected(&[1, 7])
            .render(area, &mut buf, &mut state);

        assert_eq!(state.row_keys, vec![1, 2, 1]);
        assert_eq!(state.row_areas.len(), 3);
        assert!(state.is_selected_row(0));
        assert!(!state.is_selected_row(1));
        assert!(state.is_selected_row(2));
    }
}
