use rat_checktable::{CheckTable, CheckTableState, Column, DataRow, SortDirection, SortSelect};
use ratatui_core::buffer::Buffer;
use ratatui_core::layout::Rect;
use ratatui_core::style::{Color, Modifier};
use ratatui_core::text::Text;
use ratatui_core::widgets::StatefulWidget;
use ratatui_widgets::block::Block;

fn line(buf: &Buffer, y: u16) -> String {
    (buf.area.left()..buf.area.right())
        .map(|x| buf[(x, y)].symbol())
        .collect()
}

fn columns() -> Vec<Column<DataRow>> {
    vec![
        Column::new("name", "Name"),
        Column::new("age", "Age").sorter(|a: &DataRow, b: &DataRow| {
            a.fields.get("age").cmp(&b.fields.get("age"))
        }),
    ]
}

fn data() -> Vec<DataRow> {
    vec![
        DataRow::new(1).field("name", "Alice").field("age", "31"),
        DataRow::new(2).field("name", "Bob").field("age", "27"),
    ]
}

fn render(
    columns: &[Column<DataRow>],
    data: &[DataRow],
    selected: &[u64],
    sort: &SortSelect<DataRow>,
    area: Rect,
    state: &mut CheckTableState<DataRow>,
) -> Buffer {
    let mut buf = Buffer::empty(area);
    CheckTable::new()
        .columns(columns)
        .data(data)
        .selected(selected)
        .sort(sort)
        .render(area, &mut buf, state);
    buf
}

#[test]
fn test_partial_selection() {
    let columns = columns();
    let data = data();
    let mut state = CheckTableState::new();
    let buf = render(
        &columns,
        &data,
        &[1],
        &SortSelect::none(),
        Rect::new(0, 0, 30, 4),
        &mut state,
    );

    assert!(line(&buf, 0).starts_with("[-] Name"));
    assert!(line(&buf, 1).starts_with("[\u{2713}] Alice"));
    assert!(line(&buf, 2).starts_with("[ ] Bob"));
    assert_eq!(line(&buf, 3).trim(), "");

    // selected rows are highlighted
    assert_eq!(buf[(10, 1)].bg, Color::White);
    assert_ne!(buf[(10, 2)].bg, Color::White);

    assert!(state.header_check().is_indeterminate());
    assert!(state.is_selected_row(0));
    assert!(!state.is_selected_row(1));
    assert_eq!(state.row_keys, vec![1, 2]);
    assert_eq!(state.header_check_area, Rect::new(0, 0, 3, 1));
    assert_eq!(state.check_areas, vec![Rect::new(0, 1, 3, 1), Rect::new(0, 2, 3, 1)]);
}

#[test]
fn test_full_and_empty_selection() {
    let columns = columns();
    let data = data();
    let mut state = CheckTableState::new();

    let buf = render(
        &columns,
        &data,
        &[2, 1],
        &SortSelect::none(),
        Rect::new(0, 0, 30, 4),
        &mut state,
    );
    assert!(line(&buf, 0).starts_with("[\u{2713}] Name"));
    assert!(state.header_check().is_checked());

    let buf = render(
        &columns,
        &data,
        &[],
        &SortSelect::none(),
        Rect::new(0, 0, 30, 4),
        &mut state,
    );
    assert!(line(&buf, 0).starts_with("[ ] Name"));
    assert!(line(&buf, 1).starts_with("[ ] Alice"));
    assert!(line(&buf, 2).starts_with("[ ] Bob"));
}

#[test]
fn test_empty_data() {
    let columns = columns();
    let mut state = CheckTableState::new();
    let buf = render(
        &columns,
        &[],
        &[],
        &SortSelect::none(),
        Rect::new(0, 0, 30, 4),
        &mut state,
    );
    // no rows never shows as all selected
    assert!(line(&buf, 0).starts_with("[ ] Name"));
    assert!(state.row_areas.is_empty());
    assert!(!state.header_check().is_checked());
}

#[test]
fn test_duplicate_keys_in_selection() {
    let columns = columns();
    let data = data();
    let mut state = CheckTableState::new();
    let buf = render(
        &columns,
        &data,
        &[1, 1],
        &SortSelect::none(),
        Rect::new(0, 0, 30, 4),
        &mut state,
    );
    // the header only compares the counts
    assert!(line(&buf, 0).starts_with("[\u{2713}] Name"));
    assert!(line(&buf, 1).starts_with("[\u{2713}] Alice"));
    assert!(line(&buf, 2).starts_with("[ ] Bob"));
}

#[test]
fn test_stale_keys_not_highlighted() {
    let columns = columns();
    let data = data();
    let mut state = CheckTableState::new();
    let buf = render(
        &columns,
        &data,
        &[7],
        &SortSelect::none(),
        Rect::new(0, 0, 30, 4),
        &mut state,
    );
    assert!(line(&buf, 1).starts_with("[ ] Alice"));
    assert!(line(&buf, 2).starts_with("[ ] Bob"));
    assert_ne!(buf[(10, 1)].bg, Color::White);
    assert_ne!(buf[(10, 2)].bg, Color::White);
}

#[test]
fn test_sort_indicator() {
    let columns = columns();
    let data = data();
    let mut state = CheckTableState::new();
    let sorter = columns[1].sorter.clone().expect("sorter");

    let sort = SortSelect::new("age", SortDirection::Ascending, sorter.clone());
    let buf = render(
        &columns,
        &data,
        &[],
        &sort,
        Rect::new(0, 0, 30, 4),
        &mut state,
    );

    // no toggle for the name column
    assert!(state.sort_areas[0].is_empty());

    let toggle = state.sort_areas[1];
    assert_eq!(toggle.width, 2);
    assert_eq!(buf[(toggle.x, 0)].symbol(), "\u{25B2}");
    assert_eq!(buf[(toggle.x + 1, 0)].symbol(), "\u{25BC}");
    assert!(!buf[(toggle.x, 0)].modifier.contains(Modifier::DIM));
    assert!(buf[(toggle.x + 1, 0)].modifier.contains(Modifier::DIM));

    let sort = SortSelect::new("age", SortDirection::Descending, sorter);
    let buf = render(
        &columns,
        &data,
        &[],
        &sort,
        Rect::new(0, 0, 30, 4),
        &mut state,
    );
    assert!(buf[(toggle.x, 0)].modifier.contains(Modifier::DIM));
    assert!(!buf[(toggle.x + 1, 0)].modifier.contains(Modifier::DIM));

    let buf = render(
        &columns,
        &data,
        &[],
        &SortSelect::none(),
        Rect::new(0, 0, 30, 4),
        &mut state,
    );
    assert!(buf[(toggle.x, 0)].modifier.contains(Modifier::DIM));
    assert!(buf[(toggle.x + 1, 0)].modifier.contains(Modifier::DIM));
}

#[test]
fn test_custom_render() {
    let columns = vec![
        Column::new("name", "Name").render(|value, row: &DataRow, selected| {
            let mark = if selected { "*" } else { "-" };
            Text::from(format!(
                "{}{}{}",
                mark,
                value.unwrap_or_default().to_uppercase(),
                row.key
            ))
        }),
        Column::new("age", "Age"),
    ];
    let data = vec![
        DataRow::new(1).field("name", "Alice"),
        DataRow::new(2).field("name", "Bob").field("age", "27"),
    ];
    let mut state = CheckTableState::new();
    let buf = render(
        &columns,
        &data,
        &[2],
        &SortSelect::none(),
        Rect::new(0, 0, 30, 4),
        &mut state,
    );

    assert!(line(&buf, 1).starts_with("[ ] -ALICE1"));
    assert!(line(&buf, 2).starts_with("[\u{2713}] *BOB2"));
    // missing field is empty
    let age_x = state.column_areas[1].x;
    assert_eq!(buf[(age_x, 1)].symbol(), " ");
    assert_eq!(buf[(age_x, 2)].symbol(), "2");
}

#[test]
fn test_block() {
    let columns = columns();
    let data = data();
    let mut state = CheckTableState::new();
    let area = Rect::new(0, 0, 30, 6);
    let mut buf = Buffer::empty(area);
    CheckTable::new()
        .columns(&columns)
        .data(&data)
        .block(Block::bordered())
        .render(area, &mut buf, &mut state);

    assert_eq!(state.inner, Rect::new(1, 1, 28, 4));
    assert_eq!(state.header_check_area, Rect::new(1, 1, 3, 1));
    assert!(line(&buf, 1).starts_with("\u{2502}[ ] Name"));
    assert!(line(&buf, 2).starts_with("\u{2502}[ ] Alice"));
}

#[test]
fn test_clipped_rows() {
    let columns = columns();
    let data = (1..=5)
        .map(|v| DataRow::new(v).field("name", format!("row{}", v)))
        .collect::<Vec<_>>();
    let mut state = CheckTableState::new();
    let buf = render(
        &columns,
        &data,
        &[],
        &SortSelect::none(),
        Rect::new(0, 0, 30, 4),
        &mut state,
    );

    assert_eq!(state.rows(), 5);
    assert_eq!(state.page_len(), 3);
    assert_eq!(state.row_areas.len(), 3);
    assert!(line(&buf, 3).starts_with("[ ] row3"));

    assert!(state.set_row_offset(10));
    assert_eq!(state.row_offset(), 2);
    let buf = render(
        &columns,
        &data,
        &[],
        &SortSelect::none(),
        Rect::new(0, 0, 30, 4),
        &mut state,
    );
    assert!(line(&buf, 1).starts_with("[ ] row3"));
    assert!(line(&buf, 3).starts_with("[ ] row5"));
}

#[test]
fn test_default_widget() {
    let mut state = CheckTableState::<DataRow>::default();
    let area = Rect::new(0, 0, 10, 2);
    let mut buf = Buffer::empty(area);
    CheckTable::<DataRow>::default().render(area, &mut buf, &mut state);

    assert!(line(&buf, 0).starts_with("[ ]"));
    assert_eq!(state.columns(), 0);
    assert_eq!(state.rows(), 0);
    assert_eq!(state.sort, SortSelect::none());
}

#[test]
fn test_zero_area() {
    let columns = columns();
    let data = data();
    let mut state = CheckTableState::new();
    let mut buf = Buffer::empty(Rect::new(0, 0, 0, 0));
    CheckTable::new()
        .columns(&columns)
        .data(&data)
        .render(Rect::new(0, 0, 0, 0), &mut buf, &mut state);

    assert!(state.row_areas.is_empty());
    assert!(state.header_check_area.is_empty());
}
