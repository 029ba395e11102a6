//!
//! Checkbox table with sortable columns.
//!
//! Selection and sort are kept here and only handed to the table
//! for rendering.
//!

use anyhow::anyhow;
use log::debug;
use rat_checktable::event::{CheckTableOutcome, Outcome, ct_event};
use rat_checktable::{
    CheckTable, CheckTableState, CheckTableStyle, Column, DataRow, RowKey, SortSelect,
    handle_events,
};
use ratatui_core::buffer::Buffer;
use ratatui_core::layout::{Constraint, Layout, Rect};
use ratatui_core::style::{Color, Style};
use ratatui_core::terminal::Terminal;
use ratatui_core::text::{Line, Text};
use ratatui_core::widgets::{StatefulWidget, Widget};
use ratatui_crossterm::crossterm::ExecutableCommand;
use ratatui_crossterm::crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use ratatui_crossterm::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui_crossterm::{CrosstermBackend, crossterm};
use ratatui_widgets::block::Block;
use ratatui_widgets::borders::BorderType;
use std::fs;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

const PEOPLE: [(&str, &str, u32); 12] = [
    ("Jane", "Dublin", 34),
    ("Tomasz", "Krakow", 27),
    ("Aiko", "Osaka", 41),
    ("Bruno", "Lisbon", 19),
    ("Fatima", "Casablanca", 52),
    ("Lars", "Bergen", 38),
    ("Mei", "Taipei", 23),
    ("Okoro", "Lagos", 45),
    ("Pia", "Graz", 31),
    ("Rafael", "Recife", 29),
    ("Sven", "Malmo", 61),
    ("Yusuf", "Izmir", 36),
];

struct State {
    columns: Vec<Column<DataRow>>,
    data: Vec<DataRow>,
    rows: Vec<DataRow>,
    selected: Vec<RowKey>,
    sort: SortSelect<DataRow>,
    table: CheckTableState<DataRow>,
    quit: bool,
}

fn main() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let data = PEOPLE
        .iter()
        .enumerate()
        .map(|(i, (name, city, age))| {
            DataRow::new(i as RowKey + 1)
                .field("name", *name)
                .field("city", *city)
                .field("age", age.to_string())
        })
        .collect::<Vec<_>>();

    let mut state = State {
        columns: columns(),
        rows: data.clone(),
        data,
        selected: Vec::new(),
        sort: SortSelect::none(),
        table: CheckTableState::named("people"),
        quit: false,
    };
    state.table.focus.set(true);

    run_ui(&mut state)
}

fn columns() -> Vec<Column<DataRow>> {
    vec![
        Column::new("name", "Name")
            .width(Constraint::Length(12))
            .sorter(|a: &DataRow, b: &DataRow| {
                a.fields.get("name").cmp(&b.fields.get("name"))
            }),
        Column::new("city", "City").width(Constraint::Length(14)),
        Column::new("age", "Age")
            .width(Constraint::Length(8))
            .sorter(|a: &DataRow, b: &DataRow| age(a).cmp(&age(b)))
            .render(|value, row, selected| {
                let text = Text::from(value.unwrap_or_default().to_string());
                if !selected && age(row) >= 50 {
                    text.style(Style::new().fg(Color::LightRed))
                } else {
                    text
                }
            }),
    ]
}

fn age(row: &DataRow) -> u32 {
    row.fields
        .get("age")
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

fn render(area: Rect, buf: &mut Buffer, state: &mut State) {
    let l = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);
    let l_table = Layout::horizontal([Constraint::Length(44)]).split(l[0]);

    CheckTable::new()
        .columns(&state.columns)
        .data(&state.rows)
        .selected(&state.selected)
        .sort(&state.sort)
        .styles(CheckTableStyle {
            header: Some(Style::new().bold()),
            select_row: Some(Style::new().black().on_cyan()),
            focus: Some(Style::new().black().on_yellow()),
            sort_active: Some(Style::new().yellow()),
            block: Some(Block::bordered().border_type(BorderType::Rounded)),
            ..Default::default()
        })
        .render(l_table[0], buf, &mut state.table);

    Line::from(format!(
        " selected {:?} | sort {} {} | Ctrl-Q to quit",
        state.selected, state.sort.sort_key, state.sort.sort_direction
    ))
    .render(l[1], buf);
}

fn handle(event: &Event, state: &mut State) -> Result<Outcome, anyhow::Error> {
    match event {
        ct_event!(key press CONTROL-'q') | ct_event!(keycode press Esc) => {
            state.quit = true;
            return Ok(Outcome::Changed);
        }
        ct_event!(resized) => return Ok(Outcome::Changed),
        _ => {}
    }

    let mut sort_changed = false;
    let r = match handle_events(&mut state.table, true, event) {
        CheckTableOutcome::SortChange(sort) => {
            state.sort = sort;
            sort_changed = true;
            Outcome::Changed
        }
        r => r.dispatch(|selected| state.selected = selected, |_| {}),
    };

    if sort_changed {
        debug!("resort {} {}", state.sort.sort_key, state.sort.sort_direction);
        state.rows = state.data.clone();
        state.sort.sort(&mut state.rows);
    }

    Ok(r)
}

fn run_ui(state: &mut State) -> Result<(), anyhow::Error> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    terminal.draw(|frame| render(frame.area(), frame.buffer_mut(), state))?;

    let r = 'l: loop {
        let o = match crossterm::event::poll(Duration::from_millis(10)) {
            Ok(true) => {
                let event = match crossterm::event::read() {
                    Ok(v) => v,
                    Err(e) => break 'l Err(anyhow!(e)),
                };
                match handle(&event, state) {
                    Ok(v) => v,
                    Err(e) => break 'l Err(e),
                }
            }
            Ok(false) => continue,
            Err(e) => break 'l Err(anyhow!(e)),
        };

        if state.quit {
            break 'l Ok(());
        }

        if o == Outcome::Changed {
            if let Err(e) = terminal.draw(|frame| render(frame.area(), frame.buffer_mut(), state)) {
                break 'l Err(anyhow!(e));
            }
        }
    };

    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;

    r
}

fn setup_logging() -> Result<(), anyhow::Error> {
    let log = PathBuf::from("test.log");
    if log.exists() {
        fs::remove_file(&log)?;
    }
    fern::Dispatch::new()
        .format(|out, message, _record| out.finish(format_args!("{}", message)))
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(&log)?)
        .apply()?;
    Ok(())
}
