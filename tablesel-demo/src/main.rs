use std::fs::File;
use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::{cursor, execute, queue, terminal};
use log::{debug, info};
use simplelog::{Config, LevelFilter, WriteLogger};
use tablesel::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
struct User {
    id: u32,
    name: String,
    email: String,
    role: &'static str,
}

impl TableRow for User {
    fn id(&self) -> String {
        self.id.to_string()
    }
}

const NAMES: [&str; 12] = [
    "ada", "brian", "grace", "dennis", "barbara", "ken", "margaret", "linus", "frances", "niklaus",
    "radia", "edsger",
];
const ROLES: [&str; 3] = ["admin", "editor", "viewer"];

fn user(id: u32) -> User {
    let name = NAMES[id as usize % NAMES.len()];
    User {
        id,
        name: format!("{name}{id}"),
        email: format!("{name}{id}@example.com"),
        role: ROLES[id as usize % ROLES.len()],
    }
}

fn columns() -> ColumnSpace {
    ColumnSpace::new(vec![
        Column::new(ColumnId(0), "Name"),
        Column::new(ColumnId(1), "Email"),
        Column::new(ColumnId(2), "Role"),
    ])
}

/// Raw-mode alternate screen, restored on drop.
struct Screen {
    stdout: Stdout,
}

impl Screen {
    fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { stdout })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

const HEADER_LINES: u16 = 3;
const FOOTER_LINES: u16 = 2;

fn main() -> io::Result<()> {
    let log_file = File::create("tablesel-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file).map_err(io::Error::other)?;

    let rows = RowList::new((0..60).map(user).collect());
    let mut table = Table::new(rows, columns());
    let mut next_id = 60;
    let mut status = String::from("ready");

    let mut screen = Screen::new()?;
    let mut offset = 0usize;

    loop {
        let (width, height) = terminal::size()?;
        let body = height.saturating_sub(HEADER_LINES + FOOTER_LINES).max(1) as usize;
        table.set_page_size(body);

        if let Some(focus) = table.focused_index() {
            if focus < offset {
                offset = focus;
            } else if focus >= offset + body {
                offset = focus + 1 - body;
            }
        }
        draw(&mut screen.stdout, &table, offset, body, width, &status)?;
        table.clear_dirty();

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        if table.on_key_event(key).is_handled() {
            let events = table.drain_events();
            for e in &events {
                debug!("{:?}", e);
            }
            status = format!("{} event(s)", events.len());
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('c') => {
                let enabled = !table.is_cell_selection_enabled();
                table.set_cell_selection_enabled(enabled);
                status = format!("cell selection {}", if enabled { "on" } else { "off" });
            }
            KeyCode::Char('m') => {
                let mode = match table.selection_mode() {
                    SelectionMode::Single => SelectionMode::Multiple,
                    SelectionMode::Multiple => SelectionMode::Single,
                };
                table.set_selection_mode(mode);
                status = format!("{mode:?} selection");
            }
            KeyCode::Char('o') => {
                let orientation = match table.orientation() {
                    Orientation::Ltr => Orientation::Rtl,
                    Orientation::Rtl => Orientation::Ltr,
                };
                table.set_orientation(orientation);
                status = format!("{orientation:?}");
            }
            KeyCode::Char('d') => {
                let doomed = table.selected_indices();
                table.remove_rows(&doomed);
                status = format!("removed {} row(s)", doomed.len());
            }
            KeyCode::Char('i') => {
                let at = table.focused_index().unwrap_or(0);
                table.insert_rows(at, vec![user(next_id)]);
                next_id += 1;
                status = format!("inserted at {at}");
            }
            KeyCode::Char('s') => {
                table.sort_rows_by(|a, b| a.name.cmp(&b.name));
                status = "sorted by name".to_string();
            }
            _ => {}
        }
        table.drain_events();
    }

    drop(screen);
    info!("Exiting with {} row(s)", table.row_count());
    Ok(())
}

fn draw(
    out: &mut Stdout,
    table: &Table<RowList<User>>,
    offset: usize,
    body: usize,
    width: u16,
    status: &str,
) -> io::Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    queue!(
        out,
        Print(format!(
            "rows {}  selected {}  anchor {}",
            table.row_count(),
            table.selected_indices().len(),
            table
                .anchor()
                .map(|a| a.to_string())
                .unwrap_or_else(|| "-".to_string())
        )),
        cursor::MoveTo(0, 1),
        Print("q quit  c cells  m mode  o direction  d delete  i insert  s sort"),
    )?;

    let mut headers: Vec<&Column> = table.columns().columns().iter().collect();
    if table.orientation() == Orientation::Rtl {
        headers.reverse();
    }
    queue!(out, cursor::MoveTo(2, 2))?;
    for column in &headers {
        queue!(out, Print(format!("{:<28}", column.header)))?;
    }

    let rows = table.rows().rows();
    for (line, (index, row)) in rows.iter().enumerate().skip(offset).take(body).enumerate() {
        let y = HEADER_LINES + line as u16;
        let marker = if table.is_focused(index, None) { ">" } else { " " };
        queue!(out, cursor::MoveTo(0, y), Print(marker), cursor::MoveTo(2, y))?;

        for column in &headers {
            let text = match column.id.0 {
                0 => row.name.as_str(),
                1 => row.email.as_str(),
                _ => row.role,
            };
            let selected = table.is_selected(index, Some(column.id));
            let focused = table.is_cell_selection_enabled() && table.is_focused(index, Some(column.id));
            if selected {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            if focused {
                queue!(out, SetAttribute(Attribute::Underlined))?;
            }
            queue!(out, Print(format!("{text:<28}")), SetAttribute(Attribute::Reset))?;
        }
    }

    let footer = HEADER_LINES + body as u16;
    let line: String = status.chars().take(width as usize).collect();
    queue!(out, cursor::MoveTo(0, footer + 1), Print(line))?;
    out.flush()
}
