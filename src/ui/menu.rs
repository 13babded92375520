use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::{draw_footer, draw_header, read_key, screen_chunks, ListCursor, Ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Normal,
    Good,
    Warn,
    Action,
}

impl Accent {
    fn color(self) -> Color {
        match self {
            Accent::Normal => Color::White,
            Accent::Good => Color::Green,
            Accent::Warn => Color::Red,
            Accent::Action => Color::Yellow,
        }
    }
}

/// One selectable row. Columns are padded to a shared width per column so
/// hashes, names and relative times line up.
#[derive(Debug, Clone)]
pub struct MenuRow {
    pub columns: Vec<String>,
    pub accent: Accent,
}

impl MenuRow {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            accent: Accent::Normal,
        }
    }

    pub fn accent(mut self, accent: Accent) -> Self {
        self.accent = accent;
        self
    }
}

fn column_widths(rows: &[MenuRow]) -> Vec<usize> {
    let cols = rows.iter().map(|r| r.columns.len()).max().unwrap_or(0);
    let mut widths = vec![0usize; cols];

    for row in rows {
        for (i, cell) in row.columns.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    widths
}

fn row_line(row: &MenuRow, widths: &[usize], marked: Option<bool>) -> Line<'static> {
    let mut spans = Vec::new();

    if let Some(on) = marked {
        spans.push(Span::styled(
            if on { " [x] " } else { " [ ] " },
            Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
        ));
    } else {
        spans.push(Span::raw(" "));
    }

    let last = row.columns.len().saturating_sub(1);
    for (i, cell) in row.columns.iter().enumerate() {
        let text = if i < last {
            let pad = widths[i].saturating_sub(cell.width());
            format!("{cell}{}  ", " ".repeat(pad))
        } else {
            cell.clone()
        };

        let style = if i == 0 {
            Style::default().fg(row.accent.color())
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(text, style));
    }

    Line::from(spans)
}

fn draw_list(
    f: &mut Frame,
    area: Rect,
    rows: &[MenuRow],
    widths: &[usize],
    cursor: &ListCursor,
    marks: Option<&[bool]>,
) {
    let visible = area.height.saturating_sub(2) as usize;
    let end = (cursor.scroll + visible).min(rows.len());

    let items: Vec<ListItem> = rows[cursor.scroll..end]
        .iter()
        .enumerate()
        .map(|(offset, row)| {
            let idx = cursor.scroll + offset;
            let marked = marks.map(|m| m[idx]);
            let line = row_line(row, widths, marked);

            let style = if idx == cursor.selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    f.render_widget(list, area);
}

/// Single-choice list. Returns the selected row index, or `None` on cancel.
pub fn menu(ui: &mut Ui, title: &str, context: &str, rows: &[MenuRow]) -> Result<Option<usize>> {
    if rows.is_empty() {
        return Ok(None);
    }

    let widths = column_widths(rows);
    let mut cursor = ListCursor::default();
    let mut visible = 1usize;

    loop {
        ui.terminal().draw(|f| {
            let (header, body, footer) = screen_chunks(f);
            visible = body.height.saturating_sub(2) as usize;

            draw_header(f, header, title, context);
            draw_list(f, body, rows, &widths, &cursor, None);
            draw_footer(
                f,
                footer,
                &[("j/k", "move"), ("Enter", "select"), ("Esc", "cancel")],
            );
        })?;

        let key = read_key()?;
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None)
            }
            KeyCode::Esc | KeyCode::Char('q') => return Ok(None),
            KeyCode::Enter => return Ok(Some(cursor.selected)),
            KeyCode::Down | KeyCode::Char('j') => cursor.next(rows.len(), visible),
            KeyCode::Up | KeyCode::Char('k') => cursor.previous(rows.len(), visible),
            KeyCode::PageDown => cursor.page_down(rows.len(), visible),
            KeyCode::PageUp => cursor.page_up(rows.len(), visible),
            KeyCode::Char('g') => cursor.top(),
            KeyCode::Char('G') => cursor.bottom(rows.len(), visible),
            _ => {}
        }
    }
}

/// Multi-choice checklist. Returns the checked row indices in list order,
/// or `None` on cancel. May return an empty selection; callers validate.
pub fn checklist(
    ui: &mut Ui,
    title: &str,
    context: &str,
    rows: &[MenuRow],
) -> Result<Option<Vec<usize>>> {
    if rows.is_empty() {
        return Ok(None);
    }

    let widths = column_widths(rows);
    let mut cursor = ListCursor::default();
    let mut marks = vec![false; rows.len()];
    let mut visible = 1usize;

    loop {
        ui.terminal().draw(|f| {
            let (header, body, footer) = screen_chunks(f);
            visible = body.height.saturating_sub(2) as usize;

            draw_header(f, header, title, context);
            draw_list(f, body, rows, &widths, &cursor, Some(&marks));
            draw_footer(
                f,
                footer,
                &[
                    ("Space", "toggle"),
                    ("a", "all"),
                    ("Enter", "confirm"),
                    ("Esc", "cancel"),
                ],
            );
        })?;

        let key = read_key()?;
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None)
            }
            KeyCode::Esc | KeyCode::Char('q') => return Ok(None),
            KeyCode::Enter => {
                let picked: Vec<usize> = marks
                    .iter()
                    .enumerate()
                    .filter(|(_, on)| **on)
                    .map(|(i, _)| i)
                    .collect();
                return Ok(Some(picked));
            }
            KeyCode::Char(' ') => {
                marks[cursor.selected] = !marks[cursor.selected];
                cursor.next(rows.len(), visible);
            }
            KeyCode::Char('a') => {
                let all_on = marks.iter().all(|m| *m);
                for m in &mut marks {
                    *m = !all_on;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => cursor.next(rows.len(), visible),
            KeyCode::Up | KeyCode::Char('k') => cursor.previous(rows.len(), visible),
            KeyCode::PageDown => cursor.page_down(rows.len(), visible),
            KeyCode::PageUp => cursor.page_up(rows.len(), visible),
            KeyCode::Char('g') => cursor.top(),
            KeyCode::Char('G') => cursor.bottom(rows.len(), visible),
            _ => {}
        }
    }
}
