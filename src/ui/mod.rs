// Modal dialog layer. One shared terminal in raw mode + alternate screen;
// every dialog is a small draw/poll loop that returns `Option<T>`, where
// `None` means the user cancelled.

pub mod browse;
pub mod confirm;
pub mod input;
pub mod menu;
pub mod notice;
pub mod viewer;

pub use browse::browse_dir;
pub use confirm::confirm;
pub use input::{form, input, Field};
pub use menu::{checklist, menu, Accent, MenuRow};
pub use notice::{error, notice};
pub use viewer::view;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};

pub struct Ui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Ui {
    /// Enter raw mode and the alternate screen. Fails when stdout is not a
    /// usable terminal, which is fatal at startup.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("failed to enable terminal raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("failed to initialize terminal")?;

        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for Ui {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Block until the next key press. Release/repeat events are skipped so
/// Windows terminals don't double-fire.
pub(crate) fn read_key() -> Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read().context("failed to read terminal event")? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

/// Standard screen split: bordered header, body, one-line footer.
pub(crate) fn screen_chunks(f: &Frame) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    (chunks[0], chunks[1], chunks[2])
}

pub(crate) fn draw_header(f: &mut Frame, area: Rect, title: &str, context: &str) {
    let mut spans = vec![Span::styled(
        format!(" {title} "),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];

    if !context.is_empty() {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!(" {context} "),
            Style::default().fg(Color::Cyan),
        ));
    }

    let header =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

pub(crate) fn draw_footer(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, what) in hints {
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {what} ")));
    }

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    f.render_widget(footer, area);
}

/// Shared list cursor used by the menu, checklist and viewer screens.
#[derive(Debug, Default)]
pub(crate) struct ListCursor {
    pub selected: usize,
    pub scroll: usize,
}

impl ListCursor {
    pub fn next(&mut self, len: usize, visible: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
            self.adjust(len, visible);
        }
    }

    pub fn previous(&mut self, len: usize, visible: usize) {
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
            self.adjust(len, visible);
        }
    }

    pub fn page_down(&mut self, len: usize, visible: usize) {
        if len > 0 {
            self.selected = (self.selected + visible.max(1)).min(len - 1);
            self.adjust(len, visible);
        }
    }

    pub fn page_up(&mut self, len: usize, visible: usize) {
        self.selected = self.selected.saturating_sub(visible.max(1));
        self.adjust(len, visible);
    }

    pub fn top(&mut self) {
        self.selected = 0;
        self.scroll = 0;
    }

    pub fn bottom(&mut self, len: usize, visible: usize) {
        if len > 0 {
            self.selected = len - 1;
            self.adjust(len, visible);
        }
    }

    fn adjust(&mut self, len: usize, visible: usize) {
        let visible = visible.max(1);

        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected.saturating_sub(visible - 1);
        }

        let max_scroll = len.saturating_sub(visible);
        self.scroll = self.scroll.min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::ListCursor;

    #[test]
    fn cursor_wraps_both_directions() {
        let mut c = ListCursor::default();
        c.previous(3, 10);
        assert_eq!(c.selected, 2);
        c.next(3, 10);
        assert_eq!(c.selected, 0);
    }

    #[test]
    fn scroll_follows_selection() {
        let mut c = ListCursor::default();
        for _ in 0..7 {
            c.next(20, 5);
        }
        assert_eq!(c.selected, 7);
        assert_eq!(c.scroll, 3);

        c.top();
        assert_eq!(c.scroll, 0);
    }
}
