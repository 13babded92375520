use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{draw_footer, draw_header, read_key, screen_chunks, Ui};

/// Scrollable read-only text viewer for command output: status, log,
/// diff, config listings and the like.
pub fn view(ui: &mut Ui, title: &str, context: &str, text: &str) -> Result<()> {
    let line_count = text.lines().count();
    let mut scroll_y = 0usize;
    let mut scroll_x = 0usize;
    let mut visible = 1usize;

    loop {
        ui.terminal().draw(|f| {
            let (header, body, footer) = screen_chunks(f);
            visible = body.height.saturating_sub(2) as usize;

            draw_header(f, header, title, context);
            draw_body(f, body, text, scroll_y, scroll_x);
            draw_footer(
                f,
                footer,
                &[("j/k", "scroll"), ("h/l", "pan"), ("q", "close")],
            );
        })?;

        let max_y = line_count.saturating_sub(visible);
        let key = read_key()?;
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => return Ok(()),
            KeyCode::Down | KeyCode::Char('j') => scroll_y = (scroll_y + 1).min(max_y),
            KeyCode::Up | KeyCode::Char('k') => scroll_y = scroll_y.saturating_sub(1),
            KeyCode::PageDown => scroll_y = (scroll_y + visible.max(1)).min(max_y),
            KeyCode::PageUp => scroll_y = scroll_y.saturating_sub(visible.max(1)),
            KeyCode::Char('g') => scroll_y = 0,
            KeyCode::Char('G') => scroll_y = max_y,
            KeyCode::Right | KeyCode::Char('l') => scroll_x = (scroll_x + 8).min(400),
            KeyCode::Left | KeyCode::Char('h') => scroll_x = scroll_x.saturating_sub(8),
            _ => {}
        }
    }
}

fn draw_body(f: &mut Frame, area: ratatui::layout::Rect, text: &str, y: usize, x: usize) {
    let body = Paragraph::new(text.to_string())
        .block(Block::default().borders(Borders::ALL))
        .scroll((y as u16, x as u16));
    f.render_widget(body, area);
}
