use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{draw_footer, draw_header, read_key, screen_chunks, Ui};

/// Yes/no question. Only an explicit `y` answers yes; everything that
/// dismisses the dialog answers no.
pub fn confirm(ui: &mut Ui, title: &str, question: &str) -> Result<bool> {
    loop {
        ui.terminal().draw(|f| {
            let (header, body, footer) = screen_chunks(f);

            draw_header(f, header, title, "");

            let mut lines = vec![Line::from("")];
            for l in question.lines() {
                lines.push(Line::from(format!(" {l}")));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    "[y]",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" yes   "),
                Span::styled(
                    "[n]",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" no"),
            ]));

            let body_widget = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL))
                .wrap(Wrap { trim: false });
            f.render_widget(body_widget, body);

            draw_footer(f, footer, &[("y", "yes"), ("n/Esc", "no")]);
        })?;

        match read_key()?.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
                return Ok(false)
            }
            _ => {}
        }
    }
}
