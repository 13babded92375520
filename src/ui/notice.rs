use anyhow::Result;
use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{draw_footer, draw_header, read_key, screen_chunks, Ui};

/// Short informational message, dismissed by any key.
pub fn notice(ui: &mut Ui, title: &str, message: &str) -> Result<()> {
    show(ui, title, message, Color::Green)
}

/// Error message, dismissed by any key. Long captured output belongs in
/// the viewer; this wraps whatever it is given.
pub fn error(ui: &mut Ui, title: &str, message: &str) -> Result<()> {
    show(ui, title, message, Color::Red)
}

fn show(ui: &mut Ui, title: &str, message: &str, color: Color) -> Result<()> {
    ui.terminal().draw(|f| {
        let (header, body, footer) = screen_chunks(f);

        draw_header(f, header, title, "");

        let body_widget = Paragraph::new(message.to_string())
            .style(Style::default().fg(color))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(body_widget, body);

        draw_footer(f, footer, &[("any key", "dismiss")]);
    })?;

    read_key()?;
    Ok(())
}
