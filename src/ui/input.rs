use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{draw_footer, draw_header, read_key, screen_chunks, Ui};

/// One labeled line of a form.
#[derive(Debug, Clone)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
        }
    }

    pub fn with_value(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

fn field_line(field: &Field, active: bool, label_width: usize) -> Line<'static> {
    let label = format!(" {:<label_width$} ", field.label);
    let mut spans = vec![Span::styled(label, Style::default().fg(Color::Cyan))];

    spans.push(Span::styled(
        field.value.clone(),
        Style::default().fg(Color::Yellow),
    ));

    if active {
        spans.push(Span::styled(
            "_",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}

fn draw_fields(f: &mut Frame, area: ratatui::layout::Rect, fields: &[Field], active: usize) {
    let label_width = fields.iter().map(|field| field.label.len()).max().unwrap_or(0);

    let mut lines = vec![Line::from("")];
    for (i, field) in fields.iter().enumerate() {
        lines.push(field_line(field, i == active, label_width));
        lines.push(Line::from(""));
    }

    let body = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(body, area);
}

/// Free-text prompt. Returns the entered text (possibly empty), or `None`
/// on cancel.
pub fn input(ui: &mut Ui, title: &str, prompt: &str, initial: &str) -> Result<Option<String>> {
    let mut fields = vec![Field::with_value(prompt, initial)];
    let submitted = edit(ui, title, "", &mut fields)?;
    Ok(submitted.then(|| fields.remove(0).value))
}

/// Small fixed form. Returns one value per field in order, or `None` on
/// cancel.
pub fn form(
    ui: &mut Ui,
    title: &str,
    context: &str,
    mut fields: Vec<Field>,
) -> Result<Option<Vec<String>>> {
    let submitted = edit(ui, title, context, &mut fields)?;
    Ok(submitted.then(|| fields.into_iter().map(|f| f.value).collect()))
}

fn edit(ui: &mut Ui, title: &str, context: &str, fields: &mut [Field]) -> Result<bool> {
    let mut active = 0usize;

    loop {
        ui.terminal().draw(|f| {
            let (header, body, footer) = screen_chunks(f);

            draw_header(f, header, title, context);
            draw_fields(f, body, fields, active);

            let hints: &[(&str, &str)] = if fields.len() > 1 {
                &[("Tab", "next field"), ("Enter", "confirm"), ("Esc", "cancel")]
            } else {
                &[("Enter", "confirm"), ("Esc", "cancel")]
            };
            draw_footer(f, footer, hints);
        })?;

        let key = read_key()?;
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(false)
            }
            KeyCode::Esc => return Ok(false),
            KeyCode::Enter => return Ok(true),
            KeyCode::Tab | KeyCode::Down => active = (active + 1) % fields.len(),
            KeyCode::BackTab | KeyCode::Up => {
                active = if active == 0 { fields.len() - 1 } else { active - 1 }
            }
            KeyCode::Backspace => {
                fields[active].value.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                fields[active].value.push(c);
            }
            _ => {}
        }
    }
}
