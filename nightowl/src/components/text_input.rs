//! Single-line labeled text input with cursor.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

use nightowl_core::Action;

use super::Component;
use crate::event::EventKind;

pub struct TextInputProps<'a> {
    pub value: &'a str,
    /// Shown before the value, dimmed (`Label: value`).
    pub label: &'a str,
    /// Shown when the value is empty.
    pub placeholder: &'a str,
    pub is_focused: bool,
    /// Render the value as bullets (passwords).
    pub masked: bool,
    pub on_change: &'a dyn Fn(String) -> Action,
    pub on_submit: &'a dyn Fn(String) -> Action,
}

/// Handles typing, backspace/delete, and cursor movement. Emits
/// `on_change` per edit and `on_submit` for Enter.
#[derive(Default)]
pub struct TextInput {
    /// Cursor position (byte index), clamped to the current value.
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while self.cursor > 0 && !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn move_left(&mut self, value: &str) {
        if self.cursor > 0 {
            let mut pos = self.cursor - 1;
            while pos > 0 && !value.is_char_boundary(pos) {
                pos -= 1;
            }
            self.cursor = pos;
        }
    }

    fn move_right(&mut self, value: &str) {
        if self.cursor < value.len() {
            let mut pos = self.cursor + 1;
            while pos < value.len() && !value.is_char_boundary(pos) {
                pos += 1;
            }
            self.cursor = pos;
        }
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        new_value
    }

    fn delete_before(&mut self, value: &str) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        let char_start = value[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..char_start]);
        new_value.push_str(&value[self.cursor..]);
        self.cursor = char_start;
        Some(new_value)
    }

    fn delete_at(&self, value: &str) -> Option<String> {
        if self.cursor >= value.len() {
            return None;
        }
        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..self.cursor]);
        if let Some((_, c)) = value[self.cursor..].char_indices().next() {
            new_value.push_str(&value[self.cursor + c.len_utf8()..]);
        }
        Some(new_value)
    }
}

impl Component for TextInput {
    type Props<'a> = TextInputProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        if !props.is_focused {
            return Vec::new();
        }
        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    Vec::new()
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    Vec::new()
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    vec![(props.on_change)(String::new())]
                }
                _ => Vec::new(),
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let new_value = self.insert_char(props.value, c);
                vec![(props.on_change)(new_value)]
            }
            KeyCode::Backspace => self
                .delete_before(props.value)
                .map(|v| vec![(props.on_change)(v)])
                .unwrap_or_default(),
            KeyCode::Delete => self
                .delete_at(props.value)
                .map(|v| vec![(props.on_change)(v)])
                .unwrap_or_default(),
            KeyCode::Left => {
                self.move_left(props.value);
                Vec::new()
            }
            KeyCode::Right => {
                self.move_right(props.value);
                Vec::new()
            }
            KeyCode::Home => {
                self.cursor = 0;
                Vec::new()
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                Vec::new()
            }
            KeyCode::Enter => vec![(props.on_submit)(props.value.to_string())],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);

        let masked_value;
        let shown: &str = if props.value.is_empty() {
            props.placeholder
        } else if props.masked {
            masked_value = "•".repeat(props.value.chars().count());
            &masked_value
        } else {
            props.value
        };

        let value_style = if props.value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let label_style = if props.is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = Vec::new();
        if !props.label.is_empty() {
            spans.push(Span::styled(format!("{}: ", props.label), label_style));
        }
        spans.push(Span::styled(shown.to_string(), value_style));
        let line = Line::from(spans);
        let label_width = if props.label.is_empty() {
            0
        } else {
            props.label.chars().count() as u16 + 2
        };
        frame.render_widget(
            ratatui::widgets::Paragraph::new(line).style(if props.is_focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }),
            area,
        );

        if props.is_focused {
            let cursor_cols = props.value[..self.cursor].chars().count() as u16;
            let x = area.x + label_width + cursor_cols;
            if x < area.x + area.width {
                frame.set_cursor_position((x, area.y));
            }
        }
    }
}
