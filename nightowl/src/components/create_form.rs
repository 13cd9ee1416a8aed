//! Create-event form, shown as a modal over the map so the host can
//! click the pin while filling it in.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use nightowl_core::{Action, Coordinate, CreateForm, FormField};

use super::modal::{centered_rect, render_modal};
use super::text_input::{TextInput, TextInputProps};
use super::Component;
use crate::event::EventKind;

const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct CreateFormProps<'a> {
    pub form: &'a CreateForm,
    pub draft: Option<Coordinate>,
    pub tick: u32,
}

pub struct CreateFormPanel {
    input: TextInput,
    was_open: bool,
}

impl Default for CreateFormPanel {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            was_open: false,
        }
    }
}

impl CreateFormPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset cursor state when the form (re)opens.
    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.input = TextInput::new();
        }
        self.was_open = is_open;
    }
}

fn field_change(field: FormField) -> impl Fn(String) -> Action {
    move |value| Action::CreateFieldChange(field, value)
}

fn next_field(_: String) -> Action {
    Action::CreateFocusNext
}

impl Component for CreateFormPanel {
    type Props<'a> = CreateFormProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Esc => return vec![Action::CreateFormCancel],
            KeyCode::Tab => return vec![Action::CreateFocusNext],
            KeyCode::BackTab => return vec![Action::CreateFocusPrev],
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::CreateSubmit];
            }
            _ => {}
        }

        let on_change = field_change(props.form.focus);
        self.input.handle_event(
            event,
            TextInputProps {
                value: props.form.value(props.form.focus),
                label: "",
                placeholder: "",
                is_focused: true,
                masked: false,
                on_change: &on_change,
                // Enter advances; submission is explicit (ctrl+s).
                on_submit: &next_field,
            },
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let modal_area = centered_rect(62, 15, area);
        render_modal(frame, modal_area, Color::Rgb(25, 25, 35));

        let spinner = if props.form.submitting {
            format!(" {} ", SPINNERS[(props.tick as usize / 2) % SPINNERS.len()])
        } else {
            String::new()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(format!(" Create Event{spinner}"))
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let mut y = inner.y;
        for field in CreateForm::FIELDS {
            if y >= inner.bottom() {
                break;
            }
            let row = Rect {
                y,
                height: 1,
                ..inner
            };
            let focused = props.form.focus == field;
            let on_change = field_change(field);
            self.input.render(
                frame,
                row,
                TextInputProps {
                    value: props.form.value(field),
                    label: field.label(),
                    placeholder: if field == FormField::ImagePath {
                        "(optional)"
                    } else {
                        ""
                    },
                    is_focused: focused,
                    masked: false,
                    on_change: &on_change,
                    on_submit: &next_field,
                },
            );
            y += 1;
        }

        // Location line reflects the draft pin.
        if y < inner.bottom() {
            let location = match props.draft {
                Some(coordinate) => Span::styled(
                    format!("Location: ✚ {coordinate}"),
                    Style::default().fg(Color::Green),
                ),
                None => Span::styled(
                    "Location: click the map to drop a pin",
                    Style::default().fg(Color::DarkGray),
                ),
            };
            frame.render_widget(
                Paragraph::new(Line::from(location)),
                Rect {
                    y,
                    height: 1,
                    ..inner
                },
            );
            y += 1;
        }

        if let Some(error) = &props.form.error {
            if y < inner.bottom() {
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        error.message.clone(),
                        Style::default().fg(Color::Red),
                    ))),
                    Rect {
                        y,
                        height: 1,
                        ..inner
                    },
                );
                y += 1;
            }
        }

        if y < inner.bottom() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "tab next field · ctrl+s create · esc cancel",
                    Style::default().fg(Color::DarkGray),
                ))),
                Rect {
                    y: inner.bottom() - 1,
                    height: 1,
                    ..inner
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, RenderHarness};
    use nightowl_core::CreateError;

    fn form() -> CreateForm {
        CreateForm::default()
    }

    #[test]
    fn esc_cancels_and_ctrl_s_submits() {
        let f = form();
        let mut panel = CreateFormPanel::new();
        panel.set_open(true);

        let actions = panel.handle_event(
            &EventKind::Key(key("esc")),
            CreateFormProps {
                form: &f,
                draft: None,
                tick: 0,
            },
        );
        assert_eq!(actions, vec![Action::CreateFormCancel]);

        let actions = panel.handle_event(
            &EventKind::Key(key("ctrl+s")),
            CreateFormProps {
                form: &f,
                draft: None,
                tick: 0,
            },
        );
        assert_eq!(actions, vec![Action::CreateSubmit]);
    }

    #[test]
    fn typing_edits_the_focused_field() {
        let f = form();
        let mut panel = CreateFormPanel::new();
        panel.set_open(true);

        let actions = panel.handle_event(
            &EventKind::Key(key("N")),
            CreateFormProps {
                form: &f,
                draft: None,
                tick: 0,
            },
        );
        assert_eq!(
            actions,
            vec![Action::CreateFieldChange(FormField::Title, "N".into())]
        );
    }

    #[test]
    fn tab_cycles_fields() {
        let f = form();
        let mut panel = CreateFormPanel::new();
        let actions = panel.handle_event(
            &EventKind::Key(key("tab")),
            CreateFormProps {
                form: &f,
                draft: None,
                tick: 0,
            },
        );
        assert_eq!(actions, vec![Action::CreateFocusNext]);
    }

    #[test]
    fn renders_fields_draft_state_and_error() {
        let mut f = form();
        f.title = "Night Market".into();
        f.error = Some(CreateError {
            field: None,
            message: "Click on the map to choose the event location".into(),
        });
        let mut panel = CreateFormPanel::new();
        panel.set_open(true);
        let mut harness = RenderHarness::new(70, 20);
        let output = harness.render_to_string_plain(|frame| {
            panel.render(
                frame,
                frame.area(),
                CreateFormProps {
                    form: &f,
                    draft: None,
                    tick: 0,
                },
            );
        });
        assert!(output.contains("Create Event"));
        assert!(output.contains("Night Market"));
        assert!(output.contains("click the map to drop a pin"));
        assert!(output.contains("choose the event location"));

        // With a pin the location line shows the coordinate.
        let output = harness.render_to_string_plain(|frame| {
            panel.render(
                frame,
                frame.area(),
                CreateFormProps {
                    form: &f,
                    draft: Some(Coordinate::new(12.9, 77.6)),
                    tick: 0,
                },
            );
        });
        assert!(output.contains("12.9000, 77.6000"));
    }
}
