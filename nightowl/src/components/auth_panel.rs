//! Login / signup card shown before a session exists.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use nightowl_core::{Action, AuthField, AuthForm, Role};

use super::modal::centered_rect;
use super::text_input::{TextInput, TextInputProps};
use super::Component;
use crate::event::EventKind;

const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct AuthPanelProps<'a> {
    pub form: &'a AuthForm,
    pub tick: u32,
}

pub struct AuthPanel {
    input: TextInput,
}

impl Default for AuthPanel {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl AuthPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

fn field_change(field: AuthField) -> impl Fn(String) -> Action {
    move |value| Action::AuthFieldChange(field, value)
}

fn submit(_: String) -> Action {
    Action::AuthSubmit
}

fn field_label(field: AuthField) -> &'static str {
    match field {
        AuthField::Name => "Full name",
        AuthField::Email => "Email",
        AuthField::Password => "Password",
        AuthField::Address => "Business address",
    }
}

impl Component for AuthPanel {
    type Props<'a> = AuthPanelProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Tab => return vec![Action::AuthFocusNext],
            KeyCode::BackTab => return vec![Action::AuthFocusPrev],
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::AuthToggleSignup];
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::AuthToggleRole];
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
                masked: props.form.focus == AuthField::Password,
                on_change: &on_change,
                on_submit: &submit,
            },
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let card = centered_rect(46, 16, area);
        let spinner = if props.form.submitting {
            format!(" {} ", SPINNERS[(props.tick as usize / 2) % SPINNERS.len()])
        } else {
            String::new()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" ☾ NightOwl{spinner}"))
            .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        let inner = block.inner(card);
        frame.render_widget(block, card);
        if inner.height < 8 {
            return;
        }

        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                "Real-time midnight vendor finder",
                Style::default().fg(Color::DarkGray),
            )),
            Line::raw(""),
        ];

        let (login_style, signup_style) = if props.form.is_signup {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::DarkGray),
            )
        };
        lines.push(Line::from(vec![
            Span::styled("Login", login_style),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Sign Up", signup_style),
            Span::styled("  (ctrl+n)", Style::default().fg(Color::DarkGray)),
        ]));
        if props.form.is_signup {
            let role = match props.form.role {
                Role::Customer => "Customer",
                Role::Host => "Vendor / Host",
            };
            lines.push(Line::from(Span::styled(
                format!("Role: {role}  (ctrl+r)"),
                Style::default().fg(Color::Magenta),
            )));
        }
        lines.push(Line::raw(""));

        frame.render_widget(
            Paragraph::new(lines.clone()),
            Rect {
                height: lines.len() as u16,
                ..inner
            },
        );

        let mut y = inner.y + lines.len() as u16;
        for &field in props.form.fields() {
            if y >= inner.bottom() {
                break;
            }
            let row = Rect {
                y,
                height: 1,
                ..inner
            };
            let on_change = field_change(field);
            self.input.render(
                frame,
                row,
                TextInputProps {
                    value: props.form.value(field),
                    label: field_label(field),
                    placeholder: "",
                    is_focused: props.form.focus == field,
                    masked: field == AuthField::Password,
                    on_change: &on_change,
                    on_submit: &submit,
                },
            );
            y += 1;
        }

        if let Some(error) = &props.form.error {
            if y + 1 < inner.bottom() {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        error.clone(),
                        Style::default().fg(Color::Red),
                    )),
                    Rect {
                        y: y + 1,
                        height: 1,
                        ..inner
                    },
                );
            }
        }

        frame.render_widget(
            Paragraph::new(Span::styled(
                "tab next · enter sign in",
                Style::default().fg(Color::DarkGray),
            )),
            Rect {
                y: inner.bottom().saturating_sub(1),
                height: 1,
                ..inner
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, RenderHarness};

    #[test]
    fn typing_edits_the_focused_field() {
        let form = AuthForm::default();
        let mut panel = AuthPanel::new();
        let actions = panel.handle_event(
            &EventKind::Key(key("o")),
            AuthPanelProps {
                form: &form,
                tick: 0,
            },
        );
        assert_eq!(
            actions,
            vec![Action::AuthFieldChange(AuthField::Email, "o".into())]
        );
    }

    #[test]
    fn enter_submits() {
        let form = AuthForm::default();
        let mut panel = AuthPanel::new();
        let actions = panel.handle_event(
            &EventKind::Key(key("enter")),
            AuthPanelProps {
                form: &form,
                tick: 0,
            },
        );
        assert_eq!(actions, vec![Action::AuthSubmit]);
    }

    #[test]
    fn ctrl_n_toggles_signup_and_ctrl_r_toggles_role() {
        let form = AuthForm::default();
        let mut panel = AuthPanel::new();
        let actions = panel.handle_event(
            &EventKind::Key(key("ctrl+n")),
            AuthPanelProps {
                form: &form,
                tick: 0,
            },
        );
        assert_eq!(actions, vec![Action::AuthToggleSignup]);

        let actions = panel.handle_event(
            &EventKind::Key(key("ctrl+r")),
            AuthPanelProps {
                form: &form,
                tick: 0,
            },
        );
        assert_eq!(actions, vec![Action::AuthToggleRole]);
    }

    #[test]
    fn renders_card_with_error_and_masked_password() {
        let mut form = AuthForm {
            email: "owl@example.com".into(),
            password: "secret".into(),
            error: Some("A valid email address is required".into()),
            ..AuthForm::default()
        };
        form.is_signup = true;
        let mut panel = AuthPanel::new();
        let mut harness = RenderHarness::new(60, 20);
        let output = harness.render_to_string_plain(|frame| {
            panel.render(
                frame,
                frame.area(),
                AuthPanelProps {
                    form: &form,
                    tick: 0,
                },
            );
        });
        assert!(output.contains("NightOwl"));
        assert!(output.contains("owl@example.com"));
        assert!(!output.contains("secret"), "password must be masked");
        assert!(output.contains("valid email address"));
        assert!(output.contains("Role:"));
    }
}
