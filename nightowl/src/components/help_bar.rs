//! One-line key hints along the bottom edge.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use nightowl_core::{Mode, View};

use super::Component;

pub struct HelpBarProps {
    pub view: View,
    pub mode: Mode,
    pub is_host: bool,
    pub create_open: bool,
    pub search_active: bool,
}

#[derive(Default)]
pub struct HelpBar;

impl Component for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let hints: &[(&str, &str)] = if props.view == View::Auth {
            &[("tab", "next"), ("enter", "sign in"), ("ctrl+n", "login/signup")]
        } else if props.create_open {
            &[("tab", "field"), ("ctrl+s", "create"), ("esc", "cancel")]
        } else if props.search_active {
            &[("esc", "close search")]
        } else if props.mode == Mode::Host {
            &[
                ("t", "toggle"),
                ("n", "new event"),
                ("1", "customer"),
                ("r", "refresh"),
                ("x", "logout"),
                ("q", "quit"),
            ]
        } else if props.is_host {
            &[
                ("/", "search"),
                ("f", "filter"),
                ("2", "host"),
                ("r", "refresh"),
                ("x", "logout"),
                ("q", "quit"),
            ]
        } else {
            &[
                ("/", "search"),
                ("f", "filter"),
                ("r", "refresh"),
                ("x", "logout"),
                ("q", "quit"),
            ]
        };

        let mut spans = Vec::with_capacity(hints.len() * 3);
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ·  ", Style::default().fg(Color::Rgb(60, 60, 70))));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::styled(
                format!(" {label}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RenderHarness;

    fn render(props: HelpBarProps) -> String {
        let mut harness = RenderHarness::new(80, 1);
        let mut bar = HelpBar;
        harness.render_to_string_plain(|frame| bar.render(frame, frame.area(), props))
    }

    #[test]
    fn hints_follow_the_mode() {
        let output = render(HelpBarProps {
            view: View::Main,
            mode: Mode::Customer,
            is_host: false,
            create_open: false,
            search_active: false,
        });
        assert!(output.contains("search"));
        assert!(output.contains("quit"));
        assert!(!output.contains("host"));

        let output = render(HelpBarProps {
            view: View::Main,
            mode: Mode::Host,
            is_host: true,
            create_open: false,
            search_active: false,
        });
        assert!(output.contains("toggle"));
        assert!(output.contains("new event"));

        let output = render(HelpBarProps {
            view: View::Main,
            mode: Mode::Host,
            is_host: true,
            create_open: true,
            search_active: false,
        });
        assert!(output.contains("ctrl+s"));
    }
}
