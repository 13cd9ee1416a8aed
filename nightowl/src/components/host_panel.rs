//! Host console: the host's own listings, toggling, and the entry point
//! into event creation.

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use nightowl_core::{Action, Listing, ListingKind};

use super::Component;
use crate::event::EventKind;

pub struct HostPanelProps<'a> {
    /// Listings owned by the signed-in host.
    pub listings: Vec<&'a Listing>,
    /// Toggle/create failure shown inline.
    pub notice: Option<&'a str>,
}

#[derive(Default)]
pub struct HostPanel {
    cursor: usize,
}

impl HostPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

impl Component for HostPanel {
    type Props<'a> = HostPanelProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        self.clamp_cursor(props.listings.len());
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(props.listings.len().saturating_sub(1));
                Vec::new()
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Char('t') => props
                .listings
                .get(self.cursor)
                .map(|l| vec![Action::ToggleListing(l.id)])
                .unwrap_or_default(),
            KeyCode::Char('n') => vec![Action::CreateFormOpen],
            KeyCode::Enter => props
                .listings
                .get(self.cursor)
                .map(|l| vec![Action::ListingSelect(l.id)])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.listings.len());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" Host Console ")
            .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 3 {
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        if let Some(notice) = props.notice {
            lines.push(Line::from(Span::styled(
                notice.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
        if props.listings.is_empty() {
            lines.push(Line::from(Span::styled(
                "No listings yet. Press n to create your first event.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (index, listing) in props.listings.iter().enumerate() {
            let selected = index == self.cursor;
            let marker = if selected { "▶ " } else { "  " };
            let badge = match (listing.kind, listing.is_open) {
                (ListingKind::Event, _) => Span::styled("EVENT", Style::default().fg(Color::Magenta)),
                (_, true) => Span::styled("LIVE", Style::default().fg(Color::Green)),
                (_, false) => Span::styled("CLOSED", Style::default().fg(Color::DarkGray)),
            };
            let style = if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(listing.title.clone(), style),
                Span::raw("  "),
                badge,
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "t toggle open · n new event · enter details",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
