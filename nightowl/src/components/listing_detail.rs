//! Detail panel for the focused listing.
//!
//! The listing arrives freshly looked up from the current collection;
//! the shell falls back to the list when the lookup misses, so this
//! component always has a real listing to show.

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use nightowl_core::{Action, Listing, ListingKind};

use super::Component;
use crate::event::EventKind;

pub struct ListingDetailProps<'a> {
    pub listing: &'a Listing,
}

#[derive(Default)]
pub struct ListingDetail;

impl Component for ListingDetail {
    type Props<'a> = ListingDetailProps<'a>;

    fn handle_event(&mut self, event: &EventKind, _props: Self::Props<'_>) -> Vec<Action> {
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                vec![Action::ListingDeselect]
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let listing = props.listing;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ", listing.title))
            .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status = match (listing.kind, listing.is_open) {
            (ListingKind::Event, _) => Span::styled("EVENT", Style::default().fg(Color::Magenta)),
            (_, true) => Span::styled("LIVE NOW", Style::default().fg(Color::Green)),
            (_, false) => Span::styled("CLOSED", Style::default().fg(Color::DarkGray)),
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(listing.category.clone(), Style::default().fg(Color::DarkGray)),
                Span::raw("  "),
                status,
            ]),
            Line::raw(""),
            Line::from(Span::raw(if listing.address.is_empty() {
                format!("◦ {}", listing.coordinate)
            } else {
                format!("◦ {}", listing.address)
            })),
            Line::from(Span::styled(
                format!("☆ {} visits expected", listing.expected_visits),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        if let Some(date) = &listing.event_date {
            lines.push(Line::from(Span::raw(format!("⏱ {date}"))));
        }
        if let Some(link) = &listing.booking_link {
            lines.push(Line::from(Span::styled(
                format!("⇒ {link}"),
                Style::default().fg(Color::Cyan),
            )));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "esc back to list",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
