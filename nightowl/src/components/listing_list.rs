//! Customer panel: searchable, filterable list of tonight's listings.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use nightowl_core::{Action, Listing, ListingKind};

use super::text_input::{TextInput, TextInputProps};
use super::Component;
use crate::event::EventKind;

const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct ListingListProps<'a> {
    /// Already filtered by search text and category.
    pub listings: Vec<&'a Listing>,
    pub search: &'a str,
    pub search_active: bool,
    pub category_filter: Option<&'a str>,
    pub notice: Option<&'a str>,
    pub loading: bool,
    pub tick: u32,
}

pub struct ListingList {
    cursor: usize,
    search_input: TextInput,
}

impl Default for ListingList {
    fn default() -> Self {
        Self {
            cursor: 0,
            search_input: TextInput::new(),
        }
    }
}

impl ListingList {
    pub fn new() -> Self {
        Self::default()
    }

    fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

fn search_submit(_: String) -> Action {
    Action::SearchClose
}

impl Component for ListingList {
    type Props<'a> = ListingListProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        self.clamp_cursor(props.listings.len());

        if props.search_active {
            if let EventKind::Key(key) = event {
                if key.code == KeyCode::Esc {
                    return vec![Action::SearchClose];
                }
            }
            return self.search_input.handle_event(
                event,
                TextInputProps {
                    value: props.search,
                    label: "",
                    placeholder: "What are you craving?",
                    is_focused: true,
                    masked: false,
                    on_change: &Action::SearchChange,
                    on_submit: &search_submit,
                },
            );
        }

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
            KeyCode::Char('g') | KeyCode::Home => {
                self.cursor = 0;
                Vec::new()
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.cursor = props.listings.len().saturating_sub(1);
                Vec::new()
            }
            KeyCode::Enter => props
                .listings
                .get(self.cursor)
                .map(|l| vec![Action::ListingSelect(l.id)])
                .unwrap_or_default(),
            KeyCode::Char('/') => vec![Action::SearchOpen],
            KeyCode::Char('f') => vec![Action::CategoryCycle],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.listings.len());

        let spinner = if props.loading {
            format!(" {} ", SPINNERS[(props.tick as usize / 2) % SPINNERS.len()])
        } else {
            String::new()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" Night Hunt{spinner}"))
            .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 5 {
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(1), // search
            Constraint::Length(1), // filter + notice
            Constraint::Min(1),    // rows
        ])
        .split(inner);

        let search_style = if props.search_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let search_area = chunks[0];
        frame.render_widget(
            Paragraph::new(Span::styled("⌕ ", search_style)),
            search_area,
        );
        let input_area = Rect {
            x: search_area.x + 2,
            width: search_area.width.saturating_sub(2),
            ..search_area
        };
        self.search_input.render(
            frame,
            input_area,
            TextInputProps {
                value: props.search,
                label: "",
                placeholder: "What are you craving? (/)",
                is_focused: props.search_active,
                masked: false,
                on_change: &Action::SearchChange,
                on_submit: &search_submit,
            },
        );

        let filter_label = props.category_filter.unwrap_or("All");
        let mut info_spans = vec![Span::styled(
            format!("filter: {filter_label} (f)"),
            Style::default().fg(Color::DarkGray),
        )];
        if let Some(notice) = props.notice {
            info_spans.push(Span::raw("  "));
            info_spans.push(Span::styled(notice, Style::default().fg(Color::Red)));
        }
        frame.render_widget(Paragraph::new(Line::from(info_spans)), chunks[1]);

        let rows_area = chunks[2];
        if props.listings.is_empty() {
            frame.render_widget(
                Paragraph::new("No vendors found here.")
                    .style(Style::default().fg(Color::DarkGray)),
                rows_area,
            );
            return;
        }

        // Two lines per row; scroll so the cursor stays visible.
        let visible_rows = (rows_area.height / 2) as usize;
        let first = self.cursor.saturating_sub(visible_rows.saturating_sub(1));
        for (slot, (index, listing)) in props
            .listings
            .iter()
            .enumerate()
            .skip(first)
            .take(visible_rows)
            .enumerate()
        {
            let y = rows_area.y + (slot as u16) * 2;
            let selected = index == self.cursor;
            let marker = if selected { "▶ " } else { "  " };
            let title_style = if selected {
                Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow)
            } else {
                Style::default()
            };
            let badge = match (listing.kind, listing.is_open) {
                (ListingKind::Event, _) => Span::styled(" EVENT ", Style::default().fg(Color::Magenta)),
                (_, true) => Span::styled(" LIVE ", Style::default().fg(Color::Green)),
                (_, false) => Span::styled(" CLOSED ", Style::default().fg(Color::DarkGray)),
            };
            let line = Line::from(vec![
                Span::raw(marker),
                Span::styled(listing.title.clone(), title_style),
                Span::raw(" "),
                badge,
            ]);
            frame.render_widget(
                Paragraph::new(line),
                Rect {
                    y,
                    height: 1,
                    ..rows_area
                },
            );
            let detail = Line::from(Span::styled(
                format!(
                    "    {} · ☆ {} visits expected",
                    listing.category, listing.expected_visits
                ),
                Style::default().fg(Color::DarkGray),
            ));
            if y + 1 < rows_area.bottom() {
                frame.render_widget(
                    Paragraph::new(detail),
                    Rect {
                        y: y + 1,
                        height: 1,
                        ..rows_area
                    },
                );
            }
        }
    }
}
