//! The night map: listings, user fix, and draft pin on a character grid.
//!
//! Geometry is a flat equirectangular viewport around the resolved
//! center: one row covers `span / height` degrees of latitude, one
//! column half of that in longitude (terminal cells are roughly twice as
//! tall as wide). Mouse clicks invert the projection; clicks on or next
//! to a marker select it, clicks on open ground place the draft pin
//! while the create form is open.

use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use nightowl_core::{Action, Coordinate, Listing, ListingId, ListingKind, Resolved};

use super::Component;
use crate::event::EventKind;

pub const MARKER_OPEN: &str = "●";
pub const MARKER_CLOSED: &str = "○";
pub const MARKER_EVENT: &str = "◆";
pub const MARKER_USER: &str = "✦";
pub const MARKER_DRAFT: &str = "✚";

pub struct MapViewProps<'a> {
    pub center: Resolved,
    /// Vertical span in degrees of latitude.
    pub span: f64,
    pub listings: &'a [Listing],
    pub user_fix: Option<Coordinate>,
    pub draft: Option<Coordinate>,
    pub selected: Option<ListingId>,
    pub gps_status: Option<&'a str>,
    /// Whether a click on open ground drops the draft pin.
    pub draft_mode: bool,
}

/// Renders the map and translates mouse input back into coordinates.
#[derive(Default)]
pub struct MapView {
    /// Inner plot area of the last render, for mouse hit-testing.
    viewport: Rect,
    last_span: f64,
    last_center: Option<Coordinate>,
}

struct Projection {
    viewport: Rect,
    center: Coordinate,
    lat_per_row: f64,
    lng_per_col: f64,
}

impl Projection {
    fn new(viewport: Rect, center: Coordinate, span: f64) -> Self {
        let rows = viewport.height.max(1) as f64;
        let lat_per_row = span / rows;
        // Cells are ~2x taller than wide; halving the per-column step
        // keeps shapes roughly square on screen.
        let lng_per_col = lat_per_row / 2.0;
        Self {
            viewport,
            center,
            lat_per_row,
            lng_per_col,
        }
    }

    fn center_cell(&self) -> (u16, u16) {
        (
            self.viewport.x + self.viewport.width / 2,
            self.viewport.y + self.viewport.height / 2,
        )
    }

    /// Project a coordinate onto a cell; `None` when off-viewport.
    fn to_cell(&self, coordinate: Coordinate) -> Option<(u16, u16)> {
        let (cx, cy) = self.center_cell();
        let dx = ((coordinate.lng - self.center.lng) / self.lng_per_col).round();
        let dy = ((self.center.lat - coordinate.lat) / self.lat_per_row).round();
        let x = cx as i64 + dx as i64;
        let y = cy as i64 + dy as i64;
        let inside = x >= self.viewport.left() as i64
            && x < self.viewport.right() as i64
            && y >= self.viewport.top() as i64
            && y < self.viewport.bottom() as i64;
        inside.then_some((x as u16, y as u16))
    }

    /// Geographic coordinate at a cell.
    fn to_coordinate(&self, x: u16, y: u16) -> Coordinate {
        let (cx, cy) = self.center_cell();
        let dx = x as f64 - cx as f64;
        let dy = y as f64 - cy as f64;
        Coordinate::new(
            self.center.lat - dy * self.lat_per_row,
            self.center.lng + dx * self.lng_per_col,
        )
    }
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    fn projection(&self) -> Option<Projection> {
        let center = self.last_center?;
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return None;
        }
        Some(Projection::new(self.viewport, center, self.last_span))
    }

    /// Nearest marker within one cell of the click, if any.
    fn hit_test(&self, listings: &[Listing], x: u16, y: u16) -> Option<ListingId> {
        let projection = self.projection()?;
        let mut best: Option<(u32, ListingId)> = None;
        for listing in listings {
            if let Some((mx, my)) = projection.to_cell(listing.coordinate) {
                let distance = u32::from(mx.abs_diff(x)).max(u32::from(my.abs_diff(y)));
                if distance <= 1 && best.map(|(d, _)| distance < d).unwrap_or(true) {
                    best = Some((distance, listing.id));
                }
            }
        }
        best.map(|(_, id)| id)
    }
}

impl Component for MapView {
    type Props<'a> = MapViewProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        match event {
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = (mouse.column, mouse.row);
                if !point_in(self.viewport, x, y) {
                    return Vec::new();
                }
                if let Some(id) = self.hit_test(props.listings, x, y) {
                    return vec![Action::ListingSelect(id)];
                }
                if props.draft_mode {
                    if let Some(projection) = self.projection() {
                        return vec![Action::MapClick(projection.to_coordinate(x, y))];
                    }
                }
                Vec::new()
            }
            EventKind::Scroll { column, row, delta } if point_in(self.viewport, *column, *row) => {
                if *delta < 0 {
                    vec![Action::MapZoomIn]
                } else {
                    vec![Action::MapZoomOut]
                }
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let title = format!(
            " Night Map · {} · {:.3}° ",
            props.center.source.label(),
            props.span
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(title)
            .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width < 4 || inner.height < 4 {
            return;
        }

        // Reserve the bottom line of the plot for the legend/status.
        let plot = Rect {
            height: inner.height - 1,
            ..inner
        };
        self.viewport = plot;
        self.last_span = props.span;
        self.last_center = Some(props.center.coordinate);

        let projection = Projection::new(plot, props.center.coordinate, props.span);
        let buf = frame.buffer_mut();

        // Faint grid texture so panning/zooming reads as movement.
        for y in plot.top()..plot.bottom() {
            for x in plot.left()..plot.right() {
                if (x.wrapping_sub(plot.left())) % 6 == 0 && (y.wrapping_sub(plot.top())) % 3 == 0 {
                    buf[(x, y)].set_symbol("·").set_fg(Color::Rgb(50, 50, 70));
                }
            }
        }

        for listing in props.listings {
            let Some((x, y)) = projection.to_cell(listing.coordinate) else {
                continue;
            };
            let selected = props.selected == Some(listing.id);
            let (symbol, color) = match (listing.kind, listing.is_open) {
                (ListingKind::Event, _) => (MARKER_EVENT, Color::Magenta),
                (ListingKind::Vendor, true) => (MARKER_OPEN, Color::Yellow),
                (ListingKind::Vendor, false) => (MARKER_CLOSED, Color::DarkGray),
            };
            let cell = &mut buf[(x, y)];
            cell.set_symbol(symbol).set_fg(color);
            if selected {
                cell.set_style(
                    Style::default()
                        .fg(color)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                );
            }
        }

        if let Some(fix) = props.user_fix {
            if let Some((x, y)) = projection.to_cell(fix) {
                buf[(x, y)]
                    .set_symbol(MARKER_USER)
                    .set_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
            }
        }

        if let Some(draft) = props.draft {
            if let Some((x, y)) = projection.to_cell(draft) {
                buf[(x, y)]
                    .set_symbol(MARKER_DRAFT)
                    .set_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
            }
        }

        // Legend / status line.
        let status_area = Rect {
            y: inner.bottom() - 1,
            height: 1,
            ..inner
        };
        let line = if let Some(status) = props.gps_status {
            Line::from(Span::styled(
                format!(" position: {status} "),
                Style::default().fg(Color::Red),
            ))
        } else if props.draft_mode {
            Line::from(Span::styled(
                " click the map to drop the event pin ",
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from(vec![
                Span::styled(format!(" {MARKER_OPEN} open"), Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("  {MARKER_CLOSED} closed"),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  {MARKER_EVENT} event"),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(format!("  {MARKER_USER} you"), Style::default().fg(Color::Cyan)),
            ])
        };
        frame.render_widget(Paragraph::new(line), status_area);
    }
}

fn point_in(area: Rect, x: u16, y: u16) -> bool {
    x >= area.left() && x < area.right() && y >= area.top() && y < area.bottom()
}
