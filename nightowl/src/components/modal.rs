//! Modal overlay helpers.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::{Clear, Widget},
    Frame,
};

/// Clear the modal area and fill it with a background color. Call after
/// rendering the background content.
pub fn render_modal(frame: &mut Frame, area: Rect, bg: Color) {
    frame.render_widget(Clear, area);
    frame.render_widget(BgFill(bg), area);
}

struct BgFill(Color);

impl Widget for BgFill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                buf[(x, y)].set_bg(self.0).set_symbol(" ");
            }
        }
    }
}

/// Calculate a centered rectangle within an area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RenderHarness;
    use ratatui::widgets::Paragraph;

    #[test]
    fn modal_covers_background() {
        let mut harness = RenderHarness::new(40, 10);
        let output = harness.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("XXXXXXXXXXXXXXXX"), frame.area());
            let area = centered_rect(20, 4, frame.area());
            render_modal(frame, area, Color::Rgb(30, 30, 40));
            frame.render_widget(Paragraph::new("Modal content"), area);
        });
        assert!(output.contains("Modal content"));
    }

    #[test]
    fn centered_rect_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(40, 10, area);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (20, 7, 40, 10));

        let small = Rect::new(0, 0, 30, 10);
        let rect = centered_rect(100, 50, small);
        assert!(rect.width <= 28);
        assert!(rect.height <= 8);
    }
}
