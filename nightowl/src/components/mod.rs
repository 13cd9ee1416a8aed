//! UI components: pure render from props, events mapped to actions.
//!
//! Components follow three rules:
//! 1. Props carry all read-only data needed for rendering.
//! 2. `handle_event` returns actions, never mutates shared state.
//! 3. Internal UI state (cursor, scroll) may live in `&mut self`; data
//!    mutations go through actions.

use ratatui::{layout::Rect, Frame};

use nightowl_core::Action;

use crate::event::EventKind;

pub mod auth_panel;
pub mod create_form;
pub mod help_bar;
pub mod host_panel;
pub mod listing_detail;
pub mod listing_list;
pub mod map_view;
pub mod modal;
pub mod shell;
pub mod text_input;

pub use auth_panel::{AuthPanel, AuthPanelProps};
pub use create_form::{CreateFormPanel, CreateFormProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use host_panel::{HostPanel, HostPanelProps};
pub use listing_detail::{ListingDetail, ListingDetailProps};
pub use listing_list::{ListingList, ListingListProps};
pub use map_view::{MapView, MapViewProps};
pub use modal::{centered_rect, render_modal};
pub use shell::AppUi;
pub use text_input::{TextInput, TextInputProps};

/// A UI element that renders from props and emits actions.
pub trait Component {
    /// Read-only data required to render.
    type Props<'a>;

    /// Handle an event and return actions to dispatch. Default: none
    /// (render-only components).
    #[allow(unused_variables)]
    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        Vec::new()
    }

    /// Render the component to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
