//! Top-level shell: composes the map, panels, and overlays, and routes
//! terminal events to whichever surface owns them.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use nightowl_core::{Action, AppState, Mode, View};

use super::auth_panel::{AuthPanel, AuthPanelProps};
use super::create_form::{CreateFormPanel, CreateFormProps};
use super::help_bar::{HelpBar, HelpBarProps};
use super::host_panel::{HostPanel, HostPanelProps};
use super::listing_detail::{ListingDetail, ListingDetailProps};
use super::listing_list::{ListingList, ListingListProps};
use super::map_view::{MapView, MapViewProps};
use super::Component;
use crate::event::EventKind;
use crate::runtime::EventOutcome;

pub struct AppUi {
    map: MapView,
    list: ListingList,
    detail: ListingDetail,
    host: HostPanel,
    create: CreateFormPanel,
    auth: AuthPanel,
    help: HelpBar,
}

impl Default for AppUi {
    fn default() -> Self {
        Self {
            map: MapView::new(),
            list: ListingList::new(),
            detail: ListingDetail,
            host: HostPanel::new(),
            create: CreateFormPanel::new(),
            auth: AuthPanel::new(),
            help: HelpBar,
        }
    }
}

impl AppUi {
    pub fn new() -> Self {
        Self::default()
    }

    fn map_props<'a>(&self, state: &'a AppState) -> MapViewProps<'a> {
        MapViewProps {
            center: state.map_center(),
            span: state.map_span,
            listings: &state.listings,
            user_fix: state.gps.last_fix,
            draft: state.draft_location,
            selected: state.selected,
            gps_status: state.gps.status.as_deref(),
            draft_mode: state.create.is_some(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if state.view == View::Auth {
            self.auth.render(
                frame,
                area,
                AuthPanelProps {
                    form: &state.auth,
                    tick: state.tick,
                },
            );
            return;
        }

        let rows = Layout::vertical([Constraint::Min(8), Constraint::Length(1)]).split(area);
        let columns =
            Layout::horizontal([Constraint::Percentage(58), Constraint::Percentage(42)])
                .split(rows[0]);

        let props = self.map_props(state);
        self.map.render(frame, columns[0], props);

        // The detail panel is derived from the selected id by fresh
        // lookup; a miss falls back to the list.
        if let Some(listing) = state.selected_listing() {
            self.detail
                .render(frame, columns[1], ListingDetailProps { listing });
        } else if state.mode == Mode::Host {
            self.host.render(
                frame,
                columns[1],
                HostPanelProps {
                    listings: state.host_listings(),
                    notice: state.host_notice.as_deref(),
                },
            );
        } else {
            self.list.render(
                frame,
                columns[1],
                ListingListProps {
                    listings: state.visible_listings(),
                    search: &state.search,
                    search_active: state.search_active,
                    category_filter: state.category_filter.as_deref(),
                    notice: state.listings_notice.as_deref(),
                    loading: state.listings_loading,
                    tick: state.tick,
                },
            );
        }

        self.create.set_open(state.create.is_some());
        if let Some(form) = &state.create {
            self.create.render(
                frame,
                rows[0],
                CreateFormProps {
                    form,
                    draft: state.draft_location,
                    tick: state.tick,
                },
            );
        }

        self.help.render(
            frame,
            rows[1],
            HelpBarProps {
                view: state.view,
                mode: state.mode,
                is_host: state.is_host(),
                create_open: state.create.is_some(),
                search_active: state.search_active,
            },
        );
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome {
        // Internal UI state (cursors) moves on key events, so every
        // handled event requests a redraw.
        if let EventKind::Resize(..) = event {
            return EventOutcome::needs_render();
        }

        if state.view == View::Auth {
            let actions = self.auth.handle_event(
                event,
                AuthPanelProps {
                    form: &state.auth,
                    tick: state.tick,
                },
            );
            return EventOutcome::from_actions(actions).with_render();
        }

        // Mouse input always belongs to the map: marker clicks select,
        // ground clicks drop the pin while composing, wheel zooms.
        if matches!(event, EventKind::Mouse(_) | EventKind::Scroll { .. }) {
            let props = self.map_props(state);
            let actions = self.map.handle_event(event, props);
            return EventOutcome::from_actions(actions).with_render();
        }

        if let Some(form) = &state.create {
            let actions = self.create.handle_event(
                event,
                CreateFormProps {
                    form,
                    draft: state.draft_location,
                    tick: state.tick,
                },
            );
            return EventOutcome::from_actions(actions).with_render();
        }

        if state.search_active {
            let actions = self.list.handle_event(
                event,
                ListingListProps {
                    listings: state.visible_listings(),
                    search: &state.search,
                    search_active: true,
                    category_filter: state.category_filter.as_deref(),
                    notice: state.listings_notice.as_deref(),
                    loading: state.listings_loading,
                    tick: state.tick,
                },
            );
            return EventOutcome::from_actions(actions).with_render();
        }

        // Global keys outside text entry.
        if let EventKind::Key(key) = event {
            let global = match key.code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('x') => Some(Action::Logout),
                KeyCode::Char('r') => Some(Action::ListingsFetch),
                KeyCode::Char('1') => Some(Action::ModeSet(Mode::Customer)),
                KeyCode::Char('2') => Some(Action::ModeSet(Mode::Host)),
                KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::MapZoomIn),
                KeyCode::Char('-') => Some(Action::MapZoomOut),
                _ => None,
            };
            if let Some(action) = global {
                return EventOutcome::action(action).with_render();
            }
        }

        let actions = if let Some(listing) = state.selected_listing() {
            self.detail
                .handle_event(event, ListingDetailProps { listing })
        } else if state.mode == Mode::Host {
            self.host.handle_event(
                event,
                HostPanelProps {
                    listings: state.host_listings(),
                    notice: state.host_notice.as_deref(),
                },
            )
        } else {
            self.list.handle_event(
                event,
                ListingListProps {
                    listings: state.visible_listings(),
                    search: &state.search,
                    search_active: false,
                    category_filter: state.category_filter.as_deref(),
                    notice: state.listings_notice.as_deref(),
                    loading: state.listings_loading,
                    tick: state.tick,
                },
            )
        };
        EventOutcome::from_actions(actions).with_render()
    }
}
