//! The event/action/effect loop.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use nightowl_core::{Action, AppState, Effect, EffectStore};

use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
use crate::subscriptions::Subscriptions;
use crate::tasks::TaskManager;

/// Configuration for the event poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Result of mapping an event into actions plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventOutcome {
    pub actions: Vec<Action>,
    pub needs_render: bool,
}

impl EventOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn needs_render() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: true,
        }
    }

    pub fn action(action: Action) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Collect whatever a component's `handle_event` returned.
    pub fn from_actions(iter: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

/// Handle handed to the effect handler: emit actions directly, spawn
/// keyed tasks, manage subscriptions.
pub struct EffectContext<'a> {
    action_tx: &'a mpsc::UnboundedSender<Action>,
    tasks: &'a mut TaskManager,
    subscriptions: &'a mut Subscriptions,
}

impl<'a> EffectContext<'a> {
    pub fn emit(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    pub fn tasks(&mut self) -> &mut TaskManager {
        self.tasks
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions {
        self.subscriptions
    }
}

/// Runtime owning the store, the action channel, and the async managers.
pub struct Runtime {
    store: EffectStore,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    poller_config: PollerConfig,
    tasks: TaskManager,
    subscriptions: Subscriptions,
    should_render: bool,
}

impl Runtime {
    pub fn new(store: EffectStore) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        let subscriptions = Subscriptions::new(action_tx.clone());
        Self {
            store,
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            tasks,
            subscriptions,
            should_render: true,
        }
    }

    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Queue an action from outside the loop (e.g. startup fetches).
    pub fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    pub fn action_tx(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions {
        &mut self.subscriptions
    }

    pub fn tasks(&mut self) -> &mut TaskManager {
        &mut self.tasks
    }

    fn effect_context(&mut self) -> EffectContext<'_> {
        EffectContext {
            action_tx: &self.action_tx,
            tasks: &mut self.tasks,
            subscriptions: &mut self.subscriptions,
        }
    }

    /// Run until the quit predicate matches an action.
    ///
    /// `render` draws the whole frame from state; `map_event` turns a
    /// terminal event into actions; `handle_effect` executes declared
    /// effects against the task/subscription managers.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &AppState),
        FEvent: FnMut(&EventKind, &AppState) -> EventOutcome,
        FQuit: FnMut(&Action) -> bool,
        FEffect: FnMut(Effect, &mut EffectContext),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(
            event_tx,
            self.poller_config.poll_timeout,
            self.poller_config.loop_sleep,
            cancel_token.clone(),
        );

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| render(frame, frame.area(), state))?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);
                    let outcome = map_event(&event, self.store.state());
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }

                    let result = self.store.dispatch(action);
                    if result.has_effects() {
                        let mut ctx = self.effect_context();
                        for effect in result.effects {
                            handle_effect(effect, &mut ctx);
                        }
                    }
                    if result.changed {
                        self.should_render = true;
                    }
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightowl_core::Coordinate;

    fn store() -> EffectStore {
        EffectStore::for_app(AppState::new(Coordinate::new(28.6139, 77.2090)))
    }

    #[tokio::test]
    async fn enqueued_actions_reach_the_store() {
        let mut runtime = Runtime::new(store());
        runtime.enqueue(Action::MapZoomIn);

        // Drain the channel the way the loop does, without a terminal.
        let action = runtime.action_rx.recv().await.unwrap();
        let result = runtime.store.dispatch(action);
        assert!(result.changed);
        assert!(runtime.state().map_span < AppState::DEFAULT_SPAN);
    }

    #[tokio::test]
    async fn effect_context_reaches_tasks_and_subscriptions() {
        let mut runtime = Runtime::new(store());
        {
            let mut ctx = runtime.effect_context();
            ctx.tasks().spawn("listings", async { Action::ListingsDidLoad(vec![]) });
            ctx.emit(Action::Tick);
        }
        assert_eq!(runtime.tasks().len(), 1);

        let action = runtime.action_rx.recv().await.unwrap();
        assert!(matches!(
            action,
            Action::Tick | Action::ListingsDidLoad(_)
        ));
    }
}
