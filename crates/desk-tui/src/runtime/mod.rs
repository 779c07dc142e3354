//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer stays pure and produces
//! effects; this module executes them.
//!
//! Async results come back through an inbox channel that the loop drains
//! every frame. Token broadcasts from the auth context are polled from its
//! `watch` receiver on the same cadence.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use desk_core::auth::{AuthChange, AuthContext};
use desk_core::register::HttpRegistrationClient;
use desk_core::token::Token;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::{mpsc, watch};

use crate::common::{TaskCompleted, TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick interval while a task is running (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Tick interval when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime. The terminal is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: HttpRegistrationClient,
    token_rx: watch::Receiver<Option<Token>>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Enters the alternate screen and mounts the application over `auth`.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(auth: AuthContext, client: HttpRegistrationClient) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let token_rx = auth.subscribe();
        let state = AppState::new(auth);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            client,
            token_rx,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the reducer requests a quit.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal events fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_paste()?;
        tracing::info!(screen = self.state.screen.name(), "tui started");

        let mut dirty = true;
        while !self.state.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }
            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        tracing::info!("tui stopped");
        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        if self.token_rx.has_changed().unwrap_or(false) {
            let token = self.token_rx.borrow_and_update().clone();
            events.push(UiEvent::TokenChanged(token));
        }

        // Don't block when there is already work to do.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };
        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }

    /// Spawns `f` with a `TaskStarted`/`TaskCompleted` lifecycle.
    fn spawn_task<F, Fut>(&mut self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        // Record the task before any completion can arrive.
        self.dispatch_event(UiEvent::TaskStarted { kind, id });
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let result = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(result),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::SubmitRegistration { task, request } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Registration, task, move || {
                    handlers::registration(client, request)
                });
            }
            UiEffect::Logout => match self.state.auth.set(None) {
                Ok(AuthChange::Reset(_reset)) => self.dispatch_event(UiEvent::Reset),
                Ok(AuthChange::Updated) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "log out failed");
                    self.dispatch_event(UiEvent::LogoutFailed {
                        error: err.to_string(),
                    });
                }
            },
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
