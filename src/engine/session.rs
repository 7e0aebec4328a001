//! Serialization point between the clock and the renderer.
//!
//! `GameSession` keeps the engine behind a mutex so clock ticks (from any
//! thread) and renderer intents never interleave mid-operation. After every
//! operation it reconciles the clock subscription with the engine phase:
//!
//! - `AwaitingInput`: exactly one live ticker, scheduled for the current
//!   timer epoch
//! - anything else: no ticker
//!
//! Ticks carry the epoch they were scheduled for, so a tick racing with a
//! pause, restart or new round is discarded by the engine even before the
//! session gets to cancel it.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::clock::{CancelHandle, Clock};
use crate::core::{
    Difficulty, EngineSettings, GameRng, Intent, Selection, TargetSource, TimerEpoch, ViewState,
};

use super::engine::GameEngine;
use super::error::EngineError;

struct Ticker {
    epoch: TimerEpoch,
    handle: CancelHandle,
}

/// A game engine wired to a clock.
pub struct GameSession<C, R = GameRng> {
    engine: Arc<Mutex<GameEngine<R>>>,
    clock: C,
    ticker: Option<Ticker>,
}

impl<C: Clock> GameSession<C, GameRng> {
    /// Create a session with a `GameRng`-backed engine.
    pub fn new(settings: EngineSettings, clock: C) -> Self {
        Self::from_engine(GameEngine::new(settings), clock)
    }
}

impl<C, R> GameSession<C, R>
where
    C: Clock,
    R: TargetSource + Send + 'static,
{
    /// Wrap an existing engine.
    pub fn from_engine(engine: GameEngine<R>, clock: C) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            clock,
            ticker: None,
        }
    }

    /// Read the engine under the session lock.
    ///
    /// Only shared access is handed out: every state change has to go
    /// through the session so the ticker stays in step with the phase.
    pub fn inspect<T>(&self, f: impl FnOnce(&GameEngine<R>) -> T) -> Result<T, EngineError> {
        Ok(f(&*self.lock()?))
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whether a tick subscription is currently live.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.handle.is_cancelled())
    }

    /// Current view-state.
    pub fn view(&self) -> Result<ViewState, EngineError> {
        Ok(self.lock()?.view())
    }

    /// Register a view-state observer on the engine.
    pub fn subscribe(
        &self,
        observer: impl FnMut(&ViewState) + Send + 'static,
    ) -> Result<(), EngineError> {
        self.lock()?.subscribe(observer);
        Ok(())
    }

    // === Intents ===

    pub fn configure_difficulty(
        &mut self,
        difficulty: Difficulty,
    ) -> Result<ViewState, EngineError> {
        self.dispatch(Intent::ConfigureDifficulty(difficulty))
    }

    /// Replace the whole pending selection.
    pub fn configure(&mut self, selection: Selection) -> Result<ViewState, EngineError> {
        let view = self.lock()?.configure(selection);
        self.sync_ticker()?;
        Ok(view)
    }

    pub fn configure_range(&mut self, range: u32) -> Result<ViewState, EngineError> {
        self.dispatch(Intent::ConfigureRange(range))
    }

    pub fn update_guess(&mut self, raw: impl Into<String>) -> Result<ViewState, EngineError> {
        self.dispatch(Intent::UpdateGuess(raw.into()))
    }

    pub fn start_round(&mut self) -> Result<ViewState, EngineError> {
        self.dispatch(Intent::StartRound)
    }

    /// Apply `selection` and start a round from it.
    pub fn start_round_with(&mut self, selection: Selection) -> Result<ViewState, EngineError> {
        let result = self.lock()?.start_round_with(selection);
        self.sync_ticker()?;
        Ok(result?)
    }

    pub fn pause(&mut self) -> Result<ViewState, EngineError> {
        self.dispatch(Intent::Pause)
    }

    pub fn resume(&mut self) -> Result<ViewState, EngineError> {
        self.dispatch(Intent::Resume)
    }

    pub fn submit_guess(&mut self, raw: impl Into<String>) -> Result<ViewState, EngineError> {
        self.dispatch(Intent::SubmitGuess(raw.into()))
    }

    pub fn submit_pending(&mut self) -> Result<ViewState, EngineError> {
        self.dispatch(Intent::SubmitPending)
    }

    pub fn restart(&mut self) -> Result<ViewState, EngineError> {
        self.dispatch(Intent::Restart)
    }

    /// Apply an intent and reconcile the ticker.
    ///
    /// A rejected start still reconciles, then returns the validation error.
    pub fn dispatch(&mut self, intent: Intent) -> Result<ViewState, EngineError> {
        debug!(intent = intent.name(), "dispatch");
        let result = self.lock()?.apply(intent);
        self.sync_ticker()?;
        Ok(result?)
    }

    // === Ticker ===

    fn sync_ticker(&mut self) -> Result<(), EngineError> {
        let (phase, epoch) = {
            let engine = self.lock()?;
            (engine.phase(), engine.timer_epoch())
        };

        if !phase.is_ticking() {
            if let Some(ticker) = self.ticker.take() {
                ticker.handle.cancel();
                debug!(?phase, epoch = ticker.epoch.0, "ticker cancelled");
            }
            return Ok(());
        }

        let current = self
            .ticker
            .as_ref()
            .is_some_and(|t| t.epoch == epoch && !t.handle.is_cancelled());
        if current {
            return Ok(());
        }

        if let Some(stale) = self.ticker.take() {
            stale.handle.cancel();
        }

        let engine = Arc::downgrade(&self.engine);
        let handle = self.clock.on_every_second(Box::new(move || {
            let Some(engine) = engine.upgrade() else {
                return ControlFlow::Break(());
            };
            let Ok(mut engine) = engine.lock() else {
                warn!("engine lock poisoned, stopping ticker");
                return ControlFlow::Break(());
            };
            if engine.timer_epoch() != epoch {
                return ControlFlow::Break(());
            }
            let view = engine.tick_for(epoch);
            if view.phase.is_ticking() {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        }));

        debug!(epoch = epoch.0, "ticker started");
        self.ticker = Some(Ticker { epoch, handle });
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, GameEngine<R>>, EngineError> {
        self.engine.lock().map_err(|_| EngineError::Poisoned)
    }
}

impl<C, R> Drop for GameSession<C, R> {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.handle.cancel();
        }
    }
}
