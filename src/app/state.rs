// ABOUTME: Application state and the async effect runtime feeding completions back to the panel
// Effects run on blocking worker threads; their completions are applied on the UI loop only

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::panel::{Effect, PanelEvent, PanelOptions, StatusPanel};
use crate::source::{self, StatusSource};

pub type SharedSource = Arc<Mutex<Box<dyn StatusSource + Send>>>;

#[derive(Debug)]
pub struct AppState {
    pub panel: StatusPanel,
    pub help_visible: bool,
    pub should_quit: bool,
    // Effects requested by the panel, waiting to be dispatched on the next tick
    pub pending_effects: Vec<Effect>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PanelOptions::default())
    }
}

impl AppState {
    pub fn new(options: PanelOptions) -> Self {
        Self {
            panel: StatusPanel::new(options),
            help_visible: false,
            should_quit: false,
            pending_effects: Vec::new(),
        }
    }

    /// Feeds one event to the panel and queues any follow-up effect.
    pub fn dispatch(&mut self, event: PanelEvent) {
        if let Some(effect) = self.panel.update(event) {
            debug!("Queued effect {:?}", effect);
            self.pending_effects.push(effect);
        }
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

pub struct App {
    pub state: AppState,
    source: SharedSource,
    completions_tx: mpsc::UnboundedSender<PanelEvent>,
    completions_rx: mpsc::UnboundedReceiver<PanelEvent>,
    in_flight: usize,
    refresh_interval: Option<Duration>,
    last_refresh: Instant,
    ui_dirty: bool,
}

impl App {
    pub fn new(source: Box<dyn StatusSource + Send>, config: &AppConfig) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let refresh_interval = (config.refresh_interval_secs > 0)
            .then(|| Duration::from_secs(config.refresh_interval_secs));

        Self {
            state: AppState::new(config.panel_options()),
            source: Arc::new(Mutex::new(source)),
            completions_tx,
            completions_rx,
            in_flight: 0,
            refresh_interval,
            last_refresh: Instant::now(),
            ui_dirty: false,
        }
    }

    pub fn init(&mut self) {
        self.state.pending_effects.push(Effect::RefreshInfo);
        self.state
            .pending_effects
            .push(Effect::RefreshStatus { user: false });
        self.dispatch_pending();
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Dispatches queued effects and applies every completion that has arrived.
    pub fn tick(&mut self) {
        self.dispatch_pending();

        while let Ok(event) = self.completions_rx.try_recv() {
            self.apply_completion(event);
        }

        if let Some(interval) = self.refresh_interval {
            if self.last_refresh.elapsed() >= interval {
                self.state
                    .pending_effects
                    .push(Effect::RefreshStatus { user: false });
            }
        }
        self.dispatch_pending();
    }

    /// Waits until no effect is queued or running.
    pub async fn settle(&mut self) {
        loop {
            self.dispatch_pending();
            if self.in_flight == 0 {
                break;
            }
            match self.completions_rx.recv().await {
                Some(event) => self.apply_completion(event),
                None => break,
            }
        }
    }

    pub fn needs_ui_refresh(&mut self) -> bool {
        std::mem::take(&mut self.ui_dirty)
    }

    fn apply_completion(&mut self, event: PanelEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.state.dispatch(event);
        self.ui_dirty = true;
    }

    fn dispatch_pending(&mut self) {
        for effect in std::mem::take(&mut self.state.pending_effects) {
            if matches!(effect, Effect::RefreshStatus { .. }) {
                self.last_refresh = Instant::now();
            }
            self.spawn_effect(effect);
        }
    }

    fn spawn_effect(&mut self, effect: Effect) {
        let source = Arc::clone(&self.source);
        let tx = self.completions_tx.clone();
        self.in_flight += 1;

        tokio::task::spawn_blocking(move || {
            let mut guard = source.lock().unwrap_or_else(PoisonError::into_inner);
            let event = source::execute(guard.as_mut(), effect);
            if tx.send(event).is_err() {
                warn!("Completion dropped: UI loop has shut down");
            }
        });
    }
}
