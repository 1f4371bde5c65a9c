use std::collections::VecDeque;

use chrono::{DateTime, Local};
use tiltscenes_web::{HandoffEvent, Stage, StageConfig};

// ─── Event Log ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    Info(String),
    /// Keyboard tilt applied; `gravity` is the resulting debug line.
    Tilt { beta: f64, gamma: f64, gravity: String },
    Handoff(HandoffEvent),
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub event: LogEvent,
}

impl LogEntry {
    pub fn text(&self) -> String {
        match &self.event {
            LogEvent::Info(text) => text.clone(),
            LogEvent::Tilt { beta, gamma, gravity } => {
                format!("tilt beta {beta:.0} gamma {gamma:.0} -> {gravity}")
            }
            LogEvent::Handoff(e) => format!(
                "#{:<6} {} at ({:.0}, {:.0})",
                e.frame,
                e.route.label(),
                e.position.x,
                e.position.y
            ),
        }
    }
}

/// What the dashboard log shows: stage events, newest last, with a
/// scroll position that follows the tail until the user scrolls up.
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    pub scroll_offset: usize,
    pub auto_scroll: bool,
    max_entries: usize,
}

impl EventLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            scroll_offset: 0,
            auto_scroll: true,
            max_entries: max_entries.max(1),
        }
    }

    pub fn push(&mut self, event: LogEvent) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
            self.scroll_offset = self.scroll_offset.saturating_sub(1);
        }
        self.entries.push_back(LogEntry {
            timestamp: Local::now(),
            event,
        });
        if self.auto_scroll {
            self.scroll_to_bottom();
        }
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn handoff_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.event, LogEvent::Handoff(_)))
            .count()
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.entries.len().saturating_sub(1);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
        self.auto_scroll = false;
    }

    pub fn scroll_down(&mut self, amount: usize) {
        let last = self.entries.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + amount).min(last);
        self.auto_scroll = self.scroll_offset >= last;
    }
}

// ─── Tabs ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Scenes,
    Handoffs,
}

impl Tab {
    pub const ALL: &'static [Tab] = &[Tab::Scenes, Tab::Handoffs];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Scenes => "Scenes",
            Self::Handoffs => "Hand-offs",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Scenes => 0,
            Self::Handoffs => 1,
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Self::Scenes => Self::Handoffs,
            Self::Handoffs => Self::Scenes,
        }
    }
}

// ─── Simulated Device ────────────────────────────────────────────────

/// Degrees added per arrow key press.
pub const TILT_STEP: f64 = 10.0;

/// The tilt a phone would report, driven from the keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tilt {
    /// Front-back, `[-180, 180]`.
    pub beta: f64,
    /// Left-right, `[-90, 90]`.
    pub gamma: f64,
}

impl Tilt {
    pub fn nudge(&mut self, d_beta: f64, d_gamma: f64) {
        self.beta = (self.beta + d_beta).clamp(-180.0, 180.0);
        self.gamma = (self.gamma + d_gamma).clamp(-90.0, 90.0);
    }
}

// ─── Application State ──────────────────────────────────────────────

pub struct AppState {
    pub stage: Stage,
    pub seed: u64,
    pub tilt: Tilt,
    /// Off until the first arrow key; the cubes keep their default
    /// straight-down gravity until then.
    pub tilt_active: bool,
    pub active_tab: Tab,
    pub log: EventLog,
    pub paused: bool,
    pub should_quit: bool,
    /// Simulated clock fed to the stage, in milliseconds.
    pub clock_ms: f64,
    handoffs_seen: u64,
}

impl AppState {
    pub fn new(config: &StageConfig, size: (f32, f32), seed: u64) -> Self {
        let stage = Stage::new(config, sizes(size), seed);
        let mut log = EventLog::new(2000);
        log.push(LogEvent::Info(format!(
            "Stage ready: seed {seed}, {} objects",
            stage.population()
        )));
        Self {
            stage,
            seed,
            tilt: Tilt::default(),
            tilt_active: false,
            active_tab: Tab::Scenes,
            log,
            paused: false,
            should_quit: false,
            clock_ms: 0.0,
            handoffs_seen: 0,
        }
    }

    /// Advance the stage by `dt_ms` and log the hand-offs it produced.
    pub fn tick(&mut self, dt_ms: f64) {
        if self.paused {
            return;
        }
        self.clock_ms += dt_ms;
        self.stage.update(self.clock_ms);

        let handoffs = self.stage.log();
        let new = (handoffs.total() - self.handoffs_seen) as usize;
        self.handoffs_seen = handoffs.total();
        let skip = handoffs.events().len().saturating_sub(new);
        for event in handoffs.events().skip(skip) {
            self.log.push(LogEvent::Handoff(*event));
        }
    }

    pub fn nudge_tilt(&mut self, d_beta: f64, d_gamma: f64) {
        self.tilt.nudge(d_beta, d_gamma);
        self.tilt_active = true;
        self.apply_tilt();
    }

    pub fn reset_tilt(&mut self) {
        self.tilt = Tilt::default();
        self.tilt_active = true;
        self.apply_tilt();
    }

    fn apply_tilt(&mut self) {
        let Tilt { beta, gamma } = self.tilt;
        self.stage.on_device_orientation(None, Some(beta), Some(gamma));
        self.log.push(LogEvent::Tilt {
            beta,
            gamma,
            gravity: self.stage.ctx.debug.dom_debug.clone(),
        });
    }
}

/// The same canvas size for all three scenes.
pub fn sizes(size: (f32, f32)) -> [glam::Vec2; 3] {
    [glam::Vec2::new(size.0, size.1); 3]
}
