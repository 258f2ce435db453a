use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use elevator_core::engine::{Elevator, FrameQueue, Viewport};
use elevator_core::sound::{self, Silent, Sound, TerminalBell};
use elevator_core::AppConfig;
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::input::Action;
use crate::page::PROJECT_URL;
use crate::sound::{MuzakHandle, MuzakIndicator};
use crate::theme::Theme;
use crate::themes::load_theme;
use crate::viewport::PageViewport;

/// Rows scrolled per mouse wheel notch
const WHEEL_ROWS: i32 = 3;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Ride counters written by the elevator hooks
#[derive(Debug, Default, Clone)]
struct RideCounters {
    departures: Rc<Cell<u32>>,
    arrivals: Rc<Cell<u32>>,
}

/// Application state
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    /// The ride engine, which owns the page viewport
    pub elevator: Elevator<PageViewport, FrameQueue>,
    /// Whether the travel muzak is playing
    pub muzak: MuzakHandle,
    pub mode: Mode,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Where the page was last drawn, for mouse hit testing
    pub page_area: Rect,
    /// Animation tick, drives the muzak ticker
    pub tick: u64,
    rides: RideCounters,
    seen_arrivals: u32,
    clock: Instant,
}

impl App {
    /// App with the built-in sounds: muzak ticker for travel, terminal bell on arrival
    pub fn new(config: AppConfig, width: u16, height: u16) -> Self {
        Self::with_sounds(config, width, height, Box::new(Silent), Box::new(TerminalBell::stdout()))
    }

    /// App whose built-in sounds are `travel` and `arrival`.
    /// Configured sound sources still take precedence.
    pub fn with_sounds(
        config: AppConfig,
        width: u16,
        height: u16,
        travel: Box<dyn Sound>,
        arrival: Box<dyn Sound>,
    ) -> Self {
        let theme = load_theme(&config.ui.theme);
        let rides = RideCounters::default();

        let travel = sound::from_source(&config.elevator.travel_sound, travel);
        let (travel, muzak) = MuzakIndicator::wrap(travel);
        let arrival = sound::from_source(&config.elevator.arrival_sound, arrival);

        let page_area = Rect::new(0, 0, width, page_height(height));
        let viewport = PageViewport::new(page_area.width, page_area.height);

        let departures = rides.departures.clone();
        let arrivals = rides.arrivals.clone();
        let elevator = Elevator::new(
            config.elevator.clone(),
            viewport,
            FrameQueue::new(),
            Box::new(travel),
            arrival,
        )
        .with_on_start(move || departures.set(departures.get() + 1))
        .with_on_end(move || arrivals.set(arrivals.get() + 1));

        Self {
            config,
            theme,
            elevator,
            muzak,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            pending_key: None,
            page_area,
            tick: 0,
            rides,
            seen_arrivals: 0,
            clock: Instant::now(),
        }
    }

    pub fn viewport(&self) -> &PageViewport {
        self.elevator.viewport()
    }

    pub fn is_riding(&self) -> bool {
        self.elevator.is_running()
    }

    /// Rides started so far
    pub fn departures(&self) -> u32 {
        self.rides.departures.get()
    }

    /// Rides that reached their destination
    pub fn arrivals(&self) -> u32 {
        self.rides.arrivals.get()
    }

    /// Milliseconds since the app started
    pub fn now_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    /// Whether the event loop should poll at animation speed
    pub fn needs_fast_update(&self) -> bool {
        self.elevator.is_running() || self.elevator.scheduler().has_pending()
    }

    /// Perform an input action
    pub fn apply(&mut self, action: Action) {
        if !matches!(action, Action::Pending(_)) {
            self.clear_pending_key();
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveDown => self.scroll_rows(1),
            Action::MoveUp => self.scroll_rows(-1),
            Action::ScrollHalfPageDown => self.scroll_rows(self.half_page()),
            Action::ScrollHalfPageUp => self.scroll_rows(-self.half_page()),
            Action::ScrollPageDown => self.scroll_rows(self.full_page()),
            Action::ScrollPageUp => self.scroll_rows(-self.full_page()),
            Action::JumpToTop => self.jump(0.0),
            Action::JumpToBottom => {
                let bottom = self.viewport().max_scroll();
                self.jump(bottom);
            }
            Action::Pending(c) => self.pending_key = Some(c),
            Action::Elevate => self.elevate(),
            Action::OpenLink => self.open_link(),
            Action::ToggleHelp => {
                self.mode = match self.mode {
                    Mode::Help => Mode::Normal,
                    Mode::Normal => Mode::Help,
                };
            }
            Action::ExitMode => self.mode = Mode::Normal,
            Action::None => {}
        }
    }

    /// Press the elevator button
    pub fn elevate(&mut self) {
        if self.elevator.is_running() {
            return;
        }
        self.clear_status();
        self.elevator.start();
        info!(
            from = self.elevator.viewport().scroll_offset(),
            to = ?self.elevator.destination(),
            "Elevator called"
        );
    }

    /// The terminal lost focus: abandon the ride and jump to the destination
    pub fn on_focus_lost(&mut self) {
        if self.elevator.is_running() {
            self.elevator.interrupt();
            self.set_status("Elevator skipped ahead while you were away");
        }
    }

    /// Deliver at most one frame to the elevator
    pub fn on_frame(&mut self) {
        let now = self.now_ms();
        self.on_frame_at(now);
    }

    /// Deliver at most one frame at `timestamp_ms`.
    ///
    /// A step may request the next frame straight away, so only one queued
    /// frame is taken per refresh.
    pub fn on_frame_at(&mut self, timestamp_ms: f64) {
        if self.elevator.scheduler_mut().pop_due().is_some() {
            self.elevator.step(timestamp_ms);
        }
        self.tick = self.tick.wrapping_add(1);

        let arrivals = self.rides.arrivals.get();
        if arrivals != self.seen_arrivals {
            self.seen_arrivals = arrivals;
            self.set_status("Ding! Welcome back to the top");
        }
    }

    /// Track the area the page is drawn in, re-laying out on size change
    pub fn sync_area(&mut self, page_area: Rect) {
        if page_area == self.page_area {
            return;
        }
        debug!(width = page_area.width, height = page_area.height, "Page area changed");
        self.page_area = page_area;
        self.elevator
            .viewport_mut()
            .relayout(page_area.width, page_area.height);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_rows(WHEEL_ROWS),
            MouseEventKind::ScrollUp => self.scroll_rows(-WHEEL_ROWS),
            MouseEventKind::Down(MouseButton::Left) => {
                if self.mode == Mode::Help {
                    self.mode = Mode::Normal;
                } else if self.hits_button(mouse.column, mouse.row) {
                    self.elevate();
                }
            }
            _ => {}
        }
    }

    /// Whether a screen cell lies on the elevator button
    pub fn hits_button(&self, column: u16, row: u16) -> bool {
        let area = self.page_area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        if !inside {
            return false;
        }
        let page_row = self.viewport().row().saturating_add(row - area.y);
        self.viewport().layout().button_rows().contains(&page_row)
    }

    pub fn open_link(&mut self) {
        match open::that(PROJECT_URL) {
            Ok(()) => self.set_status(format!("Opened {}", PROJECT_URL)),
            Err(e) => {
                warn!(error = %e, "Failed to open browser");
                self.set_status(format!("Could not open browser: {}", e));
            }
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Clear the pending key
    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    /// Manual scrolling. The elevator has the controls while it moves.
    fn scroll_rows(&mut self, rows: i32) {
        if self.elevator.is_running() {
            return;
        }
        self.elevator.viewport_mut().scroll_by(rows);
    }

    fn jump(&mut self, offset: f64) {
        if self.elevator.is_running() {
            return;
        }
        self.elevator.viewport_mut().scroll_to(offset);
    }

    fn half_page(&self) -> i32 {
        (self.page_area.height / 2).max(1) as i32
    }

    fn full_page(&self) -> i32 {
        self.page_area.height.max(1) as i32
    }
}

/// Terminal rows left for the page after the status bar
pub fn page_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(1).max(1)
}
