use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gridfield_animator::{Clock, GridAnimator, MonotonicClock};
use gridfield_config::{Config, Profile};
use gridfield_core::{AnimationSpeed, ColorTheme};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, info};

use crate::grid_view::{GridView, Status, render_content};

mod grid_view;
mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let (config, source) = Config::load()?;
    logging::init(&config)?;
    info!(
        config = %source,
        placements = config.placements.len(),
        theme = ?config.theme,
        speed = config.speed.label(),
        "starting gridfield"
    );

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// Monotonic time that stands still while paused.
#[derive(Debug)]
struct PausableClock {
    inner: MonotonicClock,
    paused_at: Option<u64>,
    /// Total time spent paused.
    offset: u64,
}

impl PausableClock {
    fn new() -> Self {
        Self {
            inner: MonotonicClock::new(),
            paused_at: None,
            offset: 0,
        }
    }

    fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    fn toggle(&mut self) {
        let raw = self.inner.now_ms();
        match self.paused_at.take() {
            Some(start) => self.offset += raw.saturating_sub(start),
            None => self.paused_at = Some(raw),
        }
    }
}

impl Clock for PausableClock {
    fn now_ms(&self) -> u64 {
        self.paused_at
            .unwrap_or_else(|| self.inner.now_ms())
            .saturating_sub(self.offset)
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    color_theme: ColorTheme,
    speed: AnimationSpeed,
    profile: Profile,
    clock: PausableClock,
    animator: GridAnimator<SmallRng>,
    view: GridView,
    /// Randomness for widget state; the animator owns its own.
    rng: SmallRng,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let clock = PausableClock::new();
        let geometry = config.geometry();
        let animator = GridAnimator::new(
            geometry.clone(),
            &config.placements,
            config.shuffle.clone(),
            SmallRng::from_os_rng(),
            clock.now_ms(),
        );
        let view = GridView::new(geometry, config.grid.content_width, config.grid.fade_ms);
        Self {
            running: false,
            color_theme: config.theme,
            speed: config.speed,
            profile: config.profile,
            clock,
            animator,
            view,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            self.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.animator.teardown();
        info!(cycles = self.animator.cycles(), "gridfield stopped");
        Ok(())
    }

    /// Advance the shuffle cycle, fades and widget tickers.
    fn tick(&mut self) {
        if self.clock.is_paused() {
            return;
        }
        let now = self.clock.now_ms();
        let events = self.animator.poll(&self.clock);
        self.view.apply(&events, self.speed, now, &mut self.rng);
        self.view.update(now, &mut self.rng);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let now = self.clock.now_ms();
        self.view
            .sync(area, self.animator.table(), self.speed, now, &mut self.rng);

        let content = self.view.layout().content();
        let status = Status {
            speed: self.speed,
            paused: self.clock.is_paused(),
        };
        let buf = frame.buffer_mut();
        self.view.render(buf, self.color_theme);
        render_content(content, buf, &self.profile, self.color_theme, status);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        // 50 ms keeps the fastest widgets smooth
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                // Resizes are picked up by the next render.
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            (_, KeyCode::Char('r')) => self.reshuffle(),
            (_, KeyCode::Char('p')) => self.toggle_pause(),
            _ => {}
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
    }

    fn cycle_speed(&mut self) {
        self.speed = self.speed.next();
        self.view.set_speed(self.speed, self.clock.now_ms());
        debug!(speed = self.speed.label(), "speed changed");
    }

    /// Start the next cycle now. Ignored mid-cycle.
    fn reshuffle(&mut self) {
        if !self.clock.is_paused() {
            self.animator.force_cycle(self.clock.now_ms());
        }
    }

    fn toggle_pause(&mut self) {
        self.clock.toggle();
        debug!(paused = self.clock.is_paused(), "pause toggled");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
