//! Controller state and main loop for the dashboard.
//!
//! Owns the ordered pages, the active page index, the debounce state and the
//! run flag. All index changes go through [`Controller::set`], which rejects
//! anything outside `1..=page_count`.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;
use tracing::Span;

use crate::data::DataSource;
use crate::screen::{Key, Palette, Screen, ScreenError};
use crate::signal::{self, RunFlag};
use crate::tui::event::{handle_key_event, Action};
use crate::tui::page::{Page, PageContext, PageFactory};
use crate::tui::ui;

/// Loop state. `Stopping` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Reading keys and drawing frames.
    Running,
    /// Quit requested; the loop exits.
    Stopping,
}

/// Errors raised while building or running a controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// No page factories were registered.
    #[error("at least one page is required")]
    NoPages,

    /// Two pages share a display name.
    #[error("duplicate page name: {0}")]
    DuplicatePage(String),

    /// The screen failed in a way that cannot be skipped.
    #[error(transparent)]
    Screen(#[from] ScreenError),
}

/// The dashboard controller.
pub struct Controller<S: Screen> {
    pub(crate) screen: S,
    pub(crate) interval: Duration,
    pub(crate) data: Rc<dyn DataSource>,
    pub(crate) pages: Vec<Box<dyn Page>>,
    /// 0-based; always a valid position into `pages`.
    pub(crate) active: usize,
    pub(crate) key: Option<Key>,
    pub(crate) old_key: Option<Key>,
    pub(crate) palette: Palette,
    run_flag: RunFlag,
    state: LoopState,
    span: Span,
}

impl<S: Screen> fmt::Debug for Controller<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("pages", &self.page_names())
            .field("active", &self.active_page())
            .field("interval", &self.interval)
            .field("key", &self.key)
            .field("old_key", &self.old_key)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<S: Screen> Controller<S> {
    /// Starts building a controller over `screen` and `data`.
    pub fn builder(screen: S, data: Rc<dyn DataSource>) -> ControllerBuilder<S> {
        ControllerBuilder::new(screen, data)
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Active page, 1-based.
    pub fn active_page(&self) -> usize {
        self.active + 1
    }

    /// Display names in tab order.
    pub fn page_names(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.name()).collect()
    }

    /// Current loop state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The run flag observed by the loop.
    pub fn run_flag(&self) -> &RunFlag {
        &self.run_flag
    }

    /// Configured redraw interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The screen.
    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Mutable access to the screen.
    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    /// Moves one page forward; no-op on the last page.
    pub fn increase(&mut self) -> bool {
        self.set(self.active_page() + 1)
    }

    /// Moves one page back; no-op on the first page.
    pub fn decrease(&mut self) -> bool {
        self.set(self.active_page() - 1)
    }

    /// Selects the 1-based page `idx`. Out-of-range targets leave the
    /// selection unchanged and return `false`.
    pub fn set(&mut self, idx: usize) -> bool {
        if (1..=self.pages.len()).contains(&idx) {
            self.active = idx - 1;
            true
        } else {
            false
        }
    }

    /// Runs the loop until a quit key or a cleared run flag, then restores
    /// the terminal. Restoration happens on error paths too.
    pub fn run(&mut self) -> Result<(), ScreenError> {
        let span = self.span.clone();
        let _entered = span.enter();
        tracing::info!(
            pages = self.pages.len(),
            interval = ?self.interval,
            "dashboard started"
        );

        let result = self
            .screen
            .prepare_input()
            .and_then(|()| self.event_loop());
        let restored = self.screen.restore();

        match &result {
            Ok(()) => tracing::info!("dashboard stopped"),
            Err(e) => tracing::error!("dashboard stopped on error: {}", e),
        }
        result.and(restored)
    }

    fn event_loop(&mut self) -> Result<(), ScreenError> {
        while self.state == LoopState::Running {
            self.step()?;
        }
        Ok(())
    }

    /// Runs one loop iteration: read, dispatch, check the run flag, draw.
    pub fn step(&mut self) -> Result<LoopState, ScreenError> {
        if self.state == LoopState::Stopping {
            return Ok(self.state);
        }

        let key = self.screen.read_key()?;
        self.key = key;
        if handle_key_event(self, key) == Action::Quit {
            tracing::info!("quit requested from keyboard");
            self.state = LoopState::Stopping;
        }

        if self.state == LoopState::Running && !self.run_flag.is_running() {
            tracing::info!("run flag cleared, stopping");
            self.state = LoopState::Stopping;
        }

        if self.state == LoopState::Running {
            ui::draw(self)?;
        }
        Ok(self.state)
    }
}

/// Builder for [`Controller`].
pub struct ControllerBuilder<S: Screen> {
    screen: S,
    data: Rc<dyn DataSource>,
    pages: Vec<PageFactory>,
    interval: Duration,
    init_page: usize,
    auto_start: bool,
    run_flag: RunFlag,
    span: Option<Span>,
}

impl<S: Screen> ControllerBuilder<S> {
    /// Defaults: no pages, [`crate::DEFAULT_INTERVAL`], first page, auto-start.
    pub fn new(screen: S, data: Rc<dyn DataSource>) -> Self {
        Self {
            screen,
            data,
            pages: Vec::new(),
            interval: crate::DEFAULT_INTERVAL,
            init_page: 1,
            auto_start: true,
            run_flag: RunFlag::new(),
            span: None,
        }
    }

    /// Redraw interval and input wait timeout.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Appends pages in tab order.
    pub fn pages(mut self, pages: impl IntoIterator<Item = PageFactory>) -> Self {
        self.pages.extend(pages);
        self
    }

    /// Appends one page.
    pub fn page(mut self, page: PageFactory) -> Self {
        self.pages.push(page);
        self
    }

    /// 1-based page shown first. Out of range keeps the first page.
    pub fn init_page(mut self, idx: usize) -> Self {
        self.init_page = idx;
        self
    }

    /// Whether `build` enters the loop immediately.
    pub fn auto_start(mut self, start: bool) -> Self {
        self.auto_start = start;
        self
    }

    /// Flag shared with signal listeners and the console.
    pub fn run_flag(mut self, flag: RunFlag) -> Self {
        self.run_flag = flag;
        self
    }

    /// Span every controller log line is recorded under.
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Builds the controller and, with auto-start, runs it to completion.
    ///
    /// Never draws a frame itself; the first frame comes from the first loop
    /// iteration.
    pub fn build(self) -> Result<Controller<S>, ControllerError> {
        if self.pages.is_empty() {
            return Err(ControllerError::NoPages);
        }

        let palette = Palette::new();
        let ctx = PageContext {
            data: Rc::clone(&self.data),
            interval: self.interval,
            palette: palette.clone(),
        };
        let pages: Vec<Box<dyn Page>> = self
            .pages
            .into_iter()
            .map(|factory| factory(ctx.clone()))
            .collect();

        let mut seen = HashSet::new();
        for page in &pages {
            if !seen.insert(page.name()) {
                return Err(ControllerError::DuplicatePage(page.name().to_string()));
            }
        }

        let span = self
            .span
            .unwrap_or_else(|| tracing::info_span!("controller"));
        let mut controller = Controller {
            screen: self.screen,
            interval: self.interval,
            data: self.data,
            pages,
            active: 0,
            key: None,
            old_key: None,
            palette,
            run_flag: self.run_flag,
            state: LoopState::Running,
            span,
        };

        if !controller.set(self.init_page) {
            tracing::debug!(
                requested = self.init_page,
                pages = controller.page_count(),
                "initial page out of range, keeping first page"
            );
        }

        install_signal_handlers(&controller.run_flag);

        if self.auto_start {
            controller.run()?;
        }
        Ok(controller)
    }
}

fn install_signal_handlers(flag: &RunFlag) {
    match signal::install_handlers(flag) {
        Ok(true) => tracing::debug!("termination signal handlers installed"),
        Ok(false) => tracing::debug!("no async runtime, termination signals not intercepted"),
        Err(e) => log_signal_error(&e),
    }
}

fn log_signal_error(e: &io::Error) {
    tracing::warn!("could not install signal handlers: {}", e);
}

#[cfg(test)]
mod tests;
