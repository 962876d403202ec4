//! Shared test utilities for TUI testing with ratatui TestBackend.
//!
//! Provides a scripted test screen, buffer text helpers, a recording stub
//! page and data fixtures.

#![cfg(test)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Style;

use crate::data::{BoardInfo, DataSource, LocalInterfaces, Snapshot};
use crate::screen::{Key, Palette, Screen, ScreenError, ScriptedConsole, TerminalScreen};
use crate::tui::page::{Page, PageContext, PageFactory};

/// Screen type used throughout the TUI tests.
pub type TestScreen = TerminalScreen<TestBackend, ScriptedConsole>;

/// Creates a test screen of the given size replaying `script`.
pub fn test_screen(
    width: u16,
    height: u16,
    script: impl IntoIterator<Item = Option<Key>>,
) -> TestScreen {
    TerminalScreen::new(TestBackend::new(width, height), ScriptedConsole::new(script))
        .expect("failed to create test screen")
}

/// The buffer last flushed to the test backend.
pub fn flushed(screen: &TestScreen) -> &Buffer {
    screen.terminal().backend().buffer()
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Checks if a specific row contains the given substring.
pub fn row_contains(buffer: &Buffer, row: u16, text: &str) -> bool {
    row_text(buffer, row).contains(text)
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    let area = buffer.area();
    (0..area.height).find(|&row| row_contains(buffer, row, text))
}

/// Returns `true` if no cell in the buffer holds visible text.
pub fn is_blank(buffer: &Buffer) -> bool {
    let area = buffer.area();
    (0..area.height).all(|row| row_text(buffer, row).trim().is_empty())
}

/// Fully populated snapshot for a non-elevated run.
pub fn sample_snapshot() -> Snapshot {
    let mut hardware = BTreeMap::new();
    hardware.insert("Kernel".to_string(), "4.9.253-tegra".to_string());
    hardware.insert("Architecture".to_string(), "aarch64".to_string());
    let mut libraries = BTreeMap::new();
    libraries.insert("CUDA".to_string(), "10.2.300".to_string());
    libraries.insert("OpenCV".to_string(), "4.1.1".to_string());
    let mut interfaces = BTreeMap::new();
    interfaces.insert("eth0".to_string(), "192.168.1.20".to_string());
    interfaces.insert("wlan0".to_string(), "10.0.0.7".to_string());
    Snapshot {
        elevated: false,
        uptime_secs: Some(93_784),
        board: Some(BoardInfo {
            machine: Some("Jetson Nano".to_string()),
            software: Some("Jetpack 4.6".to_string()),
            hardware,
            libraries,
        }),
        local_interfaces: Some(LocalInterfaces {
            hostname: Some("nano".to_string()),
            interfaces,
        }),
        version: Some("3.1.0".to_string()),
    }
}

/// Page that records what the controller hands it.
#[derive(Debug)]
pub struct StubPage {
    name: String,
    ctx: PageContext,
    /// Keys forwarded to `keyboard`.
    pub keys: Rc<RefCell<Vec<Key>>>,
    /// Keys passed to `draw`, one entry per frame.
    pub frames: Rc<RefCell<Vec<Option<Key>>>>,
}

impl StubPage {
    /// Creates a stub page with fresh logs.
    pub fn new(name: &str, ctx: PageContext) -> Self {
        Self {
            name: name.to_string(),
            ctx,
            keys: Rc::default(),
            frames: Rc::default(),
        }
    }

    /// Context over `data` with a 100ms interval.
    pub fn context(data: Rc<dyn DataSource>) -> PageContext {
        PageContext {
            data,
            interval: Duration::from_millis(100),
            palette: Palette::new(),
        }
    }
}

impl Page for StubPage {
    fn name(&self) -> &str {
        &self.name
    }

    fn context(&self) -> &PageContext {
        &self.ctx
    }

    fn draw(&mut self, screen: &mut dyn Screen, key: Option<Key>) -> Result<(), ScreenError> {
        self.frames.borrow_mut().push(key);
        let area = self.size_page(screen);
        screen.put_str(area.first + 2, 1, &format!("{} body", self.name), Style::default())
    }

    fn keyboard(&mut self, key: Key) {
        self.keys.borrow_mut().push(key);
    }
}

/// Logs shared between a stub factory and the test holding them.
#[derive(Debug, Default, Clone)]
pub struct StubLog {
    /// Keys forwarded to the page.
    pub keys: Rc<RefCell<Vec<Key>>>,
    /// Keys seen by each draw.
    pub frames: Rc<RefCell<Vec<Option<Key>>>>,
}

/// Factory for a stub page writing into `log`.
pub fn stub_factory(name: &'static str, log: &StubLog) -> PageFactory {
    let log = log.clone();
    Box::new(move |ctx: PageContext| {
        let mut page = StubPage::new(name, ctx);
        page.keys = log.keys;
        page.frames = log.frames;
        Box::new(page) as Box<dyn Page>
    })
}

/// Factories for `names`, each with its own log.
pub fn stub_pages(names: &[&'static str]) -> (Vec<PageFactory>, Vec<StubLog>) {
    names
        .iter()
        .map(|name| {
            let log = StubLog::default();
            (stub_factory(name, &log), log)
        })
        .unzip()
}
