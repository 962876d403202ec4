//! Board information page.
//!
//! Lists uptime, software release, hardware fields, library versions, the
//! hostname and the local interfaces, with the monitor version and redraw
//! interval in a right-hand column. Rows that would reach the footer are left
//! out and absent values render as `N/A`.

use std::time::Duration;

use ratatui::style::Style;

use crate::screen::{Key, Palette, Screen, ScreenError};
use crate::tui::page::{Page, PageContext};
use crate::NOT_AVAILABLE;

/// Display name in the footer menu.
pub const NAME: &str = "INFO";

/// Left margin of the label column.
const LABEL_COL: u16 = 1;

/// Offset of the value column from the label column.
const VALUE_OFFSET: u16 = 18;

/// Narrowest page that still gets the right-hand column.
const RIGHT_COLUMN_MIN_WIDTH: u16 = 70;

/// Distance of the right-hand column from the right edge.
const RIGHT_COLUMN_INSET: u16 = 30;

/// Static board details plus live uptime.
#[derive(Debug)]
pub struct InfoPage {
    ctx: PageContext,
}

impl InfoPage {
    /// Creates the page.
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }
}

impl Page for InfoPage {
    fn name(&self) -> &str {
        NAME
    }

    fn context(&self) -> &PageContext {
        &self.ctx
    }

    fn draw(&mut self, screen: &mut dyn Screen, _key: Option<Key>) -> Result<(), ScreenError> {
        let area = self.size_page(screen);
        let data = &self.ctx.data;
        let bold = Palette::bold();
        let plain = Style::default();
        let value_col = LABEL_COL + VALUE_OFFSET;

        let mut out = Rows::new(screen, area.bottom(), area.width);
        let mut row = area.first + 2;

        let uptime = data
            .uptime()
            .map(format_uptime)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        out.put(row, LABEL_COL, "- Up Time:", bold)?;
        out.put(row, value_col, &uptime, plain)?;
        let top = row;
        row += 1;

        let board = data.board();
        let software = board
            .and_then(|b| b.software.as_deref())
            .unwrap_or(NOT_AVAILABLE);
        out.put(row, LABEL_COL, "- Software:", bold)?;
        out.put(row, value_col, software, bold)?;
        row += 1;

        let sections = [
            ("- Board:", board.map(|b| &b.hardware)),
            ("- Libraries:", board.map(|b| &b.libraries)),
        ];
        for (label, entries) in sections {
            out.put(row, LABEL_COL, label, bold)?;
            match entries.filter(|e| !e.is_empty()) {
                Some(entries) => {
                    for (name, value) in entries {
                        row += 1;
                        out.entry(row, name, value)?;
                    }
                }
                None => out.put(row, value_col, NOT_AVAILABLE, plain)?,
            }
            row += 1;
        }

        if let Some(net) = data.local_interfaces() {
            let hostname = net.hostname.as_deref().unwrap_or(NOT_AVAILABLE);
            out.put(row, LABEL_COL, "- Hostname:", bold)?;
            out.put(row, value_col, hostname, bold)?;
            row += 1;
            out.put(row, LABEL_COL, "- Interfaces:", bold)?;
            if net.interfaces.is_empty() {
                out.put(row, value_col, NOT_AVAILABLE, plain)?;
            }
            for (name, address) in &net.interfaces {
                row += 1;
                out.entry(row, name, address)?;
            }
        }

        if area.width >= RIGHT_COLUMN_MIN_WIDTH {
            let col = area.width - RIGHT_COLUMN_INSET;
            let version = data.version().unwrap_or(NOT_AVAILABLE);
            out.name_value(top - 1, col - 1, "Version", version)?;
            out.name_value(top, col, "Refresh", &format_interval(self.ctx.interval))?;
        }
        Ok(())
    }
}

/// Writes rows above the footer and drops the rest.
struct Rows<'a> {
    screen: &'a mut dyn Screen,
    bottom: u16,
    width: u16,
}

impl<'a> Rows<'a> {
    fn new(screen: &'a mut dyn Screen, bottom: u16, width: u16) -> Self {
        Self {
            screen,
            bottom,
            width,
        }
    }

    fn put(&mut self, row: u16, col: u16, text: &str, style: Style) -> Result<(), ScreenError> {
        if row >= self.bottom || col >= self.width {
            return Ok(());
        }
        self.screen.put_str(row, col, text, style)
    }

    /// `  * name:` in the label column, value in bold.
    fn entry(&mut self, row: u16, name: &str, value: &str) -> Result<(), ScreenError> {
        self.put(row, LABEL_COL + 2, &format!("* {name}:"), Style::default())?;
        self.put(row, LABEL_COL + VALUE_OFFSET, value, Palette::bold())
    }

    /// `name: value` with a bold name.
    fn name_value(&mut self, row: u16, col: u16, name: &str, value: &str) -> Result<(), ScreenError> {
        let label = format!("{name}: ");
        self.put(row, col, &label, Palette::bold())?;
        let offset = u16::try_from(label.len()).unwrap_or(u16::MAX);
        self.put(row, col.saturating_add(offset), value, Style::default())
    }
}

/// Formats an uptime as `<d> days <h>:<mm>:<ss>`.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    format!("{days} days {hours}:{minutes:02}:{seconds:02}")
}

fn format_interval(interval: Duration) -> String {
    humantime::format_duration(interval).to_string()
}
