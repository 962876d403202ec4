//! Size-guarded draw pass for the dashboard.
//!
//! One frame is: erase, header, active page, footer menu, flush, then arm the
//! input timeout so the next key read paces the loop at the redraw interval.

use ratatui::layout::Size;
use ratatui::style::Style;

use crate::screen::{ColorPair, Palette, Screen, ScreenError};
use crate::tui::app::Controller;
use crate::{NOT_AVAILABLE, PRODUCT_NAME};

/// Smallest terminal height the dashboard lays out in.
pub const MIN_HEIGHT: u16 = 20;

/// Smallest terminal width the dashboard lays out in.
pub const MIN_WIDTH: u16 = 50;

/// Banner shown on the first row when running without elevated privileges.
const SUDO_BANNER: &str = "SUDO REQUIRED";

/// Separator between footer menu entries.
const MENU_SEPARATOR: &str = " - ";

/// Right-aligned footer text.
const ATTRIBUTION: &str = env!("CARGO_PKG_AUTHORS");

/// What a draw pass put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Header, page and menu.
    Rendered,
    /// Only the terminal-too-small notice.
    TooSmall,
}

/// Runs one draw pass, or the too-small notice when the terminal is below
/// [`MIN_HEIGHT`] x [`MIN_WIDTH`]. The input timeout is armed either way.
pub fn draw<S: Screen>(ctl: &mut Controller<S>) -> Result<DrawOutcome, ScreenError> {
    let size = ctl.screen.size();
    let outcome = if size.height < MIN_HEIGHT || size.width < MIN_WIDTH {
        render_too_small(&mut ctl.screen, size)?;
        DrawOutcome::TooSmall
    } else {
        render_frame(ctl)?;
        DrawOutcome::Rendered
    };
    ctl.screen.set_timeout(ctl.interval);
    Ok(outcome)
}

/// Swallows errors caused by the terminal changing size mid-frame.
///
/// The region is skipped for this frame; the next frame is laid out against
/// the new size.
pub fn tolerate(region: &str, result: Result<(), ScreenError>) -> Result<(), ScreenError> {
    match result {
        Err(e) if e.is_transient() => {
            tracing::debug!(region, "skipped for this frame: {}", e);
            Ok(())
        }
        other => other,
    }
}

fn render_frame<S: Screen>(ctl: &mut Controller<S>) -> Result<(), ScreenError> {
    ctl.screen.erase();
    tolerate("header", render_header(ctl))?;

    let key = ctl.key;
    let page = &mut ctl.pages[ctl.active];
    tolerate("page", page.draw(&mut ctl.screen, key))?;

    tolerate("menu", render_menu(ctl))?;
    tolerate("flush", ctl.screen.refresh())
}

/// Privilege banner (when not elevated) and the bold title line.
fn render_header<S: Screen>(ctl: &mut Controller<S>) -> Result<(), ScreenError> {
    let board = ctl.data.board();
    let machine = board
        .and_then(|b| b.machine.as_deref())
        .unwrap_or(NOT_AVAILABLE);
    let software = board
        .and_then(|b| b.software.as_deref())
        .unwrap_or(NOT_AVAILABLE);
    let title = format!("{PRODUCT_NAME} - {machine} - {software}");
    ctl.screen.set_title(&title);

    let mut row = 0;
    if !ctl.data.is_elevated() {
        let width = ctl.screen.size().width;
        let alert = ctl.palette.pair(ColorPair::Alert);
        ctl.screen
            .put_str(0, 0, &" ".repeat(usize::from(width)), alert)?;
        let col = width.saturating_sub(text_width(SUDO_BANNER)) / 2;
        ctl.screen.put_str(0, col, SUDO_BANNER, alert)?;
        row = 1;
    }
    ctl.screen.put_str(row, 0, &title, Palette::bold())
}

/// Tab-style page list on the last row with the attribution on the right.
fn render_menu<S: Screen>(ctl: &mut Controller<S>) -> Result<(), ScreenError> {
    let Size { width, height } = ctl.screen.size();
    let row = height.saturating_sub(1);
    let reverse = Palette::reverse();

    ctl.screen
        .put_str(row, 0, &" ".repeat(usize::from(width)), reverse)?;

    let mut col: u16 = 1;
    let count = ctl.pages.len();
    for (idx, page) in ctl.pages.iter().enumerate() {
        if col >= width {
            break;
        }
        let entry = format!("{} {}", idx + 1, page.name());
        // The row background is reversed; the active entry clears it
        let style = if idx == ctl.active {
            Style::reset()
        } else {
            reverse
        };
        ctl.screen.put_str(row, col, &entry, style)?;
        col = col.saturating_add(text_width(&entry));
        if idx + 1 < count && col < width {
            ctl.screen.put_str(row, col, MENU_SEPARATOR, reverse)?;
            col = col.saturating_add(text_width(MENU_SEPARATOR));
        }
    }

    let attribution_col = width.saturating_sub(text_width(ATTRIBUTION));
    ctl.screen
        .put_str(row, attribution_col, ATTRIBUTION, reverse)
}

/// Notice drawn in place of the dashboard on undersized terminals.
fn render_too_small<S: Screen>(screen: &mut S, size: Size) -> Result<(), ScreenError> {
    screen.erase();
    let lines = [
        "Increase terminal size".to_string(),
        format!("minimum {MIN_WIDTH}x{MIN_HEIGHT}"),
        format!("current {}x{}", size.width, size.height),
    ];
    for (row, line) in (0u16..).zip(lines.iter()) {
        tolerate("notice", screen.put_str(row, 0, line, Palette::bold()))?;
    }
    tolerate("flush", screen.refresh())
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}
