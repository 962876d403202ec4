//! Key input and terminal mode control.
//!
//! [`CrosstermConsole`] talks to the real terminal. [`ScriptedConsole`] replays
//! a fixed key script and records what the screen asked of it, for tests and
//! headless runs.

use std::collections::VecDeque;
use std::io::{self, stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};

use super::Key;
use crate::signal::RunFlag;

/// Source of key presses and owner of the terminal modes.
pub trait Console {
    /// Waits up to `timeout` for one key. `Ok(None)` means nothing arrived.
    fn read(&mut self, timeout: Duration) -> io::Result<Option<Key>>;

    /// Enters raw, no-echo mode on the alternate screen.
    fn enter(&mut self) -> io::Result<()>;

    /// Hides the cursor. Callers treat failure as cosmetic.
    fn hide_cursor(&mut self) -> io::Result<()>;

    /// Leaves raw mode and shows the cursor again.
    fn leave(&mut self) -> io::Result<()>;

    /// Sets the window title.
    fn set_title(&mut self, title: &str) -> io::Result<()>;
}

/// Console backed by crossterm on stdin/stdout.
///
/// Raw mode stops the terminal from turning Ctrl+C and Ctrl+\ into SIGINT and
/// SIGQUIT, so those chords clear the run flag directly instead.
#[derive(Debug)]
pub struct CrosstermConsole {
    pending: VecDeque<Key>,
    run_flag: RunFlag,
}

impl CrosstermConsole {
    /// Creates a console that clears `run_flag` on interrupt chords.
    pub fn new(run_flag: RunFlag) -> Self {
        Self {
            pending: VecDeque::new(),
            run_flag,
        }
    }

    /// Maps a crossterm key event onto [`Key`], queueing the second half of
    /// an Alt+<key> sequence.
    fn translate(&mut self, key: KeyEvent) -> Option<Key> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c' | '\\' | '4') = key.code {
                tracing::info!("interrupt chord read in raw mode, stopping dashboard");
                self.run_flag.stop();
                return None;
            }
        }

        let base = match key.code {
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Esc => Key::Esc,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::F(n) => Key::F(n),
            KeyCode::Char(c) => Key::Char(c),
            _ => return None,
        };

        if key.modifiers.contains(KeyModifiers::ALT) {
            self.pending.push_back(base);
            return Some(Key::Esc);
        }
        Some(base)
    }
}

impl Console for CrosstermConsole {
    fn read(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        if let Some(key) = self.pending.pop_front() {
            return Ok(Some(key));
        }
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => Ok(self.translate(key)),
            // Resize and everything else only wake the loop for a redraw
            _ => Ok(None),
        }
    }

    fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(stdout(), Hide)
    }

    fn leave(&mut self) -> io::Result<()> {
        restore_terminal()
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(stdout(), SetTitle(title))
    }
}

/// Restores the terminal to its original state.
///
/// Safe to call more than once; also used from the panic hook.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), Show, LeaveAlternateScreen)?;
    Ok(())
}

/// Console that replays a fixed script of reads.
///
/// Each entry is the result of one read: `Some(key)` or `None` for a read
/// that timed out. Once the script runs out every read returns `None`, and
/// the optional run flag is cleared so a loop driven by this console ends.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    script: VecDeque<Option<Key>>,
    waits: Vec<Duration>,
    titles: Vec<String>,
    entered: bool,
    restored: bool,
    cursor_hidden: bool,
    fail_cursor_hide: bool,
    stop_when_done: Option<RunFlag>,
}

impl ScriptedConsole {
    /// Creates a console replaying `script`.
    pub fn new(script: impl IntoIterator<Item = Option<Key>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Clears `flag` once the script is exhausted.
    pub fn stop_when_done(mut self, flag: RunFlag) -> Self {
        self.stop_when_done = Some(flag);
        self
    }

    /// Makes every cursor-hide request fail, like a terminal without that
    /// capability.
    pub fn fail_cursor_hide(mut self) -> Self {
        self.fail_cursor_hide = true;
        self
    }

    /// Appends one read result to the script.
    pub fn push(&mut self, read: Option<Key>) {
        self.script.push_back(read);
    }

    /// Reads left in the script.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Timeouts passed to every read so far, in order.
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    /// Window titles set so far, in order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Whether raw mode is currently entered.
    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Whether the cursor is currently hidden.
    pub fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    /// Whether terminal modes were restored at least once.
    pub fn was_restored(&self) -> bool {
        self.restored
    }
}

impl Console for ScriptedConsole {
    fn read(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        self.waits.push(timeout);
        match self.script.pop_front() {
            Some(read) => Ok(read),
            None => {
                if let Some(flag) = &self.stop_when_done {
                    flag.stop();
                }
                Ok(None)
            }
        }
    }

    fn enter(&mut self) -> io::Result<()> {
        self.entered = true;
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        if self.fail_cursor_hide {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "cursor visibility not supported",
            ));
        }
        self.cursor_hidden = true;
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        self.entered = false;
        self.cursor_hidden = false;
        self.restored = true;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        self.titles.push(title.to_string());
        Ok(())
    }
}
