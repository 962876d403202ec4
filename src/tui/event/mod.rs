//! Key dispatch for the dashboard controller.
//!
//! Global bindings (page navigation, digit select, quit) are handled here;
//! everything else goes to the active page's `keyboard` hook.

use crate::screen::{Key, Screen};
use crate::tui::app::Controller;

/// Result of dispatching one read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing happened: no key, a repeated key, or a rejected navigation.
    None,
    /// The active page changed.
    Navigated,
    /// The key went to the active page.
    Forwarded,
    /// An Alt+<key> sequence was consumed and discarded.
    Dropped,
    /// Leave the loop.
    Quit,
}

/// Dispatches the key read this iteration.
///
/// A key equal to the previously processed one is ignored, so a held key or a
/// repeated read acts once. Reads that return no key still count as the
/// previous key, which lets the same key act again after an idle tick.
///
/// Escape is checked for a follow-up key even when repeated, so back-to-back
/// Alt+<key> chords never leak their second half into the next read.
pub fn handle_key_event<S: Screen>(ctl: &mut Controller<S>, key: Option<Key>) -> Action {
    if key == Some(Key::Esc) {
        let repeated = ctl.old_key == key;
        ctl.old_key = key;
        return match (is_standalone_escape(&mut ctl.screen), repeated) {
            (false, _) => Action::Dropped,
            (true, true) => Action::None,
            (true, false) => Action::Quit,
        };
    }

    if key == ctl.old_key {
        return Action::None;
    }
    ctl.old_key = key;

    let Some(key) = key else {
        return Action::None;
    };

    match key {
        Key::Left => navigated(ctl.decrease()),
        Key::Right => navigated(ctl.increase()),
        Key::Char('q' | 'Q') => Action::Quit,
        _ => match key.digit() {
            Some(idx) => navigated(ctl.set(idx)),
            None => {
                ctl.pages[ctl.active].keyboard(key);
                Action::Forwarded
            }
        },
    }
}

fn navigated(changed: bool) -> Action {
    if changed {
        Action::Navigated
    } else {
        Action::None
    }
}

/// Tells a lone Escape press from the first half of an Alt+<key> sequence.
///
/// Terminals send Alt+<key> as Escape immediately followed by the key, so one
/// more read without waiting decides it: nothing pending means a real Escape.
/// The second half, if any, is consumed here.
pub fn is_standalone_escape<S: Screen>(screen: &mut S) -> bool {
    match screen.try_read_key() {
        Ok(None) => true,
        Ok(Some(next)) => {
            tracing::debug!(key = ?next, "alt sequence dropped");
            false
        }
        Err(e) => {
            // An unreadable follow-up is treated as no data
            tracing::debug!("escape follow-up read failed: {}", e);
            true
        }
    }
}

#[cfg(test)]
mod tests;
