use super::*;
use crate::data::Snapshot;
use crate::screen::{Console, TerminalScreen};
use crate::tui::test_utils::{stub_pages, test_screen, StubLog, TestScreen};
use ratatui::backend::TestBackend;
use std::io;
use std::rc::Rc;
use std::time::Duration;

/// Console whose zero-wait reads fail, as when the terminal goes away.
#[derive(Debug, Default)]
struct LostTerminal {
    waits: Vec<Duration>,
}

impl Console for LostTerminal {
    fn read(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        self.waits.push(timeout);
        if timeout.is_zero() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"));
        }
        Ok(None)
    }

    fn enter(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn set_title(&mut self, _title: &str) -> io::Result<()> {
        Ok(())
    }
}

fn make_controller(
    names: &[&'static str],
    script: impl IntoIterator<Item = Option<Key>>,
) -> (Controller<TestScreen>, Vec<StubLog>) {
    let (pages, logs) = stub_pages(names);
    let ctl = Controller::builder(test_screen(80, 24, script), Rc::new(Snapshot::default()))
        .pages(pages)
        .auto_start(false)
        .build()
        .expect("controller should build");
    (ctl, logs)
}

fn four_pages() -> (Controller<TestScreen>, Vec<StubLog>) {
    make_controller(&["ALL", "GPU", "MEM", "INFO"], [])
}

#[test]
fn test_right_moves_forward() {
    let (mut ctl, _) = four_pages();
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Right)), Action::Navigated);
    assert_eq!(ctl.active_page(), 2);
}

#[test]
fn test_left_on_first_page_is_noop() {
    let (mut ctl, _) = four_pages();
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Left)), Action::None);
    assert_eq!(ctl.active_page(), 1);
}

#[test]
fn test_right_on_last_page_is_noop() {
    let (mut ctl, _) = four_pages();
    ctl.set(4);
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Right)), Action::None);
    assert_eq!(ctl.active_page(), 4);
}

#[test]
fn test_digit_selects_existing_page() {
    let (mut ctl, _) = four_pages();
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Char('3'))), Action::Navigated);
    assert_eq!(ctl.active_page(), 3);
}

#[test]
fn test_out_of_range_digits_ignored() {
    let (mut ctl, logs) = four_pages();
    ctl.set(2);
    for digit in ['5', '9', '0'] {
        assert_eq!(handle_key_event(&mut ctl, Some(Key::Char(digit))), Action::None);
        assert_eq!(ctl.active_page(), 2);
    }
    // Digits are global bindings, never forwarded
    assert!(logs.iter().all(|log| log.keys.borrow().is_empty()));
}

#[test]
fn test_repeated_key_dispatches_once() {
    let (mut ctl, _) = four_pages();
    handle_key_event(&mut ctl, Some(Key::Right));
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Right)), Action::None);
    assert_eq!(ctl.active_page(), 2);
}

#[test]
fn test_idle_read_resets_debounce() {
    let (mut ctl, _) = four_pages();
    handle_key_event(&mut ctl, Some(Key::Right));
    assert_eq!(handle_key_event(&mut ctl, None), Action::None);
    assert_eq!(ctl.old_key, None);
    handle_key_event(&mut ctl, Some(Key::Right));
    assert_eq!(ctl.active_page(), 3);
}

#[test]
fn test_q_quits_after_any_key() {
    for prior in [None, Some(Key::Right), Some(Key::Char('x')), Some(Key::Char('Q'))] {
        let (mut ctl, _) = four_pages();
        handle_key_event(&mut ctl, prior);
        assert_eq!(handle_key_event(&mut ctl, Some(Key::Char('q'))), Action::Quit);
    }
    let (mut ctl, _) = four_pages();
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Char('Q'))), Action::Quit);
}

#[test]
fn test_standalone_escape_quits() {
    // Nothing follows the escape
    let (mut ctl, _) = make_controller(&["A", "B"], [None]);
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Esc)), Action::Quit);
    assert_eq!(ctl.screen().console().waits(), &[Duration::ZERO]);
}

#[test]
fn test_alt_sequence_is_dropped() {
    let (mut ctl, logs) = make_controller(&["A", "B"], [Some(Key::Char('x'))]);
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Esc)), Action::Dropped);
    assert_eq!(ctl.screen().console().remaining(), 0);
    assert_eq!(ctl.active_page(), 1);
    assert!(logs[0].keys.borrow().is_empty());
}

#[test]
fn test_alt_digit_does_not_navigate() {
    let (mut ctl, _) = make_controller(&["A", "B"], [Some(Key::Char('2'))]);
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Esc)), Action::Dropped);
    assert_eq!(ctl.active_page(), 1);
}

#[test]
fn test_repeated_escape_still_consumes_alt_key() {
    let (mut ctl, logs) = make_controller(&["A", "B"], [Some(Key::Char('q')), Some(Key::Char('2'))]);
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Esc)), Action::Dropped);
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Esc)), Action::Dropped);
    assert_eq!(ctl.screen().console().remaining(), 0);
    assert_eq!(ctl.active_page(), 1);
    assert!(logs[0].keys.borrow().is_empty());
}

#[test]
fn test_repeated_lone_escape_is_debounced() {
    // Alt+x leaves Esc as the previous key; a lone Esc right after is a repeat
    let (mut ctl, _) = make_controller(&["A", "B"], [Some(Key::Char('x')), None]);
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Esc)), Action::Dropped);
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Esc)), Action::None);
    assert_eq!(ctl.screen().console().waits(), &[Duration::ZERO, Duration::ZERO]);
}

#[test]
fn test_failed_follow_up_read_counts_as_standalone() {
    let mut screen = TerminalScreen::new(TestBackend::new(80, 24), LostTerminal::default())
        .expect("failed to create screen");
    assert!(is_standalone_escape(&mut screen));
    assert_eq!(screen.console().waits, vec![Duration::ZERO]);
}

#[test]
fn test_escape_quits_when_follow_up_read_fails() {
    let screen = TerminalScreen::new(TestBackend::new(80, 24), LostTerminal::default())
        .expect("failed to create screen");
    let (pages, logs) = stub_pages(&["A", "B"]);
    let mut ctl = Controller::builder(screen, Rc::new(Snapshot::default()))
        .pages(pages)
        .auto_start(false)
        .build()
        .expect("controller should build");
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Esc)), Action::Quit);
    assert!(logs[0].keys.borrow().is_empty());
}

#[test]
fn test_other_keys_go_to_active_page() {
    let (mut ctl, logs) = four_pages();
    ctl.set(2);
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Char('a'))), Action::Forwarded);
    assert_eq!(handle_key_event(&mut ctl, Some(Key::Up)), Action::Forwarded);
    assert_eq!(*logs[1].keys.borrow(), vec![Key::Char('a'), Key::Up]);
    assert!(logs[0].keys.borrow().is_empty());
}

#[test]
fn test_no_key_is_not_forwarded() {
    let (mut ctl, logs) = four_pages();
    handle_key_event(&mut ctl, Some(Key::Char('a')));
    handle_key_event(&mut ctl, None);
    assert_eq!(*logs[0].keys.borrow(), vec![Key::Char('a')]);
}

#[test]
fn test_is_standalone_escape_reads_without_waiting() {
    let mut screen = test_screen(80, 24, [None]);
    screen.set_timeout(Duration::from_millis(500));
    assert!(is_standalone_escape(&mut screen));
    assert_eq!(screen.console().waits(), &[Duration::ZERO]);
}
