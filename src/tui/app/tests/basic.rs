use super::*;
use crate::tui::test_utils::{flushed, is_blank, stub_factory};

#[test]
fn test_build_defaults() {
    let ctl = make_built(4);
    assert_eq!(ctl.page_count(), 4);
    assert_eq!(ctl.active_page(), 1);
    assert_eq!(ctl.page_names(), vec!["ALL", "GPU", "CPU", "MEM"]);
    assert_eq!(ctl.interval(), crate::DEFAULT_INTERVAL);
    assert_eq!(ctl.state(), LoopState::Running);
    assert!(ctl.run_flag().is_running());
    assert_eq!(ctl.key, None);
    assert_eq!(ctl.old_key, None);
}

#[test]
fn test_build_rejects_empty_page_list() {
    let (builder, _) = make_controller(0, []);
    let err = builder.build().expect_err("no pages");
    assert!(matches!(err, ControllerError::NoPages));
}

#[test]
fn test_build_rejects_duplicate_names() {
    let log = StubLog::default();
    let err = Controller::builder(test_screen(80, 24, []), Rc::new(Snapshot::default()))
        .page(stub_factory("INFO", &log))
        .page(stub_factory("GPU", &log))
        .page(stub_factory("INFO", &log))
        .auto_start(false)
        .build()
        .expect_err("duplicate page names");
    match err {
        ControllerError::DuplicatePage(name) => assert_eq!(name, "INFO"),
        other => panic!("expected DuplicatePage, got {other:?}"),
    }
}

#[test]
fn test_build_does_not_render() {
    let ctl = make_built(3);
    assert!(is_blank(flushed(ctl.screen())));
    assert!(ctl.screen().console().titles().is_empty());
    assert!(!ctl.screen().console().is_entered());
}

#[test]
fn test_init_page_in_range() {
    let (builder, _) = make_controller(4, []);
    let ctl = builder.init_page(3).build().unwrap();
    assert_eq!(ctl.active_page(), 3);
}

#[test]
fn test_init_page_out_of_range_keeps_first() {
    let (builder, _) = make_controller(4, []);
    let ctl = builder.init_page(10).build().unwrap();
    assert_eq!(ctl.active_page(), 1);

    let (builder, _) = make_controller(4, []);
    let ctl = builder.init_page(0).build().unwrap();
    assert_eq!(ctl.active_page(), 1);
}

#[test]
fn test_set_accepts_only_valid_targets() {
    let mut ctl = make_built(4);
    assert!(ctl.set(4));
    assert_eq!(ctl.active_page(), 4);
    assert!(!ctl.set(5));
    assert!(!ctl.set(0));
    assert!(!ctl.set(usize::MAX));
    assert_eq!(ctl.active_page(), 4);
}

#[test]
fn test_decrease_clamps_at_first_page() {
    let mut ctl = make_built(3);
    for _ in 0..5 {
        assert!(!ctl.decrease());
        assert_eq!(ctl.active_page(), 1);
    }
}

#[test]
fn test_increase_clamps_at_last_page() {
    let mut ctl = make_built(3);
    assert!(ctl.increase());
    assert!(ctl.increase());
    for _ in 0..5 {
        assert!(!ctl.increase());
        assert_eq!(ctl.active_page(), 3);
    }
}

#[test]
fn test_navigation_never_leaves_range() {
    let mut ctl = make_built(4);
    // Deterministic mix of left and right presses
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..500 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        if seed % 2 == 0 {
            ctl.increase();
        } else {
            ctl.decrease();
        }
        assert!((1..=4).contains(&ctl.active_page()));
    }
}

#[test]
fn test_single_page_navigation_is_noop() {
    let mut ctl = make_built(1);
    assert!(!ctl.increase());
    assert!(!ctl.decrease());
    assert_eq!(ctl.active_page(), 1);
}

#[test]
fn test_builder_options_applied() {
    let flag = RunFlag::new();
    let (builder, _) = make_controller(2, []);
    let ctl = builder
        .interval(Duration::from_millis(50))
        .run_flag(flag.clone())
        .span(tracing::debug_span!("test-controller"))
        .build()
        .unwrap();
    assert_eq!(ctl.interval(), Duration::from_millis(50));
    flag.stop();
    assert!(!ctl.run_flag().is_running());
}

#[test]
fn test_controller_debug_format() {
    let ctl = make_built(2);
    let debug = format!("{:?}", ctl);
    assert!(debug.contains("Controller"));
    assert!(debug.contains("GPU"));
}

#[test]
fn test_controller_error_display() {
    assert_eq!(
        ControllerError::NoPages.to_string(),
        "at least one page is required"
    );
    assert_eq!(
        ControllerError::DuplicatePage("INFO".into()).to_string(),
        "duplicate page name: INFO"
    );
}
