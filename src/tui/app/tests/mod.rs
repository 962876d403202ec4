pub(crate) use super::*;
pub(crate) use crate::data::Snapshot;
pub(crate) use crate::tui::test_utils::{stub_pages, test_screen, StubLog, TestScreen};

mod basic;

pub(crate) fn make_controller(
    count: usize,
    script: impl IntoIterator<Item = Option<Key>>,
) -> (ControllerBuilder<TestScreen>, Vec<StubLog>) {
    const NAMES: [&str; 9] = ["ALL", "GPU", "CPU", "MEM", "CTRL", "INFO", "NET", "DISK", "FAN"];
    let (pages, logs) = stub_pages(&NAMES[..count]);
    let builder = Controller::builder(test_screen(80, 24, script), Rc::new(Snapshot::default()))
        .pages(pages)
        .auto_start(false);
    (builder, logs)
}

pub(crate) fn make_built(count: usize) -> Controller<TestScreen> {
    make_controller(count, [])
        .0
        .build()
        .expect("controller should build")
}
