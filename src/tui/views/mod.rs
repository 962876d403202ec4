//! Concrete dashboard pages.

pub mod info;

use crate::tui::page::{Page, PageContext, PageFactory};

/// Pages registered by the `boardtop` binary, in tab order.
pub fn default_pages() -> Vec<PageFactory> {
    vec![Box::new(|ctx: PageContext| {
        Box::new(info::InfoPage::new(ctx)) as Box<dyn Page>
    })]
}
