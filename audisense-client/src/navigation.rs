//! View history for the terminal client

use std::fmt;

use tracing::{info, warn};

/// Screens the client can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    HearingTests,
    NewHearingTest,
    EditHearingTest,
}

impl ViewId {
    pub fn is_form(self) -> bool {
        matches!(self, ViewId::NewHearingTest | ViewId::EditHearingTest)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewId::HearingTests => "HearingTests",
            ViewId::NewHearingTest => "NewHearingTest",
            ViewId::EditHearingTest => "EditHearingTest",
        };
        f.write_str(name)
    }
}

/// Stack of visited views; the last entry is the current one
#[derive(Debug, Default)]
pub struct NavigationHistory {
    stack: Vec<ViewId>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate_to(&mut self, view: ViewId) {
        info!("Navigating to view: {}", view);
        self.stack.push(view);
    }

    /// Pop the current view; `None` (and no change) when only one view is left
    pub fn back(&mut self) -> Option<ViewId> {
        if !self.can_navigate_back() {
            warn!("Cannot navigate back: no previous view");
            return None;
        }
        self.stack.pop();
        let current = self.current();
        if let Some(view) = current {
            info!("Navigated back to view: {}", view);
        }
        current
    }

    pub fn can_navigate_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn current(&self) -> Option<ViewId> {
        self.stack.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Drop form views from the top until a list view (or nothing) is current
    pub(crate) fn unwind_forms(&mut self) {
        while self.current().is_some_and(ViewId::is_form) {
            self.stack.pop();
        }
    }
}
