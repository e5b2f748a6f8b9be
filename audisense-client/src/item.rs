//! List entry display helpers

use audisense_common::{HearingTestId, HearingTestView};
use chrono::{DateTime, Utc};

/// Characters of `result` shown in the list before truncating
pub const RESULT_PREVIEW_CHARS: usize = 100;

/// One row of the hearing test list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HearingTestItem {
    view: HearingTestView,
}

impl HearingTestItem {
    pub fn new(view: HearingTestView) -> Self {
        Self { view }
    }

    pub fn id(&self) -> HearingTestId {
        self.view.id
    }

    pub fn tester_name(&self) -> &str {
        &self.view.tester_name
    }

    pub fn date_conducted(&self) -> DateTime<Utc> {
        self.view.date_conducted
    }

    pub fn result(&self) -> &str {
        &self.view.result
    }

    pub fn view(&self) -> &HearingTestView {
        &self.view
    }

    /// e.g. `Jan 01, 2024 00:00`
    pub fn date_conducted_formatted(&self) -> String {
        self.view.date_conducted.format("%b %d, %Y %H:%M").to_string()
    }

    /// `Today`, `Yesterday` or `N days ago`, in whole elapsed days
    pub fn days_ago(&self, now: DateTime<Utc>) -> String {
        match (now - self.view.date_conducted).num_days() {
            0 => "Today".to_string(),
            1 => "Yesterday".to_string(),
            days => format!("{} days ago", days),
        }
    }

    pub fn result_preview(&self) -> String {
        let result = &self.view.result;
        if result.is_empty() {
            return "No result".to_string();
        }
        match result.char_indices().nth(RESULT_PREVIEW_CHARS) {
            Some((cut, _)) => format!("{}...", &result[..cut]),
            None => result.clone(),
        }
    }
}

impl From<HearingTestView> for HearingTestItem {
    fn from(view: HearingTestView) -> Self {
        Self::new(view)
    }
}
