//! Client presentation state
//!
//! [`HearingTestsPresenter`] owns everything a front end renders: the loaded
//! list, the create/edit form, the status line and the loading flag. Front
//! ends call its operations and re-render; nothing is pushed to them.
//!
//! List loads are numbered. A completion carrying a ticket older than one
//! already applied is dropped, so a slow response can never overwrite a newer
//! list.

use audisense_common::validation::{RESULT_MAX_CHARS, TESTER_NAME_MAX_CHARS};
use audisense_common::{HearingTestId, HearingTestRequest, HearingTestView};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::controller::HearingTestClient;
use crate::gateway::DataGateway;
use crate::item::HearingTestItem;
use crate::navigation::{NavigationHistory, ViewId};

const READY: &str = "Ready";

/// Minimum trimmed lengths enforced before anything is sent
pub const TESTER_NAME_MIN_CHARS: usize = 2;
pub const RESULT_MIN_CHARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    ViewingList,
    Creating,
    Editing(HearingTestId),
}

/// How the user left the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Save,
    Cancel,
}

/// Identifies one list load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { count: usize },
    Failed,
    /// A newer load had already been applied
    Stale,
}

/// Problems caught by the form before submitting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormIssue {
    #[error("Tester name must be at least 2 characters")]
    TesterNameTooShort,

    #[error("Tester name cannot exceed 100 characters")]
    TesterNameTooLong,

    #[error("Result must be at least 5 characters")]
    ResultTooShort,

    #[error("Result cannot exceed 500 characters")]
    ResultTooLong,

    #[error("Date conducted cannot be in the future")]
    DateInFuture,
}

/// Create/edit form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HearingTestForm {
    editing: Option<HearingTestId>,
    pub tester_name: String,
    pub date_conducted: DateTime<Utc>,
    pub result: String,
}

impl HearingTestForm {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            editing: None,
            tester_name: String::new(),
            date_conducted: now,
            result: String::new(),
        }
    }

    /// Empty create form dated `now`
    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::new(now);
    }

    pub fn load_from_view(&mut self, view: &HearingTestView) {
        self.editing = Some(view.id);
        self.tester_name = view.tester_name.clone();
        self.date_conducted = view.date_conducted;
        self.result = view.result.clone();
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_id(&self) -> Option<HearingTestId> {
        self.editing
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit_mode() {
            "Edit Hearing Test"
        } else {
            "New Hearing Test"
        }
    }

    /// Trimmed request, or every issue found
    pub fn validate(&self, now: DateTime<Utc>) -> Result<HearingTestRequest, Vec<FormIssue>> {
        let tester_name = self.tester_name.trim();
        let result = self.result.trim();
        let mut issues = Vec::new();

        let name_chars = tester_name.chars().count();
        if name_chars < TESTER_NAME_MIN_CHARS {
            issues.push(FormIssue::TesterNameTooShort);
        } else if name_chars > TESTER_NAME_MAX_CHARS {
            issues.push(FormIssue::TesterNameTooLong);
        }

        if self.date_conducted > now {
            issues.push(FormIssue::DateInFuture);
        }

        let result_chars = result.chars().count();
        if result_chars < RESULT_MIN_CHARS {
            issues.push(FormIssue::ResultTooShort);
        } else if result_chars > RESULT_MAX_CHARS {
            issues.push(FormIssue::ResultTooLong);
        }

        if !issues.is_empty() {
            return Err(issues);
        }

        Ok(HearingTestRequest {
            tester_name: tester_name.to_string(),
            date_conducted: self.date_conducted,
            result: result.to_string(),
        })
    }
}

/// List/form state driven by a front end
pub struct HearingTestsPresenter<G> {
    client: HearingTestClient<G>,
    items: Vec<HearingTestItem>,
    form: HearingTestForm,
    mode: Mode,
    status: String,
    is_loading: bool,
    history: NavigationHistory,
    issued: u64,
    applied: u64,
    clock: fn() -> DateTime<Utc>,
}

impl<G: DataGateway> HearingTestsPresenter<G> {
    pub fn new(client: HearingTestClient<G>) -> Self {
        let clock = audisense_common::time::now;
        Self {
            client,
            items: Vec::new(),
            form: HearingTestForm::new(clock()),
            mode: Mode::ViewingList,
            status: READY.to_string(),
            is_loading: false,
            history: NavigationHistory::new(),
            issued: 0,
            applied: 0,
            clock,
        }
    }

    /// Replace the time source used for form defaults and the future-date check
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self.form.reset(clock());
        self
    }

    pub fn client(&self) -> &HearingTestClient<G> {
        &self.client
    }

    pub fn items(&self) -> &[HearingTestItem] {
        &self.items
    }

    pub fn form(&self) -> &HearingTestForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut HearingTestForm {
        &mut self.form
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn find(&self, id: HearingTestId) -> Option<&HearingTestItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        debug!("Status: {}", self.status);
    }

    fn enter_list_mode(&mut self) {
        self.mode = Mode::ViewingList;
        self.history.unwind_forms();
        if self.history.current() != Some(ViewId::HearingTests) {
            self.history.navigate_to(ViewId::HearingTests);
        }
    }

    fn open_form(&mut self, view: ViewId) {
        self.history.unwind_forms();
        if self.history.current().is_none() {
            self.history.navigate_to(ViewId::HearingTests);
        }
        self.history.navigate_to(view);
    }

    /// Switch to the list and reload it; whether the load succeeded
    pub async fn show_list(&mut self) -> bool {
        let ticket = self.begin_show_list();
        let result = self.client.list().await;
        matches!(
            self.apply_list_load(ticket, result),
            LoadOutcome::Applied { .. }
        )
    }

    /// Switch to the list view with a load in flight
    ///
    /// The caller fetches the list and hands it to [`Self::apply_list_load`],
    /// and can render the loading state in between.
    pub fn begin_show_list(&mut self) -> LoadTicket {
        self.enter_list_mode();
        self.begin_list_load()
    }

    /// Mark a list load as in flight
    pub fn begin_list_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.is_loading = true;
        self.set_status("Loading hearing tests...");
        LoadTicket(self.issued)
    }

    /// Apply the result of the load identified by `ticket`
    pub fn apply_list_load(
        &mut self,
        ticket: LoadTicket,
        result: Option<Vec<HearingTestView>>,
    ) -> LoadOutcome {
        if ticket.0 <= self.applied {
            debug!(
                "Dropping list load {} (load {} already applied)",
                ticket.0, self.applied
            );
            return LoadOutcome::Stale;
        }
        self.applied = ticket.0;
        if ticket.0 == self.issued {
            self.is_loading = false;
        }

        match result {
            Some(views) => {
                let mut items: Vec<HearingTestItem> =
                    views.into_iter().map(HearingTestItem::from).collect();
                items.sort_by(|a, b| b.date_conducted().cmp(&a.date_conducted()));
                let count = items.len();
                self.items = items;
                info!("Loaded {} hearing tests", count);
                self.set_status(format!("Loaded {} hearing tests", count));
                LoadOutcome::Applied { count }
            }
            None => {
                warn!("Failed to load hearing tests");
                self.set_status("Failed to load hearing tests");
                LoadOutcome::Failed
            }
        }
    }

    pub fn begin_create(&mut self) {
        let now = self.now();
        self.form.reset(now);
        self.mode = Mode::Creating;
        self.open_form(ViewId::NewHearingTest);
        self.set_status("Creating new hearing test");
    }

    /// Open the edit form for a loaded record; `false` if it is not in the list
    pub fn begin_edit(&mut self, id: HearingTestId) -> bool {
        let Some(view) = self.find(id).map(|item| item.view().clone()) else {
            warn!("Hearing test {} is not in the loaded list", id);
            self.set_status(format!("Hearing test {} not found", id));
            return false;
        };

        self.form.load_from_view(&view);
        self.mode = Mode::Editing(id);
        self.open_form(ViewId::EditHearingTest);
        self.set_status(format!("Editing hearing test for {}", view.tester_name));
        true
    }

    /// Save or cancel the open form
    ///
    /// Returns whether the form was closed. A failed save keeps the form open
    /// with its contents intact.
    pub async fn submit(&mut self, action: FormAction) -> bool {
        if self.mode == Mode::ViewingList {
            warn!("{:?} ignored: no form is open", action);
            return false;
        }

        match action {
            FormAction::Cancel => {
                info!("Form cancelled");
                let now = self.now();
                self.form.reset(now);
                self.enter_list_mode();
                self.set_status(READY);
                true
            }
            FormAction::Save => self.save().await,
        }
    }

    async fn save(&mut self) -> bool {
        let request = match self.form.validate(self.now()) {
            Ok(request) => request,
            Err(issues) => {
                let issues: Vec<String> = issues.iter().map(ToString::to_string).collect();
                self.set_status(format!("Please fix: {}", issues.join("; ")));
                return false;
            }
        };

        let success = match self.mode {
            Mode::Creating => {
                self.set_status("Creating hearing test...");
                let created = self.client.create(&request).await;
                if created.is_none() {
                    self.set_status("Failed to create hearing test");
                    return false;
                }
                "Hearing test created successfully"
            }
            Mode::Editing(id) => {
                self.set_status("Updating hearing test...");
                let updated = self.client.update(id, &request).await;
                if updated.is_none() {
                    self.set_status("Failed to update hearing test");
                    return false;
                }
                "Hearing test updated successfully"
            }
            Mode::ViewingList => return false,
        };

        let now = self.now();
        self.form.reset(now);
        if self.show_list().await {
            self.set_status(success);
        }
        true
    }

    /// Delete a loaded record; on success it is removed from the list
    pub async fn delete(&mut self, id: HearingTestId) -> bool {
        let Some(name) = self.find(id).map(|item| item.tester_name().to_string()) else {
            self.set_status(format!("Hearing test {} not found", id));
            return false;
        };

        self.set_status(format!("Deleting hearing test for {}...", name));
        if self.client.delete(id).await {
            self.items.retain(|item| item.id() != id);
            self.set_status("Hearing test deleted successfully");
            true
        } else {
            self.set_status("Failed to delete hearing test");
            false
        }
    }

    /// Go to the previous view; leaving a form discards it
    pub fn navigate_back(&mut self) -> Option<ViewId> {
        let view = self.history.back()?;
        if view == ViewId::HearingTests && self.mode != Mode::ViewingList {
            let now = self.now();
            self.form.reset(now);
            self.mode = Mode::ViewingList;
            self.set_status(READY);
        }
        Some(view)
    }
}
