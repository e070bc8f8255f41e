//! Record lifecycle coordinator
//!
//! Drives search, delete and create flows against the remote UI using only
//! wait-then-act steps. Every step suspends on the UI port; nothing here runs
//! concurrently, and a coordinator must own its session exclusively.
//!
//! Failures from the UI port are logged and returned wrapped in
//! [`SyncError::Operation`], so the caller sees which flow and which record
//! failed while [`SyncError::kind`] still reports the underlying cause.

use std::sync::Arc;
use std::time::Duration;

use statesync_domain::constants::DEFAULT_CUSTOM_WAIT_MS;
use statesync_domain::{
    CleanupOutcome, RecordKey, RecordLocation, Result, SearchOutcome, SyncError, UiConfig,
};
use tracing::{error, info, instrument, warn};

use super::locators::PimLocators;
use crate::polling::PollPolicy;
use crate::ui::{ElementRef, Selector, UiHandle};

/// Search, delete and create flows for PIM employee records.
///
/// Holds the UI session, the locator set, the visible/hidden wait ceiling
/// and the row-count polling policy.
pub struct RecordLifecycleCoordinator {
    ui: Arc<dyn UiHandle>,
    locators: PimLocators,
    custom_wait: Duration,
    poll: PollPolicy,
}

impl RecordLifecycleCoordinator {
    /// Coordinator with the OrangeHRM locators and default waits.
    pub fn new(ui: Arc<dyn UiHandle>) -> Self {
        Self {
            ui,
            locators: PimLocators::default(),
            custom_wait: Duration::from_millis(DEFAULT_CUSTOM_WAIT_MS),
            poll: PollPolicy::default(),
        }
    }

    /// Build a coordinator with the wait budget and row-count policy from
    /// `config`.
    ///
    /// # Errors
    /// Returns `SyncError::InvalidArgument` when the row-count policy has no
    /// attempts.
    pub fn from_config(ui: Arc<dyn UiHandle>, config: &UiConfig) -> Result<Self> {
        Ok(Self::new(ui)
            .with_custom_wait(config.custom_wait())
            .with_poll_policy(PollPolicy::try_from(config)?))
    }

    /// Replace the locator set, e.g. for a differently labelled deployment.
    pub fn with_locators(mut self, locators: PimLocators) -> Self {
        self.locators = locators;
        self
    }

    /// Ceiling for every visible/hidden wait.
    pub fn with_custom_wait(mut self, custom_wait: Duration) -> Self {
        self.custom_wait = custom_wait;
        self
    }

    /// Row-count polling used by searches.
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Locators in use.
    pub fn locators(&self) -> &PimLocators {
        &self.locators
    }

    /// Search for `key` through the `sub_menu` link.
    ///
    /// One row is [`SearchOutcome::Found`] at row 0, no rows (after the poll
    /// budget) is `NotFound`, and more than one row is `Ambiguous`.
    ///
    /// # Errors
    /// - `InvalidArgument` for a blank sub-menu, before any UI call
    /// - `Navigation` when the sub-menu link never becomes visible
    /// - `ElementNotReady` when the filter, search button or results table
    ///   does not reach its expected state
    /// - driver errors, wrapped with the record name
    #[instrument(skip_all, fields(record = %key.full_name(), sub_menu = %sub_menu))]
    pub async fn search(&self, key: &RecordKey, sub_menu: &str) -> Result<SearchOutcome> {
        let link = self.sub_menu_link(sub_menu)?;
        let full_name = key.full_name();

        let outcome = self.run_search(link, &full_name).await.map_err(|err| {
            error!(error = %err, record = %full_name, "Error during record search");
            err.context("search", full_name.as_str())
        })?;

        match outcome {
            SearchOutcome::Found(_) => info!(record = %full_name, "Record found in the search results"),
            SearchOutcome::NotFound => {
                info!(record = %full_name, "Record NOT found in the search results")
            }
            SearchOutcome::Ambiguous { count } => {
                warn!(record = %full_name, count, "Search matched more than one record")
            }
        }

        Ok(outcome)
    }

    /// Boolean form of [`Self::search`]: `true` only for exactly one match.
    ///
    /// # Errors
    /// `InvalidArgument` for blank names, otherwise see [`Self::search`].
    pub async fn search_by_name(
        &self,
        first_name: &str,
        last_name: &str,
        sub_menu: &str,
    ) -> Result<bool> {
        let key = RecordKey::new(first_name, last_name).map_err(|err| {
            error!(error = %err, "Search aborted");
            err
        })?;
        Ok(self.search(&key, sub_menu).await?.is_found())
    }

    async fn run_search(&self, link: Selector, full_name: &str) -> Result<SearchOutcome> {
        self.navigate(link).await?;

        info!(record = %full_name, "Entering record name in search box");
        let name_filter = self.ui.locate(self.locators.name_filter.clone());
        self.expect_visible(&name_filter).await?;
        self.ui.type_text(&name_filter, full_name).await?;

        info!("Clicking on Search button");
        let search_button = self.ui.locate(self.locators.search_button.clone());
        self.expect_visible(&search_button).await?;
        self.ui.click(&search_button).await?;

        info!("Waiting for search results to load");
        let table = self.ui.locate(self.locators.results_table.clone());
        if !self.ui.is_attached(&table, self.custom_wait).await? {
            return Err(not_ready(&table, "attached", self.custom_wait));
        }

        let rows = self.ui.locate(self.locators.rows.clone());
        let count = self.poll.poll_until_nonzero(|_| self.ui.count(&rows)).await?;
        info!(record = %full_name, count, "Number of records found");

        Ok(SearchOutcome::from_row_count(count))
    }

    /// Delete the row at `location` through its `action_position`th action
    /// button, then wait for the confirmation prompt to close.
    ///
    /// # Errors
    /// - `ElementNotReady` when the confirmation prompt never appears
    /// - `DeleteNotConfirmed` when it never hides within the wait budget;
    ///   this is not retried
    /// - driver errors, wrapped with the row index
    #[instrument(skip(self), fields(row_index = location.row_index))]
    pub async fn delete_row(&self, location: RecordLocation, action_position: usize) -> Result<()> {
        info!("Initiating delete action for the row");

        self.run_delete(location, action_position).await.map_err(|err| {
            error!(error = %err, "Error while deleting the row");
            err.context("delete_row", format!("row {}", location.row_index))
        })?;

        info!("Row deleted successfully");
        Ok(())
    }

    async fn run_delete(&self, location: RecordLocation, action_position: usize) -> Result<()> {
        let action = self.ui.locate(self.locators.row_action(location.row_index, action_position));
        self.ui.click(&action).await?;

        info!("Waiting for delete confirmation prompt");
        let prompt = self.ui.locate(self.locators.confirm_prompt.clone());
        self.expect_visible(&prompt).await?;

        info!("Confirming deletion");
        let confirm = self.ui.locate(self.locators.confirm_button.clone());
        self.ui.click(&confirm).await?;

        self.ui.wait_for_network_idle().await?;

        info!("Waiting for delete confirmation prompt to be hidden");
        if !self.ui.is_hidden(&prompt, self.custom_wait).await? {
            return Err(SyncError::DeleteNotConfirmed {
                row_index: location.row_index,
                timeout: self.custom_wait,
            });
        }

        Ok(())
    }

    /// Make sure no record named `key` exists.
    ///
    /// Safe to call unconditionally: a missing record is a no-op, and a
    /// second call after a successful delete finds nothing. Ambiguous matches
    /// are left alone.
    ///
    /// # Errors
    /// See [`Self::search`] and [`Self::delete_row`].
    #[instrument(skip_all, fields(record = %key.full_name()))]
    pub async fn ensure_deleted(
        &self,
        key: &RecordKey,
        sub_menu: &str,
        action_position: usize,
    ) -> Result<CleanupOutcome> {
        let outcome = match self.search(key, sub_menu).await? {
            SearchOutcome::Found(location) => {
                info!("Record already exists, deleting it for a clean state");
                self.delete_row(location, action_position).await?;
                CleanupOutcome::Deleted
            }
            SearchOutcome::NotFound => {
                info!("Record does not exist, skipping the deletion");
                CleanupOutcome::AlreadyAbsent
            }
            SearchOutcome::Ambiguous { count } => {
                warn!(count, "Several records match, skipping the deletion");
                CleanupOutcome::SkippedAmbiguous
            }
        };

        Ok(outcome)
    }

    /// Fill in and submit the creation form.
    ///
    /// Returns once the save request has started: `true` when the loading
    /// indicator became visible within the wait budget. The call does not
    /// wait for the save to finish.
    ///
    /// # Errors
    /// `InvalidArgument` for a blank sub-menu, otherwise navigation and
    /// driver errors wrapped with the record name.
    #[instrument(skip_all, fields(record = %key.full_name(), sub_menu = %sub_menu))]
    pub async fn create_record(&self, key: &RecordKey, sub_menu: &str) -> Result<bool> {
        let link = self.sub_menu_link(sub_menu)?;
        let full_name = key.full_name();

        self.run_create(link, key).await.map_err(|err| {
            error!(error = %err, record = %full_name, "Error while creating record");
            err.context("create_record", full_name.as_str())
        })
    }

    async fn run_create(&self, link: Selector, key: &RecordKey) -> Result<bool> {
        self.navigate(link).await?;

        info!("Entering first and last name");
        let first_name = self.ui.locate(self.locators.first_name_input.clone());
        self.ui.type_text(&first_name, key.first_name()).await?;
        let last_name = self.ui.locate(self.locators.last_name_input.clone());
        self.ui.type_text(&last_name, key.last_name()).await?;

        info!("Clicking on Save button");
        let save = self.ui.locate(self.locators.save_button.clone());
        self.ui.click(&save).await?;

        let spinner = self.ui.locate(self.locators.loading_indicator.clone());
        let observed = self.ui.is_visible(&spinner, self.custom_wait).await?;
        if observed {
            info!("Save in progress");
        } else {
            warn!(timeout = ?self.custom_wait, "Loading indicator was not observed after save");
        }

        Ok(observed)
    }

    /// Compare the page heading with `expected` (both trimmed).
    ///
    /// # Errors
    /// `InvalidArgument` for a blank `expected`; `ElementNotReady` when the
    /// heading never becomes visible.
    #[instrument(skip(self))]
    pub async fn expect_page_header(&self, expected: &str) -> Result<bool> {
        if expected.trim().is_empty() {
            let err = SyncError::InvalidArgument(format!("Invalid pageHeader provided: '{expected}'"));
            error!(error = %err, "Page header check aborted");
            return Err(err);
        }

        let header = self.ui.locate(self.locators.header.clone());
        let actual = async {
            self.expect_visible(&header).await?;
            self.ui.text(&header).await
        }
        .await
        .map_err(|err| {
            error!(error = %err, "Error while verifying page header");
            err.context("expect_page_header", expected)
        })?;

        let actual = actual.trim();
        let expected = expected.trim();
        info!(actual, expected, "Comparing page header");

        let matches = actual == expected;
        if matches {
            info!("Page header matches the expected value");
        } else {
            warn!("Page header does NOT match the expected value");
        }

        Ok(matches)
    }

    fn sub_menu_link(&self, sub_menu: &str) -> Result<Selector> {
        self.locators.sub_menu_link(sub_menu).map_err(|err| {
            error!(error = %err, "Sub-menu link could not be resolved");
            err
        })
    }

    async fn navigate(&self, link: Selector) -> Result<()> {
        let element = self.ui.locate(link);
        info!(link = %element, "Navigating to sub-menu");

        if !self.ui.is_visible(&element, self.custom_wait).await? {
            return Err(SyncError::Navigation {
                link: element.to_string(),
                reason: format!("link was not visible within {:?}", self.custom_wait),
            });
        }
        self.ui.click(&element).await?;

        info!(link = %element, "Navigated to sub-menu");
        Ok(())
    }

    async fn expect_visible(&self, element: &ElementRef) -> Result<()> {
        if self.ui.is_visible(element, self.custom_wait).await? {
            Ok(())
        } else {
            Err(not_ready(element, "visible", self.custom_wait))
        }
    }
}

fn not_ready(element: &ElementRef, state: &str, timeout: Duration) -> SyncError {
    SyncError::ElementNotReady { element: element.to_string(), state: state.to_string(), timeout }
}

#[cfg(test)]
mod tests {
    use statesync_domain::ErrorKind;

    use super::*;
    use crate::testing::{ScriptedUi, UiCall};

    const SUB_MENU: &str = "Employee List";

    fn key() -> RecordKey {
        RecordKey::new("Jane", "Doe").unwrap()
    }

    fn coordinator(ui: &Arc<ScriptedUi>) -> RecordLifecycleCoordinator {
        RecordLifecycleCoordinator::new(ui.clone()).with_custom_wait(Duration::from_millis(50))
    }

    fn rows() -> Selector {
        PimLocators::default().rows
    }

    fn confirm_button() -> Selector {
        PimLocators::default().confirm_button
    }

    #[tokio::test]
    async fn single_row_is_found() {
        let ui = Arc::new(ScriptedUi::new());
        ui.script_counts(rows(), [1]);

        assert!(coordinator(&ui).search_by_name("Jane", "Doe", SUB_MENU).await.unwrap());
        assert_eq!(ui.count_calls(&rows()), 1);
    }

    #[tokio::test]
    async fn zero_rows_on_every_attempt_is_not_found() {
        let ui = Arc::new(ScriptedUi::new());
        ui.script_counts(rows(), [0, 0, 0]);

        assert!(!coordinator(&ui).search_by_name("Jane", "Doe", SUB_MENU).await.unwrap());
        assert_eq!(ui.count_calls(&rows()), 3);
    }

    #[tokio::test]
    async fn late_rows_are_picked_up_by_the_poll() {
        let ui = Arc::new(ScriptedUi::new());
        ui.script_counts(rows(), [0, 0, 1]);

        assert!(coordinator(&ui).search_by_name("Jane", "Doe", SUB_MENU).await.unwrap());
        assert_eq!(ui.count_calls(&rows()), 3);
    }

    #[tokio::test]
    async fn poll_stops_at_first_nonzero_count() {
        let ui = Arc::new(ScriptedUi::new());
        ui.script_counts(rows(), [0, 1, 1]);

        coordinator(&ui).search(&key(), SUB_MENU).await.unwrap();

        assert_eq!(ui.count_calls(&rows()), 2);
    }

    #[tokio::test]
    async fn several_rows_are_ambiguous() {
        let ui = Arc::new(ScriptedUi::new());
        ui.script_counts(rows(), [2]);

        let outcome = coordinator(&ui).search(&key(), SUB_MENU).await.unwrap();

        assert_eq!(outcome, SearchOutcome::Ambiguous { count: 2 });
        assert!(!coordinator(&ui).search_by_name("Jane", "Doe", SUB_MENU).await.unwrap());
    }

    #[tokio::test]
    async fn search_types_full_name_and_clicks_search() {
        let ui = Arc::new(ScriptedUi::new());
        ui.script_counts(rows(), [1]);
        let locators = PimLocators::default();

        coordinator(&ui).search(&key(), SUB_MENU).await.unwrap();

        let calls = ui.calls();
        let link = locators.sub_menu_link(SUB_MENU).unwrap();
        assert!(calls.contains(&UiCall::Click(link)));
        assert!(calls.contains(&UiCall::TypeText(locators.name_filter.clone(), "Jane Doe".into())));
        assert!(calls.contains(&UiCall::Click(locators.search_button.clone())));
        assert!(calls.contains(&UiCall::IsAttached(locators.results_table.clone())));
    }

    #[tokio::test]
    async fn blank_arguments_fail_before_touching_the_ui() {
        let ui = Arc::new(ScriptedUi::new());
        let coordinator = coordinator(&ui);

        for (first, last, sub_menu) in [("", "Doe", SUB_MENU), ("Jane", " ", SUB_MENU), ("Jane", "Doe", "")] {
            let err = coordinator.search_by_name(first, last, sub_menu).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert!(ui.calls().is_empty());
    }

    #[tokio::test]
    async fn hidden_sub_menu_link_is_a_navigation_error() {
        let ui = Arc::new(ScriptedUi::new());
        ui.hide(PimLocators::default().sub_menu_link(SUB_MENU).unwrap());

        let err = coordinator(&ui).search(&key(), SUB_MENU).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Navigation);
        assert!(err.to_string().contains("search failed for 'Jane Doe'"));
    }

    #[tokio::test]
    async fn detached_results_table_is_not_ready() {
        let ui = Arc::new(ScriptedUi::new());
        ui.detach(PimLocators::default().results_table);

        let err = coordinator(&ui).search(&key(), SUB_MENU).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ElementNotReady);
        assert_eq!(ui.count_calls(&rows()), 0);
    }

    #[tokio::test]
    async fn driver_failure_is_wrapped_with_context() {
        let ui = Arc::new(ScriptedUi::new());
        ui.fail_on(PimLocators::default().search_button, "target closed");

        let err = coordinator(&ui).search(&key(), SUB_MENU).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Driver);
        assert!(err.to_string().contains("target closed"));
    }

    #[tokio::test]
    async fn delete_row_clicks_action_then_confirms() {
        let ui = Arc::new(ScriptedUi::new());
        let locators = PimLocators::default();

        coordinator(&ui).delete_row(RecordLocation::new(0), 1).await.unwrap();

        let calls = ui.calls();
        assert_eq!(calls[0], UiCall::Click(locators.row_action(0, 1)));
        assert!(calls.contains(&UiCall::Click(locators.confirm_button.clone())));
        assert!(calls.contains(&UiCall::NetworkIdle));
        assert_eq!(calls.last(), Some(&UiCall::IsHidden(locators.confirm_prompt.clone())));
    }

    #[tokio::test]
    async fn stuck_confirmation_is_delete_not_confirmed() {
        let ui = Arc::new(ScriptedUi::new());
        ui.stick(PimLocators::default().confirm_prompt);

        let err = coordinator(&ui).delete_row(RecordLocation::new(0), 1).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DeleteNotConfirmed);
        assert!(err.to_string().starts_with("delete_row failed for 'row 0'"));
        assert_eq!(ui.clicks(&confirm_button()), 1);
    }

    #[tokio::test]
    async fn missing_confirmation_prompt_is_not_ready() {
        let ui = Arc::new(ScriptedUi::new());
        ui.hide(PimLocators::default().confirm_prompt);

        let err = coordinator(&ui).delete_row(RecordLocation::new(0), 1).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ElementNotReady);
        assert_eq!(ui.clicks(&confirm_button()), 0);
    }

    #[tokio::test]
    async fn ensure_deleted_is_idempotent() {
        let ui = Arc::new(ScriptedUi::new());
        ui.script_counts(rows(), [1]);
        ui.on_click_set_count(confirm_button(), rows(), 0);
        let coordinator = coordinator(&ui);

        let first = coordinator.ensure_deleted(&key(), SUB_MENU, 1).await.unwrap();
        let second = coordinator.ensure_deleted(&key(), SUB_MENU, 1).await.unwrap();

        assert_eq!(first, CleanupOutcome::Deleted);
        assert_eq!(second, CleanupOutcome::AlreadyAbsent);
        assert_eq!(ui.clicks(&confirm_button()), 1);
    }

    #[tokio::test]
    async fn ensure_deleted_leaves_ambiguous_matches_alone() {
        let ui = Arc::new(ScriptedUi::new());
        ui.script_counts(rows(), [3]);

        let outcome = coordinator(&ui).ensure_deleted(&key(), SUB_MENU, 1).await.unwrap();

        assert_eq!(outcome, CleanupOutcome::SkippedAmbiguous);
        assert_eq!(ui.clicks(&confirm_button()), 0);
    }

    #[tokio::test]
    async fn create_record_fills_form_and_observes_spinner() {
        let ui = Arc::new(ScriptedUi::new());
        let locators = PimLocators::default();

        let observed = coordinator(&ui).create_record(&key(), "Add Employee").await.unwrap();

        assert!(observed);
        let calls = ui.calls();
        assert!(calls.contains(&UiCall::TypeText(locators.first_name_input.clone(), "Jane".into())));
        assert!(calls.contains(&UiCall::TypeText(locators.last_name_input.clone(), "Doe".into())));
        assert!(calls.contains(&UiCall::Click(locators.save_button.clone())));
        assert!(!calls.contains(&UiCall::IsHidden(locators.loading_indicator.clone())));
    }

    #[tokio::test]
    async fn create_record_reports_missing_spinner() {
        let ui = Arc::new(ScriptedUi::new());
        ui.hide(PimLocators::default().loading_indicator);

        assert!(!coordinator(&ui).create_record(&key(), "Add Employee").await.unwrap());
    }

    #[tokio::test]
    async fn create_record_hidden_sub_menu_is_a_navigation_error() {
        let ui = Arc::new(ScriptedUi::new());
        let locators = PimLocators::default();
        ui.hide(locators.sub_menu_link("Add Employee").unwrap());

        let err = coordinator(&ui).create_record(&key(), "Add Employee").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Navigation);
        assert!(err.to_string().starts_with("create_record failed for 'Jane Doe'"));
        assert_eq!(ui.clicks(&locators.save_button), 0);
    }

    #[tokio::test]
    async fn create_record_save_failure_is_wrapped_with_record_name() {
        let ui = Arc::new(ScriptedUi::new());
        let locators = PimLocators::default();
        ui.fail_on(locators.save_button.clone(), "target closed");

        let err = coordinator(&ui).create_record(&key(), "Add Employee").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Driver);
        let message = err.to_string();
        assert!(message.starts_with("create_record failed for 'Jane Doe'"));
        assert!(message.contains("target closed"));
        assert!(!ui.calls().contains(&UiCall::IsVisible(locators.loading_indicator.clone())));
    }

    #[tokio::test]
    async fn page_header_is_compared_trimmed() {
        let ui = Arc::new(ScriptedUi::new());
        ui.set_text(PimLocators::default().header, "  PIM \n");
        let coordinator = coordinator(&ui);

        assert!(coordinator.expect_page_header("PIM").await.unwrap());
        assert!(!coordinator.expect_page_header("Admin").await.unwrap());
        assert_eq!(
            coordinator.expect_page_header(" ").await.unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[tokio::test]
    async fn from_config_applies_poll_budget() {
        let ui = Arc::new(ScriptedUi::new());
        ui.script_counts(rows(), [0]);
        let config = UiConfig { row_count_attempts: 5, ..UiConfig::default() };
        let coordinator = RecordLifecycleCoordinator::from_config(ui.clone(), &config).unwrap();

        coordinator.search(&key(), SUB_MENU).await.unwrap();

        assert_eq!(ui.count_calls(&rows()), 5);
    }
}
