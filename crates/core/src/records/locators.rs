//! Selectors for the record-management page

use statesync_domain::{Result, SyncError};

use crate::ui::{Selector, TextMatch};

const NAME_FILTER_XPATH: &str = "//div[@class = 'oxd-table-filter-area']/form/div[1]/div[1]/div[1]/div[1]/div[2]/div[1]/div[1]/input";

/// Static selectors used by [`super::RecordLifecycleCoordinator`].
///
/// `Default` targets the OrangeHRM PIM screen. Override single fields with
/// struct update syntax when a page differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PimLocators {
    pub header: Selector,
    pub name_filter: Selector,
    pub search_button: Selector,
    pub results_table: Selector,
    /// Row cards inside [`PimLocators::results_table`].
    pub rows: Selector,
    /// Action-button group inside one row.
    pub row_actions: Selector,
    pub confirm_prompt: Selector,
    pub confirm_button: Selector,
    pub first_name_input: Selector,
    pub last_name_input: Selector,
    pub save_button: Selector,
    pub loading_indicator: Selector,
}

impl Default for PimLocators {
    fn default() -> Self {
        let results_table =
            Selector::css(".orangehrm-container").then(Selector::css(".oxd-table-body"));

        Self {
            header: Selector::role("heading", TextMatch::Exact("PIM".into())),
            name_filter: Selector::xpath(NAME_FILTER_XPATH),
            search_button: Selector::role("button", TextMatch::Exact("Search".into())),
            rows: results_table.clone().then(Selector::css(".oxd-table-card")),
            results_table,
            row_actions: Selector::css(".oxd-table-cell-actions").then(Selector::css("button")),
            confirm_prompt: Selector::text(TextMatch::Exact("Are you Sure?".into())),
            confirm_button: Selector::role("button", TextMatch::Pattern(r"(?i)yes,\s*delete".into())),
            first_name_input: Selector::role("textbox", TextMatch::Exact("First Name".into())),
            last_name_input: Selector::role("textbox", TextMatch::Exact("Last Name".into())),
            save_button: Selector::role("button", TextMatch::Exact("Save".into())),
            loading_indicator: Selector::css(".oxd-loading-spinner"),
        }
    }
}

impl PimLocators {
    /// Link in the sub-menu, matched by exact, case-sensitive text.
    ///
    /// # Errors
    /// Returns `SyncError::InvalidArgument` for blank text.
    pub fn sub_menu_link(&self, text: &str) -> Result<Selector> {
        if text.trim().is_empty() {
            return Err(SyncError::InvalidArgument(format!(
                "Invalid subMenuText provided: '{text}'"
            )));
        }
        Ok(Selector::role("link", TextMatch::Exact(text.to_string())))
    }

    /// The `action_position`th action button of the `row_index`th row.
    pub fn row_action(&self, row_index: usize, action_position: usize) -> Selector {
        self.rows.clone().nth(row_index).then(self.row_actions.clone().nth(action_position))
    }
}
