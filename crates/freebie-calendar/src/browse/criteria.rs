use crate::catalog::{Category, RedemptionWindow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequirementsFilter {
    #[serde(default)]
    pub no_app_required: bool,
    #[serde(default)]
    pub no_email_required: bool,
    /// No app and no advance signup.
    #[serde(default)]
    pub easy_only: bool,
}

impl RequirementsFilter {
    pub const fn any(&self) -> bool {
        self.no_app_required || self.no_email_required || self.easy_only
    }

    fn flag_mut(&mut self, flag: RequirementFlag) -> &mut bool {
        match flag {
            RequirementFlag::NoAppRequired => &mut self.no_app_required,
            RequirementFlag::NoEmailRequired => &mut self.no_email_required,
            RequirementFlag::EasyOnly => &mut self.easy_only,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementFlag {
    NoAppRequired,
    NoEmailRequired,
    EasyOnly,
}

/// User-editable filter constraints. Empty sets mean "no constraint".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub selected_categories: BTreeSet<Category>,
    #[serde(default)]
    pub selected_redemption_windows: BTreeSet<RedemptionWindow>,
    #[serde(default)]
    pub requirements: RequirementsFilter,
}

impl FilterCriteria {
    pub fn trimmed_query(&self) -> &str {
        self.search_query.trim()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.trimmed_query().is_empty()
            || !self.selected_categories.is_empty()
            || !self.selected_redemption_windows.is_empty()
            || self.requirements.any()
    }

    /// Badge count: one per active non-search constraint.
    pub fn active_filter_count(&self) -> usize {
        [
            !self.selected_categories.is_empty(),
            !self.selected_redemption_windows.is_empty(),
            self.requirements.no_app_required,
            self.requirements.no_email_required,
            self.requirements.easy_only,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.selected_categories.remove(&category) {
            self.selected_categories.insert(category);
        }
    }

    pub fn clear_categories(&mut self) {
        self.selected_categories.clear();
    }

    pub fn toggle_redemption_window(&mut self, window: RedemptionWindow) {
        if !self.selected_redemption_windows.remove(&window) {
            self.selected_redemption_windows.insert(window);
        }
    }

    pub fn clear_redemption_windows(&mut self) {
        self.selected_redemption_windows.clear();
    }

    pub fn toggle_requirement(&mut self, flag: RequirementFlag) {
        let value = self.requirements.flag_mut(flag);
        *value = !*value;
    }

    pub fn clear_requirements(&mut self) {
        self.requirements = RequirementsFilter::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Popularity,
    Name,
    Recent,
    Deadline,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popularity => "Most popular",
            Self::Name => "Name (A-Z)",
            Self::Recent => "Recently verified",
            Self::Deadline => "Signup deadline",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "popularity" | "popular" => Some(Self::Popularity),
            "name" => Some(Self::Name),
            "recent" => Some(Self::Recent),
            "deadline" => Some(Self::Deadline),
            _ => None,
        }
    }
}

/// Session state behind the explore screen: filters plus sort order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrowseState {
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(default)]
    pub sort_by: SortKey,
}

impl BrowseState {
    pub fn set_sort(&mut self, sort_by: SortKey) {
        self.sort_by = sort_by;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
