mod criteria;
mod predicate;
mod sort;
mod view;

pub use criteria::{BrowseState, FilterCriteria, RequirementFlag, RequirementsFilter, SortKey};
pub use predicate::matches;
pub use sort::{compare_names, sort_offers, sort_saved, SavedSortKey};
pub use view::FilteredView;
