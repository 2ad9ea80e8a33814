use super::criteria::FilterCriteria;
use crate::catalog::Offer;

/// Whether `offer` satisfies every active constraint in `criteria`.
pub fn matches(offer: &Offer, criteria: &FilterCriteria) -> bool {
    matches_search(offer, criteria.trimmed_query())
        && matches_category(offer, criteria)
        && matches_window(offer, criteria)
        && matches_requirements(offer, criteria)
}

fn matches_search(offer: &Offer, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    contains(offer.name.as_str())
        || contains(offer.description.as_str())
        || offer.types.iter().any(|tag| contains(tag.as_str()))
        || contains(offer.offer.title.as_str())
}

fn matches_category(offer: &Offer, criteria: &FilterCriteria) -> bool {
    criteria.selected_categories.is_empty()
        || criteria.selected_categories.contains(&offer.category)
}

fn matches_window(offer: &Offer, criteria: &FilterCriteria) -> bool {
    criteria.selected_redemption_windows.is_empty()
        || criteria
            .selected_redemption_windows
            .contains(&offer.redemption_window)
}

fn matches_requirements(offer: &Offer, criteria: &FilterCriteria) -> bool {
    let filter = &criteria.requirements;
    let requirements = &offer.requirements;

    if filter.no_app_required && requirements.requires_app {
        return false;
    }
    if filter.no_email_required && requirements.requires_email {
        return false;
    }
    if filter.easy_only && !requirements.is_easy() {
        return false;
    }

    true
}
