use freebie_calendar::browse::{BrowseState, FilteredView, RequirementFlag, SortKey};
use freebie_calendar::catalog::{Catalog, Category, Offer, RedemptionWindow};

fn bundled() -> Catalog {
    Catalog::bundled().expect("bundled catalog parses")
}

fn ids(offers: &[&Offer]) -> Vec<String> {
    offers.iter().map(|offer| offer.id.to_string()).collect()
}

#[test]
fn default_state_lists_everything_by_popularity() {
    let catalog = bundled();
    let view = FilteredView::compose(&catalog, &BrowseState::default());

    assert_eq!(view.result_count, catalog.len());
    assert_eq!(view.total_count, catalog.len());
    assert!(!view.has_active_filters);
    assert_eq!(view.active_filter_count, 0);
    assert_eq!(
        ids(&view.offers[..3]),
        vec!["starbucks-birthday", "tim-hortons-birthday", "chatime-birthday"]
    );
    assert!(view
        .offers
        .windows(2)
        .all(|pair| pair[0].popularity >= pair[1].popularity));
}

#[test]
fn category_and_no_app_filters_combine() {
    let catalog = bundled();
    let mut state = BrowseState::default();
    state.criteria.toggle_category(Category::Drinks);
    state.criteria.toggle_requirement(RequirementFlag::NoAppRequired);

    let view = FilteredView::compose(&catalog, &state);

    assert_eq!(ids(&view.offers), vec!["jugo-juice-birthday"]);
    assert!(view.has_active_filters);
    assert_eq!(view.active_filter_count, 2);
}

#[test]
fn easy_only_keeps_walk_in_offers() {
    let catalog = bundled();
    let mut state = BrowseState::default();
    state.criteria.toggle_requirement(RequirementFlag::EasyOnly);

    let view = FilteredView::compose(&catalog, &state);

    assert_eq!(
        ids(&view.offers),
        vec![
            "sephora-birthday",
            "dairy-queen-birthday",
            "dennys-birthday",
            "jugo-juice-birthday",
        ]
    );
    assert!(view.offers.iter().all(|offer| offer.is_easy()));
}

#[test]
fn search_matches_type_tags_case_insensitively() {
    let catalog = bundled();
    let mut state = BrowseState::default();
    state.criteria.set_search_query("  ICE-CREAM ");

    let view = FilteredView::compose(&catalog, &state);
    let found = ids(&view.offers);

    assert!(found.contains(&"dairy-queen-birthday".to_string()));
    assert!(found.contains(&"marble-slab-birthday".to_string()));
    assert_eq!(view.active_filter_count, 0);
    assert!(view.has_active_filters);
}

#[test]
fn filters_that_exclude_everything_report_it() {
    let catalog = bundled();
    let mut state = BrowseState::default();
    state.criteria.set_search_query("zzz-no-such-offer");

    let view = FilteredView::compose(&catalog, &state);

    assert!(view.offers.is_empty());
    assert!(view.is_empty_due_to_filters());
}

#[test]
fn month_window_filter_with_name_sort() {
    let catalog = bundled();
    let mut state = BrowseState::default();
    state.criteria.toggle_redemption_window(RedemptionWindow::Month);
    state.set_sort(SortKey::Name);

    let view = FilteredView::compose(&catalog, &state);

    assert_eq!(
        ids(&view.offers),
        vec![
            "711-birthday",
            "build-a-bear-birthday",
            "dairy-queen-birthday",
            "haidilao-birthday",
            "jugo-juice-birthday",
            "marble-slab-birthday",
            "sephora-birthday",
        ]
    );
}

#[test]
fn recent_sort_leaves_unverified_offers_in_place() {
    let catalog = bundled();
    let mut state = BrowseState::default();
    state.set_sort(SortKey::Recent);

    let view = FilteredView::compose(&catalog, &state);
    let sorted = ids(&view.offers);

    assert_eq!(sorted[0], "chatime-birthday");
    assert_eq!(sorted[7], "starbucks-birthday");
    assert_eq!(sorted[8], "711-birthday");
    assert_eq!(sorted[13], "cineplex-birthday");
}

#[test]
fn reset_restores_defaults() {
    let mut state = BrowseState::default();
    state.criteria.set_search_query("coffee");
    state.criteria.toggle_category(Category::Food);
    state.set_sort(SortKey::Deadline);

    state.reset();

    assert_eq!(state, BrowseState::default());
    assert_eq!(state.sort_by, SortKey::Popularity);
}
