use crate::infra::{
    load_catalog, parse_birthday, parse_category, parse_date, parse_saved_sort, parse_sort,
    parse_window,
};
use chrono::{Datelike, NaiveDate};
use clap::Args;
use freebie_calendar::birthday::{format_birthday, Birthday};
use freebie_calendar::browse::{BrowseState, FilteredView, RequirementFlag, SavedSortKey, SortKey};
use freebie_calendar::calendar::{CalendarView, DeadlineAnnotated, SavedView};
use freebie_calendar::catalog::{Category, Offer, OfferId, RedemptionWindow};
use freebie_calendar::clock::{Clock, SystemClock};
use freebie_calendar::config::AppConfig;
use freebie_calendar::error::AppError;
use freebie_calendar::membership::{ClaimedFreebies, SavedFreebies};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct BrowseArgs {
    /// Case-insensitive text matched against name, description, tags and offer title
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Restrict to a category (repeatable)
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: Vec<Category>,
    /// Restrict to a redemption window: day, week or month (repeatable)
    #[arg(long, value_parser = parse_window)]
    pub(crate) window: Vec<RedemptionWindow>,
    /// Hide offers that need an app
    #[arg(long)]
    pub(crate) no_app: bool,
    /// Hide offers that need an email signup
    #[arg(long)]
    pub(crate) no_email: bool,
    /// Only offers with no app and no advance signup
    #[arg(long)]
    pub(crate) easy: bool,
    /// popularity (default), name, recent or deadline
    #[arg(long, value_parser = parse_sort)]
    pub(crate) sort: Option<SortKey>,
    /// Catalog file (JSON or CSV)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the view as JSON instead of a listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CalendarArgs {
    /// Birthday as MM-DD
    #[arg(long, value_parser = parse_birthday)]
    pub(crate) birthday: Option<Birthday>,
    /// Saved offer ids, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) saved: Vec<String>,
    /// Claimed keys ({id}_{year}), comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) claimed: Vec<String>,
    /// Override today's date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Order for the saved list: redemption (default), name or deadline
    #[arg(long, value_parser = parse_saved_sort)]
    pub(crate) saved_sort: Option<SavedSortKey>,
    /// Catalog file (JSON or CSV)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the calendar as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

impl BrowseArgs {
    fn browse_state(&self) -> BrowseState {
        let mut state = BrowseState::default();
        if let Some(search) = &self.search {
            state.criteria.set_search_query(search.as_str());
        }
        for category in &self.category {
            state.criteria.selected_categories.insert(*category);
        }
        for window in &self.window {
            state.criteria.selected_redemption_windows.insert(*window);
        }
        let flags = [
            (self.no_app, RequirementFlag::NoAppRequired),
            (self.no_email, RequirementFlag::NoEmailRequired),
            (self.easy, RequirementFlag::EasyOnly),
        ];
        for (enabled, flag) in flags {
            if enabled {
                state.criteria.toggle_requirement(flag);
            }
        }
        if let Some(sort) = self.sort {
            state.set_sort(sort);
        }
        state
    }
}

pub(crate) fn run_browse(args: BrowseArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.catalog, args.catalog.as_deref())?;
    let state = args.browse_state();
    let view = FilteredView::compose(&catalog, &state);

    if args.json {
        print_json(&view);
        return Ok(());
    }

    println!(
        "Birthday freebies: {} of {} | sorted by {}",
        view.result_count,
        view.total_count,
        view.sort_by.label()
    );
    if view.active_filter_count > 0 {
        println!("{} filter(s) active", view.active_filter_count);
    }
    if view.is_empty_due_to_filters() {
        println!("No freebies match these filters. Try clearing some.");
        return Ok(());
    }
    for offer in &view.offers {
        println!("- {}", offer_line(offer));
    }

    Ok(())
}

pub(crate) fn run_calendar(args: CalendarArgs) -> Result<(), AppError> {
    let CalendarArgs {
        birthday,
        saved,
        claimed,
        today,
        saved_sort,
        catalog,
        json,
    } = args;

    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.catalog, catalog.as_deref())?;
    let today = today.unwrap_or_else(|| SystemClock.today());
    let saved = SavedFreebies::from_ids(saved.iter().map(|id| OfferId::new(id.trim())));
    let claimed = ClaimedFreebies::from_keys(&claimed);

    for id in saved.iter() {
        if catalog.get(id).is_none() {
            println!("Note: saved id '{}' is not in the catalog", id);
        }
    }

    let calendar = CalendarView::compose(
        &catalog,
        &saved,
        &claimed,
        birthday.as_ref(),
        today,
        config.catalog.day_overflow,
    );
    let saved_view = SavedView::compose(
        &catalog,
        &saved,
        &claimed,
        saved_sort.unwrap_or_default(),
        today.year(),
    );

    if json {
        print_json(&calendar);
        return Ok(());
    }

    let Some(calendar) = calendar else {
        println!("Birthday: {}", format_birthday(None));
        println!("Set a birthday with --birthday MM-DD to see deadlines.");
        return Ok(());
    };

    render_calendar(&calendar);
    render_saved(&saved_view, &claimed, today.year());
    Ok(())
}

fn render_calendar(calendar: &CalendarView<'_>) {
    println!(
        "Birthday: {} ({})",
        calendar.birthday_label, calendar.next_birthday
    );
    println!(
        "{} {} day(s) to go as of {}.",
        calendar.countdown_message, calendar.days_until_birthday, calendar.today
    );

    println!("\nSign up now");
    render_deadlines(&calendar.signup_now);
    println!("\nSign up soon (within 30 days)");
    render_deadlines(&calendar.signup_soon);
    if !calendar.tracked.is_empty() {
        println!("\nLater");
        render_deadlines(&calendar.tracked);
    }

    println!("\nClaimable now");
    if calendar.claimable_today.is_empty() {
        println!("  nothing yet");
    }
    for offer in &calendar.claimable_today {
        println!("  - {} | {}", offer.name, offer.title());
    }
}

fn render_deadlines(entries: &[DeadlineAnnotated<'_>]) {
    if entries.is_empty() {
        println!("  none");
        return;
    }
    for entry in entries {
        println!("  - {}", deadline_line(entry));
    }
}

fn render_saved(view: &SavedView<'_>, claimed: &ClaimedFreebies, year: i32) {
    println!("\nSaved freebies ({})", view.count);
    for group in &view.groups {
        if group.total == 0 {
            continue;
        }
        let status = if group.all_claimed { " - all claimed" } else { "" };
        println!(
            "  {} ({}/{} claimed{})",
            group.label, group.claimed, group.total, status
        );
        for offer in &group.offers {
            let mark = if claimed.is_claimed(&offer.id, year) {
                "x"
            } else {
                " "
            };
            println!("    [{}] {}", mark, offer.name);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("JSON output unavailable: {}", err),
    }
}

fn offer_line(offer: &Offer) -> String {
    let mut needs = Vec::new();
    if offer.requirements.requires_app {
        needs.push("app".to_string());
    }
    if offer.requirements.requires_email {
        needs.push("email".to_string());
    }
    if offer.requirements.needs_advance_signup() {
        needs.push(format!("sign up {}d ahead", offer.advance_signup_days()));
    }
    let needs = if needs.is_empty() {
        "walk in".to_string()
    } else {
        needs.join(", ")
    };

    format!(
        "{} [{} | {}] {} ({})",
        offer.name,
        offer.category.label(),
        offer.redemption_window.label(),
        offer.title(),
        needs
    )
}

fn deadline_line(entry: &DeadlineAnnotated<'_>) -> String {
    let when = match entry.signup_deadline_days {
        days if days < 0 => format!("{} day(s) overdue", -days),
        0 => "today".to_string(),
        days => format!("in {} day(s)", days),
    };
    let urgent = if entry.is_urgent { " !" } else { "" };
    format!("{}: sign up {}{}", entry.offer.name, when, urgent)
}
