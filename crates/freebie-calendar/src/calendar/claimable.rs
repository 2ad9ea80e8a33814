use crate::catalog::{Offer, RedemptionWindow};

/// Week-window offers become redeemable this many days out.
pub const WEEK_WINDOW_DAYS: i64 = 7;
/// Month-window offers become redeemable this many days out.
pub const MONTH_WINDOW_DAYS: i64 = 31;

/// Saved offers that can be redeemed given how far away the birthday is.
///
/// On the day itself every window is open. Within a week, week offers are
/// listed before month offers; within a month, only month offers.
pub fn claimable_today<'a>(saved: &[&'a Offer], days_until_birthday: i64) -> Vec<&'a Offer> {
    let in_window = |window: RedemptionWindow| {
        saved
            .iter()
            .copied()
            .filter(move |offer| offer.redemption_window == window)
    };

    if days_until_birthday <= 0 {
        saved.to_vec()
    } else if days_until_birthday <= WEEK_WINDOW_DAYS {
        in_window(RedemptionWindow::Week)
            .chain(in_window(RedemptionWindow::Month))
            .collect()
    } else if days_until_birthday <= MONTH_WINDOW_DAYS {
        in_window(RedemptionWindow::Month).collect()
    } else {
        Vec::new()
    }
}
