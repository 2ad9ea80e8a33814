use crate::infra::{deserialize_optional_date, AppState};
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use freebie_calendar::birthday::{format_birthday, Birthday};
use freebie_calendar::browse::{BrowseState, FilteredView};
use freebie_calendar::calendar::CalendarView;
use freebie_calendar::catalog::OfferId;
use freebie_calendar::error::AppError;
use freebie_calendar::membership::{ClaimedFreebies, SavedFreebies};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct CalendarRequest {
    /// `MM-DD`; omitted when the user has not set one.
    #[serde(default)]
    pub(crate) birthday: Option<String>,
    #[serde(default)]
    pub(crate) saved: Vec<OfferId>,
    /// `{id}_{year}` keys.
    #[serde(default)]
    pub(crate) claimed: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CalendarResponse<'a> {
    pub(crate) has_birthday: bool,
    pub(crate) birthday_label: String,
    pub(crate) today: NaiveDate,
    pub(crate) calendar: Option<CalendarView<'a>>,
}

pub(crate) fn with_freebie_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/freebies/:id", axum::routing::get(freebie_endpoint))
        .route(
            "/api/v1/freebies/search",
            axum::routing::post(search_endpoint),
        )
        .route("/api/v1/calendar", axum::routing::post(calendar_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready", "offers": state.catalog.len() })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn freebie_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.catalog.get(&OfferId::new(id.as_str())) {
        Some(offer) => Json(offer).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("no freebie with id '{id}'") })),
        )
            .into_response(),
    }
}

pub(crate) async fn search_endpoint(
    Extension(state): Extension<AppState>,
    Json(browse): Json<BrowseState>,
) -> Response {
    let view = FilteredView::compose(&state.catalog, &browse);
    Json(view).into_response()
}

pub(crate) async fn calendar_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CalendarRequest>,
) -> Result<Response, AppError> {
    let CalendarRequest {
        birthday,
        saved,
        claimed,
        today,
    } = payload;

    let birthday = birthday
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(str::parse::<Birthday>)
        .transpose()?;
    let saved = SavedFreebies::from_ids(saved);
    let claimed = ClaimedFreebies::from_keys(&claimed);
    let today = today.unwrap_or_else(|| state.clock.today());

    let calendar = CalendarView::compose(
        &state.catalog,
        &saved,
        &claimed,
        birthday.as_ref(),
        today,
        state.day_overflow,
    );

    Ok(Json(CalendarResponse {
        has_birthday: birthday.is_some(),
        birthday_label: format_birthday(birthday.as_ref()),
        today,
        calendar,
    })
    .into_response())
}
