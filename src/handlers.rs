use crate::countdown::format_long;
use crate::errors::AppError;
use crate::models::{CountdownResponse, QuickPreset, ShareResponse, ThemeInfo};
use crate::share::ShareParams;
use crate::state::AppState;
use crate::themes::{catalog, theme_info};
use crate::ticker::{self, Clock, SystemClock, TICK_PERIOD};
use crate::ui::{PageModel, render_index};
use crate::view::{CountdownView, quick_presets};
use axum::{
    Json,
    extract::{RawQuery, State},
    http::HeaderMap,
    response::{
        Html,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::{Stream, stream};
use tracing::debug;

pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, AppError> {
    let now = SystemClock.now();
    let view = load_view(query, now);
    let origin = state.origin(&headers);

    let page = PageModel {
        share_url: view.share_url(&origin),
        remaining: view.time_left(now),
        target_label: target_label(&view),
        presets: quick_presets(now),
        view,
    };
    Ok(Html(render_index(&page)?))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn get_countdown(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Json<CountdownResponse> {
    let now = SystemClock.now();
    let view = load_view(query, now);
    let remaining = view.time_left(now);

    Json(CountdownResponse {
        share_url: view.share_url(&state.origin(&headers)),
        theme: theme_info(view.state().theme),
        target_label: target_label(&view),
        complete: remaining.is_complete(),
        editing: view.is_editing(),
        remaining,
        state: view.state().clone(),
    })
}

/// Server-sent `tick` events, one per second, ending after the countdown completes.
pub async fn stream_countdown(
    RawQuery(query): RawQuery,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let now = SystemClock.now();
    let view = load_view(query, now);
    let handle = ticker::spawn(view.target(), SystemClock, TICK_PERIOD);

    let events = stream::unfold(Some(handle), |handle| async move {
        let Some(mut handle) = handle else {
            return None;
        };
        let Some(remaining) = handle.changed().await else {
            return None;
        };
        let event = Event::default().event("tick").json_data(remaining);
        let next = if remaining.is_complete() { None } else { Some(handle) };
        Some((event, next))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

pub async fn get_share(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Json<ShareResponse> {
    let view = load_view(query, SystemClock.now());
    Json(ShareResponse {
        url: view.share_url(&state.origin(&headers)),
    })
}

pub async fn get_themes() -> Json<Vec<ThemeInfo>> {
    Json(catalog())
}

pub async fn get_presets() -> Json<Vec<QuickPreset>> {
    Json(quick_presets(SystemClock.now()))
}

fn load_view(query: Option<String>, now: chrono::NaiveDateTime) -> CountdownView {
    let params = query
        .as_deref()
        .map(ShareParams::from_query)
        .unwrap_or_default();
    debug!(?params, "decoded countdown query");
    CountdownView::load(&params, now)
}

fn target_label(view: &CountdownView) -> String {
    format_long(view.target())
}
