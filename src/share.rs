//! Query-string codec for share links.
//!
//! `t` carries the title, `d` the `YYYY-MM-DDTHH:mm` target and `th` the theme
//! index. Decoding never fails: anything missing or malformed falls back to
//! the defaults a fresh page would use.

use crate::countdown::{canonical_target, default_target, default_target_at};
use crate::models::CountdownState;
use crate::themes::THEMES;
use chrono::NaiveDateTime;

pub const DEFAULT_TITLE: &str = "My Countdown";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareParams {
    pub t: Option<String>,
    pub d: Option<String>,
    pub th: Option<String>,
}

impl ShareParams {
    /// Parses a raw query string (without the leading `?`). The first
    /// occurrence of a key wins; undecodable pairs are skipped.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let (Some(key), Some(value)) = (decode_component(key), decode_component(value)) else {
                continue;
            };
            let slot = match key.as_str() {
                "t" => &mut params.t,
                "d" => &mut params.d,
                "th" => &mut params.th,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedState {
    pub state: CountdownState,
    /// `state.target` as a date-time; always in step with it.
    pub target_at: NaiveDateTime,
    /// False when the link carried a title, so the settings panel starts hidden.
    pub editing: bool,
}

pub fn default_state(now: NaiveDateTime) -> CountdownState {
    CountdownState {
        title: DEFAULT_TITLE.to_string(),
        target: default_target(now),
        theme: 0,
    }
}

pub fn decode(params: &ShareParams, now: NaiveDateTime) -> DecodedState {
    let mut state = default_state(now);
    let mut target_at = default_target_at(now);
    let mut editing = true;

    if let Some(title) = non_empty(&params.t) {
        state.title = title.to_string();
        editing = false;
    }

    if let Some((date, parsed)) =
        non_empty(&params.d).and_then(|date| canonical_target(date).map(|parsed| (date, parsed)))
    {
        state.target = date.to_string();
        target_at = parsed;
    }

    if let Some(theme) = non_empty(&params.th) {
        state.theme = parse_theme(theme);
    }

    DecodedState {
        state,
        target_at,
        editing,
    }
}

pub fn parse_theme(value: &str) -> usize {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|index| *index < THEMES.len())
        .unwrap_or(0)
}

pub fn encode_query(state: &CountdownState) -> String {
    format!(
        "t={}&d={}&th={}",
        urlencoding::encode(&state.title),
        urlencoding::encode(&state.target),
        state.theme
    )
}

/// Builds the fully qualified link a recipient opens to see the same countdown.
pub fn encode_share_url(origin: &str, state: &CountdownState) -> String {
    format!("{}/?{}", origin.trim_end_matches('/'), encode_query(state))
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|value| value.into_owned())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
