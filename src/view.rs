//! State of one countdown view for the lifetime of a page session.

use crate::countdown::{calculate_time_left, canonical_target, format_target, parse_target};
use crate::errors::{ClipboardError, ShareError};
use crate::models::{CountdownState, QuickPreset, TimeRemaining};
use crate::share::{ShareParams, decode, encode_share_url};
use crate::themes::{Theme, clamp_index, theme_at};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::future::Future;
use std::time::{Duration as StdDuration, Instant};
use tracing::warn;

/// How long the "copied" indicator stays lit after a successful share.
pub const COPIED_INDICATOR: StdDuration = StdDuration::from_secs(2);

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> impl Future<Output = Result<(), ClipboardError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownView {
    state: CountdownState,
    target: NaiveDateTime,
    editing: bool,
    copied_until: Option<Instant>,
}

impl CountdownView {
    pub fn new(now: NaiveDateTime) -> Self {
        Self::load(&ShareParams::default(), now)
    }

    pub fn load(params: &ShareParams, now: NaiveDateTime) -> Self {
        let decoded = decode(params, now);
        Self {
            state: decoded.state,
            target: decoded.target_at,
            editing: decoded.editing,
            copied_until: None,
        }
    }

    pub fn state(&self) -> &CountdownState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn theme(&self) -> &'static Theme {
        theme_at(self.state.theme)
    }

    /// `state().target` as a date-time. Only canonical targets reach the state.
    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    pub fn time_left(&self, now: NaiveDateTime) -> TimeRemaining {
        calculate_time_left(self.target, now)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.state.title = title.into();
    }

    /// Returns false and keeps the previous target when `value` is not a valid date-time.
    pub fn set_target(&mut self, value: &str) -> bool {
        match parse_target(value) {
            Some(target) => {
                self.state.target = format_target(target);
                self.target = target;
                true
            }
            None => false,
        }
    }

    pub fn select_theme(&mut self, index: usize) {
        self.state.theme = clamp_index(index);
    }

    pub fn start_countdown(&mut self) {
        self.editing = false;
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    /// A preset with a non-canonical target keeps the current target.
    pub fn apply_preset(&mut self, preset: &QuickPreset) {
        self.state.title = preset.label.to_string();
        if let Some(target) = canonical_target(&preset.target) {
            self.state.target = preset.target.clone();
            self.target = target;
        }
        self.state.theme = clamp_index(preset.theme);
        self.editing = false;
    }

    pub fn share_url(&self, origin: &str) -> String {
        encode_share_url(origin, &self.state)
    }

    pub async fn copy_share_link<C: Clipboard>(
        &mut self,
        clipboard: &mut C,
        origin: &str,
        now: Instant,
    ) -> Result<(), ShareError> {
        let url = self.share_url(origin);
        match clipboard.write_text(&url).await {
            Ok(()) => {
                self.copied_until = Some(now + COPIED_INDICATOR);
                Ok(())
            }
            Err(err) => {
                warn!("failed to copy share link: {err}");
                Err(ShareError::Clipboard(err))
            }
        }
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_until.is_some_and(|until| now < until)
    }
}

pub fn quick_presets(now: NaiveDateTime) -> Vec<QuickPreset> {
    let new_year = NaiveDate::from_ymd_opt(now.year() + 1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(format_target)
        .unwrap_or_else(|| format_target(now));

    vec![
        QuickPreset {
            label: "New Year's Eve",
            target: new_year,
            theme: 2,
        },
        QuickPreset {
            label: "In 1 hour",
            target: format_target(now + Duration::hours(1)),
            theme: 6,
        },
        QuickPreset {
            label: "In 24 hours",
            target: format_target(now + Duration::hours(24)),
            theme: 6,
        },
        QuickPreset {
            label: "In 1 week",
            target: format_target(now + Duration::weeks(1)),
            theme: 4,
        },
    ]
}
