use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub total_milliseconds: i64,
}

impl TimeRemaining {
    pub fn is_complete(&self) -> bool {
        self.total_milliseconds <= 0
    }
}

/// What a share link carries: title, `YYYY-MM-DDTHH:mm` target and theme index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    pub title: String,
    pub target: String,
    pub theme: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeInfo {
    pub index: usize,
    pub name: &'static str,
    pub emoji: &'static str,
    pub gradient: &'static str,
    pub background: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickPreset {
    pub label: &'static str,
    pub target: String,
    pub theme: usize,
}

#[derive(Debug, Serialize)]
pub struct CountdownResponse {
    pub state: CountdownState,
    pub editing: bool,
    pub theme: ThemeInfo,
    pub target_label: String,
    pub remaining: TimeRemaining,
    pub complete: bool,
    pub share_url: String,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub url: String,
}
