use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

/// Five minutes and change between score polls.
pub const DEFAULT_SCORES_INTERVAL: Duration = Duration::from_millis(5 * 60 * 1000 + 10);

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Seeding file to use instead of the bundled season.
    pub seeding_path: Option<PathBuf>,
    /// Official results sheet, a path or an http(s) URL.
    pub results_source: Option<String>,
    /// Score strip endpoint. No URL, no ticker.
    pub scores_url: Option<String>,
    pub scores_interval: Duration,
    pub user_id: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            seeding_path: None,
            results_source: None,
            scores_url: None,
            scores_interval: DEFAULT_SCORES_INTERVAL,
            user_id: "fan".to_string(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            full_screen: false,
            log_level: non_empty("PLAYOFF_PICKER_LOG").and_then(|v| v.parse().ok()),
            seeding_path: non_empty("PLAYOFF_PICKER_SEEDING_JSON").map(PathBuf::from),
            results_source: non_empty("PLAYOFF_PICKER_RESULTS_JSON"),
            scores_url: non_empty("PLAYOFF_PICKER_SCORES_URL"),
            scores_interval: non_empty("PLAYOFF_PICKER_SCORES_INTERVAL_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.scores_interval),
            user_id: non_empty("PLAYOFF_PICKER_USER")
                .or_else(|| non_empty("USER"))
                .unwrap_or(defaults.user_id),
        }
    }
}
