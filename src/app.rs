use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use chrono::{Local, Utc};
use log::{debug, error, warn};
use playoff_bracket::scoring::standings;
use playoff_bracket::{Bracket, PickSheet, SavedPicks, ScoreStrip, ScoringRules, SeedingFile};
use std::path::{Path, PathBuf};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Picks,
    Scores,
    Standings,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let app = Self::with_settings(AppSettings::load());

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self { state: AppState::new(), settings }
    }

    // -----------------------------------------------------------------------
    // Startup
    // -----------------------------------------------------------------------

    /// Load the season's seeding and the user's saved sheet, then build the
    /// bracket. Seeding problems leave the picks board empty with an error.
    pub fn load_bracket(&mut self) {
        let seeding = match self.load_seeding() {
            Ok(seeding) => seeding,
            Err(e) => {
                error!("{e}");
                self.state.last_error = Some(e);
                return;
            }
        };
        let saved = match read_sheet_file(&pick_sheet_path(seeding.season)) {
            Ok(sheet) => sheet.map(|s| s.picks),
            Err(e) => {
                warn!("{e}");
                None
            }
        };
        self.install_bracket(seeding, saved.as_ref());
    }

    pub fn install_bracket(&mut self, seeding: SeedingFile, saved: Option<&SavedPicks>) {
        match Bracket::init(seeding.teams.clone(), seeding.nfc.clone(), seeding.afc.clone(), saved) {
            Ok(bracket) => {
                debug!("season {} bracket ready with {} games", seeding.season, bracket.state().len());
                self.state.last_error = None;
                self.state.picks.load(seeding, bracket);
            }
            Err(e) => {
                error!("{e}");
                self.state.last_error = Some(e.to_string());
            }
        }
    }

    fn load_seeding(&self) -> Result<SeedingFile, String> {
        let Some(path) = &self.settings.seeding_path else {
            return SeedingFile::embedded().map_err(|e| format!("bundled seeding: {e}"));
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("{}: read failed: {e}", path.display()))?;
        SeedingFile::from_json(&content).map_err(|e| format!("{}: {e}", path.display()))
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_scores_updated(&mut self, strip: ScoreStrip) {
        self.state.last_error = None;
        self.state.scores.strip = strip;
        self.state.scores.last_updated_at = Some(Local::now().format("%H:%M").to_string());
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        if self.state.active_tab == MenuItem::Standings {
            self.load_standings();
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Picks board
    // -----------------------------------------------------------------------

    pub fn is_locked(&self) -> bool {
        self.state
            .picks
            .seeding
            .as_ref()
            .is_some_and(|s| s.is_locked(Utc::now()))
    }

    fn refuse_if_locked(&mut self) -> bool {
        if self.is_locked() {
            self.state.picks.status = Some("Picks are locked: the playoffs have started".into());
            return true;
        }
        false
    }

    pub fn pick_highlighted(&mut self) {
        if self.refuse_if_locked() {
            return;
        }
        let picks = &mut self.state.picks;
        let Some((id, abbr)) = picks.highlighted().map(|(id, team)| (id, team.abbr.clone())) else {
            return;
        };
        let Some(bracket) = picks.bracket.as_mut() else {
            return;
        };
        if bracket.select_winner(id, &abbr) {
            picks.dirty = true;
            picks.status = Some(format!("game {id}: {abbr}"));
            picks.drain_events();
        } else {
            picks.status = Some(format!("game {id} can't be picked yet"));
        }
    }

    pub fn begin_points_edit(&mut self) {
        if self.refuse_if_locked() {
            return;
        }
        let current = self
            .state
            .picks
            .bracket
            .as_ref()
            .and_then(|b| b.state().tiebreaker())
            .map(|p| p.to_string())
            .unwrap_or_default();
        self.state.picks.points_input = Some(current);
    }

    pub fn points_input_push(&mut self, c: char) {
        if let Some(input) = self.state.picks.points_input.as_mut()
            && c.is_ascii_digit()
            && input.len() < 3
        {
            input.push(c);
        }
    }

    pub fn points_input_backspace(&mut self) {
        if let Some(input) = self.state.picks.points_input.as_mut() {
            input.pop();
        }
    }

    pub fn cancel_points_edit(&mut self) {
        self.state.picks.points_input = None;
    }

    pub fn commit_points_edit(&mut self) {
        let picks = &mut self.state.picks;
        let Some(input) = picks.points_input.take() else {
            return;
        };
        let points = input.parse::<u32>().ok();
        if let Some(bracket) = picks.bracket.as_mut() {
            bracket.set_tiebreaker(points);
            picks.dirty = true;
        }
    }

    pub fn save_picks(&mut self) {
        if self.refuse_if_locked() {
            return;
        }
        match self.write_pick_sheet() {
            Ok(path) => {
                self.state.picks.dirty = false;
                self.state.picks.status = Some(format!("saved to {}", path.display()));
            }
            Err(e) => {
                error!("{e}");
                self.state.picks.status = Some(e);
            }
        }
    }

    fn current_sheet(&self) -> Option<PickSheet> {
        let picks = &self.state.picks;
        Some(PickSheet {
            user_id: self.settings.user_id.clone(),
            season: picks.season()?,
            picks: picks.bracket.as_ref()?.to_picks(),
        })
    }

    fn write_pick_sheet(&self) -> Result<PathBuf, String> {
        let sheet = self.current_sheet().ok_or("no bracket loaded")?;
        let path = pick_sheet_path(sheet.season);
        write_sheet_file(&path, &sheet)?;
        Ok(path)
    }

    /// Throw away unsaved picks and replay the saved sheet.
    pub fn reload_picks(&mut self) {
        let Some(seeding) = self.state.picks.seeding.clone() else {
            return;
        };
        let registry = match seeding.registry() {
            Ok(registry) => registry,
            Err(e) => {
                self.state.last_error = Some(e.to_string());
                return;
            }
        };
        let mut bracket = Bracket::new(registry);
        let status = match read_sheet_file(&pick_sheet_path(seeding.season)) {
            Ok(Some(sheet)) => match bracket.restore(&sheet.picks) {
                Ok(()) => format!("restored {} picks", sheet.picks.games.len()),
                Err(e) => {
                    warn!("{e}");
                    format!("{e}; kept {} games", bracket.state().len())
                }
            },
            Ok(None) => "no saved picks yet".to_string(),
            Err(e) => e,
        };
        self.state.picks.load(seeding, bracket);
        self.state.picks.status = Some(status);
    }

    // -----------------------------------------------------------------------
    // Standings
    // -----------------------------------------------------------------------

    pub fn load_standings(&mut self) {
        let sources = self.standings_sources();
        let own_sheet = self.current_sheet();
        let standings_state = &mut self.state.standings;
        standings_state.source_errors.clear();
        standings_state.rows.clear();
        standings_state.scroll_offset = 0;

        let Some(results_source) = self.settings.results_source.clone() else {
            standings_state
                .source_errors
                .push("set PLAYOFF_PICKER_RESULTS_JSON to score the pool".to_string());
            return;
        };
        let results = match load_results_source(&results_source) {
            Ok(results) => results,
            Err(e) => {
                standings_state.source_errors.push(e);
                return;
            }
        };

        let mut entries = Vec::new();
        for source in sources {
            match load_sheet_source(&source) {
                Ok(sheet) => entries.push(sheet),
                Err(e) => standings_state.source_errors.push(e),
            }
        }
        // Unsaved picks count too.
        if let Some(sheet) = own_sheet {
            entries.retain(|e| e.user_id != sheet.user_id);
            entries.push(sheet);
        }

        standings_state.rows = standings(&ScoringRules::default(), &results, &entries);
        standings_state.results_source = Some(results_source);
        standings_state.last_loaded_at = Some(Local::now().format("%H:%M").to_string());
    }

    fn standings_sources(&self) -> Vec<String> {
        let Some(season) = self.state.picks.season() else {
            return Vec::new();
        };
        let mut out = Vec::new();
        if let Some(compare_dir) = pick_sheet_path(season).parent().map(|p| p.join("compare"))
            && let Ok(entries) = std::fs::read_dir(compare_dir)
        {
            for entry in entries.flatten() {
                let p = entry.path();
                if p.extension().and_then(|e| e.to_str()) == Some("json") {
                    out.push(p.display().to_string());
                }
            }
        }
        out.sort();
        out
    }

    pub fn standings_scroll_down(&mut self) {
        let max = self.state.standings.rows.len().saturating_sub(1) as u16;
        self.state.standings.scroll_offset = (self.state.standings.scroll_offset + 1).min(max);
    }

    pub fn standings_scroll_up(&mut self) {
        self.state.standings.scroll_offset = self.state.standings.scroll_offset.saturating_sub(1);
    }

    pub fn scores_scroll_down(&mut self) {
        let max = self.state.scores.strip.games.len().saturating_sub(1) as u16;
        self.state.scores.scroll_offset = (self.state.scores.scroll_offset + 1).min(max);
    }

    pub fn scores_scroll_up(&mut self) {
        self.state.scores.scroll_offset = self.state.scores.scroll_offset.saturating_sub(1);
    }
}

fn pick_sheet_path(season: u16) -> PathBuf {
    pick_sheet_path_from(
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
        season,
    )
}

fn pick_sheet_path_from(xdg_config: Option<String>, home: Option<String>, season: u16) -> PathBuf {
    let file = format!("picks_{season}.json");
    if let Some(config_dir) = xdg_config.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(config_dir).join("playoff-picker").join(file);
    }
    if let Some(home) = home.filter(|h| !h.trim().is_empty()) {
        return PathBuf::from(home).join(".config").join("playoff-picker").join(file);
    }
    PathBuf::from(file)
}

fn write_sheet_file(path: &Path, sheet: &PickSheet) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| format!("create dir failed: {e}"))?;
    }
    let payload =
        serde_json::to_string_pretty(sheet).map_err(|e| format!("serialize picks failed: {e}"))?;
    std::fs::write(path, payload).map_err(|e| format!("write picks failed: {e}"))
}

/// `Ok(None)` when nothing has been saved yet.
fn read_sheet_file(path: &Path) -> Result<Option<PickSheet>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("{}: read failed: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| format!("{}: invalid picks json: {e}", path.display()))
}

fn read_source(source: &str) -> Result<String, String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        // The blocking client owns a runtime, which can't be dropped on an async worker.
        tokio::task::block_in_place(|| {
            reqwest::blocking::get(source)
                .map_err(|e| format!("{source}: fetch failed: {e}"))?
                .text()
                .map_err(|e| format!("{source}: read body failed: {e}"))
        })
    } else {
        std::fs::read_to_string(source).map_err(|e| format!("{source}: read failed: {e}"))
    }
}

fn load_sheet_source(source: &str) -> Result<PickSheet, String> {
    let body = read_source(source)?;
    serde_json::from_str(&body).map_err(|e| format!("{source}: invalid picks json: {e}"))
}

/// The official results, either a full pick sheet or a bare `game_N` map.
fn load_results_source(source: &str) -> Result<SavedPicks, String> {
    let body = read_source(source)?;
    parse_results(&body).map_err(|e| format!("{source}: invalid results json: {e}"))
}

fn parse_results(body: &str) -> Result<SavedPicks, serde_json::Error> {
    serde_json::from_str::<PickSheet>(body)
        .map(|sheet| sheet.picks)
        .or_else(|_| serde_json::from_str::<SavedPicks>(body))
}
