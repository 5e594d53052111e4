use crate::app::{App, MenuItem};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>) {
    let mut guard = app.lock().await;

    if (key_event.code, key_event.modifiers) == (Char('c'), KeyModifiers::CONTROL) {
        crate::cleanup_terminal();
        std::process::exit(0);
    }

    // Tiebreaker entry swallows everything but its own keys.
    if guard.state.picks.points_input.is_some() {
        match key_event.code {
            KeyCode::Enter => guard.commit_points_edit(),
            KeyCode::Esc => guard.cancel_points_edit(),
            KeyCode::Backspace => guard.points_input_backspace(),
            Char(c) => guard.points_input_push(c),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        (_, Char('q'), _) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Picks),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Scores),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Standings),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Picks board
        (MenuItem::Picks, Char('l') | KeyCode::Right, _) => guard.state.picks.navigate_round_next(),
        (MenuItem::Picks, Char('h') | KeyCode::Left, _) => guard.state.picks.navigate_round_prev(),
        (MenuItem::Picks, Char('j') | KeyCode::Down, _) => guard.state.picks.navigate_row_down(),
        (MenuItem::Picks, Char('k') | KeyCode::Up, _) => guard.state.picks.navigate_row_up(),
        (MenuItem::Picks, KeyCode::Enter, _) => guard.pick_highlighted(),
        (MenuItem::Picks, Char('p'), _) => guard.begin_points_edit(),
        (MenuItem::Picks, Char('s'), _) => guard.save_picks(),
        (MenuItem::Picks, Char('r'), _) => guard.reload_picks(),

        // Scores
        (MenuItem::Scores, Char('j') | KeyCode::Down, _) => guard.scores_scroll_down(),
        (MenuItem::Scores, Char('k') | KeyCode::Up, _) => guard.scores_scroll_up(),

        // Standings
        (MenuItem::Standings, Char('j') | KeyCode::Down, _) => guard.standings_scroll_down(),
        (MenuItem::Standings, Char('k') | KeyCode::Up, _) => guard.standings_scroll_up(),
        (MenuItem::Standings, Char('r'), _) => guard.load_standings(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
