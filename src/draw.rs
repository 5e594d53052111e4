use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::bracket::BracketBoard;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use playoff_bracket::{LiveGame, Outcome, ScoringRules};

static TABS: &[&str; 3] = &["Picks", "Scores", "Standings"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Picks => draw_picks(f, layout.main, app),
            MenuItem::Scores => draw_scores(f, layout.main, app),
            MenuItem::Standings => draw_standings(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Picks => 0,
        MenuItem::Scores => 1,
        MenuItem::Standings => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_picks(f: &mut Frame, area: Rect, app: &App) {
    let picks = &app.state.picks;
    let title = match picks.season() {
        Some(season) => format!(" {season} Playoff Picks "),
        None => " Playoff Picks ".to_string(),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(bracket) = picks.bracket.as_ref() else {
        let msg = match app.state.last_error.as_deref() {
            Some(err) => format!("Bracket load failed:\n{err}"),
            None => "Loading seeding...".to_string(),
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [header, key_legend, board, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let champion = bracket
        .champion()
        .map(|t| format!("Champion: {}", t.label()))
        .or_else(|| picks.progress())
        .unwrap_or_default();
    let points = bracket
        .state()
        .tiebreaker()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());
    let lock = if app.is_locked() { "  [locked]" } else { "" };
    let unsaved = if picks.dirty { "  [unsaved]" } else { "" };
    f.render_widget(
        Paragraph::new(format!("{champion} | Super Bowl points: {points}{lock}{unsaved}")),
        header,
    );
    f.render_widget(
        Paragraph::new("Keys: h/l=round  j/k=team  Enter=pick  p=points  s=save  r=reload  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    f.render_widget(
        BracketBoard {
            state: bracket.state(),
            view_round: picks.view_round,
            selected_row: picks.selected_row,
        },
        board,
    );

    let footer_line = match &picks.points_input {
        Some(input) => Line::from(vec![
            Span::styled("Total points in the Super Bowl: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{input}_")),
            Span::styled("  Enter=ok  Esc=cancel", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(
            picks.status.clone().unwrap_or_default(),
            Style::default().fg(Color::Gray),
        )),
    };
    f.render_widget(Paragraph::new(footer_line), footer);
}

fn draw_scores(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Scores ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.settings.scores_url.is_none() {
        draw_centered(f, inner, "Live scores are off. Set PLAYOFF_PICKER_SCORES_URL to enable them.");
        return;
    }

    let scores = &app.state.scores;
    if scores.strip.games.is_empty() {
        let msg = match (app.state.last_error.as_deref(), &scores.last_updated_at) {
            (Some(err), _) => format!("Score update failed:\n{err}"),
            (None, Some(_)) => "No games on the strip".to_string(),
            (None, None) => "Waiting for scores...".to_string(),
        };
        draw_centered(f, inner, &msg);
        return;
    }

    let mut lines = Vec::with_capacity(scores.strip.games.len() * 3 + 2);
    let updated = scores.last_updated_at.as_deref().unwrap_or("--:--");
    lines.push(Line::from(Span::styled(
        format!("Updated {updated}  j/k to scroll"),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    for game in scores.strip.games.iter().skip(scores.scroll_offset as usize) {
        lines.push(score_line(game, &game.away, game.away_score));
        lines.push(score_line(game, &game.home, game.home_score));
        lines.push(Line::from(Span::styled(
            format!("  {}", game.status_label()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn score_line<'a>(game: &LiveGame, abbr: &str, score: Option<u16>) -> Line<'a> {
    let style = match game.outcome(abbr) {
        Some(Outcome::Win) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Some(Outcome::Loss) => Style::default().fg(Color::DarkGray),
        None => Style::default().fg(Color::White),
    };
    let ball = if game.has_possession(abbr) { " •" } else { "" };
    let score = score.map_or("--".to_string(), |s| s.to_string());
    Line::from(Span::styled(format!("  {abbr:<4} {score:>3}{ball}"), style))
}

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Standings ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let standings = &app.state.standings;
    let mut lines = Vec::new();
    if let Some(source) = &standings.results_source {
        let loaded = standings.last_loaded_at.as_deref().unwrap_or("--:--");
        lines.push(Line::from(Span::styled(
            format!(
                "Results: {source} (loaded {loaded}, {} points possible)  r=reload",
                ScoringRules::default().max_points()
            ),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{:>3}  {:<20} {:>6} {:>7} {:>6}", "#", "Player", "Points", "Correct", "Delta"),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }

    let me = app.settings.user_id.as_str();
    for (rank, row) in standings
        .rows
        .iter()
        .enumerate()
        .skip(standings.scroll_offset as usize)
    {
        let style = if row.user_id == me {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let name: String = row.user_id.chars().take(20).collect();
        lines.push(Line::from(Span::styled(
            format!(
                "{:>3}  {:<20} {:>6} {:>7} {:>6}",
                rank + 1,
                name,
                row.score.points,
                row.score.correct,
                row.score.delta
            ),
            style,
        )));
    }

    for err in &standings.source_errors {
        lines.push(Line::from(Span::styled(err.clone(), Style::default().fg(Color::Red))));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = [
        ("1 / 2 / 3", "Picks, Scores, Standings"),
        ("h l  ← →", "previous / next round"),
        ("j k  ↑ ↓", "move between teams, scroll lists"),
        ("Enter", "pick the highlighted team to win"),
        ("p", "enter Super Bowl total points"),
        ("s", "save picks"),
        ("r", "reload saved picks (Standings: reload results)"),
        ("\"", "show or hide logs"),
        ("f", "full screen"),
        ("Esc", "close help"),
        ("q  Ctrl-C", "quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:>12}  "), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(logs, area);
}

fn draw_centered(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
