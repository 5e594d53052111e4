use playoff_bracket::{Matchup, RoundKind, Team};
use playoff_bracket::state::BracketState;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Rows per matchup cell: game header, home team, away team.
pub const MATCHUP_HEIGHT: u16 = 3;

/// Blank rows between matchup cells in a column.
const MATCHUP_GAP: u16 = 1;

/// Rows taken by the round title at the top of each column.
const COLUMN_HEADER: u16 = 2;

/// Width of the gutter between round columns.
pub const GUTTER_WIDTH: u16 = 2;

/// Maximum matchup cell width on wide terminals.
const CELL_W_FULL: u16 = 28;

/// Four round columns side by side, wild card on the left.
///
/// ```text
///  Wild Card            Divisional           Conference        Super Bowl
///
///  Game 1               Game 5
///   3 DAL  12-4 ✓        1 SEA  12-4
///   6 DET  11-5          4 CAR  7-8-1
/// ```
pub struct BracketBoard<'a> {
    pub state: &'a BracketState,
    pub view_round: RoundKind,
    /// Row under the cursor within `view_round`: 2 per matchup, home first.
    pub selected_row: usize,
}

impl<'a> Widget for BracketBoard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < COLUMN_HEADER + MATCHUP_HEIGHT {
            return;
        }

        let cell_width = column_width(area.width);
        for round in RoundKind::ALL {
            let x = area.x + round.index() as u16 * (cell_width + GUTTER_WIDTH);
            if x >= area.x + area.width {
                break;
            }
            let width = cell_width.min(area.x + area.width - x);
            let column = Rect::new(x, area.y, width, area.height);
            self.render_column(round, column, buf);
        }
    }
}

impl<'a> BracketBoard<'a> {
    fn render_column(&self, round: RoundKind, area: Rect, buf: &mut Buffer) {
        let is_view = round == self.view_round;
        let title_style = if is_view {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        buf.set_stringn(area.x, area.y, round.label(), area.width as usize, title_style);

        let matchups = self.state.matchups(round);
        if matchups.is_empty() {
            let waiting = format!("{} picks to go", pending_before(self.state, round));
            buf.set_stringn(
                area.x,
                area.y + COLUMN_HEADER,
                waiting,
                area.width as usize,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        for (idx, matchup) in matchups.iter().enumerate() {
            let top = area.y + COLUMN_HEADER + idx as u16 * (MATCHUP_HEIGHT + MATCHUP_GAP);
            if top + MATCHUP_HEIGHT > area.y + area.height {
                break;
            }
            let selected_side = (is_view && self.selected_row / 2 == idx).then_some(self.selected_row % 2);
            draw_matchup_cell(matchup, selected_side, Rect::new(area.x, top, area.width, MATCHUP_HEIGHT), buf);
        }
    }
}

/// Column width that fits four rounds and three gutters in `total_width`.
pub fn column_width(total_width: u16) -> u16 {
    let per_col = total_width.saturating_sub(GUTTER_WIDTH * 3) / 4;
    per_col.clamp(1, CELL_W_FULL)
}

/// Undecided games in the rounds before `round`.
fn pending_before(state: &BracketState, round: RoundKind) -> usize {
    RoundKind::ALL
        .iter()
        .take_while(|r| **r < round)
        .map(|r| r.expected_games() - state.decided_count(*r))
        .sum()
}

fn draw_matchup_cell(matchup: &Matchup, selected_side: Option<usize>, area: Rect, buf: &mut Buffer) {
    let header = format!("Game {}", matchup.id);
    buf.set_stringn(area.x, area.y, header, area.width as usize, Style::default().fg(Color::DarkGray));

    for (side, team) in [&matchup.home, &matchup.away].into_iter().enumerate() {
        let won = matchup.winner.as_deref() == Some(team.abbr.as_str());
        let lost = matchup.loser().is_some_and(|t| t.abbr == team.abbr);
        let mut style = if won {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if lost {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        if selected_side == Some(side) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let line = format_team_line(team, won, area.width as usize);
        buf.set_string(area.x, area.y + 1 + side as u16, line, style);
    }
}

/// `" 3 DAL  12-4      ✓"`, padded or cut to exactly `width` columns.
pub fn format_team_line(team: &Team, won: bool, width: usize) -> String {
    let mark = if won { '✓' } else { ' ' };
    let body = format!("{:>2} {:<4} {}", team.seed, team.abbr, team.record);
    let body_w = width.saturating_sub(2);
    let body: String = body.chars().take(body_w).collect();
    let line = format!("{body:<body_w$} {mark}");
    line.chars().take(width).collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
