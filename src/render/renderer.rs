use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{GameSession, Position, SessionPhase};
use crate::name_entry::NameEntryEditor;
use crate::scores::HighScoreTable;

// Palette, one entry per thing the board draws
const COLOR_WALL: Color = Color::Cyan;
const COLOR_FOOD: Color = Color::Green;
const COLOR_HEAD: Color = Color::LightMagenta;
const COLOR_BODY_EVEN: Color = Color::Blue;
const COLOR_BODY_ODD: Color = Color::LightBlue;
const COLOR_TITLE: Color = Color::Red;
const COLOR_SCORE: Color = Color::Green;
const COLOR_LEVEL_MARK: Color = Color::Red;

/// Draws every screen of the game onto a ratatui frame.
///
/// Pure side effects; nothing here feeds back into the game state.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Startup splash
    pub fn render_splash(&self, frame: &mut Frame) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "W O N S Z",
                Style::default()
                    .fg(COLOR_TITLE)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("tududu", Style::default().fg(Color::Gray))),
            Line::from(Span::styled("tududu", Style::default().fg(Color::DarkGray))),
        ];

        let card = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        );
        frame.render_widget(card, centered(frame.area(), 40, 9));
    }

    /// The board plus the score header and controls footer
    pub fn render_session(&self, frame: &mut Frame, session: &GameSession) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.score_header(session), chunks[0]);
        frame.render_widget(self.board(session), chunks[1]);
        frame.render_widget(self.controls_footer(), chunks[2]);
    }

    fn board<'a>(&self, session: &'a GameSession) -> Paragraph<'a> {
        let grid = session.grid();
        let segments = session.snake().segments();
        let food = session.food();

        let mut lines = Vec::with_capacity(grid.height as usize);
        for y in 0..grid.height {
            let mut spans = Vec::with_capacity(grid.width as usize);
            for x in 0..grid.width {
                let pos = Position::new(x, y);

                let cell = if grid.on_wall_ring(pos) {
                    Span::styled("█", Style::default().fg(COLOR_WALL))
                } else if pos == food {
                    Span::styled(
                        "●",
                        Style::default().fg(COLOR_FOOD).add_modifier(Modifier::BOLD),
                    )
                } else if let Some(i) = segments.iter().position(|&s| s == pos) {
                    if i == 0 {
                        Span::styled(
                            "█",
                            Style::default().fg(COLOR_HEAD).add_modifier(Modifier::BOLD),
                        )
                    } else if i % 2 == 0 {
                        Span::styled("█", Style::default().fg(COLOR_BODY_EVEN))
                    } else {
                        Span::styled("█", Style::default().fg(COLOR_BODY_ODD))
                    }
                } else {
                    Span::raw(" ")
                };

                spans.push(cell);
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).alignment(Alignment::Center)
    }

    fn score_header<'a>(&self, session: &'a GameSession) -> Paragraph<'a> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.points().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Catches: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.catches().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
        ];

        // One mark per level gained, the way the original pips the top row
        let marks = session.multiplier().saturating_sub(1) as usize;
        if marks > 0 {
            spans.push(Span::styled(
                "▪".repeat(marks),
                Style::default().fg(COLOR_LEVEL_MARK),
            ));
        }

        if session.phase() == SessionPhase::Paused {
            spans.push(Span::styled(
                "  PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn controls_footer(&self) -> Paragraph<'_> {
        let line = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" steer | "),
            Span::styled("SPACE", Style::default().fg(Color::Cyan)),
            Span::raw(" turbo | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]);
        Paragraph::new(line).alignment(Alignment::Center)
    }

    /// Banner shown while the round-over hold runs
    pub fn render_game_over(&self, frame: &mut Frame) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default()
                    .fg(COLOR_TITLE)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        let card = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_TITLE)),
        );
        frame.render_widget(card, centered(frame.area(), 30, 6));
    }

    /// Final score card, waiting for an acknowledgment
    pub fn render_points(&self, frame: &mut Frame, points: u32) {
        let noun = if points == 1 { "point" } else { "points" };
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "You've got",
                Style::default().fg(COLOR_SCORE),
            )),
            Line::from(Span::styled(
                points.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(noun, Style::default().fg(COLOR_SCORE))),
            Line::from(""),
            Line::from(Span::styled(
                "press any button",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let card = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        );
        frame.render_widget(card, centered(frame.area(), 36, 10));
    }

    /// Letter picker: chosen slots with the scroll strip on the cursor slot
    pub fn render_name_entry(&self, frame: &mut Frame, editor: &NameEntryEditor) {
        let (above, center, below) = editor.preview();
        let cursor = editor.current_slot();

        let mut top = Vec::new();
        let mut middle = Vec::new();
        let mut bottom = Vec::new();
        for slot in 0..editor.name_len() {
            if slot == cursor {
                top.push(Span::styled(
                    format!(" {} ", above),
                    Style::default().fg(Color::DarkGray),
                ));
                middle.push(Span::styled(
                    format!(" {} ", center),
                    Style::default()
                        .fg(Color::LightMagenta)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ));
                bottom.push(Span::styled(
                    format!(" {} ", below),
                    Style::default().fg(Color::DarkGray),
                ));
            } else {
                let shown = editor.slot_char(slot).unwrap_or('·');
                top.push(Span::raw("   "));
                middle.push(Span::styled(
                    format!(" {} ", shown),
                    Style::default().fg(Color::White),
                ));
                bottom.push(Span::raw("   "));
            }
        }

        let text = vec![
            Line::from(Span::styled(
                "enter your name",
                Style::default().fg(Color::Yellow),
            )),
            Line::from(""),
            Line::from(top),
            Line::from(middle),
            Line::from(bottom),
            Line::from(""),
            Line::from(Span::styled(
                "↑↓ letter | ←→ slot | SPACE commit",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let card = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        );
        frame.render_widget(card, centered(frame.area(), 44, 11));
    }

    /// Ranked leaderboard, or the empty-table card
    pub fn render_scores(&self, frame: &mut Frame, table: &HighScoreTable) {
        let view = table.rank_view();

        let mut text = vec![
            Line::from(Span::styled(
                "HIGH SCORES",
                Style::default()
                    .fg(COLOR_SCORE)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if view.is_empty() {
            text.push(Line::from(Span::raw("No High Scores")));
            text.push(Line::from(""));
            text.push(Line::from(Span::raw("Play some games")));
        } else {
            for (rank, entry) in view.iter().enumerate() {
                text.push(Line::from(vec![
                    Span::styled(
                        format!("{:>2}. ", rank + 1),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{:<6}", entry.name),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!("{:>8}", entry.points),
                        Style::default().fg(COLOR_SCORE),
                    ),
                ]));
            }
        }

        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "press any button",
            Style::default().fg(Color::DarkGray),
        )));

        let card = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        );
        frame.render_widget(card, centered(frame.area(), 36, 18));
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A centered rect of at most the given size within `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
