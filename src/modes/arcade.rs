use std::io::{stderr, Stderr};
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::time::interval;
use tracing::{error, info};

use crate::game::{GameConfig, GameSession};
use crate::input::{is_quit_key, ButtonLevels, EdgeTrigger};
use crate::name_entry::NameEntryEditor;
use crate::render::Renderer;
use crate::scores::{FileStorage, HighScoreTable, ScoreStore};

/// Hold times of the purely presentational phases; input is not processed
/// while they run
const SPLASH_HOLD: Duration = Duration::from_millis(2500);
const GAME_OVER_HOLD: Duration = Duration::from_millis(2000);
/// Ack screens ignore input this long so a press from the previous screen
/// cannot leak through
const ACK_COOLDOWN: Duration = Duration::from_millis(400);

/// What the arcade is showing right now.
///
/// Timed holds carry their own deadline; everything else advances on input
/// edges or on the session's own schedule.
enum Screen {
    Splash { until: Instant },
    Round,
    GameOverHold { until: Instant },
    PointsCard,
    NameEntry(NameEntryEditor),
    Leaderboard,
}

/// The forever loop of the cabinet: splash, then round after round, each
/// one flowing through game over, the score card, name entry when the
/// score earns a slot, and the leaderboard.
///
/// Everything runs on one logical thread: the select loop samples input,
/// advances whichever state machine is active and redraws at a fixed rate.
pub struct ArcadeMode {
    config: GameConfig,
    session: GameSession,
    table: HighScoreTable,
    store: ScoreStore<FileStorage>,
    levels: ButtonLevels,
    renderer: Renderer,
    screen: Screen,
    ack: EdgeTrigger,
    should_quit: bool,
}

impl ArcadeMode {
    /// Load the high-score table (initializing the region if needed) and
    /// set up the first round
    pub fn new(config: GameConfig, scores_path: &Path) -> Result<Self> {
        let mut store = ScoreStore::new(FileStorage::new(scores_path));
        let table = store.load().context("Failed to load the high-score table")?;

        let now = Instant::now();
        let session = GameSession::new(config.clone(), clock_seed(), now);

        Ok(Self {
            config,
            session,
            table,
            store,
            levels: ButtonLevels::default(),
            renderer: Renderer::new(),
            screen: Screen::Splash {
                until: now + SPLASH_HOLD,
            },
            ack: EdgeTrigger::new(ACK_COOLDOWN),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;
        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Input and state machines are polled well below the shortest
        // debounce window; rendering runs at 30 FPS
        let mut poll_timer = interval(Duration::from_millis(10));
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(&event, Instant::now());
                    }
                }

                _ = poll_timer.tick() => {
                    self.update(Instant::now());
                }

                _ = render_timer.tick() => {
                    terminal
                        .draw(|frame| self.draw(frame))
                        .context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &Event, now: Instant) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press && is_quit_key(key) {
                self.should_quit = true;
                return;
            }
            self.levels.on_key(key, now);
        }
    }

    /// Advance whichever state machine the current screen runs
    fn update(&mut self, now: Instant) {
        let buttons = self.levels.snapshot(now);

        match &mut self.screen {
            Screen::Splash { until } => {
                if now >= *until {
                    self.start_round(now);
                }
            }

            Screen::Round => {
                let outcome = self.session.poll(&buttons, now);
                if outcome.round_over {
                    info!(
                        points = self.session.points(),
                        catches = self.session.catches(),
                        "round over"
                    );
                    self.screen = Screen::GameOverHold {
                        until: now + GAME_OVER_HOLD,
                    };
                }
            }

            Screen::GameOverHold { until } => {
                if now >= *until {
                    self.arm_ack(now);
                    self.screen = Screen::PointsCard;
                }
            }

            Screen::PointsCard => {
                if self.ack.update(buttons.any_pressed(), now) {
                    let points = self.session.points();
                    if self.table.is_eligible(points) {
                        self.screen = Screen::NameEntry(NameEntryEditor::new(
                            self.config.name_len,
                            &buttons,
                            now,
                        ));
                    } else {
                        self.enter_leaderboard(now);
                    }
                }
            }

            Screen::NameEntry(editor) => {
                if let Some(name) = editor.poll(&buttons, now) {
                    self.commit_name(&name, now);
                }
            }

            Screen::Leaderboard => {
                if self.ack.update(buttons.any_pressed(), now) {
                    self.start_round(now);
                }
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        match &self.screen {
            Screen::Splash { .. } => self.renderer.render_splash(frame),
            Screen::Round => self.renderer.render_session(frame, &self.session),
            Screen::GameOverHold { .. } => self.renderer.render_game_over(frame),
            Screen::PointsCard => self.renderer.render_points(frame, self.session.points()),
            Screen::NameEntry(editor) => self.renderer.render_name_entry(frame, editor),
            Screen::Leaderboard => self.renderer.render_scores(frame, &self.table),
        }
    }

    fn start_round(&mut self, now: Instant) {
        self.session = GameSession::new(self.config.clone(), clock_seed(), now);
        self.screen = Screen::Round;
    }

    fn commit_name(&mut self, name: &str, now: Instant) {
        let points = self.session.points();
        info!(name, points, "name committed");

        if self.table.insert(name, points) {
            // The table is flushed right away so a power cycle cannot lose
            // the entry; a write failure costs persistence, not the round
            if let Err(err) = self.store.save(&self.table) {
                error!("failed to persist scores: {:#}", err);
            }
        }
        self.enter_leaderboard(now);
    }

    fn enter_leaderboard(&mut self, now: Instant) {
        self.arm_ack(now);
        self.screen = Screen::Leaderboard;
    }

    /// Fresh ack trigger, primed as if pressed so a button still held from
    /// the previous screen must be released first
    fn arm_ack(&mut self, now: Instant) {
        self.ack = EdgeTrigger::new(ACK_COOLDOWN);
        self.ack.update(true, now);
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Per-round seed for the food generator
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}
