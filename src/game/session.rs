use std::time::Instant;

use crate::input::{Button, ButtonSet, Cooldown};

use super::config::GameConfig;
use super::direction::Direction;
use super::food::FoodSpawner;
use super::grid::{Grid, Position};
use super::snake::Snake;
use super::speed::SpeedController;

/// Phase of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    Paused,
    /// Terminal for the session; state is frozen and only the final score
    /// remains interesting
    RoundOver,
}

/// What one poll of the session did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A move was committed this poll
    pub moved: bool,
    /// The committed move landed on the food
    pub ate_food: bool,
    /// The committed move ended the round
    pub round_over: bool,
}

/// One round of the game: integrates input, commits snake moves on the
/// speed controller's schedule, handles food pickup and scoring, and ends
/// on the first collision.
///
/// The session owns all round state; nothing here outlives the round except
/// the final score read by the caller.
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Position,
    spawner: FoodSpawner,
    speed: SpeedController,

    points: u32,
    catches: u32,

    phase: SessionPhase,
    next_move: Instant,
    pause_gate: Cooldown,
    turbo: bool,
}

impl GameSession {
    /// Start a round. `seed` reseeds the food generator (a fresh
    /// high-resolution clock reading per round in production); `now` anchors
    /// the move schedule, with the first move committing immediately.
    pub fn new(config: GameConfig, seed: u64, now: Instant) -> Self {
        let grid = config.grid();
        let snake = Snake::new(grid.center(), Direction::Right, config.initial_snake_length);

        let mut spawner = FoodSpawner::from_seed(seed);
        let food = spawner.spawn(config.initial_food_region, &grid, &snake);
        let speed = SpeedController::new(&config);
        let pause_gate = Cooldown::new(config.pause_cooldown());

        Self {
            config,
            grid,
            snake,
            food,
            spawner,
            speed,
            points: 0,
            catches: 0,
            phase: SessionPhase::Playing,
            next_move: now,
            pause_gate,
            turbo: false,
        }
    }

    /// Advance the session by one poll of the control loop.
    ///
    /// Samples the button snapshot once, commits at most one move when the
    /// deadline has passed, and reports what happened.
    pub fn poll(&mut self, buttons: &ButtonSet, now: Instant) -> TickOutcome {
        if self.phase == SessionPhase::RoundOver {
            return TickOutcome::default();
        }

        self.apply_input(buttons, now);

        if self.phase == SessionPhase::Paused {
            // No moves while paused; keep pushing the deadline so resuming
            // does not force an immediate move, and drop any turbo request.
            self.turbo = false;
            self.next_move = now + self.speed.interval();
            return TickOutcome::default();
        }

        if now < self.next_move {
            return TickOutcome::default();
        }

        let head = self.snake.advance();
        if self.snake.collided(&self.grid) {
            self.phase = SessionPhase::RoundOver;
            return TickOutcome {
                moved: true,
                ate_food: false,
                round_over: true,
            };
        }

        let mut ate_food = false;
        if head == self.food {
            self.snake.grow();
            self.catches += 1;
            // The catch that triggers a level-up still scores at the old
            // multiplier
            self.points += self.speed.multiplier();
            self.speed.on_catch(self.catches);
            self.food = self
                .spawner
                .spawn(self.config.respawn_food_region, &self.grid, &self.snake);
            ate_food = true;
        }

        self.next_move = now + self.speed.tick_interval(self.turbo);
        self.turbo = false;

        TickOutcome {
            moved: true,
            ate_food,
            round_over: false,
        }
    }

    /// Resolve the sampled buttons by fixed priority; first pressed wins
    fn apply_input(&mut self, buttons: &ButtonSet, now: Instant) {
        let Some(button) = buttons.first_pressed() else {
            return;
        };

        match button {
            Button::Left => self.snake.steer(Direction::Left),
            Button::Right => self.snake.steer(Direction::Right),
            Button::Up => self.snake.steer(Direction::Up),
            Button::Down => self.snake.steer(Direction::Down),
            Button::Pause => {
                if self.pause_gate.fire(now) {
                    self.phase = match self.phase {
                        SessionPhase::Playing => SessionPhase::Paused,
                        SessionPhase::Paused => {
                            // Resume with a full interval ahead of the next
                            // move, whatever the deadline was before
                            self.next_move = now + self.speed.interval();
                            SessionPhase::Playing
                        }
                        SessionPhase::RoundOver => SessionPhase::RoundOver,
                    };
                }
            }
            Button::Turbo => {
                if self.phase == SessionPhase::Playing {
                    self.turbo = true;
                }
            }
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::RoundOver
    }

    /// Accumulated points; final score once the round is over
    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn catches(&self) -> u32 {
        self.catches
    }

    /// Current score multiplier; one level mark per increment past the first
    pub fn multiplier(&self) -> u32 {
        self.speed.multiplier()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn interval(&self) -> std::time::Duration {
        self.speed.interval()
    }
}
