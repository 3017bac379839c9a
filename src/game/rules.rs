//! The match state machine: steering, movement, growth, collisions and
//! fruit placement. Nothing in here touches the ECS, so a match can be
//! driven tick by tick from tests.

use std::collections::VecDeque;
use std::fmt;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::{
    ARENA_HEIGHT, ARENA_WIDTH, BONUS_FRUIT_EVERY, Direction, FRUIT_POINTS, INITIAL_SNAKE_LENGTH,
    INITIAL_SNAKE_POSITION, Position, SPEED_STEP,
};

/// Playable area in cells; `(0, 0)` is the bottom-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
}

impl Default for Arena {
    fn default() -> Self {
        Arena {
            width: ARENA_WIDTH as i32,
            height: ARENA_HEIGHT as i32,
        }
    }
}

impl Arena {
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }
}

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    Wall,
    SelfCollision,
}

impl fmt::Display for GameOverCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverCause::Wall => f.write_str("hit the wall"),
            GameOverCause::SelfCollision => f.write_str("bit itself"),
        }
    }
}

/// Result of a single [`Match::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate { fruit: Position, bonus: bool },
    Over(GameOverCause),
}

/// Head-first body plus the current heading.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// A straight snake of `len` cells whose tail trails away from `direction`.
    pub fn new(head: Position, len: usize, direction: Direction) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(len.max(1));
        let mut cell = head;
        for _ in 0..len.max(1) {
            body.push_back(cell);
            cell = cell.step(behind);
        }
        Snake { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Turns toward `requested` unless that would reverse the snake onto itself.
    pub fn steer(&mut self, requested: Direction) -> bool {
        if requested == self.direction.opposite() {
            return false;
        }
        self.direction = requested;
        true
    }

    /// Prepends the next head cell. The tail stays until [`Snake::drop_tail`].
    pub fn advance(&mut self) -> Position {
        let head = self.head().step(self.direction);
        self.body.push_front(head);
        head
    }

    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| segment.collides_with(&head))
    }
}

/// Picks a random cell holding neither snake nor fruit. `None` when the board is full.
pub fn spawn_fruit<R: Rng + ?Sized>(
    arena: &Arena,
    snake: &Snake,
    fruits: &[Position],
    rng: &mut R,
) -> Option<Position> {
    let free: Vec<Position> = arena
        .cells()
        .filter(|cell| !snake.occupies(*cell) && !fruits.contains(cell))
        .collect();
    free.choose(rng).copied()
}

/// State of one game from start to game over.
#[derive(Clone, Debug)]
pub struct Match {
    arena: Arena,
    snake: Snake,
    fruits: Vec<Position>,
    score: u32,
    speed: u32,
    over: Option<GameOverCause>,
}

impl Match {
    pub fn new<R: Rng + ?Sized>(arena: Arena, speed: u32, rng: &mut R) -> Self {
        let snake = Snake::new(INITIAL_SNAKE_POSITION, INITIAL_SNAKE_LENGTH, Direction::Right);
        Self::with_snake(arena, snake, speed, rng)
    }

    pub fn with_snake<R: Rng + ?Sized>(arena: Arena, snake: Snake, speed: u32, rng: &mut R) -> Self {
        let fruits = spawn_fruit(&arena, &snake, &[], rng).into_iter().collect();
        Match {
            arena,
            snake,
            fruits,
            score: 0,
            speed: speed.max(1),
            over: None,
        }
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruits(&self) -> &[Position] {
        &self.fruits
    }

    /// Replaces the active fruit set.
    pub fn set_fruits(&mut self, fruits: Vec<Position>) {
        self.fruits = fruits;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks per second.
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn is_over(&self) -> bool {
        self.over.is_some()
    }

    pub fn cause(&self) -> Option<GameOverCause> {
        self.over
    }

    /// Advances the match by one step, steering toward `pending` first.
    pub fn tick<R: Rng + ?Sized>(&mut self, pending: Option<Direction>, rng: &mut R) -> TickOutcome {
        if let Some(cause) = self.over {
            return TickOutcome::Over(cause);
        }

        if let Some(direction) = pending {
            self.snake.steer(direction);
        }

        let head = self.snake.advance();
        let outcome = match self.fruits.iter().position(|fruit| fruit.collides_with(&head)) {
            Some(index) => {
                let fruit = self.fruits.swap_remove(index);
                self.score += FRUIT_POINTS;
                self.speed += SPEED_STEP;
                self.add_fruit(rng);
                let bonus = self.score % BONUS_FRUIT_EVERY == 0;
                if bonus {
                    self.add_fruit(rng);
                }
                TickOutcome::Ate { fruit, bonus }
            }
            None => {
                self.snake.drop_tail();
                TickOutcome::Moved
            }
        };

        let cause = if self.snake.bites_itself() {
            Some(GameOverCause::SelfCollision)
        } else if !self.arena.contains(head) {
            Some(GameOverCause::Wall)
        } else {
            None
        };

        match cause {
            Some(cause) => {
                self.over = Some(cause);
                TickOutcome::Over(cause)
            }
            None => outcome,
        }
    }

    fn add_fruit<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(fruit) = spawn_fruit(&self.arena, &self.snake, &self.fruits, rng) {
            self.fruits.push(fruit);
        }
    }
}
