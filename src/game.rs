use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::maze::{step, Dir, Maze, Pos};

pub const DOT_SCORE: u32 = 10;

pub const PLAYER_SPAWN: Pos = Pos::new(14, 23);
pub const PLAYER_SPAWN_FACING: Dir = Dir::Right;

pub const GHOST_SPAWNS: [Pos; 4] = [
    Pos::new(13, 14),
    Pos::new(14, 14),
    Pos::new(15, 14),
    Pos::new(16, 14),
];

/// Classic arcade ghost palette: red, cyan, pink, orange.
pub const GHOST_COLORS: [(u8, u8, u8); 4] = [
    (255, 0, 0),
    (0, 255, 255),
    (255, 184, 255),
    (255, 184, 82),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub facing: Dir,
    pub mouth_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ghost {
    pub pos: Pos,
    /// Cosmetic only; collisions are cell-exact.
    pub facing: Dir,
    pub color: (u8, u8, u8),
}

/// What a simulation step ended with. Won/Lost carry the final score;
/// the game has already been reset when they are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Won(u32),
    Lost(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub maze: Maze,
    pub player: Player,
    pub ghosts: [Ghost; 4],
    pub dots: HashSet<Pos>,
    pub score: u32,
    player_spawn: Pos,
    ghost_spawns: [Pos; 4],
}

impl Game {
    pub fn new(maze: Maze) -> Self {
        Self::with_spawns(maze, PLAYER_SPAWN, GHOST_SPAWNS)
    }

    /// Spawn points are injectable so small hand-written mazes can be
    /// simulated in tests; `new` always uses the standard ones.
    pub fn with_spawns(maze: Maze, player_spawn: Pos, ghost_spawns: [Pos; 4]) -> Self {
        let dots = maze.dot_cells();
        let mut ghosts = [Ghost {
            pos: player_spawn,
            facing: PLAYER_SPAWN_FACING,
            color: GHOST_COLORS[0],
        }; 4];
        for (i, ghost) in ghosts.iter_mut().enumerate() {
            ghost.pos = ghost_spawns[i];
            ghost.color = GHOST_COLORS[i];
        }
        Self {
            maze,
            player: Player {
                pos: player_spawn,
                facing: PLAYER_SPAWN_FACING,
                mouth_open: true,
            },
            ghosts,
            dots,
            score: 0,
            player_spawn,
            ghost_spawns,
        }
    }

    /// Full reset: spawns, default facing, score 0, dot set rescanned.
    pub fn reset(&mut self) {
        self.player = Player {
            pos: self.player_spawn,
            facing: PLAYER_SPAWN_FACING,
            mouth_open: true,
        };
        for (i, ghost) in self.ghosts.iter_mut().enumerate() {
            ghost.pos = self.ghost_spawns[i];
            ghost.facing = PLAYER_SPAWN_FACING;
            ghost.color = GHOST_COLORS[i];
        }
        self.dots = self.maze.dot_cells();
        self.score = 0;
    }

    /// Handles one directional key event. Facing turns to the pressed
    /// direction even when the move is blocked; the position only changes
    /// when the target cell is not a wall.
    pub fn apply_input(&mut self, dir: Dir) {
        self.player.facing = dir;
        if self.maze.can_move(self.player.pos, dir) {
            self.player.pos = step(self.player.pos, dir);
        }
    }

    /// Advances the world by one frame: mouth animation, ghost wander,
    /// dot pickup, then the terminal checks. Loss wins over win; both
    /// reset the whole game before returning.
    pub fn step(&mut self, rng: &mut impl Rng) -> StepOutcome {
        self.player.mouth_open = !self.player.mouth_open;
        self.move_ghosts(rng);
        self.eat_dot();

        if self.ghost_on_player() {
            let score = self.score;
            self.reset();
            return StepOutcome::Lost(score);
        }
        if self.dots.is_empty() {
            let score = self.score;
            self.reset();
            return StepOutcome::Won(score);
        }
        StepOutcome::Continue
    }

    fn move_ghosts(&mut self, rng: &mut impl Rng) {
        for ghost in self.ghosts.iter_mut() {
            let mut legal = Vec::with_capacity(4);
            for dir in Dir::ALL {
                if self.maze.can_move(ghost.pos, dir) {
                    legal.push(dir);
                }
            }
            // A fully boxed-in ghost stays put this frame.
            if let Some(&dir) = legal.choose(rng) {
                ghost.pos = step(ghost.pos, dir);
                ghost.facing = dir;
            }
        }
    }

    fn eat_dot(&mut self) {
        if self.dots.remove(&self.player.pos) {
            self.score += DOT_SCORE;
        }
    }

    fn ghost_on_player(&self) -> bool {
        self.ghosts.iter().any(|g| g.pos == self.player.pos)
    }

    pub fn dots_left(&self) -> usize {
        self.dots.len()
    }
}
