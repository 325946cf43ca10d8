use munch::game::{Game, StepOutcome, DOT_SCORE, GHOST_SPAWNS, PLAYER_SPAWN};
use munch::maze::{Dir, Maze, Pos, LAYOUT};

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn standard_game() -> Game {
    Game::new(Maze::parse(&LAYOUT).unwrap())
}

#[test]
fn fresh_game_matches_fixed_spawns() {
    let game = standard_game();
    assert_eq!(game.player.pos, PLAYER_SPAWN);
    assert_eq!(game.player.facing, Dir::Right);
    assert!(game.player.mouth_open);
    for (ghost, spawn) in game.ghosts.iter().zip(GHOST_SPAWNS) {
        assert_eq!(ghost.pos, spawn);
    }
    assert_eq!(game.score, 0);
    assert_eq!(game.dots_left(), 236);
}

#[test]
fn reset_from_any_state_is_the_initial_state() {
    let mut game = standard_game();
    let fresh = standard_game();
    let mut rng = StdRng::seed_from_u64(99);

    for i in 0..50 {
        let dir = match i % 4 {
            0 => Dir::Left,
            1 => Dir::Up,
            2 => Dir::Right,
            _ => Dir::Down,
        };
        game.apply_input(dir);
        game.step(&mut rng);
    }
    game.reset();
    assert_eq!(game, fresh);
}

#[test]
fn score_is_monotonic_and_bounded() {
    let mut game = standard_game();
    let mut rng = StdRng::seed_from_u64(5);
    let cap = 236 * DOT_SCORE;
    let mut last = 0;
    for _ in 0..300 {
        let dir = match rng.gen_range(0..4) {
            0 => Dir::Left,
            1 => Dir::Up,
            2 => Dir::Right,
            _ => Dir::Down,
        };
        game.apply_input(dir);
        if game.step(&mut rng) != StepOutcome::Continue {
            last = 0; // round ended, score went back to zero
            continue;
        }
        assert!(game.score >= last);
        assert!(game.score <= cap);
        assert_eq!(
            game.score as usize,
            (236 - game.dots_left()) * DOT_SCORE as usize
        );
        last = game.score;
    }
}

#[test]
fn last_dot_under_player_wins_and_resets() {
    // Player sits on the only dot; the ghosts are stuck shuttling in a
    // dead-end corridor on the far side of a wall.
    let maze = Maze::parse(&["######", "#.#  #", "######"]).unwrap();
    let mut game = Game::with_spawns(maze, Pos::new(1, 1), [Pos::new(3, 1); 4]);
    let fresh = game.clone();
    let mut rng = StdRng::seed_from_u64(11);

    assert_eq!(game.step(&mut rng), StepOutcome::Won(DOT_SCORE));
    assert_eq!(game, fresh);
}

#[test]
fn ghost_on_player_cell_loses_and_resets() {
    // All ghosts spawn on the player's cell and are boxed in, so they
    // cannot wander off before the collision check.
    let maze = Maze::parse(&["#####", "#.#.#", "#####"]).unwrap();
    let mut game = Game::with_spawns(maze, Pos::new(1, 1), [Pos::new(1, 1); 4]);
    let fresh = game.clone();
    let mut rng = StdRng::seed_from_u64(11);

    assert_eq!(game.step(&mut rng), StepOutcome::Lost(DOT_SCORE));
    assert_eq!(game, fresh);
}

#[test]
fn player_moves_match_the_collision_rule() {
    let mut game = standard_game();
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..200 {
        let dir = match rng.gen_range(0..4) {
            0 => Dir::Left,
            1 => Dir::Up,
            2 => Dir::Right,
            _ => Dir::Down,
        };
        let before = game.player.pos;
        let legal = game.maze.can_move(before, dir);
        game.apply_input(dir);
        assert_eq!(game.player.facing, dir);
        if legal {
            assert_eq!(munch::maze::step(before, dir), game.player.pos);
        } else {
            assert_eq!(before, game.player.pos);
        }
    }
}
