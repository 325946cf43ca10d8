use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::game::Game;
use crate::maze::{Dir, Pos, Tile};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player { facing: Dir, mouth_open: bool },
    Ghost,
    Wall,
    Dot,
    Empty,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const EMPTY_CELL: Cell = Cell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

/// Diff renderer: only cells that changed since the previous frame are
/// redrawn, so a mostly static maze costs almost nothing per frame.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
    width: usize,
    height: usize,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![EMPTY_CELL; width * height],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
            width,
            height,
        }
    }

    pub fn render(&mut self, stdout: &mut Stdout, game: &Game) -> io::Result<()> {
        let needed_h = (self.height + 2) as u16;
        let needed_w = (self.width * CELL_W) as u16;

        stdout.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            stdout.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            stdout.queue(Print(msg))?;
            stdout.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }

        let hud = format!(
            "Score: {}  Dots: {}  (q to quit)",
            game.score,
            game.dots_left()
        );
        if self.needs_full || hud != self.last_hud {
            stdout.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            stdout.queue(SetForegroundColor(Color::White))?;
            stdout.queue(Clear(ClearType::CurrentLine))?;
            stdout.queue(Print(&hud))?;
            stdout.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let cell = cell_for(game, Pos::new(x, y));
                let idx = y * self.width + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(stdout, x, y, cell)?;
                }
            }
        }
        self.needs_full = false;

        stdout.flush()?;
        Ok(())
    }

    fn draw_cell(&self, stdout: &mut Stdout, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player { facing, mouth_open } => player_glyph(facing, mouth_open),
            Glyph::Ghost => "M",
            Glyph::Wall => "██",
            Glyph::Dot => "·",
            Glyph::Empty => "  ",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        stdout.queue(MoveTo(x_pos, y_pos))?;
        stdout.queue(SetForegroundColor(cell.color))?;
        stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            stdout.queue(Print(' '))?;
        }
        stdout.queue(ResetColor)?;
        Ok(())
    }

    /// Prints the round-end banner below the maze. The caller decides how
    /// long it stays up; the next full render repaints over it.
    pub fn banner(&mut self, stdout: &mut Stdout, title: &str, score: u32) -> io::Result<()> {
        let line = format!("{title} - Score: {score}  (press any key)");
        let needed_w = (self.width * CELL_W) as u16;
        let x = self.origin_x + needed_w.saturating_sub(line.len() as u16) / 2;
        stdout.queue(MoveTo(x, self.origin_y + self.height as u16))?;
        stdout.queue(SetForegroundColor(Color::Yellow))?;
        stdout.queue(Print(&line))?;
        stdout.queue(ResetColor)?;
        stdout.flush()?;
        self.needs_full = true;
        Ok(())
    }
}

fn cell_for(game: &Game, pos: Pos) -> Cell {
    if pos == game.player.pos {
        return Cell {
            glyph: Glyph::Player {
                facing: game.player.facing,
                mouth_open: game.player.mouth_open,
            },
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = game.ghosts.iter().find(|g| g.pos == pos) {
        let (r, g, b) = ghost.color;
        return Cell {
            glyph: Glyph::Ghost,
            color: Color::Rgb { r, g, b },
        };
    }
    if game.dots.contains(&pos) {
        return Cell {
            glyph: Glyph::Dot,
            color: Color::White,
        };
    }
    match game.maze.tile(pos) {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        // A dot tile whose dot was eaten renders as floor.
        Tile::Dot | Tile::Empty => EMPTY_CELL,
    }
}

/// The mouth chomps by alternating a directional wedge with a closed disc.
fn player_glyph(facing: Dir, mouth_open: bool) -> &'static str {
    if !mouth_open {
        return "O";
    }
    match facing {
        Dir::Up => "^",
        Dir::Down => "v",
        Dir::Left => "<",
        Dir::Right => ">",
    }
}
