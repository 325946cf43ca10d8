use std::collections::HashSet;

pub const MAZE_W: usize = 28;
pub const MAZE_H: usize = 29;

/// The fixed board layout. `#` is a wall, `.` a dot, anything else
/// (spaces, the pen gate `-`) is passable empty floor.
pub const LAYOUT: [&str; MAZE_H] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###--### ##.#     ",
    "######.## #      # ##.######",
    "      .   #      #   .      ",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#...##................##...#",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Dot,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    #[error("unknown symbol {0:?} at column {1}, row {2}")]
    UnknownSymbol(char, usize, usize),
    #[error("row {0} is {1} cells wide, expected {2}")]
    BadWidth(usize, usize, usize),
    #[error("layout is empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    grid: Vec<Vec<Tile>>,
}

impl Maze {
    /// Parses an ASCII layout. Every row must be as wide as the first.
    pub fn parse(rows: &[&str]) -> Result<Self, MazeError> {
        let width = rows.first().ok_or(MazeError::Empty)?.chars().count();
        let mut grid = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let count = row.chars().count();
            if count != width {
                return Err(MazeError::BadWidth(y, count, width));
            }
            let mut line = Vec::with_capacity(width);
            for (x, ch) in row.chars().enumerate() {
                line.push(match ch {
                    '#' => Tile::Wall,
                    '.' => Tile::Dot,
                    ' ' | '-' => Tile::Empty,
                    other => return Err(MazeError::UnknownSymbol(other, x, y)),
                });
            }
            grid.push(line);
        }
        Ok(Self {
            width,
            height: rows.len(),
            grid,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile(&self, pos: Pos) -> Tile {
        self.grid[pos.y][pos.x]
    }

    /// A step is legal iff the target cell exists and is not a wall.
    /// Off-grid targets are treated as walls.
    pub fn can_move(&self, pos: Pos, dir: Dir) -> bool {
        let (dx, dy) = dir.delta();
        let nx = pos.x as isize + dx;
        let ny = pos.y as isize + dy;
        if nx < 0 || ny < 0 || nx >= self.width as isize || ny >= self.height as isize {
            return false;
        }
        self.grid[ny as usize][nx as usize] != Tile::Wall
    }

    /// Every cell holding a dot symbol, scanned fresh from the layout.
    pub fn dot_cells(&self) -> HashSet<Pos> {
        let mut dots = HashSet::new();
        for (y, row) in self.grid.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                if *tile == Tile::Dot {
                    dots.insert(Pos::new(x, y));
                }
            }
        }
        dots
    }
}

pub fn step(pos: Pos, dir: Dir) -> Pos {
    let (dx, dy) = dir.delta();
    Pos {
        x: (pos.x as isize + dx) as usize,
        y: (pos.y as isize + dy) as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn layout_dimensions() {
        let maze = Maze::parse(&LAYOUT).unwrap();
        assert_eq!(maze.width(), MAZE_W);
        assert_eq!(maze.height(), MAZE_H);
    }

    #[test]
    fn layout_dot_count() {
        let maze = Maze::parse(&LAYOUT).unwrap();
        assert_eq!(maze.dot_cells().len(), 236);
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = Maze::parse(&["###", "#X#", "###"]).unwrap_err();
        assert!(matches!(err, MazeError::UnknownSymbol('X', 1, 1)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Maze::parse(&["###", "##"]).unwrap_err();
        assert!(matches!(err, MazeError::BadWidth(1, 2, 3)));
    }

    #[test]
    fn gate_and_gaps_are_passable() {
        let maze = Maze::parse(&LAYOUT).unwrap();
        // Pen gate row: `-` cells at (13,12) and (14,12).
        assert_eq!(maze.tile(Pos::new(13, 12)), Tile::Empty);
        // Inside the pen.
        assert_eq!(maze.tile(Pos::new(14, 14)), Tile::Empty);
    }

    #[test]
    fn off_grid_moves_are_illegal() {
        let maze = Maze::parse(&LAYOUT).unwrap();
        // Leftmost cell of the open corridor row.
        assert!(!maze.can_move(Pos::new(0, 14), Dir::Left));
        assert!(!maze.can_move(Pos::new(0, 0), Dir::Up));
        assert!(!maze.can_move(Pos::new(27, 14), Dir::Right));
    }

    #[test]
    fn walls_block_and_floor_admits() {
        let maze = Maze::parse(&LAYOUT).unwrap();
        // (1,1) is a dot cell; up is the border wall, right is floor.
        assert!(!maze.can_move(Pos::new(1, 1), Dir::Up));
        assert!(maze.can_move(Pos::new(1, 1), Dir::Right));
    }
}
