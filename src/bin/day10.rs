use std::collections::HashSet;

use ndarray::prelude::*;
use tracing::{event, Level};

use aoc2023::{fail, init_tracing, parse_grid, read_input, render_grid};

type Pos = (usize, usize);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Direction {
    North,
    East,
    South,
    West,
}

const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    fn step(&self, (r, c): Pos, (rows, cols): (usize, usize)) -> Option<Pos> {
        match self {
            Direction::North => r.checked_sub(1).map(|r| (r, c)),
            Direction::West => c.checked_sub(1).map(|c| (r, c)),
            Direction::South if r + 1 < rows => Some((r + 1, c)),
            Direction::East if c + 1 < cols => Some((r, c + 1)),
            _ => None,
        }
    }
}

fn connections(tile: char) -> &'static [Direction] {
    match tile {
        '|' => &[Direction::North, Direction::South],
        '-' => &[Direction::East, Direction::West],
        'L' => &[Direction::North, Direction::East],
        'J' => &[Direction::North, Direction::West],
        '7' => &[Direction::South, Direction::West],
        'F' => &[Direction::South, Direction::East],
        _ => &[],
    }
}

fn tile_for(a: Direction, b: Direction) -> Option<char> {
    "|-LJ7F".chars().find(|&tile| {
        let c = connections(tile);
        c.contains(&a) && c.contains(&b)
    })
}

fn decode_tile(ch: char) -> Result<char, String> {
    match ch {
        '|' | '-' | 'L' | 'J' | '7' | 'F' | '.' | 'S' => Ok(ch),
        _ => Err(format!("unexpected tile '{}'", ch)),
    }
}

#[derive(Debug)]
struct Maze {
    tiles: Array2<char>,
    start: Pos,
}

impl TryFrom<&str> for Maze {
    type Error = String;
    fn try_from(s: &str) -> Result<Maze, String> {
        let tiles = parse_grid(s, decode_tile)?;
        let starts: Vec<Pos> = tiles
            .indexed_iter()
            .filter(|(_, &tile)| tile == 'S')
            .map(|(pos, _)| pos)
            .collect();
        match starts.as_slice() {
            [start] => Ok(Maze {
                start: *start,
                tiles,
            }),
            [] => Err("no start tile".to_string()),
            _ => Err("more than one start tile".to_string()),
        }
    }
}

/// The pipe loop through the start tile.
#[derive(Debug)]
struct PipeLoop {
    start_tile: char,
    cells: Vec<Pos>,
}

impl Maze {
    /// Directions out of the start whose neighbour connects back to it.
    fn start_exits(&self) -> Vec<Direction> {
        ALL_DIRECTIONS
            .iter()
            .copied()
            .filter(|d| match d.step(self.start, self.tiles.dim()) {
                Some(pos) => connections(self.tiles[pos]).contains(&d.opposite()),
                None => false,
            })
            .collect()
    }

    fn find_loop(&self) -> Option<PipeLoop> {
        let exits = self.start_exits();
        let start_tile = match exits.as_slice() {
            &[a, b] => tile_for(a, b)?,
            _ => {
                event!(
                    Level::WARN,
                    "start has {} connecting neighbours, expected 2",
                    exits.len()
                );
                return None;
            }
        };
        let mut cells = vec![self.start];
        let mut heading = exits[0];
        let mut pos = self.start;
        loop {
            pos = heading.step(pos, self.tiles.dim())?;
            if pos == self.start {
                return Some(PipeLoop { start_tile, cells });
            }
            cells.push(pos);
            let came_from = heading.opposite();
            let exits = connections(self.tiles[pos]);
            if !exits.contains(&came_from) {
                event!(Level::WARN, "pipe at {:?} is broken", pos);
                return None;
            }
            heading = match exits.iter().find(|&&d| d != came_from) {
                Some(d) => *d,
                None => {
                    return None;
                }
            };
        }
    }

    /// Count tiles enclosed by the loop.  Scanning each row left to
    /// right, we are inside once we have crossed an odd number of
    /// loop tiles that connect northwards.
    fn enclosed(&self, pipe_loop: &PipeLoop) -> usize {
        let on_loop: HashSet<Pos> = pipe_loop.cells.iter().copied().collect();
        let (rows, cols) = self.tiles.dim();
        let mut result = 0;
        for r in 0..rows {
            let mut inside = false;
            for c in 0..cols {
                let pos = (r, c);
                if on_loop.contains(&pos) {
                    let tile = if pos == self.start {
                        pipe_loop.start_tile
                    } else {
                        self.tiles[pos]
                    };
                    if connections(tile).contains(&Direction::North) {
                        inside = !inside;
                    }
                } else if inside {
                    result += 1;
                }
            }
        }
        result
    }

    fn show_loop(&self, pipe_loop: &PipeLoop) -> String {
        let on_loop: HashSet<Pos> = pipe_loop.cells.iter().copied().collect();
        let shown = Array2::from_shape_fn(self.tiles.dim(), |pos| {
            if on_loop.contains(&pos) {
                self.tiles[pos]
            } else {
                ' '
            }
        });
        render_grid(&shown, |ch| *ch)
    }
}

#[cfg(test)]
const SAMPLE_SQUARE: &str = concat!(".....\n", ".S-7.\n", ".|.|.\n", ".L-J.\n", ".....\n",);

#[cfg(test)]
const SAMPLE_COMPLEX: &str = concat!("..F7.\n", ".FJ|.\n", "SJ.L7\n", "|F--J\n", "LJ...\n",);

#[cfg(test)]
const SAMPLE_ENCLOSED: &str = concat!(
    "...........\n",
    ".S-------7.\n",
    ".|F-----7|.\n",
    ".||.....||.\n",
    ".||.....||.\n",
    ".|L-7.F-J|.\n",
    ".|..|.|..|.\n",
    ".L--J.L--J.\n",
    "...........\n",
);

#[cfg(test)]
const SAMPLE_SQUEEZED: &str = concat!(
    "..........\n",
    ".S------7.\n",
    ".|F----7|.\n",
    ".||....||.\n",
    ".||....||.\n",
    ".|L-7F-J|.\n",
    ".|..||..|.\n",
    ".L--JL--J.\n",
    "..........\n",
);

#[test]
fn test_parse_maze() {
    let maze = Maze::try_from(SAMPLE_COMPLEX).expect("valid test data");
    assert_eq!(maze.start, (2, 0));
    assert!(Maze::try_from("...\n.|.").is_err());
    assert!(Maze::try_from("S.S").is_err());
    assert!(Maze::try_from("S.x").is_err());
}

#[test]
fn test_start_tile() {
    let maze = Maze::try_from(SAMPLE_SQUARE).expect("valid test data");
    let pipe_loop = maze.find_loop().expect("there is a loop");
    assert_eq!(pipe_loop.start_tile, 'F');
    let maze = Maze::try_from(SAMPLE_COMPLEX).expect("valid test data");
    let pipe_loop = maze.find_loop().expect("there is a loop");
    assert_eq!(pipe_loop.start_tile, 'F');
}

#[test]
fn test_farthest() {
    let maze = Maze::try_from(SAMPLE_SQUARE).expect("valid test data");
    assert_eq!(maze.find_loop().expect("there is a loop").cells.len() / 2, 4);
    let maze = Maze::try_from(SAMPLE_COMPLEX).expect("valid test data");
    assert_eq!(maze.find_loop().expect("there is a loop").cells.len() / 2, 8);
}

#[test]
fn test_enclosed() {
    fn enclosed(input: &str) -> usize {
        let maze = Maze::try_from(input).expect("valid test data");
        let pipe_loop = maze.find_loop().expect("there is a loop");
        maze.enclosed(&pipe_loop)
    }
    assert_eq!(enclosed(SAMPLE_SQUARE), 1);
    assert_eq!(enclosed(SAMPLE_COMPLEX), 1);
    assert_eq!(enclosed(SAMPLE_ENCLOSED), 4);
    assert_eq!(enclosed(SAMPLE_SQUEEZED), 4);
}

#[test]
fn test_no_loop() {
    let maze = Maze::try_from("S-.\n...").expect("valid test data");
    assert!(maze.find_loop().is_none());
}

fn part1(maze: &Maze, pipe_loop: &PipeLoop) {
    event!(Level::DEBUG, "loop:\n{}", maze.show_loop(pipe_loop));
    println!("Day 10 part 1: {}", pipe_loop.cells.len() / 2);
}

fn part2(maze: &Maze, pipe_loop: &PipeLoop) {
    println!("Day 10 part 2: {}", maze.enclosed(pipe_loop));
}

fn main() {
    init_tracing("info");
    let input = read_input();
    let maze = match Maze::try_from(input.as_str()) {
        Ok(maze) => maze,
        Err(e) => fail(&e),
    };
    match maze.find_loop() {
        Some(pipe_loop) => {
            part1(&maze, &pipe_loop);
            part2(&maze, &pipe_loop);
        }
        None => fail("there is no loop through the start tile"),
    }
}
