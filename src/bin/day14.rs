use std::collections::HashMap;

use ndarray::prelude::*;
use tracing::{event, Level};

use aoc2023::{fail, init_tracing, parse_grid, read_input, render_grid};

const SPIN_CYCLES: usize = 1_000_000_000;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
enum Rock {
    Round,
    Cube,
    Empty,
}

fn decode_cell(ch: char) -> Result<Rock, String> {
    match ch {
        'O' => Ok(Rock::Round),
        '#' => Ok(Rock::Cube),
        '.' => Ok(Rock::Empty),
        _ => Err(format!("unexpected cell '{}'", ch)),
    }
}

fn show_cell(rock: &Rock) -> char {
    match rock {
        Rock::Round => 'O',
        Rock::Cube => '#',
        Rock::Empty => '.',
    }
}

#[derive(Debug, Clone, Copy)]
enum Tilt {
    North,
    West,
    South,
    East,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Platform {
    cells: Array2<Rock>,
}

impl TryFrom<&str> for Platform {
    type Error = String;
    fn try_from(s: &str) -> Result<Platform, String> {
        Ok(Platform {
            cells: parse_grid(s, decode_cell)?,
        })
    }
}

impl Platform {
    /// Every line of cells, each listed in the order rocks roll
    /// towards (the first cell is the one a rock ends up against).
    fn lines(&self, tilt: Tilt) -> Vec<Vec<(usize, usize)>> {
        let (rows, cols) = self.cells.dim();
        match tilt {
            Tilt::North => (0..cols)
                .map(|c| (0..rows).map(|r| (r, c)).collect())
                .collect(),
            Tilt::South => (0..cols)
                .map(|c| (0..rows).rev().map(|r| (r, c)).collect())
                .collect(),
            Tilt::West => (0..rows)
                .map(|r| (0..cols).map(|c| (r, c)).collect())
                .collect(),
            Tilt::East => (0..rows)
                .map(|r| (0..cols).rev().map(|c| (r, c)).collect())
                .collect(),
        }
    }

    fn tilt(&mut self, tilt: Tilt) {
        for line in self.lines(tilt) {
            let mut free = 0;
            for (i, &pos) in line.iter().enumerate() {
                match self.cells[pos] {
                    Rock::Cube => {
                        free = i + 1;
                    }
                    Rock::Round => {
                        self.cells[pos] = Rock::Empty;
                        self.cells[line[free]] = Rock::Round;
                        free += 1;
                    }
                    Rock::Empty => (),
                }
            }
        }
    }

    fn spin(&mut self) {
        for tilt in [Tilt::North, Tilt::West, Tilt::South, Tilt::East] {
            self.tilt(tilt);
        }
    }

    /// Each round rock weighs as many rows as it is from the south edge.
    fn north_load(&self) -> usize {
        let rows = self.cells.nrows();
        self.cells
            .indexed_iter()
            .filter(|(_, rock)| **rock == Rock::Round)
            .map(|((r, _), _)| rows - r)
            .sum()
    }
}

fn load_after_tilt(platform: &Platform) -> usize {
    let mut platform = platform.clone();
    platform.tilt(Tilt::North);
    platform.north_load()
}

/// Spin until a layout repeats, then jump straight to the layout the
/// final cycle would produce.
fn load_after_spins(platform: &Platform, cycles: usize) -> usize {
    let mut platform = platform.clone();
    let mut seen: HashMap<Array2<Rock>, usize> = HashMap::new();
    let mut loads: Vec<usize> = vec![platform.north_load()];
    seen.insert(platform.cells.clone(), 0);
    for done in 1..=cycles {
        platform.spin();
        loads.push(platform.north_load());
        if let Some(&first) = seen.get(&platform.cells) {
            let period = done - first;
            let index = first + (cycles - first) % period;
            event!(
                Level::DEBUG,
                "cycle {} repeats cycle {}, period {}, using cycle {}",
                done,
                first,
                period,
                index
            );
            return loads[index];
        }
        seen.insert(platform.cells.clone(), done);
    }
    loads[cycles]
}

#[cfg(test)]
const SAMPLE: &str = concat!(
    "O....#....\n",
    "O.OO#....#\n",
    ".....##...\n",
    "OO.#O....O\n",
    ".O.....O#.\n",
    "O.#..O.#.#\n",
    "..O..#O..O\n",
    ".......O..\n",
    "#....###..\n",
    "#OO..#....\n",
);

#[test]
fn test_tilt_north() {
    let mut platform = Platform::try_from(SAMPLE).expect("valid test data");
    platform.tilt(Tilt::North);
    let expected = concat!(
        "OOOO.#.O..\n",
        "OO..#....#\n",
        "OO..O##..O\n",
        "O..#.OO...\n",
        "........#.\n",
        "..#....#.#\n",
        "..O..#.O.O\n",
        "..O.......\n",
        "#....###..\n",
        "#....#....\n",
    );
    assert_eq!(render_grid(&platform.cells, show_cell), expected);
    assert_eq!(platform.north_load(), 136);
}

#[test]
fn test_spin() {
    let mut platform = Platform::try_from(SAMPLE).expect("valid test data");
    platform.spin();
    let expected = concat!(
        ".....#....\n",
        "....#...O#\n",
        "...OO##...\n",
        ".OO#......\n",
        ".....OOO#.\n",
        ".O#...O#.#\n",
        "....O#....\n",
        "......OOOO\n",
        "#...O###..\n",
        "#..OO#....\n",
    );
    assert_eq!(render_grid(&platform.cells, show_cell), expected);
}

#[test]
fn test_loads() {
    let platform = Platform::try_from(SAMPLE).expect("valid test data");
    assert_eq!(load_after_tilt(&platform), 136);
    assert_eq!(load_after_spins(&platform, SPIN_CYCLES), 64);
}

#[test]
fn test_few_spins() {
    let platform = Platform::try_from(SAMPLE).expect("valid test data");
    let mut slow = platform.clone();
    for _ in 0..5 {
        slow.spin();
    }
    assert_eq!(load_after_spins(&platform, 5), slow.north_load());
}

fn part1(platform: &Platform) {
    println!("Day 14 part 1: {}", load_after_tilt(platform));
}

fn part2(platform: &Platform) {
    println!(
        "Day 14 part 2: {}",
        load_after_spins(platform, SPIN_CYCLES)
    );
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match Platform::try_from(input.as_str()) {
        Ok(platform) => {
            event!(
                Level::TRACE,
                "platform:\n{}",
                render_grid(&platform.cells, show_cell)
            );
            part1(&platform);
            part2(&platform);
        }
        Err(e) => fail(&e),
    }
}
