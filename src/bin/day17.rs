use std::fmt::{self, Display, Formatter};

use ndarray::prelude::*;
use pathfinding::directed::dijkstra::dijkstra;
use tracing::{event, span, Level};

use aoc2023::{fail, init_tracing, parse_grid, read_input};

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
struct Point {
    row: usize,
    col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Point {
        Point { row, col }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
enum Heading {
    North,
    East,
    South,
    West,
}

const ALL_HEADINGS: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

impl Heading {
    fn reverse(&self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::East => Heading::West,
            Heading::South => Heading::North,
            Heading::West => Heading::East,
        }
    }
}

/// How far a crucible may go in a straight line.  It must move at
/// least `min_run` blocks before it can turn (or stop at the factory),
/// and at most `max_run` before it has to turn.
#[derive(Debug, Clone, Copy)]
struct Limits {
    min_run: usize,
    max_run: usize,
}

const CRUCIBLE: Limits = Limits {
    min_run: 1,
    max_run: 3,
};
const ULTRA_CRUCIBLE: Limits = Limits {
    min_run: 4,
    max_run: 10,
};

/// Search state: where the crucible is, which way it last moved and
/// for how many blocks.  At the start it has not moved at all.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
struct Crucible {
    pos: Point,
    heading: Option<Heading>,
    run: usize,
}

fn decode_cell(cell: char) -> Result<usize, String> {
    match cell.to_digit(10) {
        Some(n) => Ok(n as usize),
        None => Err(format!("invalid (non-numeric) cell '{}'", cell)),
    }
}

#[derive(Debug)]
struct City {
    heat_loss: Array2<usize>,
}

impl TryFrom<&str> for City {
    type Error = String;
    fn try_from(s: &str) -> Result<City, String> {
        Ok(City {
            heat_loss: parse_grid(s, decode_cell)?,
        })
    }
}

impl City {
    pub fn get(&self, p: &Point) -> usize {
        self.heat_loss[(p.row, p.col)]
    }

    pub fn top_left(&self) -> Point {
        Point::new(0, 0)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.heat_loss.nrows() - 1, self.heat_loss.ncols() - 1)
    }

    fn neighbour(&self, p: &Point, heading: Heading) -> Option<Point> {
        let (rows, cols) = self.heat_loss.dim();
        match heading {
            Heading::North => p.row.checked_sub(1).map(|r| Point::new(r, p.col)),
            Heading::West => p.col.checked_sub(1).map(|c| Point::new(p.row, c)),
            Heading::South if p.row + 1 < rows => Some(Point::new(p.row + 1, p.col)),
            Heading::East if p.col + 1 < cols => Some(Point::new(p.row, p.col + 1)),
            _ => None,
        }
    }

    fn moves(&self, crucible: &Crucible, limits: Limits) -> Vec<(Crucible, usize)> {
        let mut result = Vec::with_capacity(3);
        for heading in ALL_HEADINGS {
            let run = match crucible.heading {
                None => 1,
                Some(current) if current == heading => {
                    if crucible.run >= limits.max_run {
                        continue;
                    }
                    crucible.run + 1
                }
                Some(current) if current.reverse() == heading => {
                    continue;
                }
                Some(_) => {
                    if crucible.run < limits.min_run {
                        continue;
                    }
                    1
                }
            };
            if let Some(pos) = self.neighbour(&crucible.pos, heading) {
                result.push((
                    Crucible {
                        pos,
                        heading: Some(heading),
                        run,
                    },
                    self.get(&pos),
                ));
            }
        }
        result
    }

    /// Least heat lost getting from the top left to the bottom right,
    /// or `None` if the crucible cannot get there at all.  Blocks may
    /// cost nothing.
    fn least_heat_loss(&self, limits: Limits) -> Option<usize> {
        let span = span!(Level::DEBUG, "least_heat_loss", ?limits);
        let _enter = span.enter();
        let start = Crucible {
            pos: self.top_left(),
            heading: None,
            run: 0,
        };
        let end = self.bottom_right();
        let successors = |c: &Crucible| self.moves(c, limits);
        let success =
            |c: &Crucible| c.pos == end && (c.heading.is_none() || c.run >= limits.min_run);
        match dijkstra(&start, successors, success) {
            Some((path, cost)) => {
                event!(
                    Level::DEBUG,
                    "reached {} in {} moves with heat loss {}",
                    end,
                    path.len() - 1,
                    cost
                );
                Some(cost)
            }
            None => {
                event!(Level::WARN, "no path to {}", end);
                None
            }
        }
    }
}

#[cfg(test)]
const SAMPLE: &str = concat!(
    "2413432311323\n",
    "3215453535623\n",
    "3255245654254\n",
    "3446585845452\n",
    "4546657867536\n",
    "1438598798454\n",
    "4457876987766\n",
    "3637877979653\n",
    "4654967986887\n",
    "4564679986453\n",
    "1224686865563\n",
    "2546548887735\n",
    "4322674655533\n",
);

#[cfg(test)]
const SAMPLE_ULTRA: &str = concat!(
    "111111111111\n",
    "999999999991\n",
    "999999999991\n",
    "999999999991\n",
    "999999999991\n",
);

#[test]
fn test_moves() {
    let city = City::try_from("123\n456\n789").expect("valid test data");
    let start = Crucible {
        pos: Point::new(0, 0),
        heading: None,
        run: 0,
    };
    let moves = city.moves(&start, CRUCIBLE);
    assert_eq!(moves.len(), 2);
    assert!(moves.contains(&(
        Crucible {
            pos: Point::new(0, 1),
            heading: Some(Heading::East),
            run: 1
        },
        2
    )));

    // At the end of a full run, only turns are allowed.
    let tired = Crucible {
        pos: Point::new(1, 1),
        heading: Some(Heading::East),
        run: 3,
    };
    let headings: Vec<Option<Heading>> = city
        .moves(&tired, CRUCIBLE)
        .iter()
        .map(|(c, _)| c.heading)
        .collect();
    assert_eq!(headings, vec![Some(Heading::North), Some(Heading::South)]);

    // An ultra crucible must keep going.
    let fresh = Crucible {
        pos: Point::new(1, 1),
        heading: Some(Heading::East),
        run: 1,
    };
    let headings: Vec<Option<Heading>> = city
        .moves(&fresh, ULTRA_CRUCIBLE)
        .iter()
        .map(|(c, _)| c.heading)
        .collect();
    assert_eq!(headings, vec![Some(Heading::East)]);
}

#[test]
fn test_least_heat_loss() {
    let city = City::try_from(SAMPLE).expect("valid test data");
    assert_eq!(city.least_heat_loss(CRUCIBLE), Some(102));
    assert_eq!(city.least_heat_loss(ULTRA_CRUCIBLE), Some(94));
    let city = City::try_from(SAMPLE_ULTRA).expect("valid test data");
    assert_eq!(city.least_heat_loss(ULTRA_CRUCIBLE), Some(71));
}

#[test]
fn test_no_path() {
    // Too short for an ultra crucible to ever stop at the end.
    let city = City::try_from("111\n111").expect("valid test data");
    assert_eq!(city.least_heat_loss(CRUCIBLE), Some(3));
    assert_eq!(city.least_heat_loss(ULTRA_CRUCIBLE), None);
    let city = City::try_from("7").expect("valid test data");
    assert_eq!(city.least_heat_loss(ULTRA_CRUCIBLE), Some(0));
}

#[test]
fn test_free_blocks() {
    let city = City::try_from("01000\n01010\n00010").expect("valid test data");
    assert_eq!(city.least_heat_loss(CRUCIBLE), Some(0));
    let city = City::try_from("00\n90").expect("valid test data");
    assert_eq!(city.least_heat_loss(CRUCIBLE), Some(0));
}

fn part1(city: &City) {
    match city.least_heat_loss(CRUCIBLE) {
        Some(n) => println!("Day 17 part 1: {}", n),
        None => println!("Day 17 part 1: no path found"),
    }
}

fn part2(city: &City) {
    match city.least_heat_loss(ULTRA_CRUCIBLE) {
        Some(n) => println!("Day 17 part 2: {}", n),
        None => println!("Day 17 part 2: no path found"),
    }
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match City::try_from(input.as_str()) {
        Ok(city) => {
            part1(&city);
            part2(&city);
        }
        Err(e) => fail(&e),
    }
}
