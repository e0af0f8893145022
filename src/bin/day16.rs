use ndarray::prelude::*;
use tracing::{event, Level};

use aoc2023::{fail, init_tracing, parse_grid, read_input, render_grid};

type Pos = (usize, usize);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    fn bit(&self) -> u8 {
        match self {
            Heading::Up => 1,
            Heading::Down => 2,
            Heading::Left => 4,
            Heading::Right => 8,
        }
    }

    fn step(&self, (r, c): Pos, (rows, cols): (usize, usize)) -> Option<Pos> {
        match self {
            Heading::Up => r.checked_sub(1).map(|r| (r, c)),
            Heading::Left => c.checked_sub(1).map(|c| (r, c)),
            Heading::Down if r + 1 < rows => Some((r + 1, c)),
            Heading::Right if c + 1 < cols => Some((r, c + 1)),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Tile {
    Empty,
    Slash,
    Backslash,
    SplitVertical,
    SplitHorizontal,
}

fn decode_tile(ch: char) -> Result<Tile, String> {
    match ch {
        '.' => Ok(Tile::Empty),
        '/' => Ok(Tile::Slash),
        '\\' => Ok(Tile::Backslash),
        '|' => Ok(Tile::SplitVertical),
        '-' => Ok(Tile::SplitHorizontal),
        _ => Err(format!("unexpected tile '{}'", ch)),
    }
}

impl Tile {
    /// Headings a beam leaves this tile with, given the heading it
    /// arrived with.
    fn redirect(&self, heading: Heading) -> Vec<Heading> {
        use Heading::*;
        match (self, heading) {
            (Tile::Empty, h) => vec![h],
            (Tile::Slash, Right) => vec![Up],
            (Tile::Slash, Up) => vec![Right],
            (Tile::Slash, Left) => vec![Down],
            (Tile::Slash, Down) => vec![Left],
            (Tile::Backslash, Right) => vec![Down],
            (Tile::Backslash, Down) => vec![Right],
            (Tile::Backslash, Left) => vec![Up],
            (Tile::Backslash, Up) => vec![Left],
            (Tile::SplitVertical, Left | Right) => vec![Up, Down],
            (Tile::SplitVertical, h) => vec![h],
            (Tile::SplitHorizontal, Up | Down) => vec![Left, Right],
            (Tile::SplitHorizontal, h) => vec![h],
        }
    }
}

struct Contraption {
    tiles: Array2<Tile>,
}

impl TryFrom<&str> for Contraption {
    type Error = String;
    fn try_from(s: &str) -> Result<Contraption, String> {
        Ok(Contraption {
            tiles: parse_grid(s, decode_tile)?,
        })
    }
}

impl Contraption {
    /// Follow a beam entering `start` with `heading`.  The result
    /// records, per cell, the set of headings beams have entered it
    /// with; a beam that repeats one of those is already accounted for.
    fn trace(&self, start: Pos, heading: Heading) -> Array2<u8> {
        let dim = self.tiles.dim();
        let mut seen: Array2<u8> = Array2::zeros(dim);
        let mut beams: Vec<(Pos, Heading)> = vec![(start, heading)];
        while let Some((pos, heading)) = beams.pop() {
            if seen[pos] & heading.bit() != 0 {
                continue;
            }
            seen[pos] |= heading.bit();
            for out in self.tiles[pos].redirect(heading) {
                if let Some(next) = out.step(pos, dim) {
                    beams.push((next, out));
                }
            }
        }
        seen
    }

    fn energized(&self, start: Pos, heading: Heading) -> usize {
        self.trace(start, heading).iter().filter(|&&h| h != 0).count()
    }

    fn entry_points(&self) -> Vec<(Pos, Heading)> {
        let (rows, cols) = self.tiles.dim();
        let mut result = Vec::with_capacity(2 * (rows + cols));
        for c in 0..cols {
            result.push(((0, c), Heading::Down));
            result.push(((rows - 1, c), Heading::Up));
        }
        for r in 0..rows {
            result.push(((r, 0), Heading::Right));
            result.push(((r, cols - 1), Heading::Left));
        }
        result
    }

    fn most_energized(&self) -> usize {
        self.entry_points()
            .into_iter()
            .map(|(pos, heading)| self.energized(pos, heading))
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
const SAMPLE: &str = concat!(
    r".|...\....", "\n",
    r"|.-.\.....", "\n",
    r".....|-...", "\n",
    r"........|.", "\n",
    r"..........", "\n",
    r".........\", "\n",
    r"..../.\\..", "\n",
    r".-.-/..|..", "\n",
    r".|....-|.\", "\n",
    r"..//.|....", "\n",
);

#[test]
fn test_redirect() {
    assert_eq!(Tile::Slash.redirect(Heading::Right), vec![Heading::Up]);
    assert_eq!(Tile::Backslash.redirect(Heading::Up), vec![Heading::Left]);
    assert_eq!(
        Tile::SplitVertical.redirect(Heading::Right),
        vec![Heading::Up, Heading::Down]
    );
    assert_eq!(
        Tile::SplitHorizontal.redirect(Heading::Left),
        vec![Heading::Left]
    );
}

#[test]
fn test_energized() {
    let contraption = Contraption::try_from(SAMPLE).expect("valid test data");
    let seen = contraption.trace((0, 0), Heading::Right);
    let expected = concat!(
        "######....\n",
        ".#...#....\n",
        ".#...#####\n",
        ".#...##...\n",
        ".#...##...\n",
        ".#...##...\n",
        ".#..####..\n",
        "########..\n",
        ".#######..\n",
        ".#...#.#..\n",
    );
    assert_eq!(
        render_grid(&seen, |&h| if h != 0 { '#' } else { '.' }),
        expected
    );
    assert_eq!(contraption.energized((0, 0), Heading::Right), 46);
}

#[test]
fn test_most_energized() {
    let contraption = Contraption::try_from(SAMPLE).expect("valid test data");
    assert_eq!(contraption.energized((0, 3), Heading::Down), 51);
    assert_eq!(contraption.most_energized(), 51);
}

fn part1(contraption: &Contraption) {
    println!(
        "Day 16 part 1: {}",
        contraption.energized((0, 0), Heading::Right)
    );
}

fn part2(contraption: &Contraption) {
    println!("Day 16 part 2: {}", contraption.most_energized());
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match Contraption::try_from(input.as_str()) {
        Ok(contraption) => {
            event!(
                Level::DEBUG,
                "{} entry points",
                contraption.entry_points().len()
            );
            part1(&contraption);
            part2(&contraption);
        }
        Err(e) => fail(&e),
    }
}
