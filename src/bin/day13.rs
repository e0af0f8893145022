use ndarray::prelude::*;
use tracing::{event, Level};

use aoc2023::{fail, init_tracing, parse_grid, read_input};

/// Each row and each column packed into a bitmask, rock being 1.
#[derive(Debug)]
struct Pattern {
    rows: Vec<u64>,
    cols: Vec<u64>,
}

fn decode_cell(ch: char) -> Result<bool, String> {
    match ch {
        '#' => Ok(true),
        '.' => Ok(false),
        _ => Err(format!("unexpected cell '{}'", ch)),
    }
}

fn pack<'a, I>(cells: I) -> u64
where
    I: Iterator<Item = &'a bool>,
{
    cells.fold(0, |acc, &rock| (acc << 1) | u64::from(rock))
}

impl TryFrom<&str> for Pattern {
    type Error = String;
    fn try_from(s: &str) -> Result<Pattern, String> {
        let grid: Array2<bool> = parse_grid(s, decode_cell)?;
        if grid.nrows() > 64 || grid.ncols() > 64 {
            return Err(format!("pattern {:?} is too large", grid.dim()));
        }
        Ok(Pattern {
            rows: grid.rows().into_iter().map(|row| pack(row.iter())).collect(),
            cols: grid
                .columns()
                .into_iter()
                .map(|col| pack(col.iter()))
                .collect(),
        })
    }
}

/// Find the line of reflection in `lines` where the mirrored halves
/// differ in exactly `smudges` cells.  The result is the number of
/// lines before the mirror.
fn find_reflection(lines: &[u64], smudges: u32) -> Option<usize> {
    (1..lines.len()).find(|&mirror| {
        let before = lines[..mirror].iter().rev();
        let after = lines[mirror..].iter();
        let differences: u32 = before.zip(after).map(|(a, b)| (a ^ b).count_ones()).sum();
        differences == smudges
    })
}

impl Pattern {
    fn summary(&self, smudges: u32) -> Option<usize> {
        if let Some(cols) = find_reflection(&self.cols, smudges) {
            Some(cols)
        } else {
            find_reflection(&self.rows, smudges).map(|rows| rows * 100)
        }
    }
}

fn parse_patterns(input: &str) -> Result<Vec<Pattern>, String> {
    input
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(Pattern::try_from)
        .collect()
}

fn total_summary(patterns: &[Pattern], smudges: u32) -> usize {
    patterns
        .iter()
        .enumerate()
        .map(|(i, p)| match p.summary(smudges) {
            Some(n) => {
                event!(Level::DEBUG, "pattern {} => {}", i + 1, n);
                n
            }
            None => {
                event!(Level::WARN, "pattern {} has no line of reflection", i + 1);
                0
            }
        })
        .sum()
}

#[cfg(test)]
const SAMPLE: &str = concat!(
    "#.##..##.\n",
    "..#.##.#.\n",
    "##......#\n",
    "##......#\n",
    "..#.##.#.\n",
    "..##..###\n",
    "#.##..##.\n",
    "\n",
    "#...##..#\n",
    "#....#..#\n",
    "..##..###\n",
    "#####.##.\n",
    "#####.##.\n",
    "..##..###\n",
    "#....#..#\n",
);

#[test]
fn test_pack() {
    let pattern = Pattern::try_from("#.\n.#\n##").expect("valid pattern");
    assert_eq!(pattern.rows, vec![0b10, 0b01, 0b11]);
    assert_eq!(pattern.cols, vec![0b101, 0b011]);
    assert!(Pattern::try_from("#?").is_err());
}

#[test]
fn test_find_reflection() {
    assert_eq!(find_reflection(&[1, 2, 2, 1], 0), Some(2));
    assert_eq!(find_reflection(&[1, 2, 3], 0), None);
    assert_eq!(find_reflection(&[3, 1], 1), Some(1));
}

#[test]
fn test_summary() {
    let patterns = parse_patterns(SAMPLE).expect("valid test data");
    assert_eq!(patterns[0].summary(0), Some(5));
    assert_eq!(patterns[1].summary(0), Some(400));
    assert_eq!(patterns[0].summary(1), Some(300));
    assert_eq!(patterns[1].summary(1), Some(100));
    assert_eq!(total_summary(&patterns, 0), 405);
    assert_eq!(total_summary(&patterns, 1), 400);
}

fn part1(patterns: &[Pattern]) {
    println!("Day 13 part 1: {}", total_summary(patterns, 0));
}

fn part2(patterns: &[Pattern]) {
    println!("Day 13 part 2: {}", total_summary(patterns, 1));
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match parse_patterns(&input) {
        Ok(patterns) => {
            part1(&patterns);
            part2(&patterns);
        }
        Err(e) => fail(&e),
    }
}
