use std::collections::BTreeSet;

use tracing::{event, Level};

use aoc2023::{fail, init_tracing, read_input};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct Galaxy {
    row: u64,
    col: u64,
}

fn parse_galaxies(input: &str) -> Result<Vec<Galaxy>, String> {
    let mut result = Vec::new();
    for (row, line) in input.lines().enumerate() {
        for (col, ch) in line.trim().chars().enumerate() {
            match ch {
                '#' => result.push(Galaxy {
                    row: row as u64,
                    col: col as u64,
                }),
                '.' => (),
                _ => {
                    return Err(format!("unexpected character '{}' at {},{}", ch, row, col));
                }
            }
        }
    }
    Ok(result)
}

/// Shift each coordinate by `factor - 1` for every empty line before
/// it.  Lines with no galaxy are exactly those missing from `occupied`.
fn expand_axis(value: u64, occupied: &BTreeSet<u64>, factor: u64) -> u64 {
    let nonempty_before = occupied.range(..value).count() as u64;
    let empty_before = value - nonempty_before;
    value + empty_before * (factor - 1)
}

fn expand(galaxies: &[Galaxy], factor: u64) -> Vec<Galaxy> {
    let rows: BTreeSet<u64> = galaxies.iter().map(|g| g.row).collect();
    let cols: BTreeSet<u64> = galaxies.iter().map(|g| g.col).collect();
    galaxies
        .iter()
        .map(|g| Galaxy {
            row: expand_axis(g.row, &rows, factor),
            col: expand_axis(g.col, &cols, factor),
        })
        .collect()
}

fn abs_diff(a: u64, b: u64) -> u64 {
    if a > b {
        a - b
    } else {
        b - a
    }
}

fn sum_of_distances(galaxies: &[Galaxy], factor: u64) -> u64 {
    let expanded = expand(galaxies, factor);
    let mut total = 0;
    for (i, a) in expanded.iter().enumerate() {
        for b in &expanded[i + 1..] {
            total += abs_diff(a.row, b.row) + abs_diff(a.col, b.col);
        }
    }
    event!(
        Level::DEBUG,
        "{} galaxies at expansion {} are {} apart in total",
        galaxies.len(),
        factor,
        total
    );
    total
}

#[cfg(test)]
const SAMPLE: &str = concat!(
    "...#......\n",
    ".......#..\n",
    "#.........\n",
    "..........\n",
    "......#...\n",
    ".#........\n",
    ".........#\n",
    "..........\n",
    ".......#..\n",
    "#...#.....\n",
);

#[test]
fn test_expand() {
    let galaxies = parse_galaxies(SAMPLE).expect("valid test data");
    assert_eq!(galaxies.len(), 9);
    let expanded = expand(&galaxies, 2);
    assert_eq!(expanded[4], Galaxy { row: 6, col: 1 });
    assert_eq!(expanded[8], Galaxy { row: 11, col: 5 });
}

#[test]
fn test_sum_of_distances() {
    let galaxies = parse_galaxies(SAMPLE).expect("valid test data");
    assert_eq!(sum_of_distances(&galaxies, 2), 374);
    assert_eq!(sum_of_distances(&galaxies, 10), 1030);
    assert_eq!(sum_of_distances(&galaxies, 100), 8410);
}

#[test]
fn test_bad_input() {
    assert!(parse_galaxies("..#\n.x.").is_err());
}

fn part1(galaxies: &[Galaxy]) {
    println!("Day 11 part 1: {}", sum_of_distances(galaxies, 2));
}

fn part2(galaxies: &[Galaxy]) {
    println!("Day 11 part 2: {}", sum_of_distances(galaxies, 1_000_000));
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match parse_galaxies(&input) {
        Ok(galaxies) => {
            part1(&galaxies);
            part2(&galaxies);
        }
        Err(e) => fail(&e),
    }
}
