use std::num::ParseIntError;

use tracing::{event, Level};

use aoc2023::{fail, init_tracing, read_input};

fn parse_history(line: &str) -> Result<Vec<i64>, String> {
    line.split_whitespace()
        .map(|s| {
            s.parse()
                .map_err(|e: ParseIntError| format!("bad value '{}': {}", s, e))
        })
        .collect()
}

fn parse_histories(input: &str) -> Result<Vec<Vec<i64>>, String> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_history)
        .collect()
}

/// The history followed by each row of differences, stopping at the
/// first row that is all zeroes.
fn difference_pyramid(history: &[i64]) -> Vec<Vec<i64>> {
    let mut pyramid: Vec<Vec<i64>> = vec![history.to_vec()];
    loop {
        let last = &pyramid[pyramid.len() - 1];
        if last.iter().all(|&n| n == 0) {
            break;
        }
        let next: Vec<i64> = last.windows(2).map(|w| w[1] - w[0]).collect();
        pyramid.push(next);
    }
    pyramid
}

fn extrapolate_forward(history: &[i64]) -> i64 {
    difference_pyramid(history)
        .iter()
        .rev()
        .fold(0, |below, row| row.last().copied().unwrap_or(0) + below)
}

fn extrapolate_backward(history: &[i64]) -> i64 {
    difference_pyramid(history)
        .iter()
        .rev()
        .fold(0, |below, row| row.first().copied().unwrap_or(0) - below)
}

#[cfg(test)]
const SAMPLE: &str = concat!(
    "0 3 6 9 12 15\n",
    "1 3 6 10 15 21\n",
    "10 13 16 21 30 45\n",
);

#[test]
fn test_difference_pyramid() {
    assert_eq!(
        difference_pyramid(&[0, 3, 6, 9, 12, 15]),
        vec![
            vec![0, 3, 6, 9, 12, 15],
            vec![3, 3, 3, 3, 3],
            vec![0, 0, 0, 0],
        ]
    );
}

#[test]
fn test_extrapolate() {
    assert_eq!(extrapolate_forward(&[0, 3, 6, 9, 12, 15]), 18);
    assert_eq!(extrapolate_forward(&[1, 3, 6, 10, 15, 21]), 28);
    assert_eq!(extrapolate_forward(&[10, 13, 16, 21, 30, 45]), 68);
    assert_eq!(extrapolate_backward(&[10, 13, 16, 21, 30, 45]), 5);
    assert_eq!(extrapolate_backward(&[0, 3, 6, 9, 12, 15]), -3);
    assert_eq!(extrapolate_forward(&[-2, -4, -6]), -8);
    assert_eq!(extrapolate_forward(&[]), 0);
}

#[test]
fn test_sums() {
    let histories = parse_histories(SAMPLE).expect("valid test data");
    let forward: i64 = histories.iter().map(|h| extrapolate_forward(h)).sum();
    let backward: i64 = histories.iter().map(|h| extrapolate_backward(h)).sum();
    assert_eq!(forward, 114);
    assert_eq!(backward, 2);
}

fn part1(histories: &[Vec<i64>]) {
    let total: i64 = histories
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let next = extrapolate_forward(h);
            event!(Level::DEBUG, "row {} extrapolates to {}", i + 1, next);
            next
        })
        .sum();
    println!("Day 09 part 1: {}", total);
}

fn part2(histories: &[Vec<i64>]) {
    let total: i64 = histories.iter().map(|h| extrapolate_backward(h)).sum();
    println!("Day 09 part 2: {}", total);
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match parse_histories(&input) {
        Ok(histories) => {
            part1(&histories);
            part2(&histories);
        }
        Err(e) => fail(&e),
    }
}
