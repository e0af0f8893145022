use regex::Regex;
use tracing::{event, Level};

use aoc2023::{init_tracing, read_input};

fn digit_value(word: &str) -> Option<u32> {
    match word {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        _ => word.parse().ok(),
    }
}

/// Every digit in `line`, in order, including ones whose spelling
/// overlaps a neighbour ("oneight" is 1 then 8).
fn find_digits(line: &str, pattern: &Regex) -> Vec<u32> {
    let mut result = Vec::new();
    let mut pos = 0;
    while pos < line.len() {
        match pattern.find_at(line, pos) {
            Some(m) => {
                if let Some(d) = digit_value(m.as_str()) {
                    result.push(d);
                }
                // Restart just past the start of the match, not its end.
                pos = m.start() + 1;
            }
            None => break,
        }
    }
    result
}

fn calibration_value(line: &str, pattern: &Regex) -> u32 {
    let digits = find_digits(line, pattern);
    match (digits.first(), digits.last()) {
        (Some(first), Some(last)) => first * 10 + last,
        _ => 0,
    }
}

fn total_calibration(input: &str, pattern: &Regex) -> u32 {
    input
        .lines()
        .map(|line| {
            let value = calibration_value(line.trim(), pattern);
            event!(Level::DEBUG, "{} -> {}", line, value);
            value
        })
        .sum()
}

fn numeric_pattern() -> Regex {
    Regex::new(r"[0-9]").unwrap()
}

fn spelled_pattern() -> Regex {
    Regex::new(r"one|two|three|four|five|six|seven|eight|nine|[0-9]").unwrap()
}

#[cfg(test)]
const SAMPLE_PART1: &str = concat!(
    "1abc2\n",
    "pqr3stu8vwx\n",
    "a1b2c3d4e5f\n",
    "treb7uchet\n",
);

#[cfg(test)]
const SAMPLE_PART2: &str = concat!(
    "two1nine\n",
    "eightwothree\n",
    "abcone2threexyz\n",
    "xtwone3four\n",
    "4nineeightseven2\n",
    "zoneight234\n",
    "7pqrstsixteen\n",
);

#[test]
fn test_calibration_value() {
    let numeric = numeric_pattern();
    assert_eq!(calibration_value("1abc2", &numeric), 12);
    assert_eq!(calibration_value("treb7uchet", &numeric), 77);
    assert_eq!(calibration_value("nodigits", &numeric), 0);

    let spelled = spelled_pattern();
    assert_eq!(calibration_value("two1nine", &spelled), 29);
    assert_eq!(calibration_value("zoneight234", &spelled), 14);
    assert_eq!(calibration_value("oneight", &spelled), 18);
}

#[test]
fn test_total_calibration() {
    assert_eq!(total_calibration(SAMPLE_PART1, &numeric_pattern()), 142);
    assert_eq!(total_calibration(SAMPLE_PART2, &spelled_pattern()), 281);
}

fn part1(input: &str) {
    println!(
        "Day 01 part 1: {}",
        total_calibration(input, &numeric_pattern())
    );
}

fn part2(input: &str) {
    println!(
        "Day 01 part 2: {}",
        total_calibration(input, &spelled_pattern())
    );
}

fn main() {
    init_tracing("info");
    let input = read_input();
    part1(&input);
    part2(&input);
}
