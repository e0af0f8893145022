use nom::{
    bytes::complete::tag,
    character::complete::{newline, space0, space1, u64 as parse_u64},
    multi::separated_list1,
    sequence::{preceded, separated_pair, tuple},
    IResult,
};
use tracing::{event, Level};

use aoc2023::{fail, init_tracing, read_input};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct Race {
    time: u64,
    record: u64,
}

impl Race {
    fn distance(&self, hold: u64) -> u64 {
        hold * (self.time - hold)
    }

    /// Number of hold times that beat the record.  Distance is
    /// symmetric about `time / 2` and increasing before it, so we
    /// only need to find the first winning hold time.
    fn ways_to_win(&self) -> u64 {
        let mut lo = 0;
        let mut hi = self.time / 2;
        if self.distance(hi) <= self.record {
            return 0;
        }
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.distance(mid) > self.record {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        self.time - 2 * lo + 1
    }
}

fn parse_row<'a>(label: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<u64>> {
    preceded(
        tuple((tag(label), space1)),
        separated_list1(space1, parse_u64),
    )
}

fn parse_sheet(input: &str) -> IResult<&str, (Vec<u64>, Vec<u64>)> {
    separated_pair(
        parse_row("Time:"),
        tuple((space0, newline)),
        parse_row("Distance:"),
    )(input)
}

fn parse_races(input: &str) -> Result<(Vec<u64>, Vec<u64>), String> {
    match parse_sheet(input.trim()) {
        Ok(("", (times, records))) => {
            if times.len() == records.len() {
                Ok((times, records))
            } else {
                Err(format!(
                    "{} times but {} distances",
                    times.len(),
                    records.len()
                ))
            }
        }
        Ok((unparsed, _)) => Err(format!("unexpected trailing junk: '{}'", unparsed)),
        Err(e) => Err(format!("failed to parse race sheet: {}", e)),
    }
}

fn separate_races(times: &[u64], records: &[u64]) -> Vec<Race> {
    times
        .iter()
        .zip(records.iter())
        .map(|(&time, &record)| Race { time, record })
        .collect()
}

/// The sheet's columns are really one number with bad kerning.
fn single_race(times: &[u64], records: &[u64]) -> Result<Race, String> {
    fn concat(numbers: &[u64]) -> Result<u64, String> {
        numbers
            .iter()
            .map(u64::to_string)
            .collect::<String>()
            .parse()
            .map_err(|e: std::num::ParseIntError| e.to_string())
    }
    Ok(Race {
        time: concat(times)?,
        record: concat(records)?,
    })
}

#[cfg(test)]
const SAMPLE: &str = concat!("Time:      7  15   30\n", "Distance:  9  40  200\n",);

#[test]
fn test_ways_to_win() {
    assert_eq!(Race { time: 7, record: 9 }.ways_to_win(), 4);
    assert_eq!(Race { time: 15, record: 40 }.ways_to_win(), 8);
    assert_eq!(Race { time: 30, record: 200 }.ways_to_win(), 9);
    assert_eq!(Race { time: 4, record: 4 }.ways_to_win(), 0);
    assert_eq!(Race { time: 0, record: 0 }.ways_to_win(), 0);
}

#[test]
fn test_product() {
    let (times, records) = parse_races(SAMPLE).expect("valid test data");
    let product: u64 = separate_races(&times, &records)
        .iter()
        .map(Race::ways_to_win)
        .product();
    assert_eq!(product, 288);
}

#[test]
fn test_single_race() {
    let (times, records) = parse_races(SAMPLE).expect("valid test data");
    let race = single_race(&times, &records).expect("valid race");
    assert_eq!(
        race,
        Race {
            time: 71530,
            record: 940200
        }
    );
    assert_eq!(race.ways_to_win(), 71503);
}

#[test]
fn test_mismatched_rows() {
    assert!(parse_races("Time: 1 2\nDistance: 3").is_err());
}

fn part1(times: &[u64], records: &[u64]) {
    let product: u64 = separate_races(times, records)
        .iter()
        .map(|race| {
            let ways = race.ways_to_win();
            event!(Level::DEBUG, "{:?} can be won {} ways", race, ways);
            ways
        })
        .product();
    println!("Day 06 part 1: {}", product);
}

fn part2(times: &[u64], records: &[u64]) {
    match single_race(times, records) {
        Ok(race) => println!("Day 06 part 2: {}", race.ways_to_win()),
        Err(e) => fail(&e),
    }
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match parse_races(&input) {
        Ok((times, records)) => {
            part1(&times, &records);
            part2(&times, &records);
        }
        Err(e) => fail(&e),
    }
}
