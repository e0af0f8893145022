use std::ops::Range;

use nom::{
    bytes::complete::tag,
    character::complete::{alpha1, newline, space1, u64 as parse_u64},
    combinator::map,
    multi::separated_list1,
    sequence::{preceded, separated_pair, terminated, tuple},
    IResult,
};
use tracing::{event, span, Level};

use aoc2023::{fail, init_tracing, read_input};

/// Values `src..src+len` map onto `dest..dest+len`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct Mapping {
    dest: u64,
    src: u64,
    len: u64,
}

impl Mapping {
    fn src_end(&self) -> u64 {
        self.src + self.len
    }
}

#[derive(Debug)]
struct RangeMap {
    from: String,
    to: String,
    // Sorted by `src`.
    mappings: Vec<Mapping>,
}

impl RangeMap {
    fn new(from: &str, to: &str, mut mappings: Vec<Mapping>) -> RangeMap {
        mappings.sort_by_key(|m| m.src);
        RangeMap {
            from: from.to_string(),
            to: to.to_string(),
            mappings,
        }
    }

    #[cfg(test)]
    fn map_value(&self, value: u64) -> u64 {
        for m in &self.mappings {
            if (m.src..m.src_end()).contains(&value) {
                return m.dest + (value - m.src);
            }
        }
        value
    }

    /// Map a whole interval, splitting it wherever it crosses the edge
    /// of a mapping.  Parts not covered by any mapping pass through
    /// unchanged.
    fn map_interval(&self, interval: &Range<u64>) -> Vec<Range<u64>> {
        let mut result = Vec::new();
        let mut start = interval.start;
        let end = interval.end;
        for m in &self.mappings {
            if start >= end || m.src >= end {
                break;
            }
            if m.src_end() <= start {
                continue;
            }
            if start < m.src {
                result.push(start..m.src);
                start = m.src;
            }
            let stop = end.min(m.src_end());
            result.push((m.dest + (start - m.src))..(m.dest + (stop - m.src)));
            start = stop;
        }
        if start < end {
            result.push(start..end);
        }
        result
    }
}

#[derive(Debug)]
struct Almanac {
    seeds: Vec<u64>,
    maps: Vec<RangeMap>,
}

fn parse_seeds(input: &str) -> IResult<&str, Vec<u64>> {
    preceded(
        tuple((tag("seeds:"), space1)),
        separated_list1(space1, parse_u64),
    )(input)
}

fn parse_mapping(input: &str) -> IResult<&str, Mapping> {
    map(
        tuple((
            parse_u64,
            preceded(space1, parse_u64),
            preceded(space1, parse_u64),
        )),
        |(dest, src, len)| Mapping { dest, src, len },
    )(input)
}

fn parse_range_map(input: &str) -> IResult<&str, RangeMap> {
    map(
        tuple((
            terminated(
                separated_pair(alpha1, tag("-to-"), alpha1),
                tuple((tag(" map:"), newline)),
            ),
            separated_list1(newline, parse_mapping),
        )),
        |((from, to), mappings)| RangeMap::new(from, to, mappings),
    )(input)
}

fn parse_almanac(input: &str) -> IResult<&str, Almanac> {
    map(
        tuple((
            parse_seeds,
            preceded(
                tuple((newline, newline)),
                separated_list1(tuple((newline, newline)), parse_range_map),
            ),
        )),
        |(seeds, maps)| Almanac { seeds, maps },
    )(input)
}

impl TryFrom<&str> for Almanac {
    type Error = String;
    fn try_from(s: &str) -> Result<Almanac, String> {
        let almanac = match parse_almanac(s.trim()) {
            Ok(("", almanac)) => almanac,
            Ok((unparsed, _)) => {
                return Err(format!("unexpected trailing junk: '{}'", unparsed));
            }
            Err(e) => {
                return Err(format!("failed to parse almanac: {}", e));
            }
        };
        let mut category = "seed";
        for m in &almanac.maps {
            if m.from != category {
                return Err(format!(
                    "map {}-to-{} follows a map producing {}",
                    m.from, m.to, category
                ));
            }
            category = m.to.as_str();
        }
        Ok(almanac)
    }
}

impl Almanac {
    fn lowest_location(&self, seeds: Vec<Range<u64>>) -> Option<u64> {
        let mut current = seeds;
        for m in &self.maps {
            let span = span!(Level::DEBUG, "map", from = %m.from, to = %m.to);
            let _enter = span.enter();
            current = current
                .iter()
                .flat_map(|interval| m.map_interval(interval))
                .collect();
            event!(Level::DEBUG, "{} intervals after mapping", current.len());
        }
        current.iter().map(|r| r.start).min()
    }

    fn individual_seeds(&self) -> Vec<Range<u64>> {
        self.seeds.iter().map(|&s| s..(s + 1)).collect()
    }

    fn seed_ranges(&self) -> Result<Vec<Range<u64>>, String> {
        if self.seeds.len() % 2 != 0 {
            return Err("seed numbers come in pairs (start, length)".to_string());
        }
        Ok(self
            .seeds
            .chunks(2)
            .map(|pair| pair[0]..(pair[0] + pair[1]))
            .collect())
    }
}

#[cfg(test)]
const SAMPLE: &str = concat!(
    "seeds: 79 14 55 13\n",
    "\n",
    "seed-to-soil map:\n",
    "50 98 2\n",
    "52 50 48\n",
    "\n",
    "soil-to-fertilizer map:\n",
    "0 15 37\n",
    "37 52 2\n",
    "39 0 15\n",
    "\n",
    "fertilizer-to-water map:\n",
    "49 53 8\n",
    "0 11 42\n",
    "42 0 7\n",
    "57 7 4\n",
    "\n",
    "water-to-light map:\n",
    "88 18 7\n",
    "18 25 70\n",
    "\n",
    "light-to-temperature map:\n",
    "45 77 23\n",
    "81 45 19\n",
    "68 64 13\n",
    "\n",
    "temperature-to-humidity map:\n",
    "0 69 1\n",
    "1 0 69\n",
    "\n",
    "humidity-to-location map:\n",
    "60 56 37\n",
    "56 93 4\n",
);

#[test]
fn test_parse_almanac() {
    let almanac = Almanac::try_from(SAMPLE).expect("valid test data");
    assert_eq!(almanac.seeds, vec![79, 14, 55, 13]);
    assert_eq!(almanac.maps.len(), 7);
    assert_eq!(almanac.maps[0].from, "seed");
    assert_eq!(almanac.maps[6].to, "location");
    assert_eq!(
        almanac.maps[0].mappings[0],
        Mapping {
            dest: 52,
            src: 50,
            len: 48
        }
    );
}

#[test]
fn test_map_value() {
    let almanac = Almanac::try_from(SAMPLE).expect("valid test data");
    let soil = &almanac.maps[0];
    assert_eq!(soil.map_value(79), 81);
    assert_eq!(soil.map_value(14), 14);
    assert_eq!(soil.map_value(99), 51);
}

#[test]
fn test_map_interval() {
    let m = RangeMap::new(
        "a",
        "b",
        vec![
            Mapping {
                dest: 100,
                src: 10,
                len: 5,
            },
            Mapping {
                dest: 0,
                src: 20,
                len: 5,
            },
        ],
    );
    assert_eq!(
        m.map_interval(&(5..30)),
        vec![5..10, 100..105, 15..20, 0..5, 25..30]
    );
    assert_eq!(m.map_interval(&(12..13)), vec![102..103]);
    assert_eq!(m.map_interval(&(40..50)), vec![40..50]);
}

#[test]
fn test_lowest_location() {
    let almanac = Almanac::try_from(SAMPLE).expect("valid test data");
    assert_eq!(almanac.lowest_location(almanac.individual_seeds()), Some(35));
    let ranges = almanac.seed_ranges().expect("seeds should pair up");
    assert_eq!(almanac.lowest_location(ranges), Some(46));
}

#[test]
fn test_broken_chain() {
    let broken = SAMPLE.replace("soil-to-fertilizer", "water-to-fertilizer");
    assert!(Almanac::try_from(broken.as_str()).is_err());
}

fn part1(almanac: &Almanac) {
    match almanac.lowest_location(almanac.individual_seeds()) {
        Some(n) => println!("Day 05 part 1: {}", n),
        None => println!("Day 05 part 1: no seeds"),
    }
}

fn part2(almanac: &Almanac) {
    match almanac.seed_ranges() {
        Ok(ranges) => match almanac.lowest_location(ranges) {
            Some(n) => println!("Day 05 part 2: {}", n),
            None => println!("Day 05 part 2: no seeds"),
        },
        Err(e) => fail(&e),
    }
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match Almanac::try_from(input.as_str()) {
        Ok(almanac) => {
            part1(&almanac);
            part2(&almanac);
        }
        Err(e) => fail(&e),
    }
}
