use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;

use tracing::{event, Level};

use aoc2023::{fail, init_tracing, read_input};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Spring {
    Operational,
    Damaged,
    Unknown,
}

impl TryFrom<char> for Spring {
    type Error = String;
    fn try_from(ch: char) -> Result<Spring, String> {
        match ch {
            '.' => Ok(Spring::Operational),
            '#' => Ok(Spring::Damaged),
            '?' => Ok(Spring::Unknown),
            _ => Err(format!("unexpected spring condition '{}'", ch)),
        }
    }
}

impl Display for Spring {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Spring::Operational => ".",
            Spring::Damaged => "#",
            Spring::Unknown => "?",
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
struct Record {
    springs: Vec<Spring>,
    groups: Vec<usize>,
}

impl TryFrom<&str> for Record {
    type Error = String;
    fn try_from(s: &str) -> Result<Record, String> {
        let (springs, groups) = match s.trim().split_once(' ') {
            Some(parts) => parts,
            None => {
                return Err(format!("expected springs and group sizes in '{}'", s));
            }
        };
        let springs: Vec<Spring> = springs
            .chars()
            .map(Spring::try_from)
            .collect::<Result<_, _>>()?;
        let groups: Vec<usize> = groups
            .split(',')
            .map(|g| {
                g.parse()
                    .map_err(|e: ParseIntError| format!("bad group size '{}': {}", g, e))
            })
            .collect::<Result<_, _>>()?;
        Ok(Record { springs, groups })
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for spring in &self.springs {
            write!(f, "{}", spring)?;
        }
        let groups: Vec<String> = self.groups.iter().map(usize::to_string).collect();
        write!(f, " {}", groups.join(","))
    }
}

impl Record {
    fn unfold(&self, copies: usize) -> Record {
        let mut springs = Vec::with_capacity((self.springs.len() + 1) * copies);
        for i in 0..copies {
            if i > 0 {
                springs.push(Spring::Unknown);
            }
            springs.extend_from_slice(&self.springs);
        }
        Record {
            springs,
            groups: self.groups.repeat(copies),
        }
    }

    fn arrangements(&self) -> u64 {
        let mut counter = Counter {
            record: self,
            memo: HashMap::new(),
        };
        counter.count(0, 0)
    }
}

/// Memoised count of the ways to finish a record, keyed on the next
/// spring to decide and the next group to place.
struct Counter<'a> {
    record: &'a Record,
    memo: HashMap<(usize, usize), u64>,
}

impl<'a> Counter<'a> {
    fn count(&mut self, pos: usize, group: usize) -> u64 {
        if pos >= self.record.springs.len() {
            return if group == self.record.groups.len() { 1 } else { 0 };
        }
        if let Some(&n) = self.memo.get(&(pos, group)) {
            return n;
        }
        let result = match self.record.springs[pos] {
            Spring::Operational => self.count(pos + 1, group),
            Spring::Damaged => self.place_group(pos, group),
            Spring::Unknown => self.count(pos + 1, group) + self.place_group(pos, group),
        };
        self.memo.insert((pos, group), result);
        result
    }

    /// Count the ways to finish if the next group starts at `pos`.
    fn place_group(&mut self, pos: usize, group: usize) -> u64 {
        let springs = &self.record.springs;
        let len = match self.record.groups.get(group) {
            Some(&len) => len,
            None => {
                return 0;
            }
        };
        let end = pos + len;
        if end > springs.len() {
            return 0;
        }
        if springs[pos..end].contains(&Spring::Operational) {
            return 0;
        }
        if springs.get(end) == Some(&Spring::Damaged) {
            return 0;
        }
        // Skip the operational spring that has to follow the group.
        self.count(end + 1, group + 1)
    }
}

fn parse_records(input: &str) -> Result<Vec<Record>, String> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Record::try_from)
        .collect()
}

fn total_arrangements(records: &[Record], copies: usize) -> u64 {
    records
        .iter()
        .map(|record| {
            let n = record.unfold(copies).arrangements();
            event!(Level::DEBUG, "{} has {} arrangements", record, n);
            n
        })
        .sum()
}

#[cfg(test)]
const SAMPLE: &str = concat!(
    "???.### 1,1,3\n",
    ".??..??...?##. 1,1,3\n",
    "?#?#?#?#?#?#?#? 1,3,1,6\n",
    "????.#...#... 4,1,1\n",
    "????.######..#####. 1,6,5\n",
    "?###???????? 3,2,1\n",
);

#[test]
fn test_parse_record() {
    let record = Record::try_from("#.? 1,1").expect("valid record");
    assert_eq!(
        record.springs,
        vec![Spring::Damaged, Spring::Operational, Spring::Unknown]
    );
    assert_eq!(record.groups, vec![1, 1]);
    assert_eq!(record.to_string(), "#.? 1,1");
    assert!(Record::try_from("#.?").is_err());
    assert!(Record::try_from("#x? 1").is_err());
    assert!(Record::try_from("#.? 1,a").is_err());
}

#[test]
fn test_unfold() {
    let record = Record::try_from(".# 1").expect("valid record");
    assert_eq!(record.unfold(5).to_string(), ".#?.#?.#?.#?.# 1,1,1,1,1");
}

#[test]
fn test_arrangements() {
    let records = parse_records(SAMPLE).expect("valid test data");
    let counts: Vec<u64> = records.iter().map(Record::arrangements).collect();
    assert_eq!(counts, vec![1, 4, 1, 1, 4, 10]);
    let unfolded: Vec<u64> = records.iter().map(|r| r.unfold(5).arrangements()).collect();
    assert_eq!(unfolded, vec![1, 16384, 1, 16, 2500, 506250]);
}

#[test]
fn test_total_arrangements() {
    let records = parse_records(SAMPLE).expect("valid test data");
    assert_eq!(total_arrangements(&records, 1), 21);
    assert_eq!(total_arrangements(&records, 5), 525152);
}

fn part1(records: &[Record]) {
    println!("Day 12 part 1: {}", total_arrangements(records, 1));
}

fn part2(records: &[Record]) {
    println!("Day 12 part 2: {}", total_arrangements(records, 5));
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match parse_records(&input) {
        Ok(records) => {
            part1(&records);
            part2(&records);
        }
        Err(e) => fail(&e),
    }
}
