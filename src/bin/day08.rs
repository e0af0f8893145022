use std::collections::HashMap;

use regex::Regex;
use tracing::{event, Level};

use aoc2023::{fail, init_tracing, read_input};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Turn {
    Left,
    Right,
}

#[derive(Debug)]
struct Network {
    instructions: Vec<Turn>,
    nodes: HashMap<String, (String, String)>,
}

fn parse_instructions(line: &str) -> Result<Vec<Turn>, String> {
    line.trim()
        .chars()
        .map(|ch| match ch {
            'L' => Ok(Turn::Left),
            'R' => Ok(Turn::Right),
            _ => Err(format!("unexpected instruction '{}'", ch)),
        })
        .collect()
}

impl TryFrom<&str> for Network {
    type Error = String;
    fn try_from(s: &str) -> Result<Network, String> {
        let (head, body) = match s.split_once("\n\n") {
            Some(parts) => parts,
            None => {
                return Err("missing blank line".to_string());
            }
        };
        let instructions = parse_instructions(head)?;
        if instructions.is_empty() {
            return Err("no instructions".to_string());
        }
        let node_rx = Regex::new(r"^(\w+) = \((\w+), (\w+)\)$").unwrap();
        let mut nodes = HashMap::new();
        for line in body.lines().map(str::trim).filter(|line| !line.is_empty()) {
            match node_rx.captures(line) {
                Some(caps) => {
                    nodes.insert(
                        caps[1].to_string(),
                        (caps[2].to_string(), caps[3].to_string()),
                    );
                }
                None => {
                    return Err(format!("unexpected node: '{}'", line));
                }
            }
        }
        Ok(Network {
            instructions,
            nodes,
        })
    }
}

impl Network {
    /// Count the steps from `start` until `is_end` holds.  Returns
    /// `None` if we reach a node the network doesn't define, or walk
    /// round the whole instruction list from every node without
    /// getting there.
    fn steps<F>(&self, start: &str, is_end: F) -> Option<u64>
    where
        F: Fn(&str) -> bool,
    {
        let limit = self.instructions.len() * self.nodes.len().max(1);
        let mut current = start;
        for (step, turn) in self.instructions.iter().cycle().enumerate() {
            if step > limit {
                event!(Level::WARN, "no end in sight from {}", start);
                return None;
            }
            let (left, right) = match self.nodes.get(current) {
                Some(pair) => pair,
                None => {
                    event!(Level::WARN, "node {} is not in the network", current);
                    return None;
                }
            };
            current = match turn {
                Turn::Left => left.as_str(),
                Turn::Right => right.as_str(),
            };
            if is_end(current) {
                return Some(step as u64 + 1);
            }
        }
        None
    }

    fn camel_steps(&self) -> Option<u64> {
        self.steps("AAA", |node| node == "ZZZ")
    }

    /// Each ghost runs round its own loop; they all land on an end
    /// node together at the least common multiple of their periods.
    fn ghost_steps(&self) -> Option<u64> {
        let mut starts: Vec<&String> = self.nodes.keys().filter(|n| n.ends_with('A')).collect();
        starts.sort();
        let mut result: Option<u64> = None;
        for start in starts {
            let steps = self.steps(start, |node| node.ends_with('Z'))?;
            event!(Level::DEBUG, "{} reaches an end in {} steps", start, steps);
            result = Some(match result {
                None => steps,
                Some(so_far) => lcm(so_far, steps),
            });
        }
        result
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let rem = a % b;
        a = b;
        b = rem;
    }
    a
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

#[cfg(test)]
const SAMPLE_DIRECT: &str = concat!(
    "RL\n",
    "\n",
    "AAA = (BBB, CCC)\n",
    "BBB = (DDD, EEE)\n",
    "CCC = (ZZZ, GGG)\n",
    "DDD = (DDD, DDD)\n",
    "EEE = (EEE, EEE)\n",
    "GGG = (GGG, GGG)\n",
    "ZZZ = (ZZZ, ZZZ)\n",
);

#[cfg(test)]
const SAMPLE_REPEAT: &str = concat!(
    "LLR\n",
    "\n",
    "AAA = (BBB, BBB)\n",
    "BBB = (AAA, ZZZ)\n",
    "ZZZ = (ZZZ, ZZZ)\n",
);

#[cfg(test)]
const SAMPLE_GHOSTS: &str = concat!(
    "LR\n",
    "\n",
    "11A = (11B, XXX)\n",
    "11B = (XXX, 11Z)\n",
    "11Z = (11B, XXX)\n",
    "22A = (22B, XXX)\n",
    "22B = (22C, 22C)\n",
    "22C = (22Z, 22Z)\n",
    "22Z = (22B, 22B)\n",
    "XXX = (XXX, XXX)\n",
);

#[test]
fn test_parse_network() {
    let network = Network::try_from(SAMPLE_REPEAT).expect("valid test data");
    assert_eq!(
        network.instructions,
        vec![Turn::Left, Turn::Left, Turn::Right]
    );
    assert_eq!(
        network.nodes.get("BBB"),
        Some(&("AAA".to_string(), "ZZZ".to_string()))
    );
    assert!(Network::try_from("LX\n\nAAA = (BBB, CCC)").is_err());
    assert!(Network::try_from("LR\n\nAAA = BBB").is_err());
}

#[test]
fn test_camel_steps() {
    let network = Network::try_from(SAMPLE_DIRECT).expect("valid test data");
    assert_eq!(network.camel_steps(), Some(2));
    let network = Network::try_from(SAMPLE_REPEAT).expect("valid test data");
    assert_eq!(network.camel_steps(), Some(6));
}

#[test]
fn test_unreachable() {
    let network = Network::try_from("L\n\nAAA = (BBB, BBB)\nBBB = (BBB, BBB)").expect("valid");
    assert_eq!(network.camel_steps(), None);
    let network = Network::try_from("L\n\nAAA = (QQQ, QQQ)").expect("valid");
    assert_eq!(network.camel_steps(), None);
}

#[test]
fn test_ghost_steps() {
    let network = Network::try_from(SAMPLE_GHOSTS).expect("valid test data");
    assert_eq!(network.ghost_steps(), Some(6));
}

#[test]
fn test_lcm() {
    assert_eq!(gcd(12, 18), 6);
    assert_eq!(lcm(4, 6), 12);
    assert_eq!(lcm(7, 13), 91);
}

fn part1(network: &Network) {
    match network.camel_steps() {
        Some(n) => println!("Day 08 part 1: {}", n),
        None => println!("Day 08 part 1: ZZZ is unreachable"),
    }
}

fn part2(network: &Network) {
    match network.ghost_steps() {
        Some(n) => println!("Day 08 part 2: {}", n),
        None => println!("Day 08 part 2: the ghosts never finish"),
    }
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match Network::try_from(input.as_str()) {
        Ok(network) => {
            part1(&network);
            part2(&network);
        }
        Err(e) => fail(&e),
    }
}
