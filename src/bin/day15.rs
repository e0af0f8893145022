use std::num::ParseIntError;

use tracing::{event, Level};

use aoc2023::{fail, init_tracing, read_input};

fn hash(s: &str) -> usize {
    s.bytes()
        .filter(|&b| b != b'\n')
        .fold(0, |h, b| ((h + b as usize) * 17) % 256)
}

#[derive(Debug, PartialEq, Eq)]
enum Operation {
    Remove,
    Insert(u32),
}

#[derive(Debug, PartialEq, Eq)]
struct Step {
    label: String,
    operation: Operation,
}

impl TryFrom<&str> for Step {
    type Error = String;
    fn try_from(s: &str) -> Result<Step, String> {
        if let Some(label) = s.strip_suffix('-') {
            Ok(Step {
                label: label.to_string(),
                operation: Operation::Remove,
            })
        } else if let Some((label, focal)) = s.split_once('=') {
            let focal: u32 = focal
                .parse()
                .map_err(|e: ParseIntError| format!("bad focal length in '{}': {}", s, e))?;
            Ok(Step {
                label: label.to_string(),
                operation: Operation::Insert(focal),
            })
        } else {
            Err(format!("unexpected step '{}'", s))
        }
    }
}

fn split_steps(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone)]
struct Lens {
    label: String,
    focal: u32,
}

/// 256 boxes of lenses, each in slot order.
struct Boxes {
    boxes: Vec<Vec<Lens>>,
}

impl Boxes {
    fn new() -> Boxes {
        Boxes {
            boxes: vec![Vec::new(); 256],
        }
    }

    fn apply(&mut self, step: &Step) {
        let lenses = &mut self.boxes[hash(&step.label)];
        let existing = lenses.iter().position(|lens| lens.label == step.label);
        match (&step.operation, existing) {
            (Operation::Remove, Some(pos)) => {
                lenses.remove(pos);
            }
            (Operation::Remove, None) => (),
            (Operation::Insert(focal), Some(pos)) => {
                lenses[pos].focal = *focal;
            }
            (Operation::Insert(focal), None) => lenses.push(Lens {
                label: step.label.clone(),
                focal: *focal,
            }),
        }
    }

    fn focusing_power(&self) -> u64 {
        let mut total = 0;
        for (box_number, lenses) in self.boxes.iter().enumerate() {
            for (slot, lens) in lenses.iter().enumerate() {
                let power = (box_number as u64 + 1) * (slot as u64 + 1) * lens.focal as u64;
                event!(
                    Level::DEBUG,
                    "{}: {} * {} * {} = {}",
                    lens.label,
                    box_number + 1,
                    slot + 1,
                    lens.focal,
                    power
                );
                total += power;
            }
        }
        total
    }
}

fn sum_of_hashes(input: &str) -> usize {
    split_steps(input).iter().map(|s| hash(s)).sum()
}

fn arrange(input: &str) -> Result<Boxes, String> {
    let mut boxes = Boxes::new();
    for s in split_steps(input) {
        let step = Step::try_from(s)?;
        boxes.apply(&step);
    }
    Ok(boxes)
}

#[cfg(test)]
const SAMPLE: &str = "rn=1,cm-,qp=3,cm=2,qp-,pc=4,ot=9,ab=5,pc-,pc=6,ot=7\n";

#[test]
fn test_hash() {
    assert_eq!(hash("HASH"), 52);
    assert_eq!(hash("rn=1"), 30);
    assert_eq!(hash("rn"), 0);
    assert_eq!(hash("qp"), 1);
    assert_eq!(hash(""), 0);
}

#[test]
fn test_sum_of_hashes() {
    assert_eq!(sum_of_hashes(SAMPLE), 1320);
    assert_eq!(sum_of_hashes("rn=1,\ncm-"), hash("rn=1") + hash("cm-"));
}

#[test]
fn test_parse_step() {
    assert_eq!(
        Step::try_from("cm-"),
        Ok(Step {
            label: "cm".to_string(),
            operation: Operation::Remove
        })
    );
    assert_eq!(
        Step::try_from("ot=7"),
        Ok(Step {
            label: "ot".to_string(),
            operation: Operation::Insert(7)
        })
    );
    assert!(Step::try_from("ot").is_err());
    assert!(Step::try_from("ot=x").is_err());
}

#[test]
fn test_focusing_power() {
    let boxes = arrange(SAMPLE).expect("valid test data");
    let labels: Vec<&str> = boxes.boxes[3].iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["ot", "ab", "pc"]);
    assert_eq!(boxes.focusing_power(), 145);
}

fn part1(input: &str) {
    println!("Day 15 part 1: {}", sum_of_hashes(input));
}

fn part2(input: &str) {
    match arrange(input) {
        Ok(boxes) => println!("Day 15 part 2: {}", boxes.focusing_power()),
        Err(e) => fail(&e),
    }
}

fn main() {
    init_tracing("info");
    let input = read_input();
    part1(&input);
    part2(&input);
}
