use regex::Regex;
use tracing::{event, Level};

use aoc2023::{fail, init_tracing, read_input};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    fn offset(&self) -> (i64, i64) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
struct Dig {
    heading: Heading,
    distance: i64,
}

/// One line of the dig plan, read both ways: as written, and with the
/// distance and heading hidden in the colour code.
#[derive(Debug, PartialEq, Eq)]
struct PlanLine {
    written: Dig,
    encoded: Dig,
}

struct PlanParser {
    line_rx: Regex,
}

impl PlanParser {
    fn new() -> PlanParser {
        PlanParser {
            line_rx: Regex::new(r"^([UDLR]) (\d+) \(#([0-9a-fA-F]{5})([0-3])\)$").unwrap(),
        }
    }

    fn parse_line(&self, line: &str) -> Result<PlanLine, String> {
        let caps = match self.line_rx.captures(line.trim()) {
            Some(caps) => caps,
            None => {
                return Err(format!("unexpected dig plan line '{}'", line));
            }
        };
        let heading = match &caps[1] {
            "U" => Heading::Up,
            "D" => Heading::Down,
            "L" => Heading::Left,
            _ => Heading::Right,
        };
        let distance: i64 = caps[2]
            .parse()
            .map_err(|e| format!("bad distance in '{}': {}", line, e))?;
        let encoded_distance = i64::from_str_radix(&caps[3], 16)
            .map_err(|e| format!("bad colour in '{}': {}", line, e))?;
        let encoded_heading = match &caps[4] {
            "0" => Heading::Right,
            "1" => Heading::Down,
            "2" => Heading::Left,
            _ => Heading::Up,
        };
        Ok(PlanLine {
            written: Dig { heading, distance },
            encoded: Dig {
                heading: encoded_heading,
                distance: encoded_distance,
            },
        })
    }

    fn parse(&self, input: &str) -> Result<Vec<PlanLine>, String> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.parse_line(line))
            .collect()
    }
}

/// Cubic metres of lava the lagoon holds.  The shoelace formula gives
/// the area enclosed by the centres of the trench cells; Pick's theorem
/// then adds the outer half of the trench itself.
fn lagoon_volume(plan: &[Dig]) -> i64 {
    let mut x = 0;
    let mut y = 0;
    let mut twice_area = 0;
    let mut perimeter = 0;
    for dig in plan {
        let (dx, dy) = dig.heading.offset();
        let nx = x + dx * dig.distance;
        let ny = y + dy * dig.distance;
        twice_area += x * ny - nx * y;
        perimeter += dig.distance;
        x = nx;
        y = ny;
    }
    if (x, y) != (0, 0) {
        event!(Level::WARN, "dig plan ends at ({},{}), not the start", x, y);
    }
    twice_area.abs() / 2 + perimeter / 2 + 1
}

#[cfg(test)]
const SAMPLE: &str = concat!(
    "R 6 (#70c710)\n",
    "D 5 (#0dc571)\n",
    "L 2 (#5713f0)\n",
    "D 2 (#d2c7a2)\n",
    "R 2 (#59c680)\n",
    "D 2 (#411b91)\n",
    "L 5 (#8ceee2)\n",
    "U 2 (#caa173)\n",
    "L 1 (#1b58f2)\n",
    "U 2 (#caa171)\n",
    "R 2 (#7807d2)\n",
    "U 3 (#a77fd2)\n",
    "L 2 (#015232)\n",
    "U 2 (#7a21e3)\n",
);

#[test]
fn test_parse_line() {
    let parser = PlanParser::new();
    assert_eq!(
        parser.parse_line("R 6 (#70c710)"),
        Ok(PlanLine {
            written: Dig {
                heading: Heading::Right,
                distance: 6
            },
            encoded: Dig {
                heading: Heading::Right,
                distance: 461937
            },
        })
    );
    assert_eq!(
        parser.parse_line("U 2 (#7a21e3)").map(|p| p.encoded),
        Ok(Dig {
            heading: Heading::Up,
            distance: 500254
        })
    );
    assert!(parser.parse_line("X 2 (#7a21e3)").is_err());
    assert!(parser.parse_line("U 2 (#7a21e4)").is_err());
    assert!(parser.parse_line("U 2").is_err());
}

#[test]
fn test_lagoon_volume() {
    let plan = PlanParser::new().parse(SAMPLE).expect("valid test data");
    let written: Vec<Dig> = plan.iter().map(|p| p.written).collect();
    let encoded: Vec<Dig> = plan.iter().map(|p| p.encoded).collect();
    assert_eq!(lagoon_volume(&written), 62);
    assert_eq!(lagoon_volume(&encoded), 952408144115);
}

#[test]
fn test_square() {
    let plan = [
        Dig {
            heading: Heading::Right,
            distance: 2,
        },
        Dig {
            heading: Heading::Down,
            distance: 2,
        },
        Dig {
            heading: Heading::Left,
            distance: 2,
        },
        Dig {
            heading: Heading::Up,
            distance: 2,
        },
    ];
    assert_eq!(lagoon_volume(&plan), 9);
}

fn part1(plan: &[PlanLine]) {
    let digs: Vec<Dig> = plan.iter().map(|p| p.written).collect();
    println!("Day 18 part 1: {}", lagoon_volume(&digs));
}

fn part2(plan: &[PlanLine]) {
    let digs: Vec<Dig> = plan.iter().map(|p| p.encoded).collect();
    println!("Day 18 part 2: {}", lagoon_volume(&digs));
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match PlanParser::new().parse(&input) {
        Ok(plan) => {
            part1(&plan);
            part2(&plan);
        }
        Err(e) => fail(&e),
    }
}
