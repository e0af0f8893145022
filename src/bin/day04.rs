use std::collections::HashSet;

use nom::{
    bytes::complete::tag,
    character::complete::{space1, u32 as parse_u32},
    combinator::map,
    multi::separated_list1,
    sequence::{preceded, tuple},
    IResult,
};
use tracing::{event, Level};

use aoc2023::{fail, init_tracing, read_input};

#[derive(Debug, PartialEq, Eq)]
struct Card {
    id: u32,
    winning: Vec<u32>,
    have: Vec<u32>,
}

fn parse_numbers(input: &str) -> IResult<&str, Vec<u32>> {
    separated_list1(space1, parse_u32)(input)
}

fn parse_card(input: &str) -> IResult<&str, Card> {
    map(
        tuple((
            preceded(tuple((tag("Card"), space1)), parse_u32),
            preceded(tuple((tag(":"), space1)), parse_numbers),
            preceded(tuple((space1, tag("|"), space1)), parse_numbers),
        )),
        |(id, winning, have)| Card { id, winning, have },
    )(input)
}

impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Card, String> {
        match parse_card(s.trim()) {
            Ok(("", card)) => Ok(card),
            Ok((unparsed, _)) => Err(format!("unexpected trailing junk: '{}'", unparsed)),
            Err(e) => Err(format!("failed to parse '{}': {}", s, e)),
        }
    }
}

impl Card {
    fn matches(&self) -> usize {
        let winning: HashSet<u32> = self.winning.iter().copied().collect();
        self.have.iter().filter(|n| winning.contains(*n)).count()
    }

    fn points(&self) -> Result<u64, String> {
        match self.matches() {
            0 => Ok(0),
            m => u32::try_from(m - 1)
                .ok()
                .and_then(|shift| 1u64.checked_shl(shift))
                .ok_or_else(|| format!("card {} has too many matches ({})", self.id, m)),
        }
    }
}

fn parse_cards(input: &str) -> Result<Vec<Card>, String> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Card::try_from)
        .collect()
}

fn total_points(cards: &[Card]) -> Result<u64, String> {
    cards.iter().try_fold(0u64, |total, card| {
        total
            .checked_add(card.points()?)
            .ok_or_else(|| "total points overflow".to_string())
    })
}

/// Each card with `m` matches wins one copy of each of the next `m`
/// cards, for every copy of it we hold.  Cards past the end of the
/// table are never won.
fn total_cards(cards: &[Card]) -> usize {
    let mut copies: Vec<usize> = vec![1; cards.len()];
    for (i, card) in cards.iter().enumerate() {
        let m = card.matches();
        let last = (i + m).min(cards.len() - 1);
        for j in (i + 1)..=last {
            copies[j] += copies[i];
        }
        event!(
            Level::DEBUG,
            "card {} has {} matches and {} copies",
            card.id,
            m,
            copies[i]
        );
    }
    copies.iter().sum()
}

#[cfg(test)]
const SAMPLE: &str = concat!(
    "Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53\n",
    "Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19\n",
    "Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1\n",
    "Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83\n",
    "Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36\n",
    "Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11\n",
);

#[test]
fn test_parse_card() {
    assert_eq!(
        Card::try_from("Card  12:  1 21 | 69  1"),
        Ok(Card {
            id: 12,
            winning: vec![1, 21],
            have: vec![69, 1],
        })
    );
    assert!(Card::try_from("Card 1: 1 2 3").is_err());
    assert!(Card::try_from("Card 1: 1 2 | 3 x").is_err());
}

#[test]
fn test_points() {
    let cards = parse_cards(SAMPLE).expect("valid test data");
    let points: Vec<u64> = cards.iter().map(|c| c.points().expect("small card")).collect();
    assert_eq!(points, vec![8, 2, 2, 1, 0, 0]);
    assert_eq!(total_points(&cards), Ok(13));
}

#[cfg(test)]
fn card_with_matches(m: u32) -> Card {
    let numbers: Vec<u32> = (1..=m).collect();
    Card {
        id: 1,
        winning: numbers.clone(),
        have: numbers,
    }
}

#[test]
fn test_many_matches() {
    assert_eq!(card_with_matches(40).points(), Ok(1 << 39));
    assert_eq!(card_with_matches(64).points(), Ok(1 << 63));
    assert_eq!(total_points(&[card_with_matches(40)]), Ok(1 << 39));
    assert!(card_with_matches(65).points().is_err());
    assert!(total_points(&[card_with_matches(64), card_with_matches(64)]).is_err());
}

#[test]
fn test_total_cards() {
    let cards = parse_cards(SAMPLE).expect("valid test data");
    assert_eq!(total_cards(&cards), 30);
    assert_eq!(total_cards(&[]), 0);
}

fn part1(cards: &[Card]) {
    match total_points(cards) {
        Ok(total) => println!("Day 04 part 1: {}", total),
        Err(e) => fail(&e),
    }
}

fn part2(cards: &[Card]) {
    println!("Day 04 part 2: {}", total_cards(cards));
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match parse_cards(&input) {
        Ok(cards) => {
            part1(&cards);
            part2(&cards);
        }
        Err(e) => fail(&e),
    }
}
