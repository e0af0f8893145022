use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;

use tracing::{event, Level};

use aoc2023::{fail, init_tracing, read_input};

const CARDS: &str = "23456789TJQKA";

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Rules {
    Jacks,
    Jokers,
}

#[derive(Debug, PartialEq, Eq, Clone)]
struct Hand {
    cards: [char; 5],
    bid: u64,
}

impl Display for Hand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for card in self.cards {
            write!(f, "{}", card)?;
        }
        write!(f, " {}", self.bid)
    }
}

fn card_strength(card: char, rules: Rules) -> usize {
    match (card, rules) {
        ('J', Rules::Jokers) => 0,
        _ => CARDS.find(card).map_or(0, |pos| pos + 1),
    }
}

impl Hand {
    fn hand_type(&self, rules: Rules) -> HandType {
        let mut counts: HashMap<char, usize> = HashMap::new();
        let mut jokers = 0;
        for card in self.cards {
            if card == 'J' && rules == Rules::Jokers {
                jokers += 1;
            } else {
                *counts.entry(card).or_insert(0) += 1;
            }
        }
        let mut freq: Vec<usize> = counts.values().copied().collect();
        freq.sort_unstable_by(|a, b| b.cmp(a));
        // Jokers always do best by joining the largest group.
        match freq.first_mut() {
            Some(top) => *top += jokers,
            None => freq.push(jokers),
        }
        match (freq[0], freq.get(1).copied().unwrap_or(0)) {
            (5, _) => HandType::FiveOfAKind,
            (4, _) => HandType::FourOfAKind,
            (3, 2) => HandType::FullHouse,
            (3, _) => HandType::ThreeOfAKind,
            (2, 2) => HandType::TwoPair,
            (2, _) => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }

    fn sort_key(&self, rules: Rules) -> (HandType, [usize; 5]) {
        (
            self.hand_type(rules),
            self.cards.map(|card| card_strength(card, rules)),
        )
    }
}

impl TryFrom<&str> for Hand {
    type Error = String;
    fn try_from(s: &str) -> Result<Hand, String> {
        let (cards, bid) = match s.trim().split_once(' ') {
            Some(parts) => parts,
            None => {
                return Err(format!("expected cards and a bid, got '{}'", s));
            }
        };
        let chars: Vec<char> = cards.chars().collect();
        let cards: [char; 5] = match chars.as_slice() {
            &[a, b, c, d, e] => [a, b, c, d, e],
            _ => {
                return Err(format!("a hand has 5 cards, not '{}'", cards));
            }
        };
        if let Some(bad) = cards.iter().find(|card| !CARDS.contains(**card)) {
            return Err(format!("unknown card '{}'", bad));
        }
        let bid = bid
            .trim()
            .parse()
            .map_err(|e: ParseIntError| format!("bad bid '{}': {}", bid, e))?;
        Ok(Hand { cards, bid })
    }
}

fn parse_hands(input: &str) -> Result<Vec<Hand>, String> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Hand::try_from)
        .collect()
}

fn total_winnings(hands: &[Hand], rules: Rules) -> u64 {
    let mut ranked: Vec<&Hand> = hands.iter().collect();
    ranked.sort_by_cached_key(|hand| hand.sort_key(rules));
    ranked
        .iter()
        .enumerate()
        .map(|(i, hand)| {
            let rank = i as u64 + 1;
            event!(
                Level::DEBUG,
                "rank {} is {} ({:?})",
                rank,
                hand,
                hand.hand_type(rules)
            );
            rank * hand.bid
        })
        .sum()
}

#[cfg(test)]
const SAMPLE: &str = concat!(
    "32T3K 765\n",
    "T55J5 684\n",
    "KK677 28\n",
    "KTJJT 220\n",
    "QQQJA 483\n",
);

#[cfg(test)]
fn hand(cards: &str) -> Hand {
    Hand::try_from(format!("{} 1", cards).as_str()).expect("valid test hand")
}

#[test]
fn test_parse_hand() {
    assert_eq!(
        Hand::try_from("32T3K 765"),
        Ok(Hand {
            cards: ['3', '2', 'T', '3', 'K'],
            bid: 765
        })
    );
    assert!(Hand::try_from("32T3 765").is_err());
    assert!(Hand::try_from("32T3X 765").is_err());
    assert!(Hand::try_from("32T3K").is_err());
}

#[test]
fn test_hand_type() {
    assert_eq!(hand("AAAAA").hand_type(Rules::Jacks), HandType::FiveOfAKind);
    assert_eq!(hand("AA8AA").hand_type(Rules::Jacks), HandType::FourOfAKind);
    assert_eq!(hand("23332").hand_type(Rules::Jacks), HandType::FullHouse);
    assert_eq!(hand("TTT98").hand_type(Rules::Jacks), HandType::ThreeOfAKind);
    assert_eq!(hand("23432").hand_type(Rules::Jacks), HandType::TwoPair);
    assert_eq!(hand("A23A4").hand_type(Rules::Jacks), HandType::OnePair);
    assert_eq!(hand("23456").hand_type(Rules::Jacks), HandType::HighCard);

    assert_eq!(hand("KTJJT").hand_type(Rules::Jacks), HandType::TwoPair);
    assert_eq!(hand("KTJJT").hand_type(Rules::Jokers), HandType::FourOfAKind);
    assert_eq!(hand("JJJJJ").hand_type(Rules::Jokers), HandType::FiveOfAKind);
    assert_eq!(hand("2345J").hand_type(Rules::Jokers), HandType::OnePair);
    assert_eq!(hand("2233J").hand_type(Rules::Jokers), HandType::FullHouse);
}

#[test]
fn test_joker_is_weakest() {
    assert!(hand("JKKK2").sort_key(Rules::Jokers) < hand("QQQQ2").sort_key(Rules::Jokers));
    assert!(hand("JKKK3").sort_key(Rules::Jacks) > hand("2KKK3").sort_key(Rules::Jacks));
}

#[test]
fn test_total_winnings() {
    let hands = parse_hands(SAMPLE).expect("valid test data");
    assert_eq!(total_winnings(&hands, Rules::Jacks), 6440);
    assert_eq!(total_winnings(&hands, Rules::Jokers), 5905);
}

fn part1(hands: &[Hand]) {
    println!("Day 07 part 1: {}", total_winnings(hands, Rules::Jacks));
}

fn part2(hands: &[Hand]) {
    println!("Day 07 part 2: {}", total_winnings(hands, Rules::Jokers));
}

fn main() {
    init_tracing("info");
    let input = read_input();
    match parse_hands(&input) {
        Ok(hands) => {
            part1(&hands);
            part2(&hands);
        }
        Err(e) => fail(&e),
    }
}
