//! Day 3: Rucksack Reorganization.

use std::fmt;
use std::process::ExitCode;

use advent_of_code_2022::{debugln, helpers::parse, Error, ParseError};
use bitvec::BitArr;
use itertools::Itertools;

#[derive(Clone, Copy, PartialEq, Eq)]
struct Item {
    priority: u8,
}

impl TryFrom<char> for Item {
    type Error = ();

    #[inline]
    #[allow(non_upper_case_globals)]
    fn try_from(value: char) -> Result<Self, Self::Error> {
        const a: u32 = Item::LOWERCASE_A as u32;
        const z: u32 = Item::LOWERCASE_Z as u32;
        const A: u32 = Item::UPPERCASE_A as u32;
        const Z: u32 = Item::UPPERCASE_Z as u32;

        let value = value.into();
        let priority: u32 = match value {
            a..=z => (value - a) + Self::LOWERCASE_PRIORITY as u32,
            A..=Z => (value - A) + Self::UPPERCASE_PRIORITY as u32,
            _ => return Err(()),
        };

        // At most 52, always fits.
        Ok(Self {
            priority: priority as u8,
        })
    }
}

impl Item {
    const ALPHABET_SIZE: u8 = 26;

    const LOWERCASE_PRIORITY: u8 = 1;
    const UPPERCASE_PRIORITY: u8 = Self::LOWERCASE_PRIORITY + Self::ALPHABET_SIZE;

    const MAX_PRIORITY: u8 = Self::UPPERCASE_PRIORITY + Self::ALPHABET_SIZE;

    const LOWERCASE_A: u8 = b'a';
    const LOWERCASE_Z: u8 = b'z';
    const UPPERCASE_A: u8 = b'A';
    const UPPERCASE_Z: u8 = b'Z';

    #[inline]
    fn from_priority(priority: usize) -> Self {
        debug_assert!((1..Self::MAX_PRIORITY as usize).contains(&priority));
        Self {
            priority: priority as u8,
        }
    }

    #[inline]
    pub fn priority(&self) -> u8 {
        self.priority
    }

    #[inline]
    pub fn character(&self) -> char {
        let is_lowercase =
            (Self::LOWERCASE_PRIORITY..Self::UPPERCASE_PRIORITY).contains(&self.priority);

        if is_lowercase {
            (Self::LOWERCASE_A + (self.priority - Self::LOWERCASE_PRIORITY)) as char
        } else {
            (Self::UPPERCASE_A + (self.priority - Self::UPPERCASE_PRIORITY)) as char
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.character();
        let p = self.priority();
        f.debug_tuple("Item")
            .field(&format!("'{c}' ({p})"))
            .finish()
    }
}

/// The item types present in some collection, indexed by priority.
type ItemSet = BitArr!(for Item::MAX_PRIORITY as usize, in u64);

fn item_set(items: &[Item]) -> ItemSet {
    let mut set = ItemSet::ZERO;
    for item in items {
        set.set(item.priority() as usize, true);
    }
    set
}

/// The lowest-priority item present in every set.
fn common_item(sets: &[ItemSet]) -> Option<Item> {
    let (first, rest) = sets.split_first()?;
    first
        .iter_ones()
        .find(|&priority| rest.iter().all(|set| set[priority]))
        .map(Item::from_priority)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rucksack {
    /// 1-based line the rucksack was listed on.
    line: usize,
    items: Vec<Item>,
}

impl Rucksack {
    fn from_line(line: usize, text: &str) -> parse::Result<Self> {
        let items = text
            .chars()
            .map(|c| {
                Item::try_from(c)
                    .map_err(|()| ParseError::invalid(line, format!("{c:?} is not an item")))
            })
            .collect::<parse::Result<Vec<Item>>>()?;

        if items.is_empty() || items.len() % 2 != 0 {
            return Err(ParseError::invalid(
                line,
                format!("{} items cannot fill two equal compartments", items.len()),
            ));
        }

        Ok(Self { line, items })
    }

    pub fn compartments(&self) -> [&[Item]; 2] {
        let (first, second) = self.items.split_at(self.items.len() / 2);
        [first, second]
    }

    pub fn item_set(&self) -> ItemSet {
        item_set(&self.items)
    }

    pub fn duplicate_item(&self) -> Option<Item> {
        common_item(&self.compartments().map(item_set))
    }
}

fn parse(input: &str) -> parse::Result<Vec<Rucksack>> {
    let rucksacks = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(index, line)| Rucksack::from_line(index + 1, line))
        .collect::<parse::Result<Vec<_>>>()?;

    if rucksacks.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(rucksacks)
}

fn part_one(rucksacks: &[Rucksack]) -> Result<u32, Error> {
    rucksacks
        .iter()
        .map(|rucksack| {
            let item = rucksack.duplicate_item().ok_or_else(|| {
                Error::Unsolved(format!(
                    "rucksack on line {} has no item in both compartments",
                    rucksack.line
                ))
            })?;
            debugln!("line {}: {item:?}", rucksack.line);
            Ok(u32::from(item.priority()))
        })
        .sum()
}

fn part_two(rucksacks: &[Rucksack]) -> Result<u32, Error> {
    if rucksacks.len() % 3 != 0 {
        return Err(Error::Unsolved(format!(
            "{} rucksacks cannot be split into groups of three",
            rucksacks.len()
        )));
    }

    rucksacks
        .iter()
        .tuples()
        .map(|(first, second, third)| {
            let sets = [first.item_set(), second.item_set(), third.item_set()];
            let badge = common_item(&sets).ok_or_else(|| {
                Error::Unsolved(format!(
                    "group starting on line {} has no common badge",
                    first.line
                ))
            })?;
            debugln!("group at line {}: badge {badge:?}", first.line);
            Ok(u32::from(badge.priority()))
        })
        .sum()
}

fn main() -> ExitCode {
    advent_of_code_2022::run(3, |input| {
        let rucksacks = parse(input)?;
        advent_of_code_2022::solve!(1, part_one, &rucksacks);
        advent_of_code_2022::solve!(2, part_two, &rucksacks);
        Ok(())
    })
}
