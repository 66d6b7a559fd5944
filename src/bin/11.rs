//! Day 11: Monkey in the Middle.
//!
//! Monkeys take turns, in id order, inspecting every item they hold and
//! throwing it to another monkey. An item thrown to a monkey whose turn has
//! not come yet is inspected again in the same round.

use std::collections::VecDeque;
use std::fmt;
use std::process::ExitCode;

use index_vec::IndexVec;
use num_modular::ModularCoreOps;

use advent_of_code_2022::{
    debug, debugln,
    helpers::{parse, Itertools},
    Error, ParseError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Item(pub u64);

impl Item {
    pub fn reduce_by_boredom_factor(self) -> Self {
        Self(self.0 / 3)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

index_vec::define_index_type! {
    /// A monkey's id, which is also its position in the troop.
    struct MonkeyId = usize;

    DISPLAY_FORMAT = "{}";
}

/// How a monkey changes the worry level of an item it inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add(u64),
    Multiply(u64),
    Square,
}

impl Operation {
    /// Returns `None` if the new worry level does not fit in a `u64`.
    fn apply(self, Item(old): Item) -> Option<Item> {
        match self {
            Operation::Add(value) => old.checked_add(value),
            Operation::Multiply(value) => old.checked_mul(value),
            Operation::Square => old.checked_mul(old),
        }
        .map(Item)
    }

    /// Same as [`Operation::apply`], but computed modulo `modulus`.
    fn apply_mod(self, Item(old): Item, modulus: u64) -> Item {
        let old = old % modulus;
        Item(match self {
            Operation::Add(value) => old.addm(value % modulus, &modulus),
            Operation::Multiply(value) => old.mulm(value % modulus, &modulus),
            Operation::Square => old.mulm(old, &modulus),
        })
    }
}

/// Keeps worry levels from growing without bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorryPolicy {
    /// Worry drops to a third after every inspection.
    Relief,
    /// Worry is kept modulo the product of every monkey's divisor, which
    /// leaves every divisibility test unchanged.
    Modular(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Monkey {
    pub items: VecDeque<Item>,
    pub operation: Operation,
    pub divisor: u64,
    pub if_divisible: MonkeyId,
    pub if_not_divisible: MonkeyId,
    pub inspections: usize,
}

/// A worry level grew past `u64::MAX` while a monkey inspected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WorryOverflow {
    item: Item,
    operation: Operation,
}

impl Monkey {
    /// Inspects `item`. Returns the item with its new worry level and the
    /// monkey it gets thrown to.
    pub fn inspect(
        &mut self,
        item: Item,
        policy: WorryPolicy,
    ) -> Result<(Item, MonkeyId), WorryOverflow> {
        self.inspections += 1;

        debugln!("  Monkey inspects an item with a worry level of {item}.");
        let item = self.adjust_worry(item, policy)?;
        let recipient = self.choose_recipient(item);
        Ok((item, recipient))
    }

    pub fn catch_item(&mut self, item: Item) {
        self.items.push_back(item);
    }

    fn adjust_worry(&self, item: Item, policy: WorryPolicy) -> Result<Item, WorryOverflow> {
        let operation = self.operation;
        match policy {
            WorryPolicy::Relief => {
                let item = operation
                    .apply(item)
                    .ok_or(WorryOverflow { item, operation })?;
                debugln!("    Worry level increases to {item}.");
                let reduced = item.reduce_by_boredom_factor();
                debugln!("    Monkey gets bored with item. Worry level is divided by 3 to {reduced}.");
                Ok(reduced)
            }
            WorryPolicy::Modular(modulus) => {
                let item = operation.apply_mod(item, modulus);
                debugln!("    Worry level changes to {item} (mod {modulus}).");
                Ok(item)
            }
        }
    }

    fn choose_recipient(&self, item: Item) -> MonkeyId {
        let divisor = self.divisor;
        let divisible = item.0 % divisor == 0;
        debugln!(
            "    Current worry level is {}divisible by {divisor}.",
            if divisible { "" } else { "not " }
        );
        let recipient = if divisible {
            self.if_divisible
        } else {
            self.if_not_divisible
        };
        debugln!("    Item with worry level {item} is thrown to monkey {recipient}.");
        recipient
    }
}

/// Every monkey, indexed by id. Routing targets are known to exist and never
/// point a monkey at itself.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Troop {
    monkeys: IndexVec<MonkeyId, Monkey>,
    /// Product of every monkey's divisor, `None` if it overflows a `u64`.
    modulus: Option<u64>,
}

impl Troop {
    fn do_round(&mut self, round_number: usize, policy: WorryPolicy) -> Result<(), Error> {
        debugln!();
        debugln!("Round {}:", round_number);
        debugln!();

        for id in self.monkeys.indices() {
            debugln!("Monkey {id}:");
            while let Some(item) = self.monkeys[id].items.pop_front() {
                let (item, recipient) = self.monkeys[id].inspect(item, policy).map_err(
                    |WorryOverflow { item, operation }| {
                        Error::Unsolved(format!(
                            "round {round_number}: monkey {id} applies {operation:?} to \
                             worry level {item}, which overflows"
                        ))
                    },
                )?;
                self.monkeys[recipient].catch_item(item);
            }
        }

        debugln!();
        debugln!("Round {} summary:", round_number);
        debugln!();
        for (id, monkey) in self.monkeys.iter_enumerated() {
            debug!("Monkey {id}: ");
            let mut first = true;
            for item in &monkey.items {
                if !first {
                    debug!(", ");
                }
                debug!("{item}");

                first = false;
            }
            debugln!();
        }

        Ok(())
    }

    fn item_count(&self) -> usize {
        self.monkeys.iter().map(|monkey| monkey.items.len()).sum()
    }

    fn inspection_counts(&self) -> Vec<usize> {
        self.monkeys.iter().map(|monkey| monkey.inspections).collect()
    }

    /// The product of the two highest inspection counts.
    fn monkey_business(&self) -> usize {
        self.monkeys
            .iter()
            .map(|monkey| monkey.inspections)
            .max_n(2)
            .into_iter()
            .product()
    }
}

fn parse(input: &str) -> parse::Result<Troop> {
    let blocks = parse::blocks(input);
    if blocks.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut monkeys = IndexVec::with_capacity(blocks.len());
    for block in &blocks {
        let (id, monkey) = Monkey::from_block(block)?;
        if id != monkeys.next_idx() {
            return Err(ParseError::invalid(
                block.first_line + 1,
                format!("expected monkey {}, found monkey {id}", monkeys.next_idx()),
            ));
        }
        monkeys.push(monkey);
    }

    Troop::new(monkeys, &blocks)
}

impl Troop {
    /// Checks routing targets and computes the modulus. `blocks` locate each
    /// monkey in the input, for error messages.
    fn new(monkeys: IndexVec<MonkeyId, Monkey>, blocks: &[parse::Block<'_>]) -> parse::Result<Self> {
        let mut modulus = Some(1_u64);

        for ((id, monkey), block) in monkeys.iter_enumerated().zip(blocks) {
            for target in [monkey.if_divisible, monkey.if_not_divisible] {
                let reason = if target == id {
                    format!("monkey {id} throws to itself")
                } else if target >= monkeys.next_idx() {
                    format!("monkey {id} throws to monkey {target}, which does not exist")
                } else {
                    continue;
                };
                return Err(ParseError::invalid(block.first_line + 1, reason));
            }

            // Only modular worry needs it; relief mode still works without.
            modulus = modulus.and_then(|product| product.checked_mul(monkey.divisor));
        }

        Ok(Self { monkeys, modulus })
    }
}

fn solve(troop: &Troop, num_rounds: usize, policy: WorryPolicy) -> Result<usize, Error> {
    let mut troop = troop.clone();
    for i in 0..num_rounds {
        troop.do_round(i + 1, policy)?;
    }

    let monkey_business_level = troop.monkey_business();
    debugln!(
        "{} items, inspections {:?}",
        troop.item_count(),
        troop.inspection_counts()
    );
    debugln!("Monkey business: {monkey_business_level}");
    Ok(monkey_business_level)
}

fn part_one(troop: &Troop) -> Result<usize, Error> {
    const NUM_ROUNDS: usize = 20;

    solve(troop, NUM_ROUNDS, WorryPolicy::Relief)
}

fn part_two(troop: &Troop) -> Result<usize, Error> {
    const NUM_ROUNDS: usize = 10_000;

    let modulus = troop.modulus.ok_or_else(|| {
        Error::Unsolved("the product of all divisors does not fit in a u64".to_owned())
    })?;
    solve(troop, NUM_ROUNDS, WorryPolicy::Modular(modulus))
}

fn main() -> ExitCode {
    advent_of_code_2022::run(11, |input| {
        let troop = parse(input)?;
        advent_of_code_2022::solve!(1, part_one, &troop);
        advent_of_code_2022::solve!(2, part_two, &troop);
        Ok(())
    })
}


mod parsing {
    use super::*;

    use advent_of_code_2022::helpers::{parse, parse::Block};

    mod c {
        pub use combine::{
            parser::char::string,
            *,
        };
    }

    use c::{ParseError, Parser, Stream};

    fn spaces<Input>() -> impl Parser<Input, Output = ()>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        c::skip_many(c::token(' '))
    }

    // "Monkey 0:"
    fn header<Input>() -> impl Parser<Input, Output = MonkeyId>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        (c::string("Monkey "), parse::decimal_integer(), c::token(':'))
            .map(|(_, id, _)| MonkeyId::new(id))
    }

    // "Starting items: 79, 98"
    fn starting_items<Input>() -> impl Parser<Input, Output = VecDeque<Item>>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        let item = parse::decimal_integer().map(Item);
        let separator = (c::token(','), spaces());
        (
            c::string("Starting items:"),
            spaces(),
            c::sep_by::<Vec<Item>, _, _, _>(item, separator),
        )
            .map(|(_, _, items)| items.into())
    }

    // "Operation: new = old * 19"
    fn operation<Input>() -> impl Parser<Input, Output = Operation>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        let operand = c::choice((
            c::string("old").map(|_| None),
            parse::decimal_integer().map(Some),
        ));
        (
            c::string("Operation: new = old "),
            c::one_of("+*".chars()),
            c::token(' '),
            operand,
        )
            .map(|(_, operator, _, operand)| match (operator, operand) {
                ('+', Some(value)) => Operation::Add(value),
                // old + old
                ('+', None) => Operation::Multiply(2),
                (_, Some(value)) => Operation::Multiply(value),
                (_, None) => Operation::Square,
            })
    }

    // "Test: divisible by 23"
    fn divisor<Input>() -> impl Parser<Input, Output = u64>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        (c::string("Test: divisible by "), parse::decimal_integer()).map(|(_, divisor)| divisor)
    }

    // "If true: throw to monkey 2"
    fn target<Input>(condition: &'static str) -> impl Parser<Input, Output = MonkeyId>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        (
            c::string("If "),
            c::string(condition),
            c::string(": throw to monkey "),
            parse::decimal_integer(),
        )
            .map(|(_, _, _, id)| MonkeyId::new(id))
    }

    impl Monkey {
        const BLOCK_LINES: usize = 6;

        /// Reads one monkey's block of lines. Indentation is ignored.
        pub fn from_block(block: &Block<'_>) -> parse::Result<(MonkeyId, Self)> {
            let first_line = block.first_line + 1;
            if block.lines.len() != Self::BLOCK_LINES {
                return Err(advent_of_code_2022::ParseError::invalid(
                    first_line,
                    format!(
                        "a monkey takes {} lines, found {}",
                        Self::BLOCK_LINES,
                        block.lines.len()
                    ),
                ));
            }

            let line = |i: usize| block.lines[i].trim();
            let at = |i: usize| move |err: advent_of_code_2022::ParseError| err.offset_lines(block.first_line + i);

            let id = parse::from_str(line(0), header()).map_err(at(0))?;
            let items = parse::from_str(line(1), starting_items()).map_err(at(1))?;
            let operation = parse::from_str(line(2), operation()).map_err(at(2))?;
            let divisor = parse::from_str(line(3), divisor()).map_err(at(3))?;
            let if_divisible = parse::from_str(line(4), target("true")).map_err(at(4))?;
            let if_not_divisible = parse::from_str(line(5), target("false")).map_err(at(5))?;

            if divisor == 0 {
                return Err(advent_of_code_2022::ParseError::invalid(
                    first_line + 3,
                    "divisor must be positive",
                ));
            }

            Ok((
                id,
                Self {
                    items,
                    operation,
                    divisor,
                    if_divisible,
                    if_not_divisible,
                    inspections: 0,
                },
            ))
        }
    }
}
