//! Day 5: Supply Stacks.

use std::fmt;
use std::process::ExitCode;

use advent_of_code_2022::{
    debugln,
    helpers::{parse, slice_pair_mut},
    ParseError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Crate(pub char);

impl fmt::Display for Crate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// Crates from bottom to top.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Stack(Vec<Crate>);

impl Stack {
    #[inline]
    pub fn height(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn get(&self, height: usize) -> Option<Crate> {
        self.0.get(height).copied()
    }

    /// CrateMover 9000: one crate at a time, so the moved crates end up in
    /// reverse order.
    pub fn move_from_9000(&mut self, other: &mut Self, count: usize) {
        let start = other.height() - count;
        self.0.extend(other.0.drain(start..).rev());
    }

    /// CrateMover 9001: all crates at once, order preserved.
    pub fn move_from_9001(&mut self, other: &mut Self, count: usize) {
        let start = other.height() - count;
        self.0.extend(other.0.drain(start..));
    }

    #[inline]
    pub fn top(&self) -> Option<Crate> {
        self.0.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Ship {
    stacks: Vec<Stack>,
}

impl Ship {
    /// Borrows the `from` and `to` stacks (1-based), or `None` if they are the
    /// same stack.
    pub fn stack_pair_mut(&mut self, from: usize, to: usize) -> Option<(&mut Stack, &mut Stack)> {
        slice_pair_mut(&mut self.stacks[..], from - 1, to - 1)
    }

    pub fn top_of_each_stack(&self) -> String {
        self.stacks
            .iter()
            .filter_map(|stack| stack.top())
            .map(|krate| krate.0)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Move {
    pub count: usize,
    pub from: usize,
    pub to: usize,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move {} from {} to {}", self.count, self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrateMover {
    Model9000,
    Model9001,
}

/// A starting ship plus a rearrangement procedure that is known to be
/// executable on it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Procedure {
    ship: Ship,
    moves: Vec<Move>,
}

impl Procedure {
    /// Checks every move against the stack heights at that point of the
    /// procedure. Both crane models change heights the same way.
    fn new(ship: Ship, moves: Vec<(usize, Move)>) -> parse::Result<Self> {
        let mut heights: Vec<usize> = ship.stacks.iter().map(Stack::height).collect();
        let n_stacks = heights.len();

        for &(line, m) in &moves {
            for stack in [m.from, m.to] {
                if !(1..=n_stacks).contains(&stack) {
                    return Err(ParseError::invalid(
                        line,
                        format!("there is no stack {stack}, only 1 to {n_stacks}"),
                    ));
                }
            }
            let available = heights[m.from - 1];
            if m.count > available {
                return Err(ParseError::invalid(
                    line,
                    format!(
                        "cannot move {} crates from stack {} holding {available}",
                        m.count, m.from
                    ),
                ));
            }
            heights[m.from - 1] -= m.count;
            heights[m.to - 1] += m.count;
        }

        Ok(Self {
            ship,
            moves: moves.into_iter().map(|(_, m)| m).collect(),
        })
    }

    fn run(&self, crane: CrateMover) -> Ship {
        let mut ship = self.ship.clone();

        debugln!("BEGIN:");
        debugln!("{ship}");

        for &m in &self.moves {
            debugln!("{m}");
            // Moving a stack onto itself changes nothing.
            if let Some((from, to)) = ship.stack_pair_mut(m.from, m.to) {
                match crane {
                    CrateMover::Model9000 => to.move_from_9000(from, m.count),
                    CrateMover::Model9001 => to.move_from_9001(from, m.count),
                }
            }
            debugln!("{ship}");
        }

        debugln!("END:");
        debugln!("{ship}");

        ship
    }
}

fn parse(input: &str) -> parse::Result<Procedure> {
    let mut blocks = parse::blocks(input).into_iter();
    let drawing = blocks.next().ok_or(ParseError::Empty)?;
    let ship = Ship::from_drawing(&drawing)?;

    let moves = blocks
        .flat_map(|block| {
            let first_line = block.first_line;
            block
                .lines
                .into_iter()
                .enumerate()
                .map(move |(i, line)| (first_line + i + 1, line))
        })
        .map(|(line, text)| {
            parse::from_str(text, Move::parser())
                .map(|m| (line, m))
                .map_err(|err| err.offset_lines(line - 1))
        })
        .collect::<parse::Result<Vec<_>>>()?;

    Procedure::new(ship, moves)
}

fn part_one(procedure: &Procedure) -> Option<String> {
    let solution = procedure.run(CrateMover::Model9000).top_of_each_stack();
    debugln!("Solution: {solution}");
    Some(solution)
}

fn part_two(procedure: &Procedure) -> Option<String> {
    let solution = procedure.run(CrateMover::Model9001).top_of_each_stack();
    debugln!("Solution: {solution}");
    Some(solution)
}

fn main() -> ExitCode {
    advent_of_code_2022::run(5, |input| {
        let procedure = parse(input)?;
        advent_of_code_2022::solve!(1, part_one, &procedure);
        advent_of_code_2022::solve!(2, part_two, &procedure);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Procedure {
        let input = advent_of_code_2022::read_file("examples", 5).unwrap();
        parse(&input).unwrap()
    }

    #[test]
    fn test_part_one() {
        assert_eq!(part_one(&example()), Some("CMZ".to_owned()));
    }

    #[test]
    fn test_part_two() {
        assert_eq!(part_two(&example()), Some("MCD".to_owned()));
    }

    #[test]
    fn test_drawing() {
        let ship = example().ship;
        let stacks: Vec<String> = ship
            .stacks
            .iter()
            .map(|stack| stack.0.iter().map(|krate| krate.0).collect())
            .collect();
        assert_eq!(stacks, ["ZN", "MCD", "P"]);
        assert_eq!(
            ship.to_string(),
            "    [D]    \n[N] [C]    \n[Z] [M] [P]\n 1   2   3 \n"
        );
    }

    #[test]
    fn test_trimmed_drawing() {
        let input = "    [D]\n[N] [C]\n[Z] [M] [P]\n 1   2   3\n\nmove 1 from 2 to 1\n";
        let procedure = parse(input).unwrap();
        assert_eq!(procedure.ship, example().ship);
        assert_eq!(part_one(&procedure), Some("DCP".to_owned()));
    }

    #[test]
    fn test_move_to_same_stack() {
        let input = "[A]\n 1 \n\nmove 1 from 1 to 1\n";
        assert_eq!(part_two(&parse(input).unwrap()), Some("A".to_owned()));
    }

    #[test]
    fn test_empty_stacks_are_skipped() {
        let input = "[A]    \n 1   2 \n\nmove 1 from 1 to 2\n";
        assert_eq!(part_one(&parse(input).unwrap()), Some("A".to_owned()));
    }

    #[test]
    fn test_too_many_crates() {
        let input = "[A]    \n 1   2 \n\nmove 1 from 1 to 2\nmove 2 from 2 to 1\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(err, ParseError::Invalid { line: 5, .. }), "{err}");
    }

    #[test]
    fn test_unknown_stack() {
        let input = "[A]\n 1 \n\nmove 1 from 1 to 4\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(err, ParseError::Invalid { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_malformed_move() {
        let input = "[A]\n 1 \n\nmove one from 1 to 1\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_row_too_wide() {
        let input = "[A] [B] [C]\n 1   2 \n\nmove 1 from 1 to 2\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(err, ParseError::Invalid { line: 1, .. }), "{err}");
    }
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

    // "[A]" -> Some('A')
    // "   " -> None
    fn crate_or_no_crate<Input>() -> impl Parser<Input, Output = Option<Crate>>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        // "[A]"
        let krate = c::between(c::token('['), c::token(']'), c::any());

        // "   "
        let no_krate = c::string("   ");

        c::choice((krate.map(|c| Some(Crate(c))), no_krate.map(|_| None)))
    }

    // "    [A] [B]     [C]" -> [None, Some('A'), Some('B'), None, Some('C')]
    fn ship_row<Input>() -> impl Parser<Input, Output = Vec<Option<Crate>>>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        c::sep_by1(crate_or_no_crate(), c::token(' '))
    }

    // " 1   2   3 " -> [1, 2, 3]
    fn stack_numbers<Input>() -> impl Parser<Input, Output = Vec<usize>>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        let spaces = || c::skip_many(c::token(' '));
        let number = (parse::decimal_integer::<usize, _>(), spaces()).map(|(n, _)| n);
        (spaces(), c::many1::<Vec<usize>, _, _>(number)).map(|(_, numbers)| numbers)
    }

    impl Ship {
        /// Reads the crate drawing: rows of crates from top to bottom, then
        /// the stack numbers.
        pub fn from_drawing(drawing: &Block<'_>) -> parse::Result<Self> {
            let located = |i: usize| drawing.first_line + i + 1;

            let Some((numbers_line, rows)) = drawing.lines.split_last() else {
                return Err(advent_of_code_2022::ParseError::Empty);
            };
            let numbers_at = located(rows.len());
            let numbers = parse::from_str(numbers_line, stack_numbers())
                .map_err(|err| err.offset_lines(numbers_at - 1))?;

            if numbers.iter().copied().ne(1..=numbers.len()) {
                return Err(advent_of_code_2022::ParseError::invalid(
                    numbers_at,
                    "stacks must be numbered 1, 2, 3, ...",
                ));
            }

            let n_stacks = numbers.len();
            let mut stacks = vec![Stack::default(); n_stacks];

            // Bottom row first, so each stack fills from the bottom up.
            for (i, text) in rows.iter().enumerate().rev() {
                let line = located(i);
                let row = parse::from_str(text, ship_row())
                    .map_err(|err| err.offset_lines(line - 1))?;

                if row.len() > n_stacks {
                    return Err(advent_of_code_2022::ParseError::invalid(
                        line,
                        format!("{} columns, but only {n_stacks} stacks", row.len()),
                    ));
                }

                for (stack, krate) in stacks.iter_mut().zip(row) {
                    if let Some(krate) = krate {
                        stack.0.push(krate);
                    }
                }
            }

            debugln!("n_rows = {}, n_stacks = {n_stacks}", rows.len());

            Ok(Self { stacks })
        }
    }

    impl Move {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            (
                c::string("move "),
                parse::decimal_integer(),
                c::string(" from "),
                parse::decimal_integer(),
                c::string(" to "),
                parse::decimal_integer(),
            )
                .map(|(_, count, _, from, _, to)| Move { count, from, to })
        }
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n_stacks = self.stacks.len();
        let tallest = self
            .stacks
            .iter()
            .map(|stack| stack.height())
            .max()
            .unwrap_or(0);

        fn write_space_delimited<T: fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            items: impl IntoIterator<Item = T>,
        ) -> fmt::Result {
            let mut first = true;

            for item in items {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{item}")?;
                first = false;
            }
            writeln!(f)?;

            Ok(())
        }

        struct CrateOrNoCrate(Option<Crate>);

        impl fmt::Display for CrateOrNoCrate {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0 {
                    Some(krate) => write!(f, "{krate}"),
                    None => write!(f, "   "),
                }
            }
        }

        for height in (0..tallest).rev() {
            let crates_at_height = self.stacks.iter().map(|stack| {
                let krate = stack.get(height);
                CrateOrNoCrate(krate)
            });
            write_space_delimited(f, crates_at_height)?;
        }

        struct StackNumber(usize);

        impl fmt::Display for StackNumber {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:^3}", self.0)
            }
        }

        let stack_numbers = (1..=n_stacks).map(StackNumber);
        write_space_delimited(f, stack_numbers)?;

        Ok(())
    }
}
