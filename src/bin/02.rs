//! Day 2: Rock Paper Scissors.
//!
//! Each line of the strategy guide is the opponent's choice followed by a
//! second column whose meaning differs between the two parts.

use std::process::ExitCode;

use advent_of_code_2022::{debugln, helpers::parse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Rock,
    Paper,
    Scissors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Loss,
    Draw,
}

/// The second column of the strategy guide, before it is given a meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GuideEntry {
    their_choice: Choice,
    column: Column,
}

struct Round {
    choice: Choice,
    outcome: Outcome,
}

impl Choice {
    const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub fn for_outcome(outcome: Outcome, their_choice: Choice) -> Choice {
        Self::ALL
            .into_iter()
            .find(|&my_choice| Outcome::for_choices(my_choice, their_choice) == outcome)
            .unwrap_or_else(|| unreachable!("every outcome is reachable from every choice"))
    }

    pub fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Paper, Choice::Rock)
                | (Choice::Scissors, Choice::Paper)
        )
    }
}

impl Outcome {
    pub fn for_choices(my_choice: Choice, their_choice: Choice) -> Outcome {
        if my_choice.beats(their_choice) {
            Outcome::Win
        } else if their_choice.beats(my_choice) {
            Outcome::Loss
        } else {
            Outcome::Draw
        }
    }
}

impl Column {
    /// Part one reads the column as my choice.
    fn as_choice(self) -> Choice {
        match self {
            Column::X => Choice::Rock,
            Column::Y => Choice::Paper,
            Column::Z => Choice::Scissors,
        }
    }

    /// Part two reads the column as the outcome I need.
    fn as_outcome(self) -> Outcome {
        match self {
            Column::X => Outcome::Loss,
            Column::Y => Outcome::Draw,
            Column::Z => Outcome::Win,
        }
    }
}

impl Round {
    pub fn new(my_choice: Choice, their_choice: Choice) -> Self {
        let outcome = Outcome::for_choices(my_choice, their_choice);

        debugln!("{my_choice:?} vs. {their_choice:?} = {outcome:?}");

        Self {
            choice: my_choice,
            outcome,
        }
    }

    pub fn score(&self) -> u32 {
        let choice = self.choice;
        let outcome = self.outcome;

        let choice_score = match choice {
            Choice::Rock => 1,
            Choice::Paper => 2,
            Choice::Scissors => 3,
        };
        let outcome_score = match outcome {
            Outcome::Loss => 0,
            Outcome::Draw => 3,
            Outcome::Win => 6,
        };

        let score = choice_score + outcome_score;
        debugln!("{choice:?} ({choice_score}) + {outcome:?} ({outcome_score}) = {score}");

        score
    }
}

fn parse(input: &str) -> parse::Result<Vec<GuideEntry>> {
    parse::lines(input, GuideEntry::parser)
}

fn total_score(guide: &[GuideEntry], round: impl Fn(GuideEntry) -> Round) -> u32 {
    guide.iter().map(|&entry| round(entry).score()).sum()
}

fn part_one(guide: &[GuideEntry]) -> Option<u32> {
    Some(total_score(guide, |entry| {
        Round::new(entry.column.as_choice(), entry.their_choice)
    }))
}

fn part_two(guide: &[GuideEntry]) -> Option<u32> {
    Some(total_score(guide, |entry| {
        let my_choice = Choice::for_outcome(entry.column.as_outcome(), entry.their_choice);
        Round::new(my_choice, entry.their_choice)
    }))
}

fn main() -> ExitCode {
    advent_of_code_2022::run(2, |input| {
        let guide = parse(input)?;
        advent_of_code_2022::solve!(1, part_one, &guide);
        advent_of_code_2022::solve!(2, part_two, &guide);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use advent_of_code_2022::ParseError;

    fn example() -> Vec<GuideEntry> {
        let input = advent_of_code_2022::read_file("examples", 2).unwrap();
        parse(&input).unwrap()
    }

    #[test]
    fn test_part_one() {
        assert_eq!(part_one(&example()), Some(15));
    }

    #[test]
    fn test_part_two() {
        assert_eq!(part_two(&example()), Some(12));
    }

    #[test]
    fn test_for_outcome() {
        for their_choice in Choice::ALL {
            for outcome in [Outcome::Win, Outcome::Loss, Outcome::Draw] {
                let mine = Choice::for_outcome(outcome, their_choice);
                assert_eq!(Outcome::for_choices(mine, their_choice), outcome);
            }
        }
    }

    #[test]
    fn test_malformed_line() {
        let err = parse("A Y\nB W\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 2, .. }), "{err}");
    }
}

mod parsing {
    use super::*;

    use combine as c;

    use c::{ParseError, Parser, Stream};

    impl Choice {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            c::choice((
                c::token('A').map(|_| Self::Rock),
                c::token('B').map(|_| Self::Paper),
                c::token('C').map(|_| Self::Scissors),
            ))
        }
    }

    impl Column {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            c::choice((
                c::token('X').map(|_| Self::X),
                c::token('Y').map(|_| Self::Y),
                c::token('Z').map(|_| Self::Z),
            ))
        }
    }

    impl GuideEntry {
        // "A Y"
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            (Choice::parser(), c::token(' '), Column::parser()).map(
                |(their_choice, _, column)| GuideEntry {
                    their_choice,
                    column,
                },
            )
        }
    }
}
