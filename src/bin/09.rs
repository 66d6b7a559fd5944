//! Day 9: Rope Bridge.
//!
//! A rope of N knots on an integer grid. The head follows the motions from the
//! input; every other knot follows the knot ahead of it.

use std::collections::HashSet;
use std::fmt;
use std::process::ExitCode;

use glam::IVec2;
use itertools::Itertools;
use smallvec::SmallVec;

use advent_of_code_2022::{debugln, helpers::parse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl From<Direction> for IVec2 {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Up => IVec2::Y,
            Direction::Right => IVec2::X,
            Direction::Down => IVec2::NEG_Y,
            Direction::Left => IVec2::NEG_X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Motion {
    pub distance: u32,
    pub direction: Direction,
}

/// Two knots touch if they overlap or are adjacent, diagonals included.
#[inline]
fn touching(a: IVec2, b: IVec2) -> bool {
    let delta = (a - b).abs();
    delta.x <= 1 && delta.y <= 1
}

/// Where `knot` ends up after one step of following `leader`.
///
/// A knot that already touches its leader stays put. Otherwise it moves one
/// unit toward the leader along every axis on which they differ.
#[inline]
fn follow(knot: IVec2, leader: IVec2) -> IVec2 {
    if touching(knot, leader) {
        knot
    } else {
        knot + (leader - knot).clamp(IVec2::NEG_ONE, IVec2::ONE)
    }
}

/// Most ropes in the puzzle have 10 knots or fewer.
type Knots = SmallVec<[IVec2; 10]>;

#[derive(Debug, Clone)]
struct Rope {
    /// Head first, tail last.
    knots: Knots,
    tail_visited: HashSet<IVec2>,
    lower_bound: IVec2,
    upper_bound: IVec2,
}

impl Rope {
    /// A rope of `num_knots` knots, all at the origin.
    ///
    /// Panics if `num_knots < 2`: a rope needs a head and a tail.
    pub fn new(num_knots: usize) -> Self {
        assert!(num_knots >= 2, "a rope needs at least 2 knots, got {num_knots}");

        const ZERO: IVec2 = IVec2::ZERO;

        let mut tail_visited = HashSet::new();
        tail_visited.insert(ZERO);

        Self {
            knots: std::iter::repeat(ZERO).take(num_knots).collect(),
            tail_visited,
            lower_bound: ZERO,
            upper_bound: ZERO,
        }
    }

    pub fn do_motion(&mut self, motion: Motion) {
        for _ in 0..motion.distance {
            self.step(motion.direction);
        }
    }

    /// Moves the head one unit and lets the rest of the rope catch up.
    pub fn step(&mut self, dir: Direction) {
        self.knots[0] += IVec2::from(dir);
        self.update_bounds(self.knots[0]);

        for i in 1..self.knots.len() {
            let moved = follow(self.knots[i], self.knots[i - 1]);
            if moved == self.knots[i] {
                // Knots further back only move if this one did.
                break;
            }
            self.knots[i] = moved;
            self.update_bounds(moved);
        }

        self.tail_visited.insert(self.tail());

        debug_assert!(self.is_taut());
    }

    #[inline]
    pub fn knots(&self) -> &[IVec2] {
        &self.knots
    }

    #[inline]
    pub fn tail(&self) -> IVec2 {
        self.knots[self.knots.len() - 1]
    }

    /// Returns true if every knot touches the knot ahead of it.
    pub fn is_taut(&self) -> bool {
        self.knots()
            .iter()
            .tuple_windows()
            .all(|(&leader, &knot)| touching(knot, leader))
    }

    /// Returns the number of unique positions that the tail visited.
    pub fn tail_visited_positions(&self) -> usize {
        self.tail_visited.len()
    }

    #[inline]
    fn update_bounds(&mut self, new_pos: IVec2) {
        self.lower_bound = self.lower_bound.min(new_pos);
        self.upper_bound = self.upper_bound.max(new_pos);
    }

    fn label(&self, index: usize) -> char {
        match index {
            0 => 'H',
            _ if self.knots.len() == 2 => 'T',
            _ => char::from_digit(index as u32 % 36, 36).unwrap_or('*'),
        }
    }
}

/// Draws every cell any knot has been on: knots by label, `s` for the start,
/// `#` for cells the tail visited. Up is up.
impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (self.lower_bound.y..=self.upper_bound.y).rev() {
            for x in self.lower_bound.x..=self.upper_bound.x {
                let pos = IVec2::new(x, y);
                let c = match self.knots().iter().position(|&knot| knot == pos) {
                    Some(index) => self.label(index),
                    None if pos == IVec2::ZERO => 's',
                    None if self.tail_visited.contains(&pos) => '#',
                    None => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn parse(input: &str) -> parse::Result<Vec<Motion>> {
    parse::lines(input, Motion::parser)
}

fn simulate(motions: &[Motion], num_knots: usize) -> Rope {
    let mut rope = Rope::new(num_knots);
    for &motion in motions {
        rope.do_motion(motion);
        debugln!("== {motion:?} ==");
        debugln!("{rope}");
    }
    rope
}

fn part_one(motions: &[Motion]) -> Option<usize> {
    Some(simulate(motions, 2).tail_visited_positions())
}

fn part_two(motions: &[Motion]) -> Option<usize> {
    Some(simulate(motions, 10).tail_visited_positions())
}

fn main() -> ExitCode {
    advent_of_code_2022::run(9, |input| {
        let motions = parse(input)?;
        advent_of_code_2022::solve!(1, part_one, &motions);
        advent_of_code_2022::solve!(2, part_two, &motions);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use advent_of_code_2022::ParseError;
    use maplit::hashset;
    use rstest::rstest;

    fn small_example() -> Vec<Motion> {
        let input = advent_of_code_2022::read_file("examples", 9).unwrap();
        parse(&input).unwrap()
    }

    fn large_example() -> Vec<Motion> {
        let input = advent_of_code_2022::read_file_part("examples", 9, 2).unwrap();
        parse(&input).unwrap()
    }

    #[test]
    fn test_part_one() {
        assert_eq!(part_one(&small_example()), Some(13));
    }

    #[test]
    fn test_part_two() {
        assert_eq!(part_two(&small_example()), Some(1));
        assert_eq!(part_two(&large_example()), Some(36));
    }

    #[rstest]
    #[case::small_two_knots(small_example(), 2, 13)]
    #[case::small_ten_knots(small_example(), 10, 1)]
    #[case::large_two_knots(large_example(), 2, 88)]
    #[case::large_ten_knots(large_example(), 10, 36)]
    fn test_every_step_keeps_rope_taut(
        #[case] motions: Vec<Motion>,
        #[case] num_knots: usize,
        #[case] expected_visited: usize,
    ) {
        let mut rope = Rope::new(num_knots);
        for motion in motions {
            for _ in 0..motion.distance {
                rope.step(motion.direction);
                assert!(rope.is_taut(), "rope came apart: {:?}", rope.knots());
            }
        }
        assert_eq!(rope.tail_visited_positions(), expected_visited);
    }

    /// `len` motions from a fixed linear congruential sequence.
    fn long_walk(len: usize) -> Vec<Motion> {
        const DIRECTIONS: [Direction; 4] = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ];

        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        std::iter::repeat_with(|| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let bits = state >> 33;
            Motion {
                direction: DIRECTIONS[(bits % 4) as usize],
                distance: 1 + ((bits >> 2) % 20) as u32,
            }
        })
        .take(len)
        .collect()
    }

    #[rstest]
    fn test_long_walk_keeps_rope_taut(#[values(2, 3, 10, 20)] num_knots: usize) {
        let mut rope = Rope::new(num_knots);
        let mut tail = rope.tail();

        for motion in long_walk(5000) {
            for _ in 0..motion.distance {
                rope.step(motion.direction);
                assert!(rope.is_taut(), "rope came apart: {:?}", rope.knots());

                // The tail never skips a cell.
                assert!(touching(tail, rope.tail()));
                tail = rope.tail();
            }
        }

        assert_eq!(rope.knots().len(), num_knots);
        assert!(rope.tail_visited.contains(&IVec2::ZERO));
    }

    #[rstest]
    #[case::overlapping(IVec2::new(0, 0), IVec2::new(0, 0), IVec2::new(0, 0))]
    #[case::diagonal_neighbour(IVec2::new(0, 0), IVec2::new(1, 1), IVec2::new(0, 0))]
    #[case::straight(IVec2::new(0, 0), IVec2::new(2, 0), IVec2::new(1, 0))]
    #[case::knight_jump(IVec2::new(0, 0), IVec2::new(1, 2), IVec2::new(1, 1))]
    #[case::far_diagonal(IVec2::new(0, 0), IVec2::new(-2, -2), IVec2::new(-1, -1))]
    fn test_follow(#[case] knot: IVec2, #[case] leader: IVec2, #[case] expected: IVec2) {
        assert_eq!(follow(knot, leader), expected);
    }

    #[test]
    fn test_tail_visited() {
        let mut rope = Rope::new(2);
        rope.do_motion(Motion {
            distance: 4,
            direction: Direction::Right,
        });
        assert_eq!(
            rope.tail_visited,
            hashset! {
                IVec2::new(0, 0),
                IVec2::new(1, 0),
                IVec2::new(2, 0),
                IVec2::new(3, 0),
            }
        );
        assert_eq!(rope.to_string(), "s##TH\n");
    }

    #[test]
    fn test_deterministic() {
        let motions = large_example();
        let first = simulate(&motions, 10);
        let second = simulate(&motions, 10);
        assert_eq!(first.knots(), second.knots());
        assert_eq!(first.tail_visited, second.tail_visited);
    }

    #[test]
    #[should_panic(expected = "at least 2 knots")]
    fn test_rope_needs_two_knots() {
        Rope::new(1);
    }

    #[test]
    fn test_bad_direction() {
        let err = parse("R 4\nX 2\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_bad_distance() {
        let err = parse("R 4\nU 4\nL three\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 3, .. }), "{err}");
    }
}

mod parsing {
    use super::*;

    use advent_of_code_2022::helpers::parse;

    mod c {
        pub use combine::*;
    }

    use c::{ParseError, Parser, Stream};

    impl Direction {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            c::choice((
                c::token('D').map(|_| Direction::Down),
                c::token('L').map(|_| Direction::Left),
                c::token('R').map(|_| Direction::Right),
                c::token('U').map(|_| Direction::Up),
            ))
        }
    }

    impl Motion {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            // "L 5"
            (Direction::parser(), c::token(' '), parse::decimal_integer()).map(
                |(direction, _, distance)| Motion {
                    direction,
                    distance,
                },
            )
        }
    }
}
