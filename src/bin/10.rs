//! Day 10: Cathode-Ray Tube.

use std::fmt;
use std::process::ExitCode;

use grid::Grid;

use advent_of_code_2022::{debugln, helpers::parse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    Addx(i32),
    Noop,
}

impl Instruction {
    /// The number of cycles it takes to run this instruction
    pub fn cycles(&self) -> u32 {
        match self {
            Instruction::Addx(_) => 2,
            Instruction::Noop => 1,
        }
    }
}

#[derive(Debug)]
struct Cpu {
    /// The value of the CPU's only register. A 32-bit word: `addx` wraps on
    /// overflow.
    register: i32,
    /// The cycle number of the last cycle that finished.
    cycle: u32,
    /// The instruction that is currently running, if any.
    current_ins: Option<RunningInst>,
}

#[derive(Debug)]
struct RunningInst {
    inst: Instruction,
    /// The number of cycles left before the current instruction is done running.
    cycles_remaining: u32,
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            register: 1,
            cycle: 0,
            current_ins: None,
        }
    }

    /// Returns the cycle number of the last cycle that finished.
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Returns the current value of the register.
    pub fn register(&self) -> i32 {
        self.register
    }

    /// Returns true if the CPU is already running an instruction.
    ///
    /// Must call [`Cpu::tick()`] if this returns true, otherwise must call
    /// [`Cpu::tick_inst()`].
    pub fn is_busy(&self) -> bool {
        self.current_ins.is_some()
    }

    /// Advances one more cycle of the current instruction. Does nothing but
    /// count the cycle if no instruction is running.
    pub fn tick(&mut self) {
        if let Some(current) = self.current_ins.as_mut() {
            current.cycles_remaining -= 1;

            if current.cycles_remaining == 0 {
                self.finish_inst();
            }
        }

        self.cycle += 1;
    }

    /// Feeds the next instruction into the CPU and executes one cycle of it.
    pub fn tick_inst(&mut self, inst: Instruction) {
        debug_assert!(!self.is_busy());
        self.current_ins = Some(RunningInst {
            inst,
            cycles_remaining: inst.cycles(),
        });
        self.tick();
    }

    fn finish_inst(&mut self) {
        let Some(RunningInst { inst, .. }) = self.current_ins.take() else {
            return;
        };

        match inst {
            Instruction::Addx(value) => self.register = self.register.wrapping_add(value),
            Instruction::Noop => {}
        }
    }
}

/// A CPU fed from a list of instructions; idles on `noop` once the list runs
/// out.
#[derive(Debug)]
struct Program<'a> {
    cpu: Cpu,
    instructions: std::slice::Iter<'a, Instruction>,
}

impl<'a> Program<'a> {
    pub fn new(instructions: &'a [Instruction]) -> Self {
        Self {
            cpu: Cpu::new(),
            instructions: instructions.iter(),
        }
    }

    pub fn tick(&mut self) {
        if self.cpu.is_busy() {
            self.cpu.tick();
        } else if let Some(&inst) = self.instructions.next() {
            self.cpu.tick_inst(inst);
        } else {
            self.cpu.tick_inst(Instruction::Noop);
        }
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }
}

/// The CRT: one pixel drawn per cycle, left to right, top to bottom.
struct Screen {
    pixels: Grid<bool>,
}

impl Screen {
    const WIDTH: usize = 40;
    const HEIGHT: usize = 6;

    /// Runs `program` for one full frame.
    fn draw(program: &mut Program<'_>) -> Self {
        let mut pixels = Grid::new(Self::HEIGHT, Self::WIDTH);

        for row in 0..Self::HEIGHT {
            for col in 0..Self::WIDTH {
                // The sprite is 3 pixels wide, centered on the register.
                let sprite_pos = i64::from(program.cpu().register());
                pixels[row][col] = (sprite_pos - col as i64).abs() <= 1;

                program.tick();
            }
        }

        Self { pixels }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.pixels.rows() {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.pixels.cols() {
                let lit = self.pixels[row][col];
                write!(f, "{}", if lit { '#' } else { '.' })?;
            }
        }
        Ok(())
    }
}

fn parse(input: &str) -> parse::Result<Vec<Instruction>> {
    parse::lines(input, Instruction::parser)
}

fn part_one(instructions: &[Instruction]) -> Option<i64> {
    const KEY_CYCLE_NUMBERS: [u32; 6] = [20, 60, 100, 140, 180, 220];

    let mut program = Program::new(instructions);
    let mut total_signal_strength = 0;

    loop {
        let cpu = program.cpu();
        let cycle_in_progress = cpu.cycle() + 1;
        debugln!("{cycle_in_progress}: {cpu:?}");

        if KEY_CYCLE_NUMBERS.contains(&cycle_in_progress) {
            let signal_strength = i64::from(cycle_in_progress) * i64::from(cpu.register());
            total_signal_strength += signal_strength;
        }

        program.tick();

        if cycle_in_progress >= KEY_CYCLE_NUMBERS[KEY_CYCLE_NUMBERS.len() - 1] {
            break;
        }
    }

    Some(total_signal_strength)
}

fn part_two(instructions: &[Instruction]) -> Option<String> {
    let mut program = Program::new(instructions);
    let screen = Screen::draw(&mut program);
    Some(screen.to_string())
}

fn main() -> ExitCode {
    advent_of_code_2022::run(10, |input| {
        let instructions = parse(input)?;
        advent_of_code_2022::solve!(1, part_one, &instructions);
        advent_of_code_2022::solve!(2, part_two, &instructions);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use advent_of_code_2022::ParseError;

    fn example() -> Vec<Instruction> {
        let input = advent_of_code_2022::read_file("examples", 10).unwrap();
        parse(&input).unwrap()
    }

    #[test]
    fn test_small_program() {
        let instructions = parse("noop\naddx 3\naddx -5\n").unwrap();
        let mut program = Program::new(&instructions);

        let mut registers = Vec::new();
        for _ in 0..6 {
            registers.push(program.cpu().register());
            program.tick();
        }
        // Register value *during* cycles 1 through 6.
        assert_eq!(registers, [1, 1, 1, 4, 4, -1]);
        assert_eq!(program.cpu().cycle(), 6);
    }

    #[test]
    fn test_part_one() {
        assert_eq!(part_one(&example()), Some(13140));
    }

    #[test]
    fn test_part_two() {
        let expected_output = "\
##..##..##..##..##..##..##..##..##..##..
###...###...###...###...###...###...###.
####....####....####....####....####....
#####.....#####.....#####.....#####.....
######......######......######......####
#######.......#######.......#######.....";

        let output = part_two(&example()).unwrap();

        debugln!("Output:");
        debugln!("{output}");
        debugln!("Expected:");
        debugln!("{expected_output}");

        assert_eq!(output, expected_output);
    }

    #[test]
    fn test_register_wraps() {
        let instructions = parse("addx 2147483647\naddx 2147483647\n").unwrap();
        let mut program = Program::new(&instructions);

        let mut registers = Vec::new();
        for _ in 0..5 {
            registers.push(program.cpu().register());
            program.tick();
        }
        assert_eq!(registers, [1, 1, i32::MIN, i32::MIN, -1]);
        assert_eq!(program.cpu().register(), -1);

        // Sampled while the register sits at its extremes.
        let instructions = parse("addx 2147483646\nnoop\n").unwrap();
        assert_eq!(part_one(&instructions), Some(i64::from(i32::MAX) * 720));
        assert!(part_two(&instructions).is_some());
    }

    #[test]
    fn test_unknown_instruction() {
        let err = parse("noop\nsubx 3\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 2, .. }), "{err}");
    }
}

mod parsing {
    use super::*;

    use advent_of_code_2022::helpers::parse;

    mod c {
        pub use combine::{
            parser::char::string,
            *,
        };
    }

    use c::{ParseError, Parser, Stream};

    impl Instruction {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            let addx = (c::string("addx "), parse::signed_integer())
                .map(|(_, value)| Instruction::Addx(value));

            let noop = c::string("noop").map(|_| Instruction::Noop);

            c::choice((addx, noop))
        }
    }
}
