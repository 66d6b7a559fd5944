/*
 * Shared plumbing for the day binaries: input loading, answer reporting and
 * trace output. Puzzle-specific code lives in `src/bin/NN.rs`; reusable bits
 * extracted from solutions live in `./helpers.rs`.
 */

use std::env;
use std::fmt::Display;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::OnceLock;

/// Prints trace output without a trailing newline.
///
/// Only active in debug builds, and only when [`VERBOSE_ENV`] is set.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) && $crate::verbose() {
            print!($($arg)*);
        }
    };
}

/// Prints a line of trace output. See [`debug!`].
#[macro_export]
macro_rules! debugln {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) && $crate::verbose() {
            println!($($arg)*);
        }
    };
}

mod error;
pub mod helpers;

pub use error::{Error, ParseError, SyntaxErrors};

pub const ANSI_ITALIC: &str = "\x1b[3m";
pub const ANSI_BOLD: &str = "\x1b[1m";
pub const ANSI_RESET: &str = "\x1b[0m";

/// Environment variable that turns on [`debug!`]/[`debugln!`] output.
pub const VERBOSE_ENV: &str = "AOC_VERBOSE";

/// Returns true if trace output was requested through [`VERBOSE_ENV`].
pub fn verbose() -> bool {
    static VERBOSE: OnceLock<bool> = OnceLock::new();
    *VERBOSE.get_or_init(|| env::var_os(VERBOSE_ENV).map_or(false, |value| value != "0"))
}

/// Anything a `part_one`/`part_two` function may return.
///
/// `None` means the part has no answer for this input.
pub trait Solution {
    type Answer: Display;

    fn into_answer(self) -> Result<Self::Answer, Error>;
}

impl<T: Display> Solution for Option<T> {
    type Answer = T;

    fn into_answer(self) -> Result<T, Error> {
        self.ok_or_else(|| Error::Unsolved("no answer for this input".to_owned()))
    }
}

impl<T: Display, E: Into<Error>> Solution for Result<T, E> {
    type Answer = T;

    fn into_answer(self) -> Result<T, Error> {
        self.map_err(Into::into)
    }
}

#[macro_export]
macro_rules! solve {
    ($part:expr, $solver:ident, $input:expr) => {{
        use std::time::Instant;
        use $crate::{Solution, ANSI_BOLD, ANSI_ITALIC, ANSI_RESET};

        println!("🎄 {}Part {}{} 🎄", ANSI_BOLD, $part, ANSI_RESET);

        let timer = Instant::now();
        let result = Solution::into_answer($solver($input));
        let elapsed = timer.elapsed();

        match result {
            Ok(answer) => {
                println!(
                    "{} {}(elapsed: {:.2?}){}",
                    answer, ANSI_ITALIC, elapsed, ANSI_RESET
                );
            }
            Err(err) => {
                println!("not solved: {err}");
            }
        }
    }};
}

/// Path of `src/<folder>/<file>` inside this crate.
fn data_path(folder: &str, file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join(folder)
        .join(file)
}

fn read_data(path: PathBuf) -> Result<String, Error> {
    fs::read_to_string(&path).map_err(|source| Error::Io { path, source })
}

/// Reads `src/<folder>/<day>.txt`, e.g. `read_file("examples", 9)`.
pub fn read_file(folder: &str, day: u8) -> Result<String, Error> {
    read_data(data_path(folder, &format!("{day:02}.txt")))
}

/// Reads `src/<folder>/<day>-<part>.txt`, for days whose parts use different
/// example inputs.
pub fn read_file_part(folder: &str, day: u8, part: u8) -> Result<String, Error> {
    read_data(data_path(folder, &format!("{day:02}-{part}.txt")))
}

/// Runs a day binary: loads `src/inputs/<day>.txt` and hands it to `solve`.
///
/// Any error is printed and turned into a failing exit code.
pub fn run(day: u8, solve: impl FnOnce(&str) -> Result<(), Error>) -> ExitCode {
    match read_file("inputs", day).and_then(|input| solve(&input)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{ANSI_BOLD}day {day:02} failed{ANSI_RESET}: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_time(val: &str, postfix: &str) -> f64 {
    val.split(postfix).next().map_or(0.0, |s| s.parse().unwrap_or(0.0))
}

/// Sums the `(elapsed: ...)` timings printed by [`solve!`], in milliseconds.
pub fn parse_exec_time(output: &str) -> f64 {
    output.lines().fold(0_f64, |acc, line| {
        let Some(start) = line.find("(elapsed: ") else {
            return acc;
        };
        let timing = &line[start + "(elapsed: ".len()..];
        let Some(end) = timing.find(')') else {
            return acc;
        };
        let timing = &timing[..end];

        acc + if timing.ends_with("ns") {
            parse_time(timing, "ns") / 1_000_000.0
        } else if timing.ends_with("µs") {
            parse_time(timing, "µs") / 1000.0
        } else if timing.ends_with("ms") {
            parse_time(timing, "ms")
        } else {
            parse_time(timing, "s") * 1000.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn assert_millis(output: &str, expected: f64) {
        let actual = parse_exec_time(output);
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}ms, got {actual}ms"
        );
    }

    #[test]
    fn test_parse_exec_time() {
        assert_millis(
            &format!(
                "🎄 Part 1 🎄\n0 {ANSI_ITALIC}(elapsed: 74.13ns){ANSI_RESET}\n🎄 Part 2 🎄\n0 {ANSI_ITALIC}(elapsed: 50.00ns){ANSI_RESET}"
            ),
            0.00012413,
        );
        assert_millis(
            "🎄 Part 1 🎄\n0 (elapsed: 10.3s)\n🎄 Part 2 🎄\n0 (elapsed: 100.50ms)",
            10400.50,
        );
        assert_millis("🎄 Part 1 🎄\n0 (elapsed: 2.00µs)\nnot solved: oops", 0.002);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(read_file("inputs", 99), Err(Error::Io { .. })));
    }

    #[test]
    fn test_solution_reports_missing_answer() {
        assert!(matches!(
            Solution::into_answer(None::<u32>),
            Err(Error::Unsolved(_))
        ));
        assert_eq!(Solution::into_answer(Some(7)).ok(), Some(7));
    }
}
