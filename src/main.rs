/*
 * Runs every solved day (or the ones picked with `--day`) as its own binary
 * and prints a summary table.
 */

use std::process::{Command, ExitCode};

use advent_of_code_2022::{ANSI_BOLD, ANSI_ITALIC, ANSI_RESET, VERBOSE_ENV};
use prettytable::{row, Table};

/// Days with a binary under `src/bin`.
const DAYS: [u8; 6] = [2, 3, 5, 9, 10, 11];

const HELP: &str = "\
Runs the puzzle solutions and reports their answers and timings.

USAGE:
  advent_of_code_2022 [OPTIONS]

OPTIONS:
  -d, --day <N>     Only run day N; may be given more than once
  -r, --release     Build the day binaries with optimizations
  -v, --verbose     Print trace output (debug builds only)
  -h, --help        Print this message
";

#[derive(Debug)]
struct Args {
    days: Vec<u8>,
    release: bool,
    verbose: bool,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let mut days: Vec<u8> = pargs.values_from_str(["-d", "--day"])?;
    let args = Args {
        release: pargs.contains(["-r", "--release"]),
        verbose: pargs.contains(["-v", "--verbose"]),
        days: if days.is_empty() {
            DAYS.to_vec()
        } else {
            days.sort_unstable();
            days.dedup();
            days
        },
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        eprintln!("warning: unused arguments left: {remaining:?}");
    }

    Ok(Some(args))
}

enum Outcome {
    Solved { time_ms: f64 },
    Failed,
}

fn run_day(day: u8, args: &Args) -> Outcome {
    let day = format!("{day:02}");

    let mut cmd = Command::new("cargo");
    cmd.arg("run");
    if args.release {
        cmd.arg("--release");
    }
    cmd.args(["--quiet", "--bin", &day]);
    if args.verbose {
        cmd.env(VERBOSE_ENV, "1");
    }

    println!("----------");
    println!("{ANSI_BOLD}| Day {day} |{ANSI_RESET}");
    println!("----------");

    let output = match cmd.output() {
        Ok(output) => output,
        Err(err) => {
            eprintln!("could not run cargo: {err}");
            return Outcome::Failed;
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !stdout.trim().is_empty() {
        println!("{}", stdout.trim());
    }
    if !output.status.success() {
        eprintln!("{}", stderr.trim());
        return Outcome::Failed;
    }

    Outcome::Solved {
        time_ms: advent_of_code_2022::parse_exec_time(&stdout),
    }
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    let mut table = Table::new();
    table.set_titles(row!["Day", "Status", "Time"]);

    let mut total_ms = 0_f64;
    let mut failures = 0;

    for &day in &args.days {
        if !DAYS.contains(&day) {
            table.add_row(row![day, "not solved", "-"]);
            continue;
        }

        match run_day(day, &args) {
            Outcome::Solved { time_ms } => {
                total_ms += time_ms;
                table.add_row(row![day, "ok", format!("{time_ms:.2}ms")]);
            }
            Outcome::Failed => {
                failures += 1;
                table.add_row(row![day, "failed", "-"]);
            }
        }
    }

    println!();
    table.printstd();
    println!("{ANSI_BOLD}Total:{ANSI_RESET} {ANSI_ITALIC}{total_ms:.2}ms{ANSI_RESET}");

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
