// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate prettytable;

use std::error::Error;
use std::process;
use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use prettytable::Table;
use separator::Separatable;

use boxworld::config::{DEFAULT_ITERATION_CAP, DEFAULT_TIME_BUDGET};
use boxworld::level::Level;
use boxworld::scoring;
use boxworld::solution_formatter::SolutionFormatter;
use boxworld::solver::{SearchOutcome, SolverOk, Verdict};
use boxworld::{generate_level, LoadLevel, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("boxworld")
        .author("martin-t")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates, solves and verifies box pushing puzzles")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("generate")
                .about("Print a generated level")
                .arg(
                    Arg::with_name("index")
                        .required(true)
                        .validator(validate_number::<u32>)
                        .help("level number, starting at 1"),
                )
                .arg(seed_arg()),
        )
        .subcommand(
            SubCommand::with_name("solve")
                .about("Find a solution using best-first search")
                .arg(Arg::with_name("file").required(true))
                .arg(
                    Arg::with_name("budget-ms")
                        .long("--budget-ms")
                        .takes_value(true)
                        .validator(validate_number::<u64>)
                        .help("give up after this many milliseconds (default 5000)"),
                )
                .arg(
                    Arg::with_name("index")
                        .long("--index")
                        .takes_value(true)
                        .validator(validate_number::<u32>)
                        .help("level number used for scoring"),
                )
                .arg(
                    Arg::with_name("steps")
                        .long("--steps")
                        .help("print every state, not just the ones after pushes"),
                ),
        )
        .subcommand(
            SubCommand::with_name("verify")
                .about("Check that levels can be solved using exhaustive search")
                .arg(Arg::with_name("files").multiple(true))
                .arg(
                    Arg::with_name("generated")
                        .long("--generated")
                        .takes_value(true)
                        .validator(|s| parse_range(&s).map(|_| ()))
                        .help("generated levels FROM..TO (inclusive) or a single index"),
                )
                .arg(seed_arg())
                .arg(
                    Arg::with_name("cap")
                        .long("--cap")
                        .takes_value(true)
                        .validator(validate_number::<usize>)
                        .help("states to expand before assuming solvable (default 50000)"),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("generate", Some(sub)) => generate(sub),
        ("solve", Some(sub)) => solve(sub),
        ("verify", Some(sub)) => verify(sub),
        _ => unreachable!("clap requires a subcommand"),
    };
    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            println!("{}", err);
            process::exit(1);
        }
    }
}

const DEFAULT_WORKERS: usize = 4;

fn seed_arg() -> Arg<'static, 'static> {
    Arg::with_name("seed")
        .long("--seed")
        .takes_value(true)
        .validator(validate_number::<u64>)
        .help("random seed for generated levels (default 0)")
}

fn validate_number<T: FromStr>(s: String) -> Result<(), String> {
    parse_number::<T>(&s).map(|_| ())
}

fn parse_number<T: FromStr>(s: &str) -> Result<T, String> {
    s.parse()
        .map_err(|_| format!("'{}' is not a non-negative number in range", s))
}

fn parse_range(s: &str) -> Result<(u32, u32), String> {
    let err = || format!("'{}' is not a number or a range like 1..10", s);
    let mut parts = s.splitn(2, "..");
    let from: u32 = parts.next().unwrap_or("").parse().map_err(|_| err())?;
    let to: u32 = match parts.next() {
        Some(to) => to.parse().map_err(|_| err())?,
        None => from,
    };
    if from == 0 || to < from {
        return Err(err());
    }
    Ok((from, to))
}

fn number_arg<T: FromStr>(matches: &ArgMatches<'_>, name: &str, default: T) -> Result<T, String> {
    match matches.value_of(name) {
        Some(s) => parse_number(s),
        None => Ok(default),
    }
}

fn generate(matches: &ArgMatches<'_>) -> Result<bool, Box<dyn Error>> {
    let index = number_arg(matches, "index", 1)?;
    let seed = number_arg(matches, "seed", 0)?;

    let level = generate_level(index, seed)?;
    println!("Level {}: {}", index, level.meta.name);
    println!("Difficulty: {}", level.meta.difficulty);
    println!("{}", level.meta.description);
    println!();
    print!("{}", level);
    Ok(true)
}

fn solve(matches: &ArgMatches<'_>) -> Result<bool, Box<dyn Error>> {
    let path = matches.value_of("file").unwrap_or_default();
    let budget = match matches.value_of("budget-ms") {
        Some(ms) => Duration::from_millis(parse_number(ms)?),
        None => DEFAULT_TIME_BUDGET,
    };

    let level = path
        .load_level()
        .map_err(|err| format!("Can't load level {}: {}", path, err))?;
    let index = number_arg(matches, "index", level.meta.number.unwrap_or(0))?;

    println!("Solving {}...", path);
    let started = Instant::now();
    let solver_ok = level.solve(budget);
    let elapsed = started.elapsed();

    match solver_ok.outcome {
        SearchOutcome::Found(ref moves) => {
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
            println!("Pushes: {}", moves.push_cnt());
            println!("Score: {}", scoring::score(index, moves.move_cnt()));
        }
        SearchOutcome::Exhausted => println!("No solution"),
        SearchOutcome::BudgetExceeded => println!(
            "Gave up after {} ms",
            (elapsed.as_millis() as u64).separated_string()
        ),
    }
    println!();
    println!("{}", solver_ok.stats);

    if let Some(moves) = solver_ok.moves() {
        let include_steps = matches.is_present("steps");
        print!("{}", SolutionFormatter::new(&level, moves, include_steps));
    }
    Ok(true)
}

fn verify(matches: &ArgMatches<'_>) -> Result<bool, Box<dyn Error>> {
    let cap = number_arg(matches, "cap", DEFAULT_ITERATION_CAP)?;
    let seed = number_arg(matches, "seed", 0)?;

    let mut jobs: Vec<(String, Level)> = Vec::new();
    if let Some(files) = matches.values_of("files") {
        for path in files {
            let level = path
                .load_level()
                .map_err(|err| format!("Can't load level {}: {}", path, err))?;
            jobs.push((path.to_string(), level));
        }
    }
    if let Some(range) = matches.value_of("generated") {
        let (from, to) = parse_range(range)?;
        for index in from..=to {
            jobs.push((format!("generated {}", index), generate_level(index, seed)?));
        }
    }
    if jobs.is_empty() {
        return Err("Nothing to verify - pass level files or --generated".into());
    }

    let mut results = verify_all(jobs, cap)?;
    results.sort_by_key(|&(job, ..)| job);

    let mut table = Table::new();
    table.set_titles(row!["Level", "Boxes", "Verdict", "Moves", "Visited"]);
    let mut unsolvable = 0;
    for (_, name, box_cnt, solver_ok) in results {
        let verdict = solver_ok.verdict();
        if verdict == Verdict::Unsolvable {
            unsolvable += 1;
        }
        let moves = solver_ok
            .moves()
            .map_or_else(|| "-".to_string(), |m| m.move_cnt().to_string());
        table.add_row(row![
            name,
            box_cnt,
            verdict,
            moves,
            solver_ok.stats.total_unique_visited().separated_string()
        ]);
    }
    table.printstd();

    if unsolvable > 0 {
        println!("{} unsolvable", unsolvable);
        Ok(false)
    } else {
        println!("All levels OK");
        Ok(true)
    }
}

/// Verifies on one thread per core, each worker takes every n-th job.
fn verify_all(
    jobs: Vec<(String, Level)>,
    cap: usize,
) -> Result<Vec<(usize, String, usize, SolverOk)>, Box<dyn Error>> {
    let worker_cnt = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(DEFAULT_WORKERS)
        .min(jobs.len())
        .max(1);
    let mut buckets: Vec<Vec<_>> = (0..worker_cnt).map(|_| Vec::new()).collect();
    for (job, (name, level)) in jobs.into_iter().enumerate() {
        buckets[job % worker_cnt].push((job, name, level));
    }

    let workers: Vec<_> = buckets
        .into_iter()
        .map(|bucket| {
            thread::spawn(move || {
                bucket
                    .into_iter()
                    .map(|(job, name, level)| {
                        let solver_ok = level.verify(cap);
                        (job, name, level.box_cnt(), solver_ok)
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut results = Vec::new();
    for worker in workers {
        results.extend(worker.join().map_err(|_| "Verification thread panicked")?);
    }
    debug!("Verified {} levels on {} threads", results.len(), worker_cnt);
    Ok(results)
}
