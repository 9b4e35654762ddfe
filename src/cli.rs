use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use game24::expression::{EvalBudget, ParseLimits, evaluate_str};
use game24::game::{
    AnswerVerdict, PlayerCommand, RoundRecord, RoundStatus, SessionStats, check_answer,
    format_duration,
};
use game24::puzzle::{Puzzle, load_corpus_path};
use game24::scoring::{ComplexityClass, score};
use game24::selector::{
    Level, NoSolutionAccounting, PoolPolicy, PuzzleIndex, PuzzleSelector, SelectorConfig,
};
use log::{info, warn};
use rand::seq::SliceRandom;

const GREETING: &str = "24point - game - use 4 numbers to formula to 24 points";

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// game24 - Play and analyse the 24-point card game
#[derive(Parser, Debug)]
#[command(name = "game24")]
#[command(about = "Evaluate, score and play 24-point puzzles")]
#[command(version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a formula in the sandbox
    Eval {
        /// Formula, e.g. "(A+2+3)*4"
        formula: String,
    },
    /// Print the complexity score of one or more solution formulas
    Score {
        #[arg(required = true)]
        formulas: Vec<String>,
    },
    /// Play rounds from a puzzle corpus on the terminal
    Play {
        /// JSON corpus: a list of puzzle records
        corpus: PathBuf,

        /// Difficulty (easy/1, medium/2, hard/3); asked for when omitted
        #[arg(long)]
        level: Option<String>,

        /// Number of recently served card combinations never repeated
        #[arg(long, default_value_t = 60)]
        recent_window: usize,

        /// Target share of no-solution puzzles at the medium level
        #[arg(long, default_value_t = 0.10)]
        no_solution_target: f64,

        /// Measure the no-solution share over medium rounds only
        #[arg(long)]
        per_level_accounting: bool,

        /// Only serve hard puzzles whose four values are distinct
        #[arg(long)]
        hard_unique: bool,

        /// Seed the selector for a reproducible sequence
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let args = CliArgs::parse();

    // Initialize logging
    init_logging(&args.log_level)?;

    match args.command {
        Command::Eval { formula } => run_eval(&formula),
        Command::Score { formulas } => {
            for formula in &formulas {
                let value = score(formula);
                println!("{}\t{:?}\t{}", value, ComplexityClass::of(value), formula);
            }
            Ok(())
        }
        Command::Play {
            corpus,
            level,
            recent_window,
            no_solution_target,
            per_level_accounting,
            hard_unique,
            seed,
        } => {
            let config = SelectorConfig {
                recent_window,
                no_solution_target,
                no_solution_accounting: if per_level_accounting {
                    NoSolutionAccounting::PerLevel
                } else {
                    NoSolutionAccounting::Global
                },
            };
            let policy = PoolPolicy {
                hard_requires_unique_values: hard_unique,
            };
            run_play(&corpus, level.as_deref(), config, policy, seed)
        }
    }
}

fn run_eval(formula: &str) -> Result<()> {
    match evaluate_str(formula, &ParseLimits::default(), &EvalBudget::default()) {
        Ok(value) => {
            println!("{}", value);
            Ok(())
        }
        Err(e) => {
            warn!("Evaluation of '{}' failed", formula);
            println!("{}", e);
            Ok(())
        }
    }
}

fn run_play(
    corpus: &Path,
    level: Option<&str>,
    config: SelectorConfig,
    policy: PoolPolicy,
    seed: Option<u64>,
) -> Result<()> {
    let puzzles = load_corpus_path(corpus)
        .with_context(|| format!("Failed to load corpus {}", corpus.display()))?;
    if puzzles.is_empty() {
        println!("No puzzles loaded. Exiting.");
        return Ok(());
    }

    let index = Arc::new(PuzzleIndex::build(puzzles, policy));
    let mut selector = match seed {
        Some(seed) => PuzzleSelector::with_seed(index, config, seed),
        None => PuzzleSelector::new(index, config),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    show_greeting(&mut out)?;
    let level = match level {
        Some(token) => Level::parse(token)
            .with_context(|| format!("Unknown difficulty '{}'", token))?,
        None => match ask_level(&mut input, &mut out)? {
            Some(level) => level,
            None => return Ok(()),
        },
    };

    let records = play_session(&mut selector, level, &mut input, &mut out)?;
    write_report(&records, &mut out)?;
    Ok(())
}

fn show_greeting<W: Write>(out: &mut W) -> Result<()> {
    let rule = "=".repeat(GREETING.chars().count());
    writeln!(out, "{}\n{}\n{}", rule, GREETING, rule)?;
    writeln!(out, "Type a math expression using + - * / ^ (or **) and parentheses.")?;
    writeln!(out, "Ranks allowed directly in formulas: A, T, J, Q, K (case-insensitive).")?;
    writeln!(
        out,
        "Commands: 'help' (one), 'help all' (all), 'skip' (next), 'time' (elapsed), 'stop' (quit)."
    )?;
    writeln!(out, "No-solution answers: 'no sol', '0', or '-1'.")?;
    writeln!(out, "Rule: Your formula must use exactly the four card values shown.\n")?;
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    Ok((read > 0).then_some(line))
}

/// Prompt until a valid level token; `None` on end of input
fn ask_level<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<Level>> {
    loop {
        write!(out, "Choose difficulty (easy/1, medium/2, hard/3): ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if let Some(level) = Level::parse(&line) {
            return Ok(Some(level));
        }
        writeln!(out, "Please enter: easy or 1, medium or 2, hard or 3.")?;
    }
}

/// Serve rounds until the pool runs dry or the player stops
pub fn play_session<R: BufRead, W: Write>(
    selector: &mut PuzzleSelector,
    level: Level,
    input: &mut R,
    out: &mut W,
) -> Result<Vec<RoundRecord>> {
    writeln!(out, "\nStarting...")?;
    let mut records = Vec::new();
    let mut seqno = 1;

    loop {
        let Some(puzzle) = selector.pick(level).cloned() else {
            writeln!(
                out,
                "\nNo more puzzles available for this difficulty (given constraints)."
            )?;
            break;
        };
        let record = play_round(&puzzle, seqno, input, out)?;
        let stopped = record.status == RoundStatus::Stopped;
        records.push(record);
        if stopped {
            break;
        }
        seqno += 1;
    }

    info!("Session ended after {} rounds", records.len());
    Ok(records)
}

fn play_round<R: BufRead, W: Write>(
    puzzle: &Puzzle,
    seqno: u32,
    input: &mut R,
    out: &mut W,
) -> Result<RoundRecord> {
    writeln!(out, "\nQ{} - Cards: {}", seqno, puzzle)?;

    let limits = ParseLimits::default();
    let budget = EvalBudget::default();
    let start = Instant::now();
    let mut attempts = 0;
    let mut used_help = false;

    let status = loop {
        write!(out, "Your answer (or 'help'/'help all'/'skip'/'time'/'stop'): ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            // end of input ends the session like 'stop'
            break RoundStatus::Stopped;
        };
        let Some(command) = PlayerCommand::parse(&line) else {
            continue;
        };
        if command.counts_as_attempt() {
            attempts += 1;
        }
        let reveal_all = command == PlayerCommand::HelpAll;
        let elapsed = format_duration(start.elapsed());

        match command {
            PlayerCommand::Time => writeln!(out, "Elapsed: {}", elapsed)?,
            PlayerCommand::Stop => {
                writeln!(out, "Stopping...")?;
                break RoundStatus::Stopped;
            }
            PlayerCommand::Skip => {
                writeln!(out, "Skipped after {}.", elapsed)?;
                break RoundStatus::Skipped;
            }
            PlayerCommand::Help | PlayerCommand::HelpAll => {
                used_help = true;
                reveal(puzzle, reveal_all, out)?;
                break RoundStatus::Revealed;
            }
            PlayerCommand::Answer(answer) => {
                match check_answer(puzzle, &answer, &limits, &budget) {
                    AnswerVerdict::Correct => {
                        writeln!(out, "Correct! ({})", elapsed)?;
                        break RoundStatus::SolvedFormula;
                    }
                    AnswerVerdict::CorrectNoSolution => {
                        writeln!(out, "Correct: this puzzle has no solution. ({})", elapsed)?;
                        break RoundStatus::SolvedNoSolution;
                    }
                    AnswerVerdict::NotTarget(value) => writeln!(
                        out,
                        "Not 24 (got {}). Elapsed {}. Try again or 'help'/'help all'/'skip'/'time'/'stop'.",
                        value, elapsed
                    )?,
                    verdict => writeln!(out, "{}", verdict)?,
                }
            }
        }
    };

    Ok(RoundRecord {
        seqno,
        question: format!("[{}]", puzzle.display_ranks().join(", ")),
        status,
        time: start.elapsed(),
        attempts,
        used_help,
    })
}

fn reveal<W: Write>(puzzle: &Puzzle, all: bool, out: &mut W) -> Result<()> {
    let solutions = puzzle.solutions();
    if solutions.is_empty() {
        writeln!(out, "No solution.")?;
    } else if all {
        writeln!(out, "All {} solution(s):", solutions.len())?;
        for (i, s) in solutions.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, s)?;
        }
    } else if let Some(s) = solutions.choose(&mut rand::thread_rng()) {
        writeln!(out, "Solution (1/{}): {}", solutions.len(), s)?;
    }
    Ok(())
}

/// Final per-round report followed by the session summary
pub fn write_report<W: Write>(records: &[RoundRecord], out: &mut W) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    writeln!(out, "\nFinal Report")?;
    writeln!(
        out,
        "seqno, question, status, solved, time, attempts, used_help, solved_via"
    )?;
    for record in records {
        writeln!(out, "{}", record)?;
    }

    let rule = "=".repeat(56);
    writeln!(out, "\n{}", rule)?;
    writeln!(out, "Thanks for playing 24-Point!")?;
    writeln!(out, "{}", "-".repeat(56))?;
    writeln!(out, "{}", SessionStats::from_records(records))?;
    writeln!(out, "{}\n", rule)?;
    Ok(())
}
