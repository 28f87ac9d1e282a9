use std::process::ExitCode;

use automata_sim::prelude::*;
use owo_colors::OwoColorize;

use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgMatches, Command};

fn input_arg() -> Arg {
    Arg::new("input")
        .short('i')
        .long("input")
        .help("file containing the encoded automaton, stdin is read if absent")
}

fn cli() -> clap::Command {
    Command::new("simulate")
        .about("Simulation of finite automata on finite words")
        .subcommand_required(true)
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info")
                .global(true),
        )
        .subcommand(
            Command::new("run")
                .about("decides for each given word whether the automaton accepts it")
                .arg(input_arg())
                .arg(Arg::new("words").num_args(1..).required(true)),
        )
        .subcommand(
            Command::new("step")
                .about("steps through a word and prints the active states after every symbol")
                .arg(input_arg())
                .arg(Arg::new("word").required(true)),
        )
        .subcommand(
            Command::new("check")
                .about("lists the states that prevent the automaton from being a complete DFA")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("table")
                .about("prints the transition table")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("dot")
                .about("prints the automaton in the graphviz DOT format")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("random")
                .about("prints the encoding of a randomly generated automaton")
                .arg(
                    Arg::new("symbols")
                        .long("symbols")
                        .value_parser(value_parser!(u8).range(0..=26))
                        .default_value("2"),
                )
                .arg(
                    Arg::new("size")
                        .long("size")
                        .value_parser(value_parser!(usize))
                        .default_value("4"),
                )
                .arg(
                    Arg::new("density")
                        .long("density")
                        .value_parser(value_parser!(f64))
                        .default_value("0.3"),
                )
                .arg(
                    Arg::new("epsilon")
                        .long("epsilon")
                        .value_parser(value_parser!(f64))
                        .default_value("0.1"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64)),
                ),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn read_automaton(matches: &ArgMatches) -> Result<Automaton, LoadError> {
    let automaton = match matches.get_one::<String>("input") {
        Some(path) => {
            debug!("reading automaton from {path}");
            Automaton::load(path)?
        }
        None => {
            debug!("reading automaton from stdin");
            Automaton::from_reader(std::io::stdin().lock())?
        }
    };
    info!(
        "read automaton with {} states and {} transitions",
        automaton.size(),
        automaton.transition_count()
    );
    Ok(automaton)
}

fn verdict(accepted: bool) -> String {
    if accepted {
        "accepted".green().to_string()
    } else {
        "rejected".red().to_string()
    }
}

fn run(aut: &Automaton, matches: &ArgMatches) {
    let mut sim = Simulator::new(aut);
    for word in matches.get_many::<String>("words").into_iter().flatten() {
        let outcome = sim.evaluate(word);
        if outcome.died() && outcome.consumed < word.chars().count() {
            println!(
                "{word}: {} (no active states after {} symbols)",
                verdict(false),
                outcome.consumed
            );
        } else {
            println!("{word}: {}", verdict(outcome.accepted));
        }
    }
}

fn step(aut: &Automaton, word: &str) {
    let mut sim = Simulator::new(aut);
    sim.set_up(word);
    println!("{:>3}   {}", 0, sim.current().show(aut));
    while let Some(sym) = sim.next_symbol() {
        sim.step_forward();
        let configuration = sim.current().show(aut);
        if sim.is_accepting() {
            println!("{:>3} {sym} {}", sim.position(), configuration.bold());
        } else {
            println!("{:>3} {sym} {configuration}", sim.position());
        }
    }
    println!("{word}: {}", verdict(sim.is_accepting()));
}

fn check(aut: &Automaton) {
    let report = aut.determinism_report();
    if report.is_empty() {
        println!("{}", "deterministic and complete".green());
        return;
    }
    for state in report.states() {
        let reasons = state
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("{}: {reasons}", state.name.yellow());
    }
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    if let Some(("random", sub)) = matches.subcommand() {
        let mut rng = match sub.get_one::<u64>("seed") {
            Some(&seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let aut = automata_sim::random::generate_random_automaton(
            &mut rng,
            sub.get_one::<u8>("symbols").copied().map_or(2, usize::from),
            sub.get_one::<usize>("size").copied().unwrap_or(4),
            sub.get_one::<f64>("density").copied().unwrap_or(0.3),
            sub.get_one::<f64>("epsilon").copied().unwrap_or(0.1),
        );
        print!("{}", aut.encoded());
        return ExitCode::SUCCESS;
    }

    let Some((command, sub)) = matches.subcommand() else {
        unreachable!("a subcommand is required")
    };
    let aut = match read_automaton(sub) {
        Ok(aut) => aut,
        Err(e) => {
            error!("could not load automaton: {e}");
            return ExitCode::FAILURE;
        }
    };

    match command {
        "run" => run(&aut, sub),
        "step" => step(
            &aut,
            sub.get_one::<String>("word").map_or("", String::as_str),
        ),
        "check" => check(&aut),
        "table" => println!("{}", aut.transition_table()),
        "dot" => println!("{}", aut.dot_representation()),
        _ => unreachable!(),
    }
    ExitCode::SUCCESS
}
