use nfa_residue::{dot::Dottable, prelude::*};

use tracing::{debug, error, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("nfa-residue")
        .about("Decides whether a postfix regular expression accepts a word of length r mod m")
        .arg(
            Arg::new("expression")
                .required(true)
                .help("regular expression in postfix notation, e.g. `ab+c.*`"),
        )
        .arg(
            Arg::new("modulus")
                .required_unless_present("dot")
                .value_parser(value_parser!(usize))
                .help("not needed together with `--dot`"),
        )
        .arg(
            Arg::new("residue")
                .value_parser(value_parser!(usize))
                .help("if omitted, all residues for which a word exists are printed"),
        )
        .arg(
            Arg::new("dot")
                .long("dot")
                .action(ArgAction::SetTrue)
                .help("print the automaton in DOT format instead of solving"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
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

fn run(matches: &ArgMatches) -> Result<String, SolveError> {
    let expression = matches
        .get_one::<String>("expression")
        .map(String::as_str)
        .unwrap_or_default();
    let modulus = matches.get_one::<usize>("modulus").copied().unwrap_or(0);

    if matches.get_flag("dot") {
        let nfa = Nfa::from_postfix(expression)?;
        return Ok(nfa.dot_representation());
    }

    match matches.get_one::<usize>("residue").copied() {
        Some(residue) => {
            debug!("solving {expression:?} for residue {residue} modulo {modulus}");
            let answer = if solve(expression, modulus, residue)? {
                "yes"
            } else {
                "no"
            };
            Ok(answer.to_string())
        }
        None => {
            if modulus == 0 {
                return Err(SolveError::InvalidModulus);
            }
            let nfa = Nfa::from_postfix(expression)?;
            Ok(reachable_residues(&nfa, modulus)
                .into_iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(" "))
        }
    }
}

pub fn main() {
    let matches = cli().get_matches();
    setup_logging(&matches);

    match run(&matches) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{cli, run};

    fn run_with(args: &[&str]) -> String {
        let matches = cli()
            .try_get_matches_from(std::iter::once("nfa-residue").chain(args.iter().copied()))
            .unwrap();
        run(&matches).unwrap()
    }

    #[test]
    fn dot_without_modulus() {
        let output = run_with(&["--dot", "a*"]);
        assert!(output.starts_with("digraph NFA {"));
        assert!(output.contains("q0 -> q1 [label=\"a\"]"));
    }

    #[test]
    fn modulus_required_for_solving() {
        assert!(cli().try_get_matches_from(["nfa-residue", "ab."]).is_err());
    }

    #[test]
    fn answers() {
        assert_eq!(run_with(&["ab+c.aba.*.bac.+.+*", "3", "2"]), "yes");
        assert_eq!(run_with(&["acb..bab.c.*.ab.ba.+.+*a.", "3", "0"]), "no");
        assert_eq!(run_with(&["aa.a.*1aa.+.", "6"]), "0 2 3 5");
    }
}
