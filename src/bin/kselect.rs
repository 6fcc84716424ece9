use std::env;
use std::process;

use kselect::selection::{run, AlgorithmStats, Comparison, RecursionNode, RunConfig, Selection};
use kselect::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const USAGE: &str = "usage: kselect [--mode smallest|largest|median] [-k N] \
                     [--random N [--seed S]] [--tree] [INPUT]";

struct Options {
    config: RunConfig,
    show_tree: bool,
}

fn parse_number(flag: &str, value: Option<String>) -> Result<u64> {
    let value = value.ok_or_else(|| Error::invalid_argument(format!("{} needs a value", flag)))?;
    value.parse().map_err(|_| {
        Error::invalid_argument(format!(
            "{} expects a non-negative integer, got {}",
            flag, value
        ))
    })
}

fn random_input(len: usize, seed: u64) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| rng.gen_range(-99..=99i64).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Negative numbers are input, not flags.
fn is_flag(arg: &str) -> bool {
    arg.starts_with('-') && !arg[1..].starts_with(|c: char| c.is_ascii_digit())
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Options> {
    let mut config = RunConfig::default();
    let mut show_tree = false;
    let mut random: Option<usize> = None;
    let mut seed = 0;
    let mut input = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mode" | "-m" => {
                let mode = args
                    .next()
                    .ok_or_else(|| Error::invalid_argument("--mode needs a value"))?;
                config.mode = mode.parse()?;
            }
            "-k" => config.k = parse_number("-k", args.next())? as usize,
            "--random" => random = Some(parse_number("--random", args.next())? as usize),
            "--seed" => seed = parse_number("--seed", args.next())?,
            "--tree" => show_tree = true,
            flag if is_flag(flag) => {
                return Err(Error::invalid_argument(format!(
                    "unknown flag {}\n{}",
                    flag, USAGE
                )));
            }
            _ => input = Some(arg.clone()),
        }
    }

    match (random, input) {
        (Some(_), Some(_)) => {
            return Err(Error::invalid_argument("--random and an explicit INPUT are exclusive"));
        }
        (Some(len), None) => config.input = random_input(len, seed),
        (None, Some(input)) => config.input = input,
        (None, None) => {}
    }
    Ok(Options { config, show_tree })
}

fn print_steps(name: &str, selection: &Selection) {
    println!("== {} ==", name);
    for (i, step) in selection.steps.iter().enumerate() {
        let indent = "  ".repeat(step.depth);
        print!(
            "{:>4} {}{:<21} {}  [cmp={}, ops={}]",
            i, indent, step.kind, step.description, step.comparisons, step.operations
        );
        if let Some(pct) = step.ignored_percentage {
            print!(" ({}% ignored)", pct);
        }
        println!();
    }
    println!("result: {}", selection.value);
    println!();
}

fn print_tree(root: &RecursionNode) {
    let mut stack = vec![(root, 0)];
    while let Some((node, level)) = stack.pop() {
        let result = node
            .result
            .map(|r| r.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{}{} [{}, depth {}] {:?} -> {}",
            "  ".repeat(level),
            node.id,
            node.description,
            node.depth,
            node.snapshot,
            result
        );
        stack.extend(node.children.iter().rev().map(|c| (c, level + 1)));
    }
}

fn print_stats(stats: &[&AlgorithmStats]) {
    println!(
        "{:<20} {:>6} {:>12} {:>11} {:>6} {:>8} {:>6}",
        "algorithm", "steps", "comparisons", "operations", "best", "average", "worst"
    );
    for s in stats {
        println!(
            "{:<20} {:>6} {:>12} {:>11} {:>6} {:>8} {:>6}",
            s.name,
            s.steps,
            s.comparisons,
            s.operations,
            s.complexity.best,
            s.complexity.average,
            s.complexity.worst
        );
    }
}

fn report(comparison: &Comparison, show_tree: bool) {
    println!(
        "input: {:?}\nsearching for rank {} ({})\n",
        comparison.sequence, comparison.rank, comparison.mode
    );
    print_steps(&comparison.median_of_medians_stats.name, &comparison.median_of_medians);
    print_steps(&comparison.quickselect_stats.name, &comparison.quickselect);
    if show_tree {
        println!("== recursion trees ==");
        print_tree(&comparison.median_of_medians.tree);
        println!();
        print_tree(&comparison.quickselect.tree);
        println!();
    }
    print_stats(&[
        &comparison.median_of_medians_stats,
        &comparison.quickselect_stats,
    ]);
}

fn try_main() -> Result<()> {
    let options = parse_args(env::args().skip(1))?;
    let comparison = run(&options.config)?;
    report(&comparison, options.show_tree);
    Ok(())
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
