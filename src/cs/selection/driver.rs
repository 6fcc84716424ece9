//! Runs both selection engines side by side on user input.
//!
//! The driver owns everything the engines assume has already happened:
//! parsing the raw comma-separated input, turning a selection mode into a
//! 1-indexed target rank and rejecting ranks outside the sequence.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::cs::selection::trace::{AlgorithmStats, Step, StepKind};
use crate::cs::selection::{InstrumentedSelect, MedianOfMedians, QuickSelect, Selection};
use crate::error::{Error, Result};

/// Which order statistic the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// The k-th smallest element.
    #[default]
    Smallest,
    /// The k-th largest element.
    Largest,
    /// The (upper-index) median, `ceil(n / 2)`-th smallest. Ignores k.
    Median,
}

impl SelectionMode {
    /// Resolves the user's `k` into a 1-indexed ascending rank for a sequence
    /// of `len` elements.
    pub fn target_rank(&self, k: usize, len: usize) -> Result<usize> {
        if len == 0 {
            return Err(Error::EmptyInput);
        }
        let rank = match self {
            SelectionMode::Median => return Ok(len.div_ceil(2)),
            SelectionMode::Smallest => k,
            SelectionMode::Largest => {
                if k == 0 || k > len {
                    return Err(Error::RankOutOfRange { rank: k, len });
                }
                len - k + 1
            }
        };
        if rank == 0 || rank > len {
            return Err(Error::RankOutOfRange { rank, len });
        }
        Ok(rank)
    }

    /// Human-readable name of the element being searched for.
    pub fn describe(&self, k: usize) -> String {
        match self {
            SelectionMode::Smallest => format!("{} smallest element", ordinal(k)),
            SelectionMode::Largest => format!("{} largest element", ordinal(k)),
            SelectionMode::Median => "median element".to_string(),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smallest" | "kth-smallest" => Ok(SelectionMode::Smallest),
            "largest" | "kth-largest" => Ok(SelectionMode::Largest),
            "median" => Ok(SelectionMode::Median),
            other => Err(Error::invalid_mode(other)),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Smallest => f.write_str("kth-smallest"),
            SelectionMode::Largest => f.write_str("kth-largest"),
            SelectionMode::Median => f.write_str("median"),
        }
    }
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Parses a comma-separated list of integers.
///
/// Tokens that are not integers are skipped, matching the forgiving input box
/// this is meant to sit behind. Fails only if nothing usable remains.
///
/// # Examples
///
/// ```
/// use kselect::cs::selection::parse_sequence;
///
/// assert_eq!(parse_sequence(" 3, 1,x, 4,,-2 ").unwrap(), vec![3, 1, 4, -2]);
/// assert!(parse_sequence("a, b").is_err());
/// ```
pub fn parse_sequence(input: &str) -> Result<Vec<i64>> {
    let values: Vec<i64> = input
        .split(',')
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .collect();
    if values.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(values)
}

/// Configuration for one side-by-side run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Raw comma-separated input.
    pub input: String,
    /// The user's k. Ignored in median mode.
    pub k: usize,
    pub mode: SelectionMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: "3,1,4,1,5,9,2,6,5,3,5".to_string(),
            k: 6,
            mode: SelectionMode::Smallest,
        }
    }
}

/// Result of running both engines on the same input.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub sequence: Vec<i64>,
    /// The resolved 1-indexed ascending rank both engines searched for.
    pub rank: usize,
    pub mode: SelectionMode,
    pub median_of_medians: Selection,
    pub quickselect: Selection,
    pub median_of_medians_stats: AlgorithmStats,
    pub quickselect_stats: AlgorithmStats,
}

impl Comparison {
    /// Whether both engines found the same value.
    pub fn agree(&self) -> bool {
        self.median_of_medians.value == self.quickselect.value
    }
}

/// Parses `config.input`, resolves the target rank and runs both engines.
///
/// Each engine receives its own copy of the sequence, and each step list
/// opens with a step announcing the search.
pub fn run(config: &RunConfig) -> Result<Comparison> {
    let sequence = parse_sequence(&config.input)?;
    let rank = config.mode.target_rank(config.k, sequence.len())?;
    debug!(
        "running selection for the {} (rank {}) of {} elements",
        config.mode.describe(config.k),
        rank,
        sequence.len()
    );

    let target = config.mode.describe(config.k);
    let median_of_medians = run_engine(&MedianOfMedians, sequence.clone(), rank, &target);
    let quickselect = run_engine(&QuickSelect, sequence.clone(), rank, &target);

    let median_of_medians_stats = MedianOfMedians.stats(&median_of_medians);
    let quickselect_stats = QuickSelect.stats(&quickselect);
    debug!(
        "{}: {} steps, {} comparisons; {}: {} steps, {} comparisons",
        median_of_medians_stats.name,
        median_of_medians_stats.steps,
        median_of_medians_stats.comparisons,
        quickselect_stats.name,
        quickselect_stats.steps,
        quickselect_stats.comparisons
    );

    Ok(Comparison {
        sequence,
        rank,
        mode: config.mode,
        median_of_medians,
        quickselect,
        median_of_medians_stats,
        quickselect_stats,
    })
}

fn run_engine<E: InstrumentedSelect>(
    engine: &E,
    sequence: Vec<i64>,
    rank: usize,
    target: &str,
) -> Selection {
    let opening = Step::new(
        StepKind::Divide,
        0,
        format!("{}: starting the search for the {}", engine.name(), target),
        &sequence,
    )
    .with_rank(rank);
    let mut selection = engine.select(&sequence, rank);
    selection.steps.insert(0, opening);
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sequence() {
        assert_eq!(parse_sequence("3,1,4").unwrap(), vec![3, 1, 4]);
        assert_eq!(parse_sequence("  -5 , 2.5, 7 ").unwrap(), vec![-5, 7]);
        assert_eq!(parse_sequence(""), Err(Error::EmptyInput));
        assert_eq!(parse_sequence(",,,"), Err(Error::EmptyInput));
    }

    #[test]
    fn test_target_rank() {
        assert_eq!(SelectionMode::Smallest.target_rank(3, 11), Ok(3));
        assert_eq!(SelectionMode::Largest.target_rank(1, 11), Ok(11));
        assert_eq!(SelectionMode::Largest.target_rank(11, 11), Ok(1));
        assert_eq!(SelectionMode::Median.target_rank(0, 11), Ok(6));
        assert_eq!(SelectionMode::Median.target_rank(99, 10), Ok(5));
        assert_eq!(
            SelectionMode::Smallest.target_rank(0, 4),
            Err(Error::RankOutOfRange { rank: 0, len: 4 })
        );
        assert_eq!(
            SelectionMode::Largest.target_rank(5, 4),
            Err(Error::RankOutOfRange { rank: 5, len: 4 })
        );
        assert_eq!(SelectionMode::Median.target_rank(1, 0), Err(Error::EmptyInput));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("kth-smallest".parse::<SelectionMode>(), Ok(SelectionMode::Smallest));
        assert_eq!("Largest".parse::<SelectionMode>(), Ok(SelectionMode::Largest));
        assert_eq!(" median ".parse::<SelectionMode>(), Ok(SelectionMode::Median));
        assert_eq!(
            "middle".parse::<SelectionMode>(),
            Err(Error::InvalidMode("middle".to_string()))
        );
        assert_eq!(SelectionMode::Largest.to_string(), "kth-largest");
    }

    #[test]
    fn test_describe() {
        assert_eq!(SelectionMode::Smallest.describe(1), "1st smallest element");
        assert_eq!(SelectionMode::Largest.describe(12), "12th largest element");
        assert_eq!(SelectionMode::Smallest.describe(22), "22nd smallest element");
        assert_eq!(SelectionMode::Median.describe(4), "median element");
    }

    #[test]
    fn test_default_run() {
        let comparison = run(&RunConfig::default()).unwrap();
        assert_eq!(comparison.rank, 6);
        assert_eq!(comparison.median_of_medians.value, 4);
        assert_eq!(comparison.quickselect.value, 4);
        assert!(comparison.agree());

        let opening = &comparison.median_of_medians.steps[0];
        assert_eq!(opening.kind, StepKind::Divide);
        assert_eq!(opening.rank, Some(6));
        assert_eq!((opening.comparisons, opening.operations), (0, 0));
        assert!(opening.description.contains("6th smallest element"));
        assert_eq!(
            comparison.median_of_medians_stats.steps,
            comparison.median_of_medians.steps.len()
        );
    }

    #[test]
    fn test_run_modes() {
        let largest = RunConfig {
            k: 1,
            mode: SelectionMode::Largest,
            ..RunConfig::default()
        };
        let comparison = run(&largest).unwrap();
        assert_eq!(comparison.rank, 11);
        assert_eq!(comparison.quickselect.value, 9);

        let median = RunConfig {
            k: 100,
            mode: SelectionMode::Median,
            ..RunConfig::default()
        };
        assert_eq!(run(&median).unwrap().median_of_medians.value, 4);
    }

    #[test]
    fn test_run_rejects_bad_input() {
        let empty = RunConfig {
            input: "x, y".to_string(),
            ..RunConfig::default()
        };
        assert_eq!(run(&empty).unwrap_err(), Error::EmptyInput);

        let too_far = RunConfig {
            k: 12,
            ..RunConfig::default()
        };
        assert_eq!(
            run(&too_far).unwrap_err(),
            Error::RankOutOfRange { rank: 12, len: 11 }
        );
    }
}
