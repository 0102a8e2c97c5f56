//! Dataset loop around [`treap::DualTreap`].
//!
//! Input is a stream of whitespace-separated integers. Each dataset is
//! `n q`, then `n` 32-bit values, then `q` records `type l r`. A dataset with
//! `n = q = 0` ends the stream. Every dataset prints a `Swapper k:` header,
//! one line per type-2 record, and a blank line.

mod config;

use std::io::{Read, Write};
use std::str::SplitAsciiWhitespace;

use log::debug;
use thiserror::Error;
use treap::{DualTreap, Operation, PriorityRng, RangeError};

pub use config::{Config, ConfigError, SEED_VAR};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("i/o failure")]
    Io(#[from] std::io::Error),
    #[error("expected an integer, found {token:?}")]
    Parse { token: String },
    #[error("input ended while reading {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("unknown operation type {kind}")]
    UnknownOperation { kind: i64 },
    #[error(transparent)]
    Range(#[from] RangeError),
}

struct Scanner<'a> {
    tokens: SplitAsciiWhitespace<'a>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_ascii_whitespace(),
        }
    }

    fn try_read<T: std::str::FromStr>(&mut self) -> Result<Option<T>, DriverError> {
        match self.tokens.next() {
            Some(token) => token.parse().map(Some).map_err(|_| DriverError::Parse {
                token: token.to_string(),
            }),
            None => Ok(None),
        }
    }

    fn read<T: std::str::FromStr>(&mut self, expected: &'static str) -> Result<T, DriverError> {
        self.try_read()?.ok_or(DriverError::UnexpectedEof { expected })
    }
}

fn parse_operation(kind: i64, l: usize, r: usize) -> Result<Operation, DriverError> {
    match kind {
        1 => Ok(Operation::Swap { l, r }),
        2 => Ok(Operation::SwapAndReport { l, r }),
        _ => Err(DriverError::UnknownOperation { kind }),
    }
}

/// Processes every dataset in `input` and writes the results to `output`.
/// `seed` pins the priority stream; `None` seeds from entropy.
///
/// Returns the number of datasets processed, not counting the terminator.
pub fn run<R, W>(mut input: R, mut output: W, seed: Option<u64>) -> Result<usize, DriverError>
where
    R: Read,
    W: Write,
{
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    let mut scanner = Scanner::new(&text);

    let rng = seed.map_or_else(PriorityRng::from_entropy, PriorityRng::with_seed);
    let mut dual = DualTreap::build(std::iter::empty::<i64>(), rng);
    let mut datasets = 0;

    // end of input at a dataset boundary is as good as the terminator
    while let Some(n) = scanner.try_read::<usize>()? {
        let q: usize = scanner.read("operation count")?;
        if n == 0 && q == 0 {
            break;
        }
        datasets += 1;
        debug!("dataset {datasets}: {n} values, {q} operations");
        writeln!(output, "Swapper {datasets}:")?;

        // i32 inputs keep every range sum within i64
        let values = (0..n)
            .map(|_| scanner.read::<i32>("sequence value").map(i64::from))
            .collect::<Result<Vec<_>, _>>()?;
        dual.reset(values);

        for _ in 0..q {
            let kind = scanner.read("operation type")?;
            let l = scanner.read("range start")?;
            let r = scanner.read("range end")?;
            if let Some(sum) = dual.apply(parse_operation(kind, l, r)?)? {
                writeln!(output, "{sum}")?;
            }
        }
        writeln!(output)?;
    }

    let released = dual.teardown();
    debug!("released {released} nodes");
    output.flush()?;
    Ok(datasets)
}

#[cfg(test)]
mod tests {
    use super::{DriverError, run};
    use treap::RangeError;

    fn run_str(input: &str) -> (Result<usize, DriverError>, String) {
        let mut output = Vec::new();
        let result = run(input.as_bytes(), &mut output, Some(7));
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn two_datasets() {
        let input = "\
5 5
1 2 3 4 5
1 2 5
2 2 4
1 1 5
2 1 3
2 4 5
3 1
10 20 30
2 1 3
0 0
";
        let (result, output) = run_str(input);
        assert_eq!(result.unwrap(), 2);
        // after the first swap: 1 3 2 5 4, then 3 1 5 2 4
        assert_eq!(output, "Swapper 1:\n10\n9\n6\n\nSwapper 2:\n60\n\n");
    }

    #[test]
    fn terminator_prints_nothing() {
        let (result, output) = run_str("0 0\n3 1\n1 2 3\n2 1 3\n");
        assert_eq!(result.unwrap(), 0);
        assert_eq!(output, "");
    }

    #[test]
    fn missing_terminator_is_accepted() {
        let (result, output) = run_str("2 1\n4 5\n2 1 2\n");
        assert_eq!(result.unwrap(), 1);
        assert_eq!(output, "Swapper 1:\n9\n\n");
    }

    #[test]
    fn swap_only_dataset_prints_header() {
        let (result, output) = run_str("2 1 7 8 1 1 2 0 0");
        assert_eq!(result.unwrap(), 1);
        assert_eq!(output, "Swapper 1:\n\n");
    }

    #[test]
    fn extreme_values_sum_without_overflow() {
        let max = i32::MAX;
        let min = i32::MIN;
        let input = format!("4 3\n{max} {max} {max} {min}\n2 1 3\n1 1 4\n2 1 4\n0 0\n");
        let (result, output) = run_str(&input);
        assert_eq!(result.unwrap(), 1);
        let three_max = 3 * i64::from(max);
        let total = three_max + i64::from(min);
        assert_eq!(output, format!("Swapper 1:\n{three_max}\n{total}\n\n"));
    }

    #[test]
    fn value_wider_than_32_bits_is_rejected() {
        let (result, output) = run_str("2 1\n9223372036854775807 1\n2 1 2\n0 0\n");
        assert!(
            matches!(result, Err(DriverError::Parse { token }) if token == "9223372036854775807")
        );
        assert_eq!(output, "Swapper 1:\n");
    }

    #[test]
    fn truncated_input() {
        let (result, _) = run_str("3 1\n1 2\n");
        assert!(matches!(
            result,
            Err(DriverError::UnexpectedEof {
                expected: "sequence value"
            })
        ));
    }

    #[test]
    fn bad_token() {
        let (result, _) = run_str("2 x");
        assert!(matches!(result, Err(DriverError::Parse { token }) if token == "x"));
    }

    #[test]
    fn unknown_operation() {
        let (result, _) = run_str("2 1\n1 2\n3 1 2\n0 0\n");
        assert!(matches!(
            result,
            Err(DriverError::UnknownOperation { kind: 3 })
        ));
    }

    #[test]
    fn out_of_range_operation() {
        let (result, _) = run_str("2 1\n1 2\n2 1 3\n0 0\n");
        assert!(matches!(
            result,
            Err(DriverError::Range(RangeError::OutOfBounds { l: 1, r: 3, len: 2 }))
        ));
    }
}
