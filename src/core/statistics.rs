use crate::domain::model::{NumberSequence, RawInput, StatisticsResult};
use crate::utils::error::{Result, StatsError};

/// Splits on `,`, trims each token and parses it as a base-10 integer.
///
/// One bad token fails the whole input; nothing is skipped.
pub fn parse_numbers(raw: &RawInput) -> Result<NumberSequence> {
    let values = raw
        .as_str()
        .split(',')
        .enumerate()
        .map(|(position, token)| {
            let token = token.trim();
            token.parse::<i64>().map_err(|e| StatsError::Parse {
                token: token.to_string(),
                position,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<i64>>>()?;

    NumberSequence::from_vec(values).ok_or_else(|| StatsError::Parse {
        token: raw.as_str().to_string(),
        position: 0,
        reason: "no numbers in input".to_string(),
    })
}

pub fn mean(numbers: &NumberSequence) -> f64 {
    // i128 cannot overflow for any realistic count of i64 values
    let sum: i128 = numbers.values().iter().map(|&v| i128::from(v)).sum();
    sum as f64 / numbers.len() as f64
}

pub fn median(numbers: &NumberSequence) -> f64 {
    let mut sorted = numbers.values().to_vec();
    sorted.sort_unstable();

    let len = sorted.len();
    let mid = len / 2;
    if len % 2 == 0 {
        (i128::from(sorted[mid - 1]) + i128::from(sorted[mid])) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

pub fn compute(raw: &RawInput) -> Result<StatisticsResult> {
    let numbers = parse_numbers(raw)?;
    tracing::debug!("Parsed {} numbers", numbers.len());

    Ok(StatisticsResult {
        mean: mean(&numbers),
        median: median(&numbers),
    })
}
