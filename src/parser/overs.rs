//! Cricket arithmetic: overs notation, strike rate and run rates.

const BALLS_PER_OVER: f64 = 6.0;

/// Convert "<overs>.<balls>" to a decimal number of overs.
///
/// "12.3" is twelve overs and three balls, i.e. 12.5. Anything unparseable
/// converts to 0.0.
pub fn overs_to_decimal(overs: &str) -> f64 {
    let overs = overs.trim();

    let value = match overs.split_once('.') {
        Some((whole, balls)) => match (whole.parse::<u32>(), balls.parse::<u32>()) {
            (Ok(whole), Ok(balls)) => f64::from(whole) + f64::from(balls) / BALLS_PER_OVER,
            _ => 0.0,
        },
        None => overs.parse::<f64>().unwrap_or(0.0),
    };

    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Runs per hundred balls, two decimals
pub fn strike_rate(runs: u32, balls: u32) -> String {
    if balls == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", f64::from(runs) * 100.0 / f64::from(balls))
}

/// Current run rate, `None` when no overs have been bowled
pub fn current_run_rate(runs: u32, overs: f64) -> Option<f64> {
    (overs > 0.0).then(|| f64::from(runs) / overs)
}

/// Required run rate, `None` unless both runs and overs remain
pub fn required_run_rate(runs_needed: i64, overs_left: f64) -> Option<f64> {
    (runs_needed > 0 && overs_left > 0.0).then(|| runs_needed as f64 / overs_left)
}
