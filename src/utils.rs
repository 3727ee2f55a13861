//! Utility functions for the rating and matchmaking engine

/// Round a value to the given number of decimal places, halves away from zero
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Calculate the absolute difference between two scores
pub fn score_difference(score1: f64, score2: f64) -> f64 {
    (score1 - score2).abs()
}

/// Logistic curve 1 / (1 + e^-x)
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
