//! Course progress arithmetic.

/// Percentage of `completed` over `total`, rounded to two decimal places.
///
/// A course without lessons has 0% progress.
pub fn percentage(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = completed as f64 / total as f64 * 100.0;
    round2(raw)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_lessons_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
    }

    #[test]
    fn test_half() {
        assert_eq!(percentage(2, 4), 50.0);
    }

    #[test]
    fn test_rounds_to_two_places() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(1, 7), 14.29);
    }

    #[test]
    fn test_full_and_empty() {
        assert_eq!(percentage(5, 5), 100.0);
        assert_eq!(percentage(0, 5), 0.0);
    }
}
