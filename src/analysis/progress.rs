use std::fmt::Display;

pub const DEFAULT_BAR_WIDTH: usize = 20;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Goal progress split into `width` units, `filled` of which are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    pub current: i64,
    /// The goal after substituting 1 for non-positive values.
    pub total: i64,
    pub filled: usize,
    pub width: usize,
}

impl Display for ProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let filled = FILLED.to_string().repeat(self.filled);
        let empty = EMPTY.to_string().repeat(self.width - self.filled);
        write!(f, "[{filled}{empty}] {}/{} oz", self.current, self.total)
    }
}

/// A goal that isn't positive is treated as 1 so there is always something to divide by.
pub fn progress_bar(current: i64, total: i64, width: usize) -> ProgressBar {
    let total = if total <= 0 { 1 } else { total };
    let fraction = current as f64 / total as f64;
    let filled = (fraction * width as f64).floor().clamp(0., width as f64) as usize;
    ProgressBar {
        current,
        total,
        filled,
        width,
    }
}

#[cfg(test)]
mod tests {
    use super::{progress_bar, DEFAULT_BAR_WIDTH};

    #[test]
    fn test_partial_progress() {
        let bar = progress_bar(36, 64, DEFAULT_BAR_WIDTH);
        assert_eq!(bar.filled, 11);
        assert_eq!(
            bar.to_string(),
            "[███████████░░░░░░░░░] 36/64 oz"
        );
    }

    #[test]
    fn test_filled_is_clamped() {
        for (current, total) in [(0, 64), (64, 64), (500, 64), (-20, 64), (7, 0), (0, -5)] {
            let bar = progress_bar(current, total, DEFAULT_BAR_WIDTH);
            assert!(bar.filled <= DEFAULT_BAR_WIDTH, "{current}/{total}");
        }
        assert_eq!(progress_bar(500, 64, DEFAULT_BAR_WIDTH).filled, 20);
        assert_eq!(progress_bar(-20, 64, DEFAULT_BAR_WIDTH).filled, 0);
    }

    #[test]
    fn test_non_positive_goal_is_one() {
        let bar = progress_bar(7, 0, 10);
        assert_eq!(bar.total, 1);
        assert_eq!(bar.filled, 10);
        assert_eq!(bar.to_string(), "[██████████] 7/1 oz");

        assert_eq!(progress_bar(0, -5, 10).total, 1);
        assert_eq!(progress_bar(0, -5, 10).filled, 0);
    }

    #[test]
    fn test_zero_width() {
        let bar = progress_bar(10, 20, 0);
        assert_eq!(bar.filled, 0);
        assert_eq!(bar.to_string(), "[] 10/20 oz");
    }
}
