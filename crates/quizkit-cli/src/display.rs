//! Score presentation: percentages and congratulation tiers.

use std::fmt;

/// `100 * score / total`, rounded half up. Zero when `total` is zero.
pub fn percentage(score: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (200 * score + total) / (2 * total)
}

/// How well a run went, by percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTier {
    Perfect,
    Excellent,
    Good,
    Fair,
    NeedsPractice,
}

impl ResultTier {
    pub fn from_percentage(percent: usize) -> Self {
        match percent {
            100.. => ResultTier::Perfect,
            80..=99 => ResultTier::Excellent,
            60..=79 => ResultTier::Good,
            40..=59 => ResultTier::Fair,
            _ => ResultTier::NeedsPractice,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ResultTier::Perfect => "Perfect! You're an expert!",
            ResultTier::Excellent => "Excellent! A really strong result!",
            ResultTier::Good => "Good job! Nicely done!",
            ResultTier::Fair => "Not bad. Worth brushing up on the material.",
            ResultTier::NeedsPractice => "Keep practicing!",
        }
    }
}

impl fmt::Display for ResultTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// `"10m"`, `"8m 30s"`, or `"45s"`.
pub fn format_duration_secs(secs: u64) -> String {
    match (secs / 60, secs % 60) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}m"),
        (m, s) => format!("{m}m {s}s"),
    }
}
