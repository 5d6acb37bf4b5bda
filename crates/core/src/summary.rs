use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

/// Line statistics for one run.
///
/// `valid + near_miss + bad == lines` holds after every [`RunSummary::add_line`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub lines: u64,
    pub valid: u64,
    pub near_miss: u64,
    pub bad: u64,
    /// Sum of record weights over valid lines.
    pub versions: u64,
    /// Weighted count of valid records carrying a prerelease tag.
    pub with_prerelease: u64,
    /// Weighted count of valid records carrying build metadata.
    pub with_meta: u64,
    pub length_sum: u64,
    pub max_length: u64,
    min_length: Option<u64>,
}

/// The outcome category a line is tallied under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Valid,
    NearMiss,
    Bad,
}

impl RunSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one line of `length` characters under `category`.
    pub fn add_line(&mut self, length: u64, category: Category) {
        self.lines += 1;
        match category {
            Category::Valid => self.valid += 1,
            Category::NearMiss => self.near_miss += 1,
            Category::Bad => self.bad += 1,
        }
        self.length_sum = self.length_sum.saturating_add(length);
        self.max_length = self.max_length.max(length);
        self.min_length = Some(self.min_length.map_or(length, |m| m.min(length)));
    }

    /// Shortest line seen; 0 when no line was read.
    #[must_use]
    pub fn min_length(&self) -> u64 {
        self.min_length.unwrap_or(0)
    }

    /// Integer average line length; 0 when no line was read.
    #[must_use]
    pub fn average_length(&self) -> u64 {
        self.length_sum.checked_div(self.lines).unwrap_or(0)
    }

    /// `100 * count / lines`, or 0 for an empty run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self, count: u64) -> f64 {
        if self.lines == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.lines as f64
        }
    }

    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.valid + self.near_miss + self.bad == self.lines
    }

    pub fn merge(&mut self, other: &Self) {
        self.lines += other.lines;
        self.valid += other.valid;
        self.near_miss += other.near_miss;
        self.bad += other.bad;
        self.versions = self.versions.saturating_add(other.versions);
        self.with_prerelease = self.with_prerelease.saturating_add(other.with_prerelease);
        self.with_meta = self.with_meta.saturating_add(other.with_meta);
        self.length_sum = self.length_sum.saturating_add(other.length_sum);
        self.max_length = self.max_length.max(other.max_length);
        self.min_length = match (self.min_length, other.min_length) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
    }
}

impl AddAssign<&Self> for RunSummary {
    fn add_assign(&mut self, rhs: &Self) {
        self.merge(rhs);
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Line count:               {}", self.lines)?;
        writeln!(
            f,
            "Near misses ('v' prefix): {} ({:.2}%)",
            self.near_miss,
            self.percent(self.near_miss)
        )?;
        writeln!(
            f,
            "Not semver count:         {} ({:.2}%)",
            self.bad,
            self.percent(self.bad)
        )?;
        writeln!(
            f,
            "Semver count:             {} ({:.2}%)",
            self.valid,
            self.percent(self.valid)
        )?;
        writeln!(f, "Version count:            {}", self.versions)?;
        writeln!(f, "With prerelease:          {}", self.with_prerelease)?;
        writeln!(f, "With build metadata:      {}", self.with_meta)?;
        writeln!(f, "Average line length:      {}", self.average_length())?;
        writeln!(f, "Minimum line length:      {}", self.min_length())?;
        write!(f, "Maximum line length:      {}", self.max_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary_renders_zeroes() {
        let s = RunSummary::new();
        let text = s.to_string();
        assert!(text.contains("Line count:               0"));
        assert!(text.contains("Semver count:             0 (0.00%)"));
        assert!(text.contains("Average line length:      0"));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn test_percentages_and_lengths() {
        let mut s = RunSummary::new();
        s.add_line(5, Category::Valid);
        s.add_line(6, Category::NearMiss);
        s.add_line(13, Category::Bad);
        s.add_line(0, Category::Bad);
        assert!(s.is_consistent());
        assert_eq!(s.average_length(), 6);
        assert_eq!(s.min_length(), 0);
        assert_eq!(s.max_length, 13);
        assert!((s.percent(s.bad) - 50.0).abs() < f64::EPSILON);
        assert!(s.to_string().contains("Not semver count:         2 (50.00%)"));
    }

    #[test]
    fn test_merge_keeps_minimum() {
        let mut a = RunSummary::new();
        let mut b = RunSummary::new();
        b.add_line(4, Category::Valid);
        a += &b;
        assert_eq!(a.min_length(), 4);
        assert_eq!(a.lines, 1);
        a.add_line(2, Category::Bad);
        assert_eq!(a.min_length(), 2);
        assert!(a.is_consistent());
    }
}
