use std::fmt;

/// A reporting period.
///
/// Field order matters: the derived `Ord` compares `year` first, then
/// `quarter`, which is the chronological order every output is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuarterKey {
    pub year: u64,
    pub quarter: u8,
}

impl QuarterKey {
    pub fn new(year: u64, quarter: u8) -> Self {
        Self { year, quarter }
    }

    /// Display label, e.g. `Q3 2021`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QuarterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{} {}", self.quarter, self.year)
    }
}
