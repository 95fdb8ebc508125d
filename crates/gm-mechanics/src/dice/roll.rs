//! Raw d6 results and aggregation.

use serde::{Deserialize, Serialize};

use super::D6_SIDES;

/// The raw faces of one drawn pool, in draw order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roll {
    /// Individual die values (1-6).
    pub values: Vec<u32>,
}

impl Roll {
    /// Build a roll from known faces.
    pub fn from_values(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// The highest single die value, or 0 if empty.
    pub fn highest(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// The lowest single die value, or 0 if empty.
    pub fn lowest(&self) -> u32 {
        self.values.iter().copied().min().unwrap_or(0)
    }

    /// Count dice showing exactly `face`.
    pub fn count_of(&self, face: u32) -> usize {
        self.values.iter().filter(|&&v| v == face).count()
    }

    /// Count dice showing a six.
    pub fn sixes(&self) -> usize {
        self.count_of(D6_SIDES)
    }

    /// Number of dice in the roll.
    pub fn count(&self) -> usize {
        self.values.len()
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", values.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_and_lowest() {
        let r = Roll::from_values([3, 6, 1]);
        assert_eq!(r.highest(), 6);
        assert_eq!(r.lowest(), 1);
    }

    #[test]
    fn empty_roll() {
        let r = Roll::default();
        assert_eq!(r.highest(), 0);
        assert_eq!(r.lowest(), 0);
        assert_eq!(r.count(), 0);
        assert_eq!(r.sixes(), 0);
    }

    #[test]
    fn counts_sixes() {
        let r = Roll::from_values([6, 2, 6, 6]);
        assert_eq!(r.sixes(), 3);
        assert_eq!(r.count_of(2), 1);
    }

    #[test]
    fn display() {
        assert_eq!(Roll::from_values([3, 5]).to_string(), "[3, 5]");
    }

    #[test]
    fn serializes_as_plain_list() {
        let json = serde_json::to_string(&Roll::from_values([4, 1])).unwrap();
        assert_eq!(json, "[4,1]");
    }
}
