//! Weekday enumeration and bitmask codec.
//!
//! Schedules are persisted as a single integer where bit `(n - 1)` corresponds
//! to weekday ordinal `n` (Monday = 1 .. Sunday = 7). `encode` and `decode`
//! are exact inverses for every weekday set; bits above bit 6 are ignored.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Day of the week, ISO ordered (Monday = 1 .. Sunday = 7).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl WeekDay {
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    /// ISO ordinal, Monday = 1 .. Sunday = 7.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal.checked_sub(1)? as usize).copied()
    }

    /// The weekday a calendar date falls on.
    ///
    /// chrono already numbers weekdays from Monday, so no remapping of
    /// Sunday-first platform ordinals is needed here.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Mon => WeekDay::Monday,
            Weekday::Tue => WeekDay::Tuesday,
            Weekday::Wed => WeekDay::Wednesday,
            Weekday::Thu => WeekDay::Thursday,
            Weekday::Fri => WeekDay::Friday,
            Weekday::Sat => WeekDay::Saturday,
            Weekday::Sun => WeekDay::Sunday,
        }
    }

    /// Encode a weekday set as a bitmask.
    pub fn encode(days: &BTreeSet<WeekDay>) -> i64 {
        days.iter()
            .fold(0, |mask, day| mask | (1 << (day.ordinal() - 1)))
    }

    /// Decode a bitmask into a weekday set. Bits above bit 6 are ignored.
    pub fn decode(mask: i64) -> BTreeSet<WeekDay> {
        Self::ALL
            .iter()
            .copied()
            .filter(|day| mask & (1 << (day.ordinal() - 1)) != 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(days: &[WeekDay]) -> BTreeSet<WeekDay> {
        days.iter().copied().collect()
    }

    #[test]
    fn test_ordinals_are_iso() {
        assert_eq!(WeekDay::Monday.ordinal(), 1);
        assert_eq!(WeekDay::Sunday.ordinal(), 7);
    }

    #[test]
    fn test_from_ordinal_roundtrip() {
        for day in WeekDay::ALL {
            assert_eq!(WeekDay::from_ordinal(day.ordinal()), Some(day));
        }
        assert_eq!(WeekDay::from_ordinal(0), None);
        assert_eq!(WeekDay::from_ordinal(8), None);
    }

    #[test]
    fn test_encode_single_days() {
        assert_eq!(WeekDay::encode(&schedule(&[WeekDay::Monday])), 0b0000001);
        assert_eq!(WeekDay::encode(&schedule(&[WeekDay::Sunday])), 0b1000000);
    }

    #[test]
    fn test_encode_empty_set() {
        assert_eq!(WeekDay::encode(&BTreeSet::new()), 0);
        assert!(WeekDay::decode(0).is_empty());
    }

    #[test]
    fn test_decode_encode_inverse_for_all_subsets() {
        // 2^7 possible weekday sets; check the codec is an exact inverse on all.
        for mask in 0..128i64 {
            let days = WeekDay::decode(mask);
            assert_eq!(WeekDay::encode(&days), mask, "mask {mask:#09b}");
        }
    }

    #[test]
    fn test_decode_ignores_high_bits() {
        let full = WeekDay::decode(0b1111111);
        assert_eq!(WeekDay::decode(0b1111111 | (1 << 7) | (1 << 40)), full);
        assert_eq!(full.len(), 7);
    }

    #[test]
    fn test_from_date() {
        // 2024-01-03 was a Wednesday, 2024-01-07 a Sunday.
        let wed = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let sun = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(WeekDay::from_date(wed), WeekDay::Wednesday);
        assert_eq!(WeekDay::from_date(sun), WeekDay::Sunday);
    }
}
