//! Birth date to zodiac sign lookup.
//!
//! The table holds the twelve Western tropical signs with their Turkish names,
//! in calendar order starting from Kova (Aquarius). Capricorn (Oğlak) wraps
//! across the year boundary.
//!
//! ## Matching rule
//!
//! A range matches when the month equals its start month and the day is on or
//! after the start day, or the month equals its end month and the day is on or
//! before the end day. The first matching range in table order wins. Months
//! strictly between start and end are never matched; every range here spans
//! two adjacent months so no real date falls through, but the rule itself is
//! kept as is rather than replaced with a continuous date comparison. Adjacent
//! ranges do not overlap: each sign starts the day after the previous one ends
//! (Boğa ends on 20 May, İkizler starts on 21 May), so every day from 1 to 31
//! of every month matches exactly one range.

use std::fmt;

use crate::form::FormFields;

/// The twelve zodiac signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZodiacSign {
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
}

impl ZodiacSign {
    /// Turkish name shown on screen.
    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aquarius => "Kova",
            ZodiacSign::Pisces => "Balık",
            ZodiacSign::Aries => "Koç",
            ZodiacSign::Taurus => "Boğa",
            ZodiacSign::Gemini => "İkizler",
            ZodiacSign::Cancer => "Yengeç",
            ZodiacSign::Leo => "Aslan",
            ZodiacSign::Virgo => "Başak",
            ZodiacSign::Libra => "Terazi",
            ZodiacSign::Scorpio => "Akrep",
            ZodiacSign::Sagittarius => "Yay",
            ZodiacSign::Capricorn => "Oğlak",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One sign's date range, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZodiacRange {
    pub sign: ZodiacSign,
    pub start_month: u32,
    pub start_day: u32,
    pub end_month: u32,
    pub end_day: u32,
}

impl ZodiacRange {
    const fn new(
        sign: ZodiacSign,
        start_month: u32,
        start_day: u32,
        end_month: u32,
        end_day: u32,
    ) -> Self {
        Self {
            sign,
            start_month,
            start_day,
            end_month,
            end_day,
        }
    }

    /// Two-clause test against the start and end month only.
    pub fn matches(&self, day: u32, month: u32) -> bool {
        (month == self.start_month && day >= self.start_day)
            || (month == self.end_month && day <= self.end_day)
    }
}

/// The lookup table, in matching order.
pub const ZODIAC_TABLE: [ZodiacRange; 12] = [
    ZodiacRange::new(ZodiacSign::Aquarius, 1, 20, 2, 18),
    ZodiacRange::new(ZodiacSign::Pisces, 2, 19, 3, 20),
    ZodiacRange::new(ZodiacSign::Aries, 3, 21, 4, 19),
    ZodiacRange::new(ZodiacSign::Taurus, 4, 20, 5, 20),
    ZodiacRange::new(ZodiacSign::Gemini, 5, 21, 6, 20),
    ZodiacRange::new(ZodiacSign::Cancer, 6, 21, 7, 22),
    ZodiacRange::new(ZodiacSign::Leo, 7, 23, 8, 22),
    ZodiacRange::new(ZodiacSign::Virgo, 8, 23, 9, 22),
    ZodiacRange::new(ZodiacSign::Libra, 9, 23, 10, 22),
    ZodiacRange::new(ZodiacSign::Scorpio, 10, 23, 11, 21),
    ZodiacRange::new(ZodiacSign::Sagittarius, 11, 22, 12, 21),
    ZodiacRange::new(ZodiacSign::Capricorn, 12, 22, 1, 19),
];

/// Resolve the sign for a day and month.
///
/// Returns `None` when no range matches (e.g. month 13); out-of-range days
/// are not rejected here, only compared.
pub fn resolve(day: u32, month: u32) -> Option<ZodiacSign> {
    ZODIAC_TABLE
        .iter()
        .find(|range| range.matches(day, month))
        .map(|range| range.sign)
}

/// Resolve the sign from raw form text.
///
/// Requires year, month and day to be filled in; the year itself does not
/// influence the result. Unparseable month or day yields `None`.
pub fn resolve_fields(fields: &FormFields) -> Option<ZodiacSign> {
    if !fields.has_birth_date() {
        return None;
    }
    resolve(fields.day()?, fields.month()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_days() {
        assert_eq!(resolve(19, 5), Some(ZodiacSign::Taurus));
        assert_eq!(resolve(20, 5), Some(ZodiacSign::Taurus));
        assert_eq!(resolve(21, 5), Some(ZodiacSign::Gemini));
        assert_eq!(resolve(20, 1), Some(ZodiacSign::Aquarius));
        assert_eq!(resolve(18, 2), Some(ZodiacSign::Aquarius));
    }

    #[test]
    fn test_capricorn_wraps_year() {
        assert_eq!(resolve(1, 1), Some(ZodiacSign::Capricorn));
        assert_eq!(resolve(19, 1), Some(ZodiacSign::Capricorn));
        assert_eq!(resolve(22, 12), Some(ZodiacSign::Capricorn));
        assert_eq!(resolve(31, 12), Some(ZodiacSign::Capricorn));
        assert_eq!(resolve(21, 12), Some(ZodiacSign::Sagittarius));
    }

    #[test]
    fn test_february_29_hits_pisces_start_clause() {
        assert_eq!(resolve(29, 2), Some(ZodiacSign::Pisces));
    }

    #[test]
    fn test_adjacent_ranges_do_not_overlap() {
        for (index, range) in ZODIAC_TABLE.iter().enumerate() {
            let next = ZODIAC_TABLE[(index + 1) % ZODIAC_TABLE.len()];
            assert_eq!(next.start_month, range.end_month, "{}", range.sign);
            assert_eq!(next.start_day, range.end_day + 1, "{}", range.sign);
        }

        for month in 1..=12 {
            for day in 1..=31 {
                let hits = ZODIAC_TABLE
                    .iter()
                    .filter(|range| range.matches(day, month))
                    .count();
                assert_eq!(hits, 1, "{}/{}", day, month);
            }
        }

        assert_eq!(resolve(18, 2), Some(ZodiacSign::Aquarius));
        assert_eq!(resolve(19, 2), Some(ZodiacSign::Pisces));
        assert_eq!(resolve(20, 3), Some(ZodiacSign::Pisces));
        assert_eq!(resolve(21, 3), Some(ZodiacSign::Aries));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(resolve(1, 13), None);
        assert_eq!(resolve(10, 0), None);
    }

    #[test]
    fn test_turkish_names() {
        assert_eq!(ZodiacSign::Gemini.to_string(), "İkizler");
        assert_eq!(ZodiacSign::Capricorn.name(), "Oğlak");
        assert_eq!(ZodiacSign::Taurus.name(), "Boğa");
    }

    #[test]
    fn test_resolve_fields_requires_all_date_parts() {
        let mut fields = FormFields::new("Ayşe", "Kara", "", "5", "21");
        assert_eq!(resolve_fields(&fields), None);

        fields.birth_year = "1990".to_string();
        assert_eq!(resolve_fields(&fields), Some(ZodiacSign::Gemini));

        fields.birth_day = "xx".to_string();
        assert_eq!(resolve_fields(&fields), None);
    }

    #[test]
    fn test_year_does_not_change_result() {
        let a = FormFields::new("", "", "1990", "8", "1");
        let b = FormFields::new("", "", "2024", "8", "1");
        assert_eq!(resolve_fields(&a), resolve_fields(&b));
        assert_eq!(resolve_fields(&a), Some(ZodiacSign::Leo));
    }
}
