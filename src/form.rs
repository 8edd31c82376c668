//! Form fields and the validation that gates the fingerprint press target.
//!
//! Validation never fails with an error: text that does not parse as a number
//! simply makes the corresponding field invalid. The day check accepts any day
//! from 1 to 31 regardless of month (31 February passes). That simplification
//! is kept on purpose; do not tighten it to real month lengths.

use crate::constants::*;

/// Identifies one of the five input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Surname,
    BirthYear,
    BirthMonth,
    BirthDay,
}

impl Field {
    /// Fields in screen order.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Surname,
        Field::BirthYear,
        Field::BirthMonth,
        Field::BirthDay,
    ];

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Name => NAME_PLACEHOLDER,
            Field::Surname => SURNAME_PLACEHOLDER,
            Field::BirthYear => YEAR_PLACEHOLDER,
            Field::BirthMonth => MONTH_PLACEHOLDER,
            Field::BirthDay => DAY_PLACEHOLDER,
        }
    }

    /// Whether the input widget only lets digits through.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::BirthYear | Field::BirthMonth | Field::BirthDay)
    }

    /// Maximum number of characters the input widget accepts, if limited.
    pub fn max_length(&self) -> Option<usize> {
        match self {
            Field::Name | Field::Surname => None,
            Field::BirthYear => Some(BIRTH_YEAR_LENGTH),
            Field::BirthMonth => Some(BIRTH_MONTH_MAX_LENGTH),
            Field::BirthDay => Some(BIRTH_DAY_MAX_LENGTH),
        }
    }

    pub fn next(&self) -> Field {
        let index = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Field {
        let index = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Raw text of the five form inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub surname: String,
    pub birth_year: String,
    pub birth_month: String,
    pub birth_day: String,
}

impl FormFields {
    pub fn new(
        name: &str,
        surname: &str,
        birth_year: &str,
        birth_month: &str,
        birth_day: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            surname: surname.to_string(),
            birth_year: birth_year.to_string(),
            birth_month: birth_month.to_string(),
            birth_day: birth_day.to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Surname => &self.surname,
            Field::BirthYear => &self.birth_year,
            Field::BirthMonth => &self.birth_month,
            Field::BirthDay => &self.birth_day,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Surname => &mut self.surname,
            Field::BirthYear => &mut self.birth_year,
            Field::BirthMonth => &mut self.birth_month,
            Field::BirthDay => &mut self.birth_day,
        }
    }

    /// Replace a field's text after passing it through the widget filter.
    pub fn set(&mut self, field: Field, value: &str) {
        *self.get_mut(field) = filter_input(field, value);
    }

    /// Append one typed character, honoring the widget filter.
    ///
    /// Returns `false` when the character was rejected.
    pub fn push_char(&mut self, field: Field, c: char) -> bool {
        if c.is_control() || (field.is_numeric() && !c.is_ascii_digit()) {
            return false;
        }
        let value = self.get_mut(field);
        if let Some(max) = field.max_length() {
            if value.chars().count() >= max {
                return false;
            }
        }
        value.push(c);
        true
    }

    /// Remove the last character of a field.
    pub fn pop_char(&mut self, field: Field) -> bool {
        self.get_mut(field).pop().is_some()
    }

    /// Parsed birth month, if the text is a number.
    pub fn month(&self) -> Option<u32> {
        parse_number(&self.birth_month)
    }

    /// Parsed birth day, if the text is a number.
    pub fn day(&self) -> Option<u32> {
        parse_number(&self.birth_day)
    }

    /// True once year, month and day all contain something.
    pub fn has_birth_date(&self) -> bool {
        !self.birth_year.is_empty() && !self.birth_month.is_empty() && !self.birth_day.is_empty()
    }
}

/// Apply the input widget rules: digits only for date fields, length caps.
pub fn filter_input(field: Field, value: &str) -> String {
    let filtered = value
        .chars()
        .filter(|c| !c.is_control())
        .filter(|c| !field.is_numeric() || c.is_ascii_digit());
    match field.max_length() {
        Some(max) => filtered.take(max).collect(),
        None => filtered.collect(),
    }
}

fn parse_number(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok()
}

/// Per-field validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormCheck {
    pub name: bool,
    pub surname: bool,
    pub birth_year: bool,
    pub birth_month: bool,
    pub birth_day: bool,
}

impl FormCheck {
    pub fn is_valid(&self) -> bool {
        self.name && self.surname && self.birth_year && self.birth_month && self.birth_day
    }

    pub fn field(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name,
            Field::Surname => self.surname,
            Field::BirthYear => self.birth_year,
            Field::BirthMonth => self.birth_month,
            Field::BirthDay => self.birth_day,
        }
    }

    /// Fields that currently fail validation, in screen order.
    pub fn invalid_fields(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|f| !self.field(*f))
            .collect()
    }
}

/// Check every field individually.
pub fn check(fields: &FormFields) -> FormCheck {
    FormCheck {
        name: fields.name.chars().count() >= MINIMUM_NAME_LENGTH,
        surname: fields.surname.chars().count() >= MINIMUM_NAME_LENGTH,
        birth_year: fields.birth_year.chars().count() == BIRTH_YEAR_LENGTH
            && fields.birth_year.chars().all(|c| c.is_ascii_digit()),
        birth_month: fields
            .month()
            .is_some_and(|m| (MINIMUM_MONTH..=MAXIMUM_MONTH).contains(&m)),
        // Any month may have up to 31 days here.
        birth_day: fields
            .day()
            .is_some_and(|d| (MINIMUM_DAY..=MAXIMUM_DAY).contains(&d)),
    }
}

/// Whether the press target should be enabled for these fields.
pub fn validate(fields: &FormFields) -> bool {
    check(fields).is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test_constants::*;

    fn valid_fields() -> FormFields {
        FormFields::new(TEST_NAME, TEST_SURNAME, TEST_YEAR, TEST_MONTH, TEST_DAY)
    }

    #[test]
    fn test_valid_form() {
        assert!(validate(&valid_fields()));
    }

    #[test]
    fn test_short_name_rejected() {
        let mut fields = valid_fields();
        fields.name = "Ay".to_string();
        assert!(!validate(&fields));

        let mut fields = valid_fields();
        fields.surname = "Ka".to_string();
        assert!(!validate(&fields));
    }

    #[test]
    fn test_name_length_counts_characters() {
        // three characters, five bytes
        let mut fields = valid_fields();
        fields.name = "Işı".to_string();
        assert!(check(&fields).name);
    }

    #[test]
    fn test_month_bounds() {
        for (month, expected) in [("0", false), ("1", true), ("12", true), ("13", false)] {
            let mut fields = valid_fields();
            fields.birth_month = month.to_string();
            assert_eq!(validate(&fields), expected, "month {}", month);
        }
    }

    #[test]
    fn test_non_numeric_month_and_day_are_invalid() {
        let mut fields = valid_fields();
        fields.birth_month = "abc".to_string();
        assert!(!validate(&fields));

        let mut fields = valid_fields();
        fields.birth_day = "".to_string();
        assert!(!validate(&fields));
    }

    #[test]
    fn test_day_not_checked_against_month_length() {
        let mut fields = valid_fields();
        fields.birth_month = "2".to_string();
        fields.birth_day = "31".to_string();
        assert!(validate(&fields));

        fields.birth_day = "32".to_string();
        assert!(!validate(&fields));
    }

    #[test]
    fn test_year_requires_four_digits() {
        for (year, expected) in [("1990", true), ("990", false), ("19a0", false), ("19900", false)] {
            let mut fields = valid_fields();
            fields.birth_year = year.to_string();
            assert_eq!(check(&fields).birth_year, expected, "year {}", year);
        }
    }

    #[test]
    fn test_invalid_fields_listing() {
        let fields = FormFields::new("Ay", TEST_SURNAME, "19", "13", TEST_DAY);
        assert_eq!(
            check(&fields).invalid_fields(),
            vec![Field::Name, Field::BirthYear, Field::BirthMonth]
        );
    }

    #[test]
    fn test_numeric_filter_and_max_length() {
        let mut fields = FormFields::default();
        assert!(fields.push_char(Field::BirthMonth, '1'));
        assert!(!fields.push_char(Field::BirthMonth, 'x'));
        assert!(fields.push_char(Field::BirthMonth, '2'));
        assert!(!fields.push_char(Field::BirthMonth, '3'));
        assert_eq!(fields.birth_month, "12");

        fields.set(Field::BirthYear, "19a90x5");
        assert_eq!(fields.birth_year, "1990");

        fields.set(Field::Name, "Ayşe Nur");
        assert_eq!(fields.name, "Ayşe Nur");
    }

    #[test]
    fn test_field_navigation_wraps() {
        assert_eq!(Field::Name.next(), Field::Surname);
        assert_eq!(Field::BirthDay.next(), Field::Name);
        assert_eq!(Field::Name.previous(), Field::BirthDay);
    }
}
