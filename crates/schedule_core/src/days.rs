use std::fmt;

use serde::{Deserialize, Serialize};

/// A meeting day, using the registrar's single-letter codes (`R` is Thursday,
/// `U` is Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "M")]
    Monday,
    #[serde(rename = "T")]
    Tuesday,
    #[serde(rename = "W")]
    Wednesday,
    #[serde(rename = "R")]
    Thursday,
    #[serde(rename = "F")]
    Friday,
    #[serde(rename = "S")]
    Saturday,
    #[serde(rename = "U")]
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Days that get a column on the calendar grid.
    pub const WEEKDAYS: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn letter(self) -> char {
        match self {
            Day::Monday => 'M',
            Day::Tuesday => 'T',
            Day::Wednesday => 'W',
            Day::Thursday => 'R',
            Day::Friday => 'F',
            Day::Saturday => 'S',
            Day::Sunday => 'U',
        }
    }

    pub fn from_letter(letter: char) -> Option<Day> {
        match letter.to_ascii_uppercase() {
            'M' => Some(Day::Monday),
            'T' => Some(Day::Tuesday),
            'W' => Some(Day::Wednesday),
            'R' => Some(Day::Thursday),
            'F' => Some(Day::Friday),
            'S' => Some(Day::Saturday),
            'U' => Some(Day::Sunday),
            _ => None,
        }
    }

    pub fn is_weekday(self) -> bool {
        !matches!(self, Day::Saturday | Day::Sunday)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Set of meeting days. Iterates and prints in week order (`MTWRFSU`)
/// regardless of the order the letters appeared in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Days(u8);

impl Days {
    pub fn empty() -> Self {
        Days(0)
    }

    /// Parses a day line such as `"TR"` or `"M W F"`.
    ///
    /// Returns `None` unless every non-space character is a day letter, so
    /// placeholders like `TBA` or `ARR` do not turn into phantom meetings.
    pub fn parse_strict(line: &str) -> Option<Days> {
        let mut days = Days::empty();
        let mut seen_any = false;
        for ch in line.chars().filter(|c| !c.is_whitespace()) {
            if !ch.is_ascii_uppercase() {
                return None;
            }
            days.insert(Day::from_letter(ch)?);
            seen_any = true;
        }
        seen_any.then_some(days)
    }

    /// Collects every day letter in `text`, ignoring anything else.
    pub fn parse_lenient(text: &str) -> Days {
        text.chars().filter_map(Day::from_letter).collect()
    }

    pub fn insert(&mut self, day: Day) {
        self.0 |= day.bit();
    }

    pub fn contains(self, day: Day) -> bool {
        self.0 & day.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Day> {
        Day::ALL.into_iter().filter(move |day| self.contains(*day))
    }

    pub fn weekend(self) -> Days {
        self.iter().filter(|day| !day.is_weekday()).collect()
    }
}

impl FromIterator<Day> for Days {
    fn from_iter<I: IntoIterator<Item = Day>>(iter: I) -> Self {
        let mut days = Days::empty();
        for day in iter {
            days.insert(day);
        }
        days
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.iter() {
            write!(f, "{}", day.letter())?;
        }
        Ok(())
    }
}

impl From<Days> for String {
    fn from(days: Days) -> Self {
        days.to_string()
    }
}

impl From<String> for Days {
    fn from(text: String) -> Self {
        Days::parse_lenient(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_parse_rejects_placeholders() {
        assert_eq!(Days::parse_strict("TBA"), None);
        assert_eq!(Days::parse_strict("ARR"), None);
        assert_eq!(Days::parse_strict(""), None);
        assert_eq!(Days::parse_strict("mw"), None);
    }

    #[test]
    fn days_print_in_week_order() {
        let days = Days::parse_strict("F M W").unwrap();
        assert_eq!(days.to_string(), "MWF");
        assert_eq!(days.iter().count(), 3);
    }

    #[test]
    fn repeated_letters_collapse() {
        assert_eq!(Days::parse_strict("TTR").unwrap().to_string(), "TR");
    }

    #[test]
    fn weekend_subset() {
        let days = Days::parse_strict("MSU").unwrap();
        assert_eq!(days.weekend().to_string(), "SU");
        assert!(Days::parse_strict("TR").unwrap().weekend().is_empty());
    }
}
