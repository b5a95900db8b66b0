use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A calendar month, named in French as missions are recorded.
///
/// Variants are declared in calendar order, so the derived `Ord`
/// is chronological within a year.
///
/// # Examples
///
/// ```
/// use cascade_engine::core::period::Month;
///
/// let m: Month = "février".parse().unwrap();
/// assert_eq!(m, Month::Fevrier);
/// assert_eq!(m.index(), 1);
/// assert_eq!(m.to_string(), "février");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Month {
    Janvier,
    Fevrier,
    Mars,
    Avril,
    Mai,
    Juin,
    Juillet,
    Aout,
    Septembre,
    Octobre,
    Novembre,
    Decembre,
}

/// Errors arising from month-name parsing.
#[derive(Debug, Error)]
pub enum MonthParseError {
    #[error("unknown month name: {0:?}")]
    UnknownName(String),
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Janvier,
        Month::Fevrier,
        Month::Mars,
        Month::Avril,
        Month::Mai,
        Month::Juin,
        Month::Juillet,
        Month::Aout,
        Month::Septembre,
        Month::Octobre,
        Month::Novembre,
        Month::Decembre,
    ];

    /// Zero-based calendar index (janvier = 0, décembre = 11).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Month for a zero-based calendar index.
    pub fn from_index(index: usize) -> Option<Month> {
        Month::ALL.get(index).copied()
    }

    /// The French display name, lowercase with accents.
    pub fn name(&self) -> &'static str {
        match self {
            Month::Janvier => "janvier",
            Month::Fevrier => "février",
            Month::Mars => "mars",
            Month::Avril => "avril",
            Month::Mai => "mai",
            Month::Juin => "juin",
            Month::Juillet => "juillet",
            Month::Aout => "août",
            Month::Septembre => "septembre",
            Month::Octobre => "octobre",
            Month::Novembre => "novembre",
            Month::Decembre => "décembre",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lowercase and fold the accented characters that occur in French
/// month names, so "Février", "février" and "fevrier" all match.
fn fold_name(s: &str) -> String {
    s.trim()
        .chars()
        .flat_map(|c| c.to_lowercase())
        .map(|c| match c {
            'é' | 'è' | 'ê' => 'e',
            'û' | 'ù' => 'u',
            'à' | 'â' => 'a',
            'î' => 'i',
            'ô' => 'o',
            _ => c,
        })
        .collect()
}

impl FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_name(s).as_str() {
            "janvier" => Ok(Month::Janvier),
            "fevrier" => Ok(Month::Fevrier),
            "mars" => Ok(Month::Mars),
            "avril" => Ok(Month::Avril),
            "mai" => Ok(Month::Mai),
            "juin" => Ok(Month::Juin),
            "juillet" => Ok(Month::Juillet),
            "aout" => Ok(Month::Aout),
            "septembre" => Ok(Month::Septembre),
            "octobre" => Ok(Month::Octobre),
            "novembre" => Ok(Month::Novembre),
            "decembre" => Ok(Month::Decembre),
            _ => Err(MonthParseError::UnknownName(s.to_string())),
        }
    }
}

impl From<Month> for String {
    fn from(m: Month) -> String {
        m.name().to_string()
    }
}

impl TryFrom<String> for Month {
    type Error = MonthParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// An aggregation period: a year, optionally narrowed to one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub annee: i32,
    pub mois: Option<Month>,
}

impl Period {
    /// A full calendar year.
    pub fn year(annee: i32) -> Self {
        Self { annee, mois: None }
    }

    /// A single month of a year.
    pub fn month(annee: i32, mois: Month) -> Self {
        Self {
            annee,
            mois: Some(mois),
        }
    }

    /// Whether a record dated (`annee`, `mois`) falls inside this period.
    pub fn contains(&self, annee: i32, mois: Month) -> bool {
        self.annee == annee && self.mois.map_or(true, |m| m == mois)
    }
}

/// A chronologically ordered (year, month) bucket key for rollups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub annee: i32,
    pub mois: Month,
}

impl MonthKey {
    pub fn new(annee: i32, mois: Month) -> Self {
        Self { annee, mois }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mois, self.annee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accented_and_plain() {
        assert_eq!("février".parse::<Month>().unwrap(), Month::Fevrier);
        assert_eq!("Fevrier".parse::<Month>().unwrap(), Month::Fevrier);
        assert_eq!("AOÛT".parse::<Month>().unwrap(), Month::Aout);
        assert_eq!("decembre".parse::<Month>().unwrap(), Month::Decembre);
    }

    #[test]
    fn test_parse_unknown() {
        assert!("brumaire".parse::<Month>().is_err());
    }

    #[test]
    fn test_index_round_trip() {
        for (i, m) in Month::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
            assert_eq!(Month::from_index(i), Some(*m));
        }
        assert_eq!(Month::from_index(12), None);
    }

    #[test]
    fn test_month_ordering_is_chronological() {
        assert!(Month::Janvier < Month::Fevrier);
        assert!(Month::Novembre < Month::Decembre);
    }

    #[test]
    fn test_month_key_ordering() {
        let dec_2024 = MonthKey::new(2024, Month::Decembre);
        let jan_2025 = MonthKey::new(2025, Month::Janvier);
        assert!(dec_2024 < jan_2025);
    }

    #[test]
    fn test_period_contains() {
        let year = Period::year(2025);
        assert!(year.contains(2025, Month::Mars));
        assert!(!year.contains(2024, Month::Mars));

        let march = Period::month(2025, Month::Mars);
        assert!(march.contains(2025, Month::Mars));
        assert!(!march.contains(2025, Month::Avril));
    }

    #[test]
    fn test_month_serde_uses_french_names() {
        let json = serde_json::to_string(&Month::Aout).unwrap();
        assert_eq!(json, "\"août\"");
        let parsed: Month = serde_json::from_str("\"fevrier\"").unwrap();
        assert_eq!(parsed, Month::Fevrier);
    }
}
