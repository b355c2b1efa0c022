use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Relative date literals that stand alone, e.g. `TODAY` or `LAST_FISCAL_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelativeDate {
    Today,
    Yesterday,
    Tomorrow,
    ThisWeek,
    LastWeek,
    NextWeek,
    ThisMonth,
    LastMonth,
    NextMonth,
    #[serde(rename = "LAST_90_DAYS")]
    Last90Days,
    #[serde(rename = "NEXT_90_DAYS")]
    Next90Days,
    ThisQuarter,
    LastQuarter,
    NextQuarter,
    ThisYear,
    LastYear,
    NextYear,
    ThisFiscalQuarter,
    LastFiscalQuarter,
    NextFiscalQuarter,
    ThisFiscalYear,
    LastFiscalYear,
    NextFiscalYear,
}

impl RelativeDate {
    pub const ALL: [RelativeDate; 23] = [
        RelativeDate::Today,
        RelativeDate::Yesterday,
        RelativeDate::Tomorrow,
        RelativeDate::ThisWeek,
        RelativeDate::LastWeek,
        RelativeDate::NextWeek,
        RelativeDate::ThisMonth,
        RelativeDate::LastMonth,
        RelativeDate::NextMonth,
        RelativeDate::Last90Days,
        RelativeDate::Next90Days,
        RelativeDate::ThisQuarter,
        RelativeDate::LastQuarter,
        RelativeDate::NextQuarter,
        RelativeDate::ThisYear,
        RelativeDate::LastYear,
        RelativeDate::NextYear,
        RelativeDate::ThisFiscalQuarter,
        RelativeDate::LastFiscalQuarter,
        RelativeDate::NextFiscalQuarter,
        RelativeDate::ThisFiscalYear,
        RelativeDate::LastFiscalYear,
        RelativeDate::NextFiscalYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeDate::Today => "TODAY",
            RelativeDate::Yesterday => "YESTERDAY",
            RelativeDate::Tomorrow => "TOMORROW",
            RelativeDate::ThisWeek => "THIS_WEEK",
            RelativeDate::LastWeek => "LAST_WEEK",
            RelativeDate::NextWeek => "NEXT_WEEK",
            RelativeDate::ThisMonth => "THIS_MONTH",
            RelativeDate::LastMonth => "LAST_MONTH",
            RelativeDate::NextMonth => "NEXT_MONTH",
            RelativeDate::Last90Days => "LAST_90_DAYS",
            RelativeDate::Next90Days => "NEXT_90_DAYS",
            RelativeDate::ThisQuarter => "THIS_QUARTER",
            RelativeDate::LastQuarter => "LAST_QUARTER",
            RelativeDate::NextQuarter => "NEXT_QUARTER",
            RelativeDate::ThisYear => "THIS_YEAR",
            RelativeDate::LastYear => "LAST_YEAR",
            RelativeDate::NextYear => "NEXT_YEAR",
            RelativeDate::ThisFiscalQuarter => "THIS_FISCAL_QUARTER",
            RelativeDate::LastFiscalQuarter => "LAST_FISCAL_QUARTER",
            RelativeDate::NextFiscalQuarter => "NEXT_FISCAL_QUARTER",
            RelativeDate::ThisFiscalYear => "THIS_FISCAL_YEAR",
            RelativeDate::LastFiscalYear => "LAST_FISCAL_YEAR",
            RelativeDate::NextFiscalYear => "NEXT_FISCAL_YEAR",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|date| date.as_str().eq_ignore_ascii_case(name))
    }
}

impl Display for RelativeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative date literals that take a count, written `KIND:n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelativeDateRange {
    LastNDays,
    NextNDays,
    NDaysAgo,
    LastNWeeks,
    NextNWeeks,
    NWeeksAgo,
    LastNMonths,
    NextNMonths,
    NMonthsAgo,
    LastNQuarters,
    NextNQuarters,
    NQuartersAgo,
    LastNYears,
    NextNYears,
    NYearsAgo,
    LastNFiscalQuarters,
    NextNFiscalQuarters,
    NFiscalQuartersAgo,
    LastNFiscalYears,
    NextNFiscalYears,
    NFiscalYearsAgo,
}

impl RelativeDateRange {
    pub const ALL: [RelativeDateRange; 21] = [
        RelativeDateRange::LastNDays,
        RelativeDateRange::NextNDays,
        RelativeDateRange::NDaysAgo,
        RelativeDateRange::LastNWeeks,
        RelativeDateRange::NextNWeeks,
        RelativeDateRange::NWeeksAgo,
        RelativeDateRange::LastNMonths,
        RelativeDateRange::NextNMonths,
        RelativeDateRange::NMonthsAgo,
        RelativeDateRange::LastNQuarters,
        RelativeDateRange::NextNQuarters,
        RelativeDateRange::NQuartersAgo,
        RelativeDateRange::LastNYears,
        RelativeDateRange::NextNYears,
        RelativeDateRange::NYearsAgo,
        RelativeDateRange::LastNFiscalQuarters,
        RelativeDateRange::NextNFiscalQuarters,
        RelativeDateRange::NFiscalQuartersAgo,
        RelativeDateRange::LastNFiscalYears,
        RelativeDateRange::NextNFiscalYears,
        RelativeDateRange::NFiscalYearsAgo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeDateRange::LastNDays => "LAST_N_DAYS",
            RelativeDateRange::NextNDays => "NEXT_N_DAYS",
            RelativeDateRange::NDaysAgo => "N_DAYS_AGO",
            RelativeDateRange::LastNWeeks => "LAST_N_WEEKS",
            RelativeDateRange::NextNWeeks => "NEXT_N_WEEKS",
            RelativeDateRange::NWeeksAgo => "N_WEEKS_AGO",
            RelativeDateRange::LastNMonths => "LAST_N_MONTHS",
            RelativeDateRange::NextNMonths => "NEXT_N_MONTHS",
            RelativeDateRange::NMonthsAgo => "N_MONTHS_AGO",
            RelativeDateRange::LastNQuarters => "LAST_N_QUARTERS",
            RelativeDateRange::NextNQuarters => "NEXT_N_QUARTERS",
            RelativeDateRange::NQuartersAgo => "N_QUARTERS_AGO",
            RelativeDateRange::LastNYears => "LAST_N_YEARS",
            RelativeDateRange::NextNYears => "NEXT_N_YEARS",
            RelativeDateRange::NYearsAgo => "N_YEARS_AGO",
            RelativeDateRange::LastNFiscalQuarters => "LAST_N_FISCAL_QUARTERS",
            RelativeDateRange::NextNFiscalQuarters => "NEXT_N_FISCAL_QUARTERS",
            RelativeDateRange::NFiscalQuartersAgo => "N_FISCAL_QUARTERS_AGO",
            RelativeDateRange::LastNFiscalYears => "LAST_N_FISCAL_YEARS",
            RelativeDateRange::NextNFiscalYears => "NEXT_N_FISCAL_YEARS",
            RelativeDateRange::NFiscalYearsAgo => "N_FISCAL_YEARS_AGO",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|range| range.as_str().eq_ignore_ascii_case(name))
    }

    /// True when `word` starts like one of the counted forms.
    pub fn is_prefix_of(word: &str) -> bool {
        let word = word.to_ascii_uppercase();
        Self::ALL.iter().any(|range| word.starts_with(range.as_str()))
    }
}

impl Display for RelativeDateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DateLiteral {
    Fixed { value: RelativeDate },
    Dynamic { kind: RelativeDateRange, n: u32 },
}

impl DateLiteral {
    /// Parses `TODAY`-style or `LAST_N_DAYS:7`-style text.
    pub fn from_word(word: &str) -> Result<Self, String> {
        if let Some(value) = RelativeDate::from_name(word) {
            return Ok(DateLiteral::Fixed { value });
        }

        let invalid = || format!("Invalid date literal: {}", word);

        let (kind, n) = word.split_once(':').ok_or_else(invalid)?;
        let kind = RelativeDateRange::from_name(kind).ok_or_else(invalid)?;
        let n = n.parse::<u32>().map_err(|_| invalid())?;

        Ok(DateLiteral::Dynamic { kind, n })
    }
}

impl Display for DateLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLiteral::Fixed { value } => write!(f, "{}", value),
            DateLiteral::Dynamic { kind, n } => write!(f, "{}:{}", kind, n),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{DateLiteral, RelativeDate, RelativeDateRange};

    #[test]
    pub fn test_fixed() {
        assert_eq!(DateLiteral::from_word("today"), Ok(DateLiteral::Fixed { value: RelativeDate::Today }));
        assert_eq!(
            DateLiteral::from_word("LAST_90_DAYS"),
            Ok(DateLiteral::Fixed { value: RelativeDate::Last90Days })
        );
    }

    #[test]
    pub fn test_dynamic() {
        assert_eq!(
            DateLiteral::from_word("LAST_N_DAYS:30"),
            Ok(DateLiteral::Dynamic { kind: RelativeDateRange::LastNDays, n: 30 })
        );
        assert_eq!(
            DateLiteral::from_word("n_fiscal_quarters_ago:2"),
            Ok(DateLiteral::Dynamic { kind: RelativeDateRange::NFiscalQuartersAgo, n: 2 })
        );
    }

    #[test]
    pub fn test_dynamic_invalid() {
        for word in ["LAST_N_DAYS:x", "LAST_N_DAYS", "LAST_N_DAYS:", "LAST_N_DAYS:-1", "LAST_N_DAYSX:3"] {
            assert_eq!(DateLiteral::from_word(word), Err(format!("Invalid date literal: {}", word)));
        }
    }

    #[test]
    pub fn test_prefix() {
        assert!(RelativeDateRange::is_prefix_of("next_n_weeks:4"));
        assert!(RelativeDateRange::is_prefix_of("LAST_N_DAYSX"));
        assert!(!RelativeDateRange::is_prefix_of("LAST_WEEK"));
    }

    #[test]
    pub fn test_display() {
        assert_eq!(DateLiteral::Dynamic { kind: RelativeDateRange::NYearsAgo, n: 3 }.to_string(), "N_YEARS_AGO:3");
        assert_eq!(DateLiteral::Fixed { value: RelativeDate::NextFiscalYear }.to_string(), "NEXT_FISCAL_YEAR");
    }

    #[test]
    pub fn test_serde_names_match_display() {
        for value in RelativeDate::ALL {
            assert_eq!(serde_json::to_value(value).unwrap(), serde_json::json!(value.as_str()));
        }
        for kind in RelativeDateRange::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), serde_json::json!(kind.as_str()));
        }
    }
}
