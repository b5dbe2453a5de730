//! Locale bundles and calendar labels.
//!
//! A bundle is parsed from one JSON resource document and validated once.
//! Calendar labels must be complete at load time: twelve months, eight
//! weekday slots (index 0 and 7 both Sunday) and a day/hour/minute unit
//! triple. UI strings may be incomplete; gaps are covered by the reference
//! bundle at lookup time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{L10nError, Result};
use crate::guide::{GuideSection, UserGuideDocument};

/// Number of month entries per list.
pub const MONTH_COUNT: usize = 12;
/// Number of weekday slots per list (Sunday twice).
pub const WEEKDAY_SLOTS: usize = 8;

/// Month name length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthForm {
    Full,
    Short,
}

/// Weekday name length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekdayForm {
    /// Full name ("Monday").
    Full,
    /// Three letters ("Mon").
    Long,
    /// Two letters ("Mo").
    Medium,
    /// One letter ("M").
    Short,
}

/// First column of a week view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FirstDay {
    Sunday,
    #[default]
    Monday,
}

/// Day, hour and minute abbreviations used in duration displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationUnits {
    pub day: String,
    pub hour: String,
    pub minute: String,
}

/// Raw calendar lists as they appear in a resource document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarSource {
    pub months: Vec<String>,
    pub months_short: Vec<String>,
    pub weekdays: Vec<String>,
    pub weekdays_long: Vec<String>,
    pub weekdays_medium: Vec<String>,
    pub weekdays_short: Vec<String>,
    pub duration_units: Vec<String>,
}

/// Validated month, weekday and duration labels for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarLabels {
    pub months: [String; MONTH_COUNT],
    pub months_short: [String; MONTH_COUNT],
    pub weekdays: [String; WEEKDAY_SLOTS],
    pub weekdays_long: [String; WEEKDAY_SLOTS],
    pub weekdays_medium: [String; WEEKDAY_SLOTS],
    pub weekdays_short: [String; WEEKDAY_SLOTS],
    pub duration_units: DurationUnits,
}

impl CalendarLabels {
    /// Validate raw lists for `locale`.
    pub fn from_source(locale: &str, source: CalendarSource) -> Result<Self> {
        let weekdays = weekday_list(locale, "weekdays", source.weekdays)?;
        let weekdays_long = weekday_list(locale, "weekdays_long", source.weekdays_long)?;
        let weekdays_medium = weekday_list(locale, "weekdays_medium", source.weekdays_medium)?;
        let weekdays_short = weekday_list(locale, "weekdays_short", source.weekdays_short)?;
        let [day, hour, minute] = fixed::<3>(locale, "duration_units", source.duration_units)?;

        Ok(Self {
            months: fixed(locale, "months", source.months)?,
            months_short: fixed(locale, "months_short", source.months_short)?,
            weekdays,
            weekdays_long,
            weekdays_medium,
            weekdays_short,
            duration_units: DurationUnits { day, hour, minute },
        })
    }

    /// Month name for `month` in `1..=12`.
    #[must_use]
    pub fn month(&self, month: usize, form: MonthForm) -> Option<&str> {
        let list = match form {
            MonthForm::Full => &self.months,
            MonthForm::Short => &self.months_short,
        };
        month
            .checked_sub(1)
            .and_then(|idx| list.get(idx))
            .map(String::as_str)
    }

    /// Weekday name for `index` in `0..=7` (0 and 7 are Sunday).
    #[must_use]
    pub fn weekday(&self, index: usize, form: WeekdayForm) -> Option<&str> {
        self.weekday_list(form).get(index).map(String::as_str)
    }

    /// Seven column labels for a week view starting on `first_day`.
    ///
    /// Monday-first weeks end on the index-7 Sunday alias.
    #[must_use]
    pub fn week_header(&self, first_day: FirstDay, form: WeekdayForm) -> [&str; 7] {
        let list = self.weekday_list(form);
        let start = match first_day {
            FirstDay::Sunday => 0,
            FirstDay::Monday => 1,
        };
        std::array::from_fn(|col| list[start + col].as_str())
    }

    fn weekday_list(&self, form: WeekdayForm) -> &[String; WEEKDAY_SLOTS] {
        match form {
            WeekdayForm::Full => &self.weekdays,
            WeekdayForm::Long => &self.weekdays_long,
            WeekdayForm::Medium => &self.weekdays_medium,
            WeekdayForm::Short => &self.weekdays_short,
        }
    }
}

fn fixed<const N: usize>(
    locale: &str,
    field: &'static str,
    values: Vec<String>,
) -> Result<[String; N]> {
    let found = values.len();
    values
        .try_into()
        .map_err(|_| L10nError::InvalidCalendar {
            locale: locale.to_owned(),
            field,
            expected: N,
            found,
        })
}

fn weekday_list(
    locale: &str,
    field: &'static str,
    values: Vec<String>,
) -> Result<[String; WEEKDAY_SLOTS]> {
    let list = fixed::<WEEKDAY_SLOTS>(locale, field, values)?;
    if list[0] != list[WEEKDAY_SLOTS - 1] {
        return Err(L10nError::SundayAliasMismatch {
            locale: locale.to_owned(),
            field,
        });
    }
    Ok(list)
}

/// Check that a locale code is a non-empty tag of ASCII letters, digits,
/// `-` or `_`.
pub fn validate_locale_code(code: &str) -> Result<()> {
    let valid = !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(L10nError::InvalidLocale(code.to_owned()))
    }
}

#[derive(Debug, Deserialize)]
struct BundleDocument {
    locale: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(flatten)]
    calendar: CalendarSource,
    #[serde(default)]
    strings: HashMap<String, String>,
    #[serde(default)]
    guide: Option<Vec<GuideSection>>,
}

/// Translated labels, calendar names and guide for one locale.
#[derive(Debug, Clone)]
pub struct LocaleBundle {
    code: String,
    name: String,
    calendar: CalendarLabels,
    strings: HashMap<String, String>,
    guide: Option<UserGuideDocument>,
}

impl LocaleBundle {
    /// Create a bundle with no strings and no guide.
    pub fn new(code: impl Into<String>, calendar: CalendarLabels) -> Result<Self> {
        let code = code.into();
        validate_locale_code(&code)?;
        Ok(Self {
            name: code.clone(),
            code,
            calendar,
            strings: HashMap::new(),
            guide: None,
        })
    }

    /// Parse and validate a JSON resource document.
    ///
    /// `source_name` labels parse errors (usually the file name).
    pub fn from_json_str(source_name: &str, json: &str) -> Result<Self> {
        let doc: BundleDocument =
            serde_json::from_str(json).map_err(|e| L10nError::Parse {
                source_name: source_name.to_owned(),
                message: e.to_string(),
            })?;

        validate_locale_code(&doc.locale)?;
        let calendar = CalendarLabels::from_source(&doc.locale, doc.calendar)?;
        let guide = doc
            .guide
            .map(|sections| UserGuideDocument::new(&doc.locale, sections))
            .transpose()?;

        Ok(Self {
            name: doc.name.unwrap_or_else(|| doc.locale.clone()),
            code: doc.locale,
            calendar,
            strings: doc.strings,
            guide,
        })
    }

    /// Set the native display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach a user guide.
    #[must_use]
    pub fn with_guide(mut self, guide: UserGuideDocument) -> Self {
        self.guide = Some(guide);
        self
    }

    /// Insert or replace a UI string.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    /// Locale code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Native language name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calendar labels.
    #[must_use]
    pub fn calendar(&self) -> &CalendarLabels {
        &self.calendar
    }

    /// UI string defined by this bundle itself (no fallback).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// The bundle's own guide, if it ships one.
    #[must_use]
    pub fn guide(&self) -> Option<&UserGuideDocument> {
        self.guide.as_ref()
    }

    /// Iterate over all string keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }

    /// Number of UI strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the bundle defines no UI strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn english_source() -> CalendarSource {
        let list = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect();
        CalendarSource {
            months: list(&[
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ]),
            months_short: list(&[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            weekdays: list(&[
                "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
                "Sunday",
            ]),
            weekdays_long: list(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]),
            weekdays_medium: list(&["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]),
            weekdays_short: list(&["S", "M", "T", "W", "T", "F", "S", "S"]),
            duration_units: list(&["d", "h", "m"]),
        }
    }

    pub(crate) fn english_labels() -> CalendarLabels {
        CalendarLabels::from_source("en", english_source()).unwrap()
    }

    #[test]
    fn month_lookup_is_one_based() {
        let labels = english_labels();
        assert_eq!(labels.month(1, MonthForm::Full), Some("January"));
        assert_eq!(labels.month(12, MonthForm::Short), Some("Dec"));
        assert_eq!(labels.month(0, MonthForm::Full), None);
        assert_eq!(labels.month(13, MonthForm::Full), None);
    }

    #[test]
    fn weekday_alias() {
        let labels = english_labels();
        assert_eq!(
            labels.weekday(0, WeekdayForm::Full),
            labels.weekday(7, WeekdayForm::Full)
        );
        assert_eq!(labels.weekday(8, WeekdayForm::Full), None);
    }

    #[test]
    fn week_header_monday_first_ends_on_alias() {
        let labels = english_labels();
        assert_eq!(
            labels.week_header(FirstDay::Monday, WeekdayForm::Medium),
            ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
        );
        assert_eq!(
            labels.week_header(FirstDay::Sunday, WeekdayForm::Long)[0],
            "Sun"
        );
    }

    #[test]
    fn short_month_list_rejected() {
        let mut source = english_source();
        source.months.pop();
        let err = CalendarLabels::from_source("sl", source).unwrap_err();
        assert_eq!(
            err,
            L10nError::InvalidCalendar {
                locale: "sl".into(),
                field: "months",
                expected: 12,
                found: 11,
            }
        );
    }

    #[test]
    fn sunday_alias_mismatch_rejected() {
        let mut source = english_source();
        source.weekdays_short[7] = "X".into();
        let err = CalendarLabels::from_source("en", source).unwrap_err();
        assert!(matches!(
            err,
            L10nError::SundayAliasMismatch {
                field: "weekdays_short",
                ..
            }
        ));
    }

    #[test]
    fn duration_units_must_be_triple() {
        let mut source = english_source();
        source.duration_units.push("s".into());
        let err = CalendarLabels::from_source("en", source).unwrap_err();
        assert!(matches!(
            err,
            L10nError::InvalidCalendar {
                field: "duration_units",
                expected: 3,
                found: 4,
                ..
            }
        ));
    }

    #[test]
    fn locale_code_validation() {
        assert!(validate_locale_code("pt-BR").is_ok());
        assert!(validate_locale_code("zh_CN").is_ok());
        assert!(validate_locale_code("").is_err());
        assert!(validate_locale_code("de/../x").is_err());
    }

    #[test]
    fn parses_resource_document() {
        let json = r#"{
            "locale": "de",
            "name": "Deutsch",
            "months": ["Januar","Februar","März","April","Mai","Juni","Juli","August","September","Oktober","November","Dezember"],
            "months_short": ["Jan","Feb","Mär","Apr","Mai","Jun","Jul","Aug","Sep","Okt","Nov","Dez"],
            "weekdays": ["Sonntag","Montag","Dienstag","Mittwoch","Donnerstag","Freitag","Samstag","Sonntag"],
            "weekdays_long": ["Son","Mon","Die","Mit","Don","Fre","Sam","Son"],
            "weekdays_medium": ["So","Mo","Di","Mi","Do","Fr","Sa","So"],
            "weekdays_short": ["S","M","D","M","D","F","S","S"],
            "duration_units": ["T","Std","Min"],
            "strings": { "submit": "Absenden" },
            "guide": [{ "id": "ae", "heading": "Termine", "body": "<p>x</p>", "min_privilege": 1 }]
        }"#;
        let bundle = LocaleBundle::from_json_str("de.json", json).unwrap();
        assert_eq!(bundle.code(), "de");
        assert_eq!(bundle.name(), "Deutsch");
        assert_eq!(bundle.get("submit"), Some("Absenden"));
        assert_eq!(bundle.calendar().duration_units.hour, "Std");
        assert_eq!(bundle.guide().map(UserGuideDocument::len), Some(1));
    }

    #[test]
    fn malformed_json_reports_source() {
        let err = LocaleBundle::from_json_str("broken.json", "{ not json").unwrap_err();
        assert!(matches!(err, L10nError::Parse { ref source_name, .. } if source_name == "broken.json"));
    }

    #[test]
    fn name_defaults_to_code() {
        let bundle = LocaleBundle::new("sl", english_labels()).unwrap();
        assert_eq!(bundle.name(), "sl");
        assert!(bundle.is_empty());
    }
}
