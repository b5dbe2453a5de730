#![forbid(unsafe_code)]

//! Localization resources for the LuxCal calendar.
//!
//! Provides per-locale string bundles with reference-locale fallback,
//! positional `$N` placeholder substitution, month and weekday labels,
//! and a privilege-gated user guide.

pub mod bundle;
pub mod config;
pub mod error;
pub mod guide;
pub mod loader;
pub mod placeholder;
pub mod resolver;
pub mod shared;

pub use bundle::{
    CalendarLabels, CalendarSource, DurationUnits, FirstDay, LocaleBundle, MonthForm, WeekdayForm,
};
pub use config::{ConfigError, ResolverConfig, ResolverConfigParse};
pub use error::{L10nError, Result};
pub use guide::{GuideSection, PrivilegeLevel, UserGuideDocument};
pub use resolver::{CoverageReport, LocaleCoverage, LocalizationResolver, ResolverBuilder};
pub use shared::SharedResolver;
