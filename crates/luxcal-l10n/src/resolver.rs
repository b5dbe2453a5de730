//! Locale resolver with reference fallback and placeholder substitution.
//!
//! # Invariants
//!
//! 1. **Fallback terminates**: a lookup tries the requested bundle, then the
//!    reference bundle, and stops. Missing from both is `MissingKey`.
//!
//! 2. **Unknown locales are loud**: a locale without a bundle is
//!    `UnknownLocale` for every operation; it never silently becomes the
//!    reference locale.
//!
//! 3. **Substitution is single pass**: see [`crate::placeholder`].
//!
//! 4. **Thread safety**: `LocalizationResolver` is `Send + Sync` and
//!    immutable after [`ResolverBuilder::build`].
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key in neither bundle nor reference | `Err(MissingKey)` |
//! | Unknown locale | No bundle loaded for the code | `Err(UnknownLocale)` |
//! | Too few params | `$3` with two params | Token left as-is |
//! | No guide in locale | Bundle ships no guide | Reference guide used |

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::bundle::{CalendarLabels, LocaleBundle};
use crate::error::{L10nError, Result};
use crate::guide::{GuideSection, PrivilegeLevel, UserGuideDocument};
use crate::placeholder::{placeholder_indices, substitute};

/// Default reference locale.
pub const DEFAULT_REFERENCE: &str = "en";

/// Collects bundles and validates them into a [`LocalizationResolver`].
#[derive(Debug, Clone)]
pub struct ResolverBuilder {
    reference: String,
    bundles: Vec<LocaleBundle>,
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE)
    }
}

impl ResolverBuilder {
    /// Start a builder whose fallback source is `reference`.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            bundles: Vec::new(),
        }
    }

    /// Add a bundle.
    #[must_use]
    pub fn bundle(mut self, bundle: LocaleBundle) -> Self {
        self.bundles.push(bundle);
        self
    }

    /// Add several bundles.
    #[must_use]
    pub fn bundles(mut self, bundles: impl IntoIterator<Item = LocaleBundle>) -> Self {
        self.bundles.extend(bundles);
        self
    }

    /// Validate and freeze the bundle set.
    ///
    /// Fails on duplicate locale codes or when the reference locale is not
    /// among the bundles. Bundles missing reference keys are accepted and
    /// reported with a warning.
    pub fn build(self) -> Result<LocalizationResolver> {
        let _span = tracing::debug_span!("l10n_build", reference = %self.reference).entered();

        let mut bundles = HashMap::with_capacity(self.bundles.len());
        for bundle in self.bundles {
            let code = bundle.code().to_owned();
            if bundles.insert(code.clone(), bundle).is_some() {
                return Err(L10nError::DuplicateLocale(code));
            }
        }

        let Some(reference) = bundles.get(&self.reference) else {
            return Err(L10nError::MissingReference(self.reference));
        };

        let reference_keys: HashSet<&str> = reference.keys().collect();
        for bundle in bundles.values() {
            let missing = reference_keys
                .iter()
                .filter(|key| bundle.get(key).is_none())
                .count();
            if missing > 0 {
                tracing::warn!(
                    locale = bundle.code(),
                    missing,
                    "locale bundle incomplete, reference fallback in use"
                );
            }
        }

        tracing::info!(
            bundles = bundles.len(),
            reference = %self.reference,
            keys = reference_keys.len(),
            "locale bundles loaded"
        );

        Ok(LocalizationResolver {
            bundles,
            reference: self.reference,
            empty_guide: UserGuideDocument::default(),
        })
    }
}

/// Immutable lookup table from `(locale, key)` to display text.
///
/// # Example
///
/// ```
/// use luxcal_l10n::{LocaleBundle, ResolverBuilder};
/// # fn labels() -> luxcal_l10n::CalendarLabels {
/// #     luxcal_l10n::loader::builtin_bundles().unwrap()[0].calendar().clone()
/// # }
///
/// let mut en = LocaleBundle::new("en", labels()).unwrap();
/// en.insert("submit", "Submit");
/// en.insert("evt_default_duration", "Default event duration $1 hours and $2 minutes");
///
/// let mut de = LocaleBundle::new("de", labels()).unwrap();
/// de.insert("evt_default_duration", "Standardhändelselängd auf $1 Stunden und $2 Minuten");
///
/// let resolver = ResolverBuilder::new("en").bundle(en).bundle(de).build().unwrap();
///
/// assert_eq!(
///     resolver.resolve("de", "evt_default_duration", &["2", "30"]).unwrap(),
///     "Standardhändelselängd auf 2 Stunden und 30 Minuten"
/// );
/// assert_eq!(resolver.resolve("de", "submit", &[]).unwrap(), "Submit");
/// assert!(resolver.resolve("xx", "submit", &[]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct LocalizationResolver {
    bundles: HashMap<String, LocaleBundle>,
    reference: String,
    empty_guide: UserGuideDocument,
}

impl LocalizationResolver {
    /// Code of the reference (fallback) bundle.
    #[must_use]
    pub fn reference_locale(&self) -> &str {
        &self.reference
    }

    /// Bundle for `locale`.
    pub fn bundle(&self, locale: &str) -> Result<&LocaleBundle> {
        self.bundles
            .get(locale)
            .ok_or_else(|| L10nError::UnknownLocale(locale.to_owned()))
    }

    fn reference_bundle(&self) -> &LocaleBundle {
        // Presence is checked by the builder.
        &self.bundles[&self.reference]
    }

    /// Raw template for `key`, falling back to the reference bundle.
    pub fn text(&self, locale: &str, key: &str) -> Result<&str> {
        let bundle = self.bundle(locale)?;
        bundle
            .get(key)
            .or_else(|| self.reference_bundle().get(key))
            .ok_or_else(|| L10nError::MissingKey {
                locale: locale.to_owned(),
                key: key.to_owned(),
            })
    }

    /// Final display text for `key` with `$1`, `$2`, ... filled from
    /// `params`.
    pub fn resolve(&self, locale: &str, key: &str, params: &[&str]) -> Result<String> {
        self.text(locale, key)
            .map(|template| substitute(template, params))
    }

    /// Whether `key` resolves for `locale` (with fallback).
    #[must_use]
    pub fn contains_key(&self, locale: &str, key: &str) -> bool {
        self.text(locale, key).is_ok()
    }

    /// Month, weekday and duration labels. No fallback.
    pub fn calendar_labels(&self, locale: &str) -> Result<&CalendarLabels> {
        self.bundle(locale).map(LocaleBundle::calendar)
    }

    /// All loaded locale codes.
    #[must_use]
    pub fn available_locales(&self) -> BTreeSet<&str> {
        self.bundles.keys().map(String::as_str).collect()
    }

    /// `(code, native name)` pairs sorted by code, for a language selector.
    #[must_use]
    pub fn language_names(&self) -> Vec<(&str, &str)> {
        let mut names: Vec<(&str, &str)> = self
            .bundles
            .values()
            .map(|b| (b.code(), b.name()))
            .collect();
        names.sort_unstable_by_key(|&(code, _)| code);
        names
    }

    /// The user guide for `locale`, or the reference guide if the locale
    /// ships none.
    pub fn guide(&self, locale: &str) -> Result<&UserGuideDocument> {
        let bundle = self.bundle(locale)?;
        Ok(bundle
            .guide()
            .or_else(|| self.reference_bundle().guide())
            .unwrap_or(&self.empty_guide))
    }

    /// Guide sections of `locale` visible at `privilege`, in document order.
    pub fn guide_sections(
        &self,
        locale: &str,
        privilege: PrivilegeLevel,
    ) -> Result<Vec<&GuideSection>> {
        Ok(self.guide(locale)?.sections(privilege).collect())
    }

    /// Resolvable keys starting with `prefix` (e.g. `"title_"`), sorted.
    pub fn keys_with_prefix(&self, locale: &str, prefix: &str) -> Result<Vec<&str>> {
        let bundle = self.bundle(locale)?;
        let keys: BTreeSet<&str> = bundle
            .keys()
            .chain(self.reference_bundle().keys())
            .filter(|key| key.starts_with(prefix))
            .collect();
        Ok(keys.into_iter().collect())
    }

    // -----------------------------------------------------------------
    // Coverage & QA
    // -----------------------------------------------------------------

    /// Reference keys that `locale` does not define itself, sorted.
    ///
    /// These are the keys served by fallback.
    pub fn missing_keys(&self, locale: &str) -> Result<Vec<String>> {
        let bundle = self.bundle(locale)?;
        let mut missing: Vec<String> = self
            .reference_bundle()
            .keys()
            .filter(|key| bundle.get(key).is_none())
            .map(String::from)
            .collect();
        missing.sort_unstable();
        Ok(missing)
    }

    /// Keys whose text in `locale` is identical to the reference text.
    ///
    /// Identical text is often a left-in-English placeholder, but may be a
    /// legitimate translation ("Name", "Start"), so this is a report for
    /// translators only. Resolution never consults it.
    pub fn untranslated_keys(&self, locale: &str) -> Result<Vec<String>> {
        let bundle = self.bundle(locale)?;
        if bundle.code() == self.reference {
            return Ok(Vec::new());
        }
        let reference = self.reference_bundle();
        let mut same: Vec<String> = bundle
            .keys()
            .filter(|key| reference.get(key) == bundle.get(key))
            .map(String::from)
            .collect();
        same.sort_unstable();
        Ok(same)
    }

    /// Keys whose placeholder set differs from the reference text.
    ///
    /// A translation dropping `$2` silently loses a value at runtime.
    pub fn placeholder_mismatches(&self, locale: &str) -> Result<Vec<String>> {
        let bundle = self.bundle(locale)?;
        let reference = self.reference_bundle();
        let mut mismatched: Vec<String> = bundle
            .keys()
            .filter(|key| {
                reference.get(key).is_some_and(|ref_text| {
                    bundle.get(key).map(placeholder_indices) != Some(placeholder_indices(ref_text))
                })
            })
            .map(String::from)
            .collect();
        mismatched.sort_unstable();
        Ok(mismatched)
    }

    /// Coverage of every bundle against the reference key set.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        let total = self.reference_bundle().len();

        let mut locale_tags: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        locale_tags.sort_unstable();

        let locales = locale_tags
            .into_iter()
            .filter_map(|tag| {
                let missing = self.missing_keys(tag).ok()?;
                let untranslated = self.untranslated_keys(tag).ok()?.len();
                let present = total.saturating_sub(missing.len());
                let coverage_percent = if total == 0 {
                    100.0
                } else {
                    (present as f32 / total as f32) * 100.0
                };
                Some(LocaleCoverage {
                    locale: tag.to_owned(),
                    present,
                    missing,
                    untranslated,
                    coverage_percent,
                })
            })
            .collect();

        CoverageReport {
            reference: self.reference.clone(),
            total_keys: total,
            locales,
        }
    }
}

/// Coverage of all bundles relative to the reference bundle.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    /// Reference locale the key set comes from.
    pub reference: String,
    /// Number of keys in the reference bundle.
    pub total_keys: usize,
    /// Per-locale coverage, sorted by locale code.
    pub locales: Vec<LocaleCoverage>,
}

/// Per-locale coverage statistics.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleCoverage {
    /// Locale code.
    pub locale: String,
    /// Reference keys the bundle defines itself.
    pub present: usize,
    /// Reference keys served by fallback.
    pub missing: Vec<String>,
    /// Keys whose text equals the reference text.
    pub untranslated: usize,
    /// Own coverage as a percentage (0.0–100.0).
    pub coverage_percent: f32,
}
