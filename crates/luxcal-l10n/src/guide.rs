//! Privilege-gated user guide.
//!
//! The guide is an ordered list of sections, each carrying the minimum
//! privilege a viewer needs to see it. Filtering is one comparison applied
//! uniformly; section order is always the document order.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{L10nError, Result};

/// Ordered access tier of a calendar user.
///
/// The numeric values match the levels stored by the calendar's user
/// records, so a raw level from the session collaborator converts directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PrivilegeLevel(pub u8);

impl PrivilegeLevel {
    /// No access.
    pub const NONE: Self = Self(0);
    /// Read-only access.
    pub const VIEW: Self = Self(1);
    /// May post and edit own events.
    pub const POST_OWN: Self = Self(2);
    /// May post and edit all events.
    pub const POST_ALL: Self = Self(3);
    /// Manager.
    pub const MANAGER: Self = Self(4);
    /// Administrator.
    pub const ADMIN: Self = Self(9);

    /// Raw numeric level.
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Whether this level grants access to content gated at `required`.
    #[must_use]
    pub fn satisfies(self, required: Self) -> bool {
        self >= required
    }
}

impl From<u8> for PrivilegeLevel {
    fn from(level: u8) -> Self {
        Self(level)
    }
}

impl fmt::Display for PrivilegeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::NONE => "none",
            Self::VIEW => "view",
            Self::POST_OWN => "post-own",
            Self::POST_ALL => "post-all",
            Self::MANAGER => "manager",
            Self::ADMIN => "admin",
            Self(other) => return write!(f, "level-{other}"),
        };
        f.write_str(name)
    }
}

/// One block of the user guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideSection {
    /// Stable anchor id (e.g. `"ae"`).
    pub id: String,
    /// Section heading text.
    pub heading: String,
    /// Raw HTML body, embedded verbatim by the page renderer.
    pub body: String,
    /// Minimum privilege required to see the section.
    #[serde(default)]
    pub min_privilege: PrivilegeLevel,
}

impl GuideSection {
    /// Create a section.
    pub fn new(
        id: impl Into<String>,
        heading: impl Into<String>,
        body: impl Into<String>,
        min_privilege: PrivilegeLevel,
    ) -> Self {
        Self {
            id: id.into(),
            heading: heading.into(),
            body: body.into(),
            min_privilege,
        }
    }

    /// Whether a viewer at `privilege` may see this section.
    #[must_use]
    pub fn visible_to(&self, privilege: PrivilegeLevel) -> bool {
        privilege.satisfies(self.min_privilege)
    }
}

/// Localized user guide for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserGuideDocument {
    sections: Vec<GuideSection>,
}

impl UserGuideDocument {
    /// Build a document, rejecting repeated section ids.
    ///
    /// `locale` only labels the error.
    pub fn new(locale: &str, sections: Vec<GuideSection>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(sections.len());
        for section in &sections {
            if !seen.insert(section.id.as_str()) {
                return Err(L10nError::DuplicateSection {
                    locale: locale.to_owned(),
                    id: section.id.clone(),
                });
            }
        }
        Ok(Self { sections })
    }

    /// Sections visible at `privilege`, in document order.
    pub fn sections(&self, privilege: PrivilegeLevel) -> impl Iterator<Item = &GuideSection> {
        self.sections
            .iter()
            .filter(move |section| section.visible_to(privilege))
    }

    /// Every section regardless of privilege.
    #[must_use]
    pub fn all_sections(&self) -> &[GuideSection] {
        &self.sections
    }

    /// Look up a section by anchor id, honoring the privilege gate.
    #[must_use]
    pub fn section(&self, id: &str, privilege: PrivilegeLevel) -> Option<&GuideSection> {
        self.sections(privilege).find(|section| section.id == id)
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
