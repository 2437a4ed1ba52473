//! Content Model — the normalized, capped, defaulted view of one profile.
//!
//! Built once per run from a `RawProfile` and never mutated afterwards. Formatters
//! read résumé content only through the accessors below; none of them sees the raw
//! payload or performs presence checks of its own.
//!
//! # Accessor contract
//! - `header()` returns the contact header.
//! - `summary()` / `interests()` re-derive their `FreeText` on every call.
//! - `skills()`, `experience()`, `education()`, `certifications()` and `languages()`
//!   return a fresh single-pass iterator. Each element (spell check, wrapping,
//!   upper-casing) is produced on demand; to traverse a section again, call the
//!   accessor again.

pub mod raw;
pub mod spelling;
pub mod wrap;

use serde::Deserialize;

use crate::config::Limits;
use crate::errors::ResumeError;
use crate::profile::RawProfile;
use raw::{values, ProfileDate};
use spelling::{Misspelling, SpellChecker};

/// Literal end of the date range of a position that has no end date.
pub const PRESENT: &str = "Present";
const BACHELOR_PREFIX: &str = "Bachelor";
const BACHELOR_NORMALIZED: &str = "Bachelor of Science";

// ────────────────────────────────────────────────────────────────────────────
// Section records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactHeader {
    pub full_name: String,
    pub street: String,
    pub city_state_zip: String,
    pub email: String,
    pub url: String,
    pub phone: String,
}

impl ContactHeader {
    /// Street and city/state/zip on one line.
    pub fn address_line(&self) -> String {
        format!("{} {}", self.street, self.city_state_zip)
            .trim()
            .to_string()
    }
}

/// Wrapped free text plus the advisory spelling findings for the unwrapped source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FreeText {
    pub text: String,
    pub diagnostics: Vec<Misspelling>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub company_name: String,
    /// `"{start} - {end}"`, with `Present` standing in for a missing end.
    pub date_range: String,
    pub title: String,
    pub summary: FreeText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationRecord {
    pub school_name: String,
    pub year: String,
    pub degree_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certification {
    pub name: String,
    pub year: String,
    pub authority_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProficiency {
    pub language: String,
    pub proficiency: String,
}

/// Number of entries each section yields after truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionCounts {
    pub skills: usize,
    pub experience: usize,
    pub education: usize,
    pub certifications: usize,
    pub languages: usize,
}

/// A spelling finding tagged with the section it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub section: &'static str,
    pub misspelling: Misspelling,
}

// ────────────────────────────────────────────────────────────────────────────
// Content model
// ────────────────────────────────────────────────────────────────────────────

pub struct ContentModel {
    profile: raw::Profile,
    header: ContactHeader,
    limits: Limits,
    page_width: usize,
    checker: Box<dyn SpellChecker>,
}

impl ContentModel {
    /// Decodes `raw` eagerly. Missing required fields fail here, never in an accessor.
    pub fn new(
        raw: &RawProfile,
        limits: Limits,
        page_width: usize,
        checker: Box<dyn SpellChecker>,
    ) -> Result<Self, ResumeError> {
        let profile = raw::Profile::deserialize(raw.as_value())?;
        let header = build_header(&profile)?;

        Ok(Self {
            profile,
            header,
            limits,
            page_width,
            checker,
        })
    }

    pub fn header(&self) -> &ContactHeader {
        &self.header
    }

    pub fn summary(&self) -> FreeText {
        self.free_text(self.profile.summary.as_deref())
    }

    pub fn skills(&self) -> impl Iterator<Item = &str> + '_ {
        values(&self.profile.skills)
            .iter()
            .take(self.limits.skills_max)
            .map(|entry| entry.skill.name.as_str())
    }

    pub fn experience(&self) -> impl Iterator<Item = Position> + '_ {
        values(&self.profile.positions)
            .iter()
            .take(self.limits.experience_max)
            .map(|position| {
                let end = position
                    .end_date
                    .as_ref()
                    .and_then(|d| d.year)
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| PRESENT.to_string());
                Position {
                    company_name: position.company.name.to_uppercase(),
                    date_range: format!("{} - {}", year_of(position.start_date.as_ref()), end),
                    title: position.title.clone(),
                    summary: self.free_text(position.summary.as_deref()),
                }
            })
    }

    pub fn education(&self) -> impl Iterator<Item = EducationRecord> + '_ {
        values(&self.profile.educations)
            .iter()
            .map(|school| EducationRecord {
                school_name: school.school_name.to_uppercase(),
                year: preferred_year(school.start_date.as_ref(), school.end_date.as_ref()),
                degree_text: degree_text(school.degree.as_deref(), school.field_of_study.as_deref()),
            })
    }

    pub fn certifications(&self) -> impl Iterator<Item = Certification> + '_ {
        values(&self.profile.certifications)
            .iter()
            .take(self.limits.certificates_max)
            .map(|cert| Certification {
                name: cert.name.to_uppercase(),
                year: preferred_year(cert.start_date.as_ref(), cert.end_date.as_ref()),
                authority_text: cert
                    .authority
                    .as_ref()
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
            })
    }

    pub fn languages(&self) -> impl Iterator<Item = LanguageProficiency> + '_ {
        values(&self.profile.languages)
            .iter()
            .map(|entry| LanguageProficiency {
                language: entry.language.name.clone(),
                proficiency: entry
                    .proficiency
                    .as_ref()
                    .and_then(|p| p.name.clone())
                    .unwrap_or_default(),
            })
    }

    pub fn interests(&self) -> FreeText {
        self.free_text(self.profile.interests.as_deref())
    }

    /// Entry counts after truncation; what every formatter must render.
    pub fn counts(&self) -> SectionCounts {
        SectionCounts {
            skills: self.skills().count(),
            experience: self.experience().count(),
            education: self.education().count(),
            certifications: self.certifications().count(),
            languages: self.languages().count(),
        }
    }

    /// All spelling findings across summary, rendered position summaries and interests.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let tag = |section: &'static str| {
            move |misspelling: Misspelling| Diagnostic {
                section,
                misspelling,
            }
        };

        let mut found: Vec<Diagnostic> = self
            .summary()
            .diagnostics
            .into_iter()
            .map(tag("summary"))
            .collect();
        for position in self.experience() {
            found.extend(position.summary.diagnostics.into_iter().map(tag("experience")));
        }
        found.extend(self.interests().diagnostics.into_iter().map(tag("interests")));
        found
    }

    fn free_text(&self, text: Option<&str>) -> FreeText {
        let text = text.unwrap_or_default();
        FreeText {
            diagnostics: self.checker.check(text),
            text: wrap::wrap(text, self.page_width),
        }
    }
}

fn build_header(profile: &raw::Profile) -> Result<ContactHeader, ResumeError> {
    let url = profile
        .member_url_resources
        .first()
        .map(|r| r.url.clone())
        .ok_or_else(|| ResumeError::MissingField("memberUrlResources.values[0].url".to_string()))?;
    let phone = profile
        .phone_numbers
        .first()
        .map(|p| p.phone_number.clone())
        .ok_or_else(|| {
            ResumeError::MissingField("phoneNumbers.values[0].phoneNumber".to_string())
        })?;

    // LinkedIn separates the street from city/state/zip with a newline.
    let (street, city_state_zip) = match profile.main_address.split_once('\n') {
        Some((street, rest)) => (street.trim(), rest.trim()),
        None => (profile.main_address.trim(), ""),
    };

    Ok(ContactHeader {
        full_name: format!("{} {}", profile.first_name, profile.last_name),
        street: street.to_string(),
        city_state_zip: city_state_zip.replace('\n', " "),
        email: profile.email_address.clone(),
        url,
        phone,
    })
}

fn year_of(date: Option<&ProfileDate>) -> String {
    date.and_then(|d| d.year)
        .map(|y| y.to_string())
        .unwrap_or_default()
}

/// End year if known, else start year, else empty.
fn preferred_year(start: Option<&ProfileDate>, end: Option<&ProfileDate>) -> String {
    end.and_then(|d| d.year)
        .or_else(|| start.and_then(|d| d.year))
        .map(|y| y.to_string())
        .unwrap_or_default()
}

/// `degree, field` with any `Bachelor…` degree spelled out as `Bachelor of Science`.
pub fn degree_text(degree: Option<&str>, field: Option<&str>) -> String {
    let degree = degree.map(str::trim).filter(|d| !d.is_empty()).map(|d| {
        if d.starts_with(BACHELOR_PREFIX) {
            BACHELOR_NORMALIZED
        } else {
            d
        }
    });
    let field = field.map(str::trim).filter(|f| !f.is_empty());

    match (degree, field) {
        (Some(d), Some(f)) => format!("{d}, {f}"),
        (Some(d), None) => d.to_string(),
        (None, Some(f)) => f.to_string(),
        (None, None) => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test fixtures shared with the formatter tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    use super::spelling::NoopSpellChecker;
    use super::ContentModel;
    use crate::config::Limits;
    use crate::profile::RawProfile;

    pub fn make_profile_json() -> Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "mainAddress": "12 St James's Square\nLondon, UK 10001",
            "emailAddress": "ada@example.com",
            "memberUrlResources": {"_total": 1, "values": [{"name": "Site", "url": "https://ada.example.com"}]},
            "phoneNumbers": {"_total": 1, "values": [{"phoneType": "mobile", "phoneNumber": "555-0100"}]},
            "summary": "Mathematician and writer known for work on the Analytical Engine.",
            "skills": {"_total": 3, "values": [
                {"id": 1, "skill": {"name": "Mathematics"}},
                {"id": 2, "skill": {"name": "Programming"}},
                {"id": 3, "skill": {"name": "Translation"}}
            ]},
            "positions": {"_total": 2, "values": [
                {
                    "company": {"name": "Analytical Engine Co"},
                    "title": "Programmer",
                    "summary": "Wrote the first published algorithm.",
                    "startDate": {"year": 2019, "month": 3},
                    "isCurrent": true
                },
                {
                    "company": {"name": "Difference & Sons"},
                    "title": "Translator",
                    "summary": "Translated Menabrea's article.",
                    "startDate": {"year": 2015},
                    "endDate": {"year": 2018}
                }
            ]},
            "educations": {"_total": 1, "values": [{
                "schoolName": "University of London",
                "degree": "Bachelor's degree",
                "fieldOfStudy": "Mathematics",
                "startDate": {"year": 2011},
                "endDate": {"year": 2015}
            }]},
            "certifications": {"_total": 1, "values": [{
                "name": "Certified Engine Operator",
                "authority": {"name": "Royal Society"},
                "startDate": {"year": 2016}
            }]},
            "languages": {"_total": 2, "values": [
                {"language": {"name": "English"}, "proficiency": {"level": "native_or_bilingual", "name": "Native or bilingual proficiency"}},
                {"language": {"name": "French"}}
            ]},
            "interests": "Poetry, horses, and flying machines."
        })
    }

    pub fn make_model_with(value: Value, limits: Limits, page_width: usize) -> ContentModel {
        ContentModel::new(
            &RawProfile::from(value),
            limits,
            page_width,
            Box::new(NoopSpellChecker),
        )
        .unwrap()
    }

    pub fn make_model() -> ContentModel {
        make_model_with(make_profile_json(), Limits::default(), 72)
    }

    /// `n` skills named `Skill1..=Skilln`.
    pub fn skills_json(n: usize) -> Value {
        let values: Vec<Value> = (1..=n)
            .map(|i| json!({"skill": {"name": format!("Skill{i}")}}))
            .collect();
        json!({"_total": n, "values": values})
    }
}
