//! Serde shapes of the LinkedIn v1 profile payload.
//!
//! Only `content` reads these. Required fields are plain types so a missing one
//! fails decoding; optional ones are `Option` and get their defaults in the model.
//! LinkedIn drops `values` from a collection whose `_total` is zero, so every
//! collection defaults to empty.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub main_address: String,
    pub email_address: String,
    pub member_url_resources: Collection<UrlResource>,
    pub phone_numbers: Collection<PhoneNumber>,
    pub summary: Option<String>,
    pub skills: Option<Collection<SkillEntry>>,
    pub positions: Option<Collection<PositionEntry>>,
    pub educations: Option<Collection<EducationEntry>>,
    pub certifications: Option<Collection<CertificationEntry>>,
    pub languages: Option<Collection<LanguageEntry>>,
    pub interests: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Named {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UrlResource {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PhoneNumber {
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SkillEntry {
    pub skill: Named,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProfileDate {
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PositionEntry {
    pub company: Named,
    pub title: String,
    pub summary: Option<String>,
    pub start_date: Option<ProfileDate>,
    pub end_date: Option<ProfileDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EducationEntry {
    pub school_name: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: Option<ProfileDate>,
    pub end_date: Option<ProfileDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CertificationEntry {
    pub name: String,
    pub authority: Option<Named>,
    pub start_date: Option<ProfileDate>,
    pub end_date: Option<ProfileDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LanguageEntry {
    pub language: Named,
    pub proficiency: Option<ProficiencyLevel>,
}

/// LinkedIn sends `{"level": "...", "name": "..."}`; either key may be missing.
#[derive(Debug, Deserialize)]
pub(crate) struct ProficiencyLevel {
    pub name: Option<String>,
}

impl<T> Collection<T> {
    pub fn first(&self) -> Option<&T> {
        self.values.first()
    }
}

/// Values of an optional collection, empty when the collection is absent.
pub(crate) fn values<T>(collection: &Option<Collection<T>>) -> &[T] {
    collection.as_ref().map(|c| c.values.as_slice()).unwrap_or(&[])
}
