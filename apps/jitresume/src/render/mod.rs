// Résumé renderers: one `Formatter` implementation per output encoding.
// Variants share nothing but the ContentModel accessors.

pub mod document;
pub mod markup;
pub mod odf;
pub mod text;

pub use document::DocumentFormatter;
pub use markup::MarkupFormatter;
pub use text::TextFormatter;

use crate::errors::ResumeError;

/// Section headings, shared by all encodings.
pub const SUMMARY_HEADING: &str = "PROFESSIONAL SUMMARY";
pub const SKILLS_HEADING: &str = "RELEVANT SKILLS";
pub const EXPERIENCE_HEADING: &str = "EXPERIENCE";
pub const EDUCATION_HEADING: &str = "EDUCATION";
pub const CERTIFICATIONS_HEADING: &str = "CERTIFICATIONS";
pub const LANGUAGES_HEADING: &str = "LANGUAGES";
pub const INTERESTS_HEADING: &str = "INTERESTS";

/// The capability set every output encoding implements.
///
/// Each section method renders one section into a `Fragment` and consumes the
/// matching ContentModel accessor exactly once. Section methods are not meant to
/// be called piecemeal: `content()` is the single assembly entry point and always
/// visits them in résumé order (pre, header, summary, skills, experience,
/// education, certifications, languages, interests, post) before handing the
/// fragments to `assemble`.
pub trait Formatter {
    type Fragment;
    type Artifact;

    fn pre(&mut self) -> Self::Fragment;
    fn header(&mut self) -> Self::Fragment;
    fn summary(&mut self) -> Self::Fragment;
    fn skills(&mut self) -> Self::Fragment;
    fn experience(&mut self) -> Self::Fragment;
    fn education(&mut self) -> Self::Fragment;
    fn certifications(&mut self) -> Self::Fragment;
    fn languages(&mut self) -> Self::Fragment;
    fn interests(&mut self) -> Self::Fragment;
    fn post(&mut self) -> Self::Fragment;

    /// Turns the ordered fragments into the final artifact.
    fn assemble(&mut self, fragments: Vec<Self::Fragment>) -> Result<Self::Artifact, ResumeError>;

    fn content(&mut self) -> Result<Self::Artifact, ResumeError> {
        let fragments = vec![
            self.pre(),
            self.header(),
            self.summary(),
            self.skills(),
            self.experience(),
            self.education(),
            self.certifications(),
            self.languages(),
            self.interests(),
            self.post(),
        ];
        self.assemble(fragments)
    }
}
