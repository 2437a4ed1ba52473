//! OpenDocument résumé.
//!
//! Section methods append to an in-memory `odf::Document` instead of returning
//! text; `assemble` persists it to the output path and yields that path.

use std::path::PathBuf;

use tracing::info;

use crate::config::Layout;
use crate::content::ContentModel;
use crate::errors::ResumeError;
use crate::render::odf::{Document, Paragraph, Style, Table, TableCell, TableRow};
use crate::render::{
    Formatter, CERTIFICATIONS_HEADING, EDUCATION_HEADING, EXPERIENCE_HEADING, INTERESTS_HEADING,
    LANGUAGES_HEADING, SKILLS_HEADING, SUMMARY_HEADING,
};

// Paragraph styles
const STANDARD: &str = "Standard";
const MY_NAME: &str = "MyName";
const MY_BODY: &str = "MyBody";
const MY_LINK: &str = "MyLink";
const HEADING: &str = "Heading";
const NAME: &str = "Name";
const RIGHT_ITALIC: &str = "RightItalic";
const TITLE: &str = "Title";
const BODY: &str = "Body";
const LIST: &str = "List";
const ITALIC: &str = "Italic";
// Text style
const BOLD: &str = "Bold";
// Table-column styles
const WIDE_COLUMN: &str = "widecolumn";
const NARROW_COLUMN: &str = "narrowcolumn";

const MAIL_SUBJECT: &str = "your%20resume";

pub struct DocumentFormatter<'m> {
    model: &'m ContentModel,
    layout: Layout,
    output: PathBuf,
    doc: Document,
    tables: usize,
}

impl<'m> DocumentFormatter<'m> {
    pub fn new(model: &'m ContentModel, layout: Layout, output: impl Into<PathBuf>) -> Self {
        Self {
            model,
            layout,
            output: output.into(),
            doc: Document::new(),
            tables: 0,
        }
    }

    #[cfg(test)]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    fn next_table_name(&mut self, prefix: &str) -> String {
        self.tables += 1;
        format!("{prefix}{}", self.tables)
    }

    fn heading(&mut self, heading: &str) {
        self.doc.push(Paragraph::with_text(HEADING, heading));
    }

    /// Side-by-side name (wide column) and date (narrow, right-aligned italic) row,
    /// shared by experience, education and certifications.
    fn name_date_pair(&mut self, name: &str, date: &str) -> Table {
        let mut table = Table::new(&self.next_table_name("t"))
            .column(Some(WIDE_COLUMN), 1)
            .column(Some(NARROW_COLUMN), 1);
        table.rows.push(TableRow {
            cells: vec![
                TableCell::new(Paragraph::with_text(NAME, name)),
                TableCell::new(Paragraph::with_text(RIGHT_ITALIC, date)),
            ],
        });
        table
    }
}

impl Formatter for DocumentFormatter<'_> {
    type Fragment = ();
    type Artifact = PathBuf;

    /// Starts a fresh document and registers every style the sections use.
    fn pre(&mut self) {
        self.doc = Document::new();
        self.tables = 0;

        self.doc.add_style(Style::paragraph(STANDARD));
        self.doc.add_style(
            Style::paragraph(MY_NAME)
                .parent(STANDARD)
                .align("center")
                .font_size("13pt")
                .bold(),
        );
        self.doc.add_style(
            Style::paragraph(MY_BODY)
                .parent(STANDARD)
                .align("center")
                .font_size("11pt"),
        );
        self.doc.add_style(
            Style::paragraph(MY_LINK)
                .parent(STANDARD)
                .align("center")
                .color("#0000FF")
                .font_size("11pt")
                .italic(),
        );
        // Top margin separates a section from the previous one.
        self.doc.add_style(
            Style::paragraph(HEADING)
                .parent(STANDARD)
                .margin_top("0.15in")
                .font_size("12pt")
                .bold(),
        );
        self.doc.add_style(
            Style::paragraph(NAME)
                .parent(STANDARD)
                .margin_top("0.1in")
                .font_size("11pt")
                .bold(),
        );
        // Same top margin as Name so the date lines up with it.
        self.doc.add_style(
            Style::paragraph(RIGHT_ITALIC)
                .parent(STANDARD)
                .margin_top("0.1in")
                .align("right")
                .font_size("11pt")
                .italic(),
        );
        self.doc.add_style(
            Style::paragraph(TITLE)
                .parent(STANDARD)
                .font_size("11pt")
                .italic()
                .bold(),
        );
        self.doc.add_style(
            Style::paragraph(BODY)
                .parent(STANDARD)
                .align("justify")
                .font_size("11pt"),
        );
        self.doc.add_style(
            Style::paragraph(LIST)
                .parent(STANDARD)
                .margin_top("0.05in")
                .align("left")
                .font_size("11pt"),
        );
        self.doc.add_style(
            Style::paragraph(ITALIC)
                .parent(STANDARD)
                .font_size("11pt")
                .italic(),
        );

        self.doc.add_automatic_style(Style::text(BOLD).bold());
        self.doc
            .add_automatic_style(Style::table_column(WIDE_COLUMN, "6.0in"));
        self.doc
            .add_automatic_style(Style::table_column(NARROW_COLUMN, "1.0in"));
    }

    fn header(&mut self) {
        let header = self.model.header();
        let mailto = format!("mailto:{}?subject={MAIL_SUBJECT}", header.email);

        self.doc.push(Paragraph::with_text(MY_NAME, &header.full_name));
        self.doc
            .push(Paragraph::with_text(MY_BODY, &header.address_line()));
        self.doc
            .push(Paragraph::new(MY_LINK).link(&mailto, &header.email));
        self.doc
            .push(Paragraph::new(MY_LINK).link(&header.url, &header.url));
        self.doc.push(Paragraph::with_text(MY_BODY, &header.phone));
    }

    fn summary(&mut self) {
        self.heading(SUMMARY_HEADING);
        let summary = self.model.summary();
        self.doc.push(Paragraph::with_text(BODY, &summary.text));
    }

    fn skills(&mut self) {
        self.heading(SKILLS_HEADING);

        let cols = self.layout.skills_cols;
        let mut table = Table::new("skills-table").column(None, cols);
        for (i, skill) in self.model.skills().enumerate() {
            if i % cols == 0 {
                table.rows.push(TableRow::default());
            }
            if let Some(row) = table.rows.last_mut() {
                row.cells.push(TableCell::new(Paragraph::with_text(LIST, skill)));
            }
        }
        // An ODF table needs at least one row.
        if !table.rows.is_empty() {
            self.doc.push(table);
        }
    }

    fn experience(&mut self) {
        self.heading(EXPERIENCE_HEADING);
        let model = self.model;
        for position in model.experience() {
            let pair = self.name_date_pair(&position.company_name, &position.date_range);
            self.doc.push(pair);
            self.doc.push(Paragraph::with_text(TITLE, &position.title));
            self.doc
                .push(Paragraph::with_text(BODY, &position.summary.text));
        }
    }

    fn education(&mut self) {
        self.heading(EDUCATION_HEADING);
        let model = self.model;
        for school in model.education() {
            let pair = self.name_date_pair(&school.school_name, &school.year);
            self.doc.push(pair);
            self.doc
                .push(Paragraph::with_text(TITLE, &school.degree_text));
        }
    }

    fn certifications(&mut self) {
        self.heading(CERTIFICATIONS_HEADING);
        let model = self.model;
        for cert in model.certifications() {
            let pair = self.name_date_pair(&cert.name, &cert.year);
            self.doc.push(pair);
            self.doc
                .push(Paragraph::with_text(TITLE, &cert.authority_text));
        }
    }

    fn languages(&mut self) {
        self.heading(LANGUAGES_HEADING);
        for lang in self.model.languages() {
            self.doc.push(
                Paragraph::new(LIST)
                    .span(BOLD, &lang.language)
                    .text(&format!(" ({})", lang.proficiency)),
            );
        }
    }

    fn interests(&mut self) {
        self.heading(INTERESTS_HEADING);
        let interests = self.model.interests();
        self.doc.push(Paragraph::with_text(BODY, &interests.text));
    }

    fn post(&mut self) {}

    fn assemble(&mut self, _fragments: Vec<()>) -> Result<PathBuf, ResumeError> {
        self.doc.save(&self.output)?;
        info!(path = %self.output.display(), blocks = self.doc.body().len(), "Résumé document written");
        Ok(self.output.clone())
    }
}
