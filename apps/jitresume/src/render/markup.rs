//! HTML résumé with an inline stylesheet.
//!
//! `pre()` and `post()` are the static document wrapper. All profile text is
//! escaped before it is placed in element content or attribute values.

use crate::config::Layout;
use crate::content::ContentModel;
use crate::errors::ResumeError;
use crate::render::{
    Formatter, CERTIFICATIONS_HEADING, EDUCATION_HEADING, EXPERIENCE_HEADING, INTERESTS_HEADING,
    LANGUAGES_HEADING, SKILLS_HEADING, SUMMARY_HEADING,
};

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <meta charset="utf-8"/>
        <style>
             body            { font-family: serif; font-size: 10pt;
                               margin: 18pt 36px; }
             p               { text-align: justify; }
             p.lang          { margin: 0px 0px 5px 0px; }
             p.interests     { text-align: justify; }
             a               { text-decoration: none; }
             a:hover         { text-decoration: underline; }
             div.header      { text-align: center; }
             div.section     { margin-top: 15px; }
             span.name       { font-weight: bold; }
             span.shdr       { font-weight: bold; }
             span.lang       { font-weight: bold; }
             table           { border: none; }
             table.experience { margin-bottom: 5px; }
             table.education { margin-bottom: 5px; }
             table.certification { margin-bottom: 5px; }
             td.company      { font-weight: bold; }
             td.institution  { font-weight: bold; }
             td.title        { font-weight: bold; font-style: italic; }
             td.dates        { text-align: right; font-style: italic; }
             td.degree       { font-weight: bold; font-style: italic; }
             td.authority    { font-weight: bold; font-style: italic; }
             td.summary      { text-align: justify; }
        </style>
    </head>
    <body>"#;

const DOCUMENT_TAIL: &str = "\n    </body>\n</html>\n";

const MAIL_SUBJECT: &str = "job%20opportunity";

pub struct MarkupFormatter<'m> {
    model: &'m ContentModel,
    layout: Layout,
}

impl<'m> MarkupFormatter<'m> {
    pub fn new(model: &'m ContentModel, layout: Layout) -> Self {
        Self { model, layout }
    }
}

/// A titled section block wrapping already-rendered `body` markup.
fn section(heading: &str, body: &str) -> String {
    format!(
        "\n\t<div class=\"section\">\n\t    <span class=\"shdr\">{heading}</span><hr/>\n{body}\n\t</div>"
    )
}

/// Escapes text for element content and double-quoted attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl Formatter for MarkupFormatter<'_> {
    type Fragment = String;
    type Artifact = String;

    fn pre(&mut self) -> String {
        DOCUMENT_HEAD.to_string()
    }

    fn header(&mut self) -> String {
        let header = self.model.header();
        let email = escape(&header.email);
        let url = escape(&header.url);
        format!(
            r#"
        <div class="header">
            <span class="name">{name}</span><br/>
            {address}<br/>
            <a href="mailto:{email}?subject={MAIL_SUBJECT}">{email}</a><br/>
            <a href="{url}">{url}</a><br/>
            {phone}
        </div>"#,
            name = escape(&header.full_name),
            address = escape(&header.address_line()),
            phone = escape(&header.phone),
        )
    }

    fn summary(&mut self) -> String {
        let body = format!("<p>{}</p>", escape(&self.model.summary().text));
        section(SUMMARY_HEADING, &body)
    }

    /// `skills_cols` cells per row. Every cell but the last of a full row gets an
    /// explicit `1/C` width; the last one is left bare so it absorbs rounding slack.
    /// A partial final row holds only the remaining skills.
    fn skills(&mut self) -> String {
        let cols = self.layout.skills_cols;
        let width = format!("{:.1}%", 100.0 / cols as f64);
        let mut rows = String::new();
        let mut row = String::new();
        let mut col = 0usize;

        for skill in self.model.skills() {
            col += 1;
            if col % cols > 0 {
                row.push_str(&format!(
                    "<td class=\"skill\" width=\"{width}\">{}</td>",
                    escape(skill)
                ));
            } else {
                row.push_str(&format!("<td class=\"skill\">{}</td>", escape(skill)));
                rows.push_str(&format!("\n     <tr>{row}</tr>"));
                row.clear();
            }
        }
        if col % cols > 0 {
            rows.push_str(&format!("\n     <tr>{row}</tr>"));
        }

        let body = format!("<table class=\"skills\" width=\"100%\">{rows}\n</table>");
        section(SKILLS_HEADING, &body)
    }

    fn experience(&mut self) -> String {
        let mut body = String::new();
        for position in self.model.experience() {
            body.push_str(&format!(
                r#"
    <table class="experience" width="100%">
        <tr><td class="company">{}</td>
            <td class="dates">{}</td></tr>
        <tr><td class="title" colspan="2">{}</td></tr>
        <tr><td class="summary" colspan="2">{}</td></tr>
    </table>"#,
                escape(&position.company_name),
                escape(&position.date_range),
                escape(&position.title),
                escape(&position.summary.text),
            ));
        }
        section(EXPERIENCE_HEADING, &body)
    }

    fn education(&mut self) -> String {
        let mut body = String::new();
        for school in self.model.education() {
            body.push_str(&format!(
                r#"
    <table class="education" width="100%">
        <tr><td class="institution">{}</td>
            <td class="dates">{}</td></tr>
        <tr><td class="degree" colspan="2">{}</td></tr>
    </table>"#,
                escape(&school.school_name),
                escape(&school.year),
                escape(&school.degree_text),
            ));
        }
        section(EDUCATION_HEADING, &body)
    }

    fn certifications(&mut self) -> String {
        let mut body = String::new();
        for cert in self.model.certifications() {
            body.push_str(&format!(
                r#"
    <table class="certification" width="100%">
        <tr><td class="institution">{}</td>
            <td class="dates">{}</td></tr>
        <tr><td class="authority" colspan="2">{}</td></tr>
    </table>"#,
                escape(&cert.name),
                escape(&cert.year),
                escape(&cert.authority_text),
            ));
        }
        section(CERTIFICATIONS_HEADING, &body)
    }

    fn languages(&mut self) -> String {
        let mut body = String::new();
        for lang in self.model.languages() {
            body.push_str(&format!(
                "<p class=\"lang\"><span class=\"lang\">{}</span> ({})</p>\n",
                escape(&lang.language),
                escape(&lang.proficiency),
            ));
        }
        section(LANGUAGES_HEADING, &body)
    }

    fn interests(&mut self) -> String {
        let body = format!(
            "<p class=\"interests\">{}</p>",
            escape(&self.model.interests().text)
        );
        section(INTERESTS_HEADING, &body)
    }

    fn post(&mut self) -> String {
        DOCUMENT_TAIL.to_string()
    }

    fn assemble(&mut self, fragments: Vec<String>) -> Result<String, ResumeError> {
        Ok(fragments.concat())
    }
}
