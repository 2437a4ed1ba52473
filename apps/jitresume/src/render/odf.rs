//! Minimal OpenDocument Text object graph and its Flat ODF (`.fodt`) serializer.
//!
//! Only what the résumé needs: named paragraph/text/table-column styles,
//! paragraphs of plain text, styled spans and links, and simple tables whose
//! cells hold paragraphs. The whole document is one XML file, so no archive
//! container is involved.

use std::path::Path;

use crate::errors::ResumeError;
use crate::profile::write_atomically;

// ────────────────────────────────────────────────────────────────────────────
// Styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFamily {
    Paragraph,
    Text,
    TableColumn,
}

impl StyleFamily {
    fn as_str(self) -> &'static str {
        match self {
            StyleFamily::Paragraph => "paragraph",
            StyleFamily::Text => "text",
            StyleFamily::TableColumn => "table-column",
        }
    }
}

/// A named style. Property lists hold `(attribute, value)` pairs in the `fo:` namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub name: String,
    pub family: StyleFamily,
    pub parent: Option<String>,
    pub paragraph_properties: Vec<(&'static str, String)>,
    pub text_properties: Vec<(&'static str, String)>,
    pub column_width: Option<String>,
}

impl Style {
    fn new(name: &str, family: StyleFamily) -> Self {
        Self {
            name: name.to_string(),
            family,
            parent: None,
            paragraph_properties: Vec::new(),
            text_properties: Vec::new(),
            column_width: None,
        }
    }

    pub fn paragraph(name: &str) -> Self {
        Self::new(name, StyleFamily::Paragraph)
    }

    pub fn text(name: &str) -> Self {
        Self::new(name, StyleFamily::Text)
    }

    pub fn table_column(name: &str, width: &str) -> Self {
        let mut style = Self::new(name, StyleFamily::TableColumn);
        style.column_width = Some(width.to_string());
        style
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn align(self, align: &str) -> Self {
        self.paragraph_prop("fo:text-align", align)
    }

    pub fn margin_top(self, margin: &str) -> Self {
        self.paragraph_prop("fo:margin-top", margin)
    }

    pub fn font_size(self, size: &str) -> Self {
        self.text_prop("fo:font-size", size)
    }

    pub fn bold(self) -> Self {
        self.text_prop("fo:font-weight", "bold")
    }

    pub fn italic(self) -> Self {
        self.text_prop("fo:font-style", "italic")
    }

    pub fn color(self, color: &str) -> Self {
        self.text_prop("fo:color", color)
    }

    fn paragraph_prop(mut self, key: &'static str, value: &str) -> Self {
        self.paragraph_properties.push((key, value.to_string()));
        self
    }

    fn text_prop(mut self, key: &'static str, value: &str) -> Self {
        self.text_properties.push((key, value.to_string()));
        self
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str(&format!(
            "<style:style style:name=\"{0}\" style:display-name=\"{0}\" style:family=\"{1}\"",
            escape(&self.name),
            self.family.as_str()
        ));
        if let Some(parent) = &self.parent {
            out.push_str(&format!(" style:parent-style-name=\"{}\"", escape(parent)));
        }
        out.push('>');
        write_properties(out, "style:paragraph-properties", &self.paragraph_properties);
        write_properties(out, "style:text-properties", &self.text_properties);
        if let Some(width) = &self.column_width {
            out.push_str(&format!(
                "<style:table-column-properties style:column-width=\"{}\"/>",
                escape(width)
            ));
        }
        out.push_str("</style:style>\n");
    }
}

fn write_properties(out: &mut String, element: &str, props: &[(&'static str, String)]) {
    if props.is_empty() {
        return;
    }
    out.push('<');
    out.push_str(element);
    for (key, value) in props {
        out.push_str(&format!(" {key}=\"{}\"", escape(value)));
    }
    out.push_str("/>");
}

// ────────────────────────────────────────────────────────────────────────────
// Content
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Span { style: String, text: String },
    Link { href: String, text: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub style: Option<String>,
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn new(style: &str) -> Self {
        Self {
            style: Some(style.to_string()),
            inlines: Vec::new(),
        }
    }

    /// A styled paragraph holding one run of plain text.
    pub fn with_text(style: &str, text: &str) -> Self {
        Self::new(style).text(text)
    }

    pub fn text(mut self, text: &str) -> Self {
        self.inlines.push(Inline::Text(text.to_string()));
        self
    }

    pub fn span(mut self, style: &str, text: &str) -> Self {
        self.inlines.push(Inline::Span {
            style: style.to_string(),
            text: text.to_string(),
        });
        self
    }

    pub fn link(mut self, href: &str, text: &str) -> Self {
        self.inlines.push(Inline::Link {
            href: href.to_string(),
            text: text.to_string(),
        });
        self
    }

    /// Concatenated visible text of all inlines.
    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Text(text) => text.as_str(),
                Inline::Span { text, .. } => text.as_str(),
                Inline::Link { text, .. } => text.as_str(),
            })
            .collect()
    }

    fn write_xml(&self, out: &mut String) {
        match &self.style {
            Some(style) => out.push_str(&format!("<text:p text:style-name=\"{}\">", escape(style))),
            None => out.push_str("<text:p>"),
        }
        for inline in &self.inlines {
            match inline {
                Inline::Text(text) => out.push_str(&escape(text)),
                Inline::Span { style, text } => out.push_str(&format!(
                    "<text:span text:style-name=\"{}\">{}</text:span>",
                    escape(style),
                    escape(text)
                )),
                Inline::Link { href, text } => out.push_str(&format!(
                    "<text:a xlink:type=\"simple\" xlink:href=\"{}\">{}</text:a>",
                    escape(href),
                    escape(text)
                )),
            }
        }
        out.push_str("</text:p>\n");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub style: Option<String>,
    pub repeated: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
}

impl TableCell {
    pub fn new(paragraph: Paragraph) -> Self {
        Self {
            paragraphs: vec![paragraph],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn column(mut self, style: Option<&str>, repeated: usize) -> Self {
        self.columns.push(TableColumn {
            style: style.map(str::to_string),
            repeated,
        });
        self
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str(&format!("<table:table table:name=\"{}\">\n", escape(&self.name)));
        for column in &self.columns {
            out.push_str("<table:table-column");
            if let Some(style) = &column.style {
                out.push_str(&format!(" table:style-name=\"{}\"", escape(style)));
            }
            out.push_str(&format!(
                " table:number-columns-repeated=\"{}\"/>\n",
                column.repeated
            ));
        }
        for row in &self.rows {
            out.push_str("<table:table-row>\n");
            for cell in &row.cells {
                out.push_str("<table:table-cell office:value-type=\"string\">\n");
                for paragraph in &cell.paragraphs {
                    paragraph.write_xml(out);
                }
                out.push_str("</table:table-cell>\n");
            }
            out.push_str("</table:table-row>\n");
        }
        out.push_str("</table:table>\n");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

const XML_NAMESPACES: &str = concat!(
    " xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\"",
    " xmlns:style=\"urn:oasis:names:tc:opendocument:xmlns:style:1.0\"",
    " xmlns:text=\"urn:oasis:names:tc:opendocument:xmlns:text:1.0\"",
    " xmlns:table=\"urn:oasis:names:tc:opendocument:xmlns:table:1.0\"",
    " xmlns:fo=\"urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0\"",
    " xmlns:xlink=\"http://www.w3.org/1999/xlink\""
);

/// An OpenDocument text document: common styles, automatic styles, and the body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    styles: Vec<Style>,
    automatic_styles: Vec<Style>,
    body: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_style(&mut self, style: Style) {
        self.styles.push(style);
    }

    pub fn add_automatic_style(&mut self, style: Style) {
        self.automatic_styles.push(style);
    }

    pub fn push(&mut self, block: impl Into<Block>) {
        self.body.push(block.into());
    }

    #[cfg(test)]
    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter().chain(self.automatic_styles.iter())
    }

    #[cfg(test)]
    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles().find(|s| s.name == name)
    }

    pub fn body(&self) -> &[Block] {
        &self.body
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<office:document{XML_NAMESPACES} office:version=\"1.2\" \
             office:mimetype=\"application/vnd.oasis.opendocument.text\">\n"
        ));

        out.push_str("<office:styles>\n");
        for style in &self.styles {
            style.write_xml(&mut out);
        }
        out.push_str("</office:styles>\n<office:automatic-styles>\n");
        for style in &self.automatic_styles {
            style.write_xml(&mut out);
        }
        out.push_str("</office:automatic-styles>\n<office:body>\n<office:text>\n");
        for block in &self.body {
            match block {
                Block::Paragraph(paragraph) => paragraph.write_xml(&mut out),
                Block::Table(table) => table.write_xml(&mut out),
            }
        }
        out.push_str("</office:text>\n</office:body>\n</office:document>\n");
        out
    }

    /// Serializes to `path`, replacing any existing file only once the write succeeded.
    pub fn save(&self, path: &Path) -> Result<(), ResumeError> {
        write_atomically(path, self.to_xml().as_bytes())
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_xml() {
        let mut doc = Document::new();
        doc.add_style(
            Style::paragraph("MyName")
                .parent("Standard")
                .align("center")
                .font_size("13pt")
                .bold(),
        );
        let xml = doc.to_xml();
        assert!(xml.contains(
            "<style:style style:name=\"MyName\" style:display-name=\"MyName\" \
             style:family=\"paragraph\" style:parent-style-name=\"Standard\">\
             <style:paragraph-properties fo:text-align=\"center\"/>\
             <style:text-properties fo:font-size=\"13pt\" fo:font-weight=\"bold\"/>\
             </style:style>"
        ));
    }

    #[test]
    fn test_column_style_goes_to_automatic_styles() {
        let mut doc = Document::new();
        doc.add_automatic_style(Style::table_column("widecolumn", "6.0in"));
        let xml = doc.to_xml();
        let auto_start = xml.find("<office:automatic-styles>").unwrap();
        let col = xml.find("style:column-width=\"6.0in\"").unwrap();
        assert!(col > auto_start);
        assert!(doc.style("widecolumn").is_some());
    }

    #[test]
    fn test_paragraph_inlines_escaped() {
        let mut doc = Document::new();
        doc.push(
            Paragraph::new("List")
                .span("Bold", "R&D")
                .text(" <x>")
                .link("mailto:a@b.c?subject=hi", "a@b.c"),
        );
        let xml = doc.to_xml();
        assert!(xml.contains(
            "<text:p text:style-name=\"List\"><text:span text:style-name=\"Bold\">R&amp;D</text:span> &lt;x&gt;\
             <text:a xlink:type=\"simple\" xlink:href=\"mailto:a@b.c?subject=hi\">a@b.c</text:a></text:p>"
        ));
    }

    #[test]
    fn test_plain_text_concatenates_inlines() {
        let p = Paragraph::new("List").span("Bold", "English").text(" (Native)");
        assert_eq!(p.plain_text(), "English (Native)");
    }

    #[test]
    fn test_table_xml() {
        let mut table = Table::new("t1")
            .column(Some("widecolumn"), 1)
            .column(None, 2);
        table.rows.push(TableRow {
            cells: vec![TableCell::new(Paragraph::with_text("Name", "X"))],
        });
        let mut doc = Document::new();
        doc.push(table);
        let xml = doc.to_xml();

        assert!(xml.contains("<table:table table:name=\"t1\">"));
        assert!(xml.contains(
            "<table:table-column table:style-name=\"widecolumn\" table:number-columns-repeated=\"1\"/>"
        ));
        assert!(xml.contains("<table:table-column table:number-columns-repeated=\"2\"/>"));
        assert!(xml.contains("<table:table-cell office:value-type=\"string\">\n<text:p text:style-name=\"Name\">X</text:p>"));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.fodt");
        let mut doc = Document::new();
        doc.push(Paragraph::with_text("Body", "hello"));
        doc.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<?xml"));
        assert!(written.contains("office:mimetype=\"application/vnd.oasis.opendocument.text\""));
        assert!(written.contains(">hello</text:p>"));
    }
}
