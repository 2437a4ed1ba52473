//! Fixed-width plain-text résumé.
//!
//! Everything is laid out against `page_width` columns: a centered contact block,
//! a skills grid, and name/date rows with the date right-aligned.

use crate::config::Layout;
use crate::content::ContentModel;
use crate::errors::ResumeError;
use crate::render::{
    Formatter, CERTIFICATIONS_HEADING, EDUCATION_HEADING, EXPERIENCE_HEADING, INTERESTS_HEADING,
    LANGUAGES_HEADING, SKILLS_HEADING, SUMMARY_HEADING,
};

/// Width reserved for an experience date range ("2019 - Present").
const DATE_RANGE_WIDTH: usize = 14;
/// Width reserved for an education or certification year.
const YEAR_WIDTH: usize = 4;

pub struct TextFormatter<'m> {
    model: &'m ContentModel,
    layout: Layout,
}

impl<'m> TextFormatter<'m> {
    pub fn new(model: &'m ContentModel, layout: Layout) -> Self {
        Self { model, layout }
    }

    /// One row with `name` left-aligned and `date` right-aligned in the last `date_w` columns.
    fn name_date_row(&self, name: &str, date: &str, date_w: usize) -> String {
        let name_w = self.layout.page_width.saturating_sub(date_w);
        format!("{name:<name_w$}{date:>date_w$}")
    }
}

impl Formatter for TextFormatter<'_> {
    type Fragment = String;
    type Artifact = String;

    fn pre(&mut self) -> String {
        String::new()
    }

    fn header(&mut self) -> String {
        let width = self.layout.page_width;
        let header = self.model.header();
        let address = header.address_line();

        [
            header.full_name.as_str(),
            address.as_str(),
            header.url.as_str(),
            header.email.as_str(),
            header.phone.as_str(),
        ]
        .iter()
        .map(|line| format!("{line:^width$}\n"))
        .collect()
    }

    fn summary(&mut self) -> String {
        format!("{SUMMARY_HEADING}\n{}\n", self.model.summary().text)
    }

    fn skills(&mut self) -> String {
        let cols = self.layout.skills_cols;
        let cell_w = self.layout.page_width / cols;
        let mut out = format!("{SKILLS_HEADING}\n");
        let mut col = 0;

        for skill in self.model.skills() {
            col += 1;
            out.push_str(&format!("{skill:<cell_w$}"));
            if col == cols {
                col = 0;
                out.push('\n');
            }
        }
        // Flush a partial final row.
        if col > 0 {
            out.push('\n');
        }
        out
    }

    fn experience(&mut self) -> String {
        let mut out = EXPERIENCE_HEADING.to_string();
        for position in self.model.experience() {
            let row = self.name_date_row(&position.company_name, &position.date_range, DATE_RANGE_WIDTH);
            out.push_str(&format!(
                "\n{row}\n{}\n{}\n",
                position.title, position.summary.text
            ));
        }
        out
    }

    fn education(&mut self) -> String {
        let mut out = EDUCATION_HEADING.to_string();
        for school in self.model.education() {
            let row = self.name_date_row(&school.school_name, &school.year, YEAR_WIDTH);
            out.push_str(&format!("\n{row}\n{}\n", school.degree_text));
        }
        out
    }

    fn certifications(&mut self) -> String {
        let mut out = CERTIFICATIONS_HEADING.to_string();
        for cert in self.model.certifications() {
            let row = self.name_date_row(&cert.name, &cert.year, YEAR_WIDTH);
            out.push_str(&format!("\n{row}\n{}\n", cert.authority_text));
        }
        out
    }

    fn languages(&mut self) -> String {
        let mut out = LANGUAGES_HEADING.to_string();
        for lang in self.model.languages() {
            out.push_str(&format!("\n{} ({})\n", lang.language, lang.proficiency));
        }
        out
    }

    fn interests(&mut self) -> String {
        format!("{INTERESTS_HEADING}\n{}", self.model.interests().text)
    }

    fn post(&mut self) -> String {
        String::new()
    }

    /// Joins the non-empty sections with a blank separator line.
    fn assemble(&mut self, fragments: Vec<String>) -> Result<String, ResumeError> {
        let sections: Vec<String> = fragments.into_iter().filter(|f| !f.is_empty()).collect();
        Ok(sections.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Limits;
    use crate::content::fixtures::{make_model, make_model_with, make_profile_json, skills_json};

    fn layout(page_width: usize, skills_cols: usize) -> Layout {
        Layout {
            page_width,
            skills_cols,
        }
    }

    /// Lines of the block that starts at `heading`, up to (not including) `next`.
    fn block<'a>(output: &'a str, heading: &str, next: Option<&str>) -> Vec<&'a str> {
        let start = output.find(&format!("{heading}\n")).expect("heading present");
        let rest = &output[start..];
        let end = next
            .and_then(|n| rest.find(&format!("\n{n}")))
            .unwrap_or(rest.len());
        rest[..end].lines().skip(1).collect()
    }

    // ── header ──────────────────────────────────────────────────────────────

    #[test]
    fn test_header_lines_centered() {
        let model = make_model();
        let mut formatter = TextFormatter::new(&model, layout(20, 5));
        let header = formatter.header();
        let lines: Vec<&str> = header.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "    Ada Lovelace    ");
        assert_eq!(lines[4], "      555-0100      ");
        // url comes before email
        assert_eq!(lines[2].trim(), "https://ada.example.com");
        assert_eq!(lines[3], "  ada@example.com   ");
    }

    #[test]
    fn test_header_joins_address_parts_with_space() {
        let model = make_model();
        let mut formatter = TextFormatter::new(&model, layout(72, 5));
        let header = formatter.header();
        assert_eq!(
            header.lines().nth(1).unwrap().trim(),
            "12 St James's Square London, UK 10001"
        );
    }

    // ── skills grid ─────────────────────────────────────────────────────────

    #[test]
    fn test_seven_skills_max_five_three_columns() {
        let mut value = make_profile_json();
        value["skills"] = skills_json(7);
        let limits = Limits {
            skills_max: 5,
            ..Limits::default()
        };
        let model = make_model_with(value, limits, 72);
        let mut formatter = TextFormatter::new(&model, layout(72, 3));

        let skills = formatter.skills();
        let rows: Vec<&str> = skills.lines().skip(1).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            format!("{:<24}{:<24}{:<24}", "Skill1", "Skill2", "Skill3")
        );
        assert_eq!(rows[1], format!("{:<24}{:<24}", "Skill4", "Skill5"));
        assert!(skills.ends_with('\n'));
    }

    #[test]
    fn test_grid_row_count_is_ceiling() {
        for (count, cols) in [(0, 3), (1, 3), (3, 3), (4, 3), (10, 4), (6, 1)] {
            let mut value = make_profile_json();
            value["skills"] = skills_json(count);
            let model = make_model_with(value, Limits::default(), 72);
            let mut formatter = TextFormatter::new(&model, layout(72, cols));

            let skills = formatter.skills();
            let rows = skills.lines().skip(1).count();
            assert_eq!(rows, count.div_ceil(cols), "count={count} cols={cols}");
        }
    }

    // ── name/date rows ──────────────────────────────────────────────────────

    #[test]
    fn test_experience_date_right_aligned() {
        let model = make_model();
        let mut formatter = TextFormatter::new(&model, layout(40, 5));
        let experience = formatter.experience();
        let lines: Vec<&str> = experience.lines().collect();

        assert_eq!(lines[0], "EXPERIENCE");
        assert_eq!(lines[1], format!("{:<26}{:>14}", "ANALYTICAL ENGINE CO", "2019 - Present"));
        assert_eq!(lines[1].len(), 40);
        assert_eq!(lines[2], "Programmer");
        assert_eq!(lines[3], "Wrote the first published algorithm.");
    }

    #[test]
    fn test_education_year_in_last_four_columns() {
        let model = make_model();
        let mut formatter = TextFormatter::new(&model, layout(30, 5));
        let education = formatter.education();
        let lines: Vec<&str> = education.lines().collect();

        assert_eq!(lines[1], format!("{:<26}{:>4}", "UNIVERSITY OF LONDON", "2015"));
        assert_eq!(lines[2], "Bachelor of Science, Mathematics");
    }

    #[test]
    fn test_certification_without_authority_renders_empty_line() {
        let mut value = make_profile_json();
        value["certifications"] = serde_json::json!({"values": [{"name": "Scrum"}]});
        let model = make_model_with(value, Limits::default(), 72);
        let mut formatter = TextFormatter::new(&model, layout(20, 5));

        assert_eq!(
            formatter.certifications(),
            format!("CERTIFICATIONS\n{:<16}{:>4}\n\n", "SCRUM", "")
        );
    }

    #[test]
    fn test_languages_with_and_without_proficiency() {
        let model = make_model();
        let mut formatter = TextFormatter::new(&model, layout(72, 5));
        assert_eq!(
            formatter.languages(),
            "LANGUAGES\nEnglish (Native or bilingual proficiency)\n\nFrench ()\n"
        );
    }

    // ── assembly ────────────────────────────────────────────────────────────

    #[test]
    fn test_content_sections_in_order() {
        let model = make_model();
        let output = TextFormatter::new(&model, layout(72, 5)).content().unwrap();

        let order = [
            "Ada Lovelace",
            SUMMARY_HEADING,
            SKILLS_HEADING,
            EXPERIENCE_HEADING,
            EDUCATION_HEADING,
            CERTIFICATIONS_HEADING,
            LANGUAGES_HEADING,
            INTERESTS_HEADING,
        ];
        let positions: Vec<usize> = order.iter().map(|h| output.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(output.ends_with("INTERESTS\nPoetry, horses, and flying machines."));
        assert!(!output.starts_with('\n'));
    }

    #[test]
    fn test_rendered_counts_match_model_counts() {
        let mut value = make_profile_json();
        value["skills"] = skills_json(9);
        let limits = Limits {
            skills_max: 7,
            experience_max: 1,
            certificates_max: 1,
        };
        let model = make_model_with(value, limits, 72);
        let counts = model.counts();
        let output = TextFormatter::new(&model, layout(72, 4)).content().unwrap();

        let skills: usize = block(&output, SKILLS_HEADING, Some(EXPERIENCE_HEADING))
            .iter()
            .map(|row| row.split_whitespace().count())
            .sum();
        let is_dated = |line: &&str| {
            let line = line.trim_end();
            line.ends_with("Present")
                || line.len() >= 4 && line[line.len() - 4..].chars().all(|c| c.is_ascii_digit())
        };
        let experience = block(&output, EXPERIENCE_HEADING, Some(EDUCATION_HEADING))
            .into_iter()
            .filter(is_dated)
            .count();
        let education = block(&output, EDUCATION_HEADING, Some(CERTIFICATIONS_HEADING))
            .into_iter()
            .filter(is_dated)
            .count();
        let certifications = block(&output, CERTIFICATIONS_HEADING, Some(LANGUAGES_HEADING))
            .into_iter()
            .filter(is_dated)
            .count();
        let languages = block(&output, LANGUAGES_HEADING, Some(INTERESTS_HEADING))
            .iter()
            .filter(|l| l.ends_with(')'))
            .count();

        assert_eq!(skills, counts.skills);
        assert_eq!(experience, counts.experience);
        assert_eq!(education, counts.education);
        assert_eq!(certifications, counts.certifications);
        assert_eq!(languages, counts.languages);
        assert_eq!(counts.skills, 7);
    }
}
