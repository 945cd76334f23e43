//! HTML pages for the web form

use crate::error::Result;
use crate::output::csv_export::to_csv_bytes;
use crate::output::report::{BatchReport, PreviewRow};
use crate::processing::document::DocumentFailure;
use askama::Template;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const STYLES: &str = r#"<style>
    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        background: #121212;
        color: #e0e0e0;
        margin: 0;
    }
    .container {
        max-width: 900px;
        margin: 30px auto;
        padding: 30px;
        background: #1e1e1e;
        border-radius: 12px;
        box-shadow: 0 0 15px rgba(0, 255, 255, 0.1);
    }
    h1, h2, h3 { text-align: center; color: #00bcd4; }
    label { display: block; color: #009688; font-size: 18px; margin: 20px 0 8px; }
    input[type=text] {
        width: 100%;
        box-sizing: border-box;
        padding: 12px;
        font-size: 16px;
        border: 2px solid #009688;
        border-radius: 6px;
        background: #121212;
        color: white;
    }
    button, .button {
        display: inline-block;
        margin-top: 20px;
        background: #009688;
        color: white;
        border: none;
        border-radius: 6px;
        padding: 12px 25px;
        font-size: 18px;
        cursor: pointer;
        text-decoration: none;
    }
    button:hover, .button:hover { background: #00796b; }
    .error { background: #4a1c1c; border-left: 4px solid #e53935; padding: 12px; border-radius: 6px; }
    .success { background: #1b3a2a; border-left: 4px solid #43a047; padding: 12px; border-radius: 6px; }
    table { width: 100%; border-collapse: collapse; margin: 20px 0; }
    th, td { text-align: left; padding: 8px 12px; border-bottom: 1px solid #333; }
    th { color: #00bcd4; }
    .muted { color: #9e9e9e; }
</style>"#;

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Categorizer</title>
    {{ styles|safe }}
</head>
<body>
    <div class="container">
        <h1>Resume Categorizer</h1>
        <h3>Sort resumes into job categories</h3>
        <p>Upload PDF resumes to categorize them and extract the candidate's name, contact details and skills.</p>
        {% if has_error %}
        <div class="error">{{ error }}</div>
        {% endif %}
        <form action="/categorize" method="post" enctype="multipart/form-data">
            <label for="resumes">Choose PDF files</label>
            <input id="resumes" type="file" name="resumes" accept=".pdf,application/pdf" multiple>
            <label for="output_dir">Output Directory</label>
            <input id="output_dir" type="text" name="output_dir" value="{{ output_dir }}">
            <label for="skills">Enter Skills (comma-separated)</label>
            <input id="skills" type="text" name="skills" value="{{ skills }}">
            <button type="submit">Categorize Resumes</button>
        </form>
    </div>
</body>
</html>"#, ext = "html")]
pub struct FormPage {
    styles: &'static str,
    has_error: bool,
    error: String,
    output_dir: String,
    skills: String,
}

impl FormPage {
    pub fn new(output_dir: impl Into<String>, skills: impl Into<String>) -> Self {
        Self {
            styles: STYLES,
            has_error: false,
            error: String::new(),
            output_dir: output_dir.into(),
            skills: skills.into(),
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.has_error = true;
        self.error = error.into();
        self
    }

    pub fn to_html(&self) -> Result<String> {
        Ok(self.render()?)
    }
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Categorizer: Results</title>
    {{ styles|safe }}
</head>
<body>
    <div class="container">
        <h1>Results</h1>
        <p class="muted">Generated {{ generated_at }}. Files sorted into <code>{{ output_dir }}</code>.</p>
        {% if has_filter %}
        <p>Skill filter <strong>{{ skills_filter }}</strong>: {{ rows.len() }} of {{ categorized_count }} resumes match.</p>
        {% endif %}
        {% if rows.is_empty() %}
        <p>No resumes to show.</p>
        {% else %}
        <table>
            <thead><tr><th>filename</th><th>category</th></tr></thead>
            <tbody>
            {% for row in rows %}
                <tr><td>{{ row.filename }}</td><td>{{ row.category }}</td></tr>
            {% endfor %}
            </tbody>
        </table>
        {% endif %}
        <a class="button" href="{{ csv_data_uri|safe }}" download="{{ csv_filename }}">Download results as CSV</a>
        {% if !failures.is_empty() %}
        <h2>Failed</h2>
        <table>
            <thead><tr><th>filename</th><th>stage</th><th>error</th></tr></thead>
            <tbody>
            {% for failure in failures %}
                <tr><td>{{ failure.filename }}</td><td>{{ failure.stage }}</td><td>{{ failure.message }}</td></tr>
            {% endfor %}
            </tbody>
        </table>
        {% endif %}
        {% if !skipped.is_empty() %}
        <p class="muted">Skipped (not PDF): {{ skipped.join(", ") }}</p>
        {% endif %}
        <div class="success">Resumes categorization and processing completed.</div>
        <a class="button" href="/">Categorize more</a>
    </div>
</body>
</html>"#, ext = "html")]
pub struct ResultsPage {
    styles: &'static str,
    generated_at: String,
    output_dir: String,
    has_filter: bool,
    skills_filter: String,
    categorized_count: usize,
    rows: Vec<PreviewRow>,
    failures: Vec<DocumentFailure>,
    skipped: Vec<String>,
    csv_filename: String,
    csv_data_uri: String,
}

impl ResultsPage {
    pub fn new(report: &BatchReport, csv_filename: &str) -> Result<Self> {
        let csv = to_csv_bytes(&report.records)?;

        Ok(Self {
            styles: STYLES,
            generated_at: report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            output_dir: report.output_dir.clone(),
            has_filter: report.skills_filter.is_some(),
            skills_filter: report.skills_filter.clone().unwrap_or_default(),
            categorized_count: report.categorized_count,
            rows: report.preview(),
            failures: report.failures.clone(),
            skipped: report.skipped.clone(),
            csv_filename: csv_filename.to_string(),
            csv_data_uri: format!("data:text/csv;base64,{}", STANDARD.encode(csv)),
        })
    }

    pub fn to_html(&self) -> Result<String> {
        Ok(self.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::category::Category;
    use crate::processing::document::{BatchOutcome, CandidateRecord, Contact, DocumentOutcome};
    use std::path::Path;

    #[test]
    fn test_form_escapes_values() {
        let html = FormPage::new("out<dir>", "python")
            .with_error("Please upload files and specify the output directory.")
            .to_html()
            .unwrap();

        assert!(html.contains("value=\"out&#60;dir&#62;\""));
        assert!(!html.contains("out<dir>"));
        assert!(html.contains("Please upload files and specify the output directory."));
        assert!(html.contains("name=\"resumes\""));
    }

    #[test]
    fn test_form_without_error() {
        let html = FormPage::new("categorized_resumes", "").to_html().unwrap();
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_results_embed_csv_download() {
        let mut outcome = BatchOutcome::new();
        outcome.push(DocumentOutcome::Processed(CandidateRecord {
            name: "Jane Doe".to_string(),
            contact: Contact::default(),
            skills: "Python".to_string(),
            category: Category::PythonDeveloper,
            filename: "jane.pdf".to_string(),
            normalized_text: "python".to_string(),
        }));
        outcome.push(DocumentOutcome::Skipped("cover.docx".to_string()));
        let report = BatchReport::new(&outcome, Some("python"), Path::new("out"));

        let page = ResultsPage::new(&report, "filtered_categorized_resumes.csv").unwrap();
        let html = page.to_html().unwrap();

        assert!(html.contains("<td>jane.pdf</td><td>Python Developer</td>"));
        assert!(html.contains("download=\"filtered_categorized_resumes.csv\""));
        assert!(html.contains("Skipped (not PDF): cover.docx"));

        let encoded = page.csv_data_uri.trim_start_matches("data:text/csv;base64,");
        let csv = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(csv.starts_with("name,category,filename,skills,contact"));
    }
}
