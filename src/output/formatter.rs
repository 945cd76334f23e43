//! Output formatters for batch reports

use crate::config::OutputFormat;
use crate::error::{CategorizerError, Result};
use crate::output::csv_export::to_csv_bytes;
use crate::output::report::BatchReport;
use colored::{Color, Colorize};

/// Trait for formatting batch reports
pub trait OutputFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console preview: filename and category per record, then problems
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and the API endpoint
pub struct JsonFormatter {
    pretty: bool,
}

/// CSV summary, same columns as the download
pub struct CsvFormatter;

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    csv_formatter: CsvFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME CATEGORIZATION"));
        output.push_str(&format!(
            "Generated: {} | Output: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.output_dir
        ));
        if let Some(skills) = &report.skills_filter {
            output.push_str(&format!(
                "Skill filter: {} ({} of {} records match)\n",
                self.colorize(skills, Color::Cyan),
                report.records.len(),
                report.categorized_count
            ));
        }

        output.push_str(&self.format_header("Results"));
        if report.records.is_empty() {
            output.push_str("No resumes to show.\n");
        } else {
            let width = report
                .records
                .iter()
                .map(|r| r.filename.chars().count())
                .max()
                .unwrap_or(0)
                .max("filename".len());

            output.push_str(&format!("{:<width$}  {}\n", "filename", "category", width = width));
            for row in report.preview() {
                output.push_str(&format!(
                    "{:<width$}  {}\n",
                    row.filename,
                    self.colorize(&row.category, Color::Green),
                    width = width
                ));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Candidates"));
            for record in &report.records {
                output.push_str(&format!("• {} ({})\n", record.filename, record.category));
                output.push_str(&format!("  Name: {}\n", record.name));
                output.push_str(&format!("  Contact: {}\n", record.contact));
                output.push_str(&format!("  Skills: {}\n", record.skills));
            }

            if !report.category_counts.is_empty() {
                output.push_str(&self.format_header("Categories"));
                for (category, count) in &report.category_counts {
                    output.push_str(&format!("  {}: {}\n", category, count));
                }
            }
        }

        if !report.failures.is_empty() {
            output.push_str(&self.format_header("Failures"));
            for failure in &report.failures {
                output.push_str(&format!(
                    "{} {} ({}): {}\n",
                    self.colorize("✗", Color::Red),
                    failure.filename,
                    failure.stage,
                    failure.message
                ));
            }
        }

        if !report.skipped.is_empty() {
            output.push_str(&format!(
                "\n{} non-PDF files skipped: {}\n",
                report.skipped.len(),
                report.skipped.join(", ")
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let bytes = to_csv_bytes(&report.records)?;
        String::from_utf8(bytes)
            .map_err(|e| CategorizerError::OutputFormatting(format!("CSV is not UTF-8: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            csv_formatter: CsvFormatter,
        }
    }

    fn formatters(&self) -> [&dyn OutputFormatter; 3] {
        [&self.console_formatter, &self.json_formatter, &self.csv_formatter]
    }

    pub fn generate_report(&self, report: &BatchReport, format: &OutputFormat) -> Result<String> {
        self.formatters()
            .into_iter()
            .find(|formatter| formatter.supports_format() == *format)
            .ok_or_else(|| CategorizerError::OutputFormatting(format!("No formatter for {:?}", format)))?
            .format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
