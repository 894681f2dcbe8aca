//! Output formatters for analysis results

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::AnalysisResult;
use colored::{Color, Colorize};

/// Trait for formatting analysis results
pub trait OutputFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored score banding
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter, same shape as the HTTP response
pub struct JsonFormatter {
    pretty: bool,
}

/// Report generator that dispatches to the configured formatter
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
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
            format!("\n{} {}\n", "▓".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    /// Score bands: 70 and above is strong, 50 and above is partial.
    fn score_color(score: f64) -> Color {
        if score >= 70.0 {
            Color::Green
        } else if score >= 50.0 {
            Color::Yellow
        } else {
            Color::Red
        }
    }

    fn format_skill_list(&self, skills: &[String], color: Color) -> String {
        if skills.is_empty() {
            return "  (none)\n".to_string();
        }

        skills
            .iter()
            .map(|skill| format!("  • {}\n", self.colorize(skill, color)))
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH ANALYSIS"));
        let score = format!("{:.2}%", result.score);
        output.push_str(&format!(
            "Match Score: {}\n",
            self.colorize(&score, Self::score_color(result.score))
        ));

        output.push_str(&self.format_header(&format!("Skills Found ({})", result.resume_skills.len())));
        output.push_str(&self.format_skill_list(&result.resume_skills, Color::Green));

        output.push_str(&self.format_header(&format!("Missing Skills ({})", result.missing_skills.len())));
        output.push_str(&self.format_skill_list(&result.missing_skills, Color::Red));

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
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(result)?)
        } else {
            Ok(serde_json::to_string(result)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn format(&self, result: &AnalysisResult, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_result(result),
            OutputFormat::Json => self.json_formatter.format_result(result),
        }
    }
}
