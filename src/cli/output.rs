//! Output formatting for JSON, YAML and human-readable text

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analyzer::PackageAnalysis;
use crate::config::ApklensConfig;
use crate::scan::ScanSummary;
use crate::stack::AppType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

#[derive(Serialize)]
struct ScanReport<'a> {
    summary: &'a ScanSummary,
    packages: &'a [PackageAnalysis],
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// One line per package
    pub fn format_classifications(&self, analyses: &[PackageAnalysis]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(analyses)
                .context("Failed to serialize classifications to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(analyses)
                .context("Failed to serialize classifications to YAML"),
            OutputFormat::Human => Ok(self.format_classifications_human(analyses)),
        }
    }

    pub fn format_analysis(&self, analysis: &PackageAnalysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(analysis)
                .context("Failed to serialize package analysis to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(analysis)
                .context("Failed to serialize package analysis to YAML"),
            OutputFormat::Human => Ok(self.format_analysis_human(analysis)),
        }
    }

    pub fn format_scan(&self, summary: &ScanSummary, analyses: &[PackageAnalysis]) -> Result<String> {
        let report = ScanReport {
            summary,
            packages: analyses,
        };
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&report).context("Failed to serialize scan to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&report).context("Failed to serialize scan to YAML")
            }
            OutputFormat::Human => Ok(self.format_scan_human(summary, analyses)),
        }
    }

    pub fn format_config(&self, config: &ApklensConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config.to_display_map())
                .context("Failed to serialize config to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&config.to_display_map())
                .context("Failed to serialize config to YAML"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    // Human-readable formatting methods

    fn format_classifications_human(&self, analyses: &[PackageAnalysis]) -> String {
        let width = analyses
            .iter()
            .map(|a| a.file_name.chars().count())
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        for analysis in analyses {
            output.push_str(&format!(
                "{:<width$}  {}",
                analysis.file_name,
                analysis.app_type,
                width = width
            ));
            if let Some(ref error) = analysis.error {
                output.push_str(&format!("  ({})", error));
            }
            output.push('\n');
        }
        output
    }

    fn format_analysis_human(&self, analysis: &PackageAnalysis) -> String {
        let mut output = String::new();

        if analysis.is_readable() {
            output.push_str(&format!("\u{2713} {}\n", analysis.file_name));
        } else {
            output.push_str(&format!("\u{26A0} {} (unreadable)\n", analysis.file_name));
        }
        output.push_str(&"\u{2501}".repeat(42));
        output.push_str("\n\n");

        output.push_str(&format!("Framework:   {}\n", analysis.app_type));
        output.push_str(&format!("Path:        {}\n", analysis.path.display()));
        if let Some(ref error) = analysis.error {
            output.push_str(&format!("Error:       {}\n", error));
            return output;
        }
        output.push('\n');

        output.push_str("Scores:\n");
        output.push_str(&format!(
            "\u{251C}\u{2500} Flutter:       {}\n",
            analysis.scores.flutter
        ));
        output.push_str(&format!(
            "\u{251C}\u{2500} React Native:  {}\n",
            analysis.scores.react_native
        ));
        output.push_str(&format!(
            "\u{2514}\u{2500} Expo:          {}\n\n",
            analysis.scores.expo
        ));

        output.push_str(&format!(
            "Tech Stack:  {}\n\n",
            analysis.tech_stack.labels().join(", ")
        ));

        output.push_str(&format!(
            "Native Libraries ({}):\n",
            analysis.native_libraries.len()
        ));
        push_tree(
            &mut output,
            analysis
                .native_libraries
                .iter()
                .map(|lib| format!("{:<14} {} ({})", lib.arch, lib.name, human_size(lib.size))),
        );
        output.push('\n');

        output.push_str(&format!("Signatures ({}):\n", analysis.signatures.len()));
        push_tree(
            &mut output,
            analysis
                .signatures
                .iter()
                .map(|sig| format!("{}  {}", sig.entry, sig.sha256)),
        );

        output
    }

    fn format_scan_human(&self, summary: &ScanSummary, analyses: &[PackageAnalysis]) -> String {
        let mut output = self.format_classifications_human(analyses);
        if !analyses.is_empty() {
            output.push('\n');
        }

        output.push_str(&format!("Scanned {} package(s)\n", summary.total));
        for (label, count) in &summary.by_type {
            let name = AppType::from_label(label).name();
            output.push_str(&format!("  {:<24} {}\n", name, count));
        }
        output
    }
}

fn push_tree(output: &mut String, lines: impl ExactSizeIterator<Item = String>) {
    let len = lines.len();
    if len == 0 {
        output.push_str("\u{2514}\u{2500} (none)\n");
        return;
    }
    for (i, line) in lines.enumerate() {
        let connector = if i == len - 1 { "\u{2514}" } else { "\u{251C}" };
        output.push_str(&format!("{}\u{2500} {}\n", connector, line));
    }
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
