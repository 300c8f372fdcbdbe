//! Plain-text investigation reports.
//!
//! A report has four parts:
//! 1. **Header**: title, id, upper-cased status, creation time, description
//! 2. **Sources**: each source with its evidence and connections
//! 3. **Notes**: only present when the investigation has notes
//! 4. **Footer**: a closing rule

use authority_model::{AuthoritySource, Investigation};
use serde::{Deserialize, Serialize};

/// Layout settings for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Width of the `=` and `-` separator lines.
    pub rule_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { rule_width: 70 }
    }
}

/// Renders investigations as text.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    config: ReportConfig,
}

impl ReportWriter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Render the full report. Lines are joined with `\n`, without a trailing newline.
    pub fn render(&self, inv: &Investigation) -> String {
        let heavy = "=".repeat(self.config.rule_width);
        let light = "-".repeat(self.config.rule_width);
        let mut lines: Vec<String> = Vec::new();

        lines.push(heavy.clone());
        lines.push(format!("INVESTIGATION REPORT: {}", inv.title));
        lines.push(heavy.clone());
        lines.push(format!("ID: {}", inv.investigation_id));
        lines.push(format!("Status: {}", inv.status.to_uppercase()));
        lines.push(format!("Created: {}", inv.created_at));
        lines.push(String::new());
        lines.push(format!("Description: {}", inv.description));

        lines.push(String::new());
        lines.push(light.clone());
        lines.push(format!("AUTHORITY SOURCES ({})", inv.source_count()));
        lines.push(light.clone());
        for source in inv.sources() {
            Self::render_source(source, &mut lines);
        }

        if !inv.notes().is_empty() {
            lines.push(String::new());
            lines.push(light.clone());
            lines.push(format!("INVESTIGATION NOTES ({})", inv.notes().len()));
            lines.push(light);
            for note in inv.notes() {
                lines.push(String::new());
                lines.push(format!("[{}]", note.timestamp));
                lines.push(format!("  {}", note.note));
            }
        }

        lines.push(String::new());
        lines.push(heavy);
        lines.join("\n")
    }

    fn render_source(source: &AuthoritySource, lines: &mut Vec<String>) {
        lines.push(String::new());
        lines.push(format!("[{}] {}", source.source_id, source.name));
        lines.push(format!("  Type: {}", source.authority_type));
        lines.push(format!("  Description: {}", source.description));

        let evidence = source.evidence();
        if !evidence.is_empty() {
            lines.push(format!("  Evidence ({}):", evidence.len()));
            for (i, ev) in evidence.iter().enumerate() {
                lines.push(format!("    {}. [{}] {}", i + 1, ev.kind, ev.description));
                if ev.has_source() {
                    lines.push(format!("       Source: {}", ev.source));
                }
            }
        }

        let connections = source.connections();
        if !connections.is_empty() {
            let joined: Vec<&str> = connections.iter().map(|c| c.as_str()).collect();
            lines.push(format!("  Connections: {}", joined.join(", ")));
        }
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
