//! Rendering assembled paragraphs for people and scripts.
//!
//! Two shapes are rendered:
//!
//! - a single [`ParagraphsOutput`] (one text → paragraphs), and
//! - a [`DocumentView`] built from a summarizer response, which pairs the
//!   summary paragraphs with paragraphs of the raw extracted text, both cut
//!   to the same count.
//!
//! Text output separates paragraphs with a blank line. JSON output is a
//! single pretty-printed object.

use anyhow::Result;
use clap::ValueEnum;
use paraform_core::{assemble, Assembly, ParagraphCount, Strategy};
use serde::{Deserialize, Serialize};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Paragraphs for one input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphsOutput {
    pub strategy: Strategy,
    pub count: ParagraphCount,
    pub paragraphs: Vec<String>,
}

impl ParagraphsOutput {
    pub fn new(assembly: Assembly, count: ParagraphCount) -> Self {
        Self {
            strategy: assembly.strategy,
            count,
            paragraphs: assembly.paragraphs,
        }
    }

    pub fn from_text(text: &str, count: ParagraphCount) -> Self {
        Self::new(assemble(text, count), count)
    }

    pub fn render(&self, format: OutputFormat, explain: bool) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => {
                let mut out = String::new();
                if explain {
                    out.push_str(&format!(
                        "# strategy: {}, paragraphs: {} of {}\n\n",
                        self.strategy,
                        self.paragraphs.len(),
                        self.count
                    ));
                }
                out.push_str(&self.paragraphs.join("\n\n"));
                Ok(out)
            }
        }
    }
}

/// Response body of a summarization service:
/// `{ "summary": "...", "raw_text": "...", "message": "..." }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Summary and raw text, each as display paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentView {
    pub count: ParagraphCount,
    pub summary: Vec<String>,
    pub raw_text: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DocumentView {
    pub fn from_response(response: &SummaryResponse, count: ParagraphCount) -> Self {
        let paragraphs = |text: &Option<String>| {
            assemble(text.as_deref().unwrap_or_default(), count).paragraphs
        };
        Self {
            count,
            summary: paragraphs(&response.summary),
            raw_text: paragraphs(&response.raw_text),
            message: response.message.clone(),
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => {
                if self.summary.is_empty() {
                    return Ok("No summary yet.".to_string());
                }
                let mut out = String::from("Summary\n\n");
                out.push_str(&self.summary.join("\n\n"));
                if !self.raw_text.is_empty() {
                    out.push_str("\n\nRaw Extracted Text\n\n");
                    out.push_str(&self.raw_text.join("\n\n"));
                }
                Ok(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(n: usize) -> ParagraphCount {
        ParagraphCount::new(n).unwrap()
    }

    #[test]
    fn text_output_separates_paragraphs_with_blank_lines() {
        let out = ParagraphsOutput::from_text("Hello world. This is great! What next?", count(2));
        assert_eq!(
            out.render(OutputFormat::Text, false).unwrap(),
            "Hello world. This is great!\n\nWhat next?"
        );
    }

    #[test]
    fn explain_prefixes_strategy() {
        let out = ParagraphsOutput::from_text("A. B. C.", count(5));
        let text = out.render(OutputFormat::Text, true).unwrap();
        assert!(text.starts_with("# strategy: sentences, paragraphs: 3 of 5\n\n"));
    }

    #[test]
    fn json_output_has_strategy_count_and_paragraphs() {
        let out = ParagraphsOutput::from_text("one\ntwo\nthree", count(2));
        let json: serde_json::Value =
            serde_json::from_str(&out.render(OutputFormat::Json, false).unwrap()).unwrap();
        assert_eq!(json["strategy"], "lines");
        assert_eq!(json["count"], 2);
        assert_eq!(json["paragraphs"], serde_json::json!(["one", "two"]));
    }

    #[test]
    fn document_view_cuts_both_texts_to_the_same_count() {
        let response: SummaryResponse = serde_json::from_str(
            r#"{
                "summary": "Short summary. With two sentences.",
                "raw_text": "Page one.\nPage two.\nPage three.",
                "message": "ok"
            }"#,
        )
        .unwrap();
        let view = DocumentView::from_response(&response, count(2));
        assert_eq!(view.summary, vec!["Short summary.", "With two sentences."]);
        assert_eq!(view.raw_text, vec!["Page one.", "Page two."]);
        assert_eq!(view.message.as_deref(), Some("ok"));
    }

    #[test]
    fn document_view_without_summary_renders_placeholder() {
        let response: SummaryResponse =
            serde_json::from_str(r#"{ "raw_text": "Some raw text." }"#).unwrap();
        let view = DocumentView::from_response(&response, count(1));
        assert!(view.summary.is_empty());
        assert_eq!(view.render(OutputFormat::Text).unwrap(), "No summary yet.");
    }

    #[test]
    fn document_view_text_has_both_sections() {
        let response = SummaryResponse {
            summary: Some("The gist.".into()),
            raw_text: Some("Everything else.".into()),
            message: None,
        };
        let text = DocumentView::from_response(&response, count(1))
            .render(OutputFormat::Text)
            .unwrap();
        assert_eq!(
            text,
            "Summary\n\nThe gist.\n\nRaw Extracted Text\n\nEverything else."
        );
    }
}
