//! Response assembly and text rendering
//!
//! Rendering walks sections in the order responders produced them and
//! never reorders, so identical answers always render byte-identical text.

use std::fmt::Write;

use serde::Serialize;

use crate::intent::{Classification, ConfidenceLevel, Intent};
use crate::question::QuestionType;

/// Content of one response section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SectionBody {
    /// A paragraph
    Text(String),
    /// A bulleted list
    List(Vec<String>),
}

/// One titled block of a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Optional heading rendered above the body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// Section content
    pub body: SectionBody,
}

impl Section {
    /// Paragraph without heading
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            heading: None,
            body: SectionBody::Text(text.into()),
        }
    }

    /// Paragraph with heading
    #[must_use]
    pub fn titled_text(heading: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            body: SectionBody::Text(text.into()),
        }
    }

    /// Bulleted list with heading
    #[must_use]
    pub fn list(heading: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            body: SectionBody::List(items),
        }
    }

    fn is_empty(&self) -> bool {
        match &self.body {
            SectionBody::Text(text) => text.trim().is_empty(),
            SectionBody::List(items) => items.is_empty(),
        }
    }
}

/// What a responder produces before formatting
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Answer {
    /// Keys of the knowledge entries the answer came from
    pub keys: Vec<String>,
    /// Sections in display order
    pub sections: Vec<Section>,
}

/// Final answer to one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Intent the query was routed by
    pub intent: Intent,
    /// Question type that shaped the framing
    pub question_type: QuestionType,
    /// Originating knowledge entry keys
    pub keys: Vec<String>,
    /// Classifier confidence
    pub confidence: f64,
    /// Band of `confidence`
    pub level: ConfidenceLevel,
    /// Structured sections behind `text`
    pub sections: Vec<Section>,
    /// Rendered user-facing text
    pub text: String,
}

impl Response {
    /// Whether the answer came from a knowledge entry
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        !self.keys.is_empty()
    }
}

/// Renders answers into user-facing text
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Assemble the final response for a classified query
    #[must_use]
    pub fn assemble(
        &self,
        classification: &Classification,
        question_type: QuestionType,
        answer: Answer,
    ) -> Response {
        let text = self.render(&answer.sections);
        Response {
            intent: classification.intent,
            question_type,
            keys: answer.keys,
            confidence: classification.confidence,
            level: classification.level,
            sections: answer.sections,
            text,
        }
    }

    /// Render sections in order, skipping empty ones
    #[must_use]
    pub fn render(&self, sections: &[Section]) -> String {
        let blocks: Vec<String> = sections
            .iter()
            .filter(|s| !s.is_empty())
            .map(|section| {
                let mut block = String::new();
                if let Some(heading) = &section.heading {
                    let _ = write!(block, "{heading}:");
                }
                match &section.body {
                    SectionBody::Text(text) => {
                        if !block.is_empty() {
                            block.push(' ');
                        }
                        block.push_str(text.trim());
                    }
                    SectionBody::List(items) => {
                        for item in items {
                            if !block.is_empty() {
                                block.push('\n');
                            }
                            let _ = write!(block, "- {item}");
                        }
                    }
                }
                block
            })
            .collect();

        blocks.join("\n\n")
    }
}
