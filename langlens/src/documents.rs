//! Educator documents drafted from a readability report.
//!
//! Only prompt construction lives here; the text itself comes from whatever
//! [`TextGenerator`] the caller supplies.

use std::fmt;
use std::str::FromStr;

use indoc::formatdoc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::report::AnalysisReport;
use crate::traits::TextGenerator;

/// Kind of document to draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    LessonPlan,
    Quiz,
    ParentLetter,
}

impl DocumentKind {
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::LessonPlan => "Lesson Plan",
            DocumentKind::Quiz => "Comprehension Quiz",
            DocumentKind::ParentLetter => "Letter to Parents",
        }
    }

    fn instructions(&self) -> &'static str {
        match self {
            DocumentKind::LessonPlan => {
                "Write a one-session lesson plan with learning objectives, a warm-up, \
                 guided play in the world, a discussion segment and an exit ticket."
            }
            DocumentKind::Quiz => {
                "Write a comprehension quiz of eight questions (a mix of multiple choice \
                 and short answer) based only on the sample text, followed by an answer key."
            }
            DocumentKind::ParentLetter => {
                "Write a short, friendly letter to parents describing what their child will \
                 read and learn in this world and one way to continue the conversation at home."
            }
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::LessonPlan => "lesson-plan",
            DocumentKind::Quiz => "quiz",
            DocumentKind::ParentLetter => "parent-letter",
        };
        f.write_str(name)
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "lesson-plan" | "lesson" => Ok(DocumentKind::LessonPlan),
            "quiz" => Ok(DocumentKind::Quiz),
            "parent-letter" | "letter" => Ok(DocumentKind::ParentLetter),
            other => Err(format!(
                "unknown document kind '{other}' (expected lesson-plan, quiz or parent-letter)"
            )),
        }
    }
}

/// A drafted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub kind: DocumentKind,
    pub title: String,
    pub body: String,
}

/// Builds the generation prompt. Deterministic for a given report.
pub fn build_prompt(kind: DocumentKind, world_name: &str, report: &AnalysisReport) -> String {
    let metrics = &report.metrics;
    formatdoc! {"
        You are helping a teacher who uses the Minecraft world \"{world_name}\" in class.
        {instructions}

        Reading profile of the in-game text:
        - Reading level: {reading_level}
        - Target age: {target_age}
        - Flesch Reading Ease: {ease} ({ease_interpretation})
        - Flesch-Kincaid Grade: {grade}
        - Words analyzed: {words}

        Match vocabulary and sentence length to this profile.

        Sample of the in-game text:
        \"\"\"
        {sample}
        \"\"\"
        ",
        instructions = kind.instructions(),
        reading_level = metrics.reading_level,
        target_age = metrics.target_age_label,
        ease = metrics.flesch_reading_ease,
        ease_interpretation = metrics.ease_interpretation,
        grade = metrics.flesch_kincaid_grade,
        words = report.analyzed_file.extracted_text_words,
        sample = report.sample_text,
    }
}

/// Drafts a document of `kind` through `generator`.
pub fn generate_document(
    generator: &dyn TextGenerator,
    kind: DocumentKind,
    world_name: &str,
    report: &AnalysisReport,
) -> Result<GeneratedDocument, Error> {
    let prompt = build_prompt(kind, world_name, report);
    debug!(%kind, chars = prompt.len(), "requesting document");

    let body = generator.generate(&prompt)?.trim().to_string();
    if body.is_empty() {
        return Err(Error::generation_error("generator returned no text", None));
    }

    Ok(GeneratedDocument {
        kind,
        title: format!("{}: {}", kind.title(), world_name),
        body,
    })
}
