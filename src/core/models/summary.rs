use serde::Serialize;

use crate::core::models::question::QuestionType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionCount {
    pub value: String,
    pub count: i64,
}

// Raw counts and denominators only; percentages and bar widths belong to
// whatever renders this.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SummaryStats {
    Choice {
        // Declared options in schema order, then values seen in answers but
        // absent from the option list, in first-seen order. Nothing is dropped.
        options: Vec<OptionCount>,
        other: Vec<OptionCount>,
        most_common: Option<String>,
    },
    Text {
        samples: Vec<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionSummary {
    pub question_id: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub type_: QuestionType,
    pub total_answered: i64,
    #[serde(flatten)]
    pub stats: SummaryStats,
}
