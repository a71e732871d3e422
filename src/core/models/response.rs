use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::question::QuestionType;

pub const ANONYMOUS: &str = "Anonymous";

// Scalar for text-like and single-choice answers, a list for multi-choice.
// Untagged so the stored JSON reads exactly like the submitted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Choices(Vec<String>),
}

impl AnswerValue {
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::Choices(c) => c.is_empty(),
        }
    }
}

// One answer inside a stored response. Prompt and type are snapshots taken at
// submission time: the form may be edited afterwards and aggregation must
// keep interpreting historical values under the shape they were given in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub value: AnswerValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub id: i32,
    pub form_id: i32,
    pub form_title: String,
    pub answers: Vec<Answer>,
    pub submitted_by: String,
    pub submitter_email: Option<String>,
    pub origin: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerSubmit {
    pub question_id: String,
    pub value: AnswerValue,
}

#[derive(Debug, Deserialize)]
pub struct Create {
    pub form: String,
    pub answers: Vec<AnswerSubmit>,
    pub submitted_by: Option<String>,
    pub submitter_email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub form_id: i32,
    pub form_title: String,
    pub answers: Vec<Answer>,
    pub submitted_by: String,
    pub submitter_email: Option<String>,
    pub origin: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_untagged_value_shapes() {
        let scalar: AnswerValue = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(scalar, AnswerValue::Text("hello".into()));
        let list: AnswerValue = serde_json::from_str(r#"["Red", "Blue"]"#).unwrap();
        assert_eq!(list, AnswerValue::Choices(vec!["Red".into(), "Blue".into()]));
    }

    #[test]
    fn test_emptiness() {
        assert!(AnswerValue::Text("  ".into()).is_empty());
        assert!(AnswerValue::Choices(vec![]).is_empty());
        assert!(!AnswerValue::Text("x".into()).is_empty());
        assert!(!AnswerValue::Choices(vec!["X".into()]).is_empty());
    }
}
