use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Text,
    LongText,
    SingleChoice,
    MultiChoice,
}

impl QuestionType {
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultiChoice)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: QuestionType,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct Create {
    #[serde(rename = "type")]
    pub type_: QuestionType,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "default_required")]
    pub required: bool,
}

impl Create {
    pub fn validate(&self) -> Result<(), Error> {
        if self.prompt.trim().len() < 5 {
            return Err(Error::Validation("question prompt must be at least 5 characters".into()));
        }
        if self.type_.is_choice() {
            if self.options.is_empty() {
                return Err(Error::Validation("choice question must declare options".into()));
            }
            if self.options.iter().any(|o| o.trim().is_empty()) {
                return Err(Error::Validation("choice question options must not be blank".into()));
            }
        } else if !self.options.is_empty() {
            return Err(Error::Validation("non-choice question must not declare options".into()));
        }
        Ok(())
    }

    // Ids are assigned once and never reused: the first generation gets plain
    // positional ids, later generations carry a fresh tag so answers recorded
    // against an earlier schema can never collide with the new one.
    pub fn materialize(self, index: usize, tag: Option<&str>) -> Question {
        let id = match tag {
            None => format!("q{}", index + 1),
            Some(tag) => format!("q{}-{}", index + 1, tag),
        };
        Question {
            id,
            type_: self.type_,
            prompt: self.prompt.trim().to_owned(),
            options: self.options.into_iter().map(|o| o.trim().to_owned()).collect(),
            required: self.required,
        }
    }
}
