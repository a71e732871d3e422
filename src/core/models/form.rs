use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::question::{Create as QuestionCreate, Question};
use crate::error::Error;

pub const MIN_QUESTIONS: usize = 3;
pub const MAX_QUESTIONS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Form {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub is_active: bool,
    pub owner_id: i32,
    pub public_handle: String,
    pub created_at: DateTime<Utc>,
}

// The limited shape handed to anyone who is not the owner: enough to render
// and submit the form, nothing about its responses or its owner's account.
#[derive(Debug, Clone, Serialize)]
pub struct PublicForm {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub owner_display_name: String,
    pub public_handle: String,
}

impl PublicForm {
    pub fn from_form(form: Form, owner_display_name: String) -> Self {
        PublicForm {
            title: form.title,
            description: form.description,
            questions: form.questions,
            owner_display_name,
            public_handle: form.public_handle,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormWithCount {
    #[serde(flatten)]
    pub form: Form,
    pub response_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct Create {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<QuestionCreate>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions: Option<Vec<QuestionCreate>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub owner_id: i32,
    pub public_handle: String,
}

// Fully merged state written back by an update; the service resolves which
// fields changed before the store ever sees it.
#[derive(Debug, Clone)]
pub struct Changeset {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub is_active: bool,
}

pub fn validate_title(title: &str) -> Result<(), Error> {
    if title.trim().len() < 3 {
        return Err(Error::Validation("title must be at least 3 characters".into()));
    }
    Ok(())
}

pub fn validate_questions(questions: &[QuestionCreate]) -> Result<(), Error> {
    if questions.len() < MIN_QUESTIONS || questions.len() > MAX_QUESTIONS {
        return Err(Error::Validation(format!(
            "form must have between {} and {} questions",
            MIN_QUESTIONS, MAX_QUESTIONS
        )));
    }
    for q in questions {
        q.validate()?;
    }
    Ok(())
}

pub fn materialize_questions(questions: Vec<QuestionCreate>, tag: Option<&str>) -> Vec<Question> {
    questions.into_iter().enumerate().map(|(i, q)| q.materialize(i, tag)).collect()
}
