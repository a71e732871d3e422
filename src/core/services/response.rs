use crate::core::access::{check_accepts_responses, check_owner};
use crate::core::export::{export_filename, to_csv, to_table};
use crate::core::models::form::Form;
use crate::core::models::question::QuestionType;
use crate::core::models::response::{Answer, AnswerSubmit, AnswerValue, Create as ResponseCreate, Insert as ResponseInsert, Response, ANONYMOUS};
use crate::core::models::summary::QuestionSummary;
use crate::core::ports::repository::{FormCommon, ResponseCommon, Store};
use crate::core::services::form::find_form;
use crate::core::summary::summarize;
use crate::error::Error;

pub struct ResponseListing {
    pub responses: Vec<Response>,
    pub summaries: Vec<QuestionSummary>,
    pub total: i64,
}

pub async fn submit_response<S>(store: &mut S, submission: ResponseCreate, origin: Option<String>) -> Result<i32, Error>
where
    S: Store,
{
    let form = find_form(store, &submission.form).await?.ok_or(Error::NotFound("form"))?;
    check_accepts_responses(&form)?;
    if let Some(email) = submission.submitter_email.as_deref() {
        if !email.contains('@') {
            return Err(Error::Validation("invalid email format".into()));
        }
    }
    let answers = snapshot_answers(&form, submission.answers)?;
    let submitted_by = submission
        .submitted_by
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| ANONYMOUS.to_owned());
    ResponseCommon::insert(
        store,
        ResponseInsert {
            form_id: form.id,
            form_title: form.title,
            answers,
            submitted_by,
            submitter_email: submission.submitter_email,
            origin,
        },
    )
    .await
}

// Every submitted answer must reference a live question and carry the value
// shape that question's type calls for; the prompt and type recorded here are
// the snapshots aggregation later branches on.
fn snapshot_answers(form: &Form, submitted: Vec<AnswerSubmit>) -> Result<Vec<Answer>, Error> {
    if submitted.is_empty() {
        return Err(Error::Validation("at least one answer is required".into()));
    }
    let mut answers = Vec::with_capacity(submitted.len());
    for answer in submitted {
        let question = form
            .questions
            .iter()
            .find(|q| q.id == answer.question_id)
            .ok_or_else(|| Error::Validation(format!("answer references unknown question {}", answer.question_id)))?;
        let shape_ok = match question.type_ {
            QuestionType::MultiChoice => matches!(answer.value, AnswerValue::Choices(_)),
            _ => matches!(answer.value, AnswerValue::Text(_)),
        };
        if !shape_ok {
            return Err(Error::Validation(format!("answer for question {} does not match its type", question.id)));
        }
        answers.push(Answer {
            question_id: question.id.clone(),
            prompt: question.prompt.clone(),
            question_type: question.type_,
            value: answer.value,
        });
    }
    for question in form.questions.iter().filter(|q| q.required) {
        let answered = answers.iter().any(|a| a.question_id == question.id && !a.value.is_empty());
        if !answered {
            return Err(Error::Validation(format!("question {} requires an answer", question.id)));
        }
    }
    Ok(answers)
}

pub async fn form_responses<S>(store: &mut S, uid: i32, form_id: i32) -> Result<ResponseListing, Error>
where
    S: Store,
{
    let form = FormCommon::get(store, form_id).await?.ok_or(Error::NotFound("form"))?;
    check_owner(&form, uid)?;
    let responses = ResponseCommon::query_by_form(store, form_id).await?;
    let summaries = summarize(&form, &responses);
    let total = responses.len() as i64;
    Ok(ResponseListing { responses, summaries, total })
}

// The engine happily renders a header-only table; delivering an empty CSV
// file is a client error at this layer.
pub async fn export_responses<S>(store: &mut S, uid: i32, form_id: i32) -> Result<(String, String), Error>
where
    S: Store,
{
    let form = FormCommon::get(store, form_id).await?.ok_or(Error::NotFound("form"))?;
    check_owner(&form, uid)?;
    let responses = ResponseCommon::query_by_form(store, form_id).await?;
    if responses.is_empty() {
        return Err(Error::Validation("no responses to export".into()));
    }
    let csv = to_csv(&to_table(&form, &responses));
    Ok((export_filename(&form.title), csv))
}
