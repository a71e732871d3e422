use crate::core::models::question::{Question, QuestionType};
use crate::core::models::response::{AnswerValue, Response};

// A response's answer to one question, matched by stable question id against
// whatever schema the form carries now. The type is the snapshot recorded at
// submission time, never the live question's type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection<'a> {
    Present {
        value: &'a AnswerValue,
        question_type: QuestionType,
    },
    Absent,
}

impl<'a> Projection<'a> {
    pub fn is_present(&self) -> bool {
        matches!(self, Projection::Present { .. })
    }

    pub fn value(&self) -> Option<&'a AnswerValue> {
        match self {
            Projection::Present { value, .. } => Some(value),
            Projection::Absent => None,
        }
    }
}

// Absent covers three cases that all read the same downstream: the response
// predates the question, the answer was left blank, or the id was never in
// this response at all.
pub fn resolve_one<'a>(question: &Question, response: &'a Response) -> Projection<'a> {
    match response.answers.iter().find(|a| a.question_id == question.id) {
        Some(answer) if !answer.value.is_empty() => Projection::Present {
            value: &answer.value,
            question_type: answer.question_type,
        },
        _ => Projection::Absent,
    }
}

pub fn resolve<'a>(question: &Question, responses: &'a [Response]) -> Vec<Projection<'a>> {
    responses.iter().map(|r| resolve_one(question, r)).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::models::response::Answer;
    use chrono::Utc;

    fn question(id: &str, type_: QuestionType) -> Question {
        Question {
            id: id.into(),
            type_,
            prompt: "How was your visit?".into(),
            options: vec![],
            required: true,
        }
    }

    fn response(answers: Vec<Answer>) -> Response {
        Response {
            id: 1,
            form_id: 1,
            form_title: "Feedback".into(),
            answers,
            submitted_by: "Anonymous".into(),
            submitter_email: None,
            origin: None,
            submitted_at: Utc::now(),
        }
    }

    fn answer(question_id: &str, type_: QuestionType, value: AnswerValue) -> Answer {
        Answer {
            question_id: question_id.into(),
            prompt: "How was your visit?".into(),
            question_type: type_,
            value,
        }
    }

    #[test]
    fn test_matches_by_id() {
        let q = question("q2", QuestionType::Text);
        let r = response(vec![
            answer("q1", QuestionType::Text, AnswerValue::Text("no".into())),
            answer("q2", QuestionType::Text, AnswerValue::Text("yes".into())),
        ]);
        let p = resolve_one(&q, &r);
        assert_eq!(p.value(), Some(&AnswerValue::Text("yes".into())));
    }

    #[test]
    fn test_missing_id_is_absent() {
        let q = question("q9", QuestionType::Text);
        let r = response(vec![answer("q1", QuestionType::Text, AnswerValue::Text("yes".into()))]);
        assert_eq!(resolve_one(&q, &r), Projection::Absent);
    }

    #[test]
    fn test_blank_answer_is_absent() {
        let q = question("q1", QuestionType::Text);
        let r = response(vec![answer("q1", QuestionType::Text, AnswerValue::Text("".into()))]);
        assert_eq!(resolve_one(&q, &r), Projection::Absent);
        let r = response(vec![answer("q1", QuestionType::MultiChoice, AnswerValue::Choices(vec![]))]);
        assert_eq!(resolve_one(&q, &r), Projection::Absent);
    }

    #[test]
    fn test_snapshot_type_survives_retype() {
        // q1 was multi-choice when the response was recorded; now it is text.
        let q = question("q1", QuestionType::Text);
        let r = response(vec![answer(
            "q1",
            QuestionType::MultiChoice,
            AnswerValue::Choices(vec!["X".into()]),
        )]);
        match resolve_one(&q, &r) {
            Projection::Present { question_type, .. } => assert_eq!(question_type, QuestionType::MultiChoice),
            Projection::Absent => panic!("expected present"),
        }
    }

    #[test]
    fn test_one_projection_per_response() {
        let q = question("q1", QuestionType::Text);
        let rs = vec![
            response(vec![answer("q1", QuestionType::Text, AnswerValue::Text("a".into()))]),
            response(vec![]),
            response(vec![answer("q1", QuestionType::Text, AnswerValue::Text("b".into()))]),
        ];
        let projections = resolve(&q, &rs);
        assert_eq!(projections.len(), 3);
        assert_eq!(projections.iter().filter(|p| p.is_present()).count(), 2);
    }
}
