use crate::core::models::form::Form;
use crate::core::models::question::Question;
use crate::core::models::response::{AnswerValue, Response};
use crate::core::models::summary::{OptionCount, QuestionSummary, SummaryStats};
use crate::core::resolver::{resolve, Projection};

pub const SAMPLE_LIMIT: usize = 5;

// One summary per live question, in schema order. The live schema decides
// which questions appear and how they are labeled; each answer contributes
// under its submission-time shape, so a scalar counts once and a list
// explodes into one count per selected value.
pub fn summarize(form: &Form, responses: &[Response]) -> Vec<QuestionSummary> {
    form.questions.iter().map(|q| summarize_question(q, responses)).collect()
}

fn summarize_question(question: &Question, responses: &[Response]) -> QuestionSummary {
    let projections = resolve(question, responses);
    let total_answered = projections.iter().filter(|p| p.is_present()).count() as i64;
    let stats = if question.type_.is_choice() {
        choice_stats(question, &projections)
    } else {
        text_stats(&projections)
    };
    QuestionSummary {
        question_id: question.id.clone(),
        prompt: question.prompt.clone(),
        type_: question.type_,
        total_answered,
        stats,
    }
}

fn choice_stats(question: &Question, projections: &[Projection]) -> SummaryStats {
    let mut options: Vec<OptionCount> = question
        .options
        .iter()
        .map(|o| OptionCount { value: o.clone(), count: 0 })
        .collect();
    let mut other: Vec<OptionCount> = Vec::new();
    for value in projections.iter().filter_map(Projection::value) {
        match value {
            AnswerValue::Text(s) => bump(&mut options, &mut other, s),
            AnswerValue::Choices(choices) => {
                for c in choices {
                    bump(&mut options, &mut other, c);
                }
            }
        }
    }
    let most_common = most_common(&options, &other);
    SummaryStats::Choice { options, other, most_common }
}

// Values outside the declared option set are counted, not discarded; they
// just land in their own bucket.
fn bump(options: &mut [OptionCount], other: &mut Vec<OptionCount>, value: &str) {
    if let Some(entry) = options.iter_mut().find(|c| c.value == value) {
        entry.count += 1;
        return;
    }
    match other.iter_mut().find(|c| c.value == value) {
        Some(entry) => entry.count += 1,
        None => other.push(OptionCount { value: value.to_owned(), count: 1 }),
    }
}

// First strict maximum wins, and declared options are scanned before the
// other bucket, so a tie resolves to the option declared earliest.
fn most_common(options: &[OptionCount], other: &[OptionCount]) -> Option<String> {
    options
        .iter()
        .chain(other.iter())
        .filter(|c| c.count > 0)
        .fold(None::<&OptionCount>, |best, candidate| match best {
            Some(b) if b.count >= candidate.count => Some(b),
            _ => Some(candidate),
        })
        .map(|c| c.value.clone())
}

fn text_stats(projections: &[Projection]) -> SummaryStats {
    let samples = projections
        .iter()
        .filter_map(Projection::value)
        .take(SAMPLE_LIMIT)
        .map(|value| match value {
            AnswerValue::Text(s) => s.clone(),
            // A list recorded before the question was retyped to text still
            // previews as a single line.
            AnswerValue::Choices(choices) => choices.join(", "),
        })
        .collect();
    SummaryStats::Text { samples }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::models::question::QuestionType;
    use crate::core::models::response::Answer;
    use chrono::Utc;

    fn question(id: &str, type_: QuestionType, options: Vec<&str>) -> Question {
        Question {
            id: id.into(),
            type_,
            prompt: format!("Question {}", id),
            options: options.into_iter().map(String::from).collect(),
            required: true,
        }
    }

    fn form(questions: Vec<Question>) -> Form {
        Form {
            id: 1,
            title: "Feedback".into(),
            description: None,
            questions,
            is_active: true,
            owner_id: 1,
            public_handle: "h".into(),
            created_at: Utc::now(),
        }
    }

    fn response(answers: Vec<(&str, QuestionType, AnswerValue)>) -> Response {
        Response {
            id: 0,
            form_id: 1,
            form_title: "Feedback".into(),
            answers: answers
                .into_iter()
                .map(|(id, question_type, value)| Answer {
                    question_id: id.into(),
                    prompt: format!("Question {}", id),
                    question_type,
                    value,
                })
                .collect(),
            submitted_by: "Anonymous".into(),
            submitter_email: None,
            origin: None,
            submitted_at: Utc::now(),
        }
    }

    fn text(s: &str) -> AnswerValue {
        AnswerValue::Text(s.into())
    }

    fn choices(values: Vec<&str>) -> AnswerValue {
        AnswerValue::Choices(values.into_iter().map(String::from).collect())
    }

    #[test]
    fn test_three_question_scenario() {
        let f = form(vec![
            question("q1", QuestionType::SingleChoice, vec!["A", "B"]),
            question("q2", QuestionType::Text, vec![]),
            question("q3", QuestionType::MultiChoice, vec!["X", "Y", "Z"]),
        ]);
        let rs = vec![
            response(vec![
                ("q1", QuestionType::SingleChoice, text("A")),
                ("q2", QuestionType::Text, text("hello")),
                ("q3", QuestionType::MultiChoice, choices(vec!["X", "Y"])),
            ]),
            response(vec![
                ("q1", QuestionType::SingleChoice, text("B")),
                ("q2", QuestionType::Text, text("")),
                ("q3", QuestionType::MultiChoice, choices(vec!["Z"])),
            ]),
        ];
        let summaries = summarize(&f, &rs);
        assert_eq!(summaries.len(), 3);

        assert_eq!(summaries[0].total_answered, 2);
        match &summaries[0].stats {
            SummaryStats::Choice { options, other, most_common } => {
                assert_eq!(options, &vec![OptionCount { value: "A".into(), count: 1 }, OptionCount { value: "B".into(), count: 1 }]);
                assert!(other.is_empty());
                // tie between A and B resolves to the first declared option
                assert_eq!(most_common.as_deref(), Some("A"));
            }
            _ => panic!("expected choice stats"),
        }

        // the blank text answer is absent, not an empty sample
        assert_eq!(summaries[1].total_answered, 1);
        match &summaries[1].stats {
            SummaryStats::Text { samples } => assert_eq!(samples, &vec!["hello".to_string()]),
            _ => panic!("expected text stats"),
        }

        assert_eq!(summaries[2].total_answered, 2);
        match &summaries[2].stats {
            SummaryStats::Choice { options, .. } => {
                assert_eq!(
                    options,
                    &vec![
                        OptionCount { value: "X".into(), count: 1 },
                        OptionCount { value: "Y".into(), count: 1 },
                        OptionCount { value: "Z".into(), count: 1 },
                    ]
                );
            }
            _ => panic!("expected choice stats"),
        }
    }

    #[test]
    fn test_multi_choice_explodes_per_value() {
        let f = form(vec![
            question("q1", QuestionType::MultiChoice, vec!["Red", "Green", "Blue"]),
            question("q2", QuestionType::Text, vec![]),
            question("q3", QuestionType::Text, vec![]),
        ]);
        let rs = vec![response(vec![("q1", QuestionType::MultiChoice, choices(vec!["Red", "Blue"]))])];
        let summaries = summarize(&f, &rs);
        match &summaries[0].stats {
            SummaryStats::Choice { options, .. } => {
                assert_eq!(
                    options,
                    &vec![
                        OptionCount { value: "Red".into(), count: 1 },
                        OptionCount { value: "Green".into(), count: 0 },
                        OptionCount { value: "Blue".into(), count: 1 },
                    ]
                );
            }
            _ => panic!("expected choice stats"),
        }
        assert_eq!(summaries[0].total_answered, 1);
    }

    #[test]
    fn test_tie_break_follows_declared_order() {
        let f = form(vec![
            question("q1", QuestionType::SingleChoice, vec!["B", "A"]),
            question("q2", QuestionType::Text, vec![]),
            question("q3", QuestionType::Text, vec![]),
        ]);
        let rs = vec![
            response(vec![("q1", QuestionType::SingleChoice, text("A"))]),
            response(vec![("q1", QuestionType::SingleChoice, text("A"))]),
            response(vec![("q1", QuestionType::SingleChoice, text("B"))]),
            response(vec![("q1", QuestionType::SingleChoice, text("B"))]),
        ];
        match &summarize(&f, &rs)[0].stats {
            SummaryStats::Choice { most_common, .. } => assert_eq!(most_common.as_deref(), Some("B")),
            _ => panic!("expected choice stats"),
        }
    }

    #[test]
    fn test_unknown_values_go_to_other_bucket() {
        let f = form(vec![
            question("q1", QuestionType::SingleChoice, vec!["A", "B"]),
            question("q2", QuestionType::Text, vec![]),
            question("q3", QuestionType::Text, vec![]),
        ]);
        let rs = vec![
            response(vec![("q1", QuestionType::SingleChoice, text("C"))]),
            response(vec![("q1", QuestionType::SingleChoice, text("C"))]),
            response(vec![("q1", QuestionType::SingleChoice, text("A"))]),
        ];
        let summaries = summarize(&f, &rs);
        match &summaries[0].stats {
            SummaryStats::Choice { options, other, most_common } => {
                let total: i64 = options.iter().chain(other.iter()).map(|c| c.count).sum();
                assert_eq!(total, summaries[0].total_answered);
                assert_eq!(other, &vec![OptionCount { value: "C".into(), count: 2 }]);
                assert_eq!(most_common.as_deref(), Some("C"));
            }
            _ => panic!("expected choice stats"),
        }
    }

    #[test]
    fn test_orphan_answers_are_invisible() {
        let f = form(vec![
            question("q1", QuestionType::Text, vec![]),
            question("q2", QuestionType::Text, vec![]),
            question("q3", QuestionType::Text, vec![]),
        ]);
        // q9 no longer exists in the live schema
        let rs = vec![response(vec![("q9", QuestionType::Text, text("stale"))])];
        let summaries = summarize(&f, &rs);
        assert!(summaries.iter().all(|s| s.total_answered == 0));
        assert!(summaries.iter().all(|s| s.question_id != "q9"));
    }

    #[test]
    fn test_empty_response_set() {
        let f = form(vec![
            question("q1", QuestionType::SingleChoice, vec!["A"]),
            question("q2", QuestionType::Text, vec![]),
            question("q3", QuestionType::Text, vec![]),
        ]);
        let summaries = summarize(&f, &[]);
        assert_eq!(summaries.len(), 3);
        assert!(summaries.iter().all(|s| s.total_answered == 0));
        match &summaries[0].stats {
            SummaryStats::Choice { options, other, most_common } => {
                assert_eq!(options, &vec![OptionCount { value: "A".into(), count: 0 }]);
                assert!(other.is_empty());
                assert!(most_common.is_none());
            }
            _ => panic!("expected choice stats"),
        }
    }

    #[test]
    fn test_retyped_question_keeps_snapshot_shape() {
        // q1 collected multi-choice answers, then the owner retyped it to
        // single-choice: the historical list still explodes per value.
        let f = form(vec![
            question("q1", QuestionType::SingleChoice, vec!["X", "Y"]),
            question("q2", QuestionType::Text, vec![]),
            question("q3", QuestionType::Text, vec![]),
        ]);
        let rs = vec![response(vec![("q1", QuestionType::MultiChoice, choices(vec!["X", "Y"]))])];
        let summaries = summarize(&f, &rs);
        assert_eq!(summaries[0].total_answered, 1);
        match &summaries[0].stats {
            SummaryStats::Choice { options, .. } => {
                assert_eq!(options.iter().map(|c| c.count).collect::<Vec<_>>(), vec![1, 1]);
            }
            _ => panic!("expected choice stats"),
        }
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let f = form(vec![
            question("q1", QuestionType::SingleChoice, vec!["A", "B"]),
            question("q2", QuestionType::Text, vec![]),
            question("q3", QuestionType::MultiChoice, vec!["X"]),
        ]);
        let rs = vec![response(vec![
            ("q1", QuestionType::SingleChoice, text("A")),
            ("q2", QuestionType::Text, text("fine")),
            ("q3", QuestionType::MultiChoice, choices(vec!["X"])),
        ])];
        let first = serde_json::to_string(&summarize(&f, &rs)).unwrap();
        let second = serde_json::to_string(&summarize(&f, &rs)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sample_cap() {
        let f = form(vec![
            question("q1", QuestionType::Text, vec![]),
            question("q2", QuestionType::Text, vec![]),
            question("q3", QuestionType::Text, vec![]),
        ]);
        let rs: Vec<Response> = (0..8)
            .map(|i| response(vec![("q1", QuestionType::Text, text(&format!("answer {}", i)))]))
            .collect();
        let summaries = summarize(&f, &rs);
        assert_eq!(summaries[0].total_answered, 8);
        match &summaries[0].stats {
            SummaryStats::Text { samples } => {
                assert_eq!(samples.len(), SAMPLE_LIMIT);
                assert_eq!(samples[0], "answer 0");
            }
            _ => panic!("expected text stats"),
        }
    }
}
