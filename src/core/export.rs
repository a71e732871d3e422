use itertools::Itertools;

use crate::core::models::form::Form;
use crate::core::models::response::{AnswerValue, Response};
use crate::core::resolver::resolve_one;

pub const META_COLUMNS: [&str; 3] = ["Submitted By", "Email", "Submitted At"];
const MULTI_VALUE_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// One row per response, one column per current question after the fixed
// metadata columns. Column identity follows the stable question id while the
// label follows the live prompt, so a renamed question keeps its historical
// cells under its new header.
pub fn to_table(form: &Form, responses: &[Response]) -> Table {
    let header = META_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(form.questions.iter().map(|q| q.prompt.clone()))
        .collect();
    let rows = responses
        .iter()
        .map(|response| {
            let mut row = vec![
                response.submitted_by.clone(),
                response.submitter_email.clone().unwrap_or_default(),
                response.submitted_at.to_rfc3339(),
            ];
            for question in &form.questions {
                let cell = match resolve_one(question, response).value() {
                    None => String::new(),
                    Some(AnswerValue::Text(s)) => s.clone(),
                    Some(AnswerValue::Choices(choices)) => join_values(choices),
                };
                row.push(cell);
            }
            row
        })
        .collect();
    Table { header, rows }
}

// Selected values may not contain the join separator, so any comma inside a
// single value is substituted before joining.
fn join_values(values: &[String]) -> String {
    values.iter().map(|v| v.replace(',', ";")).join(MULTI_VALUE_SEPARATOR)
}

// RFC 4180 style: fields containing the delimiter, a quote or a line break
// are quote-wrapped with inner quotes doubled; every record, the header
// included, is newline-terminated.
pub fn to_csv(table: &Table) -> String {
    let mut out = String::new();
    push_record(&mut out, &table.header);
    for row in &table.rows {
        push_record(&mut out, row);
    }
    out
}

fn push_record(out: &mut String, fields: &[String]) {
    out.push_str(&fields.iter().map(|f| escape_field(f)).join(","));
    out.push('\n');
}

fn escape_field(field: &str) -> String {
    if field.chars().any(|c| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

pub fn export_filename(title: &str) -> String {
    let sanitized: String = title.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
    format!("{}_responses.csv", sanitized)
}
