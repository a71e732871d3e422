use serde::Serialize;
use uuid::Uuid;

use crate::core::access::{check_owner, view_for, View};
use crate::core::models::form::{
    materialize_questions, validate_questions, validate_title, Changeset, Create as FormCreate, Form, FormWithCount,
    Insert as FormInsert, PublicForm, Update as FormUpdate,
};
use crate::core::ports::repository::{FormCommon, ResponseCommon, Store, TxStore, UserCommon};
use crate::error::Error;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Detail {
    Owner { form: Form, response_count: i64 },
    Public { form: PublicForm },
}

pub async fn create_form<S>(store: &mut S, uid: i32, form: FormCreate) -> Result<Form, Error>
where
    S: Store,
{
    validate_title(&form.title)?;
    validate_questions(&form.questions)?;
    let id = FormCommon::insert(
        store,
        FormInsert {
            title: form.title.trim().to_owned(),
            description: form.description,
            questions: materialize_questions(form.questions, None),
            owner_id: uid,
            public_handle: Uuid::new_v4().to_string(),
        },
    )
    .await?;
    FormCommon::get(store, id).await?.ok_or(Error::NotFound("form"))
}

pub async fn list_forms<S>(store: &mut S, uid: i32) -> Result<Vec<FormWithCount>, Error>
where
    S: Store,
{
    let forms = FormCommon::query_by_owner(store, uid).await?;
    let mut out = Vec::with_capacity(forms.len());
    for form in forms {
        let response_count = ResponseCommon::count_by_form(store, form.id).await?;
        out.push(FormWithCount { form, response_count });
    }
    Ok(out)
}

// The public link carries an opaque handle while the dashboard uses numeric
// ids; both resolve here.
pub async fn find_form<S>(store: &mut S, id_or_handle: &str) -> Result<Option<Form>, Error>
where
    S: Store,
{
    match id_or_handle.parse::<i32>() {
        Ok(id) => FormCommon::get(store, id).await,
        Err(_) => FormCommon::get_by_handle(store, id_or_handle).await,
    }
}

pub async fn form_detail<S>(store: &mut S, id_or_handle: &str, requester: Option<i32>) -> Result<Detail, Error>
where
    S: Store,
{
    let form = find_form(store, id_or_handle).await?.ok_or(Error::NotFound("form"))?;
    match view_for(Some(&form), requester) {
        View::NotFound => Err(Error::NotFound("form")),
        View::Owner => {
            let response_count = ResponseCommon::count_by_form(store, form.id).await?;
            Ok(Detail::Owner { form, response_count })
        }
        View::PublicLimited => {
            let owner = UserCommon::get(store, form.owner_id).await?.ok_or(Error::NotFound("form owner"))?;
            Ok(Detail::Public {
                form: PublicForm::from_form(form, owner.business_name),
            })
        }
    }
}

pub async fn update_form<S>(store: &mut S, uid: i32, id: i32, update: FormUpdate) -> Result<Form, Error>
where
    S: Store,
{
    let form = FormCommon::get(store, id).await?.ok_or(Error::NotFound("form"))?;
    check_owner(&form, uid)?;
    let title = match update.title {
        Some(title) => {
            validate_title(&title)?;
            title.trim().to_owned()
        }
        None => form.title,
    };
    let questions = match update.questions {
        Some(questions) => {
            validate_questions(&questions)?;
            // replacement questions get fresh ids so answers recorded against
            // the previous schema stay orphaned instead of silently rebinding
            let mut tag = Uuid::new_v4().simple().to_string();
            tag.truncate(8);
            materialize_questions(questions, Some(&tag))
        }
        None => form.questions,
    };
    FormCommon::update(
        store,
        id,
        Changeset {
            title,
            description: update.description.or(form.description),
            questions,
            is_active: update.is_active.unwrap_or(form.is_active),
        },
    )
    .await?;
    FormCommon::get(store, id).await?.ok_or(Error::NotFound("form"))
}

// Responses never outlive their form.
pub async fn delete_form<T>(mut store: T, uid: i32, id: i32) -> Result<(), Error>
where
    T: TxStore,
{
    let form = FormCommon::get(&mut store, id).await?.ok_or(Error::NotFound("form"))?;
    check_owner(&form, uid)?;
    ResponseCommon::delete_by_form(&mut store, id).await?;
    FormCommon::delete(&mut store, id).await?;
    store.commit().await?;
    Ok(())
}
