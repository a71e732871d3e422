use chrono::{DateTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::types::Json;
use sqlx::{query, query_as, query_scalar, Executor, FromRow, PgPool, Postgres, Transaction};

use crate::core::models::{
    form::{Changeset as FormChangeset, Form, Insert as FormInsert},
    question::Question,
    response::{Answer, Insert as ResponseInsert, Response},
    user::{Insert as UserInsert, User},
};
use crate::core::ports::repository::{FormCommon, ResponseCommon, Store, TxStore, UserCommon};
use crate::error::Error;

pub struct PgStore<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    executor: E,
}

impl<E> PgStore<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

// Questions and answers live as JSONB documents on their owning row; the
// schema inside them is the serde shape of the core models.
#[derive(Debug, FromRow)]
struct FormRow {
    id: i32,
    title: String,
    description: Option<String>,
    questions: Json<Vec<Question>>,
    is_active: bool,
    owner_id: i32,
    public_handle: String,
    created_at: DateTime<Utc>,
}

impl From<FormRow> for Form {
    fn from(row: FormRow) -> Self {
        Form {
            id: row.id,
            title: row.title,
            description: row.description,
            questions: row.questions.0,
            is_active: row.is_active,
            owner_id: row.owner_id,
            public_handle: row.public_handle,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ResponseRow {
    id: i32,
    form_id: i32,
    form_title: String,
    answers: Json<Vec<Answer>>,
    submitted_by: String,
    submitter_email: Option<String>,
    origin: Option<String>,
    submitted_at: DateTime<Utc>,
}

impl From<ResponseRow> for Response {
    fn from(row: ResponseRow) -> Self {
        Response {
            id: row.id,
            form_id: row.form_id,
            form_title: row.form_title,
            answers: row.answers.0,
            submitted_by: row.submitted_by,
            submitter_email: row.submitter_email,
            origin: row.origin,
            submitted_at: row.submitted_at,
        }
    }
}

impl<E> FormCommon for PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, form: FormInsert) -> Result<i32, Error> {
        let id = query_scalar(
            "INSERT INTO forms (title, description, questions, owner_id, public_handle) VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(form.title)
        .bind(form.description)
        .bind(Json(form.questions))
        .bind(form.owner_id)
        .bind(form.public_handle)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(id)
    }

    async fn update(&mut self, id: i32, changeset: FormChangeset) -> Result<(), Error> {
        query("UPDATE forms SET title = $1, description = $2, questions = $3, is_active = $4 WHERE id = $5")
            .bind(changeset.title)
            .bind(changeset.description)
            .bind(Json(changeset.questions))
            .bind(changeset.is_active)
            .bind(id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn get(&mut self, id: i32) -> Result<Option<Form>, Error> {
        let row: Option<FormRow> = query_as("SELECT * FROM forms WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(row.map(Form::from))
    }

    async fn get_by_handle(&mut self, handle: &str) -> Result<Option<Form>, Error> {
        let row: Option<FormRow> = query_as("SELECT * FROM forms WHERE public_handle = $1")
            .bind(handle)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(row.map(Form::from))
    }

    async fn query_by_owner(&mut self, owner_id: i32) -> Result<Vec<Form>, Error> {
        let rows: Vec<FormRow> = query_as("SELECT * FROM forms WHERE owner_id = $1 ORDER BY created_at DESC")
            .bind(owner_id)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(rows.into_iter().map(Form::from).collect())
    }

    async fn delete(&mut self, id: i32) -> Result<u64, Error> {
        let result = query("DELETE FROM forms WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(result.rows_affected())
    }
}

impl<E> ResponseCommon for PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, response: ResponseInsert) -> Result<i32, Error> {
        let id = query_scalar(
            "INSERT INTO responses (form_id, form_title, answers, submitted_by, submitter_email, origin) VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(response.form_id)
        .bind(response.form_title)
        .bind(Json(response.answers))
        .bind(response.submitted_by)
        .bind(response.submitter_email)
        .bind(response.origin)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(id)
    }

    async fn query_by_form(&mut self, form_id: i32) -> Result<Vec<Response>, Error> {
        let rows: Vec<ResponseRow> = query_as("SELECT * FROM responses WHERE form_id = $1 ORDER BY submitted_at DESC")
            .bind(form_id)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(rows.into_iter().map(Response::from).collect())
    }

    async fn count_by_form(&mut self, form_id: i32) -> Result<i64, Error> {
        let total = query_scalar("SELECT COUNT(*) FROM responses WHERE form_id = $1")
            .bind(form_id)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(total)
    }

    async fn delete_by_form(&mut self, form_id: i32) -> Result<u64, Error> {
        let result = query("DELETE FROM responses WHERE form_id = $1")
            .bind(form_id)
            .execute(&mut self.executor)
            .await?;
        Ok(result.rows_affected())
    }
}

impl<E> UserCommon for PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, user: UserInsert) -> Result<i32, Error> {
        let id = query_scalar(
            "INSERT INTO users (name, business_name, email, password, salt) VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(user.name)
        .bind(user.business_name)
        .bind(user.email)
        .bind(user.password)
        .bind(user.salt)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(id)
    }

    async fn get(&mut self, id: i32) -> Result<Option<User>, Error> {
        let user = query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(user)
    }

    async fn get_by_email(&mut self, email: &str) -> Result<Option<User>, Error> {
        let user = query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(user)
    }
}

impl Store for PgStore<PoolConnection<Postgres>> {}
impl Store for PgStore<Transaction<'static, Postgres>> {}

impl TxStore for PgStore<Transaction<'static, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}

pub struct PgStoreManager {
    pool: PgPool,
}

impl PgStoreManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn acquire(&self) -> Result<PgStore<PoolConnection<Postgres>>, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgStore::new(conn))
    }

    pub async fn begin(&self) -> Result<PgStore<Transaction<'static, Postgres>>, Error> {
        let tx = self.pool.begin().await?;
        Ok(PgStore::new(tx))
    }
}
