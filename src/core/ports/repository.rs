use crate::core::models::{
    form::{Changeset as FormChangeset, Form, Insert as FormInsert},
    response::{Insert as ResponseInsert, Response},
    user::{Insert as UserInsert, User},
};
use crate::error::Error;

pub trait FormCommon {
    async fn insert(&mut self, form: FormInsert) -> Result<i32, Error>;
    async fn update(&mut self, id: i32, changeset: FormChangeset) -> Result<(), Error>;
    async fn get(&mut self, id: i32) -> Result<Option<Form>, Error>;
    async fn get_by_handle(&mut self, handle: &str) -> Result<Option<Form>, Error>;
    async fn query_by_owner(&mut self, owner_id: i32) -> Result<Vec<Form>, Error>;
    async fn delete(&mut self, id: i32) -> Result<u64, Error>;
}

pub trait ResponseCommon {
    async fn insert(&mut self, response: ResponseInsert) -> Result<i32, Error>;
    // newest first, finite and in-memory sized for a single summary/export call
    async fn query_by_form(&mut self, form_id: i32) -> Result<Vec<Response>, Error>;
    async fn count_by_form(&mut self, form_id: i32) -> Result<i64, Error>;
    async fn delete_by_form(&mut self, form_id: i32) -> Result<u64, Error>;
}

pub trait UserCommon {
    async fn insert(&mut self, user: UserInsert) -> Result<i32, Error>;
    async fn get(&mut self, id: i32) -> Result<Option<User>, Error>;
    async fn get_by_email(&mut self, email: &str) -> Result<Option<User>, Error>;
}

pub trait Store: FormCommon + ResponseCommon + UserCommon {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}
