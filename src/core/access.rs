use crate::core::models::form::Form;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Owner,
    PublicLimited,
    NotFound,
}

// An inactive form stays publicly viewable; only submission is gated.
pub fn view_for(form: Option<&Form>, requester: Option<i32>) -> View {
    match form {
        None => View::NotFound,
        Some(form) => match requester {
            Some(uid) if uid == form.owner_id => View::Owner,
            _ => View::PublicLimited,
        },
    }
}

// Rejected distinctly from "not found" so a closed form does not masquerade
// as a missing one.
pub fn check_accepts_responses(form: &Form) -> Result<(), Error> {
    if !form.is_active {
        return Err(Error::FormInactive);
    }
    Ok(())
}

pub fn check_owner(form: &Form, requester: i32) -> Result<(), Error> {
    if form.owner_id != requester {
        return Err(Error::AccessDenied);
    }
    Ok(())
}
