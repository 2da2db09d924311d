//! Email address checks.

use validator::ValidateEmail;

use crate::user::User;

/// Syntactic check of an email address (local part, `@`, domain).
///
/// Deliverability is never checked.
pub fn is_valid(email: &str) -> bool {
    email.validate_email()
}

/// Aggregate result of scanning stored emails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmailStatus {
    AllValid,
    SomeInvalid,
}

impl EmailStatus {
    pub fn message(&self) -> &'static str {
        match self {
            EmailStatus::AllValid => "All emails are valid",
            EmailStatus::SomeInvalid => "Some emails are Invalid",
        }
    }
}

/// Check every user's email, stopping at the first invalid one.
pub fn check_all<'a>(users: impl IntoIterator<Item = &'a User>) -> EmailStatus {
    match users.into_iter().find(|user| !is_valid(&user.email)) {
        Some(user) => {
            tracing::warn!(user_id = user.id, "stored email is invalid");
            EmailStatus::SomeInvalid
        },
        None => EmailStatus::AllValid,
    }
}
