pub mod post;
pub mod user;

use crate::model::{
    post::EmptyContentError,
    user::{EmptyPasswordError, EmptyUsernameError},
};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    Username(#[from] EmptyUsernameError),
    #[error(transparent)]
    Password(#[from] EmptyPasswordError),
    #[error(transparent)]
    Content(#[from] EmptyContentError),
}
