use crate::model::user::User;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use std::{
    fmt::{Display, Formatter},
    sync::Arc,
};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageContent(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The message content must not be empty")]
pub struct EmptyContentError;

impl MessageContent {
    pub fn new(content: String) -> Result<Self, EmptyContentError> {
        if content.is_empty() {
            Err(EmptyContentError)
        } else {
            Ok(MessageContent(content))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Display for MessageContent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for MessageContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        MessageContent::new(inner)
            .map_err(|_| Error::invalid_value(Unexpected::Str(""), &"MessageContent"))
    }
}

/// A comment holds a shared reference to its author, not a copy. Two
/// registered users may share a username, so the reference is the identity.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Comment {
    pub author: Arc<User>,
    pub content: MessageContent,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Post {
    pub author: Arc<User>,
    pub content: MessageContent,
    comments: Vec<Comment>,
}

impl Post {
    #[must_use]
    pub fn new(author: Arc<User>, content: MessageContent) -> Self {
        Self {
            author,
            content,
            comments: Vec::new(),
        }
    }

    /// Comments in append order. The sequence is never reordered.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn add_comment(&mut self, comment: Comment) -> &Comment {
        self.comments.push(comment);
        let appended = self.comments.len() - 1;
        &self.comments[appended]
    }
}
