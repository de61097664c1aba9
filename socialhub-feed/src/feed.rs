//! The in-memory registry behind the feed: registered users, posts in
//! creation order, and the logged-in user. Nothing here survives the
//! process; persistence is an explicit non-goal.

use socialhub_common::model::{
    ModelValidationError,
    post::{Comment, MessageContent, Post},
    user::{Password, User, Username},
};
use std::{
    fmt::{Display, Formatter},
    sync::Arc,
};
use thiserror::Error;

pub type Result<T, E = FeedError> = std::result::Result<T, E>;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum FeedError {
    #[error(transparent)]
    Validation(#[from] ModelValidationError),
    #[error("No user is logged in")]
    NotLoggedIn,
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("There is no post to comment on")]
    NoPosts,
}

#[derive(Clone, Debug, Default)]
pub struct Feed {
    users: Vec<Arc<User>>,
    posts: Vec<Post>,
    current_user: Option<Arc<User>>,
}

impl Feed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Users in registration order.
    #[must_use]
    pub fn users(&self) -> &[Arc<User>] {
        &self.users
    }

    /// Posts in creation order. The sequence is never reordered.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&Arc<User>> {
        self.current_user.as_ref()
    }

    /// Appends a new user to the registry. There is deliberately no
    /// duplicate-username check: two users may share a username, and
    /// [`Feed::login`] resolves the collision by scan order.
    pub fn register(&mut self, username: String, password: String) -> Result<Arc<User>> {
        let (username, password) = validate_credentials(username, password)?;

        let user = Arc::new(User::new(username, password));
        self.users.push(Arc::clone(&user));

        Ok(user)
    }

    /// Scans users in registration order and logs in the first one whose
    /// username and password both match verbatim. On failure the current
    /// user is left untouched.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Arc<User>> {
        let user = self
            .users
            .iter()
            .find(|user| user.username.get() == username && user.check_password(password))
            .ok_or(FeedError::InvalidCredentials)?;

        self.current_user = Some(Arc::clone(user));

        Ok(Arc::clone(user))
    }

    /// Appends a post authored by the current user, with no comments yet.
    pub fn create_post(&mut self, content: String) -> Result<&Post> {
        let content = validate_content(content)?;
        let author = self.current_author()?;

        self.posts.push(Post::new(author, content));
        let appended = self.posts.len() - 1;

        Ok(&self.posts[appended])
    }

    /// Appends a comment by the current user to the most recent post.
    /// Comments always target the last post; there is no target selection.
    pub fn add_comment(&mut self, content: String) -> Result<&Comment> {
        let content = validate_content(content)?;
        let author = self.current_author()?;
        let post = self.posts.last_mut().ok_or(FeedError::NoPosts)?;

        Ok(post.add_comment(Comment { author, content }))
    }

    /// The feed as text, one `username: content` line per post, each
    /// comment indented below it, then a blank separator line. Pure
    /// function of the current state.
    #[must_use]
    pub fn render_feed(&self) -> String {
        self.to_string()
    }

    fn current_author(&self) -> Result<Arc<User>> {
        self.current_user.clone().ok_or(FeedError::NotLoggedIn)
    }
}

impl Display for Feed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for post in &self.posts {
            writeln!(f, "{}: {}", post.author.username, post.content)?;
            for comment in post.comments() {
                writeln!(f, "  ↳ {}: {}", comment.author.username, comment.content)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

fn validate_credentials(
    username: String,
    password: String,
) -> Result<(Username, Password), ModelValidationError> {
    Ok((Username::new(username)?, Password::new(password)?))
}

fn validate_content(content: String) -> Result<MessageContent, ModelValidationError> {
    MessageContent::new(content).map_err(ModelValidationError::from)
}

#[cfg(test)]
mod tests {
    use crate::feed::{Feed, FeedError};
    use std::sync::Arc;

    fn feed_with_user(username: &str, password: &str) -> Feed {
        let mut feed = Feed::new();
        feed.register(username.to_owned(), password.to_owned())
            .unwrap();
        feed
    }

    #[test]
    fn register_then_login_succeeds() {
        let mut feed = feed_with_user("alice", "pw1");

        let user = feed.login("alice", "pw1").unwrap();
        assert_eq!(user.username.get(), "alice");
        assert!(Arc::ptr_eq(feed.current_user().unwrap(), &user));
    }

    #[test]
    fn register_rejects_empty_fields() {
        let mut feed = Feed::new();

        assert!(matches!(
            feed.register(String::new(), "pw".to_owned()),
            Err(FeedError::Validation(_))
        ));
        assert!(matches!(
            feed.register("alice".to_owned(), String::new()),
            Err(FeedError::Validation(_))
        ));
        assert!(feed.users().is_empty());
    }

    #[test]
    fn failed_login_leaves_current_user_unchanged() {
        let mut feed = feed_with_user("alice", "pw1");

        assert_eq!(
            feed.login("alice", "wrong"),
            Err(FeedError::InvalidCredentials)
        );
        assert_eq!(
            feed.login("nobody", "pw1"),
            Err(FeedError::InvalidCredentials)
        );
        assert!(feed.current_user().is_none());

        feed.login("alice", "pw1").unwrap();
        assert_eq!(
            feed.login("alice", "wrong"),
            Err(FeedError::InvalidCredentials)
        );
        assert_eq!(feed.current_user().unwrap().username.get(), "alice");
    }

    #[test]
    fn login_is_case_sensitive() {
        let mut feed = feed_with_user("Alice", "pw1");

        assert_eq!(
            feed.login("alice", "pw1"),
            Err(FeedError::InvalidCredentials)
        );
        assert!(feed.login("Alice", "pw1").is_ok());
    }

    #[test]
    fn duplicate_usernames_resolve_to_first_registered() {
        let mut feed = Feed::new();
        let first = feed.register("alice".to_owned(), "pw1".to_owned()).unwrap();
        feed.register("alice".to_owned(), "pw2".to_owned()).unwrap();

        assert_eq!(feed.users().len(), 2);

        // Same username and password on both records would also return the
        // first; here the passwords differ, so each record is reachable.
        let logged_in = feed.login("alice", "pw1").unwrap();
        assert!(Arc::ptr_eq(&logged_in, &first));
        assert!(feed.login("alice", "pw2").is_ok());
    }

    #[test]
    fn create_post_requires_login_and_content() {
        let mut feed = feed_with_user("alice", "pw1");

        assert_eq!(
            feed.create_post("hello".to_owned()),
            Err(FeedError::NotLoggedIn)
        );

        feed.login("alice", "pw1").unwrap();
        assert!(matches!(
            feed.create_post(String::new()),
            Err(FeedError::Validation(_))
        ));
        assert!(feed.posts().is_empty());

        feed.create_post("hello".to_owned()).unwrap();
        assert_eq!(feed.posts().len(), 1);
    }

    #[test]
    fn comment_without_posts_is_not_found() {
        let mut feed = feed_with_user("alice", "pw1");
        feed.login("alice", "pw1").unwrap();

        assert_eq!(feed.add_comment("hi".to_owned()), Err(FeedError::NoPosts));
    }

    #[test]
    fn comment_attaches_to_latest_post() {
        let mut feed = Feed::new();
        feed.register("alice".to_owned(), "pw1".to_owned()).unwrap();
        feed.register("bob".to_owned(), "pw2".to_owned()).unwrap();

        feed.login("alice", "pw1").unwrap();
        feed.create_post("first post".to_owned()).unwrap();
        feed.create_post("second post".to_owned()).unwrap();

        feed.login("bob", "pw2").unwrap();
        feed.add_comment("nice!".to_owned()).unwrap();

        assert!(feed.posts()[0].comments().is_empty());
        let comments = feed.posts()[1].comments();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author.username.get(), "bob");
        assert_eq!(comments[0].content.get(), "nice!");
    }

    #[test]
    fn render_matches_expected_layout() {
        let mut feed = Feed::new();
        feed.register("u".to_owned(), "pw1".to_owned()).unwrap();
        feed.register("v".to_owned(), "pw2".to_owned()).unwrap();

        feed.login("u", "pw1").unwrap();
        feed.create_post("hello".to_owned()).unwrap();
        feed.login("v", "pw2").unwrap();
        feed.add_comment("hi".to_owned()).unwrap();

        assert_eq!(feed.render_feed(), "u: hello\n  ↳ v: hi\n\n");
    }

    #[test]
    fn render_is_idempotent() {
        let mut feed = feed_with_user("alice", "pw1");
        feed.login("alice", "pw1").unwrap();
        feed.create_post("hello".to_owned()).unwrap();
        feed.add_comment("self reply".to_owned()).unwrap();

        assert_eq!(feed.render_feed(), feed.render_feed());
    }

    #[test]
    fn empty_feed_renders_empty() {
        assert_eq!(Feed::new().render_feed(), "");
    }

    #[test]
    fn full_scenario() {
        let mut feed = Feed::new();
        feed.register("alice".to_owned(), "pw1".to_owned()).unwrap();
        feed.register("bob".to_owned(), "pw2".to_owned()).unwrap();

        let alice = feed.login("alice", "pw1").unwrap();
        feed.create_post("first post".to_owned()).unwrap();

        assert_eq!(feed.posts().len(), 1);
        assert!(Arc::ptr_eq(&feed.posts()[0].author, &alice));
        assert_eq!(feed.posts()[0].content.get(), "first post");
        assert!(feed.posts()[0].comments().is_empty());

        feed.login("bob", "pw2").unwrap();
        feed.add_comment("nice!".to_owned()).unwrap();

        // The comment attached to alice's post rather than creating one.
        assert_eq!(feed.posts().len(), 1);
        assert_eq!(feed.posts()[0].comments().len(), 1);
        assert_eq!(
            feed.render_feed(),
            "alice: first post\n  ↳ bob: nice!\n\n"
        );
    }
}
