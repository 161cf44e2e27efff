//! The forum service facade.
//!
//! `Forum` wraps any [`StoreExecutor`] and exposes the application
//! operations: account lifecycle, categories, posts, comments, search and
//! browsing. Friendly validation (shape checks, uniqueness pre-reads,
//! authorship checks) happens here, before the store constraint would
//! reject the write with a driver error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entity::account::{self, Account, AccountModel, AccountRecord};
use crate::entity::category::{self, Category, CategoryModel, CategoryRecord};
use crate::entity::comment::{self, Comment, CommentModel, CommentRecord};
use crate::entity::post::{self, Post, PostModel, PostRecord};
use crate::executor::{StoreError, StoreExecutor};
use crate::pagination::{paginate, Page, PageError};
use crate::query::column::ColumnTrait;
use crate::query::traits::EntityTrait;
use crate::record::{soft_delete, update_columns, ColumnWrite, RecordError, RecordTrait, Set};

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

/// Errors surfaced by the service facade.
#[derive(Debug)]
pub enum ForumError {
    /// The username is already taken by a live account.
    DuplicateUsername(String),
    /// The email is already registered to a live account.
    DuplicateEmail(String),
    /// The title is already used by a live post or category.
    DuplicateTitle(String),
    /// No category carries this title.
    UnknownCategory(String),
    /// The email does not look like an address.
    InvalidEmail(String),
    /// A required field was empty.
    EmptyField(&'static str),
    /// The named kind of row does not exist (or is deleted).
    NotFound(&'static str),
    /// The actor does not own the content they tried to change.
    Forbidden { actor: i32, author: i32 },
    /// Invalid pagination request.
    Page(PageError),
    /// The record mapper rejected the write before I/O.
    Record(RecordError),
    /// The store failed.
    Store(StoreError),
}

impl std::fmt::Display for ForumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForumError::DuplicateUsername(name) => {
                write!(f, "Username '{name}' is already taken")
            }
            ForumError::DuplicateEmail(email) => {
                write!(f, "Email '{email}' is already registered")
            }
            ForumError::DuplicateTitle(title) => {
                write!(f, "Title '{title}' is already in use")
            }
            ForumError::UnknownCategory(title) => {
                write!(f, "No category titled '{title}'")
            }
            ForumError::InvalidEmail(email) => {
                write!(f, "'{email}' is not a valid email address")
            }
            ForumError::EmptyField(field) => write!(f, "{field} must not be empty"),
            ForumError::NotFound(kind) => write!(f, "No such {kind}"),
            ForumError::Forbidden { actor, author } => {
                write!(
                    f,
                    "Account {actor} may not modify content owned by account {author}"
                )
            }
            ForumError::Page(err) => write!(f, "Pagination error: {err}"),
            ForumError::Record(err) => write!(f, "Record error: {err}"),
            ForumError::Store(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl std::error::Error for ForumError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ForumError::Page(err) => Some(err),
            ForumError::Record(err) => Some(err),
            ForumError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ForumError {
    fn from(err: StoreError) -> Self {
        ForumError::Store(err)
    }
}

impl From<RecordError> for ForumError {
    fn from(err: RecordError) -> Self {
        match err {
            // Keep store failures in one class regardless of the path taken.
            RecordError::Store(err) => ForumError::Store(err),
            other => ForumError::Record(other),
        }
    }
}

impl From<PageError> for ForumError {
    fn from(err: PageError) -> Self {
        ForumError::Page(err)
    }
}

fn found<T>(result: Result<T, StoreError>, kind: &'static str) -> Result<T, ForumError> {
    match result {
        Ok(value) => Ok(value),
        Err(StoreError::NotFound) => Err(ForumError::NotFound(kind)),
        Err(err) => Err(ForumError::Store(err)),
    }
}

/// Account registration form.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
}

/// Profile edit form; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
}

/// Post creation form. The category is referenced by title, as submitted.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category_title: String,
}

/// Post edit form; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A post with its live comments, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostWithComments {
    pub post: PostModel,
    pub comments: Vec<CommentModel>,
}

/// The forum, served from one executor.
///
/// Holds no state besides the executor; every operation is a fresh set of
/// statements against it.
pub struct Forum<Ex: StoreExecutor> {
    executor: Ex,
}

impl<Ex: StoreExecutor> Forum<Ex> {
    pub fn new(executor: Ex) -> Self {
        Self { executor }
    }

    /// The executor operations run against.
    pub fn executor(&self) -> &Ex {
        &self.executor
    }

    // ---- accounts ----

    /// Register a new account.
    ///
    /// Rejects empty username/password, a malformed email, and username or
    /// email collisions with live accounts.
    pub fn register_account(&self, form: NewAccount) -> Result<AccountModel, ForumError> {
        if form.username.trim().is_empty() {
            return Err(ForumError::EmptyField("username"));
        }
        if form.password.is_empty() {
            return Err(ForumError::EmptyField("password"));
        }
        if !EMAIL_SHAPE.is_match(&form.email) {
            return Err(ForumError::InvalidEmail(form.email));
        }
        self.ensure_username_free(&form.username, None)?;
        self.ensure_email_free(&form.email, None)?;

        let mut record = AccountRecord::new(form.username, form.email, form.password);
        if let Some(bio) = form.bio {
            record.bio = Set(Some(bio));
        }
        Ok(record.insert(&self.executor)?)
    }

    /// Edit the actor's own profile.
    ///
    /// Uniqueness is re-checked with the actor's own row excluded, so
    /// keeping one's current username or email is never a collision.
    pub fn update_profile(
        &self,
        actor_id: i32,
        form: UpdateProfile,
    ) -> Result<AccountModel, ForumError> {
        let current = self.get_account(actor_id)?;

        let username = form.username.unwrap_or_else(|| current.username.clone());
        let email = form.email.unwrap_or_else(|| current.email.clone());
        let password = form.password.unwrap_or_else(|| current.password.clone());
        let bio = form.bio.or_else(|| current.bio.clone());

        if username.trim().is_empty() {
            return Err(ForumError::EmptyField("username"));
        }
        if password.is_empty() {
            return Err(ForumError::EmptyField("password"));
        }
        if !EMAIL_SHAPE.is_match(&email) {
            return Err(ForumError::InvalidEmail(email));
        }
        self.ensure_username_free(&username, Some(actor_id))?;
        self.ensure_email_free(&email, Some(actor_id))?;

        let mut record = AccountRecord::new(username, email, password);
        record.bio = Set(bio);
        Ok(record.update(&self.executor, actor_id)?)
    }

    /// Soft-delete the actor's account.
    pub fn delete_account(&self, actor_id: i32) -> Result<(), ForumError> {
        self.get_account(actor_id)?;
        soft_delete::<Account, _>(&self.executor, actor_id)?;
        Ok(())
    }

    /// The live account with this id.
    pub fn get_account(&self, id: i32) -> Result<AccountModel, ForumError> {
        found(Account::find_by_id(id).one(&self.executor), "account")
    }

    /// The live account with this username.
    pub fn find_account_by_username(&self, username: &str) -> Result<AccountModel, ForumError> {
        found(
            Account::find()
                .filter(account::Column::Username.eq(username))
                .one(&self.executor),
            "account",
        )
    }

    // ---- categories ----

    /// Create a category with a unique title.
    pub fn create_category(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<CategoryModel, ForumError> {
        if title.trim().is_empty() {
            return Err(ForumError::EmptyField("title"));
        }
        self.ensure_category_title_free(title)?;

        let mut record = CategoryRecord::new(title);
        if let Some(text) = description {
            record.description = Set(Some(text.to_string()));
        }
        Ok(record.insert(&self.executor)?)
    }

    /// Every live category, oldest first.
    pub fn list_categories(&self) -> Result<Vec<CategoryModel>, ForumError> {
        Ok(Category::read_all(&self.executor, None)?)
    }

    /// The live category with this id.
    pub fn get_category(&self, id: i32) -> Result<CategoryModel, ForumError> {
        found(Category::find_by_id(id).one(&self.executor), "category")
    }

    /// The live category with this title.
    pub fn find_category_by_title(&self, title: &str) -> Result<CategoryModel, ForumError> {
        found(
            Category::find()
                .filter(category::Column::Title.eq(title))
                .one(&self.executor),
            "category",
        )
    }

    // ---- posts ----

    /// Publish a post under a category referenced by title.
    ///
    /// The author must be a live account and the title unique among live
    /// posts. On success the category's `post_count` is advanced in place.
    pub fn create_post(&self, author_id: i32, form: NewPost) -> Result<PostModel, ForumError> {
        if form.title.trim().is_empty() {
            return Err(ForumError::EmptyField("title"));
        }
        if form.content.trim().is_empty() {
            return Err(ForumError::EmptyField("content"));
        }
        let author = self.get_account(author_id)?;
        let category = match self.find_category_by_title(&form.category_title) {
            Ok(category) => category,
            Err(ForumError::NotFound(_)) => {
                return Err(ForumError::UnknownCategory(form.category_title))
            }
            Err(err) => return Err(err),
        };
        self.ensure_post_title_free(&form.title, None)?;

        let record = PostRecord::new(form.title, form.content, author.id, category.id);
        let post = record.insert(&self.executor)?;

        update_columns::<Category, _>(
            &self.executor,
            category.id,
            &[(category::Column::PostCount, ColumnWrite::Increment)],
        )?;
        Ok(post)
    }

    /// The live post with this id.
    pub fn get_post(&self, id: i32) -> Result<PostModel, ForumError> {
        found(Post::find_by_id(id).one(&self.executor), "post")
    }

    /// Live posts, oldest first.
    pub fn list_posts(&self, limit: Option<u64>) -> Result<Vec<PostModel>, ForumError> {
        Ok(Post::read_all(&self.executor, limit)?)
    }

    /// Live posts in one category, oldest first.
    pub fn posts_by_category(&self, category_id: i32) -> Result<Vec<PostModel>, ForumError> {
        Ok(Post::read_by(
            &self.executor,
            post::Column::CategoryId,
            category_id,
            None,
        )?)
    }

    /// Live posts by one author, oldest first.
    pub fn posts_by_author(&self, author_id: i32) -> Result<Vec<PostModel>, ForumError> {
        Ok(Post::read_by(
            &self.executor,
            post::Column::AuthorId,
            author_id,
            None,
        )?)
    }

    /// Edit a post's title and/or content. Only the author may.
    pub fn update_post(
        &self,
        actor_id: i32,
        post_id: i32,
        form: UpdatePost,
    ) -> Result<PostModel, ForumError> {
        let post = self.get_post(post_id)?;
        if post.author_id != actor_id {
            return Err(ForumError::Forbidden {
                actor: actor_id,
                author: post.author_id,
            });
        }

        let mut writes: Vec<(post::Column, ColumnWrite)> = Vec::new();
        if let Some(title) = form.title {
            if title.trim().is_empty() {
                return Err(ForumError::EmptyField("title"));
            }
            self.ensure_post_title_free(&title, Some(post_id))?;
            writes.push((post::Column::Title, ColumnWrite::Value(title.into())));
        }
        if let Some(content) = form.content {
            if content.trim().is_empty() {
                return Err(ForumError::EmptyField("content"));
            }
            writes.push((post::Column::Content, ColumnWrite::Value(content.into())));
        }
        if writes.is_empty() {
            return Ok(post);
        }

        update_columns::<Post, _>(&self.executor, post_id, &writes)?;
        self.get_post(post_id)
    }

    /// Soft-delete a post. Only the author may; comments stay attached.
    pub fn delete_post(&self, actor_id: i32, post_id: i32) -> Result<(), ForumError> {
        let post = self.get_post(post_id)?;
        if post.author_id != actor_id {
            return Err(ForumError::Forbidden {
                actor: actor_id,
                author: post.author_id,
            });
        }
        soft_delete::<Post, _>(&self.executor, post_id)?;
        Ok(())
    }

    /// Count a view of a live post.
    ///
    /// The bump happens in the store (`view_count = view_count + 1`), so
    /// concurrent views never lose updates.
    pub fn record_view(&self, post_id: i32) -> Result<(), ForumError> {
        self.get_post(post_id)?;
        update_columns::<Post, _>(
            &self.executor,
            post_id,
            &[(post::Column::ViewCount, ColumnWrite::Increment)],
        )?;
        Ok(())
    }

    // ---- comments ----

    /// Comment on a live post.
    pub fn add_comment(
        &self,
        author_id: i32,
        post_id: i32,
        content: &str,
    ) -> Result<CommentModel, ForumError> {
        if content.trim().is_empty() {
            return Err(ForumError::EmptyField("content"));
        }
        self.get_post(post_id)?;
        Ok(CommentRecord::new(content, author_id, post_id).insert(&self.executor)?)
    }

    /// Soft-delete a comment.
    ///
    /// Allowed to the comment's author, and to the post's author as
    /// moderation of their own thread.
    pub fn delete_comment(&self, actor_id: i32, comment_id: i32) -> Result<(), ForumError> {
        let comment = found(
            Comment::find_by_id(comment_id).one(&self.executor),
            "comment",
        )?;
        if actor_id != comment.author_id {
            // Thread moderation holds even if the post was since deleted.
            let post = found(
                Post::find_with_deleted()
                    .filter(post::Column::Id.eq(comment.post_id))
                    .one(&self.executor),
                "post",
            )?;
            if actor_id != post.author_id {
                return Err(ForumError::Forbidden {
                    actor: actor_id,
                    author: comment.author_id,
                });
            }
        }
        soft_delete::<Comment, _>(&self.executor, comment_id)?;
        Ok(())
    }

    // ---- composite reads ----

    /// A post with its live comments, oldest first.
    pub fn post_with_comments(&self, post_id: i32) -> Result<PostWithComments, ForumError> {
        let post = self.get_post(post_id)?;
        let comments = Comment::read_by(&self.executor, comment::Column::PostId, post_id, None)?;
        Ok(PostWithComments { post, comments })
    }

    /// Resolve a post's author.
    pub fn post_author(&self, post: &PostModel) -> Result<AccountModel, ForumError> {
        self.get_account(post.author_id)
    }

    /// Resolve a post's category.
    pub fn post_category(&self, post: &PostModel) -> Result<CategoryModel, ForumError> {
        self.get_category(post.category_id)
    }

    // ---- search and browsing ----

    /// Live posts whose title contains the needle, oldest first.
    ///
    /// Wildcards in the needle match literally; no matches is an empty
    /// list, not an error.
    pub fn search_posts(
        &self,
        needle: &str,
        limit: Option<u64>,
    ) -> Result<Vec<PostModel>, ForumError> {
        Ok(Post::read_containing(
            &self.executor,
            post::Column::Title,
            needle,
            limit,
        )?)
    }

    /// One page of live posts, oldest first.
    pub fn browse_posts(&self, per_page: usize, page: usize) -> Result<Page<PostModel>, ForumError> {
        let posts = Post::read_all(&self.executor, None)?;
        Ok(paginate(posts, per_page, page)?)
    }

    // ---- uniqueness pre-reads ----

    fn ensure_username_free(
        &self,
        username: &str,
        exclude: Option<i32>,
    ) -> Result<(), ForumError> {
        let mut query = Account::find().filter(account::Column::Username.eq(username));
        if let Some(id) = exclude {
            query = query.filter(account::Column::Id.ne(id));
        }
        if query.exists(&self.executor)? {
            return Err(ForumError::DuplicateUsername(username.to_string()));
        }
        Ok(())
    }

    fn ensure_email_free(&self, email: &str, exclude: Option<i32>) -> Result<(), ForumError> {
        let mut query = Account::find().filter(account::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(account::Column::Id.ne(id));
        }
        if query.exists(&self.executor)? {
            return Err(ForumError::DuplicateEmail(email.to_string()));
        }
        Ok(())
    }

    fn ensure_post_title_free(&self, title: &str, exclude: Option<i32>) -> Result<(), ForumError> {
        let mut query = Post::find().filter(post::Column::Title.eq(title));
        if let Some(id) = exclude {
            query = query.filter(post::Column::Id.ne(id));
        }
        if query.exists(&self.executor)? {
            return Err(ForumError::DuplicateTitle(title.to_string()));
        }
        Ok(())
    }

    fn ensure_category_title_free(&self, title: &str) -> Result<(), ForumError> {
        if Category::find()
            .filter(category::Column::Title.eq(title))
            .exists(&self.executor)?
        {
            return Err(ForumError::DuplicateTitle(title.to_string()));
        }
        Ok(())
    }
}
