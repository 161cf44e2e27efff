//! Forum posts. Rows live in the `post` table.
//!
//! `view_count` is sequence-backed so the store can advance it without a
//! read-modify-write; see the `Increment` write directive.

use chrono::NaiveDateTime;
use may_postgres::Row;
use sea_query::{Iden, Value};
use serde::{Deserialize, Serialize};

use crate::model::ModelTrait;
use crate::query::column::{ColumnDefault, ColumnDefinition, ColumnKind, ColumnTrait};
use crate::query::traits::{EntityName, EntityTrait, FromRow};
use crate::record::{ActiveValue, NotSet, RecordTrait, Set};

#[derive(Copy, Clone, Default, Debug)]
pub struct Post;

impl EntityName for Post {
    fn table_name(&self) -> &'static str {
        "post"
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Column {
    Id,
    Title,
    Content,
    ViewCount,
    AuthorId,
    CategoryId,
    CreatedAt,
    IsDeleted,
}

impl Iden for Column {
    fn unquoted(&self) -> &str {
        match self {
            Column::Id => "id",
            Column::Title => "title",
            Column::Content => "content",
            Column::ViewCount => "view_count",
            Column::AuthorId => "author_id",
            Column::CategoryId => "category_id",
            Column::CreatedAt => "created_at",
            Column::IsDeleted => "is_deleted",
        }
    }
}

impl ColumnTrait for Column {
    fn def(self) -> ColumnDefinition {
        match self {
            Column::Id => ColumnDefinition::new(ColumnKind::Integer).auto_increment(),
            Column::Title => ColumnDefinition::new(ColumnKind::String(255)).unique(),
            Column::Content => ColumnDefinition::new(ColumnKind::Text),
            Column::ViewCount => {
                ColumnDefinition::new(ColumnKind::BigInteger).auto_increment()
            }
            Column::AuthorId => {
                ColumnDefinition::new(ColumnKind::Integer).references("profile", "id")
            }
            Column::CategoryId => {
                ColumnDefinition::new(ColumnKind::Integer).references("category", "id")
            }
            Column::CreatedAt => ColumnDefinition::new(ColumnKind::Timestamp)
                .default_value(ColumnDefault::CurrentTimestamp),
            Column::IsDeleted => ColumnDefinition::new(ColumnKind::Boolean)
                .default_value(ColumnDefault::Bool(false)),
        }
    }
}

impl EntityTrait for Post {
    type Model = PostModel;
    type Column = Column;

    fn columns() -> &'static [Column] {
        &[
            Column::Id,
            Column::Title,
            Column::Content,
            Column::ViewCount,
            Column::AuthorId,
            Column::CategoryId,
            Column::CreatedAt,
            Column::IsDeleted,
        ]
    }

    fn primary_key() -> Column {
        Column::Id
    }

    fn deleted_flag() -> Column {
        Column::IsDeleted
    }
}

/// One stored post row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostModel {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub view_count: i64,
    pub author_id: i32,
    pub category_id: i32,
    pub created_at: NaiveDateTime,
    pub is_deleted: bool,
}

impl FromRow for PostModel {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            view_count: row.try_get("view_count")?,
            author_id: row.try_get("author_id")?,
            category_id: row.try_get("category_id")?,
            created_at: row.try_get("created_at")?,
            is_deleted: row.try_get("is_deleted")?,
        })
    }
}

impl ModelTrait for PostModel {
    type Entity = Post;

    fn get(&self, column: Column) -> Value {
        match column {
            Column::Id => self.id.into(),
            Column::Title => self.title.clone().into(),
            Column::Content => self.content.clone().into(),
            Column::ViewCount => self.view_count.into(),
            Column::AuthorId => self.author_id.into(),
            Column::CategoryId => self.category_id.into(),
            Column::CreatedAt => self.created_at.into(),
            Column::IsDeleted => self.is_deleted.into(),
        }
    }

    fn primary_key_value(&self) -> Value {
        self.id.into()
    }
}

/// Writable post fields.
#[derive(Clone, Debug, Default)]
pub struct PostRecord {
    pub title: ActiveValue<String>,
    pub content: ActiveValue<String>,
    pub author_id: ActiveValue<i32>,
    pub category_id: ActiveValue<i32>,
}

impl PostRecord {
    /// A record carrying the post creation form fields.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: i32,
        category_id: i32,
    ) -> Self {
        Self {
            title: Set(title.into()),
            content: Set(content.into()),
            author_id: Set(author_id),
            category_id: Set(category_id),
        }
    }
}

impl RecordTrait for PostRecord {
    type Entity = Post;

    fn get(&self, column: Column) -> ActiveValue<Value> {
        match column {
            Column::Title => self.title.to_value(),
            Column::Content => self.content.to_value(),
            Column::AuthorId => self.author_id.to_value(),
            Column::CategoryId => self.category_id.to_value(),
            Column::Id | Column::ViewCount | Column::CreatedAt | Column::IsDeleted => NotSet,
        }
    }
}
