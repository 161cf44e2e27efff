//! Post comments. Rows live in the `comment` table.

use chrono::NaiveDateTime;
use may_postgres::Row;
use sea_query::{Iden, Value};
use serde::{Deserialize, Serialize};

use crate::model::ModelTrait;
use crate::query::column::{ColumnDefault, ColumnDefinition, ColumnKind, ColumnTrait};
use crate::query::traits::{EntityName, EntityTrait, FromRow};
use crate::record::{ActiveValue, NotSet, RecordTrait, Set};

#[derive(Copy, Clone, Default, Debug)]
pub struct Comment;

impl EntityName for Comment {
    fn table_name(&self) -> &'static str {
        "comment"
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Column {
    Id,
    Content,
    AuthorId,
    PostId,
    CreatedAt,
    IsDeleted,
}

impl Iden for Column {
    fn unquoted(&self) -> &str {
        match self {
            Column::Id => "id",
            Column::Content => "content",
            Column::AuthorId => "author_id",
            Column::PostId => "post_id",
            Column::CreatedAt => "created_at",
            Column::IsDeleted => "is_deleted",
        }
    }
}

impl ColumnTrait for Column {
    fn def(self) -> ColumnDefinition {
        match self {
            Column::Id => ColumnDefinition::new(ColumnKind::Integer).auto_increment(),
            Column::Content => ColumnDefinition::new(ColumnKind::Text),
            Column::AuthorId => {
                ColumnDefinition::new(ColumnKind::Integer).references("profile", "id")
            }
            Column::PostId => {
                ColumnDefinition::new(ColumnKind::Integer).references("post", "id")
            }
            Column::CreatedAt => ColumnDefinition::new(ColumnKind::Timestamp)
                .default_value(ColumnDefault::CurrentTimestamp),
            Column::IsDeleted => ColumnDefinition::new(ColumnKind::Boolean)
                .default_value(ColumnDefault::Bool(false)),
        }
    }
}

impl EntityTrait for Comment {
    type Model = CommentModel;
    type Column = Column;

    fn columns() -> &'static [Column] {
        &[
            Column::Id,
            Column::Content,
            Column::AuthorId,
            Column::PostId,
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

/// One stored comment row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentModel {
    pub id: i32,
    pub content: String,
    pub author_id: i32,
    pub post_id: i32,
    pub created_at: NaiveDateTime,
    pub is_deleted: bool,
}

impl FromRow for CommentModel {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            content: row.try_get("content")?,
            author_id: row.try_get("author_id")?,
            post_id: row.try_get("post_id")?,
            created_at: row.try_get("created_at")?,
            is_deleted: row.try_get("is_deleted")?,
        })
    }
}

impl ModelTrait for CommentModel {
    type Entity = Comment;

    fn get(&self, column: Column) -> Value {
        match column {
            Column::Id => self.id.into(),
            Column::Content => self.content.clone().into(),
            Column::AuthorId => self.author_id.into(),
            Column::PostId => self.post_id.into(),
            Column::CreatedAt => self.created_at.into(),
            Column::IsDeleted => self.is_deleted.into(),
        }
    }

    fn primary_key_value(&self) -> Value {
        self.id.into()
    }
}

/// Writable comment fields.
#[derive(Clone, Debug, Default)]
pub struct CommentRecord {
    pub content: ActiveValue<String>,
    pub author_id: ActiveValue<i32>,
    pub post_id: ActiveValue<i32>,
}

impl CommentRecord {
    pub fn new(content: impl Into<String>, author_id: i32, post_id: i32) -> Self {
        Self {
            content: Set(content.into()),
            author_id: Set(author_id),
            post_id: Set(post_id),
        }
    }
}

impl RecordTrait for CommentRecord {
    type Entity = Comment;

    fn get(&self, column: Column) -> ActiveValue<Value> {
        match column {
            Column::Content => self.content.to_value(),
            Column::AuthorId => self.author_id.to_value(),
            Column::PostId => self.post_id.to_value(),
            Column::Id | Column::CreatedAt | Column::IsDeleted => NotSet,
        }
    }
}
