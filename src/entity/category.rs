//! Post categories. Rows live in the `category` table.
//!
//! `post_count` is sequence-backed, like a post's `view_count`.

use chrono::NaiveDateTime;
use may_postgres::Row;
use sea_query::{Iden, Value};
use serde::{Deserialize, Serialize};

use crate::model::ModelTrait;
use crate::query::column::{ColumnDefault, ColumnDefinition, ColumnKind, ColumnTrait};
use crate::query::traits::{EntityName, EntityTrait, FromRow};
use crate::record::{ActiveValue, NotSet, RecordTrait, Set};

#[derive(Copy, Clone, Default, Debug)]
pub struct Category;

impl EntityName for Category {
    fn table_name(&self) -> &'static str {
        "category"
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Column {
    Id,
    Title,
    Description,
    PostCount,
    CreatedAt,
    IsDeleted,
}

impl Iden for Column {
    fn unquoted(&self) -> &str {
        match self {
            Column::Id => "id",
            Column::Title => "title",
            Column::Description => "description",
            Column::PostCount => "post_count",
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
            Column::Description => {
                ColumnDefinition::new(ColumnKind::String(255)).nullable()
            }
            Column::PostCount => {
                ColumnDefinition::new(ColumnKind::BigInteger).auto_increment()
            }
            Column::CreatedAt => ColumnDefinition::new(ColumnKind::Timestamp)
                .default_value(ColumnDefault::CurrentTimestamp),
            Column::IsDeleted => ColumnDefinition::new(ColumnKind::Boolean)
                .default_value(ColumnDefault::Bool(false)),
        }
    }
}

impl EntityTrait for Category {
    type Model = CategoryModel;
    type Column = Column;

    fn columns() -> &'static [Column] {
        &[
            Column::Id,
            Column::Title,
            Column::Description,
            Column::PostCount,
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

/// One stored category row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryModel {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub post_count: i64,
    pub created_at: NaiveDateTime,
    pub is_deleted: bool,
}

impl FromRow for CategoryModel {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            post_count: row.try_get("post_count")?,
            created_at: row.try_get("created_at")?,
            is_deleted: row.try_get("is_deleted")?,
        })
    }
}

impl ModelTrait for CategoryModel {
    type Entity = Category;

    fn get(&self, column: Column) -> Value {
        match column {
            Column::Id => self.id.into(),
            Column::Title => self.title.clone().into(),
            Column::Description => self.description.clone().into(),
            Column::PostCount => self.post_count.into(),
            Column::CreatedAt => self.created_at.into(),
            Column::IsDeleted => self.is_deleted.into(),
        }
    }

    fn primary_key_value(&self) -> Value {
        self.id.into()
    }
}

/// Writable category fields.
#[derive(Clone, Debug, Default)]
pub struct CategoryRecord {
    pub title: ActiveValue<String>,
    pub description: ActiveValue<Option<String>>,
}

impl CategoryRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Set(title.into()),
            description: NotSet,
        }
    }
}

impl RecordTrait for CategoryRecord {
    type Entity = Category;

    fn get(&self, column: Column) -> ActiveValue<Value> {
        match column {
            Column::Title => self.title.to_value(),
            Column::Description => self.description.to_value(),
            Column::Id | Column::PostCount | Column::CreatedAt | Column::IsDeleted => NotSet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_count_is_sequence_backed() {
        let def = Column::PostCount.def();
        assert!(def.auto_increment);
        assert_eq!(def.kind, ColumnKind::BigInteger);
    }

    #[test]
    fn description_is_optional() {
        assert!(Column::Description.def().nullable);
        let record = CategoryRecord::new("general");
        assert_eq!(record.get(Column::Description), NotSet);
    }
}
