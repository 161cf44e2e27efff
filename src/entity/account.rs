//! Forum accounts. Rows live in the `profile` table.

use chrono::NaiveDateTime;
use may_postgres::Row;
use sea_query::{Iden, Value};
use serde::{Deserialize, Serialize};

use crate::model::ModelTrait;
use crate::query::column::{ColumnDefault, ColumnDefinition, ColumnKind, ColumnTrait};
use crate::query::traits::{EntityName, EntityTrait, FromRow};
use crate::record::{ActiveValue, NotSet, RecordTrait, Set};

#[derive(Copy, Clone, Default, Debug)]
pub struct Account;

impl EntityName for Account {
    fn table_name(&self) -> &'static str {
        "profile"
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Column {
    Id,
    Username,
    Email,
    Password,
    Bio,
    CreatedAt,
    IsDeleted,
}

impl Iden for Column {
    fn unquoted(&self) -> &str {
        match self {
            Column::Id => "id",
            Column::Username => "username",
            Column::Email => "email",
            Column::Password => "password",
            Column::Bio => "bio",
            Column::CreatedAt => "created_at",
            Column::IsDeleted => "is_deleted",
        }
    }
}

impl ColumnTrait for Column {
    fn def(self) -> ColumnDefinition {
        match self {
            Column::Id => ColumnDefinition::new(ColumnKind::Integer).auto_increment(),
            Column::Username => ColumnDefinition::new(ColumnKind::String(255)).unique(),
            Column::Email => ColumnDefinition::new(ColumnKind::String(255)).unique(),
            // Opaque hash; two accounts may collide, so no unique key.
            Column::Password => ColumnDefinition::new(ColumnKind::String(255)),
            Column::Bio => ColumnDefinition::new(ColumnKind::String(511)).nullable(),
            Column::CreatedAt => ColumnDefinition::new(ColumnKind::Timestamp)
                .default_value(ColumnDefault::CurrentTimestamp),
            Column::IsDeleted => ColumnDefinition::new(ColumnKind::Boolean)
                .default_value(ColumnDefault::Bool(false)),
        }
    }
}

impl EntityTrait for Account {
    type Model = AccountModel;
    type Column = Column;

    fn columns() -> &'static [Column] {
        &[
            Column::Id,
            Column::Username,
            Column::Email,
            Column::Password,
            Column::Bio,
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

/// One stored account row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountModel {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
    pub created_at: NaiveDateTime,
    pub is_deleted: bool,
}

impl FromRow for AccountModel {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            bio: row.try_get("bio")?,
            created_at: row.try_get("created_at")?,
            is_deleted: row.try_get("is_deleted")?,
        })
    }
}

impl ModelTrait for AccountModel {
    type Entity = Account;

    fn get(&self, column: Column) -> Value {
        match column {
            Column::Id => self.id.into(),
            Column::Username => self.username.clone().into(),
            Column::Email => self.email.clone().into(),
            Column::Password => self.password.clone().into(),
            Column::Bio => self.bio.clone().into(),
            Column::CreatedAt => self.created_at.into(),
            Column::IsDeleted => self.is_deleted.into(),
        }
    }

    fn primary_key_value(&self) -> Value {
        self.id.into()
    }
}

/// Writable account fields.
///
/// The id, creation timestamp, and deletion flag are store-managed and have
/// no field here.
#[derive(Clone, Debug, Default)]
pub struct AccountRecord {
    pub username: ActiveValue<String>,
    pub email: ActiveValue<String>,
    pub password: ActiveValue<String>,
    pub bio: ActiveValue<Option<String>>,
}

impl AccountRecord {
    /// A record carrying the registration form fields.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: Set(username.into()),
            email: Set(email.into()),
            password: Set(password.into()),
            bio: NotSet,
        }
    }

    /// A record pre-filled from a stored row, for partial edits.
    pub fn from_model(model: &AccountModel) -> Self {
        Self {
            username: Set(model.username.clone()),
            email: Set(model.email.clone()),
            password: Set(model.password.clone()),
            bio: Set(model.bio.clone()),
        }
    }
}

impl RecordTrait for AccountRecord {
    type Entity = Account;

    fn get(&self, column: Column) -> ActiveValue<Value> {
        match column {
            Column::Username => self.username.to_value(),
            Column::Email => self.email.to_value(),
            Column::Password => self.password.to_value(),
            Column::Bio => self.bio.to_value(),
            Column::Id | Column::CreatedAt | Column::IsDeleted => NotSet,
        }
    }
}
