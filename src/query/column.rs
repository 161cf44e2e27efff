//! Type-safe column operations and column metadata.
//!
//! `ColumnTrait` builds filter expressions from column enums; columns can
//! never reach the SQL text as raw strings. `ColumnDefinition` is the
//! per-column schema descriptor: the record mapper consults it to decide
//! what is writable, and the schema bootstrap renders DDL from it.

use sea_query::{Alias, ColumnDef, Expr, ExprTrait, Iden, IntoColumnRef, IntoIden};

/// What a column stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// 32-bit integer (`integer`, or `serial` when auto-incremented)
    Integer,
    /// 64-bit integer (`bigint`, or `bigserial` when auto-incremented)
    BigInteger,
    /// Bounded text (`varchar(n)`)
    String(u32),
    /// Unbounded text
    Text,
    /// Boolean flag
    Boolean,
    /// Timestamp without time zone
    Timestamp,
}

/// A column's declared default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    /// `DEFAULT current_timestamp`
    CurrentTimestamp,
    /// `DEFAULT true` / `DEFAULT false`
    Bool(bool),
}

/// A foreign-key reference to another table's column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyRef {
    pub table: &'static str,
    pub column: &'static str,
}

/// Column definition metadata.
///
/// One of these per column, declared by each entity's `ColumnTrait::def()`.
/// The table schema, not the in-memory struct, is the source of truth: every
/// generated INSERT/UPDATE and the bootstrap DDL are driven by this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Column type
    pub kind: ColumnKind,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Whether the column carries a UNIQUE constraint
    pub unique: bool,
    /// Whether the column is sequence-backed (`serial` / `bigserial`)
    pub auto_increment: bool,
    /// Declared default, if any
    pub default: Option<ColumnDefault>,
    /// Foreign-key reference, if any
    pub references: Option<ForeignKeyRef>,
}

impl ColumnDefinition {
    pub fn new(kind: ColumnKind) -> Self {
        Self {
            kind,
            nullable: false,
            unique: false,
            auto_increment: false,
            default: None,
            references: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn default_value(mut self, default: ColumnDefault) -> Self {
        self.default = Some(default);
        self
    }

    pub fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some(ForeignKeyRef { table, column });
        self
    }

    /// True when the store generates this column's value (sequence-backed).
    pub fn is_generated(&self) -> bool {
        self.auto_increment
    }

    /// True when omitting the column on insert is safe: the store fills it.
    pub fn has_store_default(&self) -> bool {
        self.auto_increment || self.default.is_some()
    }

    /// Render this definition as a sea-query `ColumnDef`.
    ///
    /// Sequence-backed columns are emitted as `serial` / `bigserial` so the
    /// backing sequence exists for the `DEFAULT` update directive.
    pub fn to_column_def<T: IntoIden>(&self, name: T) -> ColumnDef {
        let mut def = ColumnDef::new(name);

        if self.auto_increment {
            match self.kind {
                ColumnKind::BigInteger => def.custom(Alias::new("bigserial")),
                _ => def.custom(Alias::new("serial")),
            };
        } else {
            match self.kind {
                ColumnKind::Integer => def.integer(),
                ColumnKind::BigInteger => def.big_integer(),
                ColumnKind::String(len) => def.string_len(len),
                ColumnKind::Text => def.text(),
                ColumnKind::Boolean => def.boolean(),
                ColumnKind::Timestamp => def.timestamp(),
            };
        }

        if self.nullable {
            def.null();
        } else {
            def.not_null();
        }

        if self.unique {
            def.unique_key();
        }

        match self.default {
            Some(ColumnDefault::CurrentTimestamp) => {
                def.default(Expr::current_timestamp());
            }
            Some(ColumnDefault::Bool(b)) => {
                def.default(b);
            }
            None => {}
        }

        def
    }
}

/// Escape LIKE wildcards so a needle matches literally.
///
/// Postgres treats backslash as the default LIKE escape character, so the
/// escaped needle needs no ESCAPE clause.
pub fn escape_like_pattern(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Trait for type-safe column operations.
///
/// Provides filter-expression builders for entity column enums. Values pass
/// through `sea_query::Value` and become bound parameters.
///
/// # Example
///
/// ```no_run
/// use umbrella::entity::account::Column;
/// use umbrella::ColumnTrait;
///
/// let by_name = Column::Username.eq("ferris");
/// let searching = Column::Bio.contains("100%");  // `%` matches literally
/// ```
pub trait ColumnTrait: Iden + IntoColumnRef + IntoIden + Copy {
    /// This column's schema metadata.
    fn def(self) -> ColumnDefinition;

    /// `column = value`
    fn eq<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        Expr::col(self).eq(value)
    }

    /// `column <> value`
    fn ne<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        Expr::col(self).ne(value)
    }

    /// `column > value`
    fn gt<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        Expr::col(self).gt(value)
    }

    /// `column >= value`
    fn gte<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        Expr::col(self).gte(value)
    }

    /// `column < value`
    fn lt<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        Expr::col(self).lt(value)
    }

    /// `column <= value`
    fn lte<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        Expr::col(self).lte(value)
    }

    /// `column LIKE pattern`, pattern taken verbatim (wildcards active).
    fn like(self, pattern: &str) -> Expr {
        Expr::col(self).like(pattern)
    }

    /// Substring match: `column LIKE '%needle%'` with wildcards in the
    /// needle escaped so user input matches literally.
    fn contains(self, needle: &str) -> Expr {
        Expr::col(self).like(format!("%{}%", escape_like_pattern(needle)))
    }

    /// `column IN (values)`
    fn is_in<T, I>(self, values: I) -> Expr
    where
        T: Into<sea_query::Value>,
        I: IntoIterator<Item = T>,
    {
        Expr::col(self).is_in(values)
    }

    /// `column IS NULL`
    fn is_null(self) -> Expr {
        Expr::col(self).is_null()
    }

    /// `column IS NOT NULL`
    fn is_not_null(self) -> Expr {
        Expr::col(self).is_not_null()
    }

    /// `column BETWEEN start AND end`
    fn between<T1: Into<sea_query::Value>, T2: Into<sea_query::Value>>(
        self,
        start: T1,
        end: T2,
    ) -> Expr {
        Expr::col(self).between(start, end)
    }
}
