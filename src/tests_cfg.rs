//! Shared unit-test fixtures.
//!
//! `MockExecutor` records every statement and its bound-parameter count.
//! `may_postgres::Row` cannot be fabricated without a live connection, so
//! queries report no rows; unit tests assert on the captured SQL and on
//! pre-I/O error paths, and the container-backed integration tests cover
//! row decoding.

use crate::executor::{StoreError, StoreExecutor};
use may_postgres::types::ToSql;
use may_postgres::Row;
use std::sync::{Arc, Mutex};

pub(crate) struct MockExecutor {
    captured_sql: Arc<Mutex<Vec<String>>>,
    captured_param_counts: Arc<Mutex<Vec<usize>>>,
}

impl MockExecutor {
    pub(crate) fn new() -> Self {
        Self {
            captured_sql: Arc::new(Mutex::new(Vec::new())),
            captured_param_counts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn captured_sql(&self) -> Vec<String> {
        self.captured_sql.lock().unwrap().clone()
    }

    pub(crate) fn captured_param_counts(&self) -> Vec<usize> {
        self.captured_param_counts.lock().unwrap().clone()
    }

    fn record(&self, query: &str, params: &[&dyn ToSql]) {
        self.captured_sql.lock().unwrap().push(query.to_string());
        self.captured_param_counts.lock().unwrap().push(params.len());
    }
}

impl StoreExecutor for MockExecutor {
    fn execute(&self, query: &str, params: &[&dyn ToSql]) -> Result<u64, StoreError> {
        self.record(query, params);
        Ok(0)
    }

    fn query_all(&self, query: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>, StoreError> {
        self.record(query, params);
        Ok(vec![])
    }
}

/// Entity with an empty column set, for contract-violation tests.
pub(crate) mod empty_entity {
    use crate::model::ModelTrait;
    use crate::query::{ColumnDefinition, ColumnTrait, EntityName, EntityTrait, FromRow};
    use crate::record::{ActiveValue, RecordTrait};
    use may_postgres::Row;
    use sea_query::{Iden, Value};

    #[derive(Copy, Clone, Default, Debug)]
    pub(crate) struct Hollow;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) enum Column {}

    impl Iden for Column {
        fn unquoted(&self) -> &str {
            match *self {}
        }
    }

    impl ColumnTrait for Column {
        fn def(self) -> ColumnDefinition {
            match self {}
        }
    }

    #[derive(Debug, Clone)]
    pub(crate) struct HollowModel;

    impl FromRow for HollowModel {
        fn from_row(_row: &Row) -> Result<Self, may_postgres::Error> {
            Ok(HollowModel)
        }
    }

    impl ModelTrait for HollowModel {
        type Entity = Hollow;

        fn get(&self, column: Column) -> Value {
            match column {}
        }

        fn primary_key_value(&self) -> Value {
            Value::Int(None)
        }
    }

    impl EntityName for Hollow {
        fn table_name(&self) -> &'static str {
            "hollow"
        }
    }

    impl EntityTrait for Hollow {
        type Model = HollowModel;
        type Column = Column;

        fn columns() -> &'static [Column] {
            &[]
        }

        fn primary_key() -> Column {
            unreachable!("hollow has no columns")
        }

        fn deleted_flag() -> Column {
            unreachable!("hollow has no columns")
        }
    }

    #[derive(Debug, Clone, Default)]
    pub(crate) struct HollowRecord;

    impl RecordTrait for HollowRecord {
        type Entity = Hollow;

        fn get(&self, column: Column) -> ActiveValue<Value> {
            match column {}
        }
    }
}
