//! Container-backed fixtures for the integration tests.
//!
//! Each test gets its own throwaway PostgreSQL container, so tests are
//! order-independent and never share state.

use testcontainers::clients::Cli;
use testcontainers::Container;
use testcontainers_modules::postgres::Postgres;

use umbrella::{connect, Database, DatabaseConfig, MayPostgresExecutor};

pub struct TestStore<'d> {
    pub config: DatabaseConfig,
    _node: Container<'d, Postgres>,
}

impl<'d> TestStore<'d> {
    /// Start a fresh PostgreSQL container and describe how to reach it.
    pub fn new(docker: &'d Cli) -> Self {
        let node = docker.run(Postgres::default());
        let config = DatabaseConfig {
            host: "localhost".to_string(),
            port: node.get_host_port_ipv4(5432),
            dbname: "postgres".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
        };
        Self {
            config,
            _node: node,
        }
    }

    /// A per-call connection provider; clones share the config only.
    pub fn database(&self) -> Database {
        Database::new(self.config.clone())
    }

    /// A dedicated connection to the container.
    pub fn executor(&self) -> MayPostgresExecutor {
        let client = connect(&self.config.connection_string())
            .expect("container accepts connections");
        MayPostgresExecutor::new(client)
    }
}
