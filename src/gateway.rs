use mysql::consts::ColumnType;
use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder};
use thiserror::Error;
use tracing::{debug, info};

use crate::results::{ColumnCountError, ResultSet, Row};
use crate::statement::StatementKind;
use crate::value::Value;

/// What the server sent back for one statement.
#[derive(Debug, Default)]
pub struct StatementOutput {
    pub results: ResultSet,
    pub affected_rows: u64,
}

/// A live server handle. Every call blocks until the server answers.
pub trait Connection {
    fn list_databases(&mut self) -> Result<Vec<String>, GatewayError>;
    fn select_database(&mut self, name: &str) -> Result<(), GatewayError>;
    fn run(&mut self, statement: &str) -> Result<StatementOutput, GatewayError>;
    fn commit(&mut self) -> Result<(), GatewayError>;
}

pub struct MysqlConnection {
    conn: Conn,
}

impl MysqlConnection {
    pub fn open(host: &str, user: &str, password: &str) -> Result<Self, GatewayError> {
        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(host))
            .user(Some(user))
            .pass(Some(password));
        Ok(Self {
            conn: Conn::new(opts)?,
        })
    }
}

impl Connection for MysqlConnection {
    fn list_databases(&mut self) -> Result<Vec<String>, GatewayError> {
        Ok(self.conn.query("SHOW DATABASES")?)
    }

    fn select_database(&mut self, name: &str) -> Result<(), GatewayError> {
        self.conn
            .query_drop(format!("USE `{}`", name.replace('`', "``")))?;
        Ok(())
    }

    fn run(&mut self, statement: &str) -> Result<StatementOutput, GatewayError> {
        let mut result = self.conn.query_iter(statement)?;
        // Only the first result set is shown; the rest is drained on drop.
        let Some(set) = result.iter() else {
            return Ok(StatementOutput::default());
        };
        let affected_rows = set.affected_rows();
        let (names, types): (Vec<String>, Vec<ColumnType>) = set
            .columns()
            .as_ref()
            .iter()
            .map(|column| (column.name_str().into_owned(), column.column_type()))
            .unzip();

        let mut rows: Vec<Row> = Vec::new();
        for row in set {
            let values = row?.unwrap();
            rows.push(
                values
                    .into_iter()
                    .zip(types.iter())
                    .map(|(value, column_type)| Value::from_column(value, *column_type))
                    .collect(),
            );
        }

        Ok(StatementOutput {
            results: ResultSet::new(names, rows)?,
            affected_rows,
        })
    }

    fn commit(&mut self) -> Result<(), GatewayError> {
        self.conn.query_drop("COMMIT")?;
        Ok(())
    }
}

pub fn connect(
    host: &str,
    user: &str,
    password: &str,
) -> Result<Session<MysqlConnection>, GatewayError> {
    let connection = MysqlConnection::open(host, user, password)?;
    info!(host, user, "connected");
    Ok(Session::new(host, user, connection))
}

#[derive(Debug)]
pub enum ExecutionOutcome {
    MutationAck { affected_rows: u64 },
    ResultSet(ResultSet),
    ExecutionError { message: String },
}

/// The single server session of a run. Owns the connection and remembers
/// which database it is bound to.
pub struct Session<C: Connection> {
    host: String,
    user: String,
    database: Option<String>,
    connection: C,
}

impl<C: Connection> Session<C> {
    pub fn new(host: &str, user: &str, connection: C) -> Self {
        Self {
            host: host.to_string(),
            user: user.to_string(),
            database: None,
            connection,
        }
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn list_databases(&mut self) -> Result<Vec<String>, GatewayError> {
        self.connection.list_databases()
    }

    pub fn select_database(&mut self, name: &str) -> Result<(), GatewayError> {
        self.connection.select_database(name)?;
        info!(database = name, "database selected");
        self.database = Some(name.to_string());
        Ok(())
    }

    /// Runs one statement exactly as typed. Errors are turned into an
    /// outcome so the caller can keep going.
    pub fn execute(&mut self, statement: &str) -> ExecutionOutcome {
        match self.try_execute(statement) {
            Ok(outcome) => outcome,
            Err(err) => ExecutionOutcome::ExecutionError {
                message: err.to_string(),
            },
        }
    }

    fn try_execute(&mut self, statement: &str) -> Result<ExecutionOutcome, GatewayError> {
        if self.database.is_none() {
            return Err(GatewayError::NoDatabaseSelected);
        }
        let kind = StatementKind::of(statement);
        debug!(?kind, "executing statement");
        let output = self.connection.run(statement)?;
        match kind {
            StatementKind::Mutating => {
                self.connection.commit()?;
                debug!(affected_rows = output.affected_rows, "committed");
                Ok(ExecutionOutcome::MutationAck {
                    affected_rows: output.affected_rows,
                })
            }
            StatementKind::Retrieving => {
                debug!(rows = output.results.number_of_rows(), "fetched");
                Ok(ExecutionOutcome::ResultSet(output.results))
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &C {
        &self.connection
    }

    pub fn disconnect(self) {
        info!(host = %self.host, user = %self.user, "disconnected");
    }
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    Driver(#[from] mysql::Error),
    #[error("No database selected")]
    NoDatabaseSelected,
    #[error("{0}")]
    ColumnCount(#[from] ColumnCountError),
}
