//! Syntax tree provider.
//!
//! Parses SQL text with [`sqlparser`] and lowers every statement into a
//! [`Node`] of the review tree. Advisors only ever see this tree: the node
//! kinds carry exactly the facts review rules react to, and each node records
//! the 1-based line of its first token.
//!
//! # Example
//!
//! ```
//! use sql_review::syntax::{NodeKind, SqlDialect, parse_tree};
//!
//! let tree = parse_tree("SELECT 1;\nCREATE TABLE orders (id INT)", SqlDialect::MySQL).unwrap();
//!
//! assert_eq!(tree.nodes.len(), 2);
//! assert_eq!(tree.nodes[1].line, 2);
//! assert!(matches!(tree.nodes[1].kind, NodeKind::CreateTable(_)));
//! ```

mod extract;
mod types;
mod visit;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlparser::{
    dialect::{
        ClickHouseDialect, Dialect, GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect,
        SQLiteDialect
    },
    parser::Parser,
    tokenizer::Token
};
pub use types::{
    Argument, ColumnDef, CreateIndex, CreateTable, DropTable, Identifier, Insert, Mutation, Node,
    NodeKind, ProcedureCall, QualifiedName, RenameTable, Select, SyntaxTree
};
pub use visit::NodeVisitor;

use crate::error::{AppResult, ReviewError, query_parse_error};

/// SQL dialect a tree was parsed with and an advisor is registered for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlDialect {
    #[default]
    Generic,
    MySQL,
    PostgreSQL,
    SQLite,
    ClickHouse,
    MsSql
}

impl SqlDialect {
    /// Every supported dialect, in registration order
    pub const ALL: [SqlDialect; 6] = [
        Self::Generic,
        Self::MySQL,
        Self::PostgreSQL,
        Self::SQLite,
        Self::ClickHouse,
        Self::MsSql
    ];

    /// Convert to sqlparser dialect for parsing
    pub fn into_parser_dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::MySQL => Box::new(MySqlDialect {}),
            Self::PostgreSQL => Box::new(PostgreSqlDialect {}),
            Self::SQLite => Box::new(SQLiteDialect {}),
            Self::ClickHouse => Box::new(ClickHouseDialect {}),
            Self::MsSql => Box::new(MsSqlDialect {})
        }
    }

    /// Stored identifier, as used in policies and presets
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "GENERIC",
            Self::MySQL => "MYSQL",
            Self::PostgreSQL => "POSTGRESQL",
            Self::SQLite => "SQLITE",
            Self::ClickHouse => "CLICKHOUSE",
            Self::MsSql => "MSSQL"
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlDialect {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GENERIC" => Ok(Self::Generic),
            "MYSQL" => Ok(Self::MySQL),
            "POSTGRESQL" | "POSTGRES" => Ok(Self::PostgreSQL),
            "SQLITE" => Ok(Self::SQLite),
            "CLICKHOUSE" => Ok(Self::ClickHouse),
            "MSSQL" | "TSQL" => Ok(Self::MsSql),
            _ => Err(ReviewError::UnknownDialect(s.to_string()))
        }
    }
}

/// Parse SQL text into a review tree
///
/// Statements are parsed one at a time so each node keeps the line of its
/// first token. Statement delimiters are optional between statements, which
/// T-SQL scripts rely on.
///
/// # Errors
///
/// Returns a query parse error if the text is not valid SQL for `dialect`.
pub fn parse_tree(sql: &str, dialect: SqlDialect) -> AppResult<SyntaxTree> {
    let parser_dialect = dialect.into_parser_dialect();
    let mut parser = Parser::new(parser_dialect.as_ref())
        .try_with_sql(sql)
        .map_err(|e| query_parse_error(e.to_string()))?;
    let mut nodes = Vec::new();
    loop {
        while parser.consume_token(&Token::SemiColon) {}
        let next = parser.peek_token();
        if next.token == Token::EOF {
            break;
        }
        let line = next.span.start.line as usize;
        let statement = parser
            .parse_statement()
            .map_err(|e| query_parse_error(e.to_string()))?;
        nodes.push(Node {
            line,
            kind: extract::lower_statement(&statement)
        });
    }
    Ok(SyntaxTree { nodes })
}
