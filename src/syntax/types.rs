use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

/// Parsed SQL text: one node per statement, in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyntaxTree {
    pub nodes: Vec<Node>
}

/// A single statement of the review tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// 1-based line of the statement's first token
    pub line: usize,
    pub kind: NodeKind
}

/// Statement shapes review rules react to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub enum NodeKind {
    CreateTable(CreateTable),
    CreateIndex(CreateIndex),
    DropTable(DropTable),
    RenameTable(RenameTable),
    ProcedureCall(ProcedureCall),
    Select(Select),
    Insert(Insert),
    Update(Mutation),
    Delete(Mutation),
    Other
}

/// Identifier as written in the source, with its quote delimiter if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub value:       String,
    pub quote_style: Option<char>
}

impl Identifier {
    pub fn bare(value: impl Into<String>) -> Self {
        Self {
            value:       value.into(),
            quote_style: None
        }
    }

    pub fn quoted(value: impl Into<String>, quote: char) -> Self {
        Self {
            value:       value.into(),
            quote_style: Some(quote)
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote_style {
            Some('[') => write!(f, "[{}]", self.value),
            Some(q) => write!(f, "{q}{}{q}", self.value),
            None => f.write_str(&self.value)
        }
    }
}

/// Dotted name such as `server.database.schema.object`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualifiedName {
    pub parts: SmallVec<[Identifier; 3]>
}

impl QualifiedName {
    pub fn new(parts: impl IntoIterator<Item = Identifier>) -> Self {
        Self {
            parts: parts.into_iter().collect()
        }
    }

    /// Last part: the object itself
    pub fn object(&self) -> Option<&Identifier> {
        self.parts.last()
    }

    /// Unquoted object name, empty when the name has no parts
    pub fn object_name(&self) -> &str {
        self.object().map(|i| i.value.as_str()).unwrap_or_default()
    }

    /// Whether any qualifier precedes the object name
    pub fn is_qualified(&self) -> bool {
        self.parts.len() > 1
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTable {
    pub name:            QualifiedName,
    pub columns:         Vec<ColumnDef>,
    pub has_primary_key: bool
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDef {
    pub name:      Identifier,
    /// Data type as rendered by the parser, e.g. `VARCHAR(255)`
    pub data_type: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateIndex {
    pub name:    Option<QualifiedName>,
    pub table:   QualifiedName,
    pub columns: Vec<String>,
    pub unique:  bool
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropTable {
    pub names: Vec<QualifiedName>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenameTable {
    pub old_name: QualifiedName,
    pub new_name: QualifiedName
}

/// Stored procedure invocation (`EXEC proc arg, ...`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcedureCall {
    /// Absent when the invocation has no procedure name (`EXECUTE IMMEDIATE`)
    pub name:      Option<QualifiedName>,
    pub arguments: Vec<Argument>
}

/// Positional argument of a procedure call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Argument {
    /// String literal token text, delimiters included
    StringLiteral(String),
    /// Anything else, rendered back to SQL
    Expression(String)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Select {
    pub has_wildcard:  bool,
    pub limit:         Option<u64>,
    pub like_patterns: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insert {
    pub table:       String,
    pub has_columns: bool,
    /// Row count of a `VALUES` source, `None` for `INSERT ... SELECT`
    pub value_rows:  Option<usize>
}

/// UPDATE or DELETE
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mutation {
    pub table:         String,
    pub has_where:     bool,
    pub like_patterns: Vec<String>
}
