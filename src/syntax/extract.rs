mod expr;
mod set_expr;

use expr::collect_like_patterns;
use set_expr::{extract_limit, has_wildcard};
use sqlparser::ast::{
    Expr, FromTable, Ident, ObjectName, ObjectNamePart, ObjectType, SetExpr, Statement, Value
};

use super::types::{
    Argument, ColumnDef, CreateIndex, CreateTable, DropTable, Identifier, Insert, Mutation,
    NodeKind, ProcedureCall, QualifiedName, RenameTable, Select
};

/// Lower a parsed statement into a review node
pub fn lower_statement(stmt: &Statement) -> NodeKind {
    match stmt {
        Statement::CreateTable(create) => {
            let has_primary_key = create.columns.iter().any(|column| {
                column
                    .options
                    .iter()
                    .any(|opt| declares_primary_key(&opt.option.to_string()))
            }) || create
                .constraints
                .iter()
                .any(|constraint| declares_primary_key(&constraint.to_string()));
            NodeKind::CreateTable(CreateTable {
                name: qualified_name(&create.name),
                columns: create
                    .columns
                    .iter()
                    .map(|column| ColumnDef {
                        name:      identifier(&column.name),
                        data_type: column.data_type.to_string()
                    })
                    .collect(),
                has_primary_key
            })
        }
        Statement::CreateIndex(create_index) => NodeKind::CreateIndex(CreateIndex {
            name:    create_index.name.as_ref().map(qualified_name),
            table:   qualified_name(&create_index.table_name),
            columns: create_index
                .columns
                .iter()
                .map(|c| index_column_name(&c.to_string()))
                .collect(),
            unique:  create_index.unique
        }),
        Statement::Drop {
            object_type: ObjectType::Table,
            names,
            ..
        } => NodeKind::DropTable(DropTable {
            names: names.iter().map(qualified_name).collect()
        }),
        Statement::RenameTable(renames) => match renames.as_slice() {
            [rename] => NodeKind::RenameTable(RenameTable {
                old_name: qualified_name(&rename.old_name),
                new_name: qualified_name(&rename.new_name)
            }),
            _ => NodeKind::Other
        },
        Statement::Execute {
            name,
            parameters,
            ..
        } => NodeKind::ProcedureCall(ProcedureCall {
            name:      name.as_ref().map(qualified_name),
            arguments: parameters.iter().map(argument).collect()
        }),
        Statement::Query(query) => {
            let mut like_patterns = Vec::new();
            collect_set_expr_like_patterns(&query.body, &mut like_patterns);
            NodeKind::Select(Select {
                has_wildcard: has_wildcard(&query.body),
                limit: extract_limit(query),
                like_patterns
            })
        }
        Statement::Insert(insert) => NodeKind::Insert(Insert {
            table:       insert.table.to_string(),
            has_columns: !insert.columns.is_empty(),
            value_rows:  insert.source.as_ref().and_then(|source| match source.body.as_ref() {
                SetExpr::Values(values) => Some(values.rows.len()),
                _ => None
            })
        }),
        Statement::Update(update) => NodeKind::Update(mutation(
            update.table.relation.to_string(),
            update.selection.as_ref()
        )),
        Statement::Delete(delete) => {
            let table = match &delete.from {
                FromTable::WithFromKeyword(from) | FromTable::WithoutKeyword(from) => from
                    .first()
                    .map(|t| t.relation.to_string())
                    .unwrap_or_default()
            };
            NodeKind::Delete(mutation(table, delete.selection.as_ref()))
        }
        _ => NodeKind::Other
    }
}

fn mutation(table: String, selection: Option<&Expr>) -> Mutation {
    let mut like_patterns = Vec::new();
    if let Some(selection) = selection {
        collect_like_patterns(selection, &mut like_patterns);
    }
    Mutation {
        table,
        has_where: selection.is_some(),
        like_patterns
    }
}

fn collect_set_expr_like_patterns(set_expr: &SetExpr, patterns: &mut Vec<String>) {
    match set_expr {
        SetExpr::Select(select) => {
            if let Some(selection) = &select.selection {
                collect_like_patterns(selection, patterns);
            }
        }
        SetExpr::SetOperation {
            left,
            right,
            ..
        } => {
            collect_set_expr_like_patterns(left, patterns);
            collect_set_expr_like_patterns(right, patterns);
        }
        SetExpr::Query(query) => collect_set_expr_like_patterns(&query.body, patterns),
        _ => {}
    }
}

fn declares_primary_key(rendered: &str) -> bool {
    rendered.to_ascii_uppercase().contains("PRIMARY KEY")
}

fn index_column_name(rendered: &str) -> String {
    rendered
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_matches(|c| matches!(c, '"' | '`' | '[' | ']'))
        .to_string()
}

fn identifier(ident: &Ident) -> Identifier {
    match ident.quote_style {
        Some(quote) => Identifier::quoted(ident.value.as_str(), quote),
        None => Identifier::bare(ident.value.as_str())
    }
}

fn qualified_name(name: &ObjectName) -> QualifiedName {
    QualifiedName::new(name.0.iter().map(|part| match part {
        ObjectNamePart::Identifier(ident) => identifier(ident),
        #[allow(unreachable_patterns)]
        other => Identifier::bare(other.to_string())
    }))
}

fn argument(expr: &Expr) -> Argument {
    match expr {
        Expr::Value(val)
            if matches!(
                val.value,
                Value::SingleQuotedString(_) | Value::NationalStringLiteral(_)
            ) =>
        {
            Argument::StringLiteral(val.value.to_string())
        }
        other => Argument::Expression(other.to_string())
    }
}
