use sqlparser::ast::{Expr, Value};

/// Collect literal patterns of `LIKE` / `ILIKE` predicates in a condition
pub fn collect_like_patterns(expr: &Expr, patterns: &mut Vec<String>) {
    match expr {
        Expr::Like {
            pattern, ..
        }
        | Expr::ILike {
            pattern, ..
        } => {
            if let Some(text) = string_literal(pattern) {
                patterns.push(text);
            }
        }
        Expr::BinaryOp {
            left,
            right,
            ..
        } => {
            collect_like_patterns(left, patterns);
            collect_like_patterns(right, patterns);
        }
        Expr::UnaryOp {
            expr, ..
        } => {
            collect_like_patterns(expr, patterns);
        }
        Expr::Nested(e) => {
            collect_like_patterns(e, patterns);
        }
        _ => {}
    }
}

fn string_literal(expr: &Expr) -> Option<String> {
    if let Expr::Value(val) = expr
        && let Value::SingleQuotedString(text) = &val.value
    {
        return Some(text.clone());
    }
    None
}
