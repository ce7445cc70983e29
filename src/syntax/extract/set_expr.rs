use sqlparser::ast::{Expr, LimitClause, Query, SelectItem, SetExpr, Value};

/// Whether any SELECT in the body projects `*` or `t.*`
pub fn has_wildcard(set_expr: &SetExpr) -> bool {
    match set_expr {
        SetExpr::Select(select) => select.projection.iter().any(|item| {
            matches!(
                item,
                SelectItem::Wildcard(..) | SelectItem::QualifiedWildcard(..)
            )
        }),
        SetExpr::SetOperation {
            left,
            right,
            ..
        } => has_wildcard(left) || has_wildcard(right),
        SetExpr::Query(query) => has_wildcard(&query.body),
        _ => false
    }
}

/// Literal LIMIT value of the outermost query
pub fn extract_limit(query: &Query) -> Option<u64> {
    let limit = match query.limit_clause.as_ref()? {
        LimitClause::LimitOffset {
            limit, ..
        } => limit.as_ref()?,
        LimitClause::OffsetCommaLimit {
            limit, ..
        } => limit
    };
    if let Expr::Value(val) = limit
        && let Value::Number(n, _) = &val.value
    {
        return n.parse().ok();
    }
    None
}
