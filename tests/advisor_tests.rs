// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_review::{
    advisor::{
        AdvisorRegistry, Code, Finding, PolicyEvaluator, Status, normalize_identifier,
        unwrap_string_literal
    },
    error::ReviewError,
    schema::{
        CasePayload, NamingFormatPayload, NumberValuePayload, Rule, RuleLevel, RulePayload,
        SNAKE_CASE_FORMAT, StringArrayLimitPayload
    },
    syntax::{
        Argument, Identifier, Node, NodeKind, ProcedureCall, QualifiedName, SqlDialect,
        SyntaxTree, parse_tree
    }
};

fn rule(
    rule_type: &str,
    level: RuleLevel,
    dialect: SqlDialect,
    payload: Option<RulePayload>
) -> Rule {
    Rule {
        rule_type: rule_type.into(),
        level,
        dialect,
        payload,
        comment: String::new()
    }
}

fn naming_rule(format: &str, max_length: usize) -> Rule {
    rule(
        "naming.table",
        RuleLevel::Error,
        SqlDialect::MsSql,
        Some(RulePayload::NamingFormat(NamingFormatPayload {
            format: format.to_string(),
            max_length
        }))
    )
}

fn number_rule(rule_type: &str, number: i64) -> Rule {
    rule(
        rule_type,
        RuleLevel::Warning,
        SqlDialect::MySQL,
        Some(RulePayload::NumberValue(NumberValuePayload {
            number
        }))
    )
}

fn list_rule(rule_type: &str, list: &[&str]) -> Rule {
    rule(
        rule_type,
        RuleLevel::Warning,
        SqlDialect::MySQL,
        Some(RulePayload::StringArrayLimit(StringArrayLimitPayload {
            list: list.iter().map(|s| s.to_string()).collect()
        }))
    )
}

fn check_tree(
    tree: &SyntaxTree,
    dialect: SqlDialect,
    rule: &Rule
) -> Result<Vec<Finding>, ReviewError> {
    let registry = AdvisorRegistry::builtin().unwrap();
    PolicyEvaluator::new(&registry).check("", tree, dialect, rule)
}

fn check_sql(sql: &str, dialect: SqlDialect, rule: &Rule) -> Vec<Finding> {
    let tree = parse_tree(sql, dialect).unwrap();
    let registry = AdvisorRegistry::builtin().unwrap();
    PolicyEvaluator::new(&registry)
        .check(sql, &tree, dialect, rule)
        .unwrap()
}

fn rename_call(arguments: Vec<Argument>) -> SyntaxTree {
    procedure_call(
        QualifiedName::new([Identifier::bare("sp_rename")]),
        arguments
    )
}

fn procedure_call(name: QualifiedName, arguments: Vec<Argument>) -> SyntaxTree {
    SyntaxTree {
        nodes: vec![Node {
            line: 1,
            kind: NodeKind::ProcedureCall(ProcedureCall {
                name: Some(name),
                arguments
            })
        }]
    }
}

fn literal(text: &str) -> Argument {
    Argument::StringLiteral(text.to_string())
}

fn assert_success(findings: &[Finding]) {
    assert_eq!(findings, &[Finding::ok()]);
}

#[test]
fn test_create_table_mismatches_format() {
    let findings = check_sql(
        "CREATE TABLE UserOrders (id INT)",
        SqlDialect::MsSql,
        &naming_rule(SNAKE_CASE_FORMAT, 0)
    );
    assert_eq!(findings.len(), 1);
    let finding = &findings[0];
    assert_eq!(finding.status, Status::Error);
    assert_eq!(finding.code, Code::NamingTableConventionMismatch);
    assert_eq!(finding.title, "naming.table");
    assert_eq!(finding.line, 1);
    assert_eq!(
        finding.content,
        "UserOrders mismatches table naming convention, naming format should be \"^[a-z]+(_[a-z]+)*$\""
    );
}

#[test]
fn test_create_table_exceeds_length() {
    let findings = check_sql(
        "CREATE TABLE orders_history (id INT)",
        SqlDialect::MsSql,
        &naming_rule(SNAKE_CASE_FORMAT, 5)
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(
        findings[0].content,
        "orders_history mismatches table naming convention, its length should be within 5 characters"
    );
}

#[test]
fn test_format_and_length_both_reported() {
    let findings = check_sql(
        "CREATE TABLE UserOrders (id INT)",
        SqlDialect::MsSql,
        &naming_rule(SNAKE_CASE_FORMAT, 4)
    );
    assert_eq!(findings.len(), 2);
    assert!(findings[0].content.contains("naming format should be"));
    assert!(findings[1].content.contains("within 4 characters"));
}

#[test]
fn test_matching_table_name_is_success() {
    let findings = check_sql(
        "CREATE TABLE user_orders (id INT)",
        SqlDialect::MsSql,
        &naming_rule(SNAKE_CASE_FORMAT, 64)
    );
    assert_success(&findings);
}

#[test]
fn test_format_must_match_whole_name() {
    let findings = check_sql(
        "CREATE TABLE orders2 (id INT)",
        SqlDialect::MsSql,
        &naming_rule("[a-z]+", 0)
    );
    assert_eq!(findings.len(), 1);
}

#[test]
fn test_length_counts_characters() {
    let findings = check_sql(
        "CREATE TABLE [заказы] (id INT)",
        SqlDialect::MsSql,
        &naming_rule(".*", 6)
    );
    assert_success(&findings);

    let findings = check_sql(
        "CREATE TABLE [заказы] (id INT)",
        SqlDialect::MsSql,
        &naming_rule(".*", 5)
    );
    assert_eq!(findings.len(), 1);
    assert!(findings[0].content.contains("within 5 characters"));
}

#[test]
fn test_quoted_name_is_checked_unquoted() {
    let findings = check_sql(
        "CREATE TABLE dbo.[orders] (id INT)",
        SqlDialect::MsSql,
        &naming_rule(SNAKE_CASE_FORMAT, 64)
    );
    assert_success(&findings);
}

#[test]
fn test_sp_rename_checks_new_name() {
    let tree = rename_call(vec![literal("'dbo.Old_Table'"), literal("'NewTable'")]);
    let findings = check_tree(&tree, SqlDialect::MsSql, &naming_rule(SNAKE_CASE_FORMAT, 0)).unwrap();
    assert_eq!(findings.len(), 1);
    assert!(findings[0]
        .content
        .starts_with("NewTable mismatches table naming convention"));
}

#[test]
fn test_sp_rename_with_three_arguments_is_ignored() {
    let tree = rename_call(vec![
        literal("'dbo.Orders.Col'"),
        literal("'NewCol'"),
        literal("'COLUMN'")
    ]);
    let findings = check_tree(&tree, SqlDialect::MsSql, &naming_rule(SNAKE_CASE_FORMAT, 0)).unwrap();
    assert_success(&findings);
}

#[test]
fn test_sp_rename_with_expression_argument_is_ignored() {
    let tree = rename_call(vec![
        literal("'dbo.Old_Table'"),
        Argument::Expression("@new_name".to_string())
    ]);
    let findings = check_tree(&tree, SqlDialect::MsSql, &naming_rule(SNAKE_CASE_FORMAT, 0)).unwrap();
    assert_success(&findings);
}

#[test]
fn test_sp_rename_name_is_case_insensitive_when_bare() {
    let tree = procedure_call(
        QualifiedName::new([Identifier::bare("SP_RENAME")]),
        vec![literal("'old'"), literal("'BadName'")]
    );
    let findings = check_tree(&tree, SqlDialect::MsSql, &naming_rule(SNAKE_CASE_FORMAT, 0)).unwrap();
    assert_eq!(findings.len(), 1);
}

#[test]
fn test_sp_rename_bracket_quoted() {
    let tree = procedure_call(
        QualifiedName::new([Identifier::quoted("sp_rename", '[')]),
        vec![literal("'old'"), literal("'BadName'")]
    );
    let findings = check_tree(&tree, SqlDialect::MsSql, &naming_rule(SNAKE_CASE_FORMAT, 0)).unwrap();
    assert_eq!(findings.len(), 1);
}

#[test]
fn test_qualified_procedure_is_ignored() {
    let tree = procedure_call(
        QualifiedName::new([Identifier::bare("dbo"), Identifier::bare("sp_rename")]),
        vec![literal("'old'"), literal("'BadName'")]
    );
    let findings = check_tree(&tree, SqlDialect::MsSql, &naming_rule(SNAKE_CASE_FORMAT, 0)).unwrap();
    assert_success(&findings);
}

#[test]
fn test_other_procedure_is_ignored() {
    let tree = procedure_call(
        QualifiedName::new([Identifier::bare("sp_help")]),
        vec![literal("'old'"), literal("'BadName'")]
    );
    let findings = check_tree(&tree, SqlDialect::MsSql, &naming_rule(SNAKE_CASE_FORMAT, 0)).unwrap();
    assert_success(&findings);
}

#[test]
fn test_empty_procedure_name_is_skipped() {
    let tree = procedure_call(
        QualifiedName::new([Identifier::quoted("", '[')]),
        vec![literal("'old'"), literal("'BadName'")]
    );
    let findings = check_tree(&tree, SqlDialect::MsSql, &naming_rule(SNAKE_CASE_FORMAT, 0)).unwrap();
    assert_success(&findings);
}

#[test]
fn test_exec_sp_rename_parsed() {
    let findings = check_sql(
        "EXEC sp_rename 'dbo.old_table', 'NewTable'",
        SqlDialect::MsSql,
        &naming_rule(SNAKE_CASE_FORMAT, 0)
    );
    assert_eq!(findings.len(), 1);
    assert!(findings[0].content.starts_with("NewTable "));
}

#[test]
fn test_rename_table_checks_new_name() {
    let findings = check_sql(
        "RENAME TABLE orders TO OrdersOld",
        SqlDialect::MySQL,
        &naming_rule(SNAKE_CASE_FORMAT, 0)
    );
    assert_eq!(findings.len(), 1);
    assert!(findings[0].content.starts_with("OrdersOld "));
}

#[test]
fn test_findings_keep_statement_lines() {
    let sql = "CREATE TABLE good_one (id INT);\nCREATE TABLE BadOne (id INT);\nCREATE TABLE AlsoBad (id INT);";
    let findings = check_sql(sql, SqlDialect::MsSql, &naming_rule(SNAKE_CASE_FORMAT, 0));
    let lines: Vec<usize> = findings.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![2, 3]);
}

#[test]
fn test_check_is_idempotent() {
    let tree = parse_tree(
        "CREATE TABLE UserOrders (id INT);\nEXEC sp_rename 'a', 'B'",
        SqlDialect::MsSql
    )
    .unwrap();
    let rule = naming_rule(SNAKE_CASE_FORMAT, 3);
    let first = check_tree(&tree, SqlDialect::MsSql, &rule).unwrap();
    let second = check_tree(&tree, SqlDialect::MsSql, &rule).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_warning_level_produces_warning_status() {
    let mut rule = naming_rule(SNAKE_CASE_FORMAT, 0);
    rule.level = RuleLevel::Warning;
    let findings = check_sql("CREATE TABLE UserOrders (id INT)", SqlDialect::MsSql, &rule);
    assert_eq!(findings[0].status, Status::Warning);
}

#[test]
fn test_disabled_level_cannot_be_checked() {
    let mut rule = naming_rule(SNAKE_CASE_FORMAT, 0);
    rule.level = RuleLevel::Disabled;
    let tree = parse_tree("CREATE TABLE orders (id INT)", SqlDialect::MsSql).unwrap();
    let err = check_tree(&tree, SqlDialect::MsSql, &rule).unwrap_err();
    assert!(matches!(err, ReviewError::UnusableLevel { .. }));
}

#[test]
fn test_wrong_payload_variant() {
    let rule = rule(
        "naming.table",
        RuleLevel::Error,
        SqlDialect::MsSql,
        Some(RulePayload::NumberValue(NumberValuePayload {
            number: 3
        }))
    );
    let tree = parse_tree("CREATE TABLE orders (id INT)", SqlDialect::MsSql).unwrap();
    let err = check_tree(&tree, SqlDialect::MsSql, &rule).unwrap_err();
    assert_eq!(
        err,
        ReviewError::PayloadMismatch {
            rule_type: "naming.table".to_string(),
            expected:  "NamingFormatPayload"
        }
    );
}

#[test]
fn test_missing_payload() {
    let rule = rule("naming.table", RuleLevel::Error, SqlDialect::MsSql, None);
    let tree = parse_tree("CREATE TABLE orders (id INT)", SqlDialect::MsSql).unwrap();
    let err = check_tree(&tree, SqlDialect::MsSql, &rule).unwrap_err();
    assert!(matches!(err, ReviewError::PayloadMismatch { .. }));
}

#[test]
fn test_invalid_format() {
    let tree = parse_tree("CREATE TABLE orders (id INT)", SqlDialect::MsSql).unwrap();
    let err = check_tree(&tree, SqlDialect::MsSql, &naming_rule("([a-z", 0)).unwrap_err();
    assert!(matches!(err, ReviewError::InvalidFormat { pattern, .. } if pattern == "([a-z"));
}

#[test]
fn test_naming_column() {
    let rule = rule(
        "naming.column",
        RuleLevel::Warning,
        SqlDialect::MySQL,
        Some(RulePayload::NamingFormat(NamingFormatPayload {
            format:     SNAKE_CASE_FORMAT.to_string(),
            max_length: 64
        }))
    );
    let findings = check_sql(
        "CREATE TABLE users (id INT, UserName TEXT)",
        SqlDialect::MySQL,
        &rule
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, Code::NamingColumnConventionMismatch);
    assert!(findings[0].content.starts_with("`users`.`UserName`"));
}

fn index_rule(rule_type: &str, format: &str) -> Rule {
    rule(
        rule_type,
        RuleLevel::Warning,
        SqlDialect::PostgreSQL,
        Some(RulePayload::NamingFormat(NamingFormatPayload {
            format:     format.to_string(),
            max_length: 64
        }))
    )
}

#[test]
fn test_naming_index_template() {
    let rule = index_rule("naming.index.idx", "^$|^idx_{{table}}_{{column_list}}$");
    assert_success(&check_sql(
        "CREATE INDEX idx_orders_user_id_created ON orders (user_id, created)",
        SqlDialect::PostgreSQL,
        &rule
    ));
    let findings = check_sql(
        "CREATE INDEX orders_idx ON orders (user_id)",
        SqlDialect::PostgreSQL,
        &rule
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, Code::NamingIndexConventionMismatch);
    assert!(findings[0].content.contains("found `orders_idx`"));
}

#[test]
fn test_naming_index_ignores_unique() {
    let rule = index_rule("naming.index.idx", "^idx_{{table}}_{{column_list}}$");
    assert_success(&check_sql(
        "CREATE UNIQUE INDEX whatever ON orders (code)",
        SqlDialect::PostgreSQL,
        &rule
    ));
}

#[test]
fn test_naming_unique_index() {
    let rule = index_rule("naming.index.uk", "^$|^uk_{{table}}_{{column_list}}$");
    assert_success(&check_sql(
        "CREATE UNIQUE INDEX uk_orders_code ON orders (code)",
        SqlDialect::PostgreSQL,
        &rule
    ));
    let findings = check_sql(
        "CREATE UNIQUE INDEX code_unique ON orders (code)",
        SqlDialect::PostgreSQL,
        &rule
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, Code::NamingUkConventionMismatch);
}

#[test]
fn test_identifier_case() {
    let rule = rule(
        "naming.identifier.case",
        RuleLevel::Warning,
        SqlDialect::MySQL,
        Some(RulePayload::Case(CasePayload {
            upper: false
        }))
    );
    let findings = check_sql("CREATE TABLE Orders (ID INT, name TEXT)", SqlDialect::MySQL, &rule);
    assert_eq!(findings.len(), 2);
    assert!(findings.iter().all(|f| f.code == Code::NamingCaseMismatch));
}

#[test]
fn test_drop_naming_convention() {
    let rule = rule(
        "table.drop-naming-convention",
        RuleLevel::Error,
        SqlDialect::MySQL,
        Some(RulePayload::NamingFormat(NamingFormatPayload {
            format:     "_del$".to_string(),
            max_length: 0
        }))
    );
    assert_success(&check_sql("DROP TABLE orders_del", SqlDialect::MySQL, &rule));
    let findings = check_sql("DROP TABLE orders_del, orders", SqlDialect::MySQL, &rule);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, Code::TableDropNamingConventionMismatch);
    assert!(findings[0].content.starts_with("`orders`"));
}

#[test]
fn test_require_primary_key() {
    let rule = rule("table.require-pk", RuleLevel::Error, SqlDialect::MySQL, None);
    assert_success(&check_sql(
        "CREATE TABLE orders (id INT PRIMARY KEY)",
        SqlDialect::MySQL,
        &rule
    ));
    let findings = check_sql("CREATE TABLE logs (msg TEXT)", SqlDialect::MySQL, &rule);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].content, "Table `logs` requires PRIMARY KEY");
}

#[test]
fn test_required_columns() {
    let rule = list_rule("column.required", &["id", "created_ts"]);
    let findings = check_sql("CREATE TABLE orders (id INT)", SqlDialect::MySQL, &rule);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].content, "Table `orders` requires columns: created_ts");
}

#[test]
fn test_type_disallow_list() {
    let rule = list_rule("column.type-disallow-list", &["json"]);
    let findings = check_sql("CREATE TABLE docs (id INT, body JSON)", SqlDialect::MySQL, &rule);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, Code::DisabledColumnType);
    assert!(findings[0].content.contains("`docs`.`body`"));
}

#[test]
fn test_maximum_character_length() {
    let rule = number_rule("column.maximum-character-length", 20);
    assert_success(&check_sql(
        "CREATE TABLE t (code CHAR(10), note VARCHAR(200))",
        SqlDialect::MySQL,
        &rule
    ));
    let findings = check_sql("CREATE TABLE t (code CHAR(30))", SqlDialect::MySQL, &rule);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, Code::CharLengthExceedsLimit);
}

#[test]
fn test_no_select_all() {
    let rule = rule("statement.select.no-select-all", RuleLevel::Warning, SqlDialect::MySQL, None);
    let findings = check_sql("SELECT * FROM orders", SqlDialect::MySQL, &rule);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, Code::StatementSelectAll);
    assert_success(&check_sql("SELECT id FROM orders", SqlDialect::MySQL, &rule));
}

#[test]
fn test_where_require() {
    let rule = rule("statement.where.require", RuleLevel::Error, SqlDialect::MySQL, None);
    let sql = "UPDATE orders SET paid = 1;\nDELETE FROM orders WHERE id = 1;\nDELETE FROM orders";
    let findings = check_sql(sql, SqlDialect::MySQL, &rule);
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].content, "UPDATE on `orders` requires WHERE clause");
    assert_eq!(findings[1].line, 3);
}

#[test]
fn test_no_leading_wildcard_like() {
    let rule = rule(
        "statement.where.no-leading-wildcard-like",
        RuleLevel::Warning,
        SqlDialect::MySQL,
        None
    );
    let findings = check_sql(
        "SELECT id FROM users WHERE name LIKE '%son' OR name LIKE 'jo%'",
        SqlDialect::MySQL,
        &rule
    );
    assert_eq!(findings.len(), 1);
    assert!(findings[0].content.contains("'%son'"));
}

#[test]
fn test_no_leading_wildcard_like_in_update() {
    let rule = rule(
        "statement.where.no-leading-wildcard-like",
        RuleLevel::Warning,
        SqlDialect::MySQL,
        None
    );
    let sql = "UPDATE users SET active = 0 WHERE name LIKE 'jo%';\nUPDATE users SET active = 1 WHERE email LIKE '%@old.example'";
    let findings = check_sql(sql, SqlDialect::MySQL, &rule);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, 2);
    assert!(findings[0].content.contains("'%@old.example'"));
}

#[test]
fn test_maximum_limit_value() {
    let rule = number_rule("statement.maximum-limit-value", 1000);
    let findings = check_sql("SELECT id FROM orders LIMIT 5000", SqlDialect::MySQL, &rule);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, Code::StatementExceedMaximumLimitValue);
    assert_success(&check_sql("SELECT id FROM orders LIMIT 10", SqlDialect::MySQL, &rule));
    assert_success(&check_sql(
        "SELECT id FROM orders LIMIT 5000",
        SqlDialect::MySQL,
        &number_rule("statement.maximum-limit-value", 0)
    ));
}

#[test]
fn test_insert_must_specify_column() {
    let rule = rule(
        "statement.insert.must-specify-column",
        RuleLevel::Error,
        SqlDialect::MySQL,
        None
    );
    let findings = check_sql("INSERT INTO orders VALUES (1)", SqlDialect::MySQL, &rule);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, Code::InsertNotSpecifyColumn);
    assert_success(&check_sql("INSERT INTO orders (id) VALUES (1)", SqlDialect::MySQL, &rule));
}

#[test]
fn test_insert_row_limit() {
    let rule = number_rule("statement.insert.row-limit", 2);
    let findings = check_sql(
        "INSERT INTO orders (id) VALUES (1), (2), (3)",
        SqlDialect::MySQL,
        &rule
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, Code::InsertTooManyRows);
    assert_success(&check_sql(
        "INSERT INTO orders (id) SELECT id FROM staging",
        SqlDialect::MySQL,
        &rule
    ));
}

#[test]
fn test_unwrap_string_literal() {
    assert_eq!(unwrap_string_literal("'NewTable'"), "NewTable");
    assert_eq!(unwrap_string_literal("NewTable"), "NewTable");
    assert_eq!(unwrap_string_literal("'unterminated"), "'unterminated");
    assert_eq!(unwrap_string_literal("N'Wide'"), "N'Wide'");
    assert_eq!(unwrap_string_literal("''"), "");
}

#[test]
fn test_normalize_identifier() {
    assert_eq!(normalize_identifier(&Identifier::bare("SP_Rename")).unwrap(), "sp_rename");
    assert_eq!(
        normalize_identifier(&Identifier::quoted("SP_Rename", '[')).unwrap(),
        "SP_Rename"
    );
    assert!(normalize_identifier(&Identifier::bare("")).is_err());
}

#[test]
fn test_status_from_rule_level() {
    assert_eq!(
        Status::from_rule_level("naming.table", RuleLevel::Error).unwrap(),
        Status::Error
    );
    assert_eq!(
        Status::from_rule_level("naming.table", RuleLevel::Warning).unwrap(),
        Status::Warning
    );
    assert!(Status::from_rule_level("naming.table", RuleLevel::Disabled).is_err());
    assert!(Status::Error > Status::Warning);
    assert!(Status::Warning > Status::Success);
}

#[test]
fn test_code_numbers() {
    assert_eq!(Code::Ok.number(), 0);
    assert_eq!(Code::NamingTableConventionMismatch.number(), 301);
    assert_eq!(Code::NamingTableConventionMismatch.to_string(), "NAMING_TABLE_CONVENTION_MISMATCH");
}
