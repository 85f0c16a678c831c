//! End-to-end statement building scenarios.

use pgqb::prelude::*;

#[test]
fn select_star_from_table() {
    let sql = select(()).from("x").to_sql().unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x""#);
}

#[test]
fn select_columns_with_in_filter() {
    let sql = select(["a", "b", "c"])
        .from("x")
        .filter(("a", "IN", vec![42, 23]))
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT "a", "b", "c" FROM "x" WHERE "a" IN (42, 23)"#);
}

#[test]
fn update_with_arithmetic_expression() {
    let sql = update("x")
        .set("a", op(col("a"), "/", op(col("b"), "+", 1)))
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"UPDATE "x" SET "a" = "a" / ("b" + 1)"#);
}

#[test]
fn insert_with_returning() {
    let sql = insert("x")
        .values((("a", 0), ("b", false), ("c", "String")))
        .returning(["a", "b", "c"])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "x" ("a", "b", "c") VALUES (0, FALSE, 'String') RETURNING "a", "b", "c""#
    );
}

#[test]
fn union_nests_to_the_right() {
    let sql = union(
        select("a").from("x"),
        union(select("a").from("y"), select("a").from("z")),
    )
    .to_sql()
    .unwrap();
    assert_eq!(
        sql,
        r#"SELECT "a" FROM "x" UNION (SELECT "a" FROM "y" UNION SELECT "a" FROM "z")"#
    );
}

#[test]
fn union_nests_to_the_left() {
    let sql = union(
        union(select("a").from("x"), select("a").from("y")),
        select("a").from("z"),
    )
    .to_sql()
    .unwrap();
    assert_eq!(
        sql,
        r#"(SELECT "a" FROM "x" UNION SELECT "a" FROM "y") UNION SELECT "a" FROM "z""#
    );
}

#[test]
fn substitute_skips_quoted_placeholders() {
    let sql = substitute("a = ?, b = '?''?', c = ?", &[1.into(), 2.into()]).unwrap();
    assert_eq!(sql, "a = 1, b = '?''?', c = 2");
}

#[test]
fn escape_value_estring_and_nested_array() {
    assert_eq!(escape_value(&"'text'".into()).unwrap(), r"E'\'text\''");
    let nested: Value = vec![vec![0], vec![1]].into();
    assert_eq!(escape_value(&nested).unwrap(), "ARRAY[[0], [1]]");
}

#[test]
fn escape_identifier_paths() {
    assert_eq!(escape_identifier(["a", "b", "c"]).unwrap(), r#""a"."b"."c""#);
    assert_eq!(escape_identifier(["a.b", "c"]).unwrap(), r#""a"."b"."c""#);
    assert_eq!(escape_identifier(["a", "*"]).unwrap(), r#""a".*"#);
    assert_eq!(escape_identifier(["*", "a"]).unwrap(), r#"*."a""#);
    assert_eq!(escape_identifier(["", "a", ""]).unwrap(), r#""a""#);
}

#[test]
fn identifier_round_trip_for_plain_names() {
    for name in ["x", "user_name", "Table", "weird name", "a$b"] {
        assert_eq!(
            escape_identifier([name]).unwrap(),
            format!("\"{name}\""),
        );
    }
}

#[test]
fn compiled_output_is_stable() {
    let stmt = select(["id", "name"])
        .from("users")
        .filter(("active", true))
        .filter(or(vec![
            col("role").eq("admin"),
            col("role").eq("owner"),
        ]))
        .order_by("id", SortDir::Asc)
        .offset(0)
        .limit(50);
    let first = stmt.to_sql().unwrap();
    let second = stmt.to_sql().unwrap();
    assert_eq!(first, second);
    assert!(!first.contains("  "), "no doubled whitespace: {first}");
    assert!(!first.ends_with(';'));
}

#[test]
fn join_forms() {
    let sql = select(())
        .from("u")
        .inner_join("o", op(col("u.id"), "=", col("o.user_id")))
        .left_join("p", ["user_id"])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "u" INNER JOIN "o" ON "u"."id" = "o"."user_id" LEFT OUTER JOIN "p" USING ("user_id")"#
    );
}

#[test]
fn aliased_subquery_in_projection_and_from() {
    let total = select(max(col("amount"))).from("orders").alias("top");
    let sql = select(total).from("orders").to_sql().unwrap();
    assert_eq!(
        sql,
        r#"SELECT (SELECT MAX("amount") FROM "orders") AS "top" FROM "orders""#
    );
}

#[test]
fn nulls_ordering_keywords() {
    let sql = select(())
        .from("t")
        .order_by_nulls("a", SortDir::Desc, NullsOrder::First)
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "t" ORDER BY "a" DESC NULLS FIRST"#);
}

#[test]
fn error_paths_surface_precisely() {
    assert!(matches!(
        escape_identifier(["bad\0name"]).unwrap_err(),
        QbError::InvalidIdentifier(_)
    ));
    assert!(matches!(
        escape_value(&"bad\0text".into()).unwrap_err(),
        QbError::InvalidString(_)
    ));
    assert!(matches!(
        substitute("?", &[]).unwrap_err(),
        QbError::MissingBind(_)
    ));
    assert!(matches!(
        substitute("'open", &[]).unwrap_err(),
        QbError::LexError(_)
    ));
    assert!(matches!(
        update("x").to_sql().unwrap_err(),
        QbError::QueryShape(_)
    ));
}
