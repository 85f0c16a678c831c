//! Integration tests for the stmt module.

use crate::node::{col, op, or, val};
use crate::stmt::{delete, insert, select, union, update, SortDir};

#[test]
fn test_select_basic() {
    let sql = select(()).from("x").to_sql().unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x""#);
}

#[test]
fn test_select_full_clause_order() {
    let sql = select(["user_id"])
        .from("orders")
        .filter(("status", "paid"))
        .group_by("user_id")
        .having(op(crate::node::count(col("*")), ">", 5))
        .order_by("user_id", SortDir::Asc)
        .offset(10)
        .limit(5)
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT "user_id" FROM "orders" WHERE "status" = 'paid' GROUP BY "user_id" HAVING COUNT(*) > 5 ORDER BY "user_id" ASC OFFSET 10 LIMIT 5"#
    );
}

#[test]
fn test_insert_then_select_returning() {
    let sql = insert("users")
        .values((("username", "alice"), ("active", true)))
        .returning(["id", "username"])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "users" ("username", "active") VALUES ('alice', TRUE) RETURNING "id", "username""#
    );
}

#[test]
fn test_update_mixes_literals_and_expressions() {
    let sql = update("counters")
        .set("n", op(col("n"), "+", 1))
        .set("touched", true)
        .filter(("id", 3))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "counters" SET "n" = "n" + 1, "touched" = TRUE WHERE "id" = 3"#
    );
}

#[test]
fn test_delete_with_or_group() {
    let sql = delete("sessions")
        .filter(("tenant", 1))
        .filter(or(vec![
            col("expired").eq(true),
            col("revoked").eq(true),
        ]))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"DELETE FROM "sessions" WHERE "tenant" = 1 AND ("expired" = TRUE OR "revoked" = TRUE)"#
    );
}

#[test]
fn test_subquery_as_value_operand() {
    let newest = select(crate::node::max(col("id"))).from("events");
    let sql = select(())
        .from("events")
        .filter(op(col("id"), "=", newest))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "events" WHERE "id" = (SELECT MAX("id") FROM "events")"#
    );
}

#[test]
fn test_union_of_filtered_selects() {
    let sql = union(
        select("id").from("a").filter(("kind", 1)),
        select("id").from("b").filter(("kind", 2)),
    )
    .to_sql()
    .unwrap();
    assert_eq!(
        sql,
        r#"SELECT "id" FROM "a" WHERE "kind" = 1 UNION SELECT "id" FROM "b" WHERE "kind" = 2"#
    );
}

#[test]
fn test_values_accept_value_nodes() {
    let sql = insert("t")
        .values([("tags", val(vec!["x", "y"]))])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"INSERT INTO "t" ("tags") VALUES (ARRAY['x', 'y'])"#);
}

#[test]
fn test_compile_twice_is_identical() {
    let stmt = select(["a", "b"])
        .from("t")
        .filter(("a", ">", 0))
        .order_by("b", SortDir::Desc)
        .limit(3);
    assert_eq!(stmt.to_sql().unwrap(), stmt.to_sql().unwrap());
}
