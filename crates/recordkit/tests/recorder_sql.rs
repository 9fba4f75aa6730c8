mod support;

use pretty_assertions::assert_eq;
use recordkit::{stmt::Predicate, Flavor, Record, Value};
use support::{Logged, Note, Post, Recording, User};

#[test]
fn insert_skips_auto_key_and_assigns_generated_id() {
    let driver = Recording::with_last_insert_id(Flavor::Mysql, Some(7));
    let mut user = driver.db().bind("users", User::named("ann"));

    user.insert().unwrap();

    assert_eq!(
        driver.log(),
        [Logged {
            sql: "INSERT INTO users (name, created_at, updated_at, deleted) VALUES (?, ?, ?, ?)"
                .to_string(),
            params: vec![
                Value::from("ann"),
                Value::Null,
                Value::Null,
                Value::Bool(false)
            ],
        }]
    );
    assert_eq!(user.id, 7);
}

#[test]
fn insert_writes_present_optional_fields() {
    let driver = Recording::with_last_insert_id(Flavor::Sqlite, Some(1));
    let mut user = driver.db().bind(
        "users",
        User {
            nickname: Some("annie".to_string()),
            ..User::named("ann")
        },
    );

    user.insert().unwrap();

    assert_eq!(
        driver.sql(),
        ["INSERT INTO users (name, nickname, created_at, updated_at, deleted) VALUES (?, ?, ?, ?, ?)"]
    );
}

#[test]
fn insert_without_reported_id_fails() {
    let driver = Recording::new(Flavor::Mysql);
    let mut user = driver.db().bind("users", User::named("ann"));

    let err = user.insert().unwrap_err();
    assert!(err.is_last_insert_id_unavailable());
    assert_eq!(user.id, 0);
}

#[test]
fn insert_on_postgres_reads_back_the_row() {
    let driver = Recording::new(Flavor::Postgresql);
    driver.push_rows(vec![vec![
        Value::I64(9),
        Value::from("ann"),
        Value::Null,
        Value::from("2024-05-06 07:08:09"),
        Value::Null,
        Value::Bool(false),
    ]]);

    let mut user = driver.db().bind("users", User::named("ann"));
    user.insert().unwrap();

    assert_eq!(
        driver.sql(),
        ["INSERT INTO users (name, created_at, updated_at, deleted) VALUES ($1, $2, $3, $4) \
          RETURNING id, name, nickname, created_at, updated_at, deleted"]
    );
    assert_eq!(user.id, 9);
    assert_eq!(user.nickname, None);
    assert_eq!(user.model.created_at.date_time(), "2024-05-06 07:08:09");
}

#[test]
fn insert_by_tx_runs_inside_the_transaction() {
    let driver = Recording::with_last_insert_id(Flavor::Mysql, Some(3));
    let db = driver.db();
    let mut user = db.bind("users", User::named("ann"));

    let tx = db.begin().unwrap();
    user.insert_by_tx(&*tx).unwrap();
    tx.commit().unwrap();

    let sql = driver.sql();
    assert_eq!(sql.len(), 3);
    assert_eq!(sql[0], "BEGIN");
    assert!(sql[1].starts_with("INSERT INTO users "));
    assert_eq!(sql[2], "COMMIT");
    assert_eq!(user.id, 3);
}

#[test]
fn update_sets_non_key_columns_by_key() {
    let driver = Recording::new(Flavor::Mysql);
    let mut user = driver.db().bind("users", User::named("bob"));
    user.id = 4;
    user.model.deleted = true;

    assert_eq!(user.update().unwrap(), 1);

    assert_eq!(
        driver.log(),
        [Logged {
            sql: "UPDATE users SET name = ?, created_at = ?, updated_at = ?, deleted = ? WHERE id = ?"
                .to_string(),
            params: vec![
                Value::from("bob"),
                Value::Null,
                Value::Null,
                Value::Bool(true),
                Value::I64(4)
            ],
        }]
    );
}

#[test]
fn update_on_postgres_numbers_placeholders() {
    let driver = Recording::new(Flavor::Postgresql);
    let mut user = driver.db().bind("users", User::named("bob"));
    user.id = 4;
    user.nickname = Some("bobby".to_string());

    user.update().unwrap();

    assert_eq!(
        driver.sql(),
        ["UPDATE users SET name = $1, nickname = $2, created_at = $3, updated_at = $4, \
          deleted = $5 WHERE id = $6"]
    );
}

#[test]
fn delete_by_key_leaves_record_untouched() {
    let driver = Recording::new(Flavor::Mysql);
    let mut user = driver.db().bind("users", User::named("cat"));
    user.id = 3;

    user.delete().unwrap();

    assert_eq!(
        driver.log(),
        [Logged {
            sql: "DELETE FROM users WHERE id = ?".to_string(),
            params: vec![Value::I64(3)],
        }]
    );
    assert_eq!(user.id, 3);
    assert_eq!(user.name, "cat");
}

#[test]
fn keyless_record_statements_are_unrestricted() {
    let driver = Recording::new(Flavor::Mysql);
    let note = driver.db().bind(
        "notes",
        Note {
            body: "hi".to_string(),
        },
    );

    note.delete().unwrap();
    note.update().unwrap();

    assert_eq!(
        driver.sql(),
        ["DELETE FROM notes", "UPDATE notes SET body = ?"]
    );
}

#[test]
fn load_scans_non_key_columns() {
    let driver = Recording::new(Flavor::Mysql);
    driver.push_rows(vec![vec![
        Value::from("bob"),
        Value::from("bobby"),
        Value::from("2024-05-06 07:08:09"),
        Value::Null,
        Value::I64(1),
    ]]);

    let mut user = driver.db().bind("users", User::default());
    user.id = 5;
    user.load().unwrap();

    assert_eq!(
        driver.log(),
        [Logged {
            sql: "SELECT name, nickname, created_at, updated_at, deleted FROM users \
                  WHERE id = ? LIMIT 1"
                .to_string(),
            params: vec![Value::I64(5)],
        }]
    );
    assert_eq!(user.id, 5);
    assert_eq!(user.name, "bob");
    assert_eq!(user.nickname.as_deref(), Some("bobby"));
    assert_eq!(user.model.created_at.date(), "2024-05-06");
    assert!(!user.model.updated_at.is_valid());
    assert!(user.model.deleted);
}

#[test]
fn load_of_missing_row_is_not_found() {
    let driver = Recording::new(Flavor::Mysql);
    let mut user = driver.db().bind("users", User::named("ghost"));
    user.id = 99;

    let err = user.load().unwrap_err();
    assert!(err.is_record_not_found());
    assert_eq!(err.to_string(), "no rows in result set: users");
    assert_eq!(user.name, "ghost");
}

#[test]
fn load_where_scans_every_column() {
    let driver = Recording::new(Flavor::Postgresql);
    driver.push_rows(vec![vec![
        Value::I64(12),
        Value::from("dee"),
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Bool(false),
    ]]);

    let mut user = driver.db().bind("users", User::default());
    user.load_where(Predicate::sql("name = ?", [Value::from("dee")]))
        .unwrap();

    assert_eq!(
        driver.sql(),
        ["SELECT id, name, nickname, created_at, updated_at, deleted FROM users \
          WHERE name = $1 LIMIT 1"]
    );
    assert_eq!(user.id, 12);
    assert_eq!(user.name, "dee");
    assert_eq!(user.nickname, None);
}

#[test]
fn exists_checks_count() {
    let driver = Recording::new(Flavor::Mysql);
    driver.push_rows(vec![vec![Value::I64(0)]]);
    driver.push_rows(vec![vec![Value::Bool(true)]]);

    let mut user = driver.db().bind("users", User::default());
    user.id = 1;

    assert!(!user.exists().unwrap());
    assert!(user
        .exists_where(Predicate::eq("name", "ann").and(Predicate::eq("deleted", false)))
        .unwrap());

    assert_eq!(
        driver.sql(),
        [
            "SELECT COUNT(*) > 0 FROM users WHERE id = ? LIMIT 1",
            "SELECT COUNT(*) > 0 FROM users WHERE name = ? AND deleted = ? LIMIT 1",
        ]
    );
}

#[test]
fn flavor_override_changes_placeholders() {
    let driver = Recording::new(Flavor::Mysql);
    let db = driver.db().with_flavor(Flavor::Postgresql);
    let mut user = db.bind("users", User::default());
    user.id = 2;

    user.delete().unwrap();

    assert_eq!(user.flavor(), Flavor::Postgresql);
    assert_eq!(driver.sql(), ["DELETE FROM users WHERE id = $1"]);
}

#[test]
fn introspection() {
    let driver = Recording::new(Flavor::Mysql);
    let mut user = driver.db().bind("users", User::named("eve"));
    user.id = 8;

    assert_eq!(user.table_name(), "users");
    assert_eq!(user.key(), ["id"]);
    assert_eq!(
        user.columns(true, false),
        ["id", "name", "nickname", "created_at", "updated_at", "deleted"]
    );
    assert_eq!(
        user.columns(false, true),
        ["name", "created_at", "updated_at", "deleted"]
    );

    let ids = user.where_ids().unwrap();
    assert_eq!(ids.get("id"), Some(&Value::I64(8)));

    // omit_null filters the same fields from both lists
    let columns = user.columns(false, true);
    let refs = user.field_references(false, true).unwrap();
    assert_eq!(columns.len(), refs.len());
    drop(refs);

    // without omit_null, absent optional fields are allocated
    let refs = user.field_references(true, false).unwrap();
    assert_eq!(refs.len(), 6);
    drop(refs);
    assert_eq!(user.nickname.as_deref(), Some(""));

    assert!(driver.log().is_empty());
}

#[test]
fn own_key_wins_over_embedded_model_declared_first() {
    let driver = Recording::with_last_insert_id(Flavor::Mysql, Some(7));
    let mut post = driver.db().bind("posts", Post::default());
    post.title = "hello".to_string();

    post.insert().unwrap();
    assert_eq!(post.id, 7);
    assert_eq!(post.model.id, 0);

    post.title = "bye".to_string();
    assert_eq!(post.update().unwrap(), 1);

    assert_eq!(
        driver.log(),
        [
            Logged {
                sql: "INSERT INTO posts (created_at, updated_at, deleted, title) \
                      VALUES (?, ?, ?, ?)"
                    .to_string(),
                params: vec![
                    Value::Null,
                    Value::Null,
                    Value::Bool(false),
                    Value::from("hello"),
                ],
            },
            Logged {
                sql: "UPDATE posts SET created_at = ?, updated_at = ?, deleted = ?, title = ? \
                      WHERE id = ?"
                    .to_string(),
                params: vec![
                    Value::Null,
                    Value::Null,
                    Value::Bool(false),
                    Value::from("bye"),
                    Value::I64(7),
                ],
            },
        ]
    );

    let columns: Vec<_> = post.fields_mut().into_iter().map(|(name, _)| name).collect();
    assert_eq!(columns, ["created_at", "updated_at", "deleted", "id", "title"]);
}

#[test]
fn own_key_receives_postgres_returning_row() {
    let driver = Recording::new(Flavor::Postgresql);
    driver.push_rows(vec![vec![
        Value::Null,
        Value::Null,
        Value::Bool(false),
        Value::I64(12),
        Value::from("hello"),
    ]]);

    let mut post = driver.db().bind("posts", Post::default());
    post.insert().unwrap();

    assert_eq!(
        driver.sql(),
        ["INSERT INTO posts (created_at, updated_at, deleted, title) \
          VALUES ($1, $2, $3, $4) RETURNING created_at, updated_at, deleted, id, title"]
    );
    assert_eq!(post.id, 12);
    assert_eq!(post.model.id, 0);
}
