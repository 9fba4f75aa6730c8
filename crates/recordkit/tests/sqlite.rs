mod support;

use pretty_assertions::assert_eq;
use recordkit::{
    driver::Executor,
    query,
    stmt::{Predicate, Select},
    types::Time,
    Db, Pagination, Value,
};
use recordkit_driver_sqlite::Sqlite;
use support::User;

const USERS: &str = "CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL DEFAULT '',
    nickname TEXT,
    created_at TEXT,
    updated_at TEXT,
    deleted BOOLEAN NOT NULL DEFAULT 0
)";

fn setup() -> Db {
    let db = Db::new(Sqlite::in_memory().unwrap());
    db.exec(USERS, &[]).unwrap();
    db
}

fn created_at() -> Time {
    let ts = chrono::NaiveDate::from_ymd_opt(2024, 5, 6)
        .unwrap()
        .and_hms_opt(7, 8, 9)
        .unwrap();
    Time::new(ts)
}

fn insert(db: &Db, name: &str) -> i64 {
    let mut user = db.bind("users", User::named(name));
    user.model.created_at = created_at();
    user.insert().unwrap();
    user.id
}

#[test]
fn insert_then_load_round_trips() {
    let db = setup();

    let mut user = db.bind(
        "users",
        User {
            nickname: Some("annie".to_string()),
            ..User::named("ann")
        },
    );
    user.model.created_at = created_at();
    user.insert().unwrap();
    assert_eq!(user.id, 1);

    let mut loaded = db.bind("users", User::default());
    loaded.id = user.id;
    loaded.load().unwrap();

    assert_eq!(loaded.record(), user.record());
    assert_eq!(loaded.model.created_at.date_time(), "2024-05-06 07:08:09");
}

#[test]
fn generated_ids_increase() {
    let db = setup();

    assert_eq!(insert(&db, "a"), 1);
    assert_eq!(insert(&db, "b"), 2);
    assert_eq!(insert(&db, "c"), 3);
}

#[test]
fn absent_optional_column_keeps_its_default() {
    let db = setup();
    db.exec(
        "CREATE TABLE profiles (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL DEFAULT '', nickname TEXT NOT NULL DEFAULT 'anon', created_at TEXT, updated_at TEXT, deleted BOOLEAN NOT NULL DEFAULT 0)",
        &[],
    )
    .unwrap();

    let mut user = db.bind("profiles", User::named("ann"));
    user.insert().unwrap();

    let mut loaded = db.bind("profiles", User::default());
    loaded.id = user.id;
    loaded.load().unwrap();
    assert_eq!(loaded.nickname.as_deref(), Some("anon"));
}

#[test]
fn load_missing_row_is_not_found() {
    let db = setup();

    let mut user = db.bind("users", User::default());
    user.id = 42;

    let err = user.load().unwrap_err();
    assert!(err.is_record_not_found());
}

#[test]
fn load_where_fills_keys() {
    let db = setup();
    insert(&db, "ann");
    let id = insert(&db, "bob");

    let mut user = db.bind("users", User::default());
    user.load_where(Predicate::eq("name", "bob")).unwrap();

    assert_eq!(user.id, id);
    assert_eq!(user.name, "bob");
    assert_eq!(user.nickname, None);
}

#[test]
fn exists_reports_matches() {
    let db = setup();

    let mut user = db.bind("users", User::named("ann"));
    user.id = 1;
    assert!(!user.exists().unwrap());
    assert!(!user.exists_where(Predicate::eq("name", "ann")).unwrap());

    insert(&db, "ann");
    insert(&db, "ann");

    assert!(user.exists().unwrap());
    assert!(user.exists_where(Predicate::eq("name", "ann")).unwrap());
    let deleted_ann = Predicate::sql(
        "name = ? AND deleted = ?",
        [Value::from("ann"), Value::from(true)],
    );
    assert!(!user.exists_where(deleted_ann).unwrap());
}

#[test]
fn update_writes_current_values() {
    let db = setup();
    let id = insert(&db, "ann");

    let mut user = db.bind("users", User::default());
    user.id = id;
    user.load().unwrap();

    user.name = "anne".to_string();
    user.nickname = Some("nan".to_string());
    user.model.deleted = true;
    assert_eq!(user.update().unwrap(), 1);

    let mut loaded = db.bind("users", User::default());
    loaded.id = id;
    loaded.load().unwrap();
    assert_eq!(loaded.name, "anne");
    assert_eq!(loaded.nickname.as_deref(), Some("nan"));
    assert!(loaded.model.deleted);
    assert_eq!(loaded.model.created_at, created_at());
}

#[test]
fn update_of_missing_row_changes_nothing() {
    let db = setup();

    let mut user = db.bind("users", User::named("ghost"));
    user.id = 7;

    assert_eq!(user.update().unwrap(), 0);
    assert!(!user.exists().unwrap());
}

#[test]
fn delete_removes_the_row_only() {
    let db = setup();
    let ann = insert(&db, "ann");
    insert(&db, "bob");

    let mut user = db.bind("users", User::default());
    user.id = ann;
    user.load().unwrap();

    assert_eq!(user.delete().unwrap(), 1);
    assert!(!user.exists().unwrap());
    assert_eq!(user.name, "ann");
    assert_eq!(query::count(&user, |select| select).unwrap(), 1);
}

#[test]
fn list_returns_every_row() {
    let db = setup();
    let rec = db.bind("users", User::default());

    assert!(query::list(&rec, None).unwrap().is_empty());

    for name in ["a", "b", "c"] {
        insert(&db, name);
    }

    let users = query::list(&rec, None).unwrap();
    let names: Vec<_> = users.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(users[2].id, 3);
    assert_eq!(users[2].table_name(), "users");
}

#[test]
fn list_where_pages_filtered_rows() {
    let db = setup();
    for i in 1..=25 {
        insert(&db, &format!("user{i}"));
    }

    let rec = db.bind("users", User::default());

    let page = Pagination::new(2, 10);
    let users = query::list_where(&rec, Some(&page), |select| select.order_by("id")).unwrap();
    let ids: Vec<_> = users.iter().map(|user| user.id).collect();
    assert_eq!(ids, (11..=20).collect::<Vec<_>>());

    let users = query::list_where(&rec, Some(&page), |select| {
        select
            .filter(Predicate::sql("id > ?", [Value::from(5)]))
            .order_by("id")
    })
    .unwrap();
    let ids: Vec<_> = users.iter().map(|user| user.id).collect();
    assert_eq!(ids, (16..=25).collect::<Vec<_>>());

    // unset paging returns everything
    let users = query::list(&rec, Some(&Pagination::default())).unwrap();
    assert_eq!(users.len(), 25);
}

#[test]
fn list_ids_count_and_query_one() {
    let db = setup();
    for name in ["ann", "bob", "cat"] {
        insert(&db, name);
    }

    let rec = db.bind("users", User::default());

    let ids =
        query::list_ids(&rec, |select| select.filter("name <> 'bob'").order_by("id")).unwrap();
    assert_eq!(ids, [1, 3]);

    assert_eq!(query::count(&rec, |select| select).unwrap(), 3);
    assert_eq!(
        query::count(&rec, |select| select.filter(Predicate::eq("name", "ann"))).unwrap(),
        1
    );

    let name = query::query_one(&rec, "name", |select| {
        select.filter(Predicate::eq("id", 2)).order_by("id")
    })
    .unwrap();
    assert_eq!(name, "bob");

    let id = query::query_one(&rec, "MAX(id)", |select| select).unwrap();
    assert_eq!(id, "3");

    let err = query::query_one(&rec, "name", |select| select.filter(Predicate::eq("id", 99)))
        .unwrap_err();
    assert!(err.is_record_not_found());
}

#[test]
fn transaction_rollback_discards_insert() {
    let db = setup();
    let mut user = db.bind("users", User::named("ann"));

    let tx = db.begin().unwrap();
    user.insert_by_tx(&*tx).unwrap();
    assert_eq!(user.id, 1);
    tx.rollback().unwrap();

    assert_eq!(query::count(&user, |select| select).unwrap(), 0);
}

#[test]
fn transaction_commit_keeps_all_statements() {
    let db = setup();
    let ann = insert(&db, "ann");

    let mut bob = db.bind("users", User::named("bob"));
    let mut ann = {
        let mut user = db.bind("users", User::default());
        user.id = ann;
        user.load().unwrap();
        user
    };
    ann.name = "anne".to_string();

    let tx = db.begin().unwrap();
    bob.insert_by_tx(&*tx).unwrap();
    ann.update_by_tx(&*tx).unwrap();
    tx.commit().unwrap();

    let rec = db.bind("users", User::default());
    let names: Vec<_> = query::list_where(&rec, None, |select| select.order_by("id"))
        .unwrap()
        .into_iter()
        .map(|user| user.into_record().name)
        .collect();
    assert_eq!(names, ["anne", "bob"]);

    let tx = db.begin().unwrap();
    bob.delete_by_tx(&*tx).unwrap();
    drop(tx);
    assert!(bob.exists().unwrap());
}

#[test]
fn select_transform_can_join() {
    let db = setup();
    db.exec("CREATE TABLE bans (user_id INTEGER NOT NULL)", &[])
        .unwrap();
    insert(&db, "ann");
    let bob = insert(&db, "bob");
    db.exec("INSERT INTO bans (user_id) VALUES (?)", &[Value::I64(bob)])
        .unwrap();

    let rec = db.bind("users", User::default());
    let banned = query::list_ids(&rec, |_| {
        Select::new(["users.id"])
            .from("users")
            .join("JOIN bans ON bans.user_id = users.id")
    })
    .unwrap();
    assert_eq!(banned, [bob]);
}
