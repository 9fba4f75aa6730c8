#![allow(dead_code)]

use recordkit::{
    driver::{Driver, ExecResult, Executor, Transaction},
    Db, Flavor, Model, Record, Result, Row, Value,
};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

#[derive(Debug, Default, Clone, PartialEq, Record)]
pub struct User {
    #[orm("id,PRIMARY_KEY,AUTO_INCREMENT")]
    pub id: i64,

    #[orm("name", length = 50)]
    pub name: String,

    #[orm("nickname,NULL")]
    pub nickname: Option<String>,

    pub model: Model,
}

impl User {
    pub fn named(name: &str) -> User {
        User {
            name: name.to_string(),
            ..User::default()
        }
    }
}

/// Embeds `Model` ahead of its own `id`, which shadows the embedded one.
#[derive(Debug, Default, Record)]
pub struct Post {
    pub model: Model,

    #[orm("id,PRIMARY_KEY,AUTO_INCREMENT")]
    pub id: i64,

    #[orm("title")]
    pub title: String,
}

/// A record without a primary key.
#[derive(Debug, Default, Record)]
pub struct Note {
    #[orm("body")]
    pub body: String,
}

/// A statement as the driver received it.
#[derive(Debug, Clone, PartialEq)]
pub struct Logged {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Driver that records statements and answers queries from a queue.
#[derive(Debug, Default)]
pub struct Recording {
    flavor: Flavor,
    last_insert_id: Option<i64>,
    log: Mutex<Vec<Logged>>,
    results: Mutex<VecDeque<Vec<Row>>>,
}

impl Recording {
    pub fn new(flavor: Flavor) -> Arc<Recording> {
        Recording::with_last_insert_id(flavor, None)
    }

    pub fn with_last_insert_id(flavor: Flavor, id: Option<i64>) -> Arc<Recording> {
        Arc::new(Recording {
            flavor,
            last_insert_id: id,
            ..Recording::default()
        })
    }

    pub fn db(self: &Arc<Self>) -> Db {
        Db::from_arc(self.clone())
    }

    /// Queue the rows returned by the next query.
    pub fn push_rows(&self, rows: Vec<Vec<Value>>) {
        let rows = rows.into_iter().map(Row::new).collect();
        self.results.lock().unwrap().push_back(rows);
    }

    pub fn log(&self) -> Vec<Logged> {
        self.log.lock().unwrap().clone()
    }

    pub fn sql(&self) -> Vec<String> {
        self.log().into_iter().map(|logged| logged.sql).collect()
    }

    fn record(&self, sql: &str, params: &[Value]) {
        self.log.lock().unwrap().push(Logged {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
    }
}

impl Executor for Recording {
    fn exec(&self, sql: &str, params: &[Value]) -> Result<ExecResult> {
        self.record(sql, params);
        Ok(ExecResult {
            rows_affected: 1,
            last_insert_id: self.last_insert_id,
        })
    }

    fn query(
        &self,
        sql: &str,
        params: &[Value],
        each: &mut dyn FnMut(Row) -> Result<()>,
    ) -> Result<()> {
        self.record(sql, params);
        let rows = self.results.lock().unwrap().pop_front().unwrap_or_default();
        for row in rows {
            each(row)?;
        }
        Ok(())
    }
}

impl Driver for Recording {
    fn flavor(&self) -> Flavor {
        self.flavor
    }

    fn begin(&self) -> Result<Box<dyn Transaction + '_>> {
        self.record("BEGIN", &[]);
        Ok(Box::new(RecordingTx { driver: self }))
    }
}

pub struct RecordingTx<'a> {
    driver: &'a Recording,
}

impl Executor for RecordingTx<'_> {
    fn exec(&self, sql: &str, params: &[Value]) -> Result<ExecResult> {
        self.driver.exec(sql, params)
    }

    fn query(
        &self,
        sql: &str,
        params: &[Value],
        each: &mut dyn FnMut(Row) -> Result<()>,
    ) -> Result<()> {
        self.driver.query(sql, params, each)
    }
}

impl Transaction for RecordingTx<'_> {
    fn commit(self: Box<Self>) -> Result<()> {
        self.driver.record("COMMIT", &[]);
        Ok(())
    }

    fn rollback(self: Box<Self>) -> Result<()> {
        self.driver.record("ROLLBACK", &[]);
        Ok(())
    }
}
