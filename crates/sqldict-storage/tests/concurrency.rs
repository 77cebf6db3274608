// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Several handles on one file, and lock contention between them.

use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use sqldict_storage::{AsyncMapStore, AsyncSqlDict, MapStore, SqlDict, StoreConfig};
use tempfile::{TempDir, tempdir};

fn config(dir: &TempDir, name: &str) -> StoreConfig {
    StoreConfig::new(dir.path().join(name).to_string_lossy().into_owned())
}

/// Hold the write lock on `path` from another thread until `release` fires.
fn hold_write_lock(path: &Path) -> (mpsc::Sender<()>, thread::JoinHandle<()>) {
    let path = path.to_path_buf();
    let (locked_tx, locked_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let holder = thread::spawn(move || {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch("BEGIN IMMEDIATE; INSERT INTO kv_store (key, val) VALUES ('holder', x'31');")
            .unwrap();
        locked_tx.send(()).unwrap();
        let _ = release_rx.recv();
        conn.execute_batch("COMMIT;").unwrap();
    });
    locked_rx.recv().unwrap();
    (release_tx, holder)
}

#[test]
fn handles_on_two_threads_see_every_write() {
    let dir = tempdir().unwrap();
    let cfg = config(&dir, "threads");
    // Create the table once so both threads start from the same schema.
    let _: SqlDict<String, i64> = SqlDict::open(&cfg).unwrap();

    let workers: Vec<_> = ["left", "right"]
        .into_iter()
        .map(|side| {
            let cfg = cfg.clone();
            thread::spawn(move || {
                let dict: SqlDict<String, i64> = SqlDict::open(&cfg).unwrap();
                for i in 0..25 {
                    dict.set(&format!("{side}-{i}"), &i).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let dict: SqlDict<String, i64> = SqlDict::open(&cfg).unwrap();
    assert_eq!(dict.len().unwrap(), 50);
    assert_eq!(dict.get(&"right-24".to_string()).unwrap(), 24);
}

#[tokio::test]
async fn two_async_handles_interleave() {
    let dir = tempdir().unwrap();
    let cfg = config(&dir, "async_pair");
    let first: AsyncSqlDict<String, i64> = AsyncSqlDict::open(&cfg).await.unwrap();
    let second: AsyncSqlDict<String, i64> = AsyncSqlDict::open(&cfg).await.unwrap();

    let (k1, k2) = ("k1".to_string(), "k2".to_string());
    let (a, b) = tokio::join!(first.set(&k1, &1), second.set(&k2, &2));
    a.unwrap();
    b.unwrap();

    assert_eq!(first.len().await.unwrap(), 2);
    assert_eq!(second.get(&k1).await.unwrap(), 1);
}

#[test]
fn expired_busy_timeout_surfaces_as_busy() {
    let dir = tempdir().unwrap();
    let cfg = config(&dir, "busy").with_busy_timeout_ms(0);
    let dict: SqlDict<String, i64> = SqlDict::open(&cfg).unwrap();

    let (release, holder) = hold_write_lock(dict.path());
    let err = dict.set(&"k".to_string(), &1).unwrap_err();
    assert!(err.is_busy(), "got: {err:?}");

    release.send(()).unwrap();
    holder.join().unwrap();
    dict.set(&"k".to_string(), &1).unwrap();
    assert_eq!(dict.len().unwrap(), 2);
}

#[tokio::test]
async fn expired_busy_timeout_surfaces_as_busy_async() {
    let dir = tempdir().unwrap();
    let cfg = config(&dir, "busy_async").with_busy_timeout_ms(0);
    let dict: AsyncSqlDict<String, i64> = AsyncSqlDict::open(&cfg).await.unwrap();

    let (release, holder) = hold_write_lock(dict.path());
    let err = dict.set(&"k".to_string(), &1).await.unwrap_err();
    assert!(err.is_busy(), "got: {err:?}");

    release.send(()).unwrap();
    holder.join().unwrap();
    dict.set(&"k".to_string(), &1).await.unwrap();
}

#[test]
fn readers_are_not_blocked_by_a_writer() {
    let dir = tempdir().unwrap();
    let cfg = config(&dir, "readers").with_busy_timeout_ms(0);
    let dict: SqlDict<String, i64> =
        SqlDict::open_with_entries(&cfg, vec![("a".to_string(), 1)]).unwrap();

    let (release, holder) = hold_write_lock(dict.path());
    assert_eq!(dict.get(&"a".to_string()).unwrap(), 1);
    assert!(!dict.contains(&"holder".to_string()).unwrap());

    release.send(()).unwrap();
    holder.join().unwrap();
    assert!(dict.contains(&"holder".to_string()).unwrap());
}

#[test]
fn blocked_writer_waits_for_the_lock() {
    let dir = tempdir().unwrap();
    let cfg = config(&dir, "wait").with_busy_timeout_ms(5_000);
    let dict: SqlDict<String, i64> = SqlDict::open(&cfg).unwrap();

    let (release, holder) = hold_write_lock(dict.path());
    let releaser = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        release.send(()).unwrap();
    });

    dict.set(&"k".to_string(), &1).unwrap();
    releaser.join().unwrap();
    holder.join().unwrap();
    assert_eq!(dict.get(&"k".to_string()).unwrap(), 1);
}

#[tokio::test]
async fn suspended_writer_leaves_the_runtime_free() {
    let dir = tempdir().unwrap();
    let cfg = config(&dir, "suspend").with_busy_timeout_ms(5_000);
    let dict: AsyncSqlDict<String, i64> = AsyncSqlDict::open(&cfg).await.unwrap();

    let (release, holder) = hold_write_lock(dict.path());
    let key = "k".to_string();
    let set = dict.set(&key, &1);
    tokio::pin!(set);

    tokio::select! {
        result = &mut set => panic!("set finished while the lock was held: {result:?}"),
        () = tokio::time::sleep(Duration::from_millis(50)) => {}
    }

    release.send(()).unwrap();
    set.await.unwrap();
    holder.join().unwrap();
    assert_eq!(dict.get(&key).await.unwrap(), 1);
}
