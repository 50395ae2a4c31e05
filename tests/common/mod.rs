#![allow(dead_code)]

use rh_admin::db;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Single-connection pool so every query sees the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    db::init_schema(&pool).await.expect("schema");
    pool
}

pub async fn insert_account(
    pool: &SqlitePool,
    username: &str,
    is_staff: bool,
    is_superuser: bool,
) -> i64 {
    sqlx::query(
        "INSERT INTO accounts (username, password_hash, is_staff, is_superuser) \
         VALUES (?, 'x', ?, ?)",
    )
    .bind(username)
    .bind(is_staff)
    .bind(is_superuser)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

pub async fn insert_team(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO teams (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub async fn insert_group(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO groups (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub async fn insert_employee(
    pool: &SqlitePool,
    account_id: Option<i64>,
    full_name: &str,
    cpf: &str,
    cep: Option<&str>,
    team_id: Option<i64>,
) -> i64 {
    sqlx::query(
        "INSERT INTO employees (account_id, full_name, cpf, cep, team_id) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(account_id)
    .bind(full_name)
    .bind(cpf)
    .bind(cep)
    .bind(team_id)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

pub async fn is_staff(pool: &SqlitePool, account_id: i64) -> bool {
    sqlx::query_scalar("SELECT is_staff FROM accounts WHERE id = ?")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn in_group(pool: &SqlitePool, account_id: i64, group_id: i64) -> bool {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM account_groups WHERE account_id = ? AND group_id = ?)",
    )
    .bind(account_id)
    .bind(group_id)
    .fetch_one(pool)
    .await
    .unwrap()
}
