use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("Failed to connect to database");

    init_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    pool
}

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS accounts (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        username      TEXT NOT NULL UNIQUE,
        email         TEXT,
        password_hash TEXT NOT NULL,
        first_name    TEXT NOT NULL DEFAULT '',
        last_name     TEXT NOT NULL DEFAULT '',
        is_active     BOOLEAN NOT NULL DEFAULT 1,
        is_staff      BOOLEAN NOT NULL DEFAULT 0,
        is_superuser  BOOLEAN NOT NULL DEFAULT 0
    )"#,
    r#"CREATE TABLE IF NOT EXISTS groups (
        id   INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS account_groups (
        account_id INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        group_id   INTEGER NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
        PRIMARY KEY (account_id, group_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS job_titles (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        title      TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    )"#,
    r#"CREATE TABLE IF NOT EXISTS teams (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        name          TEXT NOT NULL UNIQUE,
        work_location TEXT NOT NULL DEFAULT 'Matriz'
    )"#,
    r#"CREATE TABLE IF NOT EXISTS team_managers (
        team_id     INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
        employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
        PRIMARY KEY (team_id, employee_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS employees (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id      INTEGER UNIQUE REFERENCES accounts(id) ON DELETE CASCADE,
        full_name       TEXT NOT NULL,
        email           TEXT,
        cpf             TEXT NOT NULL UNIQUE,
        contract_number TEXT,
        first_access    BOOLEAN NOT NULL DEFAULT 1,
        cep             TEXT,
        street          TEXT,
        neighborhood    TEXT,
        city            TEXT,
        state           TEXT,
        work_state      TEXT,
        job_title_id    INTEGER REFERENCES job_titles(id),
        team_id         INTEGER REFERENCES teams(id) ON DELETE SET NULL,
        admission_date  TEXT NOT NULL DEFAULT (date('now')),
        clock_in        TEXT NOT NULL DEFAULT '08:00',
        clock_out       TEXT NOT NULL DEFAULT '18:00',
        break_window    TEXT NOT NULL DEFAULT '13:00 às 14:12'
    )"#,
    r#"CREATE TABLE IF NOT EXISTS employee_teams (
        employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
        team_id     INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
        PRIMARY KEY (employee_id, team_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS timesheet_entries (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id      INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
        day              TEXT NOT NULL,
        morning_in       TEXT,
        lunch_out        TEXT,
        lunch_in         TEXT,
        afternoon_out    TEXT,
        extra_in         TEXT,
        extra_out        TEXT,
        note             TEXT,
        employee_signed  BOOLEAN NOT NULL DEFAULT 0,
        manager_signed   BOOLEAN NOT NULL DEFAULT 0,
        UNIQUE (employee_id, day)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS vacation_requests (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
        start_date  TEXT NOT NULL,
        end_date    TEXT NOT NULL,
        status      TEXT NOT NULL DEFAULT 'pending'
    )"#,
];

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for stmt in SCHEMA {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}
