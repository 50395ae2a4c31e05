use crate::auth::password::hash_password;
use crate::model::job_title::JobTitle;
use crate::model::team::Team;
use crate::service::access_sync::sync_hr_access;
use crate::utils::normalize::{digits_only, split_name};
use crate::utils::schedule;
use anyhow::{Context, anyhow};
use csv::{ReaderBuilder, StringRecord, Trim};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, error, info, warn};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: u32,
    pub skipped_existing: u32,
    pub skipped_blank: u32,
    pub failed: u32,
}

/// Provisions one account + one employee per spreadsheet row. Duplicate
/// CPFs are rejected, not merged; a bad row is logged and the batch moves
/// on. Each account/employee pair is created inside one transaction so a
/// failed row leaves no orphaned account behind.
pub async fn run(
    pool: &SqlitePool,
    path: &Path,
    delimiter: u8,
    default_password: &str,
) -> anyhow::Result<ImportReport> {
    info!("--- starting import ---");

    let text = read_import_file(path)?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .context("reading the header row")?
        .clone();
    let columns: Vec<&str> = headers.iter().collect();
    info!(?columns, "columns found in the file");

    if !headers.iter().any(|h| h == "Nome Completo") {
        warn!(
            "CRITICAL: column 'Nome Completo' not found; check the delimiter \
             and the header spelling"
        );
    }

    let mut report = ImportReport::default();

    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "unreadable row");
                report.failed += 1;
                continue;
            }
        };

        let name = field(&headers, &record, "Nome Completo");
        let cpf_raw = field(&headers, &record, "CPF");

        if name.is_empty() || cpf_raw.is_empty() {
            // Blank or separator row.
            debug!("skipping row without name or CPF");
            report.skipped_blank += 1;
            continue;
        }

        let cpf = digits_only(cpf_raw);

        match import_row(pool, &headers, &record, name, &cpf, default_password).await {
            Ok(RowOutcome::AlreadyExists) => {
                info!(%name, "skipping: account already exists");
                report.skipped_existing += 1;
            }
            Ok(RowOutcome::Created(employee_id)) => {
                // The access rule fires on creation too, so a row landing
                // straight in an HR team comes out with staff access.
                if let Err(e) = sync_hr_access(pool, employee_id).await {
                    error!(%name, error = %e, "imported but access sync failed");
                    report.failed += 1;
                    continue;
                }
                info!(%name, "imported");
                report.imported += 1;
            }
            Err(e) => {
                error!(%name, error = %e, "row failed");
                report.failed += 1;
            }
        }
    }

    info!("--- done ---");
    info!(
        imported = report.imported,
        skipped_existing = report.skipped_existing,
        skipped_blank = report.skipped_blank,
        failed = report.failed,
        "final tally"
    );

    Ok(report)
}

/// UTF-8 first (tolerating a BOM, the usual spreadsheet export), whole-file
/// Latin-1 re-decode as the fallback.
fn read_import_file(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("opening {}", path.display()))?;
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf".as_slice()).unwrap_or(&bytes);

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => Ok(encoding_rs::mem::decode_latin1(bytes).into_owned()),
    }
}

fn field<'r>(headers: &StringRecord, record: &'r StringRecord, name: &str) -> &'r str {
    headers
        .iter()
        .position(|h| h == name)
        .and_then(|i| record.get(i))
        .unwrap_or("")
        .trim()
}

enum RowOutcome {
    Created(i64),
    AlreadyExists,
}

async fn import_row(
    pool: &SqlitePool,
    headers: &StringRecord,
    record: &StringRecord,
    name: &str,
    cpf: &str,
    default_password: &str,
) -> anyhow::Result<RowOutcome> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE username = ?)")
            .bind(cpf)
            .fetch_one(pool)
            .await?;
    if exists {
        return Ok(RowOutcome::AlreadyExists);
    }

    let email = {
        let primary = field(headers, record, "Email");
        if primary.is_empty() {
            field(headers, record, "E-mail")
        } else {
            primary
        }
    };
    let job_title_name = field(headers, record, "Cargo");
    let team_name = field(headers, record, "Equipe");
    let contract = field(headers, record, "Nº do Contrato");
    let schedule_text = field(headers, record, "Horário");
    let cep = field(headers, record, "CEP");
    let password = field(headers, record, "Senha");

    let job_title_id = if job_title_name.is_empty() {
        None
    } else {
        Some(get_or_create_job_title(pool, job_title_name).await?)
    };
    let team_id = if team_name.is_empty() {
        None
    } else {
        Some(get_or_create_team(pool, team_name).await?)
    };

    let shift = schedule::parse(schedule_text);
    let break_window = shift.break_window();

    let password = if password.is_empty() {
        default_password
    } else {
        password
    };
    let password_hash = hash_password(password).map_err(|e| anyhow!("hashing password: {e}"))?;
    let (first_name, last_name) = split_name(name);

    let mut tx = pool.begin().await?;

    let account_id = sqlx::query(
        "INSERT INTO accounts (username, email, password_hash, first_name, last_name, is_active) \
         VALUES (?, ?, ?, ?, ?, 1)",
    )
    .bind(cpf)
    .bind(empty_to_null(email))
    .bind(&password_hash)
    .bind(&first_name)
    .bind(&last_name)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let employee_id = sqlx::query(
        "INSERT INTO employees \
         (account_id, full_name, email, cpf, contract_number, first_access, cep, \
          job_title_id, team_id, clock_in, clock_out, break_window) \
         VALUES (?, ?, ?, ?, ?, 1, ?, ?, ?, ?, ?, ?)",
    )
    .bind(account_id)
    .bind(name)
    .bind(empty_to_null(email))
    .bind(cpf)
    .bind(empty_to_null(contract))
    .bind(empty_to_null(cep))
    .bind(job_title_id)
    .bind(team_id)
    .bind(&shift.clock_in)
    .bind(&shift.clock_out)
    .bind(&break_window)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;

    Ok(RowOutcome::Created(employee_id))
}

fn empty_to_null(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

/// Lookup first, insert on miss, re-read after the insert: the UNIQUE(name)
/// constraint settles the race if two imports ever run at once.
async fn get_or_create_team(pool: &SqlitePool, name: &str) -> Result<i64, sqlx::Error> {
    if let Some(team) = sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?
    {
        return Ok(team.id);
    }

    sqlx::query("INSERT INTO teams (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
        .bind(name)
        .execute(pool)
        .await?;

    let team: Team = sqlx::query_as("SELECT * FROM teams WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(team.id)
}

async fn get_or_create_job_title(pool: &SqlitePool, title: &str) -> Result<i64, sqlx::Error> {
    if let Some(job_title) = sqlx::query_as::<_, JobTitle>("SELECT * FROM job_titles WHERE title = ?")
        .bind(title)
        .fetch_optional(pool)
        .await?
    {
        return Ok(job_title.id);
    }

    sqlx::query("INSERT INTO job_titles (title) VALUES (?) ON CONFLICT(title) DO NOTHING")
        .bind(title)
        .execute(pool)
        .await?;

    let job_title: JobTitle = sqlx::query_as("SELECT * FROM job_titles WHERE title = ?")
        .bind(title)
        .fetch_one(pool)
        .await?;
    Ok(job_title.id)
}
