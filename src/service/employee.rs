use crate::service::access_sync::sync_hr_access;
use crate::utils::normalize::split_name;
use crate::viacep::ResolvedAddress;
use sqlx::SqlitePool;

/// Persists the address fields resolved by the lookup service plus the
/// derived work-state label, then re-runs the access rule (every employee
/// save re-runs it, same as a manual edit would).
pub async fn save_address(
    pool: &SqlitePool,
    employee_id: i64,
    addr: &ResolvedAddress,
    work_state: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE employees \
         SET street = ?, neighborhood = ?, city = ?, state = ?, work_state = ? \
         WHERE id = ?",
    )
    .bind(&addr.street)
    .bind(&addr.neighborhood)
    .bind(&addr.city)
    .bind(&addr.uf)
    .bind(work_state)
    .bind(employee_id)
    .execute(pool)
    .await?;

    sync_hr_access(pool, employee_id).await
}

/// Replaces the primary team and the whole secondary-team set, then
/// re-runs the access rule. Callers changing membership MUST go through
/// here so the staff flag never goes stale.
pub async fn set_teams(
    pool: &SqlitePool,
    employee_id: i64,
    primary: Option<i64>,
    secondary: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE employees SET team_id = ? WHERE id = ?")
        .bind(primary)
        .bind(employee_id)
        .execute(pool)
        .await?;

    sqlx::query("DELETE FROM employee_teams WHERE employee_id = ?")
        .bind(employee_id)
        .execute(pool)
        .await?;
    for team_id in secondary {
        sqlx::query("INSERT OR IGNORE INTO employee_teams (employee_id, team_id) VALUES (?, ?)")
            .bind(employee_id)
            .bind(team_id)
            .execute(pool)
            .await?;
    }

    sync_hr_access(pool, employee_id).await
}

/// Updates the full name and mirrors the title-cased first/last split
/// onto the linked account, then re-runs the access rule.
pub async fn rename(
    pool: &SqlitePool,
    employee_id: i64,
    full_name: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE employees SET full_name = ? WHERE id = ?")
        .bind(full_name)
        .bind(employee_id)
        .execute(pool)
        .await?;

    let (first, last) = split_name(full_name);
    sqlx::query(
        "UPDATE accounts SET first_name = ?, last_name = ? \
         WHERE id = (SELECT account_id FROM employees WHERE id = ?)",
    )
    .bind(first)
    .bind(last)
    .bind(employee_id)
    .execute(pool)
    .await?;

    sync_hr_access(pool, employee_id).await
}

/// Where the employee works, for listings: own work-state label when the
/// address has been enriched, else the primary team's location, else "-".
pub async fn work_location(pool: &SqlitePool, employee_id: i64) -> Result<String, sqlx::Error> {
    let row: Option<(Option<String>, Option<String>)> = sqlx::query_as(
        "SELECT e.work_state, t.work_location \
         FROM employees e \
         LEFT JOIN teams t ON t.id = e.team_id \
         WHERE e.id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;

    let location = match row {
        Some((Some(state), _)) if !state.is_empty() => state,
        Some((_, Some(team_location))) if !team_location.is_empty() => team_location,
        _ => "-".to_string(),
    };
    Ok(location)
}
