use crate::model::account::Account;
use crate::model::employee::Employee;
use crate::model::group::Group;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// Teams whose members get admin access automatically.
pub const HR_TEAM_NAMES: [&str; 3] = ["RH", "Recursos Humanos", "Gestão de Pessoas"];

/// Permission group HR members are placed in. Looked up by name; when the
/// group does not exist the membership step is skipped, never an error.
pub const HR_GROUP_NAME: &str = "Gestores RH";

/// Recomputes the staff flag and HR group membership for the employee's
/// linked account. Must be called after every employee save and after any
/// change to the secondary-team set; idempotent, so callers do not need
/// to track what changed.
pub async fn sync_hr_access(pool: &SqlitePool, employee_id: i64) -> Result<(), sqlx::Error> {
    let employee: Option<Employee> = sqlx::query_as("SELECT * FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool)
        .await?;

    let account_id = match employee.and_then(|e| e.account_id) {
        Some(id) => id,
        None => {
            // Employee missing or not linked to an account yet. The rule
            // must never fail the save that triggered it.
            warn!(employee_id, "access sync skipped: no linked account");
            return Ok(());
        }
    };

    let is_hr = is_hr_member(pool, employee_id).await?;

    let account: Account = sqlx::query_as("SELECT * FROM accounts WHERE id = ?")
        .bind(account_id)
        .fetch_one(pool)
        .await?;

    let hr_group: Option<Group> = sqlx::query_as("SELECT * FROM groups WHERE name = ?")
        .bind(HR_GROUP_NAME)
        .fetch_optional(pool)
        .await?;

    if is_hr {
        if !account.is_staff {
            sqlx::query("UPDATE accounts SET is_staff = 1 WHERE id = ?")
                .bind(account_id)
                .execute(pool)
                .await?;
            info!(employee_id, account_id, "granted staff access (HR team)");
        }
        if let Some(group) = &hr_group {
            let added = sqlx::query(
                "INSERT OR IGNORE INTO account_groups (account_id, group_id) VALUES (?, ?)",
            )
            .bind(account_id)
            .bind(group.id)
            .execute(pool)
            .await?;
            if added.rows_affected() > 0 {
                info!(employee_id, account_id, group = %group.name, "added to group");
            }
        }
    } else if !account.is_superuser {
        if account.is_staff {
            sqlx::query("UPDATE accounts SET is_staff = 0 WHERE id = ?")
                .bind(account_id)
                .execute(pool)
                .await?;
            info!(employee_id, account_id, "revoked staff access (left HR)");
        }
        if let Some(group) = &hr_group {
            sqlx::query("DELETE FROM account_groups WHERE account_id = ? AND group_id = ?")
                .bind(account_id)
                .bind(group.id)
                .execute(pool)
                .await?;
        }
    } else {
        debug!(employee_id, account_id, "superuser exempt from staff revocation");
    }

    Ok(())
}

/// True when the primary team or any secondary team carries an HR name.
async fn is_hr_member(pool: &SqlitePool, employee_id: i64) -> Result<bool, sqlx::Error> {
    let placeholders = vec!["?"; HR_TEAM_NAMES.len()].join(", ");
    let sql = format!(
        "SELECT EXISTS( \
            SELECT 1 FROM employees e \
            JOIN teams t ON t.id = e.team_id \
            WHERE e.id = ? AND t.name IN ({placeholders}) \
        ) OR EXISTS( \
            SELECT 1 FROM employee_teams et \
            JOIN teams t ON t.id = et.team_id \
            WHERE et.employee_id = ? AND t.name IN ({placeholders}) \
        )"
    );

    let mut query = sqlx::query_scalar::<_, bool>(&sql).bind(employee_id);
    for name in HR_TEAM_NAMES {
        query = query.bind(name);
    }
    query = query.bind(employee_id);
    for name in HR_TEAM_NAMES {
        query = query.bind(name);
    }

    query.fetch_one(pool).await
}
