use crate::model::employee::Employee;
use crate::service::employee::save_address;
use crate::utils::normalize::digits_only;
use crate::utils::states;
use crate::viacep::CepLookup;
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct EnrichmentTally {
    pub updated: u32,
    /// Not-found answers and technical failures, one bucket, matching
    /// what the final report has always shown.
    pub errors: u32,
}

/// Walks every employee with a postal code, resolves it against the
/// lookup service and writes the address fields back. A bad code or a
/// failed call never aborts the batch. `pause` spaces out calls so the
/// public ViaCEP instance does not throttle us (zero in tests).
pub async fn run(
    pool: &SqlitePool,
    lookup: &dyn CepLookup,
    pause: Duration,
) -> Result<EnrichmentTally, sqlx::Error> {
    info!("--- starting address update ---");

    let employees: Vec<Employee> =
        sqlx::query_as("SELECT * FROM employees WHERE cep IS NOT NULL AND cep != ''")
            .fetch_all(pool)
            .await?;

    info!(total = employees.len(), "employees with a CEP to check");

    let mut tally = EnrichmentTally::default();

    for emp in employees {
        let cep = emp.cep.as_deref().unwrap_or_default();
        let cleaned = digits_only(cep);

        if cleaned.len() != 8 {
            info!(full_name = %emp.full_name, %cep, "skipping: invalid CEP");
            continue;
        }

        match lookup.resolve(&cleaned).await {
            Ok(Some(addr)) => {
                let work_state = states::full_name(&addr.uf);
                match save_address(pool, emp.id, &addr, work_state).await {
                    Ok(()) => {
                        info!(full_name = %emp.full_name, city = %addr.city, uf = %addr.uf, "address updated");
                        tally.updated += 1;
                    }
                    Err(e) => {
                        error!(full_name = %emp.full_name, error = %e, "failed to persist address");
                        tally.errors += 1;
                    }
                }
            }
            Ok(None) => {
                warn!(full_name = %emp.full_name, cep = %cleaned, "CEP not found");
                tally.errors += 1;
            }
            Err(e) => {
                // Keep going; one flaky call must not kill the batch.
                error!(full_name = %emp.full_name, error = %e, "technical error during lookup");
                tally.errors += 1;
                continue;
            }
        }

        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
    }

    info!("--- done ---");
    info!(updated = tally.updated, errors = tally.errors, "final tally");

    Ok(tally)
}
