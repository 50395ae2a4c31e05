use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub account_id: Option<i64>,
    pub full_name: String,
    pub email: Option<String>,
    /// Digits-only CPF, also the account username.
    pub cpf: String,
    pub contract_number: Option<String>,
    pub first_access: bool,

    pub cep: Option<String>,
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    /// Two-letter UF code, e.g. "SP".
    pub state: Option<String>,
    /// Full state name derived from `state`, e.g. "São Paulo".
    pub work_state: Option<String>,

    pub job_title_id: Option<i64>,
    pub team_id: Option<i64>,
    pub admission_date: NaiveDate,

    pub clock_in: String,
    pub clock_out: String,
    pub break_window: String,
}
