mod common;

use common::*;
use rh_admin::service::access_sync::{HR_GROUP_NAME, sync_hr_access};
use rh_admin::service::employee::{rename, set_teams, work_location};

#[tokio::test]
async fn hr_primary_team_grants_staff_and_group() {
    let pool = test_pool().await;
    let rh = insert_team(&pool, "RH").await;
    let group = insert_group(&pool, HR_GROUP_NAME).await;
    let account = insert_account(&pool, "111", false, false).await;
    let employee = insert_employee(&pool, Some(account), "Ana Souza", "111", None, None).await;

    set_teams(&pool, employee, Some(rh), &[]).await.unwrap();

    assert!(is_staff(&pool, account).await);
    assert!(in_group(&pool, account, group).await);
}

#[tokio::test]
async fn hr_secondary_team_grants_staff() {
    let pool = test_pool().await;
    let sales = insert_team(&pool, "Vendas").await;
    let hr = insert_team(&pool, "Gestão de Pessoas").await;
    let account = insert_account(&pool, "222", false, false).await;
    let employee = insert_employee(&pool, Some(account), "Bruno Lima", "222", None, None).await;

    set_teams(&pool, employee, Some(sales), &[hr]).await.unwrap();

    assert!(is_staff(&pool, account).await);
}

#[tokio::test]
async fn leaving_hr_revokes_staff_and_group() {
    let pool = test_pool().await;
    let rh = insert_team(&pool, "Recursos Humanos").await;
    let sales = insert_team(&pool, "Vendas").await;
    let group = insert_group(&pool, HR_GROUP_NAME).await;
    let account = insert_account(&pool, "333", false, false).await;
    let employee = insert_employee(&pool, Some(account), "Carla Dias", "333", None, None).await;

    set_teams(&pool, employee, Some(rh), &[]).await.unwrap();
    assert!(is_staff(&pool, account).await);

    set_teams(&pool, employee, Some(sales), &[]).await.unwrap();

    assert!(!is_staff(&pool, account).await);
    assert!(!in_group(&pool, account, group).await);
}

#[tokio::test]
async fn superuser_keeps_staff_outside_hr() {
    let pool = test_pool().await;
    let sales = insert_team(&pool, "Vendas").await;
    let account = insert_account(&pool, "444", true, true).await;
    let employee = insert_employee(&pool, Some(account), "Root Admin", "444", None, None).await;

    set_teams(&pool, employee, Some(sales), &[]).await.unwrap();

    assert!(is_staff(&pool, account).await);
}

#[tokio::test]
async fn sync_is_idempotent() {
    let pool = test_pool().await;
    let rh = insert_team(&pool, "RH").await;
    let group = insert_group(&pool, HR_GROUP_NAME).await;
    let account = insert_account(&pool, "555", false, false).await;
    let employee = insert_employee(&pool, Some(account), "Davi Rocha", "555", None, Some(rh)).await;

    sync_hr_access(&pool, employee).await.unwrap();
    sync_hr_access(&pool, employee).await.unwrap();

    assert!(is_staff(&pool, account).await);
    assert!(in_group(&pool, account, group).await);

    let memberships: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM account_groups WHERE account_id = ?")
            .bind(account)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(memberships, 1);
}

#[tokio::test]
async fn missing_group_is_a_noop_not_an_error() {
    let pool = test_pool().await;
    let rh = insert_team(&pool, "RH").await;
    let account = insert_account(&pool, "666", false, false).await;
    let employee = insert_employee(&pool, Some(account), "Elisa Melo", "666", None, Some(rh)).await;

    sync_hr_access(&pool, employee).await.unwrap();

    assert!(is_staff(&pool, account).await);
}

#[tokio::test]
async fn employee_without_account_is_a_noop() {
    let pool = test_pool().await;
    let rh = insert_team(&pool, "RH").await;
    let employee = insert_employee(&pool, None, "Sem Conta", "777", None, Some(rh)).await;

    sync_hr_access(&pool, employee).await.unwrap();
}

#[tokio::test]
async fn unknown_employee_is_a_noop() {
    let pool = test_pool().await;
    sync_hr_access(&pool, 9999).await.unwrap();
}

#[tokio::test]
async fn rename_mirrors_title_cased_names_onto_account() {
    let pool = test_pool().await;
    let account = insert_account(&pool, "888", false, false).await;
    let employee = insert_employee(&pool, Some(account), "x", "888", None, None).await;

    rename(&pool, employee, "maria das DORES silva").await.unwrap();

    let (first, last): (String, String) =
        sqlx::query_as("SELECT first_name, last_name FROM accounts WHERE id = ?")
            .bind(account)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(first, "Maria");
    assert_eq!(last, "Das Dores Silva");
}

#[tokio::test]
async fn work_location_prefers_own_state_then_team() {
    let pool = test_pool().await;
    let team = insert_team(&pool, "Filial").await;
    sqlx::query("UPDATE teams SET work_location = 'Brasília-DF' WHERE id = ?")
        .bind(team)
        .execute(&pool)
        .await
        .unwrap();

    let a = insert_employee(&pool, None, "A", "1", None, Some(team)).await;
    sqlx::query("UPDATE employees SET work_state = 'São Paulo' WHERE id = ?")
        .bind(a)
        .execute(&pool)
        .await
        .unwrap();
    let b = insert_employee(&pool, None, "B", "2", None, Some(team)).await;
    let c = insert_employee(&pool, None, "C", "3", None, None).await;

    assert_eq!(work_location(&pool, a).await.unwrap(), "São Paulo");
    assert_eq!(work_location(&pool, b).await.unwrap(), "Brasília-DF");
    assert_eq!(work_location(&pool, c).await.unwrap(), "-");
}
