//! 経費管理画面の操作テスト
//!
//! 偽APIサーバーに対して作成・更新・削除・編集取り消しを実行し、
//! 一覧とフォームの状態が期待どおりに遷移することを確認します。

#[cfg(test)]
mod tests {
    use super::super::fake_backend::FakeBackend;
    use super::super::manager::*;
    use super::super::models::*;
    use crate::shared::api_client::{ApiClient, ApiClientConfig};
    use crate::shared::errors::AppError;

    fn seed(id: ExpenseId, title: &str, amount: f64) -> Expense {
        Expense {
            id,
            title: title.to_string(),
            category: "Food".to_string(),
            amount: Some(amount),
            date: "2024-01-15".to_string(),
            payment_method: "Card".to_string(),
        }
    }

    fn fill_draft(manager: &mut ExpenseManager, title: &str, amount: &str) {
        let draft = manager.draft_mut();
        draft.title = title.to_string();
        draft.category = "Food".to_string();
        draft.amount = amount.to_string();
        draft.date = "2024-01-01".to_string();
        draft.payment_method = "Cash".to_string();
    }

    async fn connect(backend: &FakeBackend) -> (ApiClient, ExpenseManager) {
        let client = ApiClient::new_with_config(backend.client_config()).unwrap();
        let mut manager = ExpenseManager::new();
        manager.load_all(&client).await.unwrap();
        (client, manager)
    }

    #[tokio::test]
    async fn test_create_round_trip_sends_numeric_amount() {
        let backend = FakeBackend::start().await;
        let (client, mut manager) = connect(&backend).await;

        fill_draft(&mut manager, "Coffee", "4.50");
        manager.save(&client).await.unwrap();

        assert_eq!(manager.expenses().len(), 1);
        let created = &manager.expenses()[0];
        assert_eq!(created.title, "Coffee");
        assert_eq!(created.category, "Food");
        assert_eq!(created.amount, Some(4.5));
        assert_eq!(created.date, "2024-01-01");
        assert_eq!(created.payment_method, "Cash");

        // 送信されたJSONの金額は数値
        let post = backend
            .requests()
            .into_iter()
            .find(|r| r.method == "POST")
            .unwrap();
        assert_eq!(post.body.unwrap()["amount"], serde_json::json!(4.5));

        // 成功後はフォームがリセットされ、新規作成モードのまま
        assert!(manager.draft().is_empty());
        assert_eq!(manager.mode(), Mode::Creating);
    }

    #[tokio::test]
    async fn test_create_adds_exactly_one_record() {
        let backend =
            FakeBackend::with_expenses(vec![seed(1, "Lunch", 12.0), seed(2, "Dinner", 30.0)]).await;
        let (client, mut manager) = connect(&backend).await;

        fill_draft(&mut manager, "Snack", "3");
        manager.save(&client).await.unwrap();

        assert_eq!(manager.expenses().len(), 3);
        let new_records: Vec<&Expense> = manager
            .expenses()
            .iter()
            .filter(|e| e.title == "Snack")
            .collect();
        assert_eq!(new_records.len(), 1);
        assert_eq!(new_records[0].amount, Some(3.0));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_id() {
        let backend =
            FakeBackend::with_expenses(vec![seed(1, "Lunch", 12.0), seed(2, "Dinner", 30.0)]).await;
        let (client, mut manager) = connect(&backend).await;

        let target = manager.expenses()[1].clone();
        manager.begin_edit(&target);
        manager.draft_mut().title = "Late dinner".to_string();
        manager.draft_mut().amount = "32.5".to_string();
        manager.save(&client).await.unwrap();

        let puts: Vec<_> = backend
            .requests()
            .into_iter()
            .filter(|r| r.method == "PUT")
            .collect();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].path, "/api/expenses/2");

        let updated = manager.expenses().iter().find(|e| e.id == 2).unwrap();
        assert_eq!(updated.title, "Late dinner");
        assert_eq!(updated.amount, Some(32.5));
        assert_eq!(manager.expenses().len(), 2);
        assert_eq!(manager.expenses()[0], seed(1, "Lunch", 12.0));

        assert_eq!(manager.mode(), Mode::Creating);
        assert!(manager.draft().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_only_that_record() {
        let backend = FakeBackend::with_expenses(vec![
            seed(1, "Lunch", 12.0),
            seed(2, "Dinner", 30.0),
            seed(3, "Coffee", 4.5),
        ])
        .await;
        let (client, mut manager) = connect(&backend).await;

        manager.delete(&client, 2).await.unwrap();

        let ids: Vec<ExpenseId> = manager.expenses().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(manager.expenses()[0], seed(1, "Lunch", 12.0));
        assert_eq!(manager.expenses()[1], seed(3, "Coffee", 4.5));
    }

    #[tokio::test]
    async fn test_begin_edit_then_cancel_issues_no_request() {
        let backend = FakeBackend::with_expenses(vec![seed(1, "Lunch", 12.0)]).await;
        let (_client, mut manager) = connect(&backend).await;
        let requests_before = backend.request_count();

        let target = manager.expenses()[0].clone();
        manager.begin_edit(&target);
        assert_eq!(manager.mode(), Mode::Editing(1));
        manager.cancel_edit();

        assert_eq!(manager.mode(), Mode::Creating);
        assert!(manager.draft().is_empty());
        assert_eq!(backend.request_count(), requests_before);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft_and_list() {
        let backend = FakeBackend::with_expenses(vec![seed(1, "Lunch", 12.0)]).await;
        let (client, mut manager) = connect(&backend).await;
        backend.fail_method("POST", 500);

        fill_draft(&mut manager, "Coffee", "4.50");
        let draft_before = manager.draft().clone();
        let list_before = manager.expenses().to_vec();

        let result = manager.save(&client).await;

        assert!(matches!(result, Err(AppError::Status(500))));
        assert_eq!(manager.draft(), &draft_before);
        assert_eq!(manager.expenses(), list_before.as_slice());
        assert_eq!(manager.mode(), Mode::Creating);
        assert_eq!(manager.error(), Some(SAVE_ERROR_MESSAGE));
        // 失敗後に一覧の再取得は行わない
        assert_eq!(backend.requests().last().unwrap().method, "POST");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_edit_mode() {
        let backend = FakeBackend::with_expenses(vec![seed(5, "Taxi", 18.0)]).await;
        let (client, mut manager) = connect(&backend).await;
        backend.fail_method("PUT", 400);

        let target = manager.expenses()[0].clone();
        manager.begin_edit(&target);
        manager.draft_mut().title = "Taxi home".to_string();

        assert!(manager.save(&client).await.is_err());
        assert_eq!(manager.mode(), Mode::Editing(5));
        assert_eq!(manager.draft().title, "Taxi home");
        assert_eq!(manager.expenses()[0].title, "Taxi");

        // 4xxと5xxは区別しない
        assert_eq!(manager.error(), Some(SAVE_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_record_visible() {
        let backend = FakeBackend::with_expenses(vec![seed(1, "Lunch", 12.0)]).await;
        let (client, mut manager) = connect(&backend).await;
        backend.fail_method("DELETE", 503);

        assert!(manager.delete(&client, 1).await.is_err());
        assert_eq!(manager.expenses().len(), 1);
        assert_eq!(manager.error(), Some(DELETE_ERROR_MESSAGE));
        assert_eq!(backend.expenses().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let backend = FakeBackend::with_expenses(vec![seed(1, "Lunch", 12.0)]).await;
        let (client, mut manager) = connect(&backend).await;
        backend.fail_method("GET", 500);

        assert!(manager.load_all(&client).await.is_err());
        assert_eq!(manager.expenses().len(), 1);
        assert_eq!(manager.error(), Some(FETCH_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_refetch_failure_after_save_still_resets_form() {
        let backend = FakeBackend::start().await;
        let (client, mut manager) = connect(&backend).await;
        backend.fail_method("GET", 500);

        fill_draft(&mut manager, "Coffee", "4.50");
        assert!(manager.save(&client).await.is_ok());

        assert!(manager.draft().is_empty());
        assert!(manager.expenses().is_empty());
        assert_eq!(manager.error(), Some(FETCH_ERROR_MESSAGE));

        // 次の取得が成功すれば作成済みのレコードが表示される
        backend.clear_failures();
        manager.load_all(&client).await.unwrap();
        assert_eq!(manager.expenses().len(), 1);
    }

    #[tokio::test]
    async fn test_error_stays_until_dismissed() {
        let backend = FakeBackend::start().await;
        let (client, mut manager) = connect(&backend).await;
        backend.fail_method("DELETE", 500);

        let _ = manager.delete(&client, 1).await;
        backend.clear_failures();
        manager.load_all(&client).await.unwrap();

        assert_eq!(manager.error(), Some(DELETE_ERROR_MESSAGE));
        manager.dismiss_error();
        assert!(manager.error().is_none());
    }

    #[tokio::test]
    async fn test_missing_base_url_surfaces_connectivity_error() {
        let client = ApiClient::new_with_config(ApiClientConfig::with_base_url("")).unwrap();
        let mut manager = ExpenseManager::new();

        let result = manager.load_all(&client).await;

        assert!(matches!(result, Err(AppError::Configuration(_))));
        assert_eq!(manager.error(), Some(FETCH_ERROR_MESSAGE));
        assert!(manager.expenses().is_empty());
    }
}
