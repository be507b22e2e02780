/// API Server経由での経費操作コマンド
///
/// 経費データはすべてAPIサーバーが保持する。ここでは4つのRESTエンドポイントを呼び出すだけで、
/// レスポンスの状態管理は`ExpenseManager`が行う。
use crate::features::expenses::models::*;
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use log::info;

/// 経費コレクションのエンドポイント
pub const EXPENSES_ENDPOINT: &str = "/api/expenses";

/// 個別経費のエンドポイント
pub fn expense_endpoint(id: ExpenseId) -> String {
    format!("{EXPENSES_ENDPOINT}/{id}")
}

/// 経費一覧を取得する
///
/// # 引数
/// * `api_client` - APIクライアント
///
/// # 戻り値
/// APIサーバーが返した経費一覧、またはエラー
pub async fn fetch_expenses(api_client: &ApiClient) -> AppResult<Vec<Expense>> {
    let expenses: Vec<Expense> = api_client.get(EXPENSES_ENDPOINT).await?;
    info!("経費一覧取得成功: count={}", expenses.len());
    Ok(expenses)
}

/// 経費を作成する
pub async fn create_expense(api_client: &ApiClient, dto: &ExpenseDto) -> AppResult<()> {
    api_client.post(EXPENSES_ENDPOINT, dto).await?;
    info!("経費作成成功: title={}", dto.title);
    Ok(())
}

/// 経費を更新する
///
/// # 引数
/// * `api_client` - APIクライアント
/// * `id` - 更新する経費のID
/// * `dto` - 更新後の内容（5項目すべてを置き換える）
pub async fn update_expense(api_client: &ApiClient, id: ExpenseId, dto: &ExpenseDto) -> AppResult<()> {
    info!("経費更新処理開始: expense_id={id}, dto={dto:?}");
    api_client.put(&expense_endpoint(id), dto).await?;
    info!("経費更新成功: expense_id={id}");
    Ok(())
}

/// 経費を削除する
pub async fn delete_expense(api_client: &ApiClient, id: ExpenseId) -> AppResult<()> {
    info!("経費削除処理開始: expense_id={id}");
    api_client.delete(&expense_endpoint(id)).await?;
    info!("経費削除成功: expense_id={id}");
    Ok(())
}
