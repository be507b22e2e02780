/// 経費管理画面の状態と操作
///
/// 画面の状態（入力中のフォーム、取得済みの一覧、編集モード、エラーメッセージ）を1つの構造体で保持し、
/// 各操作はこの構造体を通してのみ状態を更新する。
/// 一覧はローカルで書き換えず、作成・更新・削除が成功するたびにAPIサーバーから再取得する。
use crate::features::expenses::api_commands::{
    create_expense, delete_expense, fetch_expenses, update_expense,
};
use crate::features::expenses::models::{Expense, ExpenseDraft, ExpenseId};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::{AppError, AppResult};
use log::{info, log, warn};

pub const FETCH_ERROR_MESSAGE: &str = "Unable to connect to backend. Check API or network.";
pub const SAVE_ERROR_MESSAGE: &str = "Failed to save expense. Please check your API connection.";
pub const DELETE_ERROR_MESSAGE: &str = "Failed to delete expense.";

/// フォームのモード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// 新規作成
    #[default]
    Creating,
    /// 既存の経費を編集中
    Editing(ExpenseId),
}

impl Mode {
    pub fn edit_id(&self) -> Option<ExpenseId> {
        match self {
            Mode::Creating => None,
            Mode::Editing(id) => Some(*id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Mode::Editing(_))
    }
}

/// 経費管理画面の状態
#[derive(Debug, Default)]
pub struct ExpenseManager {
    draft: ExpenseDraft,
    expenses: Vec<Expense>,
    mode: Mode,
    error: Option<String>,
}

impl ExpenseManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ExpenseDraft {
        &self.draft
    }

    /// 入力層からのキー入力でフォームを更新するための可変参照
    pub fn draft_mut(&mut self) -> &mut ExpenseDraft {
        &mut self.draft
    }

    /// 最後に取得に成功した経費一覧
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// 画面に表示するエラーメッセージ
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// 経費一覧を取得して置き換える
    ///
    /// 失敗した場合は以前の一覧を残し、接続エラーのメッセージを設定する
    pub async fn load_all(&mut self, api_client: &ApiClient) -> AppResult<()> {
        match fetch_expenses(api_client).await {
            Ok(expenses) => {
                self.expenses = expenses;
                Ok(())
            }
            Err(e) => {
                log_failure("経費一覧の取得に失敗しました", &e);
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    /// フォームの内容を保存する
    ///
    /// 編集中ならPUT、そうでなければPOSTを送信する。
    /// 成功した場合はフォームと編集モードをリセットして一覧を再取得する。
    /// 失敗した場合はフォームと編集モードをそのまま残す。
    pub async fn save(&mut self, api_client: &ApiClient) -> AppResult<()> {
        let dto = self.draft.to_dto();

        let result = match self.mode.edit_id() {
            Some(id) => update_expense(api_client, id, &dto).await,
            None => create_expense(api_client, &dto).await,
        };

        if let Err(e) = result {
            log_failure(&format!("経費の保存に失敗しました: mode={:?}", self.mode), &e);
            self.error = Some(SAVE_ERROR_MESSAGE.to_string());
            return Err(e);
        }

        self.draft = ExpenseDraft::default();
        self.mode = Mode::Creating;

        // 保存自体は成功しているので、再取得の失敗はメッセージ表示のみ
        if self.load_all(api_client).await.is_err() {
            warn!("保存後の経費一覧の再取得に失敗しました");
        }
        Ok(())
    }

    /// 経費を削除し、成功した場合は一覧を再取得する
    pub async fn delete(&mut self, api_client: &ApiClient, id: ExpenseId) -> AppResult<()> {
        if let Err(e) = delete_expense(api_client, id).await {
            log_failure(&format!("経費の削除に失敗しました: expense_id={id}"), &e);
            self.error = Some(DELETE_ERROR_MESSAGE.to_string());
            return Err(e);
        }

        if self.load_all(api_client).await.is_err() {
            warn!("削除後の経費一覧の再取得に失敗しました");
        }
        Ok(())
    }

    /// 経費の編集を開始する（通信なし）
    pub fn begin_edit(&mut self, expense: &Expense) {
        info!("経費の編集を開始: expense_id={}", expense.id);
        self.draft = ExpenseDraft::from_expense(expense);
        self.mode = Mode::Editing(expense.id);
    }

    /// 編集を取り消してフォームを空に戻す（通信なし）
    pub fn cancel_edit(&mut self) {
        info!("経費の編集を取り消し: mode={:?}", self.mode);
        self.draft = ExpenseDraft::default();
        self.mode = Mode::Creating;
    }
}

/// 失敗をエラーの重要度に応じたレベルで記録する
fn log_failure(context: &str, error: &AppError) {
    log!(error.log_level(), "{context}: {}", error.details());
}
