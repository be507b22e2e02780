/// 経費機能モジュール
///
/// このモジュールは経費管理に関連するすべての機能を提供します：
/// - APIサーバー経由での経費の作成、読み取り、更新、削除（CRUD操作）
/// - 画面状態（フォーム・一覧・編集モード・エラー）の管理
/// - フォーム入力の制約
// サブモジュールの宣言
pub mod api_commands;
pub mod form;
pub mod manager;
pub mod models;

#[cfg(test)]
pub mod fake_backend;

#[cfg(test)]
mod manager_test;

// 公開インターフェース：外部から使用可能な型と関数をエクスポート

// モデル
pub use models::{Category, Expense, ExpenseDraft, ExpenseDto, ExpenseId, PaymentMethod};

// 画面状態
pub use manager::{ExpenseManager, Mode};

// APIコマンド
pub use api_commands::{create_expense, delete_expense, fetch_expenses, update_expense};
