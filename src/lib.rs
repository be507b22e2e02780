// 機能モジュール構造
pub mod features;
pub mod shared;
pub mod tui;

use log::{info, warn};
use shared::api_client::{ApiClient, ApiClientConfig};
use shared::config::environment::{
    initialize_logging_system, load_environment_variables, ApiConfig,
};
use shared::errors::{AppError, AppResult};
use tui::app::{Action, App};

/// アプリケーションを起動する
///
/// 設定を読み込み、初回の一覧取得を行ってから画面ループに入る。
/// API_SERVER_URLが未設定でも起動は続け、画面上に接続エラーを表示する。
pub fn run() -> AppResult<()> {
    // 環境に応じた.envファイルを読み込み（ログシステム初期化前に実行）
    load_environment_variables();

    match initialize_logging_system() {
        Some(path) => eprintln!("ログ出力先: {}", path.display()),
        None => eprintln!("ログは標準エラー出力に出力されます"),
    }

    info!("アプリケーション初期化を開始します...");

    let api_config = ApiConfig::from_env();
    if let Err(e) = api_config.validate() {
        warn!("API設定の検証に失敗しました: {e}");
    }
    for (key, value) in api_config.get_debug_info() {
        info!("API設定 {key}: {value}");
    }

    let api_client = ApiClient::new_with_config(ApiClientConfig::from(api_config))?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::configuration(format!("非同期ランタイムを作成できません: {e}")))?;

    let mut app = App::new();
    rt.block_on(app.perform(Action::Reload, &api_client));

    info!("アプリケーション初期化完了");
    tui::run_tui(&mut app, &api_client, &rt)
}
