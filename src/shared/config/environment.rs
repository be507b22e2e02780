use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 環境変数取得エラー
#[derive(Debug, Clone)]
pub struct EnvVarError {
    /// 変数名
    pub var_name: String,
    /// エラーメッセージ
    pub message: String,
}

impl std::fmt::Display for EnvVarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "環境変数 {} が見つかりません: {}",
            self.var_name, self.message
        )
    }
}

impl std::error::Error for EnvVarError {}

/// 環境変数を取得する（優先順位: 起動時 > コンパイル時 > エラー）
///
/// # 取得順序
/// 1. 起動時の環境変数（`std::env::var`）
/// 2. コンパイル時の環境変数（`option_env!`マクロ、build.rsで埋め込まれる）
/// 3. どちらも見つからない場合はエラー
#[macro_export]
macro_rules! get_env_var {
    ($var_name:expr) => {{
        // 1. 起動時の環境変数を確認
        if let Ok(value) = std::env::var($var_name) {
            log::debug!("環境変数 {} を起動時の環境変数から取得しました", $var_name);
            Ok(value)
        }
        // 2. コンパイル時の環境変数を確認
        else if let Some(value) = option_env!($var_name) {
            log::debug!("環境変数 {} をコンパイル時の環境変数から取得しました", $var_name);
            Ok(value.to_string())
        }
        // 3. どちらも見つからない場合はエラー
        else {
            Err($crate::shared::config::environment::EnvVarError {
                var_name: $var_name.to_string(),
                message: format!(
                    "起動時の環境変数 {} もコンパイル時の環境変数も見つかりませんでした",
                    $var_name
                ),
            })
        }
    }};
}

/// 環境変数を取得する（オプション版）
#[macro_export]
macro_rules! get_env_var_optional {
    ($var_name:expr) => {{
        $crate::get_env_var!($var_name).ok()
    }};
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: String,
    /// デバッグモードの有効/無効
    pub debug_mode: bool,
    /// ログレベル
    pub log_level: String,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        let environment = get_environment();
        let debug_mode = environment == Environment::Development;
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
            if debug_mode {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

        Self {
            environment: format!("{environment:?}").to_lowercase(),
            debug_mode,
            log_level,
        }
    }

    /// ログレベル文字列をフィルターに変換
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Info,
        }
    }
}

/// 現在の実行環境を判定する
///
/// # 判定ロジック
/// 1. 実行時環境変数 ENVIRONMENT を確認
/// 2. デバッグビルドの場合は Development
/// 3. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        let env = match env_var.as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
        log::debug!("環境判定: 実行時環境変数を使用 -> {env_var} -> {env:?}");
        return env;
    }

    // フォールバック: ビルド設定に基づく判定
    let env = if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    };
    log::debug!(
        "環境判定: ビルド設定を使用 -> debug_assertions={} -> {env:?}",
        cfg!(debug_assertions)
    );
    env
}

/// 環境変数を読み込む
///
/// デバッグビルドの場合のみ.envファイルを読み込む。
/// 本番環境では環境変数は実行時に設定されることを前提とする。
pub fn load_environment_variables() {
    let is_development = cfg!(debug_assertions);

    if is_development {
        match dotenv::dotenv() {
            Ok(path) => {
                eprintln!("環境ファイルを読み込みました: {}", path.display());
            }
            Err(e) => {
                eprintln!("環境ファイルの読み込みに失敗: {e}");
                eprintln!("環境変数が設定されていることを確認してください");
            }
        }
    }

    if std::env::var("ENVIRONMENT").is_err() {
        eprintln!("ENVIRONMENT環境変数が設定されていません（デフォルト値を使用）");
    }
}

/// ログファイルのパスを決定する
///
/// 明示的な指定（LOG_FILE）があればそれを使い、なければキャッシュディレクトリ配下、
/// キャッシュディレクトリが取得できなければ一時ディレクトリ配下を使う。
///
/// # 引数
/// * `explicit` - LOG_FILEの値（空白のみの場合は未指定扱い）
///
/// # 戻り値
/// ログファイルのパス
pub fn resolve_log_path(explicit: Option<String>) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.trim().is_empty()) {
        return PathBuf::from(path);
    }

    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("expense-tracker")
        .join("expense-tracker.log")
}

/// ログファイルを追記モードで開く（親ディレクトリがなければ作成する）
///
/// # 引数
/// * `path` - ログファイルのパス
///
/// # 戻り値
/// 追記モードのファイルハンドル、または作成に失敗した場合はI/Oエラー
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// ログシステムを初期化する
///
/// ターミナルはUIが占有するため、ログはファイルに出力する。
/// ファイルを開けない場合は標準エラー出力にフォールバックする。
///
/// # 戻り値
/// ログの出力先ファイルパス（標準エラー出力にフォールバックした場合はNone）
pub fn initialize_logging_system() -> Option<PathBuf> {
    let env_config = EnvironmentConfig::from_env();
    let log_path = resolve_log_path(std::env::var("LOG_FILE").ok());

    let mut builder = env_logger::Builder::from_default_env();
    builder
        .filter_level(env_config.level_filter())
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false);

    let target_path = match open_log_file(&log_path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            Some(log_path)
        }
        Err(e) => {
            eprintln!(
                "ログファイルを開けませんでした（標準エラー出力を使用します）: {}: {e}",
                log_path.display()
            );
            None
        }
    };

    if let Err(e) = builder.try_init() {
        eprintln!("ログシステムの初期化に失敗しました: {e}");
        return None;
    }

    log::info!(
        "ログシステムを初期化しました: level={}, environment={}",
        env_config.log_level,
        env_config.environment
    );

    target_path
}

/// API設定を管理する構造体
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// APIサーバーのベースURL（未設定の場合は空文字列）
    pub base_url: String,
    /// APIリクエストのタイムアウト（秒）。Noneの場合はHTTPクライアントのデフォルト
    pub timeout_seconds: Option<u64>,
}

impl ApiConfig {
    /// 環境変数からAPI設定を読み込む
    ///
    /// API_SERVER_URLが未設定でもパニックしない。
    /// その場合はすべてのリクエストが設定エラーとして失敗する。
    ///
    /// # 戻り値
    /// API設定（タイムアウトが未設定・不正・0の場合はNone）
    pub fn from_env() -> Self {
        log::debug!("ApiConfig::from_env() - 環境変数の読み込みを開始");

        let base_url = crate::get_env_var_optional!("API_SERVER_URL").unwrap_or_else(|| {
            log::error!(
                "API_SERVER_URLが設定されていません。.envファイルまたは環境変数を確認してください"
            );
            String::new()
        });

        let timeout_seconds =
            parse_timeout_seconds(crate::get_env_var_optional!("API_TIMEOUT_SECONDS"));

        log::info!("API設定: base_url={base_url}, timeout={timeout_seconds:?}");

        Self {
            base_url,
            timeout_seconds,
        }
    }

    /// 設定を検証する
    ///
    /// # 戻り値
    /// 有効な場合はOk、そうでなければ理由を表すメッセージ
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("APIサーバーのベースURLが設定されていません".to_string());
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| format!("APIサーバーのベースURLが不正です: {e}"))?;

        if self.timeout_seconds == Some(0) {
            return Err("APIタイムアウトは0より大きい値である必要があります".to_string());
        }

        Ok(())
    }

    /// APIサーバーがlocalhostかどうかを判定
    pub fn is_localhost(&self) -> bool {
        is_localhost_url(&self.base_url)
    }

    /// デバッグ情報を取得
    pub fn get_debug_info(&self) -> std::collections::HashMap<String, String> {
        let mut info = std::collections::HashMap::new();
        info.insert("base_url".to_string(), self.base_url.clone());
        info.insert(
            "timeout_seconds".to_string(),
            self.timeout_seconds
                .map(|t| t.to_string())
                .unwrap_or_else(|| "default".to_string()),
        );
        info.insert("is_localhost".to_string(), self.is_localhost().to_string());
        info
    }
}

/// API_TIMEOUT_SECONDSの値を解釈する
///
/// # 引数
/// * `raw` - 環境変数の値（未設定ならNone）
///
/// # 戻り値
/// タイムアウト秒数。未設定・解析失敗・0の場合はNone（HTTPクライアントのデフォルト）
pub fn parse_timeout_seconds(raw: Option<String>) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            log::warn!("API_TIMEOUT_SECONDSが0のため無視します（デフォルトのタイムアウトを使用）");
            None
        }
        Ok(seconds) => Some(seconds),
        Err(_) => {
            log::warn!("API_TIMEOUT_SECONDSのパースに失敗しました: {raw}");
            None
        }
    }
}

/// URLのホストがlocalhostかどうかを判定する
///
/// # 引数
/// * `base_url` - 判定するURL
///
/// # 戻り値
/// ホストが`localhost`または`127.0.0.1`の場合はtrue（解析できないURLはfalse）
pub fn is_localhost_url(base_url: &str) -> bool {
    url::Url::parse(base_url.trim())
        .ok()
        .and_then(|url| url.host_str().map(|host| matches!(host, "localhost" | "127.0.0.1")))
        .unwrap_or(false)
}
