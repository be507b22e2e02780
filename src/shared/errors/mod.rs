use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// APIサーバーへの接続に失敗した場合のエラー
    #[error("接続エラー: {0}")]
    Connection(String),

    /// APIサーバーが2xx以外のステータスを返した場合のエラー
    #[error("APIサーバーエラー: status={0}")]
    Status(u16),

    /// レスポンスボディの読み取りに失敗した場合のエラー
    #[error("レスポンス読み取りエラー: {0}")]
    Decode(String),

    /// レスポンスボディのJSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// ターミナル操作のエラー
    #[error("ターミナルエラー: {0}")]
    Terminal(String),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 低重要度
    Low,
    /// 中重要度（APIサーバーの一時的なエラーなど）
    Medium,
    /// 高重要度（設定ミスなど）
    High,
}

impl AppError {
    /// エラーの詳細情報を取得
    ///
    /// # 戻り値
    /// 重要度を含むエラーの詳細情報（ログ出力用）
    pub fn details(&self) -> String {
        format!("[{:?}] {self}", self.severity())
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Connection(_) => ErrorSeverity::Medium,
            AppError::Status(code) if *code >= 500 => ErrorSeverity::Medium,
            AppError::Status(_) => ErrorSeverity::Low,
            AppError::Decode(_) => ErrorSeverity::Medium,
            AppError::Json(_) => ErrorSeverity::Medium,
            AppError::Io(_) => ErrorSeverity::Medium,
            AppError::Terminal(_) => ErrorSeverity::High,
        }
    }

    /// 重要度に応じたログレベルを取得
    ///
    /// # 戻り値
    /// 高・中重要度はError、低重要度（4xxなど）はWarn
    pub fn log_level(&self) -> log::Level {
        match self.severity() {
            ErrorSeverity::High | ErrorSeverity::Medium => log::Level::Error,
            ErrorSeverity::Low => log::Level::Warn,
        }
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// 接続エラーを作成するヘルパー関数
    pub fn connection<S: Into<String>>(message: S) -> Self {
        AppError::Connection(message.into())
    }

    /// ターミナルエラーを作成するヘルパー関数
    pub fn terminal<S: Into<String>>(message: S) -> Self {
        AppError::Terminal(message.into())
    }
}

/// reqwest::ErrorからAppErrorへの変換
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            AppError::Status(status.as_u16())
        } else if error.is_decode() {
            AppError::Decode(error.to_string())
        } else if error.is_builder() {
            AppError::Configuration(error.to_string())
        } else {
            AppError::connection(error.to_string())
        }
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;
