/// 汎用APIクライアント
///
/// APIサーバーとの通信を行う汎用的なクライアント。
/// リクエストは1回だけ試行し、リトライやバックオフは行わない。
/// 2xx以外のレスポンスはステータスに関係なく一律に失敗として扱い、エラーボディは解析しない。
use crate::shared::config::environment::{is_localhost_url, ApiConfig};
use crate::shared::errors::{AppError, AppResult};
use log::{error, info, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// APIクライアント設定
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

impl ApiClientConfig {
    /// ベースURLのみを指定して設定を作成
    ///
    /// # 引数
    /// * `base_url` - APIサーバーのベースURL
    ///
    /// # 戻り値
    /// タイムアウト未指定（HTTPクライアントのデフォルト）の設定
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: None,
        }
    }

    /// APIサーバーがlocalhostかどうかを判定
    pub fn is_localhost(&self) -> bool {
        is_localhost_url(&self.base_url)
    }
}

impl From<ApiConfig> for ApiClientConfig {
    fn from(config: ApiConfig) -> Self {
        Self {
            base_url: config.base_url,
            timeout_seconds: config.timeout_seconds,
        }
    }
}

/// 汎用APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    /// 設定を指定してAPIクライアントを作成
    ///
    /// # 引数
    /// * `config` - APIクライアント設定
    ///
    /// # 戻り値
    /// APIクライアント、またはHTTPクライアントの初期化に失敗した場合は設定エラー
    pub fn new_with_config(config: ApiClientConfig) -> AppResult<Self> {
        let mut builder = Client::builder();

        // 0秒は全リクエストが即タイムアウトになるため未指定として扱う
        if let Some(timeout) = config.timeout_seconds.filter(|t| *t > 0) {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        // localhost向けの通信はシステムプロキシを経由しない
        if config.is_localhost() {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// エンドポイントから完全なURLを組み立てる
    ///
    /// # 引数
    /// * `endpoint` - `/`で始まるエンドポイントパス
    ///
    /// # 戻り値
    /// 完全なURL、またはベースURLが未設定の場合は設定エラー
    pub fn endpoint_url(&self, endpoint: &str) -> AppResult<String> {
        let base = self.config.base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(AppError::configuration(
                "APIサーバーのベースURLが設定されていません",
            ));
        }

        Ok(format!("{base}{endpoint}"))
    }

    /// GETリクエストを送信し、レスポンスボディをJSONとして解析する
    ///
    /// # 引数
    /// * `endpoint` - エンドポイントパス
    ///
    /// # 戻り値
    /// 解析済みのレスポンス、または通信・ステータス・解析のいずれかのエラー
    pub async fn get<T>(&self, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");

        let url = self.endpoint_url(endpoint)?;
        let response = self.send_request(self.client.get(&url), "GET", endpoint).await?;

        let body = response.bytes().await.map_err(|e| {
            error!("レスポンス読み取りエラー: endpoint={endpoint}, error={e}");
            AppError::Decode(e.to_string())
        })?;

        serde_json::from_slice::<T>(&body).map_err(|e| {
            error!("レスポンス解析エラー: endpoint={endpoint}, error={e}");
            AppError::from(e)
        })
    }

    /// POSTリクエストを送信
    ///
    /// # 引数
    /// * `endpoint` - エンドポイントパス
    /// * `body` - JSONとして送信するリクエストボディ
    ///
    /// # 戻り値
    /// 2xxの場合はOk（成功時のレスポンスボディは使用しない）
    pub async fn post<B>(&self, endpoint: &str, body: &B) -> AppResult<()>
    where
        B: Serialize,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");

        let url = self.endpoint_url(endpoint)?;
        self.send_request(self.client.post(&url).json(body), "POST", endpoint)
            .await?;
        Ok(())
    }

    /// PUTリクエストを送信
    ///
    /// # 引数
    /// * `endpoint` - エンドポイントパス
    /// * `body` - JSONとして送信するリクエストボディ
    ///
    /// # 戻り値
    /// 2xxの場合はOk（成功時のレスポンスボディは使用しない）
    pub async fn put<B>(&self, endpoint: &str, body: &B) -> AppResult<()>
    where
        B: Serialize,
    {
        info!("PUTリクエスト送信: endpoint={endpoint}");

        let url = self.endpoint_url(endpoint)?;
        self.send_request(self.client.put(&url).json(body), "PUT", endpoint)
            .await?;
        Ok(())
    }

    /// DELETEリクエストを送信
    pub async fn delete(&self, endpoint: &str) -> AppResult<()> {
        let url = self.endpoint_url(endpoint)?;
        info!("DELETEリクエスト送信: endpoint={endpoint}, url={url}");

        self.send_request(self.client.delete(&url), "DELETE", endpoint)
            .await?;
        Ok(())
    }

    /// リクエストを1回だけ送信し、ステータスを検査する
    async fn send_request(
        &self,
        request: RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            error!("APIサーバーへの接続に失敗しました: method={method}, endpoint={endpoint}, error={e}");
            AppError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            info!("{method}リクエスト成功: endpoint={endpoint}, status={status}");
            Ok(response)
        } else {
            warn!("APIサーバーがエラーを返しました: method={method}, endpoint={endpoint}, status={status}");
            Err(AppError::Status(status.as_u16()))
        }
    }
}
