//! テスト用の偽APIサーバー
//!
//! 経費APIと同じエンドポイントをメモリ上のデータで提供し、
//! 受信したリクエストを記録する。メソッド単位で2xx以外のレスポンスを強制できる。

use crate::features::expenses::models::{Expense, ExpenseDto, ExpenseId};
use crate::shared::api_client::ApiClientConfig;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const COLLECTION_PATH: &str = "/api/expenses";

/// 記録されたリクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug)]
struct FakeState {
    expenses: Vec<Expense>,
    next_id: ExpenseId,
    requests: Vec<RecordedRequest>,
    failures: HashMap<String, u16>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            expenses: Vec::new(),
            next_id: 1,
            requests: Vec::new(),
            failures: HashMap::new(),
        }
    }
}

/// 偽APIサーバー
pub struct FakeBackend {
    addr: SocketAddr,
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    /// 空のデータでサーバーを開始する
    pub async fn start() -> Self {
        Self::with_expenses(Vec::new()).await
    }

    /// 初期データを指定してサーバーを開始する
    pub async fn with_expenses(expenses: Vec<Expense>) -> Self {
        let next_id = expenses.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let state = Arc::new(Mutex::new(FakeState {
            expenses,
            next_id,
            ..FakeState::default()
        }));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("偽APIサーバーのバインドに失敗");
        let addr = listener.local_addr().expect("ローカルアドレスの取得に失敗");

        let server_state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let state = Arc::clone(&server_state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);
                    let service = service_fn(move |req| handle_request(req, Arc::clone(&state)));
                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        log::debug!("偽APIサーバーの接続処理エラー: {err}");
                    }
                });
            }
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client_config(&self) -> ApiClientConfig {
        ApiClientConfig::with_base_url(self.base_url())
    }

    /// 指定メソッドのリクエストに常に指定ステータスを返す
    pub fn fail_method(&self, method: &str, status: u16) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(method.to_string(), status);
    }

    pub fn clear_failures(&self) {
        self.state.lock().unwrap().failures.clear();
    }

    /// サーバー側に保存されている経費
    pub fn expenses(&self) -> Vec<Expense> {
        self.state.lock().unwrap().expenses.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }
}

fn respond(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

fn expense_from_dto(id: ExpenseId, dto: ExpenseDto) -> Expense {
    Expense {
        id,
        title: dto.title,
        category: dto.category,
        amount: Some(dto.amount),
        date: dto.date,
        payment_method: dto.payment_method,
    }
}

async fn handle_request(
    req: Request<Incoming>,
    state: Arc<Mutex<FakeState>>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => Bytes::new(),
    };

    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        body: serde_json::from_slice(&body).ok(),
    });

    if let Some(status) = state.failures.get(method.as_str()).copied() {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return Ok(respond(status, r#"{"error":"forced failure"}"#.to_string()));
    }

    let item_id = path
        .strip_prefix(COLLECTION_PATH)
        .and_then(|rest| rest.strip_prefix('/'))
        .map(|id| id.parse::<ExpenseId>());

    let response = match (&method, path.as_str(), item_id) {
        (&Method::GET, COLLECTION_PATH, None) => {
            respond(StatusCode::OK, serde_json::to_string(&state.expenses).unwrap())
        }
        (&Method::POST, COLLECTION_PATH, None) => match serde_json::from_slice::<ExpenseDto>(&body) {
            Ok(dto) => {
                let id = state.next_id;
                state.next_id += 1;
                let created = expense_from_dto(id, dto);
                state.expenses.push(created.clone());
                respond(StatusCode::OK, serde_json::to_string(&created).unwrap())
            }
            Err(_) => respond(StatusCode::BAD_REQUEST, String::new()),
        },
        (&Method::PUT, _, Some(Ok(id))) => match serde_json::from_slice::<ExpenseDto>(&body) {
            Ok(dto) => match state.expenses.iter_mut().find(|e| e.id == id) {
                Some(existing) => {
                    *existing = expense_from_dto(id, dto);
                    respond(StatusCode::OK, serde_json::to_string(existing).unwrap())
                }
                None => respond(StatusCode::NOT_FOUND, String::new()),
            },
            Err(_) => respond(StatusCode::BAD_REQUEST, String::new()),
        },
        (&Method::DELETE, _, Some(Ok(id))) => {
            let before = state.expenses.len();
            state.expenses.retain(|e| e.id != id);
            if state.expenses.len() < before {
                respond(StatusCode::OK, String::new())
            } else {
                respond(StatusCode::NOT_FOUND, String::new())
            }
        }
        _ => respond(StatusCode::NOT_FOUND, String::new()),
    };

    Ok(response)
}
