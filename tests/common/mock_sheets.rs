//! Mock Google Sheets server for testing the REST client.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, Response, StatusCode};
use axum::routing::any;
use axum::Router;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    /// Percent-decoded path.
    pub path: String,
    pub query: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }

    /// A field of an `application/x-www-form-urlencoded` body.
    pub fn form_field(&self, name: &str) -> Option<String> {
        String::from_utf8_lossy(&self.body)
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| percent_decode(&value.replace('+', " ")))
    }
}

/// A mock response to return.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::json("{}")
    }
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    /// Error in Google's `{"error": {...}}` envelope.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({
                "error": { "code": status, "message": message, "status": "FAILED_PRECONDITION" }
            })
            .to_string(),
        }
    }

    /// Spreadsheet metadata listing `(sheetId, title, index)` worksheets.
    pub fn metadata(sheets: &[(i64, &str, i64)]) -> Self {
        let sheets: Vec<_> = sheets
            .iter()
            .map(|(id, title, index)| {
                serde_json::json!({ "properties": { "sheetId": id, "title": title, "index": index } })
            })
            .collect();
        Self::json(&serde_json::json!({ "sheets": sheets }).to_string())
    }

    /// OAuth token endpoint success.
    pub fn token(access_token: &str, expires_in: u64) -> Self {
        Self::json(
            &serde_json::json!({
                "access_token": access_token,
                "expires_in": expires_in,
                "token_type": "Bearer",
            })
            .to_string(),
        )
    }

    /// OAuth token endpoint error, e.g. `invalid_grant`.
    pub fn token_error(status: u16, error: &str, description: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": error, "error_description": description })
                .to_string(),
        }
    }

    /// A `ValueRange` with the given rows.
    pub fn values(range: &str, rows: &[&[&str]]) -> Self {
        Self::json(
            &serde_json::json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": rows,
            })
            .to_string(),
        )
    }
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
}

/// Mock Sheets server on its own runtime, usable from blocking tests.
pub struct MockSheets {
    pub addr: SocketAddr,
    state: MockState,
    _runtime: Runtime,
}

impl MockSheets {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_io()
            .build()
            .expect("Failed to build runtime");

        let state = MockState {
            requests: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(VecDeque::new())),
        };

        let app = Router::new()
            .route("/{*path}", any(handle_request))
            .with_state(state.clone());

        let listener = runtime
            .block_on(TcpListener::bind("127.0.0.1:0"))
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        runtime.spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            addr,
            state,
            _runtime: runtime,
        }
    }

    /// Enqueue a response to be returned for the next request.
    pub fn enqueue(&self, resp: MockResponse) {
        self.state.responses.lock().push_back(resp);
    }

    pub fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

async fn handle_request(State(state): State<MockState>, req: Request<Body>) -> Response<Body> {
    let method = req.method().to_string();
    let path = percent_decode(req.uri().path());
    let query = req.uri().query().unwrap_or("").to_string();
    let headers: Vec<(String, String)> = req
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();

    let body = axum::body::to_bytes(req.into_body(), 1024 * 1024)
        .await
        .unwrap_or_default()
        .to_vec();

    state.requests.lock().push(CapturedRequest {
        method,
        path,
        query,
        headers,
        body,
    });

    let mock_resp = state.responses.lock().pop_front().unwrap_or_default();

    Response::builder()
        .status(StatusCode::from_u16(mock_resp.status).unwrap())
        .header("content-type", "application/json")
        .body(Body::from(mock_resp.body))
        .unwrap()
}

fn percent_decode(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Ok(byte) = u8::from_str_radix(&path[i + 1..i + 3], 16) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
