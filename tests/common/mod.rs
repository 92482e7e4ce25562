#![allow(dead_code)]

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use budget_squad::config::EngineSettings;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// How the fake engine answers `/api/chat`
#[derive(Clone)]
pub enum ChatBehaviour {
    /// Reply with each text in turn, repeating the last one
    Replies(Vec<String>),
    /// Fail every call with this status
    Status(u16),
    /// 200 with a body that is not a chat response
    Malformed,
}

struct FakeState {
    behaviour: ChatBehaviour,
    requests: Mutex<Vec<Value>>,
}

/// Minimal Ollama stand-in bound to a random local port
pub struct FakeOllama {
    pub addr: SocketAddr,
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeOllama {
    pub async fn start(behaviour: ChatBehaviour) -> Self {
        let state = Arc::new(FakeState {
            behaviour,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/chat", post(chat))
            .route("/api/tags", get(tags))
            .with_state(state.clone());

        // Start server on random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeOllama {
            addr,
            base_url,
            state,
        }
    }

    pub async fn replying(text: &str) -> Self {
        Self::start(ChatBehaviour::Replies(vec![text.to_string()])).await
    }

    /// Engine settings pointing at this server
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            base_url: format!("{}/", self.base_url),
            model: "llama3.1".to_string(),
            timeout_secs: 5,
        }
    }

    /// Bodies received on `/api/chat`, oldest first
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn chat(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    let served = {
        let mut requests = state.requests.lock().unwrap();
        requests.push(body.clone());
        requests.len()
    };

    match &state.behaviour {
        ChatBehaviour::Replies(replies) => {
            let index = (served - 1).min(replies.len().saturating_sub(1));
            let text = replies.get(index).cloned().unwrap_or_default();
            Json(json!({
                "model": body["model"],
                "message": { "role": "assistant", "content": text },
                "done": true
            }))
            .into_response()
        }
        ChatBehaviour::Status(code) => (
            StatusCode::from_u16(*code).unwrap(),
            "model runner crashed",
        )
            .into_response(),
        ChatBehaviour::Malformed => (StatusCode::OK, "{\"unexpected\": true}").into_response(),
    }
}

async fn tags() -> Json<Value> {
    Json(json!({
        "models": [
            { "name": "llama3.1:latest" },
            { "name": "mistral:latest" }
        ]
    }))
}

/// Settings that point at nothing listening
pub fn unreachable_engine() -> EngineSettings {
    EngineSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        model: "llama3.1".to_string(),
        timeout_secs: 2,
    }
}
