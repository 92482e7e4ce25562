//! In-process engine for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatEngine, LlmError, LlmResult, Message};

/// Engine that replays queued replies and remembers what it was sent.
/// Once the queue is drained every call returns `fallback`.
pub struct ScriptedEngine {
    replies: Mutex<VecDeque<LlmResult<String>>>,
    fallback: String,
    reachable: bool,
    sent: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedEngine {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: fallback.into(),
            reachable: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Engine whose every call fails with a connection error
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new("")
        }
    }

    pub fn with_reply(self, reply: LlmResult<String>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatEngine for ScriptedEngine {
    fn model(&self) -> &str {
        "scripted-model"
    }

    fn endpoint(&self) -> &str {
        "memory://scripted"
    }

    async fn chat(&self, messages: &[Message]) -> LlmResult<String> {
        self.sent.lock().unwrap().push(messages.to_vec());
        if !self.reachable {
            return Err(LlmError::Network("Connection error: refused".to_string()));
        }
        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => reply,
            None => Ok(self.fallback.clone()),
        }
    }

    async fn list_models(&self) -> LlmResult<Vec<String>> {
        if self.reachable {
            Ok(vec![self.model().to_string()])
        } else {
            Err(LlmError::Network("Connection error: refused".to_string()))
        }
    }
}
