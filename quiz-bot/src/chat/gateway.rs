use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use quiz_types::{PlayerId, RoomId};

use super::api::{ChatApi, ChatError, MemberRole, Update};

/// Seconds the server may hold a poll open before answering with an empty batch.
const LONG_POLL_SECONDS: u64 = 25;
/// Client-side ceiling; must stay above the long-poll window.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(35);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMember {
    status: MemberRole,
}

/// HTTP gateway speaking the Bot API dialect: every call is a POST to
/// `{base}/bot{token}/{method}` answered by `{"ok": true, "result": ...}`.
pub struct ChatGateway {
    client: Client,
    base_url: String,
    token: String,
    offset: AtomicI64,
}

impl ChatGateway {
    pub fn new(base_url: &str, token: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            offset: AtomicI64::new(0),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call<T>(&self, method: &str, body: serde_json::Value) -> Result<T, ChatError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            // Rejections still carry a JSON body with a description.
            let status = response.status();
            let decoded: Result<ApiResponse<T>, _> = response.json().await;
            let description = decoded
                .ok()
                .and_then(|r| r.description)
                .unwrap_or_else(|| status.to_string());
            return Err(ChatError::Api(description));
        }

        let decoded: ApiResponse<T> = response.json().await.map_err(|_| ChatError::Malformed)?;
        if !decoded.ok {
            return Err(ChatError::Api(
                decoded
                    .description
                    .unwrap_or_else(|| "request not ok".to_string()),
            ));
        }
        decoded.result.ok_or(ChatError::Malformed)
    }

    /// Long-polls for the next batch of updates and advances the cursor past
    /// everything returned, so a batch is delivered at most once.
    pub async fn poll_updates(&self) -> Result<Vec<Update>, ChatError> {
        let body = json!({
            "offset": self.offset.load(Ordering::SeqCst),
            "timeout": LONG_POLL_SECONDS,
            "allowed_updates": ["message"],
        });
        let updates: Vec<Update> = self.call("getUpdates", body).await?;
        if let Some(last) = updates.last() {
            self.offset.store(last.update_id + 1, Ordering::SeqCst);
        }
        Ok(updates)
    }
}

#[async_trait]
impl ChatApi for ChatGateway {
    async fn send_message(&self, room: RoomId, text: &str) -> Result<(), ChatError> {
        let body = json!({ "chat_id": room, "text": text });
        // sendMessage echoes the sent message back; it is not needed here.
        let _: serde_json::Value = self.call("sendMessage", body).await?;
        Ok(())
    }

    async fn member_role(&self, room: RoomId, player: PlayerId) -> Result<MemberRole, ChatError> {
        let body = json!({ "chat_id": room, "user_id": player });
        let member: ChatMember = self.call("getChatMember", body).await?;
        Ok(member.status)
    }
}
