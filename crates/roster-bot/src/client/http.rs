//! HTTP adapter for the chat-service bot gateway
//!
//! A thin JSON-over-HTTP wrapper: every method posts to
//! `<base>/bot<token>/<method>` and unwraps the standard response envelope.
//! All protocol knowledge stays inside this module; the rest of the system
//! only sees the `ChatClient` trait.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use roster_core::entities::Profile;
use roster_core::traits::{ChatClient, ClientError, ClientResult};
use roster_core::value_objects::{ChatId, MemberRights, UserId};

use super::wire::{ApiResponse, PermissionsPayload, ProfilePayload, UpdateEnvelope};

/// HTTP implementation of ChatClient
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpChatClient {
    /// Create a new HttpChatClient
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// Call one gateway method and unwrap the response envelope
    async fn call<T>(&self, method: &str, params: &impl Serialize) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.endpoint(method))
            .json(params)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let body: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !body.ok {
            return Err(ClientError::Api(
                body.description
                    .unwrap_or_else(|| "unknown gateway error".to_string()),
            ));
        }

        body.result
            .ok_or_else(|| ClientError::Api("missing result field".to_string()))
    }

    /// Long-poll the update feed starting at `offset`
    pub async fn poll_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> ClientResult<Vec<UpdateEnvelope>> {
        self.call(
            "getUpdates",
            &json!({ "offset": offset, "timeout": timeout_secs }),
        )
        .await
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn get_participants(&self, chat_id: ChatId) -> ClientResult<Vec<Profile>> {
        let payloads: Vec<ProfilePayload> = self
            .call("getParticipants", &json!({ "chat_id": chat_id }))
            .await?;
        Ok(payloads.into_iter().map(Profile::from).collect())
    }

    async fn get_permissions(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> ClientResult<MemberRights> {
        let payload: PermissionsPayload = self
            .call(
                "getPermissions",
                &json!({ "chat_id": chat_id, "user_id": user_id }),
            )
            .await?;
        Ok(payload.into())
    }

    async fn get_entity(&self, user_id: UserId) -> ClientResult<Profile> {
        let result: ClientResult<ProfilePayload> =
            self.call("getEntity", &json!({ "user_id": user_id })).await;
        match result {
            Ok(payload) => Ok(payload.into()),
            // The gateway answered but knows no such account
            Err(ClientError::Api(_)) => Err(ClientError::Unresolvable(user_id)),
            Err(e) => Err(e),
        }
    }

    async fn remove_participant(&self, chat_id: ChatId, user_id: UserId) -> ClientResult<()> {
        let _: bool = self
            .call(
                "removeParticipant",
                &json!({ "chat_id": chat_id, "user_id": user_id }),
            )
            .await?;
        Ok(())
    }

    async fn send_message(&self, recipient: UserId, text: &str) -> ClientResult<()> {
        let _: bool = self
            .call(
                "sendMessage",
                &json!({ "user_id": recipient, "text": text }),
            )
            .await?;
        Ok(())
    }

    async fn me(&self) -> ClientResult<Profile> {
        let payload: ProfilePayload = self.call("getMe", &json!({})).await?;
        Ok(payload.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = HttpChatClient::new("https://gateway.example/", "s3cret");
        assert_eq!(
            client.endpoint("getMe"),
            "https://gateway.example/bots3cret/getMe"
        );
    }
}
