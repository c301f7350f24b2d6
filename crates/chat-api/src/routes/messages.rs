//! Message handlers.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use chat_store::MessageEntry;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ResponseCode, Result};
use crate::state::AppState;

// Absent, null and empty fields all reach the service as empty strings, so
// they are reported as missing parameters rather than a bad body.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub user_id: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMessageRequest {
    pub user_id: Option<String>,
    pub message_id: Option<String>,
    pub new_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessageRequest {
    pub user_id: Option<String>,
    pub message_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub code: ResponseCode,
    pub message: String,
    pub bot_response_id: String,
    pub user_message_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMessageResponse {
    pub code: ResponseCode,
    pub message: String,
    pub bot_response_id: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteMessageResponse {
    pub code: ResponseCode,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ListMessagesResponse {
    pub code: ResponseCode,
    pub messages: Vec<MessageEntry>,
}

/// Decode a JSON body. A missing or blank body decodes as an empty request.
fn body<T: DeserializeOwned + Default>(bytes: &Bytes) -> Result<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes).map_err(|err| ApiError::BadRequest(err.to_string()))
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// `POST /api/v1/sendMessage`
pub async fn send_message(
    State(state): State<AppState>,
    payload: Bytes,
) -> Result<Json<SendMessageResponse>> {
    let request: SendMessageRequest = body(&payload)?;
    let outcome = state
        .messages
        .send(field(&request.user_id), field(&request.text))
        .await?;

    Ok(Json(SendMessageResponse {
        code: ResponseCode::Success,
        message: outcome.reply_text,
        bot_response_id: outcome.bot_reply_id,
        user_message_id: outcome.user_message_id,
    }))
}

/// `POST /api/v1/editMessage`
pub async fn edit_message(
    State(state): State<AppState>,
    payload: Bytes,
) -> Result<Json<EditMessageResponse>> {
    let request: EditMessageRequest = body(&payload)?;
    let outcome = state
        .messages
        .edit(
            field(&request.user_id),
            field(&request.message_id),
            field(&request.new_text),
        )
        .await?;

    Ok(Json(EditMessageResponse {
        code: ResponseCode::Success,
        message: outcome.reply_text,
        bot_response_id: outcome.bot_reply_id,
    }))
}

/// `DELETE /api/v1/deleteMessage`
pub async fn delete_message(
    State(state): State<AppState>,
    payload: Bytes,
) -> Result<Json<DeleteMessageResponse>> {
    let request: DeleteMessageRequest = body(&payload)?;
    state
        .messages
        .delete(field(&request.user_id), field(&request.message_id))
        .await?;

    Ok(Json(DeleteMessageResponse {
        code: ResponseCode::Success,
        message: "Message deleted",
    }))
}

/// `GET /api/v1/messages/:user_id`
pub async fn list_messages(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ListMessagesResponse>> {
    let messages = state.messages.history(&user_id).await?;

    Ok(Json(ListMessagesResponse {
        code: ResponseCode::Success,
        messages,
    }))
}
