//! Session-stashed flash messages: handlers push a message before
//! redirecting, and the next rendered page drains the queue into its
//! payload.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::AppError;

const FLASH_KEY: &str = "flash_messages";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

pub async fn push_message(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
) -> Result<(), AppError> {
    let mut messages: Vec<FlashMessage> = session.get(FLASH_KEY).await?.unwrap_or_default();
    messages.push(FlashMessage {
        level,
        message: message.into(),
    });
    session.insert(FLASH_KEY, messages).await?;
    Ok(())
}

/// Removes and returns the pending messages; a second call comes back
/// empty.
pub async fn take_messages(session: &Session) -> Result<Vec<FlashMessage>, AppError> {
    Ok(session
        .remove::<Vec<FlashMessage>>(FLASH_KEY)
        .await?
        .unwrap_or_default())
}
