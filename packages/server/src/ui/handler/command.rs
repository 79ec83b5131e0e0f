//! Command dispatch: one validated [`Request`] in, one [`Response`] out.
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - dispatch() の各コマンドの応答（success / message / data）
//! - 検証エラー（空コマンド、未知コマンド、データ欠落）が失敗応答になること
//! - MESSAGE 成功時に送信者以外へ通知フレームが積まれること
//! - QUIT のみが Close を返すこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：全コマンド
//! - 異常系：検証エラー
//! - エッジケース：履歴が空の LIST_MESSAGES、未登録ユーザーの LIST_USERS

use irori_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::{ConnectionId, DisplayName, HistoryEntry, MessageContent},
    infrastructure::{
        codec::encode_response,
        dto::{Command, Request, Response},
    },
    ui::state::AppState,
};

pub const WELCOME_MESSAGE: &str = "Welcome to Irori chat server!";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid message format";
pub const NO_MESSAGES_YET: &str = "No messages yet";

/// What the connection worker does after sending the response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Continue,
    /// Send the response, then close the connection
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub response: Response,
    pub disposition: Disposition,
}

impl DispatchOutcome {
    pub fn reply(response: Response) -> Self {
        Self {
            response,
            disposition: Disposition::Continue,
        }
    }

    pub fn close(response: Response) -> Self {
        Self {
            response,
            disposition: Disposition::Close,
        }
    }
}

/// Validate and execute one request on behalf of `connection_id`.
///
/// Validation failures become `success=false` responses; the connection is
/// never closed for a semantic error.
pub async fn dispatch(
    state: &AppState,
    connection_id: &ConnectionId,
    request: Request,
) -> DispatchOutcome {
    if let Err(e) = request.validate() {
        tracing::warn!("Rejected request from '{}': {}", connection_id, e);
        return DispatchOutcome::reply(Response::failure(e.to_string()));
    }

    tracing::debug!(
        "Dispatching {} from '{}' (data length: {})",
        request.command,
        connection_id,
        request.data.len()
    );

    let Request { command, data, .. } = request;
    match command {
        Command::Echo => DispatchOutcome::reply(Response::success_with_data("Echo response", data)),
        Command::Register => register(state, connection_id, data).await,
        Command::Message => send_message(state, connection_id, data).await,
        Command::ListUsers => {
            let names = state.list_users_usecase.execute().await;
            let joined = names
                .iter()
                .map(DisplayName::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            DispatchOutcome::reply(Response::success_with_data("Online users", joined))
        }
        Command::ListMessages => {
            let data = match state.list_messages_usecase.execute().await {
                Some(entries) => entries
                    .iter()
                    .map(HistoryEntry::format_line)
                    .collect::<Vec<_>>()
                    .join("\n"),
                None => NO_MESSAGES_YET.to_string(),
            };
            DispatchOutcome::reply(Response::success_with_data("Recent messages", data))
        }
        Command::Time => {
            let now = timestamp_to_rfc3339(state.clock.now_millis());
            DispatchOutcome::reply(Response::success_with_data("Server time", now))
        }
        Command::Quit => DispatchOutcome::close(Response::success("Goodbye!")),
        // Rejected by validation above
        Command::Other(_) => DispatchOutcome::reply(Response::failure("Unknown command")),
    }
}

async fn register(state: &AppState, connection_id: &ConnectionId, data: String) -> DispatchOutcome {
    let name = match DisplayName::new(data) {
        Ok(name) => name,
        Err(e) => return DispatchOutcome::reply(Response::failure(e.to_string())),
    };

    match state
        .register_name_usecase
        .execute(connection_id, name)
        .await
    {
        Ok(session) => {
            tracing::info!("Client '{}' registered as '{}'", connection_id, session.name);
            DispatchOutcome::reply(Response::success(format!(
                "Registration successful. Welcome, {}!",
                session.name
            )))
        }
        Err(e) => {
            tracing::error!("Failed to register '{}': {}", connection_id, e);
            DispatchOutcome::reply(Response::failure(e.to_string()))
        }
    }
}

async fn send_message(
    state: &AppState,
    connection_id: &ConnectionId,
    data: String,
) -> DispatchOutcome {
    let content = match MessageContent::new(data) {
        Ok(content) => content,
        Err(e) => return DispatchOutcome::reply(Response::failure(e.to_string())),
    };

    let sent = match state
        .send_message_usecase
        .execute(connection_id, content)
        .await
    {
        Ok(sent) => sent,
        Err(e) => {
            tracing::error!("Failed to store message from '{}': {}", connection_id, e);
            return DispatchOutcome::reply(Response::failure(e.to_string()));
        }
    };

    // Domain Model から DTO への変換
    let notification = Response::success_with_data(
        sent.entry.format_line(),
        sent.entry.sender.as_str(),
    );
    match encode_response(&notification) {
        Ok(frame) => {
            let target_count = sent.targets.len();
            if let Err(e) = state
                .send_message_usecase
                .broadcast_message(sent.targets, frame)
                .await
            {
                tracing::warn!("Failed to broadcast message: {}", e);
            } else {
                tracing::debug!(
                    "Broadcasted message from '{}' to {} client(s)",
                    connection_id,
                    target_count
                );
            }
        }
        Err(e) => tracing::error!("Failed to encode broadcast notification: {}", e),
    }

    DispatchOutcome::reply(Response::success("Message broadcasted"))
}
