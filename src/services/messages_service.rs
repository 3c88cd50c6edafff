use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::{Page, PageParams},
    db::models::message::{Message, MessageFilter, NewMessage},
    db::repositories::messages::MessageRepo,
    error::AppError,
};

pub struct MessagesService;

impl MessagesService {
    pub fn create(conn: &mut PgConnection, mut new_message: NewMessage) -> Result<Message, AppError> {
        new_message.email = new_message.email.trim().to_lowercase();
        let message = MessageRepo::insert(conn, &new_message)?;
        tracing::info!(message_id = %message.id, "Contact message received");
        Ok(message)
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &MessageFilter,
        page: &PageParams,
    ) -> Result<Page<Message>, AppError> {
        Ok(MessageRepo::list(conn, filter, page)?)
    }

    pub fn get(conn: &mut PgConnection, message_id: Uuid) -> Result<Message, AppError> {
        MessageRepo::find_by_id(conn, message_id)?.ok_or_else(|| AppError::not_found("Message"))
    }

    pub fn toggle_read(conn: &mut PgConnection, message_id: Uuid) -> Result<Message, AppError> {
        MessageRepo::toggle_read(conn, message_id)?.ok_or_else(|| AppError::not_found("Message"))
    }

    pub fn delete(conn: &mut PgConnection, message_id: Uuid) -> Result<(), AppError> {
        if MessageRepo::delete(conn, message_id)? == 0 {
            return Err(AppError::not_found("Message"));
        }
        Ok(())
    }
}
