use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db::models::api::{Page, PageParams};
use crate::db::models::message::{Message, MessageFilter, NewMessage};
use crate::schema::messages;

pub struct MessageRepo;

impl MessageRepo {
    fn filtered(filter: &MessageFilter) -> messages::BoxedQuery<'static, Pg> {
        use crate::schema::messages::dsl::*;
        let mut query = messages.into_boxed();
        if let Some(unread) = filter.unread {
            query = query.filter(is_read.eq(!unread));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &MessageFilter,
        page: &PageParams,
    ) -> Result<Page<Message>, diesel::result::Error> {
        use crate::schema::messages::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order(created_at.desc())
            .limit(page.per_page())
            .offset(page.offset())
            .load::<Message>(conn)?;
        Ok(Page { items, total })
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        message_id: uuid::Uuid,
    ) -> Result<Option<Message>, diesel::result::Error> {
        use crate::schema::messages::dsl::*;
        messages.filter(id.eq(message_id)).first::<Message>(conn).optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_message: &NewMessage,
    ) -> Result<Message, diesel::result::Error> {
        diesel::insert_into(crate::schema::messages::table)
            .values(new_message)
            .get_result(conn)
    }

    pub fn toggle_read(
        conn: &mut PgConnection,
        message_id: uuid::Uuid,
    ) -> Result<Option<Message>, diesel::result::Error> {
        use crate::schema::messages::dsl::*;
        diesel::update(messages.filter(id.eq(message_id)))
            .set((is_read.eq(diesel::dsl::not(is_read)), updated_at.eq(Utc::now())))
            .get_result(conn)
            .optional()
    }

    pub fn delete(conn: &mut PgConnection, message_id: uuid::Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::messages::dsl::*;
        diesel::delete(messages.filter(id.eq(message_id))).execute(conn)
    }
}
