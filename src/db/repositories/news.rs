use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db::models::api::{Page, PageParams};
use crate::db::models::news::{NewNews, News, NewsChanges, NewsFilter};
use crate::schema::news;

pub struct NewsRepo;

impl NewsRepo {
    fn filtered<'a>(filter: &'a NewsFilter, published_only: bool) -> news::BoxedQuery<'a, Pg> {
        use crate::schema::news::dsl::*;
        let mut query = news.into_boxed();

        if published_only {
            query = query.filter(is_published.eq(true));
        }
        if let Some(cat) = filter.category {
            query = query.filter(category.eq(cat));
        }
        if let Some(tag) = filter.tag.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(tags.contains(vec![tag.to_lowercase()]));
        }
        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = super::contains_pattern(term);
            query = query.filter(title.ilike(pattern.clone()).or(summary.ilike(pattern)));
        }
        query
    }

    /// Published posts order by publication time, drafts by creation time.
    pub fn list(
        conn: &mut PgConnection,
        filter: &NewsFilter,
        published_only: bool,
        page: &PageParams,
    ) -> Result<Page<News>, diesel::result::Error> {
        use crate::schema::news::dsl::*;
        let total = Self::filtered(filter, published_only)
            .count()
            .get_result::<i64>(conn)?;

        let query = Self::filtered(filter, published_only);
        let query = if published_only {
            query.order((published_at.desc(), created_at.desc()))
        } else {
            query.order(created_at.desc())
        };
        let items = query
            .limit(page.per_page())
            .offset(page.offset())
            .load::<News>(conn)?;

        Ok(Page { items, total })
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        news_id: uuid::Uuid,
    ) -> Result<Option<News>, diesel::result::Error> {
        use crate::schema::news::dsl::*;
        news.filter(id.eq(news_id)).first::<News>(conn).optional()
    }

    pub fn insert(conn: &mut PgConnection, new_news: &NewNews) -> Result<News, diesel::result::Error> {
        diesel::insert_into(crate::schema::news::table)
            .values(new_news)
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        news_id: uuid::Uuid,
        changes: &NewsChanges,
    ) -> Result<Option<News>, diesel::result::Error> {
        use crate::schema::news::dsl::*;
        diesel::update(news.filter(id.eq(news_id)))
            .set((changes, updated_at.eq(Utc::now())))
            .get_result(conn)
            .optional()
    }

    /// Flips `is_published` in a single statement; `published_at` is only
    /// stamped the first time a post goes live.
    pub fn toggle_publish(
        conn: &mut PgConnection,
        news_id: uuid::Uuid,
    ) -> Result<Option<News>, diesel::result::Error> {
        use crate::schema::news::dsl::*;
        let now = Utc::now();
        diesel::update(news.filter(id.eq(news_id)))
            .set((
                is_published.eq(diesel::dsl::not(is_published)),
                published_at.eq(diesel::dsl::sql::<diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>>(
                    "CASE WHEN is_published = false AND published_at IS NULL THEN now() ELSE published_at END",
                )),
                updated_at.eq(now),
            ))
            .get_result(conn)
            .optional()
    }

    /// Returns the deleted row so its image can be unlinked.
    pub fn delete(
        conn: &mut PgConnection,
        news_id: uuid::Uuid,
    ) -> Result<Option<News>, diesel::result::Error> {
        use crate::schema::news::dsl::*;
        diesel::delete(news.filter(id.eq(news_id)))
            .get_result::<News>(conn)
            .optional()
    }
}
