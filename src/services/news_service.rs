use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::{Page, PageParams},
    db::models::news::{NewNews, News, NewsChanges, NewsFilter, NewsForm},
    db::repositories::news::NewsRepo,
    error::AppError,
};

pub struct NewsService;

/// Result of an edit: the saved post and the image it no longer uses.
pub struct NewsUpdate {
    pub news: News,
    pub replaced_image: Option<String>,
}

impl NewsService {
    pub fn list(
        conn: &mut PgConnection,
        filter: &NewsFilter,
        published_only: bool,
        page: &PageParams,
    ) -> Result<Page<News>, AppError> {
        Ok(NewsRepo::list(conn, filter, published_only, page)?)
    }

    /// Drafts are invisible to the public.
    pub fn get_published(conn: &mut PgConnection, news_id: Uuid) -> Result<News, AppError> {
        NewsRepo::find_by_id(conn, news_id)?
            .filter(|post| post.is_published)
            .ok_or_else(|| AppError::not_found("News"))
    }

    /// `form` must already have passed `validate_create_news`.
    pub fn create(
        conn: &mut PgConnection,
        form: NewsForm,
        image_path: Option<String>,
    ) -> Result<News, AppError> {
        let missing = || AppError::validation("Missing required news fields");
        let is_published = form.is_published.unwrap_or(false);

        let new_news = NewNews {
            title: form.title.ok_or_else(missing)?,
            summary: form.summary.ok_or_else(missing)?,
            category: form.category.ok_or_else(missing)?,
            content: form.content.ok_or_else(missing)?,
            image_path,
            author: form.author.ok_or_else(missing)?,
            published_at: is_published.then(Utc::now),
            is_published,
            tags: form.tags.unwrap_or_default(),
        };

        let news = NewsRepo::insert(conn, &new_news)?;
        tracing::info!(news_id = %news.id, published = news.is_published, "News created");
        Ok(news)
    }

    pub fn update(
        conn: &mut PgConnection,
        news_id: Uuid,
        form: NewsForm,
        image_path: Option<String>,
    ) -> Result<NewsUpdate, AppError> {
        conn.transaction::<_, AppError, _>(|conn| {
            let existing = NewsRepo::find_by_id(conn, news_id)?
                .ok_or_else(|| AppError::not_found("News"))?;

            let first_publish = form.is_published == Some(true) && existing.published_at.is_none();
            let replaced_image = match &image_path {
                Some(_) => existing.image_path.clone(),
                None => None,
            };

            let changes = NewsChanges {
                title: form.title,
                summary: form.summary,
                category: form.category,
                content: form.content,
                image_path,
                author: form.author,
                published_at: first_publish.then(Utc::now),
                is_published: form.is_published,
                tags: form.tags,
            };

            let news = NewsRepo::update(conn, news_id, &changes)?
                .ok_or_else(|| AppError::not_found("News"))?;
            Ok(NewsUpdate {
                news,
                replaced_image,
            })
        })
    }

    pub fn toggle_publish(conn: &mut PgConnection, news_id: Uuid) -> Result<News, AppError> {
        let news = NewsRepo::toggle_publish(conn, news_id)?
            .ok_or_else(|| AppError::not_found("News"))?;
        tracing::info!(news_id = %news.id, published = news.is_published, "News publication toggled");
        Ok(news)
    }

    pub fn delete(conn: &mut PgConnection, news_id: Uuid) -> Result<News, AppError> {
        NewsRepo::delete(conn, news_id)?.ok_or_else(|| AppError::not_found("News"))
    }
}
