use crate::db::enums::NewsCategory;
use crate::error::{AppError, AppResult};
use crate::utils::uploads::FormData;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// News models
#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::news)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub category: NewsCategory,
    pub content: String,
    pub image_path: Option<String>,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::news)]
pub struct NewNews {
    pub title: String,
    pub summary: String,
    pub category: NewsCategory,
    pub content: String,
    pub image_path: Option<String>,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: bool,
    pub tags: Vec<String>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::news)]
pub struct NewsChanges {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub category: Option<NewsCategory>,
    pub content: Option<String>,
    pub image_path: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Text fields of the news admin form. Every field is optional so the same
/// shape serves create and partial update.
#[derive(Validate, Default, Debug, Clone)]
pub struct NewsForm {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 1000, message = "Summary must be between 1 and 1000 characters"))]
    pub summary: Option<String>,
    pub category: Option<NewsCategory>,
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Author must be between 1 and 255 characters"))]
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

impl NewsForm {
    pub fn from_form(form: &FormData) -> AppResult<Self> {
        let category = form
            .text("category")
            .map(|raw| raw.parse::<NewsCategory>().map_err(AppError::validation))
            .transpose()?;
        let is_published = form
            .text("is_published")
            .map(|raw| parse_bool(raw).ok_or_else(|| AppError::validation("is_published must be true or false")))
            .transpose()?;

        Ok(Self {
            title: form.text("title").map(|s| s.trim().to_string()),
            summary: form.text("summary").map(|s| s.trim().to_string()),
            category,
            content: form.text("content").map(|s| s.to_string()),
            author: form.text("author").map(|s| s.trim().to_string()),
            tags: form.list("tags").map(normalize_tags),
            is_published,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.summary.is_none()
            && self.category.is_none()
            && self.content.is_none()
            && self.author.is_none()
            && self.tags.is_none()
            && self.is_published.is_none()
    }
}

/// Tags arrive either repeated or comma separated; keep them unique, trimmed
/// and lower-cased, in first-seen order.
pub fn normalize_tags(raw: Vec<String>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.iter().flat_map(|value| value.split(',')) {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct NewsFilter {
    pub category: Option<NewsCategory>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags() {
        let tags = normalize_tags(vec![
            "HR, Benefits".to_string(),
            "benefits".to_string(),
            " ".to_string(),
            "Events".to_string(),
        ]);
        assert_eq!(tags, vec!["hr", "benefits", "events"]);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
