use crate::db::models::news::NewsForm;
use crate::error::AppError;
use crate::validation::describe_errors;
use validator::Validate;

pub fn validate_create_news(form: &NewsForm) -> Result<(), AppError> {
    let missing: Vec<&str> = [
        ("title", form.title.is_none()),
        ("summary", form.summary.is_none()),
        ("category", form.category.is_none()),
        ("content", form.content.is_none()),
        ("author", form.author.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect();

    if !missing.is_empty() {
        return Err(AppError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    form.validate()
        .map_err(|errors| AppError::validation(describe_errors(&errors)))
}

pub fn validate_update_news(form: &NewsForm, has_image: bool) -> Result<(), AppError> {
    if form.is_empty() && !has_image {
        return Err(AppError::validation("No update data provided"));
    }
    form.validate()
        .map_err(|errors| AppError::validation(describe_errors(&errors)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::NewsCategory;

    fn complete() -> NewsForm {
        NewsForm {
            title: Some("Open enrolment".to_string()),
            summary: Some("Benefits enrolment opens Monday".to_string()),
            category: Some(NewsCategory::Announcement),
            content: Some("Details inside".to_string()),
            author: Some("People Team".to_string()),
            tags: Some(vec!["benefits".to_string()]),
            is_published: None,
        }
    }

    #[test]
    fn test_create_requires_all_fields() {
        assert!(validate_create_news(&complete()).is_ok());

        let mut form = complete();
        form.category = None;
        form.author = None;
        let err = validate_create_news(&form).unwrap_err();
        assert!(err.to_string().contains("category, author"));
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let mut form = complete();
        form.title = Some(String::new());
        assert!(validate_create_news(&form).is_err());
    }

    #[test]
    fn test_update_needs_some_change() {
        assert!(validate_update_news(&NewsForm::default(), false).is_err());
        assert!(validate_update_news(&NewsForm::default(), true).is_ok());

        let form = NewsForm {
            is_published: Some(true),
            ..Default::default()
        };
        assert!(validate_update_news(&form, false).is_ok());
    }
}
