pub mod datasets;
pub mod job;
pub mod news;

use axum::{
    Json, async_trait,
    extract::FromRequest,
    http::Request,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// 验证的 JSON 提取器
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(format!("Invalid JSON body: {}", rejection.body_text())))?;

        value
            .validate()
            .map_err(|errors| AppError::validation(describe_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flattens field errors into `field: message` pairs, sorted by field name so
/// the output is stable.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed '{}' check", error.code));
                format!("{}: {}", field, message)
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// 常用验证规则
pub mod rules {
    use validator::ValidationError;

    /// 验证密码强度
    pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
        if password.len() < 8 {
            let mut error = ValidationError::new("password_too_short");
            error.message = Some("Password must be at least 8 characters".into());
            return Err(error);
        }

        let mut score = 0;
        if password.chars().any(|c| c.is_lowercase()) {
            score += 1;
        }
        if password.chars().any(|c| c.is_uppercase()) {
            score += 1;
        }
        if password.chars().any(|c| c.is_numeric()) {
            score += 1;
        }
        if password.chars().any(|c| !c.is_alphanumeric()) {
            score += 1;
        }

        if score < 3 {
            let mut error = ValidationError::new("weak_password");
            error.message = Some(
                "Password needs three of: lowercase, uppercase, digit, symbol".into(),
            );
            return Err(error);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
        #[validate(range(min = 0))]
        count: i32,
    }

    #[test]
    fn test_describe_errors_is_sorted_and_readable() {
        let sample = Sample {
            title: String::new(),
            count: -1,
        };
        let errors = sample.validate().unwrap_err();
        let message = describe_errors(&errors);
        assert_eq!(message, "count: failed 'range' check; title: Title is required");
    }

    #[test]
    fn test_password_strength() {
        use rules::validate_password_strength;
        assert!(validate_password_strength("Str0ngPass").is_ok());
        assert!(validate_password_strength("alllowercase").is_err());
        assert!(validate_password_strength("Sh0rt!").is_err());
        assert!(validate_password_strength("lower-and-1").is_ok());
    }
}
