use serde::{Deserialize, Serialize};

// 统一API响应结构
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize, Default)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

// 便捷构造函数
impl<T> ApiResponse<T> {
    fn build(success: bool, code: u16, message: &str, data: Option<T>) -> Self {
        Self {
            success,
            code,
            message: message.to_string(),
            data,
            meta: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, error_code: &str, message: &str, field: Option<String>) -> Self {
        let mut response = Self::build(false, code, message, None);
        response.errors = Some(vec![ErrorDetail {
            field,
            code: error_code.to_string(),
            message: message.to_string(),
        }]);
        response
    }

    pub fn success(data: T, message: &str) -> Self {
        Self::build(true, 200, message, Some(data))
    }

    pub fn success_with_meta(data: T, message: &str, meta: ResponseMeta) -> Self {
        let mut response = Self::build(true, 200, message, Some(data));
        response.meta = Some(meta);
        response
    }

    pub fn created(data: T, message: &str) -> Self {
        Self::build(true, 201, message, Some(data))
    }

    pub fn ok(message: &str) -> Self {
        Self::build(true, 200, message, None)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::failure(401, "UNAUTHORIZED", message, None)
    }

    pub fn forbidden(message: &str) -> Self {
        Self::failure(403, "FORBIDDEN", message, None)
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, "NOT_FOUND", message, None)
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::failure(409, error_code, message, field)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::failure(400, "BAD_REQUEST", message, None)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, "INTERNAL_ERROR", message, None)
    }
}

/// Query parameters shared by paginated list endpoints.
#[derive(Deserialize, Debug, Default, Clone, Copy)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageParams {
    pub const DEFAULT_PER_PAGE: i64 = 20;
    pub const MAX_PER_PAGE: i64 = 100;

    /// 上限保证 `offset()` 不会溢出
    pub fn page(&self) -> i64 {
        self.page
            .unwrap_or(1)
            .clamp(1, i64::MAX / Self::MAX_PER_PAGE)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
            .unwrap_or(Self::DEFAULT_PER_PAGE)
            .clamp(1, Self::MAX_PER_PAGE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }

    pub fn pagination(&self, total: i64) -> Pagination {
        let per_page = self.per_page();
        let page = self.page();
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Pagination {
            page,
            per_page,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// One page of rows plus the total row count before paging.
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn into_response(self, params: &PageParams, message: &str) -> ApiResponse<Vec<T>> {
        let meta = ResponseMeta {
            pagination: Some(params.pagination(self.total)),
            total_count: Some(self.total),
        };
        ApiResponse::success_with_meta(self.items, message, meta)
    }
}

/// Filters accepted by every dashboard dataset list endpoint. `from`/`to` are
/// inclusive bounds on the dataset's own date column. `category` only applies
/// to metrics, which have no department.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct DatasetFilter {
    pub department: Option<String>,
    pub category: Option<String>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}

/// Response body of a spreadsheet import.
#[derive(Serialize, Debug)]
pub struct ImportSummary {
    pub inserted: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults_and_clamping() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 20);
        assert_eq!(params.offset(), 0);

        let params = PageParams {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 100);

        let params = PageParams {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(params.offset(), 20);

        let params = PageParams {
            page: Some(i64::MAX),
            per_page: Some(PageParams::MAX_PER_PAGE),
        };
        assert_eq!(params.page(), i64::MAX / PageParams::MAX_PER_PAGE);
        assert!(params.offset() >= 0);
        assert!(!params.pagination(5).has_next);
    }

    #[test]
    fn test_pagination_meta() {
        let params = PageParams {
            page: Some(2),
            per_page: Some(10),
        };
        assert_eq!(
            params.pagination(25),
            Pagination {
                page: 2,
                per_page: 10,
                total_pages: 3,
                has_next: true,
                has_prev: true,
            }
        );
        let empty = PageParams::default().pagination(0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
    }

    #[test]
    fn test_error_envelope_shape() {
        let response = ApiResponse::<()>::not_found("news not found");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 404);
        assert_eq!(json["message"], "news not found");
        assert!(json.get("data").is_none());
        assert_eq!(json["errors"][0]["code"], "NOT_FOUND");
    }
}
