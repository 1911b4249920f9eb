/// HTTPレスポンス
///
/// HTTP API v2のLambdaプロキシ統合が解釈する
/// `statusCode` / `headers` / `body` 形式のJSONに変換される。
use serde::Serialize;
use serde_json::{Value, json};

use super::json_text;
use super::request_error::RequestError;

/// すべてのレスポンスに付与するContent-Type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 4xxレスポンスのボディ
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// ステータスコードとJSONテキストのボディを持つレスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status_code: u16,
    body: String,
}

impl ApiResponse {
    /// 任意のシリアライズ可能な値をボディとするレスポンスを作成
    pub fn json<T>(status_code: u16, body: &T) -> Result<Self, serde_json::Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(Self {
            status_code,
            body: json_text::to_string(body)?,
        })
    }

    /// 200 OKレスポンスを作成
    pub fn ok<T>(body: &T) -> Result<Self, serde_json::Error>
    where
        T: ?Sized + Serialize,
    {
        Self::json(200, body)
    }

    /// リクエストエラーから`{"error": ...}`形式のレスポンスを作成
    pub fn from_request_error(error: RequestError) -> Result<Self, serde_json::Error> {
        let body = ErrorBody {
            error: error.to_string(),
        };
        Self::json(error.status_code(), &body)
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Lambdaの戻り値となるJSONに変換
    pub fn into_value(self) -> Value {
        json!({
            "statusCode": self.status_code,
            "headers": { "Content-Type": CONTENT_TYPE_JSON },
            "body": self.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response() {
        let response = ApiResponse::ok(&json!([{"id": "a1"}])).unwrap();

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body(), r#"[{"id": "a1"}]"#);
    }

    #[test]
    fn test_invalid_json_response() {
        let response = ApiResponse::from_request_error(RequestError::InvalidJson).unwrap();

        assert_eq!(response.status_code(), 400);
        assert_eq!(response.body(), r#"{"error": "Invalid JSON"}"#);
    }

    #[test]
    fn test_missing_id_response() {
        let response = ApiResponse::from_request_error(RequestError::MissingId).unwrap();

        assert_eq!(response.status_code(), 400);
        assert_eq!(response.body(), r#"{"error": "Item must include 'id'"}"#);
    }

    #[test]
    fn test_method_not_allowed_response() {
        let response = ApiResponse::from_request_error(RequestError::MethodNotAllowed).unwrap();

        assert_eq!(response.status_code(), 405);
        assert_eq!(response.body(), r#"{"error": "Method not allowed"}"#);
    }

    #[test]
    fn test_into_value() {
        let value = ApiResponse::from_request_error(RequestError::MethodNotAllowed)
            .unwrap()
            .into_value();

        assert_eq!(
            value,
            json!({
                "statusCode": 405,
                "headers": {"Content-Type": "application/json"},
                "body": "{\"error\": \"Method not allowed\"}"
            })
        );
    }
}
