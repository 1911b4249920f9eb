/// 正規化されたHTTPリクエストイベント
///
/// HTTP API v2（ペイロード形式2.0）のLambdaイベントから、
/// ディスパッチに必要なメソッドとボディを取り出す。
use base64::{Engine as _, engine::general_purpose};
use serde_json::{Map, Value};

use crate::domain::RequestError;
use crate::domain::json_text;

/// メソッドが取得できない場合のフォールバック
pub const DEFAULT_METHOD: &str = "GET";

/// ログに出力するイベントテキストの最大文字数
pub const MAX_LOGGED_EVENT_CHARS: usize = 1000;

/// Lambdaイベントペイロードの読み取り専用ビュー
#[derive(Debug, Clone, Copy)]
pub struct RequestEvent<'a> {
    raw: &'a Value,
}

impl<'a> RequestEvent<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    /// HTTPメソッドを取得
    ///
    /// `requestContext.http.method`が文字列でなければ`GET`として扱う。
    /// 大文字小文字は変換しない。
    pub fn method(&self) -> &'a str {
        self.raw
            .get("requestContext")
            .and_then(|context| context.get("http"))
            .and_then(|http| http.get("method"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_METHOD)
    }

    /// ボディをJSONとして取得
    ///
    /// # 処理フロー
    /// 1. ボディがない、または偽値（空文字列・0・false・空配列・空オブジェクト）なら`{}`
    /// 2. 文字列なら（`isBase64Encoded`ならデコードしてから）JSONとしてパース
    /// 3. すでに構造化されたJSONならそのまま使用
    ///
    /// # Returns
    /// * `Ok(Value)` - パース済みのボディ
    /// * `Err(RequestError::InvalidJson)` - パースまたはデコードに失敗
    pub fn json_body(&self) -> Result<Value, RequestError> {
        match self.raw.get("body") {
            Some(Value::String(text)) if !text.is_empty() => self.parse_text(text),
            Some(body) if !is_falsy(body) => Ok(body.clone()),
            _ => Ok(Value::Object(Map::new())),
        }
    }

    /// ログ用にイベント全体をJSONテキスト化し、最大文字数で切り詰める
    pub fn log_text(&self) -> String {
        let text = json_text::to_string(self.raw).unwrap_or_default();
        truncate_chars(&text, MAX_LOGGED_EVENT_CHARS).to_string()
    }

    fn is_base64_encoded(&self) -> bool {
        self.raw
            .get("isBase64Encoded")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn parse_text(&self, text: &str) -> Result<Value, RequestError> {
        if self.is_base64_encoded() {
            let decoded = general_purpose::STANDARD
                .decode(text)
                .map_err(|_| RequestError::InvalidJson)?;
            return serde_json::from_slice(&decoded).map_err(|_| RequestError::InvalidJson);
        }

        serde_json::from_str(text).map_err(|_| RequestError::InvalidJson)
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(values) => values.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// 先頭から最大`max_chars`文字を返す（UTF-8境界を保つ）
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http_event(method: &str, body: Value) -> Value {
        json!({
            "version": "2.0",
            "routeKey": "$default",
            "requestContext": {
                "http": { "method": method, "path": "/items" }
            },
            "body": body,
            "isBase64Encoded": false
        })
    }

    // ==================== メソッド取得 ====================

    #[test]
    fn test_method_from_request_context() {
        let event = http_event("POST", Value::Null);
        assert_eq!(RequestEvent::new(&event).method(), "POST");
    }

    #[test]
    fn test_method_defaults_to_get_when_missing() {
        let event = json!({"body": "{}"});
        assert_eq!(RequestEvent::new(&event).method(), "GET");

        let event = json!({"requestContext": {}});
        assert_eq!(RequestEvent::new(&event).method(), "GET");

        let event = json!({"requestContext": {"http": {}}});
        assert_eq!(RequestEvent::new(&event).method(), "GET");
    }

    #[test]
    fn test_method_defaults_to_get_when_malformed() {
        let event = json!({"requestContext": "oops"});
        assert_eq!(RequestEvent::new(&event).method(), "GET");

        let event = json!({"requestContext": {"http": {"method": 7}}});
        assert_eq!(RequestEvent::new(&event).method(), "GET");

        let event = json!(null);
        assert_eq!(RequestEvent::new(&event).method(), "GET");
    }

    #[test]
    fn test_method_keeps_case() {
        let event = http_event("post", Value::Null);
        assert_eq!(RequestEvent::new(&event).method(), "post");
    }

    // ==================== ボディ取得 ====================

    #[test]
    fn test_json_body_parses_string() {
        let event = http_event("POST", json!(r#"{"id": "a1", "name": "widget"}"#));
        let body = RequestEvent::new(&event).json_body().unwrap();
        assert_eq!(body, json!({"id": "a1", "name": "widget"}));
    }

    #[test]
    fn test_json_body_missing_is_empty_object() {
        let event = json!({"requestContext": {"http": {"method": "POST"}}});
        assert_eq!(RequestEvent::new(&event).json_body().unwrap(), json!({}));
    }

    #[test]
    fn test_json_body_falsy_is_empty_object() {
        for body in [json!(null), json!(""), json!(0), json!(false), json!([]), json!({})] {
            let event = http_event("POST", body);
            assert_eq!(RequestEvent::new(&event).json_body().unwrap(), json!({}));
        }
    }

    #[test]
    fn test_json_body_structured_used_as_is() {
        let event = http_event("POST", json!({"id": 5}));
        assert_eq!(RequestEvent::new(&event).json_body().unwrap(), json!({"id": 5}));
    }

    #[test]
    fn test_json_body_invalid() {
        for text in ["not json", "{\"id\": ", "{'id': 'a1'}", "   "] {
            let event = http_event("POST", json!(text));
            assert_eq!(
                RequestEvent::new(&event).json_body().unwrap_err(),
                RequestError::InvalidJson
            );
        }
    }

    #[test]
    fn test_json_body_non_object_json_is_valid() {
        let event = http_event("POST", json!("[1, 2, 3]"));
        assert_eq!(RequestEvent::new(&event).json_body().unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_json_body_base64_decoded() {
        let encoded = general_purpose::STANDARD.encode(r#"{"id": "b64"}"#);
        let mut event = http_event("POST", json!(encoded));
        event["isBase64Encoded"] = json!(true);

        assert_eq!(RequestEvent::new(&event).json_body().unwrap(), json!({"id": "b64"}));
    }

    #[test]
    fn test_json_body_base64_invalid() {
        let mut event = http_event("POST", json!("%%%not-base64%%%"));
        event["isBase64Encoded"] = json!(true);

        assert_eq!(
            RequestEvent::new(&event).json_body().unwrap_err(),
            RequestError::InvalidJson
        );
    }

    #[test]
    fn test_json_body_base64_non_utf8() {
        let encoded = general_purpose::STANDARD.encode([0xff, 0xfe, 0xfd]);
        let mut event = http_event("POST", json!(encoded));
        event["isBase64Encoded"] = json!(true);

        assert_eq!(
            RequestEvent::new(&event).json_body().unwrap_err(),
            RequestError::InvalidJson
        );
    }

    // ==================== ログテキスト ====================

    #[test]
    fn test_log_text_short_event() {
        let event = json!({"requestContext": {"http": {"method": "GET"}}});
        assert_eq!(
            RequestEvent::new(&event).log_text(),
            r#"{"requestContext": {"http": {"method": "GET"}}}"#
        );
    }

    #[test]
    fn test_log_text_truncated() {
        let event = http_event("POST", json!("x".repeat(5000)));
        let text = RequestEvent::new(&event).log_text();

        assert_eq!(text.chars().count(), MAX_LOGGED_EVENT_CHARS);
        assert!(text.starts_with('{'));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("あいうえお", 3), "あいう");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }
}
