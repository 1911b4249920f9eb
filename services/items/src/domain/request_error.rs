/// ローカルで回復するリクエストエラー
///
/// いずれもクライアントへ4xxレスポンスとして返却される。
/// `Display`の出力がそのままレスポンスボディの`error`フィールドになる。
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// POSTボディがJSONとしてパースできない
    #[error("Invalid JSON")]
    InvalidJson,

    /// パース済みボディに`id`キーがない
    #[error("Item must include 'id'")]
    MissingId,

    /// GET/POST以外のメソッド
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl RequestError {
    /// 対応するHTTPステータスコード
    pub fn status_code(&self) -> u16 {
        match self {
            RequestError::InvalidJson | RequestError::MissingId => 400,
            RequestError::MethodNotAllowed => 405,
        }
    }
}
