/// リクエストディスパッチャー
///
/// HTTPメソッドに応じて一覧取得・登録・405のいずれかを実行し、
/// 1イベントにつき1レスポンスを返す。
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::request_event::RequestEvent;
use crate::domain::{ApiResponse, Item, RequestError};
use crate::infrastructure::{ItemTable, TableError};

/// 登録成功時のメッセージ
pub const ITEM_ADDED_MESSAGE: &str = "Item added";

/// ローカルで回復しないエラー
///
/// Lambdaランタイムへそのまま返し、呼び出し失敗として扱わせる。
#[derive(Debug, Error)]
pub enum DispatchError {
    /// テーブル操作の失敗
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// レスポンスボディのエンコード失敗
    #[error("Response encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// 登録成功レスポンスのボディ（キー順は message, id）
#[derive(Debug, Serialize)]
struct ItemAdded<'a> {
    message: &'static str,
    id: Option<&'a Value>,
}

/// HTTPリクエストイベントをメソッドごとの処理へ振り分けるディスパッチャー
pub struct RequestDispatcher<T>
where
    T: ItemTable,
{
    /// アイテムテーブル
    table: T,
}

impl<T> RequestDispatcher<T>
where
    T: ItemTable,
{
    /// 新しいRequestDispatcherを作成
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// リクエストイベントを処理
    ///
    /// # 処理フロー
    /// 1. メソッドを取得（取得できなければGET）
    /// 2. メソッドと切り詰めたイベント全体をログ出力
    /// 3. GETは全件スキャン、POSTは検証後にアップサート、それ以外は405
    ///
    /// # 戻り値
    /// * `Ok(ApiResponse)` - 200/400/405レスポンス
    /// * `Err(DispatchError)` - テーブル操作の失敗など、ランタイムへ伝播させるエラー
    pub async fn handle(&self, event: &Value) -> Result<ApiResponse, DispatchError> {
        let request = RequestEvent::new(event);
        let method = request.method();

        info!(method = %method, event = %request.log_text(), "リクエスト受信");

        match method {
            "GET" => self.list_items().await,
            "POST" => self.add_item(&request).await,
            _ => {
                warn!(method = %method, "未対応のメソッド");
                Ok(ApiResponse::from_request_error(RequestError::MethodNotAllowed)?)
            }
        }
    }

    async fn list_items(&self) -> Result<ApiResponse, DispatchError> {
        let items = self.table.scan().await?;

        info!(count = items.len(), "アイテム一覧を返却");

        Ok(ApiResponse::ok(&items)?)
    }

    async fn add_item(&self, request: &RequestEvent<'_>) -> Result<ApiResponse, DispatchError> {
        let item = match request.json_body().and_then(Item::from_body) {
            Ok(item) => item,
            Err(error) => {
                warn!(error = %error, "リクエストボディを拒否");
                return Ok(ApiResponse::from_request_error(error)?);
            }
        };

        self.table.put_item(&item).await?;

        let body = ItemAdded {
            message: ITEM_ADDED_MESSAGE,
            id: item.id(),
        };

        info!(id = ?body.id, "アイテムを登録");

        Ok(ApiResponse::ok(&body)?)
    }
}
