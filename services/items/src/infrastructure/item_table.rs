/// アイテムテーブルクライアント
///
/// 全件スキャンとアップサートの2操作のみを提供する。
/// 整合性・永続性の保証はすべてDynamoDB側に委ねる。
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;
use tracing::{debug, warn};

use super::attribute_codec::{attributes_to_item, item_to_attributes};
use crate::domain::Item;

/// テーブル操作のエラー型
///
/// いずれもローカルでは回復せず、Lambdaランタイムへ伝播する。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// JSONとAttributeValueの変換に失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// アイテムテーブル操作用トレイト
///
/// 実際のDynamoDB実装とテスト用モックを差し替えられるように抽象化する。
#[async_trait]
pub trait ItemTable: Send + Sync {
    /// テーブルの全アイテムを取得
    ///
    /// ページネーションは行わず、1回のスキャン結果のみを返す。
    async fn scan(&self) -> Result<Vec<Item>, TableError>;

    /// アイテムを書き込む
    ///
    /// 同じ`id`のアイテムが存在する場合は上書きする（アップサート）。
    async fn put_item(&self, item: &Item) -> Result<(), TableError>;
}

/// ItemTableのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoItemTable {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// テーブル名
    table_name: String,
}

impl DynamoItemTable {
    /// 新しいDynamoItemTableを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - 対象テーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl ItemTable for DynamoItemTable {
    async fn scan(&self) -> Result<Vec<Item>, TableError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| TableError::ReadError(e.to_string()))?;

        // 続きのページは取得しない。結果が欠けていることだけを記録する
        if output.last_evaluated_key.is_some() {
            warn!(
                table_name = %self.table_name,
                truncated = true,
                "スキャン結果が1ページに収まらないため先頭ページのみ返却"
            );
        }

        let items = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(attributes_to_item)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(table_name = %self.table_name, count = items.len(), "スキャン完了");

        Ok(items)
    }

    async fn put_item(&self, item: &Item) -> Result<(), TableError> {
        let attributes = item_to_attributes(item);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(attributes))
            .send()
            .await
            .map_err(|e| TableError::WriteError(e.to_string()))?;

        Ok(())
    }
}
