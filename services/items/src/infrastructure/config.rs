/// DynamoDB接続設定
///
/// 起動時に一度だけ環境から読み込み、以降の呼び出しで共有する。
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

/// 対象テーブル名を指定する環境変数
pub const TABLE_NAME_ENV: &str = "TABLE_NAME";

/// 設定読み込みのエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// DynamoDBクライアントと対象テーブル名を持つ設定
#[derive(Debug, Clone)]
pub struct ItemsConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// アイテムテーブル名
    table_name: String,
}

impl ItemsConfig {
    /// 環境からAWS設定とテーブル名を読み込んで新しいItemsConfigを作成
    ///
    /// 環境変数:
    /// - AWS認証情報・リージョン: aws-configにより自動読み込み
    /// - TABLE_NAME: アイテム用DynamoDBテーブル名（必須）
    pub async fn from_env() -> Result<Self, ConfigError> {
        // テーブル名がなければAWS設定の読み込み前に失敗させる
        let table_name = table_name_from_env()?;

        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        Ok(Self { client, table_name })
    }

    /// 明示的な値で新しいItemsConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// 環境変数からテーブル名を読み込む
fn table_name_from_env() -> Result<String, ConfigError> {
    std::env::var(TABLE_NAME_ENV).map_err(|_| ConfigError::MissingEnvVar(TABLE_NAME_ENV.to_string()))
}
