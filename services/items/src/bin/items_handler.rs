/// アイテムAPI Lambdaエントリポイント
///
/// HTTP API（ペイロード形式2.0）経由のリクエストを受け取り、
/// GETでテーブルの全アイテムを返し、POSTでアイテムを登録する。
use items::application::RequestDispatcher;
use items::infrastructure::{DynamoItemTable, ItemTable, ItemsConfig, init_logging};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // TABLE_NAMEがなければ起動失敗
    let config = ItemsConfig::from_env()
        .await
        .inspect_err(|err| error!(error = %err, "設定の読み込みに失敗"))?;

    let table = DynamoItemTable::new(config.client().clone(), config.table_name().to_string());

    info!(table_name = %table.table_name(), "アイテムLambda関数を初期化");

    let dispatcher = RequestDispatcher::new(table);
    let dispatcher = &dispatcher;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(dispatcher, event).await
    }))
    .await
}

/// Lambda関数のメインハンドラー
///
/// テーブル操作の失敗はレスポンスに変換せず、そのままランタイムへ返す。
async fn handler<T>(dispatcher: &RequestDispatcher<T>, event: LambdaEvent<Value>) -> Result<Value, Error>
where
    T: ItemTable,
{
    let response = dispatcher
        .handle(&event.payload)
        .await
        .inspect_err(|err| error!(error = %err, "リクエスト処理に失敗"))?;

    Ok(response.into_value())
}
