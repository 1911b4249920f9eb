/// ログ基盤モジュール
///
/// Lambda環境向けの構造化ログ設定を提供する。
/// 1イベントを1行のJSONとしてstdoutに出力し、CloudWatch Logsにそのまま取り込ませる。
use std::sync::Once;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::{Format, Json, JsonFields};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// JSON形式のログレイヤーを構築
///
/// - イベントのフィールドはトップレベルに展開する（`flatten_event`）
/// - 時刻は出力しない。CloudWatch Logsが取り込み時刻を付与するため、二重に持たない
/// - spanの情報は出力しない
fn json_layer<S, W>(make_writer: W) -> fmt::Layer<S, JsonFields, Format<Json, ()>, W>
where
    W: for<'writer> MakeWriter<'writer> + 'static,
{
    fmt::layer()
        .json()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .flatten_event(true)
        .with_current_span(false)
        .without_time()
        .with_writer(make_writer)
}

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// 環境変数`RUST_LOG`、未設定ならinfoレベルでフィルタリングする。
/// 複数回呼び出しても最初の呼び出しのみ初期化を実行する。
///
/// グローバルサブスクライバーが既に登録済みの場合（同一プロセスで
/// テストが先に初期化した場合など）は`try_init`の失敗を無視し、既存の設定を使う。
///
/// # 使用例
/// ```ignore
/// use items::infrastructure::init_logging;
///
/// init_logging();
/// tracing::info!("Lambda function started");
/// ```
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer(std::io::stdout))
            .try_init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = fmt::layer().with_test_writer().with_target(true).compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}

/// 本番と同じJSON形式のログをメモリに取り込むテスト用ライター
///
/// `install`が返すガードの生存中、現在のスレッドで発行されたイベントを記録する。
/// `#[tokio::test]`（current_thread）内であれば`.await`をまたいでも取りこぼさない。
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: std::sync::Arc<std::sync::Mutex<Vec<u8>>>,
}

#[cfg(test)]
impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// スレッドローカルのデフォルトサブスクライバーとして登録
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(json_layer(self.clone()));
        tracing::subscriber::set_default(subscriber)
    }

    /// 記録された行をJSONとしてパースして返す
    pub fn lines(&self) -> Vec<serde_json::Value> {
        let buffer = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

#[cfg(test)]
impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
