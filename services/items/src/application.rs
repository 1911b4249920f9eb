// アプリケーション層モジュール
pub mod request_dispatcher;
pub mod request_event;

// 再エクスポート
pub use request_dispatcher::{DispatchError, RequestDispatcher};
pub use request_event::RequestEvent;
