/// テーブルに保存されるアイテム
///
/// スキーマはストア側に委ねるため、任意のJSONオブジェクトをそのまま保持する。
/// このコンポーネントが検証するのは`id`キーの存在のみ。
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::request_error::RequestError;

/// アイテムの識別子キー名
pub const ID_KEY: &str = "id";

/// 文字列キーから任意のJSON値へのマッピング
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    /// パース済みのリクエストボディからアイテムを作成
    ///
    /// # Returns
    /// * `Ok(Item)` - JSONオブジェクトで`id`キーを含む場合
    /// * `Err(RequestError::MissingId)` - `id`キーがない、またはオブジェクトでない場合
    pub fn from_body(body: Value) -> Result<Self, RequestError> {
        match body {
            Value::Object(map) if map.contains_key(ID_KEY) => Ok(Self(map)),
            _ => Err(RequestError::MissingId),
        }
    }

    /// `id`の値を取得
    ///
    /// ストアから読み出したアイテムには`id`がない可能性もあるためOptionを返す。
    pub fn id(&self) -> Option<&Value> {
        self.0.get(ID_KEY)
    }

    /// 内部のマップへの参照を取得
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Item {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
