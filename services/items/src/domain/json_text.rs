/// レスポンスボディ用のJSONテキストエンコーダー
///
/// 既存クライアントが受け取ってきた形式に合わせ、以下の規則で出力する:
/// - 配列要素・オブジェクトメンバーの区切りは ", "
/// - キーと値の区切りは ": "
/// - 印字可能ASCII以外の文字は小文字16進の \uXXXX（BMP外はサロゲートペア）
use std::io::{self, Write};

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::ser::Formatter;

/// 区切り文字にスペースを入れ、非ASCII文字をエスケープするフォーマッター
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    // 引用符・バックスラッシュ・制御文字はserde_json側でエスケープ済みの断片が渡される
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;

        for (index, ch) in fragment.char_indices() {
            if is_printable_ascii(ch) {
                continue;
            }

            if start < index {
                writer.write_all(fragment[start..index].as_bytes())?;
            }

            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }

            start = index + ch.len_utf8();
        }

        writer.write_all(fragment[start..].as_bytes())
    }
}

fn is_printable_ascii(ch: char) -> bool {
    (' '..='~').contains(&ch)
}

/// 値をJSONテキストにシリアライズ
///
/// # Returns
/// * `Ok(String)` - ASCIIのみで構成されたJSONテキスト
/// * `Err(serde_json::Error)` - シリアライズに失敗した場合
pub fn to_string<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedAsciiFormatter);
    value.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(serde_json::Error::custom)
}
