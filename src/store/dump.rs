//! 디버그 덤프 값 타입

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// 타입 태그가 붙은 덤프 항목
///
/// `Display`는 사람이 읽는 한 줄 표현을, `Serialize`는
/// `{"type": "hash", "value": {...}}` 형태의 JSON을 만듭니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DumpEntry {
    Hash(BTreeMap<String, String>),
    String(String),
    List(Vec<String>),
    Set(Vec<String>),
    Zset(Vec<(String, f64)>),
    /// 덤프가 해석하지 않는 타입. Redis `TYPE` 응답을 그대로 담습니다.
    Unsupported(String),
}

impl DumpEntry {
    /// Redis `TYPE` 이름
    pub fn type_name(&self) -> &str {
        match self {
            DumpEntry::Hash(_) => "hash",
            DumpEntry::String(_) => "string",
            DumpEntry::List(_) => "list",
            DumpEntry::Set(_) => "set",
            DumpEntry::Zset(_) => "zset",
            DumpEntry::Unsupported(type_name) => type_name,
        }
    }
}

impl fmt::Display for DumpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match self {
            DumpEntry::Hash(fields) => serde_json::to_string(fields),
            DumpEntry::String(text) => serde_json::to_string(text),
            DumpEntry::List(items) | DumpEntry::Set(items) => serde_json::to_string(items),
            DumpEntry::Zset(members) => serde_json::to_string(members),
            DumpEntry::Unsupported(type_name) => {
                return write!(f, "<unsupported type: {}>", type_name);
            }
        }
        .map_err(|_| fmt::Error)?;

        write!(f, "[{}] {}", self.type_name(), body)
    }
}
