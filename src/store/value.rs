//! 복합 키 엔트리에 저장할 값 타입

use crate::errors::StoreResult;
use serde::Serialize;

/// 복합 키 엔트리에 기록할 값
///
/// 호출자가 인코딩 방식을 직접 고릅니다.
///
/// - `Structured`: JSON 텍스트로 인코딩되어 저장
/// - `RawText`: 문자열 그대로 저장 (`get_entry_raw`로 읽음)
///
/// ```rust,ignore
/// let profile = StoreValue::structured(&User { name: "John".into(), age: 30 })?;
/// store.set_entry("sessions", "abc", &profile, Some(3600)).await?;
///
/// store.set_entry("flags", "beta", &StoreValue::raw("on"), None).await?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    Structured(serde_json::Value),
    RawText(String),
}

impl StoreValue {
    /// 직렬화 가능한 값을 `Structured`로 감쌉니다.
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> StoreResult<Self> {
        Ok(StoreValue::Structured(serde_json::to_value(value)?))
    }

    /// 문자열을 인코딩 없이 저장할 `RawText`로 감쌉니다.
    pub fn raw(text: impl Into<String>) -> Self {
        StoreValue::RawText(text.into())
    }

    /// Redis에 기록될 페이로드 문자열을 만듭니다.
    pub fn encode(&self) -> StoreResult<String> {
        match self {
            StoreValue::Structured(value) => Ok(serde_json::to_string(value)?),
            StoreValue::RawText(text) => Ok(text.clone()),
        }
    }
}

impl From<serde_json::Value> for StoreValue {
    fn from(value: serde_json::Value) -> Self {
        StoreValue::Structured(value)
    }
}

impl From<String> for StoreValue {
    fn from(text: String) -> Self {
        StoreValue::RawText(text)
    }
}

impl From<&str> for StoreValue {
    fn from(text: &str) -> Self {
        StoreValue::RawText(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_string_is_json_quoted() {
        let value = StoreValue::structured("hello").unwrap();
        assert_eq!(value.encode().unwrap(), "\"hello\"");
    }

    #[test]
    fn test_raw_text_is_stored_verbatim() {
        let value = StoreValue::raw("hello");
        assert_eq!(value.encode().unwrap(), "hello");

        let from_str: StoreValue = "hello".into();
        assert_eq!(from_str, value);
    }

    #[test]
    fn test_structured_object_encoding() {
        let value: StoreValue = json!({"name": "John", "age": 30}).into();
        let encoded = value.encode().unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, json!({"name": "John", "age": 30}));
    }

    #[test]
    fn test_structured_rejects_non_string_map_keys() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1);

        let error = StoreValue::structured(&map).unwrap_err();
        assert!(error.is_decode());
    }
}
