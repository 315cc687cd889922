//! # 테이블 스토어 어댑터
//!
//! "테이블 + 키" 어휘를 Redis 기본 명령으로 옮기는 얇은 어댑터입니다.
//!
//! | 표현 | Redis 자료구조 | 키 이름 |
//! |------|----------------|---------|
//! | 테이블 필드 | Hash | `table` (필드 = key) |
//! | 복합 키 엔트리 | String | `table-key` |
//!
//! 해시의 TTL은 테이블 전체에 적용됩니다.
//! 엔트리별 TTL이 필요하면 복합 키 엔트리를 사용합니다.
//!
//! ## 원자성
//!
//! 각 메서드는 Redis 명령 하나(또는 SCAN 루프)이며,
//! 호출 사이에 상태를 유지하지 않습니다.
//! `set_field_with_ttl`은 `HSET` 후 `EXPIRE`를 보내는 두 번의 왕복이므로
//! 중간에 실패하면 TTL 없이 필드만 남을 수 있습니다.

use super::backend::{KeyTtl, StoreBackend};
use super::dump::DumpEntry;
use super::keys::{composite_key, scan_pattern, strip_table_prefix};
use super::redis::RedisBackend;
use super::value::StoreValue;
use crate::config::RedisConfig;
use crate::errors::{StoreError, StoreResult};
use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::{BTreeMap, HashMap, HashSet};

/// 0초 TTL은 만료 없음으로 취급합니다.
fn effective_ttl(ttl: Option<u64>) -> Option<u64> {
    ttl.filter(|seconds| *seconds > 0)
}

/// 저장된 JSON 페이로드를 디코딩합니다. 실패하면 `location`을 에러에 담습니다.
fn decode<T: DeserializeOwned>(location: &str, payload: &str) -> StoreResult<T> {
    serde_json::from_str(payload).map_err(|e| StoreError::decode(location, e))
}

/// 테이블 필드의 위치 표기 (`table[field]`)
fn field_location(table: &str, key: &str) -> String {
    format!("{}[{}]", table, key)
}

/// 테이블 스토어 어댑터
///
/// 열린 연결 핸들 외에는 아무 상태도 갖지 않습니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use table_store::{RedisConfig, TableStore};
///
/// let store = TableStore::connect(&RedisConfig::from_env()).await?;
///
/// store.set_field("users", "key123", &json!({"name": "John", "age": 30})).await?;
/// let users: HashMap<String, serde_json::Value> = store.get_all("users").await?;
///
/// store.delete_field("users", "key123").await?;
/// ```
pub struct TableStore<B: StoreBackend = RedisBackend> {
    backend: B,
    scan_count: usize,
}

impl TableStore<RedisBackend> {
    /// Redis에 연결하고 어댑터를 만듭니다.
    pub async fn connect(config: &RedisConfig) -> StoreResult<Self> {
        let backend = RedisBackend::connect(config).await?;
        Ok(Self::with_backend(backend, config.scan_count))
    }
}

impl<B: StoreBackend> TableStore<B> {
    /// 주어진 백엔드로 어댑터를 만듭니다.
    ///
    /// `scan_count`는 SCAN 한 번에 요청할 키 개수 힌트입니다 (0이면 1로 올림).
    pub fn with_backend(backend: B, scan_count: usize) -> Self {
        Self {
            backend,
            scan_count: scan_count.max(1),
        }
    }

    /// 서버 가용성을 확인합니다 (`PING`).
    pub async fn ping(&self) -> StoreResult<()> {
        self.backend.ping().await
    }

    // ========== 테이블 (Hash) ==========

    /// 만료 시간 없이 테이블 필드에 값을 기록합니다.
    ///
    /// 값은 JSON으로 인코딩되며, 같은 필드가 있으면 덮어씁니다.
    pub async fn set_field<T: Serialize + ?Sized>(
        &self,
        table: &str,
        key: &str,
        value: &T,
    ) -> StoreResult<()> {
        let payload = serde_json::to_string(value)?;
        self.backend.hash_set(table, key, payload).await
    }

    /// 테이블 필드에 값을 기록하고 테이블 전체에 TTL을 적용합니다.
    ///
    /// TTL은 테이블의 모든 필드에 영향을 줍니다.
    /// `seconds`가 0이면 TTL을 건드리지 않습니다.
    pub async fn set_field_with_ttl<T: Serialize + ?Sized>(
        &self,
        table: &str,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> StoreResult<()> {
        self.set_field(table, key, value).await?;
        if let Some(seconds) = effective_ttl(Some(seconds)) {
            self.backend.expire(table, seconds).await?;
        }
        Ok(())
    }

    /// 테이블 필드를 읽어 디코딩합니다.
    ///
    /// ## 반환값
    ///
    /// - `Ok(Some(T))` - 필드가 존재하고 디코딩 성공
    /// - `Ok(None)` - 테이블 또는 필드가 없음
    /// - `Err(DecodeError)` - 저장된 값이 `T`의 JSON이 아님 (`location`은 `table[field]`)
    pub async fn get_field<T: DeserializeOwned>(
        &self,
        table: &str,
        key: &str,
    ) -> StoreResult<Option<T>> {
        match self.backend.hash_get(table, key).await? {
            Some(payload) => decode(&field_location(table, key), &payload).map(Some),
            None => Ok(None),
        }
    }

    /// 테이블의 모든 필드를 읽어 디코딩합니다.
    ///
    /// 테이블이 없으면 빈 맵을 반환합니다.
    /// 하나라도 디코딩에 실패하면 해당 필드를 `location`에 담은 `DecodeError`를 반환합니다.
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        table: &str,
    ) -> StoreResult<HashMap<String, T>> {
        let raw = self.backend.hash_get_all(table).await?;
        let mut decoded = HashMap::with_capacity(raw.len());
        for (field, payload) in raw {
            let value = decode(&field_location(table, &field), &payload)?;
            decoded.insert(field, value);
        }
        Ok(decoded)
    }

    /// 테이블 필드 하나를 삭제하고 삭제된 개수(0 또는 1)를 반환합니다.
    pub async fn delete_field(&self, table: &str, key: &str) -> StoreResult<u64> {
        self.backend.hash_del(table, key).await
    }

    /// 테이블(해시) 전체를 삭제하고 삭제된 키 개수(0 또는 1)를 반환합니다.
    pub async fn delete_table(&self, table: &str) -> StoreResult<u64> {
        self.backend.del(table).await
    }

    // ========== 복합 키 엔트리 (String) ==========

    /// `table-key` 엔트리에 값을 기록합니다.
    ///
    /// `ttl`이 `Some(seconds)`이면 `SET EX`로 한 번에 만료 시간까지 기록합니다.
    pub async fn set_entry(
        &self,
        table: &str,
        key: &str,
        value: &StoreValue,
        ttl: Option<u64>,
    ) -> StoreResult<()> {
        let payload = value.encode()?;
        self.backend
            .set(&composite_key(table, key), payload, effective_ttl(ttl))
            .await
    }

    /// `table-key` 엔트리를 JSON으로 디코딩해 읽습니다.
    pub async fn get_entry<T: DeserializeOwned>(
        &self,
        table: &str,
        key: &str,
    ) -> StoreResult<Option<T>> {
        let name = composite_key(table, key);
        match self.backend.get(&name).await? {
            Some(payload) => decode(&name, &payload).map(Some),
            None => Ok(None),
        }
    }

    /// `table-key` 엔트리를 디코딩 없이 문자열 그대로 읽습니다.
    ///
    /// [`StoreValue::RawText`]로 기록한 값을 읽을 때 사용합니다.
    pub async fn get_entry_raw(&self, table: &str, key: &str) -> StoreResult<Option<String>> {
        self.backend.get(&composite_key(table, key)).await
    }

    /// `table-key` 엔트리를 삭제하고 삭제된 개수(0 또는 1)를 반환합니다.
    pub async fn delete_entry(&self, table: &str, key: &str) -> StoreResult<u64> {
        self.backend.del(&composite_key(table, key)).await
    }

    /// 테이블의 복합 엔트리 중 `key_pattern`(glob)에 맞는 것을 모두 읽습니다.
    ///
    /// 결과 맵의 키는 `table-` 접두사를 뗀 나머지입니다.
    ///
    /// ## 동작
    ///
    /// 1. `SCAN 0 MATCH table-<key_pattern> COUNT n`을 커서가 `0`으로 돌아올 때까지 반복
    /// 2. 찾은 키마다 `GET`으로 값을 개별 조회
    ///
    /// 블로킹 `KEYS` 대신 SCAN을 쓰므로 순회 도중 바뀐 키는 누락되거나 중복될 수 있습니다.
    /// 중복은 한 번만 담기고, 조회 전에 사라진 키는 건너뜁니다.
    ///
    /// 패턴에 걸린 키가 문자열이 아니면(예: `orders-archive`라는 해시 테이블)
    /// `GET`이 `WRONGTYPE`으로 거부되며, 그 키는 결과에서 빠집니다.
    /// 복합 엔트리와 같은 접두사를 쓰는 테이블 이름은 피해야 합니다.
    ///
    /// ```rust,ignore
    /// let orders: HashMap<String, Order> = store.scan_entries("orders", "*").await?;
    /// let april: HashMap<String, Order> = store.scan_entries("orders", "2024-04-*").await?;
    /// ```
    pub async fn scan_entries<T: DeserializeOwned>(
        &self,
        table: &str,
        key_pattern: &str,
    ) -> StoreResult<HashMap<String, T>> {
        let pattern = scan_pattern(table, key_pattern);
        let keys = self.scan_keys(&pattern).await?;

        let mut entries = HashMap::with_capacity(keys.len());
        for full_key in keys {
            let Some(suffix) = strip_table_prefix(table, &full_key) else {
                continue;
            };
            match self.backend.get(&full_key).await {
                Ok(Some(payload)) => {
                    entries.insert(suffix.to_string(), decode(&full_key, &payload)?);
                }
                Ok(None) => debug!("SCAN 이후 사라진 키 건너뜀: {}", full_key),
                Err(e) if e.is_wrong_type() => {
                    debug!("문자열이 아닌 키 건너뜀: {}", full_key);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(entries)
    }

    // ========== TTL ==========

    /// 테이블의 TTL을 설정하거나(`Some`) 해제합니다(`None`).
    ///
    /// ## 반환값
    ///
    /// - 설정: 테이블이 존재해서 TTL이 적용되었으면 `true`
    /// - 해제: 기존 TTL이 제거되었으면 `true`
    pub async fn set_ttl(&self, table: &str, ttl: Option<u64>) -> StoreResult<bool> {
        self.apply_ttl(table, ttl).await
    }

    /// `table-key` 엔트리의 TTL을 설정하거나 해제합니다.
    pub async fn set_entry_ttl(
        &self,
        table: &str,
        key: &str,
        ttl: Option<u64>,
    ) -> StoreResult<bool> {
        self.apply_ttl(&composite_key(table, key), ttl).await
    }

    /// 테이블의 남은 수명을 조회합니다.
    pub async fn ttl(&self, table: &str) -> StoreResult<KeyTtl> {
        self.backend.ttl(table).await
    }

    /// `table-key` 엔트리의 남은 수명을 조회합니다.
    pub async fn entry_ttl(&self, table: &str, key: &str) -> StoreResult<KeyTtl> {
        self.backend.ttl(&composite_key(table, key)).await
    }

    async fn apply_ttl(&self, key: &str, ttl: Option<u64>) -> StoreResult<bool> {
        match effective_ttl(ttl) {
            Some(seconds) => self.backend.expire(key, seconds).await,
            None => self.backend.persist(key).await,
        }
    }

    // ========== 디버그 ==========

    /// 저장소 전체를 타입 태그가 붙은 형태로 덤프합니다.
    ///
    /// 모든 키를 SCAN으로 찾은 뒤 `TYPE`에 따라 읽기 명령을 고릅니다.
    ///
    /// | TYPE | 읽기 명령 | 결과 |
    /// |------|-----------|------|
    /// | hash | `HGETALL` | [`DumpEntry::Hash`] |
    /// | string | `GET` | [`DumpEntry::String`] |
    /// | list | `LRANGE 0 -1` | [`DumpEntry::List`] |
    /// | set | `SMEMBERS` | [`DumpEntry::Set`] |
    /// | zset | `ZRANGE 0 -1 WITHSCORES` | [`DumpEntry::Zset`] |
    /// | 그 외 | - | [`DumpEntry::Unsupported`] |
    ///
    /// 운영 환경이 아닌 디버깅 용도입니다.
    pub async fn dump(&self) -> StoreResult<BTreeMap<String, DumpEntry>> {
        let keys = self.scan_keys("*").await?;

        let mut dump = BTreeMap::new();
        for key in keys {
            let entry = match self.backend.key_type(&key).await?.as_str() {
                "none" => {
                    debug!("덤프 도중 사라진 키 건너뜀: {}", key);
                    continue;
                }
                "hash" => {
                    let fields = self.backend.hash_get_all(&key).await?;
                    DumpEntry::Hash(fields.into_iter().collect())
                }
                "string" => match self.backend.get(&key).await? {
                    Some(text) => DumpEntry::String(text),
                    None => continue,
                },
                "list" => DumpEntry::List(self.backend.list_range(&key).await?),
                "set" => {
                    let mut members = self.backend.set_members(&key).await?;
                    members.sort();
                    DumpEntry::Set(members)
                }
                "zset" => DumpEntry::Zset(self.backend.sorted_set_range(&key).await?),
                other => DumpEntry::Unsupported(other.to_string()),
            };
            dump.insert(key, entry);
        }
        Ok(dump)
    }

    /// 커서가 `0`으로 돌아올 때까지 SCAN을 반복해 일치하는 키를 모읍니다.
    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        let mut cursor = 0u64;

        loop {
            let (next, batch) = self.backend.scan(cursor, pattern, self.scan_count).await?;
            for key in batch {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("SCAN '{}' 완료: {}개 키", pattern, keys.len());
        Ok(keys)
    }
}
