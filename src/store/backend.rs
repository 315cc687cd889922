//! 저장소 백엔드 추상화
//!
//! [`TableStore`](super::TableStore)가 사용하는 Redis 기본 명령 집합입니다.
//!
//! 구현체:
//! - [`RedisBackend`](super::redis::RedisBackend): 운영용 Redis 백엔드
//! - [`MemoryBackend`](super::memory::MemoryBackend): 시계를 직접 조작할 수 있는 테스트용 백엔드

use crate::errors::StoreResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// `TTL` 명령 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// 키가 존재하지 않음 (Redis `-2`)
    Missing,
    /// 만료 시간이 없음 (Redis `-1`)
    Persistent,
    /// 남은 수명 (초)
    Expires(u64),
}

impl KeyTtl {
    /// Redis `TTL` 응답 값을 변환합니다.
    pub fn from_reply(reply: i64) -> Self {
        match reply {
            -1 => KeyTtl::Persistent,
            n if n < 0 => KeyTtl::Missing,
            n => KeyTtl::Expires(n as u64),
        }
    }
}

/// 어댑터가 사용하는 Redis 명령 집합
///
/// 각 메서드는 Redis 명령 하나에 대응하며, 값은 이미 인코딩된 문자열로 주고받습니다.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// `PING`
    async fn ping(&self) -> StoreResult<()>;

    // ========== Hash ==========

    /// `HSET table field payload`
    async fn hash_set(&self, table: &str, field: &str, payload: String) -> StoreResult<()>;

    /// `HGET table field`
    async fn hash_get(&self, table: &str, field: &str) -> StoreResult<Option<String>>;

    /// `HGETALL table`
    async fn hash_get_all(&self, table: &str) -> StoreResult<HashMap<String, String>>;

    /// `HDEL table field`, 삭제된 필드 수 반환
    async fn hash_del(&self, table: &str, field: &str) -> StoreResult<u64>;

    // ========== String ==========

    /// `GET key`
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// `SET key payload` 또는 `SET key payload EX seconds`
    async fn set(&self, key: &str, payload: String, ttl_seconds: Option<u64>) -> StoreResult<()>;

    // ========== Keyspace ==========

    /// `DEL key`, 삭제된 키 수 반환
    async fn del(&self, key: &str) -> StoreResult<u64>;

    /// `EXPIRE key seconds`, 키가 있었으면 `true`
    async fn expire(&self, key: &str, seconds: u64) -> StoreResult<bool>;

    /// `PERSIST key`, 만료 시간이 제거되었으면 `true`
    async fn persist(&self, key: &str) -> StoreResult<bool>;

    /// `TTL key`
    async fn ttl(&self, key: &str) -> StoreResult<KeyTtl>;

    /// `SCAN cursor MATCH pattern COUNT count`
    ///
    /// `(다음 커서, 이번 배치의 키)`를 반환합니다. 다음 커서가 `0`이면 순회가 끝난 것입니다.
    async fn scan(
        &self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> StoreResult<(u64, Vec<String>)>;

    /// `TYPE key`, 키가 없으면 `"none"`
    async fn key_type(&self, key: &str) -> StoreResult<String>;

    // ========== 디버그 덤프용 읽기 ==========

    /// `LRANGE key 0 -1`
    async fn list_range(&self, key: &str) -> StoreResult<Vec<String>>;

    /// `SMEMBERS key`
    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>>;

    /// `ZRANGE key 0 -1 WITHSCORES`
    async fn sorted_set_range(&self, key: &str) -> StoreResult<Vec<(String, f64)>>;
}
