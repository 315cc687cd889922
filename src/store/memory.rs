//! 인메모리 백엔드 구현
//!
//! Redis 서버 없이 [`TableStore`](super::TableStore)를 테스트하기 위한 백엔드입니다.
//! 시계를 [`MemoryBackend::advance`]로 직접 진행시킬 수 있어
//! TTL 만료를 `sleep` 없이 검증할 수 있습니다.
//!
//! 해시, 문자열, 리스트, 셋, 정렬 셋 값과 TTL, `SCAN` 커서 프로토콜,
//! `TYPE` 명령을 흉내 냅니다.

use super::backend::{KeyTtl, StoreBackend};
use super::keys::glob_match;
use crate::errors::StoreResult;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Duration;
use tokio::sync::Mutex;

/// 저장된 값의 종류
#[derive(Debug, Clone)]
enum Value {
    Hash(HashMap<String, String>),
    Text(String),
    List(Vec<String>),
    Set(BTreeSet<String>),
    SortedSet(Vec<(String, f64)>),
    /// 덤프가 지원하지 않는 타입 (예: `stream`)
    Opaque(String),
}

impl Value {
    fn type_name(&self) -> &str {
        match self {
            Value::Hash(_) => "hash",
            Value::Text(_) => "string",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::SortedSet(_) => "zset",
            Value::Opaque(name) => name,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    value: Value,
    /// 만료 시각 (가상 시계 기준)
    expires_at: Option<Duration>,
}

#[derive(Debug, Default)]
struct State {
    now: Duration,
    slots: BTreeMap<String, Slot>,
}

impl State {
    /// 만료된 키를 제거합니다. 모든 명령 전에 호출됩니다.
    fn purge_expired(&mut self) {
        let now = self.now;
        self.slots
            .retain(|_, slot| slot.expires_at.is_none_or(|deadline| deadline > now));
    }

    fn wrong_type() -> redis::RedisError {
        redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "WRONGTYPE Operation against a key holding the wrong kind of value",
        ))
    }

    fn hash(&self, key: &str) -> StoreResult<Option<&HashMap<String, String>>> {
        match self.slots.get(key).map(|slot| &slot.value) {
            None => Ok(None),
            Some(Value::Hash(fields)) => Ok(Some(fields)),
            Some(_) => Err(Self::wrong_type().into()),
        }
    }
}

/// 가상 시계를 가진 인메모리 백엔드
///
/// ```rust,ignore
/// let backend = MemoryBackend::new();
/// let store = TableStore::with_backend(backend.clone(), 10);
///
/// store.set_field_with_ttl("users", "key123", &user, 60).await?;
/// backend.advance(Duration::from_secs(61)).await;
/// assert!(store.get_field::<User>("users", "key123").await?.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: std::sync::Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 가상 시계를 앞으로 진행시킵니다.
    pub async fn advance(&self, by: Duration) {
        let mut state = self.state.lock().await;
        state.now += by;
        state.purge_expired();
    }

    /// 살아있는 키 개수
    pub async fn len(&self) -> usize {
        let mut state = self.state.lock().await;
        state.purge_expired();
        state.slots.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// 리스트 끝에 값을 추가합니다 (`RPUSH`).
    pub async fn push_list(&self, key: &str, item: &str) {
        self.update(key, || Value::List(Vec::new()), |value| {
            if let Value::List(items) = value {
                items.push(item.to_string());
            }
        })
        .await;
    }

    /// 셋에 멤버를 추가합니다 (`SADD`).
    pub async fn add_set_member(&self, key: &str, member: &str) {
        self.update(key, || Value::Set(BTreeSet::new()), |value| {
            if let Value::Set(members) = value {
                members.insert(member.to_string());
            }
        })
        .await;
    }

    /// 정렬 셋에 멤버를 추가합니다 (`ZADD`). 점수 오름차순을 유지합니다.
    pub async fn add_sorted_member(&self, key: &str, member: &str, score: f64) {
        self.update(key, || Value::SortedSet(Vec::new()), |value| {
            if let Value::SortedSet(members) = value {
                members.retain(|(existing, _)| existing != member);
                members.push((member.to_string(), score));
                members.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
            }
        })
        .await;
    }

    /// 덤프가 해석하지 못하는 타입의 키를 만듭니다.
    pub async fn insert_opaque(&self, key: &str, type_name: &str) {
        let mut state = self.state.lock().await;
        state.slots.insert(
            key.to_string(),
            Slot {
                value: Value::Opaque(type_name.to_string()),
                expires_at: None,
            },
        );
    }

    async fn update<I, F>(&self, key: &str, init: I, apply: F)
    where
        I: FnOnce() -> Value,
        F: FnOnce(&mut Value),
    {
        let mut state = self.state.lock().await;
        state.purge_expired();
        let slot = state.slots.entry(key.to_string()).or_insert_with(|| Slot {
            value: init(),
            expires_at: None,
        });
        apply(&mut slot.value);
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn hash_set(&self, table: &str, field: &str, payload: String) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        let slot = state.slots.entry(table.to_string()).or_insert_with(|| Slot {
            value: Value::Hash(HashMap::new()),
            expires_at: None,
        });
        match &mut slot.value {
            Value::Hash(fields) => {
                fields.insert(field.to_string(), payload);
                Ok(())
            }
            _ => Err(State::wrong_type().into()),
        }
    }

    async fn hash_get(&self, table: &str, field: &str) -> StoreResult<Option<String>> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        Ok(state.hash(table)?.and_then(|fields| fields.get(field).cloned()))
    }

    async fn hash_get_all(&self, table: &str) -> StoreResult<HashMap<String, String>> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        Ok(state.hash(table)?.cloned().unwrap_or_default())
    }

    async fn hash_del(&self, table: &str, field: &str) -> StoreResult<u64> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        let Some(slot) = state.slots.get_mut(table) else {
            return Ok(0);
        };
        let Value::Hash(fields) = &mut slot.value else {
            return Err(State::wrong_type().into());
        };
        let removed = fields.remove(field).is_some();
        // Redis는 비어버린 해시를 키째로 제거합니다.
        if fields.is_empty() {
            state.slots.remove(table);
        }
        Ok(u64::from(removed))
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        match state.slots.get(key).map(|slot| &slot.value) {
            None => Ok(None),
            Some(Value::Text(text)) => Ok(Some(text.clone())),
            Some(_) => Err(State::wrong_type().into()),
        }
    }

    async fn set(&self, key: &str, payload: String, ttl_seconds: Option<u64>) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        let now = state.now;
        // 아주 큰 TTL은 Duration::MAX에서 멈춥니다.
        let expires_at =
            ttl_seconds.map(|seconds| now.saturating_add(Duration::from_secs(seconds)));
        state.slots.insert(
            key.to_string(),
            Slot {
                value: Value::Text(payload),
                expires_at,
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> StoreResult<u64> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        Ok(u64::from(state.slots.remove(key).is_some()))
    }

    async fn expire(&self, key: &str, seconds: u64) -> StoreResult<bool> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        let deadline = state.now.saturating_add(Duration::from_secs(seconds));
        match state.slots.get_mut(key) {
            Some(slot) => {
                slot.expires_at = Some(deadline);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn persist(&self, key: &str) -> StoreResult<bool> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        Ok(state
            .slots
            .get_mut(key)
            .and_then(|slot| slot.expires_at.take())
            .is_some())
    }

    async fn ttl(&self, key: &str) -> StoreResult<KeyTtl> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        let now = state.now;
        Ok(match state.slots.get(key) {
            None => KeyTtl::Missing,
            Some(Slot { expires_at: None, .. }) => KeyTtl::Persistent,
            Some(Slot {
                expires_at: Some(deadline),
                ..
            }) => KeyTtl::Expires(deadline.saturating_sub(now).as_secs()),
        })
    }

    async fn scan(
        &self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> StoreResult<(u64, Vec<String>)> {
        let mut state = self.state.lock().await;
        state.purge_expired();

        // 커서는 정렬된 키 목록에서의 위치입니다. COUNT만큼 훑고 일치하는 키만 돌려줍니다.
        let start = usize::try_from(cursor).unwrap_or(usize::MAX);
        let count = count.max(1);
        let batch: Vec<String> = state
            .slots
            .keys()
            .skip(start)
            .take(count)
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect();

        let end = start.saturating_add(count);
        let next = if end >= state.slots.len() { 0 } else { end as u64 };
        Ok((next, batch))
    }

    async fn key_type(&self, key: &str) -> StoreResult<String> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        Ok(state
            .slots
            .get(key)
            .map(|slot| slot.value.type_name().to_string())
            .unwrap_or_else(|| "none".to_string()))
    }

    async fn list_range(&self, key: &str) -> StoreResult<Vec<String>> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        match state.slots.get(key).map(|slot| &slot.value) {
            None => Ok(Vec::new()),
            Some(Value::List(items)) => Ok(items.clone()),
            Some(_) => Err(State::wrong_type().into()),
        }
    }

    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        match state.slots.get(key).map(|slot| &slot.value) {
            None => Ok(Vec::new()),
            Some(Value::Set(members)) => Ok(members.iter().cloned().collect()),
            Some(_) => Err(State::wrong_type().into()),
        }
    }

    async fn sorted_set_range(&self, key: &str) -> StoreResult<Vec<(String, f64)>> {
        let mut state = self.state.lock().await;
        state.purge_expired();
        match state.slots.get(key).map(|slot| &slot.value) {
            None => Ok(Vec::new()),
            Some(Value::SortedSet(members)) => Ok(members.clone()),
            Some(_) => Err(State::wrong_type().into()),
        }
    }
}
