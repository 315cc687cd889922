//! # Redis 백엔드 구현
//!
//! [`StoreBackend`]의 운영용 구현입니다.
//!
//! ## 연결 관리
//!
//! 생성 시점에 `ConnectionManager` 하나를 만들고 인스턴스 수명 동안 재사용합니다.
//! `ConnectionManager`는 단일 멀티플렉싱 연결 위에서 동시 요청을 처리하며,
//! 연결이 끊기면 기본 정책대로 재연결합니다. 어댑터는 별도의 재시도를 하지 않습니다.

use super::backend::{KeyTtl, StoreBackend};
use crate::config::RedisConfig;
use crate::errors::StoreResult;
use async_trait::async_trait;
use log::{error, info};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use std::collections::HashMap;

/// Redis 백엔드
///
/// `ConnectionManager`는 복제 비용이 작은 핸들이므로 명령마다 복제해서 사용합니다.
///
/// ```rust,ignore
/// let backend = RedisBackend::connect(&RedisConfig::from_env()).await?;
/// backend.hash_set("users", "key123", "{\"age\":30}".to_string()).await?;
/// ```
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    /// 설정에 따라 Redis에 연결합니다.
    ///
    /// 연결 직후 `PING`으로 서버 가용성을 확인합니다.
    /// 성공과 실패는 모두 로그로만 알립니다.
    ///
    /// ## 에러 케이스
    ///
    /// - Redis 서버에 연결할 수 없는 경우
    /// - 인증 실패
    pub async fn connect(config: &RedisConfig) -> StoreResult<Self> {
        let client = Client::open(config.connection_url()).inspect_err(|e| {
            error!("❌ Redis 클라이언트 생성 실패: {}", e);
        })?;

        let conn = ConnectionManager::new(client).await.inspect_err(|e| {
            error!("❌ Redis 연결 실패 ({}:{}): {}", config.host, config.port, e);
        })?;

        let backend = Self { conn };
        backend.ping().await.inspect_err(|e| {
            error!("❌ Redis PING 실패: {}", e);
        })?;

        info!("✅ Redis 연결 성공: {}:{}", config.host, config.port);
        Ok(backend)
    }
}

#[async_trait]
impl StoreBackend for RedisBackend {
    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        redis::cmd("PING").query_async::<()>(&mut conn).await?;
        Ok(())
    }

    async fn hash_set(&self, table: &str, field: &str, payload: String) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.hset::<_, _, _, ()>(table, field, payload).await?;
        Ok(())
    }

    async fn hash_get(&self, table: &str, field: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.hget(table, field).await?)
    }

    async fn hash_get_all(&self, table: &str) -> StoreResult<HashMap<String, String>> {
        let mut conn = self.conn.clone();
        Ok(conn.hgetall(table).await?)
    }

    async fn hash_del(&self, table: &str, field: &str) -> StoreResult<u64> {
        let mut conn = self.conn.clone();
        Ok(conn.hdel(table, field).await?)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.get(key).await?)
    }

    async fn set(&self, key: &str, payload: String, ttl_seconds: Option<u64>) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        match ttl_seconds {
            Some(seconds) => conn.set_ex::<_, _, ()>(key, payload, seconds).await?,
            None => conn.set::<_, _, ()>(key, payload).await?,
        }
        Ok(())
    }

    async fn del(&self, key: &str) -> StoreResult<u64> {
        let mut conn = self.conn.clone();
        Ok(conn.del(key).await?)
    }

    async fn expire(&self, key: &str, seconds: u64) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
        Ok(conn.expire(key, seconds).await?)
    }

    async fn persist(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        Ok(conn.persist(key).await?)
    }

    async fn ttl(&self, key: &str) -> StoreResult<KeyTtl> {
        let mut conn = self.conn.clone();
        let reply: i64 = conn.ttl(key).await?;
        Ok(KeyTtl::from_reply(reply))
    }

    async fn scan(
        &self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> StoreResult<(u64, Vec<String>)> {
        let mut conn = self.conn.clone();
        let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(count)
            .query_async(&mut conn)
            .await?;
        Ok((next, keys))
    }

    async fn key_type(&self, key: &str) -> StoreResult<String> {
        let mut conn = self.conn.clone();
        Ok(redis::cmd("TYPE").arg(key).query_async(&mut conn).await?)
    }

    async fn list_range(&self, key: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.lrange(key, 0, -1).await?)
    }

    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.smembers(key).await?)
    }

    async fn sorted_set_range(&self, key: &str) -> StoreResult<Vec<(String, f64)>> {
        let mut conn = self.conn.clone();
        Ok(conn.zrange_withscores(key, 0, -1).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connect() -> RedisBackend {
        RedisBackend::connect(&RedisConfig::from_env())
            .await
            .expect("Failed to connect to Redis")
    }

    #[tokio::test]
    #[ignore = "Requires Redis connection"]
    async fn test_redis_backend_hash_operations() {
        let backend = connect().await;
        let table = "table_store:test:hash";
        backend.del(table).await.unwrap();

        backend.hash_set(table, "a", "1".to_string()).await.unwrap();
        assert_eq!(backend.hash_get(table, "a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(backend.hash_get_all(table).await.unwrap().len(), 1);
        assert_eq!(backend.key_type(table).await.unwrap(), "hash");

        assert_eq!(backend.hash_del(table, "a").await.unwrap(), 1);
        assert_eq!(backend.hash_del(table, "a").await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "Requires Redis connection"]
    async fn test_redis_backend_ttl_and_scan() {
        let backend = connect().await;
        let key = "table_store:test:ttl-1";

        backend.set(key, "v".to_string(), Some(60)).await.unwrap();
        assert!(matches!(backend.ttl(key).await.unwrap(), KeyTtl::Expires(_)));
        assert!(backend.persist(key).await.unwrap());
        assert_eq!(backend.ttl(key).await.unwrap(), KeyTtl::Persistent);

        let mut cursor = 0;
        let mut found = Vec::new();
        loop {
            let (next, keys) = backend.scan(cursor, "table_store:test:ttl-*", 10).await.unwrap();
            found.extend(keys);
            if next == 0 {
                break;
            }
            cursor = next;
        }
        assert!(found.iter().any(|k| k == key));

        assert_eq!(backend.del(key).await.unwrap(), 1);
        assert_eq!(backend.ttl(key).await.unwrap(), KeyTtl::Missing);
    }
}
