//! 테이블 스토어
//!
//! Redis 위에 "테이블 + 키" 형태의 단순한 저장 어휘를 제공하는 얇은 어댑터입니다.
//! 모든 연산은 Redis 명령 하나(HSET, HGET, HDEL, EXPIRE, PERSIST, GET, SET, DEL)
//! 또는 SCAN 커서 루프로 위임되며, 구조화된 값은 JSON으로 직렬화됩니다.
//!
//! # Features
//!
//! - **테이블**: Redis 해시 하나 = 테이블 하나, 필드 값은 JSON
//! - **복합 키 엔트리**: `table-key` 문자열 키, 엔트리별 TTL 지원
//! - **TTL 관리**: 설정, 해제, 조회
//! - **패턴 조회**: 블로킹 없는 SCAN 기반
//! - **디버그 덤프**: 타입 태그가 붙은 전체 키스페이스 출력
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   TableStore    │ ← 테이블/복합 키 어휘, JSON 인코딩
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  StoreBackend   │ ← Redis 명령 집합
//! └─────────────────┘
//!      │        │
//!      ▼        ▼
//! ┌────────┐ ┌────────┐
//! │ Redis  │ │ Memory │ ← 운영 / 테스트
//! └────────┘ └────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use table_store::{RedisConfig, TableStore};
//! use serde_json::json;
//!
//! let store = TableStore::connect(&RedisConfig::from_env()).await?;
//!
//! store.set_field("users", "key123", &json!({"name": "John", "age": 30})).await?;
//! let users: HashMap<String, serde_json::Value> = store.get_all("users").await?;
//! ```

pub mod config;
pub mod errors;
pub mod store;
pub mod utils;

pub use config::{RedisConfig, RedisOptions};
pub use errors::{StoreError, StoreResult};
pub use store::{DumpEntry, KeyTtl, StoreValue, TableStore};
