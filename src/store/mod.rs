//! 테이블 스토어 모듈
//!
//! Redis를 백엔드로 하는 "테이블 + 키" 어댑터와 그 구성 요소를 제공합니다.
//!
//! # 주요 기능
//!
//! - 해시 기반 테이블 CRUD와 테이블 단위 TTL
//! - `table-key` 복합 키 엔트리 CRUD와 엔트리 단위 TTL
//! - 커서 기반 SCAN 패턴 조회
//! - 타입별 디버그 덤프
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use table_store::store::{StoreValue, TableStore};
//!
//! let store = TableStore::connect(&RedisConfig::from_env()).await?;
//! store.set_field_with_ttl("sessions", "abc", &session, 3600).await?;
//! store.set_entry("orders", "1001", &StoreValue::structured(&order)?, Some(600)).await?;
//!
//! let orders: HashMap<String, Order> = store.scan_entries("orders", "*").await?;
//! ```

pub mod backend;
pub mod dump;
pub mod keys;
pub mod memory;
pub mod redis;
pub mod table_store;
pub mod value;

pub use backend::{KeyTtl, StoreBackend};
pub use dump::DumpEntry;
pub use memory::MemoryBackend;
pub use self::redis::RedisBackend;
pub use table_store::TableStore;
pub use value::StoreValue;
