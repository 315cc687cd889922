//! # Configuration Module
//!
//! Redis 연결 설정을 담당하는 모듈입니다.
//!
//! 각 설정값은 다음 순서로 결정됩니다.
//!
//! 1. 생성 시 명시적으로 넘긴 옵션 ([`RedisOptions`])
//! 2. 환경 변수
//! 3. 하드코딩된 기본값
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export REDIS_HOST="localhost"     # 기본값: localhost
//! export REDIS_PORT="6379"          # 기본값: 6379
//! export REDIS_PASSWORD="secret"    # 기본값: 없음
//! export REDIS_SCAN_COUNT="100"     # SCAN COUNT 힌트, 기본값: 100
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use table_store::config::{RedisConfig, RedisOptions};
//!
//! // 환경 변수와 기본값만 사용
//! let config = RedisConfig::from_env();
//!
//! // 호스트만 직접 지정
//! let config = RedisConfig::resolve(RedisOptions {
//!     host: Some("10.0.0.5".to_string()),
//!     ..Default::default()
//! });
//! ```

pub mod redis_config;

pub use redis_config::*;
