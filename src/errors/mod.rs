//! 에러 타입 모듈
//!
//! 테이블 스토어 어댑터가 반환하는 에러 타입과 `Result` 별칭을 제공합니다.

pub mod errors;

pub use errors::{StoreError, StoreResult};
