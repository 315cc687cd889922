//! 테이블 스토어 에러 시스템
//!
//! 어댑터가 만들어낼 수 있는 에러는 두 종류뿐입니다.
//!
//! | StoreError | 발생 시나리오 |
//! |------------|---------------|
//! | `ConnectionError` | Redis 서버에 연결할 수 없거나 명령이 거부됨 |
//! | `DecodeError` | 저장된 페이로드가 기대한 JSON 형식이 아님 |
//!
//! 어떤 에러도 재시도하지 않으며 호출자에게 그대로 전달됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use table_store::errors::StoreError;
//!
//! match store.get_field::<User>("users", "key123").await {
//!     Ok(Some(user)) => println!("{:?}", user),
//!     Ok(None) => println!("없음"),
//!     Err(StoreError::DecodeError { location, source }) => {
//!         eprintln!("깨진 페이로드 {}: {}", location, source)
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```

use thiserror::Error;

/// 테이블 스토어 에러 타입
#[derive(Error, Debug)]
pub enum StoreError {
    /// Redis 연결 또는 명령 실패
    ///
    /// 서버 미가동, 인증 실패, `WRONGTYPE` 등 Redis가 반환한 모든 오류가
    /// 여기에 해당합니다.
    #[error("Connection error: {0}")]
    ConnectionError(#[from] redis::RedisError),

    /// JSON 디코딩 실패
    ///
    /// 저장된 값이 올바른 JSON이 아니거나 요청한 타입과 맞지 않을 때 발생합니다.
    /// 쓰기 시점의 JSON 인코딩 실패(예: 문자열이 아닌 키를 가진 맵)도
    /// 이 변형으로 보고됩니다.
    ///
    /// `location`은 문제의 값이 있던 위치입니다 (예: `users[key123]`, `orders-1001`).
    #[error("Decode error at '{location}': {source}")]
    DecodeError {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<serde_json::Error> for StoreError {
    /// 위치 정보 없이 변환합니다. 쓰기 시점의 인코딩 실패에 사용됩니다.
    fn from(source: serde_json::Error) -> Self {
        StoreError::DecodeError {
            location: "<value>".to_string(),
            source,
        }
    }
}

impl StoreError {
    /// 위치 정보를 담은 디코딩 에러를 만듭니다.
    pub fn decode(location: impl Into<String>, source: serde_json::Error) -> Self {
        StoreError::DecodeError {
            location: location.into(),
            source,
        }
    }

    /// 연결 계층 에러인지 확인합니다.
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::ConnectionError(_))
    }

    /// 페이로드 디코딩 에러인지 확인합니다.
    pub fn is_decode(&self) -> bool {
        matches!(self, StoreError::DecodeError { .. })
    }

    /// Redis가 `WRONGTYPE`으로 명령을 거부했는지 확인합니다.
    ///
    /// 서버 응답은 `WRONGTYPE` 코드로, 클라이언트 측 타입 불일치는 `TypeError`로 옵니다.
    pub fn is_wrong_type(&self) -> bool {
        match self {
            StoreError::ConnectionError(e) => {
                e.code() == Some("WRONGTYPE") || e.kind() == redis::ErrorKind::TypeError
            }
            StoreError::DecodeError { .. } => false,
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_from_serde() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let error: StoreError = parse.unwrap_err().into();

        assert!(error.is_decode());
        assert!(!error.is_connection());
        assert!(error.to_string().starts_with("Decode error at '<value>':"));
    }

    #[test]
    fn test_decode_error_names_location() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = StoreError::decode("users[broken_field]", source);

        assert!(error.is_decode());
        assert!(error.to_string().contains("users[broken_field]"));
    }

    #[test]
    fn test_connection_error_from_redis() {
        let redis_error =
            redis::RedisError::from((redis::ErrorKind::IoError, "connection refused"));
        let error: StoreError = redis_error.into();

        assert!(error.is_connection());
        assert!(!error.is_wrong_type());
        assert!(error.to_string().contains("connection refused"));
    }
}
