//! Redis 연결 설정 관리 모듈
//!
//! 호스트, 포트, 비밀번호, SCAN 배치 크기를 관리합니다.

use log::warn;
use std::env;

/// 기본 Redis 호스트
pub const DEFAULT_HOST: &str = "localhost";

/// 기본 Redis 포트
pub const DEFAULT_PORT: u16 = 6379;

/// 기본 SCAN COUNT 힌트
pub const DEFAULT_SCAN_COUNT: usize = 100;

/// 생성 시 명시적으로 전달하는 연결 옵션
///
/// `None`인 항목은 환경 변수, 그다음 기본값으로 채워집니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedisOptions {
    /// 접속 호스트
    pub host: Option<String>,
    /// 접속 포트
    pub port: Option<u16>,
    /// 인증 비밀번호
    pub password: Option<String>,
}

/// 최종 결정된 Redis 연결 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    /// 커서 기반 SCAN 한 번에 요청할 키 개수 힌트
    pub scan_count: usize,
}

impl RedisConfig {
    /// 환경 변수와 기본값만으로 설정을 만듭니다.
    pub fn from_env() -> Self {
        Self::resolve(RedisOptions::default())
    }

    /// 옵션 → 환경 변수 → 기본값 순서로 설정을 결정합니다.
    ///
    /// # Environment Variables
    ///
    /// - `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_SCAN_COUNT`
    ///
    /// 빈 문자열인 환경 변수는 설정되지 않은 것으로 취급합니다.
    pub fn resolve(options: RedisOptions) -> Self {
        Self::resolve_with(options, |name| env::var(name).ok())
    }

    /// 환경 조회 함수를 주입받아 설정을 결정합니다.
    ///
    /// 테스트에서 프로세스 환경을 건드리지 않기 위해 사용합니다.
    pub fn resolve_with<F>(options: RedisOptions, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host = options
            .host
            .or_else(|| lookup("REDIS_HOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = options.port.unwrap_or_else(|| match lookup("REDIS_PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|e| {
                warn!("REDIS_PORT 파싱 실패: {}. 기본값 {} 사용", e, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        });

        let password = options.password.or_else(|| lookup("REDIS_PASSWORD"));

        let scan_count = match lookup("REDIS_SCAN_COUNT") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(count) if count > 0 => count,
                _ => {
                    warn!(
                        "REDIS_SCAN_COUNT 값 '{}'이(가) 올바르지 않습니다. 기본값 {} 사용",
                        raw, DEFAULT_SCAN_COUNT
                    );
                    DEFAULT_SCAN_COUNT
                }
            },
            None => DEFAULT_SCAN_COUNT,
        };

        Self {
            host,
            port,
            password,
            scan_count,
        }
    }

    /// `redis::Client::open`에 넘길 연결 URL을 만듭니다.
    ///
    /// 비밀번호는 URL 인코딩됩니다.
    ///
    /// ```text
    /// redis://localhost:6379/
    /// redis://:p%40ss@localhost:6379/
    /// ```
    pub fn connection_url(&self) -> String {
        match &self.password {
            Some(password) => format!(
                "redis://:{}@{}:{}/",
                urlencoding::encode(password),
                self.host,
                self.port
            ),
            None => format!("redis://{}:{}/", self.host, self.port),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            password: None,
            scan_count: DEFAULT_SCAN_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = RedisConfig::resolve_with(RedisOptions::default(), lookup_from(&[]));

        assert_eq!(config, RedisConfig::default());
        assert_eq!(config.connection_url(), "redis://localhost:6379/");
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = RedisConfig::resolve_with(
            RedisOptions::default(),
            lookup_from(&[
                ("REDIS_HOST", "cache.internal"),
                ("REDIS_PORT", "6380"),
                ("REDIS_PASSWORD", "s3cret"),
                ("REDIS_SCAN_COUNT", "25"),
            ]),
        );

        assert_eq!(config.host, "cache.internal");
        assert_eq!(config.port, 6380);
        assert_eq!(config.password.as_deref(), Some("s3cret"));
        assert_eq!(config.scan_count, 25);
    }

    #[test]
    fn test_options_override_environment() {
        let options = RedisOptions {
            host: Some("10.0.0.5".to_string()),
            port: Some(7000),
            password: None,
        };
        let config = RedisConfig::resolve_with(
            options,
            lookup_from(&[
                ("REDIS_HOST", "ignored"),
                ("REDIS_PORT", "1"),
                ("REDIS_PASSWORD", "env-pass"),
            ]),
        );

        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, 7000);
        assert_eq!(config.password.as_deref(), Some("env-pass"));
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let config = RedisConfig::resolve_with(
            RedisOptions::default(),
            lookup_from(&[
                ("REDIS_HOST", "  "),
                ("REDIS_PORT", "not-a-port"),
                ("REDIS_SCAN_COUNT", "0"),
            ]),
        );

        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.scan_count, DEFAULT_SCAN_COUNT);
    }

    #[test]
    fn test_connection_url_encodes_password() {
        let config = RedisConfig {
            password: Some("p@ss:word".to_string()),
            ..RedisConfig::default()
        };

        assert_eq!(config.connection_url(), "redis://:p%40ss%3Aword@localhost:6379/");
    }
}
