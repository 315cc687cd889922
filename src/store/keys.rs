//! 복합 키 명명 규칙
//!
//! 복합 키 엔트리는 `table-key` 형태의 평범한 Redis 문자열 키입니다.
//! 해시 테이블은 테이블 이름을 그대로 Redis 키로 사용합니다.

/// 테이블 이름과 키를 잇는 구분자
pub const COMPOSITE_SEPARATOR: char = '-';

/// `table-key` 형태의 복합 키 이름을 만듭니다.
pub fn composite_key(table: &str, key: &str) -> String {
    format!("{}{}{}", table, COMPOSITE_SEPARATOR, key)
}

/// 테이블의 복합 엔트리를 찾기 위한 SCAN MATCH 패턴을 만듭니다.
///
/// 테이블 이름 부분의 glob 메타 문자는 이스케이프되고,
/// `key_pattern`은 glob 그대로 전달됩니다.
///
/// ```rust,ignore
/// assert_eq!(scan_pattern("orders", "*"), "orders-*");
/// assert_eq!(scan_pattern("a*b", "2024*"), "a\\*b-2024*");
/// ```
pub fn scan_pattern(table: &str, key_pattern: &str) -> String {
    format!("{}{}{}", escape_glob(table), COMPOSITE_SEPARATOR, key_pattern)
}

/// 복합 키에서 `table-` 접두사를 제거한 나머지를 반환합니다.
///
/// 접두사가 일치하지 않으면 `None`을 반환합니다.
pub fn strip_table_prefix<'a>(table: &str, full_key: &'a str) -> Option<&'a str> {
    full_key
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(COMPOSITE_SEPARATOR))
}

/// Redis glob 메타 문자(`* ? [ ] \`)를 백슬래시로 이스케이프합니다.
pub fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Redis `MATCH` 규칙으로 glob 패턴을 평가합니다.
///
/// `*`, `?`, `[abc]`, `[^a-z]`, `\x` 이스케이프를 지원합니다.
/// 인메모리 백엔드의 SCAN 구현에서 사용합니다.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    match_from(&pattern, &text)
}

fn match_from(pattern: &[char], text: &[char]) -> bool {
    let (mut p, mut t) = (0, 0);
    // 마지막 '*' 위치와 그때의 텍스트 위치 (백트래킹용)
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() {
            match pattern[p] {
                '*' => {
                    star = Some((p, t));
                    p += 1;
                    continue;
                }
                '?' => {
                    p += 1;
                    t += 1;
                    continue;
                }
                '[' => {
                    if let Some((matched, next)) = match_class(pattern, p, text[t]) {
                        if matched {
                            p = next;
                            t += 1;
                            continue;
                        }
                    }
                }
                '\\' if p + 1 < pattern.len() => {
                    if pattern[p + 1] == text[t] {
                        p += 2;
                        t += 1;
                        continue;
                    }
                }
                literal => {
                    if literal == text[t] {
                        p += 1;
                        t += 1;
                        continue;
                    }
                }
            }
        }

        match star {
            Some((star_p, star_t)) => {
                p = star_p + 1;
                t = star_t + 1;
                star = Some((star_p, star_t + 1));
            }
            None => return false,
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// `[...]` 문자 클래스를 평가합니다.
///
/// `(일치 여부, 클래스 다음 패턴 위치)`를 반환하며, 닫는 `]`가 없으면 `None`.
fn match_class(pattern: &[char], open: usize, ch: char) -> Option<(bool, usize)> {
    let mut i = open + 1;
    let negate = pattern.get(i) == Some(&'^');
    if negate {
        i += 1;
    }

    let mut matched = false;
    while i < pattern.len() && pattern[i] != ']' {
        let mut low = pattern[i];
        if low == '\\' && i + 1 < pattern.len() {
            i += 1;
            low = pattern[i];
        }
        if i + 2 < pattern.len() && pattern[i + 1] == '-' && pattern[i + 2] != ']' {
            let high = pattern[i + 2];
            let (lo, hi) = if low <= high { (low, high) } else { (high, low) };
            if lo <= ch && ch <= hi {
                matched = true;
            }
            i += 3;
        } else {
            if low == ch {
                matched = true;
            }
            i += 1;
        }
    }

    if i >= pattern.len() {
        return None;
    }
    Some((matched != negate, i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_key_uses_hyphen() {
        assert_eq!(composite_key("orders", "1001"), "orders-1001");
        assert_eq!(strip_table_prefix("orders", "orders-1001"), Some("1001"));
        assert_eq!(strip_table_prefix("orders", "orders:1001"), None);
        assert_eq!(strip_table_prefix("orders", "ordersX-1"), None);
    }

    #[test]
    fn test_scan_pattern_escapes_table_only() {
        assert_eq!(scan_pattern("orders", "*"), "orders-*");
        assert_eq!(scan_pattern("a*b", "2024*"), "a\\*b-2024*");
        assert_eq!(escape_glob("x[1]?\\"), "x\\[1\\]\\?\\\\");
    }

    #[test]
    fn test_glob_match_wildcards() {
        assert!(glob_match("*", ""));
        assert!(glob_match("orders-*", "orders-1"));
        assert!(glob_match("orders-*", "orders-"));
        assert!(!glob_match("orders-*", "order-1"));
        assert!(glob_match("h?llo", "hello"));
        assert!(!glob_match("h?llo", "hllo"));
        assert!(glob_match("*-2024-*", "sales-2024-q1"));
    }

    #[test]
    fn test_glob_match_classes_and_escapes() {
        assert!(glob_match("h[ae]llo", "hallo"));
        assert!(!glob_match("h[ae]llo", "hillo"));
        assert!(glob_match("h[^e]llo", "hallo"));
        assert!(!glob_match("h[^e]llo", "hello"));
        assert!(glob_match("k[a-c]", "kb"));
        assert!(glob_match("a\\*b-*", "a*b-1"));
        assert!(!glob_match("a\\*b-*", "axxb-1"));
    }
}
