//! 터미널 출력 포맷팅 유틸리티
//!
//! 데모 바이너리에서 사용하는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 덤프 결과 등을 시각적으로 표현합니다.

use crate::store::DumpEntry;
use std::collections::BTreeMap;

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// 텍스트는 자동으로 중앙 정렬됩니다.
///
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                 Table Store Demo                 ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    // 고정 너비 50칸 사용 (박스 내부 콘텐츠)
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Writing users/key123
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 표시합니다
///
/// ```text
/// ✓ Step 2: Read table users (1 items)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 서브 작업의 상태를 표시합니다
///
/// ```text
///    ├─ key123: {"age":30,"name":"John"}
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 덤프 한 줄을 만듭니다.
pub fn format_dump_line(key: &str, entry: &DumpEntry) -> String {
    format!("{} => {}", key, entry)
}

/// 디버그 덤프 전체를 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                    Store Dump                    ║
/// ╚══════════════════════════════════════════════════╝
///    ├─ flags-beta => [string] "on"
///    ├─ users => [hash] {"key123":"{\"age\":30}"}
/// ```
pub fn print_dump(dump: &BTreeMap<String, DumpEntry>) {
    print_boxed_title("Store Dump");
    if dump.is_empty() {
        println!("   (empty)");
    }
    for (key, entry) in dump {
        println!("   ├─ {}", format_dump_line(key, entry));
    }
    println!();
}
