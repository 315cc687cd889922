//! 테이블 스토어 데모 애플리케이션
//!
//! Redis에 연결해 테이블 CRUD 시나리오를 실행하고 저장소 덤프를 출력합니다.

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use serde_json::{Value, json};
use std::collections::HashMap;
use table_store::utils::display_terminal::{
    print_boxed_title, print_dump, print_step_complete, print_step_start, print_sub_task,
};
use table_store::{RedisConfig, StoreResult, TableStore};

const DEMO_TABLE: &str = "users";
const DEMO_KEY: &str = "key123";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    print_boxed_title("Table Store Demo");

    let config = RedisConfig::from_env();
    info!("📡 Redis 연결 중... ({}:{})", config.host, config.port);

    let store = TableStore::connect(&config).await.inspect_err(|e| {
        error!("Redis 연결 실패: {}", e);
    })?;

    run_scenario(&store).await?;
    print_dump(&store.dump().await?);

    Ok(())
}

/// `users` 테이블에 필드를 쓰고, 읽고, 지우는 시나리오를 실행합니다
async fn run_scenario(store: &TableStore) -> StoreResult<()> {
    print_step_start(1, &format!("Writing {}/{}", DEMO_TABLE, DEMO_KEY));
    store
        .set_field(DEMO_TABLE, DEMO_KEY, &json!({"name": "John", "age": 30}))
        .await?;

    let users: HashMap<String, Value> = store.get_all(DEMO_TABLE).await?;
    print_step_complete(2, &format!("Read table {}", DEMO_TABLE), users.len());
    for (key, value) in &users {
        print_sub_task(key, &value.to_string());
    }

    let removed = store.delete_field(DEMO_TABLE, DEMO_KEY).await?;
    print_step_complete(3, &format!("Deleted {}/{}", DEMO_TABLE, DEMO_KEY), removed as usize);

    let users: HashMap<String, Value> = store.get_all(DEMO_TABLE).await?;
    print_step_complete(4, &format!("Read table {} again", DEMO_TABLE), users.len());

    Ok(())
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info")
///
/// ```bash
/// RUST_LOG=table_store=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
}
