//! Bookr - 图书书评目录服务
//!
//! - Domain: catalog/, review/ (Bounded Contexts)
//! - Application: forms, commands, queries, ports
//! - Infrastructure: http, memory, persistence, adapters, events

use std::sync::Arc;

use bookr::application::PublisherMailerPort;
use bookr::config::{load_config, print_config, AppConfig};
use bookr::infrastructure::adapters::{HttpMailClient, HttpMailClientConfig, LogMailer};
use bookr::infrastructure::events::EventPublisher;
use bookr::infrastructure::http::{AppState, HttpServer, ServerConfig};
use bookr::infrastructure::memory::InMemoryFlashStore;
use bookr::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteBookRepository,
    SqliteContributorRepository, SqlitePublisherRepository, SqliteReviewRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Bookr - 图书书评目录服务");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let publisher_repo = Arc::new(SqlitePublisherRepository::new(pool.clone()));
    let book_repo = Arc::new(SqliteBookRepository::new(pool.clone()));
    let contributor_repo = Arc::new(SqliteContributorRepository::new(pool.clone()));
    let review_repo = Arc::new(SqliteReviewRepository::new(pool.clone()));

    // 出版社通知邮件：未配置 webhook 时只记录日志
    let mailer: Arc<dyn PublisherMailerPort> = match &config.mail.webhook_url {
        Some(url) => {
            let mail_config = HttpMailClientConfig {
                webhook_url: url.clone(),
                from_address: config.mail.from_address.clone(),
                timeout_secs: config.mail.timeout_secs,
                max_retries: config.mail.max_retries,
                retry_backoff_ms: config.mail.retry_backoff_ms,
            };
            Arc::new(HttpMailClient::new(mail_config)?)
        }
        None => Arc::new(LogMailer::new()),
    };

    let event_publisher = EventPublisher::new().arc();
    let flash_store =
        InMemoryFlashStore::with_limits(config.flash.ttl_secs, config.flash.max_keys).arc();

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(
        publisher_repo,
        book_repo,
        contributor_repo,
        review_repo,
        flash_store,
        mailer,
        event_publisher,
    );

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志（RUST_LOG 优先于配置中的级别）
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},bookr={},tower_http=debug,sqlx=warn",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
