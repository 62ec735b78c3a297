use dotenv::dotenv;
use human_panic::setup_panic;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

// 从 lib.rs 导入模块
use course_sync::config::AppConfig;
use course_sync::errors::SyncError;
use course_sync::runtime::lifetime;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    // 记录程序启动时间
    let start_datetime = chrono::Utc::now();

    // 初始化配置
    setup_panic!();
    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    // 打印信息
    warn!(
        "Starting course sync...
        Project: {}
        Version: {}
        Course: {}
        Course instance: {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.sync.course_id,
        config.sync.course_instance_id,
        config.sync.course_instance_path
    );

    let startup = match lifetime::startup::prepare_sync_startup(config).await {
        Ok(startup) => startup,
        Err(e) => {
            report_failure(&e);
            return ExitCode::FAILURE;
        }
    };

    let report = match startup
        .reconciler
        .sync(&startup.course, &startup.course_instance)
        .await
    {
        Ok(report) => report,
        Err(e) => {
            report_failure(&e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Synced {} assessment(s), {} access rule(s), {} zone(s), {} assessment question(s)",
        report.assessments, report.access_rules, report.zones, report.assessment_questions
    );
    info!(
        "Pruned {} assessment(s), {} assessment question(s), {} access rule(s), {} zone(s)",
        report.soft_deleted_assessments,
        report.soft_deleted_assessment_questions,
        report.deleted_access_rules,
        report.deleted_zones
    );

    match startup
        .storage
        .list_assessments(startup.course_instance.course_instance_id)
        .await
    {
        Ok(active) => debug!(
            "Active assessments: {}",
            active
                .iter()
                .map(|a| a.tid.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Err(e) => warn!("Failed to list active assessments: {}", e),
    }

    // 输出耗时
    info!(
        "Sync completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(start_datetime)
            .num_milliseconds()
    );

    ExitCode::SUCCESS
}

fn report_failure(err: &SyncError) {
    error!("Sync aborted: {}", err);

    #[cfg(debug_assertions)]
    eprintln!("{}", err.format_colored());
}
