use crate::config::AppConfig;
use crate::errors::{Result, SyncError};
use crate::models::courses::entities::{CourseInfo, CourseInstance};
use crate::services::AssessmentReconciler;
use crate::services::disk::load_course_instance;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub reconciler: AssessmentReconciler,
    pub course: CourseInfo,
    pub course_instance: CourseInstance,
}

/// 准备同步运行的上下文
/// 包括存储、磁盘上的课程实例与同步器
pub async fn prepare_sync_startup(config: &AppConfig) -> Result<StartupContext> {
    let timezone = config
        .timezone()
        .map_err(|e| SyncError::configuration(e.to_string()))?;
    debug!("Using timezone {} for access rule dates", timezone);

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let course_instance = load_course_instance(
        config.sync.course_instance_id,
        &config.sync.course_instance_path,
    )?;

    let reconciler = AssessmentReconciler::new(storage.clone(), timezone);

    Ok(StartupContext {
        storage,
        reconciler,
        course: CourseInfo {
            course_id: config.sync.course_id,
        },
        course_instance,
    })
}
