//! 课程实例目录加载
//!
//! 目录结构为 `<course_instance>/assessments/<TID>/infoAssessment.json`，
//! 子目录名即评估的 TID。

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{Result, SyncError};
use crate::models::courses::entities::CourseInstance;
use crate::models::disk::DiskAssessment;

pub const ASSESSMENTS_DIR: &str = "assessments";
pub const ASSESSMENT_INFO_FILE: &str = "infoAssessment.json";

/// 读取课程实例目录下的全部评估定义
pub fn load_course_instance(
    course_instance_id: i64,
    path: impl AsRef<Path>,
) -> Result<CourseInstance> {
    let assessments_dir = path.as_ref().join(ASSESSMENTS_DIR);
    let entries = fs::read_dir(&assessments_dir).map_err(|e| {
        SyncError::file_operation(format!(
            "无法读取评估目录 {}: {e}",
            assessments_dir.display()
        ))
    })?;

    let mut assessments = BTreeMap::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let info_path = entry.path().join(ASSESSMENT_INFO_FILE);
        if !info_path.is_file() {
            debug!(
                "Skipping {}: no {}",
                entry.path().display(),
                ASSESSMENT_INFO_FILE
            );
            continue;
        }

        let tid = entry.file_name().to_string_lossy().into_owned();
        let assessment = read_assessment(&info_path)?;
        assessments.insert(tid, assessment);
    }

    info!(
        "Loaded {} assessment(s) from {}",
        assessments.len(),
        assessments_dir.display()
    );

    Ok(CourseInstance {
        course_instance_id,
        assessments,
    })
}

fn read_assessment(info_path: &Path) -> Result<DiskAssessment> {
    let raw = fs::read_to_string(info_path).map_err(|e| {
        SyncError::file_operation(format!("无法读取 {}: {e}", info_path.display()))
    })?;

    serde_json::from_str(&raw)
        .map_err(|e| SyncError::serialization(format!("{}: {e}", info_path.display())))
}
