use serde_json::Value;
use tracing::{info, warn};

use super::{AssessmentReconciler, derive_zone_list};
use crate::errors::Result;
use crate::models::assessments::requests::UpsertAssessmentRequest;
use crate::models::courses::entities::{CourseInfo, CourseInstance};
use crate::models::disk::DiskAssessment;
use crate::models::sync::responses::SyncReport;
use crate::utils::is_truthy;

pub async fn sync(
    reconciler: &AssessmentReconciler,
    course: &CourseInfo,
    course_instance: &CourseInstance,
) -> Result<SyncReport> {
    let storage = reconciler.storage();
    let course_instance_id = course_instance.course_instance_id;

    let mut report = SyncReport::default();
    let mut assessment_ids = Vec::with_capacity(course_instance.assessments.len());

    for (tid, assessment) in &course_instance.assessments {
        info!("Syncing {}", tid);
        let assessment_id = sync_assessment(
            reconciler,
            course,
            course_instance_id,
            tid,
            assessment,
            &mut report,
        )
        .await
        .map_err(|e| e.context(format!("assessment {tid}")))?;
        assessment_ids.push(assessment_id);
    }
    report.assessments = assessment_ids.len();

    // 软删除磁盘上已不存在的评估
    info!("Soft-deleting unused assessments");
    report.soft_deleted_assessments = storage
        .soft_delete_unused_assessments(course_instance_id, &assessment_ids)
        .await?;

    // 软删除不属于当前评估的评估题目
    info!("Soft-deleting unused assessment questions");
    report.soft_deleted_assessment_questions = storage
        .soft_delete_unused_assessment_questions(course_instance_id, &assessment_ids)
        .await?;

    // 删除父评估已不存在的访问规则与分区
    info!("Deleting unused assessment access rules");
    report.deleted_access_rules = storage.delete_unused_access_rules().await?;

    info!("Deleting unused zones");
    report.deleted_zones = storage.delete_unused_zones().await?;

    if report.soft_deleted_assessments > 0 {
        warn!(
            "Soft-deleted {} assessment(s) no longer present on disk",
            report.soft_deleted_assessments
        );
    }

    Ok(report)
}

async fn sync_assessment(
    reconciler: &AssessmentReconciler,
    course: &CourseInfo,
    course_instance_id: i64,
    tid: &str,
    assessment: &DiskAssessment,
    report: &mut SyncReport,
) -> Result<i64> {
    let request =
        build_assessment_request(tid, assessment, course.course_id, course_instance_id);
    let assessment_id = reconciler.storage().upsert_assessment(request).await?;
    info!("Synced {} as assessment_id {}", tid, assessment_id);

    report.access_rules += reconciler
        .sync_access_rules(assessment_id, &assessment.allow_access)
        .await?;

    let zone_list = derive_zone_list(assessment.options.as_ref())?;

    report.zones += reconciler
        .sync_zones(assessment_id, &zone_list.zones)
        .await?;

    report.assessment_questions += reconciler
        .sync_assessment_questions(assessment_id, &zone_list.zones, course)
        .await?;

    Ok(assessment_id)
}

/// 由磁盘记录生成评估写入参数
pub fn build_assessment_request(
    tid: &str,
    assessment: &DiskAssessment,
    course_id: i64,
    course_instance_id: i64,
) -> UpsertAssessmentRequest {
    let options = assessment.options.as_ref();

    UpsertAssessmentRequest {
        tid: tid.to_string(),
        course_id,
        course_instance_id,
        assessment_type: assessment.assessment_type.clone(),
        number: assessment.number.clone(),
        title: assessment.title.clone(),
        config: assessment.options.clone(),
        multiple_instance: options
            .and_then(|o| o.get("multipleInstance"))
            .is_some_and(is_truthy),
        shuffle_questions: assessment
            .shuffle_questions
            .as_ref()
            .is_some_and(is_truthy),
        max_score: options.and_then(|o| o.get("maxScore")).and_then(Value::as_f64),
        set_name: assessment.set.clone(),
        text: options
            .and_then(|o| o.get("text"))
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
