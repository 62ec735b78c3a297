use tracing::{debug, info};

use super::{AssessmentReconciler, position};
use crate::errors::{Result, SyncError};
use crate::models::assessments::requests::UpsertAssessmentQuestionRequest;
use crate::models::courses::entities::CourseInfo;
use crate::models::disk::{DiskZone, QuestionEntry};

/// 展开后的一道评估题目
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedQuestion {
    pub qid: String,
    pub number: i32,
    pub zone_number: i32,
    pub max_points: Option<f64>,
    pub points_list: Option<Vec<f64>>,
    pub init_points: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Scoring {
    max_points: Option<f64>,
    points_list: Option<Vec<f64>>,
    init_points: Option<f64>,
}

/// 将分区 → 题目 → QID 展开为连续编号的序列
///
/// 编号在整个评估内递增，不随分区重置；一条记录含多个 QID 时共享计分参数。
pub fn plan_assessment_questions(zones: &[DiskZone]) -> Result<Vec<PlannedQuestion>> {
    let mut planned = Vec::new();

    for (zone_index, zone) in zones.iter().enumerate() {
        let zone_number = position(zone_index);
        for (question_index, entry) in zone.questions.iter().enumerate() {
            let (qids, scoring) = resolve_entry(entry).map_err(|e| {
                e.context(format!(
                    "zone {zone_number}, question {}",
                    position(question_index)
                ))
            })?;

            for qid in qids {
                planned.push(PlannedQuestion {
                    qid,
                    number: position(planned.len()),
                    zone_number,
                    max_points: scoring.max_points,
                    points_list: scoring.points_list.clone(),
                    init_points: scoring.init_points,
                });
            }
        }
    }

    Ok(planned)
}

fn resolve_entry(entry: &QuestionEntry) -> Result<(Vec<String>, Scoring)> {
    let record = match entry {
        QuestionEntry::Qid(qid) => {
            return Ok((
                vec![qid.clone()],
                Scoring {
                    max_points: Some(1.0),
                    ..Default::default()
                },
            ));
        }
        QuestionEntry::Record(record) => record,
    };

    let qids = match (&record.qids, &record.qid) {
        (Some(qids), _) => qids.clone(),
        (None, Some(qid)) => vec![qid.clone()],
        (None, None) => {
            return Err(SyncError::configuration(
                "question entry has neither qid nor qids",
            ));
        }
    };

    let scoring = if let Some(points) = &record.points {
        Scoring {
            max_points: points.iter().copied().reduce(f64::max),
            points_list: Some(points.clone()),
            init_points: None,
        }
    } else if let Some(init_value) = record.init_value {
        Scoring {
            max_points: record.max_score,
            points_list: None,
            init_points: Some(init_value),
        }
    } else {
        Scoring::default()
    };

    Ok((qids, scoring))
}

pub async fn sync_assessment_questions(
    reconciler: &AssessmentReconciler,
    assessment_id: i64,
    zones: &[DiskZone],
    course: &CourseInfo,
) -> Result<usize> {
    let storage = reconciler.storage();
    let planned = plan_assessment_questions(zones)?;
    let mut assessment_question_ids = Vec::with_capacity(planned.len());

    for question in planned {
        let question_id = storage
            .get_question_id_by_qid(course.course_id, &question.qid)
            .await?
            .ok_or_else(|| SyncError::invalid_qid(format!("invalid QID: \"{}\"", question.qid)))?;

        debug!(
            "Syncing assessment question number {} with QID {}",
            question.number, question.qid
        );
        let assessment_question_id = storage
            .upsert_assessment_question(UpsertAssessmentQuestionRequest {
                assessment_id,
                question_id,
                number: question.number,
                zone_number: question.zone_number,
                max_points: question.max_points,
                points_list: question.points_list,
                init_points: question.init_points,
            })
            .await?;
        assessment_question_ids.push(assessment_question_id);
    }

    info!("Soft-deleting unused assessment questions for current assessment");
    storage
        .soft_delete_unused_assessment_questions_in_assessment(
            assessment_id,
            &assessment_question_ids,
        )
        .await?;

    Ok(assessment_question_ids.len())
}
