#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono_tz::Tz;
use course_sync::config::DatabaseConfig;
use course_sync::entity::questions;
use course_sync::models::courses::entities::{CourseInfo, CourseInstance};
use course_sync::models::disk::DiskAssessment;
use course_sync::services::AssessmentReconciler;
use course_sync::storage::sea_orm_storage::SeaOrmStorage;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;

pub const COURSE_ID: i64 = 1;
pub const COURSE_INSTANCE_ID: i64 = 10;

pub async fn memory_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect(&config)
        .await
        .expect("Failed to create in-memory storage")
}

/// 向题库写入题目，返回 QID → 题目 ID
pub async fn seed_questions(
    storage: &SeaOrmStorage,
    course_id: i64,
    qids: &[&str],
) -> HashMap<String, i64> {
    let mut ids = HashMap::new();
    for qid in qids {
        let model = questions::ActiveModel {
            course_id: Set(course_id),
            qid: Set(qid.to_string()),
            title: Set(Some(format!("Question {qid}"))),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(storage.connection())
        .await
        .expect("Failed to seed question");
        ids.insert(qid.to_string(), model.id);
    }
    ids
}

pub fn reconciler(storage: &SeaOrmStorage) -> AssessmentReconciler {
    AssessmentReconciler::new(Arc::new(storage.clone()), Tz::America__Chicago)
}

pub fn course() -> CourseInfo {
    CourseInfo {
        course_id: COURSE_ID,
    }
}

pub fn assessment(value: Value) -> DiskAssessment {
    serde_json::from_value(value).expect("Invalid assessment fixture")
}

pub fn course_instance(
    course_instance_id: i64,
    assessments: Vec<(&str, DiskAssessment)>,
) -> CourseInstance {
    CourseInstance {
        course_instance_id,
        assessments: assessments
            .into_iter()
            .map(|(tid, a)| (tid.to_string(), a))
            .collect::<BTreeMap<_, _>>(),
    }
}
