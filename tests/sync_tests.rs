mod common;

use common::{COURSE_INSTANCE_ID, assessment, course, course_instance, memory_storage, reconciler, seed_questions};
use course_sync::entity::assessment_questions;
use course_sync::storage::Storage;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;

fn homework(options: serde_json::Value) -> course_sync::models::disk::DiskAssessment {
    assessment(json!({
        "type": "Homework",
        "number": "1",
        "title": "Vectors",
        "set": "Homework",
        "options": options
    }))
}

#[tokio::test]
async fn test_sync_writes_assessment_tree() {
    let storage = memory_storage().await;
    let qids = seed_questions(&storage, common::COURSE_ID, &["q1", "q2", "q3", "q4"]).await;

    let exam = assessment(json!({
        "type": "Exam",
        "number": "2",
        "title": "Midterm",
        "set": "Exam",
        "shuffleQuestions": true,
        "allowAccess": [
            {"mode": "Exam", "credit": 100, "startDate": "2015-01-19T00:00:01", "endDate": "2015-01-19T23:59:59"},
            {"role": "TA", "uids": ["ta@example.com"]}
        ],
        "options": {
            "multipleInstance": true,
            "maxScore": 30,
            "text": "Closed book.",
            "zones": [
                {"title": "Part A", "questions": ["q1", {"qid": "q2", "points": [5, 3]}]},
                {"title": "Part B", "questions": [{"qid": "q3", "initValue": 1, "maxScore": 4}, "q4"]}
            ]
        }
    }));
    let instance = course_instance(COURSE_INSTANCE_ID, vec![("exam1", exam)]);

    let report = reconciler(&storage)
        .sync(&course(), &instance)
        .await
        .unwrap();
    assert_eq!(report.assessments, 1);
    assert_eq!(report.access_rules, 2);
    assert_eq!(report.zones, 2);
    assert_eq!(report.assessment_questions, 4);

    let assessments = storage.list_assessments(COURSE_INSTANCE_ID).await.unwrap();
    assert_eq!(assessments.len(), 1);
    let stored = &assessments[0];
    assert_eq!(stored.tid, "exam1");
    assert_eq!(stored.assessment_type, "Exam");
    assert_eq!(stored.number, "2");
    assert_eq!(stored.title, "Midterm");
    assert_eq!(stored.set_name.as_deref(), Some("Exam"));
    assert!(stored.multiple_instance);
    assert!(stored.shuffle_questions);
    assert_eq!(stored.max_score, Some(30.0));
    assert_eq!(stored.text.as_deref(), Some("Closed book."));
    assert_eq!(stored.config.as_ref().and_then(|c| c.get("maxScore")), Some(&json!(30)));
    assert_eq!(stored.deleted_at, None);

    let rules = storage.list_access_rules(stored.id).await.unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].number, 1);
    assert_eq!(rules[0].mode.as_deref(), Some("Exam"));
    assert_eq!(rules[0].credit, Some(100));
    assert_eq!(rules[0].start_date.as_deref(), Some("2015-01-19T00:00:01-06:00"));
    assert_eq!(rules[0].end_date.as_deref(), Some("2015-01-19T23:59:59-06:00"));
    assert_eq!(rules[1].number, 2);
    assert_eq!(rules[1].role.as_deref(), Some("TA"));
    assert_eq!(rules[1].uids, Some(vec!["ta@example.com".to_string()]));

    let zones = storage.list_zones(stored.id).await.unwrap();
    let titles: Vec<_> = zones.iter().map(|z| (z.number, z.title.clone())).collect();
    assert_eq!(
        titles,
        vec![
            (1, Some("Part A".to_string())),
            (2, Some("Part B".to_string()))
        ]
    );

    let questions = storage.list_assessment_questions(stored.id).await.unwrap();
    let layout: Vec<_> = questions
        .iter()
        .map(|q| (q.number, q.zone_number, q.question_id))
        .collect();
    assert_eq!(
        layout,
        vec![
            (1, 1, qids["q1"]),
            (2, 1, qids["q2"]),
            (3, 2, qids["q3"]),
            (4, 2, qids["q4"])
        ]
    );
    assert_eq!(questions[0].max_points, Some(1.0));
    assert_eq!(questions[1].max_points, Some(5.0));
    assert_eq!(questions[1].points_list, Some(vec![5.0, 3.0]));
    assert_eq!(questions[2].max_points, Some(4.0));
    assert_eq!(questions[2].init_points, Some(1.0));
    assert_eq!(questions[2].points_list, None);
}

#[tokio::test]
async fn test_bare_qid_gets_one_point() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1"]).await;
    let instance = course_instance(
        COURSE_INSTANCE_ID,
        vec![("hw1", homework(json!({"questions": ["q1"]})))],
    );

    reconciler(&storage).sync(&course(), &instance).await.unwrap();

    let hw1 = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "hw1")
        .await
        .unwrap()
        .unwrap();
    let questions = storage.list_assessment_questions(hw1.id).await.unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].max_points, Some(1.0));
    assert_eq!(questions[0].points_list, None);
    assert_eq!(questions[0].init_points, None);
}

#[tokio::test]
async fn test_multiple_qids_expand_with_shared_points() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1", "q2"]).await;
    let instance = course_instance(
        COURSE_INSTANCE_ID,
        vec![(
            "hw1",
            homework(json!({"questions": [{"qids": ["q1", "q2"], "points": [10, 5, 1]}]})),
        )],
    );

    reconciler(&storage).sync(&course(), &instance).await.unwrap();

    let hw1 = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "hw1")
        .await
        .unwrap()
        .unwrap();
    let questions = storage.list_assessment_questions(hw1.id).await.unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].number, 1);
    assert_eq!(questions[1].number, 2);
    for question in &questions {
        assert_eq!(question.max_points, Some(10.0));
        assert_eq!(question.points_list, Some(vec![10.0, 5.0, 1.0]));
    }
}

#[tokio::test]
async fn test_empty_points_list_is_stored_as_empty_array() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1"]).await;
    let instance = course_instance(
        COURSE_INSTANCE_ID,
        vec![(
            "hw1",
            homework(json!({"questions": [{"qid": "q1", "points": []}]})),
        )],
    );

    reconciler(&storage).sync(&course(), &instance).await.unwrap();

    let hw1 = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "hw1")
        .await
        .unwrap()
        .unwrap();
    let questions = storage.list_assessment_questions(hw1.id).await.unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].max_points, None);
    assert_eq!(questions[0].points_list, Some(Vec::new()));

    // 数据库中保存的是空数组而不是 NULL
    let row = assessment_questions::Entity::find()
        .filter(assessment_questions::Column::AssessmentId.eq(hw1.id))
        .one(storage.connection())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.points_list.as_deref(), Some("[]"));
    assert_eq!(row.max_points, None);
}

#[tokio::test]
async fn test_resync_is_idempotent() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1", "q2"]).await;
    let instance = course_instance(
        COURSE_INSTANCE_ID,
        vec![
            (
                "hw1",
                assessment(json!({
                    "type": "Homework",
                    "number": "1",
                    "title": "Vectors",
                    "allowAccess": [{"mode": "Public", "credit": 100}],
                    "options": {"zones": [{"title": "Only", "questions": ["q1", "q2"]}]}
                })),
            ),
            ("hw2", homework(json!({"qids": ["q2"]}))),
        ],
    );
    let reconciler = reconciler(&storage);

    reconciler.sync(&course(), &instance).await.unwrap();
    let first_assessments = storage.list_assessments(COURSE_INSTANCE_ID).await.unwrap();
    let first_rules = storage.list_access_rules(first_assessments[0].id).await.unwrap();
    let first_zones = storage.list_zones(first_assessments[0].id).await.unwrap();
    let first_questions = storage
        .list_assessment_questions(first_assessments[0].id)
        .await
        .unwrap();

    let report = reconciler.sync(&course(), &instance).await.unwrap();
    assert_eq!(report.soft_deleted_assessments, 0);
    assert_eq!(report.soft_deleted_assessment_questions, 0);
    assert_eq!(report.deleted_access_rules, 0);
    assert_eq!(report.deleted_zones, 0);

    let second_assessments = storage.list_assessments(COURSE_INSTANCE_ID).await.unwrap();
    assert_eq!(first_assessments, second_assessments);
    assert_eq!(
        first_rules,
        storage.list_access_rules(second_assessments[0].id).await.unwrap()
    );
    assert_eq!(
        first_zones,
        storage.list_zones(second_assessments[0].id).await.unwrap()
    );
    assert_eq!(
        first_questions,
        storage
            .list_assessment_questions(second_assessments[0].id)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_removed_assessment_is_soft_deleted_and_children_pruned() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1", "q2"]).await;
    let exam = assessment(json!({
        "type": "Exam",
        "number": "1",
        "title": "Quiz",
        "allowAccess": [{"mode": "Exam"}, {"mode": "Public", "credit": 50}],
        "options": {"zones": [{"questions": ["q1"]}, {"questions": ["q2"]}]}
    }));
    let reconciler = reconciler(&storage);

    let both = course_instance(
        COURSE_INSTANCE_ID,
        vec![("hw1", homework(json!({"qids": ["q1"]}))), ("quiz1", exam)],
    );
    reconciler.sync(&course(), &both).await.unwrap();
    let quiz = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "quiz1")
        .await
        .unwrap()
        .unwrap();

    let only_homework = course_instance(
        COURSE_INSTANCE_ID,
        vec![("hw1", homework(json!({"qids": ["q1"]})))],
    );
    let report = reconciler.sync(&course(), &only_homework).await.unwrap();
    assert_eq!(report.soft_deleted_assessments, 1);
    assert_eq!(report.soft_deleted_assessment_questions, 2);
    assert_eq!(report.deleted_access_rules, 2);
    assert_eq!(report.deleted_zones, 2);

    // 评估本身保留，只打上删除标记
    let removed = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "quiz1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(removed.id, quiz.id);
    assert!(removed.deleted_at.is_some());

    let active: Vec<_> = storage
        .list_assessments(COURSE_INSTANCE_ID)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.tid)
        .collect();
    assert_eq!(active, vec!["hw1".to_string()]);

    assert!(storage.list_access_rules(quiz.id).await.unwrap().is_empty());
    assert!(storage.list_zones(quiz.id).await.unwrap().is_empty());
    assert!(storage.list_assessment_questions(quiz.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_course_instance_prunes_everything() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1"]).await;
    let hw1 = assessment(json!({
        "type": "Homework",
        "number": "1",
        "title": "Vectors",
        "allowAccess": [{"mode": "Public"}],
        "options": {"qids": ["q1"]}
    }));
    let reconciler = reconciler(&storage);

    reconciler
        .sync(&course(), &course_instance(COURSE_INSTANCE_ID, vec![("hw1", hw1)]))
        .await
        .unwrap();
    let stored = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "hw1")
        .await
        .unwrap()
        .unwrap();

    let report = reconciler
        .sync(&course(), &course_instance(COURSE_INSTANCE_ID, Vec::new()))
        .await
        .unwrap();
    assert_eq!(report.assessments, 0);
    assert_eq!(report.soft_deleted_assessments, 1);
    assert_eq!(report.soft_deleted_assessment_questions, 1);
    assert_eq!(report.deleted_access_rules, 1);
    assert_eq!(report.deleted_zones, 1);

    assert!(storage.list_assessments(COURSE_INSTANCE_ID).await.unwrap().is_empty());
    assert!(storage.list_access_rules(stored.id).await.unwrap().is_empty());
    assert!(storage.list_zones(stored.id).await.unwrap().is_empty());
    assert!(storage.list_assessment_questions(stored.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_restored_assessment_keeps_surrogate_id() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1"]).await;
    let reconciler = reconciler(&storage);
    let with_hw = course_instance(
        COURSE_INSTANCE_ID,
        vec![("hw1", homework(json!({"qids": ["q1"]})))],
    );

    reconciler.sync(&course(), &with_hw).await.unwrap();
    let original = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "hw1")
        .await
        .unwrap()
        .unwrap();
    let original_questions = storage.list_assessment_questions(original.id).await.unwrap();

    reconciler
        .sync(&course(), &course_instance(COURSE_INSTANCE_ID, vec![]))
        .await
        .unwrap();
    assert!(storage.list_assessments(COURSE_INSTANCE_ID).await.unwrap().is_empty());

    reconciler.sync(&course(), &with_hw).await.unwrap();
    let restored = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "hw1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(restored.id, original.id);
    assert_eq!(restored.deleted_at, None);
    assert_eq!(
        storage.list_assessment_questions(restored.id).await.unwrap(),
        original_questions
    );
}

#[tokio::test]
async fn test_excess_rules_and_zones_are_deleted() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1", "q2", "q3"]).await;
    let reconciler = reconciler(&storage);

    let wide = assessment(json!({
        "type": "Exam",
        "number": "1",
        "title": "Final",
        "allowAccess": [{"mode": "Exam"}, {"mode": "Public"}, {"role": "Instructor"}],
        "options": {"zones": [
            {"title": "A", "questions": ["q1"]},
            {"title": "B", "questions": ["q2"]},
            {"title": "C", "questions": ["q3"]}
        ]}
    }));
    reconciler
        .sync(&course(), &course_instance(COURSE_INSTANCE_ID, vec![("final", wide)]))
        .await
        .unwrap();

    let narrow = assessment(json!({
        "type": "Exam",
        "number": "1",
        "title": "Final",
        "allowAccess": [{"mode": "Public"}],
        "options": {"zones": [{"title": "Z", "questions": ["q3", "q1"]}]}
    }));
    reconciler
        .sync(&course(), &course_instance(COURSE_INSTANCE_ID, vec![("final", narrow)]))
        .await
        .unwrap();

    let final_exam = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "final")
        .await
        .unwrap()
        .unwrap();

    let rules = storage.list_access_rules(final_exam.id).await.unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].number, 1);
    assert_eq!(rules[0].mode.as_deref(), Some("Public"));

    let zones = storage.list_zones(final_exam.id).await.unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].title.as_deref(), Some("Z"));

    let questions = storage.list_assessment_questions(final_exam.id).await.unwrap();
    let numbers: Vec<_> = questions.iter().map(|q| (q.number, q.zone_number)).collect();
    assert_eq!(numbers, vec![(1, 1), (2, 1)]);
}

#[tokio::test]
async fn test_absent_rule_fields_are_null() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1"]).await;
    let hw = assessment(json!({
        "type": "Homework",
        "number": "1",
        "title": "Vectors",
        "allowAccess": [{"mode": "Public", "credit": 0}],
        "options": {"qids": ["q1"]}
    }));

    reconciler(&storage)
        .sync(&course(), &course_instance(COURSE_INSTANCE_ID, vec![("hw1", hw)]))
        .await
        .unwrap();

    let hw1 = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "hw1")
        .await
        .unwrap()
        .unwrap();
    let rules = storage.list_access_rules(hw1.id).await.unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].mode.as_deref(), Some("Public"));
    assert_eq!(rules[0].credit, Some(0));
    assert_eq!(rules[0].role, None);
    assert_eq!(rules[0].uids, None);
    assert_eq!(rules[0].start_date, None);
    assert_eq!(rules[0].end_date, None);
}

#[tokio::test]
async fn test_invalid_qid_aborts_run() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1", "q2"]).await;
    let reconciler = reconciler(&storage);

    reconciler
        .sync(
            &course(),
            &course_instance(
                COURSE_INSTANCE_ID,
                vec![("old", homework(json!({"qids": ["q1"]})))],
            ),
        )
        .await
        .unwrap();

    let instance = course_instance(
        COURSE_INSTANCE_ID,
        vec![
            ("hw1", homework(json!({"qids": ["q1", "missing", "q2"]}))),
            ("hw2", homework(json!({"qids": ["q2"]}))),
        ],
    );
    let err = reconciler.sync(&course(), &instance).await.unwrap_err();
    assert_eq!(err.code(), "E008");
    assert_eq!(err.message(), r#"assessment hw1: invalid QID: "missing""#);

    // 出错前已写入的题目保留，之后的评估与清理阶段均未执行
    let hw1 = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "hw1")
        .await
        .unwrap()
        .unwrap();
    let questions = storage.list_assessment_questions(hw1.id).await.unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].number, 1);

    assert!(
        storage
            .get_assessment_by_tid(COURSE_INSTANCE_ID, "hw2")
            .await
            .unwrap()
            .is_none()
    );
    let old = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "old")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(old.deleted_at, None);
}

#[tokio::test]
async fn test_qid_from_other_course_is_invalid() {
    let storage = memory_storage().await;
    seed_questions(&storage, 99, &["q1"]).await;

    let err = reconciler(&storage)
        .sync(
            &course(),
            &course_instance(
                COURSE_INSTANCE_ID,
                vec![("hw1", homework(json!({"qids": ["q1"]})))],
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E008");
}

#[tokio::test]
async fn test_unrecognized_zone_shape_is_configuration_error() {
    let storage = memory_storage().await;

    let err = reconciler(&storage)
        .sync(
            &course(),
            &course_instance(
                COURSE_INSTANCE_ID,
                vec![("hw1", homework(json!({"text": "nothing to ask"})))],
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E007");
    assert!(err.message().starts_with("assessment hw1: "));
}

#[tokio::test]
async fn test_invalid_access_date_is_reported() {
    let storage = memory_storage().await;
    let hw = assessment(json!({
        "type": "Homework",
        "number": "1",
        "title": "Vectors",
        "allowAccess": [{"mode": "Public"}, {"startDate": "someday"}],
        "options": {"qids": []}
    }));

    let err = reconciler(&storage)
        .sync(&course(), &course_instance(COURSE_INSTANCE_ID, vec![("hw1", hw)]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E006");
    assert!(err.message().starts_with("assessment hw1: access rule 2: "));
}

#[tokio::test]
async fn test_dropped_question_is_soft_deleted_within_assessment() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1", "q2", "q3"]).await;
    let reconciler = reconciler(&storage);

    reconciler
        .sync(
            &course(),
            &course_instance(
                COURSE_INSTANCE_ID,
                vec![("hw1", homework(json!({"qids": ["q1", "q2", "q3"]})))],
            ),
        )
        .await
        .unwrap();

    reconciler
        .sync(
            &course(),
            &course_instance(
                COURSE_INSTANCE_ID,
                vec![("hw1", homework(json!({"qids": ["q1"]})))],
            ),
        )
        .await
        .unwrap();

    let hw1 = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "hw1")
        .await
        .unwrap()
        .unwrap();
    let questions = storage.list_assessment_questions(hw1.id).await.unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].number, 1);
}

#[tokio::test]
async fn test_legacy_question_groups_form_one_zone() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1", "q2", "q3"]).await;

    reconciler(&storage)
        .sync(
            &course(),
            &course_instance(
                COURSE_INSTANCE_ID,
                vec![(
                    "exam1",
                    homework(json!({"questionGroups": [["q1", "q2"], [["q3"]]]})),
                )],
            ),
        )
        .await
        .unwrap();

    let exam = storage
        .get_assessment_by_tid(COURSE_INSTANCE_ID, "exam1")
        .await
        .unwrap()
        .unwrap();
    let zones = storage.list_zones(exam.id).await.unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].title, None);

    let questions = storage.list_assessment_questions(exam.id).await.unwrap();
    assert_eq!(questions.len(), 3);
    assert!(questions.iter().all(|q| q.zone_number == 1));
}

#[tokio::test]
async fn test_other_course_instance_is_untouched() {
    let storage = memory_storage().await;
    seed_questions(&storage, common::COURSE_ID, &["q1"]).await;
    let reconciler = reconciler(&storage);
    let hw = assessment(json!({
        "type": "Homework",
        "number": "1",
        "title": "Vectors",
        "allowAccess": [{"mode": "Public"}],
        "options": {"qids": ["q1"]}
    }));

    reconciler
        .sync(&course(), &course_instance(1, vec![("hw1", hw.clone())]))
        .await
        .unwrap();
    reconciler
        .sync(&course(), &course_instance(2, vec![("hw1", hw)]))
        .await
        .unwrap();

    reconciler
        .sync(&course(), &course_instance(1, vec![]))
        .await
        .unwrap();

    assert!(storage.list_assessments(1).await.unwrap().is_empty());
    let survivors = storage.list_assessments(2).await.unwrap();
    assert_eq!(survivors.len(), 1);
    assert_eq!(storage.list_access_rules(survivors[0].id).await.unwrap().len(), 1);
    assert_eq!(storage.list_zones(survivors[0].id).await.unwrap().len(), 1);
    assert_eq!(
        storage
            .list_assessment_questions(survivors[0].id)
            .await
            .unwrap()
            .len(),
        1
    );
}
