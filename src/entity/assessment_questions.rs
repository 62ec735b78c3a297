//! 评估题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessment_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_id: i64,
    pub question_id: i64,
    pub number: i32,
    pub zone_number: i32,
    pub max_points: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub points_list: Option<String>,
    pub init_points: Option<f64>,
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assessment_question(
        self,
    ) -> crate::models::assessments::entities::AssessmentQuestion {
        use crate::models::assessments::entities::AssessmentQuestion;
        use chrono::{DateTime, Utc};

        AssessmentQuestion {
            id: self.id,
            assessment_id: self.assessment_id,
            question_id: self.question_id,
            number: self.number,
            zone_number: self.zone_number,
            max_points: self.max_points,
            points_list: self
                .points_list
                .and_then(|raw| serde_json::from_str(&raw).ok()),
            init_points: self.init_points,
            deleted_at: self
                .deleted_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}
