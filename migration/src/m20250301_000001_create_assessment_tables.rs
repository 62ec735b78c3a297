use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建题库表（同步流程只读）
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Questions::Qid).string().not_null())
                    .col(ColumnDef::new(Questions::Title).string().null())
                    .col(ColumnDef::new(Questions::DeletedAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // 创建评估表
        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assessments::Tid).string().not_null())
                    .col(ColumnDef::new(Assessments::CourseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Assessments::CourseInstanceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::AssessmentType).string().not_null())
                    .col(ColumnDef::new(Assessments::Number).string().not_null())
                    .col(ColumnDef::new(Assessments::Title).string().not_null())
                    .col(ColumnDef::new(Assessments::Config).text().null())
                    .col(
                        ColumnDef::new(Assessments::MultipleInstance)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assessments::ShuffleQuestions)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Assessments::MaxScore).double().null())
                    .col(ColumnDef::new(Assessments::SetName).string().null())
                    .col(ColumnDef::new(Assessments::Text).text().null())
                    .col(ColumnDef::new(Assessments::DeletedAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // 创建访问规则表
        manager
            .create_table(
                Table::create()
                    .table(AssessmentAccessRules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssessmentAccessRules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAccessRules::AssessmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAccessRules::Number)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssessmentAccessRules::Mode).string().null())
                    .col(ColumnDef::new(AssessmentAccessRules::Role).string().null())
                    .col(ColumnDef::new(AssessmentAccessRules::Uids).text().null())
                    .col(ColumnDef::new(AssessmentAccessRules::StartDate).string().null())
                    .col(ColumnDef::new(AssessmentAccessRules::EndDate).string().null())
                    .col(ColumnDef::new(AssessmentAccessRules::Credit).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AssessmentAccessRules::Table,
                                AssessmentAccessRules::AssessmentId,
                            )
                            .to(Assessments::Table, Assessments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建分区表
        manager
            .create_table(
                Table::create()
                    .table(Zones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Zones::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Zones::AssessmentId).big_integer().not_null())
                    .col(ColumnDef::new(Zones::Number).integer().not_null())
                    .col(ColumnDef::new(Zones::Title).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Zones::Table, Zones::AssessmentId)
                            .to(Assessments::Table, Assessments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估题目表
        manager
            .create_table(
                Table::create()
                    .table(AssessmentQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssessmentQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssessmentQuestions::AssessmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentQuestions::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentQuestions::Number)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentQuestions::ZoneNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssessmentQuestions::MaxPoints).double().null())
                    .col(ColumnDef::new(AssessmentQuestions::PointsList).text().null())
                    .col(ColumnDef::new(AssessmentQuestions::InitPoints).double().null())
                    .col(
                        ColumnDef::new(AssessmentQuestions::DeletedAt)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssessmentQuestions::Table, AssessmentQuestions::AssessmentId)
                            .to(Assessments::Table, Assessments::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssessmentQuestions::Table, AssessmentQuestions::QuestionId)
                            .to(Questions::Table, Questions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 自然键唯一索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_course_qid")
                    .table(Questions::Table)
                    .col(Questions::CourseId)
                    .col(Questions::Qid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessments_course_instance_tid")
                    .table(Assessments::Table)
                    .col(Assessments::CourseInstanceId)
                    .col(Assessments::Tid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessment_access_rules_assessment_number")
                    .table(AssessmentAccessRules::Table)
                    .col(AssessmentAccessRules::AssessmentId)
                    .col(AssessmentAccessRules::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_zones_assessment_number")
                    .table(Zones::Table)
                    .col(Zones::AssessmentId)
                    .col(Zones::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessment_questions_assessment_number")
                    .table(AssessmentQuestions::Table)
                    .col(AssessmentQuestions::AssessmentId)
                    .col(AssessmentQuestions::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(AssessmentQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Zones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssessmentAccessRules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Questions {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    CourseId,
    Qid,
    Title,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Assessments {
    #[sea_orm(iden = "assessments")]
    Table,
    Id,
    Tid,
    CourseId,
    CourseInstanceId,
    AssessmentType,
    Number,
    Title,
    Config,
    MultipleInstance,
    ShuffleQuestions,
    MaxScore,
    SetName,
    Text,
    DeletedAt,
}

#[derive(DeriveIden)]
enum AssessmentAccessRules {
    #[sea_orm(iden = "assessment_access_rules")]
    Table,
    Id,
    AssessmentId,
    Number,
    Mode,
    Role,
    Uids,
    StartDate,
    EndDate,
    Credit,
}

#[derive(DeriveIden)]
enum Zones {
    #[sea_orm(iden = "zones")]
    Table,
    Id,
    AssessmentId,
    Number,
    Title,
}

#[derive(DeriveIden)]
enum AssessmentQuestions {
    #[sea_orm(iden = "assessment_questions")]
    Table,
    Id,
    AssessmentId,
    QuestionId,
    Number,
    ZoneNumber,
    MaxPoints,
    PointsList,
    InitPoints,
    DeletedAt,
}
