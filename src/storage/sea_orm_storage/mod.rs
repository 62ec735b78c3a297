//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod access_rules;
mod assessment_questions;
mod assessments;
mod questions;
mod zones;

use crate::config::DatabaseConfig;
use crate::errors::{Result, SyncError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按数据库配置创建 SeaORM 存储实例并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SyncError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 底层数据库连接
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SyncError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存库在连接全部关闭后即丢失，始终保留一个连接
        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(None)
            .connect_with(opt)
            .await
            .map_err(|e| SyncError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SyncError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SyncError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 当前时间戳，用于软删除标记
pub(crate) fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

// Storage trait 实现
use crate::models::assessments::{
    entities::{AccessRule, Assessment, AssessmentQuestion, Zone},
    requests::{
        UpsertAccessRuleRequest, UpsertAssessmentQuestionRequest, UpsertAssessmentRequest,
        UpsertZoneRequest,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 评估模块
    async fn upsert_assessment(&self, req: UpsertAssessmentRequest) -> Result<i64> {
        self.upsert_assessment_impl(req).await
    }

    async fn soft_delete_unused_assessments(
        &self,
        course_instance_id: i64,
        keep_assessment_ids: &[i64],
    ) -> Result<u64> {
        self.soft_delete_unused_assessments_impl(course_instance_id, keep_assessment_ids)
            .await
    }

    async fn list_assessments(&self, course_instance_id: i64) -> Result<Vec<Assessment>> {
        self.list_assessments_impl(course_instance_id).await
    }

    async fn get_assessment_by_tid(
        &self,
        course_instance_id: i64,
        tid: &str,
    ) -> Result<Option<Assessment>> {
        self.get_assessment_by_tid_impl(course_instance_id, tid)
            .await
    }

    // 访问规则模块
    async fn upsert_access_rule(&self, req: UpsertAccessRuleRequest) -> Result<i64> {
        self.upsert_access_rule_impl(req).await
    }

    async fn delete_excess_access_rules(
        &self,
        assessment_id: i64,
        last_number: i32,
    ) -> Result<u64> {
        self.delete_excess_access_rules_impl(assessment_id, last_number)
            .await
    }

    async fn delete_unused_access_rules(&self) -> Result<u64> {
        self.delete_unused_access_rules_impl().await
    }

    async fn list_access_rules(&self, assessment_id: i64) -> Result<Vec<AccessRule>> {
        self.list_access_rules_impl(assessment_id).await
    }

    // 分区模块
    async fn upsert_zone(&self, req: UpsertZoneRequest) -> Result<i64> {
        self.upsert_zone_impl(req).await
    }

    async fn delete_excess_zones(&self, assessment_id: i64, last_number: i32) -> Result<u64> {
        self.delete_excess_zones_impl(assessment_id, last_number)
            .await
    }

    async fn delete_unused_zones(&self) -> Result<u64> {
        self.delete_unused_zones_impl().await
    }

    async fn list_zones(&self, assessment_id: i64) -> Result<Vec<Zone>> {
        self.list_zones_impl(assessment_id).await
    }

    // 评估题目模块
    async fn get_question_id_by_qid(&self, course_id: i64, qid: &str) -> Result<Option<i64>> {
        self.get_question_id_by_qid_impl(course_id, qid).await
    }

    async fn upsert_assessment_question(
        &self,
        req: UpsertAssessmentQuestionRequest,
    ) -> Result<i64> {
        self.upsert_assessment_question_impl(req).await
    }

    async fn soft_delete_unused_assessment_questions_in_assessment(
        &self,
        assessment_id: i64,
        keep_assessment_question_ids: &[i64],
    ) -> Result<u64> {
        self.soft_delete_unused_assessment_questions_in_assessment_impl(
            assessment_id,
            keep_assessment_question_ids,
        )
        .await
    }

    async fn soft_delete_unused_assessment_questions(
        &self,
        course_instance_id: i64,
        keep_assessment_ids: &[i64],
    ) -> Result<u64> {
        self.soft_delete_unused_assessment_questions_impl(course_instance_id, keep_assessment_ids)
            .await
    }

    async fn list_assessment_questions(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<AssessmentQuestion>> {
        self.list_assessment_questions_impl(assessment_id).await
    }
}
