//! course-sync - 课程评估配置同步
//!
//! 将磁盘上的评估配置（评估、访问规则、分区与题目分配）同步到关系数据库。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义（数据库业务实体与磁盘记录）
//! - `runtime`: 运行时生命周期管理
//! - `services`: 同步逻辑与磁盘加载
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
