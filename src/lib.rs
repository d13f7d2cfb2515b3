//! HWFlow - 作业生命周期核心服务
//!
//! 基于 Actix Web 构建的作业提交与评分生命周期后端。
//! 核心是三个显式状态机：作业（DRAFT→PUBLISHED）、提交
//! （DRAFT→SUBMITTED / DRAFT→LOCKED）与评分（草稿→发布），
//! 以及一个周期性的截止日期执行器。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期与调度器
//! - `services`: 业务逻辑层（状态机）
//! - `storage`: 数据存储层（SeaORM，条件更新）

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
