//! upkeep-core
//!
//! Core building blocks for the Upkeep maintenance runtime: a single-flight
//! coordinator that runs the db-migration / service-restart / route-recreation
//! sequence at most once at a time, while any number of callers trigger it and
//! poll its status.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（phase, errors）
//! - **ports**: 抽象化レイヤー（Clock, Executor, MaintenanceSteps）
//! - **app**: アプリケーションロジック（coordinator, status）

pub mod domain;
pub mod ports;
pub mod app;
