//! 资产清单系统库
//! 提供共享类型和工具

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pipeline;
pub mod realtime;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
