//! HTTP 处理器模块

pub mod asset;
pub mod export;
pub mod health;
pub mod metrics;
pub mod stream;
