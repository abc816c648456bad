//! 植物养护前端的视图模型层：与远端植物服务通信，维护本地工作集，
//! 并派生浇水/光照提醒、分类计数以及过滤排序后的展示列表。

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
pub use services::{FetchOutcome, HttpPlantApi, PlantApi, PlantStore};
