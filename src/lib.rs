// 电影目录后端库
//
// 本库提供电影目录的核心功能，包括：
// - API 路由
// - 数据库操作
// - TMDB 导入

pub mod api;
pub mod config;
pub mod database;
pub mod external;
pub mod models;
pub mod services;
