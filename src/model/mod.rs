//! 数据模型模块。

pub mod generic;
pub mod page;
