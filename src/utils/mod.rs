//! # 常用接口模块
//!
//! 目前只有单元测试用的断言宏

#[cfg(test)]
mod tests;
