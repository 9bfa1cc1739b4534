//! 基础设施层：日志与远程记录存储客户端

pub mod airtable;
pub mod logger;
