//! 农产品目录：校验、存储后端与接口

pub mod handler;
pub mod local;
pub mod mapper;
pub mod model;
pub mod remote;
pub mod selector;
pub mod store;
pub mod validator;
