//! Cross-crate integration flows

pub mod exception_dispatch;
pub mod transactional_work;
