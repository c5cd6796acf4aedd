//! Ports module for Exception Control
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{ExceptionDispatchApi, HandlerOrderingApi};
pub use outbound::ExceptionHandler;
