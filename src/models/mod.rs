//! Wire models exchanged with the clinic backend plus server-side models.

pub mod appointment;
#[cfg(feature = "server")]
pub mod auth;
pub mod clinic;
#[cfg(feature = "server")]
pub mod config;
pub mod datetime;
pub mod notification;
pub mod payment;
pub mod staff;
