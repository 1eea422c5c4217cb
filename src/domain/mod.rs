//! Domain records mirrored from the clinic backend.

pub mod appointment;
pub mod clinic;
pub mod notification;
pub mod patient;
pub mod payment;
pub mod staff;
pub mod types;
