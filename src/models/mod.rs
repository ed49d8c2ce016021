//! Domain models shared by the database layer and the HTTP API.

pub mod appointment;
pub mod doctor;
pub mod enums;
pub mod patient;
pub mod specialization;

pub use appointment::*;
pub use doctor::*;
pub use enums::*;
pub use patient::*;
pub use specialization::*;
