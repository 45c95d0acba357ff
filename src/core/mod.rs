//! Core engine types: seats, RNG, errors.
//!
//! These are the building blocks shared by moves, drivers, policies and the
//! race controller. Nothing here knows about fuel or tires.

pub mod error;
pub mod rng;
pub mod seat;

pub use error::{DuelError, Result};
pub use rng::RaceRng;
pub use seat::{Seat, SeatMap};
