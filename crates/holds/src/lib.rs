//! Hold tracking for the booking console: the hold board and the
//! per-hold expiry countdown shown next to each tentative reservation.

pub mod board;
pub mod countdown;

pub use board::{BookingHold, HoldBoard};
pub use countdown::HoldCountdown;
