//! Core types for the roomcal ecosystem.
//!
//! Everything the guesthouse calendar needs short of a user interface:
//! - `Booking`/`Stay` and the canonical `BookingStore`
//! - `Availability` read-model queries for rendering
//! - the `RangeSelector` tap state machine and conflict `resolver`
//! - the `SyncAdapter` trait with the `LocalStore` file backend
//! - authorization, CSV export and configuration
//!
//! `Frontdesk` wires these together for clients.

pub mod auth;
pub mod availability;
pub mod booking;
pub mod config;
pub mod error;
pub mod export;
pub mod frontdesk;
pub mod local;
pub mod resolver;
pub mod selector;
pub mod store;
pub mod sync;

pub use auth::AuthPolicy;
pub use availability::{Availability, OccupiedSpan};
pub use booking::{Booking, Stay};
pub use config::{Backend, RoomCalConfig};
pub use error::{RoomCalError, RoomCalResult};
pub use frontdesk::Frontdesk;
pub use local::LocalStore;
pub use selector::{RangeCommit, RangeSelector, SelectionState, TapOutcome};
pub use store::BookingStore;
pub use sync::{ChangeNotice, SyncAdapter};
