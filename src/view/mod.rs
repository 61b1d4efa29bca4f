pub mod card;
pub mod controller;
pub mod sessions;

pub use card::{CardPhase, Ticket};
pub use controller::{location_param, QueryControls, ViewController};
pub use sessions::SessionStore;
