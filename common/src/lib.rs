pub mod activity;
pub mod currency;
pub mod directory;
pub mod identity;
pub mod invoice;
pub mod payment;
pub mod presentation;
pub mod pubkey;

pub use activity::ActivityRow;
pub use identity::{resolve_identity, IdentityResolver};
pub use presentation::{map_presentation_state, PresentationState};
