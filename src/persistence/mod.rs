//! Save/load of player session state
//!
//! Features:
//! - Flat YAML record (`player.yml`), unknown keys ignored
//! - Missing keys defaulted, corrupt files treated as "no save"
//! - Degenerate camera rotations rejected without dropping the rest
//! - Directory created on first save, file fully rewritten each time

pub mod codec;
pub mod error;
pub mod record;
pub mod repository;

pub use codec::{Decoded, StateCodec};
pub use error::PersistError;
pub use record::{StateRecord, forward_axis_is_unit};
pub use repository::Repository;
