//! Attribution profile definitions
//!
//! Stateless configuration parsed from TOML: which abilities participate in
//! spend attribution, which ability resolves triggered-cast chains, and the
//! identifier substitutions applied at attribution time.

mod definition;
mod error;
mod loader;

pub use definition::{
    AttributionProfile, ChainProfile, PROFILE_DSL_VERSION, Substitution,
};
pub use error::ProfileError;
pub use loader::load_profile;
