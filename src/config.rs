//! Settings: a TOML file overlaid with `SPINDLE__*` environment variables,
//! falling back to defaults section by section.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;
