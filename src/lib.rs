// Don't change this value, it will be replaced by the version
pub static VERSION: &'static str = "0.1.0 - Dev";

pub mod client;
pub mod conf;
pub mod erx;
pub mod log;
pub mod macros;
pub mod object;
pub mod tools;

pub use client::ClientRef;
pub use erx::{Erx, ResultE};
pub use object::{ApiObject, Field, Kind};

#[doc(hidden)]
pub use serde_json;
