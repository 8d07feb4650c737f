#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod anchor;
mod block_log;
mod catalog;
mod composer;
mod cycle;
mod deload;
mod eligibility;
mod error;
mod guidance;
mod metric;
mod name;
mod preference;
mod profile;
mod program;
mod progress;
mod recipe;
mod recommendation;
mod scheme;
mod service;
mod suggestion;
mod validation;

pub use anchor::*;
pub use block_log::*;
pub use catalog::*;
pub use composer::*;
pub use cycle::*;
pub use deload::*;
pub use eligibility::*;
pub use error::*;
pub use guidance::*;
pub use metric::*;
pub use name::*;
pub use preference::*;
pub use profile::*;
pub use program::*;
pub use progress::*;
pub use recipe::*;
pub use recommendation::*;
pub use scheme::*;
pub use service::*;
pub use suggestion::*;
pub use validation::*;
