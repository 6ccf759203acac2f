// Briefsmith - brief quality assessment, merge and guided refinement
// Library exports

// Core modules
pub mod assessment;
pub mod brief;
pub mod criteria;
pub mod refinement;

// Collaborators and plumbing
pub mod claude;
pub mod cli;
pub mod config;
pub mod errors;
pub mod generators;
pub mod logging;
pub mod storage;

pub use brief::{Brief, BriefField};
pub use errors::{BriefError, BriefResult};
