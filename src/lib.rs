//! postbak: export every post in a team workspace to a local directory tree.
//!
//! The crate is split along the run's stages:
//! - [`config`]: environment-supplied credentials and team selection.
//! - [`contract`]: the post-source collaborator trait plus wire types.
//! - [`client`]: the reqwest-backed implementation of that trait.
//! - [`access`]: the team-membership guard that runs before any export work.
//! - [`paginate`]: the page-cursor loop feeding posts to a visitor.
//! - [`materialize`]: the filesystem writer and its collision policy.
//! - [`backup`]: orchestration of guard → paginate → materialize.
//! - [`cli`]: argument parsing and exit-code mapping for the binary.

pub mod access;
pub mod backup;
pub mod cli;
pub mod client;
pub mod config;
pub mod contract;
pub mod materialize;
pub mod paginate;
