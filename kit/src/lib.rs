//! Scaffolding kit for small personal projects.
//! Configuration comes from the environment, the helpers are stateless, and the
//! scaffold workflow bootstraps a new project directory in one linear pass.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod fs;
pub mod logging;
pub mod prompt;
pub mod scaffold;
pub mod timing;
