// latchkey - first-run activation gate
// Library exports

pub mod cli;
pub mod config;
pub mod credentials;
pub mod logging;
