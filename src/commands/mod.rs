pub mod outline;
pub mod split;
