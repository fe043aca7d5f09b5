//! Services - orchestration over the ports

pub mod signup;
