//! Protocol implementations

pub mod rtp;
