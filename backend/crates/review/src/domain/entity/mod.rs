//! Entity Module

pub mod review;
