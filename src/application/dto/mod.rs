//! # Data Transfer Objects

pub mod planner_options;
