//! Integration tests for the cause stack manager

mod test_utils;

mod config_integration;
mod frame_recovery;
