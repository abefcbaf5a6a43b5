pub mod adapters;
pub mod app_config;
pub mod commands;
pub mod entities;
pub mod ports;
pub mod queries;
pub mod rest;
#[cfg(test)]
mod test_utils;
