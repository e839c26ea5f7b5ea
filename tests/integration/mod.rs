//! Integration tests for framekit

mod cli_route;
mod config_loading;
mod frameset_scenarios;
mod host_runs;
mod recipe_plugins;
mod test_utils;
