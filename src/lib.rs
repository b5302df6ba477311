pub mod config;
pub mod db;
pub mod fetch_error;
pub mod fetcher;
pub mod normalizer;
pub mod notifier;
pub mod periods;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod services;
pub mod summary;
