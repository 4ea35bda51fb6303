pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod form;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod rpc;
pub mod schema;

#[cfg(test)]
pub mod testing;
