pub mod auth;
pub mod core;
pub mod database;
pub mod extraction;
pub mod history;
pub mod outreach;
pub mod session;
pub mod utils;
pub mod web;

pub use web::start_web_server;
