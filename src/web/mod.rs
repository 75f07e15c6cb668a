pub mod api;
pub mod api_doc;
pub mod config;
pub mod server;
pub mod upstream;

pub use config::Config;
pub use server::run_server;
