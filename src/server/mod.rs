pub mod config;
mod http_layers;
pub mod metrics;
mod music_routes;
mod notice_routes;
mod playlist_routes;
pub mod response;
pub mod server;
pub mod session;
pub mod state;
mod user_routes;

pub use config::ServerConfig;
pub use http_layers::*;
pub(self) use music_routes::make_music_routes;
pub(self) use notice_routes::make_notice_routes;
pub(self) use playlist_routes::make_playlist_routes;
pub(self) use user_routes::make_user_routes;
pub use server::{make_app, run_server};
