pub mod appearance;
pub mod skylight;
pub mod window_server;
