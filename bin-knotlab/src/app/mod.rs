pub mod err;
mod app;
mod cmd;
mod utils;

pub use app::App;
