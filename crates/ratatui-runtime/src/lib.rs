pub use self::{app::App, event_loop::FramePacer, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
