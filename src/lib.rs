#![allow(clippy::too_many_arguments)]

pub mod logger;
pub mod app;
pub mod assets;
pub mod cli;
pub mod io;
pub mod pipeline;
pub mod view;
