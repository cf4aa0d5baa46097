mod config;
mod controller;
mod error;
mod logging;
mod notification;
mod playlist;
mod runtime;
mod service;
mod ui;
mod view;

#[cfg(test)]
mod testing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
