mod catalog;
mod config;
mod engine;
mod error;
mod fetcher;
mod input;
mod logging;
mod queue;
mod resolver;
mod runtime;
mod session;
mod ui;

#[cfg(test)]
mod testing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
