pub mod event;
pub mod frame;
pub mod level;
pub mod queue;
pub mod step;
pub mod world;

#[cfg(test)]
pub mod fixtures;
