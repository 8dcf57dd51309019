pub mod client;

pub use client::{decode, MetricsClient};
