//! Fixed-period polling of the metrics API.
//!
//! [`Poller::spawn`] runs the schedule as a background Tokio task and hands
//! each completed [`PollCycle`](clustory_core::PollCycle) to a single consumer,
//! which applies it through a [`Session`].

pub mod poller;
pub mod session;

pub use poller::Poller;
pub use session::Session;
pub use tokio_util::sync::CancellationToken;
