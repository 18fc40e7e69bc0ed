//! Feature reducers.
//!
//! Each interactive flow is one reducer: the booking wizard, the explore
//! browse/filter screen, the optimistic like and comment widgets, the
//! server-side booking pipeline, and the simulated payment step.

pub mod booking_desk;
pub mod booking_flow;
pub mod explore;
pub mod payment;
pub mod social;
