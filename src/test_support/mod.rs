//! Helpers shared by in-crate unit tests.

pub(crate) mod fake;
pub(crate) mod socket_guard;
