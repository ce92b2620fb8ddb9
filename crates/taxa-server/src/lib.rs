//! Taxa HTTP gateway library (used by the `taxa` binary and tests).

pub mod gateway;
