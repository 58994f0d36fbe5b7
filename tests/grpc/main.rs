//! End-to-end tests over a loopback tonic transport.

mod buy;
mod create;
mod search;
mod support;
mod upload;
