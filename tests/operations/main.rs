//! Operation-level tests: handlers driven directly, without a transport.

mod search;
