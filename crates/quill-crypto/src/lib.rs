//! Session-cookie signing and salted password hashing.
//!
//! Both take the process-wide secret / salt as explicit inputs; nothing in
//! this crate reads ambient state.

pub mod password;
pub mod sign;

pub use sign::Signer;
