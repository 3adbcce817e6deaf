//! Per-(version, purpose) strategies. A closed
//! set of four combinations, dispatched by the match in
//! [`crate::paseto::decrypt_or_verify`] and [`crate::paseto::create`] rather
//! than by open/generic polymorphism.

pub mod v1_local;
pub mod v1_public;
pub mod v2_local;
pub mod v2_public;
