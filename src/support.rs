//! Supporting utilities used by models.
//!
//! These modules are public because they're useful on their own, but their
//! APIs are not stable.

pub mod constraint;
pub mod rayleigh;
