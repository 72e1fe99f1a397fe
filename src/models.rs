//! Public Twine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the actual computation and domain logic lives. The `core` module is an
//! implementation detail and is **not** exposed as part of the public API.
//!
//! The [`twine_core::Model`] implementation is a thin adapter that owns a
//! preset and delegates to the model-specific core.

pub mod cost;
