//! Public thermodynamic models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! Each model lives in its own module. Building blocks that are useful on
//! their own (state points, property models, units) live in
//! [`support`](crate::support) instead.

pub mod cycle;
