//! Velum View - Deferred materialization over query pipelines.
//!
//! This crate provides `DeferredView`, a pull-based view of a pipeline's
//! result. The view holds no result until it is read: asking for the count
//! re-runs the pipeline against the live source and republishes the items
//! wholesale. There is no caching and no invalidation protocol; the source
//! sequence itself is the single point of truth between reads.

#![no_std]

extern crate alloc;

pub mod deferred;

pub use deferred::DeferredView;
