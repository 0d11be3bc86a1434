//! Fixed-layout renditions of the demo classes.
//!
//! `basic` is a standalone record with methods. `inheritance` models a base
//! record plus subclasses: base fields are embedded, shared operations live
//! on the [`inheritance::Creature`] trait with default (base) bodies, and
//! each subclass overrides what it needs.
pub mod basic;
pub mod inheritance;
