//! Translatable document values resolved against a locale-keyed language cache.
//!
//! See [`i18n`] for the codec and its collaborators, and [`config`] for
//! environment-driven configuration.

pub mod config;
pub mod i18n;
