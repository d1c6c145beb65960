//! CopyCraft Checkout - Payment Session and Subscription Activation
//!
//! This crate runs the checkout flow behind the CopyCraft Pro upgrade:
//! it opens payment sessions, validates card details, confirms payment
//! through a simulated provider, and activates the user's Pro entitlement.
//! A "session completed" notification drives the same activation a second,
//! independent time, so either path alone is enough.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
