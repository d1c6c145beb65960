//! Payment Adapters
//!
//! Simulated implementations of the payment ports. There is no real
//! gateway integration; these adapters model latency and let tests
//! exercise the decline and failure paths.
//!
//! - **SimulatedPaymentVerifier** - `PaymentVerifier` that confirms after a delay
//! - **SimulatedPaymentProvider** - `PaymentProvider` for subscription cancellation

mod simulated_provider;
mod simulated_verifier;

pub use simulated_provider::{SimulatedPaymentProvider, DEFAULT_CANCELLATION_DELAY};
pub use simulated_verifier::{SimulatedPaymentVerifier, DEFAULT_VERIFICATION_DELAY};
