//! Checkout domain module.
//!
//! Session lifecycle, payment instrument validation, and the checkout
//! workflow stages.
//!
//! # Module Structure
//!
//! - `session` - CheckoutSession entity and its persisted record layout
//! - `instrument` - PaymentInstrument and the stateless InstrumentValidator
//! - `customer` - Pseudo customer identifier derivations
//! - `stage` - CheckoutStage state machine and CheckoutWorkflow tracker
//! - `errors` - CheckoutError taxonomy

mod customer;
mod errors;
mod instrument;
mod session;
mod stage;

pub use customer::CustomerId;
pub use errors::CheckoutError;
pub use instrument::{
    format_card_number, is_valid_cvc, is_valid_expiry, is_valid_luhn, normalize_card_number,
    InstrumentValidator, PaymentInstrument,
};
pub use session::{CheckoutSession, SessionRecord, DEFAULT_REDIRECT_BASE};
pub use stage::{CheckoutStage, CheckoutWorkflow};
