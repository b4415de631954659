//! Webhook domain module.
//!
//! Signature schemes and typed events for the two inbound lifecycle feeds:
//! payment (checkout sessions) and identity (users).

mod errors;
mod identity_event;
mod payment_event;
mod signature;
mod stripe;
mod svix;

pub use errors::{ReconciliationError, SignatureError};
pub use identity_event::{IdentityEvent, UserSnapshot};
pub use payment_event::{PaymentEvent, PaymentResolution};
pub use signature::{TimestampWindow, DEFAULT_TOLERANCE_SECS, MAX_CLOCK_SKEW_SECS};
pub use stripe::{StripeSignatureHeader, StripeSignatureVerifier};
pub use svix::{
    SvixHeaders, SvixSignatureVerifier, SVIX_ID_HEADER, SVIX_SIGNATURE_HEADER,
    SVIX_TIMESTAMP_HEADER,
};
