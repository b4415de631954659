//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `UserRepository` - users mirrored from the identity provider
//! - `CourseRepository` - course catalog
//! - `PurchaseRepository` - purchases with conditional settlement
//! - `EnrollmentReader` - derived enrollment read model
//!
//! ## External Service Ports
//!
//! - `PaymentGateway` - hosted checkout sessions
//! - `SessionValidator` - bearer token validation
//! - `IdentityProvider` - role changes written back to the provider

mod course_repository;
mod enrollment_reader;
mod identity_provider;
mod payment_gateway;
mod purchase_repository;
mod session_validator;
mod user_repository;

pub use course_repository::CourseRepository;
pub use enrollment_reader::{
    EducatorEarnings, EducatorEnrollment, EnrolledCourse, EnrolledUser, EnrollmentReader,
};
pub use identity_provider::{IdentityProvider, IdentityProviderError};
pub use payment_gateway::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentGateway,
};
pub use purchase_repository::PurchaseRepository;
pub use session_validator::SessionValidator;
pub use user_repository::UserRepository;
