//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use crate::application::handlers::{
    BecomeEducatorHandler, CheckoutRedirects, CreateCourseHandler, GetCourseHandler,
    GetEducatorDashboardHandler, GetEnrolledCoursesHandler, GetEnrolledUsersHandler,
    GetUserDataHandler, HandleIdentityEventHandler, HandlePaymentEventHandler,
    ListEducatorCoursesHandler, ListEducatorStudentsHandler, ListPublishedCoursesHandler,
    PurchaseCourseHandler,
};
use crate::domain::webhook::{StripeSignatureVerifier, SvixSignatureVerifier};
use crate::ports::{
    CourseRepository, EnrollmentReader, IdentityProvider, PaymentGateway, PurchaseRepository,
    SessionValidator, UserRepository,
};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is behind an `Arc`. `courses`
/// is expected to be the catalog cache so that course writes invalidate it.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub purchases: Arc<dyn PurchaseRepository>,
    pub enrollments: Arc<dyn EnrollmentReader>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub stripe_verifier: Arc<StripeSignatureVerifier>,
    pub svix_verifier: Arc<SvixSignatureVerifier>,
    pub checkout_redirects: CheckoutRedirects,
}

impl AppState {
    // Handlers are built on demand from the shared state.

    pub fn list_published_courses_handler(&self) -> ListPublishedCoursesHandler {
        ListPublishedCoursesHandler::new(self.courses.clone())
    }

    pub fn get_course_handler(&self) -> GetCourseHandler {
        GetCourseHandler::new(self.courses.clone())
    }

    pub fn create_course_handler(&self) -> CreateCourseHandler {
        CreateCourseHandler::new(self.courses.clone())
    }

    pub fn list_educator_courses_handler(&self) -> ListEducatorCoursesHandler {
        ListEducatorCoursesHandler::new(self.courses.clone(), self.enrollments.clone())
    }

    pub fn get_enrolled_users_handler(&self) -> GetEnrolledUsersHandler {
        GetEnrolledUsersHandler::new(self.courses.clone(), self.enrollments.clone())
    }

    pub fn educator_dashboard_handler(&self) -> GetEducatorDashboardHandler {
        GetEducatorDashboardHandler::new(self.courses.clone(), self.enrollments.clone())
    }

    pub fn list_educator_students_handler(&self) -> ListEducatorStudentsHandler {
        ListEducatorStudentsHandler::new(self.enrollments.clone())
    }

    pub fn become_educator_handler(&self) -> BecomeEducatorHandler {
        BecomeEducatorHandler::new(self.identity_provider.clone())
    }

    pub fn get_enrolled_courses_handler(&self) -> GetEnrolledCoursesHandler {
        GetEnrolledCoursesHandler::new(self.enrollments.clone())
    }

    pub fn get_user_data_handler(&self) -> GetUserDataHandler {
        GetUserDataHandler::new(self.users.clone())
    }

    pub fn purchase_course_handler(&self) -> PurchaseCourseHandler {
        PurchaseCourseHandler::new(
            self.courses.clone(),
            self.users.clone(),
            self.purchases.clone(),
            self.enrollments.clone(),
            self.payment_gateway.clone(),
            self.checkout_redirects.clone(),
        )
    }

    pub fn payment_event_handler(&self) -> HandlePaymentEventHandler {
        HandlePaymentEventHandler::new(self.stripe_verifier.clone(), self.purchases.clone())
    }

    pub fn identity_event_handler(&self) -> HandleIdentityEventHandler {
        HandleIdentityEventHandler::new(self.svix_verifier.clone(), self.users.clone())
    }
}
