//! PurchaseCourseHandler - starts a hosted checkout for one course.

use std::sync::Arc;

use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, PurchaseId, TransactionRef, UserId,
};
use crate::domain::purchase::Purchase;
use crate::ports::{
    CourseRepository, CreateCheckoutRequest, EnrollmentReader, PaymentGateway,
    PurchaseRepository, UserRepository,
};

/// Where the gateway sends the buyer after checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRedirects {
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutRedirects {
    /// Builds redirects relative to the frontend origin.
    pub fn for_frontend(frontend_url: &str) -> Self {
        let base = frontend_url.trim_end_matches('/');
        Self {
            success_url: format!("{}/loading/my-enrollments", base),
            cancel_url: format!("{}/", base),
        }
    }
}

/// Command to buy a course.
#[derive(Debug, Clone)]
pub struct PurchaseCourseCommand {
    pub user_id: UserId,
    pub course_id: CourseId,
}

/// Result of a started checkout.
#[derive(Debug, Clone)]
pub struct PurchaseCourseResult {
    /// Pending purchase keyed by the checkout session id.
    pub purchase: Purchase,
    /// Hosted page the buyer is sent to.
    pub session_url: String,
}

/// Handler for starting a course purchase.
///
/// The purchase stays pending until a signed payment event settles it.
pub struct PurchaseCourseHandler {
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
    purchases: Arc<dyn PurchaseRepository>,
    enrollments: Arc<dyn EnrollmentReader>,
    gateway: Arc<dyn PaymentGateway>,
    redirects: CheckoutRedirects,
}

impl PurchaseCourseHandler {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        users: Arc<dyn UserRepository>,
        purchases: Arc<dyn PurchaseRepository>,
        enrollments: Arc<dyn EnrollmentReader>,
        gateway: Arc<dyn PaymentGateway>,
        redirects: CheckoutRedirects,
    ) -> Self {
        Self {
            courses,
            users,
            purchases,
            enrollments,
            gateway,
            redirects,
        }
    }

    pub async fn handle(
        &self,
        cmd: PurchaseCourseCommand,
    ) -> Result<PurchaseCourseResult, DomainError> {
        // 1. Course must exist and be on sale
        let course = self
            .courses
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CourseNotFound, "Course not found")
                    .with_detail("course_id", cmd.course_id.to_string())
            })?;
        if !course.published {
            return Err(DomainError::new(
                ErrorCode::CourseNotPublished,
                "Course is not available for purchase",
            )
            .with_detail("course_id", course.id.to_string()));
        }

        // 2. Buyer must be a live local user
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .filter(|user| !user.deleted)
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User not found"))?;

        // 3. No second purchase once enrolled
        if self.enrollments.is_enrolled(&user.id, &course.id).await? {
            return Err(DomainError::new(
                ErrorCode::AlreadyEnrolled,
                "Already enrolled in this course",
            )
            .with_detail("course_id", course.id.to_string()));
        }

        // 4. Open the checkout session
        let purchase_id = PurchaseId::new();
        let amount_cents = course.effective_price_cents();
        let session = self
            .gateway
            .create_checkout_session(CreateCheckoutRequest {
                purchase_id,
                user_id: user.id.clone(),
                course_id: course.id,
                course_title: course.title.clone(),
                amount_cents,
                customer_email: Some(user.email.clone()).filter(|email| !email.is_empty()),
                success_url: self.redirects.success_url.clone(),
                cancel_url: self.redirects.cancel_url.clone(),
            })
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, course_id = %course.id, "Checkout session creation failed");
                DomainError::from(e)
            })?;

        // 5. Record the pending purchase under the session id
        let transaction_ref = TransactionRef::new(session.id.clone())?;
        let purchase = Purchase::create_pending(
            purchase_id,
            user.id,
            course.id,
            amount_cents,
            transaction_ref,
        )?;
        if let Err(e) = self.purchases.save(&purchase).await {
            tracing::error!(
                error = %e,
                transaction_ref = %purchase.transaction_ref,
                "Checkout session opened but purchase was not recorded"
            );
            return Err(e);
        }

        tracing::info!(
            purchase_id = %purchase.id,
            user_id = %purchase.user_id,
            course_id = %purchase.course_id,
            amount_cents,
            "Checkout started"
        );

        Ok(PurchaseCourseResult {
            purchase,
            session_url: session.url,
        })
    }
}
