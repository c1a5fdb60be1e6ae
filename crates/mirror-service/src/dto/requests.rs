//! Request DTOs for admin commands
//!
//! All request DTOs implement `Validate` for input validation.

use mirror_core::NewLinkRule;
use validator::Validate;

/// Add link rule request (`/addrule`)
///
/// Field lengths are checked here; whether the pattern compiles is checked by
/// the admin service.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct AddRuleRequest {
    #[validate(length(min = 1, max = 512, message = "Pattern must be 1-512 characters"))]
    pub pattern: String,

    #[validate(length(max = 2048, message = "Replacement must be at most 2048 characters"))]
    pub replacement: String,

    /// New visible text for anchors whose href matched
    #[validate(length(min = 1, max = 1024, message = "Display text must be 1-1024 characters"))]
    pub text_replacement: Option<String>,
}

impl From<AddRuleRequest> for NewLinkRule {
    fn from(request: AddRuleRequest) -> Self {
        Self {
            pattern: request.pattern,
            replacement: request.replacement,
            text_replacement: request.text_replacement,
        }
    }
}
