#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Echo the challenge back.
    Verified(String),
    Rejected,
    /// `hub.mode` or `hub.verify_token` absent: nothing to answer.
    Ignored,
}

pub struct VerifySubscriptionRequest<'a> {
    pub mode: Option<&'a str>,
    pub verify_token: Option<&'a str>,
    pub challenge: Option<&'a str>,
}

pub struct VerifySubscriptionUseCase {
    verify_token: String,
}

impl VerifySubscriptionUseCase {
    pub fn new(verify_token: String) -> Self {
        Self { verify_token }
    }

    pub fn execute(&self, request: VerifySubscriptionRequest<'_>) -> VerificationOutcome {
        let mode = request.mode.filter(|value| !value.is_empty());
        let token = request.verify_token.filter(|value| !value.is_empty());

        match (mode, token) {
            (Some("subscribe"), Some(token)) if token == self.verify_token => {
                VerificationOutcome::Verified(request.challenge.unwrap_or_default().to_string())
            }
            (Some(_), Some(_)) => VerificationOutcome::Rejected,
            _ => VerificationOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usecase() -> VerifySubscriptionUseCase {
        VerifySubscriptionUseCase::new("secret".to_string())
    }

    #[test]
    fn matching_token_echoes_challenge() {
        let outcome = usecase().execute(VerifySubscriptionRequest {
            mode: Some("subscribe"),
            verify_token: Some("secret"),
            challenge: Some("1158201444"),
        });
        assert_eq!(outcome, VerificationOutcome::Verified("1158201444".to_string()));
    }

    #[test]
    fn wrong_token_or_mode_is_rejected() {
        let uc = usecase();
        assert_eq!(
            uc.execute(VerifySubscriptionRequest {
                mode: Some("subscribe"),
                verify_token: Some("guess"),
                challenge: Some("x"),
            }),
            VerificationOutcome::Rejected
        );
        assert_eq!(
            uc.execute(VerifySubscriptionRequest {
                mode: Some("unsubscribe"),
                verify_token: Some("secret"),
                challenge: Some("x"),
            }),
            VerificationOutcome::Rejected
        );
    }

    #[test]
    fn missing_or_empty_parameters_are_ignored() {
        let uc = usecase();
        assert_eq!(
            uc.execute(VerifySubscriptionRequest {
                mode: None,
                verify_token: Some("secret"),
                challenge: Some("x"),
            }),
            VerificationOutcome::Ignored
        );
        assert_eq!(
            uc.execute(VerifySubscriptionRequest {
                mode: Some("subscribe"),
                verify_token: Some(""),
                challenge: None,
            }),
            VerificationOutcome::Ignored
        );
    }
}
