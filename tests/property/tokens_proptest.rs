//! Property tests for session tokens

use proptest::prelude::*;
use social_backend::backend::auth::{Claim, TokenError, TokenService};
use uuid::Uuid;

fn service() -> TokenService {
    TokenService::from_secret(b"property-secret", None)
}

fn arb_claim() -> impl Strategy<Value = Claim> {
    (any::<u128>(), "\\PC{0,40}").prop_map(|(id, name)| Claim::for_user(Uuid::from_u128(id), name))
}

proptest! {
    #[test]
    fn verify_returns_minted_claim(claim in arb_claim()) {
        let tokens = service();
        let token = tokens.mint(&claim).unwrap();
        prop_assert_eq!(tokens.verify(&token).unwrap(), claim);
    }

    #[test]
    fn tampered_signature_rejected(claim in arb_claim(), pick in any::<prop::sample::Index>()) {
        let tokens = service();
        let token = tokens.mint(&claim).unwrap();
        let sig_start = token.rfind('.').unwrap() + 1;

        // The final character carries padding bits, so stay before it
        let sig_len = token.len() - sig_start - 1;
        let at = sig_start + pick.index(sig_len);
        let replacement = if token.as_bytes()[at] == b'A' { "B" } else { "A" };

        let mut tampered = token.clone();
        tampered.replace_range(at..at + 1, replacement);

        prop_assert!(matches!(tokens.verify(&tampered), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn other_secret_rejected(claim in arb_claim()) {
        let token = service().mint(&claim).unwrap();
        let other = TokenService::from_secret(b"another-secret", None);
        prop_assert!(matches!(other.verify(&token), Err(TokenError::InvalidToken)));
    }
}
