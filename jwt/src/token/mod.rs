//! Building tokens and parsing them back

pub use builder::{Builder, TokenBuilder};
pub use parser::Parser;
pub use plain::Plain;
pub use timed::TimedRequiringBuilder;

mod builder;
mod parser;
mod plain;
mod timed;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rstest_reuse::apply;
    use time::macros::datetime;

    use crate::prelude::*;
    use crate::test_utils::*;

    #[apply(all_signers)]
    fn parsed_token_should_equal_built_one(#[case] case: SignerCase) {
        let built = TokenBuilder::default()
            .identified_by("1")
            .issued_by("http://api.abc.com")
            .permitted_for(["http://client.abc.com"])
            .issued_at(datetime!(2021-02-21 20:15:11.017448 UTC))
            .expires_at(datetime!(2021-03-18 13:38:45.008455 UTC))
            .with_claim("scope", vec!["read", "write"])
            .unwrap()
            .with_claim("nested", ClaimValue::from(serde_json::json!({"a": 1, "b": [true, null]})))
            .unwrap()
            .get_token(case.signer.as_ref(), &case.signing_key)
            .unwrap();

        let parsed = Parser::default().parse(&built.to_string()).unwrap();
        assert_eq!(parsed, built);
        assert_eq!(parsed.to_string(), built.to_string());
        assert!(
            case.signer
                .verify(parsed.signature().hash(), parsed.payload().as_bytes(), &case.verification_key)
                .unwrap()
        );
    }

    #[test]
    fn unsecured_token_should_round_trip() {
        let built = TokenBuilder::default()
            .related_to("user")
            .get_token(&Unsecured, &InMemory::empty())
            .unwrap();
        assert!(built.to_string().ends_with('.'));
        let parsed = Parser::default().parse(&built.to_string()).unwrap();
        assert_eq!(parsed, built);
        assert!(parsed.signature().is_empty());
    }
}
