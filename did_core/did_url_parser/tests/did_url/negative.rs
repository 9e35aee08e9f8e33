use did_url_parser::{DidUrl, ParseError};

macro_rules! test_cases_negative {
    ($($name:ident: $input:expr)*) => {
        $(
            #[test]
            fn $name() {
                let _ = env_logger::try_init();
                println!("Testing {}", $input);
                let result = DidUrl::parse($input.to_string());
                assert!(
                    matches!(result, Err(ParseError::SyntaxError { .. })),
                    "{:?}",
                    result
                );
            }
        )*
    };
}

test_cases_negative! {
    test_failure_case1: ""
    test_failure_case2: "not-a-did"
    test_failure_case3: "did:example"
    test_failure_case4: "example:123"
    test_failure_case5: "/"
    test_failure_case6: "/?"
    test_failure_case7: "/#"
    test_failure_case8: ";"
    test_failure_case9: "#fragment"
    test_failure_case10: "?query=value"
    test_failure_case11: "did:example:123456789abcdefghi#fragment1#fragment2"
    test_failure_case12: "did:example:123456789abcdefghi&query1=value1"
    test_failure_case13: "did:example:123456789abcdefghi?query1=v^lue1"
    test_failure_case14: "did:example:123456789abcdefghi#fr^gment"
    test_failure_case15: "did:example:"
    test_failure_case16: "did:example:123:"
    test_failure_case17: "did:Example:123"
    test_failure_case18: "did::123"
    test_failure_case19: "did:ex_ample:123"
    test_failure_case20: "did:example:123?a=%"
    test_failure_case21: "did:example:123?a=%G1"
    test_failure_case22: "did:example:123?a=%FF"
    test_failure_case23: "did:example:12%3"
    test_failure_case24: "did:example:123 trailing"
    test_failure_case25: "did:example:123/pa th"
    test_failure_case26: "did:example:123#\u{e9}"
}

#[test]
fn test_failure_positions() {
    let cases = [
        ("", 0, vec!["did-url"]),
        ("example:123", 0, vec!["did-url"]),
        ("did:example", 11, vec!["\":\""]),
        ("did:example:", 12, vec!["method-specific-id"]),
        ("did:example:123?a=%", 19, vec!["HEXDIG"]),
        ("did:example:12%3", 16, vec!["HEXDIG"]),
        ("did:example:123?a=%FF", 16, vec!["UTF-8 percent-encoded octets"]),
    ];

    for (input, position, expected) in cases {
        assert_eq!(
            DidUrl::parse(input.to_string()).unwrap_err(),
            ParseError::SyntaxError {
                position,
                expected: expected.into_iter().map(String::from).collect(),
            },
            "{}",
            input
        );
    }
}

#[test]
fn test_trailing_input_lists_continuations() {
    let error = DidUrl::parse("did:example:123 trailing".to_string()).unwrap_err();
    assert_eq!(
        error,
        ParseError::SyntaxError {
            position: 15,
            expected: vec![
                "idchar".to_string(),
                "\":\"".to_string(),
                "path-abempty".to_string(),
                "\"?\"".to_string(),
                "\"#\"".to_string(),
                "end of input".to_string(),
            ],
        }
    );
}
