use std::collections::HashMap;

use did_url_parser::DidUrl;
use pretty_assertions::assert_eq;

macro_rules! test_cases_positive {
    ($($name:ident: $input:expr, $expected_did:expr, $expected_method:expr, $expected_id:expr, $expected_path:expr, $expected_query:expr, $expected_fragment:expr, $expected_queries:expr)*) => {
        $(
            #[test]
            fn $name() {
                let _ = env_logger::try_init();
                let parsed_did_url = DidUrl::parse($input.to_string()).unwrap();

                assert_eq!(parsed_did_url.did_url(), $input, "DID URL");
                assert_eq!(parsed_did_url.did().did(), $expected_did, "DID");
                assert_eq!(parsed_did_url.method(), $expected_method, "Method");
                assert_eq!(parsed_did_url.id(), $expected_id, "ID");
                assert_eq!(parsed_did_url.path(), $expected_path, "Path");
                assert_eq!(parsed_did_url.query(), $expected_query, "Query");
                assert_eq!(parsed_did_url.fragment(), $expected_fragment, "Fragment");

                let expected_queries: HashMap<String, String> = $expected_queries;
                assert_eq!(parsed_did_url.queries(), &expected_queries, "Queries");
            }
        )*
    };
}

fn queries(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

test_cases_positive! {
    test_case1:
        "did:example:namespace:123456789abcdefghi",
        "did:example:namespace:123456789abcdefghi",
        "example",
        "namespace:123456789abcdefghi",
        None,
        None,
        None,
        HashMap::new()

    test_case2:
        "did:example:namespace:123456789abcdefghi/path",
        "did:example:namespace:123456789abcdefghi",
        "example",
        "namespace:123456789abcdefghi",
        Some("/path"),
        None,
        None,
        HashMap::new()

    test_case3:
        "did:example:namespace:123456789abcdefghi/path?query1=value1&query2=value2",
        "did:example:namespace:123456789abcdefghi",
        "example",
        "namespace:123456789abcdefghi",
        Some("/path"),
        Some("query1=value1&query2=value2"),
        None,
        queries(&[("query1", "value1"), ("query2", "value2")])

    test_case4:
        "did:example:namespace:123456789abcdefghi/path?query=value#fragment",
        "did:example:namespace:123456789abcdefghi",
        "example",
        "namespace:123456789abcdefghi",
        Some("/path"),
        Some("query=value"),
        Some("fragment"),
        queries(&[("query", "value")])

    test_case5:
        "did:example:namespace:123456789abcdefghi?query1=value1&query2=value2#fragment",
        "did:example:namespace:123456789abcdefghi",
        "example",
        "namespace:123456789abcdefghi",
        None,
        Some("query1=value1&query2=value2"),
        Some("fragment"),
        queries(&[("query1", "value1"), ("query2", "value2")])

    test_case6:
        "did:example:namespace:123456789abcdefghi#fragment",
        "did:example:namespace:123456789abcdefghi",
        "example",
        "namespace:123456789abcdefghi",
        None,
        None,
        Some("fragment"),
        HashMap::new()

    test_case7:
        "did:example:123456789abcdefghi/path#fragment",
        "did:example:123456789abcdefghi",
        "example",
        "123456789abcdefghi",
        Some("/path"),
        None,
        Some("fragment"),
        HashMap::new()

    test_case8:
        "did:example:123456789abcdefghi/path?query1=value1&query2",
        "did:example:123456789abcdefghi",
        "example",
        "123456789abcdefghi",
        Some("/path"),
        Some("query1=value1&query2"),
        None,
        queries(&[("query1", "value1"), ("query2", "")])

    test_case_empty_path:
        "did:example:123/",
        "did:example:123",
        "example",
        "123",
        Some("/"),
        None,
        None,
        HashMap::new()

    test_case_empty_query:
        "did:example:123?",
        "did:example:123",
        "example",
        "123",
        None,
        Some(""),
        None,
        HashMap::new()

    test_case_empty_fragment:
        "did:example:123#",
        "did:example:123",
        "example",
        "123",
        None,
        None,
        Some(""),
        HashMap::new()

    test_case_repeated_query_key:
        "did:example:123?a=1&a=2",
        "did:example:123",
        "example",
        "123",
        None,
        Some("a=1&a=2"),
        None,
        queries(&[("a", "2")])

    test_case_key_fragment:
        "did:example:123#keys-1",
        "did:example:123",
        "example",
        "123",
        None,
        None,
        Some("keys-1"),
        HashMap::new()

    test_case_did_web:
        "did:web:w3c-ccg.github.io:user:alice",
        "did:web:w3c-ccg.github.io:user:alice",
        "web",
        "w3c-ccg.github.io:user:alice",
        None,
        None,
        None,
        HashMap::new()

    test_case_did_sov:
        "did:sov:5nDyJVP1NrcPAttP3xwMB9#key-agreement-1",
        "did:sov:5nDyJVP1NrcPAttP3xwMB9",
        "sov",
        "5nDyJVP1NrcPAttP3xwMB9",
        None,
        None,
        Some("key-agreement-1"),
        HashMap::new()

    test_case_did_peer:
        "did:peer:2.Ez6LSbysY2xFMRpGMhb7tFTLMpeuPRaqaWM1yECx2AtzE3KCc.Vz6MkqRYqQiSgvZQdnBytw86Qbs2ZWUkGv22od935YF4s8M7V",
        "did:peer:2.Ez6LSbysY2xFMRpGMhb7tFTLMpeuPRaqaWM1yECx2AtzE3KCc.Vz6MkqRYqQiSgvZQdnBytw86Qbs2ZWUkGv22od935YF4s8M7V",
        "peer",
        "2.Ez6LSbysY2xFMRpGMhb7tFTLMpeuPRaqaWM1yECx2AtzE3KCc.Vz6MkqRYqQiSgvZQdnBytw86Qbs2ZWUkGv22od935YF4s8M7V",
        None,
        None,
        None,
        HashMap::new()

    test_case_pct_encoded_id:
        "did:example:abc%20def_ghi-jkl",
        "did:example:abc%20def_ghi-jkl",
        "example",
        "abc%20def_ghi-jkl",
        None,
        None,
        None,
        HashMap::new()

    test_case_service_relative_ref:
        "did:example:123/path/to/resource;param?service=files&relativeRef=%2Fdocs%2Fa.txt",
        "did:example:123",
        "example",
        "123",
        Some("/path/to/resource;param"),
        Some("service=files&relativeRef=%2Fdocs%2Fa.txt"),
        None,
        queries(&[("service", "files"), ("relativeRef", "/docs/a.txt")])

    test_case_plus_in_query:
        "did:example:123?name=a+b&caf%C3%A9=%E2%82%AC",
        "did:example:123",
        "example",
        "123",
        None,
        Some("name=a+b&caf%C3%A9=%E2%82%AC"),
        None,
        queries(&[("name", "a b"), ("café", "€")])

    test_case_empty_segments:
        "did:example:123/a/b//c/",
        "did:example:123",
        "example",
        "123",
        Some("/a/b//c/"),
        None,
        None,
        HashMap::new()

    test_case_fragment_with_slash_and_question_mark:
        "did:example:123#fragment?with/chars",
        "did:example:123",
        "example",
        "123",
        None,
        None,
        Some("fragment?with/chars"),
        HashMap::new()

    test_case_query_with_question_mark:
        "did:example:123?versionTime=2021-05-10T17:00:00Z&q=a?b",
        "did:example:123",
        "example",
        "123",
        None,
        Some("versionTime=2021-05-10T17:00:00Z&q=a?b"),
        None,
        queries(&[("versionTime", "2021-05-10T17:00:00Z"), ("q", "a?b")])

    test_case_uppercase_scheme:
        "DID:example:123",
        "DID:example:123",
        "example",
        "123",
        None,
        None,
        None,
        HashMap::new()
}
