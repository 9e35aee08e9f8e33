use did_url_parser::DidUrl;

fn main() {
    // parse a string into DID URL, keeping the parse trace
    let did_url =
        DidUrl::parse_with_diagnostics("did:example:123/path?service=agent#keys-1".into()).unwrap();
    println!("{:?}", did_url.did().did());
    println!("{:?}", did_url.method());
    println!("{:?}", did_url.id());
    println!("{:?}", did_url.path());
    println!("{:?}", did_url.queries());
    println!("{:?}", did_url.fragment());

    if let Some(diagnostics) = did_url.diagnostics() {
        println!("{}", diagnostics.parse_tree());
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&did_url.to_json_object(true).unwrap()).unwrap()
    );
}
