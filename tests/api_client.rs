// tests/api_client.rs
//
// The live `Api` client against a one-shot local HTTP server.
//
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use serde_json::{json, Value};

use namus_scrape::collect::{CaseReference, CaseSource, Region};
use namus_scrape::config::consts::USER_AGENT;
use namus_scrape::config::options::CaseType;
use namus_scrape::core::net::Api;
use namus_scrape::Error;

/// Request as the server saw it.
struct Seen {
    head: String,
    body: String,
}

impl Seen {
    fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|l| {
            let (k, v) = l.split_once(':')?;
            k.trim().eq_ignore_ascii_case(name).then(|| v.trim().to_string())
        })
    }
}

/// Accept one connection, answer with `status` and `body`, hand back the request.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Seen>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() { break; }
            head.push_str(&line);
        }
        let len = head
            .lines()
            .find_map(|l| {
                let (k, v) = l.split_once(':')?;
                k.trim().eq_ignore_ascii_case("content-length").then(|| v.trim().parse().ok())?
            })
            .unwrap_or(0usize);
        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf).unwrap();

        let resp = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(resp.as_bytes()).unwrap();
        stream.flush().unwrap();

        Seen { head, body: String::from_utf8(buf).unwrap() }
    });

    (format!("http://{addr}/api"), handle)
}

fn missing_persons() -> CaseType {
    CaseType::new("MissingPersons", "stateOfLastContact")
}

#[test]
fn search_posts_json_body_with_user_agent() {
    let (base, server) = serve_once("200 OK", r#"{"count":1,"results":[{"namus2Number":5}]}"#);
    let api = Api::new(&base, USER_AGENT).unwrap();

    let refs = api
        .search_case_ids(&missing_persons(), &Region { name: "New Mexico".into() }, 10_000)
        .unwrap();
    assert_eq!(refs, vec![CaseReference { id: "5".into() }]);

    let seen = server.join().unwrap();
    assert!(seen.request_line().starts_with("POST /api/CaseSets/NamUs/MissingPersons/Search "));
    assert_eq!(seen.header("user-agent").as_deref(), Some(USER_AGENT));
    assert_eq!(seen.header("content-type").as_deref(), Some("application/json"));

    let body: Value = serde_json::from_str(&seen.body).unwrap();
    assert_eq!(
        body,
        json!({
            "take": 10000,
            "projections": ["namus2Number"],
            "predicates": [{
                "field": "stateOfLastContact",
                "operator": "IsIn",
                "values": ["New Mexico"],
            }],
        })
    );
}

#[test]
fn non_200_search_is_an_error() {
    let (base, server) = serve_once("404 Not Found", "{}");
    let api = Api::new(&base, USER_AGENT).unwrap();

    let err = api
        .search_case_ids(&missing_persons(), &Region { name: "Ohio".into() }, 10)
        .unwrap_err();
    assert!(matches!(err, Error::Status { status: 404, .. }));
    server.join().unwrap();
}

#[test]
fn non_json_detail_body_is_dropped() {
    let (base, server) = serve_once("200 OK", "<html>maintenance</html>");
    let api = Api::new(&base, USER_AGENT).unwrap();

    let err = api
        .fetch_case_detail(&missing_persons(), &CaseReference { id: "42".into() })
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));

    let seen = server.join().unwrap();
    assert!(seen.request_line().starts_with("GET /api/CaseSets/NamUs/MissingPersons/Cases/42 "));
    assert_eq!(seen.header("user-agent").as_deref(), Some(USER_AGENT));
}

#[test]
fn json_detail_body_is_returned_verbatim() {
    let body = r#"{"idFormatted":"MP42","images":[]}"#;
    let (base, server) = serve_once("200 OK", body);
    let api = Api::new(&base, USER_AGENT).unwrap();

    let got = api
        .fetch_case_detail(&missing_persons(), &CaseReference { id: "42".into() })
        .unwrap();
    assert_eq!(got, body);
    server.join().unwrap();
}

#[test]
fn regions_list_from_states_endpoint() {
    let (base, server) = serve_once("200 OK", r#"[{"name":"Alabama","id":1},{"name":"Alaska"}]"#);
    let api = Api::new(&base, USER_AGENT).unwrap();

    let regions = api.list_regions().unwrap();
    let names: Vec<_> = regions.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alabama", "Alaska"]);

    let seen = server.join().unwrap();
    assert!(seen.request_line().starts_with("GET /api/CaseSets/NamUs/States "));
}
