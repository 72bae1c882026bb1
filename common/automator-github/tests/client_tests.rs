//! Request and response mapping of the real client against a local HTTP stub

use automator_github::{
    ACCEPT_V3, GitHubClient, GitHubError, PullRequestParams, RepoId, TreeEntry,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// One request as the stub saw it
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Serves one scripted response per connection, in order
struct StubServer {
    base: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    async fn start(responses: Vec<(u16, Value)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                let request = read_request(&mut stream).await;
                recorded.lock().unwrap().push(request);

                let body = body.to_string();
                let response = format!(
                    "HTTP/1.1 {} Scripted\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.ok();
            }
        });

        Self { base, requests }
    }

    fn client(&self, token: Option<&str>) -> GitHubClient {
        GitHubClient::with_api_base(&self.base, token.map(str::to_string))
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap().split(' ');
    let method = request_line.next().unwrap().to_string();
    let path = request_line.next().unwrap().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(key, _)| key == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before body was complete");
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();

    Recorded {
        method,
        path,
        headers,
        body,
    }
}

fn repo() -> RepoId {
    RepoId::new("o", "n")
}

#[tokio::test]
async fn test_git_data_sequence_hits_expected_endpoints() {
    let server = StubServer::start(vec![
        (
            200,
            json!({"ref": "refs/heads/main", "object": {"sha": "base-sha", "type": "commit"}}),
        ),
        (201, json!({"sha": "blob-sha"})),
        (201, json!({"sha": "tree-sha"})),
        (201, json!({"sha": "commit-sha"})),
        (
            201,
            json!({"ref": "refs/heads/x", "node_id": "REF_1", "object": {"sha": "commit-sha", "type": "commit"}}),
        ),
    ])
    .await;
    let client = server.client(Some("tok"));
    let repo = repo();

    let base = client.get_branch_head_sha(&repo, "main").await.unwrap();
    let blob = client.create_blob(&repo, "p/q.md", "# hi").await.unwrap();
    let tree = client
        .create_tree(&repo, &base, &[TreeEntry::blob("p/q.md", &blob)])
        .await
        .unwrap();
    let commit = client
        .create_commit(&repo, "msg", &tree, &[base.clone()])
        .await
        .unwrap();
    let git_ref = client.create_ref(&repo, "x", &commit).await.unwrap();

    assert_eq!(base, "base-sha");
    assert_eq!(blob, "blob-sha");
    assert_eq!(tree, "tree-sha");
    assert_eq!(commit, "commit-sha");
    assert_eq!(git_ref.ref_name, "refs/heads/x");
    assert_eq!(git_ref.object.sha, "commit-sha");
    assert_eq!(git_ref.node_id.as_deref(), Some("REF_1"));

    let requests = server.requests();
    let routes: Vec<(&str, &str)> = requests
        .iter()
        .map(|r| (r.method.as_str(), r.path.as_str()))
        .collect();
    assert_eq!(
        routes,
        vec![
            ("GET", "/repos/o/n/git/ref/heads/main"),
            ("POST", "/repos/o/n/git/blobs"),
            ("POST", "/repos/o/n/git/trees"),
            ("POST", "/repos/o/n/git/commits"),
            ("POST", "/repos/o/n/git/refs"),
        ]
    );

    for request in &requests {
        assert_eq!(request.header("authorization"), Some("Bearer tok"));
        assert_eq!(request.header("accept"), Some(ACCEPT_V3));
        assert!(
            request
                .header("user-agent")
                .is_some_and(|ua| ua.starts_with("repo-automator/"))
        );
    }

    assert_eq!(
        requests[1].json(),
        json!({"content": "# hi", "encoding": "utf-8"})
    );
    assert_eq!(
        requests[2].json(),
        json!({
            "base_tree": "base-sha",
            "tree": [{"path": "p/q.md", "mode": "100644", "type": "blob", "sha": "blob-sha"}]
        })
    );
    assert_eq!(
        requests[3].json(),
        json!({"message": "msg", "tree": "tree-sha", "parents": ["base-sha"]})
    );
    assert_eq!(
        requests[4].json(),
        json!({"ref": "refs/heads/x", "sha": "commit-sha"})
    );
}

#[tokio::test]
async fn test_ref_lookup_accepts_only_200() {
    let server = StubServer::start(vec![(201, json!({"message": "odd"}))]).await;

    let err = server
        .client(Some("tok"))
        .get_branch_head_sha(&repo(), "main")
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        GitHubError::ReferenceNotFound { branch, status: 201, .. } if branch == "main"
    ));
    assert!(
        err.to_string()
            .starts_with("Failed to get base ref heads/main (201)")
    );
}

#[tokio::test]
async fn test_missing_branch_is_reference_not_found() {
    let server = StubServer::start(vec![(404, json!({"message": "Not Found"}))]).await;

    let err = server
        .client(Some("tok"))
        .get_branch_head_sha(&repo(), "gone")
        .await
        .unwrap_err();

    match err {
        GitHubError::ReferenceNotFound { status, body, .. } => {
            assert_eq!(status, 404);
            assert!(body.contains("Not Found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_blob_names_path_and_keeps_body() {
    let server = StubServer::start(vec![(422, json!({"message": "content too large"}))]).await;

    let err = server
        .client(Some("tok"))
        .create_blob(&repo(), "p/q.md", "x")
        .await
        .unwrap_err();

    assert!(
        err.to_string()
            .starts_with("Failed to create blob for p/q.md (422)")
    );
    match err {
        GitHubError::ObjectCreationFailed {
            object, path, body, ..
        } => {
            assert_eq!(object, "blob");
            assert_eq!(path.as_deref(), Some("p/q.md"));
            assert!(body.contains("content too large"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_tree_and_commit() {
    let server = StubServer::start(vec![
        (500, json!({"message": "tree boom"})),
        (409, json!({"message": "commit boom"})),
    ])
    .await;
    let client = server.client(Some("tok"));

    let tree = client.create_tree(&repo(), "base", &[]).await.unwrap_err();
    let commit = client
        .create_commit(&repo(), "m", "t", &["base".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(
        tree,
        GitHubError::ObjectCreationFailed { object: "tree", path: None, status: 500, .. }
    ));
    assert!(matches!(
        commit,
        GitHubError::ObjectCreationFailed { object: "commit", status: 409, .. }
    ));
}

#[tokio::test]
async fn test_creation_response_without_sha_is_malformed() {
    let server = StubServer::start(vec![(201, json!({"url": "no sha here"}))]).await;

    let err = server
        .client(Some("tok"))
        .create_blob(&repo(), "a", "b")
        .await
        .unwrap_err();

    assert!(matches!(err, GitHubError::MalformedResponse { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_existing_ref_is_ref_creation_failure() {
    let server =
        StubServer::start(vec![(422, json!({"message": "Reference already exists"}))]).await;

    let err = server
        .client(Some("tok"))
        .create_ref(&repo(), "x", "commit-sha")
        .await
        .unwrap_err();

    match err {
        GitHubError::RefCreationFailed {
            ref_name,
            status,
            body,
        } => {
            assert_eq!(ref_name, "refs/heads/x");
            assert_eq!(status, 422);
            assert!(body.contains("Reference already exists"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_issue_pull_request_and_comment_endpoints() {
    let server = StubServer::start(vec![
        (
            201,
            json!({"html_url": "https://github.com/o/n/issues/3", "number": 3, "title": "Bug", "state": "open"}),
        ),
        (
            201,
            json!({"html_url": "https://github.com/o/n/pull/4", "number": 4, "id": 44, "title": "PR", "state": "open"}),
        ),
        (
            201,
            json!({"id": 9, "html_url": "https://github.com/o/n/pull/4#issuecomment-9", "body": "nice"}),
        ),
    ])
    .await;
    let client = server.client(Some("tok"));
    let repo = repo();

    let issue = client.create_issue(&repo, "Bug", "details").await.unwrap();
    let pr = client
        .create_pull_request(PullRequestParams::new(&repo, "PR", "feature", "main", "body").as_draft())
        .await
        .unwrap();
    let comment = client
        .comment_on_pull_request(&repo, 4, "nice")
        .await
        .unwrap();

    assert_eq!(issue.number, 3);
    assert_eq!(issue.extra["state"], "open");
    assert_eq!(pr.id, 44);
    assert_eq!(comment.id, 9);

    let requests = server.requests();
    assert_eq!(requests[0].path, "/repos/o/n/issues");
    assert_eq!(requests[0].json(), json!({"title": "Bug", "body": "details"}));
    assert_eq!(requests[1].path, "/repos/o/n/pulls");
    assert_eq!(
        requests[1].json(),
        json!({"title": "PR", "head": "feature", "base": "main", "body": "body", "draft": true})
    );
    assert_eq!(requests[2].path, "/repos/o/n/issues/4/comments");
    assert_eq!(requests[2].json(), json!({"body": "nice"}));
}

#[tokio::test]
async fn test_rejected_pull_request_keeps_body() {
    let server = StubServer::start(vec![(
        422,
        json!({"message": "Validation Failed", "errors": [{"message": "No commits between main and feature"}]}),
    )])
    .await;

    let err = server
        .client(Some("tok"))
        .create_pull_request(PullRequestParams::new(&repo(), "PR", "feature", "main", ""))
        .await
        .unwrap_err();

    match err {
        GitHubError::RequestFailed {
            action,
            status,
            body,
        } => {
            assert_eq!(action, "create pull request");
            assert_eq!(status, 422);
            assert!(body.contains("No commits between main and feature"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_anonymous_client_sends_no_authorization() {
    let server = StubServer::start(vec![(
        200,
        json!({"ref": "refs/heads/main", "object": {"sha": "s"}}),
    )])
    .await;

    server
        .client(None)
        .get_branch_head_sha(&repo(), "main")
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].header("authorization"), None);
    assert_eq!(requests[0].header("accept"), Some(ACCEPT_V3));
}
