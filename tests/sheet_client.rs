use admission_sheet_core::app::{probe_connection, submit, FormController};
use admission_sheet_core::config::{ApiConfig, AuthScheme};
use admission_sheet_core::model::{ConnectionStatus, FailureKind, Field, StudentRecord};
use admission_sheet_core::ReqwestClient;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A request as seen by the stub server.
struct Captured {
    head: String,
    body: String,
}

impl Captured {
    fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }

    fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or("")
    }
}

/// Serve exactly one request with `status` and `body`, then hand back what
/// the client sent.
async fn serve_once(status: u16, body: &'static str) -> (String, oneshot::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/sheets/test", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let head_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let length = head
            .lines()
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        while buf.len() < head_end + length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body_text = String::from_utf8_lossy(&buf[head_end..]).to_string();

        let response = format!(
            "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let _ = tx.send(Captured {
            head,
            body: body_text,
        });
    });

    (url, rx)
}

fn client(url: &str, auth: AuthScheme) -> ReqwestClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    ReqwestClient::with_client(http, ApiConfig::new(url, auth).unwrap()).unwrap()
}

fn record() -> StudentRecord {
    StudentRecord {
        student_name: "Ayesha Khan".into(),
        father_name: "Imran Khan".into(),
        student_id: "S-1042".into(),
        phone_number: "0300 1234567".into(),
        address: "12 Canal Road, Lahore".into(),
        admission_fee: "15000".into(),
        class: "7".into(),
        admission_date: "2026-09-01".into(),
    }
}

#[tokio::test]
async fn posts_the_row_with_api_key_header() {
    let (url, captured) = serve_once(200, r#"{"ok":true}"#).await;
    let api = client(&url, AuthScheme::api_key("k-123"));

    let result = submit(&api, &record()).await;
    assert!(result.success, "{}", result.message);
    assert_eq!(result.data.unwrap()["ok"], true);

    let request = captured.await.unwrap();
    assert!(request.request_line().starts_with("POST /sheets/test"));
    assert_eq!(request.header("x-api-key").as_deref(), Some("k-123"));
    assert_eq!(
        request.header("content-type").as_deref(),
        Some("application/json")
    );

    let sent: Value = serde_json::from_str(&request.body).unwrap();
    let object = sent.as_object().unwrap();
    assert_eq!(object.len(), 9);
    for field in Field::ALL {
        assert_eq!(object[field.column()], record().get(field));
    }
    assert!(object["Timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn bearer_scheme_sends_authorization() {
    let (url, captured) = serve_once(201, "[]").await;
    let api = client(&url, AuthScheme::bearer("tok"));

    assert!(submit(&api, &record()).await.success);

    let request = captured.await.unwrap();
    assert_eq!(request.header("authorization").as_deref(), Some("Bearer tok"));
    assert_eq!(request.header("x-api-key"), None);
}

#[tokio::test]
async fn denied_sheet_gives_permission_message() {
    let (url, _captured) =
        serve_once(403, r#"{"detail":"Connection to the origin sheet denied"}"#).await;
    let result = submit(&client(&url, AuthScheme::api_key("k")), &record()).await;

    assert!(!result.success);
    assert_eq!(result.failure, Some(FailureKind::PermissionDenied));
    assert_eq!(result.message, FailureKind::PermissionDenied.to_string());
}

#[tokio::test]
async fn unauthorised_gives_credential_message() {
    let (url, _captured) = serve_once(401, r#"{"detail":"Invalid API key"}"#).await;
    let result = submit(&client(&url, AuthScheme::api_key("bad")), &record()).await;

    assert!(!result.success);
    assert_eq!(result.message, FailureKind::InvalidCredential.to_string());
}

#[tokio::test]
async fn missing_sheet_gives_not_found_message() {
    let (url, _captured) = serve_once(404, r#"{"detail":"Not found"}"#).await;
    let result = submit(&client(&url, AuthScheme::api_key("k")), &record()).await;

    assert!(!result.success);
    assert_eq!(result.message, FailureKind::ResourceNotFound.to_string());
}

#[tokio::test]
async fn server_error_message_names_the_status() {
    let (url, _captured) = serve_once(500, r#"{"detail":"Internal"}"#).await;
    let result = submit(&client(&url, AuthScheme::api_key("k")), &record()).await;

    assert!(!result.success);
    assert!(result.message.contains("500"));
    assert_eq!(result.failure, Some(FailureKind::HttpError(500)));
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/sheets/test", listener.local_addr().unwrap());
    drop(listener);

    let api = client(&url, AuthScheme::api_key("k"));
    let result = submit(&api, &record()).await;

    assert!(!result.success);
    assert_eq!(result.failure, Some(FailureKind::NetworkError));
    assert_eq!(probe_connection(&api).await, ConnectionStatus::Error);
}

#[tokio::test]
async fn probe_sends_get_with_credential() {
    let (url, captured) = serve_once(200, "[]").await;
    let api = client(&url, AuthScheme::api_key("k-probe"));

    assert_eq!(probe_connection(&api).await, ConnectionStatus::Connected);

    let request = captured.await.unwrap();
    assert!(request.request_line().starts_with("GET /sheets/test"));
    assert_eq!(request.header("x-api-key").as_deref(), Some("k-probe"));
}

#[tokio::test]
async fn controller_resets_after_a_real_round_trip() {
    let (url, _captured) = serve_once(200, r#"[{"Student ID":"S-1042"}]"#).await;
    let api = client(&url, AuthScheme::api_key("k"));

    let mut form = FormController::new();
    for field in Field::ALL {
        form.update_field(field, record().get(field));
    }
    assert!(form.submit(&api).await);

    assert_eq!(form.record(), &StudentRecord::default());
    assert!(!form.is_submitting());
}
