use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use tt_source::{HttpScheduleSource, ScheduleSource, SourceError};

/// Serves exactly one canned HTTP response and returns the base URL plus the raw request.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let n = sock.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();
        let resp = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(resp.as_bytes()).await.unwrap();
        sock.shutdown().await.ok();
        request
    });
    (format!("http://{addr}"), handle)
}

#[tokio::test]
async fn fetches_requested_weekday_with_offset() {
    let (url, server) = serve_once(
        "200 OK",
        r#"[[{"name":"Matematyka","time":"8:00 - 8:45"}],[{"name":"Polski","time":"8:00 - 8:45"}]]"#,
    )
    .await;
    let source = HttpScheduleSource::new(url, None).unwrap();

    let day = source.fetch_today(1, 3).await.unwrap().unwrap();
    assert_eq!(day.lessons[0].name, "Polski");

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /?offset=3 "), "{request}");
}

#[tokio::test]
async fn weekend_index_has_no_data() {
    let (url, _server) = serve_once("200 OK", r#"[[],[],[],[],[]]"#).await;
    let source = HttpScheduleSource::new(url, None).unwrap();
    assert!(source.fetch_today(5, 0).await.unwrap().is_none());
}

#[tokio::test]
async fn server_error_is_a_failure() {
    let (url, _server) = serve_once("503 Service Unavailable", "").await;
    let source = HttpScheduleSource::new(url, None).unwrap();
    let err = source.fetch_today(0, 0).await.unwrap_err();
    assert!(matches!(err, SourceError::Status { status: 503 }));
}

#[tokio::test]
async fn unreachable_host_is_a_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpScheduleSource::new(format!("http://{addr}"), None).unwrap();
    assert!(matches!(source.fetch_today(0, 0).await, Err(SourceError::Http(_))));
}
