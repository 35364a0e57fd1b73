//! Session tests against a local hand-rolled HTTP server, so the chunk
//! boundaries seen by the client are exactly the ones written here.

use std::io::{Read, Write};
use std::net::TcpListener;

use console::session::{Submission, TerminalSession};

/// Bind an ephemeral port and serve exactly one request with `respond`.
/// Returns the base URL and the server thread handle.
fn one_shot_server<F>(respond: F) -> (String, std::thread::JoinHandle<()>)
where
    F: FnOnce(&mut std::net::TcpStream) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind local test server");
    let port = listener
        .local_addr()
        .expect("failed to read local addr")
        .port();

    let server = std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request_buf = [0_u8; 4096];
            let _ = stream.read(&mut request_buf);
            respond(&mut stream);
        }
    });

    (format!("http://127.0.0.1:{port}"), server)
}

fn write_chunked(stream: &mut std::net::TcpStream, chunks: &[&[u8]]) {
    let head = b"HTTP/1.1 200 OK\r\n\
        Content-Type: text/plain; charset=utf-8\r\n\
        Transfer-Encoding: chunked\r\n\
        Connection: close\r\n\r\n";
    let _ = stream.write_all(head);
    for chunk in chunks {
        let _ = stream.write_all(format!("{:x}\r\n", chunk.len()).as_bytes());
        let _ = stream.write_all(chunk);
        let _ = stream.write_all(b"\r\n");
        let _ = stream.flush();
        std::thread::sleep(std::time::Duration::from_millis(20));
    }
    let _ = stream.write_all(b"0\r\n\r\n");
}

#[tokio::test]
async fn streamed_chunks_land_in_the_log_in_order() {
    let (base_url, server) = one_shot_server(|stream| {
        write_chunked(stream, &[b"build started\n", b"build finished\n"]);
    });

    let mut session = TerminalSession::new(&base_url, "/workspace").expect("session");
    let result = session.submit("make build").await;
    server.join().expect("server thread");

    assert_eq!(result, Submission::Executed);
    assert!(!session.is_running());

    let log = session.log();
    let echo = log
        .iter()
        .position(|l| l == "$ make build")
        .expect("command echo");
    let tail: Vec<&String> = log[echo + 1..].iter().collect();
    assert!(tail.iter().any(|l| l.contains("build started")));
    assert!(tail.iter().any(|l| l.contains("build finished")));
    // A completed stream ends with the blank separator.
    assert_eq!(log.last().map(String::as_str), Some(""));
}

#[tokio::test]
async fn failure_status_becomes_an_error_line_without_a_body() {
    let (base_url, server) = one_shot_server(|stream| {
        let _ = stream.write_all(
            b"HTTP/1.1 500 Internal Server Error\r\n\
              Content-Length: 21\r\n\
              Connection: close\r\n\r\n\
              Internal server error",
        );
    });

    let mut session = TerminalSession::new(&base_url, "/workspace").expect("session");
    session.submit("boom").await;
    server.join().expect("server thread");

    let last = session.log().last().expect("log entry");
    assert_eq!(last, "Error: 500 Internal Server Error");
}

#[tokio::test]
async fn multibyte_output_split_across_chunks_is_reassembled() {
    // U+3042 U+3044 ("あい") with the chunk boundary inside the first
    // character's byte sequence.
    let (base_url, server) = one_shot_server(|stream| {
        write_chunked(stream, &[&[0xE3, 0x81], &[0x82, 0xE3, 0x81, 0x84, b'\n']]);
    });

    let mut session = TerminalSession::new(&base_url, "/workspace").expect("session");
    session.submit("cat notes.txt").await;
    server.join().expect("server thread");

    assert!(
        session.log().iter().any(|l| l.contains("あい")),
        "log: {:?}",
        session.log()
    );
    assert!(
        !session.log().iter().any(|l| l.contains('\u{FFFD}')),
        "split sequence must not decode lossily"
    );
}

#[tokio::test]
async fn unreachable_server_yields_an_error_entry() {
    let mut session =
        TerminalSession::new("http://127.0.0.1:1", "/workspace").expect("session");
    let result = session.submit("echo hi").await;

    assert_eq!(result, Submission::Executed);
    assert!(!session.is_running());
    assert!(session
        .log()
        .last()
        .map(|l| l.starts_with("Error: "))
        .unwrap_or(false));
}
