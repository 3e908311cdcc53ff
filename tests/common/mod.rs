#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::Arc;

use binfetch::Config;

/// Minimal HTTP server for exercising the prober, fetcher and metadata
/// modules against loopback. Answers GET and HEAD from a fixed route table.
pub struct TestServer {
    pub base_url: String,
}

pub fn serve(routes: HashMap<String, (u16, Vec<u8>)>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            let routes = Arc::clone(&routes);
            std::thread::spawn(move || handle(stream, &routes));
        }
    });
    TestServer {
        base_url: format!("http://{addr}"),
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, (u16, Vec<u8>)>) {
    let mut reader = BufReader::new(match stream.try_clone() {
        Ok(clone) => clone,
        Err(_) => return,
    });
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header) {
            Ok(_) if header == "\r\n" || header.is_empty() => break,
            Ok(_) => {}
            Err(_) => return,
        }
    }

    let (status, body) = routes
        .get(&path)
        .cloned()
        .unwrap_or((404, b"not found".to_vec()));
    let reason = if status == 200 { "OK" } else { "Not Found" };
    let mut response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    if method != "HEAD" {
        response.extend_from_slice(&body);
    }
    let _ = stream.write_all(&response);
    let _ = stream.shutdown(std::net::Shutdown::Both);
}

/// A config rooted in a temp directory, pointed at the given repository and
/// metadata URLs.
pub fn test_config(root: &Path, repositories: Vec<String>, metadata_urls: Vec<String>) -> Config {
    Config {
        repositories,
        metadata_urls,
        arch: "testarch".to_string(),
        install_dir: root.join("bin"),
        cache_dir: root.join("cache"),
        max_cache_size: 10,
        binaries_to_delete: 5,
        show_progress: false,
        truncate_output: true,
    }
}
