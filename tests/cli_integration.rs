use serde_json::Value;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

const URL_BASE: &str = "/th?id=OHR.TestImage_EN-US1234567890";
const IMAGE_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0fake-jpeg-payload\xFF\xD9";

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "bingwall-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write test file");
}

struct Route {
    prefix: &'static str,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

struct FakeServer {
    base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeServer {
    fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let base = format!("http://{}", listener.local_addr().expect("addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&buf).into_owned();
                let path = request
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                seen.lock().expect("lock").push(path.clone());

                let (status, content_type, body) = routes
                    .iter()
                    .find(|r| path.starts_with(r.prefix))
                    .map(|r| (r.status, r.content_type, r.body.clone()))
                    .unwrap_or((404, "text/plain", b"not found".to_vec()));
                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    _ => "Error",
                };
                let head = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes());
                let _ = stream.write_all(&body);
                let _ = stream.flush();
            }
        });

        Self { base, requests }
    }

    fn provider_url(&self) -> String {
        format!("{}/HPImageArchive.aspx", self.base)
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("lock").clone()
    }
}

fn provider_route(body: &str) -> Route {
    Route {
        prefix: "/HPImageArchive.aspx",
        status: 200,
        content_type: "application/json",
        body: body.as_bytes().to_vec(),
    }
}

fn image_route(status: u16) -> Route {
    Route {
        prefix: "/th?id=",
        status,
        content_type: "image/jpeg",
        body: IMAGE_BYTES.to_vec(),
    }
}

fn provider_body() -> String {
    format!(
        r#"{{"images":[{{"startdate":"20260301","fullstartdate":"202603011600","enddate":"20260302","url":"{URL_BASE}_1920x1080.jpg","urlbase":"{URL_BASE}","copyright":"Test image (c) Tester","copyrightlink":"https://www.bing.com/search?q=test","title":"Test Image","hsh":"abcdef0123456789"}}],"tooltips":{{}}}}"#
    )
}

struct Workspace {
    root: PathBuf,
    config: PathBuf,
}

impl Workspace {
    fn new(prefix: &str, config: &str) -> Self {
        let root = unique_temp_dir(prefix);
        let config_path = root.join("bingwall.toml");
        write_file(&config_path, config);
        Self {
            root,
            config: config_path,
        }
    }

    fn data(&self, file: &str) -> PathBuf {
        self.root.join("data").join(file)
    }

    fn public(&self, file: &str) -> PathBuf {
        self.root.join("public").join(file)
    }

    fn read_json(&self, path: &Path) -> Value {
        let raw = fs::read_to_string(path).expect("read json");
        serde_json::from_str(&raw).expect("json")
    }

    fn run(&self, args: &[&str], server: Option<&FakeServer>) -> Output {
        let bin = std::env::var("CARGO_BIN_EXE_bingwall").unwrap_or_else(|_| {
            let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            path.push("target");
            path.push("debug");
            if cfg!(windows) {
                path.push("bingwall.exe");
            } else {
                path.push("bingwall");
            }
            path.to_string_lossy().into_owned()
        });
        let mut cmd = Command::new(bin);
        cmd.current_dir(&self.root)
            .args(args)
            .arg("--config")
            .arg(&self.config)
            .arg("--data-dir")
            .arg(self.root.join("data"))
            .arg("--public-dir")
            .arg(self.root.join("public"))
            .arg("--timezone")
            .arg("UTC")
            .env_remove("BINGWALL_LOG");
        if let Some(server) = server {
            cmd.arg("--provider-url")
                .arg(server.provider_url())
                .arg("--image-host")
                .arg(&server.base);
        }
        cmd.output().expect("run bingwall")
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn run_fetches_downloads_and_publishes() {
    let server = FakeServer::start(vec![provider_route(&provider_body()), image_route(200)]);
    let ws = Workspace::new("full-run", "");

    let output = ws.run(&["run", "--market", "en-US"], Some(&server));
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let provider_request = server
        .requests()
        .into_iter()
        .find(|p| p.starts_with("/HPImageArchive.aspx"))
        .expect("provider was queried");
    for param in ["format=js", "idx=0", "n=1", "mkt=en-US"] {
        assert!(provider_request.contains(param), "{provider_request} lacks {param}");
    }

    let latest = ws.read_json(&ws.data("latest.json"));
    let date = latest["date"].as_str().expect("date").to_string();
    assert_eq!(latest["title"], "Test Image");
    assert_eq!(
        latest["imageUrl"].as_str(),
        Some(format!("{}{URL_BASE}_1920x1080.jpg", server.base).as_str())
    );
    assert_eq!(latest["market"], "en-US");
    assert!(
        latest["id"]
            .as_str()
            .is_some_and(|id| id.starts_with(&date.replace('-', "")))
    );

    let filename = format!("{date}_Test_Image.jpg");
    assert_eq!(
        latest["localPath"].as_str(),
        Some(format!("/wallpapers/{filename}").as_str())
    );
    let image = fs::read(ws.public("wallpapers").join(&filename)).expect("image written");
    assert_eq!(image, IMAGE_BYTES);

    let history = ws.read_json(&ws.data("history.json"));
    assert_eq!(history.as_array().map(Vec::len), Some(1));
    assert_eq!(history[0], latest);

    let html = fs::read_to_string(ws.public("index.html")).expect("index.html");
    assert!(html.contains(&format!("<img src=\"/wallpapers/{filename}\"")));
    assert!(html.contains("<h2>Test Image</h2>"));

    let api_latest = ws.read_json(&ws.public("api/latest.json"));
    assert_eq!(api_latest["status"], "success");
    assert_eq!(api_latest["data"], latest);
    let api_all = ws.read_json(&ws.public("api/all.json"));
    assert_eq!(api_all["count"], 1);
}

#[test]
fn run_twice_on_same_day_keeps_one_record() {
    let server = FakeServer::start(vec![provider_route(&provider_body()), image_route(200)]);
    let ws = Workspace::new("same-day", "");

    for _ in 0..2 {
        let output = ws.run(&["--no-download"], Some(&server));
        assert!(output.status.success(), "stderr: {}", stderr(&output));
    }

    let history = ws.read_json(&ws.data("history.json"));
    assert_eq!(history.as_array().map(Vec::len), Some(1));
    assert!(history[0].get("localPath").is_none());
    assert!(!ws.public("wallpapers").exists());
}

#[test]
fn provider_error_fails_without_writing() {
    let server = FakeServer::start(vec![Route {
        prefix: "/HPImageArchive.aspx",
        status: 500,
        content_type: "text/plain",
        body: b"boom".to_vec(),
    }]);
    let ws = Workspace::new("provider-error", "");

    let output = ws.run(&["run"], Some(&server));

    assert_eq!(output.status.code(), Some(1));
    assert!(!ws.root.join("data").exists());
    assert!(!ws.root.join("public").exists());
}

#[test]
fn empty_image_list_fails() {
    let server = FakeServer::start(vec![provider_route(r#"{"images":[]}"#)]);
    let ws = Workspace::new("no-images", "");

    let output = ws.run(&["run"], Some(&server));

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no images"));
    assert!(!ws.root.join("data").exists());
}

#[test]
fn image_download_failure_still_publishes() {
    let server = FakeServer::start(vec![provider_route(&provider_body()), image_route(404)]);
    let ws = Workspace::new("download-fail", "");

    let output = ws.run(&["run"], Some(&server));
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let latest = ws.read_json(&ws.data("latest.json"));
    assert!(latest.get("localPath").is_none());

    let remote = format!("{}{URL_BASE}_1920x1080.jpg", server.base);
    let html = fs::read_to_string(ws.public("index.html")).expect("index.html");
    assert!(html.contains(&format!("<img src=\"{remote}\"")));
    assert_eq!(ws.read_json(&ws.public("api/all.json"))["count"], 1);
}

#[test]
fn config_file_controls_history_and_page() {
    let ws = Workspace::new(
        "config",
        r##"
[history]
max_records = 2

[html]
title = "Integration Gallery"

[api]
generate = false
"##,
    );
    let history: Vec<Value> = ["2026-03-03", "2026-03-02", "2026-03-01"]
        .iter()
        .map(|date| {
            serde_json::json!({
                "id": format!("{}_test", date.replace('-', "")),
                "date": date,
                "timestamp": format!("{date} 08:00:00"),
                "title": format!("Day {date}"),
                "imageUrl": format!("https://www.bing.com/th?id={date}_1920x1080.jpg"),
            })
        })
        .collect();
    write_file(
        &ws.data("history.json"),
        &serde_json::to_string_pretty(&history).expect("serialize"),
    );

    let output = ws.run(&["render"], None);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let html = fs::read_to_string(ws.public("index.html")).expect("index.html");
    assert!(html.contains("<title>Integration Gallery</title>"));
    assert!(html.contains("<h2>Day 2026-03-03</h2>"));
    assert!(html.contains("<h3>Day 2026-03-02</h3>"));
    assert!(html.contains("<h3>Day 2026-03-01</h3>"));
    assert!(!ws.public("api").exists());
}

#[test]
fn probe_prints_record_and_writes_nothing() {
    let server = FakeServer::start(vec![provider_route(&provider_body())]);
    let ws = Workspace::new("probe", "");

    let output = ws.run(&["probe", "--resolution", "800x480"], Some(&server));
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let record: Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(
        record["imageUrl"].as_str(),
        Some(format!("{}{URL_BASE}_800x480.jpg", server.base).as_str())
    );
    assert_eq!(record["copyrightLink"], "https://www.bing.com/search?q=test");
    assert!(!ws.root.join("data").exists());
    assert!(!ws.root.join("public").exists());
}

#[test]
fn markets_lists_known_codes() {
    let ws = Workspace::new("markets", "");
    let output = ws.run(&["markets"], None);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("en-US"));
    assert!(stdout.contains("zh-CN"));
}

#[test]
fn invalid_config_is_fatal() {
    let ws = Workspace::new("bad-config", "[history]\nmax_records = 0\n");
    let output = ws.run(&["render"], None);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("max_records"));
    assert!(!ws.root.join("public").exists());
}
