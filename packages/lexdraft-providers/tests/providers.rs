use std::{
	io::{BufRead, BufReader, Read, Write},
	net::TcpListener,
	thread::{self, JoinHandle},
};

use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};

use lexdraft_config::{LlmProviderConfig, Sampling};
use lexdraft_providers::{ChatMessage, Error, chat};

const SAMPLING: Sampling = Sampling { temperature: 0.25, top_p: 0.9 };

/// Answers a single request and hands back the request body.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
	let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener.");
	let addr = listener.local_addr().expect("Failed to read listener address.");
	let handle = thread::spawn(move || {
		let (stream, _) = listener.accept().expect("Failed to accept connection.");
		let mut reader = BufReader::new(stream.try_clone().expect("Failed to clone stream."));
		let mut content_length = 0;

		loop {
			let mut line = String::new();

			reader.read_line(&mut line).expect("Failed to read request line.");

			if line == "\r\n" || line.is_empty() {
				break;
			}
			if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
				content_length = value.trim().parse().expect("Invalid content length.");
			}
		}

		let mut request_body = vec![0; content_length];

		reader.read_exact(&mut request_body).expect("Failed to read request body.");

		let mut stream = stream;

		write!(
			stream,
			"HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
			body.len()
		)
		.expect("Failed to write response.");

		String::from_utf8(request_body).expect("Request body is not UTF-8.")
	});

	(format!("http://{addr}"), handle)
}

fn provider(api_base: String) -> LlmProviderConfig {
	LlmProviderConfig { api_base, ..lexdraft_testkit::sample_config().providers.llm }
}

#[test]
fn builds_bearer_auth_header() {
	let headers = lexdraft_providers::auth_headers(Some("secret"), &Map::new())
		.expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn omits_authorization_without_a_key() {
	let mut defaults = Map::new();

	defaults.insert("X-Trace".to_string(), Value::String("on".to_string()));

	let headers =
		lexdraft_providers::auth_headers(None, &defaults).expect("Failed to build headers.");

	assert!(headers.get(AUTHORIZATION).is_none());
	assert_eq!(headers.get("x-trace").expect("Missing default header."), "on");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("X-Retries".to_string(), Value::from(3));

	assert!(matches!(
		lexdraft_providers::auth_headers(None, &defaults),
		Err(Error::InvalidConfig { .. })
	));
}

#[test]
fn posts_sampling_and_returns_trimmed_content() {
	let (api_base, server) = serve_once(
		"200 OK",
		r#"{"choices":[{"message":{"role":"assistant","content":"\n1.1. Payment is made by bank transfer.\n"}}]}"#,
	);
	let text = chat::generate(
		&provider(api_base),
		&[ChatMessage::system("Draft."), ChatMessage::user("Payment terms.")],
		SAMPLING,
	)
	.expect("Generation failed.");
	let request: Value = serde_json::from_str(&server.join().expect("Server thread panicked."))
		.expect("Request body is not JSON.");

	assert_eq!(text, "1.1. Payment is made by bank transfer.");
	assert_eq!(request["model"], "stub");
	assert_eq!(request["messages"][1]["role"], "user");
	assert_eq!(request["max_tokens"], 1_200);
	assert!((request["top_p"].as_f64().expect("Missing top_p.") - 0.9).abs() < 1e-6);
}

#[test]
fn missing_model_is_unavailable() {
	let (api_base, server) = serve_once("404 Not Found", r#"{"error":"model not found"}"#);
	let result = chat::generate(&provider(api_base), &[ChatMessage::user("x")], SAMPLING);

	server.join().expect("Server thread panicked.");

	assert!(matches!(result, Err(Error::ModelUnavailable { .. })));
}

#[test]
fn refused_connection_is_unavailable() {
	let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener.");
	let addr = listener.local_addr().expect("Failed to read listener address.");

	drop(listener);

	let result =
		chat::generate(&provider(format!("http://{addr}")), &[ChatMessage::user("x")], SAMPLING);

	assert!(matches!(result, Err(Error::ModelUnavailable { .. })));
}
