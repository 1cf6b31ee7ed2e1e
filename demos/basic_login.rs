//! Demonstrates a basic-credential login, a cached GET, and a proactive refresh against a local
//! mock of the authentication and data services.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use color_eyre::Result;
use httpmock::prelude::*;
use time::OffsetDateTime;
// self
use nadeo_client::{config::SessionConfig, session::Session};

fn mint_token(refresh_after: i64, expires_at: i64) -> String {
	let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
	let payload =
		URL_SAFE_NO_PAD.encode(format!(r#"{{"rat":{refresh_after},"exp":{expires_at}}}"#));

	format!("{header}.{payload}.demo")
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let now = OffsetDateTime::now_utc().unix_timestamp();
	let stale = mint_token(now - 1, now + 600);
	let fresh = mint_token(now + 3_600, now + 7_200);
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/authentication/token/basic");
			then.status(200).body(format!(
				r#"{{"accessToken":"{stale}","refreshToken":"demo-refresh"}}"#
			));
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v2/authentication/token/refresh")
				.header("authorization", "nadeo_v1 t=demo-refresh");
			then.status(200).body(format!(
				r#"{{"accessToken":"{fresh}","refreshToken":"demo-refresh-2"}}"#
			));
		})
		.await;
	let data_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/token/club/mine");
			then.status(200).body(r#"{"clubList":[]}"#);
		})
		.await;
	let session =
		Session::new(SessionConfig::builder().base_url(server.base_url()).build()?)?;

	session.authenticate_basic("demo-user", "demo-password").await?;

	let target = server.url("/api/token/club/mine");
	let first = session.get(&target, true).await?;
	let second = session.get(&target, true).await?;

	println!("Club list: {first} (cached copy: {second}).");
	println!("Token timing after refresh: {:?}.", session.timing());

	login_mock.assert_async().await;
	refresh_mock.assert_async().await;
	data_mock.assert_async().await;

	Ok(())
}
