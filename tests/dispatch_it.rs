mod common;

// crates.io
use httpmock::prelude::*;
// self
use common::*;
use nadeo_client::{error::Error, session::Session};

const CLUB_PATH: &str = "/api/token/club/mine";

async fn login(server: &MockServer, session: &Session, access: &str) {
	let pair = token_pair(access, "refresh-1");
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(BASIC_PATH);
			then.status(200).body(pair);
		})
		.await;

	session.authenticate_basic("driver", "hunter2").await.expect("Basic login should succeed.");
	mock.assert_async().await;
}

#[tokio::test]
async fn get_attaches_bearer_and_json_headers() {
	let server = MockServer::start_async().await;
	let session = session_for(&server);
	let access = fresh_token();
	let bearer = format!("nadeo_v1 t={access}");
	let resource = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(CLUB_PATH)
				.header("authorization", bearer)
				.header("accept", "application/json")
				.header("content-type", "application/json");
			then.status(200).body("{\"clubList\":[]}");
		})
		.await;

	login(&server, &session, &access).await;

	let body = session.get(&server.url(CLUB_PATH), false).await.expect("GET should succeed.");

	resource.assert_async().await;

	assert_eq!(body, "{\"clubList\":[]}");
}

#[tokio::test]
async fn cached_get_hits_network_once() {
	let server = MockServer::start_async().await;
	let session = session_for(&server);
	let resource = server
		.mock_async(|when, then| {
			when.method(GET).path(CLUB_PATH);
			then.status(200).body("{\"clubList\":[1]}");
		})
		.await;

	login(&server, &session, &fresh_token()).await;

	let target = server.url(CLUB_PATH);
	let first = session.get(&target, true).await.expect("First GET should succeed.");
	let second = session.get(&target, true).await.expect("Second GET should hit the cache.");

	resource.assert_calls_async(1).await;

	assert_eq!(first, second);
	assert_eq!(session.cache().get(&target), Some(first));
}

#[tokio::test]
async fn uncached_get_always_hits_network() {
	let server = MockServer::start_async().await;
	let session = session_for(&server);
	let resource = server
		.mock_async(|when, then| {
			when.method(GET).path(CLUB_PATH);
			then.status(200).body("{}");
		})
		.await;

	login(&server, &session, &fresh_token()).await;

	let target = server.url(CLUB_PATH);

	session.get(&target, false).await.expect("First GET should succeed.");
	session.get(&target, false).await.expect("Second GET should succeed.");

	resource.assert_calls_async(2).await;

	assert!(session.cache().is_empty());
}

#[tokio::test]
async fn cached_get_refetches_after_ttl() {
	let server = MockServer::start_async().await;
	let session = session_with(&server, |builder| builder.cache_ttl(short_ttl()));
	let resource = server
		.mock_async(|when, then| {
			when.method(GET).path(CLUB_PATH);
			then.status(200).body("{}");
		})
		.await;

	login(&server, &session, &fresh_token()).await;

	let target = server.url(CLUB_PATH);

	session.get(&target, true).await.expect("First GET should succeed.");
	session.get(&target, true).await.expect("Second GET should hit the cache.");

	resource.assert_calls_async(1).await;

	tokio::time::sleep(std::time::Duration::from_millis(500)).await;

	session.get(&target, true).await.expect("GET after the TTL should succeed.");

	resource.assert_calls_async(2).await;
}

#[tokio::test]
async fn non_200_resource_response_carries_raw_body() {
	let server = MockServer::start_async().await;
	let session = session_for(&server);
	let resource = server
		.mock_async(|when, then| {
			when.method(GET).path(CLUB_PATH);
			then.status(404).body("{\"code\":\"NotFound\",\"message\":\"Club not found\"}");
		})
		.await;

	login(&server, &session, &fresh_token()).await;

	let target = server.url(CLUB_PATH);
	let err = session.get(&target, true).await.expect_err("Non-200 responses must fail.");

	resource.assert_async().await;

	assert!(matches!(err, Error::Server { status: 404, ref body } if body.contains("Club not found")));
	assert!(err.to_string().contains("{\"code\":\"NotFound\",\"message\":\"Club not found\"}"));
	assert!(session.cache().is_empty(), "Failures are never cached.");
}

#[tokio::test]
async fn post_sends_body_and_is_never_cached() {
	let server = MockServer::start_async().await;
	let session = session_for(&server);
	let resource = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token/leaderboard/group/map").body("{\"maps\":[\"a\"]}");
			then.status(200).body("{\"records\":[]}");
		})
		.await;

	login(&server, &session, &fresh_token()).await;

	let target = server.url("/api/token/leaderboard/group/map");

	for _ in 0..2 {
		let body =
			session.post(&target, "{\"maps\":[\"a\"]}").await.expect("POST should succeed.");

		assert_eq!(body, "{\"records\":[]}");
	}

	resource.assert_calls_async(2).await;

	assert!(session.cache().is_empty());
}

#[tokio::test]
async fn due_token_is_refreshed_before_the_call() {
	let server = MockServer::start_async().await;
	let session = session_for(&server);
	let refreshed = fresh_token();
	let pair = token_pair(&refreshed, "refresh-2");
	let bearer = format!("nadeo_v1 t={refreshed}");
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path(REFRESH_PATH);
			then.status(200).body(pair);
		})
		.await;
	let resource = server
		.mock_async(|when, then| {
			when.method(GET).path(CLUB_PATH).header("authorization", bearer);
			then.status(200).body("{}");
		})
		.await;

	login(&server, &session, &due_token()).await;

	session.get(&server.url(CLUB_PATH), false).await.expect("GET should succeed.");

	refresh.assert_async().await;
	resource.assert_async().await;
}

#[tokio::test]
async fn failed_refresh_aborts_the_call() {
	let server = MockServer::start_async().await;
	let session = session_for(&server);
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path(REFRESH_PATH);
			then.status(401).body("{\"code\":401,\"message\":\"Invalid credentials.\"}");
		})
		.await;
	let resource = server
		.mock_async(|when, then| {
			when.method(GET).path(CLUB_PATH);
			then.status(200).body("{}");
		})
		.await;

	login(&server, &session, &due_token()).await;

	let err = session
		.get(&server.url(CLUB_PATH), false)
		.await
		.expect_err("Refresh failures must abort the call.");

	assert!(matches!(err, Error::Refresh(_)));

	refresh.assert_async().await;
	resource.assert_calls_async(0).await;
}

#[tokio::test]
async fn cache_hit_skips_refresh_check() {
	let server = MockServer::start_async().await;
	let session = session_for(&server);
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path(REFRESH_PATH);
			then.status(500).body("refresh should not be called");
		})
		.await;
	let resource = server
		.mock_async(|when, then| {
			when.method(GET).path(CLUB_PATH);
			then.status(200).body("{\"cached\":true}");
		})
		.await;
	let due = due_token();
	let ticket_pair = token_pair(&due, "refresh-due");
	let ticket = server
		.mock_async(|when, then| {
			when.method(POST).path(TICKET_PATH);
			then.status(200).body(ticket_pair);
		})
		.await;

	login(&server, &session, &fresh_token()).await;

	let target = server.url(CLUB_PATH);

	session.get(&target, true).await.expect("First GET should succeed.");
	session.authenticate_with_ticket("ticket").await.expect("Ticket login should succeed.");
	ticket.assert_async().await;

	let body = session.get(&target, true).await.expect("Cached GET should succeed.");

	assert_eq!(body, "{\"cached\":true}");

	refresh.assert_calls_async(0).await;
	resource.assert_calls_async(1).await;
}
