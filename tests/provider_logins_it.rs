#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use common::{APP_ID, APP_SECRET, PUBLIC_KEY, RETURN_URL};
use oauth2_social::{auth::ProfileField, provider::ProviderKind};

#[tokio::test]
async fn github_login_completes_end_to_end() {
	let server = MockServer::start_async().await;
	let client = common::client(ProviderKind::GitHub, &server);
	let login_url = client.build_login_url(&common::return_url());
	let pairs = login_url.query_pairs().into_owned().collect::<Vec<_>>();

	assert_eq!(
		pairs,
		vec![
			("client_id".to_owned(), APP_ID.to_owned()),
			("response_type".to_owned(), "code".to_owned()),
			("redirect_uri".to_owned(), RETURN_URL.to_owned()),
			("scope".to_owned(), "user,user:email".to_owned()),
		]
	);

	let token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.header("accept", "application/json")
				.query_param("client_id", APP_ID)
				.query_param("client_secret", APP_SECRET)
				.query_param("code", "c0de")
				.query_param("redirect_uri", RETURN_URL);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"abc123\"}");
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/user").query_param("access_token", "abc123");
			then.status(200).header("content-type", "application/json").body(
				"{\"id\":7,\"login\":\"adal\",\"name\":\"Ada Lovelace\",\"email\":\"a@example.com\"}",
			);
		})
		.await;
	let result = client
		.complete_login(&common::return_url(), "c0de")
		.await
		.expect("GitHub login should complete.");

	token.assert_async().await;
	profile.assert_async().await;

	assert_eq!(result.provider.as_ref(), "github");
	assert_eq!(result.provider_user_id, "7");
	assert_eq!(result.user_name, "Ada Lovelace");
	assert_eq!(result.extra_data.get(ProfileField::FirstName), Some("Ada"));
	assert_eq!(result.extra_data.get(ProfileField::LastName), Some("Lovelace"));
	assert_eq!(result.extra_data.get(ProfileField::Email), Some("a@example.com"));
	assert_eq!(result.extra_data.len(), 4);
}

#[tokio::test]
async fn foursquare_profile_is_read_from_the_response_envelope() {
	let server = MockServer::start_async().await;
	let client = common::client(ProviderKind::Foursquare, &server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.query_param("grant_type", "authorization_code")
				.query_param("code", "c0de");
			then.status(200).body("{\"access_token\":\"fsq-token\"}");
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/users/self").query_param("oauth_token", "fsq-token");
			then.status(200).body(
				"{\"meta\":{\"code\":200},\"response\":{\"user\":{\"id\":\"33\",\
				 \"firstName\":\"Jimmy\",\"lastName\":\"Smith\",\
				 \"contact\":{\"email\":\"jimmy@example.com\"}}}}",
			);
		})
		.await;
	let grant = client
		.exchange_code(&common::return_url(), "c0de")
		.await
		.expect("Foursquare exchange should succeed.");
	let user = client.fetch_profile(&grant).await.expect("Foursquare profile should load.");

	token.assert_async().await;
	profile.assert_async().await;

	assert_eq!(grant.subject, None);
	assert_eq!(user.id(), Some("33"));
	assert_eq!(user.first_name(), Some("Jimmy"));
	assert_eq!(user.last_name(), Some("Smith"));
	assert_eq!(user.email(), Some("jimmy@example.com"));
}

#[tokio::test]
async fn instagram_posts_a_form_and_substitutes_the_user_id() {
	let server = MockServer::start_async().await;
	let client = common::client(ProviderKind::Instagram, &server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.header("content-type", "application/x-www-form-urlencoded")
				.body(
					"client_id=1&client_secret=s3cret&grant_type=authorization_code&code=c0de\
					 &redirect_uri=https%3A%2F%2Fapp.example.com%2Flogin%2Fcallback",
				);
			then.status(200).body(
				"{\"access_token\":\"ig-token\",\"user\":{\"id\":\"1574083\",\
				 \"username\":\"snoopdogg\"}}",
			);
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/users/1574083/").query_param("access_token", "ig-token");
			then.status(200).body(
				"{\"data\":{\"id\":\"1574083\",\"username\":\"snoopdogg\",\"full_name\":\"\"}}",
			);
		})
		.await;
	let grant = client
		.exchange_code(&common::return_url(), "c0de")
		.await
		.expect("Instagram exchange should succeed.");

	assert_eq!(grant.subject.as_deref(), Some("1574083"));

	let user = client.fetch_profile(&grant).await.expect("Instagram profile should load.");

	token.assert_async().await;
	profile.assert_async().await;

	assert_eq!(user.id(), Some("1574083"));
	assert_eq!(user.first_name(), Some("snoopdogg"));
	assert_eq!(user.last_name(), None);
	assert_eq!(user.email(), None);
}

#[tokio::test]
async fn mailru_profile_call_is_signed() {
	let server = MockServer::start_async().await;
	let client = common::client(ProviderKind::MailRu, &server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/token").query_param("code", "c0de");
			then.status(200).body("{\"access_token\":\"tok\",\"x_mailru_vid\":\"123\"}");
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/platform/api")
				.query_param("app_id", APP_ID)
				.query_param("method", "users.getInfo")
				.query_param("secure", "1")
				.query_param("session_key", "tok")
				.query_param("sig", "d0578f381fb5f6da23396d42e90fdf67");
			then.status(200).body(
				"[{\"uid\":\"15410773191172635989\",\"first_name\":\"Евгений\",\
				 \"last_name\":\"Маслов\",\"email\":\"emaslov@mail.ru\"}]",
			);
		})
		.await;
	let result = client
		.complete_login(&common::return_url(), "c0de")
		.await
		.expect("Mail.Ru login should complete.");

	token.assert_async().await;
	profile.assert_async().await;

	assert_eq!(result.provider_user_id, "15410773191172635989");
	assert_eq!(result.user_name, "Евгений Маслов");
	assert_eq!(result.extra_data.email(), Some("emaslov@mail.ru"));
}

#[tokio::test]
async fn odnoklassniki_signature_excludes_the_access_token() {
	let server = MockServer::start_async().await;
	let client = common::client(ProviderKind::Odnoklassniki, &server);
	let login_url = client.build_login_url(&common::return_url());

	assert!(login_url.as_str().ends_with("&scope=VALUABLE%20ACCESS"));

	server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).body("{\"access_token\":\"tok\",\"refresh_token\":\"r\"}");
		})
		.await;

	let profile = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/fb.do")
				.query_param("application_key", PUBLIC_KEY)
				.query_param("method", "users.getCurrentUser")
				.query_param("access_token", "tok")
				.query_param("sig", "73d2bb0409bdce5fb9c52826616d6527");
			then.status(200).body(
				"{\"uid\":\"561735456\",\"first_name\":\"Olga\",\"last_name\":\"Petrova\"}",
			);
		})
		.await;
	let result = client
		.complete_login(&common::return_url(), "c0de")
		.await
		.expect("Odnoklassniki login should complete.");

	profile.assert_async().await;

	assert_eq!(result.provider_user_id, "561735456");
	assert_eq!(result.user_name, "Olga Petrova");
	assert_eq!(result.extra_data.email(), None);
}

#[tokio::test]
async fn vkontakte_sends_the_captured_user_id() {
	let server = MockServer::start_async().await;
	let client = common::client(ProviderKind::VKontakte, &server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/token").query_param("code", "c0de");
			then.status(200)
				.body("{\"access_token\":\"vk-token\",\"expires_in\":43200,\"user_id\":66748}");
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/method/users.get")
				.query_param("uids", "66748")
				.query_param("fields", "uid,first_name,last_name,photo")
				.query_param("access_token", "vk-token");
			then.status(200).body(
				"{\"response\":[{\"uid\":66748,\"first_name\":\"Pavel\",\"last_name\":\"Durov\",\
				 \"photo\":\"http://cs109.vk.com/u66748/c_28.jpg\"}]}",
			);
		})
		.await;
	let grant = client
		.exchange_code(&common::return_url(), "c0de")
		.await
		.expect("VKontakte exchange should succeed.");
	let user = client.fetch_profile(&grant).await.expect("VKontakte profile should load.");

	token.assert_async().await;
	profile.assert_async().await;

	assert_eq!(grant.subject.as_deref(), Some("66748"));
	assert_eq!(user.id(), Some("66748"));
	assert_eq!(user.first_name(), Some("Pavel"));
	assert_eq!(user.last_name(), Some("Durov"));
}

#[tokio::test]
async fn yandex_falls_back_to_the_display_name() {
	let server = MockServer::start_async().await;
	let client = common::client(ProviderKind::Yandex, &server);

	server
		.mock_async(|when, then| {
			when.method(POST).path("/token").query_param("grant_type", "authorization_code");
			then.status(200).body("{\"access_token\":\"ya-token\",\"token_type\":\"bearer\"}");
		})
		.await;

	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/info").query_param("oauth_token", "ya-token");
			then.status(200).body(
				"{\"id\":\"1000034426\",\"real_name\":null,\"display_name\":\"vasya\",\
				 \"default_email\":\"test@yandex.ru\"}",
			);
		})
		.await;
	let result = client
		.complete_login(&common::return_url(), "c0de")
		.await
		.expect("Yandex login should complete.");

	profile.assert_async().await;

	assert_eq!(result.provider_user_id, "1000034426");
	assert_eq!(result.user_name, "vasya");
	assert_eq!(result.extra_data.first_name(), Some("vasya"));
	assert_eq!(result.extra_data.last_name(), None);
	assert_eq!(result.extra_data.email(), Some("test@yandex.ru"));
}
