//! Prints the login URL for a built-in provider and, when a code is supplied, finishes the login.
//!
//! ```sh
//! OAUTH2_SOCIAL_APP_ID=app OAUTH2_SOCIAL_APP_SECRET=secret \
//! 	cargo run --example social_login -- github https://app.example.com/callback [code]
//! ```

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use oauth2_social::{
	auth::AppCredentials, flows::ReqwestOAuth2Client, provider::ProviderKind, url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut args = env::args().skip(1);
	let kind = args.next().unwrap_or_else(|| "github".into()).parse::<ProviderKind>()?;
	let return_url =
		Url::parse(&args.next().unwrap_or_else(|| "https://app.example.com/callback".into()))?;
	let code = args.next();
	let mut credentials = AppCredentials::new(
		env::var("OAUTH2_SOCIAL_APP_ID").map_err(|_| eyre!("OAUTH2_SOCIAL_APP_ID is not set."))?,
		env::var("OAUTH2_SOCIAL_APP_SECRET")
			.map_err(|_| eyre!("OAUTH2_SOCIAL_APP_SECRET is not set."))?,
	);

	if let Ok(key) = env::var("OAUTH2_SOCIAL_APP_PUBLIC_KEY") {
		credentials = credentials.with_public_key(key);
	}

	let client = ReqwestOAuth2Client::for_provider(kind, credentials)?;

	println!("Send your user to {}.", client.build_login_url(&return_url));

	let Some(code) = code else {
		println!("Pass the `code` from the {kind} redirect as the third argument to finish.");

		return Ok(());
	};
	let result = client.complete_login(&return_url, &code).await?;

	println!("Signed in {} ({}) via {}.", result.user_name, result.provider_user_id, kind);

	for (field, value) in result.extra_data.iter() {
		println!("  {field}: {value}");
	}

	Ok(())
}
