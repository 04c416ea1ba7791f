//! Modrinth's v2 REST API.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::*;

/// Error object Modrinth sends instead of the expected payload.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
	error: String,
	#[serde(default)]
	description: Option<String>,
}

impl ApiErrorBody {
	fn describe(self) -> String {
		match self.description {
			Some(d) => format!("{}: {}", self.error, d),
			None => self.error,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiResponse<T> {
	Error(ApiErrorBody),
	Ok(T),
}

pub struct ModrinthClient {
	client: reqwest::Client,
	base_url: reqwest::Url,
}

impl ModrinthClient {
	/// Creates a client using the API url, user agent, timeout and https setting from `config`.
	pub fn new(config: &crate::Config) -> Result<Self, RegistryError> {
		let base_url = reqwest::Url::parse(config.api_url())
			.map_err(|e| RegistryError::InvalidUrl(format!("{}: {}", config.api_url(), e)))?;
		if base_url.cannot_be_a_base() {
			return Err(RegistryError::InvalidUrl(config.api_url().to_string()))
		}

		let client = reqwest::Client::builder()
			.user_agent(config.user_agent())
			.timeout(config.timeout())
			.https_only(config.https_only())
			.build()?;

		Ok(Self { client, base_url })
	}

	pub fn base_url(&self) -> &reqwest::Url {
		&self.base_url
	}

	/// Appends `segments` to the base url, each segment is percent encoded on its own.
	fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, RegistryError> {
		let mut url = self.base_url.clone();
		url.path_segments_mut()
			.map_err(|_| RegistryError::InvalidUrl(self.base_url.to_string()))?
			.pop_if_empty()
			.extend(segments);
		Ok(url)
	}

	async fn get_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder, identifier: &str) -> Result<T, RegistryError> {
		let response = request.send().await?;
		let status = response.status();
		let url = response.url().to_string();
		let body = response.bytes().await?;

		log::trace!("{} {}", status, url);

		if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
			let reason = serde_json::from_slice::<ApiErrorBody>(&body)
				.map(ApiErrorBody::describe)
				.unwrap_or_else(|_| status.to_string());
			return Err(RegistryError::UnknownIdentifier { identifier: identifier.to_string(), reason })
		}
		if !status.is_success() {
			return Err(RegistryError::Status { status: status.as_u16(), url })
		}

		match serde_json::from_slice::<ApiResponse<T>>(&body)? {
			ApiResponse::Ok(v) => Ok(v),
			ApiResponse::Error(e) => Err(RegistryError::UnknownIdentifier { identifier: identifier.to_string(), reason: e.describe() }),
		}
	}
}

#[async_trait::async_trait]
impl Registry for ModrinthClient {
	async fn project_versions(&self, project_id: &str, game_version: &str, loader: &str) -> Result<Vec<VersionInfo>, RegistryError> {
		let url = self.endpoint(&["project", project_id, "version"])?;
		let request = self.client.get(url).query(&[
			("game_versions", serde_json::to_string(&[game_version])?),
			("loaders", serde_json::to_string(&[loader])?),
		]);
		self.get_json(request, project_id).await
	}

	async fn version(&self, version_id: &str) -> Result<VersionInfo, RegistryError> {
		let url = self.endpoint(&["version", version_id])?;
		self.get_json(self.client.get(url), version_id).await
	}

	async fn download(&self, url: &str) -> Result<Vec<u8>, RegistryError> {
		let parsed = reqwest::Url::parse(url).map_err(|e| RegistryError::InvalidUrl(format!("{}: {}", url, e)))?;
		let response = self.client.get(parsed).send().await?;
		let status = response.status();
		if status == StatusCode::NOT_FOUND {
			return Err(RegistryError::UnknownIdentifier { identifier: url.to_string(), reason: status.to_string() })
		}
		if !status.is_success() {
			return Err(RegistryError::Status { status: status.as_u16(), url: url.to_string() })
		}
		Ok(response.bytes().await?.to_vec())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn client(api_url: &str) -> ModrinthClient {
		let mut config = crate::Config::new("1.20.1", "fabric", vec![]);
		config.set_api_url(api_url);
		ModrinthClient::new(&config).expect("failed to create client")
	}

	#[test]
	fn endpoint_joins_segments() {
		let c = client("https://api.modrinth.com/v2/");
		assert_eq!(
			c.endpoint(&["project", "fabric-api", "version"]).expect("endpoint").as_str(),
			"https://api.modrinth.com/v2/project/fabric-api/version"
		);

		let c = client("https://api.modrinth.com/v2");
		assert_eq!(c.endpoint(&["version", "OihdIimA"]).expect("endpoint").as_str(), "https://api.modrinth.com/v2/version/OihdIimA");
	}

	#[test]
	fn endpoint_escapes_segments() {
		let c = client("https://api.modrinth.com/v2/");
		let url = c.endpoint(&["project", "https://example.com/a.jar", "version"]).expect("endpoint");
		assert_eq!(url.path_segments().expect("segments").count(), 4);
	}

	#[test]
	fn invalid_api_url() {
		let mut config = crate::Config::new("1.20.1", "fabric", vec![]);
		config.set_api_url("not a url");
		assert!(matches!(ModrinthClient::new(&config), Err(RegistryError::InvalidUrl(_))));
	}

	#[test]
	fn response_shapes() {
		let ok: ApiResponse<Vec<VersionInfo>> = serde_json::from_str("[]").expect("empty list");
		assert!(matches!(ok, ApiResponse::Ok(v) if v.is_empty()));

		let err: ApiResponse<Vec<VersionInfo>> = serde_json::from_str(r#"{"error": "invalid_input", "description": "bad id"}"#).expect("error body");
		match err {
			ApiResponse::Error(e) => assert_eq!(e.describe(), "invalid_input: bad id"),
			ApiResponse::Ok(_) => panic!("error body decoded as a version list"),
		}

		assert!(serde_json::from_str::<ApiResponse<Vec<VersionInfo>>>(r#"{"unexpected": true}"#).is_err());
	}
}
