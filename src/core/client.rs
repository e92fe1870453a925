use crate::core::errors::{Error, Result};
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use reqwest::StatusCode;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/*-------------------------------------------------------------------------------------------------
  Constants
-------------------------------------------------------------------------------------------------*/

/// Landing page for the "Azure IP Ranges and Service Tags – Public Cloud" download.
pub const DEFAULT_DOWNLOAD_PAGE_URL: &str =
    "https://www.microsoft.com/en-us/download/details.aspx?id=56519";

const DEFAULT_USER_AGENT: &str = concat!("azureipranges/", env!("CARGO_PKG_VERSION"));

lazy_static! {
    static ref JSON_LINK: Regex =
        Regex::new(r#"href="(https://download\.microsoft\.com/download/[^"]+\.json)""#).unwrap();
}

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct that allows you to customize the client configuration.
///
/// ```
/// let client = azureipranges::ClientBuilder::new()
///     .download_page_url("https://www.microsoft.com/en-us/download/details.aspx?id=56519")
///     .timeout(10_000) // 10 seconds
///     .user_agent("my-agent/1.0")
///     .build();
/// ```
///
/// The [ClientBuilder::new] method attempts to source configuration values from environment
/// variables when set and uses default values when the environment variables are not set.
/// [ClientBuilder::default] ignores the environment.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    download_page_url: String,
    timeout: u64,
    user_agent: String,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            download_page_url: DEFAULT_DOWNLOAD_PAGE_URL.to_string(),
            timeout: 30_000, // 30 seconds
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from
    /// environment variables when set and default values when the environment
    /// variables are not set.
    ///
    /// The environment variables used to set the initial configuration values
    /// are:
    /// - `AZUREIPRANGES_DOWNLOAD_PAGE_URL`
    /// - `AZUREIPRANGES_TIMEOUT`
    /// - `AZUREIPRANGES_USER_AGENT`
    pub fn new() -> Self {
        let default = ClientBuilder::default();

        Self {
            download_page_url: get_env_var(
                "AZUREIPRANGES_DOWNLOAD_PAGE_URL",
                default.download_page_url,
            ),
            timeout: get_env_var("AZUREIPRANGES_TIMEOUT", default.timeout),
            user_agent: get_env_var("AZUREIPRANGES_USER_AGENT", default.user_agent),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the URL of the page that links to the Service Tags JSON file.
    pub fn download_page_url(&mut self, url: &str) -> &mut Self {
        self.download_page_url = url.to_string();
        self
    }

    /// Set the HTTP request timeout (in milliseconds); defaults to `30000`.
    pub fn timeout(&mut self, timeout: u64) -> &mut Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(&mut self, user_agent: &str) -> &mut Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Client {
        Client {
            download_page_url: self.download_page_url.clone(),
            timeout: self.timeout,
            user_agent: self.user_agent.clone(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// Retrieves the Azure Service Tags JSON: scrapes the download page for the (versioned) JSON
/// link, then downloads it. Requests are made once; there is no retry.
///
/// ```no_run
/// let client = azureipranges::Client::new();
/// let json = client.fetch()?;
/// # Ok::<(), azureipranges::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    download_page_url: String,
    timeout: u64,
    user_agent: String,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl Default for Client {
    fn default() -> Self {
        ClientBuilder::default().build()
    }
}

impl Client {
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// ```
    /// let client = azureipranges::Client::default();
    /// assert_eq!(client.download_page_url(), azureipranges::DEFAULT_DOWNLOAD_PAGE_URL);
    /// ```
    pub fn download_page_url(&self) -> &str {
        &self.download_page_url
    }

    /// ```
    /// let client = azureipranges::Client::default();
    /// assert_eq!(client.timeout(), 30_000);
    /// ```
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /*-------------------------------------------------------------------------
      Fetch
    -------------------------------------------------------------------------*/

    /// Find the JSON download link on the download page and download it.
    pub fn fetch(&self) -> Result<Vec<u8>> {
        let url = self.find_json_url()?;
        self.download_json(&url)
    }

    /// Fetch the download page and extract the Service Tags JSON URL from it.
    pub fn find_json_url(&self) -> Result<String> {
        info!("Fetching download page: {}", self.download_page_url);

        let response = self.http_client()?.get(&self.download_page_url).send()?;
        check_status(&response, &self.download_page_url)?;
        let page = response.text()?;

        let url = find_json_link(&page)?;
        info!("Found JSON download URL: {}", url);
        Ok(url)
    }

    /// Download the Service Tags JSON file.
    pub fn download_json(&self, url: &str) -> Result<Vec<u8>> {
        info!("Downloading JSON file: {}", url);

        let response = self.http_client()?.get(url).send()?;
        check_status(&response, url)?;
        let json = response.bytes()?.to_vec();

        info!("Successfully downloaded JSON; size: {} bytes", json.len());
        Ok(json)
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    fn http_client(&self) -> Result<reqwest::blocking::Client> {
        Ok(reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(self.timeout))
            .user_agent(&self.user_agent)
            .build()?)
    }
}

/*-------------------------------------------------------------------------------------------------
  Local Files
-------------------------------------------------------------------------------------------------*/

/// Read a previously downloaded Service Tags JSON file.
pub fn read_json_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path)
        .map_err(|error| Error::io(path, error))
        .inspect(|json| info!("Read {} bytes of JSON from: {:?}", json.len(), path))
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Extract the one Service Tags JSON link from the download page HTML. HTML-escaped ampersands
/// in the link are decoded.
pub fn find_json_link(html: &str) -> Result<String> {
    let links: Vec<&str> = JSON_LINK
        .captures_iter(html)
        .filter_map(|captures| captures.get(1))
        .map(|link| link.as_str())
        .collect();

    match links.as_slice() {
        [] => Err(Error::LinkNotFound),
        [link] => Ok(link.replace("&amp;", "&")),
        _ => Err(Error::AmbiguousLink(links.len())),
    }
}

fn check_status(response: &reqwest::blocking::Response, url: &str) -> Result<()> {
    let status = response.status();
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(Error::Status {
            status,
            url: url.to_string(),
        })
    }
}

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::log_error;
    use env::VarError;
    use test_log::test;

    /*-------------------------------------------------------------------------
      Test Environment Variable Configuration
    -------------------------------------------------------------------------*/

    /// ENV_VAR: AZUREIPRANGES_DOWNLOAD_PAGE_URL
    /// ENV_VAR: AZUREIPRANGES_TIMEOUT
    /// ENV_VAR: AZUREIPRANGES_USER_AGENT
    #[test]
    fn test_environment_variable_configuration() {
        let test_env_vars = [
            (
                "AZUREIPRANGES_DOWNLOAD_PAGE_URL",
                "https://my-download-page.com/details",
            ),
            ("AZUREIPRANGES_TIMEOUT", "1000"),
            ("AZUREIPRANGES_USER_AGENT", "test-agent/0.0"),
        ];

        let default = Client::default();

        // Store environment variable values
        let stored_env_vars: Vec<(String, std::result::Result<String, VarError>)> = test_env_vars
            .iter()
            .map(|(env_var, _)| (env_var.to_string(), env::var(env_var)))
            .collect();

        // Unset all environment variables
        test_env_vars.iter().for_each(|(env_var, _)| unsafe {
            env::remove_var(env_var);
        });

        // Test default cases
        let new = Client::new();
        assert_eq!(new.download_page_url(), default.download_page_url());
        assert_eq!(new.timeout(), default.timeout());
        assert_eq!(new.user_agent(), default.user_agent());

        // Set all environment variables
        for (env_var, value) in test_env_vars.iter() {
            unsafe { env::set_var(env_var, value) };
        }

        // Test environment variable configuration
        let env_config = Client::new();
        assert_eq!(
            env_config.download_page_url(),
            "https://my-download-page.com/details"
        );
        assert_eq!(env_config.timeout(), 1000);
        assert_eq!(env_config.user_agent(), "test-agent/0.0");

        // Invalid values fall back to the defaults
        unsafe { env::set_var("AZUREIPRANGES_TIMEOUT", "soon") };
        assert_eq!(Client::new().timeout(), default.timeout());

        // Reset environment variables
        for (env_var, value) in stored_env_vars {
            match value {
                Ok(value) => unsafe { env::set_var(env_var, value) },
                Err(VarError::NotPresent) => unsafe { env::remove_var(env_var) },
                Err(VarError::NotUnicode(value)) => unsafe { env::set_var(env_var, value) },
            }
        }
    }

    /*-------------------------------------------------------------------------
      Test Getter and Setter Methods
    -------------------------------------------------------------------------*/

    #[test]
    fn test_getter_and_setter_methods() {
        let client = ClientBuilder::default()
            .download_page_url("https://my-download-page.com/details")
            .timeout(1000)
            .user_agent("test-agent/0.0")
            .build();

        assert_eq!(
            client.download_page_url(),
            "https://my-download-page.com/details"
        );
        assert_eq!(client.timeout(), 1000);
        assert_eq!(client.user_agent(), "test-agent/0.0");
    }

    /*-------------------------------------------------------------------------
      Test Link Extraction
    -------------------------------------------------------------------------*/

    #[test]
    fn test_find_json_link() {
        let html = r#"<html><body>
            <a href="https://www.microsoft.com/en-us/legal">Terms</a>
            <a href="https://download.microsoft.com/download/7/1/d/71d86715-5596-4529-9b13-da13a5de5b63/ServiceTags_Public_20240603.json">Download</a>
        </body></html>"#;

        let link = find_json_link(html).inspect_err(log_error).unwrap();
        assert_eq!(
            link,
            "https://download.microsoft.com/download/7/1/d/71d86715-5596-4529-9b13-da13a5de5b63/ServiceTags_Public_20240603.json"
        );
    }

    #[test]
    fn test_find_json_link_decodes_ampersands() {
        let html = r#"<a href="https://download.microsoft.com/download/x/tags.json?a=1&amp;b=2.json">"#;

        let link = find_json_link(html).unwrap();
        assert_eq!(
            link,
            "https://download.microsoft.com/download/x/tags.json?a=1&b=2.json"
        );
    }

    #[test]
    fn test_find_json_link_not_found() {
        let html = r#"<a href="https://download.microsoft.com/download/x/tags.zip">"#;
        assert!(matches!(find_json_link(html), Err(Error::LinkNotFound)));
        assert!(matches!(find_json_link(""), Err(Error::LinkNotFound)));
    }

    #[test]
    fn test_find_json_link_ambiguous() {
        let html = r#"
            <a href="https://download.microsoft.com/download/a/ServiceTags_Public.json">
            <a href="https://download.microsoft.com/download/b/ServiceTags_AzureGovernment.json">
        "#;
        assert!(matches!(
            find_json_link(html),
            Err(Error::AmbiguousLink(2))
        ));
    }

    /*-------------------------------------------------------------------------
      Test Local Files
    -------------------------------------------------------------------------*/

    #[test]
    fn test_read_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ServiceTags_Public.json");
        fs::write(&path, br#"{"changeNumber": 1}"#).unwrap();

        let json = read_json_file(&path).inspect_err(log_error).unwrap();
        assert_eq!(json, br#"{"changeNumber": 1}"#);

        let missing = read_json_file(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(Error::Io { .. })));
    }

    /*-------------------------------------------------------------------------
      Test Network Retrieval
    -------------------------------------------------------------------------*/

    /// URL: https://www.microsoft.com/en-us/download/details.aspx?id=56519
    #[test]
    #[ignore = "requires network access"]
    fn test_fetch() {
        let json = Client::default().fetch().inspect_err(log_error).unwrap();
        assert!(crate::core::json::parse(&json).is_ok());
    }
}
