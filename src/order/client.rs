use serde::Deserialize;
use tokio::sync::OnceCell;
use url::Url;

use crate::error::{OrderBridgeError, Result};
use crate::model;
use crate::provider::RecordProvider;

/// Identifier system/code pair naming the order-station organization record.
pub const ORDER_STATION_ORG_SYSTEM: &str = "MedLevel";
pub const ORDER_STATION_ORG_CODE: &str = "03";

/// Identifier system under which that organization publishes its base URL.
pub const ORDER_STATION_URL_SYSTEM: &str = "OrderStationUrl";

/// Status codes of the order-station create contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationStatus {
    /// `1`: order created.
    Created,
    /// `0`: creation failed.
    GenericFail,
    /// `-1`: the `xml` payload was blank.
    EmptyPayload,
    /// `-2`: the modality is not in the station's list.
    InvalidModality,
    /// `-3`: any other station-side error.
    OtherFail,
}

impl PropagationStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Created),
            "0" => Some(Self::GenericFail),
            "-1" => Some(Self::EmptyPayload),
            "-2" => Some(Self::InvalidModality),
            "-3" => Some(Self::OtherFail),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Created => "1",
            Self::GenericFail => "0",
            Self::EmptyPayload => "-1",
            Self::InvalidModality => "-2",
            Self::OtherFail => "-3",
        }
    }
}

/// Parsed order-station reply. An unrecognized status code leaves `status`
/// unset and the raw code is surfaced through [`failure_message`].
///
/// [`failure_message`]: PropagationResult::failure_message
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationResult {
    pub status: Option<PropagationStatus>,
    pub raw_status: String,
    pub message: Option<String>,
}

impl PropagationResult {
    pub fn is_success(&self) -> bool {
        self.status == Some(PropagationStatus::Created)
    }

    /// Failure text in the `"[<status>] <message>"` form the audit trail
    /// records.
    pub fn failure_message(&self) -> String {
        format!("[{}] {}", self.raw_status, self.message.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct StationReply {
    status: String,
    #[serde(default)]
    message: String,
}

/// Blocking-per-request client for the order-station create endpoint.
///
/// The endpoint is discovered once per instance by reading the station's
/// organization record; a successful discovery is cached for the instance's
/// lifetime, a failed one is retried on the next invocation.
#[derive(Debug)]
pub struct PropagationClient {
    http: reqwest::Client,
    create_path: String,
    endpoint: OnceCell<Url>,
}

impl PropagationClient {
    pub fn new(create_path: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            create_path: create_path.into(),
            endpoint: OnceCell::new(),
        }
    }

    /// The discovered create endpoint, resolving it on first use.
    pub async fn endpoint(&self, provider: &dyn RecordProvider) -> Result<Url> {
        self.endpoint
            .get_or_try_init(|| self.discover(provider))
            .await
            .cloned()
    }

    /// The cached endpoint, if discovery has succeeded before.
    pub fn cached_endpoint(&self) -> Option<&Url> {
        self.endpoint.get()
    }

    async fn discover(&self, provider: &dyn RecordProvider) -> Result<Url> {
        let organization = provider
            .find_organization(ORDER_STATION_ORG_SYSTEM, ORDER_STATION_ORG_CODE)
            .await?
            .ok_or_else(|| {
                OrderBridgeError::configuration("order-station organization record not found")
            })?;

        let base = model::identifier_value(&organization, ORDER_STATION_URL_SYSTEM)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                OrderBridgeError::configuration(format!(
                    "order-station organization has no {ORDER_STATION_URL_SYSTEM} identifier"
                ))
            })?;

        let endpoint = Url::parse(&format!("{base}{}", self.create_path))?;
        tracing::info!(%endpoint, "order-station endpoint discovered");
        Ok(endpoint)
    }

    /// POST the serialized order as form data and classify the reply.
    ///
    /// The body is `application/x-www-form-urlencoded` with exactly the
    /// `xml` and `modality` fields. The response is drained fully before
    /// parsing, so the transport connection is released on every exit path.
    pub async fn send(
        &self,
        endpoint: &Url,
        payload_xml: &str,
        modality: &str,
    ) -> Result<PropagationResult> {
        let response = self
            .http
            .post(endpoint.clone())
            .form(&[("xml", payload_xml), ("modality", modality)])
            .send()
            .await?;

        let body = response.text().await?;
        parse_reply(&body)
    }
}

/// Parse a station reply body into a [`PropagationResult`].
pub fn parse_reply(body: &str) -> Result<PropagationResult> {
    let reply: StationReply = serde_json::from_str(body).map_err(|err| {
        OrderBridgeError::protocol(format!("order station returned a malformed reply: {err}"))
    })?;

    Ok(PropagationResult {
        status: PropagationStatus::from_code(&reply.status),
        raw_status: reply.status,
        message: (!reply.message.is_empty()).then_some(reply.message),
    })
}
