use crate::carriers::ups::auth::UpsOAuthClient;
use crate::carriers::ups::mapper;
use crate::config::UpsConfig;
use crate::domain::model::{RateRequest, RateResponse};
use crate::domain::ports::{Clock, HttpMethod, HttpRequest, HttpTransport, RateService};
use crate::domain::validation::validate_rate_request;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// UPS rating flow: validate, obtain a token, translate to the wire payload,
/// post it, classify the status, translate the response back. One attempt
/// per call; retry policy belongs to the caller.
pub struct UpsRateService<T, C> {
    transport: Arc<T>,
    auth: UpsOAuthClient<T, C>,
    config: UpsConfig,
}

impl<T: HttpTransport, C: Clock> UpsRateService<T, C> {
    pub fn new(transport: Arc<T>, auth: UpsOAuthClient<T, C>, config: UpsConfig) -> Self {
        Self {
            transport,
            auth,
            config,
        }
    }
}

#[async_trait]
impl<T: HttpTransport, C: Clock> RateService for UpsRateService<T, C> {
    async fn get_rates(&self, request: &RateRequest) -> Result<RateResponse> {
        validate_rate_request(request)?;

        let token = self.auth.get_access_token().await?;
        let payload = mapper::build_rate_request(request, self.config.account_number.as_deref());
        let body = serde_json::to_string(&payload).map_err(|e| AppError::Http {
            message: "failed to serialize UPS rate request".to_string(),
            source: Some(e.into()),
        })?;

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Authorization".to_string(), format!("Bearer {token}"));

        tracing::debug!("requesting UPS rates from {}", self.config.rate_url);
        let response = self
            .transport
            .send(HttpRequest {
                method: HttpMethod::Post,
                url: self.config.rate_url.clone(),
                headers,
                body: Some(body),
                timeout: self.config.timeout,
            })
            .await
            .map_err(|e| AppError::from_transport("UPS rate request", e))?;
        tracing::debug!("UPS rate response status: {}", response.status);

        match response.status {
            401 | 403 => Err(AppError::Auth {
                message: "UPS rate request unauthorized".to_string(),
                status: Some(response.status),
                body: Some(response.body),
            }),
            429 => Err(AppError::RateLimit {
                message: "UPS rate request rate limited".to_string(),
                status: response.status,
                body: Some(response.body),
            }),
            status if status >= 400 => Err(AppError::Carrier {
                message: "UPS rate request failed".to_string(),
                status,
                carrier_error: mapper::extract_carrier_error(&response.body),
                body: response.body,
            }),
            _ => mapper::parse_rate_response(&response.body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TIMEOUT_MS;
    use crate::domain::model::{Address, Package, PackageWeight, WeightUnit};
    use crate::domain::ports::{HttpResponse, SystemClock, TransportError};
    use serde_json::json;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::sync::Mutex;

    struct StubTransport {
        requests: Mutex<Vec<HttpRequest>>,
        queue: Mutex<VecDeque<std::result::Result<HttpResponse, TransportError>>>,
    }

    impl StubTransport {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                queue: Mutex::new(VecDeque::new()),
            }
        }

        async fn enqueue_response(&self, status: u16, body: impl Into<String>) {
            self.queue.lock().await.push_back(Ok(HttpResponse {
                status,
                headers: HashMap::new(),
                body: body.into(),
            }));
        }

        async fn enqueue_error(&self, error: TransportError) {
            self.queue.lock().await.push_back(Err(error));
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn send(
            &self,
            request: HttpRequest,
        ) -> std::result::Result<HttpResponse, TransportError> {
            self.requests.lock().await.push(request);
            self.queue
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| panic!("no stubbed response available"))
        }
    }

    fn config() -> UpsConfig {
        UpsConfig {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            oauth_url: "https://api.ups.com/oauth".to_string(),
            rate_url: "https://api.ups.com/rate".to_string(),
            account_number: Some("A1B2C3".to_string()),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    fn service(transport: &Arc<StubTransport>) -> UpsRateService<StubTransport, SystemClock> {
        let auth = UpsOAuthClient::new(Arc::clone(transport), config(), SystemClock);
        UpsRateService::new(Arc::clone(transport), auth, config())
    }

    fn address(city: &str, state: &str, postal: &str) -> Address {
        Address {
            name: Some("Somebody".to_string()),
            address1: "1 Some St".to_string(),
            city: city.to_string(),
            state: state.to_string(),
            postal_code: postal.to_string(),
            country_code: "US".to_string(),
            ..Address::default()
        }
    }

    fn request() -> RateRequest {
        RateRequest {
            shipper: address("Austin", "TX", "78701"),
            ship_from: None,
            ship_to: address("San Francisco", "CA", "94105"),
            packages: vec![Package {
                weight: PackageWeight {
                    value: 2.0,
                    unit: WeightUnit::Lbs,
                },
                dimensions: None,
            }],
            service_code: Some("03".to_string()),
        }
    }

    fn token_body() -> String {
        json!({ "access_token": "token-123", "token_type": "bearer", "expires_in": 3600 })
            .to_string()
    }

    fn rate_body() -> String {
        json!({
            "RateResponse": {
                "RatedShipment": [{
                    "Service": { "Code": "03" },
                    "TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "12.34" },
                    "GuaranteedDelivery": { "BusinessDaysInTransit": "3" }
                }]
            }
        })
        .to_string()
    }

    async fn enqueue_token_and(transport: &StubTransport, status: u16, body: impl Into<String>) {
        transport.enqueue_response(200, token_body()).await;
        transport.enqueue_response(status, body).await;
    }

    #[tokio::test]
    async fn returns_normalized_quotes_on_success() {
        let transport = Arc::new(StubTransport::new());
        enqueue_token_and(&transport, 200, rate_body()).await;

        let response = service(&transport).get_rates(&request()).await.unwrap();
        assert_eq!(response.quotes.len(), 1);
        assert_eq!(response.quotes[0].service_code, "03");
        assert_eq!(response.quotes[0].total_charge.amount, "12.34");
        assert_eq!(response.quotes[0].delivery_days, Some(3));

        let requests = transport.requests.lock().await;
        assert_eq!(requests.len(), 2);
        let rate_call = &requests[1];
        assert_eq!(rate_call.url, "https://api.ups.com/rate");
        assert_eq!(
            rate_call.headers.get("Authorization").map(String::as_str),
            Some("Bearer token-123")
        );
        assert_eq!(
            rate_call.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        let body: serde_json::Value =
            serde_json::from_str(rate_call.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body["RateRequest"]["Shipment"]["Shipper"]["ShipperNumber"],
            "A1B2C3"
        );
        assert_eq!(
            body["RateRequest"]["Shipment"]["Package"][0]["PackageWeight"]["Weight"],
            "2"
        );
    }

    #[tokio::test]
    async fn invalid_requests_never_touch_the_network() {
        let transport = Arc::new(StubTransport::new());
        let mut bad = request();
        bad.packages.clear();

        let err = service(&transport).get_rates(&bad).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(transport.requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn unauthorized_statuses_become_auth_errors() {
        for status in [401u16, 403] {
            let transport = Arc::new(StubTransport::new());
            enqueue_token_and(&transport, status, "denied").await;

            match service(&transport).get_rates(&request()).await.unwrap_err() {
                AppError::Auth {
                    status: got, body, ..
                } => {
                    assert_eq!(got, Some(status));
                    assert_eq!(body.as_deref(), Some("denied"));
                }
                other => panic!("expected Auth for {status}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn too_many_requests_becomes_rate_limit_error() {
        let transport = Arc::new(StubTransport::new());
        enqueue_token_and(&transport, 429, "slow down").await;

        match service(&transport).get_rates(&request()).await.unwrap_err() {
            AppError::RateLimit { status, .. } => assert_eq!(status, 429),
            other => panic!("expected RateLimit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_error_statuses_become_carrier_errors_with_extracted_fault() {
        let transport = Arc::new(StubTransport::new());
        let body = json!({
            "response": { "errors": [{ "code": "110002", "message": "Invalid shipper number" }] }
        })
        .to_string();
        enqueue_token_and(&transport, 500, body.clone()).await;

        match service(&transport).get_rates(&request()).await.unwrap_err() {
            AppError::Carrier {
                status,
                carrier_error,
                body: raw,
                ..
            } => {
                assert_eq!(status, 500);
                let fault = carrier_error.unwrap();
                assert_eq!(fault.code.as_deref(), Some("110002"));
                assert_eq!(raw, body);
            }
            other => panic!("expected Carrier, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn carrier_error_survives_an_unparseable_body() {
        let transport = Arc::new(StubTransport::new());
        enqueue_token_and(&transport, 502, "bad gateway").await;

        match service(&transport).get_rates(&request()).await.unwrap_err() {
            AppError::Carrier { carrier_error, .. } => assert_eq!(carrier_error, None),
            other => panic!("expected Carrier, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_malformed_response() {
        let transport = Arc::new(StubTransport::new());
        enqueue_token_and(&transport, 200, "not json").await;

        let err = service(&transport).get_rates(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn transport_failures_during_the_rate_call_keep_their_identity() {
        let transport = Arc::new(StubTransport::new());
        transport.enqueue_response(200, token_body()).await;
        transport.enqueue_error(TransportError::Timeout).await;

        let err = service(&transport).get_rates(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout { .. }));
    }

    #[tokio::test]
    async fn oauth_failures_propagate_unchanged() {
        let transport = Arc::new(StubTransport::new());
        transport.enqueue_response(401, "bad credentials").await;

        match service(&transport).get_rates(&request()).await.unwrap_err() {
            AppError::Auth { status, .. } => assert_eq!(status, Some(401)),
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_rated_shipments_are_not_an_error() {
        let transport = Arc::new(StubTransport::new());
        let body = json!({ "RateResponse": { "RatedShipment": [] } }).to_string();
        enqueue_token_and(&transport, 200, body).await;

        let response = service(&transport).get_rates(&request()).await.unwrap();
        assert!(response.quotes.is_empty());
    }
}
