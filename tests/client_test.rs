//! Facade integration tests against a stubbed transport.
//!
//! Every test drives the public client surface with a transport that
//! records the request descriptors it receives and answers with a canned
//! vendor payload, so the full request-building and normalization path is
//! exercised without a network.

use std::sync::Mutex;

use rajaongkir::{
    ApiConfig, ApiRequest, CostParams, OngkirError, RajaOngkir, SearchQuery, Transport,
    error::Result,
};
use serde_json::{Value, json};

/// Transport stub that records requests and replays one payload.
#[derive(Debug)]
struct StubTransport {
    payload: Value,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Debug, Clone, PartialEq)]
struct RecordedRequest {
    method: &'static str,
    path: String,
    params: Vec<(String, String)>,
    headers: Vec<(String, String)>,
}

impl StubTransport {
    fn returning(payload: Value) -> Self {
        Self { payload, requests: Mutex::new(Vec::new()) }
    }

    fn ok(data: Value) -> Self {
        Self::returning(json!({"meta": {"code": 200, "message": "OK"}, "data": data}))
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

impl Transport for &StubTransport {
    async fn execute<'a>(&'a self, request: ApiRequest<'a>) -> Result<Value> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method.as_str(),
            path: request.path.to_owned(),
            params: request.params.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect(),
            headers: request
                .headers
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        });

        Ok(self.payload.clone())
    }
}

fn client(stub: &StubTransport) -> RajaOngkir<&StubTransport> {
    let config = ApiConfig::new("test_api_key", "starter", true).unwrap();
    RajaOngkir::with_transport(config, stub)
}

fn cost_params(value: Value) -> CostParams {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn provinces_returns_vendor_data() {
    let data = json!([
        {"province_id": "6", "province": "DKI Jakarta"},
        {"province_id": "9", "province": "Jawa Barat"}
    ]);
    let stub = StubTransport::ok(data.clone());

    let provinces = client(&stub).provinces().await.unwrap();
    assert_eq!(provinces, data);

    let request = stub.single_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "province");
    assert!(request.params.is_empty());
    assert_eq!(request.headers, vec![("key".to_owned(), "test_api_key".to_owned())]);
}

#[tokio::test]
async fn province_by_id_sends_id_parameter() {
    let stub = StubTransport::ok(json!({"province_id": "6", "province": "DKI Jakarta"}));

    let province = client(&stub).province(6).await.unwrap();
    assert_eq!(province["province"], "DKI Jakarta");

    let request = stub.single_request();
    assert_eq!(request.path, "province");
    assert_eq!(request.params, vec![("id".to_owned(), "6".to_owned())]);
}

#[tokio::test]
async fn province_not_found_surfaces_vendor_error() {
    let stub = StubTransport::returning(json!({"meta": {"code": 404, "message": "Not Found"}}));

    let err = client(&stub).province(9999).await.unwrap_err();
    assert_eq!(err.code(), Some(404));
    assert!(err.to_string().contains("Not Found"));
}

#[tokio::test]
async fn cities_filter_is_optional() {
    let stub = StubTransport::ok(json!([]));
    let client = client(&stub);

    client.cities(None).await.unwrap();
    client.cities(Some(6)).await.unwrap();

    let requests = stub.requests();
    assert_eq!(requests[0].path, "city");
    assert!(requests[0].params.is_empty());
    assert_eq!(requests[1].params, vec![("province".to_owned(), "6".to_owned())]);
}

#[tokio::test]
async fn city_by_id_sends_id_parameter() {
    let stub = StubTransport::ok(json!({"city_id": "152", "city_name": "Jakarta Pusat"}));

    let city = client(&stub).city(152).await.unwrap();
    assert_eq!(city["city_name"], "Jakarta Pusat");
    assert_eq!(stub.single_request().params, vec![("id".to_owned(), "152".to_owned())]);
}

#[tokio::test]
async fn domestic_search_canonicalizes_records() {
    let stub = StubTransport::ok(json!([
        {
            "city_id": "177",
            "province_id": "10",
            "province": "Jawa Tengah",
            "type": "Kota",
            "city_name": "Surakarta (Solo)",
            "postal_code": "57113"
        },
        {"city_id": "178", "city": "Solo Baru"}
    ]));

    let hits = client(&stub)
        .search_domestic_destinations(&SearchQuery { search: "solo".into(), limit: 5, offset: 0 })
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].name.as_deref(), Some("Surakarta (Solo)"));
    assert_eq!(hits[0].postal_code, Some(json!("57113")));
    // city_name absent, city present: reconciliation falls back
    assert_eq!(hits[1].name.as_deref(), Some("Solo Baru"));
    assert!(hits[1].province.is_none());

    let request = stub.single_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "destination/domestic-destination");
    assert_eq!(
        request.params,
        vec![
            ("search".to_owned(), "solo".to_owned()),
            ("limit".to_owned(), "5".to_owned()),
            ("offset".to_owned(), "0".to_owned()),
        ]
    );
}

#[tokio::test]
async fn domestic_search_path_is_tier_selected() {
    for tier in ["starter", "basic", "pro"] {
        let stub = StubTransport::ok(json!([]));
        let config = ApiConfig::new("k", tier, true).unwrap();
        let client = RajaOngkir::with_transport(config, &stub);

        client.search_domestic_destinations(&SearchQuery::new("solo")).await.unwrap();
        assert_eq!(stub.single_request().path, "destination/domestic-destination");
    }
}

#[tokio::test]
async fn domestic_search_empty_data_is_empty_list_not_error() {
    let stub = StubTransport::ok(json!([]));
    let hits =
        client(&stub).search_domestic_destinations(&SearchQuery::new("nowhere")).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn domestic_search_wraps_failures_with_context() {
    let stub = StubTransport::returning(json!("oops"));

    let err = client(&stub).search_domestic_destinations(&SearchQuery::new("solo")).await.unwrap_err();
    assert!(err.to_string().starts_with("Failed to search domestic destinations: "));
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn domestic_search_wrap_keeps_vendor_code() {
    let stub = StubTransport::returning(json!({"meta": {"code": 404, "message": "Not Found"}}));

    let err = client(&stub).search_domestic_destinations(&SearchQuery::new("solo")).await.unwrap_err();
    assert_eq!(err.code(), Some(404));
    assert!(err.to_string().contains("Not Found"));
}

#[tokio::test]
async fn international_search_attaches_only_positive_pagination() {
    let stub = StubTransport::ok(json!([]));
    let client = client(&stub);

    client
        .search_international_destinations(&SearchQuery { search: String::new(), limit: 200, offset: 0 })
        .await
        .unwrap();
    client
        .search_international_destinations(&SearchQuery { search: String::new(), limit: 0, offset: 0 })
        .await
        .unwrap();
    client
        .search_international_destinations(&SearchQuery { search: "sing".into(), limit: 10, offset: 20 })
        .await
        .unwrap();

    let requests = stub.requests();
    assert_eq!(requests[0].path, "destination/international-destination");
    assert_eq!(requests[0].params, vec![("limit".to_owned(), "200".to_owned())]);
    assert!(requests[1].params.is_empty());
    assert_eq!(
        requests[2].params,
        vec![
            ("search".to_owned(), "sing".to_owned()),
            ("limit".to_owned(), "10".to_owned()),
            ("offset".to_owned(), "20".to_owned()),
        ]
    );
}

#[tokio::test]
async fn international_search_returns_data_as_is() {
    let data = json!([{"country_id": "190", "country_name": "Singapore"}]);
    let stub = StubTransport::ok(data.clone());

    let hits = client(&stub)
        .search_international_destinations(&SearchQuery::default())
        .await
        .unwrap();
    assert_eq!(hits, data);
}

#[tokio::test]
async fn international_search_wraps_failures_with_context() {
    let stub = StubTransport::returning(json!(42));

    let err =
        client(&stub).search_international_destinations(&SearchQuery::default()).await.unwrap_err();
    assert!(err.to_string().starts_with("Failed to search international destinations: "));
}

#[tokio::test]
async fn domestic_cost_requires_every_field_before_any_request() {
    let stub = StubTransport::ok(json!([]));
    let params = cost_params(json!({"origin": "501", "destination": "114"}));

    let err = client(&stub).calculate_domestic_cost(&params).await.unwrap_err();
    assert!(matches!(
        &err,
        OngkirError::MissingParameters(fields)
            if fields == &["weight".to_owned(), "courier".to_owned()]
    ));
    assert!(stub.requests().is_empty(), "validation must run before the network call");
}

#[tokio::test]
async fn domestic_cost_posts_form_parameters() {
    let data = json!([{"service": "REG", "cost": 24000}]);
    let stub = StubTransport::ok(data.clone());
    let params = cost_params(json!({
        "origin": "501",
        "destination": "114",
        "weight": 1700,
        "courier": "jne",
        "price": "lowest"
    }));

    let cost = client(&stub).calculate_domestic_cost(&params).await.unwrap();
    assert_eq!(cost, data);

    let request = stub.single_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "calculate/domestic-cost");
    assert_eq!(
        request.params,
        vec![
            ("origin".to_owned(), "501".to_owned()),
            ("destination".to_owned(), "114".to_owned()),
            ("weight".to_owned(), "1700".to_owned()),
            ("courier".to_owned(), "jne".to_owned()),
            ("price".to_owned(), "lowest".to_owned()),
        ]
    );
}

#[tokio::test]
async fn domestic_cost_omits_absent_price() {
    let stub = StubTransport::ok(json!([]));
    let params = cost_params(json!({
        "origin": "501",
        "destination": "114",
        "weight": 1700,
        "courier": "jne"
    }));

    client(&stub).calculate_domestic_cost(&params).await.unwrap();
    assert!(stub.single_request().params.iter().all(|(key, _)| key != "price"));
}

#[tokio::test]
async fn international_cost_sends_only_required_fields() {
    let stub = StubTransport::ok(json!([]));
    let params = cost_params(json!({
        "origin": "152",
        "destination": "108",
        "weight": 1400,
        "courier": "pos",
        "price": "lowest"
    }));

    client(&stub).calculate_international_cost(&params).await.unwrap();

    let request = stub.single_request();
    assert_eq!(request.path, "calculate/international-cost");
    assert_eq!(
        request.params,
        vec![
            ("origin".to_owned(), "152".to_owned()),
            ("destination".to_owned(), "108".to_owned()),
            ("weight".to_owned(), "1400".to_owned()),
            ("courier".to_owned(), "pos".to_owned()),
        ]
    );
}

#[tokio::test]
async fn international_cost_collects_missing_fields() {
    let stub = StubTransport::ok(json!([]));
    let params = cost_params(json!({"origin": "", "weight": 1400, "courier": "pos"}));

    let err = client(&stub).calculate_international_cost(&params).await.unwrap_err();
    assert!(matches!(
        &err,
        OngkirError::MissingParameters(fields)
            if fields == &["origin".to_owned(), "destination".to_owned()]
    ));
}

#[tokio::test]
async fn track_waybill_posts_awb_and_courier() {
    let data = json!({"delivered": true, "summary": {"courier_name": "JNE"}});
    let stub = StubTransport::ok(data.clone());

    let tracking = client(&stub).track_waybill("JX1234567890", "jne").await.unwrap();
    assert_eq!(tracking, data);

    let request = stub.single_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "track/waybill");
    assert_eq!(
        request.params,
        vec![
            ("awb".to_owned(), "JX1234567890".to_owned()),
            ("courier".to_owned(), "jne".to_owned()),
        ]
    );
}

#[tokio::test]
async fn track_waybill_names_empty_arguments() {
    let stub = StubTransport::ok(json!({}));
    let client = client(&stub);

    let err = client.track_waybill("", "jne").await.unwrap_err();
    assert!(matches!(&err, OngkirError::MissingParameters(fields) if fields == &["waybill"]));

    let err = client.track_waybill("JX1", "").await.unwrap_err();
    assert!(matches!(&err, OngkirError::MissingParameters(fields) if fields == &["courier"]));

    let err = client.track_waybill("", "").await.unwrap_err();
    assert_eq!(err.to_string(), "Missing required parameters: waybill, courier");
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn identical_calls_yield_structurally_equal_results() {
    let stub = StubTransport::ok(json!([
        {"city_id": "177", "city_name": "Surakarta (Solo)", "postal_code": "57113"}
    ]));
    let client = client(&stub);
    let query = SearchQuery::new("solo");

    let first = client.search_domestic_destinations(&query).await.unwrap();
    let second = client.search_domestic_destinations(&query).await.unwrap();
    assert_eq!(first, second);

    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
}

#[tokio::test]
async fn concurrent_calls_do_not_share_request_state() {
    let stub = StubTransport::ok(json!([]));
    let client = client(&stub);

    let (provinces, cities) = tokio::join!(client.provinces(), client.cities(Some(6)));
    provinces.unwrap();
    cities.unwrap();

    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
    assert!(paths.contains(&"province"));
    assert!(paths.contains(&"city"));
    // Each descriptor owns its own parameters
    let city_request = requests.iter().find(|r| r.path == "city").unwrap();
    assert_eq!(city_request.params, vec![("province".to_owned(), "6".to_owned())]);
}

#[tokio::test]
async fn tier_change_is_observable_on_next_request() {
    let stub = StubTransport::ok(json!([]));
    let config = ApiConfig::new("k", "starter", true).unwrap();
    let mut client = RajaOngkir::with_transport(config, &stub);

    client.config_mut().set_account_tier("pro").unwrap();
    client.provinces().await.unwrap();

    assert_eq!(client.config().account_tier().as_str(), "pro");
    assert!(!client.config().base_url().is_empty());
}
