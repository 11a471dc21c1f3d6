//! OpenWeather client and lookup behaviour against a mock HTTP server.

use chrono::{Duration, Local, NaiveDate};
use meteo_core::{
    ApiError, LocationQuery, LookupError, OpenWeatherProvider, WeatherProvider, WeatherService,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn current_body(name: &str, temp: f64, main: &str, icon: &str) -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 2.3488, "lat": 48.8534},
        "weather": [{"id": 804, "main": main, "description": "couvert", "icon": icon}],
        "base": "stations",
        "main": {
            "temp": temp, "feels_like": temp, "temp_min": temp - 1.0,
            "temp_max": temp + 1.0, "pressure": 1015, "humidity": 60
        },
        "visibility": 10000,
        "wind": {"speed": 4.12, "deg": 250},
        "clouds": {"all": 100},
        "dt": 1_760_608_800,
        "sys": {
            "type": 2, "id": 2041230, "country": "FR",
            "sunrise": 1_760_594_400, "sunset": 1_760_633_400
        },
        "timezone": 7200,
        "id": 2988507,
        "name": name,
        "cod": 200
    })
}

/// Six local days of 3-hourly samples starting at local midnight of `today`.
fn forecast_body(today: NaiveDate) -> serde_json::Value {
    let midnight = today
        .and_hms_opt(0, 0, 0)
        .and_then(|dt| dt.and_local_timezone(Local).earliest())
        .map(|dt| dt.timestamp())
        .unwrap_or_default();

    let list: Vec<serde_json::Value> = (0..48)
        .map(|i| {
            let dt = midnight + i * Duration::hours(3).num_seconds();
            serde_json::json!({
                "dt": dt,
                "main": {"temp": 12.0, "temp_min": 8.0, "temp_max": 16.0, "humidity": 70},
                "weather": [
                    {"id": 500, "main": "Rain", "description": "légère pluie", "icon": "10d"}
                ],
                "wind": {"speed": 3.5},
                "pop": 0.4,
                "dt_txt": "ignored"
            })
        })
        .collect();

    serde_json::json!({
        "cod": "200",
        "cnt": list.len(),
        "list": list,
        "city": {"name": "Paris", "country": "FR"}
    })
}

async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .mount(server)
        .await;
}

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new(server.uri(), "TEST_KEY")
}

// ============================================================================
// Request shape
// ============================================================================

#[tokio::test]
async fn city_query_sends_fixed_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "fr"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_body("Paris", 18.4, "Clouds", "04d")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let raw = provider(&server)
        .fetch_weather(&LocationQuery::city("Paris"))
        .await
        .expect("weather");
    assert_eq!(raw.name, "Paris");
}

#[tokio::test]
async fn coordinate_query_sends_lat_lon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_body("Paris", 10.0, "Clear", "01n")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let raw = provider(&server)
        .fetch_weather(&LocationQuery::coordinates(48.85, 2.35))
        .await
        .expect("weather");
    assert_eq!(raw.sys.country, "FR");
}

// ============================================================================
// Error mapping
// ============================================================================

#[tokio::test]
async fn status_codes_map_to_errors() {
    let cases = [
        (404u16, ApiError::NotFound),
        (401, ApiError::Unauthorized),
        (429, ApiError::RateLimited),
        (500, ApiError::UnknownApiError(500)),
    ];

    for (status, expected) in cases {
        let server = MockServer::start().await;
        mount(
            &server,
            "/weather",
            ResponseTemplate::new(status)
                .set_body_json(serde_json::json!({"cod": status, "message": "nope"})),
        )
        .await;

        let err = provider(&server)
            .fetch_weather(&LocationQuery::city("Nowhere"))
            .await
            .unwrap_err();
        assert_eq!(err, expected, "status {status}");
    }
}

#[tokio::test]
async fn not_found_message() {
    let server = MockServer::start().await;
    mount(&server, "/weather", ResponseTemplate::new(404)).await;

    let err = provider(&server)
        .fetch_weather(&LocationQuery::city("Atlantis"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Ville non trouvée");
}

#[tokio::test]
async fn unreachable_server_is_no_connection() {
    // Bind then release a port so nothing listens on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .expect("free port")
        .port();

    let err = OpenWeatherProvider::new(format!("http://127.0.0.1:{port}"), "TEST_KEY")
        .fetch_weather(&LocationQuery::city("Paris"))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::NoConnection);
    assert_eq!(err.to_string(), "Pas de connexion internet");
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    mount(&server, "/weather", ResponseTemplate::new(200).set_body_string("not json")).await;

    let err = provider(&server)
        .fetch_weather(&LocationQuery::city("Paris"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

// ============================================================================
// Lookups
// ============================================================================

#[tokio::test]
async fn city_search_maps_current_weather() {
    let today = Local::now().date_naive();
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(current_body("Paris", 18.4, "Clouds", "04d")),
    )
    .await;
    let forecast = ResponseTemplate::new(200).set_body_json(forecast_body(today));
    mount(&server, "/forecast", forecast).await;

    let report = WeatherService::new(provider(&server))
        .search_city("Paris")
        .await
        .expect("lookup");

    assert_eq!(report.current.temperature, 18);
    assert_eq!(report.current.humidity, 60);
    assert_eq!(report.current.icon_class, "fas fa-cloud");
    assert!(!report.current.is_current_location);
    assert_eq!(report.forecast.len(), 5);
}

#[tokio::test]
async fn search_forecast_uses_resolved_name() {
    let today = Local::now().date_naive();
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(current_body("Paris", 18.4, "Clouds", "04d")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Paris,FR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(today)))
        .expect(1)
        .mount(&server)
        .await;

    let report = WeatherService::new(provider(&server))
        .search_city("paris")
        .await
        .expect("lookup");
    assert_eq!(report.forecast.len(), 5);
}

#[tokio::test]
async fn coordinate_lookup_is_current_location() {
    let today = Local::now().date_naive();
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(200)
            .set_body_json(current_body("Quartier Latin", 11.6, "Clear", "01d")),
    )
    .await;
    let forecast = ResponseTemplate::new(200).set_body_json(forecast_body(today));
    mount(&server, "/forecast", forecast).await;

    let report = WeatherService::new(provider(&server))
        .lookup(&LocationQuery::coordinates(48.85, 2.35))
        .await
        .expect("lookup");

    assert!(report.current.is_current_location);
    assert_eq!(report.current.temperature, 12);
    assert_eq!(report.current.icon_class, "fas fa-sun");
}

#[tokio::test]
async fn forecast_skips_today_and_starts_tomorrow() {
    let today = Local::now().date_naive();
    let server = MockServer::start().await;
    let forecast = ResponseTemplate::new(200).set_body_json(forecast_body(today));
    mount(&server, "/forecast", forecast).await;

    let days = WeatherService::new(provider(&server))
        .forecast(&LocationQuery::city("Paris"))
        .await
        .expect("forecast");

    let today = today.format("%Y-%m-%d").to_string();
    assert_eq!(days.len(), 5);
    assert_eq!(days[0].day_name, "Demain");
    assert!(days.iter().all(|d| d.date != today));
    assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    assert!(days.iter().all(|d| d.temp_min == 8 && d.temp_max == 16 && d.precipitation == 40));
}

#[tokio::test]
async fn forecast_failure_keeps_current_weather() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(current_body("Paris", 18.4, "Clouds", "04d")),
    )
    .await;
    mount(&server, "/forecast", ResponseTemplate::new(429)).await;

    let report = WeatherService::new(provider(&server))
        .lookup(&LocationQuery::city("Paris"))
        .await
        .expect("current weather still shown");

    assert_eq!(report.current.name, "Paris");
    assert!(report.forecast.is_empty());
}

#[tokio::test]
async fn search_not_found_is_prefixed() {
    let server = MockServer::start().await;
    mount(&server, "/weather", ResponseTemplate::new(404)).await;

    let err = WeatherService::new(provider(&server))
        .search_city("Atlantis")
        .await
        .unwrap_err();

    assert_eq!(err, LookupError::Search(ApiError::NotFound));
    assert_eq!(err.to_string(), "Erreur: Ville non trouvée");
}
