//! Integration tests for the klines endpoint against a mock HTTP server.

use mockito::Matcher;

use quantcross_core::is_chronological;
use quantcross_exchange::{BinanceClient, BinanceConfig, ExchangeError};

/// Build one positional kline row as served by /api/v3/klines.
fn kline_row(open_time_ms: i64, close: f64) -> String {
    format!(
        r#"[{},"100.0","101.0","99.0","{}","12.5",{},"1250.0",42,"6.0","600.0","0"]"#,
        open_time_ms,
        close,
        open_time_ms + 3_599_999
    )
}

fn client_for(server: &mockito::Server) -> BinanceClient {
    BinanceClient::new(BinanceConfig::new(server.url())).expect("client")
}

/// Requesting the maximum limit returns the full page in exchange order.
#[tokio::test]
async fn test_fetch_full_page_of_1000() {
    let mut server = mockito::Server::new_async().await;

    let base_ms: i64 = 1_700_000_000_000;
    let rows: Vec<String> = (0..1000)
        .map(|i| kline_row(base_ms + i * 3_600_000, 100.0 + i as f64))
        .collect();
    let body = format!("[{}]", rows.join(","));

    let mock = server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("symbol".into(), "BTCUSDT".into()),
            Matcher::UrlEncoded("interval".into(), "1h".into()),
            Matcher::UrlEncoded("limit".into(), "1000".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server);
    let candles = client
        .fetch_klines("BTCUSDT", "1h", 1000)
        .await
        .expect("fetch should succeed");

    mock.assert_async().await;
    assert_eq!(candles.len(), 1000);
    assert!(is_chronological(&candles), "rows must stay in exchange order");
    assert_eq!(candles[0].open_time_ms(), base_ms);
    assert_eq!(candles[0].close, 100.0);
    assert_eq!(candles[999].close, 1099.0);
}

/// The venue returning fewer rows than requested is not an error.
#[tokio::test]
async fn test_fetch_accepts_short_page() {
    let mut server = mockito::Server::new_async().await;

    let body = format!(
        "[{},{},{}]",
        kline_row(0, 10.0),
        kline_row(3_600_000, 11.0),
        kline_row(7_200_000, 12.0)
    );
    server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server);
    let candles = client.fetch_klines("NEWUSDT", "1h", 1000).await.unwrap();
    assert_eq!(candles.len(), 3);
}

/// An empty array body is a valid empty series.
#[tokio::test]
async fn test_fetch_empty_array() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server);
    let candles = client.fetch_klines("BTCUSDT", "1h", 10).await.unwrap();
    assert!(candles.is_empty());
}

/// HTTP 429 maps to an API error carrying the status, never a parse error.
#[tokio::test]
async fn test_rate_limit_status_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body(r#"{"code":-1003,"msg":"Too many requests."}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.fetch_klines("BTCUSDT", "1h", 100).await.unwrap_err();

    match err {
        ExchangeError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Too many requests.");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

/// Non-JSON error bodies still surface the raw status and body.
#[tokio::test]
async fn test_server_error_with_html_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.fetch_klines("BTCUSDT", "1h", 100).await.unwrap_err();

    match err {
        ExchangeError::Api { status, ref message } => {
            assert_eq!(status, 502);
            assert!(message.contains("Bad Gateway"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert!(err.is_retryable());
}

/// A 2xx body that is not a kline array is a parse error.
#[tokio::test]
async fn test_malformed_success_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"unexpected":"shape"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.fetch_klines("BTCUSDT", "1h", 100).await.unwrap_err();
    assert!(matches!(err, ExchangeError::Parse(_)), "got {:?}", err);
}

/// Price cells sent as JSON numbers instead of strings still decode.
#[tokio::test]
async fn test_numeric_price_cells_are_accepted() {
    let mut server = mockito::Server::new_async().await;
    let body = r#"[[1700000000000,42000.5,42100.0,41900.25,42050.75,123.5,1700003599999,5250000.0,820,60.0,2520000.0,0]]"#;
    server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server);
    let candles = client.fetch_klines("BTCUSDT", "1h", 100).await.unwrap();

    assert_eq!(candles.len(), 1);
    assert_eq!(candles[0].open, 42000.5);
    assert_eq!(candles[0].close, 42050.75);
    assert_eq!(candles[0].volume, 123.5);
}

/// A kline row with a non-numeric price field is a parse error.
#[tokio::test]
async fn test_non_numeric_price_field() {
    let mut server = mockito::Server::new_async().await;
    let body = r#"[[0,"100.0","101.0","99.0","garbage","12.5",3599999,"1250.0",42,"6.0","600.0","0"]]"#;
    server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.fetch_klines("BTCUSDT", "1h", 100).await.unwrap_err();
    assert!(matches!(err, ExchangeError::Parse(_)), "got {:?}", err);
}

/// An out-of-range limit fails locally before any request is sent.
#[tokio::test]
async fn test_limit_validation_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);

    let err = client.fetch_klines("BTCUSDT", "1h", 0).await.unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidRequest(_)), "got {:?}", err);

    let err = client.fetch_klines("BTCUSDT", "1h", 1001).await.unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidRequest(_)), "got {:?}", err);

    mock.assert_async().await;
}

/// limit=1 is the lower boundary: it passes validation and yields one row.
#[tokio::test]
async fn test_fetch_single_candle() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("symbol".into(), "BTCUSDT".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(format!("[{}]", kline_row(0, 42.0)))
        .create_async()
        .await;

    let client = client_for(&server);
    let candles = client.fetch_klines("BTCUSDT", "1h", 1).await.unwrap();

    mock.assert_async().await;
    assert_eq!(candles.len(), 1);
    assert_eq!(candles[0].close, 42.0);
}

/// A server slower than the configured deadline yields a timeout error.
#[tokio::test]
async fn test_timeout_contract() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_chunked_body(|writer| {
            std::thread::sleep(std::time::Duration::from_millis(2500));
            writer.write_all(b"[]")
        })
        .create_async()
        .await;

    let config = BinanceConfig::new(server.url()).with_timeout_secs(1);
    let client = BinanceClient::new(config).expect("client");

    let err = client.fetch_klines("BTCUSDT", "1h", 100).await.unwrap_err();
    assert!(matches!(err, ExchangeError::Timeout(_)), "got {:?}", err);
    assert!(err.is_retryable());
}
