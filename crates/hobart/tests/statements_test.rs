//! End-to-end tests against a stubbed provider.

use hobart::{CompanyFinancials, FmpClient, FmpConfig, FmpError, StatementKind};
use httpmock::prelude::*;
use serde_json::json;

fn client_for(server: &MockServer) -> FmpClient {
    let config = FmpConfig::new("test_key").with_base_url(server.base_url());
    FmpClient::new(config).unwrap()
}

async fn mount_symbol_list(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/stock/list")
                .query_param("apikey", "test_key");
            then.status(200).json_body(json!([
                {"symbol": "AAPL", "name": "Apple Inc.", "exchangeShortName": "NASDAQ"},
                {"symbol": "MSFT", "name": "Microsoft Corporation", "exchangeShortName": "NASDAQ"}
            ]));
        })
        .await;
}

#[tokio::test]
async fn test_validate_ticker_accepts_listed() {
    let server = MockServer::start_async().await;
    mount_symbol_list(&server).await;

    let client = client_for(&server);
    let ticker = client.validate_ticker("AAPL").await.unwrap();
    assert_eq!(ticker, "AAPL");
}

#[tokio::test]
async fn test_validate_ticker_rejects_unlisted() {
    let server = MockServer::start_async().await;
    mount_symbol_list(&server).await;

    let client = client_for(&server);
    match client.validate_ticker("ZZZZ").await {
        Err(FmpError::InvalidTicker(ticker)) => assert_eq!(ticker, "ZZZZ"),
        other => panic!("expected InvalidTicker, got {other:?}"),
    }
}

#[tokio::test]
async fn test_validate_ticker_rejects_malformed_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/list");
            then.status(200).json_body(json!({"symbol": "AAPL"}));
        })
        .await;

    let client = client_for(&server);
    let result = client.validate_ticker("AAPL").await;
    assert!(matches!(result, Err(FmpError::Schema(_))));
}

#[tokio::test]
async fn test_validate_ticker_rejects_entries_without_symbol() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/list");
            then.status(200)
                .json_body(json!([{"name": "No Symbol Corp", "exchangeShortName": "NYSE"}]));
        })
        .await;

    let client = client_for(&server);
    let result = client.validate_ticker("AAPL").await;
    assert!(matches!(result, Err(FmpError::Schema(_))));
}

#[tokio::test]
async fn test_symbol_list_decodes_entries() {
    let server = MockServer::start_async().await;
    mount_symbol_list(&server).await;

    let client = client_for(&server);
    let listings = client.symbol_list().await.unwrap();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].symbol, "AAPL");
    assert_eq!(listings[0].name.as_deref(), Some("Apple Inc."));
    assert_eq!(listings[1].exchange_short_name.as_deref(), Some("NASDAQ"));
}

#[tokio::test]
async fn test_http_error_maps_to_api() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/list");
            then.status(500).body("internal error");
        })
        .await;

    let client = client_for(&server);
    let result = client.validate_ticker("AAPL").await;
    assert!(matches!(result, Err(FmpError::Api(_))));
}

#[tokio::test]
async fn test_error_envelope_maps_to_api() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/list");
            then.status(200)
                .json_body(json!({"Error Message": "Invalid API KEY."}));
        })
        .await;

    let client = client_for(&server);
    let result = client.validate_ticker("AAPL").await;
    assert!(matches!(result, Err(FmpError::Api(_))));
}

#[tokio::test]
async fn test_fetch_normalizes_and_stores() {
    let server = MockServer::start_async().await;
    mount_symbol_list(&server).await;
    let income_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/income-statement/AAPL")
                .query_param("period", "annual")
                .query_param("apikey", "test_key");
            then.status(200).json_body(json!([
                {"date": "2021-09-25", "symbol": "AAPL", "calendarYear": "2021", "period": "FY", "revenue": 365_817_000_000_i64, "netIncome": 94_680_000_000_i64},
                {"date": "2020-09-26", "symbol": "AAPL", "calendarYear": "2020", "period": "FY", "revenue": 274_515_000_000_i64, "netIncome": 57_411_000_000_i64}
            ]));
        })
        .await;

    let client = client_for(&server);
    let mut company = CompanyFinancials::open(&client, "AAPL").await.unwrap();

    let table = company.fetch(StatementKind::IncomeStatement).await.unwrap();
    assert_eq!(table.height(), 2);

    income_mock.assert_async().await;
    assert!(company.statement(StatementKind::IncomeStatement).is_some());
    assert!(company.statement(StatementKind::BalanceSheet).is_none());
    assert!(company.statement(StatementKind::CashFlow).is_none());

    let pivot = company.transposed(StatementKind::IncomeStatement).unwrap();
    assert_eq!(pivot.labels().to_vec(), ["2020", "2021"]);
    assert_eq!(pivot.value("revenue", 0), Some("274515000000"));
    assert_eq!(pivot.value("revenue", 1), Some("365817000000"));
}

#[tokio::test]
async fn test_refetch_overwrites_stored_table() {
    let server = MockServer::start_async().await;
    mount_symbol_list(&server).await;
    let mut first = server
        .mock_async(|when, then| {
            when.method(GET).path("/balance-sheet-statement/AAPL");
            then.status(200).json_body(json!([
                {"date": "2021-09-25", "calendarYear": "2021", "totalAssets": 351_002_000_000_i64}
            ]));
        })
        .await;

    let client = client_for(&server);
    let mut company = CompanyFinancials::open(&client, "AAPL").await.unwrap();
    company.fetch(StatementKind::BalanceSheet).await.unwrap();
    assert_eq!(
        company
            .statement(StatementKind::BalanceSheet)
            .unwrap()
            .height(),
        1
    );

    first.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/balance-sheet-statement/AAPL");
            then.status(200).json_body(json!([
                {"date": "2022-09-24", "calendarYear": "2022", "totalAssets": 352_755_000_000_i64},
                {"date": "2021-09-25", "calendarYear": "2021", "totalAssets": 351_002_000_000_i64}
            ]));
        })
        .await;

    company.fetch(StatementKind::BalanceSheet).await.unwrap();
    assert_eq!(
        company
            .statement(StatementKind::BalanceSheet)
            .unwrap()
            .height(),
        2
    );
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_table() {
    let server = MockServer::start_async().await;
    mount_symbol_list(&server).await;
    let mut ok_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/cash-flow-statement/AAPL");
            then.status(200).json_body(json!([
                {"date": "2021-09-25", "calendarYear": "2021", "freeCashFlow": 92_953_000_000_i64}
            ]));
        })
        .await;

    let client = client_for(&server);
    let mut company = CompanyFinancials::open(&client, "AAPL").await.unwrap();
    company.fetch(StatementKind::CashFlow).await.unwrap();

    ok_mock.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/cash-flow-statement/AAPL");
            then.status(500).body("internal error");
        })
        .await;

    let result = company.fetch(StatementKind::CashFlow).await;
    assert!(matches!(result, Err(FmpError::Api(_))));
    assert_eq!(
        company.statement(StatementKind::CashFlow).unwrap().height(),
        1
    );
}

#[tokio::test]
async fn test_record_without_date_maps_to_schema() {
    let server = MockServer::start_async().await;
    mount_symbol_list(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/income-statement/AAPL");
            then.status(200)
                .json_body(json!([{"calendarYear": "2021", "revenue": 1}]));
        })
        .await;

    let client = client_for(&server);
    let mut company = CompanyFinancials::open(&client, "AAPL").await.unwrap();

    let result = company.fetch(StatementKind::IncomeStatement).await;
    assert!(matches!(result, Err(FmpError::Schema(_))));
    assert!(company.statement(StatementKind::IncomeStatement).is_none());
}

#[tokio::test]
async fn test_empty_response_yields_empty_table() {
    let server = MockServer::start_async().await;
    mount_symbol_list(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/income-statement/AAPL");
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = client_for(&server);
    let mut company = CompanyFinancials::open(&client, "AAPL").await.unwrap();

    let table = company.fetch(StatementKind::IncomeStatement).await.unwrap();
    assert!(table.is_empty());

    let pivot = company.transposed(StatementKind::IncomeStatement).unwrap();
    assert!(pivot.is_empty());
}

#[tokio::test]
async fn test_open_rejects_unlisted_ticker() {
    let server = MockServer::start_async().await;
    mount_symbol_list(&server).await;

    let client = client_for(&server);
    let result = CompanyFinancials::open(&client, "ZZZZ").await;
    assert!(matches!(result, Err(FmpError::InvalidTicker(_))));
}

#[tokio::test]
async fn test_fetch_all_populates_every_kind() {
    let server = MockServer::start_async().await;
    mount_symbol_list(&server).await;

    let mut mocks = Vec::new();
    for kind in StatementKind::ALL {
        let path = format!("/{}/AAPL", kind.endpoint());
        let mock = server
            .mock_async(move |when, then| {
                when.method(GET)
                    .path(path)
                    .query_param("period", "annual")
                    .query_param("apikey", "test_key");
                then.status(200).json_body(json!([
                    {"date": "2021-09-25", "calendarYear": "2021", "total": 100}
                ]));
            })
            .await;
        mocks.push(mock);
    }

    let client = client_for(&server);
    let mut company = CompanyFinancials::open(&client, "AAPL").await.unwrap();
    company.fetch_all().await.unwrap();

    for kind in StatementKind::ALL {
        assert_eq!(company.statement(kind).unwrap().height(), 1);
    }
    for mock in &mocks {
        mock.assert_async().await;
    }
}
