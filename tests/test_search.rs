use matgrid::errors::{ApiError, SearchError};
use matgrid::query::*;
use matgrid::types::{ApiKey, SiteUrl};
use matgrid::{MatgridClient, MAX_QUERY_DEPTH};
use mockito::{Matcher, Server, ServerGuard};
use rstest::*;
use serde_json::json;

// ========================================
//                 HELPERS
// ========================================

fn client_for(server: &ServerGuard) -> MatgridClient {
    let url = SiteUrl::try_from(format!("{}/api/", server.url())).unwrap();
    MatgridClient::new(url, &ApiKey::new("test-key".to_string())).unwrap()
}

/// Build a pif_search response page with synthetic hits `from..from+size`.
fn pif_page(total: u64, from: u64, size: u64) -> String {
    let hits: Vec<_> = (from..from + size)
        .map(|i| json!({"id": format!("hit-{}", i)}))
        .collect();
    json!({"took": 3, "total_num_hits": total, "hits": hits}).to_string()
}

// ========================================
//                 TESTS
// ========================================

#[rstest]
#[case(MAX_QUERY_DEPTH, 10)]
#[case(0, MAX_QUERY_DEPTH + 1)]
#[case(u64::MAX, 10)]
#[tokio::test]
async fn test_search_limit_enforced_before_any_request(
    #[case] from_index: u64,
    #[case] size: u64,
) {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/search/pif_search")
        .expect(0)
        .create_async()
        .await;
    let client = client_for(&server);

    let query = PifSystemReturningQuery::new()
        .from_index(from_index)
        .size(size);
    let err = client.search().pif_search(&query).await.unwrap_err();
    assert!(matches!(err, SearchError::DepthLimit { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_dataset_search_by_id() {
    // A query pinning a dataset ID returns exactly one hit.
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/search/dataset_search")
        .match_body(Matcher::PartialJson(json!({
            "size": 0,
            "query": {"dataset": [{"id": [{"equal": "151278"}]}]}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"took": 5, "total_num_hits": 1, "hits": []}"#)
        .create_async()
        .await;
    let client = client_for(&server);

    let query = DatasetReturningQuery::new().size(0).query(
        DataQuery::new().dataset(DatasetQuery::new().id(Filter::new().equal("151278"))),
    );
    let result = client.search().dataset_search(&query).await.unwrap();
    assert_eq!(result.total_num_hits, 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_auto_pagination_returns_all_hits() {
    // With neither size nor from set, the client pages until it holds
    // total_num_hits records.
    let total = 750;
    let mut server = Server::new_async().await;
    let first = server
        .mock("POST", "/api/v1/search/pif_search")
        .match_body(Matcher::PartialJson(json!({"from": 0, "size": 500})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(pif_page(total, 0, 500))
        .create_async()
        .await;
    let second = server
        .mock("POST", "/api/v1/search/pif_search")
        .match_body(Matcher::PartialJson(json!({"from": 500, "size": 250})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(pif_page(total, 500, 250))
        .create_async()
        .await;
    let client = client_for(&server);

    let query = PifSystemReturningQuery::new().query(
        DataQuery::new().dataset(DatasetQuery::new().id(Filter::new().equal("150670"))),
    );
    let result = client.search().pif_search(&query).await.unwrap();
    assert_eq!(result.total_num_hits, total);
    assert_eq!(result.hits.len() as u64, total);
    // Server order is preserved across page boundaries.
    assert_eq!(result.hits[499].id.as_deref(), Some("hit-499"));
    assert_eq!(result.hits[500].id.as_deref(), Some("hit-500"));
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_pagination_overflow_returns_remaining_hits() {
    // Requesting past the end of the result set yields only the
    // remaining hits, exactly as the server returned them.
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/search/pif_search")
        .match_body(Matcher::PartialJson(json!({"from": 100, "size": 45})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(pif_page(120, 100, 20))
        .create_async()
        .await;
    let client = client_for(&server);

    let query = PifSystemReturningQuery::new().from_index(100).size(45);
    let result = client.search().pif_search(&query).await.unwrap();
    assert_eq!(result.hits.len(), 20);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_explicit_pagination_sends_one_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/search/pif_search")
        .match_body(Matcher::PartialJson(json!({"size": 200})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(pif_page(100_000, 0, 200))
        .expect(1)
        .create_async()
        .await;
    let client = client_for(&server);

    let query = PifSystemReturningQuery::new().size(200);
    let result = client.search().pif_search(&query).await.unwrap();
    assert_eq!(result.hits.len(), 200);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_zero_timeout_fails_with_timeout_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/v1/search/dataset_search")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"took": 1, "total_num_hits": 0, "hits": []}"#)
        .create_async()
        .await;
    let client = client_for(&server);

    let query = DatasetReturningQuery::new().timeout(0).size(10);
    let err = client.search().dataset_search(&query).await.unwrap_err();
    assert!(matches!(err, SearchError::Api(ApiError::Timeout(_))));
}

#[tokio::test]
async fn test_server_error_carries_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/v1/search/file_search")
        .with_status(400)
        .with_body("malformed query")
        .create_async()
        .await;
    let client = client_for(&server);

    let err = client
        .search()
        .file_search(&FileReturningQuery::new().size(1))
        .await
        .unwrap_err();
    match err {
        SearchError::Api(ApiError::Server { status, text, .. }) => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(text, "malformed query");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_extracted_values_keyed_by_label() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/v1/search/pif_search")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "took": 2,
                "total_num_hits": 5,
                "hits": [{
                    "id": "x/y/1",
                    "extracted": {"Chemical formula": "C22H15NSSi"},
                    "extracted_path": {"Chemical formula": "/chemicalFormula"}
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let client = client_for(&server);

    let query = PifSystemReturningQuery::new().size(1).query(
        DataQuery::new().system(
            PifSystemQuery::new().chemical_formula(
                ChemicalFieldQuery::new()
                    .extract_as("Chemical formula")
                    .filter(ChemicalFilter::new().equal("C22H15NSSi")),
            ),
        ),
    );
    let result = client.search().pif_search(&query).await.unwrap();
    let hit = &result.hits[0];
    assert_eq!(
        hit.extracted.get("Chemical formula"),
        Some(&json!("C22H15NSSi"))
    );
    assert_eq!(
        hit.extracted_path
            .get("Chemical formula")
            .map(String::as_str),
        Some("/chemicalFormula")
    );
}

#[tokio::test]
async fn test_multi_search_preserves_sub_query_order() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/v1/search/pif/multi_pif_search")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "results": [
                    {"result": {"took": 1, "total_num_hits": 1,
                                "hits": [{"id": "a", "score": 0.7}]}},
                    {"result": {"took": 1, "total_num_hits": 1,
                                "hits": [{"id": "a", "score": 1.4}]}}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let client = client_for(&server);

    // Identical queries apart from the weight on the names field; the
    // second result is the weighted one.
    let base = |weight: f64| {
        PifSystemReturningQuery::new()
            .return_system(false)
            .score_relevance(true)
            .query(
                DataQuery::new().system(
                    PifSystemQuery::new()
                        .uid(Filter::new().equal("a"))
                        .names(
                            FieldQuery::new()
                                .weight(weight)
                                .filter(Filter::new().exists(true)),
                        ),
                ),
            )
    };
    let multi = MultiQuery::new().queries(base(1.0)).queries(base(2.0));
    let result = client.search().pif_multi_search(&multi).await.unwrap();
    assert_eq!(result.results.len(), 2);
    let unweighted = result.results[0].result.hits[0].score.unwrap();
    let weighted = result.results[1].result.hits[0].score.unwrap();
    assert!(weighted > unweighted);
}

#[tokio::test]
async fn test_multi_search_zero_timeout_fails_with_timeout_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/v1/search/pif/multi_pif_search")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results": []}"#)
        .create_async()
        .await;
    let client = client_for(&server);

    // A zero timeout on any sub-query applies to the shared request.
    let multi = MultiQuery::new()
        .queries(PifSystemReturningQuery::new().size(1))
        .queries(PifSystemReturningQuery::new().size(1).timeout(0));
    let err = client.search().pif_multi_search(&multi).await.unwrap_err();
    assert!(matches!(err, SearchError::Api(ApiError::Timeout(_))));
}

#[tokio::test]
async fn test_multi_search_depth_limit() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/search/pif/multi_pif_search")
        .expect(0)
        .create_async()
        .await;
    let client = client_for(&server);

    let multi = MultiQuery::new()
        .queries(PifSystemReturningQuery::new().size(1))
        .queries(
            PifSystemReturningQuery::new()
                .from_index(MAX_QUERY_DEPTH)
                .size(10),
        );
    let err = client.search().pif_multi_search(&multi).await.unwrap_err();
    assert!(matches!(err, SearchError::DepthLimit { .. }));
    mock.assert_async().await;
}
