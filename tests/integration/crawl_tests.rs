//! Integration tests for the crawler: end-to-end runs against wiremock
//! servers, covering the boundary scenarios the orchestrator must satisfy.

use tui_crawl::config::{Config, CrawlerConfig, OutputConfig, TargetConfig, UserAgentConfig};
use tui_crawl::crawler::run_crawl;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a fast-timing config suitable for tests. `tld_suffix` is left
/// empty so any wiremock host (a bare `127.0.0.1:port`) passes the validity
/// filter, since the real `.nz` suffix can't be satisfied by a loopback
/// address.
fn test_config(max_pages: u64) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_pages,
            num_threads: 3,
            num_seeds: 10,
            min_interval_secs: 0.0,
            max_wait_secs: 1.0,
            connect_timeout_secs: 2,
            read_timeout_secs: 2,
            robots_connect_timeout_secs: 1,
            robots_read_timeout_secs: 1,
            parse_budget_secs: 2,
            frontier_pop_timeout_secs: 1,
            retry_budget: 2,
            retry_sleep_secs: 0,
        },
        user_agent: UserAgentConfig {
            string: "tui-crawl-test/1.0".to_string(),
        },
        output: OutputConfig {
            seed_file: "unused".to_string(),
            log_dir: "./data".to_string(),
        },
        target: TargetConfig {
            tld_suffix: String::new(),
        },
    }
}

#[tokio::test]
async fn seed_cap_stops_at_max_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html><body>no outgoing links</body></html>"),
        )
        .mount(&server)
        .await;

    let seeds = vec![
        format!("{}/a", server.uri()),
        format!("{}/b", server.uri()),
        format!("{}/c", server.uri()),
    ];

    let outcome = run_crawl(test_config(2), seeds).await.unwrap();
    assert_eq!(outcome.records.len(), 2);
    assert!(outcome.records.iter().all(|r| r.is_seed));
}

#[tokio::test]
async fn robots_disallow_all_blocks_every_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"))
        .mount(&server)
        .await;
    // If the fetcher ever calls through, fail loudly by returning a body
    // that would otherwise be recorded as a 200.
    Mock::given(method("GET"))
        .and(path("/blocked"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html></html>"),
        )
        .mount(&server)
        .await;

    let seeds = vec![format!("{}/blocked", server.uri())];
    let outcome = run_crawl(test_config(1), seeds).await.unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].status, "Robots");
    assert_eq!(outcome.records[0].size, 0);
}

#[tokio::test]
async fn redirect_target_is_recorded_and_not_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/y"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/y"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html><body>landed</body></html>"),
        )
        .mount(&server)
        .await;

    let seeds = vec![format!("{}/x", server.uri())];
    let outcome = run_crawl(test_config(3), seeds).await.unwrap();

    // Only the original /x commit is recorded; /y was admitted to the dedup
    // sets as a redirect target and never independently visited.
    assert_eq!(outcome.records.len(), 1);
    assert!(outcome.records[0].redirect_target.is_some());
    assert!(outcome.records[0].redirect_target.as_ref().unwrap().ends_with("/y"));
}

#[tokio::test]
async fn blacklisted_extension_link_is_never_enqueued() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/index"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(format!(
                    r#"<html><body><a href="{}/file.pdf">doc</a></body></html>"#,
                    server.uri()
                )),
        )
        .mount(&server)
        .await;
    // No mock for /file.pdf: if the crawler ever requests it, wiremock
    // returns a 404-style default mismatch that would surface as a second
    // recorded visit, failing the length assertion below.

    let seeds = vec![format!("{}/index", server.uri())];
    let outcome = run_crawl(test_config(5), seeds).await.unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].status, "200");
}

#[tokio::test]
async fn politeness_spaces_out_repeated_fetches_to_same_host() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html></html>"),
        )
        .mount(&server)
        .await;

    let mut config = test_config(5);
    config.crawler.min_interval_secs = 0.2;
    config.crawler.max_wait_secs = 5.0;
    config.crawler.num_threads = 5;

    let seeds = (0..5)
        .map(|i| format!("{}/p{i}", server.uri()))
        .collect();

    let start = std::time::Instant::now();
    let outcome = run_crawl(config, seeds).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(outcome.records.len(), 5);
    // Five fetches against one host at a 0.2s minimum interval: at least
    // four gaps must elapse.
    assert!(elapsed.as_secs_f64() >= 0.8 * 0.9);
}
