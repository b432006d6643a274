//! End-to-end tests of the seed pipeline against mock sites

use crate::common::*;
use headline_harvester::{ClassifiedArticle, CrawlTask};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_sports_example_with_enrichment() {
    let server = MockServer::start().await;
    mount_allow_all_robots(&server).await;
    mount_html(&server, "/", FRONT_PAGE).await;
    mount_html(&server, "/a1", SPORTS_ARTICLE).await;
    mount_html(&server, "/a2", WEATHER_ARTICLE).await;

    let seed = server.uri();
    let tasks = vec![CrawlTask::new(seed.clone(), 1, vec!["sports".to_string()])];

    let batch = create_harvester().run_batch(&tasks).await;

    let result = batch.get(&seed).expect("seed should be present");
    assert_eq!(result.title, "News");
    assert_eq!(
        result.headlines,
        vec![ClassifiedArticle {
            headline: "Sports News".to_string(),
            text: "Team wins championship".to_string(),
            text_link: "/a1".to_string(),
            category: "sports".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_depth_zero_leaves_text_empty() {
    let server = MockServer::start().await;
    mount_allow_all_robots(&server).await;
    mount_html(&server, "/", FRONT_PAGE).await;
    mount_unreachable_html(&server, "/a1").await;
    mount_unreachable_html(&server, "/a2").await;

    let seed = server.uri();
    let batch = create_harvester()
        .run_batch(&[CrawlTask::new(seed.clone(), 0, vec![])])
        .await;

    let result = batch.get(&seed).unwrap();
    assert_eq!(result.headlines.len(), 2);
    assert!(result.headlines.iter().all(|a| a.text.is_empty()));
    assert!(result.headlines.iter().all(|a| a.category.is_empty()));
    assert_eq!(result.headlines[0].headline, "Sports News");
    assert_eq!(result.headlines[1].headline, "Weather");
}

#[tokio::test]
async fn test_failed_enrichment_keeps_siblings() {
    let server = MockServer::start().await;
    mount_allow_all_robots(&server).await;
    mount_html(&server, "/", FRONT_PAGE).await;
    mount_html(&server, "/a1", SPORTS_ARTICLE).await;
    Mock::given(method("GET"))
        .and(path("/a2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let seed = server.uri();
    let batch = create_harvester()
        .run_batch(&[CrawlTask::new(seed.clone(), 1, vec![])])
        .await;

    let headlines = &batch.get(&seed).unwrap().headlines;
    assert_eq!(headlines.len(), 2);
    assert_eq!(headlines[0].text, "Team wins championship");
    assert_eq!(headlines[1].headline, "Weather");
    assert_eq!(headlines[1].text, "");
}

#[tokio::test]
async fn test_keyword_matched_in_article_text() {
    let server = MockServer::start().await;
    mount_allow_all_robots(&server).await;
    mount_html(&server, "/", FRONT_PAGE).await;
    mount_html(&server, "/a1", SPORTS_ARTICLE).await;
    mount_html(&server, "/a2", WEATHER_ARTICLE).await;

    let seed = server.uri();
    let tasks = vec![CrawlTask::new(seed.clone(), 2, vec!["SUNNY".to_string()])];
    let batch = create_harvester().run_batch(&tasks).await;

    let headlines = &batch.get(&seed).unwrap().headlines;
    assert_eq!(headlines.len(), 1);
    assert_eq!(headlines[0].headline, "Weather");
    assert_eq!(headlines[0].category, "sunny");
}

#[tokio::test]
async fn test_robots_disallowed_seed_is_absent() {
    let server = MockServer::start().await;
    mount_robots(&server, 200, "User-agent: *\nDisallow: /private").await;
    mount_unreachable_html(&server, "/private").await;
    mount_html(&server, "/news", FRONT_PAGE).await;

    let blocked = format!("{}/private", server.uri());
    let allowed = format!("{}/news", server.uri());
    let tasks = vec![
        CrawlTask::new(blocked.clone(), 0, vec![]),
        CrawlTask::new(allowed.clone(), 0, vec![]),
    ];

    let batch = create_harvester().run_batch(&tasks).await;

    assert_eq!(batch.len(), 1);
    assert!(!batch.contains(&blocked));
    assert!(batch.contains(&allowed));
}

#[tokio::test]
async fn test_robots_rules_for_our_agent() {
    let server = MockServer::start().await;
    mount_robots(&server, 200, "User-agent: TestBot\nDisallow: /\n\nUser-agent: *\nAllow: /").await;
    mount_unreachable_html(&server, "/").await;

    let seed = server.uri();
    let batch = create_harvester()
        .run_batch(&[CrawlTask::new(seed, 0, vec![])])
        .await;
    assert!(batch.is_empty());
}

#[tokio::test]
async fn test_missing_robots_allows_crawl() {
    let server = MockServer::start().await;
    mount_robots(&server, 404, "").await;
    mount_html(&server, "/", FRONT_PAGE).await;

    let seed = server.uri();
    let batch = create_harvester()
        .run_batch(&[CrawlTask::new(seed.clone(), 0, vec![])])
        .await;
    assert!(batch.contains(&seed));
}

#[tokio::test]
async fn test_robots_server_error_disallows_crawl() {
    let server = MockServer::start().await;
    mount_robots(&server, 503, "").await;
    mount_unreachable_html(&server, "/").await;

    let batch = create_harvester()
        .run_batch(&[CrawlTask::new(server.uri(), 0, vec![])])
        .await;
    assert!(batch.is_empty());
}

#[tokio::test]
async fn test_seed_errors_do_not_abort_batch() {
    let server = MockServer::start().await;
    mount_allow_all_robots(&server).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;
    mount_html(&server, "/news", FRONT_PAGE).await;

    let gone = format!("{}/gone", server.uri());
    let feed = format!("{}/feed", server.uri());
    let news = format!("{}/news", server.uri());
    let tasks = vec![
        CrawlTask::new(gone.clone(), 0, vec![]),
        CrawlTask::new("mailto:someone@example.com", 0, vec![]),
        CrawlTask::new(feed.clone(), 0, vec![]),
        CrawlTask::new(news.clone(), 0, vec![]),
    ];

    let batch = create_harvester().run_batch(&tasks).await;

    assert_eq!(batch.len(), 1);
    assert!(batch.contains(&news));
    assert!(!batch.contains(&gone));
    assert!(!batch.contains(&feed));
}

#[tokio::test]
async fn test_duplicate_headings_keep_first_link() {
    let server = MockServer::start().await;
    mount_allow_all_robots(&server).await;
    mount_html(
        &server,
        "/",
        r#"<html><head><title>Dupes</title></head><body>
            <h1><a href="/first">Big Story</a></h1>
            <h3><a href="/second">"Big Story"</a></h3>
        </body></html>"#,
    )
    .await;
    mount_html(&server, "/first", SPORTS_ARTICLE).await;
    mount_unreachable_html(&server, "/second").await;

    let seed = server.uri();
    let batch = create_harvester()
        .run_batch(&[CrawlTask::new(seed.clone(), 1, vec![])])
        .await;

    let headlines = &batch.get(&seed).unwrap().headlines;
    assert_eq!(headlines.len(), 1);
    assert_eq!(headlines[0].text_link, "/first");
    assert_eq!(headlines[0].text, "Team wins championship");
}

#[tokio::test]
async fn test_enrichment_is_bounded_and_joined() {
    let delay = Duration::from_millis(400);
    let server = MockServer::start().await;
    mount_allow_all_robots(&server).await;

    let mut front_page = String::from("<html><head><title>Many</title></head><body>");
    for i in 0..10 {
        front_page.push_str(&format!(r#"<h2><a href="/s{i}">Story {i}</a></h2>"#));
        let article = format!("<html><body><article><p>Body of story {i}</p></article></body></html>");
        Mock::given(method("GET"))
            .and(path(format!("/s{i}")))
            .respond_with(html_response(&article).set_delay(delay))
            .expect(1)
            .mount(&server)
            .await;
    }
    front_page.push_str("</body></html>");
    mount_html(&server, "/", &front_page).await;

    let seed = server.uri();
    let start = Instant::now();
    let batch = create_harvester()
        .run_batch(&[CrawlTask::new(seed.clone(), 1, vec![])])
        .await;
    let elapsed = start.elapsed();

    let headlines = &batch.get(&seed).unwrap().headlines;
    assert_eq!(headlines.len(), 10);
    for (i, article) in headlines.iter().enumerate() {
        assert_eq!(article.text, format!("Body of story {i}"));
    }

    // Five workers need two rounds for ten delayed articles
    assert!(elapsed >= delay * 2, "finished too fast: {:?}", elapsed);
    assert!(elapsed < delay * 10, "fetches were not concurrent: {:?}", elapsed);
}

#[tokio::test]
async fn test_redirect_target_is_checked_against_robots() {
    let server = MockServer::start().await;
    mount_robots(&server, 200, "User-agent: *\nDisallow: /private").await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/private", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/news", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(html_response(FRONT_PAGE))
        .mount(&server)
        .await;
    mount_html(&server, "/news", FRONT_PAGE).await;

    let moved = format!("{}/moved", server.uri());
    let old = format!("{}/old", server.uri());
    let batch = create_harvester()
        .run_batch(&[
            CrawlTask::new(moved.clone(), 0, vec![]),
            CrawlTask::new(old.clone(), 0, vec![]),
        ])
        .await;

    assert!(!batch.contains(&moved));
    assert_eq!(batch.get(&old).unwrap().title, "News");
}
