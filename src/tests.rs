//! Integration tests for the Converta backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::ai::Generator;
use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_psk(Some("test-admin-key".to_string())).await
    }

    async fn with_psk(psk: Option<String>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let upload_dir = temp_dir.path().join("uploads");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        // No API key: draft generation fails without network access
        let generator = Arc::new(Generator::new("http://127.0.0.1:9".to_string(), None));

        // Create config
        let config = Config {
            admin_psk: psk.clone(),
            db_path,
            upload_dir,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            genai_api_key: None,
            genai_base_url: "http://127.0.0.1:9".to_string(),
            log_level: "warn".to_string(),
        };

        let state = AppState {
            repo,
            generator,
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let mut client_builder = Client::builder();
        if let Some(key) = psk {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert("x-admin-key", key.parse().unwrap());
            client_builder = client_builder.default_headers(headers);
        }

        TestFixture {
            client: client_builder.build().unwrap(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create a post through the admin surface and return its id.
    async fn create_post(&self, title: &str, slug: &str, status: &str) -> String {
        let resp = self
            .client
            .post(self.url("/api/admin/posts"))
            .json(&json!({
                "title": title,
                "slug": slug,
                "content": "<p>conteúdo</p>",
                "status": status
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Create a service card through the admin surface and return its id.
    async fn create_service(&self, body: Value) -> String {
        let resp = self
            .client
            .post(self.url("/api/admin/services"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_admin_requires_key() {
    let fixture = TestFixture::new().await;

    // No key at all
    let resp = Client::new()
        .get(fixture.url("/api/admin/snapshot"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    // Wrong key
    let resp = Client::new()
        .get(fixture.url("/api/admin/snapshot"))
        .header("x-admin-key", "wrong-key")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_public_surface_needs_no_key() {
    let fixture = TestFixture::new().await;

    let resp = Client::new()
        .get(fixture.url("/api/content"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_empty_store_serves_default_headline() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/content"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(
        body["data"]["content"]["sections"]["home.hero"]["title"],
        "Transformamos Cliques em Clientes Reais"
    );
    assert_eq!(body["data"]["name"], "Converta Marketing");
}

#[tokio::test]
async fn test_partial_config_merges_over_defaults() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .put(fixture.url("/api/admin/config"))
        .json(&json!({
            "name": "Agência Nova",
            "theme": { "typography": { "fontFamily": "Roboto" } },
            "sections": {
                "home.hero": { "title": "Outro título" }
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/content"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let data = &body["data"];

    // Stored fields win
    assert_eq!(data["name"], "Agência Nova");
    assert_eq!(data["theme"]["typography"]["fontFamily"], "Roboto");
    assert_eq!(data["content"]["sections"]["home.hero"]["title"], "Outro título");

    // Everything the record left out keeps its default
    assert_eq!(data["theme"]["typography"]["headingFont"], "Poppins");
    assert_eq!(data["phone"], "+55 11 4002-8922");
    assert_eq!(
        data["content"]["sections"]["home.hero"]["buttonText"],
        "Quero vender mais"
    );
    assert_eq!(data["isBlogActive"], true);
}

#[tokio::test]
async fn test_sync_defaults_is_idempotent() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/admin/services/sync-defaults"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let first_inserted = body["data"]["inserted"].as_u64().unwrap();
    assert!(first_inserted > 0);
    assert_eq!(body["data"]["skipped"], 0);

    let resp = fixture
        .client
        .get(fixture.url("/api/admin/services"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let count_after_first = body["data"].as_array().unwrap().len() as u64;
    assert_eq!(count_after_first, first_inserted);

    // Second run inserts nothing
    let resp = fixture
        .client
        .post(fixture.url("/api/admin/services/sync-defaults"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["inserted"], 0);
    assert_eq!(body["data"]["skipped"].as_u64().unwrap(), first_inserted);

    let resp = fixture
        .client
        .get(fixture.url("/api/admin/services"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len() as u64, count_after_first);
}

#[tokio::test]
async fn test_catalog_sorts_and_hides_inactive() {
    let fixture = TestFixture::new().await;

    fixture
        .create_service(json!({
            "name": "Segundo", "page": "home", "sectionId": "pricing", "displayOrder": 2
        }))
        .await;
    fixture
        .create_service(json!({
            "name": "Primeiro", "page": "home", "sectionId": "pricing", "displayOrder": 1
        }))
        .await;
    fixture
        .create_service(json!({
            "name": "Invisível", "page": "home", "sectionId": "pricing",
            "displayOrder": 0, "isActive": false
        }))
        .await;

    let resp = fixture
        .client
        .get(fixture.url("/api/catalog?page=home&sectionId=pricing"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Primeiro", "Segundo"]);
}

#[tokio::test]
async fn test_catalog_legacy_category_fallback() {
    let fixture = TestFixture::new().await;

    // Legacy record: no page, no section, only a category tag
    fixture
        .create_service(json!({ "name": "Legado", "category": "consultoria" }))
        .await;

    let resp = fixture
        .client
        .get(fixture.url("/api/catalog?page=consultancy&sectionId=pricing"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let services = body["data"].as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["name"], "Legado");

    // The same record matches no other page
    let resp = fixture
        .client
        .get(fixture.url("/api/catalog?page=ads&sectionId=pricing"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_service_update_last_write_wins() {
    let fixture = TestFixture::new().await;

    let id = fixture
        .create_service(json!({ "name": "Original", "page": "home", "sectionId": "pricing" }))
        .await;

    // Two sequential updates with no version bookkeeping; the second wins.
    for name in ["Primeira edição", "Segunda edição"] {
        let resp = fixture
            .client
            .put(fixture.url(&format!("/api/admin/services/{}", id)))
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let resp = fixture
        .client
        .get(fixture.url("/api/admin/services"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let services = body["data"].as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["name"], "Segunda edição");
    // Fields the updates never mentioned survive
    assert_eq!(services[0]["page"], "home");
}

#[tokio::test]
async fn test_blog_slug_roundtrip() {
    let fixture = TestFixture::new().await;

    fixture
        .create_post("Como vender mais", "como-vender-mais", "published")
        .await;

    let resp = Client::new()
        .get(fixture.url("/api/blog/como-vender-mais"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["title"], "Como vender mais");
    assert_eq!(body["data"]["slug"], "como-vender-mais");

    // No other slug finds it
    let resp = Client::new()
        .get(fixture.url("/api/blog/como-vender"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_draft_posts_are_invisible_publicly() {
    let fixture = TestFixture::new().await;

    let id = fixture
        .create_post("Rascunho", "rascunho-secreto", "draft")
        .await;

    let resp = Client::new()
        .get(fixture.url("/api/blog"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());

    let resp = Client::new()
        .get(fixture.url("/api/blog/rascunho-secreto"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // The admin surface still sees it
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/admin/posts/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Publishing makes it retrievable
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/admin/posts/{}", id)))
        .json(&json!({ "status": "published" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = Client::new()
        .get(fixture.url("/api/blog/rascunho-secreto"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_invalid_and_duplicate_slugs_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/admin/posts"))
        .json(&json!({
            "title": "T", "slug": "Slug Inválido", "content": "<p>c</p>"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    fixture.create_post("Primeiro", "mesmo-slug", "draft").await;
    let resp = fixture
        .client
        .post(fixture.url("/api/admin/posts"))
        .json(&json!({
            "title": "Segundo", "slug": "mesmo-slug", "content": "<p>c</p>"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_view_counter_increments() {
    let fixture = TestFixture::new().await;

    fixture
        .create_post("Post", "post-com-views", "published")
        .await;

    for expected in 1..=3 {
        let resp = Client::new()
            .post(fixture.url("/api/blog/post-com-views/views"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["views"], expected);
    }

    let resp = Client::new()
        .get(fixture.url("/api/blog/post-com-views"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["views"], 3);
}

#[tokio::test]
async fn test_one_reaction_per_reader() {
    let fixture = TestFixture::new().await;

    fixture
        .create_post("Post", "post-reagido", "published")
        .await;

    let react = |reader: &'static str, kind: &'static str| {
        let url = fixture.url("/api/blog/post-reagido/reactions");
        async move {
            let resp = Client::new()
                .post(url)
                .json(&json!({ "readerKey": reader, "kind": kind }))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
            resp.json::<Value>().await.unwrap()
        }
    };

    let body = react("reader-1", "like").await;
    assert_eq!(body["data"]["accepted"], true);
    assert_eq!(body["data"]["likes"], 1);

    // Same reader again: rejected, counters unchanged, even for another kind
    let body = react("reader-1", "dislike").await;
    assert_eq!(body["data"]["accepted"], false);
    assert_eq!(body["data"]["likes"], 1);
    assert_eq!(body["data"]["dislikes"], 0);

    // A different reader still counts
    let body = react("reader-2", "like").await;
    assert_eq!(body["data"]["accepted"], true);
    assert_eq!(body["data"]["likes"], 2);
}

#[tokio::test]
async fn test_reply_to_reply_is_filed_under_top_level_comment() {
    let fixture = TestFixture::new().await;

    fixture
        .create_post("Post", "post-comentado", "published")
        .await;

    let comment = |body: Value| {
        let url = fixture.url("/api/blog/post-comentado/comments");
        async move {
            let resp = Client::new().post(url).json(&body).send().await.unwrap();
            assert_eq!(resp.status(), 200);
            resp.json::<Value>().await.unwrap()
        }
    };

    let a = comment(json!({ "authorName": "Ana", "content": "Ótimo artigo" })).await;
    let a_id = a["data"]["id"].as_str().unwrap().to_string();

    let b = comment(json!({
        "authorName": "Bruno", "content": "Concordo", "parentId": a_id
    }))
    .await;
    let b_id = b["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(b["data"]["parentId"], a_id.as_str());

    // Reply to the reply: flattened to the original top-level comment
    let c = comment(json!({
        "authorName": "Carla", "content": "Eu também", "parentId": b_id
    }))
    .await;
    assert_eq!(c["data"]["parentId"], a_id.as_str());

    let resp = Client::new()
        .get(fixture.url("/api/blog/post-comentado/comments"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let comments = body["data"].as_array().unwrap();
    assert_eq!(comments.len(), 3);
    let replies_of_a: Vec<&Value> = comments
        .iter()
        .filter(|c| c["parentId"] == a_id.as_str())
        .collect();
    assert_eq!(replies_of_a.len(), 2);
}

#[tokio::test]
async fn test_comment_requires_author_and_content() {
    let fixture = TestFixture::new().await;

    fixture
        .create_post("Post", "post-validado", "published")
        .await;

    let resp = Client::new()
        .post(fixture.url("/api/blog/post-validado/comments"))
        .json(&json!({ "authorName": "  ", "content": "oi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = Client::new()
        .post(fixture.url("/api/blog/post-validado/comments"))
        .json(&json!({ "authorName": "Ana", "content": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_lead_capture_and_admin_readback() {
    let fixture = TestFixture::new().await;

    let resp = Client::new()
        .post(fixture.url("/api/leads"))
        .json(&json!({
            "leadType": "plan_checkout",
            "plan": "Growth",
            "data": { "name": "Maria", "email": "maria@example.com" }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Admin reads it back, newest first
    let resp = fixture
        .client
        .get(fixture.url("/api/admin/leads"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let leads = body["data"].as_array().unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["leadType"], "plan_checkout");
    assert_eq!(leads[0]["plan"], "Growth");
    assert_eq!(leads[0]["data"]["email"], "maria@example.com");

    // The read side is admin-only
    let resp = Client::new()
        .get(fixture.url("/api/admin/leads"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_briefing_capture() {
    let fixture = TestFixture::new().await;

    let resp = Client::new()
        .post(fixture.url("/api/briefings"))
        .json(&json!({ "data": { "empresa": "Padaria Sol", "objetivo": "vender online" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/admin/briefings"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["data"]["empresa"], "Padaria Sol");
}

#[tokio::test]
async fn test_admin_snapshot_contains_all_collections() {
    let fixture = TestFixture::new().await;

    fixture.create_post("Post", "post-snapshot", "draft").await;
    fixture
        .create_service(json!({ "name": "Card", "page": "home", "sectionId": "pricing" }))
        .await;

    let resp = fixture
        .client
        .get(fixture.url("/api/admin/snapshot"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let data = &body["data"];

    assert_eq!(data["config"]["name"], "Converta Marketing");
    assert_eq!(data["posts"].as_array().unwrap().len(), 1);
    assert_eq!(data["services"].as_array().unwrap().len(), 1);
    assert!(data["leads"].as_array().unwrap().is_empty());
    assert!(data["briefings"].as_array().unwrap().is_empty());
    assert!(data["revisionId"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_deleting_post_removes_comments() {
    let fixture = TestFixture::new().await;

    let id = fixture
        .create_post("Post", "post-deletado", "published")
        .await;

    let resp = Client::new()
        .post(fixture.url("/api/blog/post-deletado/comments"))
        .json(&json!({ "authorName": "Ana", "content": "oi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/admin/posts/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/admin/snapshot"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["posts"].as_array().unwrap().is_empty());
    assert!(body["data"]["comments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_accepts_png_and_rejects_other_bytes() {
    let fixture = TestFixture::new().await;

    let png_bytes: Vec<u8> = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(png_bytes).file_name("logo.png"),
    );
    let resp = fixture
        .client
        .post(fixture.url("/api/admin/uploads"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let url = body["data"]["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".png"));

    // The stored file is served back
    let resp = fixture
        .client
        .get(fixture.url(url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(b"not an image".to_vec()).file_name("notes.txt"),
    );
    let resp = fixture
        .client
        .post(fixture.url("/api/admin/uploads"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_generate_draft_fails_cleanly_without_key() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/admin/posts/generate"))
        .json(&json!({ "topic": "tráfego pago para padarias" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "GENERATION_FAILED");
}
