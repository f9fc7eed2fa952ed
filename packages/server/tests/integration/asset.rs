use serde_json::json;

use crate::common::{FilePart, TestApp, VOICE_SECRET, routes};

mod upload {
    use super::*;

    #[tokio::test]
    async fn stores_object_and_row() {
        let app = TestApp::spawn().await;
        let bundle = app.create_bundle("Dragon", None).await;

        let item = app.upload_bundle_image(bundle, "dragon.png").await;

        assert_eq!(item["kind"], "bundle_image");
        assert_eq!(item["owner_id"], bundle);
        assert_eq!(item["mime_type"], "image/png");
        assert_eq!(item["filename"], "dragon.png");
        let url = item["url"].as_str().unwrap();
        assert!(url.contains("/object/public/bundles/"), "unexpected url {url}");
        assert!(app.object_exists(url).await);
        assert_eq!(app.count_rows("asset").await, 1);
    }

    #[tokio::test]
    async fn uploaded_object_is_served_publicly() {
        let app = TestApp::spawn().await;
        let bundle = app.create_bundle("Dragon", None).await;
        let item = app.upload_bundle_image(bundle, "dragon.png").await;

        let res = app
            .client
            .get(item["url"].as_str().unwrap())
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), 200);
        assert_eq!(res.headers()["content-type"], "image/png");
        assert_eq!(res.bytes().await.unwrap().as_ref(), b"\x89PNG\r\n\x1a\nfake image");
    }

    #[tokio::test]
    async fn same_filename_twice_creates_distinct_objects() {
        let app = TestApp::spawn().await;
        let bundle = app.create_bundle("Dragon", None).await;

        let a = app.upload_bundle_image(bundle, "same.png").await;
        let b = app.upload_bundle_image(bundle, "same.png").await;

        assert_ne!(a["url"], b["url"]);
        assert!(app.object_exists(a["url"].as_str().unwrap()).await);
        assert!(app.object_exists(b["url"].as_str().unwrap()).await);
    }

    #[tokio::test]
    async fn unknown_owner_is_rejected_without_storing() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(
                routes::ASSET_UPLOAD,
                FilePart::png("a.png"),
                &[("kind", "bundle_image"), ("owner_id", "999")],
            )
            .await;

        assert_eq!(res.status, 404, "{}", res.text);
        assert_eq!(app.count_rows("asset").await, 0);
        assert!(!app.object_file("bundles", "gallery/999").exists());
    }

    #[tokio::test]
    async fn owned_kind_requires_owner() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(
                routes::ASSET_UPLOAD,
                FilePart::png("a.png"),
                &[("kind", "design_file")],
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn missing_file_is_rejected() {
        let app = TestApp::spawn().await;
        let form = reqwest::multipart::Form::new().text("kind", "media");

        let res = app
            .client
            .post(app.url(routes::ASSET_UPLOAD))
            .bearer_auth(&app.token)
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), 400);
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let app = TestApp::spawn().await;
        let big = vec![0u8; 1024 * 1024 + 1];

        let res = app
            .upload(
                routes::ASSET_UPLOAD,
                FilePart::new("big.bin", "application/octet-stream", &big),
                &[("kind", "media")],
            )
            .await;

        assert!(res.status == 400 || res.status == 413, "got {}", res.status);
        assert_eq!(app.count_rows("asset").await, 0);
    }

    #[tokio::test]
    async fn media_with_caption_and_tags() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(
                routes::ASSET_UPLOAD,
                FilePart::png("shelf.png"),
                &[
                    ("kind", "media"),
                    ("caption", "Shelf shot"),
                    ("tags", "studio, shelf"),
                    ("sort_order", "3"),
                ],
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["item"]["caption"], "Shelf shot");
        assert_eq!(res.body["item"]["tags"], json!(["studio", "shelf"]));
        assert_eq!(res.body["item"]["sort_order"], 3);
    }
}

mod removal {
    use super::*;

    #[tokio::test]
    async fn by_id_removes_row_then_object() {
        let app = TestApp::spawn().await;
        let bundle = app.create_bundle("Dragon", None).await;
        let item = app.upload_bundle_image(bundle, "a.png").await;
        let url = item["url"].as_str().unwrap().to_string();

        let res = app.post(routes::ASSET_REMOVE, &json!({"id": item["id"]})).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["ok"], true);
        assert_eq!(res.body["already_deleted"], false);
        assert_eq!(app.count_rows("asset").await, 0);
        assert!(!app.object_exists(&url).await);
    }

    #[tokio::test]
    async fn by_natural_key_via_delete_verb() {
        let app = TestApp::spawn().await;
        let bundle = app.create_bundle("Dragon", None).await;
        let item = app.upload_bundle_image(bundle, "a.png").await;

        let res = app
            .delete_with_body(
                routes::ASSET_REMOVE,
                &json!({"bundle_id": bundle, "url": item["url"], "kind": "bundle_image"}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["already_deleted"], false);
        assert_eq!(app.count_rows("asset").await, 0);
    }

    #[tokio::test]
    async fn repeated_natural_key_delete_is_idempotent() {
        let app = TestApp::spawn().await;
        let bundle = app.create_bundle("Dragon", None).await;
        let item = app.upload_bundle_image(bundle, "a.png").await;
        let body = json!({"owner_id": bundle, "url": item["url"]});

        let first = app.post(routes::ASSET_REMOVE, &body).await;
        let second = app.post(routes::ASSET_REMOVE, &body).await;

        assert_eq!(first.body["already_deleted"], false);
        assert_eq!(second.status, 200);
        assert_eq!(second.body["already_deleted"], true);
    }

    #[tokio::test]
    async fn standalone_media_by_url_without_owner() {
        let app = TestApp::spawn().await;
        let upload = app
            .upload(routes::ASSET_UPLOAD, FilePart::png("shelf.png"), &[("kind", "media")])
            .await;
        assert_eq!(upload.status, 200, "{}", upload.text);
        let url = upload.body["item"]["url"].as_str().unwrap().to_string();

        let res = app
            .delete_with_body(routes::ASSET_REMOVE, &json!({"url": url, "kind": "media"}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["already_deleted"], false);
        assert_eq!(app.count_rows("asset").await, 0);
        assert!(!app.object_exists(&url).await);
    }

    #[tokio::test]
    async fn second_delete_by_id_is_not_found() {
        let app = TestApp::spawn().await;
        let bundle = app.create_bundle("Dragon", None).await;
        let item = app.upload_bundle_image(bundle, "a.png").await;

        let first = app.post(routes::ASSET_REMOVE, &json!({"id": item["id"]})).await;
        assert_eq!(first.status, 200, "{}", first.text);
        assert_eq!(first.body["already_deleted"], false);

        let second = app.post(routes::ASSET_REMOVE, &json!({"id": item["id"]})).await;
        assert_eq!(second.status, 404, "{}", second.text);
        assert_eq!(second.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::ASSET_REMOVE, &json!({"id": 12345})).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn missing_object_does_not_fail_delete() {
        let app = TestApp::spawn().await;
        let bundle = app.create_bundle("Dragon", None).await;
        let item = app.upload_bundle_image(bundle, "a.png").await;
        let (bucket, path) =
            common::storage::parse_public_url(item["url"].as_str().unwrap()).unwrap();
        app.store.remove(&bucket, &[path]).await.unwrap();

        let res = app.post(routes::ASSET_REMOVE, &json!({"id": item["id"]})).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(app.count_rows("asset").await, 0);
    }
}

mod metadata {
    use super::*;

    #[tokio::test]
    async fn caption_tags_and_order_are_mutable() {
        let app = TestApp::spawn().await;
        let bundle = app.create_bundle("Dragon", None).await;
        let item = app.upload_bundle_image(bundle, "a.png").await;
        let id = item["id"].as_i64().unwrap() as i32;

        let res = app
            .patch(
                &routes::asset(id),
                &json!({"caption": "Front view", "tags": ["front", " ", "hero"], "sort_order": 2}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["caption"], "Front view");
        assert_eq!(res.body["tags"], json!(["front", "hero"]));
        assert_eq!(res.body["sort_order"], 2);
        assert_eq!(res.body["url"], item["url"]);

        let cleared = app.patch(&routes::asset(id), &json!({"caption": null})).await;
        assert_eq!(cleared.body["caption"], serde_json::Value::Null);
        assert_eq!(cleared.body["tags"], json!(["front", "hero"]));
    }

    #[tokio::test]
    async fn list_filters_by_kind_and_owner() {
        let app = TestApp::spawn().await;
        let a = app.create_bundle("A", None).await;
        let b = app.create_bundle("B", None).await;
        app.upload_bundle_image(a, "1.png").await;
        app.upload_bundle_image(a, "2.png").await;
        app.upload_bundle_image(b, "3.png").await;

        let res = app
            .get(&format!("{}?kind=bundle_image&owner_id={a}", routes::ASSETS))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["items"].as_array().unwrap().len(), 2);
    }
}

mod voice_notes {
    use super::*;

    async fn push(app: &TestApp, secret: Option<&str>) -> crate::common::TestResponse {
        let part = reqwest::multipart::Part::bytes(b"OggS fake audio".to_vec())
            .file_name("memo.ogg")
            .mime_str("audio/ogg")
            .unwrap();
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("title", "Customer call");
        let mut req = app.client.post(app.url(routes::VOICE_NOTES)).multipart(form);
        if let Some(secret) = secret {
            req = req.header("x-voice-secret", secret);
        }
        crate::common::TestResponse::from_response(req.send().await.unwrap()).await
    }

    #[tokio::test]
    async fn shared_secret_stores_a_voice_note() {
        let app = TestApp::spawn().await;

        let res = push(&app, Some(VOICE_SECRET)).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["item"]["kind"], "voice_note");
        assert_eq!(res.body["item"]["caption"], "Customer call");
        assert!(app.object_exists(res.body["item"]["url"].as_str().unwrap()).await);
    }

    #[tokio::test]
    async fn wrong_or_missing_secret_is_rejected() {
        let app = TestApp::spawn().await;

        assert_eq!(push(&app, Some("nope")).await.status, 401);
        assert_eq!(push(&app, None).await.status, 401);
        assert_eq!(app.count_rows("asset").await, 0);
    }
}

mod sweep {
    use super::*;

    #[tokio::test]
    async fn removes_unreferenced_objects_only() {
        let app = TestApp::spawn().await;
        let bundle = app.create_bundle("Dragon", None).await;
        let kept = app.upload_bundle_image(bundle, "kept.png").await;
        app.store
            .upload("bundles", "gallery/orphan.png", b"x", "image/png")
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let res = app.post(routes::SWEEP, &json!({})).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["removed"], 1);
        assert!(!app.object_file("bundles", "gallery/orphan.png").exists());
        assert!(app.object_exists(kept["url"].as_str().unwrap()).await);
    }
}
