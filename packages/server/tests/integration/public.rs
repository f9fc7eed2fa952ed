use serde_json::json;

use crate::common::{TestApp, routes};

mod catalog {
    use super::*;

    #[tokio::test]
    async fn only_active_items_are_listed() {
        let app = TestApp::spawn().await;
        app.create_bundle("Shown", None).await;
        let hidden = app.create_bundle("Hidden", None).await;
        app.patch(&routes::bundle(hidden), &json!({"is_active": false}))
            .await;

        let res = app.get_without_token(routes::PUBLIC_BUNDLES).await;

        assert_eq!(res.status, 200);
        let titles: Vec<&str> = res.body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Shown"]);
        assert!(res.body["items"][0].get("is_active").is_none());
    }

    #[tokio::test]
    async fn items_follow_sort_order() {
        let app = TestApp::spawn().await;
        app.post(routes::BUNDLES, &json!({"title": "Second", "sort_order": 2}))
            .await;
        app.post(routes::BUNDLES, &json!({"title": "First", "sort_order": 1}))
            .await;

        let res = app.get_without_token(routes::PUBLIC_BUNDLES).await;

        assert_eq!(res.body["items"][0]["title"], "First");
        assert_eq!(res.body["items"][1]["title"], "Second");
    }

    #[tokio::test]
    async fn inactive_detail_is_not_found() {
        let app = TestApp::spawn().await;
        let id = app.create_bundle("Hidden", None).await;
        app.patch(&routes::bundle(id), &json!({"is_active": false}))
            .await;

        let res = app.get_without_token(&routes::public_bundle(id)).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn detail_lists_images_only() {
        let app = TestApp::spawn().await;
        let id = app.create_bundle("Dragon", None).await;
        app.upload_bundle_image(id, "a.png").await;
        let owner = id.to_string();
        app.upload(
            routes::ASSET_UPLOAD,
            crate::common::FilePart::new("a.stl", "model/stl", b"solid"),
            &[("kind", "bundle_file"), ("owner_id", &owner)],
        )
        .await;

        let res = app.get_without_token(&routes::public_bundle(id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["item"]["title"], "Dragon");
        assert_eq!(res.body["images"].as_array().unwrap().len(), 1);
        assert!(res.body.get("files").is_none());
    }

    #[tokio::test]
    async fn categories_hide_inactive() {
        let app = TestApp::spawn().await;
        let props = app.create_category("bundle", "Props").await;
        app.patch(&routes::category("bundle", &props), &json!({"is_active": false}))
            .await;

        let res = app.get_without_token(&routes::public_categories("bundle")).await;

        let slugs: Vec<&str> = res.body["categories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["uncategorized"]);
    }
}

mod reviews {
    use super::*;

    #[tokio::test]
    async fn only_published_reviews_are_public() {
        let app = TestApp::spawn().await;
        let shown = app
            .post(
                routes::REVIEWS,
                &json!({"name": "Ana", "quote": "Great prints", "stars": 5, "is_published": true}),
            )
            .await;
        assert_eq!(shown.status, 201, "{}", shown.text);
        let draft = app
            .post(
                routes::REVIEWS,
                &json!({"name": "Bo", "quote": "Pending", "stars": 4, "isPublished": false}),
            )
            .await;
        assert_eq!(draft.status, 201, "{}", draft.text);

        let res = app.get_without_token(routes::PUBLIC_REVIEWS).await;

        let reviews = res.body["reviews"].as_array().unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0]["name"], "Ana");

        let all = app.get(routes::REVIEWS).await;
        assert_eq!(all.body["reviews"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn stars_out_of_range_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::REVIEWS, &json!({"name": "Ana", "quote": "Hmm", "stars": 6}))
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn publish_then_delete() {
        let app = TestApp::spawn().await;
        let created = app
            .post(routes::REVIEWS, &json!({"name": "Cy", "quote": "Nice", "stars": 3}))
            .await;
        let id = created.id();

        let published = app.patch(&routes::review(id), &json!({"is_published": true})).await;
        assert_eq!(published.status, 200, "{}", published.text);
        assert_eq!(published.body["is_published"], true);

        assert_eq!(app.delete(&routes::review(id)).await.status, 200);
        assert_eq!(app.delete(&routes::review(id)).await.status, 404);
    }
}

mod storage {
    use super::*;

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token("/storage/v1/object/public/media/nope/missing.png")
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token("/storage/v1/object/public/media/a/%2E%2E/%2E%2E/secret")
            .await;

        assert!(res.status == 400 || res.status == 404, "got {}", res.status);
    }
}
