use serde_json::json;

use crate::common::{FilePart, TestApp, routes};

mod crud {
    use super::*;

    #[tokio::test]
    async fn create_defaults_to_fallback_category() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::BUNDLES, &json!({"title": "Dragon", "priceFrom": 2500}))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["kind"], "bundle");
        assert_eq!(res.body["category_id"], "uncategorized");
        assert_eq!(res.body["price_from"], 2500);
        assert_eq!(res.body["is_active"], true);
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::BUNDLES, &json!({"title": "Dragon", "category": "ghost"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn category_of_other_family_is_rejected() {
        let app = TestApp::spawn().await;
        let design_only = app.create_category("design", "Terrain").await;

        let res = app
            .post(routes::BUNDLES, &json!({"title": "Dragon", "category_id": design_only}))
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn families_do_not_see_each_other() {
        let app = TestApp::spawn().await;
        let bundle = app.create_bundle("Dragon", None).await;

        let res = app.get(&format!("{}/{bundle}", routes::DESIGNS)).await;
        assert_eq!(res.status, 404);

        let list = app.get(routes::DESIGNS).await;
        assert_eq!(list.body["items"], json!([]));
    }

    #[tokio::test]
    async fn update_can_clear_price_and_move_category() {
        let app = TestApp::spawn().await;
        let props = app.create_category("bundle", "Props").await;
        let id = app.create_bundle("Dragon", None).await;

        let res = app
            .patch(
                &routes::bundle(id),
                &json!({"price_from": null, "category_id": props, "title": "Big dragon"}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["price_from"], serde_json::Value::Null);
        assert_eq!(res.body["category_id"], props);
        assert_eq!(res.body["title"], "Big dragon");
    }

    #[tokio::test]
    async fn list_filters_by_category() {
        let app = TestApp::spawn().await;
        let props = app.create_category("bundle", "Props").await;
        app.create_bundle("A", Some(&props)).await;
        app.create_bundle("B", None).await;

        let res = app.get(&format!("{}?category={props}", routes::BUNDLES)).await;

        let titles: Vec<&str> = res.body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["A"]);
    }

    #[tokio::test]
    async fn detail_splits_images_and_files() {
        let app = TestApp::spawn().await;
        let id = app.create_bundle("Dragon", None).await;
        app.upload_bundle_image(id, "a.png").await;
        let owner = id.to_string();
        let file = app
            .upload(
                routes::ASSET_UPLOAD,
                FilePart::new("dragon.stl", "model/stl", b"solid dragon"),
                &[("kind", "bundle_file"), ("owner_id", &owner)],
            )
            .await;
        assert_eq!(file.status, 200, "{}", file.text);

        let res = app.get(&routes::bundle(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["images"].as_array().unwrap().len(), 1);
        assert_eq!(res.body["files"].as_array().unwrap().len(), 1);
        assert_eq!(res.body["files"][0]["filename"], "dragon.stl");
    }
}

mod thumbnail {
    use super::*;

    #[tokio::test]
    async fn replacing_removes_previous_object() {
        let app = TestApp::spawn().await;
        let id = app.create_bundle("Dragon", None).await;

        let first = app
            .upload(&routes::bundle_thumbnail(id), FilePart::png("t1.png"), &[])
            .await;
        assert_eq!(first.status, 200, "{}", first.text);
        let first_url = first.body["thumb_url"].as_str().unwrap().to_string();
        assert!(first_url.contains("/object/public/thumbs/"));
        assert!(app.object_exists(&first_url).await);

        let second = app
            .upload(&routes::bundle_thumbnail(id), FilePart::png("t2.png"), &[])
            .await;
        assert_eq!(second.status, 200, "{}", second.text);
        let second_url = second.body["thumb_url"].as_str().unwrap();

        assert_ne!(first_url, second_url);
        assert!(app.object_exists(second_url).await);
        assert!(!app.object_exists(&first_url).await);
    }

    #[tokio::test]
    async fn unknown_item_stores_nothing() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(&routes::bundle_thumbnail(404), FilePart::png("t.png"), &[])
            .await;

        assert_eq!(res.status, 404);
        assert!(!app.storage_root.join("thumbs").exists());
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn removes_assets_thumbnail_and_objects() {
        let app = TestApp::spawn().await;
        let id = app.create_bundle("Dragon", None).await;
        let other = app.create_bundle("Other", None).await;
        let a = app.upload_bundle_image(id, "a.png").await;
        let b = app.upload_bundle_image(id, "b.png").await;
        let kept = app.upload_bundle_image(other, "c.png").await;
        let thumb = app
            .upload(&routes::bundle_thumbnail(id), FilePart::png("t.png"), &[])
            .await;
        let thumb_url = thumb.body["thumb_url"].as_str().unwrap().to_string();

        let res = app.delete(&routes::bundle(id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["removed_assets"], 2);
        assert_eq!(app.get(&routes::bundle(id)).await.status, 404);
        assert_eq!(app.count_rows("asset").await, 1);
        for url in [&a["url"], &b["url"]] {
            assert!(!app.object_exists(url.as_str().unwrap()).await);
        }
        assert!(!app.object_exists(&thumb_url).await);
        assert!(app.object_exists(kept["url"].as_str().unwrap()).await);
    }

    #[tokio::test]
    async fn design_delete_leaves_bundle_assets_alone() {
        let app = TestApp::spawn().await;
        let bundle = app.create_bundle("Dragon", None).await;
        let bundle_image = app.upload_bundle_image(bundle, "a.png").await;
        let design = app.post(routes::DESIGNS, &json!({"title": "Sketch"})).await;
        assert_eq!(design.status, 201, "{}", design.text);
        let owner = design.id().to_string();
        let design_image = app
            .upload(
                routes::ASSET_UPLOAD,
                FilePart::png("sketch.png"),
                &[("kind", "design_image"), ("owner_id", &owner)],
            )
            .await;
        assert_eq!(design_image.status, 200, "{}", design_image.text);

        let res = app.delete(&format!("{}/{}", routes::DESIGNS, design.id())).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["removed_assets"], 1);
        assert!(!app.object_exists(design_image.body["item"]["url"].as_str().unwrap()).await);
        assert!(app.object_exists(bundle_image["url"].as_str().unwrap()).await);
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::bundle(31337)).await;

        assert_eq!(res.status, 404);
    }
}
