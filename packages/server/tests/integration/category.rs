use sea_orm::ConnectionTrait;
use serde_json::json;

use crate::common::{TestApp, routes};

mod creation {
    use super::*;

    #[tokio::test]
    async fn slug_is_derived_from_label() {
        let app = TestApp::spawn().await;

        let res = app
            .post(&routes::categories("bundle"), &json!({"label": "Desk Toys"}))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["slug"], "desk-toys");
        assert_eq!(res.body["kind"], "bundle");
        assert_eq!(res.body["is_active"], true);
    }

    #[tokio::test]
    async fn colliding_slugs_get_a_counter() {
        let app = TestApp::spawn().await;

        let first = app.create_category("bundle", "Props").await;
        let second = app.create_category("bundle", "Props").await;
        let third = app.create_category("bundle", "props!").await;

        assert_eq!(first, "props");
        assert_eq!(second, "props-2");
        assert_eq!(third, "props-3");
    }

    #[tokio::test]
    async fn slugs_are_scoped_per_family() {
        let app = TestApp::spawn().await;

        let bundle = app.create_category("bundle", "Props").await;
        let design = app.create_category("design", "Props").await;

        assert_eq!(bundle, "props");
        assert_eq!(design, "props");
    }

    #[tokio::test]
    async fn label_without_letters_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(&routes::categories("bundle"), &json!({"label": "!!!"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(&routes::categories("bundle"), &json!({"label": "Props"}))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn session_cookie_is_accepted() {
        let app = TestApp::spawn().await;

        let res = app.get_with_cookie(&routes::categories("bundle")).await;

        assert_eq!(res.status, 200, "{}", res.text);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn lists_fallback_with_item_counts() {
        let app = TestApp::spawn().await;
        let props = app.create_category("bundle", "Props").await;
        app.create_bundle("A", Some(&props)).await;
        app.create_bundle("B", Some(&props)).await;
        app.create_bundle("C", None).await;

        let res = app.get(&routes::categories("bundle")).await;

        assert_eq!(res.status, 200);
        let categories = res.body["categories"].as_array().unwrap();
        let count_of = |slug: &str| {
            categories
                .iter()
                .find(|c| c["category"]["slug"] == slug)
                .map(|c| c["item_count"].as_u64().unwrap())
        };
        assert_eq!(count_of("uncategorized"), Some(1));
        assert_eq!(count_of(&props), Some(2));
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn label_and_icon_can_change() {
        let app = TestApp::spawn().await;
        let slug = app.create_category("design", "Minis").await;

        let res = app
            .patch(
                &routes::category("design", &slug),
                &json!({"label": "Miniatures", "icon": "dice"}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["label"], "Miniatures");
        assert_eq!(res.body["icon"], "dice");
        assert_eq!(res.body["slug"], slug);
    }

    #[tokio::test]
    async fn fallback_cannot_be_deactivated() {
        let app = TestApp::spawn().await;

        let res = app
            .patch(
                &routes::category("bundle", "uncategorized"),
                &json!({"is_active": false}),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .patch(&routes::category("bundle", "nope"), &json!({"label": "x"}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn items_move_to_fallback_by_default() {
        let app = TestApp::spawn().await;
        let props = app.create_category("bundle", "Props").await;
        let a = app.create_bundle("A", Some(&props)).await;
        let b = app.create_bundle("B", Some(&props)).await;

        let res = app
            .delete_with_body(&routes::categories("bundle"), &json!({"id": props}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["ok"], true);
        assert_eq!(res.body["reassigned"], 2);
        for id in [a, b] {
            let item = app.get(&routes::bundle(id)).await;
            assert_eq!(item.body["item"]["category_id"], "uncategorized");
        }
    }

    #[tokio::test]
    async fn items_move_to_chosen_target() {
        let app = TestApp::spawn().await;
        let props = app.create_category("bundle", "Props").await;
        let minis = app.create_category("bundle", "Minis").await;
        let a = app.create_bundle("A", Some(&props)).await;

        let res = app
            .delete_with_body(
                &routes::categories("bundle"),
                &json!({"slug": props, "reassignTo": minis}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["reassigned"], 1);
        let item = app.get(&routes::bundle(a)).await;
        assert_eq!(item.body["item"]["category_id"], minis);
    }

    #[tokio::test]
    async fn other_family_is_untouched() {
        let app = TestApp::spawn().await;
        let bundle_props = app.create_category("bundle", "Props").await;
        app.create_category("design", "Props").await;
        let design = app
            .post(routes::DESIGNS, &json!({"title": "D", "category_id": "props"}))
            .await;
        assert_eq!(design.status, 201, "{}", design.text);

        let res = app
            .delete_with_body(&routes::categories("bundle"), &json!({"id": bundle_props}))
            .await;
        assert_eq!(res.body["reassigned"], 0);

        let detail = app.get(&format!("{}/{}", routes::DESIGNS, design.id())).await;
        assert_eq!(detail.body["item"]["category_id"], "props");
    }

    #[tokio::test]
    async fn fallback_cannot_be_deleted() {
        let app = TestApp::spawn().await;

        let res = app
            .delete_with_body(&routes::categories("bundle"), &json!({"id": "uncategorized"}))
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn unknown_target_rolls_back() {
        let app = TestApp::spawn().await;
        let props = app.create_category("bundle", "Props").await;
        let a = app.create_bundle("A", Some(&props)).await;

        let res = app
            .delete_with_body(
                &routes::categories("bundle"),
                &json!({"id": props, "reassign_to": "missing"}),
            )
            .await;

        assert_eq!(res.status, 400);
        let item = app.get(&routes::bundle(a)).await;
        assert_eq!(item.body["item"]["category_id"], props);
        let list = app.get(&routes::categories("bundle")).await;
        assert!(
            list.body["categories"]
                .as_array()
                .unwrap()
                .iter()
                .any(|c| c["category"]["slug"] == props)
        );
    }

    #[tokio::test]
    async fn inactive_target_is_rejected() {
        let app = TestApp::spawn().await;
        let props = app.create_category("bundle", "Props").await;
        let retired = app.create_category("bundle", "Retired").await;
        let a = app.create_bundle("A", Some(&props)).await;
        let hidden = app
            .patch(
                &routes::category("bundle", &retired),
                &json!({"is_active": false}),
            )
            .await;
        assert_eq!(hidden.status, 200, "{}", hidden.text);

        let res = app
            .delete_with_body(
                &routes::categories("bundle"),
                &json!({"id": props, "reassignTo": retired}),
            )
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        let item = app.get(&routes::bundle(a)).await;
        assert_eq!(item.body["item"]["category_id"], props);
    }

    #[tokio::test]
    async fn deleted_fallback_is_recreated_on_reassign() {
        let app = TestApp::spawn().await;
        let props = app.create_category("bundle", "Props").await;
        app.create_bundle("A", Some(&props)).await;
        app.db
            .execute_unprepared(
                "DELETE FROM category WHERE kind = 'bundle' AND slug = 'uncategorized'",
            )
            .await
            .unwrap();

        let res = app
            .delete_with_body(&routes::categories("bundle"), &json!({"id": props}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let list = app.get(&routes::categories("bundle")).await;
        let slugs: Vec<&str> = list.body["categories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["category"]["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["uncategorized"]);
    }
}
