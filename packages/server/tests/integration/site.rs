use serde_json::json;

use crate::common::{FilePart, TestApp, routes};

async fn upload_hero(app: &TestApp, slot: &str, is_default: bool) -> i32 {
    let flag = is_default.to_string();
    let res = app
        .upload(
            routes::HERO_MEDIA,
            FilePart::new("clip.mp4", "video/mp4", b"fake video"),
            &[("slot", slot), ("label", "Clip"), ("is_default", &flag)],
        )
        .await;
    assert_eq!(res.status, 201, "upload_hero failed: {}", res.text);
    res.body["item"]["id"].as_i64().unwrap() as i32
}

mod hero {
    use super::*;

    #[tokio::test]
    async fn upload_detects_media_kind() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(routes::HERO_MEDIA, FilePart::png("side.png"), &[("slot", "side")])
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["item"]["kind"], "image");
        assert_eq!(res.body["item"]["slot"], "side");
        assert_eq!(res.body["item"]["label"], "side.png");
    }

    #[tokio::test]
    async fn upload_requires_slot() {
        let app = TestApp::spawn().await;

        let res = app.upload(routes::HERO_MEDIA, FilePart::png("x.png"), &[]).await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn new_default_clears_previous_default() {
        let app = TestApp::spawn().await;
        let first = upload_hero(&app, "main", true).await;
        let second = upload_hero(&app, "main", true).await;

        let res = app.get(routes::HERO_MEDIA).await;

        let items = res.body["items"].as_array().unwrap();
        let default_of = |id: i32| {
            items
                .iter()
                .find(|i| i["id"] == id)
                .map(|i| i["is_default"].as_bool().unwrap())
        };
        assert_eq!(default_of(first), Some(false));
        assert_eq!(default_of(second), Some(true));
    }

    #[tokio::test]
    async fn selecting_one_slot_keeps_the_other() {
        let app = TestApp::spawn().await;
        let main = upload_hero(&app, "main", false).await;
        let side = upload_hero(&app, "side", false).await;

        let first = app
            .post(routes::HERO_SELECT, &json!({"slot": "main", "item_id": main}))
            .await;
        assert_eq!(first.status, 200, "{}", first.text);
        let second = app
            .post(routes::HERO_SELECT, &json!({"slot": "side", "itemId": side}))
            .await;

        assert_eq!(second.status, 200, "{}", second.text);
        assert_eq!(second.body["config"]["selected_main_id"], main);
        assert_eq!(second.body["config"]["selected_side_id"], side);
        assert_eq!(second.body["config"]["updated_by"], "admin-user");
        assert_eq!(app.count_rows("hero_media_config").await, 1);
    }

    #[tokio::test]
    async fn selecting_item_of_wrong_slot_is_rejected() {
        let app = TestApp::spawn().await;
        let side = upload_hero(&app, "side", false).await;

        let res = app
            .post(routes::HERO_SELECT, &json!({"slot": "main", "item_id": side}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(app.count_rows("hero_media_config").await, 0);
    }

    #[tokio::test]
    async fn public_hero_resolves_selection_then_default_then_fallback() {
        let app = TestApp::spawn().await;

        let empty = app.get_without_token(routes::PUBLIC_HERO).await;
        assert_eq!(empty.status, 200);
        assert_eq!(empty.body["main"]["id"], serde_json::Value::Null);
        assert_eq!(empty.body["main"]["kind"], "video");

        let plain = upload_hero(&app, "main", false).await;
        let default = upload_hero(&app, "main", true).await;
        let res = app.get_without_token(routes::PUBLIC_HERO).await;
        assert_eq!(res.body["main"]["id"], default);

        app.post(routes::HERO_SELECT, &json!({"slot": "main", "item_id": plain}))
            .await;
        let res = app.get_without_token(routes::PUBLIC_HERO).await;
        assert_eq!(res.body["main"]["id"], plain);
        assert_eq!(res.body["side"]["id"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn deleting_selected_media_falls_back() {
        let app = TestApp::spawn().await;
        let main = upload_hero(&app, "main", false).await;
        app.post(routes::HERO_SELECT, &json!({"slot": "main", "item_id": main}))
            .await;

        let res = app.delete(&routes::hero_media(main)).await;
        assert_eq!(res.status, 200, "{}", res.text);

        let hero = app.get_without_token(routes::PUBLIC_HERO).await;
        assert_eq!(hero.body["main"]["id"], serde_json::Value::Null);
        assert_eq!(app.delete(&routes::hero_media(main)).await.status, 404);
    }
}

mod theme {
    use super::*;

    #[tokio::test]
    async fn defaults_before_first_save() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::THEME).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["kind"], "gradient");
        assert_eq!(res.body["updated_at"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn save_replaces_previous_theme() {
        let app = TestApp::spawn().await;

        let first = app
            .post(routes::THEME, &json!({"kind": "solid", "solid_color": "#112233"}))
            .await;
        assert_eq!(first.status, 200, "{}", first.text);
        let second = app
            .post(
                routes::THEME,
                &json!({"kind": "custom-gradient", "fromColor": "#000", "toColor": "#fff"}),
            )
            .await;
        assert_eq!(second.status, 200, "{}", second.text);

        let res = app.get_without_token(routes::THEME).await;
        assert_eq!(res.body["kind"], "custom-gradient");
        assert_eq!(res.body["from"], "#000");
        assert_eq!(res.body["solid_color"], serde_json::Value::Null);
        assert_eq!(app.count_rows("hero_theme").await, 1);
    }

    #[tokio::test]
    async fn invalid_theme_keeps_current_row() {
        let app = TestApp::spawn().await;
        app.post(routes::THEME, &json!({"kind": "solid", "solid_color": "#112233"}))
            .await;

        let res = app.post(routes::THEME, &json!({"kind": "solid"})).await;

        assert_eq!(res.status, 400);
        let current = app.get_without_token(routes::THEME).await;
        assert_eq!(current.body["solid_color"], "#112233");
    }
}

mod tagline {
    use super::*;

    #[tokio::test]
    async fn updates_single_row_in_place() {
        let app = TestApp::spawn().await;

        let default = app.get_without_token(routes::PUBLIC_TAGLINE).await;
        assert_eq!(default.body["updated_at"], serde_json::Value::Null);

        app.post(routes::TAGLINE, &json!({"tagline": "First"})).await;
        let res = app.post(routes::TAGLINE, &json!({"tagline": "  Second  "})).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let current = app.get_without_token(routes::PUBLIC_TAGLINE).await;
        assert_eq!(current.body["tagline"], "Second");
        assert_eq!(app.count_rows("site_tagline").await, 1);
    }

    #[tokio::test]
    async fn blank_tagline_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::TAGLINE, &json!({"tagline": "   "})).await;

        assert_eq!(res.status, 400);
    }
}

mod settings {
    use super::*;

    #[tokio::test]
    async fn upsert_and_read_back() {
        let app = TestApp::spawn().await;
        let value = json!({"instagram": "@prints", "email": "hi@example.com"});

        let first = app.put(&routes::setting("social"), &value).await;
        assert_eq!(first.status, 200, "{}", first.text);
        let second = app.put(&routes::setting("social"), &json!({"instagram": "@new"})).await;
        assert_eq!(second.status, 200, "{}", second.text);

        let res = app.get_without_token(&routes::public_setting("social")).await;
        assert_eq!(res.body["value"], json!({"instagram": "@new"}));
        assert_eq!(app.count_rows("site_setting").await, 1);
    }

    #[tokio::test]
    async fn unknown_key_reads_as_null() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::public_setting("missing")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["key"], "missing");
        assert_eq!(res.body["value"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn malformed_key_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.put(&routes::setting("Bad.Key"), &json!(1)).await;

        assert_eq!(res.status, 400);
    }
}
