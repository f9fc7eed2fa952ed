use serde_json::json;

use crate::common::{TestApp, routes};

async fn create_faq(app: &TestApp, questions: &[&str], answer: &str, sort_order: i32) -> i32 {
    let res = app
        .post(
            routes::FAQS,
            &json!({"questions": questions, "answer": answer, "sort_order": sort_order}),
        )
        .await;
    assert_eq!(res.status, 201, "create_faq failed: {}", res.text);
    res.id()
}

mod management {
    use super::*;

    #[tokio::test]
    async fn crud_round() {
        let app = TestApp::spawn().await;
        let id = create_faq(&app, &["What are your hours?"], "9-5", 0).await;

        let updated = app
            .patch(&routes::faq(id), &json!({"answer": "10-6"}))
            .await;
        assert_eq!(updated.status, 200, "{}", updated.text);
        assert_eq!(updated.body["answer"], "10-6");
        assert_eq!(updated.body["questions"], json!(["What are your hours?"]));

        assert_eq!(app.delete(&routes::faq(id)).await.status, 200);
        assert_eq!(app.delete(&routes::faq(id)).await.status, 404);
    }

    #[tokio::test]
    async fn empty_question_list_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::FAQS, &json!({"questions": ["  "], "answer": "x"}))
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn public_list_follows_sort_order() {
        let app = TestApp::spawn().await;
        create_faq(&app, &["Second?"], "b", 2).await;
        create_faq(&app, &["First?"], "a", 1).await;

        let res = app.get_without_token(routes::PUBLIC_FAQS).await;

        assert_eq!(res.body["faqs"][0]["answer"], "a");
        assert_eq!(res.body["faqs"][1]["answer"], "b");
    }
}

mod matching {
    use super::*;

    #[tokio::test]
    async fn substring_match_after_normalization() {
        let app = TestApp::spawn().await;
        let hours = create_faq(&app, &["What are your hours"], "9-5", 0).await;
        create_faq(&app, &["Do you ship abroad"], "Yes", 1).await;

        let res = app
            .post_without_token(routes::PUBLIC_FAQ_MATCH, &json!({"question": "WHAT are your hours??"}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["answer"], "9-5");
        assert_eq!(res.body["matched_id"], hours);
    }

    #[tokio::test]
    async fn earlier_faq_wins_on_equal_overlap() {
        let app = TestApp::spawn().await;
        let first = create_faq(&app, &["resin printing"], "resin", 0).await;
        create_faq(&app, &["resin colors"], "colors", 1).await;

        let res = app
            .post_without_token(routes::PUBLIC_FAQ_MATCH, &json!({"q": "resin finish quality"}))
            .await;

        assert_eq!(res.body["matched_id"], first);
    }

    #[tokio::test]
    async fn no_match_returns_fallback_answer() {
        let app = TestApp::spawn().await;
        create_faq(&app, &["What are your hours"], "9-5", 0).await;

        let res = app
            .post_without_token(routes::PUBLIC_FAQ_MATCH, &json!({"message": "zebra giraffe"}))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["matched_id"], serde_json::Value::Null);
        assert_eq!(res.body["answer"], common::faq::FALLBACK_ANSWER);
    }
}
