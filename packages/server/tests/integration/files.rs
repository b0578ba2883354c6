use crate::common::{DishForm, TestApp};

/// Upload a dish and return the public URL of its image.
async fn uploaded_image_url(app: &TestApp) -> String {
    let token = app.token_for("owner-1");
    let res = app
        .submit_dish("Soup", DishForm::new("Egusi", "1500"), &token)
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    res.body["item"]["image"].as_str().unwrap().to_string()
}

mod file_download {
    use super::*;

    #[tokio::test]
    async fn image_url_serves_uploaded_bytes() {
        let app = TestApp::spawn().await;
        let url = uploaded_image_url(&app).await;

        let res = app.client.get(&url).send().await.unwrap();

        assert_eq!(res.status(), 200);
        assert_eq!(res.headers()["content-type"], "image/png");
        assert!(res.headers().contains_key("etag"));
        assert_eq!(res.bytes().await.unwrap().as_ref(), b"\x89PNG fake image");
    }

    #[tokio::test]
    async fn matching_etag_returns_not_modified() {
        let app = TestApp::spawn().await;
        let url = uploaded_image_url(&app).await;

        let first = app.client.get(&url).send().await.unwrap();
        let etag = first.headers()["etag"].to_str().unwrap().to_string();

        let res = app
            .client
            .get(&url)
            .header("If-None-Match", &etag)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 304);

        let res = app
            .client
            .get(&url)
            .header("If-None-Match", "\"stale\"")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
    }

    #[tokio::test]
    async fn unknown_key_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token("/files/menu/does-not-exist").await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn hidden_segment_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token("/files/menu/.secret").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}
