use std::sync::Arc;

use async_trait::async_trait;
use common::document::memory::MemoryDocumentStore;
use common::document::{Document, DocumentError, DocumentPath, DocumentStore};
use serde_json::Value;

use crate::common::{DishForm, TestApp, routes};

mod create_dish {
    use super::*;

    #[tokio::test]
    async fn saves_dish_and_returns_redirect() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        let res = app
            .submit_dish("Main Dish", DishForm::new("Jollof Rice", "2,500"), &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let item = &res.body["item"];
        assert_eq!(item["name"], "Jollof Rice");
        assert_eq!(item["price"], "2500");
        assert_eq!(item["price_display"], "2,500");
        assert_eq!(item["category"], "Main Dish");
        assert_eq!(item["description"], "House favourite");
        assert!(
            item["image"]
                .as_str()
                .unwrap()
                .starts_with(&format!("http://{}/files/menu/", app.addr))
        );
        assert!(res.body["image_key"].as_str().unwrap().starts_with("menu/"));

        assert_eq!(res.body["redirect"]["route"], "/Adminhome/MainDish");
        assert_eq!(res.body["redirect"]["after_ms"], 3000);
        assert_eq!(res.body["notifications"][0]["level"], "success");
        assert_eq!(res.body["notifications"][0]["message"], "Menu uploaded!");
        assert_eq!(app.stored_image_count(), 1);
    }

    #[tokio::test]
    async fn later_dishes_append_in_order() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        for name in ["Egusi", "Pepper Soup"] {
            let res = app
                .submit_dish("Soup", DishForm::new(name, "1500"), &token)
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let res = app.get_with_token(&routes::menu("Soup"), &token).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"], 2);
        assert_eq!(res.body["items"][0]["name"], "Egusi");
        assert_eq!(res.body["items"][1]["name"], "Pepper Soup");
    }

    #[tokio::test]
    async fn stores_entry_with_document_field_names() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        let res = app
            .submit_dish("Dessert", DishForm::new("Puff Puff", "700"), &token)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let path = DocumentPath::parse("menu/owner-1/Dessert/menus").unwrap();
        let doc = app.documents.get(&path).await.unwrap().unwrap();
        let stored = &doc["menu"][0];
        assert_eq!(stored["Name"], "Puff Puff");
        assert_eq!(stored["Price"], "700");
        assert_eq!(stored["Category"], "Dessert");
        assert_eq!(stored["Desc"], "House favourite");
        assert_eq!(stored["Img"], res.body["item"]["image"]);

        let owner = DocumentPath::parse("menu/owner-1").unwrap();
        let owner_doc = app.documents.get(&owner).await.unwrap().unwrap();
        assert!(owner_doc["updatedAt"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn unknown_category_is_saved_without_redirect() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        let res = app
            .submit_dish("Breakfast", DishForm::new("Akara", "300"), &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["redirect"], Value::Null);

        let path = DocumentPath::parse("menu/owner-1/Breakfast/menus").unwrap();
        assert!(app.documents.exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn long_name_is_cut_to_limit() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");
        let long: &'static str = Box::leak("é".repeat(130).into_boxed_str());

        let res = app
            .submit_dish("Side", DishForm::new(long, "100"), &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let name = res.body["item"]["name"].as_str().unwrap();
        assert_eq!(name.chars().count(), menu::DISH_NAME_MAX_CHARS);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn simultaneous_first_dishes_are_all_kept() {
        const NAMES: [&str; 8] = [
            "Egusi",
            "Ogbono",
            "Okra",
            "Banga",
            "Afang",
            "Edikang Ikong",
            "Oha",
            "Pepper Soup",
        ];
        let app = Arc::new(TestApp::spawn().await);
        let token = app.token_for("owner-1");

        let mut requests = tokio::task::JoinSet::new();
        for name in NAMES {
            let app = app.clone();
            let token = token.clone();
            requests.spawn(async move {
                app.submit_dish("Soup", DishForm::new(name, "1500"), &token)
                    .await
            });
        }
        while let Some(res) = requests.join_next().await {
            let res = res.unwrap();
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let res = app.get_with_token(&routes::menu("Soup"), &token).await;
        assert_eq!(res.body["total"], NAMES.len());
        let mut stored: Vec<_> = res.body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["name"].as_str().unwrap().to_string())
            .collect();
        stored.sort();
        let mut expected: Vec<_> = NAMES.iter().map(|n| n.to_string()).collect();
        expected.sort();
        assert_eq!(stored, expected);
    }

    #[tokio::test]
    async fn jpeg_image_is_accepted() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        let form = DishForm::new("Suya", "2000").with_image(
            "suya.jpg",
            "image/jpeg",
            b"\xFF\xD8\xFF fake jpeg".to_vec(),
        );
        let res = app.submit_dish("Special", form, &token).await;

        assert_eq!(res.status, 201, "{}", res.text);
    }
}

mod create_dish_validation {
    use super::*;

    #[tokio::test]
    async fn missing_image_is_rejected_before_upload() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        let res = app
            .submit_dish("Salad", DishForm::new("Coleslaw", "500").without_image(), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "Image is required");
        assert_eq!(app.stored_image_count(), 0);
    }

    #[tokio::test]
    async fn empty_fields_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        let res = app
            .submit_dish("Salad", DishForm::new("", "500"), &token)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Dish name is required");

        let res = app
            .submit_dish("Salad", DishForm::new("Coleslaw", ""), &token)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Price is required");

        let mut form = DishForm::new("Coleslaw", "500");
        form.description = "";
        let res = app.submit_dish("Salad", form, &token).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Description is required");

        let summary = app.get_with_token(routes::SUMMARY, &token).await;
        assert_eq!(summary.body["total_dishes"], 0);
        assert_eq!(app.stored_image_count(), 0);
    }

    #[tokio::test]
    async fn unstorable_category_is_rejected_before_upload() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        let res = app
            .submit_dish("%20", DishForm::new("Coleslaw", "500"), &token)
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["message"], "Category is required");

        let res = app
            .submit_dish("Main%2FDish", DishForm::new("Coleslaw", "500"), &token)
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(
            res.body["message"],
            "Category 'Main/Dish' is not a valid category name"
        );

        assert_eq!(app.stored_image_count(), 0);
    }

    #[tokio::test]
    async fn non_numeric_price_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        let res = app
            .submit_dish("Side", DishForm::new("Plantain", "12a"), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Price must contain digits only");
    }

    #[tokio::test]
    async fn unsupported_image_type_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        let form =
            DishForm::new("Chapman", "900").with_image("drink.gif", "image/gif", b"GIF89a".to_vec());
        let res = app.submit_dish("Beverage", form, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn oversized_image_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        let big = vec![0u8; crate::common::MAX_IMAGE_SIZE as usize + 1];
        let form = DishForm::new("Feast", "9000").with_image("feast.png", "image/png", big);
        let res = app.submit_dish("Special", form, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(app.stored_image_count(), 0);
    }
}

mod create_dish_auth {
    use super::*;

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .submit_dish_without_token("Soup", DishForm::new("Egusi", "1500"))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
        assert_eq!(app.stored_image_count(), 0);
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let app = TestApp::spawn().await;
        let forged =
            server::utils::jwt::sign("owner-1", "not-the-secret", chrono::Duration::hours(1))
                .unwrap();

        let res = app
            .submit_dish("Soup", DishForm::new("Egusi", "1500"), &forged)
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}

/// Accepts reads but fails every write.
struct ReadOnlyDocuments {
    inner: MemoryDocumentStore,
}

#[async_trait]
impl DocumentStore for ReadOnlyDocuments {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, DocumentError> {
        self.inner.get(path).await
    }

    async fn set(&self, _path: &DocumentPath, _data: Document) -> Result<(), DocumentError> {
        Err(DocumentError::Backend("permission denied".into()))
    }

    async fn array_union(
        &self,
        _path: &DocumentPath,
        _field: &str,
        _values: Vec<Value>,
    ) -> Result<(), DocumentError> {
        Err(DocumentError::Backend("permission denied".into()))
    }
}

mod create_dish_failures {
    use super::*;

    #[tokio::test]
    async fn failed_write_removes_uploaded_image() {
        let documents: Arc<dyn DocumentStore> = Arc::new(ReadOnlyDocuments {
            inner: MemoryDocumentStore::new(),
        });
        let app = TestApp::spawn_with_documents(Some(documents)).await;
        let token = app.token_for("owner-1");

        let res = app
            .submit_dish("Soup", DishForm::new("Egusi", "1500"), &token)
            .await;

        assert_eq!(res.status, 502, "{}", res.text);
        assert_eq!(res.body["code"], "SUBMISSION_FAILED");
        assert_eq!(
            res.body["message"],
            "Failed to save menu: permission denied"
        );
        assert_eq!(app.stored_image_count(), 0);
    }
}

mod list_and_summary {
    use super::*;

    #[tokio::test]
    async fn owners_only_see_their_own_dishes() {
        let app = TestApp::spawn().await;
        let alice = app.token_for("alice");
        let bob = app.token_for("bob");

        let res = app
            .submit_dish("Appetizer", DishForm::new("Spring Rolls", "800"), &alice)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let mine = app.get_with_token(&routes::menu("Appetizer"), &alice).await;
        assert_eq!(mine.body["total"], 1);

        let theirs = app.get_with_token(&routes::menu("Appetizer"), &bob).await;
        assert_eq!(theirs.status, 200);
        assert_eq!(theirs.body["total"], 0);
        assert_eq!(theirs.body["items"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn listing_unknown_category_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        let res = app.get_with_token(&routes::menu("Breakfast"), &token).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn listing_requires_token() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::menu("Soup")).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn summary_counts_every_category() {
        let app = TestApp::spawn().await;
        let token = app.token_for("owner-1");

        let empty = app.get_with_token(routes::SUMMARY, &token).await;
        assert_eq!(empty.status, 200);
        assert_eq!(empty.body["total_dishes"], 0);
        assert_eq!(empty.body["updated_at"], Value::Null);

        let dishes = [
            ("Main Dish", "Jollof"),
            ("Main Dish", "Fried Rice"),
            ("Dessert", "Chin Chin"),
        ];
        for (category, name) in dishes {
            let res = app
                .submit_dish(category, DishForm::new(name, "1000"), &token)
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let res = app.get_with_token(routes::SUMMARY, &token).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["total_dishes"], 3);

        let categories = res.body["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 8);
        assert_eq!(categories[0]["category"], "Main Dish");
        assert_eq!(categories[0]["count"], 2);
        assert_eq!(categories[7]["category"], "Dessert");
        assert_eq!(categories[7]["count"], 1);
        assert!(res.body["updated_at"].is_string());
    }
}
