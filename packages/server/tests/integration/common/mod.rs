use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use common::StorageAppConfig;
use common::document::DocumentStore;
use common::document::filesystem::FilesystemDocumentStore;
use common::storage::BlobStore;
use common::storage::filesystem::FilesystemBlobStore;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tempfile::TempDir;

use server::config::{AppConfig, AuthConfig, CorsConfig, FormConfig, ServerConfig};
use server::state::AppState;

pub const TEST_SECRET: &str = "test-secret-for-integration-tests";

/// Largest image the test server accepts.
pub const MAX_IMAGE_SIZE: u64 = 64 * 1024;

pub mod routes {
    pub const SUMMARY: &str = "/api/v1/menu/summary";

    pub fn menu(category: &str) -> String {
        format!("/api/v1/menu/{}", category.replace(' ', "%20"))
    }
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub documents: Arc<dyn DocumentStore>,
    data_dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}

/// One add-dish form submission.
pub struct DishForm {
    pub image: Option<(&'static str, &'static str, Vec<u8>)>,
    pub name: &'static str,
    pub price: &'static str,
    pub description: &'static str,
}

impl DishForm {
    pub fn new(name: &'static str, price: &'static str) -> Self {
        Self {
            image: Some(("dish.png", "image/png", b"\x89PNG fake image".to_vec())),
            name,
            price,
            description: "House favourite",
        }
    }

    pub fn without_image(mut self) -> Self {
        self.image = None;
        self
    }

    pub fn with_image(
        mut self,
        file_name: &'static str,
        mime: &'static str,
        bytes: Vec<u8>,
    ) -> Self {
        self.image = Some((file_name, mime, bytes));
        self
    }

    fn into_multipart(self) -> Form {
        let mut form = Form::new()
            .text("name", self.name)
            .text("price", self.price)
            .text("description", self.description);
        if let Some((file_name, mime, bytes)) = self.image {
            let part = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(mime)
                .expect("Failed to set MIME type");
            form = form.part("image", part);
        }
        form
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_documents(None).await
    }

    /// Start a server whose document store is `documents` instead of the filesystem one.
    pub async fn spawn_with_documents(documents: Option<Arc<dyn DocumentStore>>) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            storage: StorageAppConfig {
                data_dir: data_dir.path().to_path_buf(),
                public_base_url: format!("http://{addr}/files"),
                max_blob_size: MAX_IMAGE_SIZE,
            },
            auth: AuthConfig {
                jwt_secret: TEST_SECRET.to_string(),
            },
            form: FormConfig::default(),
        };

        let blob_store = FilesystemBlobStore::new(
            app_config.storage.blob_dir(),
            app_config.storage.public_base_url.clone(),
            app_config.storage.max_blob_size,
        )
        .await
        .expect("Failed to open blob store");

        let documents = match documents {
            Some(documents) => documents,
            None => Arc::new(
                FilesystemDocumentStore::new(app_config.storage.document_dir())
                    .await
                    .expect("Failed to open document store"),
            ),
        };

        let state = AppState {
            config: Arc::new(app_config),
            blob_store: Arc::new(blob_store) as Arc<dyn BlobStore>,
            documents: documents.clone(),
        };

        let app = server::build_router(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            documents,
            data_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Directory holding uploaded image bytes under the `menu/` prefix.
    pub fn image_objects_dir(&self) -> PathBuf {
        self.data_dir.path().join("blobs/objects/menu")
    }

    /// Number of stored image objects.
    pub fn stored_image_count(&self) -> usize {
        match std::fs::read_dir(self.image_objects_dir()) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }

    pub fn token_for(&self, owner: &str) -> String {
        server::utils::jwt::sign(owner, TEST_SECRET, chrono::Duration::hours(1))
            .expect("Failed to sign token")
    }

    pub async fn submit_dish(&self, category: &str, form: DishForm, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(&routes::menu(category)))
            .header("Authorization", format!("Bearer {token}"))
            .multipart(form.into_multipart())
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    pub async fn submit_dish_without_token(&self, category: &str, form: DishForm) -> TestResponse {
        let res = self
            .client
            .post(self.url(&routes::menu(category)))
            .multipart(form.into_multipart())
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }
}
