//! The upload-then-persist sequence behind "Save".
//!
//! Steps run strictly in order and the first failure ends the attempt:
//!
//! 1. claim the in-flight slot (a second concurrent submit is refused),
//! 2. upload the image under `menu/<uuid>` with its real content type,
//! 3. resolve the image URL,
//! 4. stamp the owner document `menu/<owner>` with `updatedAt`,
//! 5. append the entry to `menu/<owner>/<category>/menus` in one store
//!    update that also creates the document when it does not exist yet.
//!
//! If anything after the upload fails, the uploaded object is deleted again
//! so no image is left behind without an entry.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use common::document::{Document, DocumentPath, DocumentStore};
use common::storage::{BlobKey, BlobStore};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::draft::MenuSubmission;
use crate::entry::MenuEntry;
use crate::error::SubmitError;
use crate::navigation::{Navigator, Redirect, listing_route};
use crate::notify::{Notification, Notifier};
use crate::session::{OwnerId, SessionContext};

pub const SUCCESS_MESSAGE: &str = "Menu uploaded!";

#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    /// Collection holding one document per owner. Default: "menu".
    pub collection: String,
    /// Key prefix for uploaded images. Default: "menu".
    pub image_prefix: String,
    /// How long the success notification stays up before navigating. Default: 3s.
    pub redirect_grace: Duration,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            collection: "menu".into(),
            image_prefix: "menu".into(),
            redirect_grace: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub entry: MenuEntry,
    pub image_key: BlobKey,
    /// `None` when the category has no listing route.
    pub redirect: Option<Redirect>,
}

pub struct SubmissionWorkflow {
    blobs: Arc<dyn BlobStore>,
    documents: Arc<dyn DocumentStore>,
    session: SessionContext,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    options: WorkflowOptions,
    in_flight: AtomicBool,
}

/// Releases the in-flight slot on drop, including when the submit future is cancelled.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl SubmissionWorkflow {
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        documents: Arc<dyn DocumentStore>,
        session: SessionContext,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            blobs,
            documents,
            session,
            notifier,
            navigator,
            options: WorkflowOptions::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_options(mut self, options: WorkflowOptions) -> Self {
        self.options = options;
        self
    }

    /// Begin following the session.
    pub fn start(&mut self) {
        self.session.start();
    }

    /// Stop following the session. Later submits fail until restarted.
    pub fn stop(&mut self) {
        self.session.stop();
    }

    pub fn state(&self) -> WorkflowState {
        if self.in_flight.load(Ordering::Acquire) {
            WorkflowState::Submitting
        } else {
            WorkflowState::Idle
        }
    }

    /// Run one submission and report the result through the notifier and navigator.
    #[instrument(skip_all, fields(category = %submission.category))]
    pub async fn submit(&self, submission: MenuSubmission) -> Result<SubmitOutcome, SubmitError> {
        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("Submission already in flight, ignoring");
            return Err(SubmitError::InFlight);
        };

        let result = match self.session.current_owner() {
            Ok(owner) => self.upload_and_persist(&owner, &submission).await,
            Err(e) => Err(e.into()),
        };
        drop(guard);

        match result {
            Ok((entry, image_key)) => {
                info!(image = %image_key, name = %entry.name, "Menu entry saved");
                self.notifier.notify(Notification::success(SUCCESS_MESSAGE));

                let redirect = self.redirect_for(&entry.category);
                if let Some(redirect) = redirect {
                    self.navigator.navigate(redirect);
                }

                Ok(SubmitOutcome {
                    entry,
                    image_key,
                    redirect,
                })
            }
            Err(e) => {
                error!(error = %e, "Menu submission failed");
                self.notifier.notify(Notification::error(e.to_string()));
                Err(e)
            }
        }
    }

    fn redirect_for(&self, category: &str) -> Option<Redirect> {
        match listing_route(category) {
            Some(route) => Some(Redirect {
                route,
                grace: self.options.redirect_grace,
            }),
            None => {
                warn!(category, "No listing route for category, staying on the form");
                None
            }
        }
    }

    async fn upload_and_persist(
        &self,
        owner: &OwnerId,
        submission: &MenuSubmission,
    ) -> Result<(MenuEntry, BlobKey), SubmitError> {
        let key = BlobKey::random_under(&self.options.image_prefix).map_err(SubmitError::Upload)?;

        self.blobs
            .put(&key, submission.image.bytes(), submission.image.content_type())
            .await
            .map_err(SubmitError::Upload)?;
        debug!(image = %key, file = submission.image.file_name(), "Image uploaded");

        match self.persist(owner, &key, submission).await {
            Ok(entry) => Ok((entry, key)),
            Err(e) => {
                self.discard_image(&key).await;
                Err(e)
            }
        }
    }

    async fn persist(
        &self,
        owner: &OwnerId,
        key: &BlobKey,
        submission: &MenuSubmission,
    ) -> Result<MenuEntry, SubmitError> {
        let image = self.blobs.url(key).await.map_err(SubmitError::Upload)?;

        let entry = MenuEntry {
            image,
            name: submission.name.clone(),
            price: submission.price.clone(),
            category: submission.category.clone(),
            description: submission.description.clone(),
        };

        let owner_doc = DocumentPath::root(&self.options.collection, owner.as_str())?;
        let mut stamp = Document::new();
        stamp.insert(
            "updatedAt".into(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        self.documents.set(&owner_doc, stamp).await?;

        let menus_doc = owner_doc.child(&submission.category, "menus")?;
        let value = serde_json::to_value(&entry).map_err(common::document::DocumentError::from)?;

        // Creates the category document on first use.
        self.documents
            .array_union(&menus_doc, "menu", vec![value])
            .await?;

        Ok(entry)
    }

    async fn discard_image(&self, key: &BlobKey) {
        match self.blobs.delete(key).await {
            Ok(_) => info!(image = %key, "Removed image of failed submission"),
            Err(e) => warn!(image = %key, error = %e, "Failed to remove orphaned image"),
        }
    }
}
