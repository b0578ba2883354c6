//! Menu item submission: form rules, image handling and the
//! upload-then-persist workflow behind the admin "add dish" form.

pub mod catalog;
pub mod category;
pub mod draft;
pub mod entry;
pub mod error;
pub mod form;
pub mod image;
pub mod navigation;
pub mod notify;
pub mod price;
pub mod session;
pub mod workflow;

pub use catalog::MenuSummary;
pub use category::Category;
pub use draft::{DISH_NAME_MAX_CHARS, Field, MenuItemDraft, MenuSubmission, PriceEdit};
pub use entry::MenuEntry;
pub use error::{DraftError, ImageError, SubmitError};
pub use form::MenuForm;
pub use image::{ImageFile, ImageType, Preview};
pub use navigation::{DeferredNavigator, Navigator, RecordingNavigator, Redirect, listing_route};
pub use notify::{Notification, NotificationLevel, Notifier, Position, RecordingNotifier};
pub use session::{AuthProvider, AuthState, OwnerId, SessionContext, SessionError};
pub use workflow::{SubmissionWorkflow, SubmitOutcome, WorkflowOptions, WorkflowState};
