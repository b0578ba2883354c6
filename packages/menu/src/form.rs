use crate::draft::MenuItemDraft;
use crate::error::SubmitError;
use crate::workflow::{SubmissionWorkflow, SubmitOutcome, WorkflowState};

/// One open "add dish" form: the draft plus the workflow that saves it.
pub struct MenuForm {
    draft: MenuItemDraft,
    workflow: SubmissionWorkflow,
}

impl MenuForm {
    /// Open the form for `category` and start following the session.
    pub fn mount(mut workflow: SubmissionWorkflow, category: impl Into<String>) -> Self {
        workflow.start();
        Self {
            draft: MenuItemDraft::new(category),
            workflow,
        }
    }

    /// Close the form, ending the session subscription.
    pub fn unmount(mut self) -> SubmissionWorkflow {
        self.workflow.stop();
        self.workflow
    }

    pub fn draft(&self) -> &MenuItemDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut MenuItemDraft {
        &mut self.draft
    }

    pub fn workflow(&self) -> &SubmissionWorkflow {
        &self.workflow
    }

    pub fn is_submitting(&self) -> bool {
        self.workflow.state() == WorkflowState::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Loading..."
        } else {
            "Save"
        }
    }

    /// Discard the draft without saving. The category stays.
    pub fn cancel(&mut self) {
        self.draft.reset();
    }

    /// Validate and save. A validation failure returns before any backend call;
    /// any other failure leaves the draft as it was for another attempt.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let submission = self.draft.validate()?;
        let outcome = self.workflow.submit(submission).await?;
        self.draft.reset();
        Ok(outcome)
    }
}
