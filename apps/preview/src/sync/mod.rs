// Synchronization: Collector -> Projector, run once per host event.
// The collector rebuilds the record wholesale from the form; the projector
// replaces every preview target wholesale and skips targets the host lacks.
// Everything here is synchronous; callers serialize events.

pub mod collector;
pub mod handlers;
pub mod projector;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::form::document::ControlRef;
use crate::form::{FormDocument, FormError, GroupId};
use crate::models::resume::ResumeRecord;
use crate::sync::collector::collect;
use crate::sync::projector::{project, PreviewRegion, PreviewTarget};

/// Runs one synchronization pass: collects a fresh record, then projects it.
/// Returns the record together with the preview targets that were absent.
pub fn synchronize(
    form: &FormDocument,
    preview: &mut PreviewRegion,
) -> (ResumeRecord, Vec<PreviewTarget>) {
    let record = collect(form);
    let skipped = project(&record, preview);
    (record, skipped)
}

/// One user interaction delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    AddEducation,
    AddWork,
    AddSkill,
    ValueChanged { control: ControlRef, value: String },
    Submitted,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub pass: u64,
    pub synced_at: DateTime<Utc>,
    /// Group appended by an add event; omitted for other events or an absent container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    pub record: ResumeRecord,
    pub skipped_targets: Vec<PreviewTarget>,
}

/// Owns the form and the preview and keeps them consistent.
#[derive(Debug, Clone, Default)]
pub struct ResumeBuilder {
    form: FormDocument,
    preview: PreviewRegion,
    passes: u64,
}

impl ResumeBuilder {
    pub fn new(form: FormDocument, preview: PreviewRegion) -> Self {
        Self {
            form,
            preview,
            passes: 0,
        }
    }

    pub fn form(&self) -> &FormDocument {
        &self.form
    }

    pub fn preview(&self) -> &PreviewRegion {
        &self.preview
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Host removed an output target. Takes effect from the next pass.
    pub fn detach_target(&mut self, target: PreviewTarget) -> bool {
        let removed = self.preview.detach(target);
        if removed {
            info!(preview_target = target.id(), "Preview target detached");
        }
        removed
    }

    /// Applies the event's mutation, then runs one pass.
    ///
    /// A rejected event (unknown control, failed "required" check on submit)
    /// leaves both form and preview untouched and runs no pass.
    pub fn handle(&mut self, event: HostEvent) -> Result<SyncReport, FormError> {
        let group_id = match event {
            HostEvent::AddEducation => self.form.add_education_group(),
            HostEvent::AddWork => self.form.add_work_group(),
            HostEvent::AddSkill => self.form.add_skill_control(),
            HostEvent::ValueChanged { control, value } => {
                self.form.set_value(&control, value)?;
                None
            }
            HostEvent::Submitted => {
                self.form.check_required()?;
                info!("Form submitted");
                None
            }
        };
        Ok(self.run_pass(group_id))
    }

    fn run_pass(&mut self, group_id: Option<GroupId>) -> SyncReport {
        let (record, skipped_targets) = synchronize(&self.form, &mut self.preview);
        self.passes += 1;

        debug!(
            pass = self.passes,
            education = record.education_entries.len(),
            work = record.work_entries.len(),
            skills = record.skills.len(),
            skipped = skipped_targets.len(),
            "Synchronization pass complete"
        );

        SyncReport {
            pass: self.passes,
            synced_at: Utc::now(),
            group_id,
            record,
            skipped_targets,
        }
    }
}
