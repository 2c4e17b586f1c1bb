use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::resume::{Education, ResumeRecord, WorkExperience};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PreviewTarget {
    #[serde(rename = "resumeName")]
    Name,
    #[serde(rename = "resumeEmail")]
    Email,
    #[serde(rename = "resumePhone")]
    Phone,
    #[serde(rename = "resumeEducation")]
    Education,
    #[serde(rename = "resumeWork")]
    Work,
    #[serde(rename = "resumeSkills")]
    Skills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Plain text node; content is assigned as text.
    Text,
    /// Container whose content is markup.
    Html,
}

impl PreviewTarget {
    pub const ALL: [PreviewTarget; 6] = [
        PreviewTarget::Name,
        PreviewTarget::Email,
        PreviewTarget::Phone,
        PreviewTarget::Education,
        PreviewTarget::Work,
        PreviewTarget::Skills,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PreviewTarget::Name => "resumeName",
            PreviewTarget::Email => "resumeEmail",
            PreviewTarget::Phone => "resumePhone",
            PreviewTarget::Education => "resumeEducation",
            PreviewTarget::Work => "resumeWork",
            PreviewTarget::Skills => "resumeSkills",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn kind(self) -> TargetKind {
        match self {
            PreviewTarget::Name | PreviewTarget::Email | PreviewTarget::Phone => TargetKind::Text,
            PreviewTarget::Education | PreviewTarget::Work | PreviewTarget::Skills => {
                TargetKind::Html
            }
        }
    }
}

/// The read-only output region: each present target with its current content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRegion {
    targets: BTreeMap<PreviewTarget, String>,
}

impl Default for PreviewRegion {
    fn default() -> Self {
        Self::with_targets(&PreviewTarget::ALL)
    }
}

impl PreviewRegion {
    pub fn with_targets(targets: &[PreviewTarget]) -> Self {
        Self {
            targets: targets.iter().map(|t| (*t, String::new())).collect(),
        }
    }

    /// Current content of a target, `None` if the host does not provide it.
    #[allow(dead_code)]
    pub fn content(&self, target: PreviewTarget) -> Option<&str> {
        self.targets.get(&target).map(String::as_str)
    }

    /// Removes a target from the host; later passes skip it. Returns whether it was present.
    pub fn detach(&mut self, target: PreviewTarget) -> bool {
        self.targets.remove(&target).is_some()
    }

    /// Replaces a target's content. Returns `false` when the target is absent.
    fn replace(&mut self, target: PreviewTarget, content: String) -> bool {
        match self.targets.get_mut(&target) {
            Some(slot) => {
                *slot = content;
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> PreviewSnapshot {
        PreviewSnapshot {
            targets: self
                .targets
                .iter()
                .map(|(target, content)| TargetSnapshot {
                    id: target.id(),
                    kind: target.kind(),
                    content: content.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewSnapshot {
    pub targets: Vec<TargetSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetSnapshot {
    pub id: &'static str,
    pub kind: TargetKind,
    pub content: String,
}

/// Projects `record` into `preview`. Returns the targets that were absent and skipped.
pub fn project(record: &ResumeRecord, preview: &mut PreviewRegion) -> Vec<PreviewTarget> {
    let rendered = [
        (PreviewTarget::Name, record.identity.name.clone()),
        (PreviewTarget::Email, record.identity.email.clone()),
        (PreviewTarget::Phone, record.identity.phone.clone()),
        (
            PreviewTarget::Education,
            render_education(&record.education_entries),
        ),
        (PreviewTarget::Work, render_work(&record.work_entries)),
        (PreviewTarget::Skills, render_skills(&record.skills)),
    ];

    let mut skipped = Vec::new();
    for (target, content) in rendered {
        if !preview.replace(target, content) {
            warn!(preview_target = target.id(), "Preview target absent; section skipped");
            skipped.push(target);
        }
    }
    skipped
}

pub fn render_education(entries: &[Education]) -> String {
    entries
        .iter()
        .map(|e| render_block(&e.institution, &e.degree, &e.year))
        .collect()
}

pub fn render_work(entries: &[WorkExperience]) -> String {
    entries
        .iter()
        .map(|w| render_block(&w.company, &w.position, &w.duration))
        .collect()
}

pub fn render_skills(skills: &[String]) -> String {
    skills
        .iter()
        .map(|s| format!("<li>{}</li>", escape_html(s)))
        .collect()
}

/// One entry block: emphasized lead line followed by two plain lines.
fn render_block(lead: &str, second: &str, third: &str) -> String {
    format!(
        "<div><p><strong>{}</strong></p><p>{}</p><p>{}</p></div>",
        escape_html(lead),
        escape_html(second),
        escape_html(third)
    )
}

/// Escapes markup-significant characters so user text stays plain text.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Identity;

    fn education(institution: &str, degree: &str, year: &str) -> Education {
        Education {
            institution: institution.to_string(),
            degree: degree.to_string(),
            year: year.to_string(),
        }
    }

    fn ada() -> ResumeRecord {
        ResumeRecord {
            identity: Identity {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0100".to_string(),
            },
            education_entries: vec![education("Royal Academy", "Mathematics", "1840")],
            work_entries: vec![],
            skills: vec!["Analysis".to_string()],
        }
    }

    #[test]
    fn test_ada_lovelace_render() {
        let mut preview = PreviewRegion::default();
        let skipped = project(&ada(), &mut preview);

        assert!(skipped.is_empty());
        assert_eq!(preview.content(PreviewTarget::Name), Some("Ada Lovelace"));
        assert_eq!(preview.content(PreviewTarget::Email), Some("ada@example.com"));
        assert_eq!(preview.content(PreviewTarget::Phone), Some("555-0100"));
        assert_eq!(
            preview.content(PreviewTarget::Education),
            Some("<div><p><strong>Royal Academy</strong></p><p>Mathematics</p><p>1840</p></div>")
        );
        assert_eq!(preview.content(PreviewTarget::Work), Some(""));
        assert_eq!(preview.content(PreviewTarget::Skills), Some("<li>Analysis</li>"));
    }

    #[test]
    fn test_work_block_layout() {
        let html = render_work(&[WorkExperience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            duration: "2 years".to_string(),
        }]);
        assert_eq!(
            html,
            "<div><p><strong>Acme</strong></p><p>Engineer</p><p>2 years</p></div>"
        );
    }

    #[test]
    fn test_skills_include_empty_items() {
        let skills: Vec<String> = ["Go", "", "Rust"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            render_skills(&skills),
            "<li>Go</li><li></li><li>Rust</li>"
        );
    }

    #[test]
    fn test_full_replacement_drops_stale_blocks() {
        let mut preview = PreviewRegion::default();
        let mut record = ada();
        record
            .education_entries
            .push(education("Cambridge", "Logic", "1850"));
        project(&record, &mut preview);
        assert_eq!(
            preview
                .content(PreviewTarget::Education)
                .unwrap()
                .matches("<div>")
                .count(),
            2
        );

        record.education_entries.truncate(1);
        project(&record, &mut preview);
        let html = preview.content(PreviewTarget::Education).unwrap();
        assert_eq!(html.matches("<div>").count(), 1);
        assert!(!html.contains("Cambridge"));
    }

    #[test]
    fn test_projection_is_idempotent() {
        let record = ada();
        let mut first = PreviewRegion::default();
        project(&record, &mut first);
        let mut second = first.clone();
        project(&record, &mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_target_is_skipped() {
        let mut preview = PreviewRegion::default();
        assert!(preview.detach(PreviewTarget::Skills));
        let skipped = project(&ada(), &mut preview);

        assert_eq!(skipped, vec![PreviewTarget::Skills]);
        assert_eq!(preview.content(PreviewTarget::Skills), None);
        assert_eq!(preview.content(PreviewTarget::Name), Some("Ada Lovelace"));
        assert!(preview
            .content(PreviewTarget::Education)
            .unwrap()
            .contains("Royal Academy"));
    }

    #[test]
    fn test_markup_is_escaped_in_html_targets() {
        let mut record = ada();
        record.skills = vec!["<b>&\"'".to_string()];
        record.education_entries[0].institution = "<script>".to_string();
        let mut preview = PreviewRegion::default();
        project(&record, &mut preview);

        assert_eq!(
            preview.content(PreviewTarget::Skills),
            Some("<li>&lt;b&gt;&amp;&quot;&#39;</li>")
        );
        assert!(preview
            .content(PreviewTarget::Education)
            .unwrap()
            .starts_with("<div><p><strong>&lt;script&gt;</strong>"));
    }

    #[test]
    fn test_text_targets_hold_plain_text() {
        let mut record = ada();
        record.identity.name = "<Ada>".to_string();
        let mut preview = PreviewRegion::default();
        project(&record, &mut preview);
        assert_eq!(preview.content(PreviewTarget::Name), Some("<Ada>"));
    }

    #[test]
    fn test_target_ids_round_trip() {
        for target in PreviewTarget::ALL {
            assert_eq!(PreviewTarget::from_id(target.id()), Some(target));
        }
        assert_eq!(PreviewTarget::from_id("resumeHobbies"), None);
    }

    #[test]
    fn test_snapshot_reports_kinds() {
        let mut preview = PreviewRegion::with_targets(&[PreviewTarget::Name, PreviewTarget::Skills]);
        project(&ada(), &mut preview);
        let json = serde_json::to_value(preview.snapshot()).unwrap();
        assert_eq!(json["targets"][0]["id"], "resumeName");
        assert_eq!(json["targets"][0]["kind"], "text");
        assert_eq!(json["targets"][1]["id"], "resumeSkills");
        assert_eq!(json["targets"][1]["kind"], "html");
    }
}
