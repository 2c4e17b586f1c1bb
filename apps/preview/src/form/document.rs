use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::form::{FieldSpec, GroupKind, IdentityField};

/// Stable identifier of one dynamic group.
pub type GroupId = Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Group {0} not found")]
    UnknownGroup(GroupId),

    #[error("Field '{field}' is not part of a {kind:?} group")]
    UnknownField { kind: GroupKind, field: String },

    #[error("Form has no '{0}' control")]
    MissingControl(&'static str),

    #[error("Required controls are empty: {}", .0.join(", "))]
    RequiredMissing(Vec<String>),
}

/// Addresses one control of the form by stable identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlRef {
    Identity { field: IdentityField },
    Group { group_id: GroupId, field: String },
}

/// One repeatable input group. Values are held in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroup {
    pub id: GroupId,
    pub kind: GroupKind,
    values: Vec<String>,
}

impl FieldGroup {
    pub(crate) fn new(kind: GroupKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            values: vec![String::new(); kind.fields().len()],
        }
    }

    /// Value of the named field, `None` if the key is not in this kind's schema.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.kind
            .field_index(key)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// Schema fields paired with their current values.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &str)> + '_ {
        self.kind
            .fields()
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), FormError> {
        let index = self
            .kind
            .field_index(key)
            .ok_or_else(|| FormError::UnknownField {
                kind: self.kind,
                field: key.to_string(),
            })?;
        self.values[index] = value;
        Ok(())
    }
}

/// A host container that dynamic groups are appended into.
#[derive(Debug, Clone, Default)]
pub(crate) struct InputContainer {
    pub(crate) groups: Vec<FieldGroup>,
}

/// The form as the host currently presents it.
#[derive(Debug, Clone)]
pub struct FormDocument {
    pub(super) identity: BTreeMap<IdentityField, String>,
    pub(super) containers: HashMap<GroupKind, InputContainer>,
}

impl Default for FormDocument {
    fn default() -> Self {
        Self::with_layout(&IdentityField::ALL, &GroupKind::ALL)
    }
}

impl FormDocument {
    /// Full form: every identity control and every input container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form exposing only the given identity controls and containers.
    pub fn with_layout(identity: &[IdentityField], containers: &[GroupKind]) -> Self {
        Self {
            identity: identity.iter().map(|f| (*f, String::new())).collect(),
            containers: containers
                .iter()
                .map(|k| (*k, InputContainer::default()))
                .collect(),
        }
    }

    /// Current value of an identity control, `None` when the host has no such control.
    pub fn identity(&self, field: IdentityField) -> Option<&str> {
        self.identity.get(&field).map(String::as_str)
    }

    pub fn has_container(&self, kind: GroupKind) -> bool {
        self.containers.contains_key(&kind)
    }

    /// Groups of one kind in document order. Empty when the container is absent.
    pub fn groups(&self, kind: GroupKind) -> &[FieldGroup] {
        self.containers
            .get(&kind)
            .map(|c| c.groups.as_slice())
            .unwrap_or(&[])
    }

    #[allow(dead_code)]
    pub fn group(&self, id: GroupId) -> Option<&FieldGroup> {
        self.containers
            .values()
            .flat_map(|c| c.groups.iter())
            .find(|g| g.id == id)
    }

    fn group_mut(&mut self, id: GroupId) -> Option<&mut FieldGroup> {
        self.containers
            .values_mut()
            .flat_map(|c| c.groups.iter_mut())
            .find(|g| g.id == id)
    }

    /// Applies a "value changed" notification to the addressed control.
    pub fn set_value(&mut self, control: &ControlRef, value: impl Into<String>) -> Result<(), FormError> {
        let value = value.into();
        match control {
            ControlRef::Identity { field } => {
                let slot = self
                    .identity
                    .get_mut(field)
                    .ok_or(FormError::MissingControl(field.as_str()))?;
                *slot = value;
                Ok(())
            }
            ControlRef::Group { group_id, field } => self
                .group_mut(*group_id)
                .ok_or(FormError::UnknownGroup(*group_id))?
                .set(field, value),
        }
    }

    /// Required controls that are currently empty, in form order.
    pub fn missing_required(&self) -> Vec<String> {
        let mut missing: Vec<String> = self
            .identity
            .iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(f, _)| f.as_str().to_string())
            .collect();

        for kind in GroupKind::ALL {
            for (index, group) in self.groups(kind).iter().enumerate() {
                missing.extend(
                    group
                        .fields()
                        .filter(|(spec, value)| spec.required && value.is_empty())
                        .map(|(spec, _)| format!("{}[{index}].{}", kind.container_id(), spec.key)),
                );
            }
        }
        missing
    }

    /// Checks the host's "required" constraint before a submission is accepted.
    pub fn check_required(&self) -> Result<(), FormError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::RequiredMissing(missing))
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            identity: self
                .identity
                .iter()
                .map(|(f, v)| (f.as_str(), v.clone()))
                .collect(),
            containers: GroupKind::ALL
                .iter()
                .filter(|k| self.has_container(**k))
                .map(|k| ContainerSnapshot {
                    id: k.container_id(),
                    kind: *k,
                    groups: self.groups(*k).iter().map(GroupSnapshot::from).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub identity: BTreeMap<&'static str, String>,
    pub containers: Vec<ContainerSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerSnapshot {
    pub id: &'static str,
    pub kind: GroupKind,
    pub groups: Vec<GroupSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSnapshot {
    pub id: GroupId,
    pub tag: &'static str,
    pub fields: Vec<FieldSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSnapshot {
    #[serde(flatten)]
    pub spec: FieldSpec,
    pub value: String,
}

impl From<&FieldGroup> for GroupSnapshot {
    fn from(group: &FieldGroup) -> Self {
        GroupSnapshot {
            id: group.id,
            tag: group.kind.tag(),
            fields: group
                .fields()
                .map(|(spec, value)| FieldSnapshot {
                    spec: *spec,
                    value: value.to_string(),
                })
                .collect(),
        }
    }
}
