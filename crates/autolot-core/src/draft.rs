//! Draft state for a car listing under composition
//!
//! A draft is composed of fixed photo slots (one image per [`PhotoRole`])
//! and a free-form ordered gallery. Both are plain in-memory values with
//! pure state transitions; persistence only happens when the draft is
//! assembled into a [`CarInsert`] and submitted.

use std::collections::{HashMap, HashSet};

use chrono::Utc;

use crate::error::AppError;
use crate::models::{CarFields, CarImage, CarInsert, PhotoRole};

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("Required photo slots are empty: {}", labels.join(", "))]
    MissingRoles { labels: Vec<String> },

    #[error("Gallery index {index} out of range (len: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Upload already in progress for slot: {0}")]
    UploadInFlight(PhotoRole),
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        match err {
            DraftError::MissingRoles { labels } => AppError::MissingPhotoRoles(labels.join(", ")),
            DraftError::IndexOutOfRange { index, len } => AppError::BadRequest(format!(
                "Gallery index {} out of range (len: {})",
                index, len
            )),
            DraftError::UploadInFlight(role) => AppError::UploadInFlight(role.to_string()),
        }
    }
}

/// Photo slot assignments: at most one image URL per role.
///
/// Each slot also tracks whether an upload is currently in flight so a
/// second upload into the same slot can be rejected instead of racing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotAssignments {
    slots: HashMap<PhotoRole, String>,
    uploading: HashSet<PhotoRole>,
}

impl SlotAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an image URL to a slot, replacing any previous image.
    pub fn assign(&mut self, role: PhotoRole, url: impl Into<String>) {
        self.slots.insert(role, url.into());
    }

    /// Empty a slot.
    pub fn clear(&mut self, role: PhotoRole) -> Option<String> {
        self.slots.remove(&role)
    }

    pub fn get(&self, role: PhotoRole) -> Option<&str> {
        self.slots.get(&role).map(String::as_str)
    }

    pub fn is_filled(&self, role: PhotoRole) -> bool {
        self.slots.contains_key(&role)
    }

    /// Mark a slot as having an upload in flight. Fails if one is already
    /// running for that slot.
    pub fn begin_upload(&mut self, role: PhotoRole) -> Result<(), DraftError> {
        if !self.uploading.insert(role) {
            return Err(DraftError::UploadInFlight(role));
        }
        Ok(())
    }

    /// Clear the in-flight marker, whether the upload succeeded or failed.
    pub fn finish_upload(&mut self, role: PhotoRole) {
        self.uploading.remove(&role);
    }

    pub fn is_uploading(&self, role: PhotoRole) -> bool {
        self.uploading.contains(&role)
    }

    /// Required roles with no image, in canonical order.
    pub fn missing(&self, required: &[PhotoRole]) -> Vec<PhotoRole> {
        PhotoRole::ALL
            .iter()
            .filter(|role| required.contains(role) && !self.is_filled(**role))
            .copied()
            .collect()
    }

    /// Filled slots in canonical order.
    pub fn filled(&self) -> impl Iterator<Item = (PhotoRole, &str)> {
        PhotoRole::ALL
            .iter()
            .filter_map(|role| self.slots.get(role).map(|url| (*role, url.as_str())))
    }
}

/// Ordered gallery of extra image URLs.
///
/// Positions are always contiguous from zero; every operation that removes
/// or relocates an item closes the gap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    urls: Vec<String>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an image to the end, returning its position.
    pub fn append(&mut self, url: impl Into<String>) -> usize {
        self.urls.push(url.into());
        self.urls.len() - 1
    }

    /// Remove the image at `index`, shifting later images down.
    pub fn remove_at(&mut self, index: usize) -> Result<String, DraftError> {
        if index >= self.urls.len() {
            return Err(DraftError::IndexOutOfRange {
                index,
                len: self.urls.len(),
            });
        }
        Ok(self.urls.remove(index))
    }

    /// Relocate a single image from `from` to `to`, preserving the relative
    /// order of everything else.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), DraftError> {
        let len = self.urls.len();
        if from >= len {
            return Err(DraftError::IndexOutOfRange { index: from, len });
        }
        if to >= len {
            return Err(DraftError::IndexOutOfRange { index: to, len });
        }
        let url = self.urls.remove(from);
        self.urls.insert(to, url);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}

/// Assemble a draft into a [`CarInsert`] ready for atomic persistence.
///
/// Every role in `required` must have a slot image; otherwise the call fails
/// with the missing roles' labels in canonical order. The resulting image
/// list is the filled slots in canonical role order (front marked primary)
/// followed by the gallery images with contiguous `order` values.
pub fn assemble(
    fields: CarFields,
    slots: &SlotAssignments,
    gallery: &Gallery,
    required: &[PhotoRole],
) -> Result<CarInsert, DraftError> {
    let missing = slots.missing(required);
    if !missing.is_empty() {
        return Err(DraftError::MissingRoles {
            labels: missing.iter().map(|r| r.label().to_string()).collect(),
        });
    }

    let uploaded_at = Utc::now();
    let mut images: Vec<CarImage> = slots
        .filled()
        .map(|(role, url)| CarImage {
            url: url.to_string(),
            role: Some(role),
            order: None,
            is_primary: role.is_primary().then_some(true),
            uploaded_at: Some(uploaded_at),
        })
        .collect();

    images.extend(gallery.iter().enumerate().map(|(i, url)| CarImage {
        url: url.to_string(),
        role: None,
        order: Some(i as i32),
        is_primary: None,
        uploaded_at: Some(uploaded_at),
    }));

    Ok(CarInsert { fields, images })
}
