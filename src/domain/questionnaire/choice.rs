//! Selectable options offered by a question.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ChoiceId;

/// An atomic selectable option.
///
/// Both variants carry an identifier and a display title; the image variant
/// also references the picture the rendering layer shows for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Image {
        id: ChoiceId,
        title: String,
        image: String,
    },
    Text {
        id: ChoiceId,
        title: String,
    },
}

impl Choice {
    /// Creates a text-only choice.
    pub fn text(id: ChoiceId, title: impl Into<String>) -> Self {
        Choice::Text {
            id,
            title: title.into(),
        }
    }

    /// Creates an image-backed choice.
    pub fn image(id: ChoiceId, title: impl Into<String>, image: impl Into<String>) -> Self {
        Choice::Image {
            id,
            title: title.into(),
            image: image.into(),
        }
    }

    pub fn id(&self) -> &ChoiceId {
        match self {
            Choice::Image { id, .. } | Choice::Text { id, .. } => id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Choice::Image { title, .. } | Choice::Text { title, .. } => title,
        }
    }

    /// Image reference, if this is an image choice.
    pub fn image_ref(&self) -> Option<&str> {
        match self {
            Choice::Image { image, .. } => Some(image),
            Choice::Text { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ChoiceId {
        ChoiceId::new(s).unwrap()
    }

    #[test]
    fn accessors_work_for_both_variants() {
        let text = Choice::text(id("books"), "Books");
        let image = Choice::image(id("tech"), "Tech", "/images/tech.jpg");

        assert_eq!(text.id().as_str(), "books");
        assert_eq!(text.title(), "Books");
        assert_eq!(text.image_ref(), None);
        assert_eq!(image.image_ref(), Some("/images/tech.jpg"));
    }

    #[test]
    fn deserializes_image_variant_when_image_present() {
        let choice: Choice =
            serde_json::from_str(r#"{"id":"spa","title":"Spa day","image":"/spa.jpg"}"#).unwrap();
        assert!(matches!(choice, Choice::Image { .. }));
    }

    #[test]
    fn deserializes_text_variant_without_image() {
        let choice: Choice = serde_json::from_str(r#"{"id":"spa","title":"Spa day"}"#).unwrap();
        assert!(matches!(choice, Choice::Text { .. }));
    }
}
