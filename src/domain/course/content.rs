//! Course content tree: ordered chapters of ordered lectures.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Longest single lecture accepted, in minutes (one day).
pub const MAX_LECTURE_MINUTES: u32 = 24 * 60;

/// A single lecture inside a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    pub title: String,
    pub duration_minutes: u32,
    /// Empty once redacted for a viewer without access.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default)]
    pub is_preview_free: bool,
}

/// A chapter groups lectures. Vector order is presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    #[serde(default)]
    pub lectures: Vec<Lecture>,
}

impl Chapter {
    /// Total running time of the chapter in minutes.
    pub fn duration_minutes(&self) -> u64 {
        self.lectures
            .iter()
            .map(|l| u64::from(l.duration_minutes))
            .sum()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field("chapter.title"));
        }
        for lecture in &self.lectures {
            if lecture.title.trim().is_empty() {
                return Err(ValidationError::empty_field("lecture.title"));
            }
            if lecture.url.trim().is_empty() {
                return Err(ValidationError::empty_field("lecture.url"));
            }
            if lecture.duration_minutes > MAX_LECTURE_MINUTES {
                return Err(ValidationError::out_of_range(
                    "lecture.duration_minutes",
                    0,
                    i64::from(MAX_LECTURE_MINUTES),
                    i64::from(lecture.duration_minutes),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lecture(minutes: u32) -> Lecture {
        Lecture {
            title: "Intro".to_string(),
            duration_minutes: minutes,
            url: "https://video.example.com/1".to_string(),
            is_preview_free: false,
        }
    }

    #[test]
    fn chapter_duration_sums_lectures() {
        let chapter = Chapter {
            title: "Basics".to_string(),
            lectures: vec![lecture(12), lecture(30), lecture(3)],
        };
        assert_eq!(chapter.duration_minutes(), 45);
    }

    #[test]
    fn empty_chapter_has_zero_duration() {
        let chapter = Chapter {
            title: "Soon".to_string(),
            lectures: vec![],
        };
        assert_eq!(chapter.duration_minutes(), 0);
    }

    #[test]
    fn validate_rejects_lecture_without_url() {
        let mut bad = lecture(5);
        bad.url = " ".to_string();
        let chapter = Chapter {
            title: "Basics".to_string(),
            lectures: vec![bad],
        };
        assert_eq!(
            chapter.validate(),
            Err(ValidationError::empty_field("lecture.url"))
        );
    }

    #[test]
    fn validate_caps_lecture_length() {
        let chapter = Chapter {
            title: "Basics".to_string(),
            lectures: vec![lecture(MAX_LECTURE_MINUTES), lecture(MAX_LECTURE_MINUTES + 1)],
        };
        assert!(matches!(
            chapter.validate(),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "lecture.duration_minutes"
        ));
    }

    #[test]
    fn duration_of_stored_content_does_not_wrap() {
        let chapter = Chapter {
            title: "Imported".to_string(),
            lectures: vec![lecture(u32::MAX), lecture(u32::MAX)],
        };
        assert_eq!(chapter.duration_minutes(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn preview_flag_defaults_to_false() {
        let json = r#"{"title":"L1","duration_minutes":4,"url":"https://v/1"}"#;
        let lecture: Lecture = serde_json::from_str(json).unwrap();
        assert!(!lecture.is_preview_free);
    }
}
