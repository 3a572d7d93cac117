use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::CourseOption;
use crate::storage::{self, StateStore, KEY_COURSE_OPTIONS};

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Persisted list of selectable courses. Loaded once at startup; every
/// successful add rewrites the whole persisted list.
pub struct CourseCatalog {
    store: Arc<dyn StateStore>,
    courses: RwLock<Vec<CourseOption>>,
}

impl CourseCatalog {
    /// Built-in courses used when no persisted catalog exists (or the
    /// persisted one is malformed and gets discarded).
    fn builtins() -> Vec<CourseOption> {
        vec![
            CourseOption {
                id: "spn1130".to_string(),
                name: "SPN1130: Beginning Spanish I".to_string(),
            },
            CourseOption {
                id: "eng2000".to_string(),
                name: "ENG2000: Introduction to Literature".to_string(),
            },
            CourseOption {
                id: "math101".to_string(),
                name: "MATH101: Calculus I".to_string(),
            },
        ]
    }

    pub async fn load(store: Arc<dyn StateStore>) -> Self {
        let courses = storage::load_collection(store.as_ref(), KEY_COURSE_OPTIONS)
            .await
            .unwrap_or_else(Self::builtins);
        Self {
            store,
            courses: RwLock::new(courses),
        }
    }

    pub async fn list(&self) -> Vec<CourseOption> {
        self.courses.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.courses.read().await.len()
    }

    pub async fn find(&self, id: &str) -> Option<CourseOption> {
        self.courses
            .read()
            .await
            .iter()
            .find(|course| course.id == id)
            .cloned()
    }

    /// Adds a user-defined course. Empty code or name (after trimming) is a
    /// rejected no-op, reported as `Ok(None)`. The id is the lowercased code
    /// with all whitespace removed; an id collision overwrites the existing
    /// entry in place.
    pub async fn add_course(&self, code: &str, name: &str) -> Result<Option<CourseOption>> {
        let code = code.trim();
        let name = name.trim();
        if code.is_empty() || name.is_empty() {
            return Ok(None);
        }

        let id = WHITESPACE_RE.replace_all(&code.to_lowercase(), "").to_string();
        let course = CourseOption {
            id,
            name: format!("{}: {}", code, name),
        };

        let mut courses = self.courses.write().await;
        match courses.iter_mut().find(|existing| existing.id == course.id) {
            Some(existing) => *existing = course.clone(),
            None => courses.push(course.clone()),
        }
        storage::save_collection(self.store.as_ref(), KEY_COURSE_OPTIONS, &courses).await?;

        tracing::info!("Course added to catalog: {} ({})", course.name, course.id);
        Ok(Some(course))
    }
}
