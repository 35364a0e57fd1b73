//! In-memory stores for tasks and reference links.
//!
//! Both are plain ordered collections keyed by ULID. Nothing is persisted;
//! a restart starts from the seeds. Locks are held only for the duration of
//! a synchronous mutation, never across an await point.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use shared_types::{CreateLink, CreateTask, Link, Task, TaskStatus, UpdateTask};

#[derive(Clone, Default)]
pub struct TaskStore {
    inner: Arc<Mutex<Vec<Task>>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks in insertion order.
    pub fn list(&self) -> Vec<Task> {
        self.lock().clone()
    }

    pub fn create(&self, req: CreateTask) -> Task {
        let now = Utc::now();
        let task = Task {
            id: ulid::Ulid::new().to_string(),
            title: req.title,
            category: req.category,
            priority: req.priority,
            due_date: req.due_date,
            status: TaskStatus::Todo,
            created_at: now,
            updated_at: now,
        };
        self.lock().push(task.clone());
        task
    }

    pub fn update(&self, id: &str, req: UpdateTask) -> Option<Task> {
        let mut tasks = self.lock();
        let task = tasks.iter_mut().find(|t| t.id == id)?;
        if let Some(title) = req.title {
            task.title = title;
        }
        if let Some(category) = req.category {
            task.category = category;
        }
        if let Some(priority) = req.priority {
            task.priority = priority;
        }
        if let Some(due_date) = req.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(status) = req.status {
            task.status = status;
        }
        task.updated_at = Utc::now();
        Some(task.clone())
    }

    /// Advance the task through todo -> in-progress -> done -> todo.
    pub fn toggle_status(&self, id: &str) -> Option<Task> {
        let mut tasks = self.lock();
        let task = tasks.iter_mut().find(|t| t.id == id)?;
        task.status = task.status.next();
        task.updated_at = Utc::now();
        Some(task.clone())
    }

    pub fn delete(&self, id: &str) -> bool {
        let mut tasks = self.lock();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        tasks.len() < before
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Task>> {
        // A poisoned lock means a panic mid-mutation; the Vec is still valid.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Clone, Default)]
pub struct LinkStore {
    inner: Arc<Mutex<Vec<Link>>>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links newest-first, matching the dashboard's prepend-on-add behavior.
    pub fn list(&self) -> Vec<Link> {
        self.lock().clone()
    }

    pub fn create(&self, req: CreateLink) -> Link {
        let link = Link {
            id: ulid::Ulid::new().to_string(),
            title: req.title,
            url: req.url,
            category: req.category.unwrap_or_else(|| "general".to_string()),
            added_at: Utc::now(),
        };
        self.lock().insert(0, link.clone());
        link
    }

    pub fn delete(&self, id: &str) -> bool {
        let mut links = self.lock();
        let before = links.len();
        links.retain(|l| l.id != id);
        links.len() < before
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Link>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
