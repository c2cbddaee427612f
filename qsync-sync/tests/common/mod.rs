//! In-memory stand-in for the remote service.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use filetime::{set_file_mtime, FileTime};
use qsync_remote::{Item, ItemTag, RemoteApi, RemoteError};

pub struct FakeApi {
    items: RefCell<Vec<Item>>,
    /// `updated_at` the "server" stamps on the next create/update.
    clock: RefCell<String>,
    next_id: Cell<u32>,
    fail_list: Cell<bool>,
    calls: RefCell<Vec<&'static str>>,
}

impl FakeApi {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: RefCell::new(items),
            clock: RefCell::new("2023-06-01T00:00:00+00:00".to_string()),
            next_id: Cell::new(1),
            fail_list: Cell::new(false),
            calls: RefCell::new(vec![]),
        }
    }

    pub fn set_clock(&self, ts: &str) {
        *self.clock.borrow_mut() = ts.to_string();
    }

    pub fn fail_listing(&self) {
        self.fail_list.set(true);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn item(&self, id: &str) -> Option<Item> {
        self.items.borrow().iter().find(|i| i.id == id).cloned()
    }

    /// Replace a stored item, as if edited on the web.
    pub fn edit_remotely(&self, id: &str, body: &str, updated_at: &str) {
        let mut items = self.items.borrow_mut();
        if let Some(item) = items.iter_mut().find(|i| i.id == id) {
            item.body = body.to_string();
            item.updated_at = Some(updated_at.to_string());
        }
    }

    fn not_found(method: &'static str, id: &str) -> RemoteError {
        RemoteError::Status {
            method,
            url: format!("fake://items/{id}"),
            code: 404,
            text: "Not Found".to_string(),
        }
    }
}

impl RemoteApi for FakeApi {
    fn list_items(&self) -> Result<Vec<Item>, RemoteError> {
        self.calls.borrow_mut().push("list");
        if self.fail_list.get() {
            return Err(RemoteError::Transport {
                method: "GET",
                url: "fake://authenticated_user/items".to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(self.items.borrow().clone())
    }

    fn get_item(&self, id: &str) -> Result<Item, RemoteError> {
        self.calls.borrow_mut().push("get");
        self.item(id).ok_or_else(|| Self::not_found("GET", id))
    }

    fn create_item(&self, item: &Item) -> Result<Item, RemoteError> {
        self.calls.borrow_mut().push("create");
        let n = self.next_id.get();
        self.next_id.set(n + 1);
        let id = format!("new{n}");
        let now = self.clock.borrow().clone();
        let created = Item {
            id: id.clone(),
            url: format!("https://qiita.example/alice/items/{id}"),
            created_at: Some(now.clone()),
            updated_at: Some(now),
            ..item.clone()
        };
        self.items.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update_item(&self, id: &str, item: &Item) -> Result<Item, RemoteError> {
        self.calls.borrow_mut().push("update");
        let now = self.clock.borrow().clone();
        let mut items = self.items.borrow_mut();
        let stored = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| Self::not_found("PATCH", id))?;
        stored.title = item.title.clone();
        stored.body = item.body.clone();
        stored.tags = item.tags.clone();
        stored.private = item.private;
        stored.updated_at = Some(now);
        Ok(stored.clone())
    }
}

pub fn remote_item(id: &str, created_at: &str, updated_at: &str, title: &str, body: &str) -> Item {
    Item {
        body: body.to_string(),
        id: id.to_string(),
        title: title.to_string(),
        private: false,
        tags: vec![ItemTag {
            name: "rust".to_string(),
            versions: Some(vec![]),
        }],
        created_at: Some(created_at.to_string()),
        updated_at: Some(updated_at.to_string()),
        url: format!("https://qiita.example/alice/items/{id}"),
    }
}

pub fn ts(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).expect("valid timestamp")
}

pub fn mtime(path: &Path) -> DateTime<FixedOffset> {
    qsync_core::entry::local_modified(path)
        .expect("stat")
        .expect("file exists")
}

pub fn touch_at(path: &Path, value: &str) {
    let stamp: std::time::SystemTime = ts(value).into();
    set_file_mtime(path, FileTime::from_system_time(stamp)).expect("set mtime");
}
