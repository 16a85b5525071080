//! Explicit view links between containers.
//!
//! Every container owns a [`CacheRoot`]: an identity token that also holds the
//! item cache (the keys of column views currently handed out). Derived
//! containers refer back to their parent with a `Weak<CacheRoot>`, so a link
//! never keeps the parent alive and goes dead as soon as the parent is dropped.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use crate::config::{get_options, ChainedAssignment};
use crate::error::{Error, Result};

/// Identity token and item cache of a container
#[derive(Debug, Default)]
pub struct CacheRoot {
    items: RefCell<BTreeSet<String>>,
}

impl CacheRoot {
    /// Create a fresh root wrapped in `Rc`
    pub fn new_rc() -> Rc<CacheRoot> {
        Rc::new(CacheRoot::default())
    }

    /// Register a view under `key`
    pub fn register(&self, key: &str) {
        self.items.borrow_mut().insert(key.to_string());
    }

    /// Drop the view registered under `key`
    pub fn invalidate(&self, key: &str) -> bool {
        self.items.borrow_mut().remove(key)
    }

    /// Drop every registered view
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains(key)
    }

    /// Registered keys in sorted order
    pub fn keys(&self) -> Vec<String> {
        self.items.borrow().iter().cloned().collect()
    }
}

/// Back-reference from a derived view to the container it was cut from
#[derive(Debug, Clone)]
pub struct Cacher {
    key: String,
    parent: Weak<CacheRoot>,
}

impl Cacher {
    /// Link a view stored under `key` to `parent`, registering it there
    pub fn attach(key: &str, parent: &Rc<CacheRoot>) -> Self {
        parent.register(key);
        Cacher {
            key: key.to_string(),
            parent: Rc::downgrade(parent),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The parent is alive and still lists this view
    pub fn is_live(&self) -> bool {
        self.parent
            .upgrade()
            .map(|root| root.contains(&self.key))
            .unwrap_or(false)
    }

    /// Remove this view from the parent's item cache, consuming the link
    pub fn invalidate(self) {
        if let Some(root) = self.parent.upgrade() {
            root.invalidate(&self.key);
        }
    }
}

/// Link from a copied container to the container it was derived from
pub(crate) fn is_copy_live(link: &Option<Weak<CacheRoot>>) -> bool {
    link.as_ref().map(|w| w.strong_count() > 0).unwrap_or(false)
}

/// Setting-with-copy check run by ordinary mutators of a derived copy
pub(crate) fn check_setitem_copy(link: &Option<Weak<CacheRoot>>, what: &str) -> Result<()> {
    if !is_copy_live(link) {
        return Ok(());
    }
    let message = format!("a value is being set on a copy of a slice from a {}", what);
    match get_options().chained_assignment {
        ChainedAssignment::Raise => Err(Error::SettingWithCopy(message)),
        ChainedAssignment::Warn => {
            log::warn!("{}", message);
            Ok(())
        }
        ChainedAssignment::Off => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cacher_invalidation() {
        let root = CacheRoot::new_rc();
        let cacher = Cacher::attach("a", &root);
        assert!(cacher.is_live());
        assert_eq!(root.keys(), vec!["a".to_string()]);

        cacher.clone().invalidate();
        assert!(!cacher.is_live());
        assert!(root.keys().is_empty());
    }

    #[test]
    fn test_cacher_dies_with_parent() {
        let root = CacheRoot::new_rc();
        let cacher = Cacher::attach("a", &root);
        drop(root);
        assert!(!cacher.is_live());
    }
}
