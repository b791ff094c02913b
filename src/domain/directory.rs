//! Contact directory: an unbalanced binary search tree keyed by lowercased name.
//!
//! Each node exclusively owns its children through `Option<Box<_>>` links.
//! Shape follows insertion order and is never rebalanced, so height is O(n)
//! in the worst case.
//!
//! The directory is single-threaded state: every mutation needs `&mut self`
//! and there is no interior locking.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use termtree::Tree;
use tracing::{debug, instrument};

use crate::domain::contact::normalize_key;
use crate::domain::{ContactRecord, ContactUpdate, DomainResult};

type Link = Option<Box<TreeNode>>;

/// Label used in [`ContactDirectory::to_tree`] for a missing child whose
/// sibling exists.
pub const EMPTY_CHILD: &str = "-";

#[derive(Debug)]
struct TreeNode {
    /// Cached `record.key()`, rewritten together with the record
    key: String,
    record: ContactRecord,
    left: Link,
    right: Link,
}

impl TreeNode {
    fn new(record: ContactRecord) -> Self {
        Self {
            key: record.key(),
            record,
            left: None,
            right: None,
        }
    }
}

/// Result of [`ContactDirectory::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Added,
    /// A contact with the same case-insensitive name exists; nothing changed.
    AlreadyExists,
}

/// Result of [`ContactDirectory::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Ordered map from case-insensitive contact name to [`ContactRecord`].
#[derive(Debug, Default)]
pub struct ContactDirectory {
    root: Link,
    len: usize,
}

impl ContactDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new contact as a leaf.
    ///
    /// Duplicate names (compared case-insensitively) are rejected with
    /// [`InsertOutcome::AlreadyExists`]; this is not an upsert.
    ///
    /// # Errors
    /// [`DomainError::InvalidArgument`](crate::domain::DomainError) if the
    /// record's name or phone is empty. The tree is left untouched.
    #[instrument(level = "debug", skip(self, record), fields(name = %record.name))]
    pub fn insert(&mut self, record: ContactRecord) -> DomainResult<InsertOutcome> {
        record.validate()?;
        let outcome = insert_node(&mut self.root, TreeNode::new(record));
        if outcome == InsertOutcome::Added {
            self.len += 1;
        }
        debug!(?outcome, len = self.len, "insert");
        Ok(outcome)
    }

    /// Exact, case-insensitive lookup.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, name: &str) -> Option<&ContactRecord> {
        find_node(&self.root, &normalize_key(name)).map(|node| &node.record)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Apply `changes` to the contact stored under `name`.
    ///
    /// Only non-empty values overwrite; the name (and therefore the position
    /// in the tree) never changes. Returns the updated record, or `None`
    /// when no contact matches.
    #[instrument(level = "debug", skip(self, changes))]
    pub fn update(&mut self, name: &str, changes: &ContactUpdate) -> Option<&ContactRecord> {
        let node = find_node_mut(&mut self.root, &normalize_key(name))?;
        changes.apply_to(&mut node.record);
        debug!(record = %node.record, "update");
        Some(&node.record)
    }

    /// Remove the contact stored under `name`.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, name: &str) -> DeleteOutcome {
        let mut deleted = false;
        self.root = delete_node(self.root.take(), &normalize_key(name), &mut deleted);
        let outcome = if deleted {
            self.len -= 1;
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        };
        debug!(?outcome, len = self.len, "delete");
        outcome
    }

    /// Lazy in-order traversal, ascending by lowercased name.
    ///
    /// Each call starts a fresh walk over the current tree.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder::new(self.root.as_deref(), self.len)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels on the longest root-to-leaf path; 0 when empty.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Render the tree shape, one node per contact name.
    ///
    /// A node with a single child still shows both slots, the missing one
    /// as [`EMPTY_CHILD`], so left and right stay distinguishable.
    pub fn to_tree(&self) -> Option<Tree<String>> {
        self.root.as_deref().map(subtree)
    }
}

impl Drop for ContactDirectory {
    /// Unlink nodes one at a time; the default drop recurses once per level.
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<'a> IntoIterator for &'a ContactDirectory {
    type Item = &'a ContactRecord;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn insert_node(mut link: &mut Link, node: TreeNode) -> InsertOutcome {
    loop {
        match link {
            None => {
                *link = Some(Box::new(node));
                return InsertOutcome::Added;
            }
            Some(current) => match node.key.cmp(&current.key) {
                Ordering::Less => link = &mut current.left,
                Ordering::Greater => link = &mut current.right,
                Ordering::Equal => return InsertOutcome::AlreadyExists,
            },
        }
    }
}

fn find_node<'a>(link: &'a Link, key: &str) -> Option<&'a TreeNode> {
    let mut current = link;
    while let Some(node) = current {
        match key.cmp(node.key.as_str()) {
            Ordering::Less => current = &node.left,
            Ordering::Greater => current = &node.right,
            Ordering::Equal => return Some(&**node),
        }
    }
    None
}

fn find_node_mut<'a>(mut link: &'a mut Link, key: &str) -> Option<&'a mut TreeNode> {
    while let Some(node) = link {
        match key.cmp(node.key.as_str()) {
            Ordering::Less => link = &mut node.left,
            Ordering::Greater => link = &mut node.right,
            Ordering::Equal => return Some(&mut **node),
        }
    }
    None
}

/// Delete `key` from the subtree and return its replacement root.
///
/// The caller stores the result back into the link it passed in.
fn delete_node(link: Link, key: &str, deleted: &mut bool) -> Link {
    let mut node = link?;
    match key.cmp(node.key.as_str()) {
        Ordering::Less => {
            node.left = delete_node(node.left.take(), key, deleted);
            Some(node)
        }
        Ordering::Greater => {
            node.right = delete_node(node.right.take(), key, deleted);
            Some(node)
        }
        Ordering::Equal => {
            *deleted = true;
            if node.left.is_none() {
                return node.right.take();
            }
            if node.right.is_none() {
                return node.left.take();
            }

            // Two children: splice in the in-order successor
            let (successor_key, successor_record) = match successor(&node) {
                Some(succ) => (succ.key.clone(), succ.record.clone()),
                None => return Some(node),
            };
            node.record = successor_record;
            let mut successor_removed = false;
            node.right = delete_node(node.right.take(), &successor_key, &mut successor_removed);
            node.key = successor_key;
            debug_assert!(successor_removed);
            Some(node)
        }
    }
}

/// Leftmost node of the right subtree.
fn successor(node: &TreeNode) -> Option<&TreeNode> {
    let mut current = node.right.as_deref()?;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    Some(current)
}

fn height(link: &Link) -> usize {
    let mut deepest = 0;
    let mut pending: Vec<(&TreeNode, usize)> =
        link.as_deref().map(|node| (node, 1)).into_iter().collect();
    while let Some((node, depth)) = pending.pop() {
        deepest = deepest.max(depth);
        pending.extend(
            [node.left.as_deref(), node.right.as_deref()]
                .into_iter()
                .flatten()
                .map(|child| (child, depth + 1)),
        );
    }
    deepest
}

fn subtree(node: &TreeNode) -> Tree<String> {
    let root = Tree::new(node.record.name.clone());
    match (node.left.as_deref(), node.right.as_deref()) {
        (None, None) => root,
        (left, right) => root.with_leaves([left, right].into_iter().map(|child| {
            child.map_or_else(|| Tree::new(EMPTY_CHILD.to_string()), subtree)
        })),
    }
}

/// In-order iterator over a [`ContactDirectory`], driven by an explicit
/// stack of pending ancestors.
pub struct InOrder<'a> {
    stack: Vec<&'a TreeNode>,
    remaining: usize,
}

impl<'a> InOrder<'a> {
    fn new(root: Option<&'a TreeNode>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a TreeNode>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a ContactRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for InOrder<'_> {}

impl FusedIterator for InOrder<'_> {}
