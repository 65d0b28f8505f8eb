use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Shared storage behind every board variant.
///
/// Holds the linear cell sequence, the set of cells a player has changed, the advisory modifiable flag and
/// an optional classification rule. None of these are interpreted here: positions are given meaning by the
/// variant, the flag is enforced by whoever handles input, and the rule is consulted by collaborators.
///
/// Writes through [`set_element`](Self::set_element) never touch the modified set. Callers record player
/// edits explicitly with [`add_modified`](Self::add_modified), which keeps program-driven writes (loading,
/// solver propagation) apart from player-driven ones.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "E: ElementData + Serialize",
    deserialize = "E: ElementData + Deserialize<'de>"
))]
pub struct Board<E, R: ?Sized = dyn CaseRule> {
    cells: Vec<E>,
    modified: HashSet<E>,
    modifiable: bool,
    #[serde(skip)]
    case_rule: Option<Arc<R>>,
}

impl<E: ElementData, R: ?Sized> Board<E, R> {
    /// Empty board: no cells, nothing modified, modifiable, no rule.
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            modified: HashSet::new(),
            modifiable: true,
            case_rule: None,
        }
    }

    pub fn from_cells(cells: Vec<E>) -> Self {
        let mut board = Self::new();
        board.cells = cells;
        board
    }

    pub fn element(&self, index: usize) -> Result<&E> {
        let len = self.cells.len();
        self.cells
            .get(index)
            .ok_or(BoardError::IndexOutOfRange { index, len })
    }

    pub fn element_mut(&mut self, index: usize) -> Result<&mut E> {
        let len = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or(BoardError::IndexOutOfRange { index, len })
    }

    /// Replaces the cell at `index` without recording it as modified.
    pub fn set_element(&mut self, index: usize, element: E) -> Result<()> {
        *self.element_mut(index)? = element;
        Ok(())
    }

    pub fn element_count(&self) -> usize {
        self.cells.len()
    }

    pub fn elements(&self) -> &[E] {
        &self.cells
    }

    /// Live handle to the cell sequence, for bulk edits.
    ///
    /// Pushing or removing cells changes [`element_count`](Self::element_count) immediately.
    pub fn elements_mut(&mut self) -> &mut Vec<E> {
        &mut self.cells
    }

    /// Replaces the whole cell sequence. The modified set is left as is.
    pub fn set_elements(&mut self, cells: Vec<E>) {
        log::trace!(
            "Replacing board cells, old count: {}, new count: {}",
            self.cells.len(),
            cells.len()
        );
        self.cells = cells;
    }

    pub fn is_modifiable(&self) -> bool {
        self.modifiable
    }

    pub fn set_modifiable(&mut self, modifiable: bool) {
        self.modifiable = modifiable;
    }

    pub fn is_modified(&self) -> bool {
        !self.modified.is_empty()
    }

    pub fn is_element_modified(&self, element: &E) -> bool {
        self.modified.contains(element)
    }

    pub fn modified(&self) -> &HashSet<E> {
        &self.modified
    }

    /// Live handle to the modified set, for bulk edits.
    pub fn modified_mut(&mut self) -> &mut HashSet<E> {
        &mut self.modified
    }

    pub fn add_modified(&mut self, element: E) -> MarkOutcome {
        self.modified.insert(element).into()
    }

    pub fn remove_modified(&mut self, element: &E) -> MarkOutcome {
        self.modified.remove(element).into()
    }

    pub fn clear_modified(&mut self) -> MarkOutcome {
        let changed = self.is_modified();
        self.modified.clear();
        changed.into()
    }

    pub fn case_rule(&self) -> Option<&Arc<R>> {
        self.case_rule.as_ref()
    }

    pub fn set_case_rule(&mut self, case_rule: Option<Arc<R>>) {
        self.case_rule = case_rule;
    }

    pub fn take_case_rule(&mut self) -> Option<Arc<R>> {
        self.case_rule.take()
    }
}

impl<E: ElementData, R: ?Sized> Default for Board<E, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies both containers; the rule is shared since boards never mutate it.
impl<E: ElementData, R: ?Sized> Clone for Board<E, R> {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            modified: self.modified.clone(),
            modifiable: self.modifiable,
            case_rule: self.case_rule.clone(),
        }
    }
}

/// Rules compare by identity.
impl<E: ElementData, R: ?Sized> PartialEq for Board<E, R> {
    fn eq(&self, other: &Self) -> bool {
        let same_rule = match (&self.case_rule, &other.case_rule) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_rule
            && self.modifiable == other.modifiable
            && self.cells == other.cells
            && self.modified == other.modified
    }
}

impl<E: ElementData, R: ?Sized> Eq for Board<E, R> {}

impl<E: ElementData, R: ?Sized> Index<usize> for Board<E, R> {
    type Output = E;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl<E: ElementData, R: ?Sized> IndexMut<usize> for Board<E, R> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.cells[index]
    }
}
