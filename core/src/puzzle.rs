use alloc::sync::Arc;
use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::*;

/// Contract shared by every concrete board variant.
///
/// A variant owns a [`Board`] for its cells and bookkeeping and layers its own addressing on top (grid
/// coordinates, graph nodes, ...). All board operations are provided here in terms of
/// [`board`](Self::board) and [`board_mut`](Self::board_mut), so a variant only has to expose its storage
/// and say how it copies itself.
pub trait PuzzleBoard {
    type Element: ElementData;
    type Rule: ?Sized + CaseRule;

    fn board(&self) -> &Board<Self::Element, Self::Rule>;

    fn board_mut(&mut self) -> &mut Board<Self::Element, Self::Rule>;

    /// Independent copy of the same variant.
    ///
    /// The result must own its cell sequence and modified set, with the same contents as `self`, and carry
    /// over the modifiable flag and the case rule. Mutating either board afterwards must never be visible
    /// through the other.
    fn copy(&self) -> Self
    where
        Self: Sized;

    fn element(&self, index: usize) -> Result<&Self::Element> {
        self.board().element(index)
    }

    fn element_mut(&mut self, index: usize) -> Result<&mut Self::Element> {
        self.board_mut().element_mut(index)
    }

    fn set_element(&mut self, index: usize, element: Self::Element) -> Result<()> {
        self.board_mut().set_element(index, element)
    }

    fn element_count(&self) -> usize {
        self.board().element_count()
    }

    fn elements(&self) -> &[Self::Element] {
        self.board().elements()
    }

    fn elements_mut(&mut self) -> &mut Vec<Self::Element> {
        self.board_mut().elements_mut()
    }

    fn set_elements(&mut self, cells: Vec<Self::Element>) {
        self.board_mut().set_elements(cells)
    }

    fn is_modifiable(&self) -> bool {
        self.board().is_modifiable()
    }

    fn set_modifiable(&mut self, modifiable: bool) {
        self.board_mut().set_modifiable(modifiable)
    }

    fn is_modified(&self) -> bool {
        self.board().is_modified()
    }

    fn is_element_modified(&self, element: &Self::Element) -> bool {
        self.board().is_element_modified(element)
    }

    fn modified(&self) -> &HashSet<Self::Element> {
        self.board().modified()
    }

    fn modified_mut(&mut self) -> &mut HashSet<Self::Element> {
        self.board_mut().modified_mut()
    }

    fn add_modified(&mut self, element: Self::Element) -> MarkOutcome {
        self.board_mut().add_modified(element)
    }

    fn remove_modified(&mut self, element: &Self::Element) -> MarkOutcome {
        self.board_mut().remove_modified(element)
    }

    fn clear_modified(&mut self) -> MarkOutcome {
        self.board_mut().clear_modified()
    }

    fn case_rule(&self) -> Option<&Arc<Self::Rule>> {
        self.board().case_rule()
    }

    fn set_case_rule(&mut self, case_rule: Option<Arc<Self::Rule>>) {
        self.board_mut().set_case_rule(case_rule)
    }

    fn take_case_rule(&mut self) -> Option<Arc<Self::Rule>> {
        self.board_mut().take_case_rule()
    }
}

/// The bare board is its own variant, with positions left uninterpreted.
impl<E: ElementData, R: ?Sized + CaseRule> PuzzleBoard for Board<E, R> {
    type Element = E;
    type Rule = R;

    fn board(&self) -> &Board<E, R> {
        self
    }

    fn board_mut(&mut self) -> &mut Board<E, R> {
        self
    }

    fn copy(&self) -> Self {
        log::trace!("Copying board with {} cells", self.element_count());
        self.clone()
    }
}
