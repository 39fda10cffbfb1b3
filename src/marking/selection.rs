use super::*;
use crate::mode::EditorMode;

impl MarkingRegistry {
    /// Selection click on a marking in the panel. An unselected marking
    /// always becomes selected; a selected one is deselected only while
    /// browsing. During an edit the deselect is suppressed, otherwise a
    /// resize grab would deselect the marking mid-gesture.
    ///
    /// Returns the marking's selection state after the click.
    pub fn toggle_selected(
        &mut self,
        id: MarkingId,
        mode: EditorMode,
    ) -> Result<bool, MarkingError> {
        let marking = self.find_mut(id).ok_or(MarkingError::UnknownMarking(id))?;
        if marking.selected {
            if mode == EditorMode::Browsing {
                marking.selected = false;
            }
        } else {
            marking.selected = true;
        }
        Ok(marking.selected)
    }

    /// Select every listed marking; ids no longer in the registry are
    /// skipped. Used when an edit begins on the offered set.
    pub fn select_all(&mut self, ids: &[MarkingId]) {
        for &id in ids {
            if let Some(marking) = self.find_mut(id) {
                marking.selected = true;
            }
        }
    }

    pub fn clear_selection(&mut self) {
        for marking in &mut self.markings {
            marking.selected = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn registry_with_two() -> (MarkingRegistry, MarkingId, MarkingId) {
        let mut registry = MarkingRegistry::new();
        let first = registry
            .add(
                Rect::new(10.0, 10.0, 50.0, 50.0),
                Point::new(0.0, 0.0),
                ObjectClass::Type1,
            )
            .expect("add should succeed")
            .id;
        let second = registry
            .add(
                Rect::new(200.0, 200.0, 50.0, 50.0),
                Point::new(0.0, 0.0),
                ObjectClass::Type2,
            )
            .expect("add should succeed")
            .id;
        (registry, first, second)
    }

    #[test]
    fn click_selects_and_second_click_deselects_while_browsing() {
        let (mut registry, id, _) = registry_with_two();
        assert!(registry
            .toggle_selected(id, EditorMode::Browsing)
            .expect("marking exists"));
        assert!(!registry
            .toggle_selected(id, EditorMode::Browsing)
            .expect("marking exists"));
    }

    #[test]
    fn deselect_is_suppressed_while_editing() {
        let (mut registry, id, _) = registry_with_two();
        assert!(registry
            .toggle_selected(id, EditorMode::Browsing)
            .expect("marking exists"));
        assert!(registry
            .toggle_selected(id, EditorMode::Editing)
            .expect("marking exists"));
        assert_eq!(registry.selected_count(), 1);
    }

    #[test]
    fn click_on_unselected_marking_selects_even_while_editing() {
        let (mut registry, id, _) = registry_with_two();
        assert!(registry
            .toggle_selected(id, EditorMode::Editing)
            .expect("marking exists"));
    }

    #[test]
    fn select_all_skips_dead_ids_and_clear_resets_everything() {
        let (mut registry, first, second) = registry_with_two();
        registry.select_all(&[first, second, 99]);
        assert_eq!(registry.selected_count(), 2);

        registry.clear_selection();
        assert_eq!(registry.selected_count(), 0);
    }

    #[test]
    fn toggle_on_unknown_id_is_an_error() {
        let (mut registry, _, _) = registry_with_two();
        let err = registry
            .toggle_selected(99, EditorMode::Browsing)
            .expect_err("unknown id must fail");
        assert_eq!(err, MarkingError::UnknownMarking(99));
    }
}
