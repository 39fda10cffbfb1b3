use super::*;
use crate::geometry::Rect;
use crate::mapper::CoordinateMapper;

impl MarkingRegistry {
    /// Add a marking drawn in the panel. The panel renders the original image
    /// at its natural resolution, so panel coordinates translate into
    /// original-image space by adding the panel origin; no scaling is
    /// involved until the marking is projected for display.
    ///
    /// Rejects a near-duplicate: a new marking whose position and size are
    /// all strictly within [`TOLERANCE`] of an existing marking's. A delta of
    /// exactly `TOLERANCE` on any axis makes the pair distinct.
    pub fn add(
        &mut self,
        rect_in_panel: Rect,
        panel_origin: Point,
        class: ObjectClass,
    ) -> Result<Marking, MarkingError> {
        let position = Point::new(
            rect_in_panel.x + panel_origin.x,
            rect_in_panel.y + panel_origin.y,
        );
        let size = rect_in_panel.size();

        if self
            .markings
            .iter()
            .any(|existing| is_near_duplicate(existing, position, size))
        {
            tracing::debug!(?position, ?size, "duplicate marking rejected");
            return Err(MarkingError::DuplicatePosition);
        }

        let id = self.allocate_id();
        let marking = Marking {
            id,
            position,
            size,
            class,
            selected: false,
        };
        self.markings.push(marking);
        tracing::debug!(id, class = ?class, "marking added");
        Ok(marking)
    }

    /// Apply a commit batch from the drag/resize interaction provider.
    ///
    /// Each edit adds its delta (converted into original-image space) to the
    /// stored position and overwrites the size from the converted
    /// display-space size, clamped up to `min_size` (original-image pixels)
    /// per axis. The batch is all-or-nothing: every target is resolved
    /// against a snapshot before anything mutates, and an unknown id fails
    /// the whole batch.
    pub fn apply_edits(
        &mut self,
        edits: &[MarkingEdit],
        mapper: &CoordinateMapper,
        min_size: f64,
    ) -> Result<usize, MarkingError> {
        let mut staged = Vec::with_capacity(edits.len());
        for edit in edits {
            let index = self
                .markings
                .iter()
                .position(|marking| marking.id == edit.id)
                .ok_or(MarkingError::UnknownMarking(edit.id))?;
            let delta = mapper.display_delta_to_original(edit.delta);
            let size = mapper.display_size_to_original(edit.size);
            staged.push((index, delta, size));
        }

        for (index, delta, size) in staged {
            let marking = &mut self.markings[index];
            marking.position.x += delta.x;
            marking.position.y += delta.y;
            marking.size = Size::new(size.width.max(min_size), size.height.max(min_size));
        }

        tracing::debug!(applied = edits.len(), "marking edits committed");
        Ok(edits.len())
    }

    /// Remove every selected marking. Survivors keep their ids; the id
    /// sequence never rewinds, so a deleted id is never reissued.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.markings.len();
        self.markings.retain(|marking| !marking.selected);
        let removed = before - self.markings.len();
        if removed > 0 {
            tracing::debug!(removed, "selected markings deleted");
        }
        removed
    }
}

fn is_near_duplicate(existing: &Marking, position: Point, size: Size) -> bool {
    (position.x - existing.position.x).abs() < TOLERANCE
        && (position.y - existing.position.y).abs() < TOLERANCE
        && (size.width - existing.size.width).abs() < TOLERANCE
        && (size.height - existing.size.height).abs() < TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(Size::new(1200.0, 900.0), Size::new(400.0, 300.0))
            .expect("sizes are non-empty")
    }

    fn registry_with_one() -> (MarkingRegistry, MarkingId) {
        let mut registry = MarkingRegistry::new();
        let marking = registry
            .add(
                Rect::new(10.0, 10.0, 50.0, 50.0),
                Point::new(0.0, 0.0),
                ObjectClass::Type1,
            )
            .expect("first add should succeed");
        (registry, marking.id)
    }

    #[test]
    fn first_id_is_zero_and_ids_increase() {
        let (mut registry, first) = registry_with_one();
        assert_eq!(first, 0);
        let second = registry
            .add(
                Rect::new(200.0, 200.0, 50.0, 50.0),
                Point::new(0.0, 0.0),
                ObjectClass::Type2,
            )
            .expect("distinct add should succeed");
        assert_eq!(second.id, 1);
    }

    #[test]
    fn add_translates_panel_rect_by_panel_origin() {
        let mut registry = MarkingRegistry::new();
        let marking = registry
            .add(
                Rect::new(15.0, 25.0, 40.0, 30.0),
                Point::new(600.0, 450.0),
                ObjectClass::Type1,
            )
            .expect("add should succeed");
        assert_eq!(marking.position, Point::new(615.0, 475.0));
        assert_eq!(marking.size, Size::new(40.0, 30.0));
        assert!(!marking.selected);
    }

    #[test]
    fn near_duplicate_below_tolerance_is_rejected() {
        let (mut registry, _) = registry_with_one();
        let err = registry
            .add(
                Rect::new(10.0001, 10.0001, 50.0, 50.0),
                Point::new(0.0, 0.0),
                ObjectClass::Type1,
            )
            .expect_err("sub-tolerance deltas must be rejected");
        assert_eq!(err, MarkingError::DuplicatePosition);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn delta_of_exactly_tolerance_is_distinct() {
        let (mut registry, _) = registry_with_one();
        registry
            .add(
                Rect::new(10.0 + TOLERANCE, 10.0, 50.0, 50.0),
                Point::new(0.0, 0.0),
                ObjectClass::Type1,
            )
            .expect("a delta equal to the tolerance is not a duplicate");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_check_ignores_classification() {
        let (mut registry, _) = registry_with_one();
        let err = registry
            .add(
                Rect::new(10.0, 10.0, 50.0, 50.0),
                Point::new(0.0, 0.0),
                ObjectClass::Type2,
            )
            .expect_err("same geometry with the other class is still a duplicate");
        assert_eq!(err, MarkingError::DuplicatePosition);
    }

    #[test]
    fn apply_edits_converts_display_deltas_into_original_space() {
        let (mut registry, id) = registry_with_one();
        registry
            .apply_edits(
                &[MarkingEdit {
                    id,
                    delta: Delta::new(10.0, -5.0),
                    size: Size::new(20.0, 25.0),
                }],
                &mapper(),
                0.0,
            )
            .expect("edit batch should apply");

        let marking = registry.get(id).expect("marking should survive the edit");
        assert_eq!(marking.position, Point::new(40.0, -5.0));
        assert_eq!(marking.size, Size::new(60.0, 75.0));
    }

    #[test]
    fn apply_edits_clamps_size_up_to_the_minimum() {
        let (mut registry, id) = registry_with_one();
        registry
            .apply_edits(
                &[MarkingEdit {
                    id,
                    delta: Delta::new(0.0, 0.0),
                    size: Size::new(2.0, 100.0),
                }],
                &mapper(),
                30.0,
            )
            .expect("edit batch should apply");

        let marking = registry.get(id).expect("marking should survive the edit");
        assert_eq!(marking.size, Size::new(30.0, 300.0));
    }

    #[test]
    fn apply_edits_with_unknown_id_mutates_nothing() {
        let (mut registry, id) = registry_with_one();
        let before = registry.markings().to_vec();
        let err = registry
            .apply_edits(
                &[
                    MarkingEdit {
                        id,
                        delta: Delta::new(10.0, 10.0),
                        size: Size::new(20.0, 20.0),
                    },
                    MarkingEdit {
                        id: 99,
                        delta: Delta::new(1.0, 1.0),
                        size: Size::new(20.0, 20.0),
                    },
                ],
                &mapper(),
                0.0,
            )
            .expect_err("unknown id must fail the whole batch");
        assert_eq!(err, MarkingError::UnknownMarking(99));
        assert_eq!(registry.markings(), before.as_slice());
    }

    #[test]
    fn delete_selected_removes_only_selected_and_keeps_ids() {
        let (mut registry, first) = registry_with_one();
        let second = registry
            .add(
                Rect::new(200.0, 200.0, 50.0, 50.0),
                Point::new(0.0, 0.0),
                ObjectClass::Type2,
            )
            .expect("distinct add should succeed")
            .id;
        registry.select_all(&[first]);

        assert_eq!(registry.delete_selected(), 1);
        assert!(registry.get(first).is_none());
        assert_eq!(
            registry.get(second).map(|marking| marking.id),
            Some(second)
        );

        // Ids are never reissued, even after a deletion freed one.
        let third = registry
            .add(
                Rect::new(400.0, 400.0, 50.0, 50.0),
                Point::new(0.0, 0.0),
                ObjectClass::Type1,
            )
            .expect("add after delete should succeed");
        assert_eq!(third.id, 2);
    }

    #[test]
    fn delete_selected_with_no_selection_reports_zero_and_keeps_all() {
        let (mut registry, _) = registry_with_one();
        assert_eq!(registry.delete_selected(), 0);
        assert_eq!(registry.len(), 1);
    }
}
