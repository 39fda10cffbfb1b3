use super::*;
use crate::mapper::CoordinateMapper;

impl MarkingRegistry {
    /// Markings near the last click, in registry order.
    ///
    /// The window is the click point (displayed-image pixels) extended by a
    /// full panel width/height on each side — deliberately larger than the
    /// visible panel, so markings just past the edge stay available while
    /// the user drags near the boundary. Only a marking's top-left corner is
    /// tested, not its far edge.
    pub fn query_in_viewport(
        &self,
        center: Point,
        panel: Size,
        mapper: &CoordinateMapper,
    ) -> Vec<&Marking> {
        let min_x = center.x - panel.width;
        let max_x = center.x + panel.width;
        let min_y = center.y - panel.height;
        let max_y = center.y + panel.height;

        self.markings
            .iter()
            .filter(|marking| {
                let display = mapper.original_to_display(marking.position);
                display.x >= min_x && display.x <= max_x && display.y >= min_y && display.y <= max_y
            })
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.markings
            .iter()
            .filter(|marking| marking.selected)
            .count()
    }
}
