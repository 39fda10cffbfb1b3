//! The widget facade: one entry point per user-facing event, wired over the
//! registry, mode machine, viewport session and mapper. Every rejection is
//! reported to the dialog collaborator as a blocking message and returned as
//! a typed error; handlers complete normally in all cases.
//!
//! `MarkerWidget` is single-thread-affine. It holds no locks; all state is
//! exclusively owned and every method runs to completion on the caller's
//! thread. Hosts must confine a widget instance to their UI thread.

use crate::config::WidgetConfig;
use crate::dialog::DialogBackend;
use crate::error::{WidgetError, WidgetResult};
use crate::geometry::{Point, Rect, Size};
use crate::mapper::CoordinateMapper;
use crate::marking::{Marking, MarkingEdit, MarkingError, MarkingId, MarkingRegistry, ObjectClass};
use crate::mode::{EditorMode, ModeEvent, ModeMachine};
use crate::projection::{overlay_placement, panel_placement, OverlayPlacement, PanelPlacement};
use crate::source::ImageSource;
use crate::viewport::{ClickOutcome, ViewportSession};

/// Reads the classification toggle at marking-creation time.
pub trait ClassToggle {
    fn current_class(&self) -> ObjectClass;
}

#[derive(Debug)]
pub struct MarkerWidget {
    config: WidgetConfig,
    mapper: Option<CoordinateMapper>,
    registry: MarkingRegistry,
    machine: ModeMachine,
    viewport: ViewportSession,
    /// Ids offered in the marking panel since the last click (plus any
    /// marking added since). Edits operate on this set.
    offered: Vec<MarkingId>,
    rectangle_visible: bool,
    type1_visible: bool,
    type2_visible: bool,
}

impl MarkerWidget {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            mapper: None,
            registry: MarkingRegistry::new(),
            machine: ModeMachine::new(),
            viewport: ViewportSession::new(0.0),
            offered: Vec::new(),
            rectangle_visible: true,
            type1_visible: true,
            type2_visible: true,
        }
    }

    /// Probe the original image size once and build the coordinate mapper.
    /// Until this succeeds, every operation that depends on a conversion
    /// fails with [`WidgetError::NotInitialized`].
    pub fn initialize(
        &mut self,
        source: &impl ImageSource,
        displayed: Size,
        panel_client_width: f64,
    ) -> WidgetResult<()> {
        let original = source.natural_size()?;
        self.mapper = Some(CoordinateMapper::new(original, displayed)?);
        self.viewport.resize_panel(panel_client_width);
        tracing::info!(?original, ?displayed, "marker widget initialized");
        Ok(())
    }

    fn mapper(&self) -> WidgetResult<&CoordinateMapper> {
        self.mapper.as_ref().ok_or(WidgetError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.mapper.is_some()
    }

    pub fn mode(&self) -> EditorMode {
        self.machine.mode()
    }

    pub fn is_rectangle_visible(&self) -> bool {
        self.rectangle_visible
    }

    pub fn markings(&self) -> &[Marking] {
        self.registry.markings()
    }

    pub fn offered(&self) -> &[MarkingId] {
        &self.offered
    }

    /// Click on the displayed image (the lens viewer's callback): recompute
    /// the viewport, refresh the offered set and re-show the marking
    /// rectangle if it was hidden.
    pub fn image_clicked(
        &mut self,
        client: Point,
        image_offset: Point,
        scroll: Point,
    ) -> WidgetResult<ClickOutcome> {
        let mapper = *self.mapper()?;
        let outcome = self
            .viewport
            .record_click(client, image_offset, scroll, &mapper);
        self.offered = self
            .registry
            .query_in_viewport(outcome.click, self.viewport.panel_size(), &mapper)
            .iter()
            .map(|marking| marking.id)
            .collect();
        if !self.rectangle_visible {
            self.rectangle_visible = true;
        }
        Ok(outcome)
    }

    /// Window resize: recompute the scale ratios and re-square the panel.
    pub fn window_resized(&mut self, displayed: Size, panel_client_width: f64) -> WidgetResult<()> {
        let mapper = self.mapper.as_mut().ok_or(WidgetError::NotInitialized)?;
        mapper.rescale(displayed)?;
        self.viewport.resize_panel(panel_client_width);
        Ok(())
    }

    /// Add the marking rectangle's current geometry (panel pixels) as a new
    /// marking, classified from the toggle control.
    pub fn add_marking(
        &mut self,
        rect_in_panel: Rect,
        toggle: &impl ClassToggle,
        dialogs: &impl DialogBackend,
    ) -> WidgetResult<PanelPlacement> {
        if !self.is_initialized() {
            return Err(WidgetError::NotInitialized);
        }
        if self.mode() == EditorMode::Editing {
            dialogs.alert(
                "You are editing the marking panel. Commit the update before adding a new marking.",
            );
            return Err(WidgetError::WrongMode);
        }
        if !self.rectangle_visible {
            let err = MarkingError::RectangleHidden;
            dialogs.alert(&err.to_string());
            return Err(err.into());
        }

        let class = toggle.current_class();
        match self
            .registry
            .add(rect_in_panel, self.viewport.panel_origin(), class)
        {
            Ok(marking) => {
                self.offered.push(marking.id);
                Ok(panel_placement(&marking, self.viewport.panel_origin()))
            }
            Err(err) => {
                dialogs.alert(&err.to_string());
                Err(err.into())
            }
        }
    }

    /// Make the offered markings editable: select them all, hide the marking
    /// rectangle and enter `Editing`.
    pub fn begin_edit(&mut self, dialogs: &impl DialogBackend) -> WidgetResult<()> {
        if self.mode() == EditorMode::Editing {
            dialogs.alert(
                "You are already editing the marking panel. Commit the update to save the changes.",
            );
            return Err(WidgetError::WrongMode);
        }
        if self.offered.is_empty() {
            let err = MarkingError::NothingToActOn;
            dialogs.alert("There is no object marking to edit.");
            return Err(err.into());
        }

        self.machine.transition(ModeEvent::BeginEdit)?;
        self.rectangle_visible = false;
        let offered = self.offered.clone();
        self.registry.select_all(&offered);
        Ok(())
    }

    /// Commit the drag/resize deltas recorded by the interaction provider:
    /// apply them as one batch, clear the selection and return to
    /// `Browsing`. Returns the refreshed panel placements.
    pub fn commit_update(
        &mut self,
        edits: &[MarkingEdit],
        dialogs: &impl DialogBackend,
    ) -> WidgetResult<Vec<PanelPlacement>> {
        if self.mode() != EditorMode::Editing {
            dialogs.alert("There is no marking update in progress to commit.");
            return Err(WidgetError::WrongMode);
        }
        let mapper = *self.mapper()?;

        if let Err(err) = self
            .registry
            .apply_edits(edits, &mapper, self.config.min_marking_size)
        {
            dialogs.alert(&err.to_string());
            return Err(err.into());
        }

        self.registry.clear_selection();
        self.machine.transition(ModeEvent::CommitUpdate)?;
        Ok(self.panel_placements())
    }

    /// Delete every selected marking, after confirmation. Returns the number
    /// removed; a declined confirmation removes nothing and reports zero.
    pub fn delete_selected(&mut self, dialogs: &impl DialogBackend) -> WidgetResult<usize> {
        let count = self.registry.selected_count();
        if count == 0 {
            let err = MarkingError::NothingToActOn;
            dialogs.alert("There are no object markings to delete.");
            return Err(err.into());
        }

        if self.config.confirm_deletes {
            let message =
                format!("Do you really want to remove the {count} selected object markings?");
            if !dialogs.confirm(&message) {
                return Ok(0);
            }
        }

        let removed = self.registry.delete_selected();
        let registry = &self.registry;
        self.offered.retain(|id| registry.get(*id).is_some());
        Ok(removed)
    }

    /// Show or hide the marking rectangle. Refused while an edit is in
    /// progress.
    pub fn toggle_rectangle_visibility(
        &mut self,
        dialogs: &impl DialogBackend,
    ) -> WidgetResult<bool> {
        if self.mode() == EditorMode::Editing {
            dialogs.alert(
                "You are editing the marking panel. Commit the update before changing the marking rectangle.",
            );
            return Err(WidgetError::WrongMode);
        }
        self.rectangle_visible = !self.rectangle_visible;
        Ok(self.rectangle_visible)
    }

    /// Selection click on a marking shown in the panel.
    pub fn toggle_marking_selected(&mut self, id: MarkingId) -> WidgetResult<bool> {
        Ok(self.registry.toggle_selected(id, self.mode())?)
    }

    /// Per-type visibility filter (the type checkboxes). A hidden class is
    /// dropped from both projections; the registry keeps its markings.
    pub fn set_class_visibility(&mut self, class: ObjectClass, visible: bool) {
        match class {
            ObjectClass::Type1 => self.type1_visible = visible,
            ObjectClass::Type2 => self.type2_visible = visible,
        }
    }

    pub const fn class_visible(&self, class: ObjectClass) -> bool {
        match class {
            ObjectClass::Type1 => self.type1_visible,
            ObjectClass::Type2 => self.type2_visible,
        }
    }

    /// Overlay placements for every visible marking, in registry order.
    pub fn overlay_placements(&self) -> WidgetResult<Vec<OverlayPlacement>> {
        let mapper = self.mapper()?;
        Ok(self
            .registry
            .markings()
            .iter()
            .filter(|marking| self.class_visible(marking.class))
            .map(|marking| overlay_placement(marking, mapper))
            .collect())
    }

    /// Panel placements for the offered, visible markings.
    pub fn panel_placements(&self) -> Vec<PanelPlacement> {
        let origin = self.viewport.panel_origin();
        self.offered
            .iter()
            .filter_map(|id| self.registry.get(*id))
            .filter(|marking| self.class_visible(marking.class))
            .map(|marking| panel_placement(marking, origin))
            .collect()
    }
}
