/// Global editor mode for the widget session.
///
/// While `Editing`, offered markings are draggable/resizable in the marking
/// panel and no new marking may be created; `Browsing` is the ordinary
/// click-and-mark state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Browsing,
    Editing,
}
