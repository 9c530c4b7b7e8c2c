//! View constants (layout/sizing).

pub(crate) const TOOLBAR_H: f32 = 48.0;

pub(crate) const PANEL_W: f32 = 460.0;

pub(crate) const LABEL_W: f32 = 120.0;
pub(crate) const CHECK_W: f32 = 24.0;

// list sizing
pub(crate) const HEADER_TEXT: f32 = 14.0;
pub(crate) const ROW_TEXT: f32 = 14.0;
pub(crate) const SMALL_TEXT: f32 = 12.0;

pub(crate) const FILE_ROW_H: f32 = 26.0;
pub(crate) const FILE_ROW_VPAD: f32 = 2.0;
pub(crate) const FILE_ROW_HPAD: f32 = 8.0;
pub(crate) const FILE_LIST_SPACING: f32 = 1.0;
pub(crate) const MARKER_W: f32 = 24.0;

pub(crate) const RESULT_LIST_H: f32 = 260.0;

pub(crate) const COVER_BIG: f32 = 180.0;
