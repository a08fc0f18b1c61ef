//! Pour region bounds.

use super::error::{PourError, PourResult};
use super::pad::Bounds;
use crate::circuit::{Board, Point};

/// The resolved extent of a pour region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionExtent {
    /// Axis-aligned bounding box of the region.
    pub bounds: Bounds,
    /// The polygon outline, when one was available.
    pub outline: Option<Vec<Point>>,
}

/// Resolves the bounds and outline of a pour region.
///
/// The outline is the caller's `outline_override` if given, else the board
/// outline. Bounds are the outline's bounding box; without a non-empty
/// outline they fall back to the board's `width` x `height` centred on the
/// origin.
///
/// # Errors
///
/// Returns [`PourError::MissingBoardDimensions`] if the fallback box is needed
/// but the board does not declare both `width` and `height`.
pub fn resolve_extent(
    board: &Board,
    outline_override: Option<&[Point]>,
) -> PourResult<RegionExtent> {
    let outline = outline_override
        .map(<[Point]>::to_vec)
        .or_else(|| board.outline.clone());

    if let Some(bounds) = outline.as_deref().and_then(Bounds::from_points) {
        return Ok(RegionExtent { bounds, outline });
    }

    let (Some(width), Some(height)) = (board.width, board.height) else {
        return Err(PourError::missing_board_dimensions(&board.id));
    };

    Ok(RegionExtent {
        bounds: Bounds::from_center(0.0, 0.0, width, height),
        outline,
    })
}
