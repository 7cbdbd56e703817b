/// Why a coordinate axis could not be resolved to an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisLookupError {
    /// The axis has no (finite) points.
    Empty,
    /// The target lies more than half a grid step beyond the axis ends.
    OutOfBounds,
}

/// Find the index of the axis point closest to `target`.
///
/// Ties resolve to the lower index. Axes may be ascending or descending;
/// non-finite axis values are ignored. A target beyond either end of the
/// axis by more than half the mean grid step is rejected rather than clamped
/// to the edge cell. A single-point axis has no step to measure, so every
/// target resolves to that point.
///
/// # Examples
/// ```
/// use chirps_extractor::utils::nearest_index;
///
/// let lats = [-1.0, -0.5, 0.0, 0.5, 1.0];
/// assert_eq!(nearest_index(&lats, 0.3), Ok(3));
/// ```
pub fn nearest_index(axis: &[f64], target: f64) -> Result<usize, AxisLookupError> {
    let mut best: Option<(usize, f64)> = None;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut finite_points = 0usize;

    for (i, &value) in axis.iter().enumerate() {
        if !value.is_finite() {
            continue;
        }
        finite_points += 1;
        min = min.min(value);
        max = max.max(value);

        let distance = (value - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }

    let (index, _) = best.ok_or(AxisLookupError::Empty)?;
    if finite_points == 1 {
        return Ok(index);
    }

    let half_step = (max - min) / (finite_points - 1) as f64 / 2.0;
    let tolerance = half_step + f64::EPSILON * max.abs().max(min.abs()).max(1.0);

    if target < min - tolerance || target > max + tolerance {
        return Err(AxisLookupError::OutOfBounds);
    }

    Ok(index)
}

/// Row-major flat offset of `indices` within an array of shape `shape`.
///
/// Returns `None` when the ranks differ or an index is outside its dimension.
pub fn flat_index(indices: &[usize], shape: &[usize]) -> Option<usize> {
    if indices.len() != shape.len() {
        return None;
    }

    let mut offset = 0usize;
    for (&index, &len) in indices.iter().zip(shape) {
        if index >= len {
            return None;
        }
        offset = offset * len + index;
    }
    Some(offset)
}

/// Both coordinates must be finite numbers before any lookup is attempted.
pub fn is_valid_coordinate(lon: f64, lat: f64) -> bool {
    lon.is_finite() && lat.is_finite()
}
