use std::fmt;

use crate::math::{Polygon2D, Vec3, LENGTH_TOLERANCE};

use super::element::PartInfo;

/// Part identity shared by all congruent elements of one material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(String);

impl PartId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Edge lengths sorted ascending.
#[must_use]
pub fn sorted_dimensions(size: &Vec3) -> [f64; 3] {
    let mut dims = [size.x.abs(), size.y.abs(), size.z.abs()];
    dims.sort_by(f64::total_cmp);
    dims
}

/// Dimension string at 0.1 mm resolution, e.g. `60x120x2500`.
#[must_use]
pub fn dimensions_key(size: &Vec3) -> String {
    sorted_dimensions(size)
        .iter()
        .map(|d| format_dimension(*d))
        .collect::<Vec<_>>()
        .join("x")
}

/// Identity of a part: its sorted dimensions, plus the outline signature for
/// non-rectangular parts. Outlined parts are measured in their own frame, see
/// [`PartInfo::canonical_size`].
#[must_use]
pub fn part_id_for(info: &PartInfo) -> PartId {
    let dims = dimensions_key(&info.canonical_size());
    match info.polygon.as_ref().and_then(polygon_signature) {
        Some(signature) => PartId(format!("{dims}/{signature}")),
        None => PartId(dims),
    }
}

/// Placement-independent outline signature, or `None` for rectangles and
/// degenerate outlines.
///
/// Built from turn angles (0.1°) and edge lengths (0.1 mm) and reduced to
/// the smallest rotation over both traversal directions, so translated,
/// rotated, re-started or mirrored copies share one signature.
#[must_use]
pub fn polygon_signature(polygon: &Polygon2D) -> Option<String> {
    let mut polygon = polygon.deduplicated(LENGTH_TOLERANCE);
    if polygon.len() < 3 || polygon.area() < LENGTH_TOLERANCE {
        return None;
    }
    if polygon.is_clockwise() {
        polygon.points.reverse();
    }

    let n = polygon.len();
    let turns: Vec<i64> = polygon
        .turn_angles()
        .into_iter()
        .map(|a| quantize(a.to_degrees()))
        .collect();
    if n == 4 && turns.iter().all(|t| *t == 900) {
        return None;
    }
    let lengths: Vec<i64> = polygon.edges().map(|e| quantize(e.length())).collect();

    // Forward: turn at vertex i, then edge i. Backward (mirror image): turn
    // at vertex i, then edge i - 1.
    let forward: Vec<(i64, i64)> = (0..n).map(|i| (turns[i], lengths[i])).collect();
    let backward: Vec<(i64, i64)> = (0..n)
        .rev()
        .map(|i| (turns[i], lengths[(i + n - 1) % n]))
        .collect();

    let canonical = [forward, backward]
        .iter()
        .flat_map(|seq| (0..n).map(move |start| rotated(seq, start)))
        .min()?;

    Some(
        canonical
            .iter()
            .map(|(turn, length)| format!("{}@{}", format_tenths(*turn), format_tenths(*length)))
            .collect::<Vec<_>>()
            .join(","),
    )
}

fn rotated(seq: &[(i64, i64)], start: usize) -> Vec<(i64, i64)> {
    seq[start..].iter().chain(&seq[..start]).copied().collect()
}

#[allow(clippy::cast_possible_truncation)]
fn quantize(value: f64) -> i64 {
    (value * 10.0).round() as i64
}

fn format_dimension(value: f64) -> String {
    format_tenths(quantize(value))
}

fn format_tenths(tenths: i64) -> String {
    if tenths % 10 == 0 {
        format!("{}", tenths / 10)
    } else {
        let sign = if tenths < 0 { "-" } else { "" };
        let abs = tenths.abs();
        format!("{sign}{}.{}", abs / 10, abs % 10)
    }
}
