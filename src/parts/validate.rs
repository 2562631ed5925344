use std::fmt;

use crate::units::Length;

use super::material::MaterialKind;

/// Dimension match tolerance, in mm.
pub const DIMENSION_TOLERANCE: f64 = 0.1;

/// A part that cannot be cut from the configured stock.
#[derive(Debug, Clone, PartialEq)]
pub enum PartIssue {
    /// Two smallest dimensions match no configured cross-section.
    CrossSectionMismatch { small: Length, big: Length },
    LengthExceedsStock { length: Length, max: Length },
    ThicknessMismatch { thickness: Length },
    /// Face does not fit on any configured sheet.
    SheetSizeExceeded { width: Length, length: Length },
}

impl fmt::Display for PartIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CrossSectionMismatch { small, big } => {
                write!(f, "cross section {small} x {big} is not available")
            }
            Self::LengthExceedsStock { length, max } => {
                write!(f, "length {length} exceeds the longest stock length {max}")
            }
            Self::ThicknessMismatch { thickness } => {
                write!(f, "thickness {thickness} is not available")
            }
            Self::SheetSizeExceeded { width, length } => {
                write!(f, "{width} x {length} does not fit on any sheet")
            }
        }
    }
}

/// Checks a part's sorted dimensions against the material's stock.
/// Empty stock lists are not checked.
#[must_use]
pub fn validate_part(kind: &MaterialKind, dims: [f64; 3]) -> Vec<PartIssue> {
    let [a, b, c] = dims;
    let mut issues = Vec::new();
    match kind {
        MaterialKind::Dimensional {
            cross_sections,
            lengths,
        } => {
            let section_ok = cross_sections.is_empty()
                || cross_sections
                    .iter()
                    .any(|s| near(s.small.value(), a) && near(s.big.value(), b));
            if !section_ok {
                issues.push(PartIssue::CrossSectionMismatch {
                    small: Length(a),
                    big: Length(b),
                });
            }
            if let Some(max) = lengths.iter().copied().reduce(Length::max) {
                if c > max.value() + DIMENSION_TOLERANCE {
                    issues.push(PartIssue::LengthExceedsStock {
                        length: Length(c),
                        max,
                    });
                }
            }
        }
        MaterialKind::Sheet { sizes, thicknesses } => {
            if !thicknesses.is_empty() && !thicknesses.iter().any(|t| near(t.value(), a)) {
                issues.push(PartIssue::ThicknessMismatch {
                    thickness: Length(a),
                });
            }
            let fits = sizes.is_empty()
                || sizes.iter().any(|s| {
                    b <= s.small.value() + DIMENSION_TOLERANCE
                        && c <= s.big.value() + DIMENSION_TOLERANCE
                });
            if !fits {
                issues.push(PartIssue::SheetSizeExceeded {
                    width: Length(b),
                    length: Length(c),
                });
            }
        }
        MaterialKind::Strawbale { .. } | MaterialKind::Volume | MaterialKind::Generic => {}
    }
    issues
}

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() <= DIMENSION_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::material::{CrossSection, SheetSize};

    fn timber() -> MaterialKind {
        MaterialKind::Dimensional {
            cross_sections: vec![CrossSection::new(Length::mm(60.0), Length::mm(120.0))],
            lengths: vec![Length::mm(4000.0), Length::mm(5000.0)],
        }
    }

    fn osb() -> MaterialKind {
        MaterialKind::Sheet {
            sizes: vec![SheetSize::new(Length::mm(2500.0), Length::mm(1250.0))],
            thicknesses: vec![Length::mm(15.0), Length::mm(18.0)],
        }
    }

    #[test]
    fn matching_timber_has_no_issues() {
        assert!(validate_part(&timber(), [60.0, 120.0, 5000.0]).is_empty());
    }

    #[test]
    fn timber_mismatches() {
        let issues = validate_part(&timber(), [80.0, 120.0, 6000.0]);
        assert_eq!(
            issues,
            vec![
                PartIssue::CrossSectionMismatch {
                    small: Length(80.0),
                    big: Length(120.0)
                },
                PartIssue::LengthExceedsStock {
                    length: Length(6000.0),
                    max: Length(5000.0)
                },
            ]
        );
        assert_eq!(
            issues[1].to_string(),
            "length 6000mm exceeds the longest stock length 5000mm"
        );
    }

    #[test]
    fn sheet_checks_thickness_and_face() {
        assert!(validate_part(&osb(), [15.0, 1250.0, 2500.0]).is_empty());
        assert_eq!(
            validate_part(&osb(), [22.0, 1300.0, 2000.0]),
            vec![
                PartIssue::ThicknessMismatch {
                    thickness: Length(22.0)
                },
                PartIssue::SheetSizeExceeded {
                    width: Length(1300.0),
                    length: Length(2000.0)
                },
            ]
        );
    }

    #[test]
    fn unconstrained_stock_accepts_anything() {
        let kind = MaterialKind::Dimensional {
            cross_sections: Vec::new(),
            lengths: Vec::new(),
        };
        assert!(validate_part(&kind, [1.0, 2.0, 99_999.0]).is_empty());
        assert!(validate_part(&MaterialKind::Generic, [1.0, 2.0, 3.0]).is_empty());
    }
}
