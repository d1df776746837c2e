//! Flags for the nodes of a raster which carry data.

use std::fmt::Display;

/// Type to flag a raster node as being inside or outside the region where data is defined.
///
/// `DomainMask::Inside` converts to `1f64` and `DomainMask::Outside` to `0f64`.
///
/// # Examples
/// To create a mask where the rim of the raster carries no data:
/// ```
/// use icefield::array::ArrND;
/// use icefield::mask::DomainMask;
///
/// let mask = ArrND::from_fn([5, 10], |[j, i]| DomainMask::from((1..4).contains(&j) && (1..9).contains(&i)));
///
/// assert!(mask[[1, 1]].is_inside());
/// assert!(mask[[0, 1]].is_outside());
/// assert_eq!(f64::from(mask[[2, 2]]), 1.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DomainMask {
    /// No data at this node.
    Outside,
    /// Data is defined at this node.
    #[default]
    Inside,
}

impl DomainMask {
    pub fn is_inside(&self) -> bool {
        *self == DomainMask::Inside
    }

    pub fn is_outside(&self) -> bool {
        !self.is_inside()
    }
}

impl From<bool> for DomainMask {
    fn from(inside: bool) -> Self {
        if inside {
            DomainMask::Inside
        } else {
            DomainMask::Outside
        }
    }
}

impl From<DomainMask> for f64 {
    fn from(mask: DomainMask) -> Self {
        match mask {
            DomainMask::Inside => 1f64,
            DomainMask::Outside => 0f64,
        }
    }
}

impl Display for DomainMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainMask::Outside => write!(f, "{:7}", "Outside"),
            DomainMask::Inside => write!(f, "{:7}", "Inside"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::DomainMask;

    #[test]
    fn default_is_inside() {
        assert!(DomainMask::default().is_inside());
    }

    #[test]
    fn conversion_from_bool() {
        assert_eq!(DomainMask::from(true), DomainMask::Inside);
        assert_eq!(DomainMask::from(false), DomainMask::Outside);
    }

    #[test]
    fn display_is_padded() {
        assert_eq!(format!("{}", DomainMask::Inside), "Inside ");
        assert_eq!(format!("{}", DomainMask::Outside), "Outside");
    }
}
