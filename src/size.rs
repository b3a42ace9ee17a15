use std::fmt;

/// Prefix shared by every label this tool manages.
pub const LABEL_PREFIX: &str = "size/";

const LABEL_UNKNOWN: &str = "size/?";

// Exclusive upper bounds of each bucket.
const THRESHOLD_S: u64 = 10;
const THRESHOLD_M: u64 = 30;
const THRESHOLD_L: u64 = 100;
const THRESHOLD_XL: u64 = 500;
const THRESHOLD_XXL: u64 = 1000;

/// Size bucket of a pull request, ordered from smallest to largest.
///
/// `Unknown` is never produced by [`Size::classify`]. It stands in for managed
/// labels whose suffix doesn't name a bucket (e.g. `size/huge`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
    Unknown,
}

impl Size {
    /// Map a changed line count to its bucket.
    pub fn classify(changes: u64) -> Size {
        match changes {
            c if c < THRESHOLD_S => Size::XS,
            c if c < THRESHOLD_M => Size::S,
            c if c < THRESHOLD_L => Size::M,
            c if c < THRESHOLD_XL => Size::L,
            c if c < THRESHOLD_XXL => Size::XL,
            _ => Size::XXL,
        }
    }

    /// The label carried by a pull request of this size.
    pub fn label(self) -> &'static str {
        match self {
            Size::XS => "size/XS",
            Size::S => "size/S",
            Size::M => "size/M",
            Size::L => "size/L",
            Size::XL => "size/XL",
            Size::XXL => "size/XXL",
            Size::Unknown => LABEL_UNKNOWN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Size::XS => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
            Size::XXL => "XXL",
            Size::Unknown => "Unknown",
        }
    }

    /// Interpret a label name as a size.
    ///
    /// Returns `None` for labels outside the `size/` namespace and
    /// `Some(Size::Unknown)` for managed labels with an unrecognised suffix.
    pub fn from_label(label: &str) -> Option<Size> {
        let suffix = label.strip_prefix(LABEL_PREFIX)?;
        let size = match suffix {
            "XS" => Size::XS,
            "S" => Size::S,
            "M" => Size::M,
            "L" => Size::L,
            "XL" => Size::XL,
            "XXL" => Size::XXL,
            _ => Size::Unknown,
        };
        Some(size)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a label is managed by this tool.
pub fn is_managed(label: &str) -> bool {
    label.starts_with(LABEL_PREFIX)
}
