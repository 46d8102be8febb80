use crate::types::PositionFix;

/// Ordered accumulation of position fixes for one tracking session.
///
/// A track only grows: fixes are appended in arrival order and never removed.
/// Starting a new session means starting a new `Track`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    fixes: Vec<PositionFix>,
}

impl Track {
    pub fn new() -> Self {
        Self { fixes: Vec::new() }
    }

    /// Appends a fix at the end of the track.
    pub fn push(&mut self, fix: PositionFix) {
        self.fixes.push(fix);
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    pub fn fixes(&self) -> &[PositionFix] {
        &self.fixes
    }

    pub fn last(&self) -> Option<&PositionFix> {
        self.fixes.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionFix> {
        self.fixes.iter()
    }

    /// Total path length in meters along consecutive fixes.
    pub fn length_meters(&self) -> f64 {
        self.fixes
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }
}

impl FromIterator<PositionFix> for Track {
    fn from_iter<I: IntoIterator<Item = PositionFix>>(iter: I) -> Self {
        Self {
            fixes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a PositionFix;
    type IntoIter = std::slice::Iter<'a, PositionFix>;

    fn into_iter(self) -> Self::IntoIter {
        self.fixes.iter()
    }
}

impl From<Vec<PositionFix>> for Track {
    fn from(fixes: Vec<PositionFix>) -> Self {
        Self { fixes }
    }
}
