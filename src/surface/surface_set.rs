//! Ordered collection of [`Surface`]s forming an optical scene.
use super::Surface;
use serde::{Deserialize, Serialize};

/// An ordered set of [`Surface`]s.
///
/// The order does not influence the traced paths except when a ray hits two surfaces at exactly the same
/// distance. In this case, the surface coming first wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSet {
    surfaces: Vec<Surface>,
}
impl SurfaceSet {
    /// Creates an empty [`SurfaceSet`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            surfaces: Vec::new(),
        }
    }
    /// Appends a [`Surface`] and returns its index.
    pub fn add_surface(&mut self, surface: Surface) -> usize {
        self.surfaces.push(surface);
        self.surfaces.len() - 1
    }
    /// Appends all surfaces of another [`SurfaceSet`].
    pub fn extend(&mut self, other: Self) {
        self.surfaces.extend(other.surfaces);
    }
    /// Returns the [`Surface`] with the given index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Surface> {
        self.surfaces.get(index)
    }
    /// Returns the number of surfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }
    /// Returns `true` if the set contains no surfaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
    /// Iterate over all surfaces in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Surface> {
        self.surfaces.iter()
    }
}
impl From<Vec<Surface>> for SurfaceSet {
    fn from(surfaces: Vec<Surface>) -> Self {
        Self { surfaces }
    }
}
impl FromIterator<Surface> for SurfaceSet {
    fn from_iter<T: IntoIterator<Item = Surface>>(iter: T) -> Self {
        Self {
            surfaces: iter.into_iter().collect(),
        }
    }
}
impl<'a> IntoIterator for &'a SurfaceSet {
    type Item = &'a Surface;
    type IntoIter = std::slice::Iter<'a, Surface>;

    fn into_iter(self) -> Self::IntoIter {
        self.surfaces.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{surface::Orientation, vector::Vector2};

    fn surface(y: f64) -> Surface {
        Surface::new(
            Vector2::new(0.0, y),
            Vector2::new(1.0, y),
            Orientation::Positive,
            1.5,
        )
        .unwrap()
    }
    #[test]
    fn new() {
        let set = SurfaceSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set, SurfaceSet::default());
    }
    #[test]
    fn add_surface() {
        let mut set = SurfaceSet::new();
        assert_eq!(set.add_surface(surface(0.0)), 0);
        assert_eq!(set.add_surface(surface(1.0)), 1);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1), Some(&surface(1.0)));
        assert!(set.get(2).is_none());
    }
    #[test]
    fn stable_order() {
        let set: SurfaceSet = (0..5).map(|i| surface(f64::from(i))).collect();
        let ys: Vec<f64> = set.iter().map(|s| s.start().y).collect();
        assert_eq!(ys, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        let ys: Vec<f64> = (&set).into_iter().map(|s| s.start().y).collect();
        assert_eq!(ys, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }
    #[test]
    fn extend() {
        let mut set = SurfaceSet::from(vec![surface(0.0)]);
        set.extend(SurfaceSet::from(vec![surface(1.0), surface(2.0)]));
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(2), Some(&surface(2.0)));
    }
}
