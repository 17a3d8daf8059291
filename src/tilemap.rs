use crate::error::CityError;

/// 4-connected offsets in canonical order: up, down, right, left.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// A bounded 2D tilemap grid (no wrapping on either axis).
///
/// Coordinates are signed so that stepping off an edge yields an
/// out-of-range position rather than wrapping around.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, CityError> {
        if self.in_bounds(x, y) {
            Ok(y as usize * self.width + x as usize)
        } else {
            Err(CityError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Result<&T, CityError> {
        let idx = self.index(x, y)?;
        Ok(&self.data[idx])
    }

    pub fn set(&mut self, x: i32, y: i32, value: T) -> Result<(), CityError> {
        let idx = self.index(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    /// In-bounds 4-connected neighbors, in up/down/right/left order.
    pub fn neighbors(&self, x: i32, y: i32) -> Vec<(i32, i32)> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| (x + dx, y + dy))
            .filter(|&(nx, ny)| self.in_bounds(nx, ny))
            .collect()
    }

    /// In-bounds cells of the square neighborhood of `radius` around (x, y),
    /// center included. The window is clamped at the map edges.
    pub fn window(&self, x: i32, y: i32, radius: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        (y - radius..=y + radius)
            .flat_map(move |wy| (x - radius..=x + radius).map(move |wx| (wx, wy)))
            .filter(move |&(wx, wy)| self.in_bounds(wx, wy))
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = (idx % width) as i32;
            let y = (idx / width) as i32;
            (x, y, val)
        })
    }

    /// Count cells matching a predicate.
    pub fn count<F: Fn(&T) -> bool>(&self, pred: F) -> usize {
        self.data.iter().filter(|v| pred(*v)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_default_filled() {
        let map: Tilemap<u8> = Tilemap::new(4, 3);
        assert_eq!(map.count(|v| *v == 0), 12);
        assert_eq!(*map.get(3, 2).unwrap(), 0);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut map: Tilemap<u8> = Tilemap::new(4, 3);
        assert!(matches!(map.get(4, 0), Err(CityError::OutOfRange { x: 4, y: 0, .. })));
        assert!(map.get(-1, 0).is_err());
        assert!(map.get(0, 3).is_err());
        assert!(map.set(0, -1, 7).is_err());
        assert_eq!(map.count(|v| *v != 0), 0);
    }

    #[test]
    fn test_set_and_iter_coordinates() {
        let mut map: Tilemap<u8> = Tilemap::new(5, 5);
        map.set(2, 3, 9).unwrap();
        let hits: Vec<_> = map.iter().filter(|(_, _, v)| **v == 9).map(|(x, y, _)| (x, y)).collect();
        assert_eq!(hits, vec![(2, 3)]);
    }

    #[test]
    fn test_neighbors_clip_at_edges() {
        let map: Tilemap<u8> = Tilemap::new(5, 5);
        assert_eq!(map.neighbors(2, 2), vec![(2, 3), (2, 1), (3, 2), (1, 2)]);
        assert_eq!(map.neighbors(0, 0), vec![(0, 1), (1, 0)]);
        assert_eq!(map.neighbors(4, 4), vec![(4, 3), (3, 4)]);
    }

    #[test]
    fn test_window_is_clamped() {
        let map: Tilemap<u8> = Tilemap::new(5, 5);
        assert_eq!(map.window(2, 2, 1).count(), 9);
        assert_eq!(map.window(0, 0, 1).count(), 4);
        assert_eq!(map.window(4, 2, 1).count(), 6);
    }
}
