/// A 2D rectangular grid of tiles, row-major with (0, 0) at the top-left.
///
/// The map is a bounded region: neighbor lookups clip at every edge rather
/// than wrapping.
#[derive(Clone, Debug, PartialEq)]
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
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build a tilemap from an already-populated row-major buffer.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), width * height, "buffer does not match dimensions");
        Self { width, height, data }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Get the in-bounds 4-connected neighbors (left, right, up, down).
    /// Returns 2-4 coordinates depending on proximity to the map edges.
    pub fn neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(4);

        if x > 0 {
            result.push((x - 1, y));
        }
        if x + 1 < self.width {
            result.push((x + 1, y));
        }
        if y > 0 {
            result.push((x, y - 1));
        }
        if y + 1 < self.height {
            result.push((x, y + 1));
        }

        result
    }

    /// Iterate over all cells with their coordinates, in raster order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates, in raster order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip() {
        let mut map = Tilemap::new_with(4, 3, 0i32);
        map.set(3, 2, 42);
        assert_eq!(*map.get(3, 2), 42);
        assert_eq!(*map.get(0, 0), 0);
    }

    #[test]
    fn test_neighbors_clip_at_edges() {
        let map = Tilemap::new_with(3, 3, 0u8);

        assert_eq!(map.neighbors(1, 1).len(), 4);
        assert_eq!(map.neighbors(0, 0), vec![(1, 0), (0, 1)]);
        assert_eq!(map.neighbors(2, 1).len(), 3);
        assert_eq!(map.neighbors(1, 2).len(), 3);
    }

    #[test]
    fn test_single_cell_has_no_neighbors() {
        let map = Tilemap::new_with(1, 1, 0u8);
        assert!(map.neighbors(0, 0).is_empty());
    }

    #[test]
    fn test_iter_raster_order() {
        let map = Tilemap::from_vec(2, 2, vec![1, 2, 3, 4]);
        let cells: Vec<(usize, usize, i32)> = map.iter().map(|(x, y, &v)| (x, y, v)).collect();
        assert_eq!(cells, vec![(0, 0, 1), (1, 0, 2), (0, 1, 3), (1, 1, 4)]);
    }
}
