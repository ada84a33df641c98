//! Pixel silhouettes and overlap tests.
//!
//! Sprites are not loaded, so each silhouette is generated from the sprite
//! dimensions in [`WorldConfig`]: an ellipse for the bird and a capped tube for
//! each pipe.

use super::config::WorldConfig;

/// A rectangular grid of solid/empty pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Mask with every pixel set.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; width as usize * height as usize],
        }
    }

    /// Build a mask by evaluating `solid(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, solid: impl Fn(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(solid(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Ellipse inscribed in a `width` x `height` box.
    pub fn ellipse(width: u32, height: u32) -> Self {
        let rx = width as f64 / 2.0;
        let ry = height as f64 / 2.0;
        Self::from_fn(width, height, |x, y| {
            let dx = (x as f64 + 0.5 - rx) / rx;
            let dy = (y as f64 + 0.5 - ry) / ry;
            dx * dx + dy * dy <= 1.0
        })
    }

    /// Pipe opening upward: a full-width lip on top and a narrower body below.
    pub fn pipe(width: u32, height: u32, cap_height: u32, inset: u32) -> Self {
        Self::from_fn(width, height, |x, y| {
            y < cap_height || (x >= inset && x + inset < width)
        })
    }

    /// Mirror top to bottom.
    pub fn flipped_vertical(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.get(x, self.height - 1 - y)
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Number of solid pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// First pixel (in this mask's coordinates) where `self` and `other`
    /// are both solid, with `other` placed at `offset` relative to `self`.
    pub fn overlap(&self, other: &Mask, offset: (i64, i64)) -> Option<(u32, u32)> {
        let (ox, oy) = offset;

        // Intersection rectangle in self's coordinates.
        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + other.width as i64).min(self.width as i64);
        let y1 = (oy + other.height as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x as u32, y as u32) && other.get((x - ox) as u32, (y - oy) as u32) {
                    return Some((x as u32, y as u32));
                }
            }
        }
        None
    }
}

/// The three silhouettes an episode collides against.
#[derive(Debug, Clone)]
pub struct Silhouettes {
    pub bird: Mask,
    pub pipe_top: Mask,
    pub pipe_bottom: Mask,
}

impl Silhouettes {
    pub fn from_config(config: &WorldConfig) -> Self {
        let pipe_bottom = Mask::pipe(
            config.pipe_width,
            config.pipe_height,
            config.pipe_cap_height,
            config.pipe_body_inset,
        );
        Self {
            bird: Mask::ellipse(config.bird_width, config.bird_height),
            pipe_top: pipe_bottom.flipped_vertical(),
            pipe_bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_masks_do_not_overlap() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(10, 10);
        assert_eq!(a.overlap(&b, (10, 0)), None);
        assert_eq!(a.overlap(&b, (0, -10)), None);
    }

    #[test]
    fn test_touching_corner_overlaps() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(10, 10);
        assert_eq!(a.overlap(&b, (9, 9)), Some((9, 9)));
        assert_eq!(a.overlap(&b, (-9, -9)), Some((0, 0)));
    }

    #[test]
    fn test_ellipse_corners_are_empty() {
        let bird = Mask::ellipse(68, 48);
        assert!(!bird.get(0, 0));
        assert!(!bird.get(67, 47));
        assert!(bird.get(34, 24));
    }

    #[test]
    fn test_bounding_boxes_overlap_but_pixels_do_not() {
        // Ellipse corner against a block sitting in the corner of its box.
        let bird = Mask::ellipse(68, 48);
        let block = Mask::filled(4, 4);
        assert_eq!(bird.overlap(&block, (64, 44)), None);
        assert!(bird.overlap(&block, (32, 22)).is_some());
    }

    #[test]
    fn test_pipe_lip_is_wider_than_body() {
        let pipe = Mask::pipe(104, 640, 48, 4);
        assert!(pipe.get(0, 0));
        assert!(!pipe.get(0, 100));
        assert!(pipe.get(4, 100));
        assert!(!pipe.get(100, 100));

        let top = pipe.flipped_vertical();
        assert!(top.get(0, 639));
        assert!(!top.get(0, 0));
        assert_eq!(top.count(), pipe.count());
    }
}
