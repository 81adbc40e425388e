// ============================================================================
// VIEW TRANSFORM — pan/zoom mapping between output pixels and source pixels
// ============================================================================

/// Zoom floor. Together with the epsilon in the mapping this keeps the
/// divide well away from zero.
pub const MIN_ZOOM: f32 = 0.05;
/// Zoom ceiling.
pub const MAX_ZOOM: f32 = 20.0;

const ZOOM_EPS: f32 = 1e-6;

/// Pan/zoom state: `center` in source-pixel units is the source point shown
/// at the middle of the output, `zoom` is output pixels per source pixel.
///
/// The mapping is `src = (out − 0.5·outputSize) / zoom + center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub center_x: f32,
    pub center_y: f32,
    pub zoom: f32,
}

impl ViewTransform {
    /// 1:1 view centered on the image. Also the transform every export and
    /// headless render uses.
    pub fn centered(src_w: u32, src_h: u32) -> Self {
        Self {
            center_x: src_w as f32 / 2.0,
            center_y: src_h as f32 / 2.0,
            zoom: 1.0,
        }
    }

    /// Center the image and pick the largest zoom that fits it entirely
    /// inside an output of the given size.
    pub fn fit(src_w: u32, src_h: u32, out_w: f32, out_h: f32) -> Self {
        let mut v = Self::centered(src_w, src_h);
        if src_w > 0 && src_h > 0 && out_w > 0.0 && out_h > 0.0 {
            let fit = (out_w / src_w as f32).min(out_h / src_h as f32);
            v.zoom = fit.clamp(MIN_ZOOM, MAX_ZOOM);
        }
        v
    }

    /// Map an output-pixel coordinate to a source-pixel coordinate.
    #[inline]
    pub fn output_to_source(&self, ox: f32, oy: f32, out_w: f32, out_h: f32) -> (f32, f32) {
        let z = self.zoom.max(ZOOM_EPS);
        (
            (ox - 0.5 * out_w) / z + self.center_x,
            (oy - 0.5 * out_h) / z + self.center_y,
        )
    }

    /// Pan by an output-space delta (e.g. a mouse drag): the image follows
    /// the cursor, so the center moves against the drag.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        let z = self.zoom.max(ZOOM_EPS);
        self.center_x -= dx / z;
        self.center_y -= dy / z;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Multiply the zoom while keeping the source point under an output-space
    /// anchor (e.g. the cursor) fixed on screen.
    pub fn zoom_about(&mut self, factor: f32, anchor_x: f32, anchor_y: f32, out_w: f32, out_h: f32) {
        let (sx, sy) = self.output_to_source(anchor_x, anchor_y, out_w, out_h);
        self.set_zoom(self.zoom * factor);
        let z = self.zoom.max(ZOOM_EPS);
        self.center_x = sx - (anchor_x - 0.5 * out_w) / z;
        self.center_y = sy - (anchor_y - 0.5 * out_h) / z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_maps_output_center_to_image_center() {
        let v = ViewTransform::centered(400, 300);
        let (sx, sy) = v.output_to_source(320.0, 240.0, 640.0, 480.0);
        assert!((sx - 200.0).abs() < 1e-4);
        assert!((sy - 150.0).abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut v = ViewTransform::centered(100, 100);
        v.set_zoom(1000.0);
        assert_eq!(v.zoom, MAX_ZOOM);
        v.set_zoom(0.0);
        assert_eq!(v.zoom, MIN_ZOOM);
    }

    #[test]
    fn fit_view_contains_whole_image() {
        let v = ViewTransform::fit(1000, 500, 640.0, 480.0);
        let (left, top) = v.output_to_source(0.0, 0.0, 640.0, 480.0);
        let (right, bottom) = v.output_to_source(640.0, 480.0, 640.0, 480.0);
        assert!(left <= 0.0 + 1e-3 && top <= 0.0 + 1e-3);
        assert!(right >= 1000.0 - 1e-3 && bottom >= 500.0 - 1e-3);
    }

    #[test]
    fn zoom_about_keeps_anchor_fixed() {
        let mut v = ViewTransform::centered(800, 600);
        let (before_x, before_y) = v.output_to_source(100.0, 50.0, 640.0, 480.0);
        v.zoom_about(1.7, 100.0, 50.0, 640.0, 480.0);
        let (after_x, after_y) = v.output_to_source(100.0, 50.0, 640.0, 480.0);
        assert!((before_x - after_x).abs() < 1e-3);
        assert!((before_y - after_y).abs() < 1e-3);
    }

    #[test]
    fn pan_moves_center_against_drag() {
        let mut v = ViewTransform::centered(800, 600);
        v.set_zoom(2.0);
        v.pan_by(10.0, -4.0);
        assert!((v.center_x - 395.0).abs() < 1e-4);
        assert!((v.center_y - 302.0).abs() < 1e-4);
    }
}
