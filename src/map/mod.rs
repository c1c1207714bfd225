//! Map synchronization
//!
//! Keeps a map widget's marker and radius overlay consistent with the
//! session location. The widget itself (tiles, DOM, rendering) lives
//! behind the `MapWidget` trait; `MapSync` is the sole owner of one
//! widget instance per session and of its lifecycle.

use crate::coord::{circle_bounds, Coordinate, GeoBounds};
use crate::error::{Error, Result};
use crate::location::LocationSnapshot;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Marker and overlay styling, fixed for the lifetime of a widget
///
/// Passed to the widget on attach; never mutated on any shared state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapStyle {
    #[serde(default = "default_circle_color")]
    pub circle_color: String,
    #[serde(default = "default_circle_fill_opacity")]
    pub circle_fill_opacity: f64,
    #[serde(default = "default_circle_weight")]
    pub circle_weight: u32,
    /// Marker icon size in pixels (width, height)
    #[serde(default = "default_marker_icon_size")]
    pub marker_icon_size: (u32, u32),
    /// Marker anchor point in pixels from the icon's top-left corner
    #[serde(default = "default_marker_icon_anchor")]
    pub marker_icon_anchor: (u32, u32),
    /// Viewport padding when fitting the delivery circle
    #[serde(default = "default_fit_padding_px")]
    pub fit_padding_px: u32,
}

fn default_circle_color() -> String {
    "#2196F3".to_string()
}
fn default_circle_fill_opacity() -> f64 {
    0.1
}
fn default_circle_weight() -> u32 {
    2
}
fn default_marker_icon_size() -> (u32, u32) {
    (25, 41)
}
fn default_marker_icon_anchor() -> (u32, u32) {
    (12, 41)
}
fn default_fit_padding_px() -> u32 {
    50
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            circle_color: default_circle_color(),
            circle_fill_opacity: default_circle_fill_opacity(),
            circle_weight: default_circle_weight(),
            marker_icon_size: default_marker_icon_size(),
            marker_icon_anchor: default_marker_icon_anchor(),
            fit_padding_px: default_fit_padding_px(),
        }
    }
}

/// Rendering surface contract
///
/// Implemented by whatever actually draws the map (a Leaflet bridge, a
/// test double, ...). `attach` may fail when the container is not ready
/// yet; everything after a successful attach is expected to work.
pub trait MapWidget {
    /// Bind the widget to a rendering container, applying the style
    fn attach(&mut self, container: &str, style: &MapStyle) -> Result<()>;
    fn set_marker(&mut self, at: Coordinate) -> Result<()>;
    fn set_circle(&mut self, center: Coordinate, radius_km: f64) -> Result<()>;
    fn fit_bounds(&mut self, bounds: GeoBounds, padding_px: u32) -> Result<()>;
    fn detach(&mut self);
}

/// Projects the session location onto a map widget
///
/// Reacts to three triggers: first mount, coordinate change, radius
/// change. Each one reconciles marker, circle and viewport against the
/// latest snapshot.
pub struct MapSync<W: MapWidget> {
    widget: W,
    style: MapStyle,
    container: Option<String>,
    attached: bool,
}

impl<W: MapWidget> MapSync<W> {
    pub fn new(widget: W, style: MapStyle) -> Self {
        Self {
            widget,
            style,
            container: None,
            attached: false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Remember the rendering container and attempt a first paint
    ///
    /// A container that is not ready yet is recoverable: the attach is
    /// retried on the next state change.
    pub fn mount(&mut self, container: &str, snapshot: &LocationSnapshot) -> Result<()> {
        self.container = Some(container.to_string());
        self.sync(snapshot)
    }

    /// Reconcile the widget with the latest location snapshot
    ///
    /// With no resolved coordinate there is nothing to project yet.
    pub fn sync(&mut self, snapshot: &LocationSnapshot) -> Result<()> {
        let Some(center) = snapshot.coordinate else {
            debug!("no resolved coordinate yet, skipping map update");
            return Ok(());
        };

        if !self.attached {
            let Some(container) = self.container.clone() else {
                return Err(Error::MapInitFailed(
                    "no rendering container mounted".to_string(),
                ));
            };
            if let Err(e) = self.widget.attach(&container, &self.style) {
                warn!("map attach failed, will retry on next update: {}", e);
                return Err(Error::MapInitFailed(e.to_string()));
            }
            self.attached = true;
        }

        self.widget.set_marker(center)?;
        self.widget.set_circle(center, snapshot.radius_km)?;

        let bounds = circle_bounds(center, snapshot.radius_km);
        self.widget.fit_bounds(bounds, self.style.fit_padding_px)?;

        Ok(())
    }

    /// Release map resources; safe to call repeatedly
    pub fn teardown(&mut self) {
        if self.attached {
            self.widget.detach();
            self.attached = false;
        }
    }
}

impl<W: MapWidget> Drop for MapSync<W> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct WidgetOps {
        attaches: usize,
        detaches: usize,
        markers: Vec<Coordinate>,
        circles: Vec<(Coordinate, f64)>,
        fits: Vec<(GeoBounds, u32)>,
    }

    struct FakeWidget {
        ops: Arc<Mutex<WidgetOps>>,
        failing_attaches: usize,
    }

    impl FakeWidget {
        fn new() -> (Self, Arc<Mutex<WidgetOps>>) {
            Self::failing_first(0)
        }

        fn failing_first(failing_attaches: usize) -> (Self, Arc<Mutex<WidgetOps>>) {
            let ops = Arc::new(Mutex::new(WidgetOps::default()));
            (
                Self {
                    ops: Arc::clone(&ops),
                    failing_attaches,
                },
                ops,
            )
        }
    }

    impl MapWidget for FakeWidget {
        fn attach(&mut self, _container: &str, _style: &MapStyle) -> Result<()> {
            if self.failing_attaches > 0 {
                self.failing_attaches -= 1;
                return Err(Error::MapInitFailed("container not ready".to_string()));
            }
            self.ops.lock().unwrap().attaches += 1;
            Ok(())
        }

        fn set_marker(&mut self, at: Coordinate) -> Result<()> {
            self.ops.lock().unwrap().markers.push(at);
            Ok(())
        }

        fn set_circle(&mut self, center: Coordinate, radius_km: f64) -> Result<()> {
            self.ops.lock().unwrap().circles.push((center, radius_km));
            Ok(())
        }

        fn fit_bounds(&mut self, bounds: GeoBounds, padding_px: u32) -> Result<()> {
            self.ops.lock().unwrap().fits.push((bounds, padding_px));
            Ok(())
        }

        fn detach(&mut self) {
            self.ops.lock().unwrap().detaches += 1;
        }
    }

    fn snapshot(lat: f64, lng: f64, radius_km: f64) -> LocationSnapshot {
        LocationSnapshot {
            address: Some("Paris".to_string()),
            coordinate: Some(Coordinate::new(lat, lng)),
            radius_km,
        }
    }

    #[test]
    fn test_mount_paints_marker_circle_and_viewport() {
        let (widget, ops) = FakeWidget::new();
        let mut sync = MapSync::new(widget, MapStyle::default());

        sync.mount("map-container", &snapshot(48.8566, 2.3522, 5.0))
            .unwrap();

        let ops = ops.lock().unwrap();
        assert_eq!(ops.attaches, 1);
        assert_eq!(ops.markers.len(), 1);
        assert_eq!(ops.circles, vec![(Coordinate::new(48.8566, 2.3522), 5.0)]);
        assert_eq!(ops.fits.len(), 1);
        assert_eq!(ops.fits[0].1, 50);
    }

    #[test]
    fn test_viewport_always_shows_full_circle() {
        let (widget, ops) = FakeWidget::new();
        let mut sync = MapSync::new(widget, MapStyle::default());

        let center = Coordinate::new(48.8566, 2.3522);
        sync.mount("map-container", &snapshot(center.lat, center.lng, 10.0))
            .unwrap();

        let (bounds, _) = ops.lock().unwrap().fits[0];
        assert_eq!(bounds, circle_bounds(center, 10.0));
        // Cardinal edge points of the circle must be inside the viewport
        let north = Coordinate::new(center.lat + 10.0 / 111.32, center.lng);
        let south = Coordinate::new(center.lat - 10.0 / 111.32, center.lng);
        assert!(bounds.contains(north));
        assert!(bounds.contains(south));
    }

    #[test]
    fn test_coordinate_and_radius_changes_refit() {
        let (widget, ops) = FakeWidget::new();
        let mut sync = MapSync::new(widget, MapStyle::default());

        sync.mount("map-container", &snapshot(48.8566, 2.3522, 5.0))
            .unwrap();
        sync.sync(&snapshot(48.8738, 2.2950, 5.0)).unwrap();
        sync.sync(&snapshot(48.8738, 2.2950, 12.0)).unwrap();

        let ops = ops.lock().unwrap();
        assert_eq!(ops.attaches, 1); // attach happens once
        assert_eq!(ops.markers.len(), 3);
        assert_eq!(ops.circles[2], (Coordinate::new(48.8738, 2.2950), 12.0));
        assert_eq!(ops.fits.len(), 3);
    }

    #[test]
    fn test_attach_failure_is_recoverable() {
        let (widget, ops) = FakeWidget::failing_first(1);
        let mut sync = MapSync::new(widget, MapStyle::default());

        let err = sync
            .mount("map-container", &snapshot(48.8566, 2.3522, 5.0))
            .unwrap_err();
        assert!(matches!(err, Error::MapInitFailed(_)));
        assert!(!sync.is_attached());

        // Next trigger retries and succeeds
        sync.sync(&snapshot(48.8566, 2.3522, 5.0)).unwrap();
        assert!(sync.is_attached());
        assert_eq!(ops.lock().unwrap().attaches, 1);
        assert_eq!(ops.lock().unwrap().markers.len(), 1);
    }

    #[test]
    fn test_sync_without_container_fails_recoverably() {
        let (widget, _ops) = FakeWidget::new();
        let mut sync = MapSync::new(widget, MapStyle::default());

        let err = sync.sync(&snapshot(48.8566, 2.3522, 5.0)).unwrap_err();
        assert!(matches!(err, Error::MapInitFailed(_)));
    }

    #[test]
    fn test_no_coordinate_paints_nothing() {
        let (widget, ops) = FakeWidget::new();
        let mut sync = MapSync::new(widget, MapStyle::default());

        let empty = LocationSnapshot {
            address: None,
            coordinate: None,
            radius_km: 5.0,
        };
        sync.mount("map-container", &empty).unwrap();

        let ops = ops.lock().unwrap();
        assert_eq!(ops.attaches, 0);
        assert!(ops.markers.is_empty());
    }

    #[test]
    fn test_teardown_twice_detaches_once() {
        let (widget, ops) = FakeWidget::new();
        let mut sync = MapSync::new(widget, MapStyle::default());

        sync.mount("map-container", &snapshot(48.8566, 2.3522, 5.0))
            .unwrap();
        sync.teardown();
        sync.teardown();

        assert_eq!(ops.lock().unwrap().detaches, 1);
        assert!(!sync.is_attached());
    }

    #[test]
    fn test_drop_releases_resources_exactly_once() {
        let (widget, ops) = FakeWidget::new();
        {
            let mut sync = MapSync::new(widget, MapStyle::default());
            sync.mount("map-container", &snapshot(48.8566, 2.3522, 5.0))
                .unwrap();
        }
        assert_eq!(ops.lock().unwrap().detaches, 1);

        // Teardown before drop must not double-detach
        let (widget, ops) = FakeWidget::new();
        {
            let mut sync = MapSync::new(widget, MapStyle::default());
            sync.mount("map-container", &snapshot(48.8566, 2.3522, 5.0))
                .unwrap();
            sync.teardown();
        }
        assert_eq!(ops.lock().unwrap().detaches, 1);
    }

    #[test]
    fn test_remount_after_teardown_reattaches() {
        let (widget, ops) = FakeWidget::new();
        let mut sync = MapSync::new(widget, MapStyle::default());

        sync.mount("map-container", &snapshot(48.8566, 2.3522, 5.0))
            .unwrap();
        sync.teardown();
        sync.mount("map-container", &snapshot(48.8566, 2.3522, 5.0))
            .unwrap();

        let ops = ops.lock().unwrap();
        assert_eq!(ops.attaches, 2);
        assert_eq!(ops.detaches, 1);
    }
}
